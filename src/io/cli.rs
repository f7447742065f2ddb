use crate::error::ConfigError;
use crate::io::config::Config;
use clap::Parser;
use log::info;
use std::path::PathBuf;

/// Interactive OBJ viewer with trackball rotation
#[derive(Parser, Debug)]
#[command(name = "meshview")]
#[command(about = "Interactive OBJ mesh viewer with trackball rotation")]
pub struct Cli {
    /// OBJ model to open
    #[arg(value_name = "OBJ")]
    pub obj: PathBuf,

    /// Startup configuration (TOML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Texture image for the projection modes, overrides `[files] texture`
    #[arg(short, long, value_name = "FILE")]
    pub texture: Option<PathBuf>,

    /// Load the model, print a summary and exit without opening a window
    #[arg(long)]
    pub headless: bool,
}

impl Cli {
    /// Loads the configuration file if one was given, defaults otherwise.
    pub fn load_config(&self) -> Result<Config, ConfigError> {
        match &self.config {
            Some(path) => {
                info!("Loading config: {}", path.display());
                Config::load(path)
            }
            None => {
                info!("No config given, using defaults");
                Ok(Config::default())
            }
        }
    }

    /// Texture path from the command line, falling back to the config.
    pub fn texture_path(&self, config: &Config) -> Option<PathBuf> {
        self.texture
            .clone()
            .or_else(|| config.files.texture.as_ref().map(PathBuf::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_flags() {
        let cli = Cli::try_parse_from([
            "meshview",
            "bunny.obj",
            "-c",
            "view.toml",
            "--texture",
            "wood.png",
            "--headless",
        ])
        .unwrap();
        assert_eq!(cli.obj, PathBuf::from("bunny.obj"));
        assert_eq!(cli.config, Some(PathBuf::from("view.toml")));
        assert_eq!(cli.texture, Some(PathBuf::from("wood.png")));
        assert!(cli.headless);
    }

    #[test]
    fn model_path_is_required() {
        assert!(Cli::try_parse_from(["meshview"]).is_err());
    }

    #[test]
    fn command_line_texture_wins_over_config() {
        let config = Config::from_toml("[files]\ntexture = \"from_config.png\"").unwrap();

        let cli = Cli::try_parse_from(["meshview", "m.obj"]).unwrap();
        assert_eq!(cli.texture_path(&config), Some(PathBuf::from("from_config.png")));

        let cli = Cli::try_parse_from(["meshview", "m.obj", "-t", "cli.png"]).unwrap();
        assert_eq!(cli.texture_path(&config), Some(PathBuf::from("cli.png")));
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let cli = Cli::try_parse_from(["meshview", "m.obj", "-c", "/nonexistent/view.toml"]).unwrap();
        assert!(matches!(cli.load_config(), Err(ConfigError::Read(_))));
    }
}
