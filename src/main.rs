use clap::Parser;
use log::{error, info, warn};
use meshview::app::run_gui;
use meshview::io::cli::Cli;
use meshview::scene::loader::load_model;
use meshview::scene::texture::Texture;
use meshview::scene::view_state::ViewState;

fn main() -> Result<(), String> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .filter_module("eframe", log::LevelFilter::Warn)
        .filter_module("egui_glow", log::LevelFilter::Warn)
        .filter_module("egui_winit", log::LevelFilter::Warn)
        .filter_module("winit", log::LevelFilter::Warn)
        .filter_module("wgpu", log::LevelFilter::Warn)
        .filter_module("glutin", log::LevelFilter::Warn)
        .filter_module("sctk", log::LevelFilter::Warn)
        .parse_default_env()
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();

    let config = cli.load_config().map_err(|e| {
        error!("Failed to load config: {e}");
        "config error".to_string()
    })?;

    let model = load_model(&cli.obj).map_err(|e| {
        error!("Failed to load model '{}': {e}", cli.obj.display());
        "model load error".to_string()
    })?;

    let texture = cli.texture_path(&config).and_then(|path| {
        Texture::load(&path)
            .inspect_err(|e| warn!("Texture '{}' not loaded, using vertex colors: {e}", path.display()))
            .ok()
    });

    let state = ViewState::from_config(&config);

    if cli.headless {
        info!(
            "Model '{}': {} vertices, {} triangles, center {:?}, scale {:.4}",
            model.name,
            model.vertex_count(),
            model.triangle_count(),
            model.center,
            model.scale
        );
        info!("Initial model matrix:{}", state.model_matrix());
        return Ok(());
    }

    run_gui(model, state, texture, &config).map_err(|e| {
        error!("GUI failed: {e}");
        "GUI error".to_string()
    })
}
