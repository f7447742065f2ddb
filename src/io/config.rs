use crate::error::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Startup defaults for the viewer, read from a TOML file.
///
/// Every section and field is optional; missing values fall back to the
/// defaults below.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub light: LightConfig,
    #[serde(default)]
    pub material: MaterialConfig,
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub files: FilesConfig,
}

#[derive(Debug, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_width")]
    pub width: f32,
    #[serde(default = "default_height")]
    pub height: f32,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_target_fps")]
    pub target_fps: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            title: default_title(),
            target_fps: default_target_fps(),
        }
    }
}

fn default_width() -> f32 {
    860.0
}
fn default_height() -> f32 {
    640.0
}
fn default_title() -> String {
    "trackball".to_string()
}
fn default_target_fps() -> f32 {
    30.0
}

#[derive(Debug, Deserialize)]
pub struct CameraConfig {
    #[serde(default = "default_camera_position")]
    pub position: [f32; 3],
    #[serde(default = "default_fov")]
    pub fov: f32,
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: default_camera_position(),
            fov: default_fov(),
            near: default_near(),
            far: default_far(),
        }
    }
}

fn default_camera_position() -> [f32; 3] {
    [0.0, 0.0, 3.0]
}
fn default_fov() -> f32 {
    45.0
}
fn default_near() -> f32 {
    0.1
}
fn default_far() -> f32 {
    100.0
}

#[derive(Debug, Deserialize)]
pub struct LightConfig {
    #[serde(default = "default_light_position")]
    pub position: [f32; 3],
    #[serde(default = "default_light_color")]
    pub color: [f32; 3],
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            position: default_light_position(),
            color: default_light_color(),
        }
    }
}

fn default_light_position() -> [f32; 3] {
    [2.0, 2.0, 3.0]
}
fn default_light_color() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

#[derive(Debug, Deserialize)]
pub struct MaterialConfig {
    #[serde(default = "default_ka")]
    pub ka: f32,
    #[serde(default = "default_kd")]
    pub kd: f32,
    #[serde(default = "default_ks")]
    pub ks: f32,
    #[serde(default = "default_shininess")]
    pub shininess: f32,
    #[serde(default = "default_true")]
    pub lighting: bool,
}

impl Default for MaterialConfig {
    fn default() -> Self {
        Self {
            ka: default_ka(),
            kd: default_kd(),
            ks: default_ks(),
            shininess: default_shininess(),
            lighting: true,
        }
    }
}

fn default_ka() -> f32 {
    0.2
}
fn default_kd() -> f32 {
    0.7
}
fn default_ks() -> f32 {
    0.5
}
fn default_shininess() -> f32 {
    32.0
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct ViewConfig {
    #[serde(default = "default_mode")]
    pub mode: String, // "fill", "wireframe"
    #[serde(default = "default_projection")]
    pub projection: String, // "none", "orthographic", "cylindrical", "spherical"
    #[serde(default = "default_background")]
    pub background: [f32; 3],
    #[serde(default = "default_scale_step")]
    pub scale_step: f32,
    #[serde(default = "default_translate_step")]
    pub translate_step: f32,
    #[serde(default = "default_blend_color")]
    pub blend_color: [f32; 3],
    #[serde(default)]
    pub blend: f32,
    #[serde(default = "default_stroke")]
    pub stroke: f32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            projection: default_projection(),
            background: default_background(),
            scale_step: default_scale_step(),
            translate_step: default_translate_step(),
            blend_color: default_blend_color(),
            blend: 0.0,
            stroke: default_stroke(),
        }
    }
}

fn default_mode() -> String {
    "fill".to_string()
}
fn default_projection() -> String {
    "none".to_string()
}
fn default_background() -> [f32; 3] {
    [0.0, 0.0, 0.0]
}
fn default_scale_step() -> f32 {
    0.05
}
fn default_translate_step() -> f32 {
    0.05
}
fn default_blend_color() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}
fn default_stroke() -> f32 {
    1.0
}

#[derive(Debug, Default, Deserialize)]
pub struct FilesConfig {
    pub texture: Option<String>,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.window.width, 860.0);
        assert_eq!(config.window.target_fps, 30.0);
        assert_eq!(config.camera.position, [0.0, 0.0, 3.0]);
        assert_eq!(config.view.mode, "fill");
        assert_eq!(config.view.projection, "none");
        assert!(config.material.lighting);
        assert!(config.files.texture.is_none());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = Config::from_toml(
            r#"
            [material]
            ks = 0.9

            [view]
            mode = "wireframe"
            projection = "spherical"

            [files]
            texture = "wood.png"
            "#,
        )
        .unwrap();

        assert_eq!(config.material.ks, 0.9);
        assert_eq!(config.material.kd, 0.7);
        assert_eq!(config.view.mode, "wireframe");
        assert_eq!(config.view.projection, "spherical");
        assert_eq!(config.view.scale_step, 0.05);
        assert_eq!(config.files.texture.as_deref(), Some("wood.png"));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(matches!(
            Config::from_toml("[view\nmode = 1"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        assert!(matches!(
            Config::load("/nonexistent/meshview.toml"),
            Err(ConfigError::Read(_))
        ));
    }
}
