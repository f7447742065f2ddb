use crate::core::math::transform::TransformFactory;
use crate::io::config::Config;
use log::warn;
use nalgebra::{Matrix4, Point3, UnitQuaternion, Vector3};

/// Smallest per-axis model scale reachable with the scroll wheel.
pub const MIN_MODEL_SCALE: f32 = 1e-3;

/// How UV coordinates are derived from model-space positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextureProjection {
    #[default]
    None,
    Orthographic,
    Cylindrical,
    Spherical,
}

impl TextureProjection {
    pub const ALL: [Self; 4] = [
        Self::None,
        Self::Orthographic,
        Self::Cylindrical,
        Self::Spherical,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Orthographic => "orthographic",
            Self::Cylindrical => "cylindrical",
            Self::Spherical => "spherical",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.label() == name)
    }
}

/// Polygon fill mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisualizationMode {
    #[default]
    Fill,
    Wireframe,
}

impl VisualizationMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Fill => "fill polygon",
            Self::Wireframe => "polygon wireframe",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Fill => Self::Wireframe,
            Self::Wireframe => Self::Fill,
        }
    }
}

/// Everything the input handlers and panels edit and the renderer reads each frame.
#[derive(Debug, Clone)]
pub struct ViewState {
    // --- Camera & Light ---
    pub camera_position: Point3<f32>,
    pub light_position: Point3<f32>,
    pub light_color: Vector3<f32>,

    // --- Phong coefficients ---
    pub ka: f32,
    pub kd: f32,
    pub ks: f32,
    pub shininess: f32,
    pub lighting: bool,

    // --- Modes ---
    pub projection: TextureProjection,
    pub mode: VisualizationMode,
    pub background: Vector3<f32>,
    pub blend_color: Vector3<f32>,
    pub blend: f32,
    pub stroke: f32,

    // --- Model transform ---
    pub translate: Vector3<f32>,
    pub scale: Vector3<f32>,
    pub scale_step: f32,
    pub translate_step: f32,
    /// Accumulated trackball orientation, unit length.
    pub rotation: UnitQuaternion<f32>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl ViewState {
    pub fn from_config(config: &Config) -> Self {
        let mode = match config.view.mode.as_str() {
            "wireframe" => VisualizationMode::Wireframe,
            "fill" => VisualizationMode::Fill,
            other => {
                warn!("Unknown visualization mode '{other}', using fill");
                VisualizationMode::Fill
            }
        };
        let projection = TextureProjection::from_name(&config.view.projection).unwrap_or_else(|| {
            warn!(
                "Unknown texture projection '{}', using none",
                config.view.projection
            );
            TextureProjection::None
        });

        Self {
            camera_position: Point3::from(config.camera.position),
            light_position: Point3::from(config.light.position),
            light_color: Vector3::from(config.light.color),
            ka: config.material.ka,
            kd: config.material.kd,
            ks: config.material.ks,
            shininess: config.material.shininess,
            lighting: config.material.lighting,
            projection,
            mode,
            background: Vector3::from(config.view.background),
            blend_color: Vector3::from(config.view.blend_color),
            blend: config.view.blend.clamp(0.0, 1.0),
            stroke: config.view.stroke,
            translate: Vector3::zeros(),
            scale: Vector3::repeat(1.0),
            scale_step: config.view.scale_step,
            translate_step: config.view.translate_step,
            rotation: UnitQuaternion::identity(),
        }
    }

    /// Model matrix `T * R * S` for the current frame.
    pub fn model_matrix(&self) -> Matrix4<f32> {
        TransformFactory::model(&self.translate, &self.rotation, &self.scale)
    }

    /// Grows or shrinks the model uniformly by `notches * scale_step`.
    pub fn apply_scroll(&mut self, notches: f32) {
        if notches == 0.0 {
            return;
        }
        let delta = notches * self.scale_step;
        self.scale = self.scale.map(|s| (s + delta).max(MIN_MODEL_SCALE));
    }

    /// Moves the model by `translate_step` along each unit of `direction`.
    pub fn nudge(&mut self, direction: &Vector3<f32>) {
        self.translate += direction * self.translate_step;
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
    }

    pub fn reset_rotation(&mut self) {
        self.rotation = UnitQuaternion::identity();
    }
}
