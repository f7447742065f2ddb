//! Immediate-mode windows that inspect and edit the view state.

use crate::scene::loader::LoadedModel;
use crate::scene::view_state::{MIN_MODEL_SCALE, TextureProjection, ViewState};
use crate::ui::input::Controls;
use egui::{ComboBox, Context, DragValue, Slider, Ui};
use nalgebra::{Point3, Vector3};

/// Per-frame numbers shown in the info window.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameStats {
    pub fps: f32,
    pub frame_ms: f32,
    pub drawn_triangles: usize,
}

/// Draws every panel for this frame.
pub fn show_panels(
    ctx: &Context,
    state: &mut ViewState,
    controls: &mut Controls,
    model: &LoadedModel,
    has_texture: bool,
    stats: &FrameStats,
) {
    egui::Window::new("info")
        .default_pos([10.0, 10.0])
        .show(ctx, |ui| info_panel(ui, model, stats));

    egui::Window::new("mesh")
        .default_pos([10.0, 130.0])
        .show(ctx, |ui| mesh_panel(ui, state, has_texture));

    egui::Window::new("model")
        .default_pos([10.0, 260.0])
        .show(ctx, |ui| model_panel(ui, state, controls, model));

    egui::Window::new("lighting")
        .default_pos([620.0, 10.0])
        .default_open(false)
        .show(ctx, |ui| lighting_panel(ui, state));

    egui::Window::new("controls")
        .open(&mut controls.show_help)
        .default_pos([620.0, 360.0])
        .show(ctx, controls_help);
}

fn info_panel(ui: &mut Ui, model: &LoadedModel, stats: &FrameStats) {
    ui.label(format!("{:.1} FPS ({:.2} ms/frame)", stats.fps, stats.frame_ms));
    ui.label(format!("model: {}", model.name));
    ui.label(format!(
        "{} vertices, {} triangles ({} drawn)",
        model.vertex_count(),
        model.triangle_count(),
        stats.drawn_triangles
    ));
    if model.report.degenerate_normals > 0 {
        ui.colored_label(
            egui::Color32::YELLOW,
            format!("{} vertices without a normal", model.report.degenerate_normals),
        );
    }
    if model.report.degenerate_extent {
        ui.colored_label(egui::Color32::YELLOW, "model has no extent");
    }
}

fn mesh_panel(ui: &mut Ui, state: &mut ViewState, has_texture: bool) {
    ui.horizontal(|ui| {
        ui.label("mode:");
        if ui.button(state.mode.label()).clicked() {
            state.toggle_mode();
        }
    });

    ui.add_enabled_ui(has_texture, |ui| {
        ComboBox::from_label("texture projection")
            .selected_text(state.projection.label())
            .show_ui(ui, |ui| {
                for projection in TextureProjection::ALL {
                    ui.selectable_value(&mut state.projection, projection, projection.label());
                }
            });
    });
    if !has_texture {
        ui.label("no texture loaded");
    }

    ui.add(Slider::new(&mut state.stroke, 0.5..=5.0).text("stroke"));
    rgb_edit(ui, "background", &mut state.background);
}

fn model_panel(ui: &mut Ui, state: &mut ViewState, controls: &mut Controls, model: &LoadedModel) {
    ui.label(format!(
        "center: ({:.3}, {:.3}, {:.3})",
        model.center.x, model.center.y, model.center.z
    ));
    ui.label(format!("normalization scale: {:.4}", model.scale));
    ui.separator();

    vec3_edit(ui, "translate", &mut state.translate, 0.01);
    vec3_edit(ui, "scale", &mut state.scale, 0.01);
    state.scale = state.scale.map(|s| s.max(MIN_MODEL_SCALE));

    ui.add(Slider::new(&mut state.scale_step, 0.01..=1.0).text("scale factor"));
    ui.add(Slider::new(&mut state.translate_step, 0.01..=1.0).text("translate step"));

    let (axis, angle) = state
        .rotation
        .axis_angle()
        .map(|(axis, angle)| (axis.into_inner(), angle))
        .unwrap_or((Vector3::z(), 0.0));
    ui.label(format!(
        "rotation: {:.1}° about ({:.2}, {:.2}, {:.2})",
        angle.to_degrees(),
        axis.x,
        axis.y,
        axis.z
    ));
    if ui.button("reset rotation").clicked() {
        controls.reset_rotation(state);
    }
}

fn lighting_panel(ui: &mut Ui, state: &mut ViewState) {
    ui.checkbox(&mut state.lighting, "lighting");
    point3_edit(ui, "light position", &mut state.light_position);
    rgb_edit(ui, "light color", &mut state.light_color);

    ui.add(Slider::new(&mut state.ka, 0.0..=1.0).text("ka"));
    ui.add(Slider::new(&mut state.kd, 0.0..=1.0).text("kd"));
    ui.add(Slider::new(&mut state.ks, 0.0..=1.0).text("ks"));
    ui.add(Slider::new(&mut state.shininess, 1.0..=256.0).logarithmic(true).text("shininess"));

    ui.separator();
    point3_edit(ui, "camera position", &mut state.camera_position);

    ui.separator();
    rgb_edit(ui, "blend color", &mut state.blend_color);
    ui.add(Slider::new(&mut state.blend, 0.0..=1.0).text("blend"));
}

fn controls_help(ui: &mut Ui) {
    egui::Grid::new("controls_grid").striped(true).show(ui, |ui| {
        for (key, action) in [
            ("left drag", "rotate"),
            ("scroll", "scale"),
            ("arrows", "move x / y"),
            ("W / S", "move z"),
            ("V", "fill / wireframe"),
            ("K", "show / hide this help"),
            ("Q / Esc", "quit"),
        ] {
            ui.label(key);
            ui.label(action);
            ui.end_row();
        }
    });
}

fn vec3_edit(ui: &mut Ui, label: &str, v: &mut Vector3<f32>, speed: f64) {
    ui.horizontal(|ui| {
        ui.label(label);
        ui.add(DragValue::new(&mut v.x).speed(speed).prefix("x "));
        ui.add(DragValue::new(&mut v.y).speed(speed).prefix("y "));
        ui.add(DragValue::new(&mut v.z).speed(speed).prefix("z "));
    });
}

fn point3_edit(ui: &mut Ui, label: &str, p: &mut Point3<f32>) {
    vec3_edit(ui, label, &mut p.coords, 0.05);
}

fn rgb_edit(ui: &mut Ui, label: &str, color: &mut Vector3<f32>) {
    ui.horizontal(|ui| {
        let mut rgb: [f32; 3] = (*color).into();
        if ui.color_edit_button_rgb(&mut rgb).changed() {
            *color = rgb.into();
        }
        ui.label(label);
    });
}
