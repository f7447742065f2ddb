use crate::io::config::Config;
use crate::pipeline::renderer::{DrawList, build_frame};
use crate::scene::camera::Camera;
use crate::scene::loader::LoadedModel;
use crate::scene::texture::Texture;
use crate::scene::view_state::{ViewState, VisualizationMode};
use crate::ui::input::{Controls, InputFrame, KeyState};
use crate::ui::panels::{FrameStats, show_panels};
use crate::ui::trackball::PointerInput;
use egui::{Color32, Key, LayerId, Pos2, Stroke};
use log::{debug, info};
use nalgebra::{Point2, Vector2, Vector3};
use std::time::{Duration, Instant};

/// Egui reports wheel movement in points; one notch is this many points.
const POINTS_PER_SCROLL_NOTCH: f32 = 50.0;

/// Sleeps away the rest of a fixed frame budget.
#[derive(Debug, Clone, Copy)]
pub struct FrameLimiter {
    target: Duration,
}

impl FrameLimiter {
    pub fn new(target_fps: f32) -> Self {
        let fps = if target_fps.is_finite() && target_fps > 0.0 {
            target_fps
        } else {
            30.0
        };
        Self {
            target: Duration::from_secs_f32(1.0 / fps),
        }
    }

    pub fn target(&self) -> Duration {
        self.target
    }

    /// Time left in the frame budget after `elapsed`, `None` when over budget.
    pub fn sleep_duration(&self, elapsed: Duration) -> Option<Duration> {
        self.target.checked_sub(elapsed).filter(|d| !d.is_zero())
    }
}

/// The interactive viewer: one loaded model, its view state and the controls.
pub struct ViewerApp {
    model: LoadedModel,
    state: ViewState,
    controls: Controls,
    camera: Camera,
    texture: Option<Texture>,
    limiter: FrameLimiter,
    frame_start: Instant,
    stats: FrameStats,
    frame_count: u32,
    last_fps_update: Instant,
}

impl ViewerApp {
    pub fn new(model: LoadedModel, state: ViewState, texture: Option<Texture>, config: &Config) -> Self {
        let aspect = config.window.width / config.window.height.max(1.0);
        let now = Instant::now();
        Self {
            model,
            state,
            controls: Controls::new(),
            camera: Camera::from_config(&config.camera, aspect),
            texture,
            limiter: FrameLimiter::new(config.window.target_fps),
            frame_start: now,
            stats: FrameStats::default(),
            frame_count: 0,
            last_fps_update: now,
        }
    }

    fn collect_input(&self, ctx: &egui::Context, viewport: Vector2<f32>) -> InputFrame {
        let over_ui = ctx.is_pointer_over_area() || ctx.is_using_pointer();
        let typing = ctx.wants_keyboard_input();

        ctx.input(|i| {
            let keys = if typing {
                KeyState::default()
            } else {
                KeyState {
                    left: i.key_down(Key::ArrowLeft),
                    right: i.key_down(Key::ArrowRight),
                    up: i.key_down(Key::ArrowUp),
                    down: i.key_down(Key::ArrowDown),
                    forward: i.key_down(Key::W),
                    backward: i.key_down(Key::S),
                    toggle_mode: i.key_pressed(Key::V),
                    toggle_help: i.key_pressed(Key::K),
                    quit: i.key_pressed(Key::Q) || i.key_pressed(Key::Escape),
                }
            };
            let scroll_notches = if over_ui {
                0.0
            } else {
                i.raw_scroll_delta.y / POINTS_PER_SCROLL_NOTCH
            };

            InputFrame {
                pointer: PointerInput {
                    position: i.pointer.hover_pos().map(|p| Point2::new(p.x, p.y)),
                    primary_down: i.pointer.primary_down(),
                    over_ui,
                    viewport,
                },
                scroll_notches,
                keys,
                time: i.time,
            }
        })
    }

    fn update_stats(&mut self, frame_time: Duration, drawn_triangles: usize) {
        self.stats.frame_ms = frame_time.as_secs_f32() * 1000.0;
        self.stats.drawn_triangles = drawn_triangles;
        self.frame_count += 1;

        let since = self.last_fps_update.elapsed().as_secs_f32();
        if since >= 1.0 {
            self.stats.fps = self.frame_count as f32 / since;
            debug!("Average FPS: {:.1}", self.stats.fps);
            self.frame_count = 0;
            self.last_fps_update = Instant::now();
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let screen = ctx.screen_rect();
        let viewport = Vector2::new(screen.width(), screen.height());

        let input = self.collect_input(ctx, viewport);
        let outcome = self.controls.apply(&mut self.state, &input);
        if outcome.quit {
            info!("Quit requested");
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        show_panels(
            ctx,
            &mut self.state,
            &mut self.controls,
            &self.model,
            self.texture.is_some(),
            &self.stats,
        );

        self.camera
            .sync(self.state.camera_position, viewport.x / viewport.y.max(1.0));
        let list = build_frame(
            self.model.mesh(),
            &self.state,
            &self.camera,
            self.texture.as_ref(),
            viewport,
        );
        paint(ctx, &list);

        let elapsed = self.frame_start.elapsed();
        if let Some(rest) = self.limiter.sleep_duration(elapsed) {
            std::thread::sleep(rest);
        }
        self.update_stats(self.frame_start.elapsed(), list.triangles.len());
        self.frame_start = Instant::now();

        ctx.request_repaint();
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        let bg = self.state.background;
        [bg.x, bg.y, bg.z, 1.0]
    }
}

fn to_color32(color: &Vector3<f32>) -> Color32 {
    let c = color.map(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8);
    Color32::from_rgb(c.x, c.y, c.z)
}

/// Paints the draw list behind every panel.
fn paint(ctx: &egui::Context, list: &DrawList) {
    let painter = ctx.layer_painter(LayerId::background());
    // Vertices culled by the camera may sit at infinity; they are never
    // referenced by a triangle but still count towards the mesh bounds.
    let pos = |i: u32| {
        let v = &list.vertices[i as usize];
        if v.visible {
            Pos2::new(v.position.x, v.position.y)
        } else {
            Pos2::ZERO
        }
    };

    match list.mode {
        VisualizationMode::Fill => {
            let mut mesh = egui::Mesh::default();
            for (i, v) in list.vertices.iter().enumerate() {
                mesh.colored_vertex(pos(i as u32), to_color32(&v.color));
            }
            for &[a, b, c] in &list.triangles {
                mesh.add_triangle(a, b, c);
            }
            painter.add(egui::Shape::mesh(mesh));
        }
        VisualizationMode::Wireframe => {
            for [a, b] in list.edges() {
                let color = (list.vertices[a as usize].color + list.vertices[b as usize].color) * 0.5;
                painter.line_segment([pos(a), pos(b)], Stroke::new(list.stroke, to_color32(&color)));
            }
        }
    }
}

/// Opens the viewer window and runs until it is closed.
pub fn run_gui(
    model: LoadedModel,
    state: ViewState,
    texture: Option<Texture>,
    config: &Config,
) -> Result<(), eframe::Error> {
    info!(
        "Starting GUI mode ({}x{})...",
        config.window.width, config.window.height
    );
    info!("Controls: LeftDrag=Rotate, Scroll=Scale, Arrows/W/S=Move, V=Fill/Wireframe, K=Help, Q=Quit");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.window.title.clone())
            .with_inner_size([config.window.width, config.window.height]),
        ..Default::default()
    };

    let app = ViewerApp::new(model, state, texture, config);
    eframe::run_native(
        &config.window.title,
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
}
