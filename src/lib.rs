//! Interactive OBJ mesh viewer: vertex import and normalization, smooth
//! normals, trackball rotation and a CPU-projected egui presentation layer.

pub mod app;
pub mod core;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod scene;
pub mod ui;
