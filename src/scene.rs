pub mod bounds;
pub mod camera;
pub mod import;
pub mod light;
pub mod loader;
pub mod mesh;
pub mod normals;
pub mod texture;
pub mod utils;
pub mod view_state;
