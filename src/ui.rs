pub mod input;
pub mod panels;
pub mod trackball;
