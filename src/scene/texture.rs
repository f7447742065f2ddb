use crate::error::TextureError;
use image::{DynamicImage, GenericImageView};
use log::info;
use nalgebra::Vector3;
use std::path::Path;
use std::sync::Arc;

/// Represents a 2D texture map.
#[derive(Debug, Clone)]
pub struct Texture {
    pub image: Arc<DynamicImage>,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let path_ref = path.as_ref();
        let img = image::open(path_ref)?;
        let texture = Self::from_image(img)?;
        info!(
            "Loaded texture: {:?} ({}x{})",
            path_ref, texture.width, texture.height
        );
        Ok(texture)
    }

    pub fn from_image(img: DynamicImage) -> Result<Self, TextureError> {
        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            return Err(TextureError::Empty);
        }
        Ok(Self {
            width,
            height,
            image: Arc::new(img),
        })
    }

    /// Samples the texture using Bilinear Interpolation.
    /// UV coordinates are in [0.0, 1.0] and repeat outside of it.
    pub fn sample(&self, u: f32, v: f32) -> Vector3<f32> {
        let u = u.rem_euclid(1.0);
        let v = v.rem_euclid(1.0);

        // -0.5 because pixel centers are at 0.5
        let x = u * self.width as f32 - 0.5;
        let y = (1.0 - v) * self.height as f32 - 0.5; // Flip V for standard UV

        let x0 = x.floor() as i32;
        let y0 = y.floor() as i32;
        let wx = x - x.floor();
        let wy = y - y.floor();

        let c00 = self.get_pixel_wrapped(x0, y0);
        let c10 = self.get_pixel_wrapped(x0 + 1, y0);
        let c01 = self.get_pixel_wrapped(x0, y0 + 1);
        let c11 = self.get_pixel_wrapped(x0 + 1, y0 + 1);

        let top = c00 * (1.0 - wx) + c10 * wx;
        let bottom = c01 * (1.0 - wx) + c11 * wx;
        top * (1.0 - wy) + bottom * wy
    }

    /// Helper to get pixel with WRAPPING (Repeat) logic
    fn get_pixel_wrapped(&self, x: i32, y: i32) -> Vector3<f32> {
        let x_wrapped = x.rem_euclid(self.width as i32);
        let y_wrapped = y.rem_euclid(self.height as i32);

        let pixel = self.image.get_pixel(x_wrapped as u32, y_wrapped as u32);

        Vector3::new(
            pixel[0] as f32 / 255.0,
            pixel[1] as f32 / 255.0,
            pixel[2] as f32 / 255.0,
        )
    }
}
