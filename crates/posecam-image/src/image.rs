use crate::{ImageError, convert};
use posecam_base::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// Packed `R, G, B` bytes, 3 per pixel.
    Rgb8,
    /// Packed `Y0, U, Y1, V`, 2 bytes per pixel.
    Yuyv,
    /// A complete JPEG bitstream (MJPEG camera frames).
    Jpeg,
}

/// A single video frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub size: Vec2<usize>,
    pub data: Vec<u8>,
    pub format: PixelFormat,
}

impl Image {
    pub fn new(size: Vec2<usize>, data: Vec<u8>, format: PixelFormat) -> Self {
        Self { size, data, format }
    }

    /// Checked RGB8 constructor.
    pub fn rgb(size: Vec2<usize>, data: Vec<u8>) -> Result<Self, ImageError> {
        if data.len() != size.area() * 3 {
            return Err(ImageError::Format(format!(
                "RGB8 {}x{} needs {} bytes, got {}",
                size.x,
                size.y,
                size.area() * 3,
                data.len()
            )));
        }
        Ok(Self::new(size, data, PixelFormat::Rgb8))
    }

    /// Solid-color RGB8 frame.
    pub fn filled(size: Vec2<usize>, color: crate::Rgb) -> Self {
        let data = [color.r, color.g, color.b].repeat(size.area());
        Self::new(size, data, PixelFormat::Rgb8)
    }

    /// Convert to RGB8; RGB8 frames pass through untouched.
    pub fn into_rgb(self) -> Result<Image, ImageError> {
        match self.format {
            PixelFormat::Rgb8 => Ok(self),
            PixelFormat::Yuyv => {
                let expected = self.size.area() * 2;
                if self.data.len() < expected {
                    return Err(ImageError::Format(format!(
                        "YUYV {}x{} needs {} bytes, got {}",
                        self.size.x,
                        self.size.y,
                        expected,
                        self.data.len()
                    )));
                }
                let rgb = convert::yuyv_to_rgb(self.size, &self.data);
                Ok(Image::new(self.size, rgb, PixelFormat::Rgb8))
            }
            PixelFormat::Jpeg => convert::jpeg_to_rgb(&self.data),
        }
    }

    /// RGB8 pixel at (x, y).
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if self.format != PixelFormat::Rgb8 || x >= self.size.x || y >= self.size.y {
            return None;
        }
        let i = (y * self.size.x + x) * 3;
        Some([self.data[i], self.data[i + 1], self.data[i + 2]])
    }

    /// Nearest-neighbour resample of an RGB8 frame.
    pub fn resize_nearest(&self, size: Vec2<usize>) -> Result<Image, ImageError> {
        if self.format != PixelFormat::Rgb8 {
            return Err(ImageError::Format(format!("cannot resize {:?}", self.format)));
        }
        if size == self.size {
            return Ok(self.clone());
        }

        let mut data = vec![0u8; size.area() * 3];
        if self.size.area() > 0 {
            for y in 0..size.y {
                let src_y = (y * self.size.y / size.y).min(self.size.y - 1);
                for x in 0..size.x {
                    let src_x = (x * self.size.x / size.x).min(self.size.x - 1);
                    let src = (src_y * self.size.x + src_x) * 3;
                    let dst = (y * size.x + x) * 3;
                    data[dst..dst + 3].copy_from_slice(&self.data[src..src + 3]);
                }
            }
        }
        Ok(Image::new(size, data, PixelFormat::Rgb8))
    }
}
