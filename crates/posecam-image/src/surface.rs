use {
    crate::{
        Canvas, Image, ImageError, PixelFormat, Rgb,
        draw::{self, Plot},
    },
    posecam_base::Vec2,
    std::sync::{Arc, Mutex},
};

/// The drawing surface shown to the user and captured for recording.
///
/// Always RGB8. The size follows the most recent frame drawn onto it.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    size: Vec2<usize>,
    data: Vec<u8>,
}

/// Surface shared between the estimation loop, the window and the capture thread.
pub type SharedSurface = Arc<Mutex<Surface>>;

impl Surface {
    pub fn new(size: Vec2<usize>) -> Self {
        Self {
            size,
            data: vec![0; size.area() * 3],
        }
    }

    pub fn shared(size: Vec2<usize>) -> SharedSurface {
        Arc::new(Mutex::new(Self::new(size)))
    }

    pub fn size(&self) -> Vec2<usize> {
        self.size
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Resize and clear to black. No-op when the size is unchanged.
    pub fn resize(&mut self, size: Vec2<usize>) {
        if size != self.size {
            self.size = size;
            self.data = vec![0; size.area() * 3];
        }
    }

    /// Replace the contents with `frame`, resizing to match its dimensions.
    pub fn draw_image(&mut self, frame: &Image) -> Result<(), ImageError> {
        if frame.format != PixelFormat::Rgb8 {
            return Err(ImageError::Format(format!(
                "surface needs Rgb8, got {:?}",
                frame.format
            )));
        }
        if frame.data.len() != frame.size.area() * 3 {
            return Err(ImageError::Format(format!(
                "frame {}x{} has {} bytes",
                frame.size.x,
                frame.size.y,
                frame.data.len()
            )));
        }
        self.size = frame.size;
        self.data.clear();
        self.data.extend_from_slice(&frame.data);
        Ok(())
    }

    /// Copy of the current contents.
    pub fn snapshot(&self) -> Image {
        Image::new(self.size, self.data.clone(), PixelFormat::Rgb8)
    }

    /// 0RGB words for window presentation.
    pub fn to_u32(&self) -> Vec<u32> {
        crate::rgb_to_u32(self.size, &self.data)
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= self.size.x || y >= self.size.y {
            return None;
        }
        let i = (y * self.size.x + x) * 3;
        Some(Rgb::new(self.data[i], self.data[i + 1], self.data[i + 2]))
    }
}

impl Plot for Surface {
    fn size(&self) -> Vec2<usize> {
        self.size
    }

    fn plot(&mut self, x: usize, y: usize, color: Rgb) {
        let i = (y * self.size.x + x) * 3;
        self.data[i] = color.r;
        self.data[i + 1] = color.g;
        self.data[i + 2] = color.b;
    }
}

impl Canvas for Surface {
    fn stroke_line(&mut self, from: Vec2<f32>, to: Vec2<f32>, width: u32, color: Rgb) {
        draw::thick_line(self, from, to, width, color);
    }

    fn fill_circle(&mut self, center: Vec2<f32>, radius: u32, color: Rgb) {
        draw::fill_disc(self, center, radius, color);
    }
}
