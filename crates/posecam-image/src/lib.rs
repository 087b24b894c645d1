//! Frames and the drawing surface for posecam.
//!
//! Every frame handed between components is an [`Image`]; sources may produce
//! packed camera formats, which are converted to RGB8 before anything draws
//! or infers on them. The [`Surface`] is the RGB8 canvas that the estimation
//! loop paints and the recorder reads.

pub mod color;
pub mod convert;
pub mod draw;
pub mod error;
pub mod image;
pub mod surface;

pub use color::Rgb;
pub use convert::{jpeg_to_rgb, rgb_to_u32, yuyv_to_rgb};
pub use draw::Canvas;
pub use error::ImageError;
pub use image::{Image, PixelFormat};
pub use surface::{SharedSurface, Surface};
