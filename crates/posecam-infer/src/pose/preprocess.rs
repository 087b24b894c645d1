use {
    super::types::LetterboxInfo,
    crate::InferError,
    posecam_base::Tensor,
    posecam_image::{Image, PixelFormat},
};

/// Letterbox an RGB8 frame into a `target`x`target` square.
///
/// Nearest-neighbour resize preserving aspect ratio, centered, padded with
/// `pad`. Returns HWC bytes plus the mapping back to frame coordinates.
pub fn letterbox(image: &Image, target: usize, pad: u8) -> Result<(Vec<u8>, LetterboxInfo), InferError> {
    if image.format != PixelFormat::Rgb8 {
        return Err(InferError::Shape {
            expected: "Rgb8 frame".to_string(),
            got: format!("{:?}", image.format),
        });
    }
    let (w, h) = (image.size.x, image.size.y);
    if w == 0 || h == 0 || image.data.len() != w * h * 3 {
        return Err(InferError::Shape {
            expected: format!("{w}x{h}x3 bytes"),
            got: format!("{} bytes", image.data.len()),
        });
    }

    let scale = (target as f32 / w as f32).min(target as f32 / h as f32);
    let new_w = ((w as f32 * scale) as usize).clamp(1, target);
    let new_h = ((h as f32 * scale) as usize).clamp(1, target);
    let pad_x = (target - new_w) / 2;
    let pad_y = (target - new_h) / 2;

    let mut data = vec![pad; target * target * 3];
    for y in 0..new_h {
        let src_y = ((y as f32 / scale) as usize).min(h - 1);
        for x in 0..new_w {
            let src_x = ((x as f32 / scale) as usize).min(w - 1);
            let src = (src_y * w + src_x) * 3;
            let dst = ((y + pad_y) * target + x + pad_x) * 3;
            data[dst..dst + 3].copy_from_slice(&image.data[src..src + 3]);
        }
    }

    Ok((
        data,
        LetterboxInfo {
            target,
            scale,
            pad_x: pad_x as f32,
            pad_y: pad_y as f32,
        },
    ))
}

/// `[1, S, S, 3]` with raw 0..255 values, as MoveNet takes them.
pub fn to_nhwc(hwc: &[u8], target: usize) -> Result<Tensor<f32>, InferError> {
    Ok(Tensor::new(
        vec![1, target, target, 3],
        hwc.iter().map(|&v| v as f32).collect(),
    )?)
}

/// `[1, 3, S, S]` scaled to 0.0..1.0, as YOLO takes them.
pub fn to_nchw(hwc: &[u8], target: usize) -> Result<Tensor<f32>, InferError> {
    let plane = target * target;
    let mut data = vec![0.0; 3 * plane];
    for (i, pixel) in hwc.chunks_exact(3).enumerate() {
        for ch in 0..3 {
            data[ch * plane + i] = pixel[ch] as f32 / 255.0;
        }
    }
    Ok(Tensor::new(vec![1, 3, target, target], data)?)
}
