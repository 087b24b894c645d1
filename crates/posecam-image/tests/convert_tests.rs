use {
    crates_image::{ImageFormat, RgbImage},
    posecam_base::Vec2,
    posecam_image::{Image, PixelFormat, jpeg_to_rgb, rgb_to_u32, yuyv_to_rgb},
    std::io::Cursor,
};

#[test]
fn test_yuyv_neutral_chroma_is_gray() {
    // two pixels, luma 16 and 235, neutral chroma
    let rgb = yuyv_to_rgb(Vec2::new(2, 1), &[16, 128, 235, 128]);
    assert_eq!(rgb, vec![16, 16, 16, 235, 235, 235]);
}

#[test]
fn test_yuyv_short_buffer_is_rejected() {
    let frame = Image::new(Vec2::new(4, 2), vec![0; 10], PixelFormat::Yuyv);
    assert!(frame.into_rgb().is_err());
}

#[test]
fn test_yuyv_into_rgb() {
    let frame = Image::new(Vec2::new(2, 2), vec![128; 8], PixelFormat::Yuyv);
    let rgb = frame.into_rgb().unwrap();
    assert_eq!(rgb.format, PixelFormat::Rgb8);
    assert_eq!(rgb.data.len(), 12);
    assert_eq!(rgb.pixel(1, 1), Some([128, 128, 128]));
}

#[test]
fn test_jpeg_decode() {
    let source = RgbImage::from_pixel(8, 4, crates_image::Rgb([200, 200, 200]));
    let mut bytes = Vec::new();
    source
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Jpeg)
        .unwrap();

    let frame = jpeg_to_rgb(&bytes).unwrap();
    assert_eq!(frame.size, Vec2::new(8, 4));
    let [r, g, b] = frame.pixel(3, 2).unwrap();
    // lossy, so only roughly equal
    assert!(r.abs_diff(200) < 8 && g.abs_diff(200) < 8 && b.abs_diff(200) < 8);
}

#[test]
fn test_jpeg_garbage_fails() {
    assert!(jpeg_to_rgb(&[0xff, 0xd8, 0x00, 0x01]).is_err());
}

#[test]
fn test_rgb_to_u32() {
    let words = rgb_to_u32(Vec2::new(2, 1), &[255, 0, 0, 0, 0, 255]);
    assert_eq!(words, vec![0x00ff_0000, 0x0000_00ff]);
}
