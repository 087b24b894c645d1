use {
    posecam_image::Image,
    posecam_video::{CaptureError, VideoSource},
    std::sync::Arc,
};

/// Wait for an already started source to deliver its first frame.
///
/// No timeout: a source that never produces a frame keeps this pending, and
/// a source that ends before its first frame is an error.
pub async fn wait_ready(mut source: VideoSource) -> Result<(VideoSource, Arc<Image>), CaptureError> {
    let first = source.ready().await?;
    log::info!("source ready at {}x{}", first.size.x, first.size.y);
    Ok((source, first))
}
