use {
    posecam_image::{Canvas, Rgb},
    posecam_infer::{Keypoint, SkeletonEdge},
};

/// Keypoints at or below this score are not drawn.
pub const MIN_CONFIDENCE: f32 = 0.3;

pub const LINE_WIDTH: u32 = 4;
pub const LINE_COLOR: Rgb = Rgb::GREEN;
pub const POINT_RADIUS: u32 = 6;
pub const POINT_COLOR: Rgb = Rgb::RED;

/// Draw a skeleton: first every edge whose two endpoints both score above
/// `min_confidence`, then a marker on every keypoint that does.
///
/// Edges referring to keypoints that are not in `keypoints` are skipped.
pub fn render(
    keypoints: &[Keypoint],
    edges: &[SkeletonEdge],
    min_confidence: f32,
    canvas: &mut impl Canvas,
) {
    let visible = |k: &&Keypoint| k.score > min_confidence;

    for edge in edges {
        let (Some(from), Some(to)) = (
            keypoints.get(edge.from).filter(visible),
            keypoints.get(edge.to).filter(visible),
        ) else {
            continue;
        };
        canvas.stroke_line(from.position, to.position, LINE_WIDTH, LINE_COLOR);
    }

    for keypoint in keypoints.iter().filter(visible) {
        canvas.fill_circle(keypoint.position, POINT_RADIUS, POINT_COLOR);
    }
}
