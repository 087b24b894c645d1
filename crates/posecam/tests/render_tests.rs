mod common;

use {
    common::{CallCanvas, EDGES, abc_pose},
    posecam::render::{
        LINE_COLOR, LINE_WIDTH, MIN_CONFIDENCE, POINT_COLOR, POINT_RADIUS, render,
    },
    posecam_base::Vec2,
    posecam_image::{Rgb, Surface},
    posecam_infer::{Keypoint, SkeletonEdge},
};

#[test]
fn test_threshold_scenario() {
    let pose = abc_pose();
    let mut canvas = CallCanvas::default();
    render(&pose.keypoints, &EDGES, 0.3, &mut canvas);

    // markers at A and C, one edge A-C
    let centers: Vec<_> = canvas.circles.iter().map(|c| c.0).collect();
    assert_eq!(centers, vec![Vec2::new(2.0, 2.0), Vec2::new(2.0, 8.0)]);
    assert_eq!(canvas.lines.len(), 1);
    assert_eq!(canvas.lines[0].0, Vec2::new(2.0, 2.0));
    assert_eq!(canvas.lines[0].1, Vec2::new(2.0, 8.0));
}

#[test]
fn test_score_equal_to_threshold_is_excluded() {
    let keypoints = vec![Keypoint::new(1.0, 1.0, 0.3), Keypoint::new(5.0, 5.0, 0.9)];
    let mut canvas = CallCanvas::default();
    render(&keypoints, &[SkeletonEdge::new(0, 1)], 0.3, &mut canvas);
    assert!(canvas.lines.is_empty());
    assert_eq!(canvas.circles.len(), 1);
}

#[test]
fn test_style_is_fixed() {
    let keypoints = vec![Keypoint::new(1.0, 1.0, 0.9), Keypoint::new(5.0, 5.0, 0.9)];
    let mut canvas = CallCanvas::default();
    render(&keypoints, &[SkeletonEdge::new(0, 1)], MIN_CONFIDENCE, &mut canvas);
    assert_eq!(canvas.lines[0].2, LINE_WIDTH);
    assert_eq!(canvas.lines[0].3, LINE_COLOR);
    assert_eq!(LINE_COLOR, Rgb::from_hex("#00FF00").unwrap());
    assert_eq!(canvas.circles[0].1, POINT_RADIUS);
    assert_eq!(canvas.circles[0].2, POINT_COLOR);
    assert_eq!((LINE_WIDTH, POINT_RADIUS), (4, 6));
}

#[test]
fn test_edges_drawn_before_markers() {
    let keypoints = vec![Keypoint::new(10.0, 10.0, 0.9), Keypoint::new(30.0, 10.0, 0.9)];
    let mut surface = Surface::new(Vec2::new(40, 20));
    render(&keypoints, &[SkeletonEdge::new(0, 1)], 0.3, &mut surface);
    // the marker covers the line end
    assert_eq!(surface.pixel(10, 10), Some(Rgb::RED));
    assert_eq!(surface.pixel(20, 10), Some(Rgb::GREEN));
}

#[test]
fn test_empty_keypoints_and_bad_edges() {
    let mut canvas = CallCanvas::default();
    render(&[], &EDGES, 0.3, &mut canvas);
    assert!(canvas.lines.is_empty() && canvas.circles.is_empty());

    let keypoints = vec![Keypoint::new(1.0, 1.0, 0.9)];
    render(&keypoints, &[SkeletonEdge::new(0, 5)], 0.3, &mut canvas);
    assert!(canvas.lines.is_empty());
    assert_eq!(canvas.circles.len(), 1);
}

#[test]
fn test_every_edge_with_confident_endpoints_drawn_once() {
    let keypoints: Vec<_> = (0..17)
        .map(|i| Keypoint::new(i as f32 * 3.0, 5.0, 0.8))
        .collect();
    let mut canvas = CallCanvas::default();
    let edges = posecam_infer::ModelKind::MovenetLightning.skeleton();
    render(&keypoints, edges, 0.3, &mut canvas);
    assert_eq!(canvas.lines.len(), edges.len());
    assert_eq!(canvas.circles.len(), 17);
}

#[test]
fn test_off_frame_keypoints_are_clipped() {
    let keypoints = vec![
        Keypoint::new(1.0e10, 5.0, 0.9),
        Keypoint::new(f32::INFINITY, -1.0e12, 0.9),
        Keypoint::new(5.0, 5.0, 0.9),
    ];
    let edges = [
        SkeletonEdge::new(0, 1),
        SkeletonEdge::new(0, 2),
        SkeletonEdge::new(1, 2),
    ];
    let mut surface = Surface::new(Vec2::new(32, 24));
    render(&keypoints, &edges, 0.3, &mut surface);

    assert_eq!(surface.pixel(5, 5), Some(Rgb::RED));
    // the edge towards the far keypoint runs to the border
    assert_eq!(surface.pixel(31, 5), Some(Rgb::GREEN));
}
