use posecam_base::{Rect, Vec2};

#[test]
fn test_rect_from_center() {
    let rect = Rect::from_center(Vec2::new(10.0, 10.0), Vec2::new(4.0, 6.0));
    assert_eq!(rect.origin, Vec2::new(8.0, 7.0));
    assert_eq!(rect.max(), Vec2::new(12.0, 13.0));
}

#[test]
fn test_rect_intersection_disjoint() {
    let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(2.0, 2.0));
    let b = Rect::new(Vec2::new(5.0, 5.0), Vec2::new(2.0, 2.0));
    assert!(a.intersection(&b).is_none());
    assert_eq!(a.iou(&b), 0.0);
}

#[test]
fn test_rect_iou_half_overlap() {
    let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(2.0, 2.0));
    let b = Rect::new(Vec2::new(1.0, 0.0), Vec2::new(2.0, 2.0));
    // intersection 2, union 6
    assert!((a.iou(&b) - 1.0 / 3.0).abs() < 1e-6);
}

#[test]
fn test_rect_iou_degenerate() {
    let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(0.0, 0.0));
    assert_eq!(a.iou(&a), 0.0);
}

#[test]
fn test_vec2_area_and_ops() {
    assert_eq!(Vec2::new(640usize, 480).area(), 307_200);
    assert_eq!(Vec2::new(4.0f32, 6.0) / 2.0 - Vec2::new(1.0, 1.0), Vec2::new(1.0, 2.0));
}
