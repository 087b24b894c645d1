use {
    posecam_base::Vec2,
    posecam_image::{Canvas, Rgb, Surface},
};

fn count(surface: &Surface, color: Rgb) -> usize {
    let size = surface.size();
    (0..size.y)
        .flat_map(|y| (0..size.x).map(move |x| (x, y)))
        .filter(|&(x, y)| surface.pixel(x, y) == Some(color))
        .count()
}

#[test]
fn test_thin_horizontal_line() {
    let mut surface = Surface::new(Vec2::new(10, 5));
    surface.stroke_line(Vec2::new(1.0, 2.0), Vec2::new(8.0, 2.0), 1, Rgb::GREEN);
    assert_eq!(count(&surface, Rgb::GREEN), 8);
    assert_eq!(surface.pixel(0, 2), Some(Rgb::BLACK));
    assert_eq!(surface.pixel(8, 2), Some(Rgb::GREEN));
}

#[test]
fn test_wide_line_covers_neighbours() {
    let mut surface = Surface::new(Vec2::new(20, 20));
    surface.stroke_line(Vec2::new(2.0, 10.0), Vec2::new(17.0, 10.0), 4, Rgb::GREEN);
    for y in 8..=12 {
        assert_eq!(surface.pixel(10, y), Some(Rgb::GREEN), "row {y}");
    }
    assert_eq!(surface.pixel(10, 5), Some(Rgb::BLACK));
}

#[test]
fn test_line_partially_offscreen_is_clipped() {
    let mut surface = Surface::new(Vec2::new(10, 10));
    surface.stroke_line(Vec2::new(-100.0, 5.0), Vec2::new(100.0, 5.0), 1, Rgb::GREEN);
    assert_eq!(count(&surface, Rgb::GREEN), 10);
}

#[test]
fn test_line_fully_offscreen_draws_nothing() {
    let mut surface = Surface::new(Vec2::new(10, 10));
    surface.stroke_line(Vec2::new(-50.0, -5.0), Vec2::new(-1.0, -30.0), 4, Rgb::GREEN);
    assert_eq!(count(&surface, Rgb::GREEN), 0);
}

#[test]
fn test_circle_radius() {
    let mut surface = Surface::new(Vec2::new(20, 20));
    surface.fill_circle(Vec2::new(10.0, 10.0), 6, Rgb::RED);
    assert_eq!(surface.pixel(10, 4), Some(Rgb::RED));
    assert_eq!(surface.pixel(16, 10), Some(Rgb::RED));
    assert_eq!(surface.pixel(10, 3), Some(Rgb::BLACK));
    // corner of the bounding square lies outside the disc
    assert_eq!(surface.pixel(16, 16), Some(Rgb::BLACK));
}

#[test]
fn test_circle_at_edge_is_clipped() {
    let mut surface = Surface::new(Vec2::new(5, 5));
    surface.fill_circle(Vec2::new(0.0, 0.0), 6, Rgb::RED);
    assert_eq!(count(&surface, Rgb::RED), 25);
}

#[test]
fn test_far_off_disc_draws_nothing() {
    let mut surface = Surface::new(Vec2::new(64, 48));
    surface.fill_circle(Vec2::new(1.0e10, 10.0), 6, Rgb::RED);
    surface.fill_circle(Vec2::new(-1.0e10, -1.0e10), 6, Rgb::RED);
    surface.fill_circle(Vec2::new(f32::INFINITY, 10.0), 6, Rgb::RED);
    surface.fill_circle(Vec2::new(10.0, f32::NAN), 6, Rgb::RED);
    assert_eq!(count(&surface, Rgb::RED), 0);
}

#[test]
fn test_disc_just_outside_edge_shows_its_rim() {
    let mut surface = Surface::new(Vec2::new(20, 20));
    surface.fill_circle(Vec2::new(-3.0, 10.0), 6, Rgb::RED);
    assert_eq!(surface.pixel(0, 10), Some(Rgb::RED));
    assert_eq!(surface.pixel(3, 10), Some(Rgb::RED));
    assert_eq!(surface.pixel(4, 10), Some(Rgb::BLACK));
}

#[test]
fn test_huge_line_is_clipped() {
    let mut surface = Surface::new(Vec2::new(64, 48));
    surface.stroke_line(Vec2::new(-1.0e10, 10.0), Vec2::new(1.0e10, 10.0), 4, Rgb::GREEN);
    assert_eq!(surface.pixel(0, 10), Some(Rgb::GREEN));
    assert_eq!(surface.pixel(63, 10), Some(Rgb::GREEN));
    assert_eq!(surface.pixel(32, 30), Some(Rgb::BLACK));

    // slanted, both ends far away
    surface.stroke_line(Vec2::new(-1.0e10, 10.0), Vec2::new(1.0e10, 20.0), 4, Rgb::RED);
    assert!(count(&surface, Rgb::RED) > 0);
}

#[test]
fn test_non_finite_line_draws_nothing() {
    let mut surface = Surface::new(Vec2::new(16, 16));
    surface.stroke_line(Vec2::new(f32::NEG_INFINITY, 4.0), Vec2::new(8.0, 8.0), 4, Rgb::GREEN);
    surface.stroke_line(Vec2::new(2.0, 2.0), Vec2::new(f32::NAN, 8.0), 4, Rgb::GREEN);
    assert_eq!(count(&surface, Rgb::GREEN), 0);
}
