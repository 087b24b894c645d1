use crate::Rgb;
use posecam_base::Vec2;

/// Something a skeleton can be painted on.
///
/// Coordinates are in the pixel space of the current frame and may lie
/// outside it; implementations clip.
pub trait Canvas {
    /// Straight segment of the given stroke width.
    fn stroke_line(&mut self, from: Vec2<f32>, to: Vec2<f32>, width: u32, color: Rgb);

    /// Filled disc.
    fn fill_circle(&mut self, center: Vec2<f32>, radius: u32, color: Rgb);
}

/// Plot callback used by the rasterizers below; receives in-bounds pixels only.
pub(crate) trait Plot {
    fn size(&self) -> Vec2<usize>;
    fn plot(&mut self, x: usize, y: usize, color: Rgb);
}

/// Fill every pixel whose center lies within `radius` of `center`.
///
/// Non-finite centers draw nothing.
pub(crate) fn fill_disc(target: &mut impl Plot, center: Vec2<f32>, radius: u32, color: Rgb) {
    if !(center.x.is_finite() && center.y.is_finite()) {
        return;
    }
    let size = target.size();
    let r = radius as i64;
    // a center this far out cannot reach the target, clamping keeps the sums small
    let limit = |v: f32, len: usize| (v.round() as i64).clamp(-r - 1, len as i64 + r);
    disc(
        target,
        limit(center.x, size.x),
        limit(center.y, size.y),
        r,
        color,
    );
}

fn disc(target: &mut impl Plot, cx: i64, cy: i64, r: i64, color: Rgb) {
    let size = target.size();
    let r2 = r * r;
    for y in (cy - r).max(0)..=(cy + r).min(size.y as i64 - 1) {
        let dy = y - cy;
        for x in (cx - r).max(0)..=(cx + r).min(size.x as i64 - 1) {
            let dx = x - cx;
            if dx * dx + dy * dy <= r2 {
                target.plot(x as usize, y as usize, color);
            }
        }
    }
}

/// Bresenham segment stamped with a disc brush, clipped to the target
/// (grown by the brush radius so strokes ending just outside still show).
///
/// Segments with a non-finite endpoint draw nothing.
pub(crate) fn thick_line(
    target: &mut impl Plot,
    from: Vec2<f32>,
    to: Vec2<f32>,
    width: u32,
    color: Rgb,
) {
    if ![from.x, from.y, to.x, to.y].iter().all(|v| v.is_finite()) {
        return;
    }
    let brush = (width / 2) as i64;
    let size = target.size();
    let bounds = Bounds {
        min_x: -brush as f64,
        min_y: -brush as f64,
        max_x: (size.x as i64 - 1 + brush) as f64,
        max_y: (size.y as i64 - 1 + brush) as f64,
    };

    let Some(((x0, y0), (x1, y1))) = bounds.clip(
        (from.x as f64, from.y as f64),
        (to.x as f64, to.y as f64),
    ) else {
        return;
    };
    let (mut x0, mut y0) = (x0.round() as i64, y0.round() as i64);
    let (x1, y1) = (x1.round() as i64, y1.round() as i64);

    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx - dy;

    loop {
        disc(target, x0, y0, brush, color);

        if x0 == x1 && y0 == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x0 += sx;
        }
        if e2 < dx {
            err += dx;
            y0 += sy;
        }
    }
}

struct Bounds {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

type Point = (f64, f64);

impl Bounds {
    /// Liang-Barsky: the part of `from`..`to` inside the bounds, if any.
    fn clip(&self, from: Point, to: Point) -> Option<(Point, Point)> {
        if self.max_x < self.min_x || self.max_y < self.min_y {
            return None;
        }
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let (mut t0, mut t1) = (0.0f64, 1.0f64);
        for (p, q) in [
            (-dx, from.0 - self.min_x),
            (dx, self.max_x - from.0),
            (-dy, from.1 - self.min_y),
            (dy, self.max_y - from.1),
        ] {
            if p == 0.0 {
                // parallel to this edge
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let t = q / p;
            if p < 0.0 {
                t0 = t0.max(t);
            } else {
                t1 = t1.min(t);
            }
            if t0 > t1 {
                return None;
            }
        }
        Some((
            (from.0 + t0 * dx, from.1 + t0 * dy),
            (from.0 + t1 * dx, from.1 + t1 * dy),
        ))
    }
}
