use crate::core::PixelPoint;

/// Clips segment `a → b` against a horizontal floor at `bottom_y`.
///
/// Pixel y grows downward, so anything with `y > bottom_y` is below the floor.
/// Returns `None` when the whole segment is below; otherwise the endpoint that
/// crosses the floor is moved onto it along the segment. The top is unbounded.
#[must_use]
pub fn clip_segment_to_bottom(
    a: PixelPoint,
    b: PixelPoint,
    bottom_y: f64,
) -> Option<(PixelPoint, PixelPoint)> {
    let a_below = a.y > bottom_y;
    let b_below = b.y > bottom_y;
    match (a_below, b_below) {
        (false, false) => Some((a, b)),
        (true, true) => None,
        (true, false) => Some((intersect_floor(b, a, bottom_y), b)),
        (false, true) => Some((a, intersect_floor(a, b, bottom_y))),
    }
}

/// Point on `inside → outside` at `y == bottom_y`.
fn intersect_floor(inside: PixelPoint, outside: PixelPoint, bottom_y: f64) -> PixelPoint {
    let dy = outside.y - inside.y;
    if dy == 0.0 {
        return inside;
    }
    let t = (bottom_y - inside.y) / dy;
    PixelPoint::new(inside.x + (outside.x - inside.x) * t, bottom_y)
}
