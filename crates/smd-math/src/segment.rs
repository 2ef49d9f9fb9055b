//! Line segment tests in the plane.
//!
//! Used to exclude particle pairs whose connecting segment crosses a
//! pre-defined crack line.

use glam::DVec2;

/// Turn direction of the path `i -> j -> k`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// `k` lies to the left of `i -> j`.
    CounterClockwise,
    /// `k` lies on the line through `i` and `j`.
    Collinear,
    /// `k` lies to the right of `i -> j`.
    Clockwise,
}

/// Orientation of `k` relative to the directed line `i -> j`.
#[inline]
pub fn orientation(i: DVec2, j: DVec2, k: DVec2) -> Orientation {
    let a = (k.x - i.x) * (j.y - i.y);
    let b = (j.x - i.x) * (k.y - i.y);
    if a < b {
        Orientation::CounterClockwise
    } else if a > b {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// Whether `k` lies inside the axis-aligned bounding box of segment `i`-`j`.
///
/// Only meaningful once `k` is known to be collinear with `i` and `j`.
#[inline]
pub fn is_on_segment(i: DVec2, j: DVec2, k: DVec2) -> bool {
    (i.x <= k.x || j.x <= k.x)
        && (k.x <= i.x || k.x <= j.x)
        && (i.y <= k.y || j.y <= k.y)
        && (k.y <= i.y || k.y <= j.y)
}

/// Whether segments `p1`-`p2` and `p3`-`p4` intersect, touching included.
///
/// # Example
///
/// ```
/// use smd_math::{segment::segments_intersect, DVec2};
///
/// let crossing = segments_intersect(
///     DVec2::new(0.0, 0.0),
///     DVec2::new(1.0, 1.0),
///     DVec2::new(0.0, 1.0),
///     DVec2::new(1.0, 0.0),
/// );
/// assert!(crossing);
/// ```
pub fn segments_intersect(p1: DVec2, p2: DVec2, p3: DVec2, p4: DVec2) -> bool {
    use Orientation::*;

    let d1 = orientation(p3, p4, p1);
    let d2 = orientation(p3, p4, p2);
    let d3 = orientation(p1, p2, p3);
    let d4 = orientation(p1, p2, p4);

    let straddles = |a: Orientation, b: Orientation| {
        matches!(
            (a, b),
            (Clockwise, CounterClockwise) | (CounterClockwise, Clockwise)
        )
    };

    (straddles(d1, d2) && straddles(d3, d4))
        || (d1 == Collinear && is_on_segment(p3, p4, p1))
        || (d2 == Collinear && is_on_segment(p3, p4, p2))
        || (d3 == Collinear && is_on_segment(p1, p2, p3))
        || (d4 == Collinear && is_on_segment(p1, p2, p4))
}
