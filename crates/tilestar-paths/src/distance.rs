use tilestar_core::{Cost, Point};

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> Cost {
    let (dx, dy) = a.delta(b);
    dx as Cost + dy as Cost
}

/// Chebyshev (L∞) distance between two points.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> Cost {
    let (dx, dy) = a.delta(b);
    dx.max(dy) as Cost
}

/// Octile distance: `straight` per orthogonal step, `diagonal` per diagonal
/// step, moving diagonally as far as possible first.
#[inline]
pub fn octile(a: Point, b: Point, straight: Cost, diagonal: Cost) -> Cost {
    let (dx, dy) = a.delta(b);
    let (lo, hi) = (dx.min(dy) as Cost, dx.max(dy) as Cost);
    straight
        .saturating_mul(hi - lo)
        .saturating_add(diagonal.saturating_mul(lo))
}

/// Euclidean (L2) distance scaled by `k`, rounded down.
#[inline]
pub fn euclidean(a: Point, b: Point, k: Cost) -> Cost {
    let (dx, dy) = a.delta(b);
    let d = (dx as f64).hypot(dy as f64);
    (k as f64 * d).floor() as Cost
}
