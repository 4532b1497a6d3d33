use std::fmt;
use std::str::FromStr;

use tilestar_core::{Point, Range};

/// Which cells count as adjacent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Topology {
    /// Orthogonal moves only.
    #[default]
    Four,
    /// Orthogonal and diagonal moves.
    Eight,
}

impl Topology {
    /// Maximum number of neighbors a cell can have.
    #[inline]
    pub fn degree(self) -> usize {
        match self {
            Self::Four => 4,
            Self::Eight => 8,
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Four => "4-connected",
            Self::Eight => "8-connected",
        })
    }
}

impl FromStr for Topology {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "4" | "four" => Ok(Self::Four),
            "8" | "eight" => Ok(Self::Eight),
            _ => Err(format!("unknown topology '{s}' (expected 4 or 8)")),
        }
    }
}

/// Append the neighbors of `p` under `topology` that lie inside `bounds`.
///
/// Cells on the edge of `bounds` get fewer neighbors; nothing wraps around.
pub fn push_within(topology: Topology, p: Point, bounds: Range, buf: &mut Vec<Point>) {
    match topology {
        Topology::Four => push_cardinal(p, buf, |n| bounds.contains(n)),
        Topology::Eight => buf.extend(bounds.around(p).iter().filter(|&n| n != p)),
    }
}

fn push_cardinal(p: Point, buf: &mut Vec<Point>, keep: impl Fn(Point) -> bool) {
    const STEPS: [Point; 4] = [
        Point::new(-1, 0),
        Point::new(1, 0),
        Point::new(0, -1),
        Point::new(0, 1),
    ];
    for d in STEPS {
        let n = p + d;
        if keep(n) {
            buf.push(n);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn within(topology: Topology, p: Point, bounds: Range) -> Vec<Point> {
        let mut buf = Vec::new();
        push_within(topology, p, bounds, &mut buf);
        buf
    }

    #[test]
    fn four_connected_interior_and_corner() {
        let bounds = Range::with_size(3, 3);
        assert_eq!(within(Topology::Four, Point::new(1, 1), bounds).len(), 4);
        assert_eq!(
            within(Topology::Four, Point::new(0, 0), bounds),
            vec![Point::new(1, 0), Point::new(0, 1)]
        );
    }

    #[test]
    fn eight_connected_clips_without_wrapping() {
        let bounds = Range::with_size(4, 3);
        assert_eq!(within(Topology::Eight, Point::new(1, 1), bounds).len(), 8);
        assert_eq!(within(Topology::Eight, Point::new(3, 2), bounds).len(), 3);
        assert_eq!(within(Topology::Eight, Point::new(2, 0), bounds).len(), 5);
        for n in within(Topology::Eight, Point::new(3, 0), bounds) {
            assert!(n.x >= 2 && n.y <= 1);
        }
    }

    #[test]
    fn single_cell_has_no_neighbors() {
        let bounds = Range::with_size(1, 1);
        assert!(within(Topology::Eight, Point::ZERO, bounds).is_empty());
        assert!(within(Topology::Four, Point::ZERO, bounds).is_empty());
    }

    #[test]
    fn buffer_is_appended_to() {
        let bounds = Range::with_size(3, 3);
        let mut buf = vec![Point::new(9, 9)];
        push_within(Topology::Four, Point::new(1, 1), bounds, &mut buf);
        assert_eq!(buf.len(), 5);
        assert_eq!(buf[0], Point::new(9, 9));
    }

    #[test]
    fn degree_and_parse() {
        assert_eq!(Topology::Four.degree(), 4);
        assert_eq!("8".parse::<Topology>(), Ok(Topology::Eight));
        assert!("6".parse::<Topology>().is_err());
    }
}
