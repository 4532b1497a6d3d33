//! Distance estimates used to order the open list.

use std::fmt;
use std::str::FromStr;

use tilestar_core::{Cost, CostTable, Point};

use crate::config::{CostModel, SearchConfig};
use crate::distance;
use crate::neighbors::Topology;

/// Heuristic selected once per search.
///
/// Each variant carries the per-step weights it multiplies distances by.
/// None of them is checked for admissibility: a weight larger than the
/// cheapest real step makes the search fast but no longer optimal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Heuristic {
    /// Always 0: uniform-cost (Dijkstra) search.
    #[default]
    Zero,
    /// `k * (dx + dy)`.
    Manhattan { k: Cost },
    /// `floor(k * sqrt(dx² + dy²))`.
    Euclidean { k: Cost },
    /// `k * (dx + dy) + (k2 - 2k) * min(dx, dy)`.
    Octile { k: Cost, k2: Cost },
    /// `k * max(dx, dy)`.
    Chebyshev { k: Cost },
}

impl Heuristic {
    /// Estimate the remaining cost from `a` to `b`.
    #[inline]
    pub fn estimate(self, a: Point, b: Point) -> Cost {
        match self {
            Self::Zero => 0,
            Self::Manhattan { k } => k.saturating_mul(distance::manhattan(a, b)),
            Self::Euclidean { k } => distance::euclidean(a, b, k),
            Self::Octile { k, k2 } => distance::octile(a, b, k, k2),
            Self::Chebyshev { k } => k.saturating_mul(distance::chebyshev(a, b)),
        }
    }

    /// The tightest heuristic of this family that never overestimates under
    /// `config` and `costs`.
    ///
    /// The per-step weight is derived from the cheapest passable symbol, so
    /// a table with a zero-cost symbol under [`CostModel::Terrain`] yields
    /// weights of 0.
    pub fn admissible_for(config: &SearchConfig, costs: &CostTable) -> Self {
        let cheapest = costs.min_cost().unwrap_or(0);
        let (straight, diagonal) = match config.cost_model {
            CostModel::Terrain => (cheapest, cheapest),
            CostModel::Scaled => (
                cheapest.saturating_mul(config.straight),
                cheapest.saturating_mul(config.diagonal),
            ),
            CostModel::Additive => (
                cheapest.saturating_add(config.straight),
                cheapest.saturating_add(config.diagonal),
            ),
        };
        match config.topology {
            Topology::Four => Self::Manhattan { k: straight },
            Topology::Eight if diagonal >= straight => Self::Octile {
                k: straight,
                k2: diagonal.min(straight.saturating_mul(2)),
            },
            Topology::Eight => Self::Chebyshev { k: diagonal },
        }
    }

    /// Re-weight this heuristic family for `config` and `costs`, keeping the
    /// variant the caller picked.
    ///
    /// Manhattan counts a diagonal move as two straight ones, so under
    /// [`Topology::Eight`] its weight is capped at half the diagonal cost.
    pub fn weighted_like(self, config: &SearchConfig, costs: &CostTable) -> Self {
        let fitted = Self::admissible_for(config, costs);
        let (k, k2) = match fitted {
            Self::Manhattan { k } => (k, k.saturating_mul(2)),
            Self::Octile { k, k2 } => (k, k2),
            Self::Chebyshev { k } => (k, k),
            Self::Zero | Self::Euclidean { .. } => (0, 0),
        };
        match self {
            Self::Zero => Self::Zero,
            Self::Manhattan { .. } => Self::Manhattan { k: k.min(k2 / 2) },
            Self::Euclidean { .. } => Self::Euclidean {
                k: k.min((k2 as f64 / std::f64::consts::SQRT_2).floor() as Cost),
            },
            Self::Octile { .. } => Self::Octile { k, k2 },
            Self::Chebyshev { .. } => Self::Chebyshev { k: k.min(k2) },
        }
    }

    /// Short lowercase name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::Manhattan { .. } => "manhattan",
            Self::Euclidean { .. } => "euclidean",
            Self::Octile { .. } => "octile",
            Self::Chebyshev { .. } => "chebyshev",
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Zero => write!(f, "zero"),
            Self::Manhattan { k } | Self::Euclidean { k } | Self::Chebyshev { k } => {
                write!(f, "{}(k={k})", self.name())
            }
            Self::Octile { k, k2 } => write!(f, "octile(k={k}, k2={k2})"),
        }
    }
}

/// Error returned when parsing an unknown heuristic name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownHeuristic(pub String);

impl fmt::Display for UnknownHeuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown heuristic '{}' (expected zero, manhattan, euclidean, octile or chebyshev)",
            self.0
        )
    }
}

impl std::error::Error for UnknownHeuristic {}

/// Parses a bare name with unit weights; see [`Heuristic::weighted_like`].
impl FromStr for Heuristic {
    type Err = UnknownHeuristic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "zero" | "dijkstra" | "none" => Ok(Self::Zero),
            "manhattan" => Ok(Self::Manhattan { k: 1 }),
            "euclidean" => Ok(Self::Euclidean { k: 1 }),
            "octile" | "diagonal" => Ok(Self::Octile { k: 1, k2: 1 }),
            "chebyshev" => Ok(Self::Chebyshev { k: 1 }),
            _ => Err(UnknownHeuristic(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_always_zero() {
        let h = Heuristic::Zero;
        assert_eq!(h.estimate(Point::new(0, 0), Point::new(40, 3)), 0);
    }

    #[test]
    fn weights_scale_the_distance() {
        let a = Point::new(1, 1);
        let b = Point::new(4, 5);
        assert_eq!(Heuristic::Manhattan { k: 2 }.estimate(a, b), 14);
        assert_eq!(Heuristic::Euclidean { k: 3 }.estimate(a, b), 15);
        assert_eq!(Heuristic::Chebyshev { k: 2 }.estimate(a, b), 8);
        assert_eq!(Heuristic::Octile { k: 10, k2: 14 }.estimate(a, b), 52);
    }

    #[test]
    fn admissible_for_four_connected_unit_grid() {
        let config = SearchConfig::default();
        let h = Heuristic::admissible_for(&config, &CostTable::standard());
        assert_eq!(h, Heuristic::Manhattan { k: 1 });
    }

    #[test]
    fn admissible_for_scaled_eight_connected_grid() {
        let config = SearchConfig {
            topology: Topology::Eight,
            cost_model: CostModel::Scaled,
            straight: 10,
            diagonal: 14,
            ..SearchConfig::default()
        };
        let costs = CostTable::new().with(b'.', 1).with(b'~', 3);
        let h = Heuristic::admissible_for(&config, &costs);
        assert_eq!(h, Heuristic::Octile { k: 10, k2: 14 });
    }

    #[test]
    fn admissible_for_cheap_diagonals_falls_back_to_chebyshev() {
        let config = SearchConfig {
            topology: Topology::Eight,
            cost_model: CostModel::Additive,
            straight: 3,
            diagonal: 1,
            ..SearchConfig::default()
        };
        let h = Heuristic::admissible_for(&config, &CostTable::standard());
        assert_eq!(h, Heuristic::Chebyshev { k: 2 });
    }

    #[test]
    fn weighted_like_keeps_the_family() {
        let config = SearchConfig {
            topology: Topology::Eight,
            cost_model: CostModel::Scaled,
            straight: 10,
            diagonal: 14,
            ..SearchConfig::default()
        };
        let costs = CostTable::standard();
        assert_eq!(
            Heuristic::Euclidean { k: 1 }.weighted_like(&config, &costs),
            Heuristic::Euclidean { k: 9 }
        );
        assert_eq!(
            Heuristic::Chebyshev { k: 1 }.weighted_like(&config, &costs),
            Heuristic::Chebyshev { k: 10 }
        );
        assert_eq!(Heuristic::Zero.weighted_like(&config, &costs), Heuristic::Zero);
    }

    #[test]
    fn manhattan_is_halved_for_diagonal_moves() {
        let costs = CostTable::standard();
        let four = SearchConfig::default();
        let m = Heuristic::Manhattan { k: 1 };
        assert_eq!(m.weighted_like(&four, &costs), Heuristic::Manhattan { k: 1 });

        let scaled = SearchConfig {
            topology: Topology::Eight,
            cost_model: CostModel::Scaled,
            straight: 10,
            diagonal: 14,
            ..SearchConfig::default()
        };
        assert_eq!(m.weighted_like(&scaled, &costs), Heuristic::Manhattan { k: 7 });

        // One diagonal step costs 14 and must not be estimated above that.
        let h = m.weighted_like(&scaled, &costs);
        assert!(h.estimate(Point::ZERO, Point::new(1, 1)) <= 14);
    }

    #[test]
    fn huge_weights_saturate() {
        let a = Point::new(0, 0);
        let b = Point::new(2, 1);
        assert_eq!(Heuristic::Manhattan { k: Cost::MAX }.estimate(a, b), Cost::MAX);
        assert_eq!(Heuristic::Chebyshev { k: Cost::MAX }.estimate(a, b), Cost::MAX);
        assert_eq!(
            Heuristic::Octile { k: Cost::MAX, k2: Cost::MAX }.estimate(a, b),
            Cost::MAX
        );
        assert_eq!(Heuristic::Euclidean { k: Cost::MAX }.estimate(a, b), Cost::MAX);

        let config = SearchConfig {
            topology: Topology::Eight,
            cost_model: CostModel::Scaled,
            straight: Cost::MAX,
            diagonal: Cost::MAX,
            ..SearchConfig::default()
        };
        let costs = CostTable::new().with(b'.', 3);
        assert_eq!(
            Heuristic::admissible_for(&config, &costs),
            Heuristic::Octile { k: Cost::MAX, k2: Cost::MAX }
        );
    }

    #[test]
    fn parse_names() {
        assert_eq!("Manhattan".parse(), Ok(Heuristic::Manhattan { k: 1 }));
        assert_eq!("dijkstra".parse(), Ok(Heuristic::Zero));
        assert!("bogus".parse::<Heuristic>().is_err());
        assert_eq!(Heuristic::Octile { k: 10, k2: 14 }.to_string(), "octile(k=10, k2=14)");
    }
}
