//! Search configuration.

use tilestar_core::Cost;

use crate::heuristic::Heuristic;
use crate::neighbors::Topology;

/// How a step's cost combines the destination's terrain cost with the
/// geometric move weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CostModel {
    /// Terrain cost of the destination cell only; diagonal and straight
    /// moves cost the same.
    #[default]
    Terrain,
    /// Terrain cost multiplied by the move weight (`straight` or `diagonal`).
    Scaled,
    /// Terrain cost plus the move weight (`straight` or `diagonal`).
    Additive,
}

impl CostModel {
    /// Cost of one step onto a cell of terrain cost `terrain`.
    #[inline]
    pub fn step(self, terrain: Cost, weight: Cost) -> Cost {
        match self {
            Self::Terrain => terrain,
            Self::Scaled => terrain.saturating_mul(weight),
            Self::Additive => terrain.saturating_add(weight),
        }
    }
}

/// Parameters of a single search.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    pub topology: Topology,
    /// `None` picks [`Heuristic::admissible_for`] the cost table in use.
    pub heuristic: Option<Heuristic>,
    pub cost_model: CostModel,
    /// Move weight of an orthogonal step.
    pub straight: Cost,
    /// Move weight of a diagonal step.
    pub diagonal: Cost,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            topology: Topology::Four,
            heuristic: None,
            cost_model: CostModel::Terrain,
            straight: 1,
            diagonal: 1,
        }
    }
}

impl SearchConfig {
    /// 8-connected movement with diagonal steps at 14/10 of a straight one,
    /// an integer approximation of √2.
    pub fn octile() -> Self {
        Self {
            topology: Topology::Eight,
            cost_model: CostModel::Scaled,
            straight: 10,
            diagonal: 14,
            ..Self::default()
        }
    }

    pub fn with_topology(mut self, topology: Topology) -> Self {
        self.topology = topology;
        self
    }

    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = Some(heuristic);
        self
    }

    /// Move weight for a step, `diagonal` when both coordinates change.
    #[inline]
    pub fn move_weight(&self, diagonal: bool) -> Cost {
        if diagonal { self.diagonal } else { self.straight }
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn config_round_trip() {
        let config = SearchConfig::octile().with_heuristic(Heuristic::Octile { k: 10, k2: 14 });
        let json = serde_json::to_string(&config).unwrap();
        let back: SearchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn partial_config_uses_defaults() {
        let config: SearchConfig =
            serde_json::from_str(r#"{"topology":"eight","heuristic":{"kind":"zero"}}"#).unwrap();
        assert_eq!(config.topology, Topology::Eight);
        assert_eq!(config.heuristic, Some(Heuristic::Zero));
        assert_eq!(config.cost_model, CostModel::Terrain);
        assert_eq!(config.straight, 1);
    }
}
