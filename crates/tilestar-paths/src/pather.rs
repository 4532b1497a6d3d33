//! [`TerrainPather`]: the trait hierarchy implemented over a terrain grid.

use tilestar_core::{Cost, CostTable, Point, Terrain};

use crate::config::SearchConfig;
use crate::heuristic::Heuristic;
use crate::neighbors;
use crate::traits::{AstarPather, Pather, WeightedPather};

/// Adapts a [`Terrain`] and a [`CostTable`] to the pather traits.
///
/// Neighbors come from the configured topology clipped to the terrain
/// bounds. Step costs combine the destination symbol's cost with the move
/// weight according to the configured [`CostModel`](crate::CostModel).
#[derive(Debug, Clone)]
pub struct TerrainPather<'a> {
    terrain: &'a Terrain,
    costs: &'a CostTable,
    config: SearchConfig,
    heuristic: Heuristic,
}

impl<'a> TerrainPather<'a> {
    pub fn new(terrain: &'a Terrain, costs: &'a CostTable, config: &SearchConfig) -> Self {
        let heuristic = config
            .heuristic
            .unwrap_or_else(|| Heuristic::admissible_for(config, costs));
        Self {
            terrain,
            costs,
            config: config.clone(),
            heuristic,
        }
    }

    /// Replace the heuristic picked from the config.
    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    #[inline]
    pub fn terrain(&self) -> &'a Terrain {
        self.terrain
    }

    #[inline]
    pub fn costs(&self) -> &'a CostTable {
        self.costs
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    #[inline]
    pub fn heuristic(&self) -> Heuristic {
        self.heuristic
    }

    /// Cost of stepping from `from` onto `to`, or `None` if `to` is
    /// impassable or outside the terrain.
    pub fn step_cost(&self, from: Point, to: Point) -> Option<Cost> {
        let terrain = self.costs.get(self.terrain.at(to)?)?;
        let weight = self.config.move_weight(from.is_diagonal_to(to));
        Some(self.config.cost_model.step(terrain, weight))
    }
}

impl Pather for TerrainPather<'_> {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        neighbors::push_within(self.config.topology, p, self.terrain.bounds(), buf);
    }

    fn max_neighbors(&self) -> usize {
        self.config.topology.degree()
    }
}

impl WeightedPather for TerrainPather<'_> {
    #[inline]
    fn cost(&self, from: Point, to: Point, infinity: Cost) -> Cost {
        self.step_cost(from, to).unwrap_or(infinity)
    }

    fn max_step_cost(&self) -> Cost {
        let weight = self.config.straight.max(self.config.diagonal);
        self.costs
            .max_cost()
            .map_or(0, |c| self.config.cost_model.step(c, weight))
    }
}

impl AstarPather for TerrainPather<'_> {
    #[inline]
    fn estimate(&self, from: Point, to: Point) -> Cost {
        self.heuristic.estimate(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CostModel;
    use crate::neighbors::Topology;

    fn terrain() -> Terrain {
        Terrain::from_rows(
            "
.~.
.@.
",
        )
        .unwrap()
    }

    #[test]
    fn step_cost_per_model() {
        let t = terrain();
        let costs = CostTable::standard().with(b'~', 3);
        let mut config = SearchConfig {
            topology: Topology::Eight,
            straight: 10,
            diagonal: 14,
            ..SearchConfig::default()
        };
        let a = Point::new(0, 0);
        let b = Point::new(1, 0);
        let d = Point::new(2, 1);

        let p = TerrainPather::new(&t, &costs, &config);
        assert_eq!(p.step_cost(a, b), Some(3));
        assert_eq!(p.step_cost(b, d), Some(1));

        config.cost_model = CostModel::Scaled;
        let p = TerrainPather::new(&t, &costs, &config);
        assert_eq!(p.step_cost(a, b), Some(30));
        assert_eq!(p.step_cost(b, d), Some(14));
        assert_eq!(p.max_step_cost(), 42);

        config.cost_model = CostModel::Additive;
        let p = TerrainPather::new(&t, &costs, &config);
        assert_eq!(p.step_cost(a, b), Some(13));
        assert_eq!(p.step_cost(b, d), Some(15));
    }

    #[test]
    fn walls_cost_infinity() {
        let t = terrain();
        let costs = CostTable::standard();
        let p = TerrainPather::new(&t, &costs, &SearchConfig::default());
        assert_eq!(p.step_cost(Point::new(0, 1), Point::new(1, 1)), None);
        assert_eq!(p.cost(Point::new(0, 1), Point::new(1, 1), 99), 99);
        // '~' is not in the standard legend.
        assert_eq!(p.cost(Point::new(0, 0), Point::new(1, 0), 99), 99);
        assert_eq!(p.step_cost(Point::new(2, 1), Point::new(3, 1)), None);
    }

    #[test]
    fn neighbors_follow_topology() {
        let t = terrain();
        let costs = CostTable::standard();
        let mut buf = Vec::new();
        let four = TerrainPather::new(&t, &costs, &SearchConfig::default());
        four.neighbors(Point::new(1, 0), &mut buf);
        assert_eq!(buf.len(), 3);
        assert_eq!(four.max_neighbors(), 4);

        buf.clear();
        let eight = TerrainPather::new(&t, &costs, &SearchConfig::octile());
        eight.neighbors(Point::new(1, 0), &mut buf);
        assert_eq!(buf.len(), 5);
        assert_eq!(eight.max_neighbors(), 8);
    }

    #[test]
    fn heuristic_defaults_to_admissible_choice() {
        let t = terrain();
        let costs = CostTable::standard();
        let p = TerrainPather::new(&t, &costs, &SearchConfig::octile());
        assert_eq!(p.heuristic(), Heuristic::Octile { k: 10, k2: 14 });
        let p = p.with_heuristic(Heuristic::Zero);
        assert_eq!(p.estimate(Point::new(0, 0), Point::new(2, 1)), 0);
    }
}
