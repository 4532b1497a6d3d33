//! Per-symbol traversal costs.

use std::fmt;

/// Accumulated or per-step traversal cost.
pub type Cost = u64;

/// A 256-entry lookup table from terrain symbol to step cost.
///
/// Every byte value has an entry. A symbol is either passable with a finite,
/// non-negative cost, or impassable. A fresh table marks every symbol
/// impassable, so only explicitly mapped symbols can be walked on.
#[derive(Clone, PartialEq, Eq)]
pub struct CostTable {
    costs: [Option<Cost>; 256],
}

impl Default for CostTable {
    fn default() -> Self {
        Self::new()
    }
}

impl CostTable {
    /// A table with every symbol impassable.
    pub const fn new() -> Self {
        Self { costs: [None; 256] }
    }

    /// The classic map legend: `.` costs 1, everything else (including the
    /// `@` wall) is impassable.
    pub fn standard() -> Self {
        Self::new().with(b'.', 1)
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, symbol: u8, cost: Cost) -> Self {
        self.set(symbol, cost);
        self
    }

    /// Builder form of [`block`](Self::block).
    pub fn with_wall(mut self, symbol: u8) -> Self {
        self.block(symbol);
        self
    }

    /// Make `symbol` passable at `cost` per step.
    pub fn set(&mut self, symbol: u8, cost: Cost) {
        self.costs[symbol as usize] = Some(cost);
    }

    /// Make `symbol` impassable.
    pub fn block(&mut self, symbol: u8) {
        self.costs[symbol as usize] = None;
    }

    /// Step cost of `symbol`, or `None` when it is impassable.
    #[inline]
    pub fn get(&self, symbol: u8) -> Option<Cost> {
        self.costs[symbol as usize]
    }

    #[inline]
    pub fn is_passable(&self, symbol: u8) -> bool {
        self.costs[symbol as usize].is_some()
    }

    /// Step cost of `symbol`, with impassable symbols mapped to `infinity`.
    #[inline]
    pub fn cost_or(&self, symbol: u8, infinity: Cost) -> Cost {
        self.costs[symbol as usize].unwrap_or(infinity)
    }

    /// Largest finite cost in the table, or `None` if nothing is passable.
    pub fn max_cost(&self) -> Option<Cost> {
        self.costs.iter().flatten().copied().max()
    }

    /// Smallest finite cost in the table, or `None` if nothing is passable.
    pub fn min_cost(&self) -> Option<Cost> {
        self.costs.iter().flatten().copied().min()
    }

    /// Iterate over the passable symbols and their costs.
    pub fn passable(&self) -> impl Iterator<Item = (u8, Cost)> + '_ {
        self.costs
            .iter()
            .enumerate()
            .filter_map(|(s, c)| c.map(|c| (s as u8, c)))
    }
}

impl fmt::Debug for CostTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut m = f.debug_map();
        for (s, c) in self.passable() {
            m.entry(&(s as char), &c);
        }
        m.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_table_is_all_walls() {
        let t = CostTable::new();
        for s in 0..=255u8 {
            assert_eq!(t.get(s), None);
        }
        assert_eq!(t.max_cost(), None);
    }

    #[test]
    fn standard_legend() {
        let t = CostTable::standard();
        assert_eq!(t.get(b'.'), Some(1));
        assert!(!t.is_passable(b'@'));
        assert_eq!(t.cost_or(b'@', 26), 26);
        assert_eq!(t.cost_or(b'.', 26), 1);
    }

    #[test]
    fn set_and_block() {
        let mut t = CostTable::new().with(b'~', 5).with(b'.', 0);
        assert_eq!(t.max_cost(), Some(5));
        assert_eq!(t.min_cost(), Some(0));
        t.block(b'~');
        assert_eq!(t.get(b'~'), None);
        assert_eq!(t.max_cost(), Some(0));
        let t = t.with(b'#', 3).with_wall(b'#');
        assert!(!t.is_passable(b'#'));
    }

    #[test]
    fn passable_lists_mapped_symbols() {
        let t = CostTable::new().with(b'b', 2).with(b'a', 1);
        let v: Vec<_> = t.passable().collect();
        assert_eq!(v, vec![(b'a', 1), (b'b', 2)]);
        assert_eq!(format!("{t:?}"), "{'a': 1, 'b': 2}");
    }
}
