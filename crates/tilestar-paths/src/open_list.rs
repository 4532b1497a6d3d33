//! Binary min-heap of point indices keyed by f-cost.
//!
//! The heap has no decrease-key: when a cheaper route to a queued point is
//! found, the point is pushed again and the older entry goes stale. Each
//! entry carries the f-cost it had when pushed, so later changes to the
//! cost tables never break the heap order.

use std::collections::TryReserveError;

use tilestar_core::Cost;

use crate::error::SearchError;

/// Reference into the node tables, ordered by `f`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) f: Cost,
}

/// The open list of an A* search.
#[derive(Debug, Default)]
pub struct OpenList {
    heap: Vec<NodeRef>,
    limit: usize,
}

impl OpenList {
    /// Empty the list, cap it at `limit` entries and pre-allocate room for
    /// `reserve` of them. Further room is allocated on demand.
    pub fn reset(&mut self, limit: usize, reserve: usize) -> Result<(), SearchError> {
        self.heap.clear();
        self.limit = limit;
        let reserve = reserve.min(limit);
        self.heap
            .try_reserve_exact(reserve)
            .map_err(|_: TryReserveError| SearchError::ResourceExhausted { requested: reserve })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Maximum number of entries.
    #[inline]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Push `idx` keyed by `f`. O(log n).
    pub fn insert(&mut self, idx: usize, f: Cost) -> Result<(), SearchError> {
        if self.heap.len() >= self.limit {
            return Err(SearchError::OpenListOverflow {
                capacity: self.limit,
            });
        }
        self.heap
            .try_reserve(1)
            .map_err(|_| SearchError::ResourceExhausted {
                requested: self.heap.len() + 1,
            })?;
        self.heap.push(NodeRef { idx, f });
        self.sift_up(self.heap.len() - 1);
        Ok(())
    }

    /// Pop the index with the smallest f-cost. O(log n).
    ///
    /// Ties come out in heap order, which is unspecified.
    pub fn remove_min(&mut self) -> Option<usize> {
        self.pop().map(|n| n.idx)
    }

    pub(crate) fn pop(&mut self) -> Option<NodeRef> {
        let last = self.heap.pop()?;
        if self.heap.is_empty() {
            return Some(last);
        }
        // Move the last entry into the root hole and sift it down.
        let min = std::mem::replace(&mut self.heap[0], last);
        self.sift_down(0);
        Some(min)
    }

    fn sift_up(&mut self, mut hole: usize) {
        let node = self.heap[hole];
        while hole > 0 {
            let parent = (hole - 1) / 2;
            if node.f >= self.heap[parent].f {
                break;
            }
            self.heap[hole] = self.heap[parent];
            hole = parent;
        }
        self.heap[hole] = node;
    }

    fn sift_down(&mut self, mut hole: usize) {
        let len = self.heap.len();
        let node = self.heap[hole];
        loop {
            let mut child = 2 * hole + 1;
            if child >= len {
                break;
            }
            if child + 1 < len && self.heap[child + 1].f < self.heap[child].f {
                child += 1;
            }
            if self.heap[child].f >= node.f {
                break;
            }
            self.heap[hole] = self.heap[child];
            hole = child;
        }
        self.heap[hole] = node;
    }

    #[cfg(test)]
    fn is_heap(&self) -> bool {
        (1..self.heap.len()).all(|i| self.heap[(i - 1) / 2].f <= self.heap[i].f)
    }
}
