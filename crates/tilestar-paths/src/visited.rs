//! Dense bitmap of closed points.

use crate::error::SearchError;

const WORD_BITS: usize = u64::BITS as usize;

/// One bit per grid cell; a set bit means the point has been expanded.
#[derive(Debug, Clone, Default)]
pub struct VisitedSet {
    words: Vec<u64>,
    len: usize,
}

impl VisitedSet {
    /// Clear every bit and resize to cover `len` points.
    pub fn reset(&mut self, len: usize) -> Result<(), SearchError> {
        let nwords = len.div_ceil(WORD_BITS);
        self.words.clear();
        self.words
            .try_reserve_exact(nwords)
            .map_err(|_| SearchError::ResourceExhausted { requested: nwords })?;
        self.words.resize(nwords, 0);
        self.len = len;
        Ok(())
    }

    /// Number of points covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn mark(&mut self, idx: usize) {
        debug_assert!(idx < self.len);
        self.words[idx / WORD_BITS] |= 1u64 << (idx % WORD_BITS);
    }

    #[inline]
    pub fn is_marked(&self, idx: usize) -> bool {
        self.words[idx / WORD_BITS] & (1u64 << (idx % WORD_BITS)) != 0
    }

    /// Mark `idx`, returning whether it was already marked.
    #[inline]
    pub fn test_and_mark(&mut self, idx: usize) -> bool {
        let was = self.is_marked(idx);
        self.mark(idx);
        was
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cleared(len: usize) -> VisitedSet {
        let mut v = VisitedSet::default();
        v.reset(len).unwrap();
        v
    }

    fn marked(v: &VisitedSet) -> usize {
        (0..v.len()).filter(|&i| v.is_marked(i)).count()
    }

    #[test]
    fn marks_across_word_boundaries() {
        let mut v = cleared(130);
        for i in [0, 63, 64, 127, 128, 129] {
            assert!(!v.is_marked(i));
            v.mark(i);
            assert!(v.is_marked(i));
        }
        assert!(!v.is_marked(1));
        assert!(!v.is_marked(65));
        assert_eq!(marked(&v), 6);
    }

    #[test]
    fn test_and_mark_reports_previous_state() {
        let mut v = cleared(10);
        assert!(!v.test_and_mark(4));
        assert!(v.test_and_mark(4));
    }

    #[test]
    fn reset_clears() {
        let mut v = cleared(70);
        v.mark(69);
        v.reset(70).unwrap();
        assert_eq!(marked(&v), 0);
        v.reset(8).unwrap();
        assert_eq!(v.len(), 8);
    }
}
