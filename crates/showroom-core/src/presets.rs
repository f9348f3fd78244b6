//! Viewpoint ring navigation

/// Index into a fixed, non-empty ring of camera presets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresetRing {
    len: usize,
    index: usize,
}

impl PresetRing {
    /// Create a ring positioned at the first preset. A zero length is
    /// treated as a ring of one so navigation never divides by zero.
    pub fn new(len: usize) -> Self {
        Self {
            len: len.max(1),
            index: 0,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn next(&mut self) -> usize {
        self.index = (self.index + 1) % self.len;
        self.index
    }

    pub fn previous(&mut self) -> usize {
        self.index = (self.index + self.len - 1) % self.len;
        self.index
    }

    /// Jump to a preset; out-of-range indices are ignored
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.len && index != self.index {
            self.index = index;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_wraps() {
        let mut ring = PresetRing::new(4);
        assert_eq!(ring.index(), 0);
        assert_eq!(ring.next(), 1);
        assert_eq!(ring.next(), 2);
        assert_eq!(ring.next(), 3);
        assert_eq!(ring.next(), 0);
    }

    #[test]
    fn test_previous_wraps() {
        let mut ring = PresetRing::new(4);
        assert_eq!(ring.previous(), 3);
        assert_eq!(ring.previous(), 2);
    }

    #[test]
    fn test_select() {
        let mut ring = PresetRing::new(4);
        assert!(ring.select(2));
        assert_eq!(ring.index(), 2);
        assert!(!ring.select(2));
        assert!(!ring.select(9));
        assert_eq!(ring.index(), 2);
    }

    #[test]
    fn test_empty_ring_is_single() {
        let mut ring = PresetRing::new(0);
        assert_eq!(ring.len(), 1);
        assert_eq!(ring.next(), 0);
        assert_eq!(ring.previous(), 0);
    }
}
