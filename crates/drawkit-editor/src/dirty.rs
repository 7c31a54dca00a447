//! Dirty-region tracking for minimal repaints.

use crate::bbox::BBox;

/// What the renderer has to redraw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Repaint {
    Nothing,
    /// Document-space region.
    Region(BBox),
    Full,
}

impl Repaint {
    /// Combines two repaint requests.
    pub fn union(self, other: Repaint) -> Repaint {
        match (self, other) {
            (Repaint::Full, _) | (_, Repaint::Full) => Repaint::Full,
            (Repaint::Nothing, r) | (r, Repaint::Nothing) => r,
            (Repaint::Region(a), Repaint::Region(b)) => Repaint::Region(a.union(&b)),
        }
    }

    pub fn region(bbox: BBox) -> Repaint {
        if bbox.is_empty() {
            Repaint::Nothing
        } else {
            Repaint::Region(bbox)
        }
    }
}

/// Accumulates repaint requests until the renderer takes them.
#[derive(Debug, Clone, Default)]
pub struct DirtyTracker {
    region: BBox,
    full: bool,
}

impl DirtyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, bbox: &BBox) {
        self.region.merge(bbox);
    }

    /// Registers an edit that changed an object from `before` to `after` and
    /// returns the union.
    pub fn register_change(&mut self, before: &BBox, after: &BBox) -> BBox {
        let union = before.union(after);
        self.register(&union);
        union
    }

    pub fn register_repaint(&mut self, repaint: Repaint) {
        match repaint {
            Repaint::Nothing => {}
            Repaint::Region(bbox) => self.register(&bbox),
            Repaint::Full => self.force_full(),
        }
    }

    /// The visible-object set or the background changed.
    pub fn force_full(&mut self) {
        self.full = true;
    }

    pub fn peek(&self) -> Repaint {
        if self.full {
            Repaint::Full
        } else {
            Repaint::region(self.region)
        }
    }

    pub fn is_clean(&self) -> bool {
        self.peek() == Repaint::Nothing
    }

    /// Hands out the accumulated request once.
    pub fn take(&mut self) -> Repaint {
        let repaint = self.peek();
        *self = Self::default();
        repaint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_resets() {
        let mut dirty = DirtyTracker::new();
        dirty.register(&BBox::new(0.0, 0.0, 1.0, 1.0));
        dirty.register(&BBox::new(2.0, 2.0, 3.0, 3.0));
        assert_eq!(dirty.take(), Repaint::Region(BBox::new(0.0, 0.0, 3.0, 3.0)));
        assert_eq!(dirty.take(), Repaint::Nothing);
    }

    #[test]
    fn test_full_wins() {
        let mut dirty = DirtyTracker::new();
        dirty.register(&BBox::new(0.0, 0.0, 1.0, 1.0));
        dirty.force_full();
        assert_eq!(dirty.take(), Repaint::Full);
    }
}
