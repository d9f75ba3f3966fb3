use std::ops::Range;

/// Which parts of the BVH the debug overlay shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BvhDebugView {
    pub enabled: bool,

    /// Number of levels to show, starting from the root.
    pub max_depth: usize,

    /// Whether to show all levels up to `max_depth` or just the last one.
    pub include_previous_depths: bool,
}

impl BvhDebugView {
    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }

    pub fn toggle_previous_depths(&mut self) {
        self.include_previous_depths = !self.include_previous_depths;
    }

    pub fn deeper(&mut self) {
        self.max_depth = self.max_depth.saturating_add(1);
    }

    pub fn shallower(&mut self) {
        self.max_depth = self.max_depth.saturating_sub(1).max(1);
    }

    /// Returns the depths this view covers in a tree with `available` levels.
    pub fn depths(&self, available: usize) -> Range<usize> {
        let end = self.max_depth.min(available);

        if self.include_previous_depths {
            0..end
        } else {
            end.saturating_sub(1)..end
        }
    }
}

impl Default for BvhDebugView {
    fn default() -> Self {
        Self {
            enabled: false,
            max_depth: 1,
            include_previous_depths: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depths() {
        let mut target = BvhDebugView::default();

        assert_eq!(0..1, target.depths(10));

        target.deeper();
        target.deeper();

        assert_eq!(0..3, target.depths(10));
        assert_eq!(0..2, target.depths(2));
        assert_eq!(0..0, target.depths(0));

        target.toggle_previous_depths();

        assert_eq!(2..3, target.depths(10));
        assert_eq!(1..2, target.depths(2));
        assert_eq!(0..0, target.depths(0));
    }

    #[test]
    fn shallower() {
        let mut target = BvhDebugView::default();

        target.shallower();
        target.shallower();

        assert_eq!(1, target.max_depth);

        target.toggle();

        assert!(target.enabled);
    }

    #[test]
    fn deeper_saturates() {
        let mut target = BvhDebugView {
            max_depth: usize::MAX,
            ..Default::default()
        };

        target.deeper();

        assert_eq!(usize::MAX, target.max_depth);
        assert_eq!(0..10, target.depths(10));
    }
}
