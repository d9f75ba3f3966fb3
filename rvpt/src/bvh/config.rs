/// Knobs of the binned SAH builder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BvhConfig {
    /// Number of bins per axis used when looking for the splitting plane.
    ///
    /// More bins find better planes at the expense of build time.
    pub bin_count: usize,

    /// Nodes with fewer primitives than this are never split.
    pub min_primitives_per_leaf: usize,

    /// Nodes with more primitives than this are always split, falling back to
    /// a median split when the SAH doesn't find anything worthwhile.
    pub max_primitives_per_leaf: usize,

    /// Depth (the root being at zero) at which nodes become leaves no matter
    /// how many primitives they hold.
    ///
    /// Keeps the shader's traversal stack bounded.
    pub max_depth: usize,
}

impl BvhConfig {
    pub fn with_bin_count(mut self, bin_count: usize) -> Self {
        self.bin_count = bin_count;
        self
    }

    pub fn with_min_primitives_per_leaf(mut self, count: usize) -> Self {
        self.min_primitives_per_leaf = count;
        self
    }

    pub fn with_max_primitives_per_leaf(mut self, count: usize) -> Self {
        self.max_primitives_per_leaf = count;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub(crate) fn validate(&self) {
        assert!(
            self.bin_count >= 2,
            "bin_count must be at least 2, got {}",
            self.bin_count
        );

        assert!(
            self.min_primitives_per_leaf >= 1,
            "min_primitives_per_leaf must be at least 1"
        );

        assert!(
            self.max_primitives_per_leaf >= self.min_primitives_per_leaf,
            "max_primitives_per_leaf ({}) must not be smaller than \
             min_primitives_per_leaf ({})",
            self.max_primitives_per_leaf,
            self.min_primitives_per_leaf,
        );

        assert!(self.max_depth >= 1, "max_depth must be at least 1");
    }
}

impl Default for BvhConfig {
    fn default() -> Self {
        Self {
            bin_count: 16,
            min_primitives_per_leaf: 4,
            max_primitives_per_leaf: 8,
            max_depth: 64,
        }
    }
}
