/// Knobs for tree construction. None of them change the resulting hashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    /// Layers with at least this many nodes are hashed on the rayon pool.
    pub parallel_threshold: usize,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            parallel_threshold: 1024,
        }
    }
}

impl BuildOptions {
    pub fn sequential() -> Self {
        Self {
            parallel_threshold: usize::MAX,
        }
    }

    pub(crate) fn is_parallel(&self, len: usize) -> bool {
        len >= self.parallel_threshold
    }
}
