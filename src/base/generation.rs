/// Monotonic epoch of a document.
///
/// Every wholesale replacement or in-place mutation of a document advances its
/// generation. Anything derived from the document (cached node handles in
/// particular) records the generation it was computed against and is stale
/// once the two differ.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    /// Generation of a freshly created document.
    pub const INITIAL: Self = Self(0);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }

    /// The generation following this one.
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Advance in place and return the new generation.
    pub fn bump(&mut self) -> Self {
        *self = self.next();
        *self
    }
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "gen#{}", self.0)
    }
}
