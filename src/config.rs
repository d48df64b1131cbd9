/// Configuration for a [`HistoryBuffer`](crate::HistoryBuffer).
#[derive(Debug, Clone)]
pub struct HistoryConfig {
    /// Maximum number of entries kept in the history.
    /// When the history is full, pushing a new entry evicts the oldest one.
    /// Must be greater than zero.
    /// Default: 64
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { capacity: 64 }
    }
}

impl HistoryConfig {
    /// Configuration keeping at most `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { capacity }
    }
}
