//! Optimistic-concurrency building block for record writes.

/// Version expectation for a record write.
///
/// Stored materials carry a monotonically increasing version; writers state
/// which version they read so two concurrent read-modify-write sequences
/// against the same material cannot both commit.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ExpectedVersion {
    /// Skip version checking (useful for seeding and migrations).
    Any,
    /// Require the record to be at an exact version.
    Exact(u64),
}

impl ExpectedVersion {
    pub fn matches(self, actual: u64) -> bool {
        match self {
            ExpectedVersion::Any => true,
            ExpectedVersion::Exact(v) => v == actual,
        }
    }
}
