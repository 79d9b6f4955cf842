//! Branch-scoped retrieval result.

use super::Section;

/// Parsed outcome of one branch fetch for one cycle.
///
/// Sections keep document order. Constructed by the fetcher, consumed
/// by the evaluator, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleSnapshot {
    /// Sections in feed/document order
    pub sections: Vec<Section>,

    /// Feed update timestamp, empty when the source does not report one
    pub updated_at: String,
}

impl ScheduleSnapshot {
    /// Create a snapshot from parsed sections.
    pub fn new(sections: Vec<Section>, updated_at: impl Into<String>) -> Self {
        Self {
            sections,
            updated_at: updated_at.into(),
        }
    }

    /// Empty snapshot, used as the degradation result.
    pub fn empty() -> Self {
        Self::default()
    }
}
