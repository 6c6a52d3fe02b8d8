use feed_model::RawRow;

use crate::error::SourceError;

/// Rows for one compile cycle, both in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceRows {
    pub primary: Vec<RawRow>,
    pub secondary: Vec<RawRow>,
}

impl SourceRows {
    pub fn new(primary: Vec<RawRow>, secondary: Vec<RawRow>) -> Self {
        Self { primary, secondary }
    }
}

/// Supplies catalog rows. Any error aborts the current compile cycle.
pub trait RowSource: Send + Sync {
    fn fetch(&self) -> Result<SourceRows, SourceError>;

    /// Short label used in logs.
    fn describe(&self) -> String {
        "row source".to_string()
    }
}

/// Serves a fixed set of rows held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticRowSource {
    rows: SourceRows,
}

impl StaticRowSource {
    pub fn new(rows: SourceRows) -> Self {
        Self { rows }
    }
}

impl RowSource for StaticRowSource {
    fn fetch(&self) -> Result<SourceRows, SourceError> {
        Ok(self.rows.clone())
    }

    fn describe(&self) -> String {
        format!(
            "static rows ({} primary, {} secondary)",
            self.rows.primary.len(),
            self.rows.secondary.len()
        )
    }
}
