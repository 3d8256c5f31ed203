use thiserror::Error;

/// Why a selection could not be turned into rows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// The name is not one of the salary table's employment sectors.
    #[error("unknown employment category '{0}'")]
    UnknownCategory(String),

    /// The field has no entry in the citizenship-status column mapping.
    #[error("no citizenship-status columns are mapped for field of study '{0}'")]
    UnknownStudyField(String),

    /// The loaded sheet lacks a column the selection needs.
    #[error("status table has no column '{0}'")]
    MissingColumn(String),
}
