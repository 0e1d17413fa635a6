use serde::{Deserialize, Serialize};

/// Kind of document submitted for training.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    /// Inline file content; the only kind the training endpoint accepts for uploads.
    #[default]
    File,
}

/// Visibility of a trained document within the pathway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    #[default]
    Private,
    Public,
}
