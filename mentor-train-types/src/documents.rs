use serde::{Deserialize, Serialize};

use crate::enums::{AccessLevel, DocumentType};

/// Body of a document training request.
///
/// The file content travels inline as base64 text, so the whole request is a
/// single JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainDocumentRequest {
    /// Pathway (mentor) that should index the document.
    pub pathway: String,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub access: AccessLevel,
    /// Raw file bytes, base64-encoded on the wire.
    #[serde(with = "crate::base64_serde")]
    pub file: Vec<u8>,
    /// Optional. Original file name, shown in the mentor's document list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl TrainDocumentRequest {
    /// Builds a private file request for the given pathway.
    pub fn new(pathway: impl Into<String>, file: Vec<u8>) -> Self {
        Self {
            pathway: pathway.into(),
            doc_type: DocumentType::File,
            access: AccessLevel::Private,
            file,
            name: None,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub const fn with_access(mut self, access: AccessLevel) -> Self {
        self.access = access;
        self
    }
}

/// Response returned once a training task has been queued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TrainDocumentResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
}
