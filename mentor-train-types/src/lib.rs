//! Wire types for the AI mentor document-training API.

mod base64_serde;

pub mod documents;
pub mod enums;
