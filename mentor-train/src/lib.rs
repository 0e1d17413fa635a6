//! Client for the AI mentor document-training API.

pub mod client;
pub mod credentials;
pub mod documents;
pub mod error;
pub mod outcome;
pub mod report;

#[cfg(test)]
mod test_support;

pub use mentor_train_types as types;

pub use client::{Client, ClientBuilder, HttpOptions, DEFAULT_BASE_URL};
pub use credentials::ApiToken;
pub use error::{Error, Result};
pub use outcome::TrainOutcome;
