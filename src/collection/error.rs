//! Error types for collections.

use crate::util::KeygenError;
use thiserror::Error;

/// Errors that can occur while adding items to a collection.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CollectionError {
    /// The collection is keyed by a field the item does not have.
    #[error("Item has no value at keyfield {keyfield:?}")]
    MissingKey { keyfield: String },

    /// An auto-generated key could not be produced.
    #[error(transparent)]
    Keygen(#[from] KeygenError),
}
