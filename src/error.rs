//! Crate-level error type.
//!
//! Each module reports its own error enum. [`Error`] wraps all of them so callers
//! mixing several modules can use `?` throughout.

use crate::collection::CollectionError;
use crate::path::PathError;
use crate::request::RequestError;
use crate::template::TemplateError;
use crate::util::KeygenError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Collection(#[from] CollectionError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Keygen(#[from] KeygenError),

    #[error(transparent)]
    Request(#[from] RequestError),
}

/// Shorthand for results carrying [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;
