//! Small synchronous helpers: key generation, string clean-up, number and duration
//! formatting, and object defaults.

mod error;
mod keygen;
mod numbers;
mod objects;
mod strings;

pub use error::*;
pub use keygen::*;
pub use numbers::*;
pub use objects::*;
pub use strings::*;
