//! Random keys with a caller-controlled suffix.

use super::KeygenError;
use std::fmt::Display;

/// Generates `<8 random hex chars>-<suffix>`.
///
/// The suffix is what makes keys unique; the random prefix only makes them hard to
/// guess. [`Collection`](crate::collection::Collection) passes its own counter.
pub fn keygen(suffix: impl Display) -> Result<String, KeygenError> {
    let mut bytes = [0u8; 4];
    getrandom::fill(&mut bytes).map_err(|e| KeygenError::Entropy(e.to_string()))?;
    let prefix: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    Ok(format!("{prefix}-{suffix}"))
}

/// Key generator numbering its keys `1, 2, 3, ...`.
///
/// Each generator owns its counter, so independent generators never interfere.
#[derive(Debug, Clone, Default)]
pub struct Keygen {
    idx: u64,
}

impl Keygen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume numbering after `idx`.
    pub fn starting_at(idx: u64) -> Self {
        Self { idx }
    }

    pub fn idx(&self) -> u64 {
        self.idx
    }

    /// Next key. The counter only advances when a key is produced.
    pub fn next_key(&mut self) -> Result<String, KeygenError> {
        let key = keygen(self.idx + 1)?;
        self.idx += 1;
        Ok(key)
    }
}
