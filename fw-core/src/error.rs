use std::error::Error;
use std::fmt;

/// Errors `fw-core` can return. Matches the teacher's hand-rolled
/// `Display` + `std::error::Error` style rather than pulling in a derive
/// macro for a single-crate error type with two variants.
#[derive(Debug)]
pub enum EngineError {
    /// `add` was called with `lo > hi` on one of the rule's dimensions.
    InvalidRange { dimension: usize, lo: u32, hi: u32 },
    /// `add` was called with an action code outside `{0..4}`.
    InvalidAction(u8),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidRange { dimension, lo, hi } => write!(
                f,
                "invalid range on dimension {dimension}: lo={lo} > hi={hi}"
            ),
            EngineError::InvalidAction(code) => {
                write!(f, "invalid action code: {code} (expected 0..=4)")
            }
        }
    }
}

impl Error for EngineError {}
