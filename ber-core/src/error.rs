use thiserror::Error;

/// Main error type for BER-TLV operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BerError {
    /// A single-byte access addressed an index at or past the buffer capacity.
    #[error("index is beyond bound (i={index}; b={})", last_index(.capacity))]
    IndexOutOfBounds { index: usize, capacity: usize },

    /// A write region would end past the buffer capacity.
    #[error("limit is beyond capacity (l={limit}; c={capacity})")]
    LimitExceeded { limit: usize, capacity: usize },

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl BerError {
    /// Whether the error is a destination-too-small failure.
    ///
    /// Capacity errors signal caller error: the encode call is abandoned and
    /// must be retried explicitly with a larger destination.
    pub fn is_capacity_exceeded(&self) -> bool {
        matches!(
            self,
            BerError::IndexOutOfBounds { .. } | BerError::LimitExceeded { .. }
        )
    }
}

fn last_index(capacity: &usize) -> isize {
    *capacity as isize - 1
}

/// Result type alias for BER-TLV operations
pub type BerResult<T> = Result<T, BerError>;
