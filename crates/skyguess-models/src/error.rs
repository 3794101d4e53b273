//! Error types for the `skyguess-models` crate.
//!
//! All fallible constructors and conversions in this crate return variants
//! of [`ModelError`].

/// Errors produced when decoding or normalizing model values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// A callsign could not be turned into a commercial flight number.
    #[error("invalid callsign \"{value}\": {reason}")]
    InvalidCallsign {
        /// The value that failed normalization.
        value: String,
        /// Human-readable explanation.
        reason: String,
    },

    /// A raw state vector did not have the expected shape.
    #[error("invalid state vector: {reason}")]
    InvalidStateVector {
        /// Human-readable explanation.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_callsign() {
        let err = ModelError::InvalidCallsign {
            value: "N1".into(),
            reason: "must be at least 4 characters".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid callsign \"N1\": must be at least 4 characters"
        );
    }

    #[test]
    fn error_display_state_vector() {
        let err = ModelError::InvalidStateVector {
            reason: "expected a JSON array".into(),
        };
        assert_eq!(err.to_string(), "invalid state vector: expected a JSON array");
    }
}
