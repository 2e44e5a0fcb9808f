//! Error types for channel-effect dispatch and mixer backends.
//!
//! The one condition that is deliberately *not* an error is an effect
//! descriptor with an unrecognized tag: dispatch logs a diagnostic and
//! keeps going. Everything here describes failures reported by a mixer
//! backend or by configuration validation.

/// Errors reported by mixer backends and configuration validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MixerError {
    /// Channel index outside the backend's channel table
    #[error("invalid channel index: {0}")]
    InvalidChannel(i32),

    /// A configuration value failed validation
    #[error("invalid value: {0}")]
    InvalidValue(&'static str),

    /// Failure reported by the wrapped native mixer library
    #[error("mixer driver failure: {0}")]
    Driver(String),
}

/// Result type for mixer operations
pub type MixerResult<T> = Result<T, MixerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MixerError::InvalidChannel(12);
        assert_eq!(format!("{}", err), "invalid channel index: 12");

        let err = MixerError::Driver("no audio device".to_string());
        assert_eq!(format!("{}", err), "mixer driver failure: no audio device");
    }

    #[test]
    fn test_error_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<MixerError>();
    }
}
