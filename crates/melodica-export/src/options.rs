//! Render options.

/// Options for an offline render.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Output sample rate in Hz.
    pub sample_rate: u32,
    /// Silence appended after the last note ends, in seconds, so the
    /// final release is not cut off at the buffer edge.
    pub tail_seconds: f64,
    /// Treat an empty sequence as [`EmptyInput`](crate::RenderError::EmptyInput)
    /// instead of rendering a tail-only silent buffer.
    pub require_notes: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            sample_rate: 44_100,
            tail_seconds: 0.5,
            require_notes: false,
        }
    }
}

impl RenderOptions {
    /// Default options at a non-standard sample rate.
    pub fn with_sample_rate(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = RenderOptions::default();
        assert_eq!(options.sample_rate, 44_100);
        assert_eq!(options.tail_seconds, 0.5);
        assert!(!options.require_notes);
    }

    #[test]
    fn test_with_sample_rate() {
        let options = RenderOptions::with_sample_rate(48_000);
        assert_eq!(options.sample_rate, 48_000);
        assert_eq!(options.tail_seconds, 0.5);
    }
}
