//! Error types for boreas-render.

/// Error type for all fallible operations in the boreas-render crate.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Returned when an input array has no elements to draw.
    #[error("empty input: {name} has no elements")]
    EmptyInput {
        /// Name of the offending input.
        name: String,
    },

    /// Wraps a colour-gradient construction failure.
    #[error("gradient error: {reason}")]
    Gradient {
        /// Description of the underlying gradient failure.
        reason: String,
    },

    /// Wraps an error originating from the image library.
    #[error("image error: {reason}")]
    Image {
        /// Description of the underlying image failure.
        reason: String,
    },
}

impl From<image::ImageError> for RenderError {
    fn from(e: image::ImageError) -> Self {
        RenderError::Image {
            reason: e.to_string(),
        }
    }
}

impl From<colorgrad::CustomGradientError> for RenderError {
    fn from(e: colorgrad::CustomGradientError) -> Self {
        RenderError::Gradient {
            reason: e.to_string(),
        }
    }
}
