//! Error types for detpost.

use thiserror::Error;

/// Result alias for detpost operations.
pub type DetPostResult<T> = std::result::Result<T, DetPostError>;

/// Errors that can occur when post-processing detector output.
///
/// Every variant signals a caller programming error raised synchronously at
/// the offending call; none are transient or retryable. Failures of external
/// collaborators (model inference, video I/O) are not represented here.
#[derive(Debug, Error, PartialEq)]
pub enum DetPostError {
    /// The three parallel arrays of a detection batch disagree in length.
    #[error("batch arrays disagree in length: {boxes} boxes, {scores} scores, {classes} classes")]
    LengthMismatch {
        boxes: usize,
        scores: usize,
        classes: usize,
    },
    /// A confidence threshold outside the valid [0, 1] range.
    #[error("confidence threshold {value} is outside [0, 1]")]
    ThresholdOutOfRange { value: f32 },
    /// Image geometry with a zero dimension.
    #[error("invalid image geometry: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    /// A palette with no colors cannot map class ids.
    #[error("palette must contain at least one color")]
    EmptyPalette,
    /// Render input where boxes and class ids are misaligned.
    #[error("render input misaligned: {boxes} boxes, {classes} class ids")]
    MismatchedClasses { boxes: usize, classes: usize },
    /// A convolution block field that must be positive was zero.
    #[error("conv block field `{field}` must be positive, got {value}")]
    NonPositiveField { field: &'static str, value: u32 },
    /// Convolution kernels are conventionally odd-sized.
    #[error("kernel size must be odd, got {kernel_size}")]
    EvenKernel { kernel_size: u32 },
    /// Guard for a zero denominator in the reduction ratio.
    #[error("division by zero in {context}")]
    DivisionByZero { context: &'static str },
    /// A parameter count that does not fit in 64 bits.
    #[error("parameter count overflow in {context}")]
    CountOverflow { context: &'static str },
    /// Failure loading or decoding an image file.
    #[cfg(feature = "image-io")]
    #[error("image I/O failed: {reason}")]
    ImageIo { reason: String },
}
