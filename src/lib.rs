//! DetPost is a post-processing library for object-detector output.
//!
//! It filters raw detections by confidence, converts normalized box
//! coordinates to pixel space, and computes box colors and outlines for an
//! injected drawing backend; a small companion module accounts trainable
//! parameters for vanilla versus depthwise-separable convolution blocks.
//! Inference, video I/O, and pixel manipulation stay with external
//! collaborators behind the [`Detector`] and [`BoxRenderer`] seams.

pub mod convblock;
pub mod detection;
pub mod filter;
pub mod geometry;
pub mod pipeline;
pub mod render;
mod trace;
pub mod util;

pub use detection::{Detection, DetectionBatch, NormalizedBox, PixelBox};
pub use util::{DetPostError, DetPostResult};

pub use convblock::{
    param_report, reduction_ratio, separable_param_count, vanilla_param_count, BatchNorm,
    ConvBlockSpec, ParamReport,
};
pub use filter::filter_by_confidence;
pub use geometry::{to_image_coordinates, to_normalized_coordinates, ImageGeometry};
pub use pipeline::{
    postprocess_batch, postprocess_batches, Detector, FramePipeline, FrameResult, PipelineConfig,
};
#[cfg(feature = "rayon")]
pub use pipeline::postprocess_batches_par;
pub use render::{box_outline, render_boxes, BoxRenderer, Color, Palette};
