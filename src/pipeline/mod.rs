//! Per-frame post-processing pipeline.
//!
//! The detector is an injected capability object, never a process-wide
//! singleton, so the pipeline runs unchanged against a stub returning fixed
//! arrays. One frame flows filter → convert → render; nothing is carried
//! between frames, so many frames' raw batches may be post-processed
//! concurrently.

use crate::detection::{DetectionBatch, PixelBox};
use crate::filter::filter_by_confidence;
use crate::geometry::{to_image_coordinates, ImageGeometry};
use crate::render::{render_boxes, BoxRenderer, Palette};
use crate::trace::{trace_event, trace_span};
use crate::util::DetPostResult;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Inference collaborator producing one aligned batch per frame.
///
/// `F` is whatever the detector consumes as a frame (tensor, image buffer,
/// file handle); this library never inspects it.
pub trait Detector<F> {
    /// Runs inference on one frame.
    fn detect(&self, frame: &F) -> DetPostResult<DetectionBatch>;
}

/// Tuning knobs for the per-frame pipeline.
#[derive(Copy, Clone, Debug)]
pub struct PipelineConfig {
    /// Minimum confidence for a detection to survive, in [0, 1].
    pub min_score: f32,
    /// Outline stroke width in pixels.
    pub thickness: u32,
    /// Post-process clip frames in parallel (requires the `rayon` feature).
    pub parallel: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_score: 0.5,
            thickness: 2,
            parallel: false,
        }
    }
}

/// Post-processed output for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameResult {
    /// Detections that survived the confidence filter, in input order.
    pub batch: DetectionBatch,
    /// The surviving boxes converted to pixel coordinates, aligned with
    /// `batch`.
    pub pixel_boxes: Vec<PixelBox>,
}

/// Stateless filter → convert → render pipeline.
pub struct FramePipeline {
    config: PipelineConfig,
    palette: Palette,
}

impl FramePipeline {
    /// Creates a pipeline with the default configuration.
    pub fn new(palette: Palette) -> Self {
        Self {
            config: PipelineConfig::default(),
            palette,
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> PipelineConfig {
        self.config
    }

    /// Runs inference on one frame, filters and converts the result, and
    /// draws outlines through `renderer`.
    pub fn process_frame<F, D, R>(
        &self,
        detector: &D,
        frame: &F,
        geometry: ImageGeometry,
        renderer: &mut R,
    ) -> DetPostResult<FrameResult>
    where
        D: Detector<F>,
        R: BoxRenderer,
    {
        let _span = trace_span!("process_frame", min_score = self.config.min_score).entered();

        let raw = detector.detect(frame)?;
        let result = postprocess_batch(&raw, self.config.min_score, geometry)?;
        render_boxes(
            renderer,
            &result.pixel_boxes,
            result.batch.classes(),
            &self.palette,
            self.config.thickness,
        )?;

        trace_event!("frame_done", raw = raw.len(), kept = result.batch.len());
        Ok(result)
    }

    /// Filters and converts the raw batches of a whole clip, one entry per
    /// frame, without rendering.
    ///
    /// Honors `config.parallel` when the `rayon` feature is enabled; the
    /// serial and parallel paths produce identical results.
    pub fn postprocess_clip(
        &self,
        batches: &[DetectionBatch],
        geometry: ImageGeometry,
    ) -> DetPostResult<Vec<FrameResult>> {
        #[cfg(feature = "rayon")]
        if self.config.parallel {
            return postprocess_batches_par(batches, self.config.min_score, geometry);
        }
        postprocess_batches(batches, self.config.min_score, geometry)
    }
}

/// Filters one raw batch and converts the survivors to pixel coordinates.
pub fn postprocess_batch(
    batch: &DetectionBatch,
    min_score: f32,
    geometry: ImageGeometry,
) -> DetPostResult<FrameResult> {
    let kept = filter_by_confidence(batch, min_score)?;
    let pixel_boxes = to_image_coordinates(kept.boxes(), geometry);
    Ok(FrameResult {
        batch: kept,
        pixel_boxes,
    })
}

/// Serial filter + convert over many frames' raw batches.
pub fn postprocess_batches(
    batches: &[DetectionBatch],
    min_score: f32,
    geometry: ImageGeometry,
) -> DetPostResult<Vec<FrameResult>> {
    let _span = trace_span!("postprocess_batches", frames = batches.len()).entered();
    batches
        .iter()
        .map(|batch| postprocess_batch(batch, min_score, geometry))
        .collect()
}

/// Parallel twin of [`postprocess_batches`] (rayon).
#[cfg(feature = "rayon")]
pub fn postprocess_batches_par(
    batches: &[DetectionBatch],
    min_score: f32,
    geometry: ImageGeometry,
) -> DetPostResult<Vec<FrameResult>> {
    let _span = trace_span!("postprocess_batches", frames = batches.len(), parallel = true).entered();
    batches
        .par_iter()
        .map(|batch| postprocess_batch(batch, min_score, geometry))
        .collect()
}
