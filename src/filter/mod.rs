//! Confidence filtering over detection batches.
//!
//! Filtering is a stable single pass: retained detections keep their relative
//! input order and the alignment across the boxes/scores/classes arrays. The
//! score comparison is inclusive, so a detection scoring exactly at the
//! threshold survives.

use crate::detection::DetectionBatch;
use crate::trace::{trace_event, trace_span};
use crate::util::{DetPostError, DetPostResult};

/// Returns a new batch holding only detections with `score >= min_score`.
///
/// The input batch is not mutated. An empty result is a normal outcome, not
/// an error. `min_score` must lie in [0, 1].
pub fn filter_by_confidence(
    batch: &DetectionBatch,
    min_score: f32,
) -> DetPostResult<DetectionBatch> {
    if !(0.0..=1.0).contains(&min_score) {
        return Err(DetPostError::ThresholdOutOfRange { value: min_score });
    }

    let _span = trace_span!("filter_by_confidence", total = batch.len()).entered();

    let mut boxes = Vec::new();
    let mut scores = Vec::new();
    let mut classes = Vec::new();
    for detection in batch.iter() {
        if detection.score >= min_score {
            boxes.push(detection.bbox);
            scores.push(detection.score);
            classes.push(detection.class_id);
        }
    }

    trace_event!("filter_result", kept = boxes.len(), dropped = batch.len() - boxes.len());
    DetectionBatch::new(boxes, scores, classes)
}

#[cfg(test)]
mod tests {
    use super::filter_by_confidence;
    use crate::detection::{DetectionBatch, NormalizedBox};
    use crate::util::DetPostError;

    fn sample_batch() -> DetectionBatch {
        DetectionBatch::new(
            vec![
                NormalizedBox::new(0.0, 0.0, 0.1, 0.1),
                NormalizedBox::new(0.2, 0.2, 0.3, 0.3),
                NormalizedBox::new(0.4, 0.4, 0.5, 0.5),
            ],
            vec![0.9, 0.5, 0.7],
            vec![1, 2, 3],
        )
        .unwrap()
    }

    #[test]
    fn threshold_is_inclusive() {
        let kept = filter_by_confidence(&sample_batch(), 0.5).unwrap();
        assert_eq!(kept.len(), 3);

        let kept = filter_by_confidence(&sample_batch(), 0.7).unwrap();
        assert_eq!(kept.scores(), &[0.9, 0.7]);
        assert_eq!(kept.classes(), &[1, 3]);
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        let err = filter_by_confidence(&sample_batch(), 1.5).err().unwrap();
        assert_eq!(err, DetPostError::ThresholdOutOfRange { value: 1.5 });

        let err = filter_by_confidence(&sample_batch(), -0.1).err().unwrap();
        assert_eq!(err, DetPostError::ThresholdOutOfRange { value: -0.1 });
    }

    #[test]
    fn empty_result_is_ok() {
        let kept = filter_by_confidence(&sample_batch(), 0.95).unwrap();
        assert!(kept.is_empty());
    }
}
