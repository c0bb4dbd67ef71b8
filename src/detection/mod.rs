//! Detection value types and the parallel-array batch.
//!
//! A detector emits three equal-length arrays per image: normalized boxes,
//! confidence scores, and integer class ids. Index `i` across the three
//! arrays describes one detection. `DetectionBatch` owns the arrays and
//! enforces the equal-length invariant at construction, so downstream code
//! can index freely without re-checking.

use crate::util::{DetPostError, DetPostResult};

/// Box corners as fractions of image height/width, each in [0, 1].
///
/// Component order is `(top, left, bottom, right)` and is load-bearing:
/// vertical components scale by image height, horizontal ones by width.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NormalizedBox {
    /// Top edge as a fraction of image height.
    pub top: f32,
    /// Left edge as a fraction of image width.
    pub left: f32,
    /// Bottom edge as a fraction of image height.
    pub bottom: f32,
    /// Right edge as a fraction of image width.
    pub right: f32,
}

impl NormalizedBox {
    /// Creates a box from `(top, left, bottom, right)` fractions.
    pub fn new(top: f32, left: f32, bottom: f32, right: f32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Creates a box from a `[top, left, bottom, right]` array.
    pub fn from_array(corners: [f32; 4]) -> Self {
        Self::new(corners[0], corners[1], corners[2], corners[3])
    }

    /// Returns the corners as a `[top, left, bottom, right]` array.
    pub fn to_array(self) -> [f32; 4] {
        [self.top, self.left, self.bottom, self.right]
    }
}

/// Box corners in pixel units, same `(top, left, bottom, right)` order.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PixelBox {
    /// Top edge in pixels.
    pub top: f32,
    /// Left edge in pixels.
    pub left: f32,
    /// Bottom edge in pixels.
    pub bottom: f32,
    /// Right edge in pixels.
    pub right: f32,
}

impl PixelBox {
    /// Creates a box from `(top, left, bottom, right)` pixel coordinates.
    pub fn new(top: f32, left: f32, bottom: f32, right: f32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Box width in pixels.
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Box height in pixels.
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// One predicted object instance, assembled from the batch arrays.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Detection {
    /// Predicted box in normalized coordinates.
    pub bbox: NormalizedBox,
    /// Confidence that the box contains an object of the predicted class.
    pub score: f32,
    /// Detector-internal class label.
    pub class_id: u32,
}

/// Ordered detections for one image as three aligned parallel arrays.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct DetectionBatch {
    boxes: Vec<NormalizedBox>,
    scores: Vec<f32>,
    classes: Vec<u32>,
}

impl DetectionBatch {
    /// Creates a batch, rejecting arrays that disagree in length.
    pub fn new(
        boxes: Vec<NormalizedBox>,
        scores: Vec<f32>,
        classes: Vec<u32>,
    ) -> DetPostResult<Self> {
        if boxes.len() != scores.len() || boxes.len() != classes.len() {
            return Err(DetPostError::LengthMismatch {
                boxes: boxes.len(),
                scores: scores.len(),
                classes: classes.len(),
            });
        }
        Ok(Self {
            boxes,
            scores,
            classes,
        })
    }

    /// Creates an empty batch.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of detections in the batch.
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Returns true when the batch holds no detections.
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// The normalized boxes, aligned with [`scores`](Self::scores) and
    /// [`classes`](Self::classes).
    pub fn boxes(&self) -> &[NormalizedBox] {
        &self.boxes
    }

    /// Per-detection confidence scores.
    pub fn scores(&self) -> &[f32] {
        &self.scores
    }

    /// Per-detection class ids.
    pub fn classes(&self) -> &[u32] {
        &self.classes
    }

    /// Returns detection `index` if it is within bounds.
    pub fn get(&self, index: usize) -> Option<Detection> {
        Some(Detection {
            bbox: *self.boxes.get(index)?,
            score: *self.scores.get(index)?,
            class_id: *self.classes.get(index)?,
        })
    }

    /// Iterates over the batch in order, assembling one `Detection` per index.
    pub fn iter(&self) -> impl Iterator<Item = Detection> + '_ {
        (0..self.len()).map(move |i| Detection {
            bbox: self.boxes[i],
            score: self.scores[i],
            class_id: self.classes[i],
        })
    }

    /// Decomposes the batch back into its three aligned arrays.
    pub fn into_parts(self) -> (Vec<NormalizedBox>, Vec<f32>, Vec<u32>) {
        (self.boxes, self.scores, self.classes)
    }
}
