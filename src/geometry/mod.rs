//! Image geometry and normalized↔pixel coordinate conversion.
//!
//! Conversion scales top/bottom by image height and left/right by image
//! width, never reinterpreting which axis a component refers to. Values
//! outside [0, 1] are not clamped; callers that feed out-of-range fractions
//! receive out-of-canvas pixel coordinates, and clipping is their concern.

use crate::detection::{NormalizedBox, PixelBox};
use crate::util::{DetPostError, DetPostResult};

/// Target image size in pixels, used only for coordinate conversion.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ImageGeometry {
    height: u32,
    width: u32,
}

impl ImageGeometry {
    /// Creates a geometry, rejecting zero dimensions.
    pub fn new(height: u32, width: u32) -> DetPostResult<Self> {
        if height == 0 || width == 0 {
            return Err(DetPostError::InvalidDimensions { width, height });
        }
        Ok(Self { height, width })
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }
}

/// Converts normalized boxes to pixel boxes for the given geometry.
///
/// Pure function: a new sequence is returned and the input is unmodified.
pub fn to_image_coordinates(boxes: &[NormalizedBox], geometry: ImageGeometry) -> Vec<PixelBox> {
    let height = geometry.height() as f32;
    let width = geometry.width() as f32;
    boxes
        .iter()
        .map(|b| PixelBox::new(b.top * height, b.left * width, b.bottom * height, b.right * width))
        .collect()
}

/// Converts pixel boxes back to normalized boxes for the given geometry.
///
/// Inverse of [`to_image_coordinates`] up to floating-point rounding.
pub fn to_normalized_coordinates(boxes: &[PixelBox], geometry: ImageGeometry) -> Vec<NormalizedBox> {
    let height = geometry.height() as f32;
    let width = geometry.width() as f32;
    boxes
        .iter()
        .map(|b| {
            NormalizedBox::new(b.top / height, b.left / width, b.bottom / height, b.right / width)
        })
        .collect()
}
