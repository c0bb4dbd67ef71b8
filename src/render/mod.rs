//! Box outline rendering glue.
//!
//! The core computes which color each class maps to and the closed outline
//! polyline for each box; actual pixel manipulation is delegated to an
//! injected [`BoxRenderer`] collaborator. Class-to-color lookup wraps with
//! modulo, so class ids beyond the palette size reuse colors instead of
//! failing.

use crate::detection::PixelBox;
use crate::trace::{trace_event, trace_span};
use crate::util::{DetPostError, DetPostResult};

#[cfg(feature = "image-io")]
pub mod draw;

/// An RGB color triple.
pub type Color = [u8; 3];

/// Injected set of box colors, indexed by class id modulo palette size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// Creates a palette, rejecting an empty color list.
    pub fn new(colors: Vec<Color>) -> DetPostResult<Self> {
        if colors.is_empty() {
            return Err(DetPostError::EmptyPalette);
        }
        Ok(Self { colors })
    }

    /// A small default palette of visually distinct colors.
    pub fn standard() -> Self {
        Self {
            colors: vec![
                [230, 25, 75],
                [60, 180, 75],
                [255, 225, 25],
                [0, 130, 200],
                [245, 130, 48],
                [145, 30, 180],
                [70, 240, 240],
                [240, 50, 230],
            ],
        }
    }

    /// Number of colors in the palette.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Returns true when the palette has no colors. Unreachable through the
    /// public constructor, kept for API completeness.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color for a class id, wrapping modulo palette size.
    pub fn color_for_class(&self, class_id: u32) -> Color {
        self.colors[class_id as usize % self.colors.len()]
    }
}

/// Drawing collaborator owning the mutable image buffer.
///
/// The library computes outline coordinates and colors; implementations put
/// pixels down. See [`draw`] for a ready-made `image::RgbImage` backend.
pub trait BoxRenderer {
    /// Draws an open polyline through `points` (x, y) with the given stroke.
    fn draw_polyline(&mut self, points: &[(f32, f32)], color: Color, thickness: u32);
}

/// Closed five-point outline of a pixel box.
///
/// Order is `(left,top) -> (left,bottom) -> (right,bottom) -> (right,top) ->
/// (left,top)`, with points as `(x, y)` pairs.
pub fn box_outline(bbox: &PixelBox) -> [(f32, f32); 5] {
    [
        (bbox.left, bbox.top),
        (bbox.left, bbox.bottom),
        (bbox.right, bbox.bottom),
        (bbox.right, bbox.top),
        (bbox.left, bbox.top),
    ]
}

/// Draws one outline per box through the injected renderer.
///
/// `boxes` and `classes` must be aligned; colors come from the palette with
/// modulo wraparound.
pub fn render_boxes<R: BoxRenderer>(
    renderer: &mut R,
    boxes: &[PixelBox],
    classes: &[u32],
    palette: &Palette,
    thickness: u32,
) -> DetPostResult<()> {
    if boxes.len() != classes.len() {
        return Err(DetPostError::MismatchedClasses {
            boxes: boxes.len(),
            classes: classes.len(),
        });
    }

    let _span = trace_span!("render_boxes", count = boxes.len()).entered();

    for (bbox, class_id) in boxes.iter().zip(classes.iter()) {
        let color = palette.color_for_class(*class_id);
        renderer.draw_polyline(&box_outline(bbox), color, thickness);
    }

    trace_event!("boxes_rendered", count = boxes.len());
    Ok(())
}
