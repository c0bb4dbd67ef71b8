//! Ready-made drawing backend for `image::RgbImage`.
//!
//! Available when the `image-io` feature is enabled. Line rasterization is
//! delegated to `imageproc`; thickness is achieved by stacking parallel
//! one-pixel lines centered on the segment.

use crate::render::{BoxRenderer, Color};
use crate::util::{DetPostError, DetPostResult};
use image::RgbImage;
use imageproc::drawing::draw_line_segment_mut;
use std::path::Path;

impl BoxRenderer for RgbImage {
    fn draw_polyline(&mut self, points: &[(f32, f32)], color: Color, thickness: u32) {
        let rgb = image::Rgb(color);
        for pair in points.windows(2) {
            let (x0, y0) = pair[0];
            let (x1, y1) = pair[1];
            // Offset perpendicular to the dominant direction of the segment,
            // centered so the stroke thickens evenly on both sides.
            let (dx, dy) = if (x1 - x0).abs() >= (y1 - y0).abs() {
                (0.0, 1.0)
            } else {
                (1.0, 0.0)
            };
            let stroke = thickness.max(1) as i32;
            let start = -(stroke - 1) / 2;
            for step in start..start + stroke {
                let offset = step as f32;
                draw_line_segment_mut(
                    self,
                    (x0 + dx * offset, y0 + dy * offset),
                    (x1 + dx * offset, y1 + dy * offset),
                    rgb,
                );
            }
        }
    }
}

/// Loads an image from disk as an RGB buffer.
pub fn load_rgb_image<P: AsRef<Path>>(path: P) -> DetPostResult<RgbImage> {
    let img = image::open(path).map_err(|err| DetPostError::ImageIo {
        reason: err.to_string(),
    })?;
    Ok(img.to_rgb8())
}

#[cfg(test)]
mod tests {
    use crate::detection::PixelBox;
    use crate::render::{box_outline, BoxRenderer};
    use image::RgbImage;

    #[test]
    fn outline_touches_all_four_edges() {
        let mut img = RgbImage::new(20, 20);
        let outline = box_outline(&PixelBox::new(2.0, 3.0, 15.0, 17.0));
        img.draw_polyline(&outline, [255, 0, 0], 1);

        let red = image::Rgb([255u8, 0, 0]);
        assert_eq!(*img.get_pixel(3, 2), red); // top-left corner
        assert_eq!(*img.get_pixel(3, 15), red); // bottom-left corner
        assert_eq!(*img.get_pixel(17, 15), red); // bottom-right corner
        assert_eq!(*img.get_pixel(10, 2), red); // top edge midpoint
        assert_eq!(*img.get_pixel(10, 10), image::Rgb([0u8, 0, 0])); // interior untouched
    }

    #[test]
    fn thick_strokes_grow_symmetrically() {
        let mut img = RgbImage::new(24, 24);
        let outline = box_outline(&PixelBox::new(8.0, 8.0, 16.0, 16.0));
        img.draw_polyline(&outline, [0, 255, 0], 3);

        let green = image::Rgb([0u8, 255, 0]);
        let black = image::Rgb([0u8, 0, 0]);

        // Top edge at y=8 spreads one pixel to each side.
        assert_eq!(*img.get_pixel(12, 7), green);
        assert_eq!(*img.get_pixel(12, 8), green);
        assert_eq!(*img.get_pixel(12, 9), green);
        assert_eq!(*img.get_pixel(12, 6), black);
        assert_eq!(*img.get_pixel(12, 10), black);

        // Same for the left edge at x=8 and the bottom edge at y=16.
        assert_eq!(*img.get_pixel(7, 12), green);
        assert_eq!(*img.get_pixel(9, 12), green);
        assert_eq!(*img.get_pixel(12, 17), green);
        assert_eq!(*img.get_pixel(12, 15), green);
        assert_eq!(*img.get_pixel(12, 18), black);
    }
}
