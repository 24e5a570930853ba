use cagewarp_image::Image;

use crate::point::Point2f;

/// Helper function to set a pixel's color, handling bounds checking.
#[inline]
fn set_pixel<const C: usize>(img: &mut Image<u8, C>, x: i64, y: i64, color: [u8; C]) {
    if x >= 0 && x < img.cols() as i64 && y >= 0 && y < img.rows() as i64 {
        let start = (y as usize * img.cols() + x as usize) * C;
        img.as_slice_mut()[start..start + C].copy_from_slice(&color);
    }
}

/// Draws a line on an image inplace using Bresenham's line algorithm.
///
/// # Arguments
///
/// * `img` - The image to draw on.
/// * `p0` - The start point of the line as a tuple of (x, y).
/// * `p1` - The end point of the line as a tuple of (x, y).
/// * `color` - The color of the line as an array of `C` elements.
pub fn draw_line<const C: usize>(
    img: &mut Image<u8, C>,
    p0: (i64, i64),
    p1: (i64, i64),
    color: [u8; C],
) {
    let (mut x0, mut y0) = p0;
    let (x1, y1) = p1;

    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };

    let mut err = dx - dy;

    loop {
        set_pixel(img, x0, y0, color);

        if x0 == x1 && y0 == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x0 += sx;
        }
        if e2 < dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Draws a circle outline on an image inplace using the midpoint circle
/// algorithm.
///
/// # Arguments
///
/// * `img` - The image to draw on.
/// * `center` - The circle center as a tuple of (x, y).
/// * `radius` - The circle radius in pixels.
/// * `color` - The color of the outline as an array of `C` elements.
pub fn draw_circle<const C: usize>(
    img: &mut Image<u8, C>,
    center: (i64, i64),
    radius: i64,
    color: [u8; C],
) {
    let (cx, cy) = center;
    let mut x = radius;
    let mut y = 0i64;
    let mut err = 1 - radius;

    while x >= y {
        for (dx, dy) in [
            (x, y),
            (y, x),
            (-y, x),
            (-x, y),
            (-x, -y),
            (-y, -x),
            (y, -x),
            (x, -y),
        ] {
            set_pixel(img, cx + dx, cy + dy, color);
        }

        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}

/// Draws a closed polygon outline on an image inplace.
///
/// Each vertex is connected to the next one and the last vertex back to
/// the first. Vertex coordinates are truncated to integer pixels.
///
/// # Arguments
///
/// * `img` - The image to draw on.
/// * `polygon` - The polygon vertices, in connectivity order.
/// * `color` - The color of the outline as an array of `C` elements.
pub fn draw_polygon<const C: usize>(img: &mut Image<u8, C>, polygon: &[Point2f], color: [u8; C]) {
    let num_pts = polygon.len();
    for i in 0..num_pts {
        let pt = polygon[i];
        let next_pt = polygon[(i + 1) % num_pts];
        draw_line(
            img,
            (pt.x as i64, pt.y as i64),
            (next_pt.x as i64, next_pt.y as i64),
            color,
        );
    }
}

#[cfg(test)]
mod tests {
    use cagewarp_image::{Image, ImageError, ImageSize};

    use super::{draw_circle, draw_line, draw_polygon};
    use crate::point::Point2f;

    fn blank(width: usize, height: usize) -> Result<Image<u8, 1>, ImageError> {
        Image::from_size_val(ImageSize { width, height }, 0)
    }

    #[test]
    fn line_horizontal() -> Result<(), ImageError> {
        let mut img = blank(8, 8)?;
        draw_line(&mut img, (1, 3), (6, 3), [255]);
        for x in 1..=6 {
            assert_eq!(*img.get(x, 3, 0)?, 255);
        }
        assert_eq!(*img.get(0, 3, 0)?, 0);
        assert_eq!(*img.get(7, 3, 0)?, 0);
        Ok(())
    }

    #[test]
    fn line_clips_at_bounds() -> Result<(), ImageError> {
        let mut img = blank(4, 4)?;
        // endpoints outside the image must not panic
        draw_line(&mut img, (-2, -2), (6, 6), [255]);
        for i in 0..4 {
            assert_eq!(*img.get(i, i, 0)?, 255);
        }
        Ok(())
    }

    #[test]
    fn circle_outline() -> Result<(), ImageError> {
        let mut img = blank(16, 16)?;
        draw_circle(&mut img, (8, 8), 3, [255]);
        // cardinal points of the outline
        assert_eq!(*img.get(11, 8, 0)?, 255);
        assert_eq!(*img.get(5, 8, 0)?, 255);
        assert_eq!(*img.get(8, 11, 0)?, 255);
        assert_eq!(*img.get(8, 5, 0)?, 255);
        // center stays untouched
        assert_eq!(*img.get(8, 8, 0)?, 0);
        Ok(())
    }

    #[test]
    fn polygon_closes_loop() -> Result<(), ImageError> {
        let mut img = blank(10, 10)?;
        let triangle = [
            Point2f::new(1.0, 1.0),
            Point2f::new(8.0, 1.0),
            Point2f::new(1.0, 8.0),
        ];
        draw_polygon(&mut img, &triangle, [255]);
        // the closing edge from (1, 8) back to (1, 1)
        for y in 1..=8 {
            assert_eq!(*img.get(1, y, 0)?, 255);
        }
        Ok(())
    }
}
