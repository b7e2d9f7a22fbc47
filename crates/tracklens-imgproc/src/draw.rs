use tracklens_image::Image;

/// Helper function to set a pixel's color, ignoring coordinates outside the image.
#[inline]
fn set_pixel<T: Copy, const C: usize>(img: &mut Image<T, C>, x: i64, y: i64, color: [T; C]) {
    if x >= 0 && x < img.cols() as i64 && y >= 0 && y < img.rows() as i64 {
        let start = (y as usize * img.cols() + x as usize) * C;
        img.as_slice_mut()[start..start + C].copy_from_slice(&color);
    }
}

/// Draws a line on an image inplace using a standard Bresenham's line algorithm.
///
/// The segment is first clipped to the canvas, so the endpoints may lie anywhere.
/// The walk never leaves the canvas, even for saturated coordinates.
///
/// # Arguments
///
/// * `img` - The image to draw on.
/// * `p0` - The start point of the line as a tuple of (x, y).
/// * `p1` - The end point of the line as a tuple of (x, y).
/// * `color` - The color of the line as an array of `C` elements.
/// * `thickness` - The thickness of the line. (Note: thickness > 1 is approximate).
pub fn draw_line<T: Copy, const C: usize>(
    img: &mut Image<T, C>,
    p0: (i64, i64),
    p1: (i64, i64),
    color: [T; C],
    thickness: usize,
) {
    let half_thickness = if thickness > 1 {
        thickness as i64 / 2
    } else {
        0
    };

    let bounds = (
        -half_thickness,
        -half_thickness,
        img.cols() as i64 - 1 + half_thickness,
        img.rows() as i64 - 1 + half_thickness,
    );
    let Some(((mut x0, mut y0), (x1, y1))) = clip_segment(p0, p1, bounds) else {
        return;
    };

    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };

    let mut err = dx - dy;

    loop {
        // a small filled square approximates thick lines
        for i in -half_thickness..=half_thickness {
            for j in -half_thickness..=half_thickness {
                set_pixel(img, x0 + i, y0 + j, color);
            }
        }

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

/// Clips a segment to the inclusive box `(x_min, y_min, x_max, y_max)`.
///
/// Liang-Barsky on `f64`. Segments already inside the box are returned untouched;
/// `None` means the segment misses the box.
fn clip_segment(
    p0: (i64, i64),
    p1: (i64, i64),
    bounds: (i64, i64, i64, i64),
) -> Option<((i64, i64), (i64, i64))> {
    let (x_min, y_min, x_max, y_max) = bounds;
    if x_min > x_max || y_min > y_max {
        return None;
    }

    let inside = |p: (i64, i64)| p.0 >= x_min && p.0 <= x_max && p.1 >= y_min && p.1 <= y_max;
    if inside(p0) && inside(p1) {
        return Some((p0, p1));
    }

    let (x0, y0) = (p0.0 as f64, p0.1 as f64);
    let (dx, dy) = (p1.0 as f64 - x0, p1.1 as f64 - y0);
    let (mut t0, mut t1) = (0.0f64, 1.0f64);

    for (p, q) in [
        (-dx, x0 - x_min as f64),
        (dx, x_max as f64 - x0),
        (-dy, y0 - y_min as f64),
        (dy, y_max as f64 - y0),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
        }
        if t0 > t1 {
            return None;
        }
    }

    // rounding on huge inputs may step just outside the box
    let at = |t: f64| {
        (
            ((x0 + t * dx).round() as i64).clamp(x_min, x_max),
            ((y0 + t * dy).round() as i64).clamp(y_min, y_max),
        )
    };

    Some((at(t0), at(t1)))
}

/// Fills a convex polygon on an image inplace.
///
/// Every pixel lying inside the polygon or on its boundary takes `color`, overwriting
/// whatever was there before. The vertices must describe a convex polygon in either
/// winding order, e.g. the output of [`crate::hull::convex_hull`]. Polygons with one
/// or two vertices degrade to a point or a line.
///
/// # Arguments
///
/// * `img` - The image to draw on.
/// * `polygon` - The polygon vertices as (x, y) tuples.
/// * `color` - The fill color.
pub fn fill_convex_poly<T: Copy, const C: usize>(
    img: &mut Image<T, C>,
    polygon: &[(i64, i64)],
    color: [T; C],
) {
    match polygon {
        [] => return,
        [p] => {
            set_pixel(img, p.0, p.1, color);
            return;
        }
        [p0, p1] => {
            draw_line(img, *p0, *p1, color, 1);
            return;
        }
        _ => {}
    }

    let (mut x_min, mut y_min) = (i64::MAX, i64::MAX);
    let (mut x_max, mut y_max) = (i64::MIN, i64::MIN);
    for &(x, y) in polygon {
        x_min = x_min.min(x);
        y_min = y_min.min(y);
        x_max = x_max.max(x);
        y_max = y_max.max(y);
    }

    // clamp to the image bounds
    let x_min = x_min.max(0);
    let y_min = y_min.max(0);
    let x_max = x_max.min(img.cols() as i64 - 1);
    let y_max = y_max.min(img.rows() as i64 - 1);

    for y in y_min..=y_max {
        for x in x_min..=x_max {
            if contains_point(polygon, (x, y)) {
                set_pixel(img, x, y, color);
            }
        }
    }
}

/// A point is inside a convex polygon when it lies on the same side of every edge.
fn contains_point(polygon: &[(i64, i64)], p: (i64, i64)) -> bool {
    let mut has_pos = false;
    let mut has_neg = false;
    for (i, a) in polygon.iter().enumerate() {
        let b = polygon[(i + 1) % polygon.len()];
        // widened so vertices far off the canvas cannot overflow
        let cross = (b.0 as i128 - a.0 as i128) * (p.1 as i128 - a.1 as i128)
            - (b.1 as i128 - a.1 as i128) * (p.0 as i128 - a.0 as i128);
        has_pos |= cross > 0;
        has_neg |= cross < 0;
        if has_pos && has_neg {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracklens_image::{Image, ImageError, ImageSize};

    #[rustfmt::skip]
    #[test]
    fn test_draw_line() -> Result<(), ImageError> {
        let mut img = Image::new(
            ImageSize { width: 5, height: 5 }, vec![0u8; 25],
        )?;
        draw_line(&mut img, (0, 0), (4, 4), [255], 1);
        assert_eq!(
            img.as_slice(),
            &[
                255,   0,   0,   0,   0,
                  0, 255,   0,   0,   0,
                  0,   0, 255,   0,   0,
                  0,   0,   0, 255,   0,
                  0,   0,   0,   0, 255,
            ]
        );
        Ok(())
    }

    #[rustfmt::skip]
    #[test]
    fn test_draw_line_clipped() -> Result<(), ImageError> {
        let mut img = Image::new(
            ImageSize { width: 4, height: 3 }, vec![0u8; 12],
        )?;
        draw_line(&mut img, (-3, 1), (10, 1), [7], 1);
        assert_eq!(
            img.as_slice(),
            &[
                0, 0, 0, 0,
                7, 7, 7, 7,
                0, 0, 0, 0,
            ]
        );
        Ok(())
    }

    #[test]
    fn test_draw_line_rgb() -> Result<(), ImageError> {
        let mut img = Image::<u8, 3>::from_size_val(ImageSize { width: 5, height: 5 }, 0u8)?;
        draw_line(&mut img, (1, 3), (3, 3), [255, 0, 0], 1);
        assert_eq!(img.get_pixel(1, 3, 0)?, 255);
        assert_eq!(img.get_pixel(2, 3, 0)?, 255);
        assert_eq!(img.get_pixel(3, 3, 0)?, 255);
        assert_eq!(img.get_pixel(2, 3, 1)?, 0);
        assert_eq!(img.get_pixel(2, 2, 0)?, 0);
        Ok(())
    }

    #[test]
    fn test_draw_line_thick() -> Result<(), ImageError> {
        let mut img = Image::<u8, 1>::from_size_val(ImageSize { width: 5, height: 5 }, 0u8)?;
        draw_line(&mut img, (1, 2), (3, 2), [1], 3);
        let painted = img.as_slice().iter().filter(|&&v| v == 1).count();
        // rows 1..=3, cols 0..=4
        assert_eq!(painted, 15);
        Ok(())
    }

    #[rustfmt::skip]
    #[test]
    fn test_fill_convex_poly_triangle() -> Result<(), ImageError> {
        let mut img = Image::new(
            ImageSize { width: 5, height: 5 }, vec![0.0f32; 25],
        )?;
        fill_convex_poly(&mut img, &[(0, 0), (4, 0), (0, 4)], [1.0]);
        assert_eq!(
            img.as_slice(),
            &[
                1.0, 1.0, 1.0, 1.0, 1.0,
                1.0, 1.0, 1.0, 1.0, 0.0,
                1.0, 1.0, 1.0, 0.0, 0.0,
                1.0, 1.0, 0.0, 0.0, 0.0,
                1.0, 0.0, 0.0, 0.0, 0.0,
            ]
        );
        Ok(())
    }

    #[rustfmt::skip]
    #[test]
    fn test_fill_convex_poly_winding_independent() -> Result<(), ImageError> {
        let size = ImageSize { width: 5, height: 5 };
        let mut ccw = Image::<u8, 1>::from_size_val(size, 0)?;
        let mut cw = Image::<u8, 1>::from_size_val(size, 0)?;
        fill_convex_poly(&mut ccw, &[(1, 1), (3, 1), (3, 3), (1, 3)], [9]);
        fill_convex_poly(&mut cw, &[(1, 3), (3, 3), (3, 1), (1, 1)], [9]);
        assert_eq!(ccw, cw);
        assert_eq!(
            ccw.as_slice(),
            &[
                0, 0, 0, 0, 0,
                0, 9, 9, 9, 0,
                0, 9, 9, 9, 0,
                0, 9, 9, 9, 0,
                0, 0, 0, 0, 0,
            ]
        );
        Ok(())
    }

    #[test]
    fn test_fill_convex_poly_overwrites() -> Result<(), ImageError> {
        let mut img = Image::<f32, 1>::from_size_val(ImageSize { width: 6, height: 6 }, 0.0)?;
        fill_convex_poly(&mut img, &[(0, 0), (3, 0), (3, 3), (0, 3)], [1.0]);
        fill_convex_poly(&mut img, &[(2, 2), (5, 2), (5, 5), (2, 5)], [2.0]);
        assert_eq!(img.get_pixel(0, 0, 0)?, 1.0);
        assert_eq!(img.get_pixel(3, 3, 0)?, 2.0);
        assert_eq!(img.get_pixel(2, 2, 0)?, 2.0);
        assert_eq!(img.get_pixel(5, 5, 0)?, 2.0);
        Ok(())
    }

    #[test]
    fn test_fill_convex_poly_clipped_and_degenerate() -> Result<(), ImageError> {
        let mut img = Image::<u8, 1>::from_size_val(ImageSize { width: 3, height: 3 }, 0)?;
        fill_convex_poly(&mut img, &[(-10, -10), (10, -10), (10, 10), (-10, 10)], [4]);
        assert!(img.as_slice().iter().all(|&v| v == 4));

        let mut img = Image::<u8, 1>::from_size_val(ImageSize { width: 3, height: 3 }, 0)?;
        fill_convex_poly(&mut img, &[], [4]);
        fill_convex_poly(&mut img, &[(1, 1)], [4]);
        assert_eq!(img.as_slice().iter().filter(|&&v| v == 4).count(), 1);
        fill_convex_poly(&mut img, &[(0, 2), (2, 2)], [5]);
        assert_eq!(img.as_slice().iter().filter(|&&v| v == 5).count(), 3);
        Ok(())
    }

    #[test]
    fn test_draw_line_far_endpoints() -> Result<(), ImageError> {
        let mut img = Image::<u8, 1>::from_size_val(ImageSize { width: 6, height: 4 }, 0)?;
        draw_line(&mut img, (-1_000_000_000, 2), (1_000_000_000, 2), [1], 1);
        assert_eq!(&img.as_slice()[12..18], &[1; 6]);
        assert_eq!(img.as_slice().iter().filter(|&&v| v == 1).count(), 6);

        // saturated coordinates stay on their row and terminate
        let mut img = Image::<u8, 1>::from_size_val(ImageSize { width: 6, height: 4 }, 0)?;
        draw_line(&mut img, (i64::MIN, 2), (i64::MAX, 2), [1], 1);
        let painted = img.as_slice().iter().filter(|&&v| v == 1).count();
        assert!(painted >= 1);
        assert_eq!(img.as_slice()[12..18].iter().filter(|&&v| v == 1).count(), painted);

        // entirely off the canvas
        let mut img = Image::<u8, 1>::from_size_val(ImageSize { width: 6, height: 4 }, 0)?;
        draw_line(&mut img, (i64::MAX, i64::MAX), (i64::MAX - 5, i64::MIN), [1], 3);
        draw_line(&mut img, (-100, -50), (-1, -90), [1], 1);
        assert!(img.as_slice().iter().all(|&v| v == 0));
        Ok(())
    }

    #[test]
    fn test_fill_convex_poly_extreme_vertices() -> Result<(), ImageError> {
        let mut img = Image::<u8, 1>::from_size_val(ImageSize { width: 3, height: 3 }, 0)?;
        let polygon = [
            (i64::MIN / 2, i64::MIN / 2),
            (i64::MAX / 2, i64::MIN / 2),
            (i64::MAX / 2, i64::MAX / 2),
            (i64::MIN / 2, i64::MAX / 2),
        ];
        fill_convex_poly(&mut img, &polygon, [2]);
        assert!(img.as_slice().iter().all(|&v| v == 2));
        Ok(())
    }
}
