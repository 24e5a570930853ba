use rayon::prelude::*;

use cagewarp_image::{Image, ImageError};

use crate::point::Point2f;

/// Points closer than this to a cage vertex snap to that vertex's
/// one-hot weight vector instead of dividing by a near-zero distance.
const VERTEX_SNAP_DISTANCE: f32 = 1e-6;

/// Angle between two vectors in radians, clamped to [0, pi].
///
/// The cosine is clamped to [-1, 1] before `acos` so floating-point
/// overshoot cannot produce a domain error; the extremes return exactly
/// 0 and pi.
fn angle_between(u: Point2f, w: Point2f) -> f32 {
    let len_u = u.x.hypot(u.y);
    let len_w = w.x.hypot(w.y);
    let a = (u.x * w.x + u.y * w.y) / (len_u * len_w);

    if a >= 1.0 {
        0.0
    } else if a <= -1.0 {
        std::f32::consts::PI
    } else {
        a.acos()
    }
}

/// Compute the mean value barycentric coordinates of a point with
/// respect to a closed polygon (Floater's formula).
///
/// For each vertex the weight is the sum of the half-angle tangents of
/// the angles the point subtends with the two adjacent edges, divided by
/// the distance to the vertex; the weights are then normalized to sum
/// to one.
///
/// If the point coincides with a vertex (within a small tolerance) the
/// result is the one-hot vector at that vertex. An empty polygon yields
/// an empty weight vector.
///
/// # Arguments
///
/// * `p` - The query point.
/// * `polygon` - The cage vertices, in connectivity order.
///
/// # Returns
///
/// One weight per polygon vertex.
///
/// # Examples
///
/// ```
/// use cagewarp_imgproc::deform::mean_value_coordinates;
/// use cagewarp_imgproc::point::Point2f;
///
/// let square = [
///     Point2f::new(0.0, 0.0),
///     Point2f::new(2.0, 0.0),
///     Point2f::new(2.0, 2.0),
///     Point2f::new(0.0, 2.0),
/// ];
/// let weights = mean_value_coordinates(Point2f::new(1.0, 1.0), &square);
/// assert_eq!(weights.len(), 4);
/// ```
pub fn mean_value_coordinates(p: Point2f, polygon: &[Point2f]) -> Vec<f32> {
    let num_pts = polygon.len();
    let mut weights = Vec::with_capacity(num_pts);
    let mut weight_sum = 0.0f32;

    for i in 0..num_pts {
        let cur_pt = polygon[i];
        let next_pt = polygon[(i + 1) % num_pts];
        let prev_pt = polygon[(num_pts + i - 1) % num_pts];

        let dist_to_pt = p.distance(&cur_pt);
        if dist_to_pt <= VERTEX_SNAP_DISTANCE {
            let mut one_hot = vec![0.0; num_pts];
            one_hot[i] = 1.0;
            return one_hot;
        }

        let cur_v = cur_pt - p;
        let prev_v = prev_pt - p;
        let next_v = next_pt - p;

        let prev_alpha = angle_between(cur_v, prev_v);
        let next_alpha = angle_between(cur_v, next_v);

        let weight = ((0.5 * prev_alpha).tan() + (0.5 * next_alpha).tan()) / dist_to_pt;
        weights.push(weight);
        weight_sum += weight;
    }

    for w in weights.iter_mut() {
        *w /= weight_sum;
    }

    weights
}

/// Index of the polygon vertex closest to a point by Euclidean
/// distance. Ties keep the lowest index. `None` for an empty polygon.
pub fn nearest_vertex(p: Point2f, polygon: &[Point2f]) -> Option<usize> {
    let mut min_dist = f32::INFINITY;
    let mut min_dist_idx = None;
    for (i, vertex) in polygon.iter().enumerate() {
        let dist = p.distance(vertex);
        if dist < min_dist {
            min_dist = dist;
            min_dist_idx = Some(i);
        }
    }
    min_dist_idx
}

/// Deforms images through a pair of anchor polygons ("cages").
///
/// The deformer owns a source polygon drawn over the source image and a
/// target polygon of the same vertex count describing where each anchor
/// moves to. [`CageDeformer::warp`] pushes every source pixel through the
/// mean value coordinate interpolation of the two polygons.
///
/// # Examples
///
/// ```
/// use cagewarp_imgproc::deform::CageDeformer;
/// use cagewarp_imgproc::point::Point2f;
///
/// let source = [
///     Point2f::new(0.0, 0.0),
///     Point2f::new(4.0, 0.0),
///     Point2f::new(0.0, 4.0),
/// ];
/// let target = [
///     Point2f::new(0.0, 0.0),
///     Point2f::new(8.0, 0.0),
///     Point2f::new(0.0, 8.0),
/// ];
///
/// let mut deformer = CageDeformer::new();
/// assert!(deformer.set_cage(&source, &target));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CageDeformer {
    source_points: Vec<Point2f>,
    target_points: Vec<Point2f>,
}

impl CageDeformer {
    /// Create a deformer with an unset cage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored cage with a new source/target polygon pair.
    ///
    /// The polygons correspond index-by-index: `target[i]` is the
    /// destination of `source[i]`. If the lengths differ the cage is
    /// cleared to the unset state and `false` is returned; no error is
    /// raised and the deformer stays usable.
    pub fn set_cage(&mut self, source: &[Point2f], target: &[Point2f]) -> bool {
        self.source_points.clear();
        self.target_points.clear();
        if source.len() != target.len() {
            return false;
        }

        self.source_points.extend_from_slice(source);
        self.target_points.extend_from_slice(target);
        true
    }

    /// Whether the cage is unset (empty).
    pub fn is_unset(&self) -> bool {
        self.source_points.is_empty()
    }

    /// The stored source polygon.
    pub fn source_points(&self) -> &[Point2f] {
        &self.source_points
    }

    /// The stored target polygon.
    pub fn target_points(&self) -> &[Point2f] {
        &self.target_points
    }

    /// Forward-map a point through the cage.
    ///
    /// Computes the mean value coordinates of `p` with respect to the
    /// source polygon and applies them to the target polygon. An unset
    /// cage maps every point to itself.
    pub fn map_point(&self, p: Point2f) -> Point2f {
        if self.is_unset() {
            return p;
        }

        let weights = mean_value_coordinates(p, &self.source_points);
        let mut mapped = Point2f::new(0.0, 0.0);
        for (w, target) in weights.iter().zip(self.target_points.iter()) {
            mapped.x += w * target.x;
            mapped.y += w * target.y;
        }
        mapped
    }

    /// Index of the source polygon vertex closest to `p`.
    ///
    /// Standalone point-to-anchor association helper; the warp loop does
    /// not consult it.
    pub fn nearest_source_vertex(&self, p: Point2f) -> Option<usize> {
        nearest_vertex(p, &self.source_points)
    }

    /// Warp an image through the cage.
    ///
    /// The destination starts as an exact copy of the source. Every
    /// source pixel is forward-mapped through [`CageDeformer::map_point`],
    /// rounded to the nearest integer coordinates and, when inside the
    /// image bounds, overwritten at the mapped location. Pixels mapping outside
    /// the bounds are dropped; destination pixels never written keep the
    /// copied source value. Two source pixels may land on the same
    /// destination pixel, in which case the later one in row-major order
    /// wins. An unset cage returns the unmodified copy.
    ///
    /// The cost is O(width * height * vertex count); every pixel
    /// re-evaluates every cage vertex.
    ///
    /// # Arguments
    ///
    /// * `src` - The input image with shape (height, width, channels).
    ///
    /// # Returns
    ///
    /// The warped image with the same shape as the input.
    pub fn warp<T, const C: usize>(&self, src: &Image<T, C>) -> Result<Image<T, C>, ImageError>
    where
        T: Copy + Send + Sync,
    {
        let mut dst = src.clone();
        if self.is_unset() {
            return Ok(dst);
        }

        let (width, height) = (src.width(), src.height());

        // The forward map only reads the cage, so it parallelizes over
        // rows; the scatter below replays in row-major order to keep the
        // sequential last-write-wins result.
        let mapped = (0..height)
            .into_par_iter()
            .flat_map_iter(|y| {
                (0..width).map(move |x| {
                    let q = self.map_point(Point2f::new(x as f32, y as f32));
                    let (qx, qy) = (q.x.round() as i64, q.y.round() as i64);
                    if qx >= 0 && qx < width as i64 && qy >= 0 && qy < height as i64 {
                        Some((qx as usize, qy as usize))
                    } else {
                        None
                    }
                })
            })
            .collect::<Vec<_>>();

        let src_data = src.as_slice();
        let dst_data = dst.as_slice_mut();
        for (idx, m) in mapped.into_iter().enumerate() {
            if let Some((qx, qy)) = m {
                let d = (qy * width + qx) * C;
                dst_data[d..d + C].copy_from_slice(&src_data[idx * C..idx * C + C]);
            }
        }

        Ok(dst)
    }
}
