use std::cmp::Ordering;

use crate::point::{Point2f, Point2i};

/// A polygon edge crossing the current scanline.
///
/// `x` is the intercept on the current row, `k` the intercept increment
/// per row (dx/dy), and `ymax` the last row the edge is active for.
#[derive(Debug, Clone, Copy)]
struct Edge {
    x: f32,
    k: f32,
    ymax: i32,
}

/// Enumerate the integer pixel coordinates enclosed by a simple polygon.
///
/// Classic edge table / active edge table sweep with the even-odd fill
/// rule. The polygon is treated as a closed loop (the last vertex
/// connects back to the first) and its vertex coordinates are truncated
/// to integers when edges are built. Horizontal edges carry no crossing
/// information and are skipped. Results come out in row-major order:
/// ascending y, then ascending x within a row.
///
/// Boundary convention: spans are inclusive in x (every integer x with
/// `ceil(left) <= x <= floor(right)` is emitted) and half-open in y (an
/// edge is active from its top row through `bottom row - 1`, which keeps
/// vertices shared by two edges from being counted twice). A closed
/// 10x10 axis-aligned square therefore yields the 110 coordinates
/// {0..=10} x {0..=9}.
///
/// Polygons with fewer than 3 vertices yield an empty result. All
/// working state is local to the call, so concurrent calls from
/// independent threads are safe.
///
/// # Arguments
///
/// * `polygon` - The polygon vertices, in connectivity order.
///
/// # Returns
///
/// The enclosed pixel coordinates in row-major order.
///
/// # Examples
///
/// ```
/// use cagewarp_imgproc::point::Point2f;
/// use cagewarp_imgproc::scanline::polygon_interior;
///
/// let triangle = [
///     Point2f::new(0.0, 0.0),
///     Point2f::new(4.0, 0.0),
///     Point2f::new(0.0, 4.0),
/// ];
/// let points = polygon_interior(&triangle);
/// assert!(!points.is_empty());
/// ```
pub fn polygon_interior(polygon: &[Point2f]) -> Vec<Point2i> {
    let num_pts = polygon.len();
    if num_pts < 3 {
        return Vec::new();
    }

    let mut y_min = i32::MAX;
    let mut y_max = i32::MIN;
    for pt in polygon {
        let y = pt.y as i32;
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }

    // edge table: one bucket per scanline row in [y_min, y_max]
    let num_rows = (y_max - y_min + 1) as usize;
    let mut edge_table: Vec<Vec<Edge>> = vec![Vec::new(); num_rows];
    for i in 0..num_pts {
        let pt = polygon[i];
        let next_pt = polygon[(i + 1) % num_pts];
        add_edge(
            &mut edge_table,
            y_min,
            (pt.x as i32, pt.y as i32),
            (next_pt.x as i32, next_pt.y as i32),
        );
    }

    let mut active: Vec<Edge> = Vec::new();
    let mut points = Vec::new();

    for row in 0..num_rows {
        let y = y_min + row as i32;

        // merge this row's bucket into the active edge table and order
        // the crossings left to right, slope breaking x ties
        active.append(&mut edge_table[row]);
        active.sort_by(|e1, e2| {
            if (e1.x - e2.x).abs() < 1e-6 {
                e1.k.partial_cmp(&e2.k).unwrap_or(Ordering::Equal)
            } else {
                e1.x.partial_cmp(&e2.x).unwrap_or(Ordering::Equal)
            }
        });

        // emit the spans between consecutive crossing pairs
        let mut j = 0;
        while j + 1 < active.len() {
            let span_start = active[j].x.ceil() as i32;
            let span_end = active[j + 1].x.floor() as i32;
            for x in span_start..=span_end {
                points.push(Point2i::new(x, y));
            }
            j += 2;
        }

        // drop edges that end at this row, then step the remaining
        // intercepts to the next row
        active.retain(|e| e.ymax > y);
        for e in active.iter_mut() {
            e.x += e.k;
        }
    }

    points
}

fn add_edge(edge_table: &mut [Vec<Edge>], y_min: i32, p1: (i32, i32), p2: (i32, i32)) {
    let (x1, y1) = p1;
    let (x2, y2) = p2;

    // horizontal edges carry no crossings under the even-odd rule
    if y1 == y2 {
        return;
    }

    let k = (x2 - x1) as f32 / (y2 - y1) as f32;
    let (x_top, y_top, y_bottom) = if y1 < y2 { (x1, y1, y2) } else { (x2, y2, y1) };

    // the -1 keeps a vertex shared by two edges from crossing twice on
    // the row where one edge ends and the other begins
    edge_table[(y_top - y_min) as usize].push(Edge {
        x: x_top as f32,
        k,
        ymax: y_bottom - 1,
    });
}

#[cfg(test)]
mod tests {
    use super::polygon_interior;
    use crate::point::{Point2f, Point2i};

    #[test]
    fn degenerate_polygons_are_empty() {
        assert!(polygon_interior(&[]).is_empty());
        assert!(polygon_interior(&[Point2f::new(1.0, 1.0)]).is_empty());
        assert!(polygon_interior(&[Point2f::new(0.0, 0.0), Point2f::new(5.0, 5.0)]).is_empty());
    }

    #[test]
    fn closed_square() {
        // pinned boundary convention: x-inclusive spans, y half-open
        // sweep, so the closed 10x10 square covers rows 0..=9 fully
        let square = [
            Point2f::new(0.0, 0.0),
            Point2f::new(10.0, 0.0),
            Point2f::new(10.0, 10.0),
            Point2f::new(0.0, 10.0),
        ];
        let points = polygon_interior(&square);
        assert_eq!(points.len(), 110);

        let mut expected = Vec::new();
        for y in 0..=9 {
            for x in 0..=10 {
                expected.push(Point2i::new(x, y));
            }
        }
        assert_eq!(points, expected);
    }

    #[test]
    fn triangle_rows_shrink() {
        let triangle = [
            Point2f::new(0.0, 0.0),
            Point2f::new(4.0, 0.0),
            Point2f::new(0.0, 4.0),
        ];
        let points = polygon_interior(&triangle);

        // hypotenuse x = 4 - y, so row y spans 0..=(4 - y)
        for y in 0..4 {
            let row: Vec<i32> = points.iter().filter(|p| p.y == y).map(|p| p.x).collect();
            let expected: Vec<i32> = (0..=(4 - y)).collect();
            assert_eq!(row, expected, "row {y}");
        }
    }

    #[test]
    fn row_major_order_and_bounds() {
        let pentagon = [
            Point2f::new(5.0, 0.0),
            Point2f::new(10.0, 4.0),
            Point2f::new(8.0, 10.0),
            Point2f::new(2.0, 10.0),
            Point2f::new(0.0, 4.0),
        ];
        let points = polygon_interior(&pentagon);
        assert!(!points.is_empty());

        for pair in points.windows(2) {
            let ordered = pair[0].y < pair[1].y || (pair[0].y == pair[1].y && pair[0].x < pair[1].x);
            assert!(ordered, "not row-major: {pair:?}");
        }
        for p in &points {
            assert!(p.x >= 0 && p.x <= 10 && p.y >= 0 && p.y <= 10);
        }
    }

    #[test]
    fn concave_polygon_splits_spans() {
        // a U shape: rows across the notch must emit two separate spans
        let u_shape = [
            Point2f::new(0.0, 0.0),
            Point2f::new(3.0, 0.0),
            Point2f::new(3.0, 6.0),
            Point2f::new(7.0, 6.0),
            Point2f::new(7.0, 0.0),
            Point2f::new(10.0, 0.0),
            Point2f::new(10.0, 10.0),
            Point2f::new(0.0, 10.0),
        ];
        let points = polygon_interior(&u_shape);

        let row3: Vec<i32> = points.iter().filter(|p| p.y == 3).map(|p| p.x).collect();
        let mut expected: Vec<i32> = (0..=3).collect();
        expected.extend(7..=10);
        assert_eq!(row3, expected);

        // below the notch the row is a single span again
        let row8: Vec<i32> = points.iter().filter(|p| p.y == 8).map(|p| p.x).collect();
        let expected: Vec<i32> = (0..=10).collect();
        assert_eq!(row8, expected);
    }

    #[test]
    fn horizontal_edges_ignored() {
        // a single horizontal segment degenerates to an empty fill
        let flat = [
            Point2f::new(0.0, 5.0),
            Point2f::new(4.0, 5.0),
            Point2f::new(8.0, 5.0),
        ];
        assert!(polygon_interior(&flat).is_empty());
    }

    #[test]
    fn concurrent_calls_are_independent() {
        let square = [
            Point2f::new(0.0, 0.0),
            Point2f::new(10.0, 0.0),
            Point2f::new(10.0, 10.0),
            Point2f::new(0.0, 10.0),
        ];
        let triangle = [
            Point2f::new(0.0, 0.0),
            Point2f::new(4.0, 0.0),
            Point2f::new(0.0, 4.0),
        ];

        let expected_square = polygon_interior(&square);
        let expected_triangle = polygon_interior(&triangle);

        let handle = std::thread::spawn(move || polygon_interior(&square));
        let triangle_points = polygon_interior(&triangle);
        let square_points = handle.join().expect("worker thread panicked");

        assert_eq!(square_points, expected_square);
        assert_eq!(triangle_points, expected_triangle);
    }
}
