/// Computes the convex hull of a set of integer points.
///
/// Uses Andrew's monotone chain algorithm. Duplicate and collinear points are
/// dropped, so the hull only holds its true vertices. In image coordinates (y
/// pointing down) the vertices come out clockwise, starting from the point with
/// the smallest x (and smallest y on ties). Coordinates must stay below `2^62` in
/// magnitude.
///
/// # Arguments
///
/// * `points` - The input points as (x, y) tuples, in any order.
///
/// # Returns
///
/// The hull vertices. Fewer than three vertices are returned when the input is
/// empty, a single point or collinear.
///
/// # Example
///
/// ```
/// use tracklens_imgproc::hull::convex_hull;
///
/// let points = [(0, 0), (2, 0), (1, 1), (2, 2), (0, 2)];
/// let hull = convex_hull(&points);
///
/// assert_eq!(hull, vec![(0, 0), (2, 0), (2, 2), (0, 2)]);
/// ```
pub fn convex_hull(points: &[(i64, i64)]) -> Vec<(i64, i64)> {
    let mut sorted = points.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    if sorted.len() < 3 {
        return sorted;
    }

    // exact in i128 for any |coordinate| < 2^62
    let cross = |o: (i64, i64), a: (i64, i64), b: (i64, i64)| {
        (a.0 as i128 - o.0 as i128) * (b.1 as i128 - o.1 as i128)
            - (a.1 as i128 - o.1 as i128) * (b.0 as i128 - o.0 as i128)
    };

    let mut hull: Vec<(i64, i64)> = Vec::with_capacity(2 * sorted.len());

    // lower chain
    for &p in sorted.iter() {
        while hull.len() >= 2 && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0 {
            hull.pop();
        }
        hull.push(p);
    }

    // upper chain
    let lower_len = hull.len() + 1;
    for &p in sorted.iter().rev().skip(1) {
        while hull.len() >= lower_len && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0
        {
            hull.pop();
        }
        hull.push(p);
    }

    // the last point closes the loop
    hull.pop();

    hull
}
