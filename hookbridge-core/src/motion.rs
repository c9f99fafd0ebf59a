//! Linear pointer motion planning.

use crate::event::Point;

/// Waypoints approximating a straight line from `start` to `target`.
///
/// Waypoint `i` (1-based) sits at `t = i / steps`, each coordinate
/// truncated toward zero.  The start point itself is not included and the
/// last waypoint is exactly `target`.  `steps == 0` yields no waypoints.
pub fn plan(start: Point, target: Point, steps: u32) -> Vec<Point> {
    // f64 deltas: host-supplied targets may be anywhere in i32.
    let dx = target.x as f64 - start.x as f64;
    let dy = target.y as f64 - start.y as f64;
    (1..=steps)
        .map(|i| {
            let t = i as f64 / steps as f64;
            Point::new(
                (start.x as f64 + dx * t) as i32,
                (start.y as f64 + dy * t) as i32,
            )
        })
        .collect()
}
