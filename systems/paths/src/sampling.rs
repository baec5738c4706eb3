//! Converts path lines into a deduplicated list of walk-to points.

use wayfield_core::{PathLine, PathPoint};

/// Spacing between interior samples along a long segment.
pub const POINT_SPACING: f64 = 20.0;
/// Segments longer than this receive interior samples.
pub const SAMPLING_THRESHOLD: f64 = 40.0;
/// Points closer than this on both axes to a kept point are dropped.
pub const DEDUP_TOLERANCE: f64 = 10.0;

/// Emits each line's endpoints plus evenly spaced interior samples.
///
/// Points are deduplicated as they are produced: a point within
/// [`DEDUP_TOLERANCE`] of an already kept point on both axes is discarded, so
/// the earlier of two near-duplicates wins.
#[must_use]
pub fn sample_points(lines: &[PathLine]) -> Vec<PathPoint> {
    let mut points = Vec::new();

    for line in lines {
        let start = PathPoint::new(f64::from(line.x1), f64::from(line.y1));
        let end = PathPoint::new(f64::from(line.x2), f64::from(line.y2));
        retain_unique(&mut points, start);
        retain_unique(&mut points, end);

        let length = line.length();
        if length <= SAMPLING_THRESHOLD {
            continue;
        }

        let segments = (length / POINT_SPACING).floor() as u32;
        let (dx, dy) = line.delta();
        for index in 1..segments {
            let t = f64::from(index) / f64::from(segments);
            retain_unique(&mut points, PathPoint::new(start.x + t * dx, start.y + t * dy));
        }
    }

    points
}

/// Reports whether two points lie within [`DEDUP_TOLERANCE`] on both axes.
#[must_use]
pub fn is_near_duplicate(first: &PathPoint, second: &PathPoint) -> bool {
    (first.x - second.x).abs() < DEDUP_TOLERANCE && (first.y - second.y).abs() < DEDUP_TOLERANCE
}

// Linear scan; point counts stay in the hundreds for supported world sizes.
fn retain_unique(points: &mut Vec<PathPoint>, candidate: PathPoint) {
    if points
        .iter()
        .any(|existing| is_near_duplicate(existing, &candidate))
    {
        return;
    }

    points.push(candidate);
}
