//! X-sorted point lookup for hit-testing.

use glam::Vec2;

/// A plot-space point and its slot in the geometry buffer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndexedPoint {
    pub index: usize,
    pub pos: Vec2,
}

/// Result of a successful nearest-point query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NearestPoint {
    /// Slot in the geometry buffer (two slots per row: low, then high).
    pub index: usize,
    pub location: Vec2,
}

/// Copy of a point buffer sorted by ascending X.
///
/// NaN coordinates sort after every number and never pass the tolerance
/// test, so masked points are never returned.
#[derive(Clone, Debug, Default)]
pub struct SortedPoints {
    points: Vec<IndexedPoint>,
}

impl SortedPoints {
    pub fn build(points: &[Vec2]) -> Self {
        let mut sorted: Vec<IndexedPoint> = points
            .iter()
            .enumerate()
            .map(|(index, &pos)| IndexedPoint { index, pos })
            .collect();
        sorted.sort_by(|a, b| a.pos.x.total_cmp(&b.pos.x));
        Self { points: sorted }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn points(&self) -> &[IndexedPoint] {
        &self.points
    }

    /// First point, in ascending X order, strictly inside
    /// `target ± tolerance` on both axes.
    ///
    /// This is not the closest point: candidates are scanned from the left
    /// edge of the X window and the first hit wins.
    pub fn nearest(&self, target: Vec2, tolerance: Vec2) -> Option<NearestPoint> {
        let low_x = target.x - tolerance.x;
        let high_x = target.x + tolerance.x;

        let start = self.points.partition_point(|p| p.pos.x < low_x);
        for candidate in &self.points[start..] {
            if in_range(target, tolerance, candidate.pos) {
                return Some(NearestPoint {
                    index: candidate.index,
                    location: candidate.pos,
                });
            }
            if candidate.pos.x > high_x {
                break;
            }
        }
        None
    }
}

#[inline]
fn in_range(target: Vec2, tol: Vec2, p: Vec2) -> bool {
    p.x > target.x - tol.x
        && p.x < target.x + tol.x
        && p.y > target.y - tol.y
        && p.y < target.y + tol.y
}
