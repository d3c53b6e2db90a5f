use crate::error::{ConvertError, Result};
use crate::types::{BndBox, PointEntry};

/// Resolve one entry's raw points into an absolute-pixel box.
///
/// Four points are treated as an arbitrary quadrilateral whose axis-aligned
/// bounding rectangle is taken, so `xmin <= xmax` and `ymin <= ymax` hold by
/// construction. Two points are the OCR box format: top-left then
/// bottom-right, scaled and truncated to whole pixels. The two-point path
/// trusts the caller's point order and does not re-sort; reversed points
/// yield a box with inverted extents.
pub fn resolve_bndbox(points: &[PointEntry], width: u32, height: u32) -> Result<BndBox> {
    match points {
        [_, _, _, _] => {
            let (xmin, ymin, xmax, ymax) = points.iter().map(PointEntry::coords).fold(
                (f64::MAX, f64::MAX, f64::MIN, f64::MIN),
                |(xmin, ymin, xmax, ymax), (x, y)| {
                    (xmin.min(x), ymin.min(y), xmax.max(x), ymax.max(y))
                },
            );
            Ok(BndBox {
                xmin: width as f64 * xmin,
                ymin: height as f64 * ymin,
                xmax: width as f64 * xmax,
                ymax: height as f64 * ymax,
            })
        }
        [top_left, bottom_right] => {
            let (x0, y0) = top_left.coords();
            let (x1, y1) = bottom_right.coords();
            Ok(BndBox {
                xmin: (x0 * width as f64).trunc(),
                ymin: (y0 * height as f64).trunc(),
                xmax: (x1 * width as f64).trunc(),
                ymax: (y1 * height as f64).trunc(),
            })
        }
        _ => Err(ConvertError::malformed(
            "points",
            format!("expected 2 or 4 points, got {}", points.len()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(coords: &[(f64, f64)]) -> Vec<PointEntry> {
        coords.iter().map(|&(x, y)| PointEntry::Pair(x, y)).collect()
    }

    #[test]
    fn four_point_box_is_scaled_min_max() {
        let points = pairs(&[(0.1, 0.1), (0.5, 0.1), (0.5, 0.5), (0.1, 0.5)]);
        let bbox = resolve_bndbox(&points, 100, 200).unwrap();
        assert_eq!(bbox.xmin, 10.0);
        assert_eq!(bbox.ymin, 20.0);
        assert_eq!(bbox.xmax, 50.0);
        assert_eq!(bbox.ymax, 100.0);
    }

    #[test]
    fn four_point_box_tolerates_unordered_points() {
        let points = pairs(&[(0.5, 0.5), (0.1, 0.1), (0.5, 0.1), (0.1, 0.5)]);
        let bbox = resolve_bndbox(&points, 100, 200).unwrap();
        assert!(bbox.xmin <= bbox.xmax);
        assert!(bbox.ymin <= bbox.ymax);
        assert_eq!(bbox.xmin, 10.0);
        assert_eq!(bbox.ymax, 100.0);
    }

    #[test]
    fn two_point_box_truncates_to_whole_pixels() {
        let points = vec![
            PointEntry::Offset { x: 0.25, y: 0.5 },
            PointEntry::Offset { x: 0.75, y: 0.9 },
        ];
        let bbox = resolve_bndbox(&points, 99, 99).unwrap();
        assert_eq!(bbox.xmin, 24.0);
        assert_eq!(bbox.ymin, 49.0);
        assert_eq!(bbox.xmax, 74.0);
        assert_eq!(bbox.ymax, 89.0);
    }

    #[test]
    fn two_point_box_trusts_point_order() {
        // Reversed points are passed through untouched; the inverted box is
        // the documented behavior, not a contract to fix.
        let points = vec![
            PointEntry::Offset { x: 0.8, y: 0.8 },
            PointEntry::Offset { x: 0.2, y: 0.2 },
        ];
        let bbox = resolve_bndbox(&points, 100, 100).unwrap();
        assert!(bbox.xmin > bbox.xmax);
        assert!(bbox.ymin > bbox.ymax);
    }

    #[test]
    fn unexpected_point_count_is_rejected() {
        let points = pairs(&[(0.1, 0.1), (0.5, 0.5), (0.9, 0.9)]);
        assert!(resolve_bndbox(&points, 100, 100).is_err());
    }
}
