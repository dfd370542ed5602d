//! Chart series normalizer — maps an arbitrary-length numeric series to a
//! fixed-width coordinate path, min-max normalized and inverted so larger
//! values plot higher on screen.

use crate::types::ChartPoint;

/// Target drawing area for a normalized path
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartFrame {
    pub width: f64,
    pub height: f64,
    pub margin_top: f64,
    pub usable_height: f64,
}

impl ChartFrame {
    /// Card sparkline frame (product card evolution chart)
    pub const CARD: ChartFrame = ChartFrame {
        width: 184.0,
        height: 46.0,
        margin_top: 2.0,
        usable_height: 42.0,
    };

    /// Detail page performance chart (percent-scaled viewBox)
    pub const DETAIL: ChartFrame = ChartFrame {
        width: 100.0,
        height: 100.0,
        margin_top: 10.0,
        usable_height: 80.0,
    };
}

/// Substitute for an empty series: a flat placeholder that renders on the
/// vertical midline. Fixed and deterministic per render.
pub fn fallback_series() -> Vec<f64> {
    vec![1.0; 7]
}

/// Returns the series unchanged, or the flat placeholder when empty
pub fn series_or_fallback(series: Vec<f64>) -> Vec<f64> {
    if series.is_empty() {
        fallback_series()
    } else {
        series
    }
}

/// Normalize a series into frame coordinates.
///
/// `x_i = i * width / max(len - 1, 1)`; a flat series maps every point to
/// the vertical midpoint, otherwise
/// `y_i = margin_top + usable * (max - v_i) / (max - min)`.
pub fn to_points(series: &[f64], frame: &ChartFrame) -> Vec<ChartPoint> {
    if series.is_empty() {
        return Vec::new();
    }

    let step = frame.width / (series.len() - 1).max(1) as f64;
    let min = series.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = series.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    series
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let y = if span == 0.0 {
                frame.margin_top + frame.usable_height / 2.0
            } else {
                frame.margin_top + frame.usable_height * (max - value) / span
            };
            ChartPoint {
                x: i as f64 * step,
                y,
            }
        })
        .collect()
}

/// Encode points as an SVG move/line path (`"M x y L x y ..."`)
pub fn svg_path(points: &[ChartPoint]) -> String {
    points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let op = if i == 0 { "M" } else { "L" };
            format!("{op} {} {}", p.x, p.y)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn y_values_stay_inside_the_usable_band() {
        let series = vec![3.0, -1.0, 7.5, 2.2, 0.0, 9.9];
        let frame = ChartFrame::CARD;
        let points = to_points(&series, &frame);

        assert_eq!(points.len(), series.len());
        for p in &points {
            assert!(p.y >= frame.margin_top, "y below margin: {}", p.y);
            assert!(
                p.y <= frame.margin_top + frame.usable_height,
                "y over band: {}",
                p.y
            );
        }
        // Extremes hit the band edges exactly
        let max_idx = 5;
        let min_idx = 1;
        assert_eq!(points[max_idx].y, frame.margin_top);
        assert_eq!(points[min_idx].y, frame.margin_top + frame.usable_height);
    }

    #[test]
    fn flat_series_maps_to_the_midline() {
        let frame = ChartFrame::DETAIL;
        let points = to_points(&[5.0, 5.0, 5.0, 5.0], &frame);
        for p in points {
            assert_eq!(p.y, frame.margin_top + frame.usable_height / 2.0);
        }
    }

    #[test]
    fn x_spans_the_full_width_evenly() {
        let frame = ChartFrame::DETAIL;
        let points = to_points(&[1.0, 2.0, 3.0, 4.0, 5.0], &frame);
        assert_eq!(points[0].x, 0.0);
        assert_eq!(points[4].x, frame.width);
        assert_eq!(points[2].x, frame.width / 2.0);
    }

    #[test]
    fn single_point_series_does_not_divide_by_zero() {
        let points = to_points(&[42.0], &ChartFrame::CARD);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].x, 0.0);
        // One point is flat by definition
        assert_eq!(
            points[0].y,
            ChartFrame::CARD.margin_top + ChartFrame::CARD.usable_height / 2.0
        );
    }

    #[test]
    fn empty_series_yields_no_points_and_fallback_is_flat() {
        assert!(to_points(&[], &ChartFrame::CARD).is_empty());

        let fallback = series_or_fallback(Vec::new());
        let points = to_points(&fallback, &ChartFrame::CARD);
        assert!(!points.is_empty());
        for p in points {
            assert_eq!(
                p.y,
                ChartFrame::CARD.margin_top + ChartFrame::CARD.usable_height / 2.0
            );
        }
    }

    #[test]
    fn path_encodes_move_then_lines() {
        let points = vec![
            ChartPoint { x: 0.0, y: 2.0 },
            ChartPoint { x: 92.0, y: 23.0 },
            ChartPoint { x: 184.0, y: 44.0 },
        ];
        assert_eq!(svg_path(&points), "M 0 2 L 92 23 L 184 44");
        assert_eq!(svg_path(&[]), "");
    }
}
