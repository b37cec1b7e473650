//! Empirical cumulative distribution charts

use crate::charts::axis::{extent, padded, AutoTicks, Axis, AxisSettings};
use crate::charts::line::draw_polylines;
use crate::error::VizError;
use crate::spec::{AxisScale, ChartSpec};
use plotters::coord::Shift;
use plotters::prelude::*;

/// `(value, rank / n)` for the sorted finite values of one series
///
/// Ranks are 1-based, so the y coordinates run strictly upward from `1/n`
/// to exactly `1`, ties included. NaNs take no part in the ranking.
pub fn cdf_points(values: &[f64]) -> Vec<(f64, f64)> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len() as f64;
    sorted
        .into_iter()
        .enumerate()
        .map(|(rank, v)| (v, (rank + 1) as f64 / n))
        .collect()
}

pub(crate) fn draw<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, spec: &ChartSpec) -> Result<(), VizError> {
    let options = spec.options();
    let series: Vec<Vec<(f64, f64)>> = spec.dataset().iter().map(|s| cdf_points(s)).collect();

    let x_settings = AxisSettings::x(options);
    let y_settings = AxisSettings::y(options);
    let x_extent = extent(x_settings.scale, series.iter().flatten().map(|&(x, _)| x));
    let mut y_extent = extent(y_settings.scale, series.iter().flatten().map(|&(_, y)| y));
    if y_settings.scale == AxisScale::Linear {
        y_extent = y_extent.map(|(lo, hi)| (lo.min(0.0), hi));
    }
    let x = Axis::resolve(x_settings, padded(x_extent, 0.0), AutoTicks::Nice)?;
    let y = Axis::resolve(y_settings, padded(y_extent, 0.02), AutoTicks::Nice)?;

    draw_polylines(root, spec, &series, &x, &y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kth_point_has_height_k_over_n() {
        let points = cdf_points(&[3.0, 1.0, 2.0, 2.0]);
        assert_eq!(
            points,
            vec![(1.0, 0.25), (2.0, 0.5), (2.0, 0.75), (3.0, 1.0)]
        );
    }

    #[test]
    fn heights_strictly_increase() {
        let values: Vec<f64> = (0..97).map(|i| ((i * 37) % 11) as f64).collect();
        let points = cdf_points(&values);
        assert_eq!(points.len(), 97);
        assert!(points.windows(2).all(|w| w[0].1 < w[1].1 && w[0].0 <= w[1].0));
        assert!(points[0].1 > 0.0);
        assert_eq!(points[96].1, 1.0);
    }

    #[test]
    fn empty_and_nan_input() {
        assert!(cdf_points(&[]).is_empty());
        assert_eq!(cdf_points(&[f64::NAN, 4.0]), vec![(4.0, 1.0)]);
    }
}
