//! Axis ranges, scales and tick placement
//!
//! All plotting happens in projected space: on a log axis every value is
//! replaced by its `log10` before it reaches the drawing backend, and tick
//! labels are formatted from the unprojected value.

use crate::charts::util::format_tick;
use crate::error::VizError;
use crate::spec::{AxisScale, ChartOptions};
use std::ops::Range;

/// Upper bound on automatically placed ticks
const AUTO_TICK_TARGET: usize = 8;

impl AxisScale {
    /// Map a data value into plotting space
    ///
    /// Log axes have no position for non-positive values; those return `None`
    /// and are dropped from the plot.
    pub fn project(&self, value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }
        match self {
            AxisScale::Linear => Some(value),
            AxisScale::Log if value > 0.0 => Some(value.log10()),
            AxisScale::Log => None,
        }
    }

    pub fn unproject(&self, projected: f64) -> f64 {
        match self {
            AxisScale::Linear => projected,
            AxisScale::Log => 10f64.powf(projected),
        }
    }
}

/// How ticks are chosen when none are configured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AutoTicks {
    /// Round steps of 1, 2 or 5 times a power of ten
    Nice,
    /// Integer positions only, for bar clusters and matrix cells
    Integers,
}

/// User settings for one axis
#[derive(Debug, Clone, Copy)]
pub(crate) struct AxisSettings<'a> {
    pub scale: AxisScale,
    pub limits: Option<(f64, f64)>,
    pub ticks: Option<&'a [f64]>,
    pub tick_labels: Option<&'a [String]>,
}

impl<'a> AxisSettings<'a> {
    pub fn x(options: &'a ChartOptions) -> Self {
        Self {
            scale: options.x_scale,
            limits: options.x_limits,
            ticks: options.x_ticks.as_deref(),
            tick_labels: options.x_tick_labels.as_deref(),
        }
    }

    pub fn y(options: &'a ChartOptions) -> Self {
        Self {
            scale: options.y_scale,
            limits: options.y_limits,
            ticks: options.y_ticks.as_deref(),
            tick_labels: options.y_tick_labels.as_deref(),
        }
    }

    /// Same settings on a linear scale, for axes that index positions
    pub fn linear(mut self) -> Self {
        self.scale = AxisScale::Linear;
        self
    }
}

/// A fully resolved axis, in projected coordinates
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Axis {
    pub scale: AxisScale,
    pub range: Range<f64>,
    pub ticks: Vec<f64>,
    pub labels: Vec<String>,
}

impl Axis {
    /// Resolve an axis from its settings and the projected data extent
    pub fn resolve(
        settings: AxisSettings<'_>,
        extent: Option<(f64, f64)>,
        auto: AutoTicks,
    ) -> Result<Self, VizError> {
        let scale = settings.scale;
        let (lo, hi) = match settings.limits {
            Some((lo, hi)) => match (scale.project(lo), scale.project(hi)) {
                (Some(lo), Some(hi)) => (lo, hi),
                _ => {
                    return Err(VizError::InvalidConfiguration(format!(
                        "log axis limits must be positive, got ({lo}, {hi})"
                    )))
                }
            },
            None => extent.unwrap_or((0.0, 1.0)),
        };

        let (ticks, labels) = match settings.ticks {
            Some(ticks) => {
                let mut placed = Vec::new();
                let mut labels = Vec::new();
                for (i, &tick) in ticks.iter().enumerate() {
                    let Some(projected) = scale.project(tick) else {
                        continue;
                    };
                    if projected < lo || projected > hi {
                        continue;
                    }
                    placed.push(projected);
                    labels.push(match settings.tick_labels {
                        Some(custom) => custom.get(i).cloned().unwrap_or_default(),
                        None => format_tick(tick),
                    });
                }
                (placed, labels)
            }
            None => {
                let placed = match (auto, scale) {
                    (AutoTicks::Integers, _) => integer_ticks(lo, hi, 2 * AUTO_TICK_TARGET),
                    (AutoTicks::Nice, AxisScale::Log) => decade_ticks(lo, hi),
                    (AutoTicks::Nice, AxisScale::Linear) => nice_ticks(lo, hi, AUTO_TICK_TARGET),
                };
                let labels = placed
                    .iter()
                    .map(|&t| format_tick(scale.unproject(t)))
                    .collect();
                (placed, labels)
            }
        };

        Ok(Self {
            scale,
            range: lo..hi,
            ticks,
            labels,
        })
    }

    /// Label for a tick position handed back by the drawing backend
    pub fn label_for(&self, value: f64) -> String {
        let tolerance = 1e-9 * value.abs().max(1.0);
        self.ticks
            .iter()
            .position(|&t| (t - value).abs() <= tolerance)
            .map(|i| self.labels[i].clone())
            .unwrap_or_default()
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.range.start, self.range.end)
    }
}

/// Min and max of the projected finite values, if any
pub(crate) fn extent(scale: AxisScale, values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter_map(|v| scale.project(v))
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Widen an extent by `fraction` of its span on both sides
///
/// A degenerate extent is widened by a tenth of its magnitude, or by one
/// around zero.
pub(crate) fn padded(extent: Option<(f64, f64)>, fraction: f64) -> Option<(f64, f64)> {
    extent.map(|(lo, hi)| {
        let span = hi - lo;
        if span.abs() < f64::EPSILON {
            let pad = if lo.abs() < f64::EPSILON { 1.0 } else { lo.abs() * 0.1 };
            (lo - pad, hi + pad)
        } else {
            (lo - span * fraction, hi + span * fraction)
        }
    })
}

fn nice_step(raw: f64) -> f64 {
    let magnitude = 10f64.powf(raw.log10().floor());
    let fraction = raw / magnitude;
    let nice = if fraction < 1.5 {
        1.0
    } else if fraction < 3.0 {
        2.0
    } else if fraction < 7.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Round tick positions covering `[lo, hi]`
pub(crate) fn nice_ticks(lo: f64, hi: f64, target: usize) -> Vec<f64> {
    let span = hi - lo;
    if !(span.is_finite() && span > 0.0) || target == 0 {
        return Vec::new();
    }
    let step = nice_step(span / target as f64);
    let first = (lo / step).ceil() as i64;
    let last = (hi / step + 1e-9).floor() as i64;
    (first..=last)
        .map(|k| {
            let t = k as f64 * step;
            if t == 0.0 {
                0.0
            } else {
                t
            }
        })
        .collect()
}

/// Integer positions in `[lo, hi]`, thinned to at most about `max` ticks
pub(crate) fn integer_ticks(lo: f64, hi: f64, max: usize) -> Vec<f64> {
    let first = lo.ceil() as i64;
    let last = hi.floor() as i64;
    if last < first {
        return Vec::new();
    }
    let count = (last - first + 1) as usize;
    let stride = count.div_ceil(max.max(1)).max(1);
    (first..=last).step_by(stride).map(|k| k as f64).collect()
}

/// Whole decades on a projected log axis, falling back to nice ticks when the
/// range spans less than two decades
fn decade_ticks(lo: f64, hi: f64) -> Vec<f64> {
    let ticks = integer_ticks(lo, hi, AUTO_TICK_TARGET);
    if ticks.len() >= 2 {
        ticks
    } else {
        nice_ticks(lo, hi, AUTO_TICK_TARGET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_projection_drops_non_positive() {
        assert_eq!(AxisScale::Log.project(100.0), Some(2.0));
        assert_eq!(AxisScale::Log.project(0.0), None);
        assert_eq!(AxisScale::Log.project(-3.0), None);
        assert_eq!(AxisScale::Linear.project(-3.0), Some(-3.0));
        assert_eq!(AxisScale::Linear.project(f64::NAN), None);
        assert_eq!(AxisScale::Log.unproject(3.0), 1000.0);
    }

    #[test]
    fn nice_ticks_use_round_steps() {
        assert_eq!(nice_ticks(0.0, 10.0, 5), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        assert_eq!(nice_ticks(-1.0, 1.0, 4), vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
        assert!(nice_ticks(1.0, 1.0, 5).is_empty());

        let ticks = nice_ticks(0.13, 97.2, 8);
        assert!(ticks.iter().all(|&t| (0.13..=97.2).contains(&t)));
        assert!(ticks.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn integer_ticks_are_thinned() {
        assert_eq!(integer_ticks(-0.5, 3.5, 16), vec![0.0, 1.0, 2.0, 3.0]);
        let ticks = integer_ticks(0.0, 99.0, 10);
        assert!(ticks.len() <= 10);
        assert_eq!(ticks[0], 0.0);
        assert!(integer_ticks(0.2, 0.8, 10).is_empty());
    }

    #[test]
    fn extent_and_padding() {
        assert_eq!(extent(AxisScale::Linear, [3.0, -1.0, 2.0]), Some((-1.0, 3.0)));
        assert_eq!(extent(AxisScale::Log, [0.0, 10.0, 1000.0]), Some((1.0, 3.0)));
        assert_eq!(extent(AxisScale::Log, [0.0, -1.0]), None);
        assert_eq!(padded(Some((0.0, 10.0)), 0.05), Some((-0.5, 10.5)));
        assert_eq!(padded(Some((0.0, 0.0)), 0.05), Some((-1.0, 1.0)));
        assert_eq!(padded(Some((10.0, 10.0)), 0.05), Some((9.0, 11.0)));
    }

    #[test]
    fn custom_ticks_keep_their_labels() {
        let ticks = [0.0, 1.0, 2.0, 5.0];
        let labels = ["a", "b", "c", "d"].map(String::from);
        let settings = AxisSettings {
            scale: AxisScale::Linear,
            limits: Some((0.0, 3.0)),
            ticks: Some(&ticks),
            tick_labels: Some(&labels),
        };
        let axis = Axis::resolve(settings, None, AutoTicks::Nice).unwrap();
        assert_eq!(axis.range, 0.0..3.0);
        assert_eq!(axis.ticks, vec![0.0, 1.0, 2.0]);
        assert_eq!(axis.label_for(1.0), "b");
        assert_eq!(axis.label_for(1.5), "");
    }

    #[test]
    fn log_axis_labels_unprojected_values() {
        let settings = AxisSettings {
            scale: AxisScale::Log,
            limits: None,
            ticks: None,
            tick_labels: None,
        };
        let axis = Axis::resolve(settings, Some((0.0, 3.0)), AutoTicks::Nice).unwrap();
        assert_eq!(axis.ticks, vec![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(axis.labels, vec!["1", "10", "100", "1000"]);
    }

    #[test]
    fn log_axis_rejects_non_positive_limits() {
        let settings = AxisSettings {
            scale: AxisScale::Log,
            limits: Some((0.0, 10.0)),
            ticks: None,
            tick_labels: None,
        };
        assert!(matches!(
            Axis::resolve(settings, None, AutoTicks::Nice),
            Err(VizError::InvalidConfiguration(_))
        ));
    }
}
