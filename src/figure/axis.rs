use anyhow::bail;

/// Multiplicative padding applied around data on a log axis.
const LOG_PAD: f64 = 1.25;
/// Fraction of the data span added on each side of a linear axis.
const LINEAR_PAD: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisScale {
    Linear,
    Log,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub label: String,
    pub scale: AxisScale,
    /// Fixed value range; derived from the data when `None`.
    pub limits: Option<(f64, f64)>,
}

impl Axis {
    pub fn new(label: impl Into<String>, scale: AxisScale) -> Self {
        Self {
            label: label.into(),
            scale,
            limits: None,
        }
    }

    pub fn with_limits(mut self, lo: f64, hi: f64) -> Self {
        self.limits = Some((lo, hi));
        self
    }

    /// Whether `v` can be placed on this axis.
    pub fn accepts(&self, v: f64) -> bool {
        match self.scale {
            AxisScale::Linear => v.is_finite(),
            AxisScale::Log => v.is_finite() && v > 0.0,
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some((lo, hi)) = self.limits {
            if !lo.is_finite() || !hi.is_finite() || lo >= hi {
                bail!(
                    "axis {:?}: limits must be finite with lo < hi, got ({}, {})",
                    self.label,
                    lo,
                    hi
                );
            }
            if self.scale == AxisScale::Log && lo <= 0.0 {
                bail!(
                    "axis {:?}: log axis limits must be positive, got ({}, {})",
                    self.label,
                    lo,
                    hi
                );
            }
        }
        Ok(())
    }

    /// Value range to draw: the fixed limits, or the padded extent of `values`.
    pub fn resolve_range(&self, values: impl IntoIterator<Item = f64>) -> (f64, f64) {
        if let Some(limits) = self.limits {
            return limits;
        }

        let (min, max) = values
            .into_iter()
            .filter(|v| self.accepts(*v))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));

        if min > max {
            // Nothing placeable.
            return match self.scale {
                AxisScale::Linear => (0.0, 1.0),
                AxisScale::Log => (1.0, 10.0),
            };
        }

        match self.scale {
            AxisScale::Log => (min / LOG_PAD, max * LOG_PAD),
            AxisScale::Linear => {
                let span = max - min;
                let pad = if span > 0.0 {
                    span * LINEAR_PAD
                } else {
                    (max.abs() * LINEAR_PAD).max(1.0)
                };
                (min - pad, max + pad)
            }
        }
    }
}

/// Tick label text: integers plainly, very large or small values in exponent form.
pub fn format_tick(v: f64) -> String {
    let a = v.abs();
    if v == 0.0 {
        "0".to_string()
    } else if a >= 1e5 || a < 1e-2 {
        format!("{:.0e}", v)
    } else if v.fract() == 0.0 {
        format!("{:.0}", v)
    } else {
        let s = format!("{:.2}", v);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
