//! The value window a panel is drawn in.
//!
//! plotters draws elements wherever their coordinates map to, including over
//! the axis labels, so everything is cut to this window before drawing.

use crate::figure::{AxisScale, PlotSpec};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: (f64, f64),
    pub y: (f64, f64),
    x_log: bool,
    y_log: bool,
}

impl Viewport {
    pub fn of(panel: &PlotSpec) -> Self {
        Self::new(
            panel.x_range(),
            panel.y_range(),
            panel.x_axis.scale,
            panel.y_axis.scale,
        )
    }

    pub fn new(x: (f64, f64), y: (f64, f64), x_scale: AxisScale, y_scale: AxisScale) -> Self {
        Self {
            x,
            y,
            x_log: x_scale == AxisScale::Log,
            y_log: y_scale == AxisScale::Log,
        }
    }

    fn placeable(&self, (x, y): (f64, f64)) -> bool {
        let ok = |v: f64, log: bool| v.is_finite() && (!log || v > 0.0);
        ok(x, self.x_log) && ok(y, self.y_log)
    }

    /// Whether `p` lies inside the window, edges included.
    pub fn contains(&self, p: (f64, f64)) -> bool {
        self.placeable(p)
            && (self.x.0..=self.x.1).contains(&p.0)
            && (self.y.0..=self.y.1).contains(&p.1)
    }

    /// Cut a polyline to the window. Pieces that leave and re-enter come back
    /// as separate polylines; unplaceable vertices break the line.
    pub fn clip_polyline(&self, points: &[(f64, f64)]) -> Vec<Vec<(f64, f64)>> {
        let mut out: Vec<Vec<(f64, f64)>> = Vec::new();
        let mut open = false;
        for pair in points.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let clipped = if self.placeable(a) && self.placeable(b) {
                self.clip_segment(a, b)
            } else {
                None
            };
            let Some((start, end)) = clipped else {
                open = false;
                continue;
            };
            match out.last_mut() {
                Some(line) if open && line.last() == Some(&start) => line.push(end),
                _ => out.push(vec![start, end]),
            }
            // A segment cut at its far end leaves the window there.
            open = end == b;
        }
        out
    }

    /// Liang-Barsky in axis space (log axes clip on the log of the value).
    fn clip_segment(&self, a: (f64, f64), b: (f64, f64)) -> Option<((f64, f64), (f64, f64))> {
        let tx = |v: f64| if self.x_log { v.ln() } else { v };
        let ty = |v: f64| if self.y_log { v.ln() } else { v };

        let (ax, ay, bx, by) = (tx(a.0), ty(a.1), tx(b.0), ty(b.1));
        let (x_lo, x_hi, y_lo, y_hi) = (tx(self.x.0), tx(self.x.1), ty(self.y.0), ty(self.y.1));
        let (dx, dy) = (bx - ax, by - ay);

        let mut t0 = 0.0f64;
        let mut t1 = 1.0f64;
        for (p, q) in [(-dx, ax - x_lo), (dx, x_hi - ax), (-dy, ay - y_lo), (dy, y_hi - ay)] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                t0 = t0.max(r);
            } else {
                if r < t0 {
                    return None;
                }
                t1 = t1.min(r);
            }
        }

        // Untouched ends keep their exact input values so pieces join up.
        let at = |t: f64| {
            if t == 0.0 {
                return a;
            }
            if t == 1.0 {
                return b;
            }
            let (x, y) = (ax + t * dx, ay + t * dy);
            (
                if self.x_log { x.exp() } else { x },
                if self.y_log { y.exp() } else { y },
            )
        };
        Some((at(t0), at(t1)))
    }
}
