//! Figure layer: in-memory description of what gets drawn.
//!
//! A `Figure` is built by the model from loaded tables and handed to the
//! renderer. It owns:
//! - Axis (label, linear/log scale, optional limits)
//! - Series (points, marker or line, legend label, per-point annotations)
//! - PlotSpec (one panel) and Figure (stacked panels + pixel size)
//! - Viewport (the resolved value window everything is clipped to)

pub mod axis;
pub mod series;
pub mod viewport;

pub use axis::{Axis, AxisScale, format_tick};
pub use series::{Marker, Series, SeriesStyle, format_annotation};
pub use viewport::Viewport;

use anyhow::bail;

pub const DEFAULT_WIDTH: u32 = 800;
pub const PANEL_HEIGHT: u32 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LegendPosition {
    #[default]
    UpperLeft,
    LowerLeft,
}

/// One chart panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSpec {
    pub title: Option<String>,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub series: Vec<Series>,
    pub legend: LegendPosition,
}

impl PlotSpec {
    pub fn new(x_axis: Axis, y_axis: Axis) -> Self {
        Self {
            title: None,
            x_axis,
            y_axis,
            series: Vec::new(),
            legend: LegendPosition::default(),
        }
    }

    pub fn push(&mut self, series: Series) {
        self.series.push(series);
    }

    /// Whether a point can be placed on both axes.
    pub fn accepts(&self, (x, y): (f64, f64)) -> bool {
        self.x_axis.accepts(x) && self.y_axis.accepts(y)
    }

    pub fn x_range(&self) -> (f64, f64) {
        self.x_axis.resolve_range(self.all_points().map(|(x, _)| x))
    }

    pub fn y_range(&self) -> (f64, f64) {
        self.y_axis.resolve_range(self.all_points().map(|(_, y)| y))
    }

    pub fn has_legend(&self) -> bool {
        self.series.iter().any(|s| s.label.is_some())
    }

    fn all_points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.series
            .iter()
            .flat_map(|s| s.points.iter().copied())
            .filter(|p| self.accepts(*p))
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.x_axis.validate()?;
        self.y_axis.validate()?;
        for s in &self.series {
            if !s.annotations.is_empty() && s.annotations.len() != s.points.len() {
                bail!(
                    "series {:?}: {} annotations for {} points",
                    s.label.as_deref().unwrap_or("<unlabeled>"),
                    s.annotations.len(),
                    s.points.len()
                );
            }
        }
        Ok(())
    }
}

/// Panels stacked top to bottom in one image.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub width: u32,
    pub height: u32,
    pub panels: Vec<PlotSpec>,
}

impl Figure {
    /// Default-sized figure; height grows with the panel count.
    pub fn new(panels: Vec<PlotSpec>) -> Self {
        let rows = panels.len().max(1) as u32;
        Self {
            width: DEFAULT_WIDTH,
            height: PANEL_HEIGHT * rows,
            panels,
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.panels.is_empty() {
            bail!("figure has no panels");
        }
        if self.width == 0 || self.height == 0 {
            bail!("figure size must be non-zero, got {}x{}", self.width, self.height);
        }
        for panel in &self.panels {
            panel.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn loglog() -> PlotSpec {
        PlotSpec::new(Axis::new("x", AxisScale::Log), Axis::new("y", AxisScale::Log))
    }

    #[test]
    fn ranges_ignore_points_a_log_axis_cannot_place() {
        let mut panel = loglog();
        panel.push(Series::scatter(&[0.0, 2.0, 4.0], &[5.0, -1.0, 8.0], Marker::Circle));

        // Only (4, 8) is placeable on both axes.
        assert_eq!(panel.x_range(), (4.0 / 1.25, 4.0 * 1.25));
        assert_eq!(panel.y_range(), (8.0 / 1.25, 8.0 * 1.25));
    }

    #[test]
    fn ranges_span_all_series() {
        let mut panel = loglog();
        panel.push(Series::scatter(&[1.0, 2.0], &[1.0, 2.0], Marker::Square));
        panel.push(Series::line(&[8.0, 16.0], &[0.5, 4.0]));

        assert_eq!(panel.x_range(), (1.0 / 1.25, 16.0 * 1.25));
        assert_eq!(panel.y_range(), (0.5 / 1.25, 4.0 * 1.25));
    }

    #[test]
    fn legend_only_with_labels() {
        let mut panel = loglog();
        panel.push(Series::line(&[1.0], &[1.0]));
        assert!(!panel.has_legend());

        panel.push(Series::line(&[1.0], &[1.0]).labeled("Ideal"));
        assert!(panel.has_legend());
    }

    #[test]
    fn mismatched_annotations_fail_validation() {
        let mut panel = loglog();
        panel.push(
            Series::scatter(&[1.0, 2.0], &[1.0, 2.0], Marker::Circle).annotated(vec!["a".into()]),
        );

        let err = panel.validate().unwrap_err();
        assert_eq!(err.to_string(), "series \"<unlabeled>\": 1 annotations for 2 points");
    }

    #[test]
    fn empty_figure_is_invalid() {
        assert!(Figure::new(Vec::new()).validate().is_err());
    }

    #[test]
    fn figure_height_grows_with_panels() {
        let fig = Figure::new(vec![loglog(), loglog()]);
        assert_eq!((fig.width, fig.height), (DEFAULT_WIDTH, 2 * PANEL_HEIGHT));
        assert!(fig.validate().is_ok());
    }
}
