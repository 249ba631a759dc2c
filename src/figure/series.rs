use serde::Deserialize;

/// Point marker shape for scatter series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Marker {
    Square,
    #[default]
    Circle,
    Triangle,
    Cross,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesStyle {
    Scatter(Marker),
    Line,
}

/// One drawable data series.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Legend text; unlabeled series stay out of the legend.
    pub label: Option<String>,
    pub points: Vec<(f64, f64)>,
    pub style: SeriesStyle,
    /// Either empty or one text per point, drawn just above it.
    pub annotations: Vec<String>,
}

impl Series {
    pub fn scatter(x: &[f64], y: &[f64], marker: Marker) -> Self {
        Self::from_columns(x, y, SeriesStyle::Scatter(marker))
    }

    pub fn line(x: &[f64], y: &[f64]) -> Self {
        Self::from_columns(x, y, SeriesStyle::Line)
    }

    fn from_columns(x: &[f64], y: &[f64], style: SeriesStyle) -> Self {
        debug_assert_eq!(x.len(), y.len());
        Self {
            label: None,
            points: x.iter().copied().zip(y.iter().copied()).collect(),
            style,
            annotations: Vec::new(),
        }
    }

    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn annotated(mut self, annotations: Vec<String>) -> Self {
        self.annotations = annotations;
        self
    }
}

/// Annotation text for a numeric value: integers without a fractional part.
pub fn format_annotation(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{:.0}", v)
    } else {
        format!("{}", v)
    }
}
