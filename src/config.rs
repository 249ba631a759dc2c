//! Run configuration for both plot commands.
//!
//! The comparison study may come from a JSON file. Every field is optional and
//! falls back to the built-in CPU/GPU study:
//! {
//!   "output": "scaling.png",
//!   "x_axis": "cost",                 // or "nodes": plot raw node counts
//!   "x_label": "Cost (Camber Credits)",
//!   "y_label": "Relative Performance",
//!   "reference": "min",               // "first" or {"value": 1200.0}
//!   "series": [
//!     { "label": "CPU", "path": "cpu_scaling", "rate": 4.5, "marker": "square" },
//!     { "label": "GPU", "path": "gpu_scaling", "rate": 13.5416, "marker": "circle" }
//!   ]
//! }

use crate::Result;
use crate::figure::Marker;
use crate::model::Reference;

use anyhow::{Context, bail};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// CPU cost per node-hour: three units at 1.5 each.
pub const CPU_RATE: f64 = 1.5 * 3.0;
/// GPU cost per node-hour: 325 per day.
pub const GPU_RATE: f64 = 325.0 / 24.0;

pub const DEFAULT_EMIN: f64 = 95.0;
pub const DEFAULT_EMAX: f64 = 105.0;

/// What the comparison plot puts on its x axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum XAxisMode {
    /// Node count multiplied by each series' rate.
    #[default]
    Cost,
    /// Node count as measured.
    Nodes,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StudySeries {
    pub label: String,
    pub path: PathBuf,
    #[serde(default = "unit_rate")]
    pub rate: f64,
    #[serde(default)]
    pub marker: Marker,
}

fn unit_rate() -> f64 {
    1.0
}

/// Configuration of the multi-table comparison plot.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StudyConfig {
    pub output: PathBuf,
    pub x_axis: XAxisMode,
    pub x_label: Option<String>,
    pub y_label: String,
    /// Picked from the first series' metric.
    pub reference: Reference,
    pub series: Vec<StudySeries>,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("scaling.png"),
            x_axis: XAxisMode::Cost,
            x_label: None,
            y_label: "Relative Performance".to_string(),
            reference: Reference::Min,
            series: vec![
                StudySeries {
                    label: "CPU".to_string(),
                    path: PathBuf::from("cpu_scaling"),
                    rate: CPU_RATE,
                    marker: Marker::Square,
                },
                StudySeries {
                    label: "GPU".to_string(),
                    path: PathBuf::from("gpu_scaling"),
                    rate: GPU_RATE,
                    marker: Marker::Circle,
                },
            ],
        }
    }
}

impl StudyConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read study config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("bad study config {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let cfg: StudyConfig = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// X label to draw: the configured one, or the mode's default.
    pub fn x_label(&self) -> &str {
        match (&self.x_label, self.x_axis) {
            (Some(label), _) => label,
            (None, XAxisMode::Cost) => "Cost (Camber Credits)",
            (None, XAxisMode::Nodes) => "Node Count",
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.series.is_empty() {
            bail!("study needs at least one series");
        }
        for s in &self.series {
            if !s.rate.is_finite() {
                bail!("series {:?}: rate must be finite, got {}", s.label, s.rate);
            }
        }
        if let Reference::Value(v) = self.reference {
            if !v.is_finite() || v == 0.0 {
                bail!("reference value must be finite and non-zero, got {}", v);
            }
        }
        Ok(())
    }
}

/// Configuration of the single-table efficiency plot.
#[derive(Debug, Clone, PartialEq)]
pub struct EfficiencyConfig {
    pub infile: PathBuf,
    pub annotate: bool,
    pub emin: f64,
    pub emax: f64,
}

impl EfficiencyConfig {
    pub fn new(infile: impl Into<PathBuf>) -> Self {
        Self {
            infile: infile.into(),
            annotate: false,
            emin: DEFAULT_EMIN,
            emax: DEFAULT_EMAX,
        }
    }

    /// `<infile>.png`, keeping any extension the input already has.
    pub fn output_path(&self) -> PathBuf {
        let mut name = self.infile.clone().into_os_string();
        name.push(".png");
        PathBuf::from(name)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.emin.is_finite() || !self.emax.is_finite() {
            bail!("efficiency range must be finite, got [{}, {}]", self.emin, self.emax);
        }
        if self.emin >= self.emax {
            bail!("--emin ({}) must be below --emax ({})", self.emin, self.emax);
        }
        Ok(())
    }
}
