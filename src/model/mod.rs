//! Model: turn loaded scaling tables plus run configuration into figures.

pub mod transform;

pub use transform::{
    Reference, TransformError, check_baseline, cost_scale, efficiency, ideal_scaling, normalize,
};

use crate::Result;
use crate::config::{EfficiencyConfig, StudyConfig, XAxisMode};
use crate::figure::{
    Axis, AxisScale, Figure, LegendPosition, Marker, PlotSpec, Series, format_annotation,
};
use crate::table::ScalingRecord;

use anyhow::{anyhow, bail};
use tracing::debug;

/// Build the single log-log panel comparing several studies.
///
/// Every metric is divided by one reference taken from the first table, so
/// all series share the same "relative performance" unit. `tables` is
/// index-aligned with `study.series`.
pub fn build_comparison_figure(study: &StudyConfig, tables: &[ScalingRecord]) -> Result<Figure> {
    if tables.len() != study.series.len() {
        bail!(
            "{} tables loaded for {} configured series",
            tables.len(),
            study.series.len()
        );
    }
    let first = tables
        .first()
        .ok_or_else(|| anyhow!("study needs at least one series"))?;
    let reference = study
        .reference
        .resolve(first.y())
        .ok_or_else(|| anyhow!("reference series {:?} is empty", study.series[0].label))?;
    debug!(reference, rule = ?study.reference, "normalization reference");

    let mut panel = PlotSpec::new(
        Axis::new(study.x_label(), AxisScale::Log),
        Axis::new(study.y_label.clone(), AxisScale::Log),
    );

    for (spec, table) in study.series.iter().zip(tables) {
        let x = match study.x_axis {
            XAxisMode::Cost => cost_scale(table.x(), spec.rate),
            XAxisMode::Nodes => table.x().to_vec(),
        };
        let y = normalize(table.y(), reference);
        panel.push(Series::scatter(&x, &y, spec.marker).labeled(spec.label.clone()));
    }

    Ok(Figure::new(vec![panel]))
}

/// Build the two-panel efficiency figure for one table.
///
/// Top: measured performance against node count with the ideal linear curve.
/// Bottom: efficiency in percent, clipped to `[emin, emax]`, with the 100% line.
/// Baseline validity is the caller's job (see [`check_baseline`]).
pub fn build_efficiency_figure(table: &ScalingRecord, config: &EfficiencyConfig) -> Figure {
    let x = table.x();
    let y = table.y();
    let eff = efficiency(x, y);
    let ideal = ideal_scaling(x, y);
    let hundred = vec![100.0; x.len()];

    let labels: Vec<String> = if config.annotate {
        table.aux().iter().map(|v| format_annotation(*v)).collect()
    } else {
        Vec::new()
    };

    let mut perf = PlotSpec::new(
        Axis::new("Node Count", AxisScale::Log),
        Axis::new("Performance", AxisScale::Log),
    );
    perf.title = Some(config.infile.display().to_string());
    perf.push(Series::line(x, &ideal).labeled("Ideal"));
    perf.push(
        Series::scatter(x, y, Marker::Circle)
            .labeled("Measured")
            .annotated(labels.clone()),
    );

    let mut eff_panel = PlotSpec::new(
        Axis::new("Node Count", AxisScale::Log),
        Axis::new("Efficiency (%)", AxisScale::Linear).with_limits(config.emin, config.emax),
    );
    eff_panel.legend = LegendPosition::LowerLeft;
    eff_panel.push(Series::line(x, &hundred).labeled("Ideal"));
    eff_panel.push(
        Series::scatter(x, &eff, Marker::Square)
            .labeled("Measured")
            .annotated(labels),
    );

    Figure::new(vec![perf, eff_panel])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StudySeries;
    use crate::figure::SeriesStyle;
    use crate::table::ScalingRow;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn record(rows: &[(f64, f64, f64)]) -> ScalingRecord {
        rows.iter()
            .map(|&(x, aux, y)| ScalingRow { x, aux, y })
            .collect()
    }

    #[test]
    fn comparison_normalizes_by_min_of_first_table_and_scales_cost() {
        let study = StudyConfig::default();
        let cpu = record(&[(1.0, 36.0, 200.0), (2.0, 72.0, 380.0)]);
        let gpu = record(&[(1.0, 4.0, 1000.0), (2.0, 8.0, 1900.0)]);

        let fig = build_comparison_figure(&study, &[cpu, gpu]).unwrap();

        assert_eq!(fig.panels.len(), 1);
        let panel = &fig.panels[0];
        assert_eq!(panel.x_axis.scale, AxisScale::Log);
        assert_eq!(panel.y_axis.scale, AxisScale::Log);
        assert_eq!(panel.x_axis.label, "Cost (Camber Credits)");
        assert_eq!(panel.y_axis.label, "Relative Performance");

        let cpu = &panel.series[0];
        assert_eq!(cpu.label.as_deref(), Some("CPU"));
        assert_eq!(cpu.style, SeriesStyle::Scatter(Marker::Square));
        assert_eq!(cpu.points, vec![(4.5, 1.0), (9.0, 1.9)]);

        let gpu = &panel.series[1];
        assert_eq!(gpu.label.as_deref(), Some("GPU"));
        assert_eq!(gpu.style, SeriesStyle::Scatter(Marker::Circle));
        assert_eq!(gpu.points, vec![(325.0 / 24.0, 5.0), (2.0 * (325.0 / 24.0), 9.5)]);
    }

    #[test]
    fn comparison_by_nodes_skips_the_rate() {
        let study = StudyConfig {
            x_axis: XAxisMode::Nodes,
            reference: Reference::First,
            series: vec![StudySeries {
                label: "CPU".into(),
                path: PathBuf::from("cpu_scaling"),
                rate: 4.5,
                marker: Marker::Square,
            }],
            ..StudyConfig::default()
        };
        let cpu = record(&[(2.0, 72.0, 400.0), (4.0, 144.0, 700.0)]);

        let fig = build_comparison_figure(&study, &[cpu]).unwrap();
        let panel = &fig.panels[0];

        assert_eq!(panel.x_axis.label, "Node Count");
        assert_eq!(panel.series[0].points, vec![(2.0, 1.0), (4.0, 1.75)]);
    }

    #[test]
    fn comparison_requires_one_table_per_series() {
        let study = StudyConfig::default();
        let cpu = record(&[(1.0, 1.0, 1.0)]);
        assert!(build_comparison_figure(&study, &[cpu]).is_err());
    }

    #[test]
    fn efficiency_figure_panels() {
        let table = record(&[(1.0, 10.0, 100.0), (2.0, 20.0, 150.0)]);
        let cfg = EfficiencyConfig::new("in");

        let fig = build_efficiency_figure(&table, &cfg);
        assert_eq!(fig.panels.len(), 2);
        assert_eq!(fig.panels[0].title.as_deref(), Some("in"));
        assert!(fig.validate().is_ok());

        let perf = &fig.panels[0];
        assert_eq!(perf.series[0].style, SeriesStyle::Line);
        assert_eq!(perf.series[0].points, vec![(1.0, 100.0), (2.0, 200.0)]);
        assert_eq!(perf.series[1].points, vec![(1.0, 100.0), (2.0, 150.0)]);
        assert!(perf.series[1].annotations.is_empty());

        let eff = &fig.panels[1];
        assert_eq!(eff.y_axis.limits, Some((95.0, 105.0)));
        assert_eq!(eff.y_axis.scale, AxisScale::Linear);
        assert_eq!(eff.series[0].points, vec![(1.0, 100.0), (2.0, 100.0)]);
        assert_eq!(eff.series[1].points, vec![(1.0, 100.0), (2.0, 75.0)]);
    }

    #[test]
    fn efficiency_figure_annotates_with_aux_column() {
        let table = record(&[(1.0, 36.0, 100.0), (2.0, 72.0, 195.0), (4.0, 144.0, 380.0)]);
        let cfg = EfficiencyConfig {
            annotate: true,
            emin: 90.0,
            emax: 110.0,
            ..EfficiencyConfig::new("in")
        };

        let fig = build_efficiency_figure(&table, &cfg);
        let expected = vec!["36".to_string(), "72".to_string(), "144".to_string()];

        assert_eq!(fig.panels[0].series[1].annotations, expected);
        assert_eq!(fig.panels[1].series[1].annotations, expected);
        assert_eq!(fig.panels[1].y_axis.limits, Some((90.0, 110.0)));
        assert!(fig.validate().is_ok());
    }
}
