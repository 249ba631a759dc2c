use crate::Result;
use crate::figure::{
    AxisScale, Figure, LegendPosition, Marker, PlotSpec, Series, SeriesStyle, Viewport,
    format_tick,
};

use plotters::chart::SeriesAnno;
use plotters::coord::Shift;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::ranged1d::{AsRangedCoord, Ranged, ValueFormatter};
use plotters::element::IntoDynElement;
use plotters::prelude::IntoLogRange;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;
use tracing::{debug, warn};

const MARKER_SIZE: i32 = 5;
const LINE_WIDTH: u32 = 2;
/// Pixels between a point and the baseline of its annotation.
const ANNOTATION_OFFSET: i32 = 8;
const FONT: &str = "sans-serif";

/// Render `figure` into a PNG file at `path`.
pub fn render_png(figure: &Figure, path: &Path) -> Result<()> {
    figure.validate()?;
    let root = BitMapBackend::new(path, (figure.width, figure.height)).into_drawing_area();
    draw_figure(&root, figure)?;
    debug!(path = %path.display(), "rendered figure");
    Ok(())
}

fn draw_figure<DB>(root: &DrawingArea<DB, Shift>, figure: &Figure) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let areas = root.split_evenly((figure.panels.len(), 1));
    for (area, panel) in areas.iter().zip(&figure.panels) {
        let view = Viewport::of(panel);
        let x = view.x.0..view.x.1;
        let y = view.y.0..view.y.1;

        // Each scale pairing is a distinct coordinate type.
        match (panel.x_axis.scale, panel.y_axis.scale) {
            (AxisScale::Linear, AxisScale::Linear) => draw_panel(area, panel, &view, x, y)?,
            (AxisScale::Linear, AxisScale::Log) => {
                draw_panel(area, panel, &view, x, y.log_scale())?
            }
            (AxisScale::Log, AxisScale::Linear) => {
                draw_panel(area, panel, &view, x.log_scale(), y)?
            }
            (AxisScale::Log, AxisScale::Log) => {
                draw_panel(area, panel, &view, x.log_scale(), y.log_scale())?
            }
        }
    }

    root.present()?;
    Ok(())
}

fn draw_panel<DB, XR, YR>(
    area: &DrawingArea<DB, Shift>,
    panel: &PlotSpec,
    view: &Viewport,
    x_range: XR,
    y_range: YR,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
    XR: AsRangedCoord<Value = f64>,
    YR: AsRangedCoord<Value = f64>,
    XR::CoordDescType: ValueFormatter<f64>,
    YR::CoordDescType: ValueFormatter<f64>,
{
    let mut builder = ChartBuilder::on(area);
    builder
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70);
    if let Some(title) = &panel.title {
        builder.caption(title, (FONT, 24));
    }
    let mut chart = builder.build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc(panel.x_axis.label.as_str())
        .y_desc(panel.y_axis.label.as_str())
        .x_label_formatter(&|v| format_tick(*v))
        .y_label_formatter(&|v| format_tick(*v))
        .label_style((FONT, 14))
        .axis_desc_style((FONT, 18))
        .draw()?;

    for (idx, series) in panel.series.iter().enumerate() {
        let color = Palette99::pick(idx).to_rgba();

        let (points, labels) = placeable(view, series);
        let skipped = series.points.len() - points.len();
        if skipped > 0 {
            warn!(
                series = series.label.as_deref().unwrap_or(""),
                skipped, "points outside the axes were skipped"
            );
        }

        let label = series.label.as_deref();
        match series.style {
            SeriesStyle::Line => {
                let style = color.stroke_width(LINE_WIDTH);
                let mut pieces = view.clip_polyline(&series.points).into_iter();
                // The first (possibly empty) piece carries the legend entry.
                let first = pieces.next().unwrap_or_default();
                let anno = chart.draw_series(LineSeries::new(first, style))?;
                if let Some(label) = label {
                    anno.label(label)
                        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
                }
                for piece in pieces {
                    chart.draw_series(LineSeries::new(piece, style))?;
                }
            }
            SeriesStyle::Scatter(marker) => {
                draw_markers(&mut chart, &points, marker, color, label)?;
            }
        }

        if !labels.is_empty() {
            let font = (FONT, 13)
                .into_font()
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Bottom));
            chart.draw_series(points.iter().zip(&labels).map(|(&p, text)| {
                EmptyElement::at(p) + Text::new(text.clone(), (0, -ANNOTATION_OFFSET), font.clone())
            }))?;
        }
    }

    if panel.has_legend() {
        chart
            .configure_series_labels()
            .position(legend_position(panel.legend))
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font((FONT, 14))
            .draw()?;
    }

    Ok(())
}

fn draw_markers<'a, DB, X, Y>(
    chart: &mut ChartContext<'a, DB, Cartesian2d<X, Y>>,
    points: &[(f64, f64)],
    marker: Marker,
    color: RGBAColor,
    label: Option<&str>,
) -> Result<()>
where
    DB: DrawingBackend + 'a,
    DB::ErrorType: 'static,
    X: Ranged<ValueType = f64>,
    Y: Ranged<ValueType = f64>,
{
    let style = color.filled();
    let s = MARKER_SIZE;
    let pts = points.iter().copied();

    match marker {
        Marker::Circle => {
            let anno = chart.draw_series(pts.map(|p| Circle::new(p, s, style)))?;
            add_legend(anno, label, move |(x, y)| Circle::new((x, y), s, style));
        }
        Marker::Square => {
            let anno = chart.draw_series(
                pts.map(|p| EmptyElement::at(p) + Rectangle::new([(-s, -s), (s, s)], style)),
            )?;
            add_legend(anno, label, move |(x, y)| {
                Rectangle::new([(x - s, y - s), (x + s, y + s)], style)
            });
        }
        Marker::Triangle => {
            let anno = chart.draw_series(pts.map(|p| TriangleMarker::new(p, s + 1, style)))?;
            add_legend(anno, label, move |(x, y)| TriangleMarker::new((x, y), s + 1, style));
        }
        Marker::Cross => {
            let stroke = color.stroke_width(LINE_WIDTH);
            let anno = chart.draw_series(pts.map(|p| Cross::new(p, s, stroke)))?;
            add_legend(anno, label, move |(x, y)| Cross::new((x, y), s, stroke));
        }
    }
    Ok(())
}

/// Unlabeled series get no legend entry at all.
fn add_legend<'a, DB, E, F>(anno: &mut SeriesAnno<'a, DB>, label: Option<&str>, sample: F)
where
    DB: DrawingBackend + 'a,
    E: IntoDynElement<'a, DB, (i32, i32)>,
    F: Fn((i32, i32)) -> E + 'a,
{
    if let Some(label) = label {
        anno.label(label).legend(sample);
    }
}

/// Points of `series` inside the panel's window, with their annotations.
fn placeable(view: &Viewport, series: &Series) -> (Vec<(f64, f64)>, Vec<String>) {
    let mut points = Vec::with_capacity(series.points.len());
    let mut labels = Vec::with_capacity(series.annotations.len());
    for (i, &p) in series.points.iter().enumerate() {
        if !view.contains(p) {
            continue;
        }
        points.push(p);
        if let Some(text) = series.annotations.get(i) {
            labels.push(text.clone());
        }
    }
    (points, labels)
}

fn legend_position(pos: LegendPosition) -> SeriesLabelPosition {
    match pos {
        LegendPosition::UpperLeft => SeriesLabelPosition::UpperLeft,
        LegendPosition::LowerLeft => SeriesLabelPosition::LowerLeft,
    }
}
