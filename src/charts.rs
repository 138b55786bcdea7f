use chrono::Local;
use plotters::coord::Shift;
use plotters::prelude::*;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const CHART_SIZE: (u32, u32) = (1000, 600);
const HISTOGRAM_BINS: usize = 20;

const PALETTE: [RGBColor; 8] = [
    RGBColor(66, 133, 244),
    RGBColor(219, 68, 55),
    RGBColor(244, 180, 0),
    RGBColor(15, 157, 88),
    RGBColor(171, 71, 188),
    RGBColor(0, 172, 193),
    RGBColor(255, 112, 67),
    RGBColor(92, 107, 192),
];

#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("chart data is empty")]
    EmptySeries,
    #[error("{kind} charts require {needs}")]
    InvalidData {
        kind: &'static str,
        needs: &'static str,
    },
    #[error("failed to prepare output directory: {0}")]
    Io(#[from] std::io::Error),
    #[error("rendering failed: {0}")]
    Render(String),
}

fn rerr<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Render(e.to_string())
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamedPoint {
    pub label: String,
    pub value: f64,
}

/// Chart input is explicitly tagged by the caller: labelled points or
/// bare numeric rows. No positional column guessing.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartData {
    Named { points: Vec<NamedPoint> },
    Positional { rows: Vec<Vec<f64>> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
    Scatter,
    Heatmap,
    BoxPlot,
    Histogram,
    Violin,
}

impl ChartKind {
    /// Unknown selectors fall back to a bar chart rather than failing.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "line" => ChartKind::Line,
            "pie" => ChartKind::Pie,
            "scatter" => ChartKind::Scatter,
            "heatmap" => ChartKind::Heatmap,
            "boxplot" => ChartKind::BoxPlot,
            "histogram" => ChartKind::Histogram,
            "violin" => ChartKind::Violin,
            _ => ChartKind::Bar,
        }
    }

    fn slug(self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::Pie => "pie",
            ChartKind::Scatter => "scatter",
            ChartKind::Heatmap => "heatmap",
            ChartKind::BoxPlot => "boxplot",
            ChartKind::Histogram => "histogram",
            ChartKind::Violin => "violin",
        }
    }
}

pub struct ChartRenderer {
    output_dir: PathBuf,
}

type Canvas<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

impl ChartRenderer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Renders a PNG into the output directory and returns its filename.
    /// Filenames are timestamped per call; same-second collisions are an
    /// accepted race.
    pub fn render(
        &self,
        kind_raw: &str,
        data: &ChartData,
        title: &str,
    ) -> Result<String, ChartError> {
        let kind = ChartKind::parse(kind_raw);
        std::fs::create_dir_all(&self.output_dir)?;

        let filename = format!(
            "{}_{}.png",
            kind.slug(),
            Local::now().format("%Y%m%d_%H%M%S")
        );
        let path = self.output_dir.join(&filename);
        draw_chart(&path, kind, data, title)?;
        Ok(filename)
    }
}

fn draw_chart(
    path: &Path,
    kind: ChartKind,
    data: &ChartData,
    title: &str,
) -> Result<(), ChartError> {
    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(rerr)?;

    match kind {
        ChartKind::Bar => draw_bar(&root, &labelled_series(data)?, title),
        ChartKind::Line => draw_line(&root, &point_series(data)?, title),
        ChartKind::Pie => draw_pie(&root, &labelled_series(data)?, title),
        ChartKind::Scatter => draw_scatter(&root, &point_series(data)?, title),
        ChartKind::Heatmap => draw_heatmap(&root, &matrix(data)?, title),
        ChartKind::BoxPlot => draw_boxplot(&root, &flat_values(data)?, title),
        ChartKind::Histogram => draw_histogram(&root, &flat_values(data)?, title),
        ChartKind::Violin => draw_violin(&root, &flat_values(data)?, title),
    }?;

    root.present().map_err(rerr)?;
    Ok(())
}

// --- data shaping ---------------------------------------------------------

fn labelled_series(data: &ChartData) -> Result<Vec<(String, f64)>, ChartError> {
    let series: Vec<(String, f64)> = match data {
        ChartData::Named { points } => points
            .iter()
            .map(|p| (p.label.clone(), p.value))
            .collect(),
        ChartData::Positional { rows } => rows
            .iter()
            .map(|row| {
                if row.len() < 2 {
                    Err(ChartError::InvalidData {
                        kind: "labelled",
                        needs: "positional rows of at least two numbers",
                    })
                } else {
                    Ok((format!("{}", row[0]), row[1]))
                }
            })
            .collect::<Result<_, _>>()?,
    };
    if series.is_empty() {
        return Err(ChartError::EmptySeries);
    }
    Ok(series)
}

fn point_series(data: &ChartData) -> Result<Vec<(f64, f64)>, ChartError> {
    let points: Vec<(f64, f64)> = match data {
        ChartData::Named { points } => points
            .iter()
            .enumerate()
            .map(|(i, p)| (i as f64, p.value))
            .collect(),
        ChartData::Positional { rows } => rows
            .iter()
            .map(|row| {
                if row.len() < 2 {
                    Err(ChartError::InvalidData {
                        kind: "xy",
                        needs: "positional rows of at least two numbers",
                    })
                } else {
                    Ok((row[0], row[1]))
                }
            })
            .collect::<Result<_, _>>()?,
    };
    if points.is_empty() {
        return Err(ChartError::EmptySeries);
    }
    Ok(points)
}

fn flat_values(data: &ChartData) -> Result<Vec<f64>, ChartError> {
    let values: Vec<f64> = match data {
        ChartData::Named { points } => points.iter().map(|p| p.value).collect(),
        ChartData::Positional { rows } => rows.iter().flatten().copied().collect(),
    };
    if values.is_empty() {
        return Err(ChartError::EmptySeries);
    }
    Ok(values)
}

fn matrix(data: &ChartData) -> Result<Vec<Vec<f64>>, ChartError> {
    match data {
        ChartData::Positional { rows } if !rows.is_empty() && rows.iter().all(|r| !r.is_empty()) => {
            Ok(rows.clone())
        }
        ChartData::Positional { .. } => Err(ChartError::EmptySeries),
        ChartData::Named { .. } => Err(ChartError::InvalidData {
            kind: "heatmap",
            needs: "positional numeric rows forming a matrix",
        }),
    }
}

fn value_bounds(values: &[f64]) -> (f64, f64) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if (max - min).abs() < f64::EPSILON {
        (min - 1.0, max + 1.0)
    } else {
        (min, max)
    }
}

fn chart_builder<'a, 'b>(
    root: &'a Canvas<'b>,
    title: &str,
) -> ChartBuilder<'a, 'b, BitMapBackend<'b>> {
    let mut builder = ChartBuilder::on(root);
    if !title.is_empty() {
        builder.caption(title, ("sans-serif", 24));
    }
    builder
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(50);
    builder
}

// --- renderers ------------------------------------------------------------

fn draw_bar(root: &Canvas, series: &[(String, f64)], title: &str) -> Result<(), ChartError> {
    let n = series.len();
    let top = series.iter().map(|(_, v)| *v).fold(0.0f64, f64::max);
    let bottom = series.iter().map(|(_, v)| *v).fold(0.0f64, f64::min);
    let top = if top <= 0.0 { 1.0 } else { top * 1.1 };

    let labels: Vec<String> = series.iter().map(|(l, _)| l.clone()).collect();
    let mut chart = chart_builder(root, title)
        .build_cartesian_2d(0f64..n as f64, bottom..top)
        .map_err(rerr)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n.min(20))
        .x_label_formatter(&|x| {
            labels
                .get(x.floor() as usize)
                .cloned()
                .unwrap_or_default()
        })
        .draw()
        .map_err(rerr)?;

    chart
        .draw_series(series.iter().enumerate().map(|(i, (_, v))| {
            let color = PALETTE[i % PALETTE.len()];
            Rectangle::new([(i as f64 + 0.15, 0.0), (i as f64 + 0.85, *v)], color.filled())
        }))
        .map_err(rerr)?;
    Ok(())
}

fn draw_line(root: &Canvas, points: &[(f64, f64)], title: &str) -> Result<(), ChartError> {
    let (x_min, x_max) = value_bounds(&points.iter().map(|(x, _)| *x).collect::<Vec<_>>());
    let (y_min, y_max) = value_bounds(&points.iter().map(|(_, y)| *y).collect::<Vec<_>>());

    let mut chart = chart_builder(root, title)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(rerr)?;
    chart.configure_mesh().draw().map_err(rerr)?;

    chart
        .draw_series(LineSeries::new(points.iter().copied(), &PALETTE[0]))
        .map_err(rerr)?;
    chart
        .draw_series(
            points
                .iter()
                .map(|(x, y)| Circle::new((*x, *y), 3, PALETTE[0].filled())),
        )
        .map_err(rerr)?;
    Ok(())
}

fn draw_pie(root: &Canvas, series: &[(String, f64)], title: &str) -> Result<(), ChartError> {
    let slices: Vec<(String, f64)> = series.iter().filter(|(_, v)| *v > 0.0).cloned().collect();
    if slices.is_empty() {
        return Err(ChartError::EmptySeries);
    }

    let area = if title.is_empty() {
        root.clone()
    } else {
        root.titled(title, ("sans-serif", 24)).map_err(rerr)?
    };

    let sizes: Vec<f64> = slices.iter().map(|(_, v)| *v).collect();
    let labels: Vec<String> = slices.iter().map(|(l, _)| l.clone()).collect();
    let colors: Vec<RGBColor> = (0..slices.len())
        .map(|i| PALETTE[i % PALETTE.len()])
        .collect();

    let center = (CHART_SIZE.0 as i32 / 2, CHART_SIZE.1 as i32 / 2 + 10);
    let radius = 220.0;
    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.label_style(("sans-serif", 18).into_font());
    area.draw(&pie).map_err(rerr)?;
    Ok(())
}

fn draw_scatter(root: &Canvas, points: &[(f64, f64)], title: &str) -> Result<(), ChartError> {
    let (x_min, x_max) = value_bounds(&points.iter().map(|(x, _)| *x).collect::<Vec<_>>());
    let (y_min, y_max) = value_bounds(&points.iter().map(|(_, y)| *y).collect::<Vec<_>>());

    let mut chart = chart_builder(root, title)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(rerr)?;
    chart.configure_mesh().draw().map_err(rerr)?;

    chart
        .draw_series(
            points
                .iter()
                .map(|(x, y)| Circle::new((*x, *y), 4, PALETTE[1].filled())),
        )
        .map_err(rerr)?;
    Ok(())
}

fn draw_heatmap(root: &Canvas, grid: &[Vec<f64>], title: &str) -> Result<(), ChartError> {
    let rows = grid.len();
    let cols = grid.iter().map(Vec::len).max().unwrap_or(0);
    let all: Vec<f64> = grid.iter().flatten().copied().collect();
    let (v_min, v_max) = value_bounds(&all);
    let span = v_max - v_min;

    let mut chart = chart_builder(root, title)
        .build_cartesian_2d(0f64..cols as f64, 0f64..rows as f64)
        .map_err(rerr)?;
    chart.configure_mesh().disable_mesh().draw().map_err(rerr)?;

    let mut cells = Vec::new();
    for (i, row) in grid.iter().enumerate() {
        for (j, value) in row.iter().enumerate() {
            let t = ((value - v_min) / span).clamp(0.0, 1.0);
            // Cold blue through warm red.
            let color = HSLColor(0.66 * (1.0 - t), 0.7, 0.5);
            cells.push(Rectangle::new(
                [(j as f64, i as f64), (j as f64 + 1.0, i as f64 + 1.0)],
                color.filled(),
            ));
        }
    }
    chart.draw_series(cells).map_err(rerr)?;
    Ok(())
}

fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    sorted
}

fn percentile(sorted: &[f64], q: f64) -> f64 {
    if sorted.len() == 1 {
        return sorted[0];
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

fn draw_boxplot(root: &Canvas, values: &[f64], title: &str) -> Result<(), ChartError> {
    let sorted = sorted_copy(values);
    let (low, high) = (sorted[0], sorted[sorted.len() - 1]);
    let q1 = percentile(&sorted, 0.25);
    let median = percentile(&sorted, 0.5);
    let q3 = percentile(&sorted, 0.75);

    let (y_min, y_max) = value_bounds(values);
    let pad = (y_max - y_min) * 0.1;

    let mut chart = chart_builder(root, title)
        .build_cartesian_2d(0f64..1f64, (y_min - pad)..(y_max + pad))
        .map_err(rerr)?;
    chart.configure_mesh().disable_x_mesh().draw().map_err(rerr)?;

    let box_color = PALETTE[0].mix(0.35);
    chart
        .draw_series(std::iter::once(Rectangle::new(
            [(0.3, q1), (0.7, q3)],
            box_color.filled(),
        )))
        .map_err(rerr)?;
    let strokes = vec![
        vec![(0.3, median), (0.7, median)],
        vec![(0.5, low), (0.5, q1)],
        vec![(0.5, q3), (0.5, high)],
        vec![(0.42, low), (0.58, low)],
        vec![(0.42, high), (0.58, high)],
        vec![(0.3, q1), (0.7, q1), (0.7, q3), (0.3, q3), (0.3, q1)],
    ];
    chart
        .draw_series(strokes.into_iter().map(|pts| PathElement::new(pts, BLACK)))
        .map_err(rerr)?;
    Ok(())
}

fn draw_histogram(root: &Canvas, values: &[f64], title: &str) -> Result<(), ChartError> {
    let (v_min, v_max) = value_bounds(values);
    let bin_width = (v_max - v_min) / HISTOGRAM_BINS as f64;

    let mut counts = [0usize; HISTOGRAM_BINS];
    for value in values {
        let idx = (((value - v_min) / bin_width) as usize).min(HISTOGRAM_BINS - 1);
        counts[idx] += 1;
    }
    let top = counts.iter().copied().max().unwrap_or(1) as f64 * 1.1;

    let mut chart = chart_builder(root, title)
        .build_cartesian_2d(v_min..v_max, 0f64..top)
        .map_err(rerr)?;
    chart.configure_mesh().disable_x_mesh().draw().map_err(rerr)?;

    chart
        .draw_series(counts.iter().enumerate().map(|(i, count)| {
            let x0 = v_min + i as f64 * bin_width;
            let x1 = x0 + bin_width;
            Rectangle::new([(x0, 0.0), (x1, *count as f64)], PALETTE[3].filled())
        }))
        .map_err(rerr)?;
    Ok(())
}

fn draw_violin(root: &Canvas, values: &[f64], title: &str) -> Result<(), ChartError> {
    const GRID_POINTS: usize = 40;
    const MAX_HALF_WIDTH: f64 = 0.35;

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let std = (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt();
    // Silverman's rule of thumb, floored so identical samples still render.
    let bandwidth = (1.06 * std * n.powf(-0.2)).max(1e-3);

    let (v_min, v_max) = value_bounds(values);
    let pad = (v_max - v_min) * 0.15;
    let (y_lo, y_hi) = (v_min - pad, v_max + pad);

    let mut densities = Vec::with_capacity(GRID_POINTS + 1);
    for i in 0..=GRID_POINTS {
        let y = y_lo + (y_hi - y_lo) * i as f64 / GRID_POINTS as f64;
        let density: f64 = values
            .iter()
            .map(|v| {
                let z = (y - v) / bandwidth;
                (-0.5 * z * z).exp()
            })
            .sum();
        densities.push((y, density));
    }
    let peak = densities
        .iter()
        .map(|(_, d)| *d)
        .fold(f64::MIN, f64::max)
        .max(f64::EPSILON);

    let mut outline: Vec<(f64, f64)> = densities
        .iter()
        .map(|(y, d)| (0.5 - d / peak * MAX_HALF_WIDTH, *y))
        .collect();
    outline.extend(
        densities
            .iter()
            .rev()
            .map(|(y, d)| (0.5 + d / peak * MAX_HALF_WIDTH, *y)),
    );

    let mut chart = chart_builder(root, title)
        .build_cartesian_2d(0f64..1f64, y_lo..y_hi)
        .map_err(rerr)?;
    chart.configure_mesh().disable_x_mesh().draw().map_err(rerr)?;

    chart
        .draw_series(std::iter::once(Polygon::new(
            outline.clone(),
            PALETTE[4].mix(0.45).filled(),
        )))
        .map_err(rerr)?;
    chart
        .draw_series(std::iter::once(PathElement::new(outline, PALETTE[4])))
        .map_err(rerr)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(points: &[(&str, f64)]) -> ChartData {
        ChartData::Named {
            points: points
                .iter()
                .map(|(l, v)| NamedPoint {
                    label: l.to_string(),
                    value: *v,
                })
                .collect(),
        }
    }

    #[test]
    fn test_unknown_kind_falls_back_to_bar() {
        assert_eq!(ChartKind::parse("sunburst"), ChartKind::Bar);
        assert_eq!(ChartKind::parse(""), ChartKind::Bar);
        assert_eq!(ChartKind::parse("LINE"), ChartKind::Line);
    }

    #[test]
    fn test_empty_data_is_an_error() {
        let renderer = ChartRenderer::new(tempfile::tempdir().unwrap().path());
        let err = renderer.render("bar", &named(&[]), "").unwrap_err();
        assert!(matches!(err, ChartError::EmptySeries));
    }

    #[test]
    fn test_heatmap_rejects_named_points() {
        let renderer = ChartRenderer::new(tempfile::tempdir().unwrap().path());
        let err = renderer
            .render("heatmap", &named(&[("a", 1.0)]), "")
            .unwrap_err();
        assert!(matches!(err, ChartError::InvalidData { .. }));
    }

    #[test]
    fn test_bar_chart_renders_to_timestamped_file() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = ChartRenderer::new(dir.path());
        let filename = renderer
            .render("bar", &named(&[("jan", 120.0), ("feb", 190.0), ("mar", 150.0)]), "")
            .unwrap();
        assert!(filename.starts_with("bar_"));
        assert!(filename.ends_with(".png"));
        assert!(dir.path().join(&filename).exists());
    }

    #[test]
    fn test_unknown_kind_renders_as_bar_file() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = ChartRenderer::new(dir.path());
        let filename = renderer
            .render("sunburst", &named(&[("a", 1.0), ("b", 2.0)]), "")
            .unwrap();
        assert!(filename.starts_with("bar_"));
    }

    #[test]
    fn test_advanced_kinds_render() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = ChartRenderer::new(dir.path());

        let values = ChartData::Positional {
            rows: vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0], vec![2.0, 3.0, 1.0]],
        };
        for kind in ["heatmap", "boxplot", "histogram", "violin"] {
            let filename = renderer.render(kind, &values, "").unwrap();
            assert!(filename.starts_with(kind), "{filename}");
        }
    }

    #[test]
    fn test_line_and_scatter_use_xy_rows() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = ChartRenderer::new(dir.path());
        let data = ChartData::Positional {
            rows: vec![vec![0.0, 1.0], vec![1.0, 3.0], vec![2.0, 2.0]],
        };
        assert!(renderer.render("line", &data, "").is_ok());
        assert!(renderer.render("scatter", &data, "").is_ok());
    }
}
