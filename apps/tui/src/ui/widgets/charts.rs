use ocean_dash::domain::{AxisLabel, PlotDocument, PlotLayout, PlotSeries};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

/// One series, projected onto chart coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotPoints {
    pub name: String,
    pub color: Color,
    pub scatter: bool,
    pub points: Vec<(f64, f64)>,
}

/// Everything a ratatui `Chart` needs from a plot document.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub series: Vec<PlotPoints>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    pub x_labels: Vec<String>,
    pub y_labels: Vec<String>,
}

pub fn series_color(name: Option<&str>) -> Color {
    let Some(name) = name else {
        return Color::Cyan;
    };

    if let Some(hex) = name.strip_prefix('#') {
        if hex.len() == 6 {
            if let Ok(rgb) = u32::from_str_radix(hex, 16) {
                let [_, r, g, b] = rgb.to_be_bytes();
                return Color::Rgb(r, g, b);
            }
        }
    }

    match name.to_lowercase().as_str() {
        // Black would vanish on a dark terminal
        "black" | "white" => Color::White,
        "blue" => Color::LightBlue,
        "teal" | "cyan" => Color::Cyan,
        "orange" => Color::Rgb(255, 165, 0),
        "green" => Color::Green,
        "purple" => Color::Magenta,
        "red" => Color::Red,
        "yellow" => Color::Yellow,
        "gray" | "grey" => Color::Gray,
        _ => Color::Cyan,
    }
}

fn tick(value: f64) -> String {
    if value.fract().abs() < f64::EPSILON {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

fn padded(min: f64, max: f64) -> [f64; 2] {
    if (max - min).abs() < f64::EPSILON {
        [min - 1.0, max + 1.0]
    } else {
        [min, max]
    }
}

fn min_max(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .filter(|value| value.is_finite())
        .fold(None, |acc, value| match acc {
            None => Some((value, value)),
            Some((min, max)) => Some((min.min(value), max.max(value))),
        })
}

/// Text labels become categories in order of first appearance, shared
/// across series so an observed run and its continuation line up. A
/// reversed y axis is drawn by negating values.
pub fn chart_data(document: &PlotDocument) -> ChartData {
    let categorical = document
        .data
        .iter()
        .flat_map(|series| series.x.iter())
        .any(|label| label.as_f64().is_none());

    let mut categories: Vec<String> = Vec::new();
    let mut x_of = |label: &AxisLabel| -> f64 {
        if !categorical {
            return label.as_f64().unwrap_or_default();
        }
        let text = label.to_string();
        let index = categories
            .iter()
            .position(|known| *known == text)
            .unwrap_or_else(|| {
                categories.push(text);
                categories.len() - 1
            });
        index as f64
    };

    let reversed = document.layout.y_reversed();
    let sign = if reversed { -1.0 } else { 1.0 };

    let series: Vec<PlotPoints> = document
        .data
        .iter()
        .map(|series| PlotPoints {
            name: series.name.clone(),
            color: series_color(series.color()),
            scatter: series.is_scatter(),
            points: series
                .x
                .iter()
                .zip(&series.y)
                .map(|(x, y)| (x_of(x), sign * y))
                // Gaps keep their category but draw nothing
                .filter(|(_, y)| y.is_finite())
                .collect(),
        })
        .collect();

    let all_points = || series.iter().flat_map(|s| s.points.iter());
    let (x_min, x_max) = min_max(all_points().map(|p| p.0)).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = min_max(all_points().map(|p| p.1)).unwrap_or((0.0, 1.0));
    let x_bounds = padded(x_min, x_max);
    let y_bounds = padded(y_min, y_max);

    let x_mid = (x_bounds[0] + x_bounds[1]) / 2.0;
    let x_labels = if categorical {
        match categories.as_slice() {
            [] => Vec::new(),
            [only] => vec![only.clone()],
            [first, .., last] => {
                vec![first.clone(), categories[categories.len() / 2].clone(), last.clone()]
            }
        }
    } else {
        vec![tick(x_bounds[0]), tick(x_mid), tick(x_bounds[1])]
    };

    let y_mid = (y_bounds[0] + y_bounds[1]) / 2.0;
    let y_labels = [y_bounds[0], y_mid, y_bounds[1]]
        .iter()
        .map(|value| tick(value * sign))
        .collect();

    ChartData {
        series,
        x_bounds,
        y_bounds,
        x_labels,
        y_labels,
    }
}

pub fn render_plot(f: &mut Frame<'_>, area: Rect, document: &PlotDocument) {
    let title = document.layout.title_text().unwrap_or("Chart").to_string();
    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if document.data.iter().all(PlotSeries::is_empty) {
        let paragraph = Paragraph::new("No data points")
            .block(block)
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    }

    let data = chart_data(document);
    let datasets: Vec<Dataset<'_>> = data
        .series
        .iter()
        .map(|series| {
            Dataset::default()
                .name(series.name.clone())
                .marker(if series.scatter { Marker::Dot } else { Marker::Braille })
                .graph_type(if series.scatter {
                    GraphType::Scatter
                } else {
                    GraphType::Line
                })
                .style(Style::default().fg(series.color))
                .data(&series.points)
        })
        .collect();

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title(document.layout.x_title().unwrap_or_default().to_string())
                .style(Style::default().fg(Color::Gray))
                .bounds(data.x_bounds)
                .labels(data.x_labels.clone()),
        )
        .y_axis(
            Axis::default()
                .title(document.layout.y_title().unwrap_or_default().to_string())
                .style(Style::default().fg(Color::Gray))
                .bounds(data.y_bounds)
                .labels(data.y_labels.clone()),
        );

    f.render_widget(chart, area);
}

/// One chart per series, side by side. Used when series share the y axis
/// but not the x scale.
pub fn render_split_plot(f: &mut Frame<'_>, area: Rect, document: &PlotDocument) {
    if document.data.len() < 2 {
        render_plot(f, area, document);
        return;
    }

    #[allow(clippy::cast_possible_truncation)]
    let share = (100 / document.data.len()) as u16;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Percentage(share); document.data.len()])
        .split(area);

    let y_title = document.layout.y_title().unwrap_or_default();
    for (series, column) in document.data.iter().zip(columns.iter()) {
        let mut layout = PlotLayout::titled(&series.name, &series.name, y_title);
        if document.layout.y_reversed() {
            layout = layout.with_reversed_y();
        }
        let single = PlotDocument::new(vec![series.clone()], layout);
        render_plot(f, *column, &single);
    }
}
