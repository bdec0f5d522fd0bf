#![cfg(not(tarpaulin_include))]

use crate::row::MonthRow;
use plotters::prelude::*;
use std::fs::remove_file;

/// Configuration options for chart generation
///
/// This structure contains the customizable properties shared by the two
/// budget time-series charts.
#[derive(Clone, Debug)]
pub struct GraphOptions {
    /// Title displayed at the top of the chart
    pub title: String,

    /// Label for the X-axis
    pub x_label: String,

    /// Label for the Y-axis
    pub y_label: String,

    /// Width of the chart in pixels
    pub width: u32,

    /// Height of the chart in pixels
    pub height: u32,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            title: "Graph".to_string(),
            x_label: "Month".to_string(),
            y_label: "USD".to_string(),
            width: 800,
            height: 600,
        }
    }
}

/// Renders the cumulative secondary-loan balance over time
///
/// Produces a PNG line chart of `cumulative_secondary_borrowed` against the
/// month labels, with circular markers on each data point.
///
/// # Arguments
/// * `rows` - The annotated month rows, in chronological order
///
/// # Returns
/// * A Result containing the PNG image data as bytes or an error
pub fn borrowed_chart(rows: &[MonthRow]) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let options = GraphOptions {
        title: "Cumulative Secondary Loan Borrowed".to_string(),
        x_label: "Month".to_string(),
        y_label: "Cumulative Borrowed ($)".to_string(),
        ..Default::default()
    };
    let labels: Vec<String> = rows.iter().map(|r| r.month.label()).collect();
    let values: Vec<f64> = rows.iter().map(|r| r.cumulative_secondary_borrowed).collect();

    create_line_chart(&labels, &values, &options, &BLUE, "temp_borrowed_chart.png")
}

/// Renders the net monthly balance over time
///
/// Produces a PNG line chart of `net_monthly_balance` against the month
/// labels, with circular markers on each data point.
///
/// # Arguments
/// * `rows` - The annotated month rows, in chronological order
///
/// # Returns
/// * A Result containing the PNG image data as bytes or an error
pub fn balance_chart(rows: &[MonthRow]) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let options = GraphOptions {
        title: "Monthly Net Balance".to_string(),
        x_label: "Month".to_string(),
        y_label: "Net Balance ($)".to_string(),
        ..Default::default()
    };
    let labels: Vec<String> = rows.iter().map(|r| r.month.label()).collect();
    let values: Vec<f64> = rows.iter().map(|r| r.net_monthly_balance).collect();

    create_line_chart(&labels, &values, &options, &GREEN, "temp_balance_chart.png")
}

/// Creates a line chart from a labelled series
///
/// Plots the values against their positions, labelling the X-axis with the
/// `"Mon YYYY"` month labels. The image is rendered into a temporary file
/// and read back as PNG bytes.
///
/// # Arguments
/// * `labels` - X-axis labels, one per value
/// * `values` - The data series
/// * `options` - Chart styling options
/// * `color` - Color of the line and markers
/// * `filename` - Temporary file used by the bitmap backend
///
/// # Returns
/// * A Result containing the PNG image data as bytes or an error
fn create_line_chart(
    labels: &[String],
    values: &[f64],
    options: &GraphOptions,
    color: &RGBColor,
    filename: &str,
) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    {
        // Create a file-based bitmap backend
        let root =
            BitMapBackend::new(filename, (options.width, options.height)).into_drawing_area();
        root.fill(&WHITE)?;

        let min_y = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max_y = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let (min_y, max_y) = if values.is_empty() {
            (0.0, 1.0)
        } else {
            (min_y, max_y)
        };
        let pad = ((max_y - min_y) * 0.05).max(1.0);

        let x_range = -0.5..(values.len() as f64 - 0.5).max(0.5);
        let y_range = (min_y - pad)..(max_y + pad);

        let mut chart = ChartBuilder::on(&root)
            .caption(&options.title, ("sans-serif", 30).into_font())
            .margin(10)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(x_range, y_range)?;

        chart
            .configure_mesh()
            .x_desc(&options.x_label)
            .y_desc(&options.y_label)
            .x_labels(labels.len().min(13))
            .x_label_formatter(&|x| {
                let i = x.round();
                if i < 0.0 {
                    return String::new();
                }
                labels.get(i as usize).cloned().unwrap_or_default()
            })
            .draw()?;

        let points: Vec<(f64, f64)> = values
            .iter()
            .enumerate()
            .map(|(i, &v)| (i as f64, v))
            .collect();

        chart.draw_series(LineSeries::new(points.iter().copied(), color))?;
        chart.draw_series(
            points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 3, color.filled())),
        )?;

        root.present()?;
    }

    // Read the file directly
    let png_data = std::fs::read(filename)?;

    // Clean up
    remove_file(filename)?;

    Ok(png_data)
}
