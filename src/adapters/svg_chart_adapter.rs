//! Standalone SVG chart of portfolio value per trading day.

use std::fs;
use std::path::Path;

use crate::domain::error::TradeGrowthError;
use crate::domain::estimate::Estimate;
use crate::domain::projection::DayRecord;
use crate::ports::report_port::ReportPort;

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 320.0;
const PADDING: f64 = 48.0;

pub struct SvgChartAdapter;

pub fn generate_growth_svg(records: &[DayRecord]) -> String {
    if records.is_empty() {
        return String::new();
    }

    let min_amount = records
        .iter()
        .map(|r| r.amount)
        .fold(f64::INFINITY, f64::min);
    let max_amount = records
        .iter()
        .map(|r| r.amount)
        .fold(f64::NEG_INFINITY, f64::max);

    let plot_width = WIDTH - 2.0 * PADDING;
    let plot_height = HEIGHT - 2.0 * PADDING;

    let range = max_amount - min_amount;
    let scale_y = if range > 0.0 { plot_height / range } else { 0.0 };
    let scale_x = if records.len() > 1 {
        plot_width / (records.len() - 1) as f64
    } else {
        0.0
    };
    // A flat series sits mid-plot rather than on the axis.
    let flat_offset = if range > 0.0 { 0.0 } else { plot_height / 2.0 };

    let points: Vec<(f64, f64)> = records
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let x = PADDING + i as f64 * scale_x;
            let y = HEIGHT - PADDING - flat_offset - (r.amount - min_amount) * scale_y;
            (x, y)
        })
        .collect();

    let line: Vec<String> = points
        .iter()
        .map(|(x, y)| format!("{x:.1},{y:.1}"))
        .collect();
    let baseline = HEIGHT - PADDING;
    let area = format!(
        "{:.1},{baseline:.1} {} {:.1},{baseline:.1}",
        points[0].0,
        line.join(" "),
        points[points.len() - 1].0,
    );

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH:.0}" height="{HEIGHT:.0}" viewBox="0 0 {WIDTH:.0} {HEIGHT:.0}">"#
    ));
    svg.push('\n');
    svg.push_str(&format!(
        r#"  <rect width="{WIDTH:.0}" height="{HEIGHT:.0}" fill="white"/>"#
    ));
    svg.push('\n');
    svg.push_str(&format!(
        r#"  <text x="{:.0}" y="24" text-anchor="middle" font-family="sans-serif" font-size="14">Portfolio Growth Over Trading Days</text>"#,
        WIDTH / 2.0
    ));
    svg.push('\n');
    svg.push_str(&format!(
        r#"  <line x1="{PADDING:.0}" y1="{PADDING:.0}" x2="{PADDING:.0}" y2="{baseline:.0}" stroke="black"/>"#
    ));
    svg.push('\n');
    svg.push_str(&format!(
        r#"  <line x1="{PADDING:.0}" y1="{baseline:.0}" x2="{:.0}" y2="{baseline:.0}" stroke="black"/>"#,
        WIDTH - PADDING
    ));
    svg.push('\n');
    svg.push_str(&format!(
        r#"  <polygon points="{area}" fill="rgba(0,255,0,0.1)" stroke="none"/>"#
    ));
    svg.push('\n');
    svg.push_str(&format!(
        r#"  <polyline points="{}" fill="none" stroke="green" stroke-width="2"/>"#,
        line.join(" ")
    ));
    svg.push('\n');
    for ((x, y), r) in points.iter().zip(records) {
        svg.push_str(&format!(
            r#"  <circle cx="{x:.1}" cy="{y:.1}" r="3" fill="green"><title>Day {}: {:.2}</title></circle>"#,
            r.day, r.amount
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r#"  <text x="{x:.1}" y="{:.1}" text-anchor="middle" font-family="sans-serif" font-size="10">{}</text>"#,
            baseline + 14.0,
            r.day
        ));
        svg.push('\n');
    }
    svg.push_str(&format!(
        r#"  <text x="4" y="{:.1}" font-family="sans-serif" font-size="10">{max_amount:.2}</text>"#,
        PADDING + 4.0
    ));
    svg.push('\n');
    svg.push_str(&format!(
        r#"  <text x="4" y="{baseline:.1}" font-family="sans-serif" font-size="10">{min_amount:.2}</text>"#
    ));
    svg.push('\n');
    svg.push_str("</svg>\n");
    svg
}

impl ReportPort for SvgChartAdapter {
    fn write(&self, estimate: &Estimate, output_path: &Path) -> Result<(), TradeGrowthError> {
        let svg = generate_growth_svg(&estimate.projection.records);
        fs::write(output_path, svg).map_err(|e| TradeGrowthError::Report {
            path: output_path.display().to_string(),
            reason: e.to_string(),
        })?;
        tracing::info!(path = %output_path.display(), "wrote growth chart");
        Ok(())
    }
}
