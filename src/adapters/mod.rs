//! Concrete adapter implementations for ports, plus terminal rendering.

pub mod console_report;
pub mod csv_report_adapter;
pub mod file_config_adapter;
pub mod svg_chart_adapter;
