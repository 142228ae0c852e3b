// src/export/mod.rs

mod excel_date;
mod fs_utils;
mod json_csv;
pub mod logic;
mod model;
mod pdf;
mod pdf_export;
pub mod range;
mod xlsx;

pub use logic::{ExportLogic, ExportRequest};
pub use model::{EntryExport, IncidentExport, TimesheetExport};

use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    Xlsx,
    Pdf,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Pdf => "pdf",
        }
    }
}

/// Which dataset `export` writes.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ExportData {
    Entries,
    Timesheets,
    Incidents,
}

impl ExportData {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportData::Entries => "entries",
            ExportData::Timesheets => "timesheets",
            ExportData::Incidents => "incidents",
        }
    }
}
