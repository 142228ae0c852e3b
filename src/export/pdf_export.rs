// src/export/pdf_export.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::{ExportRow, rows_to_table};
use crate::export::notify_export_success;
use crate::export::pdf::{PdfManager, TableDoc};
use crate::ui::messages::info;
use chrono::{DateTime, Utc};
use std::path::Path;

/// Tables with more columns than this are printed in landscape.
const PORTRAIT_MAX_COLUMNS: usize = 6;

pub(crate) fn export_pdf<R: ExportRow>(
    rows: &[R],
    path: &Path,
    title: &str,
    subtitle: Option<&str>,
    generated_at: DateTime<Utc>,
) -> AppResult<()> {
    info(format!("Exporting to PDF: {}", path.display()));

    let table = rows_to_table(rows);
    let footer = format!(
        "{} rows - generated {} UTC",
        rows.len(),
        generated_at.format("%Y-%m-%d %H:%M")
    );

    let mut pdf = PdfManager::new(R::HEADERS.len() > PORTRAIT_MAX_COLUMNS);
    pdf.write_table(&TableDoc {
        title,
        subtitle,
        headers: R::HEADERS,
        rows: &table,
        numeric: R::numeric_columns(),
        footer: &footer,
    });

    pdf.save(path)
        .map_err(|e| AppError::Export(format!("PDF export error: {e}")))?;

    notify_export_success("PDF", path);
    Ok(())
}
