// src/export/logic.rs

use crate::core::logic::Core;
use crate::db::incidents::list_incidents;
use crate::db::log::{AuditOp, ttlog};
use crate::db::pool::DbPool;
use crate::db::queries::load_tenant_entries;
use crate::db::tenants::list_staff;
use crate::db::timesheets::list_timesheets;
use crate::errors::AppResult;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{EntryExport, ExportRow, IncidentExport, TimesheetExport};
use crate::export::pdf_export::export_pdf;
use crate::export::range::{describe_range, range_bounds};
use crate::export::xlsx::export_xlsx;
use crate::export::{ExportData, ExportFormat};
use crate::models::tenant::Tenant;
use crate::ui::messages::warning;
use crate::utils::path::absolute_output_path;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Everything `export` needs besides the database.
pub struct ExportRequest<'a> {
    pub format: ExportFormat,
    pub data: ExportData,
    pub file: &'a str,
    pub range: Option<&'a str>,
    pub force: bool,
    pub now: DateTime<Utc>,
}

pub struct ExportLogic;

impl ExportLogic {
    /// Write the selected dataset of `tenant` to `req.file`.
    ///
    /// `range` filters on clock-in (entries), period start (timesheets) or
    /// occurrence (incidents); `None` or `all` exports everything.
    /// Returns the written path, or `None` when there was nothing to export.
    pub fn export(
        pool: &mut DbPool,
        tenant: &Tenant,
        req: &ExportRequest<'_>,
    ) -> AppResult<Option<PathBuf>> {
        let path = absolute_output_path(req.file)?;
        let bounds = range_bounds(req.range)?;
        ensure_writable(&path, req.force)?;

        let conn = &pool.conn;
        let codes: HashMap<i64, String> = list_staff(conn, tenant.id)?
            .into_iter()
            .map(|s| (s.id, s.code))
            .collect();
        let code_of = |id: i64| codes.get(&id).cloned().unwrap_or_default();

        let subtitle = describe_range(req.range);
        let subtitle = subtitle.as_deref();
        let count = match req.data {
            ExportData::Entries => {
                let rows: Vec<EntryExport> = load_tenant_entries(conn, tenant.id, bounds)?
                    .iter()
                    .map(|e| {
                        EntryExport::from_line(&Core::entry_line(e, req.now), &code_of(e.staff_id))
                    })
                    .collect();
                let title = format!("Time entries - {}", tenant.name);
                write_rows(&rows, &path, req, &title, subtitle)?
            }
            ExportData::Timesheets => {
                let rows: Vec<TimesheetExport> =
                    list_timesheets(conn, tenant.id, None, None, bounds)?
                        .iter()
                        .map(|t| TimesheetExport::from_timesheet(t, &code_of(t.staff_id)))
                        .collect();
                let title = format!("Timesheets - {}", tenant.name);
                write_rows(&rows, &path, req, &title, subtitle)?
            }
            ExportData::Incidents => {
                let rows: Vec<IncidentExport> = list_incidents(conn, tenant.id, false, bounds)?
                    .iter()
                    .map(IncidentExport::from)
                    .collect();
                let title = format!("Incidents - {}", tenant.name);
                write_rows(&rows, &path, req, &title, subtitle)?
            }
        };

        if count == 0 {
            warning(format!("No {} found for the selected range.", req.data.as_str()));
            return Ok(None);
        }

        ttlog(
            &pool.conn,
            &req.now,
            AuditOp::Export,
            &path.to_string_lossy(),
            &format!("{} {} exported as {}", count, req.data.as_str(), req.format.as_str()),
        )?;

        Ok(Some(path))
    }
}

/// Dispatch on format; returns the number of rows written (0 = nothing written).
fn write_rows<R: ExportRow>(
    rows: &[R],
    path: &Path,
    req: &ExportRequest<'_>,
    title: &str,
    subtitle: Option<&str>,
) -> AppResult<usize> {
    if rows.is_empty() {
        return Ok(0);
    }

    match req.format {
        ExportFormat::Csv => export_csv(rows, path)?,
        ExportFormat::Json => export_json(rows, path)?,
        ExportFormat::Xlsx => export_xlsx(rows, path, req.data.as_str())?,
        ExportFormat::Pdf => export_pdf(rows, path, title, subtitle, req.now)?,
    }
    Ok(rows.len())
}
