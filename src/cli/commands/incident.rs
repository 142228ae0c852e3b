use crate::cli::parser::Commands;
use crate::context::AppContext;
use crate::core::incident::{IncidentLogic, NewIncident};
use crate::db::incidents::list_incidents;
use crate::errors::AppResult;
use crate::models::incident::{IncidentStatus, Severity};
use crate::ui::messages::{header, info, success, warning};
use crate::utils::colors::{RESET, color_for_severity};
use crate::utils::table::{Column, Table};
use crate::utils::time::{parse_optional_timestamp, short};

const DESCRIPTION_WIDTH: usize = 76;

pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    if let Commands::Incident {
        add,
        description,
        severity,
        phi,
        affected,
        reporter,
        at,
        list,
        open,
        update,
        status,
    } = cmd
    {
        let mut pool = ctx.open_pool()?;
        let tenant = ctx.tenant(&pool)?;
        let now = ctx.now();

        if let Some(title) = add {
            let input = NewIncident {
                title,
                description,
                severity: severity.parse::<Severity>()?,
                phi_involved: *phi,
                affected_records: *affected,
                reporter: reporter.as_deref(),
                occurred_at: parse_optional_timestamp(at.as_ref())?.unwrap_or(now),
            };
            let incident = IncidentLogic::report(&mut pool, &tenant, input, now)?;

            success(format!(
                "Incident #{} recorded [{}] {}",
                incident.id, incident.severity, incident.title
            ));
            if let Some(deadline) = incident.notification_deadline() {
                warning(format!(
                    "PHI involved: breach notification due by {}",
                    short(&deadline)
                ));
            }
        }

        if let (Some(id), Some(status)) = (update, status) {
            let next = status.parse::<IncidentStatus>()?;
            let incident = IncidentLogic::set_status(&mut pool, &tenant, *id, next, now)?;
            success(format!("Incident #{} is now {}", incident.id, incident.status));
        }

        if *list {
            let incidents = list_incidents(&pool.conn, tenant.id, *open, None)?;
            header(format!("Incidents of {}", tenant.name));
            if incidents.is_empty() {
                info("No incidents recorded.");
                return Ok(());
            }

            let mut table = Table::new(
                vec![
                    Column::right("ID"),
                    Column::left("SEVERITY"),
                    Column::left("STATUS"),
                    Column::left("PHI"),
                    Column::right("RECORDS"),
                    Column::left("OCCURRED"),
                    Column::left("NOTIFY BY"),
                    Column::left("TITLE"),
                ],
                ctx.cfg.separator(),
            );

            for inc in &incidents {
                let deadline = match inc.notification_deadline() {
                    Some(d) if inc.is_overdue(now) => format!("{} OVERDUE", d.format("%Y-%m-%d")),
                    Some(d) => d.format("%Y-%m-%d").to_string(),
                    None => "-".to_string(),
                };
                table.add_row(vec![
                    inc.id.to_string(),
                    inc.severity.to_string(),
                    inc.status.to_string(),
                    if inc.phi_involved { "yes" } else { "no" }.to_string(),
                    inc.affected_records.to_string(),
                    short(&inc.occurred_at),
                    deadline,
                    inc.title.clone(),
                ]);
            }
            print!("{}", table.render());

            for inc in incidents.iter().filter(|i| !i.description.is_empty()) {
                println!(
                    "\n{}#{} {}{}",
                    color_for_severity(inc.severity),
                    inc.id,
                    inc.title,
                    RESET
                );
                let wrapped = textwrap::fill(&inc.description, DESCRIPTION_WIDTH);
                println!("{}", textwrap::indent(&wrapped, "    "));
            }

            let overdue = incidents.iter().filter(|i| i.is_overdue(now)).count();
            if overdue > 0 {
                warning(format!("{} PHI incident(s) past the notification deadline", overdue));
            }
        }
    }

    Ok(())
}
