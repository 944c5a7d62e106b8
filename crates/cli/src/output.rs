//! Human and JSON rendering of command results

use capacal_core::MonthView;
use capacal_domain::{Consultant, DayStatus, Project};
use comfy_table::{Cell, Color, ContentArrangement, Table};

/// Month view as a table (or pretty JSON)
pub fn format_month(view: &MonthView, json: bool) -> String {
    if json {
        return serde_json::to_string_pretty(view).unwrap_or_else(|_| "{}".to_string());
    }

    if view.days.is_empty() {
        return format!("No business days in {}-{:02}.", view.year, view.month);
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Date").fg(Color::Cyan),
        Cell::new("Day").fg(Color::Cyan),
        Cell::new("Capacity").fg(Color::Cyan),
        Cell::new("Booked").fg(Color::Cyan),
        Cell::new("Available").fg(Color::Cyan),
        Cell::new("Status").fg(Color::Cyan),
    ]);

    for entry in &view.days {
        let day = &entry.allocation;
        let status = match entry.status {
            DayStatus::Open => Cell::new("open").fg(Color::Green),
            DayStatus::Tight => Cell::new("tight").fg(Color::Red),
        };
        table.add_row(vec![
            Cell::new(day.date.format("%Y-%m-%d")),
            Cell::new(day.date.format("%a")),
            Cell::new(hours(day.capacity)),
            Cell::new(hours(day.booked)),
            Cell::new(hours(day.available)),
            status,
        ]);
    }

    let open = view.days.iter().filter(|entry| entry.status == DayStatus::Open).count();
    format!(
        "{table}\n{open} of {} business days open (threshold {}h, {} retainer hours/month)",
        view.days.len(),
        hours(view.threshold_hours),
        hours(view.board.retainer_hours()),
    )
}

pub fn format_consultants(consultants: &[Consultant], default_hours: f64, json: bool) -> String {
    if json {
        return serde_json::to_string_pretty(consultants).unwrap_or_else(|_| "[]".to_string());
    }

    if consultants.is_empty() {
        return "No consultants found.".to_string();
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("ID").fg(Color::Cyan),
        Cell::new("Name").fg(Color::Cyan),
        Cell::new("Hours/day").fg(Color::Cyan),
    ]);
    for consultant in consultants {
        let daily = match consultant.hours_per_day {
            Some(_) => hours(consultant.daily_hours(default_hours)),
            None => format!("{} (default)", hours(default_hours)),
        };
        table.add_row(vec![consultant.id.clone(), consultant.name.clone(), daily]);
    }
    table.to_string()
}

pub fn format_projects(projects: &[Project], json: bool) -> String {
    if json {
        return serde_json::to_string_pretty(projects).unwrap_or_else(|_| "[]".to_string());
    }

    if projects.is_empty() {
        return "No projects found.".to_string();
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("ID").fg(Color::Cyan),
        Cell::new("Project").fg(Color::Cyan),
        Cell::new("Type").fg(Color::Cyan),
        Cell::new("Budget").fg(Color::Cyan),
        Cell::new("Start").fg(Color::Cyan),
        Cell::new("End").fg(Color::Cyan),
    ]);
    for project in projects {
        let date = |d: Option<chrono::NaiveDate>| {
            d.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_else(|| "-".to_string())
        };
        table.add_row(vec![
            project.id.clone(),
            project.display_name(),
            project.project_type.to_string(),
            hours(project.effective_budget()),
            date(project.start_date),
            date(project.end_date),
        ]);
    }
    table.to_string()
}

/// Hours rounded to one decimal, without a trailing `.0`
fn hours(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.1}")
    }
}
