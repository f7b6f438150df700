use console::{style, Emoji, Term};
use galaxy_core::{CanvasView, Page, StatusCounts, UseCase};
use galaxy_schema::{
    Activity, Alert, AlertSeverity, AlertStatus, Chart, DataTableRow, Dataset, Report,
    ResponseActions, Severity, Turn,
};

pub static SPARKLE: Emoji<'_, '_> = Emoji("✨ ", "* ");
pub static ARROW: Emoji<'_, '_> = Emoji("➜  ", "-> ");

const BAR_WIDTH: usize = 30;

pub fn print_banner(term: &Term, dataset: Dataset) {
    let _ = term.write_line(&format!(
        "{}{}",
        SPARKLE,
        style("Ask Galaxy AI").bold().cyan()
    ));
    let _ = term.write_line(&format!(
        "Dataset: {}. Type /help for commands, 'quit' to exit.",
        style(dataset).cyan()
    ));
    let _ = term.write_line("---");
}

pub fn print_help(term: &Term) {
    for (cmd, what) in [
        ("/dataset [name]", "show or change the dataset"),
        ("/datasets", "list datasets"),
        ("/usecases [id]", "list use cases or one use case's prompts"),
        ("/prompt <id> <n>", "submit suggested prompt n of a use case"),
        ("/history", "list transcript turns"),
        ("/open <n>", "expand turn n into the canvas"),
        ("/close", "close the canvas"),
        ("quit", "leave the REPL"),
    ] {
        let _ = term.write_line(&format!("  {:<18} {}", style(cmd).green(), what));
    }
}

fn severity_style(severity: Severity, text: String) -> String {
    match severity {
        Severity::Normal => style(text).cyan().to_string(),
        Severity::Warning => style(text).yellow().to_string(),
        Severity::Critical => style(text).red().to_string(),
    }
}

/// Horizontal bars scaled to the largest value across all series.
pub fn chart_lines(chart: &Chart) -> Vec<String> {
    let max = chart
        .series
        .iter()
        .flat_map(|s| s.data.iter().copied())
        .fold(0.0_f64, f64::max);
    let label_width = chart.labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    let mut lines = vec![style(&chart.title).bold().to_string()];
    for series in &chart.series {
        if chart.series.len() > 1 {
            lines.push(format!("  {}", style(&series.label).underlined()));
        }
        for (label, (value, severity)) in chart.labels.iter().zip(series.points()) {
            let len = if max > 0.0 {
                ((value / max) * BAR_WIDTH as f64).round() as usize
            } else {
                0
            };
            lines.push(format!(
                "  {:<width$} {} {}",
                label,
                severity_style(severity, "█".repeat(len.max(1))),
                value,
                width = label_width
            ));
        }
    }
    lines
}

fn table_lines(rows: &[DataTableRow]) -> Vec<String> {
    let mut lines = vec![format!(
        "  {:<12} {:<12} {:<14} {}",
        "TECHNICIAN", "BATCH ID", "MOISTURE (%)", "STATUS"
    )];
    lines.push(format!("  {}", "-".repeat(60)));
    for row in rows {
        lines.push(format!(
            "  {:<12} {:<12} {:<14} {}",
            row.technician, row.batch_id, row.moisture, row.status
        ));
    }
    lines
}

fn actions_line(actions: &ResponseActions) -> Option<String> {
    if actions.is_empty() {
        return None;
    }
    let mut labels = Vec::new();
    if actions.can_add_to_report {
        labels.push("add to report");
    }
    if actions.can_download {
        labels.push("download");
    }
    if actions.can_copy {
        labels.push("copy");
    }
    if actions.can_regenerate {
        labels.push("regenerate");
    }
    Some(format!("[{}]", labels.join(" | ")))
}

/// `number` is the 1-based transcript position shown to the user.
pub fn print_turn(term: &Term, number: usize, turn: &Turn) {
    let _ = term.write_line("");
    let _ = term.write_line(&format!(
        "{} {}",
        style(format!("[{number}] You:")).bold(),
        turn.query.text
    ));
    let _ = term.write_line(&format!("{}", style("Galaxy AI:").bold().cyan()));
    let _ = term.write_line(&turn.response.text);

    if let Some(chart) = &turn.response.chart {
        let _ = term.write_line("");
        for line in chart_lines(chart) {
            let _ = term.write_line(&line);
        }
    }
    if turn.response.canvas.is_some() {
        let _ = term.write_line(&format!(
            "{}canvas available: /open {number}",
            ARROW
        ));
    }
    if let Some(actions) = actions_line(&turn.response.actions) {
        let _ = term.write_line(&style(actions).dim().to_string());
    }
}

pub fn print_canvas(term: &Term, view: &CanvasView) {
    let _ = term.write_line("");
    let _ = term.write_line(&format!(
        "{} {}",
        style(format!("Canvas [{}]", view.position + 1)).dim(),
        style(&view.title).bold().cyan()
    ));
    let _ = term.write_line(&view.description);
    let _ = term.write_line("");
    for line in chart_lines(&view.chart) {
        let _ = term.write_line(&line);
    }
    let _ = term.write_line("");
    let _ = term.write_line(&style("Data Table").bold().to_string());
    for line in table_lines(&view.rows) {
        let _ = term.write_line(&line);
    }
    if let Some(info) = &view.additional_info {
        let _ = term.write_line("");
        let _ = term.write_line(&style(info).dim().to_string());
    }
    let _ = term.write_line("Generated using Galaxy AI");
}

pub fn print_history(term: &Term, turns: &[Turn]) {
    if turns.is_empty() {
        let _ = term.write_line("No turns yet.");
        return;
    }
    let _ = term.write_line(&format!("{:<4} {:<26} {:<16} {}", "#", "INTENT", "DATASET", "QUERY"));
    let _ = term.write_line(&"-".repeat(80));
    for (idx, turn) in turns.iter().enumerate() {
        let _ = term.write_line(&format!(
            "{:<4} {:<26} {:<16} {}",
            idx + 1,
            turn.response.intent,
            turn.query.dataset,
            turn.query.text
        ));
    }
}

pub fn print_datasets(term: &Term, selected: Dataset) {
    for dataset in Dataset::ALL {
        let marker = if dataset == selected { "*" } else { " " };
        let _ = term.write_line(&format!(
            "{marker} {:<16} ({})",
            dataset.label(),
            dataset.slug()
        ));
    }
}

pub fn print_use_cases(term: &Term, use_cases: &[UseCase]) {
    let _ = term.write_line(&format!("{:<12} {:<24} {}", "ID", "NAME", "DESCRIPTION"));
    let _ = term.write_line(&"-".repeat(80));
    for uc in use_cases {
        let _ = term.write_line(&format!("{:<12} {:<24} {}", uc.id, uc.name, uc.description));
    }
}

pub fn print_use_case(term: &Term, use_case: &UseCase) {
    let _ = term.write_line(&format!(
        "{} - {}",
        style(use_case.name).bold(),
        use_case.description
    ));
    for (idx, prompt) in use_case.suggested_prompts.iter().enumerate() {
        let _ = term.write_line(&format!("  {}. {prompt}", idx + 1));
    }
}

/// Status tabs with badge counts; the active tab is highlighted.
pub fn status_tabs_line(counts: &StatusCounts, active: Option<AlertStatus>) -> String {
    let tabs: Vec<(Option<AlertStatus>, &str)> = std::iter::once((None, "All"))
        .chain(AlertStatus::ALL.iter().map(|s| (Some(*s), s.label())))
        .collect();
    tabs.into_iter()
        .map(|(status, label)| {
            let tab = format!("{label} ({})", counts.get(status));
            if status == active {
                style(tab).bold().underlined().to_string()
            } else {
                tab
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

fn alert_severity_style(severity: AlertSeverity) -> String {
    let text = format!("{severity:<8}");
    match severity {
        AlertSeverity::Critical => style(text).red().to_string(),
        AlertSeverity::Medium => style(text).yellow().to_string(),
        AlertSeverity::Info => style(text).blue().to_string(),
    }
}

pub fn print_alerts(
    term: &Term,
    counts: &StatusCounts,
    active: Option<AlertStatus>,
    alerts: &[&Alert],
) {
    let _ = term.write_line(&status_tabs_line(counts, active));
    let _ = term.write_line("");
    if alerts.is_empty() {
        let _ = term.write_line("No alerts match.");
        return;
    }
    for alert in alerts {
        let _ = term.write_line(&format!(
            "{:<3} {} {:<11} {:<12} {}",
            alert.id,
            alert_severity_style(alert.severity),
            alert.status,
            alert.source,
            style(&alert.title).bold()
        ));
        let _ = term.write_line(&format!("    {} | {}", alert.category, alert.description));
        let _ = term.write_line(&style(format!(
            "    {} {}",
            alert.source_document.kind, alert.source_document.reference
        ))
        .dim()
        .to_string());
    }
}

pub fn print_activity_page(term: &Term, page: &Page<&Activity>) {
    let _ = term.write_line(&format!(
        "{:<20} {:<18} {:<10} {}",
        "TIMESTAMP", "ACTION", "CATEGORY", "DESCRIPTION"
    ));
    let _ = term.write_line(&"-".repeat(80));
    for activity in &page.items {
        let _ = term.write_line(&format!(
            "{:<20} {:<18} {:<10} {}",
            activity.timestamp, activity.action, activity.category, activity.description
        ));
    }
    let _ = term.write_line(&format!(
        "Page {} of {} ({} entries)",
        page.number, page.total_pages, page.total_items
    ));
}

pub fn print_reports(term: &Term, reports: &[&Report]) {
    if reports.is_empty() {
        let _ = term.write_line("No reports match.");
        return;
    }
    for report in reports {
        let _ = term.write_line(&format!(
            "{:<3} {} {}",
            report.id,
            style(&report.title).bold(),
            style(format!("[{}]", report.source)).dim()
        ));
        let _ = term.write_line(&format!(
            "    {} - {} - {} - {}",
            report.author,
            report.time_ago,
            report.file_name,
            report.tags.join(", ")
        ));
    }
}
