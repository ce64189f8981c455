//! Formatting for run reports, summaries and scenario listings.

use super::messages::paint;
use console::Term;
use owo_colors::Style;
use pagecheck_browser::{RunReport, Scenario};
use std::time::Duration;

/// Format duration in human-readable format.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use pagecheck_cli::ui::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{total_ms}ms")
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

fn rule() -> String {
    let width = usize::from(Term::stderr().size().1);
    "─".repeat(width.clamp(20, 80))
}

/// Print the checkpoints, artifacts and failure of one run to stderr.
pub fn print_report(report: &RunReport, elapsed: Duration) {
    let title = format!("Scenario {}", report.scenario);
    eprintln!("\n{}", paint(&title, Style::new().bold().underline()));
    eprintln!("{}", rule());

    for checkpoint in &report.checkpoints {
        let mark = if checkpoint.passed {
            paint("✓", Style::new().green())
        } else {
            paint("✗", Style::new().red().bold())
        };
        eprintln!(
            "  {mark} {:>2}. {} {}",
            checkpoint.index,
            checkpoint.step,
            paint(
                &format!("({})", format_duration(checkpoint.elapsed)),
                Style::new().dimmed()
            )
        );
    }

    for artifact in &report.artifacts {
        eprintln!(
            "  {} {}",
            paint("▸", Style::new().blue()),
            artifact.path.display()
        );
    }

    let errors = report.console.iter().filter(|m| m.level.is_error()).count();
    if errors > 0 {
        eprintln!(
            "  {} {errors} browser console error(s)",
            paint("⚠", Style::new().yellow())
        );
    }

    eprintln!("{}", rule());

    match &report.failure {
        None => eprintln!(
            "  {} {}/{} steps in {}",
            paint("Passed:", Style::new().green().bold()),
            report.passed_count(),
            report.checkpoints.len(),
            format_duration(elapsed)
        ),
        Some(failure) => eprintln!(
            "  {} [{}] {failure}",
            paint("Failed:", Style::new().red().bold()),
            failure.kind()
        ),
    }
}

/// Print one line per scenario run to stderr.
pub fn print_summary(reports: &[RunReport]) {
    if reports.len() < 2 {
        return;
    }
    eprintln!();
    for report in reports {
        let mark = if report.passed() {
            paint("✓", Style::new().green())
        } else {
            paint("✗", Style::new().red().bold())
        };
        eprintln!(
            "  {mark} {} ({}/{})",
            report.scenario,
            report.passed_count(),
            report.checkpoints.len()
        );
    }
}

/// Render scenarios for `pagecheck list`.
pub fn render_scenarios(scenarios: &[Scenario], steps: bool) -> String {
    let width = scenarios.iter().map(|s| s.name.len()).max().unwrap_or(0);
    let mut out = String::new();

    for scenario in scenarios {
        out.push_str(&format!(
            "{:<width$}  {} ({} steps)\n",
            scenario.name,
            scenario.description,
            scenario.steps.len()
        ));
        if steps {
            for (index, step) in scenario.steps.iter().enumerate() {
                out.push_str(&format!("    {:>2}. {step}\n", index + 1));
            }
        }
    }

    out
}

/// Print scenarios to stdout.
pub fn print_scenarios(scenarios: &[Scenario], steps: bool) {
    print!("{}", render_scenarios(scenarios, steps));
}
