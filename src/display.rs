//! Console rendering for search results and statistics
//!
//! Every function returns the text to print so the output can be tested
//! without capturing stdout.

use crate::lookup::{Found, LookupOutcome, SearchReport};
use crate::stats::StatisticsReport;

/// Printed when the requested operation cannot run
pub const UNSUPPORTED_OPERATION: &str = "This operation, I support not. May the force be with you!";

/// Printed by `statistics` before any search was made
pub const NO_STATS: &str = "No stats to report";

const NOT_FOUND: &str = "The force is not strong within you";

/// Renders a complete search: the character, then the homeworld if any
pub fn render_search(report: &SearchReport) -> String {
    let mut out = match &report.character {
        LookupOutcome::Found(found) => render_character(found),
        other => render_failure(other, "the character"),
    };

    match &report.homeworld {
        Some(LookupOutcome::Found(found)) => out.push_str(&render_planet(found)),
        Some(other) => out.push_str(&render_failure(other, "planets")),
        None => {}
    }
    out
}

/// Renders a found character
pub fn render_character(found: &Found) -> String {
    let character = found.character();
    let name = if character.name.is_empty() {
        found.key.as_str()
    } else {
        character.name.as_str()
    };

    let lines = [
        format!("Name: {}", name),
        format!("Height: {}", character.height),
        format!("Mass: {}", character.mass),
        format!("Birth Year: {}", character.birth_year),
        String::new(),
        format!("Cache time: {}", found.entry.cached_at),
    ];
    to_text(&lines)
}

/// Renders a found planet as a homeworld section
pub fn render_planet(found: &Found) -> String {
    let planet = found.planet();
    let name = if planet.name.is_empty() {
        found.key.as_str()
    } else {
        planet.name.as_str()
    };

    let mut lines = vec![
        String::new(),
        "Homeworld".to_string(),
        "-------------".to_string(),
        format!("Name: {}", name),
        format!("Population: {}", planet.population),
    ];
    if let Some(comparison) = planet.earth_comparison() {
        lines.push(format!(
            "On {}, 1 year on Earth is {:.2} years and 1 day {:.2} days",
            name, comparison.year_ratio, comparison.day_ratio
        ));
    }
    lines.push(String::new());
    lines.push(format!("Cache time: {}", found.entry.cached_at));
    to_text(&lines)
}

/// Renders a failed lookup of `what`
fn render_failure(outcome: &LookupOutcome, what: &str) -> String {
    match outcome {
        LookupOutcome::ApiError(e) => format!(
            "{}. Cannot get information for {} from the API ({})\n",
            NOT_FOUND, what, e
        ),
        _ => format!("{}\n", NOT_FOUND),
    }
}

/// Renders the statistics report
pub fn render_statistics(report: &StatisticsReport) -> String {
    let mut lines = vec!["* Hours and frequency of searches".to_string()];
    lines.extend(
        report
            .hours
            .iter()
            .map(|h| format!("{}: {} ({:.2}%)", h.hour, h.count, h.percentage)),
    );

    lines.push(String::new());
    lines.push("* Stats related to Characters".to_string());
    lines.extend(
        report
            .characters
            .iter()
            .map(|c| format!("Character {} was searched {} time(s)", c.label, c.count)),
    );

    lines.push(String::new());
    lines.push("* Stats related to Planets".to_string());
    lines.extend(
        report
            .planets
            .iter()
            .map(|p| format!("Planet {} was searched {} time(s)", p.label, p.count)),
    );

    lines.push(String::new());
    lines.push("* Generic Stats".to_string());
    lines.push(format!(
        "We had {}/{} successful searche(s) ({:.2}%)",
        report.successful_searches,
        report.total_searches,
        report.success_ratio() * 100.0
    ));
    to_text(&lines)
}

/// Joins lines, ending the text with a newline
fn to_text(lines: &[String]) -> String {
    let mut text = lines.join("\n");
    text.push('\n');
    text
}
