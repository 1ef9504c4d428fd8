//! Per-group comparison of a run against its baseline.

use super::labels::{Icons, Label, CELEBRATION_ICON};
use crate::results::{RunRecord, TestGroupResult};

/// One rendered test group.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    /// `<group> (<duration>s)` plus the duration delta, if any.
    pub header: String,
    /// Fields joined with ` | `.
    pub body: String,
    /// Percentage change against the baseline, after rounding.
    pub percentage_change: f64,
}

/// Round to two decimals.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Render one section per group in `target`, in feed order.
pub fn render_sections(target: &RunRecord, previous: Option<&RunRecord>, icons: &Icons) -> Vec<Section> {
    target
        .tests
        .iter()
        .map(|(name, test)| {
            let previous_test = previous.and_then(|run| run.tests.get(name));
            render_group(name, test, previous_test, icons)
        })
        .collect()
}

fn render_group(
    name: &str,
    test: &TestGroupResult,
    previous_test: Option<&TestGroupResult>,
    icons: &Icons,
) -> Section {
    let percentage = test.percentage();
    let previous_percentage = previous_test.map_or(0.0, TestGroupResult::percentage);
    let percentage_change = round2(percentage - previous_percentage);

    let mut fields = Vec::with_capacity(test.results.len() + 1);

    let mut percentage_field = format!("{} {:.2}%", Label::Percentage.icon(icons), percentage);
    if percentage_change != 0.0 {
        percentage_field.push_str(&format!(" ({:+.2})", percentage_change));
    }
    fields.push(percentage_field);

    for (label_name, &value) in &test.results {
        let label = Label::parse(label_name);
        let previous_value = previous_test.and_then(|t| t.count(label_name)).unwrap_or(0);
        let difference = value - previous_value;

        if difference != 0 {
            let icon = if label == Label::Total && difference > 0 {
                CELEBRATION_ICON
            } else {
                label.icon(icons)
            };
            fields.push(format!("{} {} ({:+})", icon, value, difference));
        } else {
            fields.push(format!("{} {}", label.icon(icons), value));
        }
    }

    if let Some(previous_test) = previous_test {
        for (label_name, &previous_value) in &previous_test.results {
            if test.results.contains_key(label_name) {
                continue;
            }
            let label = Label::parse(label_name);
            fields.push(format!("{} 0 (-{})", label.icon(icons), previous_value));
        }
    }

    let mut header = format!("{} ({:.2}s)", name, test.duration);
    let previous_duration = previous_test.map_or(0.0, |t| t.duration);
    if test.duration != previous_duration {
        header.push_str(&format!(" ({:+.2}s)", test.duration - previous_duration));
    }

    Section {
        header,
        body: fields.join(" | "),
        percentage_change,
    }
}
