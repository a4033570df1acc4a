/*!
Prints diagnostic events to the terminal, colored by severity when the
`color` feature is enabled and the caller hasn't asked for plain output.
*/

use smithy_core::model::diagnostics::{Event, Severity};

#[cfg(feature = "color")]
use colored::Colorize;

/// Print every event, then return `true` if any of them is `ERROR` or
/// worse (the caller uses this to decide the process exit code).
pub fn report_events(events: &[Event], color: bool) -> bool {
    if events.is_empty() {
        println!("No issues found.");
    }
    for event in events {
        if color {
            report_event(event)
        } else {
            report_event_no_color(event)
        }
    }
    events.iter().any(|e| e.severity() >= Severity::Error)
}

fn report_event_no_color(event: &Event) {
    println!("[{}] {}: {}", event.severity(), event.id(), event.message());
    if let Some(shape_id) = event.shape_id() {
        println!("\tat {}", shape_id);
    }
}

#[cfg(not(feature = "color"))]
fn report_event(event: &Event) {
    report_event_no_color(event)
}

#[cfg(feature = "color")]
fn report_event(event: &Event) {
    let label = format!("[{}]", event.severity());
    let label = match event.severity() {
        Severity::Error => label.bright_red(),
        Severity::Danger => label.red(),
        Severity::Warning => label.yellow(),
        Severity::Note => label.normal(),
        Severity::Suppressed => label.dimmed(),
    };
    println!("{} {}: {}", label, event.id().bold(), event.message());
    if let Some(shape_id) = event.shape_id() {
        println!("{}", format!("\tat {}", shape_id).dimmed());
    }
}
