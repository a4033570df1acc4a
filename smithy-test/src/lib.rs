/*!
Shared test fixtures and assertion helpers for the `smithy-*` crates'
test suites: complete example models (see [`examples`]) plus small
helpers for assembling IDL text and asserting on the resulting
diagnostic events, used in place of unwrapping by hand in every
downstream crate's tests.
*/

#![warn(
    future_incompatible,
    nonstandard_style,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications
)]

pub mod examples;

use smithy_assembler::Assembler;
use smithy_core::model::diagnostics::{Event, Severity};
use smithy_core::model::Model;

/// Assembles a single block of IDL text and panics with the full event
/// list (via [`pretty_assertions::assert_eq`], for a readable diff
/// against an empty list) if assembly produced any `WARNING` or above.
pub fn assemble_clean(idl: &str) -> Model {
    let mut assembler = Assembler::default();
    assembler.add_idl(idl, None).expect("idl should parse");
    let (model, events) = assembler.assemble().expect("assembly should not error");
    assert_no_errors(&events);
    model
}

/// Assembles a single block of IDL text without panicking, returning
/// the model and its full diagnostic event list for the caller to
/// inspect directly.
pub fn assemble(idl: &str) -> (Model, Vec<Event>) {
    let mut assembler = Assembler::default();
    assembler.add_idl(idl, None).expect("idl should parse");
    assembler.assemble().expect("assembly should not error")
}

/// Panics, with a readable diff of the offending events against an
/// empty list, if any event is `WARNING` severity or above.
pub fn assert_no_errors(events: &[Event]) {
    let offending: Vec<&Event> = events.iter().filter(|e| e.severity() >= Severity::Warning).collect();
    pretty_assertions::assert_eq!(offending, Vec::<&Event>::new(), "unexpected diagnostic events");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::examples::{MESSAGE_OF_THE_DAY_IDL, WEATHER_IDL};

    #[test]
    fn weather_example_assembles_clean() {
        let model = assemble_clean(WEATHER_IDL);
        assert!(model.shape(&"example.weather#Weather".parse().unwrap()).is_some());
    }

    #[test]
    fn message_of_the_day_example_assembles_clean() {
        let model = assemble_clean(MESSAGE_OF_THE_DAY_IDL);
        assert!(model.shape(&"example.motd#MessageOfTheDay".parse().unwrap()).is_some());
    }
}
