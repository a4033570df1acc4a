/*!
Built-in validators: pure functions over a [`Model`] that accumulate
[`Event`]s rather than raising exceptions, the same diagnostics
discipline `smithy-idl`/`smithy-json`/`smithy-assembler` use while
loading. [`ValidatorRegistry::standard`] builds the default set and
applies `@suppress`/`metadata.suppressions` downgrades before handing
events back to the caller.
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

#[macro_use]
extern crate log;

mod suppress;
mod validators;

pub use validators::{
    DefaultRequiredValidator, EnumValueValidator, HttpBindingValidator, PaginationValidator,
    ServiceClosureValidator, ShapeKindConstraintsValidator, TargetResolutionValidator,
};

use smithy_core::model::diagnostics::{sort_events, Event};
use smithy_core::model::Model;

/// A single named check over a model.
pub trait Validator {
    /// A stable label identifying this validator in logs and `--help` output.
    fn label(&self) -> &'static str;

    /// Run the check, returning every finding (may be empty).
    fn validate(&self, model: &Model) -> Vec<Event>;
}

/// An ordered collection of validators run together, with suppression
/// applied to the combined event list before it's returned.
#[derive(Default)]
pub struct ValidatorRegistry {
    validators: Vec<Box<dyn Validator>>,
}

impl ValidatorRegistry {
    /// An empty registry; add validators with [`ValidatorRegistry::register`].
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in validator set run by `smithy build` and `smithy validate`.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(TargetResolutionValidator));
        registry.register(Box::new(ShapeKindConstraintsValidator));
        registry.register(Box::new(HttpBindingValidator));
        registry.register(Box::new(ServiceClosureValidator));
        registry.register(Box::new(PaginationValidator));
        registry.register(Box::new(EnumValueValidator));
        registry.register(Box::new(DefaultRequiredValidator));
        registry
    }

    /// Add a validator to the end of the run order.
    pub fn register(&mut self, validator: Box<dyn Validator>) {
        self.validators.push(validator);
    }

    /// Run every registered validator, apply suppressions, and return
    /// the combined events sorted by severity then source location.
    pub fn validate(&self, model: &Model) -> Vec<Event> {
        let mut events: Vec<Event> = Vec::new();
        for validator in &self.validators {
            let mut found = validator.validate(model);
            debug!("{}: {} event(s)", validator.label(), found.len());
            events.append(&mut found);
        }
        suppress::apply_suppressions(model, &mut events);
        sort_events(&mut events);
        events
    }
}
