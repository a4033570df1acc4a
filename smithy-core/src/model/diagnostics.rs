/*!
Diagnostic events.

Loading, validation, transformation, and the build pipeline never throw
for structural or semantic findings about a model: they accumulate
[`Event`]s instead, so that a single run reports every finding rather
than aborting on the first.
*/

use crate::identity::ShapeID;
use crate::node::SourceLocation;
use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

/// The severity of a diagnostic event, ordered from least to most severe
/// for suppression comparisons (`ERROR` cannot be suppressed below `DANGER`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Suppressed,
    Note,
    Warning,
    Danger,
    Error,
}

/// A single diagnostic finding, stable-ID'd so that suppressions can
/// target granular behavior: hierarchical IDs of the form
/// `<Category>.<Specifier>`.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    id: String,
    severity: Severity,
    shape_id: Option<ShapeID>,
    source_location: SourceLocation,
    message: String,
    hint: Option<String>,
}

// ------------------------------------------------------------------------------------------------
// Implementations
// ------------------------------------------------------------------------------------------------

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Severity::Suppressed => "SUPPRESSED",
                Severity::Note => "NOTE",
                Severity::Warning => "WARNING",
                Severity::Danger => "DANGER",
                Severity::Error => "ERROR",
            }
        )
    }
}

impl Event {
    /// Construct a new event.
    pub fn new(id: impl Into<String>, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            severity,
            shape_id: None,
            source_location: SourceLocation::none(),
            message: message.into(),
            hint: None,
        }
    }

    /// Attach the shape this event concerns.
    pub fn with_shape(mut self, shape_id: ShapeID) -> Self {
        self.shape_id = Some(shape_id);
        self
    }

    /// Attach a source location.
    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.source_location = location;
        self
    }

    /// Attach a remediation hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Convenience: a fatal `ERROR` event.
    pub fn error(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(id, Severity::Error, message)
    }

    /// Convenience: a `WARNING` event.
    pub fn warning(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(id, Severity::Warning, message)
    }

    /// Convenience: a `NOTE` event.
    pub fn note(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(id, Severity::Note, message)
    }

    /// The event's stable identifier (e.g. `"Model.UnresolvedTarget"`).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The event's severity.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// The shape this event concerns, if any.
    pub fn shape_id(&self) -> Option<&ShapeID> {
        self.shape_id.as_ref()
    }

    /// This event's source location.
    pub fn source_location(&self) -> &SourceLocation {
        &self.source_location
    }

    /// The human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// An optional remediation hint.
    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    /// `true` if a suppression entry with prefix `prefix` applies to this
    /// event's ID.
    pub fn id_matches_prefix(&self, prefix: &str) -> bool {
        self.id == prefix || self.id.starts_with(&format!("{}.", prefix))
    }

    /// Downgrade this event to `SUPPRESSED`, unless it is an `ERROR`
    /// (errors can only be suppressed down to `DANGER`, never fully).
    pub fn suppress(&mut self) {
        self.severity = if self.severity == Severity::Error {
            Severity::Danger
        } else {
            Severity::Suppressed
        };
    }
}

/// Diagnostic ordering: severity (most severe first), then source
/// location.
impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Eq for Event {}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .severity
            .cmp(&self.severity)
            .then_with(|| {
                let a = &self.source_location;
                let b = &other.source_location;
                a.file.cmp(&b.file).then(a.line.cmp(&b.line)).then(a.column.cmp(&b.column))
            })
            .then_with(|| self.id.cmp(&other.id))
    }
}

/// Sort `events` by severity (errors first) then source location, the
/// deterministic order required before presenting results to a caller.
pub fn sort_events(events: &mut [Event]) {
    events.sort();
}
