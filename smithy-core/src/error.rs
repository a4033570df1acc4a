/*!
Standard `Error`, `ErrorKind`, and `Result` types.

These are used for genuine, caller-facing failures: malformed API calls,
I/O failures, and programming errors. Structural or semantic findings
about a *model* (unresolved shapes, mixin cycles, trait applicability
failures, and so on) are never represented as `Error`; they are
accumulated as [`crate::model::diagnostics::Event`]s so that a loader or
validator can report many findings from a single run instead of aborting
on the first one.
*/

#![allow(missing_docs)]

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

error_chain! {
    errors {
        #[doc("Invalid shape ID format")]
        InvalidShapeID(id: String) {
            description("Invalid shape ID format")
            display("Invalid shape ID format: '{}'", id)
        }
        #[doc("Expected an absolute shape ID")]
        AbsoluteShapeIDExpected(id: String) {
            description("Expected an absolute shape ID")
            display("Expected an absolute shape ID: '{}'", id)
        }
        #[doc("Expected a shape, not member, ID")]
        ShapeIDExpected(id: String) {
            description("Expected a shape, not member, ID")
            display("Expected a shape, not member, ID: '{}'", id)
        }
        #[doc("Expected a member, not shape, ID")]
        MemberIDExpected(id: String) {
            description("Expected a member, not shape, ID")
            display("Expected a member, not shape, ID: '{}'", id)
        }
        #[doc("Invalid shape kind variant")]
        InvalidShapeVariant(expecting: String) {
            description("Invalid shape kind variant")
            display("Invalid shape kind variant, expecting a `ShapeKind::{}`", expecting)
        }
        #[doc("Invalid node value variant")]
        InvalidNodeVariant(expecting: String) {
            description("Invalid node value variant")
            display("Invalid node value variant, expecting a `Node::{}`", expecting)
        }
        #[doc("A node value could not be parsed as a number")]
        InvalidNumber(text: String) {
            description("A node value could not be parsed as a number")
            display("Could not parse '{}' as an arbitrary precision number", text)
        }
        #[doc("Requested action is not supported by the selected representation")]
        InvalidRepresentation(repr: String) {
            description("Requested action is not supported by the selected representation")
            display("Requested action is not supported by the selected representation '{}'", repr)
        }
        #[doc("An error occurred serializing a model")]
        Serialization(repr: String) {
            description("An error occurred serializing a model")
            display("An error occurred serializing a model into {}", repr)
        }
        #[doc("An error occurred de-serializing a model")]
        Deserialization(representation: String, location: String, context: Option<String>) {
            description("An error occurred de-serializing a model")
            display("An error occurred de-serializing a model from {} at location '{}' (context '{:?}')", representation, location, context)
        }
        #[doc("A selector expression could not be parsed")]
        SelectorParse(reason: String) {
            description("A selector expression could not be parsed")
            display("Selector parse error: {}", reason)
        }
        #[doc("A selector expression used an unknown function")]
        SelectorUnknownFunction(name: String) {
            description("A selector expression used an unknown function")
            display("Selector used an unknown function: '{}'", name)
        }
        #[doc("A build configuration was malformed")]
        BuildConfig(reason: String) {
            description("A build configuration was malformed")
            display("Invalid build configuration: {}", reason)
        }
        #[doc("A file manifest path escaped its base directory")]
        ManifestPathEscape(path: String) {
            description("A file manifest path escaped its base directory")
            display("Path '{}' is not contained within the manifest's base directory", path)
        }
        #[doc("A projection cycle was detected")]
        ProjectionCycle(name: String) {
            description("A projection cycle was detected")
            display("Projection cycle detected re-entering projection '{}'", name)
        }
    }

    foreign_links {
        Fmt(::std::fmt::Error);
        Io(::std::io::Error);
    }
}
