/*!
Rust-native parser and writer for the Smithy IDL textual format (spec
§4.2 step 1, §6.1 "IDL"). [`deferred`] holds the loader's intermediate,
not-yet-resolved representation; [`parser`] turns IDL text into it;
[`writer`] turns a resolved [`smithy_core::model::Model`] back into IDL
text for round-tripping.
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
extern crate pest_derive;

pub mod deferred;
pub mod parser;
pub mod writer;

pub use deferred::ParsedSource;
pub use parser::parse_source;
pub use writer::write_idl;
