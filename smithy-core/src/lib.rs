/*!
This crate provides the core semantic model for the Smithy Interface
Definition Language: the [`node`] tree, [`identity::ShapeID`]s,
[`traits::Trait`]s, [`model::shape::Shape`]s, and the [`model::Model`]
that aggregates them.

This is the foundation the rest of the `smithy-*` crates build on:

* [`smithy_idl`] and [`smithy_json`] parse/serialize the textual and AST
  representations into this model.
* [`smithy_assembler`] merges multiple sources into one `Model`.
* [`smithy_validate`] runs structural/semantic checks over a `Model`.
* [`smithy_select`] queries a `Model` with the selector sub-language.
* [`smithy_transform`] rewrites a `Model` into a new one.
* [`smithy_build`] orchestrates all of the above into a build pipeline.

## Ownership and cycles

Shapes reference other shapes only by [`identity::ShapeID`], never by
pointer. A `Model` exclusively owns its shapes. This means cyclic model
graphs (recursive lists, mutually recursive structures) need no special
handling at the Rust level — they're just graph edges resolved by index
lookup, with traversal using a visited set where needed. See
[`model::Model::closure`].
*/

#![warn(
    future_incompatible,
    nonstandard_style,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications
)]

#[macro_use]
extern crate error_chain;

#[macro_use]
extern crate lazy_static;

pub mod error;

pub mod identity;

pub mod model;

pub mod node;

pub mod prelude;

pub mod traits;

pub mod visitor;
