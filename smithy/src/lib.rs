/*!
Combined crate for the `smithy_*` family, each sub-crate brought in as a
feature. The aim, as with the teacher's own combined crate, is a single
client dependency over a set of crates that each provide one Smithy
capability.

# Features

| Feature name | Default | Individual crate | Target module path | Purpose                                        |
|--------------|---------|-------------------|---------------------|-------------------------------------------------|
| N/A          | **Yes** | `smithy_core`     | `::core`            | Semantic model, shape/trait types, diagnostics.  |
| "idl"        | Yes     | `smithy_idl`      | `::idl`             | Reading and writing the native `.smithy` IDL.    |
| "json"       | Yes     | `smithy_json`     | `::json`            | Reading and writing the JSON AST representation. |
| "assembler"  | Yes     | `smithy_assembler`| `::assembler`       | Merging multiple source files into one model.    |
| "select"     | Yes     | `smithy_select`   | `::select`          | The shape selector sub-language.                 |
| "validate"   | Yes     | `smithy_validate` | `::validate`        | Standard linters and validators.                 |
| "transform"  | Yes     | `smithy_transform`| `::transform`       | Model-to-model build transforms.                 |
| "build"      | Yes     | `smithy_build`    | `::build`           | The build configuration and projection pipeline. |
*/

#![warn(
    future_incompatible,
    nonstandard_style,
    rust_2018_idioms,
    missing_debug_implementations,
    unreachable_pub
)]

pub use smithy_core as core;

#[cfg(feature = "idl")]
pub use smithy_idl as idl;

#[cfg(feature = "json")]
pub use smithy_json as json;

#[cfg(feature = "assembler")]
pub use smithy_assembler as assembler;

#[cfg(feature = "select")]
pub use smithy_select as select;

#[cfg(feature = "validate")]
pub use smithy_validate as validate;

#[cfg(feature = "transform")]
pub use smithy_transform as transform;

#[cfg(feature = "build")]
pub use smithy_build as build;
