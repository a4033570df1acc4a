/*!
`Read`/`Write`-based wrappers around [`crate::reader::read_model`] and
[`crate::writer::write_model`], mirroring the reader/writer split used
throughout the `smithy-*` crates for stream-oriented callers (e.g. the
build pipeline's file manifest).
*/

use crate::ModelResult;
use smithy_core::error::ErrorKind;
use smithy_core::model::diagnostics::Event;
use smithy_core::model::Model;
use smithy_core::traits::TraitFactoryRegistry;
use std::io::{Read, Write};

/// Reads a JSON AST document from any `Read` source.
#[derive(Debug, Default)]
pub struct JsonReader {
    registry: TraitFactoryRegistry,
}

/// Writes a `Model` as a JSON AST document to any `Write` sink.
#[derive(Debug, Default)]
pub struct JsonWriter;

impl JsonReader {
    /// Use `registry` to construct trait values while reading.
    pub fn with_registry(registry: TraitFactoryRegistry) -> Self {
        Self { registry }
    }

    /// Read a complete model, along with any `TRAIT_CONSTRUCTION_FAILED`
    /// or `INVALID_SHAPE` diagnostics encountered along the way.
    pub fn read(&self, r: &mut impl Read) -> ModelResult<(Model, Vec<Event>)> {
        let mut text = String::new();
        r.read_to_string(&mut text)
            .map_err(|e| ErrorKind::Deserialization("JSON AST".to_string(), "<stream>".to_string(), Some(e.to_string())))?;
        crate::reader::read_model(&text, &self.registry)
    }
}

impl JsonWriter {
    /// Write `model` as pretty-printed JSON AST.
    pub fn write(&self, w: &mut impl Write, model: &Model) -> ModelResult<()> {
        let text = crate::writer::write_model(model);
        w.write_all(text.as_bytes())
            .map_err(|_| ErrorKind::Serialization("JSON AST".to_string()).into())
    }
}
