/*!
File discovery and source assembly: finds `.smithy` and JSON AST model
files across a set of queued paths (plus any paths named in the
`SMITHY_PATH` environment variable), parses each into the representation
[`resolve::resolve`] consumes, and merges everything into a single
resolved [`smithy_core::model::Model`].

# Example

```no_run
use smithy_assembler::Assembler;
use std::path::Path;

let mut assembler = Assembler::default();
assembler.push(Path::new("model"));
let (model, events) = assembler.assemble().unwrap();
assert!(events.is_empty());
```
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

pub mod mixins;
pub mod resolve;

use smithy_core::error::{ErrorKind, Result};
use smithy_core::model::diagnostics::Event;
use smithy_core::model::Model;
use smithy_core::prelude::prelude_trait_factories;
use smithy_core::traits::TraitFactoryRegistry;
use smithy_idl::deferred::ParsedSource;
use std::collections::HashSet;
use std::env;
use std::fs::{read_dir, read_to_string};
use std::path::{Path, PathBuf};

pub use resolve::resolve;

/// Name of the environment variable searched for extra model paths.
pub const ENV_PATH_NAME: &str = "SMITHY_PATH";

/// Collects file paths, parsed IDL sources, and already-resolved JSON
/// models, then merges them all into one `Model` via [`Assembler::assemble`].
pub struct Assembler {
    registry: TraitFactoryRegistry,
    paths: HashSet<PathBuf>,
    sources: Vec<ParsedSource>,
    json_models: Vec<Model>,
}

impl Default for Assembler {
    fn default() -> Self {
        Self::with_registry(prelude_trait_factories())
    }
}

impl Assembler {
    /// Construct an assembler that uses `registry` to build trait values,
    /// seeded with any paths found in `SMITHY_PATH`.
    pub fn with_registry(registry: TraitFactoryRegistry) -> Self {
        let mut assembler = Self {
            registry,
            paths: HashSet::new(),
            sources: Vec::new(),
            json_models: Vec::new(),
        };
        if let Ok(search_path) = env::var(ENV_PATH_NAME) {
            debug!("Assembler::with_registry() - {}", search_path);
            for path in search_path.split(':') {
                let path = path.trim();
                if !path.is_empty() {
                    let _ = assembler.push(Path::new(path));
                }
            }
        }
        assembler
    }

    /// Queue a file or directory path for later discovery.
    pub fn push(&mut self, path: &Path) -> &mut Self {
        let _ = self.paths.insert(path.to_path_buf());
        self
    }

    /// Add an already-parsed source directly, bypassing file discovery.
    pub fn add_source(&mut self, source: ParsedSource) -> &mut Self {
        self.sources.push(source);
        self
    }

    /// Parse `text` as Smithy IDL and queue the result.
    pub fn add_idl(&mut self, text: &str, file: Option<&str>) -> Result<&mut Self> {
        let source = smithy_idl::parse_source(text, file)?;
        self.sources.push(source);
        Ok(self)
    }

    /// Parse `text` as JSON AST and queue the resulting model.
    pub fn add_json(&mut self, text: &str) -> Result<&mut Self> {
        let (model, events) = smithy_json::read_model(text, &self.registry)?;
        for event in events {
            warn!("{}: {}", event.id(), event.message());
        }
        self.json_models.push(model);
        Ok(self)
    }

    /// Every queued path, recursively expanded to `.smithy` and `.json` files.
    pub fn expand_file_paths(&self) -> Vec<PathBuf> {
        debug!("Assembler::expand_file_paths()");
        let mut results = Vec::new();
        for path in &self.paths {
            expand_path(path, &mut results);
        }
        results
    }

    /// Read every discovered file and merge every queued source and model
    /// into a single resolved `Model`, returning every diagnostic raised
    /// along the way.
    pub fn assemble(mut self) -> Result<(Model, Vec<Event>)> {
        for path in self.expand_file_paths() {
            let text = read_to_string(&path)
                .map_err(|e| ErrorKind::Deserialization("file".to_string(), path.display().to_string(), Some(e.to_string())))?;
            match path.extension().and_then(|e| e.to_str()) {
                Some(ext) if ext.eq_ignore_ascii_case("smithy") => {
                    let _ = self.add_idl(&text, path.to_str())?;
                }
                Some(ext) if ext.eq_ignore_ascii_case("json") => {
                    let _ = self.add_json(&text)?;
                }
                _ => return Err(ErrorKind::InvalidRepresentation(path.display().to_string()).into()),
            }
        }
        let (model, events) = resolve::resolve(self.sources, self.json_models, &self.registry);
        Ok((model, events))
    }
}

fn expand_path(path: &Path, results: &mut Vec<PathBuf>) {
    if path.is_file() {
        if let Some(extension) = path.extension().and_then(|e| e.to_str()) {
            if extension.eq_ignore_ascii_case("smithy") || extension.eq_ignore_ascii_case("json") {
                results.push(path.to_path_buf());
            }
        }
    } else if path.is_dir() {
        if let Ok(entries) = read_dir(path) {
            for entry in entries.flatten() {
                expand_path(&entry.path(), results);
            }
        }
    }
}
