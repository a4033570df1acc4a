/*!
The work each subcommand does, independent of how its arguments were
parsed: assemble a model, then validate/select/convert/build it.
*/

use crate::{BuildCommand, ConvertCommand, FileFormat, SelectCommand, ValidateCommand};
use smithy_assembler::Assembler;
use smithy_build::{run_build, BuildConfig, BuildResult};
use smithy_core::identity::Namespace;
use smithy_core::model::diagnostics::Event;
use smithy_core::model::Model;
use smithy_core::prelude::PRELUDE_NAMESPACE;
use smithy_select::Selector;
use smithy_validate::ValidatorRegistry;
use std::collections::BTreeSet;
use std::error::Error;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

fn assemble(inputs: &[PathBuf]) -> Result<(Model, Vec<Event>), Box<dyn Error>> {
    let mut assembler = Assembler::default();
    for input in inputs {
        assembler.push(input);
    }
    let (model, events) = assembler.assemble()?;
    Ok((model, events))
}

/// Assemble the model named by `cmd.inputs` and run the standard
/// validator registry over it, returning every event raised by either
/// step.
pub fn validate(cmd: ValidateCommand) -> Result<Vec<Event>, Box<dyn Error>> {
    let (model, mut events) = assemble(&cmd.inputs)?;
    events.extend(ValidatorRegistry::standard().validate(&model));
    Ok(events)
}

/// Assemble the model named by `cmd.inputs` and evaluate a selector
/// expression over it, returning the matching shape IDs in sorted order.
pub fn select(cmd: SelectCommand) -> Result<Vec<String>, Box<dyn Error>> {
    let (model, _events) = assemble(&cmd.inputs)?;
    let selector = Selector::parse(&cmd.expression)?;
    let mut matches: Vec<String> = selector.select(&model).iter().map(|id| id.to_string()).collect();
    matches.sort();
    Ok(matches)
}

/// Assemble the model named by `cmd.inputs` and write it back out in
/// `cmd.write_format`, to `cmd.out_file` or stdout.
pub fn convert(cmd: ConvertCommand) -> Result<(), Box<dyn Error>> {
    let (model, _events) = assemble(&cmd.inputs)?;
    let text = match cmd.write_format {
        FileFormat::Json => smithy_json::write_model(&model),
        FileFormat::Idl => write_idl_all_namespaces(&model),
    };

    match cmd.out_file {
        Some(path) => fs::write(path, text)?,
        None => std::io::stdout().write_all(text.as_bytes())?,
    }
    Ok(())
}

fn write_idl_all_namespaces(model: &Model) -> String {
    let prelude: Namespace = PRELUDE_NAMESPACE.parse().expect("prelude namespace always parses");
    let namespaces: BTreeSet<Namespace> = model
        .shape_ids_sorted()
        .into_iter()
        .filter(|id| !id.is_member() && id.namespace() != &prelude)
        .map(|id| id.namespace().clone())
        .collect();

    let mut out = String::new();
    for namespace in namespaces {
        out.push_str(&smithy_idl::write_idl(model, &namespace));
        out.push('\n');
    }
    out
}

/// Run the full build pipeline described by `cmd.config_file`.
pub fn build(cmd: BuildCommand) -> Result<BuildResult, Box<dyn Error>> {
    let text = fs::read_to_string(&cmd.config_file)?;
    let config = BuildConfig::parse(&text)?;
    let base_dir = cmd
        .base_dir
        .or_else(|| cmd.config_file.parent().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."));
    Ok(run_build(&config, &base_dir)?)
}
