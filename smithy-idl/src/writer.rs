/*!
Serializes a [`Model`] back into Smithy IDL 2.0 text for one namespace,
the writer half of the loader round-trip property: a model written as
IDL, re-parsed, and re-assembled, is the same model.
*/

use smithy_core::identity::{Namespace, ShapeID};
use smithy_core::model::shape::{EnumValue, Member, ShapeKind};
use smithy_core::model::Model;
use smithy_core::node::Node;
use smithy_core::prelude::PRELUDE_NAMESPACE;
use std::collections::BTreeSet;
use std::fmt::Write;

/// Render every shape in `model` whose ID lives in `namespace` as IDL
/// text, prefixed with a `$version` control statement and the `use`
/// statements needed for any cross-namespace references.
pub fn write_idl(model: &Model, namespace: &Namespace) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "$version: \"2.0\"");
    out.push('\n');
    let _ = writeln!(out, "namespace {}", namespace);
    out.push('\n');

    let uses = collect_uses(model, namespace);
    if !uses.is_empty() {
        for id in &uses {
            let _ = writeln!(out, "use {}", id);
        }
        out.push('\n');
    }

    for id in model.shape_ids_sorted() {
        if id.namespace() != namespace || id.is_member() {
            continue;
        }
        let shape = match model.shape(id) {
            Some(s) => s,
            None => continue,
        };
        write_shape(&mut out, shape.id(), shape.kind(), shape.traits(), shape.mixins());
        out.push('\n');
    }
    out
}

fn collect_uses(model: &Model, namespace: &Namespace) -> BTreeSet<ShapeID> {
    let mut uses = BTreeSet::new();
    for id in model.shape_ids_sorted() {
        if id.namespace() != namespace {
            continue;
        }
        if let Some(shape) = model.shape(id) {
            for referenced in shape.all_referenced_shapes() {
                if referenced.namespace() != namespace && referenced.namespace().as_str() != PRELUDE_NAMESPACE {
                    uses.insert(referenced.to_shape_id());
                }
            }
        }
    }
    uses
}

fn write_shape(
    out: &mut String,
    id: &ShapeID,
    kind: &ShapeKind,
    traits: &smithy_core::traits::TraitMap,
    mixins: &[ShapeID],
) {
    write_traits(out, traits);
    let name = id.shape_name();
    match kind {
        ShapeKind::Simple(s) => {
            let _ = write!(out, "{} {}", s.type_name(), name);
            write_mixins(out, mixins);
            out.push('\n');
        }
        ShapeKind::List { member } => {
            let _ = write!(out, "list {}", name);
            write_mixins(out, mixins);
            let _ = writeln!(out, " {{");
            write_member(out, "member", member);
            out.push_str("}\n");
        }
        ShapeKind::Map { key, value } => {
            let _ = write!(out, "map {}", name);
            write_mixins(out, mixins);
            let _ = writeln!(out, " {{");
            write_member(out, "key", key);
            write_member(out, "value", value);
            out.push_str("}\n");
        }
        ShapeKind::Structure { members } => {
            let _ = write!(out, "structure {}", name);
            write_mixins(out, mixins);
            let _ = writeln!(out, " {{");
            for (member_name, member) in members {
                write_member(out, member_name.as_str(), member);
            }
            out.push_str("}\n");
        }
        ShapeKind::Union { members } => {
            let _ = write!(out, "union {}", name);
            write_mixins(out, mixins);
            let _ = writeln!(out, " {{");
            for (member_name, member) in members {
                write_member(out, member_name.as_str(), member);
            }
            out.push_str("}\n");
        }
        ShapeKind::Enum { members } => write_enum(out, "enum", name.as_str(), members, mixins),
        ShapeKind::IntEnum { members } => write_enum(out, "intEnum", name.as_str(), members, mixins),
        ShapeKind::Operation(op) => {
            let _ = writeln!(out, "operation {} {{", name);
            if let Some(input) = &op.input {
                let _ = writeln!(out, "    input: {}", input);
            }
            if let Some(output) = &op.output {
                let _ = writeln!(out, "    output: {}", output);
            }
            if !op.errors.is_empty() {
                let _ = writeln!(
                    out,
                    "    errors: [{}]",
                    op.errors.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
                );
            }
            out.push_str("}\n");
        }
        ShapeKind::Resource(r) => {
            let _ = writeln!(out, "resource {} {{", name);
            if !r.identifiers.is_empty() {
                let _ = writeln!(out, "    identifiers: {{");
                for (k, v) in &r.identifiers {
                    let _ = writeln!(out, "        {}: {}", k, v);
                }
                out.push_str("    }\n");
            }
            if !r.properties.is_empty() {
                let _ = writeln!(out, "    properties: {{");
                for (k, v) in &r.properties {
                    let _ = writeln!(out, "        {}: {}", k, v);
                }
                out.push_str("    }\n");
            }
            write_opt(out, "create", &r.create);
            write_opt(out, "put", &r.put);
            write_opt(out, "read", &r.read);
            write_opt(out, "update", &r.update);
            write_opt(out, "delete", &r.delete);
            write_opt(out, "list", &r.list);
            write_list(out, "operations", &r.operations);
            write_list(out, "collectionOperations", &r.collection_operations);
            write_list(out, "resources", &r.resources);
            out.push_str("}\n");
        }
        ShapeKind::Service(s) => {
            let _ = writeln!(out, "service {} {{", name);
            if let Some(version) = &s.version {
                let _ = writeln!(out, "    version: \"{}\"", version);
            }
            write_list(out, "operations", &s.operations);
            write_list(out, "resources", &s.resources);
            write_list(out, "errors", &s.errors);
            if !s.rename.is_empty() {
                let _ = writeln!(out, "    rename: {{");
                for (k, v) in &s.rename {
                    let _ = writeln!(out, "        \"{}\": \"{}\"", k, v);
                }
                out.push_str("    }\n");
            }
            out.push_str("}\n");
        }
    }
}

fn write_opt(out: &mut String, keyword: &str, value: &Option<ShapeID>) {
    if let Some(v) = value {
        let _ = writeln!(out, "    {}: {}", keyword, v);
    }
}

fn write_list(out: &mut String, keyword: &str, values: &[ShapeID]) {
    if !values.is_empty() {
        let _ = writeln!(
            out,
            "    {}: [{}]",
            keyword,
            values.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
        );
    }
}

fn write_enum(
    out: &mut String,
    keyword: &str,
    name: &str,
    members: &indexmap::IndexMap<smithy_core::identity::Identifier, (Member, EnumValue)>,
    mixins: &[ShapeID],
) {
    let _ = write!(out, "{} {}", keyword, name);
    write_mixins(out, mixins);
    let _ = writeln!(out, " {{");
    for (member_name, (member, value)) in members {
        write_traits_indented(out, member.traits());
        match value {
            EnumValue::String(s) => {
                let _ = writeln!(out, "    {} = \"{}\"", member_name, s);
            }
            EnumValue::Integer(i) => {
                let _ = writeln!(out, "    {} = {}", member_name, i);
            }
        }
    }
    out.push_str("}\n");
}

fn write_member(out: &mut String, name: &str, member: &Member) {
    write_traits_indented(out, member.traits());
    let _ = writeln!(out, "    {}: {}", name, member.target());
}

fn write_mixins(out: &mut String, mixins: &[ShapeID]) {
    if !mixins.is_empty() {
        let _ = write!(
            out,
            " with [{}]",
            mixins.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
        );
    }
}

fn write_traits(out: &mut String, traits: &smithy_core::traits::TraitMap) {
    for (id, a_trait) in traits {
        if a_trait.value().is_empty_object() {
            let _ = writeln!(out, "@{}", id);
        } else {
            let _ = writeln!(out, "@{}({})", id, node_compact(a_trait.value()));
        }
    }
}

fn write_traits_indented(out: &mut String, traits: &smithy_core::traits::TraitMap) {
    for (id, a_trait) in traits {
        if a_trait.value().is_empty_object() {
            let _ = writeln!(out, "    @{}", id);
        } else {
            let _ = writeln!(out, "    @{}({})", id, node_compact(a_trait.value()));
        }
    }
}

fn node_compact(node: &Node) -> String {
    match node {
        Node::Object(fields, _) => fields
            .iter()
            .map(|(k, v)| format!("{}: {}", k, node_compact(v)))
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}
