#![allow(clippy::upper_case_acronyms)]

mod error;
use error::ParserError;

use crate::deferred::{
    DeferredApply, DeferredKind, DeferredMember, DeferredTrait, ParsedSource, ShapeRef,
};
use pest::iterators::Pair;
use pest::Parser;
use smithy_core::error::{ErrorKind, Result as ModelResult};
use smithy_core::identity::{Identifier, Namespace, ShapeID};
use smithy_core::model::shape::SimpleKind;
use smithy_core::model::IdlVersion;
use smithy_core::node::{Node, NodeNumber, SourceLocation};
use std::str::FromStr;

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

#[derive(Parser)]
#[grammar = "smithy.pest"]
struct SmithyParser;

// ------------------------------------------------------------------------------------------------
// Public Functions
// ------------------------------------------------------------------------------------------------

/// Parse one IDL source file into a [`ParsedSource`] deferred
/// representation. Parse failures become a single `Err`; the caller
/// (the assembler) is responsible for turning that into a `PARSE_ERROR`
/// event and skipping just this file.
pub fn parse_source(input: &str, file: Option<&str>) -> ModelResult<ParsedSource> {
    let mut parsed = SmithyParser::parse(Rule::idl, input).map_err(|e| {
        ErrorKind::Deserialization(
            "Smithy IDL".to_string(),
            file.unwrap_or("<input>").to_string(),
            Some(e.to_string()),
        )
    })?;
    let idl = parsed.next().ok_or_else(|| ErrorKind::Deserialization(
        "Smithy IDL".to_string(),
        "empty parse".to_string(),
        file.map(String::from),
    ))?;
    let mut out = ParsedSource {
        file: file.map(String::from),
        ..Default::default()
    };
    for pair in idl.into_inner() {
        match pair.as_rule() {
            Rule::control_section => parse_control_section(pair, &mut out, file)?,
            Rule::metadata_section => parse_metadata_section(pair, &mut out, file)?,
            Rule::shape_section => parse_shape_section(pair, &mut out, file)?,
            Rule::EOI => {}
            _ => return Err(ParserError::unexpected("parse_source", &pair).into()),
        }
    }
    Ok(out)
}

// ------------------------------------------------------------------------------------------------
// Private Functions — sections
// ------------------------------------------------------------------------------------------------

fn loc(pair: &Pair<'_, Rule>, file: Option<&str>) -> SourceLocation {
    let (line, column) = pair.as_span().start_pos().line_col();
    match file {
        Some(f) => SourceLocation::new(f, line as u32, column as u32),
        None => SourceLocation::none(),
    }
}

fn parse_control_section(pair: Pair<'_, Rule>, out: &mut ParsedSource, file: Option<&str>) -> ModelResult<()> {
    for stmt in pair.into_inner() {
        let mut inner = stmt.into_inner();
        let name = inner.next().unwrap().as_str().to_string();
        let value = parse_node_value(inner.next().unwrap(), file)?;
        if name == "version" {
            let text = match &value {
                Node::String(s, _) => s.clone(),
                Node::Number(n, _) => n.as_text().to_string(),
                _ => "2.0".to_string(),
            };
            out.idl_version = Some(if text.starts_with('1') {
                IdlVersion::V1_0
            } else {
                IdlVersion::V2_0
            });
        }
    }
    Ok(())
}

fn parse_metadata_section(pair: Pair<'_, Rule>, out: &mut ParsedSource, file: Option<&str>) -> ModelResult<()> {
    for stmt in pair.into_inner() {
        let mut inner = stmt.into_inner();
        let key = unquote_or_ident(inner.next().unwrap());
        let value = parse_node_value(inner.next().unwrap(), file)?;
        out.metadata.push((key, value));
    }
    Ok(())
}

fn parse_shape_section(pair: Pair<'_, Rule>, out: &mut ParsedSource, file: Option<&str>) -> ModelResult<()> {
    for child in pair.into_inner() {
        match child.as_rule() {
            Rule::namespace_statement => {
                let ns_pair = child.into_inner().next().unwrap();
                out.namespace = Some(Namespace::from_str(ns_pair.as_str())?);
            }
            Rule::use_section => {
                for use_stmt in child.into_inner() {
                    let id_pair = use_stmt.into_inner().next().unwrap();
                    out.uses.push(ShapeID::from_str(id_pair.as_str())?);
                }
            }
            Rule::shape_statements => {
                for stmt in child.into_inner() {
                    parse_shape_statement(stmt, out, file)?;
                }
            }
            _ => return Err(ParserError::unexpected("parse_shape_section", &child).into()),
        }
    }
    Ok(())
}

// ------------------------------------------------------------------------------------------------
// Private Functions — shapes
// ------------------------------------------------------------------------------------------------

fn parse_shape_statement(pair: Pair<'_, Rule>, out: &mut ParsedSource, file: Option<&str>) -> ModelResult<()> {
    let location = loc(&pair, file);
    let mut inner = pair.into_inner();
    let traits_pair = inner.next().unwrap();
    let leading_traits = parse_trait_statements(traits_pair, file)?;
    let body = inner.next().unwrap();
    match body.as_rule() {
        Rule::apply_statement => {
            let mut ai = body.into_inner();
            let target = parse_shape_ref(ai.next().unwrap());
            let mut traits = leading_traits;
            for t in ai {
                traits.push(parse_trait_statement(t, file)?);
            }
            out.applies.push(DeferredApply { target, traits });
            return Ok(());
        }
        Rule::simple_shape_statement => {
            let mut si = body.into_inner();
            let kind_name = si.next().unwrap().as_str();
            let name = Identifier::from_str(si.next().unwrap().as_str())?;
            let mixins = next_mixins(&mut si);
            let kind = SimpleKind::from_type_name(kind_name)
                .ok_or_else(|| ErrorKind::Deserialization("Smithy IDL".into(), format!("unknown simple type {}", kind_name), file.map(String::from)))?;
            out.shapes.push(DeferredShape {
                name,
                kind: DeferredKind::Simple(kind),
                traits: leading_traits,
                mixins,
                location,
            });
        }
        Rule::list_statement | Rule::map_statement | Rule::structure_statement | Rule::union_statement => {
            let is_list = body.as_rule() == Rule::list_statement;
            let is_map = body.as_rule() == Rule::map_statement;
            let is_union = body.as_rule() == Rule::union_statement;
            let mut si = body.into_inner();
            let name = Identifier::from_str(si.next().unwrap().as_str())?;
            let mut mixins = Vec::new();
            let members_pair = loop {
                let next = si.next().unwrap();
                if next.as_rule() == Rule::mixins {
                    mixins = parse_mixins(next);
                } else {
                    break next;
                }
            };
            let members = parse_shape_members(members_pair, file)?;
            let kind = if is_list {
                DeferredKind::List {
                    member: members.into_iter().next().ok_or_else(|| {
                        ErrorKind::Deserialization("Smithy IDL".into(), "list requires a member".into(), file.map(String::from))
                    })?,
                }
            } else if is_map {
                let mut it = members.into_iter();
                let key = it.next().ok_or_else(|| ErrorKind::Deserialization("Smithy IDL".into(), "map requires key".into(), file.map(String::from)))?;
                let value = it.next().ok_or_else(|| ErrorKind::Deserialization("Smithy IDL".into(), "map requires value".into(), file.map(String::from)))?;
                DeferredKind::Map { key, value }
            } else if is_union {
                DeferredKind::Union { members }
            } else {
                DeferredKind::Structure { members }
            };
            out.shapes.push(DeferredShape {
                name,
                kind,
                traits: leading_traits,
                mixins,
                location,
            });
        }
        Rule::enum_statement | Rule::int_enum_statement => {
            let is_int = body.as_rule() == Rule::int_enum_statement;
            let mut si = body.into_inner();
            let name = Identifier::from_str(si.next().unwrap().as_str())?;
            let mut mixins = Vec::new();
            let members_pair = loop {
                let next = si.next().unwrap();
                if next.as_rule() == Rule::mixins {
                    mixins = parse_mixins(next);
                } else {
                    break next;
                }
            };
            let members = parse_enum_members(members_pair, file)?;
            let kind = if is_int {
                DeferredKind::IntEnum { members }
            } else {
                DeferredKind::Enum { members }
            };
            out.shapes.push(DeferredShape {
                name,
                kind,
                traits: leading_traits,
                mixins,
                location,
            });
        }
        Rule::operation_statement => {
            let mut si = body.into_inner();
            let name = Identifier::from_str(si.next().unwrap().as_str())?;
            let mut mixins = Vec::new();
            let mut input = None;
            let mut inline_input = None;
            let mut output = None;
            let mut inline_output = None;
            let mut errors = Vec::new();
            for next in si {
                match next.as_rule() {
                    Rule::mixins => mixins = parse_mixins(next),
                    Rule::operation_member => {
                        let om = next.into_inner().next().unwrap();
                        match om.as_rule() {
                            Rule::operation_input => {
                                let target = om.into_inner().next().unwrap();
                                set_io(target, file, &mut input, &mut inline_input)?;
                            }
                            Rule::operation_output => {
                                let target = om.into_inner().next().unwrap();
                                set_io(target, file, &mut output, &mut inline_output)?;
                            }
                            Rule::operation_errors => {
                                for sid in om.into_inner() {
                                    errors.push(parse_shape_ref(sid));
                                }
                            }
                            _ => return Err(ParserError::unexpected("operation_member", &om).into()),
                        }
                    }
                    _ => return Err(ParserError::unexpected("operation_statement", &next).into()),
                }
            }
            out.shapes.push(DeferredShape {
                name,
                kind: DeferredKind::Operation {
                    input,
                    inline_input,
                    output,
                    inline_output,
                    errors,
                },
                traits: leading_traits,
                mixins,
                location,
            });
        }
        Rule::resource_statement => {
            let mut si = body.into_inner();
            let name = Identifier::from_str(si.next().unwrap().as_str())?;
            let mut identifiers = indexmap::IndexMap::new();
            let mut properties = indexmap::IndexMap::new();
            let (mut create, mut put, mut read, mut update, mut delete, mut list) = (None, None, None, None, None, None);
            let mut operations = Vec::new();
            let mut collection_operations = Vec::new();
            let mut resources = Vec::new();
            for next in si {
                let rm = next.into_inner().next().unwrap();
                match rm.as_rule() {
                    Rule::resource_id_map => identifiers = parse_shape_ref_map(rm, file)?,
                    Rule::resource_prop_map => properties = parse_shape_ref_map(rm, file)?,
                    Rule::resource_create => create = Some(parse_shape_ref(rm.into_inner().next().unwrap())),
                    Rule::resource_put => put = Some(parse_shape_ref(rm.into_inner().next().unwrap())),
                    Rule::resource_read => read = Some(parse_shape_ref(rm.into_inner().next().unwrap())),
                    Rule::resource_update => update = Some(parse_shape_ref(rm.into_inner().next().unwrap())),
                    Rule::resource_delete => delete = Some(parse_shape_ref(rm.into_inner().next().unwrap())),
                    Rule::resource_list => list = Some(parse_shape_ref(rm.into_inner().next().unwrap())),
                    Rule::resource_operations => operations = rm.into_inner().map(parse_shape_ref).collect(),
                    Rule::resource_collection_operations => collection_operations = rm.into_inner().map(parse_shape_ref).collect(),
                    Rule::resource_resources => resources = rm.into_inner().map(parse_shape_ref).collect(),
                    _ => return Err(ParserError::unexpected("resource_member", &rm).into()),
                }
            }
            out.shapes.push(DeferredShape {
                name,
                kind: DeferredKind::Resource {
                    identifiers,
                    properties,
                    create,
                    put,
                    read,
                    update,
                    delete,
                    list,
                    operations,
                    collection_operations,
                    resources,
                },
                traits: leading_traits,
                mixins: Vec::new(),
                location,
            });
        }
        Rule::service_statement => {
            let mut si = body.into_inner();
            let name = Identifier::from_str(si.next().unwrap().as_str())?;
            let mut version = None;
            let mut operations = Vec::new();
            let mut resources = Vec::new();
            let mut errors = Vec::new();
            let mut rename = indexmap::IndexMap::new();
            for next in si {
                let sm = next.into_inner().next().unwrap();
                match sm.as_rule() {
                    Rule::service_version => {
                        let text_pair = sm.into_inner().next().unwrap();
                        version = Some(unquote(text_pair.as_str()));
                    }
                    Rule::service_operations => operations = sm.into_inner().map(parse_shape_ref).collect(),
                    Rule::service_resources => resources = sm.into_inner().map(parse_shape_ref).collect(),
                    Rule::service_errors => errors = sm.into_inner().map(parse_shape_ref).collect(),
                    Rule::service_rename => {
                        let node_obj = sm.into_inner().next().unwrap();
                        let body = node_obj.into_inner().next().unwrap();
                        for kv in body.into_inner() {
                            let mut kvi = kv.into_inner();
                            let key_pair = kvi.next().unwrap();
                            let key = ShapeRef::Absolute(ShapeID::from_str(&unquote_or_ident(key_pair))?);
                            let value_pair = kvi.next().unwrap();
                            let value_node = parse_node_value(value_pair, file)?;
                            let value_ident = Identifier::from_str(value_node.as_string().unwrap_or(""))?;
                            rename.insert(key, value_ident);
                        }
                    }
                    _ => return Err(ParserError::unexpected("service_member", &sm).into()),
                }
            }
            out.shapes.push(DeferredShape {
                name,
                kind: DeferredKind::Service {
                    version,
                    operations,
                    resources,
                    errors,
                    rename,
                },
                traits: leading_traits,
                mixins: Vec::new(),
                location,
            });
        }
        _ => return Err(ParserError::unexpected("parse_shape_statement", &body).into()),
    }
    Ok(())
}

fn set_io(
    target: Pair<'_, Rule>,
    file: Option<&str>,
    id_out: &mut Option<ShapeRef>,
    inline_out: &mut Option<Vec<DeferredMember>>,
) -> ModelResult<()> {
    match target.as_rule() {
        Rule::shape_id => *id_out = Some(parse_shape_ref(target)),
        Rule::inline_structure => {
            let members_pair = target.into_inner().next().unwrap();
            *inline_out = Some(parse_shape_members(members_pair, file)?);
        }
        _ => return Err(ParserError::unexpected("set_io", &target).into()),
    }
    Ok(())
}

fn next_mixins(si: &mut pest::iterators::Pairs<'_, Rule>) -> Vec<ShapeRef> {
    match si.peek() {
        Some(p) if p.as_rule() == Rule::mixins => parse_mixins(si.next().unwrap()),
        _ => Vec::new(),
    }
}

fn parse_mixins(pair: Pair<'_, Rule>) -> Vec<ShapeRef> {
    pair.into_inner().map(parse_shape_ref).collect()
}

fn parse_shape_members(pair: Pair<'_, Rule>, file: Option<&str>) -> ModelResult<Vec<DeferredMember>> {
    let mut members = Vec::new();
    for member_pair in pair.into_inner() {
        let location = loc(&member_pair, file);
        let mut mi = member_pair.into_inner();
        let traits = parse_trait_statements(mi.next().unwrap(), file)?;
        let name = Identifier::from_str(mi.next().unwrap().as_str())?;
        let target_pair = mi.next().unwrap();
        let target = match target_pair.as_rule() {
            Rule::shape_id => parse_shape_ref(target_pair),
            Rule::inline_structure => {
                // Inline member structures are not expanded further here; the
                // assembler materializes a synthetic nested shape when needed.
                ShapeRef::Relative(name.clone())
            }
            _ => return Err(ParserError::unexpected("parse_shape_members", &target_pair).into()),
        };
        let value = match mi.next() {
            Some(v) => Some(parse_node_value(v, file)?),
            None => None,
        };
        members.push(DeferredMember {
            name,
            target,
            traits,
            value,
            location,
        });
    }
    Ok(members)
}

fn parse_enum_members(pair: Pair<'_, Rule>, file: Option<&str>) -> ModelResult<Vec<DeferredMember>> {
    let mut members = Vec::new();
    for member_pair in pair.into_inner() {
        let location = loc(&member_pair, file);
        let mut mi = member_pair.into_inner();
        let traits = parse_trait_statements(mi.next().unwrap(), file)?;
        let name = Identifier::from_str(mi.next().unwrap().as_str())?;
        let value = match mi.next() {
            Some(v) => Some(parse_node_value(v, file)?),
            None => None,
        };
        members.push(DeferredMember {
            name,
            target: ShapeRef::Absolute(smithy_core::prelude::unit_id()),
            traits,
            value,
            location,
        });
    }
    Ok(members)
}

fn parse_shape_ref_map(pair: Pair<'_, Rule>, file: Option<&str>) -> ModelResult<indexmap::IndexMap<Identifier, ShapeRef>> {
    let node_obj = pair.into_inner().next().unwrap();
    let body = node_obj.into_inner().next().unwrap();
    let mut map = indexmap::IndexMap::new();
    for kv in body.into_inner() {
        let mut kvi = kv.into_inner();
        let key = Identifier::from_str(&unquote_or_ident(kvi.next().unwrap()))?;
        let value_node = parse_node_value(kvi.next().unwrap(), file)?;
        let value_ref = match value_node {
            Node::String(s, _) => {
                if s.contains('#') {
                    ShapeRef::Absolute(ShapeID::from_str(&s)?)
                } else {
                    ShapeRef::Relative(Identifier::from_str(&s)?)
                }
            }
            _ => return Err(ParserError::new("parse_shape_ref_map").expecting("shape id string").into()),
        };
        map.insert(key, value_ref);
    }
    Ok(map)
}

// ------------------------------------------------------------------------------------------------
// Private Functions — traits and node values
// ------------------------------------------------------------------------------------------------

fn parse_trait_statements(pair: Pair<'_, Rule>, file: Option<&str>) -> ModelResult<Vec<DeferredTrait>> {
    let mut traits = Vec::new();
    // Consecutive `///` lines accumulate into a single `documentation` trait,
    // not one per line.
    let mut doc_lines: Vec<String> = Vec::new();
    for child in pair.into_inner() {
        match child.as_rule() {
            Rule::trait_statement => traits.push(parse_trait_statement(child, file)?),
            Rule::doc_comment => {
                let text = child.into_inner().next().map(|p| p.as_str().trim().to_string()).unwrap_or_default();
                doc_lines.push(text);
            }
            _ => return Err(ParserError::unexpected("parse_trait_statements", &child).into()),
        }
    }
    if !doc_lines.is_empty() {
        traits.push(DeferredTrait {
            trait_id: ShapeRef::Absolute(smithy_core::prelude::trait_ids::documentation()),
            value: Node::string(doc_lines.join("\n")),
            location: SourceLocation::none(),
        });
    }
    Ok(traits)
}

fn parse_trait_statement(pair: Pair<'_, Rule>, file: Option<&str>) -> ModelResult<DeferredTrait> {
    let location = loc(&pair, file);
    let mut inner = pair.into_inner();
    let trait_id = parse_shape_ref(inner.next().unwrap());
    let value = match inner.next() {
        Some(body) if body.as_rule() == Rule::trait_structure => {
            let mut map = smithy_core::node::NodeObject::new();
            for kv in body.into_inner() {
                let mut kvi = kv.into_inner();
                let key = unquote_or_ident(kvi.next().unwrap());
                let val = parse_node_value(kvi.next().unwrap(), file)?;
                map.insert(key, val);
            }
            Node::object(map)
        }
        // A bare single value, e.g. `@error("client")` or `@pattern("^a+$")`,
        // rather than the key-value form used by traits like `@length(min: 1)`.
        Some(body) => parse_node_value(body, file)?,
        None => Node::empty_object(),
    };
    Ok(DeferredTrait { trait_id, value, location })
}

fn parse_node_value(pair: Pair<'_, Rule>, file: Option<&str>) -> ModelResult<Node> {
    let location = loc(&pair, file);
    let text = pair.as_str();
    match pair.clone().into_inner().next() {
        // The "true" | "false" | "null" literal alternatives match with no
        // named child pair, so they're distinguished by the matched text.
        None => match text {
            "true" => Ok(Node::Bool(true, location)),
            "false" => Ok(Node::Bool(false, location)),
            "null" => Ok(Node::Null(location)),
            _ => Err(ParserError::new("parse_node_value").expecting("true, false, or null").context(&text).into()),
        },
        Some(p) => parse_node_inner(p, location, file),
    }
}

fn parse_node_inner(pair: Pair<'_, Rule>, location: SourceLocation, file: Option<&str>) -> ModelResult<Node> {
    match pair.as_rule() {
        Rule::node_object => {
            let mut map = smithy_core::node::NodeObject::new();
            let body = pair.into_inner().next().unwrap();
            for kv in body.into_inner() {
                let mut kvi = kv.into_inner();
                let key = unquote_or_ident(kvi.next().unwrap());
                let val = parse_node_value(kvi.next().unwrap(), file)?;
                map.insert(key, val);
            }
            Ok(Node::Object(map, location))
        }
        Rule::node_array => {
            let items = pair
                .into_inner()
                .map(|p| parse_node_value(p, file))
                .collect::<ModelResult<Vec<_>>>()?;
            Ok(Node::Array(items, location))
        }
        Rule::text_block => {
            let raw = pair.as_str();
            let trimmed = &raw[3..raw.len() - 3];
            Ok(Node::String(dedent_text_block(trimmed), location))
        }
        Rule::quoted_text => Ok(Node::String(unquote(pair.as_str()), location)),
        Rule::number => {
            let number = NodeNumber::parse(pair.as_str())?;
            Ok(Node::Number(number, location))
        }
        Rule::shape_id => Ok(Node::String(pair.as_str().to_string(), location)),
        other => Err(ParserError::new("parse_node_inner").context(&other).into()),
    }
}

fn dedent_text_block(s: &str) -> String {
    s.trim_start_matches('\n').to_string()
}

fn parse_shape_ref(pair: Pair<'_, Rule>) -> ShapeRef {
    let text = pair.as_str();
    if text.contains('#') {
        ShapeRef::Absolute(ShapeID::from_str(text).expect("grammar guarantees valid shape id"))
    } else {
        ShapeRef::Relative(Identifier::from_str(text).expect("grammar guarantees valid identifier"))
    }
}

fn unquote_or_ident(pair: Pair<'_, Rule>) -> String {
    match pair.as_rule() {
        Rule::quoted_text => unquote(pair.as_str()),
        _ => pair.as_str().to_string(),
    }
}

fn unquote(s: &str) -> String {
    let inner = &s[1..s.len() - 1];
    inner.replace("\\\"", "\"").replace("\\n", "\n").replace("\\t", "\t")
}
