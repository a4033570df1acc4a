/*!
Reads the Smithy [JSON AST](https://smithy.io/2.0/spec/json-ast.html)
representation into a [`smithy_core::model::Model`]. The reader
resolves member targets directly, since JSON AST shape IDs are always
absolute — no forward-reference pass is needed here.
*/

use crate::syntax::*;
use crate::{json_to_node, ModelResult};
use indexmap::IndexMap;
use serde_json::Value;
use smithy_core::error::ErrorKind;
use smithy_core::identity::{Identifier, ShapeID};
use smithy_core::model::diagnostics::Event;
use smithy_core::model::shape::{
    EnumValue, Member, Members, OperationShape, ResourceShape, ServiceShape, Shape, ShapeKind, SimpleKind,
};
use smithy_core::model::Model;
use smithy_core::node::SourceLocation;
use smithy_core::traits::TraitFactoryRegistry;
use std::str::FromStr;

/// Read one JSON AST document into a `Model`. Trait-construction failures
/// are not fatal: they're recorded as `TRAIT_CONSTRUCTION_FAILED` events
/// and the offending trait application is dropped.
pub fn read_model(json_text: &str, registry: &TraitFactoryRegistry) -> ModelResult<(Model, Vec<Event>)> {
    let root: Value = serde_json::from_str(json_text)
        .map_err(|e| ErrorKind::Deserialization("JSON AST".to_string(), "<root>".to_string(), Some(e.to_string())))?;
    let root = root
        .as_object()
        .ok_or_else(|| ErrorKind::Deserialization("JSON AST".to_string(), "<root>".to_string(), Some("expected an object".to_string())))?;

    let mut model = Model::new();
    let mut events = Vec::new();

    if let Some(Value::Object(metadata)) = root.get(KEY_METADATA) {
        for (k, v) in metadata {
            model.metadata_mut().insert(k.clone(), json_to_node(v));
        }
    }

    if let Some(Value::Object(shapes)) = root.get(KEY_SHAPES) {
        for (id_str, shape_json) in shapes {
            let id = ShapeID::from_str(id_str)?;
            match read_shape(&id, shape_json, registry, &mut events) {
                Ok(shape) => model.add_shape(shape),
                Err(e) => events.push(Event::error("INVALID_SHAPE", e.to_string()).with_shape(id)),
            }
        }
    }

    Ok((model, events))
}

fn read_shape(
    id: &ShapeID,
    json: &Value,
    registry: &TraitFactoryRegistry,
    events: &mut Vec<Event>,
) -> ModelResult<Shape> {
    let obj = json
        .as_object()
        .ok_or_else(|| ErrorKind::Deserialization("JSON AST".to_string(), id.to_string(), Some("shape must be an object".to_string())))?;
    let type_name = obj
        .get(KEY_TYPE)
        .and_then(Value::as_str)
        .ok_or_else(|| ErrorKind::Deserialization("JSON AST".to_string(), id.to_string(), Some("missing 'type'".to_string())))?;

    let kind = if let Some(simple) = SimpleKind::from_type_name(type_name) {
        ShapeKind::Simple(simple)
    } else {
        match type_name {
            "list" => ShapeKind::List {
                member: read_member(id, "member", obj.get(KEY_MEMBER), registry, events)?,
            },
            "map" => ShapeKind::Map {
                key: read_member(id, "key", obj.get(KEY_KEY), registry, events)?,
                value: read_member(id, "value", obj.get(KEY_VALUE), registry, events)?,
            },
            "structure" => ShapeKind::Structure {
                members: read_members(id, obj.get(KEY_MEMBERS), registry, events)?,
            },
            "union" => ShapeKind::Union {
                members: read_members(id, obj.get(KEY_MEMBERS), registry, events)?,
            },
            "enum" => ShapeKind::Enum {
                members: read_enum_members(id, obj.get(KEY_MEMBERS), false, registry, events)?,
            },
            "intEnum" => ShapeKind::IntEnum {
                members: read_enum_members(id, obj.get(KEY_MEMBERS), true, registry, events)?,
            },
            "operation" => ShapeKind::Operation(OperationShape {
                input: read_target(obj.get(KEY_INPUT)),
                output: read_target(obj.get(KEY_OUTPUT)),
                errors: read_target_list(obj.get(KEY_ERRORS)),
            }),
            "resource" => ShapeKind::Resource(ResourceShape {
                identifiers: read_shape_id_map(obj.get(KEY_IDENTIFIERS)),
                properties: read_shape_id_map(obj.get(KEY_PROPERTIES)),
                create: read_target(obj.get(KEY_CREATE)),
                put: read_target(obj.get(KEY_PUT)),
                read: read_target(obj.get(KEY_READ)),
                update: read_target(obj.get(KEY_UPDATE)),
                delete: read_target(obj.get(KEY_DELETE)),
                list: read_target(obj.get(KEY_LIST)),
                operations: read_target_list(obj.get(KEY_OPERATIONS)),
                collection_operations: read_target_list(obj.get(KEY_COLLECTION_OPERATIONS)),
                resources: read_target_list(obj.get(KEY_RESOURCES)),
            }),
            "service" => ShapeKind::Service(ServiceShape {
                version: obj.get(KEY_VERSION).and_then(Value::as_str).map(str::to_string),
                operations: read_target_list(obj.get(KEY_OPERATIONS)),
                resources: read_target_list(obj.get(KEY_RESOURCES)),
                errors: read_target_list(obj.get(KEY_ERRORS)),
                rename: read_rename(obj.get(KEY_RENAME))?,
            }),
            other => {
                return Err(ErrorKind::Deserialization(
                    "JSON AST".to_string(),
                    id.to_string(),
                    Some(format!("unknown shape type '{}'", other)),
                )
                .into())
            }
        }
    };

    let mut shape = Shape::new(id.clone(), kind);
    apply_traits(&mut shape, obj.get(KEY_TRAITS), registry, events);
    for mixin in read_target_list(obj.get(KEY_MIXINS)) {
        shape.add_mixin(mixin);
    }
    Ok(shape)
}

fn read_member(
    shape_id: &ShapeID,
    name: &str,
    json: Option<&Value>,
    registry: &TraitFactoryRegistry,
    events: &mut Vec<Event>,
) -> ModelResult<Member> {
    let obj = json
        .and_then(Value::as_object)
        .ok_or_else(|| ErrorKind::Deserialization("JSON AST".to_string(), shape_id.to_string(), Some(format!("missing member '{}'", name))))?;
    let target = obj
        .get(KEY_TARGET)
        .and_then(Value::as_str)
        .ok_or_else(|| ErrorKind::Deserialization("JSON AST".to_string(), shape_id.to_string(), Some("member missing 'target'".to_string())))?;
    let member_id = shape_id.to_member(Identifier::from_str(name)?);
    let mut member = Member::new(member_id, ShapeID::from_str(target)?);
    apply_member_traits(&mut member, obj.get(KEY_TRAITS), registry, events);
    Ok(member)
}

fn read_members(
    shape_id: &ShapeID,
    json: Option<&Value>,
    registry: &TraitFactoryRegistry,
    events: &mut Vec<Event>,
) -> ModelResult<Members> {
    let mut members = Members::new();
    if let Some(Value::Object(obj)) = json {
        for (name, member_json) in obj {
            let member = read_member(shape_id, name, Some(member_json), registry, events)?;
            members.insert(Identifier::from_str(name)?, member);
        }
    }
    Ok(members)
}

fn read_enum_members(
    shape_id: &ShapeID,
    json: Option<&Value>,
    is_int: bool,
    registry: &TraitFactoryRegistry,
    events: &mut Vec<Event>,
) -> ModelResult<IndexMap<Identifier, (Member, EnumValue)>> {
    let mut members = IndexMap::new();
    if let Some(Value::Object(obj)) = json {
        for (name, member_json) in obj {
            let member_obj = member_json.as_object();
            let enum_value = if is_int {
                let i = member_obj.and_then(|o| o.get(KEY_VALUE)).and_then(Value::as_i64).unwrap_or(0);
                EnumValue::Integer(i)
            } else {
                let s = member_obj
                    .and_then(|o| o.get(KEY_VALUE))
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| name.clone());
                EnumValue::String(s)
            };
            let member_id = shape_id.to_member(Identifier::from_str(name)?);
            let target = smithy_core::prelude::unit_id();
            let mut member = Member::new(member_id, target);
            if let Some(o) = member_obj {
                apply_member_traits(&mut member, o.get(KEY_TRAITS), registry, events);
            }
            members.insert(Identifier::from_str(name)?, (member, enum_value));
        }
    }
    Ok(members)
}

fn read_target(json: Option<&Value>) -> Option<ShapeID> {
    json.and_then(Value::as_object)
        .and_then(|o| o.get(KEY_TARGET))
        .and_then(Value::as_str)
        .and_then(|s| ShapeID::from_str(s).ok())
}

fn read_target_list(json: Option<&Value>) -> Vec<ShapeID> {
    match json.and_then(Value::as_array) {
        Some(arr) => arr.iter().filter_map(|v| read_target(Some(v))).collect(),
        None => Vec::new(),
    }
}

fn read_shape_id_map(json: Option<&Value>) -> IndexMap<Identifier, ShapeID> {
    let mut map = IndexMap::new();
    if let Some(Value::Object(obj)) = json {
        for (k, v) in obj {
            if let (Ok(key), Some(value)) = (Identifier::from_str(k), v.as_str().and_then(|s| ShapeID::from_str(s).ok())) {
                map.insert(key, value);
            }
        }
    }
    map
}

fn read_rename(json: Option<&Value>) -> ModelResult<IndexMap<ShapeID, Identifier>> {
    let mut map = IndexMap::new();
    if let Some(Value::Object(obj)) = json {
        for (k, v) in obj {
            let key = ShapeID::from_str(k)?;
            if let Some(name) = v.as_str() {
                map.insert(key, Identifier::from_str(name)?);
            }
        }
    }
    Ok(map)
}

fn apply_traits(shape: &mut Shape, json: Option<&Value>, registry: &TraitFactoryRegistry, events: &mut Vec<Event>) {
    if let Some(Value::Object(obj)) = json {
        for (trait_id_str, value_json) in obj {
            match construct_trait(trait_id_str, value_json, registry) {
                Ok(a_trait) => shape.add_trait(a_trait),
                Err(message) => events.push(
                    Event::error("TRAIT_CONSTRUCTION_FAILED", message)
                        .with_shape(shape.id().clone())
                        .with_location(SourceLocation::none()),
                ),
            }
        }
    }
}

fn apply_member_traits(member: &mut Member, json: Option<&Value>, registry: &TraitFactoryRegistry, events: &mut Vec<Event>) {
    if let Some(Value::Object(obj)) = json {
        for (trait_id_str, value_json) in obj {
            match construct_trait(trait_id_str, value_json, registry) {
                Ok(a_trait) => member.add_trait(a_trait),
                Err(message) => events.push(
                    Event::error("TRAIT_CONSTRUCTION_FAILED", message)
                        .with_shape(member.id().clone())
                        .with_location(SourceLocation::none()),
                ),
            }
        }
    }
}

fn construct_trait(trait_id_str: &str, value_json: &Value, registry: &TraitFactoryRegistry) -> Result<smithy_core::traits::Trait, String> {
    let trait_id = ShapeID::from_str(trait_id_str).map_err(|e| e.to_string())?;
    let value = json_to_node(value_json);
    registry.construct(trait_id, value)
}
