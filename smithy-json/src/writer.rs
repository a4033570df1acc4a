/*!
Serializes a [`Model`] into the Smithy JSON AST representation, the
inverse of [`crate::reader::read_model`].
*/

use crate::node_to_json;
use crate::syntax::*;
use smithy_core::identity::ShapeID;
use smithy_core::model::shape::{Member, ShapeKind};
use smithy_core::model::Model;
use serde_json::{Map, Value};

/// The JSON AST version string this writer emits.
pub const AST_VERSION: &str = "2.0";

/// Render `model` as a complete JSON AST document, including every shape
/// regardless of namespace (unlike [`smithy_idl::write_idl`], which is
/// scoped to one namespace per call).
pub fn write_model(model: &Model) -> String {
    serde_json::to_string_pretty(&model_to_value(model)).unwrap_or_else(|_| "{}".to_string())
}

fn model_to_value(model: &Model) -> Value {
    let mut root = Map::new();
    root.insert(KEY_SMITHY.to_string(), Value::String(AST_VERSION.to_string()));

    if !model.metadata().is_empty() {
        let mut metadata = Map::new();
        for (k, v) in model.metadata() {
            metadata.insert(k.clone(), node_to_json(v));
        }
        root.insert(KEY_METADATA.to_string(), Value::Object(metadata));
    }

    let mut shapes = Map::new();
    for shape in model.shapes_sorted() {
        shapes.insert(shape.id().to_string(), shape_to_value(shape));
    }
    root.insert(KEY_SHAPES.to_string(), Value::Object(shapes));

    Value::Object(root)
}

fn shape_to_value(shape: &smithy_core::model::shape::Shape) -> Value {
    let mut obj = Map::new();
    obj.insert(KEY_TYPE.to_string(), Value::String(shape.kind().type_name().to_string()));

    match shape.kind() {
        ShapeKind::Simple(_) => {}
        ShapeKind::List { member } => {
            obj.insert(KEY_MEMBER.to_string(), member_to_value(member));
        }
        ShapeKind::Map { key, value } => {
            obj.insert(KEY_KEY.to_string(), member_to_value(key));
            obj.insert(KEY_VALUE.to_string(), member_to_value(value));
        }
        ShapeKind::Structure { members } | ShapeKind::Union { members } => {
            let mut m = Map::new();
            for (name, member) in members {
                m.insert(name.to_string(), member_to_value(member));
            }
            obj.insert(KEY_MEMBERS.to_string(), Value::Object(m));
        }
        ShapeKind::Enum { members } | ShapeKind::IntEnum { members } => {
            let mut m = Map::new();
            for (name, (member, value)) in members {
                let mut member_obj = match member_to_value(member) {
                    Value::Object(o) => o,
                    _ => Map::new(),
                };
                member_obj.insert(
                    KEY_VALUE.to_string(),
                    match value {
                        smithy_core::model::shape::EnumValue::String(s) => Value::String(s.clone()),
                        smithy_core::model::shape::EnumValue::Integer(i) => Value::Number((*i).into()),
                    },
                );
                m.insert(name.to_string(), Value::Object(member_obj));
            }
            obj.insert(KEY_MEMBERS.to_string(), Value::Object(m));
        }
        ShapeKind::Operation(op) => {
            insert_target(&mut obj, KEY_INPUT, &op.input);
            insert_target(&mut obj, KEY_OUTPUT, &op.output);
            insert_target_list(&mut obj, KEY_ERRORS, &op.errors);
        }
        ShapeKind::Resource(r) => {
            insert_id_map(&mut obj, KEY_IDENTIFIERS, &r.identifiers);
            insert_id_map(&mut obj, KEY_PROPERTIES, &r.properties);
            insert_target(&mut obj, KEY_CREATE, &r.create);
            insert_target(&mut obj, KEY_PUT, &r.put);
            insert_target(&mut obj, KEY_READ, &r.read);
            insert_target(&mut obj, KEY_UPDATE, &r.update);
            insert_target(&mut obj, KEY_DELETE, &r.delete);
            insert_target(&mut obj, KEY_LIST, &r.list);
            insert_target_list(&mut obj, KEY_OPERATIONS, &r.operations);
            insert_target_list(&mut obj, KEY_COLLECTION_OPERATIONS, &r.collection_operations);
            insert_target_list(&mut obj, KEY_RESOURCES, &r.resources);
        }
        ShapeKind::Service(s) => {
            if let Some(version) = &s.version {
                obj.insert(KEY_VERSION.to_string(), Value::String(version.clone()));
            }
            insert_target_list(&mut obj, KEY_OPERATIONS, &s.operations);
            insert_target_list(&mut obj, KEY_RESOURCES, &s.resources);
            insert_target_list(&mut obj, KEY_ERRORS, &s.errors);
            if !s.rename.is_empty() {
                let mut rename = Map::new();
                for (id, name) in &s.rename {
                    rename.insert(id.to_string(), Value::String(name.to_string()));
                }
                obj.insert(KEY_RENAME.to_string(), Value::Object(rename));
            }
        }
    }

    if !shape.traits().is_empty() {
        let mut traits = Map::new();
        for (id, a_trait) in shape.traits() {
            traits.insert(id.to_string(), node_to_json(a_trait.value()));
        }
        obj.insert(KEY_TRAITS.to_string(), Value::Object(traits));
    }

    if !shape.mixins().is_empty() {
        let mixins: Vec<Value> = shape
            .mixins()
            .iter()
            .map(|id| {
                let mut m = Map::new();
                m.insert(KEY_TARGET.to_string(), Value::String(id.to_string()));
                Value::Object(m)
            })
            .collect();
        obj.insert(KEY_MIXINS.to_string(), Value::Array(mixins));
    }

    Value::Object(obj)
}

fn member_to_value(member: &Member) -> Value {
    let mut obj = Map::new();
    obj.insert(KEY_TARGET.to_string(), Value::String(member.target().to_string()));
    if !member.traits().is_empty() {
        let mut traits = Map::new();
        for (id, a_trait) in member.traits() {
            traits.insert(id.to_string(), node_to_json(a_trait.value()));
        }
        obj.insert(KEY_TRAITS.to_string(), Value::Object(traits));
    }
    Value::Object(obj)
}

fn insert_target(obj: &mut Map<String, Value>, key: &str, target: &Option<ShapeID>) {
    if let Some(id) = target {
        let mut m = Map::new();
        m.insert(KEY_TARGET.to_string(), Value::String(id.to_string()));
        obj.insert(key.to_string(), Value::Object(m));
    }
}

fn insert_target_list(obj: &mut Map<String, Value>, key: &str, targets: &[ShapeID]) {
    if !targets.is_empty() {
        let values: Vec<Value> = targets
            .iter()
            .map(|id| {
                let mut m = Map::new();
                m.insert(KEY_TARGET.to_string(), Value::String(id.to_string()));
                Value::Object(m)
            })
            .collect();
        obj.insert(key.to_string(), Value::Array(values));
    }
}

fn insert_id_map(obj: &mut Map<String, Value>, key: &str, map: &indexmap::IndexMap<smithy_core::identity::Identifier, ShapeID>) {
    if !map.is_empty() {
        let mut m = Map::new();
        for (k, v) in map {
            m.insert(k.to_string(), Value::String(v.to_string()));
        }
        obj.insert(key.to_string(), Value::Object(m));
    }
}
