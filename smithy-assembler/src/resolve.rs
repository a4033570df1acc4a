/*!
Turns parsed-but-unresolved IDL sources, plus already-resolved JSON AST
models, into one `Model`: bare identifiers become absolute shape IDs,
traits are constructed from their raw node payloads, inline operation
input/output structures are materialized as their own shapes, and `apply`
statements are applied once every shape is in place.
*/

use crate::mixins;
use indexmap::IndexMap;
use smithy_core::identity::{Identifier, Namespace, ShapeID};
use smithy_core::model::diagnostics::Event;
use smithy_core::model::shape::{
    EnumValue, Member, Members, OperationShape, ResourceShape, ServiceShape, Shape, ShapeKind,
};
use smithy_core::model::Model;
use smithy_core::prelude::prelude_model;
use smithy_core::traits::{Trait, TraitFactoryRegistry};
use smithy_idl::deferred::{DeferredKind, DeferredMember, DeferredShape, DeferredTrait, ParsedSource, ShapeRef};
use std::collections::HashSet;
use std::str::FromStr;

/// Merge `json_models` (already fully resolved) and resolve `sources`
/// (still carrying bare identifiers) against each other and the prelude,
/// returning the combined model and every diagnostic raised along the way.
pub fn resolve(sources: Vec<ParsedSource>, json_models: Vec<Model>, registry: &TraitFactoryRegistry) -> (Model, Vec<Event>) {
    let mut model = prelude_model();
    let mut events = Vec::new();

    for json_model in json_models {
        merge_model(&mut model, json_model, &mut events);
    }

    let mut known: HashSet<ShapeID> = model.shape_ids_sorted().into_iter().cloned().collect();
    for source in &sources {
        let namespace = match &source.namespace {
            Some(ns) => ns,
            None => continue,
        };
        for shape in &source.shapes {
            let id = ShapeID::new(namespace.clone(), shape.name.clone());
            if let DeferredKind::Operation { input: None, inline_input: Some(_), .. } = &shape.kind {
                known.insert(synthetic_io_id(&id, "Input"));
            }
            if let DeferredKind::Operation { output: None, inline_output: Some(_), .. } = &shape.kind {
                known.insert(synthetic_io_id(&id, "Output"));
            }
            known.insert(id);
        }
    }

    let mut mixins_by_shape: IndexMap<ShapeID, Vec<ShapeID>> = IndexMap::new();
    let mut pending_applies = Vec::new();

    for source in &sources {
        let namespace = match &source.namespace {
            Some(ns) => ns.clone(),
            None => {
                events.push(Event::error("MISSING_NAMESPACE", "a source declares no namespace and was skipped"));
                continue;
            }
        };
        for (key, value) in &source.metadata {
            let _ = model.metadata_mut().entry(key.clone()).or_insert_with(|| value.clone());
        }
        for deferred in &source.shapes {
            let id = ShapeID::new(namespace.clone(), deferred.name.clone());
            let (shape, extra) = build_shape(&id, deferred, &namespace, &source.uses, &known, registry, &mut events);
            if !shape.mixins().is_empty() {
                mixins_by_shape.insert(id.clone(), shape.mixins().to_vec());
            }
            match model.shape(&id) {
                Some(existing) if existing != &shape => {
                    events.push(
                        Event::error(
                            "SHAPE_CONFLICT",
                            format!("shape '{}' is defined more than once with conflicting definitions", id),
                        )
                        .with_shape(id.clone()),
                    );
                }
                _ => model.add_shape(shape),
            }
            for extra_shape in extra {
                model.add_shape(extra_shape);
            }
        }
        for apply in &source.applies {
            pending_applies.push((namespace.clone(), source.uses.clone(), apply.clone()));
        }
    }

    mixins::apply_mixins(&mut model, &mixins_by_shape, &mut events);

    for (namespace, uses, apply) in pending_applies {
        let target = resolve_ref(&apply.target, &namespace, &uses, &known, &mut events);
        for deferred_trait in &apply.traits {
            if let Some(built) = build_trait(deferred_trait, &namespace, &uses, &known, &target, registry, &mut events) {
                apply_trait_to_target(&mut model, &target, built, &mut events);
            }
        }
    }

    (model, events)
}

fn merge_model(target: &mut Model, incoming: Model, events: &mut Vec<Event>) {
    for (key, value) in incoming.metadata().clone() {
        let _ = target.metadata_mut().entry(key).or_insert(value);
    }
    for shape in incoming.shapes_sorted() {
        match target.shape(shape.id()) {
            Some(existing) if existing != shape => {
                events.push(
                    Event::error(
                        "SHAPE_CONFLICT",
                        format!("shape '{}' is defined more than once with conflicting definitions", shape.id()),
                    )
                    .with_shape(shape.id().clone()),
                );
            }
            Some(_) => {}
            None => target.add_shape(shape.clone()),
        }
    }
}

fn apply_trait_to_target(model: &mut Model, target: &ShapeID, a_trait: Trait, events: &mut Vec<Event>) {
    let shape_id = target.to_shape_id();
    match model.shape_mut(&shape_id) {
        Some(shape) if target.is_member() => apply_member_trait(shape, target, a_trait),
        Some(shape) => shape.add_trait(a_trait),
        None => {
            events.push(
                Event::error("UNKNOWN_SHAPE_TARGET", format!("apply target '{}' does not exist", target)).with_shape(target.clone()),
            );
        }
    }
}

fn apply_member_trait(shape: &mut Shape, member_id: &ShapeID, a_trait: Trait) {
    let member_name = match member_id.member_name() {
        Some(n) => n.clone(),
        None => return,
    };
    match shape.kind_mut() {
        ShapeKind::Structure { members } | ShapeKind::Union { members } => {
            if let Some(m) = members.get_mut(&member_name) {
                m.add_trait(a_trait);
            }
        }
        ShapeKind::List { member } => {
            if member.id().member_name() == Some(&member_name) {
                member.add_trait(a_trait);
            }
        }
        ShapeKind::Map { key, value } => {
            if key.id().member_name() == Some(&member_name) {
                key.add_trait(a_trait);
            } else if value.id().member_name() == Some(&member_name) {
                value.add_trait(a_trait);
            }
        }
        ShapeKind::Enum { members } | ShapeKind::IntEnum { members } => {
            if let Some((m, _)) = members.get_mut(&member_name) {
                m.add_trait(a_trait);
            }
        }
        _ => {}
    }
}

fn build_shape(
    id: &ShapeID,
    deferred: &DeferredShape,
    namespace: &Namespace,
    uses: &[ShapeID],
    known: &HashSet<ShapeID>,
    registry: &TraitFactoryRegistry,
    events: &mut Vec<Event>,
) -> (Shape, Vec<Shape>) {
    let mut extra = Vec::new();
    let kind = match &deferred.kind {
        DeferredKind::Simple(s) => ShapeKind::Simple(*s),
        DeferredKind::List { member } => ShapeKind::List {
            member: build_member(id, member, namespace, uses, known, registry, events),
        },
        DeferredKind::Map { key, value } => ShapeKind::Map {
            key: build_member(id, key, namespace, uses, known, registry, events),
            value: build_member(id, value, namespace, uses, known, registry, events),
        },
        DeferredKind::Structure { members } => ShapeKind::Structure {
            members: build_members(id, members, namespace, uses, known, registry, events),
        },
        DeferredKind::Union { members } => ShapeKind::Union {
            members: build_members(id, members, namespace, uses, known, registry, events),
        },
        DeferredKind::Enum { members } => ShapeKind::Enum {
            members: build_enum_members(id, members, false, namespace, uses, known, registry, events),
        },
        DeferredKind::IntEnum { members } => ShapeKind::IntEnum {
            members: build_enum_members(id, members, true, namespace, uses, known, registry, events),
        },
        DeferredKind::Operation { input, inline_input, output, inline_output, errors } => {
            let resolved_input = match (input, inline_input) {
                (Some(r), _) => Some(resolve_ref(r, namespace, uses, known, events)),
                (None, Some(members)) => {
                    let synth_id = synthetic_io_id(id, "Input");
                    let synth_members = build_members(&synth_id, members, namespace, uses, known, registry, events);
                    extra.push(Shape::new(synth_id.clone(), ShapeKind::Structure { members: synth_members }));
                    Some(synth_id)
                }
                (None, None) => None,
            };
            let resolved_output = match (output, inline_output) {
                (Some(r), _) => Some(resolve_ref(r, namespace, uses, known, events)),
                (None, Some(members)) => {
                    let synth_id = synthetic_io_id(id, "Output");
                    let synth_members = build_members(&synth_id, members, namespace, uses, known, registry, events);
                    extra.push(Shape::new(synth_id.clone(), ShapeKind::Structure { members: synth_members }));
                    Some(synth_id)
                }
                (None, None) => None,
            };
            ShapeKind::Operation(OperationShape {
                input: resolved_input,
                output: resolved_output,
                errors: errors.iter().map(|e| resolve_ref(e, namespace, uses, known, events)).collect(),
            })
        }
        DeferredKind::Resource {
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
        } => ShapeKind::Resource(ResourceShape {
            identifiers: identifiers
                .iter()
                .map(|(k, v)| (k.clone(), resolve_ref(v, namespace, uses, known, events)))
                .collect(),
            properties: properties
                .iter()
                .map(|(k, v)| (k.clone(), resolve_ref(v, namespace, uses, known, events)))
                .collect(),
            create: create.as_ref().map(|r| resolve_ref(r, namespace, uses, known, events)),
            put: put.as_ref().map(|r| resolve_ref(r, namespace, uses, known, events)),
            read: read.as_ref().map(|r| resolve_ref(r, namespace, uses, known, events)),
            update: update.as_ref().map(|r| resolve_ref(r, namespace, uses, known, events)),
            delete: delete.as_ref().map(|r| resolve_ref(r, namespace, uses, known, events)),
            list: list.as_ref().map(|r| resolve_ref(r, namespace, uses, known, events)),
            operations: operations.iter().map(|r| resolve_ref(r, namespace, uses, known, events)).collect(),
            collection_operations: collection_operations
                .iter()
                .map(|r| resolve_ref(r, namespace, uses, known, events))
                .collect(),
            resources: resources.iter().map(|r| resolve_ref(r, namespace, uses, known, events)).collect(),
        }),
        DeferredKind::Service { version, operations, resources, errors, rename } => ShapeKind::Service(ServiceShape {
            version: version.clone(),
            operations: operations.iter().map(|r| resolve_ref(r, namespace, uses, known, events)).collect(),
            resources: resources.iter().map(|r| resolve_ref(r, namespace, uses, known, events)).collect(),
            errors: errors.iter().map(|r| resolve_ref(r, namespace, uses, known, events)).collect(),
            rename: rename
                .iter()
                .map(|(k, v)| (resolve_ref(k, namespace, uses, known, events), v.clone()))
                .collect(),
        }),
    };

    let mut shape = Shape::new(id.clone(), kind);
    shape.set_source_location(deferred.location.clone());
    for t in &deferred.traits {
        if let Some(built) = build_trait(t, namespace, uses, known, id, registry, events) {
            shape.add_trait(built);
        }
    }
    for m in &deferred.mixins {
        shape.add_mixin(resolve_ref(m, namespace, uses, known, events));
    }
    (shape, extra)
}

fn build_members(
    shape_id: &ShapeID,
    members: &[DeferredMember],
    namespace: &Namespace,
    uses: &[ShapeID],
    known: &HashSet<ShapeID>,
    registry: &TraitFactoryRegistry,
    events: &mut Vec<Event>,
) -> Members {
    let mut out = IndexMap::new();
    for dm in members {
        out.insert(dm.name.clone(), build_member(shape_id, dm, namespace, uses, known, registry, events));
    }
    out
}

fn build_member(
    shape_id: &ShapeID,
    dm: &DeferredMember,
    namespace: &Namespace,
    uses: &[ShapeID],
    known: &HashSet<ShapeID>,
    registry: &TraitFactoryRegistry,
    events: &mut Vec<Event>,
) -> Member {
    let member_id = shape_id.to_member(dm.name.clone());
    let target = resolve_ref(&dm.target, namespace, uses, known, events);
    let mut member = Member::new(member_id.clone(), target);
    member.set_source_location(dm.location.clone());
    for t in &dm.traits {
        if let Some(built) = build_trait(t, namespace, uses, known, &member_id, registry, events) {
            member.add_trait(built);
        }
    }
    member
}

fn build_enum_members(
    shape_id: &ShapeID,
    members: &[DeferredMember],
    is_int: bool,
    namespace: &Namespace,
    uses: &[ShapeID],
    known: &HashSet<ShapeID>,
    registry: &TraitFactoryRegistry,
    events: &mut Vec<Event>,
) -> IndexMap<Identifier, (Member, EnumValue)> {
    let mut out = IndexMap::new();
    for dm in members {
        let member_id = shape_id.to_member(dm.name.clone());
        let target = smithy_core::prelude::unit_id();
        let mut member = Member::new(member_id.clone(), target);
        member.set_source_location(dm.location.clone());
        for t in &dm.traits {
            if let Some(built) = build_trait(t, namespace, uses, known, &member_id, registry, events) {
                member.add_trait(built);
            }
        }
        let enum_value = if is_int {
            let i = dm.value.as_ref().and_then(|n| n.as_number().ok()).and_then(|n| n.to_i64()).unwrap_or(0);
            EnumValue::Integer(i)
        } else {
            let s = dm
                .value
                .as_ref()
                .and_then(|n| n.as_string().ok())
                .map(str::to_string)
                .unwrap_or_else(|| dm.name.as_str().to_string());
            EnumValue::String(s)
        };
        out.insert(dm.name.clone(), (member, enum_value));
    }
    out
}

fn build_trait(
    deferred: &DeferredTrait,
    namespace: &Namespace,
    uses: &[ShapeID],
    known: &HashSet<ShapeID>,
    owner: &ShapeID,
    registry: &TraitFactoryRegistry,
    events: &mut Vec<Event>,
) -> Option<Trait> {
    let trait_id = resolve_ref(&deferred.trait_id, namespace, uses, known, events);
    match registry.construct(trait_id, deferred.value.clone()) {
        Ok(t) => Some(t),
        Err(message) => {
            events.push(
                Event::error("TRAIT_CONSTRUCTION_FAILED", message)
                    .with_shape(owner.clone())
                    .with_location(deferred.location.clone()),
            );
            None
        }
    }
}

/// Resolve a bare or absolute reference to an absolute shape ID, trying
/// the declaring namespace, then `use` imports, then the prelude, in that
/// order. A reference that resolves nowhere still returns a best-guess
/// same-namespace ID (so the model stays structurally complete) after
/// recording `UNKNOWN_SHAPE_TARGET`.
fn resolve_ref(r: &ShapeRef, namespace: &Namespace, uses: &[ShapeID], known: &HashSet<ShapeID>, events: &mut Vec<Event>) -> ShapeID {
    match r {
        ShapeRef::Absolute(id) => id.clone(),
        ShapeRef::Relative(ident) => {
            let same_ns = ShapeID::new(namespace.clone(), ident.clone());
            if known.contains(&same_ns) {
                return same_ns;
            }
            if let Some(u) = uses.iter().find(|u| u.shape_name() == ident) {
                return u.clone();
            }
            let prelude = ShapeID::new(Namespace::prelude(), ident.clone());
            if known.contains(&prelude) {
                return prelude;
            }
            events.push(
                Event::error("UNKNOWN_SHAPE_TARGET", format!("cannot resolve '{}' from namespace '{}'", ident, namespace))
                    .with_shape(same_ns.clone()),
            );
            same_ns
        }
    }
}

/// The shape ID of an operation's synthesized inline input/output
/// structure, e.g. `smithy.example#GetCityInput`.
fn synthetic_io_id(operation_id: &ShapeID, suffix: &str) -> ShapeID {
    let name = format!("{}{}", operation_id.shape_name(), suffix);
    let ident = Identifier::from_str(&name).expect("operation name plus an ascii suffix is always a valid identifier");
    ShapeID::new(operation_id.namespace().clone(), ident)
}
