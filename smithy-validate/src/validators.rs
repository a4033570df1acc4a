use crate::Validator;
use heck::ShoutySnakeCase;
use smithy_core::identity::ShapeID;
use smithy_core::model::diagnostics::Event;
use smithy_core::model::shape::{EnumValue, ShapeKind};
use smithy_core::model::Model;
use smithy_core::prelude::trait_ids;
use indexmap::IndexMap;

/// Every member target, operation input/output/error, resource binding,
/// and service closure entry must resolve to a shape actually present
/// in the model. The loader already resolves what it can at parse time
/// (falling back to a best guess on failure); this re-checks the final,
/// possibly transformed, model independently.
pub struct TargetResolutionValidator;

impl Validator for TargetResolutionValidator {
    fn label(&self) -> &'static str {
        "TargetResolution"
    }

    fn validate(&self, model: &Model) -> Vec<Event> {
        let mut events = Vec::new();
        for shape in model.shapes_sorted() {
            for target in shape.all_referenced_shapes() {
                if !model.has_shape(&target.to_shape_id()) {
                    events.push(
                        Event::error(
                            "UNKNOWN_SHAPE_TARGET",
                            format!("'{}' refers to unknown shape '{}'", shape.id(), target),
                        )
                        .with_shape(shape.id().clone()),
                    );
                }
            }
        }
        events
    }
}

/// A handful of traits only make sense on particular shape kinds:
/// `@error` on structures, `@readonly`/`@idempotent`/`@paginated` on
/// operations, member-only HTTP binding traits on members.
pub struct ShapeKindConstraintsValidator;

impl Validator for ShapeKindConstraintsValidator {
    fn label(&self) -> &'static str {
        "ShapeKindConstraints"
    }

    fn validate(&self, model: &Model) -> Vec<Event> {
        let mut events = Vec::new();
        for shape in model.shapes_sorted() {
            let is_structure = matches!(shape.kind(), ShapeKind::Structure { .. });
            let is_operation = matches!(shape.kind(), ShapeKind::Operation(_));
            check(&mut events, shape.id(), is_structure, shape.has_trait(&trait_ids::error()), "@error", "a structure");
            for (trait_id, name) in [
                (trait_ids::readonly(), "@readonly"),
                (trait_ids::idempotent(), "@idempotent"),
                (trait_ids::paginated(), "@paginated"),
            ] {
                check(&mut events, shape.id(), is_operation, shape.has_trait(&trait_id), name, "an operation");
            }
            if let ShapeKind::Structure { members } | ShapeKind::Union { members } = shape.kind() {
                for member in members.values() {
                    for trait_id in [trait_ids::http_label(), trait_ids::http_query(), trait_ids::http_header(), trait_ids::http_payload()] {
                        if member.has_trait(&trait_id) && !is_operation_member_container(model, shape.id()) {
                            // HTTP binding traits are only meaningful on members of an
                            // operation's input/output structure; flag any other use.
                            events.push(
                                Event::warning(
                                    "TRAIT_NOT_APPLICABLE",
                                    format!("'{}${}' carries an HTTP binding trait outside an operation's input/output", shape.id(), member.id()),
                                )
                                .with_shape(member.id().clone()),
                            );
                        }
                    }
                }
            }
            // Unlike unions and enums, structures may legally have zero
            // members (the prelude's `Unit` shape is one).
            match shape.kind() {
                ShapeKind::Union { members } if members.is_empty() => {
                    events.push(Event::error("EmptyUnion", format!("'{}' is a union with no members", shape.id())).with_shape(shape.id().clone()));
                }
                ShapeKind::Enum { members } if members.is_empty() => {
                    events.push(Event::error("EmptyEnum", format!("'{}' is an enum with no values", shape.id())).with_shape(shape.id().clone()));
                }
                ShapeKind::IntEnum { members } if members.is_empty() => {
                    events.push(Event::error("EmptyEnum", format!("'{}' is an intEnum with no values", shape.id())).with_shape(shape.id().clone()));
                }
                _ => {}
            }
        }
        events
    }
}

fn check(events: &mut Vec<Event>, id: &ShapeID, applicable: bool, present: bool, trait_name: &str, expected: &str) {
    if present && !applicable {
        events.push(
            Event::error("TRAIT_NOT_APPLICABLE", format!("'{}' carries {} but is not {}", id, trait_name, expected))
                .with_shape(id.clone()),
        );
    }
}

fn is_operation_member_container(model: &Model, id: &ShapeID) -> bool {
    model.operations().any(|op| match op.kind() {
        ShapeKind::Operation(o) => o.input.as_ref() == Some(id) || o.output.as_ref() == Some(id),
        _ => false,
    })
}

/// A service's transitive operation/resource/error closure must have no
/// two shapes whose simple names collide case-insensitively unless a
/// `rename` entry covers the collision (Open Question 1: reported as
/// `RenameConflict` rather than silently picked).
pub struct ServiceClosureValidator;

impl Validator for ServiceClosureValidator {
    fn label(&self) -> &'static str {
        "ServiceClosure"
    }

    fn validate(&self, model: &Model) -> Vec<Event> {
        let mut events = Vec::new();
        for service in model.services() {
            let shape = match service.kind() {
                ShapeKind::Service(s) => s,
                _ => continue,
            };
            let mut closure = Vec::new();
            collect_closure(model, &shape.operations, &shape.resources, &mut closure);
            closure.extend(shape.errors.iter().cloned());

            let mut by_name: IndexMap<String, Vec<ShapeID>> = IndexMap::new();
            for id in closure {
                if shape.rename.contains_key(&id) {
                    continue;
                }
                by_name.entry(id.case_insensitive_simple_name()).or_default().push(id);
            }
            for (name, ids) in by_name {
                if ids.len() > 1 {
                    events.push(
                        Event::error(
                            "RenameConflict",
                            format!(
                                "service '{}' closure has {} shapes named '{}' case-insensitively with no rename entry: {}",
                                service.id(),
                                ids.len(),
                                name,
                                ids.iter().map(ShapeID::to_string).collect::<Vec<_>>().join(", "),
                            ),
                        )
                        .with_shape(service.id().clone()),
                    );
                }
            }
        }
        events
    }
}

fn collect_closure(model: &Model, operations: &[ShapeID], resources: &[ShapeID], out: &mut Vec<ShapeID>) {
    for op_id in operations {
        out.push(op_id.clone());
        if let Some(op_shape) = model.shape(op_id) {
            if let ShapeKind::Operation(op) = op_shape.kind() {
                out.extend(op.errors.iter().cloned());
            }
        }
    }
    for res_id in resources {
        out.push(res_id.clone());
        if let Some(res_shape) = model.shape(res_id) {
            if let ShapeKind::Resource(r) = res_shape.kind() {
                let lifecycle: Vec<ShapeID> = [&r.create, &r.put, &r.read, &r.update, &r.delete, &r.list]
                    .into_iter()
                    .flatten()
                    .cloned()
                    .chain(r.operations.iter().cloned())
                    .chain(r.collection_operations.iter().cloned())
                    .collect();
                collect_closure(model, &lifecycle, &r.resources, out);
            }
        }
    }
}

/// `@paginated`'s `inputToken`/`outputToken`/`items`/`pageSize` keys, when
/// present, must name members that actually exist on the operation's
/// input or output structure.
pub struct PaginationValidator;

impl Validator for PaginationValidator {
    fn label(&self) -> &'static str {
        "Pagination"
    }

    fn validate(&self, model: &Model) -> Vec<Event> {
        let mut events = Vec::new();
        for op in model.paginated_operations(&trait_ids::paginated()) {
            let operation = match op.kind() {
                ShapeKind::Operation(o) => o,
                _ => continue,
            };
            let value = op.get_trait(&trait_ids::paginated()).unwrap().value();
            for (key, target_id) in [("inputToken", operation.input.as_ref()), ("outputToken", operation.output.as_ref()), ("items", operation.output.as_ref()), ("pageSize", operation.input.as_ref())] {
                let member_name = match value.get(key).and_then(|n| n.as_string().ok()) {
                    Some(n) => n,
                    None => continue,
                };
                let resolved = target_id.and_then(|id| model.shape(id)).map(|s| match s.kind() {
                    ShapeKind::Structure { members } => members.keys().any(|m| m.as_str() == member_name),
                    _ => false,
                });
                if resolved != Some(true) {
                    events.push(
                        Event::error(
                            "INVALID_PAGINATION",
                            format!("'{}' @paginated's '{}' names member '{}', not found on its bound structure", op.id(), key, member_name),
                        )
                        .with_shape(op.id().clone()),
                    );
                }
            }
        }
        events
    }
}

/// `enum`/`intEnum` members must carry distinct literal values.
pub struct EnumValueValidator;

impl Validator for EnumValueValidator {
    fn label(&self) -> &'static str {
        "EnumValue"
    }

    fn validate(&self, model: &Model) -> Vec<Event> {
        let mut events = Vec::new();
        for shape in model.shapes_sorted() {
            if let ShapeKind::Enum { members } | ShapeKind::IntEnum { members } = shape.kind() {
                let mut seen: Vec<&EnumValue> = Vec::new();
                for (name, (member, value)) in members {
                    if seen.iter().any(|v| *v == value) {
                        events.push(
                            Event::error("DUPLICATE_ENUM_VALUE", format!("'{}' member '{}' repeats an already-used value", shape.id(), name))
                                .with_shape(shape.id().clone()),
                        );
                    }
                    seen.push(value);

                    let conventional = name.as_str().to_shouty_snake_case();
                    if name.as_str() != conventional {
                        events.push(
                            Event::note(
                                "EnumMemberCasing",
                                format!("'{}' member '{}' doesn't follow the SCREAMING_SNAKE_CASE convention ('{}')", shape.id(), name, conventional),
                            )
                            .with_shape(member.id().clone()),
                        );
                    }
                }
            }
        }
        events
    }
}

/// `@http`-bound operations must keep their label/payload/header bindings
/// internally consistent: `@httpPayload` can't share a member with
/// `@httpHeader`/`@httpQuery`, at most one member carries `@httpPayload`,
/// and every `@httpLabel` member is both `@required` and named by a
/// `{label}` segment of the operation's `@http` uri.
pub struct HttpBindingValidator;

impl Validator for HttpBindingValidator {
    fn label(&self) -> &'static str {
        "HttpBinding"
    }

    fn validate(&self, model: &Model) -> Vec<Event> {
        let mut events = Vec::new();
        for shape in model.shapes_sorted() {
            let operation = match shape.kind() {
                ShapeKind::Operation(o) => o,
                _ => continue,
            };
            let http_trait = match shape.get_trait(&trait_ids::http()) {
                Some(t) => t,
                None => continue,
            };
            let uri_labels = http_trait
                .value()
                .get("uri")
                .and_then(|n| n.as_string().ok())
                .map(uri_label_names)
                .unwrap_or_default();

            if let Some(input_id) = &operation.input {
                check_http_bindings(model, input_id, shape.id(), &uri_labels, true, &mut events);
            }
            if let Some(output_id) = &operation.output {
                check_http_bindings(model, output_id, shape.id(), &[], false, &mut events);
            }
        }
        events
    }
}

/// Pulls the `{label}` segment names out of an `@http` uri pattern, e.g.
/// `"/things/{thingId}"` yields `["thingId"]`. A `+` greedy-label suffix
/// (`{proxy+}`) is stripped since it names the same member.
fn uri_label_names(uri: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut chars = uri.chars();
    while let Some(c) = chars.next() {
        if c == '{' {
            let name: String = chars.by_ref().take_while(|c2| *c2 != '}').collect();
            names.push(name.trim_end_matches('+').to_string());
        }
    }
    names
}

fn check_http_bindings(
    model: &Model,
    structure_id: &ShapeID,
    op_id: &ShapeID,
    uri_labels: &[String],
    is_input: bool,
    events: &mut Vec<Event>,
) {
    let members = match model.shape(structure_id).map(smithy_core::model::shape::Shape::kind) {
        Some(ShapeKind::Structure { members }) => members,
        _ => return,
    };

    let mut payload_members = Vec::new();
    for member in members.values() {
        let has_payload = member.has_trait(&trait_ids::http_payload());
        let has_header = member.has_trait(&trait_ids::http_header());
        let has_query = member.has_trait(&trait_ids::http_query());
        let has_label = member.has_trait(&trait_ids::http_label());

        if has_payload {
            payload_members.push(member.id().clone());
            if has_header || has_query {
                events.push(
                    Event::error(
                        "HttpBindingConflict",
                        format!("'{}' carries @httpPayload together with @httpHeader/@httpQuery", member.id()),
                    )
                    .with_shape(member.id().clone()),
                );
            }
        }

        if is_input && has_label {
            if !member.has_trait(&trait_ids::required()) {
                events.push(
                    Event::error(
                        "HttpLabelNotRequired",
                        format!("'{}' carries @httpLabel but is not @required", member.id()),
                    )
                    .with_shape(member.id().clone()),
                );
            }
            let name = member.id().member_name().map(|n| n.as_str()).unwrap_or_default();
            if !uri_labels.iter().any(|l| l == name) {
                events.push(
                    Event::error(
                        "HttpLabelNotBound",
                        format!("'{}' carries @httpLabel but operation '{}' has no matching '{{{}}}' segment in its @http uri", member.id(), op_id, name),
                    )
                    .with_shape(member.id().clone()),
                );
            }
        }
    }

    if payload_members.len() > 1 {
        events.push(
            Event::error(
                "MultipleHttpPayloadBindings",
                format!(
                    "'{}' has {} members carrying @httpPayload ({}); at most one is allowed",
                    structure_id,
                    payload_members.len(),
                    payload_members.iter().map(ShapeID::to_string).collect::<Vec<_>>().join(", "),
                ),
            )
            .with_shape(structure_id.clone()),
        );
    }
}

/// A member carrying both `@required` and `@default` is valid (Open
/// Question 2) but worth a reminder that `@required`'s guarantee is the
/// stronger one and the default is only ever observed client-side.
pub struct DefaultRequiredValidator;

impl Validator for DefaultRequiredValidator {
    fn label(&self) -> &'static str {
        "DefaultRequired"
    }

    fn validate(&self, model: &Model) -> Vec<Event> {
        let mut events = Vec::new();
        for shape in model.shapes_sorted() {
            if let ShapeKind::Structure { members } | ShapeKind::Union { members } = shape.kind() {
                for member in members.values() {
                    if member.has_trait(&trait_ids::required()) && member.has_trait(&trait_ids::default()) {
                        events.push(
                            Event::note(
                                "SyntheticDefault",
                                format!("'{}${}' carries both @required and @default; the default is redundant once required", shape.id(), member.id().member_name().unwrap()),
                            )
                            .with_shape(member.id().clone()),
                        );
                    }
                }
            }
        }
        events
    }
}
