/*!
The Smithy prelude: the built-in `smithy.api` namespace and the
standard trait factory registrations.

Every loader starts from [`prelude_model`] and [`prelude_trait_factories`]
so that unqualified references like `String` or `@required` resolve
without the caller having to declare them. Forward-reference resolution
tries, in order, the same namespace, `use` imports, then the prelude
namespace.
*/

use crate::identity::{Identifier, Namespace, ShapeID};
use crate::model::shape::{Members, Shape, ShapeKind, SimpleKind};
use crate::model::Model;
use crate::traits::{Trait, TraitFactoryRegistry};
use std::str::FromStr;

// ------------------------------------------------------------------------------------------------
// Public Functions
// ------------------------------------------------------------------------------------------------

/// The namespace for the Smithy prelude, `smithy.api`.
pub const PRELUDE_NAMESPACE: &str = "smithy.api";

fn id(name: &str) -> ShapeID {
    ShapeID::new(
        Namespace::from_str(PRELUDE_NAMESPACE).unwrap(),
        Identifier::from_str(name).unwrap(),
    )
}

lazy_static! {
    static ref PRELUDE_MODEL: Model = build_prelude_model();
    static ref PRELUDE_TRAIT_FACTORIES: TraitFactoryRegistry = build_prelude_trait_factories();
}

/// A model containing every built-in simple shape of `smithy.api`: the
/// boxed and primitive numeric/boolean types, `String`, `Blob`,
/// `Timestamp`, `Document`, `BigInteger`, and `BigDecimal`. Every caller
/// gets its own clone of a model built once and cached behind
/// [`PRELUDE_MODEL`].
pub fn prelude_model() -> Model {
    PRELUDE_MODEL.clone()
}

fn build_prelude_model() -> Model {
    let mut model = Model::new();
    let simple_shapes = [
        ("String", SimpleKind::String),
        ("Blob", SimpleKind::Blob),
        ("BigInteger", SimpleKind::BigInteger),
        ("BigDecimal", SimpleKind::BigDecimal),
        ("Timestamp", SimpleKind::Timestamp),
        ("Document", SimpleKind::Document),
        ("Boolean", SimpleKind::Boolean),
        ("PrimitiveBoolean", SimpleKind::Boolean),
        ("Byte", SimpleKind::Byte),
        ("PrimitiveByte", SimpleKind::Byte),
        ("Short", SimpleKind::Short),
        ("PrimitiveShort", SimpleKind::Short),
        ("Integer", SimpleKind::Integer),
        ("PrimitiveInteger", SimpleKind::Integer),
        ("Long", SimpleKind::Long),
        ("PrimitiveLong", SimpleKind::Long),
        ("Float", SimpleKind::Float),
        ("PrimitiveFloat", SimpleKind::Float),
        ("Double", SimpleKind::Double),
        ("PrimitiveDouble", SimpleKind::Double),
    ];
    for (name, kind) in simple_shapes {
        model.add_shape(Shape::new(id(name), ShapeKind::Simple(kind)));
    }
    // The unit type: an empty structure, used as the implicit target of
    // enum members and of operations with no declared input/output.
    model.add_shape(Shape::new(
        id("Unit"),
        ShapeKind::Structure {
            members: Members::new(),
        },
    ));
    model
}

/// The shape ID of the implicit unit type, `smithy.api#Unit`.
pub fn unit_id() -> ShapeID {
    id("Unit")
}

/// The well-known trait shape IDs declared by the prelude. Each is a
/// plain `Identifier -> ShapeID` lookup; a `TraitFactoryRegistry` is
/// built from these via [`prelude_trait_factories`].
pub mod trait_ids {
    use super::id;
    use crate::identity::ShapeID;

    macro_rules! prelude_trait_ids {
        ($($fn_name:ident => $name:literal),* $(,)?) => {
            $(
                /// Returns the prelude trait shape ID for this trait name.
                pub fn $fn_name() -> ShapeID {
                    id($name)
                }
            )*
        };
    }

    prelude_trait_ids! {
        documentation => "documentation",
        required => "required",
        error => "error",
        http => "http",
        http_label => "httpLabel",
        http_query => "httpQuery",
        http_header => "httpHeader",
        http_payload => "httpPayload",
        length => "length",
        pattern => "pattern",
        range => "range",
        unique_items => "uniqueItems",
        tags => "tags",
        deprecated => "deprecated",
        sensitive => "sensitive",
        readonly => "readonly",
        idempotent => "idempotent",
        paginated => "paginated",
        default => "default",
        client_optional => "clientOptional",
        mixin => "mixin",
        trait_def => "trait",
        suppress => "suppress",
        enum_trait => "enum",
        box_trait => "box",
        title => "title",
        since => "since",
        examples => "examples",
    }
}

/// A registry with factories for every prelude trait. Most traits accept
/// any well-formed `Node` (deeper payload validation is the validator's
/// job); a handful of annotation traits
/// (`required`, `readonly`, `idempotent`, `sensitive`, `box`) additionally
/// reject a non-empty payload. Built once and cached behind
/// [`PRELUDE_TRAIT_FACTORIES`]; every caller gets its own clone.
pub fn prelude_trait_factories() -> TraitFactoryRegistry {
    PRELUDE_TRAIT_FACTORIES.clone()
}

fn build_prelude_trait_factories() -> TraitFactoryRegistry {
    let mut registry = TraitFactoryRegistry::default();
    let annotation_only = [
        trait_ids::required(),
        trait_ids::readonly(),
        trait_ids::idempotent(),
        trait_ids::sensitive(),
        trait_ids::box_trait(),
        trait_ids::client_optional(),
    ];
    for t in annotation_only {
        registry.register(t, construct_annotation);
    }
    let any_value = [
        trait_ids::documentation(),
        trait_ids::error(),
        trait_ids::http(),
        trait_ids::http_label(),
        trait_ids::http_query(),
        trait_ids::http_header(),
        trait_ids::http_payload(),
        trait_ids::length(),
        trait_ids::pattern(),
        trait_ids::range(),
        trait_ids::unique_items(),
        trait_ids::tags(),
        trait_ids::deprecated(),
        trait_ids::paginated(),
        trait_ids::default(),
        trait_ids::mixin(),
        trait_ids::trait_def(),
        trait_ids::suppress(),
        trait_ids::enum_trait(),
        trait_ids::title(),
        trait_ids::since(),
        trait_ids::examples(),
    ];
    for t in any_value {
        registry.register(t, construct_any);
    }
    registry
}

fn construct_annotation(id: ShapeID, value: crate::node::Node) -> Result<Trait, String> {
    if value.is_empty_object() {
        Ok(Trait::new(id, value))
    } else {
        Err(format!(
            "trait '{}' is an annotation trait and must have an empty object value",
            id
        ))
    }
}

fn construct_any(id: ShapeID, value: crate::node::Node) -> Result<Trait, String> {
    Ok(Trait::new(id, value))
}
