/*!
A visitor over the `ShapeKind` union: exhaustive matching over the ~20
shape variants is expressed once here so validators, transforms, and
writers share one dispatch point instead of re-deriving the match arms.
*/

use crate::model::shape::{Member, OperationShape, ResourceShape, ServiceShape, Shape, ShapeKind, SimpleKind};

/// Implement to visit every `ShapeKind` variant of a `Shape`. The default
/// method bodies do nothing, so an implementor need only override the
/// variants it cares about.
pub trait ShapeVisitor {
    fn visit_simple(&mut self, _shape: &Shape, _kind: SimpleKind) {}
    fn visit_list(&mut self, _shape: &Shape, _member: &Member) {}
    fn visit_map(&mut self, _shape: &Shape, _key: &Member, _value: &Member) {}
    fn visit_structure(&mut self, _shape: &Shape, _members: &[&Member]) {}
    fn visit_union(&mut self, _shape: &Shape, _members: &[&Member]) {}
    fn visit_enum(&mut self, _shape: &Shape) {}
    fn visit_int_enum(&mut self, _shape: &Shape) {}
    fn visit_operation(&mut self, _shape: &Shape, _operation: &OperationShape) {}
    fn visit_resource(&mut self, _shape: &Shape, _resource: &ResourceShape) {}
    fn visit_service(&mut self, _shape: &Shape, _service: &ServiceShape) {}
}

/// Dispatch `shape` to the matching `ShapeVisitor` method. This is the
/// single place that must be updated if `ShapeKind` ever grows a variant;
/// every other consumer goes through here instead of matching directly.
pub fn walk_shape(visitor: &mut dyn ShapeVisitor, shape: &Shape) {
    match shape.kind() {
        ShapeKind::Simple(k) => visitor.visit_simple(shape, *k),
        ShapeKind::List { member } => visitor.visit_list(shape, member),
        ShapeKind::Map { key, value } => visitor.visit_map(shape, key, value),
        ShapeKind::Structure { members } => {
            let members: Vec<&Member> = members.values().collect();
            visitor.visit_structure(shape, &members);
        }
        ShapeKind::Union { members } => {
            let members: Vec<&Member> = members.values().collect();
            visitor.visit_union(shape, &members);
        }
        ShapeKind::Enum { .. } => visitor.visit_enum(shape),
        ShapeKind::IntEnum { .. } => visitor.visit_int_enum(shape),
        ShapeKind::Operation(op) => visitor.visit_operation(shape, op),
        ShapeKind::Resource(r) => visitor.visit_resource(shape, r),
        ShapeKind::Service(s) => visitor.visit_service(shape, s),
    }
}
