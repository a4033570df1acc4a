/*!
Key names used in the JSON AST serialization.
*/

// ------------------------------------------------------------------------------------------------
// Top level
// ------------------------------------------------------------------------------------------------

pub(crate) const KEY_SMITHY: &str = "smithy";
pub(crate) const KEY_METADATA: &str = "metadata";
pub(crate) const KEY_SHAPES: &str = "shapes";

// ------------------------------------------------------------------------------------------------
// Shape
// ------------------------------------------------------------------------------------------------

pub(crate) const KEY_TYPE: &str = "type";
pub(crate) const KEY_MEMBERS: &str = "members";
pub(crate) const KEY_MEMBER: &str = "member";
pub(crate) const KEY_KEY: &str = "key";
pub(crate) const KEY_VALUE: &str = "value";
pub(crate) const KEY_TARGET: &str = "target";
pub(crate) const KEY_TRAITS: &str = "traits";
pub(crate) const KEY_MIXINS: &str = "mixins";

// ------------------------------------------------------------------------------------------------
// Operation / resource / service
// ------------------------------------------------------------------------------------------------

pub(crate) const KEY_INPUT: &str = "input";
pub(crate) const KEY_OUTPUT: &str = "output";
pub(crate) const KEY_ERRORS: &str = "errors";
pub(crate) const KEY_IDENTIFIERS: &str = "identifiers";
pub(crate) const KEY_PROPERTIES: &str = "properties";
pub(crate) const KEY_CREATE: &str = "create";
pub(crate) const KEY_PUT: &str = "put";
pub(crate) const KEY_READ: &str = "read";
pub(crate) const KEY_UPDATE: &str = "update";
pub(crate) const KEY_DELETE: &str = "delete";
pub(crate) const KEY_LIST: &str = "list";
pub(crate) const KEY_OPERATIONS: &str = "operations";
pub(crate) const KEY_COLLECTION_OPERATIONS: &str = "collectionOperations";
pub(crate) const KEY_RESOURCES: &str = "resources";
pub(crate) const KEY_VERSION: &str = "version";
pub(crate) const KEY_RENAME: &str = "rename";
