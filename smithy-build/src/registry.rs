/*!
Builds a [`smithy_transform::Transform`] from a [`crate::config::TransformConfig`].
Malformed transform arguments (wrong JSON shape, an unparsable shape ID)
are `BuildConfig` errors — a caller-facing mistake in the build
configuration itself, not a model-semantic finding.
*/

use indexmap::IndexMap;
use serde_json::Value;
use smithy_core::error::{ErrorKind, Result};
use smithy_core::identity::{Namespace, ShapeID};
use smithy_core::model::shape::SimpleKind;
use smithy_transform::{
    ChangeTypes, ExcludeByTag, ExcludeShapesByTrait, FilterSuppressions, FlattenAndRemoveMixins,
    FlattenNamespaces, IncludeByTag, IncludeNamespaces, MemberOrdering, RemoveTraitDefinitions,
    RemoveUnreferencedShapes, RenameShapes, SortMembers, Transform,
};
use std::collections::HashSet;

use crate::config::TransformConfig;

/// The name `apply` is handled by the orchestrator directly (it
/// re-enters the pipeline against another projection) rather than
/// producing a plain `Transform`.
pub const APPLY_TRANSFORM_NAME: &str = "apply";

pub fn build_transform(config: &TransformConfig) -> Result<Box<dyn Transform>> {
    let args = &config.args;
    match config.name.as_str() {
        "includeByTag" => Ok(Box::new(IncludeByTag { tags: string_list(args, "tags")? })),
        "excludeByTag" => Ok(Box::new(ExcludeByTag { tags: string_list(args, "tags")? })),
        "includeNamespaces" => Ok(Box::new(IncludeNamespaces { namespaces: string_list(args, "namespaces")? })),
        "excludeShapesByTrait" => {
            let ids = string_list(args, "traits")?.iter().map(|s| parse_shape_id(s)).collect::<Result<Vec<_>>>()?;
            Ok(Box::new(ExcludeShapesByTrait { trait_ids: ids }))
        }
        "removeUnreferencedShapes" => Ok(Box::new(RemoveUnreferencedShapes { export_tags: optional_string_list(args, "exportTags")? })),
        "removeTraitDefinitions" => Ok(Box::new(RemoveTraitDefinitions { export_tags: optional_string_list(args, "exportTags")? })),
        "renameShapes" => {
            let mapping = shape_id_map(args, "shapeIds")?;
            Ok(Box::new(RenameShapes { mapping }))
        }
        "changeTypes" => {
            let raw = object_field(args, "shapeTypes")?;
            let mut mapping = IndexMap::new();
            for (key, value) in raw {
                let id = parse_shape_id(key)?;
                let type_name = value.as_str().ok_or_else(|| ErrorKind::BuildConfig(format!("changeTypes: '{}' is not a string", key)))?;
                let kind = SimpleKind::from_type_name(type_name).ok_or_else(|| ErrorKind::BuildConfig(format!("changeTypes: unknown simple type '{}'", type_name)))?;
                mapping.insert(id, kind);
            }
            Ok(Box::new(ChangeTypes { mapping }))
        }
        "flattenAndRemoveMixins" => Ok(Box::new(FlattenAndRemoveMixins)),
        "filterSuppressions" => {
            let keep_ids: HashSet<String> = string_list(args, "keepIds")?.into_iter().collect();
            Ok(Box::new(FilterSuppressions { keep_ids }))
        }
        "sortMembers" => Ok(Box::new(SortMembers { ordering: MemberOrdering::Alphabetical })),
        "flattenNamespaces" => {
            let target_text = string_field(args, "namespace")?;
            let target: Namespace = target_text.parse().map_err(|_| ErrorKind::BuildConfig(format!("flattenNamespaces: invalid namespace '{}'", target_text)))?;
            let service = parse_shape_id(&string_field(args, "service")?)?;
            Ok(Box::new(FlattenNamespaces { target, service }))
        }
        other => Err(ErrorKind::BuildConfig(format!("unknown transform '{}'", other)).into()),
    }
}

fn string_field(args: &Value, key: &str) -> Result<String> {
    args.get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ErrorKind::BuildConfig(format!("missing required string field '{}'", key)).into())
}

fn string_list(args: &Value, key: &str) -> Result<Vec<String>> {
    let array = args
        .get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| ErrorKind::BuildConfig(format!("missing required array field '{}'", key)))?;
    array
        .iter()
        .map(|v| v.as_str().map(str::to_string).ok_or_else(|| ErrorKind::BuildConfig(format!("'{}' must contain only strings", key)).into()))
        .collect()
}

fn optional_string_list(args: &Value, key: &str) -> Result<Option<Vec<String>>> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(_) => string_list(args, key).map(Some),
    }
}

fn object_field<'a>(args: &'a Value, key: &str) -> Result<&'a serde_json::Map<String, Value>> {
    args.get(key)
        .and_then(Value::as_object)
        .ok_or_else(|| ErrorKind::BuildConfig(format!("missing required object field '{}'", key)).into())
}

fn shape_id_map(args: &Value, key: &str) -> Result<IndexMap<ShapeID, ShapeID>> {
    let raw = object_field(args, key)?;
    let mut mapping = IndexMap::new();
    for (from, to) in raw {
        let to = to.as_str().ok_or_else(|| ErrorKind::BuildConfig(format!("'{}': '{}' must map to a string", key, from)))?;
        mapping.insert(parse_shape_id(from)?, parse_shape_id(to)?);
    }
    Ok(mapping)
}

fn parse_shape_id(s: &str) -> Result<ShapeID> {
    s.parse().map_err(|_| ErrorKind::BuildConfig(format!("invalid shape ID '{}'", s)).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TransformConfig;

    #[test]
    fn builds_include_by_tag_from_args() {
        let config = TransformConfig {
            name: "includeByTag".to_string(),
            args: serde_json::json!({"tags": ["a", "b"]}),
        };
        let transform = build_transform(&config).unwrap();
        assert_eq!(transform.name(), "includeByTag");
    }

    #[test]
    fn rejects_unknown_transform_name() {
        let config = TransformConfig {
            name: "bogusTransform".to_string(),
            args: Value::Null,
        };
        assert!(build_transform(&config).is_err());
    }

    #[test]
    fn rejects_change_types_with_unknown_simple_kind() {
        let config = TransformConfig {
            name: "changeTypes".to_string(),
            args: serde_json::json!({"shapeTypes": {"example#Foo": "notAType"}}),
        };
        assert!(build_transform(&config).is_err());
    }
}
