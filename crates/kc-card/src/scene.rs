use kc_msgpack::Value;

use crate::document::Document;
use crate::error::CardError;
use crate::field_value::FieldValue;

/// The polymorphic object-type tag on a scene node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectType {
    Character,
    Item,
    Light,
    Folder,
    Route,
    Camera,
    Text,
    Unknown(i64),
}

impl ObjectType {
    #[must_use]
    pub fn from_tag(tag: i64) -> Self {
        match tag {
            0 => ObjectType::Character,
            1 => ObjectType::Item,
            2 => ObjectType::Light,
            3 => ObjectType::Folder,
            4 => ObjectType::Route,
            5 => ObjectType::Camera,
            7 => ObjectType::Text,
            other => ObjectType::Unknown(other),
        }
    }

    #[must_use]
    pub fn tag(self) -> i64 {
        match self {
            ObjectType::Character => 0,
            ObjectType::Item => 1,
            ObjectType::Light => 2,
            ObjectType::Folder => 3,
            ObjectType::Route => 4,
            ObjectType::Camera => 5,
            ObjectType::Text => 7,
            ObjectType::Unknown(tag) => tag,
        }
    }
}

/// One node yielded by [`walk`]: the dotted id path from the scene root,
/// the node's own `type` tag, its record (a `Value::Map`), and optionally
/// its depth.
#[derive(Debug)]
pub struct SceneNode<'a> {
    pub composite_key: String,
    pub object_type: ObjectType,
    pub record: &'a FieldValue,
    pub depth: Option<usize>,
}

/// Depth-first, pre-order traversal of a scene's `dicObject` tree.
///
/// Stack-based rather than recursive, so deeply nested scenes don't risk
/// blowing the call stack.
/// Restartable: build a fresh [`walk`] call to iterate again.
pub struct SceneWalker<'a> {
    stack: Vec<(String, usize, &'a FieldValue)>,
    object_type_filter: Option<i64>,
    include_depth: bool,
}

impl<'a> Iterator for SceneWalker<'a> {
    type Item = SceneNode<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (composite_key, depth, record) = self.stack.pop()?;

            if let Some(children) = record.get_str("child").and_then(FieldValue::as_map) {
                // Push in reverse so pre-order pops lowest id first.
                for (child_key, child_record) in children.iter().rev() {
                    let Some(id) = child_key.as_plain_str() else { continue };
                    self.stack.push((format!("{composite_key}.{id}"), depth + 1, child_record));
                }
            }

            let Some(type_tag) = record.get_str("type").and_then(as_int) else { continue };
            if let Some(filter) = self.object_type_filter {
                if type_tag != filter {
                    continue;
                }
            }

            return Some(SceneNode {
                composite_key,
                object_type: ObjectType::from_tag(type_tag),
                record,
                depth: self.include_depth.then_some(depth),
            });
        }
    }
}

fn as_int(v: &FieldValue) -> Option<i64> {
    match v {
        FieldValue::Scalar(Value::Int(_, n)) => Some(*n),
        FieldValue::Scalar(Value::UInt(_, n)) => i64::try_from(*n).ok(),
        _ => None,
    }
}

/// Walk `document`'s scene object tree.
///
/// # Errors
///
/// [`CardError::SchemaMismatch`] if `document`'s variant is not a scene
/// variant, or no block exposes a `dicObject` map.
pub fn walk(
    document: &Document,
    object_type_filter: Option<i64>,
    include_depth: bool,
) -> Result<SceneWalker<'_>, CardError> {
    if !document.descriptor().is_scene {
        return Err(CardError::SchemaMismatch {
            context: "scene walk",
            reason: "document variant has no scene object tree",
        });
    }

    let dic_object = document
        .blocks
        .iter()
        .find_map(|b| b.as_field_value().and_then(|v| v.get_str("dicObject")))
        .ok_or(CardError::SchemaMismatch {
            context: "scene walk",
            reason: "no known block exposes a dicObject map",
        })?;

    let roots = dic_object.as_map().ok_or(CardError::SchemaMismatch {
        context: "scene walk",
        reason: "dicObject is not a map",
    })?;

    let mut stack = Vec::with_capacity(roots.len());
    for (key, record) in roots.iter().rev() {
        let Some(id) = key.as_plain_str() else { continue };
        stack.push((id.to_string(), 0, record));
    }

    Ok(SceneWalker { stack, object_type_filter, include_depth })
}

#[cfg(test)]
mod tests {
    use super::*;
    use kc_msgpack::Value;

    fn object(type_tag: i64, children: Vec<(&str, Value)>) -> Value {
        let mut pairs = vec![(Value::string("type"), Value::int(type_tag))];
        if !children.is_empty() {
            let child_pairs = children.into_iter().map(|(id, v)| (Value::string(id), v)).collect();
            pairs.push((Value::string("child"), Value::map(child_pairs)));
        }
        Value::map(pairs)
    }

    fn sample_dic_object() -> FieldValue {
        let leaf = object(1, vec![]);
        let root_with_child = object(0, vec![("0", leaf)]);
        let root2 = object(5, vec![]);
        let dic = Value::map(vec![
            (Value::string("0"), root_with_child),
            (Value::string("1"), root2),
        ]);
        FieldValue::from_value(&dic)
    }

    #[test]
    fn depth_first_preorder_with_dotted_keys() {
        let dic = sample_dic_object();
        let roots = dic.as_map().unwrap();
        let mut stack = Vec::new();
        for (k, v) in roots.iter().rev() {
            stack.push((k.as_plain_str().unwrap().to_string(), 0, v));
        }
        let mut walker = SceneWalker { stack, object_type_filter: None, include_depth: true };

        let first = walker.next().unwrap();
        assert_eq!(first.composite_key, "0");
        assert_eq!(first.depth, Some(0));

        let second = walker.next().unwrap();
        assert_eq!(second.composite_key, "0.0");
        assert_eq!(second.object_type, ObjectType::Item);
        assert_eq!(second.depth, Some(1));

        let third = walker.next().unwrap();
        assert_eq!(third.composite_key, "1");
        assert_eq!(third.object_type, ObjectType::Camera);

        assert!(walker.next().is_none());
    }

    #[test]
    fn filters_by_object_type() {
        let dic = sample_dic_object();
        let roots = dic.as_map().unwrap();
        let mut stack = Vec::new();
        for (k, v) in roots.iter().rev() {
            stack.push((k.as_plain_str().unwrap().to_string(), 0, v));
        }
        let walker = SceneWalker { stack, object_type_filter: Some(1), include_depth: false };
        let results: Vec<_> = walker.collect();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].composite_key, "0.0");
        assert_eq!(results[0].depth, None);
    }
}
