//! Value-only projection: leaf values without kind tags or metadata.

use serde_json::{Map, Value};

use super::lexical::TypedValue;
use crate::model::{NodeRef, SubmodelElement};

/// Project a node to its values.
///
/// Properties become their typed value (`null` when unset), multi-language
/// properties the text of their first entry, collections and submodels a map
/// from `idShort` to the projection of each named child. Every other kind
/// projects to `None`; inside a map such children are kept as `null`.
pub fn to_value_only<'a>(node: impl Into<NodeRef<'a>>) -> Option<Value> {
    match node.into() {
        NodeRef::Submodel(sm) => Some(project_children(sm.elements())),
        NodeRef::Element(element) => project_element(element),
        _ => None,
    }
}

fn project_element(element: &SubmodelElement) -> Option<Value> {
    match element {
        SubmodelElement::Property(p) => Some(
            p.value
                .as_deref()
                .map_or(Value::Null, |text| TypedValue::parse(p.value_type, text).to_json()),
        ),
        SubmodelElement::MultiLanguageProperty(mlp) => Some(
            mlp.value
                .as_deref()
                .and_then(<[_]>::first)
                .map_or(Value::Null, |lang| Value::String(lang.text.clone())),
        ),
        SubmodelElement::SubmodelElementCollection(c) => {
            Some(project_children(c.value.as_deref().unwrap_or_default()))
        }
        _ => None,
    }
}

fn project_children(children: &[SubmodelElement]) -> Value {
    let mut map = Map::new();
    for child in children {
        if let Some(id_short) = child.id_short() {
            map.insert(
                id_short.to_string(),
                project_element(child).unwrap_or(Value::Null),
            );
        }
    }
    Value::Object(map)
}
