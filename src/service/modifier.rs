//! Serialization modifiers and the submodel reference listing.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::AasError;
use crate::base::encode_identifier;
use crate::model::Submodel;

/// How a resolved node is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SerializationModifier {
    /// Full structural JSON.
    #[default]
    Normal,
    /// `$value`: the value-only projection.
    Value,
    /// `$reference`: a model reference to the node.
    Reference,
    /// `$path`: the idShort path(s) of the node.
    Path,
}

impl SerializationModifier {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "",
            Self::Value => "$value",
            Self::Reference => "$reference",
            Self::Path => "$path",
        }
    }
}

impl FromStr for SerializationModifier {
    type Err = AasError;

    /// Accepts the `$`-prefixed form and the bare word. Empty is `Normal`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_start_matches('$') {
            "" | "normal" => Ok(Self::Normal),
            "value" => Ok(Self::Value),
            "reference" => Ok(Self::Reference),
            "path" => Ok(Self::Path),
            _ => Err(AasError::unsupported(format!("serialization modifier '{s}'"))),
        }
    }
}

impl std::fmt::Display for SerializationModifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the submodel reference listing.
///
/// The key value is the base64url form of the submodel id, so it can be fed
/// straight back as a path head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmodelReference {
    pub id_short: Option<String>,
    #[serde(rename = "type")]
    pub reference_type: String,
    pub keys: Vec<SubmodelKey>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmodelKey {
    #[serde(rename = "type")]
    pub key_type: String,
    pub value: String,
}

impl From<&Submodel> for SubmodelReference {
    fn from(submodel: &Submodel) -> Self {
        Self {
            id_short: submodel.id_short().map(str::to_string),
            reference_type: "Submodel".to_string(),
            keys: vec![SubmodelKey {
                key_type: "Submodel".to_string(),
                value: encode_identifier(&submodel.id),
            }],
        }
    }
}
