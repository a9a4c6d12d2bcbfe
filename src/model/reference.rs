//! References, keys and language strings.

use super::enums::{KeyTypes, ReferenceTypes};

/// One step of a reference chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    pub key_type: KeyTypes,
    pub value: String,
}

impl Key {
    pub fn new(key_type: KeyTypes, value: impl Into<String>) -> Self {
        Self {
            key_type,
            value: value.into(),
        }
    }
}

/// A reference to a model element or an external entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub reference_type: ReferenceTypes,
    pub referred_semantic_id: Option<Box<Reference>>,
    /// Mandatory; an empty chain is still rendered.
    pub keys: Vec<Key>,
}

impl Reference {
    pub fn new(reference_type: ReferenceTypes, keys: Vec<Key>) -> Self {
        Self {
            reference_type,
            referred_semantic_id: None,
            keys,
        }
    }

    /// An external reference with a single global key, the common shape of a semantic id.
    pub fn external(value: impl Into<String>) -> Self {
        Self::new(
            ReferenceTypes::ExternalReference,
            vec![Key::new(KeyTypes::GlobalReference, value)],
        )
    }

    /// A model reference to a submodel by its identifier.
    pub fn submodel(id: impl Into<String>) -> Self {
        Self::new(
            ReferenceTypes::ModelReference,
            vec![Key::new(KeyTypes::Submodel, id)],
        )
    }

    pub fn with_referred_semantic_id(mut self, referred: Reference) -> Self {
        self.referred_semantic_id = Some(Box::new(referred));
        self
    }
}

/// Text in a given language. Used for names, descriptions and the IEC 61360 roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LangString {
    pub language: String,
    pub text: String,
}

impl LangString {
    pub fn new(language: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            text: text.into(),
        }
    }
}
