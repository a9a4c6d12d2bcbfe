//! Metadata records shared by shells, submodels and elements.

use super::enums::{DataTypeDefXsd, DataTypeIec61360, QualifierKind};
use super::reference::{LangString, Reference};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Extension {
    pub semantic_id: Option<Reference>,
    pub supplemental_semantic_ids: Option<Vec<Reference>>,
    pub name: String,
    pub value_type: Option<DataTypeDefXsd>,
    pub value: Option<String>,
    pub refers_to: Option<Vec<Reference>>,
}

impl Extension {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Qualifier {
    pub semantic_id: Option<Reference>,
    pub supplemental_semantic_ids: Option<Vec<Reference>>,
    pub kind: Option<QualifierKind>,
    pub qualifier_type: String,
    pub value_type: DataTypeDefXsd,
    pub value: Option<String>,
    pub value_id: Option<Reference>,
}

impl Qualifier {
    pub fn new(qualifier_type: impl Into<String>, value_type: DataTypeDefXsd) -> Self {
        Self {
            semantic_id: None,
            supplemental_semantic_ids: None,
            kind: None,
            qualifier_type: qualifier_type.into(),
            value_type,
            value: None,
            value_id: None,
        }
    }
}

/// Version information of an identifiable.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AdministrativeInformation {
    pub embedded_data_specifications: Option<Vec<EmbeddedDataSpecification>>,
    pub version: Option<String>,
    pub revision: Option<String>,
    pub creator: Option<Reference>,
    pub template_id: Option<String>,
}

impl AdministrativeInformation {
    pub fn is_empty(&self) -> bool {
        self.embedded_data_specifications.is_none()
            && self.version.is_none()
            && self.revision.is_none()
            && self.creator.is_none()
            && self.template_id.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedDataSpecification {
    pub data_specification: Reference,
    pub data_specification_content: DataSpecificationIec61360,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataSpecificationIec61360 {
    /// Mandatory, at least one entry by schema; not enforced here.
    pub preferred_name: Vec<LangString>,
    pub short_name: Option<Vec<LangString>>,
    pub unit: Option<String>,
    pub unit_id: Option<Reference>,
    pub source_of_definition: Option<String>,
    pub symbol: Option<String>,
    pub data_type: Option<DataTypeIec61360>,
    pub definition: Option<Vec<LangString>>,
    pub value_format: Option<String>,
    pub value_list: Option<ValueList>,
    pub value: Option<String>,
    pub level_type: Option<LevelType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LevelType {
    pub min: bool,
    pub nom: bool,
    pub typ: bool,
    pub max: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValueList {
    pub value_reference_pairs: Vec<ValueReferencePair>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValueReferencePair {
    pub value: String,
    pub value_id: Reference,
}
