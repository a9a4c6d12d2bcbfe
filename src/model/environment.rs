//! Identifiables and the environment that owns them.

use super::element::{ElementBase, SubmodelElement};
use super::enums::{AssetKind, ModellingKind};
use super::meta::{AdministrativeInformation, EmbeddedDataSpecification, Extension};
use super::reference::{LangString, Reference};

/// A submodel: the top-level container a path starts from.
///
/// Shares its referable and semantic metadata with submodel elements through
/// [`ElementBase`]; the encoders interleave `administration`, `id` and `kind`
/// at their schema positions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Submodel {
    pub base: ElementBase,
    pub administration: Option<AdministrativeInformation>,
    pub id: String,
    pub kind: Option<ModellingKind>,
    pub submodel_elements: Option<Vec<SubmodelElement>>,
}

impl Submodel {
    pub fn new(id: impl Into<String>, id_short: impl Into<String>) -> Self {
        Self {
            base: ElementBase::named(id_short),
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_elements(mut self, elements: Vec<SubmodelElement>) -> Self {
        self.submodel_elements = Some(elements);
        self
    }

    pub fn id_short(&self) -> Option<&str> {
        self.base.id_short.as_deref()
    }

    pub fn elements(&self) -> &[SubmodelElement] {
        self.submodel_elements.as_deref().unwrap_or_default()
    }

    pub fn elements_mut(&mut self) -> &mut Vec<SubmodelElement> {
        self.submodel_elements.get_or_insert_with(Vec::new)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub path: String,
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpecificAssetId {
    pub semantic_id: Option<Reference>,
    pub supplemental_semantic_ids: Option<Vec<Reference>>,
    pub name: String,
    pub value: String,
    pub external_subject_id: Option<Reference>,
}

impl SpecificAssetId {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            semantic_id: None,
            supplemental_semantic_ids: None,
            name: name.into(),
            value: value.into(),
            external_subject_id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssetInformation {
    pub asset_kind: AssetKind,
    pub global_asset_id: Option<String>,
    pub specific_asset_ids: Option<Vec<SpecificAssetId>>,
    pub asset_type: Option<String>,
    pub default_thumbnail: Option<Resource>,
}

impl AssetInformation {
    pub fn new(asset_kind: AssetKind) -> Self {
        Self {
            asset_kind,
            global_asset_id: None,
            specific_asset_ids: None,
            asset_type: None,
            default_thumbnail: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssetAdministrationShell {
    pub extensions: Option<Vec<Extension>>,
    pub category: Option<String>,
    pub id_short: Option<String>,
    pub display_name: Option<Vec<LangString>>,
    pub description: Option<Vec<LangString>>,
    pub administration: Option<AdministrativeInformation>,
    pub id: String,
    pub embedded_data_specifications: Option<Vec<EmbeddedDataSpecification>>,
    pub derived_from: Option<Reference>,
    pub asset_information: AssetInformation,
    /// References to the submodels of this shell.
    pub submodels: Option<Vec<Reference>>,
}

impl AssetAdministrationShell {
    pub fn new(id: impl Into<String>, asset_information: AssetInformation) -> Self {
        Self {
            extensions: None,
            category: None,
            id_short: None,
            display_name: None,
            description: None,
            administration: None,
            id: id.into(),
            embedded_data_specifications: None,
            derived_from: None,
            asset_information,
            submodels: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConceptDescription {
    pub extensions: Option<Vec<Extension>>,
    pub category: Option<String>,
    pub id_short: Option<String>,
    pub display_name: Option<Vec<LangString>>,
    pub description: Option<Vec<LangString>>,
    pub administration: Option<AdministrativeInformation>,
    pub id: String,
    pub embedded_data_specifications: Option<Vec<EmbeddedDataSpecification>>,
    pub is_case_of: Option<Vec<Reference>>,
}

/// The root aggregate.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Environment {
    pub asset_administration_shells: Option<Vec<AssetAdministrationShell>>,
    pub submodels: Option<Vec<Submodel>>,
    pub concept_descriptions: Option<Vec<ConceptDescription>>,
}

impl Environment {
    pub fn is_empty(&self) -> bool {
        self.asset_administration_shells.is_none()
            && self.submodels.is_none()
            && self.concept_descriptions.is_none()
    }

    pub fn shells(&self) -> &[AssetAdministrationShell] {
        self.asset_administration_shells.as_deref().unwrap_or_default()
    }

    pub fn submodels(&self) -> &[Submodel] {
        self.submodels.as_deref().unwrap_or_default()
    }

    pub fn submodels_mut(&mut self) -> &mut Vec<Submodel> {
        self.submodels.get_or_insert_with(Vec::new)
    }

    pub fn concept_descriptions(&self) -> &[ConceptDescription] {
        self.concept_descriptions.as_deref().unwrap_or_default()
    }
}
