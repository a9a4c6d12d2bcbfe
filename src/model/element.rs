//! Submodel elements: the closed set of node kinds below a submodel.
//!
//! Every kind shares an [`ElementBase`] (the referable, semantic and qualifier
//! metadata) and adds its own payload. Only collections and lists own named
//! or indexed children; every other kind is a leaf as far as path resolution
//! is concerned.

use super::enums::{
    AasSubmodelElements, DataTypeDefXsd, Direction, EntityType, StateOfEvent,
};
use super::environment::SpecificAssetId;
use super::meta::{EmbeddedDataSpecification, Extension, Qualifier};
use super::reference::{LangString, Reference};

// ============================================================================
// Shared metadata
// ============================================================================

/// Fields every submodel element carries, all optional.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ElementBase {
    pub extensions: Option<Vec<Extension>>,
    pub category: Option<String>,
    pub id_short: Option<String>,
    pub display_name: Option<Vec<LangString>>,
    pub description: Option<Vec<LangString>>,
    pub semantic_id: Option<Reference>,
    pub supplemental_semantic_ids: Option<Vec<Reference>>,
    pub qualifiers: Option<Vec<Qualifier>>,
    pub embedded_data_specifications: Option<Vec<EmbeddedDataSpecification>>,
}

impl ElementBase {
    pub fn named(id_short: impl Into<String>) -> Self {
        Self {
            id_short: Some(id_short.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_none()
            && self.category.is_none()
            && self.id_short.is_none()
            && self.display_name.is_none()
            && self.description.is_none()
            && self.semantic_id.is_none()
            && self.supplemental_semantic_ids.is_none()
            && self.qualifiers.is_none()
            && self.embedded_data_specifications.is_none()
    }
}

// ============================================================================
// Kinds
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub base: ElementBase,
    pub value_type: DataTypeDefXsd,
    /// Lexical form of the value, interpreted according to `value_type`.
    pub value: Option<String>,
    pub value_id: Option<Reference>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultiLanguageProperty {
    pub base: ElementBase,
    pub value: Option<Vec<LangString>>,
    pub value_id: Option<Reference>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Range {
    pub base: ElementBase,
    pub value_type: DataTypeDefXsd,
    pub min: Option<String>,
    pub max: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Blob {
    pub base: ElementBase,
    pub value: Option<Vec<u8>>,
    pub content_type: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct File {
    pub base: ElementBase,
    pub value: Option<String>,
    pub content_type: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReferenceElement {
    pub base: ElementBase,
    pub value: Option<Reference>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RelationshipElement {
    pub base: ElementBase,
    pub first: Reference,
    pub second: Reference,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedRelationshipElement {
    pub base: ElementBase,
    pub first: Reference,
    pub second: Reference,
    pub annotations: Option<Vec<SubmodelElement>>,
}

/// Named children, addressed by `idShort`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SubmodelElementCollection {
    pub base: ElementBase,
    pub value: Option<Vec<SubmodelElement>>,
}

/// Indexed children, addressed by position.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmodelElementList {
    pub base: ElementBase,
    pub order_relevant: Option<bool>,
    pub semantic_id_list_element: Option<Reference>,
    pub type_value_list_element: AasSubmodelElements,
    pub value_type_list_element: Option<DataTypeDefXsd>,
    pub value: Option<Vec<SubmodelElement>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub base: ElementBase,
    pub statements: Option<Vec<SubmodelElement>>,
    pub entity_type: EntityType,
    pub global_asset_id: Option<String>,
    pub specific_asset_ids: Option<Vec<SpecificAssetId>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BasicEventElement {
    pub base: ElementBase,
    pub observed: Reference,
    pub direction: Direction,
    pub state: StateOfEvent,
    pub message_topic: Option<String>,
    pub message_broker: Option<Reference>,
    pub last_update: Option<String>,
    pub min_interval: Option<String>,
    pub max_interval: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OperationVariable {
    pub value: Box<SubmodelElement>,
}

impl OperationVariable {
    pub fn new(value: SubmodelElement) -> Self {
        Self {
            value: Box::new(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Operation {
    pub base: ElementBase,
    pub input_variables: Option<Vec<OperationVariable>>,
    pub output_variables: Option<Vec<OperationVariable>>,
    pub inoutput_variables: Option<Vec<OperationVariable>>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Capability {
    pub base: ElementBase,
}

// ============================================================================
// Sum type
// ============================================================================

/// Generates the sum type plus the accessors shared by every variant.
macro_rules! submodel_elements {
    ($($variant:ident => $model_type:literal),+ $(,)?) => {
        /// A node below a submodel.
        #[derive(Debug, Clone, PartialEq)]
        pub enum SubmodelElement {
            $($variant($variant)),+
        }

        impl SubmodelElement {
            pub fn base(&self) -> &ElementBase {
                match self {
                    $(Self::$variant(e) => &e.base),+
                }
            }

            pub fn base_mut(&mut self) -> &mut ElementBase {
                match self {
                    $(Self::$variant(e) => &mut e.base),+
                }
            }

            /// The `modelType` tag of this kind.
            pub fn kind_name(&self) -> &'static str {
                match self {
                    $(Self::$variant(_) => $model_type),+
                }
            }
        }

        $(
            impl From<$variant> for SubmodelElement {
                fn from(element: $variant) -> Self {
                    Self::$variant(element)
                }
            }
        )+
    };
}

submodel_elements! {
    Property => "Property",
    MultiLanguageProperty => "MultiLanguageProperty",
    Range => "Range",
    Blob => "Blob",
    File => "File",
    ReferenceElement => "ReferenceElement",
    RelationshipElement => "RelationshipElement",
    AnnotatedRelationshipElement => "AnnotatedRelationshipElement",
    SubmodelElementCollection => "SubmodelElementCollection",
    SubmodelElementList => "SubmodelElementList",
    Entity => "Entity",
    BasicEventElement => "BasicEventElement",
    Operation => "Operation",
    Capability => "Capability",
}

impl SubmodelElement {
    pub fn id_short(&self) -> Option<&str> {
        self.base().id_short.as_deref()
    }

    /// Children of a collection or list. `None` for every other kind.
    pub fn children(&self) -> Option<&[SubmodelElement]> {
        match self {
            Self::SubmodelElementCollection(c) => Some(c.value.as_deref().unwrap_or_default()),
            Self::SubmodelElementList(l) => Some(l.value.as_deref().unwrap_or_default()),
            _ => None,
        }
    }

    /// Mutable child storage of a collection or list, created on first use.
    pub fn children_mut(&mut self) -> Option<&mut Vec<SubmodelElement>> {
        match self {
            Self::SubmodelElementCollection(c) => Some(c.value.get_or_insert_with(Vec::new)),
            Self::SubmodelElementList(l) => Some(l.value.get_or_insert_with(Vec::new)),
            _ => None,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::SubmodelElementList(_))
    }
}

// ============================================================================
// Constructors
// ============================================================================

impl Property {
    pub fn new(id_short: impl Into<String>, value_type: DataTypeDefXsd) -> Self {
        Self {
            base: ElementBase::named(id_short),
            value_type,
            value: None,
            value_id: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

impl MultiLanguageProperty {
    pub fn new(id_short: impl Into<String>, value: Vec<LangString>) -> Self {
        Self {
            base: ElementBase::named(id_short),
            value: Some(value),
            value_id: None,
        }
    }
}

impl Range {
    pub fn new(
        id_short: impl Into<String>,
        value_type: DataTypeDefXsd,
        min: Option<String>,
        max: Option<String>,
    ) -> Self {
        Self {
            base: ElementBase::named(id_short),
            value_type,
            min,
            max,
        }
    }
}

impl Blob {
    pub fn new(id_short: impl Into<String>, content_type: impl Into<String>, value: Vec<u8>) -> Self {
        Self {
            base: ElementBase::named(id_short),
            value: Some(value),
            content_type: content_type.into(),
        }
    }
}

impl File {
    pub fn new(id_short: impl Into<String>, content_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            base: ElementBase::named(id_short),
            value: Some(value.into()),
            content_type: content_type.into(),
        }
    }
}

impl SubmodelElementCollection {
    pub fn new(id_short: impl Into<String>, value: Vec<SubmodelElement>) -> Self {
        Self {
            base: ElementBase::named(id_short),
            value: Some(value),
        }
    }
}

impl SubmodelElementList {
    pub fn new(
        id_short: impl Into<String>,
        type_value_list_element: AasSubmodelElements,
        value: Vec<SubmodelElement>,
    ) -> Self {
        Self {
            base: ElementBase::named(id_short),
            order_relevant: None,
            semantic_id_list_element: None,
            type_value_list_element,
            value_type_list_element: None,
            value: Some(value),
        }
    }
}

impl Operation {
    pub fn new(id_short: impl Into<String>) -> Self {
        Self {
            base: ElementBase::named(id_short),
            ..Self::default()
        }
    }
}
