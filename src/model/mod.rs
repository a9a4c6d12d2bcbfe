//! The in-memory tree model of an asset administration environment.
//!
//! A reduced rendition of the metamodel: every kind the path resolver walks
//! and the encoders render, with optional sequences kept as `Option<Vec<_>>`
//! so that "present but empty" survives a round trip.

mod element;
mod enums;
mod environment;
mod meta;
mod node;
mod reference;

pub use element::{
    AnnotatedRelationshipElement, BasicEventElement, Blob, Capability, ElementBase, Entity, File,
    MultiLanguageProperty, Operation, OperationVariable, Property, Range, ReferenceElement,
    RelationshipElement, SubmodelElement, SubmodelElementCollection, SubmodelElementList,
};
pub use enums::{
    AasSubmodelElements, AssetKind, DataTypeDefXsd, DataTypeIec61360, Direction, EntityType,
    KeyTypes, Literal, ModellingKind, QualifierKind, ReferenceTypes, StateOfEvent,
};
pub use environment::{
    AssetAdministrationShell, AssetInformation, ConceptDescription, Environment, Resource,
    SpecificAssetId, Submodel,
};
pub use meta::{
    AdministrativeInformation, DataSpecificationIec61360, EmbeddedDataSpecification, Extension,
    LevelType, Qualifier, ValueList, ValueReferencePair,
};
pub use node::{NodeMut, NodeRef};
pub use reference::{Key, LangString, Reference};
