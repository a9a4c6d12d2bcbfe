//! Borrowed views over addressable nodes.

use super::element::SubmodelElement;
use super::environment::{
    AssetAdministrationShell, AssetInformation, ConceptDescription, Environment, Submodel,
};
use super::reference::Reference;

/// Any node the resolver can return or the encoders can render.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Environment(&'a Environment),
    Shell(&'a AssetAdministrationShell),
    AssetInformation(&'a AssetInformation),
    Submodel(&'a Submodel),
    Element(&'a SubmodelElement),
    ConceptDescription(&'a ConceptDescription),
    Reference(&'a Reference),
}

impl<'a> NodeRef<'a> {
    pub fn kind_name(&self) -> &'static str {
        match self {
            NodeRef::Environment(_) => "Environment",
            NodeRef::Shell(_) => "AssetAdministrationShell",
            NodeRef::AssetInformation(_) => "AssetInformation",
            NodeRef::Submodel(_) => "Submodel",
            NodeRef::Element(e) => e.kind_name(),
            NodeRef::ConceptDescription(_) => "ConceptDescription",
            NodeRef::Reference(_) => "Reference",
        }
    }

    pub fn id_short(&self) -> Option<&'a str> {
        match self {
            NodeRef::Shell(s) => s.id_short.as_deref(),
            NodeRef::Submodel(s) => s.id_short(),
            NodeRef::Element(e) => e.id_short(),
            NodeRef::ConceptDescription(c) => c.id_short.as_deref(),
            _ => None,
        }
    }

    pub fn as_element(&self) -> Option<&'a SubmodelElement> {
        match self {
            NodeRef::Element(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_submodel(&self) -> Option<&'a Submodel> {
        match self {
            NodeRef::Submodel(s) => Some(s),
            _ => None,
        }
    }
}

macro_rules! node_ref_from {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl<'a> From<&'a $ty> for NodeRef<'a> {
                fn from(node: &'a $ty) -> Self {
                    NodeRef::$variant(node)
                }
            }
        )+
    };
}

node_ref_from! {
    Environment => Environment,
    AssetAdministrationShell => Shell,
    AssetInformation => AssetInformation,
    Submodel => Submodel,
    SubmodelElement => Element,
    ConceptDescription => ConceptDescription,
    Reference => Reference,
}

/// Mutable counterpart of [`NodeRef`], restricted to what a path can address.
#[derive(Debug)]
pub enum NodeMut<'a> {
    Submodel(&'a mut Submodel),
    Element(&'a mut SubmodelElement),
}

impl NodeMut<'_> {
    pub fn kind_name(&self) -> &'static str {
        match self {
            NodeMut::Submodel(_) => "Submodel",
            NodeMut::Element(e) => e.kind_name(),
        }
    }

    /// Child storage for appends: submodel elements, or collection/list values.
    pub fn children_mut(&mut self) -> Option<&mut Vec<SubmodelElement>> {
        match self {
            NodeMut::Submodel(s) => Some(s.elements_mut()),
            NodeMut::Element(e) => e.children_mut(),
        }
    }
}
