//! Walking a parsed path through an environment.
//!
//! The walker records the position of every step it takes, so a successful
//! resolution yields a [`NodeHandle`]: a route of child indices stamped with
//! the document generation it was computed against. Handles never borrow the
//! tree; they are re-derived with [`follow`] / [`follow_mut`].

use tracing::{debug, trace};

use super::grammar::{IdShortPath, Segment};
use crate::base::{Generation, encode_identifier};
use crate::model::{Environment, NodeMut, NodeRef, Submodel, SubmodelElement};

// ============================================================================
// Outcomes
// ============================================================================

/// Why a path did not resolve. Both variants are expected outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Miss {
    /// No submodel or child matched `segment`.
    NotFound { segment: String },
    /// A list step without an index, an index past the end, or an index on
    /// something that is not a list (`len` is `None` then).
    InvalidIndex {
        segment: String,
        index: Option<usize>,
        len: Option<usize>,
    },
}

impl Miss {
    fn not_found(segment: &Segment) -> Self {
        Self::NotFound {
            segment: segment.to_string(),
        }
    }

    fn invalid_index(segment: &Segment, len: Option<usize>) -> Self {
        Self::InvalidIndex {
            segment: segment.to_string(),
            index: segment.index,
            len,
        }
    }
}

/// Position of a node inside an environment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    pub generation: Generation,
    /// Index into the environment's submodels.
    pub submodel: usize,
    /// Child indices below the submodel; empty for the submodel itself.
    pub route: Vec<usize>,
}

impl NodeHandle {
    pub fn is_submodel(&self) -> bool {
        self.route.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.route.len()
    }
}

/// Result of resolving a path against a borrowed tree.
#[derive(Debug, Clone, Copy)]
pub enum Lookup<'a> {
    Found(NodeRef<'a>),
    NotFound,
    InvalidIndex {
        index: Option<usize>,
        len: Option<usize>,
    },
}

impl<'a> Lookup<'a> {
    pub fn found(self) -> Option<NodeRef<'a>> {
        match self {
            Lookup::Found(node) => Some(node),
            _ => None,
        }
    }

    /// True for both absence outcomes.
    pub fn is_absent(&self) -> bool {
        !matches!(self, Lookup::Found(_))
    }
}

// ============================================================================
// Submodel lookup
// ============================================================================

/// Find a submodel by `idShort` or by the base64url encoding of its `id`.
///
/// First match in declaration order wins.
pub fn resolve_submodel<'a>(env: &'a Environment, identifier: &str) -> Option<(usize, &'a Submodel)> {
    env.submodels()
        .iter()
        .enumerate()
        .find(|(_, sm)| submodel_matches(sm, identifier))
}

pub(crate) fn submodel_matches(submodel: &Submodel, identifier: &str) -> bool {
    submodel.id_short() == Some(identifier) || encode_identifier(&submodel.id) == identifier
}

// ============================================================================
// Walker
// ============================================================================

/// Where the walk currently stands.
#[derive(Clone, Copy)]
enum Cursor<'a> {
    Submodel(&'a Submodel),
    Element(&'a SubmodelElement),
}

/// Walk `path` and return the handle of the addressed node.
pub fn locate(env: &Environment, path: &IdShortPath, generation: Generation) -> Result<NodeHandle, Miss> {
    let head = path.head();
    let Some((submodel_index, submodel)) = resolve_submodel(env, &head.name) else {
        debug!("[PATH] no submodel matches '{}'", head.name);
        return Err(Miss::not_found(head));
    };
    if head.index.is_some() {
        debug!("[PATH] index on submodel segment '{}'", head);
        return Err(Miss::invalid_index(head, None));
    }

    let mut route = Vec::with_capacity(path.len());
    let mut cursor = Cursor::Submodel(submodel);

    for segment in path.tail() {
        trace!("[PATH] step '{}' at depth {}", segment, route.len());
        cursor = match cursor {
            Cursor::Submodel(sm) => step_by_name(sm.elements(), segment, &mut route)?,
            // A list reached by name without an index: this segment carries it.
            Cursor::Element(list) if list.is_list() => step_into_list(list, segment, &mut route)?,
            Cursor::Element(SubmodelElement::SubmodelElementCollection(c)) => {
                step_by_name(c.value.as_deref().unwrap_or_default(), segment, &mut route)?
            }
            Cursor::Element(leaf) => {
                debug!("[PATH] '{}' is a {} and has no children", segment, leaf.kind_name());
                return Err(Miss::not_found(segment));
            }
        };
    }

    Ok(NodeHandle {
        generation,
        submodel: submodel_index,
        route,
    })
}

fn step_by_name<'a>(
    children: &'a [SubmodelElement],
    segment: &Segment,
    route: &mut Vec<usize>,
) -> Result<Cursor<'a>, Miss> {
    let Some(position) = children
        .iter()
        .position(|child| child.id_short() == Some(segment.name.as_str()))
    else {
        debug!("[PATH] no child named '{}'", segment.name);
        return Err(Miss::not_found(segment));
    };
    route.push(position);
    let child = &children[position];

    match segment.index {
        None => Ok(Cursor::Element(child)),
        Some(_) if child.is_list() => step_into_list(child, segment, route),
        Some(_) => {
            debug!("[PATH] '{}' indexes a {}", segment, child.kind_name());
            Err(Miss::invalid_index(segment, None))
        }
    }
}

fn step_into_list<'a>(
    list: &'a SubmodelElement,
    segment: &Segment,
    route: &mut Vec<usize>,
) -> Result<Cursor<'a>, Miss> {
    let items = list.children().unwrap_or_default();
    match segment.index {
        Some(index) if index < items.len() => {
            route.push(index);
            Ok(Cursor::Element(&items[index]))
        }
        _ => {
            debug!(
                "[PATH] list step '{}' invalid for {} item(s)",
                segment,
                items.len()
            );
            Err(Miss::invalid_index(segment, Some(items.len())))
        }
    }
}

/// Resolve `path` and borrow the result.
pub fn resolve<'a>(env: &'a Environment, path: &IdShortPath) -> Lookup<'a> {
    match locate(env, path, Generation::INITIAL) {
        Ok(handle) => follow(env, &handle).map_or(Lookup::NotFound, Lookup::Found),
        Err(Miss::NotFound { .. }) => Lookup::NotFound,
        Err(Miss::InvalidIndex { index, len, .. }) => Lookup::InvalidIndex { index, len },
    }
}

// ============================================================================
// Handle dereference
// ============================================================================

/// Re-derive the node a handle points at. `None` if the route no longer fits.
///
/// Generation checks are the owner's job; this only follows positions.
pub fn follow<'a>(env: &'a Environment, handle: &NodeHandle) -> Option<NodeRef<'a>> {
    let submodel = env.submodels().get(handle.submodel)?;
    let Some((first, rest)) = handle.route.split_first() else {
        return Some(NodeRef::Submodel(submodel));
    };

    let mut node = submodel.elements().get(*first)?;
    for &index in rest {
        node = node.children()?.get(index)?;
    }
    Some(NodeRef::Element(node))
}

/// Mutable variant of [`follow`]. Does not create missing child storage.
pub fn follow_mut<'a>(env: &'a mut Environment, handle: &NodeHandle) -> Option<NodeMut<'a>> {
    let submodel = env.submodels.as_mut()?.get_mut(handle.submodel)?;
    let Some((first, rest)) = handle.route.split_first() else {
        return Some(NodeMut::Submodel(submodel));
    };

    let mut node = submodel.submodel_elements.as_mut()?.get_mut(*first)?;
    for &index in rest {
        node = match node {
            SubmodelElement::SubmodelElementCollection(c) => c.value.as_mut()?.get_mut(index)?,
            SubmodelElement::SubmodelElementList(l) => l.value.as_mut()?.get_mut(index)?,
            _ => return None,
        };
    }
    Some(NodeMut::Element(node))
}
