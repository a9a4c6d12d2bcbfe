//! The served document and its generation counter.

use tracing::{info, trace};

use super::AasError;
use crate::base::Generation;
use crate::model::{Environment, NodeMut, NodeRef};
use crate::path::{NodeHandle, follow, follow_mut};

/// An environment together with the generation it is at.
///
/// Every write goes through this type and advances the generation, so a
/// [`NodeHandle`] computed earlier is detectably stale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    environment: Environment,
    generation: Generation,
}

impl Document {
    pub fn new(environment: Environment) -> Self {
        Self {
            environment,
            generation: Generation::INITIAL,
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn into_environment(self) -> Environment {
        self.environment
    }

    /// Whether `handle` was computed against the current generation.
    pub fn is_current(&self, handle: &NodeHandle) -> bool {
        handle.generation == self.generation
    }

    /// The node behind a current handle. `None` for stale handles.
    pub fn node(&self, handle: &NodeHandle) -> Option<NodeRef<'_>> {
        if !self.is_current(handle) {
            trace!("[DOC] stale handle {} at {}", handle.generation, self.generation);
            return None;
        }
        follow(&self.environment, handle)
    }

    /// Swap in a new environment and return the old one.
    pub fn replace(&mut self, environment: Environment) -> Environment {
        let previous = std::mem::replace(&mut self.environment, environment);
        let generation = self.generation.bump();
        info!("[DOC] environment replaced, now at {}", generation);
        previous
    }

    /// Run a write against the whole environment. The generation advances
    /// when `edit` succeeds.
    pub fn edit<R>(
        &mut self,
        edit: impl FnOnce(&mut Environment) -> Result<R, AasError>,
    ) -> Result<R, AasError> {
        let out = edit(&mut self.environment)?;
        self.generation.bump();
        Ok(out)
    }

    /// Run a write against the node behind `handle`. The generation advances
    /// when `edit` succeeds.
    pub fn edit_node<R>(
        &mut self,
        handle: &NodeHandle,
        edit: impl FnOnce(NodeMut<'_>) -> Result<R, AasError>,
    ) -> Result<R, AasError> {
        if !self.is_current(handle) {
            return Err(AasError::not_found(format!(
                "node of {} (document is at {})",
                handle.generation, self.generation
            )));
        }
        let node = follow_mut(&mut self.environment, handle)
            .ok_or_else(|| AasError::not_found("node behind handle"))?;
        let out = edit(node)?;
        self.generation.bump();
        Ok(out)
    }
}
