//! One lock per document.

use std::sync::Arc;

use parking_lot::Mutex;

use super::AasService;
use crate::model::Environment;

/// A cloneable handle to a service behind a single mutex.
///
/// Every call runs to completion under the lock, so a whole-document swap
/// and the cache clear that goes with it are never observed half-done.
#[derive(Clone)]
pub struct SharedService(Arc<Mutex<AasService>>);

impl SharedService {
    pub fn new(service: AasService) -> Self {
        Self(Arc::new(Mutex::new(service)))
    }

    /// Run `f` with exclusive access to the service.
    pub fn with<R>(&self, f: impl FnOnce(&mut AasService) -> R) -> R {
        let mut guard = self.0.lock();
        f(&mut guard)
    }

    /// Swap the environment under the lock and return the previous one.
    pub fn replace_environment(&self, environment: Environment) -> Environment {
        self.with(|service| service.put_environment(environment))
    }
}

impl std::fmt::Debug for SharedService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0.try_lock() {
            Some(service) => f.debug_tuple("SharedService").field(&*service).finish(),
            None => f.write_str("SharedService(<locked>)"),
        }
    }
}
