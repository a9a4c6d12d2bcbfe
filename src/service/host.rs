//! `AasService`: the served document behind a path-addressed surface.
//!
//! ```ignore
//! use aas::service::{AasService, SerializationModifier};
//!
//! let mut service = AasService::new(environment);
//! let weight = service.get_submodel_element(
//!     "TechnicalData",
//!     "TechnicalProperties.Weight_Kg",
//!     SerializationModifier::Value,
//! )?;
//! ```
//!
//! Lookups go through an LFU cache keyed by the literal path string. Cached
//! entries are handles stamped with the document generation; any write bumps
//! the generation and clears the cache.

use std::time::Instant;

use serde_json::{Map, Value};
use tracing::{debug, info, trace, warn};

use super::document::Document;
use super::metrics::{LookupMetric, PathStats, SerializationMetric};
use super::modifier::{SerializationModifier, SubmodelReference};
use super::{AasError, ServiceConfig};
use crate::base::{decode_identifier, encode_identifier};
use crate::cache::{CacheStats, LfuCache};
use crate::model::{
    AssetInformation, DataTypeDefXsd, Environment, NodeMut, NodeRef, Property, Reference,
    Submodel, SubmodelElement, SubmodelElementCollection,
};
use crate::path::{IdShortPath, Miss, NodeHandle, PathError, locate, submodel_matches};
use crate::serialize::jsonization::environment_from_structural;
use crate::serialize::{SerializeError, TypedValue, to_structural, to_value_only, xmlization};

type Result<T> = std::result::Result<T, AasError>;

/// Per-request log line; `debug` when the service runs in debug mode.
macro_rules! request_log {
    ($service:expr, $($arg:tt)*) => {
        if $service.config.debug {
            debug!($($arg)*)
        } else {
            trace!($($arg)*)
        }
    };
}

/// Owns one document, its lookup cache and the counters around them.
pub struct AasService {
    document: Document,
    cache: LfuCache<String, std::result::Result<NodeHandle, Miss>>,
    stats: PathStats,
    config: ServiceConfig,
}

impl AasService {
    // ── Construction ─────────────────────────────────────────────────

    /// Serve `environment` with the default configuration.
    pub fn new(environment: Environment) -> Self {
        Self::with_config(environment, ServiceConfig::default())
    }

    pub fn with_config(environment: Environment, config: ServiceConfig) -> Self {
        Self {
            document: Document::new(environment),
            cache: LfuCache::new(config.cache_capacity),
            stats: PathStats::default(),
            config,
        }
    }

    /// Build from a structural JSON environment.
    pub fn from_structural(value: &Value, config: ServiceConfig) -> Result<Self> {
        let environment = environment_from_structural(value)?;
        Ok(Self::with_config(environment, config))
    }

    // ── Access ───────────────────────────────────────────────────────

    pub fn environment(&self) -> &Environment {
        self.document.environment()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Lookup instrumentation since construction.
    pub fn stats(&self) -> PathStats {
        self.stats
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Number of memoized path outcomes.
    pub fn cached_paths(&self) -> usize {
        self.cache.len()
    }

    pub fn into_environment(self) -> Environment {
        self.document.into_environment()
    }

    // ── Environment ──────────────────────────────────────────────────

    pub fn to_structural_environment(&self) -> Value {
        to_structural(self.document.environment())
    }

    /// The environment as an XML document.
    pub fn environment_xml(&self) -> Result<String> {
        Ok(xmlization::to_string(self.document.environment())?)
    }

    /// Replace the whole environment and return the previous one.
    pub fn put_environment(&mut self, environment: Environment) -> Environment {
        let previous = self.document.replace(environment);
        self.invalidate("environment replacement");
        previous
    }

    /// Replace the whole environment from its structural JSON.
    pub fn put_structural_environment(&mut self, value: &Value) -> Result<Environment> {
        let environment = environment_from_structural(value)?;
        Ok(self.put_environment(environment))
    }

    /// Asset information of the first shell.
    pub fn asset_information(&self) -> Result<&AssetInformation> {
        self.document
            .environment()
            .shells()
            .first()
            .map(|shell| &shell.asset_information)
            .ok_or_else(|| AasError::not_found("asset administration shell"))
    }

    // ── Submodels ────────────────────────────────────────────────────

    /// One reference per submodel, in declaration order.
    pub fn submodel_references(&self) -> Vec<SubmodelReference> {
        self.document
            .environment()
            .submodels()
            .iter()
            .map(SubmodelReference::from)
            .collect()
    }

    /// Find a submodel by idShort, base64url-encoded id (padded or not), or
    /// verbatim id.
    pub fn resolve_submodel(&self, identifier: &str) -> Result<&Submodel> {
        let index = self.submodel_position(identifier)?;
        Ok(&self.document.environment().submodels()[index])
    }

    pub fn get_submodel(&self, identifier: &str, modifier: SerializationModifier) -> Result<Value> {
        let submodel = self.resolve_submodel(identifier)?;
        request_log!(self, "[AAS] get submodel '{}' {}", identifier, modifier);
        Ok(match modifier {
            SerializationModifier::Normal => to_structural(submodel),
            SerializationModifier::Value => to_value_only(submodel).unwrap_or(Value::Null),
            SerializationModifier::Reference => {
                to_structural(&Reference::submodel(submodel.id.clone()))
            }
            SerializationModifier::Path => {
                Value::Array(submodel.id_short().map(Value::from).into_iter().collect())
            }
        })
    }

    /// Replace the submodel matched by `identifier` in place.
    pub fn put_submodel(&mut self, identifier: &str, submodel: Submodel) -> Result<()> {
        let index = self.submodel_position(identifier)?;
        self.document.edit(|env| {
            env.submodels_mut()[index] = submodel;
            Ok(())
        })?;
        info!("[AAS] submodel '{}' replaced", identifier);
        self.invalidate("submodel replacement");
        Ok(())
    }

    /// Remove the submodel matched by `identifier` and return it.
    pub fn delete_submodel(&mut self, identifier: &str) -> Result<Submodel> {
        let index = self.submodel_position(identifier)?;
        let removed = self.document.edit(|env| Ok(env.submodels_mut().remove(index)))?;
        info!("[AAS] submodel '{}' deleted", identifier);
        self.invalidate("submodel deletion");
        Ok(removed)
    }

    // ── Paths ────────────────────────────────────────────────────────

    /// Resolve a full dotted path whose head names a submodel.
    pub fn resolve_path(&mut self, dotted_path: &str) -> Result<NodeRef<'_>> {
        let handle = self.locate_cached(dotted_path)?;
        self.document
            .node(&handle)
            .ok_or_else(|| AasError::not_found(dotted_path))
    }

    pub fn get_submodel_element(
        &mut self,
        identifier: &str,
        id_short_path: &str,
        modifier: SerializationModifier,
    ) -> Result<Value> {
        let handle = self.locate_element(identifier, id_short_path)?;
        let node = self
            .document
            .node(&handle)
            .ok_or_else(|| AasError::not_found(id_short_path))?;
        request_log!(self, "[AAS] get element '{}' of '{}' {}", id_short_path, identifier, modifier);

        match modifier {
            SerializationModifier::Normal => Ok(to_structural(node)),
            SerializationModifier::Value => Ok(element_value(node)),
            SerializationModifier::Path => Ok(Value::Array(vec![Value::from(id_short_path)])),
            SerializationModifier::Reference => {
                warn!("[AAS] $reference is not offered for submodel elements");
                Err(AasError::unsupported("$reference on a submodel element"))
            }
        }
    }

    // ── Element writes ───────────────────────────────────────────────

    /// Set the value of a Property, stored in its XSD lexical form.
    pub fn patch_element_value(
        &mut self,
        identifier: &str,
        id_short_path: &str,
        value: &TypedValue,
    ) -> Result<()> {
        let handle = self.locate_element(identifier, id_short_path)?;
        self.document.edit_node(&handle, |node| match node {
            NodeMut::Element(SubmodelElement::Property(property)) => {
                property.value = Some(value.to_lexical());
                Ok(())
            }
            other => Err(AasError::invalid_value(format!(
                "value patch needs a Property, '{}' is a {}",
                id_short_path,
                other.kind_name()
            ))),
        })?;
        request_log!(self, "[AAS] patched '{}' of '{}'", id_short_path, identifier);
        self.invalidate("value patch");
        Ok(())
    }

    /// Append `element` below a submodel, collection or list and keep only
    /// the newest `max_len` children. An empty path targets the submodel.
    ///
    /// Returns how many of the oldest children were dropped.
    pub fn append_element(
        &mut self,
        identifier: &str,
        id_short_path: &str,
        element: SubmodelElement,
        max_len: usize,
    ) -> Result<usize> {
        if max_len == 0 {
            return Err(AasError::invalid_value("ring buffer length must be positive"));
        }
        let handle = if id_short_path.is_empty() {
            let head = self.path_head(identifier)?;
            self.locate_cached(&head)?
        } else {
            self.locate_element(identifier, id_short_path)?
        };

        let dropped = self.document.edit_node(&handle, |mut node| {
            let kind = node.kind_name();
            let into_list = matches!(node, NodeMut::Element(SubmodelElement::SubmodelElementList(_)));
            let Some(children) = node.children_mut() else {
                return Err(AasError::invalid_value(format!("cannot append to a {kind}")));
            };
            let mut element = element;
            // List items are addressed by position and carry no idShort.
            if into_list {
                element.base_mut().id_short = None;
            }
            children.push(element);
            let overflow = children.len().saturating_sub(max_len);
            children.drain(..overflow);
            Ok(overflow)
        })?;

        if dropped > 0 {
            debug!("[AAS] dropped {} oldest child(ren) below '{}'", dropped, id_short_path);
        }
        self.invalidate("element append");
        Ok(dropped)
    }

    /// Append one time-series record: a `Time` property (`xs:long`) followed
    /// by one `xs:float` property per reading. The target keeps at most
    /// `max_time_series_records` records.
    pub fn append_record(
        &mut self,
        identifier: &str,
        records_path: &str,
        timestamp: i64,
        readings: &[(&str, f64)],
    ) -> Result<usize> {
        let mut values: Vec<SubmodelElement> = Vec::with_capacity(readings.len() + 1);
        values.push(
            Property::new("Time", DataTypeDefXsd::Long)
                .with_value(timestamp.to_string())
                .into(),
        );
        values.extend(readings.iter().map(|&(name, reading)| {
            Property::new(name, DataTypeDefXsd::Float)
                .with_value(TypedValue::Double(reading).to_lexical())
                .into()
        }));
        let record = SubmodelElementCollection::new("Record", values);
        let max_len = self.config.max_time_series_records;
        self.append_element(identifier, records_path, record.into(), max_len)
    }

    // ── Metrics ──────────────────────────────────────────────────────

    /// Time a full structural rendering of the environment.
    pub fn measure_structural_serialization(&self) -> Result<SerializationMetric> {
        let start = Instant::now();
        let bytes = serde_json::to_vec(&self.to_structural_environment())
            .map_err(|e| SerializeError::json("", e.to_string()))?;
        Ok(SerializationMetric::new(start.elapsed(), bytes.len()))
    }

    /// Time one element lookup. Any error counts as not found.
    pub fn measure_lookup(&mut self, identifier: &str, id_short_path: &str) -> LookupMetric {
        let start = Instant::now();
        let found = self
            .get_submodel_element(identifier, id_short_path, SerializationModifier::Normal)
            .is_ok();
        LookupMetric::new(start.elapsed(), found)
    }

    // ── Internals ────────────────────────────────────────────────────

    fn submodel_position(&self, identifier: &str) -> Result<usize> {
        let decoded = decode_identifier(identifier);
        self.document
            .environment()
            .submodels()
            .iter()
            .position(|sm| {
                submodel_matches(sm, identifier)
                    || sm.id == identifier
                    || decoded.as_deref() == Some(sm.id.as_str())
            })
            .ok_or_else(|| {
                debug!("[AAS] submodel '{}' not found", identifier);
                AasError::not_found(format!("submodel '{identifier}'"))
            })
    }

    /// The path head for `identifier`. A verbatim id is swapped for its
    /// encoded form, since ids may contain `.` and `[`.
    fn path_head(&self, identifier: &str) -> Result<String> {
        let index = self.submodel_position(identifier)?;
        let submodel = &self.document.environment().submodels()[index];
        if submodel_matches(submodel, identifier) {
            Ok(identifier.to_string())
        } else {
            Ok(encode_identifier(&submodel.id))
        }
    }

    fn locate_element(&mut self, identifier: &str, id_short_path: &str) -> Result<NodeHandle> {
        if id_short_path.is_empty() {
            return Err(PathError::malformed(id_short_path, "empty idShort path").into());
        }
        let head = self.path_head(identifier)?;
        self.locate_cached(&format!("{head}.{id_short_path}"))
    }

    /// Resolve through the cache. Malformed paths are never cached; both
    /// found and missing outcomes are.
    fn locate_cached(&mut self, dotted_path: &str) -> Result<NodeHandle> {
        let path = IdShortPath::parse(dotted_path)?;

        if self.config.cache_enabled {
            let key = dotted_path.to_string();
            match self.cache.get(&key).cloned() {
                Some(Ok(handle)) if !self.document.is_current(&handle) => {
                    warn!(
                        "[AAS] stale handle for '{}' ({} vs {}), walking again",
                        dotted_path,
                        handle.generation,
                        self.document.generation()
                    );
                    self.cache.remove(&key);
                }
                Some(outcome) => {
                    self.stats.cache_hits += 1;
                    request_log!(self, "[AAS] cache hit '{}'", dotted_path);
                    return outcome.map_err(AasError::from);
                }
                None => {}
            }
            self.stats.cache_misses += 1;
            let outcome = self.walk(&path);
            if let Some(evicted) = self.cache.put(key, outcome.clone()) {
                debug!("[AAS] evicted '{}' from the path cache", evicted);
            }
            return outcome.map_err(AasError::from);
        }

        self.walk(&path).map_err(AasError::from)
    }

    fn walk(&mut self, path: &IdShortPath) -> std::result::Result<NodeHandle, Miss> {
        self.stats.walks += 1;
        request_log!(self, "[AAS] walking '{}'", path);
        locate(self.document.environment(), path, self.document.generation())
    }

    fn invalidate(&mut self, reason: &str) {
        if !self.cache.is_empty() {
            debug!("[AAS] clearing {} cached path(s) after {}", self.cache.len(), reason);
        }
        self.cache.clear();
    }
}

/// `$value` of an element: `{idShort: projection}`, the bare projection for
/// unnamed list items, and the structural form for kinds without a value-only
/// projection.
fn element_value(node: NodeRef<'_>) -> Value {
    let Some(projection) = to_value_only(node) else {
        warn!("[AAS] {} has no value-only form, rendering structurally", node.kind_name());
        return to_structural(node);
    };
    match node.id_short() {
        Some(id_short) => {
            let mut map = Map::new();
            map.insert(id_short.to_string(), projection);
            Value::Object(map)
        }
        None => projection,
    }
}

impl std::fmt::Debug for AasService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AasService")
            .field("generation", &self.document.generation())
            .field("submodels", &self.document.environment().submodels().len())
            .field("cached_paths", &self.cache.len())
            .field("stats", &self.stats)
            .field("config", &self.config)
            .finish()
    }
}
