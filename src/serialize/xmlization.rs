//! XML encoding of the tree model.
//!
//! The output is element-only (no attributes besides the namespace
//! declaration on the root) and unindented. Rules:
//!
//! - the first element carries `xmlns`; nothing after it does
//! - a present but empty sequence is a self-closing element, an absent one
//!   emits nothing
//! - collections, multi-language properties, reference elements, operations,
//!   capabilities, environments and administrative information collapse to a
//!   self-closing element when all their optional fields are absent
//! - text is escaped for `&`, `<` and `>` only; bytes are unwrapped base64

use std::io::Write;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use quick_xml::Writer;
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use super::error::SerializeError;
use super::lexical::{TypedValue, format_bool};
use crate::model::{
    AdministrativeInformation, AssetAdministrationShell, AssetInformation, ConceptDescription,
    DataSpecificationIec61360, ElementBase, EmbeddedDataSpecification, Environment, Extension, Key,
    LangString, LevelType, NodeRef, OperationVariable, Qualifier, Reference, Resource,
    SpecificAssetId, Submodel, SubmodelElement, ValueList, ValueReferencePair,
};

/// Namespace of the AAS 3.0 XML schema.
pub const NAMESPACE: &str = "https://admin-shell.io/aas/3/0";

type Result<T = ()> = std::result::Result<T, SerializeError>;

/// Serialize `node` into `sink`.
pub fn write<'a, W: Write>(node: impl Into<NodeRef<'a>>, sink: W) -> Result {
    XmlSerializer::new(sink).write(node)
}

/// Serialize `node` into a string.
pub fn to_string<'a>(node: impl Into<NodeRef<'a>>) -> Result<String> {
    let mut serializer = XmlSerializer::new(Vec::new());
    serializer.write(node)?;
    String::from_utf8(serializer.into_inner())
        .map_err(|e| SerializeError::xml(format!("Invalid UTF-8: {e}")))
}

// ============================================================================
// Serializer
// ============================================================================

/// State of the one-time namespace header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Header {
    /// Nothing written yet; the next root element declares the namespace.
    Pending,
    /// A root element was opened with the namespace.
    Emitted,
    /// The first root element was self-closing; the document is complete.
    Sealed,
}

/// Streaming XML writer over any [`Write`] sink.
///
/// Only the root entry points ([`write`](Self::write),
/// [`write_scalar`](Self::write_scalar)) know about the namespace header;
/// the nested writers below them never emit it.
pub struct XmlSerializer<W: Write> {
    writer: Writer<W>,
    header: Header,
}

impl<W: Write> XmlSerializer<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: Writer::new(sink),
            header: Header::Pending,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    /// True once a self-closing first element completed the document.
    pub fn is_sealed(&self) -> bool {
        self.header == Header::Sealed
    }

    /// Write a node as a root element.
    pub fn write<'a>(&mut self, node: impl Into<NodeRef<'a>>) -> Result {
        match node.into() {
            NodeRef::Environment(env) => {
                self.root("environment", env.is_empty(), |s| s.environment_body(env))
            }
            NodeRef::Shell(shell) => {
                self.root("assetAdministrationShell", false, |s| s.shell_body(shell))
            }
            NodeRef::AssetInformation(info) => {
                self.root("assetInformation", false, |s| s.asset_information_body(info))
            }
            NodeRef::Submodel(sm) => self.root("submodel", false, |s| s.submodel_body(sm)),
            NodeRef::Element(element) => self.root(
                element_tag(element),
                element_collapses(element),
                |s| s.element_body(element),
            ),
            NodeRef::ConceptDescription(cd) => {
                self.root("conceptDescription", false, |s| s.concept_description_body(cd))
            }
            NodeRef::Reference(reference) => {
                self.root("reference", false, |s| s.reference_body(reference))
            }
        }
    }

    /// Write a single scalar as a root element, e.g. `<value>0.0</value>`.
    pub fn write_scalar(&mut self, name: &str, value: &TypedValue) -> Result {
        let text = value.to_lexical();
        self.root(name, false, |s| s.text(&text))
    }

    fn root(&mut self, tag: &str, collapsed: bool, body: impl FnOnce(&mut Self) -> Result) -> Result {
        if self.header == Header::Sealed {
            return Err(SerializeError::contract_violation(format!(
                "the document was completed by a self-closing first element; \
                 refusing to write another element <{tag}>"
            )));
        }

        let mut start = BytesStart::new(tag);
        let first = self.header == Header::Pending;
        if first {
            start.push_attribute(("xmlns", NAMESPACE));
        }

        if collapsed {
            self.emit(Event::Empty(start))?;
            if first {
                self.header = Header::Sealed;
            }
            return Ok(());
        }

        self.emit(Event::Start(start))?;
        self.header = Header::Emitted;
        body(self)?;
        self.close(tag)
    }

    // ------------------------------------------------------------------------
    // Primitives
    // ------------------------------------------------------------------------

    fn emit(&mut self, event: Event<'_>) -> Result {
        self.writer
            .write_event(event)
            .map_err(|e| SerializeError::xml(format!("Write error: {e}")))
    }

    fn open(&mut self, name: &str) -> Result {
        self.emit(Event::Start(BytesStart::new(name)))
    }

    fn close(&mut self, name: &str) -> Result {
        self.emit(Event::End(BytesEnd::new(name)))
    }

    fn empty(&mut self, name: &str) -> Result {
        self.emit(Event::Empty(BytesStart::new(name)))
    }

    fn text(&mut self, text: &str) -> Result {
        if text.is_empty() {
            return Ok(());
        }
        self.emit(Event::Text(BytesText::from_escaped(partial_escape(text))))
    }

    fn str_prop(&mut self, name: &str, value: &str) -> Result {
        self.open(name)?;
        self.text(value)?;
        self.close(name)
    }

    fn opt_str_prop(&mut self, name: &str, value: Option<&String>) -> Result {
        match value {
            Some(value) => self.str_prop(name, value),
            None => Ok(()),
        }
    }

    fn bool_prop(&mut self, name: &str, value: bool) -> Result {
        self.str_prop(name, format_bool(value))
    }

    fn bytes_prop(&mut self, name: &str, value: &[u8]) -> Result {
        self.str_prop(name, &STANDARD.encode(value))
    }

    fn list<T>(&mut self, name: &str, items: &[T], item: impl Fn(&mut Self, &T) -> Result) -> Result {
        if items.is_empty() {
            return self.empty(name);
        }
        self.open(name)?;
        for it in items {
            item(self, it)?;
        }
        self.close(name)
    }

    fn opt_list<T>(
        &mut self,
        name: &str,
        items: Option<&Vec<T>>,
        item: impl Fn(&mut Self, &T) -> Result,
    ) -> Result {
        match items {
            Some(items) => self.list(name, items, item),
            None => Ok(()),
        }
    }

    fn wrapped<T: ?Sized>(&mut self, name: &str, value: &T, body: impl FnOnce(&mut Self, &T) -> Result) -> Result {
        self.open(name)?;
        body(self, value)?;
        self.close(name)
    }

    // ------------------------------------------------------------------------
    // References and language strings
    // ------------------------------------------------------------------------

    fn reference_prop(&mut self, name: &str, reference: &Reference) -> Result {
        self.wrapped(name, reference, Self::reference_body)
    }

    fn opt_reference_prop(&mut self, name: &str, reference: Option<&Reference>) -> Result {
        match reference {
            Some(reference) => self.reference_prop(name, reference),
            None => Ok(()),
        }
    }

    fn reference_item(&mut self, reference: &Reference) -> Result {
        self.reference_prop("reference", reference)
    }

    fn opt_references(&mut self, name: &str, references: Option<&Vec<Reference>>) -> Result {
        self.opt_list(name, references, Self::reference_item)
    }

    fn reference_body(&mut self, reference: &Reference) -> Result {
        self.str_prop("type", reference.reference_type.as_str())?;
        if let Some(referred) = reference.referred_semantic_id.as_deref() {
            self.reference_prop("referredSemanticId", referred)?;
        }
        self.list("keys", &reference.keys, Self::key)
    }

    fn key(&mut self, key: &Key) -> Result {
        self.wrapped("key", key, |s, key| {
            s.str_prop("type", key.key_type.as_str())?;
            s.str_prop("value", &key.value)
        })
    }

    fn lang_strings(&mut self, name: &str, item_tag: &str, items: &[LangString]) -> Result {
        self.list(name, items, |s, lang| {
            s.wrapped(item_tag, lang, |s, lang| {
                s.str_prop("language", &lang.language)?;
                s.str_prop("text", &lang.text)
            })
        })
    }

    fn opt_lang_strings(&mut self, name: &str, item_tag: &str, items: Option<&Vec<LangString>>) -> Result {
        match items {
            Some(items) => self.lang_strings(name, item_tag, items),
            None => Ok(()),
        }
    }

    // ------------------------------------------------------------------------
    // Metadata
    // ------------------------------------------------------------------------

    fn referable(&mut self, base: &ElementBase) -> Result {
        self.opt_list("extensions", base.extensions.as_ref(), Self::extension)?;
        self.opt_str_prop("category", base.category.as_ref())?;
        self.opt_str_prop("idShort", base.id_short.as_ref())?;
        self.opt_lang_strings("displayName", "langStringNameType", base.display_name.as_ref())?;
        self.opt_lang_strings("description", "langStringTextType", base.description.as_ref())
    }

    fn semantics(&mut self, base: &ElementBase) -> Result {
        self.opt_reference_prop("semanticId", base.semantic_id.as_ref())?;
        self.opt_references("supplementalSemanticIds", base.supplemental_semantic_ids.as_ref())?;
        self.opt_list("qualifiers", base.qualifiers.as_ref(), Self::qualifier)?;
        self.data_specifications(base.embedded_data_specifications.as_ref())
    }

    fn data_specifications(&mut self, specs: Option<&Vec<EmbeddedDataSpecification>>) -> Result {
        self.opt_list("embeddedDataSpecifications", specs, Self::embedded_data_specification)
    }

    fn extension(&mut self, ext: &Extension) -> Result {
        self.wrapped("extension", ext, |s, ext| {
            s.opt_reference_prop("semanticId", ext.semantic_id.as_ref())?;
            s.opt_references("supplementalSemanticIds", ext.supplemental_semantic_ids.as_ref())?;
            s.str_prop("name", &ext.name)?;
            if let Some(value_type) = ext.value_type {
                s.str_prop("valueType", value_type.as_str())?;
            }
            s.opt_str_prop("value", ext.value.as_ref())?;
            s.opt_references("refersTo", ext.refers_to.as_ref())
        })
    }

    fn qualifier(&mut self, q: &Qualifier) -> Result {
        self.wrapped("qualifier", q, |s, q| {
            s.opt_reference_prop("semanticId", q.semantic_id.as_ref())?;
            s.opt_references("supplementalSemanticIds", q.supplemental_semantic_ids.as_ref())?;
            if let Some(kind) = q.kind {
                s.str_prop("kind", kind.as_str())?;
            }
            s.str_prop("type", &q.qualifier_type)?;
            s.str_prop("valueType", q.value_type.as_str())?;
            s.opt_str_prop("value", q.value.as_ref())?;
            s.opt_reference_prop("valueId", q.value_id.as_ref())
        })
    }

    fn administration(&mut self, admin: Option<&AdministrativeInformation>) -> Result {
        let Some(admin) = admin else {
            return Ok(());
        };
        if admin.is_empty() {
            return self.empty("administration");
        }
        self.wrapped("administration", admin, |s, admin| {
            s.data_specifications(admin.embedded_data_specifications.as_ref())?;
            s.opt_str_prop("version", admin.version.as_ref())?;
            s.opt_str_prop("revision", admin.revision.as_ref())?;
            s.opt_reference_prop("creator", admin.creator.as_ref())?;
            s.opt_str_prop("templateId", admin.template_id.as_ref())
        })
    }

    fn embedded_data_specification(&mut self, eds: &EmbeddedDataSpecification) -> Result {
        self.wrapped("embeddedDataSpecification", eds, |s, eds| {
            s.wrapped("dataSpecificationContent", &eds.data_specification_content, |s, content| {
                s.wrapped("dataSpecificationIec61360", content, Self::iec61360_body)
            })?;
            s.reference_prop("dataSpecification", &eds.data_specification)
        })
    }

    fn iec61360_body(&mut self, content: &DataSpecificationIec61360) -> Result {
        self.lang_strings(
            "preferredName",
            "langStringPreferredNameTypeIec61360",
            &content.preferred_name,
        )?;
        self.opt_lang_strings(
            "shortName",
            "langStringShortNameTypeIec61360",
            content.short_name.as_ref(),
        )?;
        self.opt_str_prop("unit", content.unit.as_ref())?;
        self.opt_reference_prop("unitId", content.unit_id.as_ref())?;
        self.opt_str_prop("sourceOfDefinition", content.source_of_definition.as_ref())?;
        self.opt_str_prop("symbol", content.symbol.as_ref())?;
        if let Some(data_type) = content.data_type {
            self.str_prop("dataType", data_type.as_str())?;
        }
        self.opt_lang_strings(
            "definition",
            "langStringDefinitionTypeIec61360",
            content.definition.as_ref(),
        )?;
        self.opt_str_prop("valueFormat", content.value_format.as_ref())?;
        if let Some(list) = &content.value_list {
            self.wrapped("valueList", list, Self::value_list_body)?;
        }
        self.opt_str_prop("value", content.value.as_ref())?;
        if let Some(level) = &content.level_type {
            self.wrapped("levelType", level, Self::level_type_body)?;
        }
        Ok(())
    }

    fn value_list_body(&mut self, list: &ValueList) -> Result {
        self.list("valueReferencePairs", &list.value_reference_pairs, |s, pair| {
            s.wrapped("valueReferencePair", pair, |s, pair: &ValueReferencePair| {
                s.str_prop("value", &pair.value)?;
                s.reference_prop("valueId", &pair.value_id)
            })
        })
    }

    fn level_type_body(&mut self, level: &LevelType) -> Result {
        self.bool_prop("min", level.min)?;
        self.bool_prop("nom", level.nom)?;
        self.bool_prop("typ", level.typ)?;
        self.bool_prop("max", level.max)
    }

    fn specific_asset_id(&mut self, id: &SpecificAssetId) -> Result {
        self.wrapped("specificAssetId", id, |s, id| {
            s.opt_reference_prop("semanticId", id.semantic_id.as_ref())?;
            s.opt_references("supplementalSemanticIds", id.supplemental_semantic_ids.as_ref())?;
            s.str_prop("name", &id.name)?;
            s.str_prop("value", &id.value)?;
            s.opt_reference_prop("externalSubjectId", id.external_subject_id.as_ref())
        })
    }

    fn resource_body(&mut self, resource: &Resource) -> Result {
        self.str_prop("path", &resource.path)?;
        self.opt_str_prop("contentType", resource.content_type.as_ref())
    }

    // ------------------------------------------------------------------------
    // Identifiables
    // ------------------------------------------------------------------------

    fn environment_body(&mut self, env: &Environment) -> Result {
        self.opt_list(
            "assetAdministrationShells",
            env.asset_administration_shells.as_ref(),
            |s, shell| s.wrapped("assetAdministrationShell", shell, Self::shell_body),
        )?;
        self.opt_list("submodels", env.submodels.as_ref(), |s, sm| {
            s.wrapped("submodel", sm, Self::submodel_body)
        })?;
        self.opt_list(
            "conceptDescriptions",
            env.concept_descriptions.as_ref(),
            |s, cd| s.wrapped("conceptDescription", cd, Self::concept_description_body),
        )
    }

    fn shell_body(&mut self, shell: &AssetAdministrationShell) -> Result {
        self.opt_list("extensions", shell.extensions.as_ref(), Self::extension)?;
        self.opt_str_prop("category", shell.category.as_ref())?;
        self.opt_str_prop("idShort", shell.id_short.as_ref())?;
        self.opt_lang_strings("displayName", "langStringNameType", shell.display_name.as_ref())?;
        self.opt_lang_strings("description", "langStringTextType", shell.description.as_ref())?;
        self.administration(shell.administration.as_ref())?;
        self.str_prop("id", &shell.id)?;
        self.data_specifications(shell.embedded_data_specifications.as_ref())?;
        self.opt_reference_prop("derivedFrom", shell.derived_from.as_ref())?;
        self.wrapped("assetInformation", &shell.asset_information, Self::asset_information_body)?;
        self.opt_references("submodels", shell.submodels.as_ref())
    }

    fn asset_information_body(&mut self, info: &AssetInformation) -> Result {
        self.str_prop("assetKind", info.asset_kind.as_str())?;
        self.opt_str_prop("globalAssetId", info.global_asset_id.as_ref())?;
        self.opt_list(
            "specificAssetIds",
            info.specific_asset_ids.as_ref(),
            Self::specific_asset_id,
        )?;
        self.opt_str_prop("assetType", info.asset_type.as_ref())?;
        if let Some(thumbnail) = &info.default_thumbnail {
            self.wrapped("defaultThumbnail", thumbnail, Self::resource_body)?;
        }
        Ok(())
    }

    fn submodel_body(&mut self, sm: &Submodel) -> Result {
        self.referable(&sm.base)?;
        self.administration(sm.administration.as_ref())?;
        self.str_prop("id", &sm.id)?;
        if let Some(kind) = sm.kind {
            self.str_prop("kind", kind.as_str())?;
        }
        self.semantics(&sm.base)?;
        self.opt_list("submodelElements", sm.submodel_elements.as_ref(), Self::element)
    }

    fn concept_description_body(&mut self, cd: &ConceptDescription) -> Result {
        self.opt_list("extensions", cd.extensions.as_ref(), Self::extension)?;
        self.opt_str_prop("category", cd.category.as_ref())?;
        self.opt_str_prop("idShort", cd.id_short.as_ref())?;
        self.opt_lang_strings("displayName", "langStringNameType", cd.display_name.as_ref())?;
        self.opt_lang_strings("description", "langStringTextType", cd.description.as_ref())?;
        self.administration(cd.administration.as_ref())?;
        self.str_prop("id", &cd.id)?;
        self.data_specifications(cd.embedded_data_specifications.as_ref())?;
        self.opt_references("isCaseOf", cd.is_case_of.as_ref())
    }

    // ------------------------------------------------------------------------
    // Submodel elements
    // ------------------------------------------------------------------------

    fn element(&mut self, element: &SubmodelElement) -> Result {
        let tag = element_tag(element);
        if element_collapses(element) {
            return self.empty(tag);
        }
        self.open(tag)?;
        self.element_body(element)?;
        self.close(tag)
    }

    fn operation_variable(&mut self, var: &OperationVariable) -> Result {
        self.wrapped("operationVariable", var, |s, var| {
            s.wrapped("value", &*var.value, Self::element)
        })
    }

    fn element_body(&mut self, element: &SubmodelElement) -> Result {
        self.referable(element.base())?;
        self.semantics(element.base())?;

        match element {
            SubmodelElement::Property(p) => {
                self.str_prop("valueType", p.value_type.as_str())?;
                self.opt_str_prop("value", p.value.as_ref())?;
                self.opt_reference_prop("valueId", p.value_id.as_ref())
            }
            SubmodelElement::MultiLanguageProperty(mlp) => {
                self.opt_lang_strings("value", "langStringTextType", mlp.value.as_ref())?;
                self.opt_reference_prop("valueId", mlp.value_id.as_ref())
            }
            SubmodelElement::Range(r) => {
                self.str_prop("valueType", r.value_type.as_str())?;
                self.opt_str_prop("min", r.min.as_ref())?;
                self.opt_str_prop("max", r.max.as_ref())
            }
            SubmodelElement::Blob(b) => {
                if let Some(bytes) = &b.value {
                    self.bytes_prop("value", bytes)?;
                }
                self.str_prop("contentType", &b.content_type)
            }
            SubmodelElement::File(f) => {
                self.opt_str_prop("value", f.value.as_ref())?;
                self.str_prop("contentType", &f.content_type)
            }
            SubmodelElement::ReferenceElement(r) => self.opt_reference_prop("value", r.value.as_ref()),
            SubmodelElement::RelationshipElement(r) => {
                self.reference_prop("first", &r.first)?;
                self.reference_prop("second", &r.second)
            }
            SubmodelElement::AnnotatedRelationshipElement(r) => {
                self.reference_prop("first", &r.first)?;
                self.reference_prop("second", &r.second)?;
                self.opt_list("annotations", r.annotations.as_ref(), Self::element)
            }
            SubmodelElement::SubmodelElementCollection(c) => {
                self.opt_list("value", c.value.as_ref(), Self::element)
            }
            SubmodelElement::SubmodelElementList(l) => {
                if let Some(order_relevant) = l.order_relevant {
                    self.bool_prop("orderRelevant", order_relevant)?;
                }
                self.opt_reference_prop("semanticIdListElement", l.semantic_id_list_element.as_ref())?;
                self.str_prop("typeValueListElement", l.type_value_list_element.as_str())?;
                if let Some(value_type) = l.value_type_list_element {
                    self.str_prop("valueTypeListElement", value_type.as_str())?;
                }
                self.opt_list("value", l.value.as_ref(), Self::element)
            }
            SubmodelElement::Entity(e) => {
                self.opt_list("statements", e.statements.as_ref(), Self::element)?;
                self.str_prop("entityType", e.entity_type.as_str())?;
                self.opt_str_prop("globalAssetId", e.global_asset_id.as_ref())?;
                self.opt_list(
                    "specificAssetIds",
                    e.specific_asset_ids.as_ref(),
                    Self::specific_asset_id,
                )
            }
            SubmodelElement::BasicEventElement(e) => {
                self.reference_prop("observed", &e.observed)?;
                self.str_prop("direction", e.direction.as_str())?;
                self.str_prop("state", e.state.as_str())?;
                self.opt_str_prop("messageTopic", e.message_topic.as_ref())?;
                self.opt_reference_prop("messageBroker", e.message_broker.as_ref())?;
                self.opt_str_prop("lastUpdate", e.last_update.as_ref())?;
                self.opt_str_prop("minInterval", e.min_interval.as_ref())?;
                self.opt_str_prop("maxInterval", e.max_interval.as_ref())
            }
            SubmodelElement::Operation(op) => {
                self.opt_list("inputVariables", op.input_variables.as_ref(), Self::operation_variable)?;
                self.opt_list("outputVariables", op.output_variables.as_ref(), Self::operation_variable)?;
                self.opt_list(
                    "inoutputVariables",
                    op.inoutput_variables.as_ref(),
                    Self::operation_variable,
                )
            }
            SubmodelElement::Capability(_) => Ok(()),
        }
    }
}

fn element_tag(element: &SubmodelElement) -> &'static str {
    match element {
        SubmodelElement::Property(_) => "property",
        SubmodelElement::MultiLanguageProperty(_) => "multiLanguageProperty",
        SubmodelElement::Range(_) => "range",
        SubmodelElement::Blob(_) => "blob",
        SubmodelElement::File(_) => "file",
        SubmodelElement::ReferenceElement(_) => "referenceElement",
        SubmodelElement::RelationshipElement(_) => "relationshipElement",
        SubmodelElement::AnnotatedRelationshipElement(_) => "annotatedRelationshipElement",
        SubmodelElement::SubmodelElementCollection(_) => "submodelElementCollection",
        SubmodelElement::SubmodelElementList(_) => "submodelElementList",
        SubmodelElement::Entity(_) => "entity",
        SubmodelElement::BasicEventElement(_) => "basicEventElement",
        SubmodelElement::Operation(_) => "operation",
        SubmodelElement::Capability(_) => "capability",
    }
}

/// Kinds that render as a self-closing element when nothing optional is set.
/// Every other kind has a mandatory field and always opens.
fn element_collapses(element: &SubmodelElement) -> bool {
    element.base().is_empty()
        && match element {
            SubmodelElement::SubmodelElementCollection(c) => c.value.is_none(),
            SubmodelElement::MultiLanguageProperty(m) => m.value.is_none() && m.value_id.is_none(),
            SubmodelElement::ReferenceElement(r) => r.value.is_none(),
            SubmodelElement::Operation(op) => {
                op.input_variables.is_none()
                    && op.output_variables.is_none()
                    && op.inoutput_variables.is_none()
            }
            SubmodelElement::Capability(_) => true,
            _ => false,
        }
}
