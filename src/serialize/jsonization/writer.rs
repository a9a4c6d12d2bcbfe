//! Tree model → structural JSON.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Map, Value, json};

use crate::model::{
    AdministrativeInformation, AssetAdministrationShell, AssetInformation, ConceptDescription,
    DataSpecificationIec61360, ElementBase, EmbeddedDataSpecification, Environment, Extension, Key,
    LangString, LevelType, NodeRef, OperationVariable, Qualifier, Reference, Resource,
    SpecificAssetId, Submodel, SubmodelElement, ValueReferencePair,
};

/// Encode any node as its structural object.
pub fn to_structural<'a>(node: impl Into<NodeRef<'a>>) -> Value {
    match node.into() {
        NodeRef::Environment(env) => environment_to_json(env),
        NodeRef::Shell(shell) => shell_to_json(shell),
        NodeRef::AssetInformation(info) => asset_information_to_json(info),
        NodeRef::Submodel(sm) => submodel_to_json(sm),
        NodeRef::Element(element) => element_to_json(element),
        NodeRef::ConceptDescription(cd) => concept_description_to_json(cd),
        NodeRef::Reference(reference) => reference_to_json(reference),
    }
}

// ============================================================================
// Object builder
// ============================================================================

/// Insertion-ordered object that drops absent fields.
#[derive(Default)]
struct Obj(Map<String, Value>);

impl Obj {
    fn new() -> Self {
        Self::default()
    }

    fn put(&mut self, key: &str, value: impl Into<Value>) {
        self.0.insert(key.to_string(), value.into());
    }

    fn opt<T>(&mut self, key: &str, value: Option<&T>, encode: impl FnOnce(&T) -> Value) {
        if let Some(value) = value {
            self.put(key, encode(value));
        }
    }

    fn opt_str(&mut self, key: &str, value: Option<&String>) {
        self.opt(key, value, |s| json!(s));
    }

    fn list<T>(&mut self, key: &str, items: &[T], encode: impl Fn(&T) -> Value) {
        self.put(key, Value::Array(items.iter().map(encode).collect()));
    }

    fn opt_list<T>(&mut self, key: &str, items: Option<&Vec<T>>, encode: impl Fn(&T) -> Value) {
        if let Some(items) = items {
            self.list(key, items, encode);
        }
    }

    fn model_type(mut self, name: &str) -> Value {
        self.put("modelType", name);
        self.finish()
    }

    fn finish(self) -> Value {
        Value::Object(self.0)
    }
}

// ============================================================================
// Shared pieces
// ============================================================================

fn write_referable(obj: &mut Obj, base: &ElementBase) {
    obj.opt_list("extensions", base.extensions.as_ref(), extension_to_json);
    obj.opt_str("category", base.category.as_ref());
    obj.opt_str("idShort", base.id_short.as_ref());
    obj.opt_list("displayName", base.display_name.as_ref(), lang_string_to_json);
    obj.opt_list("description", base.description.as_ref(), lang_string_to_json);
}

fn write_semantics(obj: &mut Obj, base: &ElementBase) {
    obj.opt("semanticId", base.semantic_id.as_ref(), reference_to_json);
    obj.opt_list(
        "supplementalSemanticIds",
        base.supplemental_semantic_ids.as_ref(),
        reference_to_json,
    );
    obj.opt_list("qualifiers", base.qualifiers.as_ref(), qualifier_to_json);
    write_data_specifications(obj, base.embedded_data_specifications.as_ref());
}

fn write_data_specifications(obj: &mut Obj, specs: Option<&Vec<EmbeddedDataSpecification>>) {
    obj.opt_list("embeddedDataSpecifications", specs, embedded_data_specification_to_json);
}

fn reference_to_json(reference: &Reference) -> Value {
    let mut obj = Obj::new();
    obj.put("type", reference.reference_type.as_str());
    obj.opt(
        "referredSemanticId",
        reference.referred_semantic_id.as_deref(),
        reference_to_json,
    );
    obj.list("keys", &reference.keys, key_to_json);
    obj.finish()
}

fn key_to_json(key: &Key) -> Value {
    json!({ "type": key.key_type.as_str(), "value": key.value })
}

fn lang_string_to_json(lang: &LangString) -> Value {
    json!({ "language": lang.language, "text": lang.text })
}

fn extension_to_json(ext: &Extension) -> Value {
    let mut obj = Obj::new();
    obj.opt("semanticId", ext.semantic_id.as_ref(), reference_to_json);
    obj.opt_list(
        "supplementalSemanticIds",
        ext.supplemental_semantic_ids.as_ref(),
        reference_to_json,
    );
    obj.put("name", ext.name.as_str());
    obj.opt("valueType", ext.value_type.as_ref(), |t| json!(t.as_str()));
    obj.opt_str("value", ext.value.as_ref());
    obj.opt_list("refersTo", ext.refers_to.as_ref(), reference_to_json);
    obj.finish()
}

fn qualifier_to_json(q: &Qualifier) -> Value {
    let mut obj = Obj::new();
    obj.opt("semanticId", q.semantic_id.as_ref(), reference_to_json);
    obj.opt_list(
        "supplementalSemanticIds",
        q.supplemental_semantic_ids.as_ref(),
        reference_to_json,
    );
    obj.opt("kind", q.kind.as_ref(), |k| json!(k.as_str()));
    obj.put("type", q.qualifier_type.as_str());
    obj.put("valueType", q.value_type.as_str());
    obj.opt_str("value", q.value.as_ref());
    obj.opt("valueId", q.value_id.as_ref(), reference_to_json);
    obj.finish()
}

fn administration_to_json(admin: &AdministrativeInformation) -> Value {
    let mut obj = Obj::new();
    write_data_specifications(&mut obj, admin.embedded_data_specifications.as_ref());
    obj.opt_str("version", admin.version.as_ref());
    obj.opt_str("revision", admin.revision.as_ref());
    obj.opt("creator", admin.creator.as_ref(), reference_to_json);
    obj.opt_str("templateId", admin.template_id.as_ref());
    obj.finish()
}

fn embedded_data_specification_to_json(eds: &EmbeddedDataSpecification) -> Value {
    json!({
        "dataSpecification": reference_to_json(&eds.data_specification),
        "dataSpecificationContent": iec61360_to_json(&eds.data_specification_content),
    })
}

fn iec61360_to_json(content: &DataSpecificationIec61360) -> Value {
    let mut obj = Obj::new();
    obj.list("preferredName", &content.preferred_name, lang_string_to_json);
    obj.opt_list("shortName", content.short_name.as_ref(), lang_string_to_json);
    obj.opt_str("unit", content.unit.as_ref());
    obj.opt("unitId", content.unit_id.as_ref(), reference_to_json);
    obj.opt_str("sourceOfDefinition", content.source_of_definition.as_ref());
    obj.opt_str("symbol", content.symbol.as_ref());
    obj.opt("dataType", content.data_type.as_ref(), |t| json!(t.as_str()));
    obj.opt_list("definition", content.definition.as_ref(), lang_string_to_json);
    obj.opt_str("valueFormat", content.value_format.as_ref());
    obj.opt("valueList", content.value_list.as_ref(), |list| {
        let mut pairs = Obj::new();
        pairs.list(
            "valueReferencePairs",
            &list.value_reference_pairs,
            value_reference_pair_to_json,
        );
        pairs.finish()
    });
    obj.opt_str("value", content.value.as_ref());
    obj.opt("levelType", content.level_type.as_ref(), level_type_to_json);
    obj.model_type("DataSpecificationIec61360")
}

fn value_reference_pair_to_json(pair: &ValueReferencePair) -> Value {
    json!({ "value": pair.value, "valueId": reference_to_json(&pair.value_id) })
}

fn level_type_to_json(level: &LevelType) -> Value {
    json!({ "min": level.min, "nom": level.nom, "typ": level.typ, "max": level.max })
}

fn specific_asset_id_to_json(id: &SpecificAssetId) -> Value {
    let mut obj = Obj::new();
    obj.opt("semanticId", id.semantic_id.as_ref(), reference_to_json);
    obj.opt_list(
        "supplementalSemanticIds",
        id.supplemental_semantic_ids.as_ref(),
        reference_to_json,
    );
    obj.put("name", id.name.as_str());
    obj.put("value", id.value.as_str());
    obj.opt("externalSubjectId", id.external_subject_id.as_ref(), reference_to_json);
    obj.finish()
}

fn resource_to_json(resource: &Resource) -> Value {
    let mut obj = Obj::new();
    obj.put("path", resource.path.as_str());
    obj.opt_str("contentType", resource.content_type.as_ref());
    obj.finish()
}

// ============================================================================
// Identifiables
// ============================================================================

fn environment_to_json(env: &Environment) -> Value {
    let mut obj = Obj::new();
    obj.opt_list(
        "assetAdministrationShells",
        env.asset_administration_shells.as_ref(),
        shell_to_json,
    );
    obj.opt_list("submodels", env.submodels.as_ref(), submodel_to_json);
    obj.opt_list(
        "conceptDescriptions",
        env.concept_descriptions.as_ref(),
        concept_description_to_json,
    );
    obj.finish()
}

fn shell_to_json(shell: &AssetAdministrationShell) -> Value {
    let mut obj = Obj::new();
    obj.opt_list("extensions", shell.extensions.as_ref(), extension_to_json);
    obj.opt_str("category", shell.category.as_ref());
    obj.opt_str("idShort", shell.id_short.as_ref());
    obj.opt_list("displayName", shell.display_name.as_ref(), lang_string_to_json);
    obj.opt_list("description", shell.description.as_ref(), lang_string_to_json);
    obj.opt("administration", shell.administration.as_ref(), administration_to_json);
    obj.put("id", shell.id.as_str());
    write_data_specifications(&mut obj, shell.embedded_data_specifications.as_ref());
    obj.opt("derivedFrom", shell.derived_from.as_ref(), reference_to_json);
    obj.put("assetInformation", asset_information_to_json(&shell.asset_information));
    obj.opt_list("submodels", shell.submodels.as_ref(), reference_to_json);
    obj.model_type("AssetAdministrationShell")
}

fn asset_information_to_json(info: &AssetInformation) -> Value {
    let mut obj = Obj::new();
    obj.put("assetKind", info.asset_kind.as_str());
    obj.opt_str("globalAssetId", info.global_asset_id.as_ref());
    obj.opt_list(
        "specificAssetIds",
        info.specific_asset_ids.as_ref(),
        specific_asset_id_to_json,
    );
    obj.opt_str("assetType", info.asset_type.as_ref());
    obj.opt("defaultThumbnail", info.default_thumbnail.as_ref(), resource_to_json);
    obj.finish()
}

fn submodel_to_json(sm: &Submodel) -> Value {
    let mut obj = Obj::new();
    write_referable(&mut obj, &sm.base);
    obj.opt("administration", sm.administration.as_ref(), administration_to_json);
    obj.put("id", sm.id.as_str());
    obj.opt("kind", sm.kind.as_ref(), |k| json!(k.as_str()));
    write_semantics(&mut obj, &sm.base);
    obj.opt_list("submodelElements", sm.submodel_elements.as_ref(), element_to_json);
    obj.model_type("Submodel")
}

fn concept_description_to_json(cd: &ConceptDescription) -> Value {
    let mut obj = Obj::new();
    obj.opt_list("extensions", cd.extensions.as_ref(), extension_to_json);
    obj.opt_str("category", cd.category.as_ref());
    obj.opt_str("idShort", cd.id_short.as_ref());
    obj.opt_list("displayName", cd.display_name.as_ref(), lang_string_to_json);
    obj.opt_list("description", cd.description.as_ref(), lang_string_to_json);
    obj.opt("administration", cd.administration.as_ref(), administration_to_json);
    obj.put("id", cd.id.as_str());
    write_data_specifications(&mut obj, cd.embedded_data_specifications.as_ref());
    obj.opt_list("isCaseOf", cd.is_case_of.as_ref(), reference_to_json);
    obj.model_type("ConceptDescription")
}

// ============================================================================
// Submodel elements
// ============================================================================

fn operation_variable_to_json(var: &OperationVariable) -> Value {
    json!({ "value": element_to_json(&var.value) })
}

fn element_to_json(element: &SubmodelElement) -> Value {
    let mut obj = Obj::new();
    write_referable(&mut obj, element.base());
    write_semantics(&mut obj, element.base());

    match element {
        SubmodelElement::Property(p) => {
            obj.put("valueType", p.value_type.as_str());
            obj.opt_str("value", p.value.as_ref());
            obj.opt("valueId", p.value_id.as_ref(), reference_to_json);
        }
        SubmodelElement::MultiLanguageProperty(mlp) => {
            obj.opt_list("value", mlp.value.as_ref(), lang_string_to_json);
            obj.opt("valueId", mlp.value_id.as_ref(), reference_to_json);
        }
        SubmodelElement::Range(r) => {
            obj.put("valueType", r.value_type.as_str());
            obj.opt_str("min", r.min.as_ref());
            obj.opt_str("max", r.max.as_ref());
        }
        SubmodelElement::Blob(b) => {
            obj.opt("value", b.value.as_ref(), |bytes| json!(STANDARD.encode(bytes)));
            obj.put("contentType", b.content_type.as_str());
        }
        SubmodelElement::File(f) => {
            obj.opt_str("value", f.value.as_ref());
            obj.put("contentType", f.content_type.as_str());
        }
        SubmodelElement::ReferenceElement(r) => {
            obj.opt("value", r.value.as_ref(), reference_to_json);
        }
        SubmodelElement::RelationshipElement(r) => {
            obj.put("first", reference_to_json(&r.first));
            obj.put("second", reference_to_json(&r.second));
        }
        SubmodelElement::AnnotatedRelationshipElement(r) => {
            obj.put("first", reference_to_json(&r.first));
            obj.put("second", reference_to_json(&r.second));
            obj.opt_list("annotations", r.annotations.as_ref(), element_to_json);
        }
        SubmodelElement::SubmodelElementCollection(c) => {
            obj.opt_list("value", c.value.as_ref(), element_to_json);
        }
        SubmodelElement::SubmodelElementList(l) => {
            obj.opt("orderRelevant", l.order_relevant.as_ref(), |b| json!(b));
            obj.opt(
                "semanticIdListElement",
                l.semantic_id_list_element.as_ref(),
                reference_to_json,
            );
            obj.put("typeValueListElement", l.type_value_list_element.as_str());
            obj.opt(
                "valueTypeListElement",
                l.value_type_list_element.as_ref(),
                |t| json!(t.as_str()),
            );
            obj.opt_list("value", l.value.as_ref(), element_to_json);
        }
        SubmodelElement::Entity(e) => {
            obj.opt_list("statements", e.statements.as_ref(), element_to_json);
            obj.put("entityType", e.entity_type.as_str());
            obj.opt_str("globalAssetId", e.global_asset_id.as_ref());
            obj.opt_list(
                "specificAssetIds",
                e.specific_asset_ids.as_ref(),
                specific_asset_id_to_json,
            );
        }
        SubmodelElement::BasicEventElement(e) => {
            obj.put("observed", reference_to_json(&e.observed));
            obj.put("direction", e.direction.as_str());
            obj.put("state", e.state.as_str());
            obj.opt_str("messageTopic", e.message_topic.as_ref());
            obj.opt("messageBroker", e.message_broker.as_ref(), reference_to_json);
            obj.opt_str("lastUpdate", e.last_update.as_ref());
            obj.opt_str("minInterval", e.min_interval.as_ref());
            obj.opt_str("maxInterval", e.max_interval.as_ref());
        }
        SubmodelElement::Operation(op) => {
            obj.opt_list("inputVariables", op.input_variables.as_ref(), operation_variable_to_json);
            obj.opt_list("outputVariables", op.output_variables.as_ref(), operation_variable_to_json);
            obj.opt_list(
                "inoutputVariables",
                op.inoutput_variables.as_ref(),
                operation_variable_to_json,
            );
        }
        SubmodelElement::Capability(_) => {}
    }

    obj.model_type(element.kind_name())
}
