//! Structural JSON → tree model.
//!
//! The reciprocal of the writer. Every error names the JSON location it was
//! raised at, e.g. `/submodels/0/submodelElements/3/valueType`.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Map, Value};

use crate::model::{
    AdministrativeInformation, AnnotatedRelationshipElement, AssetAdministrationShell,
    AssetInformation, BasicEventElement, Blob, Capability, ConceptDescription,
    DataSpecificationIec61360, ElementBase, EmbeddedDataSpecification, Entity, Environment,
    Extension, File, Key, LangString, LevelType, Literal, MultiLanguageProperty, Operation,
    OperationVariable, Property, Qualifier, Range, Reference, ReferenceElement,
    RelationshipElement, Resource, SpecificAssetId, Submodel, SubmodelElement,
    SubmodelElementCollection, SubmodelElementList, ValueList, ValueReferencePair,
};
use crate::serialize::SerializeError;

type Result<T> = std::result::Result<T, SerializeError>;
type Object = Map<String, Value>;

// ============================================================================
// Entry points
// ============================================================================

pub fn environment_from_structural(value: &Value) -> Result<Environment> {
    environment(value, "")
}

pub fn shell_from_structural(value: &Value) -> Result<AssetAdministrationShell> {
    shell(value, "")
}

pub fn asset_information_from_structural(value: &Value) -> Result<AssetInformation> {
    asset_information(value, "")
}

pub fn submodel_from_structural(value: &Value) -> Result<Submodel> {
    submodel(value, "")
}

pub fn submodel_element_from_structural(value: &Value) -> Result<SubmodelElement> {
    element(value, "")
}

pub fn concept_description_from_structural(value: &Value) -> Result<ConceptDescription> {
    concept_description(value, "")
}

pub fn reference_from_structural(value: &Value) -> Result<Reference> {
    reference(value, "")
}

// ============================================================================
// Field access
// ============================================================================

fn object<'v>(value: &'v Value, at: &str) -> Result<&'v Object> {
    value
        .as_object()
        .ok_or_else(|| SerializeError::json(location(at), "expected an object"))
}

fn location(at: &str) -> String {
    if at.is_empty() { "/".to_string() } else { at.to_string() }
}

fn child(at: &str, key: &str) -> String {
    format!("{at}/{key}")
}

fn opt_str(obj: &Object, key: &str, at: &str) -> Result<Option<String>> {
    match obj.get(key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(SerializeError::json(child(at, key), "expected a string")),
    }
}

fn req_str(obj: &Object, key: &str, at: &str) -> Result<String> {
    opt_str(obj, key, at)?
        .ok_or_else(|| SerializeError::json(child(at, key), "required property is missing"))
}

fn opt_bool(obj: &Object, key: &str, at: &str) -> Result<Option<bool>> {
    match obj.get(key) {
        None => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(SerializeError::json(child(at, key), "expected a boolean")),
    }
}

fn req_bool(obj: &Object, key: &str, at: &str) -> Result<bool> {
    opt_bool(obj, key, at)?
        .ok_or_else(|| SerializeError::json(child(at, key), "required property is missing"))
}

fn opt_enum<E: Literal>(obj: &Object, key: &str, at: &str) -> Result<Option<E>> {
    let Some(text) = opt_str(obj, key, at)? else {
        return Ok(None);
    };
    E::from_literal(&text).map(Some).ok_or_else(|| {
        SerializeError::json(
            child(at, key),
            format!("'{text}' is not a valid {}", E::TYPE_NAME),
        )
    })
}

fn req_enum<E: Literal>(obj: &Object, key: &str, at: &str) -> Result<E> {
    opt_enum(obj, key, at)?
        .ok_or_else(|| SerializeError::json(child(at, key), "required property is missing"))
}

fn opt_obj<T>(
    obj: &Object,
    key: &str,
    at: &str,
    decode: impl FnOnce(&Value, &str) -> Result<T>,
) -> Result<Option<T>> {
    obj.get(key).map(|v| decode(v, &child(at, key))).transpose()
}

fn req_obj<T>(
    obj: &Object,
    key: &str,
    at: &str,
    decode: impl FnOnce(&Value, &str) -> Result<T>,
) -> Result<T> {
    opt_obj(obj, key, at, decode)?
        .ok_or_else(|| SerializeError::json(child(at, key), "required property is missing"))
}

fn opt_list<T>(
    obj: &Object,
    key: &str,
    at: &str,
    decode: impl Fn(&Value, &str) -> Result<T>,
) -> Result<Option<Vec<T>>> {
    let Some(value) = obj.get(key) else {
        return Ok(None);
    };
    let at = child(at, key);
    let items = value
        .as_array()
        .ok_or_else(|| SerializeError::json(at.clone(), "expected an array"))?;
    items
        .iter()
        .enumerate()
        .map(|(i, item)| decode(item, &format!("{at}/{i}")))
        .collect::<Result<Vec<_>>>()
        .map(Some)
}

fn req_list<T>(
    obj: &Object,
    key: &str,
    at: &str,
    decode: impl Fn(&Value, &str) -> Result<T>,
) -> Result<Vec<T>> {
    opt_list(obj, key, at, decode)?
        .ok_or_else(|| SerializeError::json(child(at, key), "required property is missing"))
}

// ============================================================================
// Shared pieces
// ============================================================================

fn reference(value: &Value, at: &str) -> Result<Reference> {
    let obj = object(value, at)?;
    Ok(Reference {
        reference_type: req_enum(obj, "type", at)?,
        referred_semantic_id: opt_obj(obj, "referredSemanticId", at, reference)?.map(Box::new),
        keys: req_list(obj, "keys", at, key)?,
    })
}

fn key(value: &Value, at: &str) -> Result<Key> {
    let obj = object(value, at)?;
    Ok(Key {
        key_type: req_enum(obj, "type", at)?,
        value: req_str(obj, "value", at)?,
    })
}

fn lang_string(value: &Value, at: &str) -> Result<LangString> {
    let obj = object(value, at)?;
    Ok(LangString {
        language: req_str(obj, "language", at)?,
        text: req_str(obj, "text", at)?,
    })
}

fn extension(value: &Value, at: &str) -> Result<Extension> {
    let obj = object(value, at)?;
    Ok(Extension {
        semantic_id: opt_obj(obj, "semanticId", at, reference)?,
        supplemental_semantic_ids: opt_list(obj, "supplementalSemanticIds", at, reference)?,
        name: req_str(obj, "name", at)?,
        value_type: opt_enum(obj, "valueType", at)?,
        value: opt_str(obj, "value", at)?,
        refers_to: opt_list(obj, "refersTo", at, reference)?,
    })
}

fn qualifier(value: &Value, at: &str) -> Result<Qualifier> {
    let obj = object(value, at)?;
    Ok(Qualifier {
        semantic_id: opt_obj(obj, "semanticId", at, reference)?,
        supplemental_semantic_ids: opt_list(obj, "supplementalSemanticIds", at, reference)?,
        kind: opt_enum(obj, "kind", at)?,
        qualifier_type: req_str(obj, "type", at)?,
        value_type: req_enum(obj, "valueType", at)?,
        value: opt_str(obj, "value", at)?,
        value_id: opt_obj(obj, "valueId", at, reference)?,
    })
}

fn administration(value: &Value, at: &str) -> Result<AdministrativeInformation> {
    let obj = object(value, at)?;
    Ok(AdministrativeInformation {
        embedded_data_specifications: opt_list(
            obj,
            "embeddedDataSpecifications",
            at,
            embedded_data_specification,
        )?,
        version: opt_str(obj, "version", at)?,
        revision: opt_str(obj, "revision", at)?,
        creator: opt_obj(obj, "creator", at, reference)?,
        template_id: opt_str(obj, "templateId", at)?,
    })
}

fn embedded_data_specification(value: &Value, at: &str) -> Result<EmbeddedDataSpecification> {
    let obj = object(value, at)?;
    Ok(EmbeddedDataSpecification {
        data_specification: req_obj(obj, "dataSpecification", at, reference)?,
        data_specification_content: req_obj(obj, "dataSpecificationContent", at, iec61360)?,
    })
}

fn iec61360(value: &Value, at: &str) -> Result<DataSpecificationIec61360> {
    let obj = object(value, at)?;
    Ok(DataSpecificationIec61360 {
        preferred_name: req_list(obj, "preferredName", at, lang_string)?,
        short_name: opt_list(obj, "shortName", at, lang_string)?,
        unit: opt_str(obj, "unit", at)?,
        unit_id: opt_obj(obj, "unitId", at, reference)?,
        source_of_definition: opt_str(obj, "sourceOfDefinition", at)?,
        symbol: opt_str(obj, "symbol", at)?,
        data_type: opt_enum(obj, "dataType", at)?,
        definition: opt_list(obj, "definition", at, lang_string)?,
        value_format: opt_str(obj, "valueFormat", at)?,
        value_list: opt_obj(obj, "valueList", at, value_list)?,
        value: opt_str(obj, "value", at)?,
        level_type: opt_obj(obj, "levelType", at, level_type)?,
    })
}

fn value_list(value: &Value, at: &str) -> Result<ValueList> {
    let obj = object(value, at)?;
    Ok(ValueList {
        value_reference_pairs: req_list(obj, "valueReferencePairs", at, |v, at| {
            let pair = object(v, at)?;
            Ok(ValueReferencePair {
                value: req_str(pair, "value", at)?,
                value_id: req_obj(pair, "valueId", at, reference)?,
            })
        })?,
    })
}

fn level_type(value: &Value, at: &str) -> Result<LevelType> {
    let obj = object(value, at)?;
    Ok(LevelType {
        min: req_bool(obj, "min", at)?,
        nom: req_bool(obj, "nom", at)?,
        typ: req_bool(obj, "typ", at)?,
        max: req_bool(obj, "max", at)?,
    })
}

fn specific_asset_id(value: &Value, at: &str) -> Result<SpecificAssetId> {
    let obj = object(value, at)?;
    Ok(SpecificAssetId {
        semantic_id: opt_obj(obj, "semanticId", at, reference)?,
        supplemental_semantic_ids: opt_list(obj, "supplementalSemanticIds", at, reference)?,
        name: req_str(obj, "name", at)?,
        value: req_str(obj, "value", at)?,
        external_subject_id: opt_obj(obj, "externalSubjectId", at, reference)?,
    })
}

fn resource(value: &Value, at: &str) -> Result<Resource> {
    let obj = object(value, at)?;
    Ok(Resource {
        path: req_str(obj, "path", at)?,
        content_type: opt_str(obj, "contentType", at)?,
    })
}

fn element_base(obj: &Object, at: &str) -> Result<ElementBase> {
    Ok(ElementBase {
        extensions: opt_list(obj, "extensions", at, extension)?,
        category: opt_str(obj, "category", at)?,
        id_short: opt_str(obj, "idShort", at)?,
        display_name: opt_list(obj, "displayName", at, lang_string)?,
        description: opt_list(obj, "description", at, lang_string)?,
        semantic_id: opt_obj(obj, "semanticId", at, reference)?,
        supplemental_semantic_ids: opt_list(obj, "supplementalSemanticIds", at, reference)?,
        qualifiers: opt_list(obj, "qualifiers", at, qualifier)?,
        embedded_data_specifications: opt_list(
            obj,
            "embeddedDataSpecifications",
            at,
            embedded_data_specification,
        )?,
    })
}

fn expect_model_type(obj: &Object, at: &str, expected: &str) -> Result<()> {
    let found = req_str(obj, "modelType", at)?;
    if found == expected {
        Ok(())
    } else {
        Err(SerializeError::json(
            child(at, "modelType"),
            format!("expected '{expected}', found '{found}'"),
        ))
    }
}

// ============================================================================
// Identifiables
// ============================================================================

fn environment(value: &Value, at: &str) -> Result<Environment> {
    let obj = object(value, at)?;
    Ok(Environment {
        asset_administration_shells: opt_list(obj, "assetAdministrationShells", at, shell)?,
        submodels: opt_list(obj, "submodels", at, submodel)?,
        concept_descriptions: opt_list(obj, "conceptDescriptions", at, concept_description)?,
    })
}

fn shell(value: &Value, at: &str) -> Result<AssetAdministrationShell> {
    let obj = object(value, at)?;
    expect_model_type(obj, at, "AssetAdministrationShell")?;
    Ok(AssetAdministrationShell {
        extensions: opt_list(obj, "extensions", at, extension)?,
        category: opt_str(obj, "category", at)?,
        id_short: opt_str(obj, "idShort", at)?,
        display_name: opt_list(obj, "displayName", at, lang_string)?,
        description: opt_list(obj, "description", at, lang_string)?,
        administration: opt_obj(obj, "administration", at, administration)?,
        id: req_str(obj, "id", at)?,
        embedded_data_specifications: opt_list(
            obj,
            "embeddedDataSpecifications",
            at,
            embedded_data_specification,
        )?,
        derived_from: opt_obj(obj, "derivedFrom", at, reference)?,
        asset_information: req_obj(obj, "assetInformation", at, asset_information)?,
        submodels: opt_list(obj, "submodels", at, reference)?,
    })
}

fn asset_information(value: &Value, at: &str) -> Result<AssetInformation> {
    let obj = object(value, at)?;
    Ok(AssetInformation {
        asset_kind: req_enum(obj, "assetKind", at)?,
        global_asset_id: opt_str(obj, "globalAssetId", at)?,
        specific_asset_ids: opt_list(obj, "specificAssetIds", at, specific_asset_id)?,
        asset_type: opt_str(obj, "assetType", at)?,
        default_thumbnail: opt_obj(obj, "defaultThumbnail", at, resource)?,
    })
}

fn submodel(value: &Value, at: &str) -> Result<Submodel> {
    let obj = object(value, at)?;
    expect_model_type(obj, at, "Submodel")?;
    Ok(Submodel {
        base: element_base(obj, at)?,
        administration: opt_obj(obj, "administration", at, administration)?,
        id: req_str(obj, "id", at)?,
        kind: opt_enum(obj, "kind", at)?,
        submodel_elements: opt_list(obj, "submodelElements", at, element)?,
    })
}

fn concept_description(value: &Value, at: &str) -> Result<ConceptDescription> {
    let obj = object(value, at)?;
    expect_model_type(obj, at, "ConceptDescription")?;
    Ok(ConceptDescription {
        extensions: opt_list(obj, "extensions", at, extension)?,
        category: opt_str(obj, "category", at)?,
        id_short: opt_str(obj, "idShort", at)?,
        display_name: opt_list(obj, "displayName", at, lang_string)?,
        description: opt_list(obj, "description", at, lang_string)?,
        administration: opt_obj(obj, "administration", at, administration)?,
        id: req_str(obj, "id", at)?,
        embedded_data_specifications: opt_list(
            obj,
            "embeddedDataSpecifications",
            at,
            embedded_data_specification,
        )?,
        is_case_of: opt_list(obj, "isCaseOf", at, reference)?,
    })
}

// ============================================================================
// Submodel elements
// ============================================================================

fn operation_variable(value: &Value, at: &str) -> Result<OperationVariable> {
    let obj = object(value, at)?;
    Ok(OperationVariable::new(req_obj(obj, "value", at, element)?))
}

fn element(value: &Value, at: &str) -> Result<SubmodelElement> {
    let obj = object(value, at)?;
    let model_type = req_str(obj, "modelType", at)?;
    let base = element_base(obj, at)?;

    let element = match model_type.as_str() {
        "Property" => Property {
            base,
            value_type: req_enum(obj, "valueType", at)?,
            value: opt_str(obj, "value", at)?,
            value_id: opt_obj(obj, "valueId", at, reference)?,
        }
        .into(),
        "MultiLanguageProperty" => MultiLanguageProperty {
            base,
            value: opt_list(obj, "value", at, lang_string)?,
            value_id: opt_obj(obj, "valueId", at, reference)?,
        }
        .into(),
        "Range" => Range {
            base,
            value_type: req_enum(obj, "valueType", at)?,
            min: opt_str(obj, "min", at)?,
            max: opt_str(obj, "max", at)?,
        }
        .into(),
        "Blob" => Blob {
            base,
            value: opt_str(obj, "value", at)?
                .map(|text| {
                    STANDARD.decode(text.as_bytes()).map_err(|e| {
                        SerializeError::json(child(at, "value"), format!("invalid base64: {e}"))
                    })
                })
                .transpose()?,
            content_type: req_str(obj, "contentType", at)?,
        }
        .into(),
        "File" => File {
            base,
            value: opt_str(obj, "value", at)?,
            content_type: req_str(obj, "contentType", at)?,
        }
        .into(),
        "ReferenceElement" => ReferenceElement {
            base,
            value: opt_obj(obj, "value", at, reference)?,
        }
        .into(),
        "RelationshipElement" => RelationshipElement {
            base,
            first: req_obj(obj, "first", at, reference)?,
            second: req_obj(obj, "second", at, reference)?,
        }
        .into(),
        "AnnotatedRelationshipElement" => AnnotatedRelationshipElement {
            base,
            first: req_obj(obj, "first", at, reference)?,
            second: req_obj(obj, "second", at, reference)?,
            annotations: opt_list(obj, "annotations", at, element)?,
        }
        .into(),
        "SubmodelElementCollection" => SubmodelElementCollection {
            base,
            value: opt_list(obj, "value", at, element)?,
        }
        .into(),
        "SubmodelElementList" => SubmodelElementList {
            base,
            order_relevant: opt_bool(obj, "orderRelevant", at)?,
            semantic_id_list_element: opt_obj(obj, "semanticIdListElement", at, reference)?,
            type_value_list_element: req_enum(obj, "typeValueListElement", at)?,
            value_type_list_element: opt_enum(obj, "valueTypeListElement", at)?,
            value: opt_list(obj, "value", at, element)?,
        }
        .into(),
        "Entity" => Entity {
            base,
            statements: opt_list(obj, "statements", at, element)?,
            entity_type: req_enum(obj, "entityType", at)?,
            global_asset_id: opt_str(obj, "globalAssetId", at)?,
            specific_asset_ids: opt_list(obj, "specificAssetIds", at, specific_asset_id)?,
        }
        .into(),
        "BasicEventElement" => BasicEventElement {
            base,
            observed: req_obj(obj, "observed", at, reference)?,
            direction: req_enum(obj, "direction", at)?,
            state: req_enum(obj, "state", at)?,
            message_topic: opt_str(obj, "messageTopic", at)?,
            message_broker: opt_obj(obj, "messageBroker", at, reference)?,
            last_update: opt_str(obj, "lastUpdate", at)?,
            min_interval: opt_str(obj, "minInterval", at)?,
            max_interval: opt_str(obj, "maxInterval", at)?,
        }
        .into(),
        "Operation" => Operation {
            base,
            input_variables: opt_list(obj, "inputVariables", at, operation_variable)?,
            output_variables: opt_list(obj, "outputVariables", at, operation_variable)?,
            inoutput_variables: opt_list(obj, "inoutputVariables", at, operation_variable)?,
        }
        .into(),
        "Capability" => Capability { base }.into(),
        other => {
            return Err(SerializeError::json(
                child(at, "modelType"),
                format!("unknown submodel element kind '{other}'"),
            ));
        }
    };
    Ok(element)
}
