//! A chiller-like environment used across the integration tests.
//!
//! ```text
//! Chiller (shell)
//! TechnicalData
//!   GeneralInformation { ManufacturerName (MLP), ProductImage (Blob) }
//!   TechnicalProperties { Weight_Kg = "69", SupplyVoltage (Range), Manual (File) }
//!   Reset (Operation)
//! TimeSeries
//!   Segments { InternalSegment { Records [3 x Record] } }
//! ```

use aas::TypedValue;
use aas::model::{
    AasSubmodelElements, AssetAdministrationShell, AssetInformation, AssetKind, Blob,
    DataTypeDefXsd, Environment, File, LangString, MultiLanguageProperty, Operation,
    OperationVariable, Property, Range, Reference, Submodel, SubmodelElement,
    SubmodelElementCollection, SubmodelElementList,
};

pub const SHELL_ID: &str = "id:embedded_system:aaabbbccc:aas";
pub const TECHNICAL_DATA_ID: &str = "id:embedded_system:aaabbbccc:technical_data";
pub const TIME_SERIES_ID: &str = "id:embedded_system:aaabbbccc:time_series";

/// idShort path of the records list below the TimeSeries submodel.
pub const RECORDS_PATH: &str = "Segments.InternalSegment.Records";

pub const PRODUCT_IMAGE: &[u8] = &[0x89, b'P', b'N', b'G', 0x00, 0xff];

pub fn chiller_environment() -> Environment {
    let mut asset_information = AssetInformation::new(AssetKind::Instance);
    asset_information.global_asset_id = Some("urn:smc:chiller:hrs012".to_string());

    let mut shell = AssetAdministrationShell::new(SHELL_ID, asset_information);
    shell.id_short = Some("Chiller".to_string());
    shell.submodels = Some(vec![
        Reference::submodel(TECHNICAL_DATA_ID),
        Reference::submodel(TIME_SERIES_ID),
    ]);

    Environment {
        asset_administration_shells: Some(vec![shell]),
        submodels: Some(vec![technical_data(), time_series(3)]),
        concept_descriptions: None,
    }
}

pub fn technical_data() -> Submodel {
    let general = SubmodelElementCollection::new(
        "GeneralInformation",
        vec![
            MultiLanguageProperty::new(
                "ManufacturerName",
                vec![LangString::new("en", "SMC"), LangString::new("de", "SMC GmbH")],
            )
            .into(),
            Blob::new("ProductImage", "image/png", PRODUCT_IMAGE.to_vec()).into(),
        ],
    );

    let technical_properties = SubmodelElementCollection::new(
        "TechnicalProperties",
        vec![
            Property::new("Weight_Kg", DataTypeDefXsd::Int).with_value("69").into(),
            Range::new(
                "SupplyVoltage",
                DataTypeDefXsd::Double,
                Some("200.0".to_string()),
                Some("230.0".to_string()),
            )
            .into(),
            File::new("Manual", "application/pdf", "/aasx/manual.pdf").into(),
        ],
    );

    let mut reset = Operation::new("Reset");
    reset.input_variables = Some(vec![OperationVariable::new(
        Property::new("Force", DataTypeDefXsd::Boolean).into(),
    )]);

    let mut submodel = Submodel::new(TECHNICAL_DATA_ID, "TechnicalData").with_elements(vec![
        general.into(),
        technical_properties.into(),
        reset.into(),
    ]);
    submodel.base.semantic_id = Some(Reference::external(
        "https://admin-shell.io/ZVEI/TechnicalData/Submodel/1/2",
    ));
    submodel
}

pub fn time_series(records: usize) -> Submodel {
    let items = (0..records)
        .map(|i| record(1_700_000_000 + i as i64, 20.0 + i as f64))
        .collect();
    let records = SubmodelElementList::new(
        "Records",
        AasSubmodelElements::SubmodelElementCollection,
        items,
    );
    let internal = SubmodelElementCollection::new("InternalSegment", vec![records.into()]);
    let segments = SubmodelElementCollection::new("Segments", vec![internal.into()]);
    Submodel::new(TIME_SERIES_ID, "TimeSeries").with_elements(vec![segments.into()])
}

/// One unnamed record: `Time` plus a temperature reading.
pub fn record(timestamp: i64, temperature: f64) -> SubmodelElement {
    let mut record = SubmodelElementCollection::new(
        "",
        vec![
            Property::new("Time", DataTypeDefXsd::Long)
                .with_value(timestamp.to_string())
                .into(),
            Property::new("Temperature", DataTypeDefXsd::Float)
                .with_value(TypedValue::Double(temperature).to_lexical())
                .into(),
        ],
    );
    record.base.id_short = None;
    record.into()
}

/// A submodel holding one of every element kind, plus metadata on the
/// submodel itself, and a concept description carrying IEC 61360 content.
pub fn every_kind_environment() -> Environment {
    use aas::model::{
        AdministrativeInformation, AnnotatedRelationshipElement, BasicEventElement, Capability,
        ConceptDescription, DataSpecificationIec61360, DataTypeIec61360, Direction,
        EmbeddedDataSpecification, Entity, EntityType, Extension, Key, KeyTypes, LevelType,
        ModellingKind, Qualifier, QualifierKind, ReferenceElement, ReferenceTypes,
        RelationshipElement, SpecificAssetId, StateOfEvent, ValueList, ValueReferencePair,
    };

    let model_ref = |value: &str| {
        Reference::new(
            ReferenceTypes::ModelReference,
            vec![
                Key::new(KeyTypes::Submodel, "urn:kinds"),
                Key::new(KeyTypes::Property, value),
            ],
        )
    };

    let mut property = Property::new("Flag", DataTypeDefXsd::Boolean).with_value("true");
    property.base.category = Some("PARAMETER".to_string());
    property.base.description = Some(vec![LangString::new("en", "A <flag> & more")]);
    let mut qualifier = Qualifier::new("Cardinality", DataTypeDefXsd::String);
    qualifier.kind = Some(QualifierKind::ConceptQualifier);
    qualifier.value = Some("One".to_string());
    property.base.qualifiers = Some(vec![qualifier]);
    let mut extension = Extension::new("origin");
    extension.value_type = Some(DataTypeDefXsd::String);
    extension.value = Some("plant-7".to_string());
    property.base.extensions = Some(vec![extension]);

    let mut entity = Entity {
        base: aas::model::ElementBase::named("Motor"),
        statements: Some(vec![Property::new("Serial", DataTypeDefXsd::String).into()]),
        entity_type: EntityType::SelfManagedEntity,
        global_asset_id: Some("urn:motor:1".to_string()),
        specific_asset_ids: None,
    };
    entity.specific_asset_ids = Some(vec![SpecificAssetId::new("serial", "M-1")]);

    let event = BasicEventElement {
        base: aas::model::ElementBase::named("Overheat"),
        observed: model_ref("Flag"),
        direction: Direction::Output,
        state: StateOfEvent::On,
        message_topic: Some("alarms".to_string()),
        message_broker: None,
        last_update: None,
        min_interval: Some("PT1S".to_string()),
        max_interval: None,
    };

    let mut list = SubmodelElementList::new(
        "Readings",
        AasSubmodelElements::Property,
        vec![{
            let mut reading = Property::new("", DataTypeDefXsd::Double).with_value("-0.0");
            reading.base.id_short = None;
            reading.into()
        }],
    );
    list.order_relevant = Some(true);
    list.value_type_list_element = Some(DataTypeDefXsd::Double);

    let mut operation = Operation::new("Calibrate");
    operation.output_variables = Some(vec![OperationVariable::new(
        Property::new("Offset", DataTypeDefXsd::Float).into(),
    )]);
    operation.inoutput_variables = Some(vec![]);

    let elements: Vec<SubmodelElement> = vec![
        property.into(),
        MultiLanguageProperty::new("Label", vec![LangString::new("en", "Pump")]).into(),
        Range::new("Band", DataTypeDefXsd::Int, Some("1".to_string()), None).into(),
        Blob::new("Raw", "application/octet-stream", vec![0, 1, 2, 253, 254, 255]).into(),
        File::new("Datasheet", "application/pdf", "/aasx/ds.pdf").into(),
        ReferenceElement {
            base: aas::model::ElementBase::named("Link"),
            value: Some(Reference::external("https://example.com/pump")),
        }
        .into(),
        RelationshipElement {
            base: aas::model::ElementBase::named("Drives"),
            first: model_ref("Motor"),
            second: model_ref("Pump"),
        }
        .into(),
        AnnotatedRelationshipElement {
            base: aas::model::ElementBase::named("Feeds"),
            first: model_ref("Pump"),
            second: model_ref("Tank"),
            annotations: Some(vec![Property::new("Rate", DataTypeDefXsd::Double)
                .with_value("INF")
                .into()]),
        }
        .into(),
        SubmodelElementCollection::new("Empty", vec![]).into(),
        list.into(),
        entity.into(),
        event.into(),
        operation.into(),
        Capability {
            base: aas::model::ElementBase::named("CanPump"),
        }
        .into(),
    ];

    let mut submodel = Submodel::new("urn:kinds", "Kinds").with_elements(elements);
    submodel.kind = Some(ModellingKind::Instance);
    submodel.administration = Some(AdministrativeInformation {
        version: Some("1".to_string()),
        revision: Some("0".to_string()),
        ..Default::default()
    });
    submodel.base.semantic_id = Some(
        Reference::external("urn:sem:kinds").with_referred_semantic_id(Reference::external("urn:sem:base")),
    );

    let content = DataSpecificationIec61360 {
        preferred_name: vec![LangString::new("en", "Flag")],
        unit: Some("1".to_string()),
        data_type: Some(DataTypeIec61360::Boolean),
        value_list: Some(ValueList {
            value_reference_pairs: vec![ValueReferencePair {
                value: "true".to_string(),
                value_id: Reference::external("urn:value:true"),
            }],
        }),
        level_type: Some(LevelType {
            min: false,
            nom: true,
            typ: false,
            max: true,
        }),
        ..Default::default()
    };
    let concept = ConceptDescription {
        id: "urn:cd:flag".to_string(),
        id_short: Some("Flag".to_string()),
        embedded_data_specifications: Some(vec![EmbeddedDataSpecification {
            data_specification: Reference::external(
                "https://admin-shell.io/DataSpecificationTemplates/DataSpecificationIec61360/3/0",
            ),
            data_specification_content: content,
        }]),
        is_case_of: Some(vec![Reference::external("urn:eclass:flag")]),
        ..Default::default()
    };

    Environment {
        asset_administration_shells: None,
        submodels: Some(vec![submodel]),
        concept_descriptions: Some(vec![concept]),
    }
}
