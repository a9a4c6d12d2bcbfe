//! `AasService` against the chiller environment.

use std::thread;

use aas::encode_identifier;
use aas::model::{DataTypeDefXsd, Environment, Property, Submodel};
use aas::service::{AasError, AasService, PathStats, SerializationModifier, ServiceConfig, SharedService};
use aas::TypedValue;
use serde_json::json;

use crate::helpers::fixtures::{
    RECORDS_PATH, TECHNICAL_DATA_ID, TIME_SERIES_ID, chiller_environment,
};

fn service() -> AasService {
    AasService::new(chiller_environment())
}

// ── Submodels ───────────────────────────────────────────────────────

#[test]
fn test_submodel_references() {
    let refs = serde_json::to_value(service().submodel_references()).unwrap();
    assert_eq!(
        refs,
        json!([
            {
                "idShort": "TechnicalData",
                "type": "Submodel",
                "keys": [{"type": "Submodel", "value": encode_identifier(TECHNICAL_DATA_ID)}]
            },
            {
                "idShort": "TimeSeries",
                "type": "Submodel",
                "keys": [{"type": "Submodel", "value": encode_identifier(TIME_SERIES_ID)}]
            }
        ])
    );
}

#[test]
fn test_get_submodel_modifiers() {
    let svc = service();

    let normal = svc.get_submodel("TechnicalData", SerializationModifier::Normal).unwrap();
    assert_eq!(normal["modelType"], "Submodel");
    assert_eq!(normal["id"], TECHNICAL_DATA_ID);

    let value = svc.get_submodel("TechnicalData", SerializationModifier::Value).unwrap();
    assert_eq!(value["TechnicalProperties"]["Weight_Kg"], 69);

    let reference = svc
        .get_submodel("TechnicalData", SerializationModifier::Reference)
        .unwrap();
    assert_eq!(
        reference,
        json!({
            "type": "ModelReference",
            "keys": [{"type": "Submodel", "value": TECHNICAL_DATA_ID}]
        })
    );

    let path = svc.get_submodel("TechnicalData", SerializationModifier::Path).unwrap();
    assert_eq!(path, json!(["TechnicalData"]));
}

#[test]
fn test_get_submodel_by_encoded_id() {
    let svc = service();
    let encoded = encode_identifier(TIME_SERIES_ID);
    let value = svc.get_submodel(&encoded, SerializationModifier::Path).unwrap();
    assert_eq!(value, json!(["TimeSeries"]));
}

#[test]
fn test_unknown_submodel() {
    let err = service()
        .get_submodel("Nameplate", SerializationModifier::Normal)
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_put_submodel_replaces_in_place() {
    let mut svc = service();
    svc.get_submodel_element("TechnicalData", "TechnicalProperties.Weight_Kg", SerializationModifier::Value)
        .unwrap();

    let replacement = Submodel::new(TECHNICAL_DATA_ID, "TechnicalData").with_elements(vec![
        Property::new("Weight_Kg", DataTypeDefXsd::Int).with_value("70").into(),
    ]);
    svc.put_submodel("TechnicalData", replacement).unwrap();
    assert_eq!(svc.cached_paths(), 0);

    let value = svc
        .get_submodel_element("TechnicalData", "Weight_Kg", SerializationModifier::Value)
        .unwrap();
    assert_eq!(value, json!({"Weight_Kg": 70}));
    assert!(svc
        .get_submodel_element("TechnicalData", "TechnicalProperties.Weight_Kg", SerializationModifier::Value)
        .unwrap_err()
        .is_not_found());
    assert_eq!(svc.environment().submodels()[0].id_short(), Some("TechnicalData"));
}

#[test]
fn test_delete_submodel() {
    let mut svc = service();
    let removed = svc.delete_submodel(&encode_identifier(TIME_SERIES_ID)).unwrap();
    assert_eq!(removed.id, TIME_SERIES_ID);
    assert_eq!(svc.submodel_references().len(), 1);
    assert!(svc.delete_submodel("TimeSeries").unwrap_err().is_not_found());
}

#[test]
fn test_asset_information_of_first_shell() {
    let svc = service();
    let info = svc.asset_information().unwrap();
    assert_eq!(info.global_asset_id.as_deref(), Some("urn:smc:chiller:hrs012"));

    let empty = AasService::new(Environment::default());
    assert!(empty.asset_information().unwrap_err().is_not_found());
}

// ── Elements ────────────────────────────────────────────────────────

#[test]
fn test_get_element_modifiers() {
    let mut svc = service();
    let path = "TechnicalProperties.Weight_Kg";

    let normal = svc
        .get_submodel_element("TechnicalData", path, SerializationModifier::Normal)
        .unwrap();
    assert_eq!(
        normal,
        json!({"idShort": "Weight_Kg", "valueType": "xs:int", "value": "69", "modelType": "Property"})
    );

    let value = svc
        .get_submodel_element("TechnicalData", path, SerializationModifier::Value)
        .unwrap();
    assert_eq!(value, json!({"Weight_Kg": 69}));

    let paths = svc
        .get_submodel_element("TechnicalData", path, SerializationModifier::Path)
        .unwrap();
    assert_eq!(paths, json!([path]));
}

#[test]
fn test_value_of_kind_without_projection_falls_back() {
    let mut svc = service();
    let value = svc
        .get_submodel_element("TechnicalData", "Reset", SerializationModifier::Value)
        .unwrap();
    assert_eq!(value["modelType"], "Operation");
}

#[test]
fn test_record_index_bounds() {
    let mut svc = service();
    let first = svc
        .get_submodel_element("TimeSeries", &format!("{RECORDS_PATH}[0]"), SerializationModifier::Value)
        .unwrap();
    assert_eq!(first, json!({"Time": 1_700_000_000_i64, "Temperature": 20.0}));

    let err = svc
        .get_submodel_element("TimeSeries", &format!("{RECORDS_PATH}[5]"), SerializationModifier::Normal)
        .unwrap_err();
    assert!(matches!(
        err,
        AasError::InvalidIndex {
            index: Some(5),
            len: Some(3),
            ..
        }
    ));
    assert!(err.is_not_found());
}

#[test]
fn test_malformed_element_path() {
    let mut svc = service();
    for path in ["", "Records[x]"] {
        let err = svc
            .get_submodel_element("TimeSeries", path, SerializationModifier::Normal)
            .unwrap_err();
        assert!(matches!(err, AasError::MalformedPath(_)), "{path}: {err}");
        assert!(err.is_client_error());
    }
}

#[test]
fn test_patch_value_is_stored_lexically() {
    let mut svc = service();
    let path = "TechnicalProperties.Weight_Kg";
    svc.patch_element_value("TechnicalData", path, &TypedValue::Integer(71)).unwrap();

    let normal = svc
        .get_submodel_element("TechnicalData", path, SerializationModifier::Normal)
        .unwrap();
    assert_eq!(normal["value"], "71");
}

// ── Cache ───────────────────────────────────────────────────────────

#[test]
fn test_cache_hit_matches_miss() {
    let mut svc = service();
    let path = "TechnicalProperties.Weight_Kg";

    let miss = svc
        .get_submodel_element("TechnicalData", path, SerializationModifier::Normal)
        .unwrap();
    let hit = svc
        .get_submodel_element("TechnicalData", path, SerializationModifier::Normal)
        .unwrap();

    assert_eq!(miss, hit);
    assert_eq!(
        svc.stats(),
        PathStats {
            walks: 1,
            cache_hits: 1,
            cache_misses: 1,
        }
    );
    assert_eq!(svc.cache_stats().hits, 1);
}

#[test]
fn test_put_environment_invalidates() {
    let mut svc = service();
    svc.resolve_path("TechnicalData.TechnicalProperties").unwrap();
    assert_eq!(svc.cached_paths(), 1);

    let previous = svc.put_environment(Environment {
        submodels: Some(vec![Submodel::new("urn:other", "Other")]),
        ..Default::default()
    });
    assert_eq!(previous, chiller_environment());
    assert_eq!(svc.cached_paths(), 0);
    assert_eq!(svc.document().generation().value(), 1);

    assert!(svc.resolve_path("TechnicalData.TechnicalProperties").unwrap_err().is_not_found());
    assert_eq!(svc.stats().walks, 2);
}

#[test]
fn test_put_structural_environment() {
    let mut svc = AasService::new(Environment::default());
    let structural = AasService::new(chiller_environment()).to_structural_environment();
    svc.put_structural_environment(&structural).unwrap();
    assert_eq!(svc.environment(), &chiller_environment());

    let err = svc.put_structural_environment(&json!({"submodels": 3})).unwrap_err();
    assert!(err.is_client_error());
}

#[test]
fn test_small_cache_evicts() {
    let config = ServiceConfig {
        cache_capacity: 1,
        ..ServiceConfig::default()
    };
    let mut svc = AasService::with_config(chiller_environment(), config);
    svc.resolve_path("TechnicalData.Reset").unwrap();
    svc.resolve_path("TimeSeries.Segments").unwrap();
    svc.resolve_path("TechnicalData.Reset").unwrap();
    assert_eq!(svc.stats().walks, 3);
    assert_eq!(svc.cached_paths(), 1);
    assert_eq!(svc.cache_stats().evictions, 2);
}

// ── Time series ─────────────────────────────────────────────────────

#[test]
fn test_append_record_ring_buffer() {
    let config = ServiceConfig {
        max_time_series_records: 4,
        ..ServiceConfig::default()
    };
    let mut svc = AasService::with_config(chiller_environment(), config);

    let readings = [("Temperature", 31.5), ("Pressure", 0.25)];
    assert_eq!(svc.append_record("TimeSeries", RECORDS_PATH, 1_800_000_000, &readings).unwrap(), 0);
    assert_eq!(svc.append_record("TimeSeries", RECORDS_PATH, 1_800_000_001, &readings).unwrap(), 1);

    let records = svc
        .get_submodel_element("TimeSeries", RECORDS_PATH, SerializationModifier::Normal)
        .unwrap();
    let items = records["value"].as_array().unwrap();
    assert_eq!(items.len(), 4);
    assert_eq!(items[0]["value"][0]["value"], "1700000001");
    assert_eq!(items[3]["value"][0]["value"], "1800000001");
    assert!(items[3].get("idShort").is_none());

    let last = svc
        .get_submodel_element("TimeSeries", &format!("{RECORDS_PATH}[3]"), SerializationModifier::Value)
        .unwrap();
    assert_eq!(
        last,
        json!({"Time": 1_800_000_001_i64, "Temperature": 31.5, "Pressure": 0.25})
    );
}

#[test]
fn test_append_to_leaf_rejected() {
    let mut svc = service();
    let err = svc
        .append_element(
            "TechnicalData",
            "TechnicalProperties.Weight_Kg",
            Property::new("X", DataTypeDefXsd::Int).into(),
            3,
        )
        .unwrap_err();
    assert!(matches!(err, AasError::InvalidValue(_)));
}

#[test]
fn test_append_to_submodel_root() {
    let mut svc = service();
    let dropped = svc
        .append_element("TechnicalData", "", Property::new("Note", DataTypeDefXsd::String).into(), 10)
        .unwrap();
    assert_eq!(dropped, 0);
    assert!(svc.resolve_path("TechnicalData.Note").is_ok());
}

// ── Metrics and rendering ───────────────────────────────────────────

#[test]
fn test_serialization_metric_size() {
    let svc = service();
    let metric = svc.measure_structural_serialization().unwrap();
    let expected = serde_json::to_vec(&svc.to_structural_environment()).unwrap().len();
    assert_eq!(metric.json_size, expected);
}

#[test]
fn test_lookup_metric() {
    let mut svc = service();
    assert!(svc.measure_lookup("TechnicalData", "TechnicalProperties.Weight_Kg").found);
    assert!(!svc.measure_lookup("TechnicalData", "Nope").found);
    assert!(!svc.measure_lookup("TechnicalData", "Bad[").found);
}

#[test]
fn test_environment_xml() {
    let xml = service().environment_xml().unwrap();
    assert!(xml.starts_with("<environment xmlns=\"https://admin-shell.io/aas/3/0\">"));
    assert!(xml.contains("<idShort>Weight_Kg</idShort><valueType>xs:int</valueType><value>69</value>"));
}

// ── Shared ──────────────────────────────────────────────────────────

#[test]
fn test_shared_service_serializes_access() {
    let shared = SharedService::new(service());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let shared = shared.clone();
            thread::spawn(move || {
                shared.with(|svc| {
                    svc.get_submodel_element(
                        "TechnicalData",
                        "TechnicalProperties.Weight_Kg",
                        SerializationModifier::Value,
                    )
                    .map(|v| v["Weight_Kg"].clone())
                })
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().unwrap(), json!(69));
    }
    let stats = shared.with(|svc| svc.stats());
    assert_eq!(stats.walks, 1);
    assert_eq!(stats.cache_hits, 3);
}
