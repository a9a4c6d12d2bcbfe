//! Value-only projection of the fixtures.

use aas::model::NodeRef;
use aas::path::{IdShortPath, resolve};
use aas::to_value_only;
use serde_json::json;

use crate::helpers::fixtures::{chiller_environment, every_kind_environment, technical_data};

#[test]
fn test_technical_data_projection() {
    assert_eq!(
        to_value_only(&technical_data()),
        Some(json!({
            "GeneralInformation": {
                "ManufacturerName": "SMC",
                "ProductImage": null
            },
            "TechnicalProperties": {
                "Weight_Kg": 69,
                "SupplyVoltage": null,
                "Manual": null
            },
            "Reset": null
        }))
    );
}

#[test]
fn test_projection_of_resolved_property() {
    let env = chiller_environment();
    let path = IdShortPath::parse("TechnicalData.TechnicalProperties.Weight_Kg").unwrap();
    let node = resolve(&env, &path).found().unwrap();
    assert_eq!(to_value_only(node), Some(json!(69)));
}

#[test]
fn test_non_value_kinds_project_to_none() {
    let env = every_kind_environment();
    for element in env.submodels()[0].elements() {
        let projected = to_value_only(element);
        match element.kind_name() {
            "Property" | "MultiLanguageProperty" | "SubmodelElementCollection" => {
                assert!(projected.is_some(), "{}", element.kind_name())
            }
            other => assert!(projected.is_none(), "{other} should have no projection"),
        }
    }
}

#[test]
fn test_environment_has_no_projection() {
    let env = chiller_environment();
    assert_eq!(to_value_only(NodeRef::Environment(&env)), None);
}

#[test]
fn test_boolean_property_is_typed() {
    let env = every_kind_environment();
    let flag = &env.submodels()[0].elements()[0];
    assert_eq!(to_value_only(flag), Some(json!(true)));
}
