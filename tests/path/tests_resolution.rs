//! Resolution of idShort paths against the chiller environment.

use aas::encode_identifier;
use aas::model::{NodeRef, SubmodelElement};
use aas::path::{IdShortPath, Lookup, PathError, resolve};
use rstest::rstest;

use crate::helpers::fixtures::{RECORDS_PATH, TECHNICAL_DATA_ID, chiller_environment};

fn path(text: &str) -> IdShortPath {
    IdShortPath::parse(text).unwrap()
}

#[test]
fn test_weight_resolves_to_property() {
    let env = chiller_environment();
    let node = resolve(&env, &path("TechnicalData.TechnicalProperties.Weight_Kg"))
        .found()
        .expect("Weight_Kg should resolve");

    let Some(SubmodelElement::Property(property)) = node.as_element() else {
        panic!("expected a Property, got {}", node.kind_name());
    };
    assert_eq!(property.value.as_deref(), Some("69"));
}

#[test]
fn test_unknown_child_is_not_found() {
    let env = chiller_environment();
    assert!(matches!(
        resolve(&env, &path("TechnicalData.Nonexistent")),
        Lookup::NotFound
    ));
}

#[test]
fn test_unknown_submodel_is_not_found() {
    let env = chiller_environment();
    assert!(matches!(resolve(&env, &path("Nameplate.X")), Lookup::NotFound));
}

#[test]
fn test_first_record() {
    let env = chiller_environment();
    let node = resolve(&env, &path(&format!("TimeSeries.{RECORDS_PATH}[0]")))
        .found()
        .unwrap();
    let time = node
        .as_element()
        .and_then(SubmodelElement::children)
        .and_then(|children| children.first())
        .unwrap();
    assert_eq!(time.id_short(), Some("Time"));
    assert!(matches!(time, SubmodelElement::Property(p) if p.value.as_deref() == Some("1700000000")));
}

#[rstest]
#[case(3)]
#[case(5)]
#[case(usize::MAX)]
fn test_index_past_end_is_absent(#[case] index: usize) {
    let env = chiller_environment();
    let lookup = resolve(&env, &path(&format!("TimeSeries.{RECORDS_PATH}[{index}]")));
    assert!(lookup.is_absent());
    assert!(matches!(lookup, Lookup::InvalidIndex { len: Some(3), .. }));
}

#[test]
fn test_list_without_index_is_absent() {
    let env = chiller_environment();
    let lookup = resolve(&env, &path(&format!("TimeSeries.{RECORDS_PATH}.Time")));
    assert!(matches!(lookup, Lookup::InvalidIndex { index: None, .. }));
}

#[test]
fn test_scalar_mid_path_is_not_found() {
    let env = chiller_environment();
    let lookup = resolve(&env, &path("TechnicalData.TechnicalProperties.Weight_Kg.Unit"));
    assert!(matches!(lookup, Lookup::NotFound));
}

#[test]
fn test_encoded_submodel_id_as_head() {
    let env = chiller_environment();
    let head = encode_identifier(TECHNICAL_DATA_ID);
    let node = resolve(&env, &path(&format!("{head}.TechnicalProperties")))
        .found()
        .unwrap();
    assert_eq!(node.id_short(), Some("TechnicalProperties"));
}

#[test]
fn test_resolution_is_idempotent() {
    let env = chiller_environment();
    let p = path("TechnicalData.GeneralInformation.ProductImage");
    let first = resolve(&env, &p).found().and_then(|n| n.as_element()).unwrap();
    let second = resolve(&env, &p).found().and_then(|n| n.as_element()).unwrap();
    assert!(std::ptr::eq(first, second));
}

#[test]
fn test_whole_submodel() {
    let env = chiller_environment();
    let node = resolve(&env, &path("TimeSeries")).found().unwrap();
    assert!(matches!(node, NodeRef::Submodel(sm) if sm.id_short() == Some("TimeSeries")));
}

#[rstest]
#[case("")]
#[case(".TechnicalProperties")]
#[case("TechnicalData.Records[x]")]
#[case("TechnicalData.Records[]")]
#[case("TechnicalData.Records[-1]")]
fn test_malformed_paths(#[case] text: &str) {
    let err = IdShortPath::parse(text).unwrap_err();
    assert!(matches!(err, PathError::Malformed { .. }));
    assert_eq!(err.path(), text);
}
