//! XML rendering of whole documents.

use aas::TypedValue;
use aas::serialize::XmlSerializer;
use aas::serialize::xmlization::{NAMESPACE, to_string, write};
use rstest::rstest;

use crate::helpers::fixtures::{chiller_environment, every_kind_environment};

fn kinds_xml() -> String {
    to_string(&every_kind_environment()).unwrap()
}

#[test]
fn test_namespace_declared_once() {
    let out = to_string(&chiller_environment()).unwrap();
    assert!(out.starts_with(&format!(
        "<environment xmlns=\"{NAMESPACE}\"><assetAdministrationShells><assetAdministrationShell>"
    )));
    assert_eq!(out.matches("xmlns=").count(), 1);
    assert!(out.ends_with("</environment>"));
}

#[test]
fn test_write_to_sink_matches_to_string() {
    let env = chiller_environment();
    let mut sink = Vec::new();
    write(&env, &mut sink).unwrap();
    assert_eq!(String::from_utf8(sink).unwrap(), to_string(&env).unwrap());
}

#[test]
fn test_shell_references_and_asset_information() {
    let out = to_string(&chiller_environment()).unwrap();
    assert!(out.contains(
        "<assetInformation><assetKind>Instance</assetKind>\
         <globalAssetId>urn:smc:chiller:hrs012</globalAssetId></assetInformation>"
    ));
    assert!(out.contains(
        "<submodels><reference><type>ModelReference</type><keys><key><type>Submodel</type>\
         <value>id:embedded_system:aaabbbccc:technical_data</value></key></keys></reference>"
    ));
}

#[test]
fn test_double_specials_in_documents() {
    let out = kinds_xml();
    assert!(out.contains("<valueType>xs:double</valueType><value>-0.0</value>"));
    assert!(out.contains("<value>INF</value>"));
}

#[test]
fn test_blob_base64() {
    assert!(kinds_xml().contains("<value>AAEC/f7/</value><contentType>application/octet-stream</contentType>"));
}

#[test]
fn test_escaping_only_touches_markup() {
    assert!(kinds_xml().contains("<text>A &lt;flag&gt; &amp; more</text>"));
}

#[test]
fn test_empty_present_list_is_self_closing() {
    let out = kinds_xml();
    assert!(out.contains(
        "<submodelElementCollection><idShort>Empty</idShort><value/></submodelElementCollection>"
    ));
    assert!(out.contains("<inoutputVariables/>"));
    assert!(!out.contains("<inputVariables"));
}

#[test]
fn test_booleans_render_as_words() {
    let out = kinds_xml();
    assert!(out.contains("<orderRelevant>true</orderRelevant>"));
    assert!(out.contains("<levelType><min>false</min><nom>true</nom><typ>false</typ><max>true</max></levelType>"));
}

#[test]
fn test_administration_and_named_capability() {
    let out = kinds_xml();
    assert!(out.contains("<administration><version>1</version><revision>0</revision></administration>"));
    assert!(out.contains("<capability><idShort>CanPump</idShort></capability>"));
}

#[rstest]
#[case(0.0, "0.0")]
#[case(-0.0, "-0.0")]
#[case(f64::INFINITY, "INF")]
#[case(f64::NEG_INFINITY, "-INF")]
#[case(f64::NAN, "NaN")]
#[case(1.5, "1.5")]
#[case(69.0, "69.0")]
fn test_double_scalar(#[case] value: f64, #[case] expected: &str) {
    let mut serializer = XmlSerializer::new(Vec::new());
    serializer.write_scalar("value", &TypedValue::Double(value)).unwrap();
    assert_eq!(
        String::from_utf8(serializer.into_inner()).unwrap(),
        format!("<value xmlns=\"{NAMESPACE}\">{expected}</value>")
    );
}
