use autofill_core_types::{CanonicalField, SiteId};
use field_locator::{FieldMappingTable, Locator, MappingError};

#[test]
fn yaml_table_deserializes_into_typed_mapping() {
    let yaml = r##"
fcaportal.nic.in:
  state:
    - "select#ddlState"
    - "#state"
  grievanceNarrative:
    - "textarea[name=\"complaintText\"]"
"##;
    let table: FieldMappingTable = serde_yaml::from_str(yaml).expect("valid table");
    assert!(table.has_own_entry(SiteId::FcaPortal));

    let mapping = table.for_site(SiteId::FcaPortal);
    let state: Vec<&str> = mapping
        .chain(CanonicalField::State)
        .unwrap()
        .iter()
        .map(Locator::as_str)
        .collect();
    assert_eq!(state, vec!["select#ddlState", "#state"]);
    assert!(mapping.chain(CanonicalField::City).is_none());
}

#[test]
fn unknown_field_key_is_rejected() {
    let yaml = r##"
consumerhelpline.gov.in:
  pincode: ["#pin"]
"##;
    let err = serde_yaml::from_str::<FieldMappingTable>(yaml).unwrap_err();
    assert!(err.to_string().contains("pincode"), "{err}");
}

#[test]
fn unknown_site_key_is_rejected() {
    let raw = serde_json::from_value(serde_json::json!({
        "example.com": { "state": ["#state"] }
    }))
    .unwrap();
    assert_eq!(
        FieldMappingTable::from_raw(&raw),
        Err(MappingError::UnknownSite("example.com".into()))
    );
}

#[test]
fn blank_locator_is_rejected() {
    let raw = serde_json::from_value(serde_json::json!({
        "consumerhelpline.gov.in": { "city": ["#city", " "] }
    }))
    .unwrap();
    assert!(matches!(
        FieldMappingTable::from_raw(&raw),
        Err(MappingError::EmptyLocator { .. })
    ));
}

#[test]
fn table_serializes_by_site_domain() {
    let json = serde_json::to_value(FieldMappingTable::builtin()).unwrap();
    let chains = &json["consumerhelpline.gov.in"];
    assert_eq!(chains["productValueRange"][1], "#productValue");
}
