use lanhai_core::section::GroupPolicySection;
use lanhai_core::value::{GroupPolicyValue, PolicyValue};

#[test]
fn group_policy_value_serde_roundtrip() {
    let original = GroupPolicyValue {
        section: GroupPolicySection::Machine,
        registry_key_path: "Software\\Policies\\LanHai".to_string(),
        registry_value_name: "Flag".to_string(),
        value: PolicyValue::Dword(1),
    };
    let json = serde_json::to_string(&original).expect("serialize");
    let parsed: GroupPolicyValue = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(parsed, original);
}

#[test]
fn policy_value_uses_snake_case_tags() {
    let json = serde_json::to_value(PolicyValue::ExpandString("%TEMP%".to_string()))
        .expect("serialize");
    assert_eq!(json["expand_sz"], "%TEMP%");

    let none: PolicyValue = serde_json::from_str(r#""none""#).expect("deserialize none");
    assert!(none.is_none());

    let multi: PolicyValue =
        serde_json::from_str(r#"{ "multi_sz": ["a", "b"] }"#).expect("deserialize multi");
    assert_eq!(
        multi,
        PolicyValue::MultiString(vec!["a".to_string(), "b".to_string()])
    );
}

#[test]
fn section_serde_snake_case() {
    let s: GroupPolicySection = serde_json::from_str(r#""machine""#).expect("deserialize");
    assert_eq!(s, GroupPolicySection::Machine);
    assert_eq!(
        serde_json::to_string(&GroupPolicySection::User).expect("serialize"),
        r#""user""#
    );
}
