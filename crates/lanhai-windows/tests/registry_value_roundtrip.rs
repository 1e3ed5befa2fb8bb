#![cfg(windows)]

use lanhai_core::value::PolicyValue;
use lanhai_windows::registry;
use uuid::Uuid;
use winreg::enums::HKEY_CURRENT_USER;
use winreg::RegKey;

fn create_test_key() -> (RegKey, CleanupKey) {
    let path = format!("Software\\LanHaiPolicyTest\\{}", Uuid::new_v4());
    let hkcu = RegKey::predef(HKEY_CURRENT_USER);
    let (key, _disp) = hkcu.create_subkey(&path).expect("create subkey");
    (key, CleanupKey(path))
}

struct CleanupKey(String);

impl Drop for CleanupKey {
    fn drop(&mut self) {
        let hkcu = RegKey::predef(HKEY_CURRENT_USER);
        let _ = hkcu.delete_subkey_all(&self.0);
    }
}

#[test]
fn write_then_read_each_kind() {
    let (key, _guard) = create_test_key();

    let cases = [
        ("Dword", PolicyValue::Dword(1)),
        ("Qword", PolicyValue::Qword(0x1_0000_0001)),
        ("Sz", PolicyValue::String("hello".to_string())),
        (
            "ExpandSz",
            PolicyValue::ExpandString("%SystemRoot%\\notepad.exe".to_string()),
        ),
        (
            "MultiSz",
            PolicyValue::MultiString(vec!["first".to_string(), "second".to_string()]),
        ),
        ("Binary", PolicyValue::Binary(vec![0xCA, 0xFE, 0x00, 0x01])),
    ];
    for (name, value) in cases {
        registry::write_value(&key, name, &value).expect("write value");
        let read = registry::read_value(&key, name).expect("read value");
        assert_eq!(read, value, "roundtrip mismatch for {name}");
    }
}

#[test]
fn overwrite_changes_value_and_kind() {
    let (key, _guard) = create_test_key();

    registry::write_value(&key, "Flag", &PolicyValue::Dword(1)).expect("write 1");
    assert_eq!(
        registry::read_value(&key, "Flag").expect("read"),
        PolicyValue::Dword(1)
    );

    registry::write_value(&key, "Flag", &PolicyValue::Dword(0)).expect("write 0");
    assert_eq!(
        registry::read_value(&key, "Flag").expect("read"),
        PolicyValue::Dword(0)
    );

    registry::write_value(&key, "Flag", &PolicyValue::String("off".to_string()))
        .expect("write sz");
    assert_eq!(
        registry::read_value(&key, "Flag").expect("read"),
        PolicyValue::String("off".to_string())
    );
}

#[test]
fn read_missing_value_returns_none() {
    let (key, _guard) = create_test_key();
    let read = registry::read_value(&key, "DoesNotExist").expect("read");
    assert!(read.is_none());
}

#[test]
fn delete_is_idempotent() {
    let (key, _guard) = create_test_key();

    let removed = registry::delete_value_if_present(&key, "Flag").expect("delete missing");
    assert!(!removed);

    registry::write_value(&key, "Flag", &PolicyValue::Dword(1)).expect("write");
    let removed = registry::delete_value_if_present(&key, "Flag").expect("delete present");
    assert!(removed);
    assert!(registry::read_value(&key, "Flag").expect("read").is_none());

    let removed = registry::delete_value_if_present(&key, "Flag").expect("delete again");
    assert!(!removed);
}

#[test]
fn write_none_removes_value() {
    let (key, _guard) = create_test_key();

    registry::write_value(&key, "Flag", &PolicyValue::Dword(7)).expect("write");
    registry::write_value(&key, "Flag", &PolicyValue::None).expect("write none");
    assert!(registry::read_value(&key, "Flag").expect("read").is_none());
}

#[test]
fn contains_value_ignores_case() {
    let (key, _guard) = create_test_key();

    registry::write_value(&key, "DisableFeature", &PolicyValue::Dword(1)).expect("write");
    assert!(registry::contains_value(&key, "disablefeature").expect("contains"));
    assert!(registry::contains_value(&key, "DISABLEFEATURE").expect("contains"));
    assert!(!registry::contains_value(&key, "OtherName").expect("contains"));
}
