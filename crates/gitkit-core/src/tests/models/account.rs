use crate::{Account, ProviderUserInfo};

use serde_json::{Map, Value, json};

fn as_map(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

#[test]
fn given_full_response_when_from_response_then_all_fields_set() {
    // Given
    let response = as_map(json!({
        "localId": "1234",
        "email": "user@example.com",
        "displayName": "Test User",
        "photoUrl": "http://example.com/photo.png",
        "emailVerified": true,
        "providerUserInfo": [
            { "providerId": "google.com", "federatedId": "http://google.com/1234" }
        ]
    }));

    // When
    let account = Account::from_response(&response);

    // Then
    assert_eq!(account.user_id.as_deref(), Some("1234"));
    assert_eq!(account.email.as_deref(), Some("user@example.com"));
    assert_eq!(account.display_name.as_deref(), Some("Test User"));
    assert_eq!(
        account.photo_url.as_deref(),
        Some("http://example.com/photo.png")
    );
    assert_eq!(account.email_verified, Some(true));
    assert_eq!(account.provider_info().len(), 1);
    assert_eq!(
        account.provider_info()[0].provider_id.as_deref(),
        Some("google.com")
    );
}

#[test]
fn given_empty_response_when_from_response_then_every_field_absent() {
    let account = Account::from_response(&Map::new());

    assert_eq!(account, Account::default());
    assert!(account.email_verified.is_none());
    assert!(account.provider_info().is_empty());
}

#[test]
fn given_user_id_key_when_from_response_then_used_as_id() {
    let account = Account::from_response(&as_map(json!({
        "user_id": "abc",
        "email": "abc@example.com"
    })));

    assert_eq!(account.user_id.as_deref(), Some("abc"));
    assert_eq!(account.email.as_deref(), Some("abc@example.com"));
    assert!(account.display_name.is_none());
}

#[test]
fn given_local_id_and_user_id_when_from_response_then_local_id_wins() {
    let account = Account::from_response(&as_map(json!({
        "localId": "local",
        "user_id": "token"
    })));

    assert_eq!(account.user_id.as_deref(), Some("local"));
}

#[test]
fn given_email_verified_false_when_from_response_then_false_not_unknown() {
    let account = Account::from_response(&as_map(json!({ "emailVerified": false })));

    assert_eq!(account.email_verified, Some(false));
}

#[test]
fn given_mistyped_fields_when_from_response_then_fields_ignored() {
    let account = Account::from_response(&as_map(json!({
        "localId": 42,
        "emailVerified": "yes",
        "providerUserInfo": "not-a-list"
    })));

    assert!(account.user_id.is_none());
    assert!(account.email_verified.is_none());
    assert!(account.provider_info().is_empty());
}

#[test]
fn test_new_with_password_sets_upload_fields() {
    let account = Account::new("1234", "1234@example.com").with_password(vec![1, 2], vec![5, 6, 7]);

    assert_eq!(account.user_id.as_deref(), Some("1234"));
    assert_eq!(account.password_hash, Some(vec![1, 2]));
    assert_eq!(account.salt, Some(vec![5, 6, 7]));
}

#[test]
fn test_serialize_uses_wire_names_and_hides_password_material() {
    let mut account = Account::new("1234", "1234@example.com").with_password(vec![1], vec![2]);
    account.email_verified = Some(false);

    let value = serde_json::to_value(&account).unwrap();

    assert_eq!(
        value,
        json!({ "localId": "1234", "email": "1234@example.com", "emailVerified": false })
    );
}

#[test]
fn test_provider_user_info_tolerates_missing_fields() {
    let info: ProviderUserInfo = serde_json::from_value(json!({ "email": "a@b.c" })).unwrap();

    assert_eq!(info.email.as_deref(), Some("a@b.c"));
    assert!(info.provider_id.is_none());
}
