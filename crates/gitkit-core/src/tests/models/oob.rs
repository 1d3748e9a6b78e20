use crate::{OobAction, OobRequest, OobResult};

use std::str::FromStr;

use serde_json::json;

#[test]
fn test_oob_action_round_trip_names() {
    assert_eq!(OobAction::ResetPassword.as_str(), "resetPassword");
    assert_eq!(OobAction::ChangeEmail.as_str(), "changeEmail");
    assert_eq!(OobAction::VerifyEmail.as_str(), "verifyEmail");
    assert_eq!(
        OobAction::from_str("changeEmail").unwrap(),
        OobAction::ChangeEmail
    );
}

#[test]
fn test_unknown_oob_action_is_client_error() {
    let err = OobAction::from_str("deleteEverything").unwrap_err();

    assert!(err.is_client_error());
    assert_eq!(err.message(), "unknown action type");
}

#[test]
fn test_password_reset_request_wire_format() {
    let request = OobRequest::password_reset(
        Some("user@example.com".to_string()),
        Some("1.1.1.1".to_string()),
        Some("100".to_string()),
    );

    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({
            "email": "user@example.com",
            "userIp": "1.1.1.1",
            "captchaResp": "100",
            "requestType": "PASSWORD_RESET"
        })
    );
}

#[test]
fn test_change_email_request_wire_format() {
    let request = OobRequest::change_email(
        Some("old@example.com".to_string()),
        Some("new@example.com".to_string()),
        Some("1.1.1.1".to_string()),
        "token".to_string(),
    );

    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({
            "email": "old@example.com",
            "newEmail": "new@example.com",
            "userIp": "1.1.1.1",
            "idToken": "token",
            "requestType": "NEW_EMAIL_ACCEPT"
        })
    );
}

#[test]
fn test_verify_email_request_wire_format() {
    let request = OobRequest::verify_email("user@example.com".to_string());

    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({ "email": "user@example.com", "requestType": "VERIFY_EMAIL" })
    );
}

#[test]
fn test_reset_password_result_json() {
    let result = OobResult::ResetPassword {
        email: Some("user@example.com".to_string()),
        oob_link: "http://example.com/widget?mode=resetPassword&oobCode=c".to_string(),
    };

    assert_eq!(
        result.to_json(),
        json!({
            "email": "user@example.com",
            "oobLink": "http://example.com/widget?mode=resetPassword&oobCode=c",
            "action": "RESET_PASSWORD",
            "response_body": { "success": true }
        })
    );
}

#[test]
fn test_failure_result_json() {
    let result = OobResult::failure("login is required");

    assert!(!result.is_success());
    assert_eq!(result.action(), None);
    assert_eq!(
        result.to_json(),
        json!({ "response_body": { "error": "login is required" } })
    );
}
