use crate::DownloadPage;

use serde_json::json;

#[test]
fn test_page_with_users_and_token() {
    let page = DownloadPage::from_response(json!({
        "users": [{ "localId": "1" }, { "localId": "2" }],
        "nextPageToken": "page2_token"
    }))
    .unwrap();

    assert_eq!(page.continuation_token(), Some("page2_token"));
    assert_eq!(page.into_users().len(), 2);
}

#[test]
fn test_page_without_users_is_empty() {
    let page = DownloadPage::from_response(json!({ "nextPageToken": "t" })).unwrap();

    assert!(page.users.is_none());
    assert_eq!(page.continuation_token(), Some("t"));
    assert!(page.into_users().is_empty());
}

#[test]
fn test_empty_token_counts_as_absent() {
    let page = DownloadPage::from_response(json!({ "nextPageToken": "" })).unwrap();

    assert_eq!(page.continuation_token(), None);
}

#[test]
fn test_malformed_page_is_server_side_error() {
    let result = DownloadPage::from_response(json!({ "users": "nope" }));

    assert!(result.unwrap_err().is_server_error());
}
