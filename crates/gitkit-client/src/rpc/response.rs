use gitkit_core::{GitkitError, Result as GitkitResult};

use serde_json::Value;

/// Classify a Gitkit response.
///
/// Responses without an `error` member are returned unchanged. Error codes
/// whose textual form starts with `4` are client errors; every other code is
/// a server error.
#[track_caller]
pub fn check_gitkit_error(response: Value) -> GitkitResult<Value> {
    let Some(error) = response.get("error").filter(|e| !e.is_null()) else {
        return Ok(response);
    };

    let message = error
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let code = match error.get("code") {
        None | Some(Value::Null) => {
            return Err(GitkitError::server("null error code from Gitkit server"));
        }
        Some(Value::String(code)) => code.clone(),
        Some(code) => code.to_string(),
    };

    if code.starts_with('4') {
        Err(GitkitError::client(message))
    } else {
        Err(GitkitError::server(message))
    }
}
