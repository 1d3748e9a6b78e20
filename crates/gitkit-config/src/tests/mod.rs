
use std::env;

/// RAII guard for environment variables - automatically restores on drop
pub(crate) struct EnvGuard {
    key: &'static str,
    original: Option<String>,
}

impl EnvGuard {
    pub(crate) fn set(key: &'static str, value: &str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::set_var(key, value);
            Self { key, original }
        }
    }

    pub(crate) fn remove(key: &'static str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::remove_var(key);
            Self { key, original }
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        unsafe {
            match &self.original {
                Some(val) => env::set_var(self.key, val),
                None => env::remove_var(self.key),
            }
        }
    }
}

pub(crate) fn complete_config_json() -> serde_json::Value {
    serde_json::json!({
        "clientId": "924226504183.apps.googleusercontent.com",
        "widgetUrl": "http://localhost:8000/gitkit",
        "serviceAccountEmail": "test@developer.gserviceaccount.com",
        "serviceAccountPrivateKeyFile": "/tmp/does-not-matter.pem"
    })
}
