mod http_transport;
mod reqwest_transport;
mod service_account;

pub use http_transport::{HttpRequest, HttpTransport};
pub use reqwest_transport::{DEFAULT_TIMEOUT, ReqwestTransport};
pub use service_account::ServiceAccountCredentials;
