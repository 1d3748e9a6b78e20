pub mod error;
pub mod models;

pub use error::{GitkitError, Result};
pub use models::account::Account;
pub use models::download_page::DownloadPage;
pub use models::oob::{OobAction, OobRequest, OobRequestType, OobResult};
pub use models::provider_user_info::ProviderUserInfo;

#[cfg(test)]
mod tests;
