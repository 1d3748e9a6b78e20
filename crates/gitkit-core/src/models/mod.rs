pub mod account;
pub mod download_page;
pub mod oob;
pub mod provider_user_info;
