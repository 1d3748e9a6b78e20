mod account;
mod download_page;
mod oob;
