use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum UserCommands {
    /// Get an account by id or email
    #[command(group = clap::ArgGroup::new("lookup").required(true).args(["id", "email"]))]
    Get {
        /// Gitkit user id
        #[arg(long)]
        id: Option<String>,
        /// Account email
        #[arg(long)]
        email: Option<String>,
    },
    /// List every account
    List {
        /// Accounts fetched per request
        #[arg(long)]
        max_results: Option<u32>,
    },
    /// Delete an account
    Delete {
        /// Gitkit user id
        id: String,
    },
    /// Update an account's profile fields
    Update {
        /// Gitkit user id
        id: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        display_name: Option<String>,
        #[arg(long)]
        photo_url: Option<String>,
        #[arg(long)]
        email_verified: Option<bool>,
    },
    /// Upload accounts with pre-hashed passwords
    Upload {
        /// Hash algorithm name (e.g. HMAC_SHA256, SCRYPT)
        #[arg(long)]
        hash_algorithm: String,
        /// Hash key, URL-safe base64
        #[arg(long)]
        hash_key: String,
        /// JSON array of accounts: localId, email, passwordHash, salt
        /// (URL-safe base64), optional displayName and emailVerified
        #[arg(long)]
        file: PathBuf,
        #[arg(long)]
        rounds: Option<u32>,
        #[arg(long)]
        memory_cost: Option<u32>,
    },
}
