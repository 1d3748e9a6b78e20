use crate::commands::Commands;
use crate::error::{CliError, Result as CliResult};
use crate::link_commands::LinkCommands;
use crate::token_commands::TokenCommands;
use crate::upload_file::{decode_base64url, load_accounts};
use crate::user_commands::UserCommands;

use gitkit_client::{GitkitClient, OobParams};
use gitkit_core::Account;

use log::info;
use serde_json::{Value, json};

/// Run one command against `client`, returning the JSON to print
pub(crate) fn execute(client: &GitkitClient, command: Commands) -> CliResult<Value> {
    match command {
        Commands::User { action } => execute_user(client, action),
        Commands::Token { action } => execute_token(client, action),
        Commands::Link { action } => execute_link(client, action),
    }
}

fn execute_user(client: &GitkitClient, action: UserCommands) -> CliResult<Value> {
    match action {
        UserCommands::Get { id, email } => {
            let account = match (id, email) {
                (Some(id), _) => client.get_user_by_id(&id)?,
                (None, Some(email)) => client.get_user_by_email(&email)?,
                (None, None) => return Err(CliError::input("--id or --email is required")),
            };
            Ok(serde_json::to_value(account)?)
        }
        UserCommands::List { max_results } => {
            let mut users = Vec::new();
            for account in client.get_all_users(max_results)? {
                users.push(serde_json::to_value(account?)?);
            }
            info!("Listed {} accounts", users.len());
            Ok(Value::Array(users))
        }
        UserCommands::Delete { id } => Ok(client.delete_user(&id)?),
        UserCommands::Update {
            id,
            email,
            display_name,
            photo_url,
            email_verified,
        } => {
            // setAccountInfo replaces every field, so start from the stored record.
            let mut account = client.get_user_by_id(&id)?;
            apply_update(&mut account, email, display_name, photo_url, email_verified);
            Ok(client.update_user(&account)?)
        }
        UserCommands::Upload {
            hash_algorithm,
            hash_key,
            file,
            rounds,
            memory_cost,
        } => {
            let hash_key = decode_base64url("--hash-key", &hash_key)?;
            let accounts = load_accounts(&file)?;
            client.upload_users(&hash_algorithm, &hash_key, &accounts, rounds, memory_cost)?;
            info!("Uploaded {} accounts", accounts.len());
            Ok(json!({ "uploaded": accounts.len() }))
        }
    }
}

fn execute_token(client: &GitkitClient, action: TokenCommands) -> CliResult<Value> {
    match action {
        TokenCommands::Verify { token } => {
            let account = client.validate_token(Some(&token))?;
            Ok(json!({
                "valid": account.is_some(),
                "user": account,
            }))
        }
    }
}

fn execute_link(client: &GitkitClient, action: LinkCommands) -> CliResult<Value> {
    match action {
        LinkCommands::VerifyEmail { email } => {
            let link = client.get_email_verification_link(&email)?;
            Ok(json!({ "email": email, "oobLink": link }))
        }
        LinkCommands::ResetPassword { email, ip, captcha } => {
            let mut params = OobParams::new();
            params.insert("action".to_string(), "resetPassword".to_string());
            params.insert("email".to_string(), email);
            if let Some(captcha) = captcha {
                params.insert("response".to_string(), captcha);
            }
            let result = client.get_oob_results(&params, Some(&ip), None)?;
            Ok(result.to_json())
        }
    }
}

pub(crate) fn apply_update(
    account: &mut Account,
    email: Option<String>,
    display_name: Option<String>,
    photo_url: Option<String>,
    email_verified: Option<bool>,
) {
    if email.is_some() {
        account.email = email;
    }
    if display_name.is_some() {
        account.display_name = display_name;
    }
    if photo_url.is_some() {
        account.photo_url = photo_url;
    }
    if email_verified.is_some() {
        account.email_verified = email_verified;
    }
}
