use crate::{
    link_commands::LinkCommands, token_commands::TokenCommands, user_commands::UserCommands,
};

use clap::Subcommand;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Account operations
    User {
        #[command(subcommand)]
        action: UserCommands,
    },

    /// Gitkit token operations
    Token {
        #[command(subcommand)]
        action: TokenCommands,
    },

    /// Out-of-band link operations
    Link {
        #[command(subcommand)]
        action: LinkCommands,
    },
}
