use clap::Subcommand;

#[derive(Subcommand)]
pub enum TokenCommands {
    /// Verify a Gitkit token and print the account it describes
    Verify {
        /// Gitkit token (the gtoken cookie value)
        token: String,
    },
}
