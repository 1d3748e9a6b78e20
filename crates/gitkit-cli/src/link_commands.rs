use clap::Subcommand;

#[derive(Subcommand)]
pub enum LinkCommands {
    /// Build an email verification link
    VerifyEmail {
        /// Email to verify
        email: String,
    },
    /// Build a password reset link
    ResetPassword {
        #[arg(long)]
        email: String,
        /// IP address of the requesting user
        #[arg(long)]
        ip: String,
        /// Captcha response from the widget
        #[arg(long)]
        captcha: Option<String>,
    },
}
