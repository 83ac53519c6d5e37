use clap::Subcommand;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Create a new account and start a session
    Register {
        #[arg(long)]
        username: String,

        #[arg(long)]
        full_name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    /// Sign in and store the session token
    Login {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    /// Discard the stored session
    Logout,

    /// Show the current session state
    Status,

    /// Re-validate the stored session token with the server
    Verify,
}
