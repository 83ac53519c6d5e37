//! sm - StudyMate CLI
//!
//! A command-line interface for StudyMate accounts and sessions.
//!
//! # Examples
//!
//! ```bash
//! # Create an account (stores the issued session token)
//! sm register --username ada --full-name "Ada Lovelace" \
//!     --email ada@example.com --password secret123
//!
//! # Sign in
//! sm login --email ada@example.com --password secret123
//!
//! # Check and re-validate the stored session
//! sm status
//! sm verify --pretty
//! ```

mod cli;
mod commands;

use crate::{cli::Cli, commands::Commands};

use sm_cli::{ApiClient, FileTokenStore, SessionManager, SessionState};

use std::process::ExitCode;

use clap::Parser;
use serde_json::json;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut session = match FileTokenStore::new().map(|store| SessionManager::new(Box::new(store)))
    {
        Ok(Ok(session)) => session,
        Ok(Err(e)) | Err(e) => {
            eprintln!("Error restoring session: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::Register {
            username,
            full_name,
            email,
            password,
        } => {
            let client = connect(&cli.server, &session);
            match client
                .register(&username, &full_name, &email, &password)
                .await
            {
                Ok(value) => adopt_token(&mut session, value),
                Err(e) => Err(e.to_string()),
            }
        }

        Commands::Login { email, password } => {
            let client = connect(&cli.server, &session);
            match client.login(&email, &password).await {
                Ok(value) => adopt_token(&mut session, value),
                Err(e) => Err(e.to_string()),
            }
        }

        Commands::Logout => match session.logout() {
            Ok(()) => Ok(json!({ "success": true, "message": "Logged out" })),
            Err(e) => Err(e.to_string()),
        },

        Commands::Status => Ok(json!({
            "success": true,
            "data": {
                "state": state_name(session.state()),
                "hasToken": session.token().is_some(),
            }
        })),

        Commands::Verify => {
            let client = connect(&cli.server, &session);
            match session.validate(&client).await {
                Ok(SessionState::Authenticated) => match client.verify().await {
                    Ok(value) => Ok(value),
                    Err(e) => Err(e.to_string()),
                },
                Ok(_) => Err("No valid session. Run `sm login` first.".to_string()),
                Err(e) => Err(e.to_string()),
            }
        }
    };

    match result {
        Ok(value) => {
            let output = if cli.pretty {
                serde_json::to_string_pretty(&value)
            } else {
                serde_json::to_string(&value)
            };

            match output {
                Ok(json) => {
                    println!("{}", json);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Error serializing response: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Err(message) => {
            eprintln!("Error: {}", message);
            ExitCode::FAILURE
        }
    }
}

/// Build an API client for the discovered server, carrying the stored token.
fn connect(server: &Option<String>, session: &SessionManager) -> ApiClient {
    let server_url = match server {
        Some(url) => url.clone(),
        None => discover_server_url(),
    };

    ApiClient::new(&server_url, session.token())
}

/// Pull the issued token out of a register/login response and store it.
fn adopt_token(
    session: &mut SessionManager,
    value: serde_json::Value,
) -> Result<serde_json::Value, String> {
    let token = value
        .get("data")
        .and_then(|data| data.get("token"))
        .and_then(|token| token.as_str());

    match token {
        Some(token) => match session.login(token) {
            Ok(()) => Ok(value),
            Err(e) => Err(format!("Token issued but could not be stored: {}", e)),
        },
        None => Err("Server response did not include a session token".to_string()),
    }
}

fn state_name(state: SessionState) -> &'static str {
    match state {
        SessionState::Initializing => "initializing",
        SessionState::Validating => "validating",
        SessionState::Anonymous => "anonymous",
        SessionState::Authenticated => "authenticated",
    }
}

/// Discover the server URL from the port discovery file.
///
/// The sm-server writes a `server.json` file after binding, containing
/// the PID, port, and host. This function reads that file and verifies
/// the server process is still alive.
///
/// Falls back to a clear error message if no server is found.
fn discover_server_url() -> String {
    match sm_config::PortFileInfo::read_live() {
        Ok(Some(info)) => {
            format!("http://{}:{}", info.host, info.port)
        }
        Ok(None) => {
            let port_path = sm_config::PortFileInfo::path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| ".sm/server.json".to_string());

            eprintln!("Error: No running sm-server found.");
            eprintln!();
            eprintln!("Checked: {}", port_path);
            eprintln!();
            eprintln!("Start the server first:");
            eprintln!("  cargo run -p sm-server");
            eprintln!();
            eprintln!("Or specify a server URL explicitly:");
            eprintln!("  sm --server http://127.0.0.1:5000 <command>");
            std::process::exit(1);
        }
        Err(e) => {
            let port_path = sm_config::PortFileInfo::path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| ".sm/server.json".to_string());

            eprintln!("Error reading port file ({}): {}", port_path, e);
            eprintln!();
            eprintln!("Specify a server URL explicitly:");
            eprintln!("  sm --server http://127.0.0.1:5000 <command>");
            std::process::exit(1);
        }
    }
}
