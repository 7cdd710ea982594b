use anyhow::Context;
use chrono::Utc;
use clap::Subcommand;
use serde_json::json;
use uuid::Uuid;

use crate::auth::TokenService;
use crate::cli::OutputFormat;
use crate::config::AppConfig;

#[derive(Subcommand)]
pub enum TokenCommands {
    #[command(about = "Mint an access token for a user id")]
    Issue {
        #[arg(help = "User id placed in the token")]
        user_id: Uuid,
        #[arg(long, help = "Lifetime in minutes (defaults to JWT_SECRET_KEY_EXPIRE_MINUTES_COUNT)")]
        minutes: Option<i64>,
    },

    #[command(about = "Verify a token and print its claims")]
    Inspect {
        #[arg(help = "Token, with or without the Bearer prefix")]
        token: String,
    },
}

pub fn handle(cmd: TokenCommands, config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let security = &config.security;
    let tokens = TokenService::new(&security.jwt_secret, security.jwt_expire_minutes)
        .context("JWT_SECRET_KEY must be set")?;

    match cmd {
        TokenCommands::Issue { user_id, minutes } => {
            let minutes = minutes.unwrap_or(tokens.expire_minutes());
            let token = tokens.issue_for(user_id, minutes)?;
            let claims = tokens.verify(&token)?;

            match output_format {
                OutputFormat::Json => println!(
                    "{}",
                    json!({ "access_token": token, "user_id": user_id, "expires_at": claims.expires_at() })
                ),
                OutputFormat::Text => println!("{}", token),
            }
        }
        TokenCommands::Inspect { token } => {
            let verified = if token.contains(' ') {
                tokens.verify_header(&token)
            } else {
                tokens.verify(&token)
            };
            let claims = verified.context("token rejected")?;
            let expired = claims.is_expired(Utc::now());

            match output_format {
                OutputFormat::Json => println!(
                    "{}",
                    json!({ "user_id": claims.user_id, "exp": claims.exp, "expires_at": claims.expires_at(), "expired": expired })
                ),
                OutputFormat::Text => {
                    println!("user_id:    {}", claims.user_id);
                    match claims.expires_at() {
                        Some(at) => println!("expires_at: {}", at),
                        None => println!("exp:        {}", claims.exp),
                    }
                    println!("expired:    {}", expired);
                }
            }
        }
    }
    Ok(())
}
