//! Token demo entry point
//!
//! Issues user tokens and validates them the way an application caller
//! would: the secret comes from the environment and `exp` is stamped from
//! the configured lifetime.

mod config;

use anyhow::{bail, Context};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::DemoConfig;
use token_auth::{issue, now_timestamp, ErrorResponse, Role, TokenError, UserClaims};

fn print_help() {
    println!("token-demo - issue and validate HS256 tokens");
    println!();
    println!("USAGE:");
    println!("    token-demo [COMMAND]");
    println!();
    println!("COMMANDS:");
    println!("    issue <user_id> <username> <role>   Issue a single token");
    println!("    verify <token>                      Verify a token and print its claims");
    println!("    batch                               Issue a batch, then validate each (default)");
    println!("    --help, -h                          Show this help");
    println!();
    println!("ENVIRONMENT:");
    println!("    TOKEN_SECRET                (required) shared signing secret");
    println!("    TOKEN_EXPIRES_IN_SECS       token lifetime, default 5");
    println!("    TOKEN_BATCH_SIZE            tokens issued by `batch`, default 6");
    println!("    TOKEN_BATCH_INTERVAL_SECS   pause between batch issuances, default 1");
}

fn issue_user(config: &DemoConfig, user_id: i64, username: &str, role: Role) -> anyhow::Result<String> {
    let claims = UserClaims::new(
        user_id,
        username,
        role,
        now_timestamp(),
        config.token.expires_in_secs,
    );
    let token = issue(&claims.to_claim_set()?, config.token.secret.as_bytes())?;
    tracing::info!(user_id, exp = claims.exp, "Issued token");
    Ok(token)
}

fn run_issue(config: &DemoConfig, args: &[String]) -> anyhow::Result<()> {
    let [user_id, username, role] = args else {
        bail!("usage: token-demo issue <user_id> <username> <role>");
    };
    let user_id: i64 = user_id
        .parse()
        .with_context(|| format!("invalid user id: {}", user_id))?;
    let role: Role = role.parse().map_err(anyhow::Error::msg)?;

    println!("{}", issue_user(config, user_id, username, role)?);
    Ok(())
}

fn run_verify(config: &DemoConfig, args: &[String]) -> anyhow::Result<()> {
    let [token] = args else {
        bail!("usage: token-demo verify <token>");
    };

    match config.token.verify(token) {
        Ok(claims) => {
            println!("{}", serde_json::to_string_pretty(&claims)?);
            Ok(())
        }
        Err(err) => {
            println!("{}", serde_json::to_string_pretty(&ErrorResponse::from(&err))?);
            Err(err.into())
        }
    }
}

fn run_batch(config: &DemoConfig) -> anyhow::Result<()> {
    let mut tokens = Vec::with_capacity(config.batch_size);
    for i in 0..config.batch_size {
        tokens.push(issue_user(config, 123, "rafael", Role::Admin)?);
        if i + 1 < config.batch_size {
            std::thread::sleep(config.batch_interval());
        }
    }

    println!("Issued tokens:");
    for token in &tokens {
        println!("{}", token);
    }

    println!();
    println!("Validating:");
    for (idx, token) in tokens.iter().enumerate() {
        let idx = idx + 1;
        match config.token.verify(token) {
            Ok(claims) => {
                let exp = claims.expiration().ok().flatten().unwrap_or_default();
                println!("Token {}: valid | exp = {}", idx, exp);
            }
            Err(TokenError::ExpiredToken { exp, .. }) => {
                println!("Token {}: expired | exp = {}", idx, exp);
            }
            Err(err) => println!("Token {}: invalid ({})", idx, err.code()),
        }
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "token_demo=info,token_auth=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(String::as_str).unwrap_or("batch");

    if matches!(command, "--help" | "-h") {
        print_help();
        return Ok(());
    }

    // Load configuration
    let config = DemoConfig::from_env();
    if config.token.secret.is_empty() {
        bail!("TOKEN_SECRET must be set");
    }
    tracing::debug!(?config, "Loaded configuration");

    let rest = args.get(2..).unwrap_or_default();
    match command {
        "issue" => run_issue(&config, rest),
        "verify" => run_verify(&config, rest),
        "batch" => run_batch(&config),
        other => {
            print_help();
            bail!("unknown command: {}", other)
        }
    }
}
