//! Gatehouse CLI
//!
//! Operates the gateway's authorization core from the command line: hash the
//! admin password, check paths against a listener, and issue, refresh or
//! enforce tokens.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use gatehouse::{
    hash_password, AuthError, GatehouseConfig, Gatekeeper, KeyRequest, Listener,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "gatehouse")]
#[command(about = "Authorization core for a two-perimeter API gateway")]
struct Args {
    /// Path to the TOML config file (missing file means defaults)
    #[arg(short = 'c', long, env = "GATEHOUSE_CONFIG", default_value = "gatehouse.toml")]
    config: PathBuf,

    /// Internal listener port
    #[arg(long, env = "GATEHOUSE_INTERNAL_PORT")]
    internal_port: Option<u16>,

    /// External listener port
    #[arg(long, env = "GATEHOUSE_EXTERNAL_PORT")]
    external_port: Option<u16>,

    /// Upstream node URL
    #[arg(long, env = "GATEHOUSE_INGRESS_URL")]
    ingress_url: Option<String>,

    /// Secret the token key is derived from
    #[arg(long, env = "GATEHOUSE_ENCRYPTION_KEY", hide_env_values = true)]
    encryption_key: Option<String>,

    /// Argon2 PHC hash of the admin password
    #[arg(long, env = "GATEHOUSE_ADMIN_PASSWORD_HASH", hide_env_values = true)]
    admin_password_hash: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print an Argon2id hash for `auth.admin_password_hash`
    HashPassword { password: String },

    /// Print whether a listener admits a path
    CheckPath {
        /// internal or external
        #[arg(short, long)]
        listener: Listener,
        path: String,
    },

    /// Issue a key as the admin
    Issue {
        #[arg(short, long)]
        password: String,
        #[arg(short, long)]
        role: String,
        /// Lifetime in seconds
        #[arg(short, long)]
        expiry: i64,
    },

    /// Re-issue a valid key with a new lifetime
    Refresh {
        #[arg(short, long)]
        token: String,
        /// Lifetime in seconds
        #[arg(short, long)]
        expiry: i64,
    },

    /// Check a key against the policy; exits 1 on deny
    Enforce {
        #[arg(short, long)]
        token: String,
        #[arg(short, long, default_value = "GET")]
        method: String,
        path: String,
    },

    /// Print the effective configuration with secrets redacted
    ShowConfig,
}

impl Args {
    /// Load the config file and apply flag and environment overrides
    fn effective_config(&self) -> Result<GatehouseConfig> {
        let mut config = GatehouseConfig::load(&self.config)
            .with_context(|| format!("loading {}", self.config.display()))?;

        if let Some(port) = self.internal_port {
            config.internal_port = port;
        }
        if let Some(port) = self.external_port {
            config.external_port = port;
        }
        if let Some(url) = &self.ingress_url {
            config.ingress_url = url.clone();
        }
        if let Some(key) = &self.encryption_key {
            config.auth.encryption_key = key.clone();
        }
        if let Some(hash) = &self.admin_password_hash {
            config.auth.admin_password_hash = hash.clone();
        }
        Ok(config)
    }

    fn gatekeeper(&self) -> Result<Gatekeeper> {
        let config = self.effective_config()?;
        Gatekeeper::from_config(&config).context("invalid configuration")
    }
}

fn main() -> Result<ExitCode> {
    // Logs go to stderr so command output stays parseable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    match &args.command {
        Command::HashPassword { password } => {
            if password.is_empty() {
                bail!("refusing to hash an empty password");
            }
            println!("{}", hash_password(password)?);
        }

        Command::CheckPath { listener, path } => {
            let perimeter = args.effective_config()?.acl.perimeter();
            let verdict = if perimeter.admits(*listener, path) {
                "admit"
            } else {
                "reject"
            };
            println!("{}", verdict);
        }

        Command::Issue {
            password,
            role,
            expiry,
        } => {
            let gatekeeper = args.gatekeeper()?;
            let credentials = basic_header("admin", password);
            let response = gatekeeper
                .issue_key(&credentials, &KeyRequest::new(role.as_str(), *expiry))
                .context("issuing key")?;
            println!("{}", response.to_json()?);
        }

        Command::Refresh { token, expiry } => {
            let gatekeeper = args.gatekeeper()?;
            let response = gatekeeper
                .refresh_key(&format!("Bearer {}", token), &KeyRequest::new("", *expiry))
                .context("refreshing key")?;
            println!("{}", response.to_json()?);
        }

        Command::Enforce {
            token,
            method,
            path,
        } => {
            let gatekeeper = args.gatekeeper()?;
            match gatekeeper.authorize(token, path, method) {
                Ok(()) => println!("allow"),
                Err(AuthError::PolicyDenied) => {
                    println!("deny");
                    return Ok(ExitCode::FAILURE);
                }
                Err(e) if e.is_auth_failure() => {
                    println!("deny");
                    info!(status = %e.status(), "{}", e);
                    return Ok(ExitCode::FAILURE);
                }
                Err(e) => return Err(e).context("enforcing policy"),
            }
        }

        Command::ShowConfig => {
            let config = args.effective_config()?;
            print!("{}", config.to_redacted_toml()?);
            if let Err(e) = config.validate() {
                info!("{}", e);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn basic_header(username: &str, password: &str) -> String {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;

    format!(
        "Basic {}",
        STANDARD.encode(format!("{}:{}", username, password))
    )
}
