//! Client Composition Kit - Entry Point
//!
//! Composes a container for the selected client or preset and reports the
//! outcome. The selector comes from the CLI, the environment
//! (`CCK_CLIENT_ID` / `CCK_PRESET`), or a TOML config file, in that order
//! of precedence. Composition failure is fatal: the process exits non-zero
//! with an aggregated message naming every missing or erroring service.

// Force-link cck-services to ensure linkme registrations of the built-in
// modules are included
extern crate cck_services;

use std::sync::Arc;

use clap::Parser;
use tracing::info;

use cck_container::{
    compose, init_logging, scope, tokens, AppConfig, ComposeOptions, Registries,
};
use cck_domain::contracts::{ApiClient, AuthService, Credentials};
use cck_services::core_module;

const DEFAULT_API_BASE_URL: &str = "https://api.example.com";

/// Command line interface for the Client Composition Kit
#[derive(Parser, Debug)]
#[command(name = "cck")]
#[command(about = "Client Composition Kit - runtime service composition")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<std::path::PathBuf>,

    /// Client whose module layer to load
    #[arg(long)]
    pub client_id: Option<String>,

    /// Preset whose module layer to load (mutually exclusive with --client-id)
    #[arg(long)]
    pub preset: Option<String>,

    /// List registered clients and presets, then exit
    #[arg(long)]
    pub list: bool,

    /// Skip container validation (for testing)
    #[arg(long)]
    pub skip_validation: bool,

    /// Fail if the selected client or preset is unregistered
    #[arg(long)]
    pub require_selector: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if cli.client_id.is_some() {
        config.client_id = cli.client_id.clone();
    }
    if cli.preset.is_some() {
        config.preset = cli.preset.clone();
    }

    init_logging(&config.logging)?;

    let registries = Registries::builtin();

    if cli.list {
        println!("Registered Clients:");
        for id in registries.clients.list() {
            println!("  - {id}");
        }
        println!();
        println!("Registered Presets:");
        for id in registries.presets.list() {
            println!("  - {id}");
        }
        return Ok(());
    }

    let api_base_url = config
        .api_base_url
        .as_deref()
        .unwrap_or(DEFAULT_API_BASE_URL);

    let mut options =
        ComposeOptions::new(core_module()).with_http_client(ApiClient::new(api_base_url));
    if let Some(client_id) = &config.client_id {
        options = options.with_client_id(client_id);
    } else if let Some(preset) = &config.preset {
        options = options.with_preset(preset);
    }
    if cli.skip_validation {
        options = options.skip_validation();
    }
    if cli.require_selector {
        options = options.require_selector();
    }

    let container = Arc::new(compose(&registries, options).await?);
    info!(bindings = container.len(), "container composed and validated");

    // Resolve through a scope the way the presentation layer would.
    let auth: Arc<dyn AuthService> = {
        let _guard = scope::enter(container.clone());
        scope::resolve(tokens::auth::service())?
    };

    let response = auth
        .login(Credentials {
            email: "demo@example.com".to_string(),
            password: "demo".to_string(),
        })
        .await?;
    info!(user = %response.user.email, "demo login succeeded");

    Ok(())
}
