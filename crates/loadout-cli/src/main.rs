mod serve;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use loadout_core::common::{settings_path, store_path};
use loadout_core::rpc::{JsonRpcRequest, JsonRpcResponse};
use loadout_core::{ConfigStore, Dispatcher, JsonFileStore, ProfileRegistry, ProfileStore, Settings};

#[derive(Parser, Debug)]
#[command(name = "loadout", version, about = "Save and restore game client config profiles")]
struct Args {
    /// Root archive directory (overrides settings)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Key-value store file
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Settings file
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all profiles
    List,
    /// Show one profile
    Get { id: String },
    /// Snapshot the client's current config as a new profile
    Create {
        name: String,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        favorite: bool,
    },
    /// Change a profile's name, color or favorite flag
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        favorite: Option<bool>,
    },
    /// Delete a profile and its folder
    Delete { id: String },
    /// Copy a profile's files over the client's config
    Export { id: String },
    /// Open a profile's folder in the file manager
    Open { id: String },
    /// Show or register the client's config directory
    Path {
        #[command(subcommand)]
        action: PathAction,
    },
    /// Serve JSON-RPC requests over stdio, one per line
    Serve,
}

#[derive(Subcommand, Debug)]
enum PathAction {
    Get,
    Set { path: PathBuf },
}

impl Command {
    /// Map the command to the equivalent JSON-RPC call
    fn to_request(&self) -> Option<(&'static str, Value)> {
        let call = match self {
            Command::List => ("profiles.list", json!({})),
            Command::Get { id } => ("profiles.get", json!({ "id": id })),
            Command::Create {
                name,
                color,
                favorite,
            } => (
                "profiles.create",
                json!({ "name": name, "color": color, "isFavorite": favorite }),
            ),
            Command::Update {
                id,
                name,
                color,
                favorite,
            } => (
                "profiles.update",
                json!({ "id": id, "name": name, "color": color, "isFavorite": favorite }),
            ),
            Command::Delete { id } => ("profiles.delete", json!({ "id": id })),
            Command::Export { id } => ("profiles.export", json!({ "id": id })),
            Command::Open { id } => ("profiles.openFolder", json!({ "id": id })),
            Command::Path {
                action: PathAction::Get,
            } => ("config.getExternalPath", json!({})),
            Command::Path {
                action: PathAction::Set { path },
            } => ("config.registerExternalPath", json!({ "path": path })),
            Command::Serve => return None,
        };
        Some(call)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let settings_file = match &args.settings {
        Some(path) => path.clone(),
        None => settings_path()?,
    };
    let mut settings = Settings::load(&settings_file)?;
    if let Some(root) = &args.root {
        settings.root_dir = root.clone();
    }

    let store_file = match &args.store {
        Some(path) => path.clone(),
        None => store_path()?,
    };
    let config: Arc<dyn ConfigStore> = Arc::new(JsonFileStore::open(store_file)?);

    let registry = Arc::new(ProfileRegistry::new(
        ProfileStore::from_settings(&settings, config.clone()),
        settings.profile_limit,
    ));
    registry.initialize().await?;

    let dispatcher = Dispatcher::new(registry, config);

    let Some((method, params)) = args.command.to_request() else {
        return serve::run(&dispatcher).await;
    };

    debug!("Running {} with {}", method, params);
    let request: JsonRpcRequest = serde_json::from_value(json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": method,
        "params": params,
    }))?;
    let response = dispatcher.handle(&request).await;
    print_response(&response)
}

fn print_response(response: &JsonRpcResponse) -> anyhow::Result<()> {
    if let Some(error) = &response.error {
        match &error.data {
            Some(data) => anyhow::bail!("{} ({})", error.message, data),
            None => anyhow::bail!("{}", error.message),
        }
    }

    let result = response.result.clone().unwrap_or(Value::Null);
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
