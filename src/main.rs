use anyhow::{Context, Result};
use bluecat_gss::resource::{Action, ResourceDefinition};
use bluecat_gss::{logging, GatewayConnector, ObjectManager, ProviderSettings};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

/// Manage BlueCat Gateway GSS applications, answers and search orders
#[derive(Parser, Debug)]
#[command(name = "bluecat-gss", version, about, long_about = None)]
struct Args {
    #[command(flatten)]
    provider: ProviderArgs,

    /// Provider settings file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args, Debug)]
struct ProviderArgs {
    /// BlueCat Gateway address
    #[arg(long, global = true)]
    server: Option<String>,

    /// Gateway port
    #[arg(long, global = true)]
    port: Option<String>,

    /// Transport (http or https)
    #[arg(long, global = true)]
    transport: Option<String>,

    /// User to authenticate with
    #[arg(long, global = true)]
    username: Option<String>,

    /// Password to authenticate with
    #[arg(long, global = true)]
    password: Option<String>,

    /// API version of the gateway REST workflow
    #[arg(long, global = true)]
    api_version: Option<String>,

    /// The password is base64-encoded
    #[arg(long, global = true)]
    encrypt_password: bool,
}

impl ProviderArgs {
    fn into_settings(self) -> ProviderSettings {
        ProviderSettings {
            server: self.server,
            port: self.port,
            transport: self.transport,
            username: self.username,
            password: self.password,
            api_version: self.api_version,
            encrypt_password: self.encrypt_password.then_some(true),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the resource described in FILE
    Create { file: PathBuf },
    /// Read the resource described in FILE back from the gateway
    Read {
        file: PathBuf,
        #[arg(long)]
        id: Option<String>,
    },
    /// Bring the gateway in line with FILE
    Update {
        file: PathBuf,
        #[arg(long)]
        id: Option<String>,
    },
    /// Delete the resource described in FILE
    Delete {
        file: PathBuf,
        #[arg(long)]
        id: Option<String>,
    },
    /// Save the non-secret provider flags to the settings file
    Configure,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _log_guard = logging::init(args.log_level.into(), &logging::log_dir());

    let settings_path = args.config.clone().or_else(ProviderSettings::default_path);
    let stored = match &settings_path {
        Some(path) if path.exists() => ProviderSettings::load_from(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        _ => ProviderSettings::default(),
    };
    let settings = stored.merge(args.provider.into_settings());

    let (action, file, id) = match args.command {
        Command::Configure => {
            let path = settings_path.context("No config directory available; pass --config")?;
            settings.save_to(&path)?;
            println!("Saved provider settings to {}", path.display());
            return Ok(());
        }
        Command::Create { file } => (Action::Create, file, None),
        Command::Read { file, id } => (Action::Read, file, id),
        Command::Update { file, id } => (Action::Update, file, id),
        Command::Delete { file, id } => (Action::Delete, file, id),
    };

    let definition = ResourceDefinition::load(&file)?;
    tracing::info!(resource = definition.resource_type(), ?action, "Running {:?}", action);

    let host = settings.resolve().context("Failed to initialize the provider")?;
    let connector = GatewayConnector::connect(host)
        .await
        .context("Failed to initialize the provider")?;
    let manager = ObjectManager::new(connector);

    if let Some(state) = definition.apply(&manager, action, id).await? {
        println!("{}", serde_json::to_string_pretty(&state)?);
    }

    Ok(())
}
