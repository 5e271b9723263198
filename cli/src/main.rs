use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use keys_core::KeyManager;
use keys_shared::{AppConfig, Environment, KeyProviderKind, LogFormat, LoggingConfig};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "keys")]
#[command(about = "Manage the signing and encryption keys of the identity service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Base directory; key files live in <DIR>/keys
    #[arg(short, long, global = true)]
    dir: Option<PathBuf>,

    /// Key generation backend (rsa or openssl)
    #[arg(long, global = true)]
    provider: Option<KeyProviderKind>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate both key pairs, replacing existing ones
    Generate,
    /// Print the public JWK Set
    Jwks {
        /// Fail instead of generating missing keys
        #[arg(long)]
        no_generate: bool,
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Print the key file locations
    Paths,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Environment specific overrides first, then the generic .env
    let environment = Environment::from_env();
    dotenvy::from_filename(environment.env_file()).ok();
    dotenvy::dotenv().ok();

    let mut config = AppConfig::from_env();
    if cli.debug {
        config.logging.level = String::from("debug");
    }
    init_tracing(&config.logging);

    if let Some(dir) = cli.dir {
        config.keys.directory = Some(dir);
    }
    if let Some(provider) = cli.provider {
        config.keys.provider = provider;
    }

    let manager = KeyManager::from_config(&config.keys).context("Invalid key store configuration")?;
    info!(
        environment = %config.environment,
        directory = %manager.directory().display(),
        backend = manager.provider_name(),
        "Key store ready"
    );

    match cli.command {
        Commands::Generate => {
            manager.generate_key_pairs()?;
            println!("Generated key pairs in {}", manager.directory().display());
        }
        Commands::Jwks { no_generate, pretty } => {
            let keys = manager.load_keypairs(!no_generate)?;
            let json = if pretty {
                keys.jwks.to_json_pretty()
            } else {
                keys.jwks.to_json()
            }
            .context("Failed to serialize JWK Set")?;
            println!("{}", json);
        }
        Commands::Paths => {
            println!("sig.pub  {}", manager.sig_files().public.display());
            println!("sig.prv  {}", manager.sig_files().private.display());
            println!("enc.pub  {}", manager.enc_files().public.display());
            println!("enc.prv  {}", manager.enc_files().private.display());
            println!("setup    {}", manager.setup_token_path().display());
        }
    }

    Ok(())
}

/// Log to stderr so command output on stdout stays machine readable
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(logging.colored)
        .with_file(logging.source_location)
        .with_line_number(logging.source_location);

    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Compact => builder.compact().init(),
    }
}
