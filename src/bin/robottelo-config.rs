use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde_json::{json, Map, Value};

use robottelo::config::{project_root, ConfigError, IniReader, Settings, SETTINGS_FILE_NAME};

#[derive(Parser)]
#[command(name = "robottelo-config")]
#[command(about = "Validate and inspect Robottelo settings", long_about = None)]
struct Cli {
    /// Directory holding robottelo.properties (defaults to $ROBOTTELO_DIR or the crate root)
    #[arg(short, long)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read and validate the settings file
    Check,
    /// Print the URLs derived from the settings
    Urls,
    /// List feature sections, whether the settings file defines them, and any unknown sections
    Features,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let root = cli.root.unwrap_or_else(project_root);

    match cli.command {
        Commands::Check => match configured(&root) {
            Ok(settings) => {
                println!("configuration OK");
                println!("server: {}", settings.server.get_url());
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        Commands::Urls => {
            let settings = configured(&root)?;
            let urls = json!({
                "server": settings.server.get_url(),
                "pub": settings.server.get_pub_url(),
                "cert_rpm": settings.server.get_cert_rpm_url()?,
                "docker": settings.docker.preferred_url(),
            });
            println!("{}", serde_json::to_string_pretty(&urls)?);
        }
        Commands::Features => {
            let reader = IniReader::new(root.join(SETTINGS_FILE_NAME))?;
            let known = Settings::new().all_features();
            let features: Map<String, Value> = known
                .iter()
                .map(|name| (name.to_string(), Value::Bool(reader.has_section(name))))
                .collect();
            let unknown: Vec<&str> = reader
                .sections()
                .filter(|name| *name != "robottelo" && !known.iter().any(|known| known == name))
                .collect();
            let report = json!({
                "settings_file": reader.path().display().to_string(),
                "features": features,
                "unknown_sections": unknown,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

fn configured(root: &Path) -> Result<Settings, ConfigError> {
    let mut settings = Settings::new();
    settings.configure_in(root)?;
    Ok(settings)
}
