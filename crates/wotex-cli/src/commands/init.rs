//! `wotex init` — Initialize a new wotex node configuration.

use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (defaults to current directory).
    #[arg(default_value = ".")]
    pub dir: PathBuf,
}

const DEFAULT_CONFIG: &str = r#"# wotex Node Configuration

[api]
listen_addr = "127.0.0.1"
port = 8558

[storage]
dataset = "./wotex/dataset.json"

[logging]
level = "info"
format = "text"

[explorer]
step_max = 5
dsen_p = 1.0
"#;

const EMPTY_DATASET: &str = r#"{
  "head": null,
  "members": [],
  "certifications": [],
  "pending_identities": [],
  "pending_certifications": []
}
"#;

pub fn run(args: &InitArgs) -> anyhow::Result<()> {
    let config_path = args.dir.join("wotex.toml");

    if config_path.exists() {
        anyhow::bail!("configuration file already exists at {}", config_path.display());
    }

    std::fs::create_dir_all(&args.dir)?;
    std::fs::write(&config_path, DEFAULT_CONFIG)?;

    let dataset_dir = args.dir.join("wotex");
    std::fs::create_dir_all(&dataset_dir)?;
    let dataset_path = dataset_dir.join("dataset.json");
    if !dataset_path.exists() {
        std::fs::write(&dataset_path, EMPTY_DATASET)?;
    }

    println!("Initialized wotex node at {}", config_path.display());
    println!("Fill {} with your web of trust.", dataset_path.display());
    println!("Run 'wotex-node' to start the node.");
    Ok(())
}
