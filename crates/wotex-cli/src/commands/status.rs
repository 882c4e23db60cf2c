//! `wotex status` — Query the status of a running wotex node.

use clap::Args;
use serde::Deserialize;

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// API endpoint of the node.
    #[arg(short, long, default_value = "http://127.0.0.1:8558")]
    pub endpoint: String,
}

#[derive(Deserialize)]
struct StatusResponse {
    version: String,
    uptime_secs: u64,
    dataset: String,
    members: usize,
    certifications: usize,
    pending_identities: usize,
    pending_certifications: usize,
    step_max: u32,
    max_hops: u32,
}

pub async fn run(args: &StatusArgs) -> anyhow::Result<()> {
    let url = format!("{}/api/v1/status", args.endpoint);
    let resp = reqwest::get(&url).await;

    match resp {
        Ok(r) if r.status().is_success() => {
            let status: StatusResponse = r.json().await?;
            println!("Node Status:");
            println!("  Version:        {}", status.version);
            println!("  Uptime:         {}s", status.uptime_secs);
            println!("  Dataset:        {}", status.dataset);
            println!("  Members:        {}", status.members);
            println!("  Certifications: {}", status.certifications);
            println!(
                "  Sandbox:        {} identities, {} certifications",
                status.pending_identities, status.pending_certifications
            );
            println!("  Step max:       {} (search bound {})", status.step_max, status.max_hops);
        }
        Ok(r) => {
            anyhow::bail!("node returned HTTP {}", r.status());
        }
        Err(e) => {
            println!("Could not reach node at {}", args.endpoint);
            println!("  Error: {}", e);
            println!();
            println!("Is the node running? Start it with: wotex-node");
        }
    }

    Ok(())
}
