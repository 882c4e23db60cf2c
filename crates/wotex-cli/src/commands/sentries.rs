//! `wotex sentries` — List the current sentries.

use clap::Args;

use super::{fetch_report, identity_label};

#[derive(Args, Debug)]
pub struct SentriesArgs {
    /// Also list members that are not sentries.
    #[arg(short, long)]
    pub all: bool,

    /// API endpoint of the node.
    #[arg(short, long, default_value = "http://127.0.0.1:8558")]
    pub endpoint: String,
}

pub async fn run(args: &SentriesArgs) -> anyhow::Result<()> {
    let url = format!("{}/api/v1/sentries", args.endpoint);
    let request = reqwest::Client::new().get(&url);
    let Some(report) = fetch_report(&args.endpoint, request).await? else {
        return Ok(());
    };

    println!("Sentries (dSen = {}): {}", report.threshold, report.sentries.len());
    for view in &report.sentries {
        println!("  {}  {}", identity_label(view), view.pubkey);
    }
    if args.all {
        println!("Other members: {}", report.non_sentries.len());
        for view in &report.non_sentries {
            println!("  {}  {}", identity_label(view), view.pubkey);
        }
    }
    Ok(())
}
