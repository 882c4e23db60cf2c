//! `wotex query` — Show certification chains between an identity and the members.

use clap::Args;

use wotex_core::Direction;

use super::{fetch_report, identity_label, render_row};

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Identity to query: uid, public key, or `uid[n]` for sandbox homonyms.
    pub key: String,

    /// Include sandbox identities and certifications.
    #[arg(short, long)]
    pub sandbox: bool,

    /// Chain direction: member-to-target (or "to"), target-to-member (or "from").
    #[arg(short, long, default_value = "member-to-target")]
    pub direction: Direction,

    /// Print the raw JSON report.
    #[arg(long)]
    pub json: bool,

    /// API endpoint of the node.
    #[arg(short, long, default_value = "http://127.0.0.1:8558")]
    pub endpoint: String,
}

pub async fn run(args: &QueryArgs) -> anyhow::Result<()> {
    let url = format!("{}/api/v1/paths", args.endpoint);
    let direction = args.direction.to_string();
    let request = reqwest::Client::new().get(&url).query(&[
        ("to", args.key.as_str()),
        ("sandbox", if args.sandbox { "true" } else { "false" }),
        ("direction", direction.as_str()),
    ]);
    let Some(report) = fetch_report(&args.endpoint, request).await? else {
        return Ok(());
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if let Some(target) = &report.target {
        println!("Target: {}  {}", identity_label(target), target.pubkey);
    }
    println!(
        "dSen = {}, search bound = {} hops, {} sentries",
        report.threshold,
        report.max_hops,
        report.sentries.len()
    );
    let unreachable = report.rows.iter().filter(|r| !r.resolved).count();
    println!(
        "{} rows, {} without a chain within the bound",
        report.rows.len(),
        unreachable
    );
    println!();
    for row in &report.rows {
        println!("  {}", render_row(row, report.direction));
    }
    Ok(())
}
