pub mod init;
pub mod query;
pub mod sentries;
pub mod status;

use serde::Deserialize;

use wotex_core::{Direction, NodeStatus};
use wotex_explorer::{IdentityView, ReportRow, ReportStep, TrustReport};

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Send `request` and decode the report; `None` when the node cannot be reached.
pub(crate) async fn fetch_report(
    endpoint: &str,
    request: reqwest::RequestBuilder,
) -> anyhow::Result<Option<TrustReport>> {
    match request.send().await {
        Ok(r) if r.status().is_success() => Ok(Some(r.json().await?)),
        Ok(r) => {
            let status = r.status();
            if let Ok(err) = r.json::<ErrorResponse>().await {
                anyhow::bail!("query failed (HTTP {}): {}", status, err.error);
            } else {
                anyhow::bail!("query failed (HTTP {})", status);
            }
        }
        Err(e) => {
            println!("Could not reach node at {}", endpoint);
            println!("  Error: {}", e);
            println!();
            println!("Is the node running? Start it with: wotex-node");
            Ok(None)
        }
    }
}

fn status_mark(status: NodeStatus) -> &'static str {
    match status {
        NodeStatus::Sentry => "*",
        NodeStatus::Member => "",
        NodeStatus::Pending => "?",
    }
}

pub(crate) fn identity_label(view: &IdentityView) -> String {
    format!("{}{}", view.uid, status_mark(view.status))
}

/// One line per row: steps from the target, arrows following the
/// certification direction; `~` marks a pending certification.
pub(crate) fn render_row(row: &ReportRow, direction: Direction) -> String {
    let mut line = String::new();
    for (i, step) in row.steps.iter().enumerate() {
        if i > 0 {
            let pending = matches!(step, ReportStep::Identity { pending_cert: true, .. });
            let arrow = match (direction, pending) {
                (Direction::TargetToMember, false) => " -> ",
                (Direction::TargetToMember, true) => " ~> ",
                (Direction::MemberToTarget, false) => " <- ",
                (Direction::MemberToTarget, true) => " <~ ",
            };
            line.push_str(arrow);
        }
        match step {
            ReportStep::Identity { uid, status, .. } => {
                line.push_str(uid);
                line.push_str(status_mark(*status));
            }
            ReportStep::Unknown => line.push('…'),
        }
    }
    line
}
