//! Integration test: trust-distance queries end to end.
//!
//! Loads a web of trust through wotex-identity's dataset format and runs
//! queries through wotex-explorer's TrustExplorer.

use std::sync::Arc;

use wotex_core::{Direction, ExplorerConfig, NodeStatus};
use wotex_explorer::{ExplorerError, ReportStep, TrustExplorer, TrustQuery, TrustReport};
use wotex_identity::{MemoryWotStore, WotDataset};

/// S1 -> M1 -> M2, plus X and Y certifying S1 and S1 certifying X so that,
/// with a five-member head (dSen = 2), S1 is the only sentry.
const SCENARIO: &str = r#"{
    "head": { "members_count": 5, "version": 10 },
    "members": [
        { "uid": "S1", "pubkey": "PUB_S1", "hash": "H_S1" },
        { "uid": "M1", "pubkey": "PUB_M1", "hash": "H_M1" },
        { "uid": "M2", "pubkey": "PUB_M2", "hash": "H_M2" },
        { "uid": "X", "pubkey": "PUB_X", "hash": "H_X" },
        { "uid": "Y", "pubkey": "PUB_Y", "hash": "H_Y" }
    ],
    "certifications": [
        { "from": "PUB_S1", "to": "PUB_M1" },
        { "from": "PUB_M1", "to": "PUB_M2" },
        { "from": "PUB_S1", "to": "PUB_X" },
        { "from": "PUB_X", "to": "PUB_S1" },
        { "from": "PUB_Y", "to": "PUB_S1" }
    ],
    "pending_identities": [
        { "uid": "P1", "pubkey": "PUB_P1", "hash": "H_P1" },
        { "uid": "alice", "pubkey": "PUB_alice_A", "hash": "H_alice_A" },
        { "uid": "alice", "pubkey": "PUB_alice_B", "hash": "H_alice_B" },
        { "uid": "alice", "pubkey": "PUB_alice_C", "hash": "H_alice_C" }
    ],
    "pending_certifications": [
        { "from": "PUB_M2", "to": "H_alice_B" },
        { "from": "PUB_alice_B", "to": "H_M1" }
    ]
}"#;

fn explorer(max_hops: u32) -> TrustExplorer {
    let dataset = WotDataset::from_json(SCENARIO).unwrap();
    let store = Arc::new(MemoryWotStore::from_dataset(dataset).unwrap());
    let config = ExplorerConfig {
        max_hops: Some(max_hops),
        ..Default::default()
    };
    TrustExplorer::new(store.clone(), store, config)
}

fn uids(report: &TrustReport, member: &str) -> Vec<Option<String>> {
    let row = report
        .rows
        .iter()
        .find(|r| r.member.uid == member)
        .unwrap_or_else(|| panic!("no row for {member}"));
    row.steps
        .iter()
        .map(|s| s.uid().map(str::to_string))
        .collect()
}

fn some(ids: &[&str]) -> Vec<Option<String>> {
    ids.iter().map(|s| Some(s.to_string())).collect()
}

// =========================================================================
// Confirmed graph
// =========================================================================

#[tokio::test]
async fn test_single_sentry() {
    let report = explorer(5).explore(TrustQuery::default()).await.unwrap();
    assert_eq!(report.threshold, 2);
    let sentries: Vec<&str> = report.sentries.iter().map(|v| v.uid.as_str()).collect();
    assert_eq!(sentries, vec!["S1"]);
    assert_eq!(report.non_sentries.len(), 4);
    assert!(report
        .non_sentries
        .iter()
        .all(|v| v.status == NodeStatus::Member));
}

#[tokio::test]
async fn test_member_to_target_chains() {
    let report = explorer(5)
        .explore(TrustQuery::to("M2").with_direction(Direction::MemberToTarget))
        .await
        .unwrap();

    // Target first: M2 <- M1 <- S1.
    assert_eq!(uids(&report, "S1"), some(&["M2", "M1", "S1"]));
    assert_eq!(uids(&report, "M1"), some(&["M2", "M1"]));
    assert_eq!(uids(&report, "X"), some(&["M2", "M1", "S1", "X"]));

    let s1_row = report.rows.iter().find(|r| r.member.uid == "S1").unwrap();
    assert!(s1_row.resolved);
    assert_eq!(s1_row.steps.len() - 1, 2);
    assert_eq!(s1_row.member.status, NodeStatus::Sentry);
    assert!(s1_row.pending_flags().iter().all(|f| !f));
}

#[tokio::test]
async fn test_rows_in_ascending_length() {
    let report = explorer(5).explore(TrustQuery::to("M2")).await.unwrap();
    let lengths: Vec<usize> = report.rows.iter().map(|r| r.steps.len()).collect();
    let mut sorted = lengths.clone();
    sorted.sort();
    assert_eq!(lengths, sorted);
    // The target itself comes first as a one-step chain.
    assert_eq!(report.rows[0].member.uid, "M2");
}

#[tokio::test]
async fn test_target_to_member_follows_certifications() {
    let report = explorer(5)
        .explore(TrustQuery::to("S1").with_direction(Direction::TargetToMember))
        .await
        .unwrap();
    assert_eq!(uids(&report, "M2"), some(&["S1", "M1", "M2"]));

    // No chain from S1 reaches Y.
    let y_row = report.rows.iter().find(|r| r.member.uid == "Y").unwrap();
    assert!(!y_row.resolved);
}

// =========================================================================
// Sandbox
// =========================================================================

#[tokio::test]
async fn test_unconnected_pending_identity_gets_placeholder() {
    let report = explorer(2)
        .explore(TrustQuery::to("M2").with_sandbox(true))
        .await
        .unwrap();

    let p1_row = report.rows.iter().find(|r| r.member.uid == "P1").unwrap();
    assert!(!p1_row.resolved);
    assert_eq!(p1_row.steps.len(), 3);
    assert_eq!(p1_row.steps[0].uid(), Some("M2"));
    assert_eq!(p1_row.steps[1], ReportStep::Unknown);
    assert_eq!(p1_row.steps[2].uid(), Some("P1"));
    assert_eq!(p1_row.member.status, NodeStatus::Pending);
}

#[tokio::test]
async fn test_sandbox_required_then_succeeds() {
    let explorer = explorer(5);
    let err = explorer.explore(TrustQuery::to("P1")).await.unwrap_err();
    assert!(matches!(err, ExplorerError::SandboxRequired(ref key) if key == "P1"));

    let report = explorer
        .explore(TrustQuery::to("P1").with_sandbox(true))
        .await
        .unwrap();
    let target = report.target.unwrap();
    assert_eq!(target.uid, "P1");
    assert_eq!(target.status, NodeStatus::Pending);
}

#[tokio::test]
async fn test_homonym_suffix_is_stable() {
    let explorer = explorer(5);
    for _ in 0..5 {
        let report = explorer
            .explore(TrustQuery::to("alice[1]").with_sandbox(true))
            .await
            .unwrap();
        let target = report.target.unwrap();
        assert_eq!(target.uid, "alice[1]");
        assert_eq!(target.pubkey, "PUB_alice_B");
    }
}

#[tokio::test]
async fn test_pending_certifications_are_flagged() {
    let report = explorer(5)
        .explore(
            TrustQuery::to("alice[1]")
                .with_sandbox(true)
                .with_direction(Direction::MemberToTarget),
        )
        .await
        .unwrap();

    // alice[1] <~ M2 <- M1 <- S1, the first link only exists in the sandbox.
    assert_eq!(uids(&report, "S1"), some(&["alice[1]", "M2", "M1", "S1"]));
    let s1_row = report.rows.iter().find(|r| r.member.uid == "S1").unwrap();
    assert_eq!(s1_row.pending_flags(), vec![false, true, false, false]);

    // Unrelated homonyms stay unreachable.
    let other = report
        .rows
        .iter()
        .find(|r| r.member.uid == "alice[0]")
        .unwrap();
    assert!(!other.resolved);
}

#[tokio::test]
async fn test_sandbox_queries_leave_confirmed_data_untouched() {
    let explorer = explorer(5);
    let before = explorer.explore(TrustQuery::to("M2")).await.unwrap();

    for key in ["alice[0]", "alice[1]", "alice[2]", "P1"] {
        explorer
            .explore(TrustQuery::to(key).with_sandbox(true))
            .await
            .unwrap();
    }

    let after = explorer.explore(TrustQuery::to("M2")).await.unwrap();
    assert_eq!(before.sentries, after.sentries);
    assert_eq!(before.non_sentries, after.non_sentries);
    assert_eq!(before.rows, after.rows);
}

#[tokio::test]
async fn test_unknown_key() {
    let err = explorer(5)
        .explore(TrustQuery::to("alice[9]").with_sandbox(true))
        .await
        .unwrap_err();
    assert!(matches!(err, ExplorerError::NotFound(_)));
}

#[tokio::test]
async fn test_report_serializes_to_json() {
    let report = explorer(2)
        .explore(TrustQuery::to("M2").with_sandbox(true))
        .await
        .unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["direction"], "member-to-target");
    assert_eq!(json["target"]["status"], serde_json::json!("member"));
    let decoded: TrustReport = serde_json::from_value(json).unwrap();
    assert_eq!(decoded.rows, report.rows);
}
