use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Dense node identifier issued by a graph instance.
///
/// Ids are only meaningful inside the graph (or overlay) that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Position of this node in an arena.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Role of a node during the evaluation of a single query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeStatus {
    /// Confirmed member that passed the sentry qualification.
    Sentry,
    /// Confirmed member below the sentry threshold.
    Member,
    /// Identity only known from sandbox data.
    Pending,
}

impl fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sentry => write!(f, "sentry"),
            Self::Member => write!(f, "member"),
            Self::Pending => write!(f, "pending"),
        }
    }
}

/// Which way certification chains are followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    /// Chains start at the target and end at each member.
    TargetToMember,
    /// Chains start at each member and end at the target.
    #[default]
    MemberToTarget,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TargetToMember => write!(f, "target-to-member"),
            Self::MemberToTarget => write!(f, "member-to-target"),
        }
    }
}

impl FromStr for Direction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "target-to-member" | "from" => Ok(Self::TargetToMember),
            "member-to-target" | "to" => Ok(Self::MemberToTarget),
            other => Err(CoreError::InvalidDirection(other.to_string())),
        }
    }
}

/// Whether an identity is part of the confirmed graph or only pending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IdentityStatus {
    /// Written into the confirmed graph under `node`.
    Confirmed { node: NodeId },
    /// Waiting in the sandbox.
    Pending,
}

/// An identity as known by the identity/certification store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRecord {
    /// Display key (uid). Pending homonyms carry a `[n]` suffix once listed
    /// through a pending directory.
    pub uid: String,
    /// Public key of the identity owner.
    pub pubkey: String,
    /// Content hash of the identity document.
    pub hash: String,
    pub status: IdentityStatus,
}

impl IdentityRecord {
    /// Build a confirmed identity bound to a graph node.
    pub fn confirmed(
        uid: impl Into<String>,
        pubkey: impl Into<String>,
        hash: impl Into<String>,
        node: NodeId,
    ) -> Self {
        Self {
            uid: uid.into(),
            pubkey: pubkey.into(),
            hash: hash.into(),
            status: IdentityStatus::Confirmed { node },
        }
    }

    /// Build a pending (sandbox) identity.
    pub fn pending(
        uid: impl Into<String>,
        pubkey: impl Into<String>,
        hash: impl Into<String>,
    ) -> Self {
        Self {
            uid: uid.into(),
            pubkey: pubkey.into(),
            hash: hash.into(),
            status: IdentityStatus::Pending,
        }
    }

    /// Node id in the confirmed graph, if any.
    pub fn node(&self) -> Option<NodeId> {
        match self.status {
            IdentityStatus::Confirmed { node } => Some(node),
            IdentityStatus::Pending => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.status, IdentityStatus::Pending)
    }

    /// True if `key` designates this identity by uid or public key.
    pub fn matches_key(&self, key: &str) -> bool {
        self.uid == key || self.pubkey == key
    }
}

/// A certification waiting in the sandbox.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PendingCertification {
    /// Public key of the certifier.
    pub from: String,
    /// Content hash of the certified identity.
    pub to: String,
}

/// Aggregate state of the network at the current head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkHead {
    pub members_count: u64,
    /// Protocol version of the head block.
    pub version: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_parse() {
        assert_eq!(
            "member-to-target".parse::<Direction>().unwrap(),
            Direction::MemberToTarget
        );
        assert_eq!(
            "target-to-member".parse::<Direction>().unwrap(),
            Direction::TargetToMember
        );
        assert_eq!("to".parse::<Direction>().unwrap(), Direction::MemberToTarget);
        assert!(matches!(
            "sideways".parse::<Direction>(),
            Err(CoreError::InvalidDirection(_))
        ));
    }

    #[test]
    fn test_direction_display_roundtrip() {
        for d in [Direction::TargetToMember, Direction::MemberToTarget] {
            assert_eq!(d.to_string().parse::<Direction>().unwrap(), d);
        }
    }

    #[test]
    fn test_direction_default() {
        assert_eq!(Direction::default(), Direction::MemberToTarget);
    }

    #[test]
    fn test_identity_record_status() {
        let confirmed = IdentityRecord::confirmed("alice", "PUBA", "HASHA", NodeId(3));
        assert_eq!(confirmed.node(), Some(NodeId(3)));
        assert!(!confirmed.is_pending());

        let pending = IdentityRecord::pending("bob", "PUBB", "HASHB");
        assert_eq!(pending.node(), None);
        assert!(pending.is_pending());
    }

    #[test]
    fn test_identity_matches_key() {
        let idty = IdentityRecord::confirmed("alice", "PUBA", "HASHA", NodeId(0));
        assert!(idty.matches_key("alice"));
        assert!(idty.matches_key("PUBA"));
        assert!(!idty.matches_key("Alice"));
        assert!(!idty.matches_key("HASHA"));
    }

    #[test]
    fn test_identity_status_serde_tag() {
        let idty = IdentityRecord::confirmed("alice", "PUBA", "HASHA", NodeId(7));
        let json = serde_json::to_value(&idty).unwrap();
        assert_eq!(json["status"]["kind"], "confirmed");
        assert_eq!(json["status"]["node"], 7);

        let back: IdentityRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, idty);
    }

    #[test]
    fn test_node_id_display() {
        assert_eq!(NodeId(12).to_string(), "#12");
        assert_eq!(NodeId(12).index(), 12);
    }
}
