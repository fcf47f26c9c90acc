use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Prefix of the string form of a node id, shared with the host's element ids.
const ID_PREFIX: &str = "element-";

/// Identifier of a node in the document.
///
/// Allocated from a monotonically increasing counter and never reused within
/// a session. Displays as `element-<n>`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    pub const fn new(raw: u64) -> Self {
        NodeId(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    /// Whether an allocator that has seen this id can still allocate.
    pub const fn has_successor(self) -> bool {
        self.0 < u64::MAX
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{ID_PREFIX}{}", self.0)
    }
}

impl FromStr for NodeId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix(ID_PREFIX)
            .and_then(|n| n.parse::<u64>().ok())
            .map(NodeId)
            .ok_or_else(|| format!("invalid node id `{s}`"))
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Monotonic id source for a document.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    last: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id. The first id is `element-1`.
    ///
    /// Saturates at `u64::MAX`; snapshots carrying that id are rejected
    /// before they reach the allocator.
    pub fn next(&mut self) -> NodeId {
        self.last = self.last.saturating_add(1);
        NodeId(self.last)
    }

    pub fn reset(&mut self) {
        self.last = 0;
    }

    /// Make sure every id allocated from now on is strictly greater than `id`.
    pub fn advance_past(&mut self, id: NodeId) {
        self.last = self.last.max(id.0);
    }

    /// The most recently allocated (or restored) id value.
    pub fn last(&self) -> u64 {
        self.last
    }
}
