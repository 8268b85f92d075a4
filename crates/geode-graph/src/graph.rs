//! The arena-backed ancestry graph.
//!
//! Nodes and edges live in two flat arenas addressed by [`NodeId`] and
//! [`EdgeId`] handles; each node stores index lists into the edge arena
//! rather than owning its neighbors, so the bidirectional node/edge
//! relationship involves no reference cycles and the whole graph is
//! relocatable and serializable as plain data.
//!
//! # Invariants
//!
//! - Node identity is the [`ObjectId`]: [`upsert`] deduplicates, so one id
//!   maps to exactly one [`NodeId`] for the graph's lifetime.
//! - An edge appears in its source's outgoing list and its destination's
//!   incoming list, always both.
//! - Duplicate edges between the same pair are not rejected; idempotency is
//!   the caller's responsibility.
//!
//! [`upsert`]: AncestryGraph::upsert

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use geode_types::ObjectId;

/// Handle to a node in an [`AncestryGraph`].
///
/// Only valid for the graph that produced it; using it against another
/// graph is a programming error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(u32);

/// Handle to an edge in an [`AncestryGraph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeId(u32);

#[derive(Clone, Debug, Serialize, Deserialize)]
struct NodeSlot {
    id: ObjectId,
    /// Edges arriving at this node.
    incoming: Vec<EdgeId>,
    /// Edges leaving this node.
    outgoing: Vec<EdgeId>,
    root: bool,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
struct EdgeSlot {
    src: NodeId,
    dst: NodeId,
}

/// A mutable, in-memory directed graph over nodes keyed by [`ObjectId`].
///
/// Built incrementally as commit ancestry is walked: [`upsert`] registers a
/// node per commit id, [`connect`] records a parent link, and the `to` /
/// `from` iterators answer one-hop reachability in either direction.
///
/// [`upsert`]: AncestryGraph::upsert
/// [`connect`]: AncestryGraph::connect
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AncestryGraph {
    nodes: Vec<NodeSlot>,
    edges: Vec<EdgeSlot>,
    index: HashMap<ObjectId, NodeId>,
    /// Side table of per-node properties, populated on first write only.
    props: HashMap<NodeId, HashMap<String, String>>,
}

impl AncestryGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    // ---------------------------------------------------------------
    // Node registration and lookup
    // ---------------------------------------------------------------

    /// Return the node for `id`, creating and registering it if absent.
    ///
    /// Upserting the same id twice returns the same handle.
    pub fn upsert(&mut self, id: ObjectId) -> NodeId {
        if let Some(&node) = self.index.get(&id) {
            return node;
        }
        let node = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeSlot {
            id,
            incoming: Vec::new(),
            outgoing: Vec::new(),
            root: false,
        });
        self.index.insert(id, node);
        debug!(id = %id.short_hex(), "registered graph node");
        node
    }

    /// Look up the node for `id` without creating it.
    pub fn lookup(&self, id: &ObjectId) -> Option<NodeId> {
        self.index.get(id).copied()
    }

    /// Returns `true` if a node for `id` is registered.
    pub fn contains(&self, id: &ObjectId) -> bool {
        self.index.contains_key(id)
    }

    /// The object id a node was registered under.
    pub fn object_id(&self, node: NodeId) -> ObjectId {
        self.slot(node).id
    }

    /// All registered node handles, in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len() as u32).map(NodeId)
    }

    // ---------------------------------------------------------------
    // Edges
    // ---------------------------------------------------------------

    /// Create a directed edge from `src` to `dst`.
    ///
    /// The edge is appended to `src`'s outgoing list and `dst`'s incoming
    /// list. Duplicate edges are not deduplicated here.
    pub fn connect(&mut self, src: NodeId, dst: NodeId) -> EdgeId {
        let edge = EdgeId(self.edges.len() as u32);
        self.edges.push(EdgeSlot { src, dst });
        self.nodes[src.0 as usize].outgoing.push(edge);
        self.nodes[dst.0 as usize].incoming.push(edge);
        debug!(
            src = %self.slot(src).id.short_hex(),
            dst = %self.slot(dst).id.short_hex(),
            "connected graph nodes"
        );
        edge
    }

    /// The nodes reachable from `node` via one outgoing hop, in edge
    /// insertion order. Lazy; nothing is materialized.
    pub fn to(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.slot(node)
            .outgoing
            .iter()
            .map(move |&e| self.edges[e.0 as usize].dst)
    }

    /// The nodes related to `node` via one incoming hop, in edge insertion
    /// order.
    pub fn from(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.slot(node)
            .incoming
            .iter()
            .map(move |&e| self.edges[e.0 as usize].src)
    }

    // ---------------------------------------------------------------
    // Root marking
    // ---------------------------------------------------------------

    /// Mark or unmark `node` as an ancestry root (e.g. an initial commit).
    ///
    /// A caller-set flag; the graph does not derive or enforce it
    /// structurally.
    pub fn set_root(&mut self, node: NodeId, root: bool) {
        self.nodes[node.0 as usize].root = root;
    }

    /// Returns `true` if `node` is marked as a root.
    pub fn is_root(&self, node: NodeId) -> bool {
        self.slot(node).root
    }

    /// All nodes currently marked as roots, in insertion order.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.node_ids().filter(|&n| self.slot(n).root)
    }

    // ---------------------------------------------------------------
    // Sparse properties
    // ---------------------------------------------------------------

    /// Attach a string property to a node.
    ///
    /// The node's property map is allocated on first write; nodes that
    /// never receive a property cost nothing here.
    pub fn put(&mut self, node: NodeId, key: impl Into<String>, value: impl Into<String>) {
        self.props
            .entry(node)
            .or_default()
            .insert(key.into(), value.into());
    }

    /// Read a property of a node, if set.
    pub fn property(&self, node: NodeId, key: &str) -> Option<&str> {
        self.props
            .get(&node)
            .and_then(|map| map.get(key))
            .map(String::as_str)
    }

    fn slot(&self, node: NodeId) -> &NodeSlot {
        &self.nodes[node.0 as usize]
    }
}
