//! In-memory ancestry graph for Geode commit history.
//!
//! [`AncestryGraph`] is the substrate that history algorithms (topological
//! ordering, merge-base computation, reachability pruning) traverse. It does
//! not implement those algorithms itself; it provides nodes keyed by
//! [`ObjectId`], directed edges navigable in both directions, root marking,
//! and sparse per-node string properties.
//!
//! The graph is a private, single-owner mutable structure. Concurrent
//! mutation is out of contract; callers serialize writes or snapshot.
//!
//! [`ObjectId`]: geode_types::ObjectId

pub mod graph;

pub use graph::{AncestryGraph, EdgeId, NodeId};
