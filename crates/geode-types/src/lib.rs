//! Foundation types for Geode.
//!
//! This crate provides the core identifier, spatial, and path types used
//! throughout the Geode system. Every other Geode crate depends on
//! `geode-types`.
//!
//! # Key Types
//!
//! - [`ObjectId`] -- content-addressed identifier (BLAKE3 hash)
//! - [`Extent`] -- 2-D bounding extent used for spatial pruning
//! - [`path`] -- validation and manipulation of slash-separated tree paths

pub mod error;
pub mod extent;
pub mod object;
pub mod path;

pub use error::TypeError;
pub use extent::Extent;
pub use object::ObjectId;
