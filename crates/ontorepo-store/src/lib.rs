//! # ontorepo-store
//!
//! Identity-preserving node table and quad store:
//! interning of nodes into [`NodeId`] handles, indexed quad storage with
//! pattern queries, and a change channel that [`ChangeListener`]s
//! subscribe to.

pub mod index;
pub mod node;
pub mod quad;
pub mod store;

pub use index::QuadIndex;
pub use node::{NodeId, NodeTable};
pub use quad::{Changeset, Quad, QuadPattern};
pub use store::{BlankScope, ChangeListener, Position, Store, StoreError};
