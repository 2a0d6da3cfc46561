//! Graph projection and traversal.
//!
//! [`build_flow_graph`] turns a [`Flow`](crate::dsl::Flow) into a petgraph
//! graph for reachability and cycle checks; [`select_next_node`] picks the
//! outgoing edge the executor follows.

pub mod builder;
pub mod traversal;
pub mod types;

pub use builder::*;
pub use traversal::select_next_node;
pub use types::*;
