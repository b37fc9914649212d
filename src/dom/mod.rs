//! Page DOM: slotmap-backed node arena, queries, and the gallery [`Page`].

pub mod node;
pub mod page;
pub mod query;
pub mod tree;

pub use node::{NodeData, NodeId};
pub use page::Page;
pub use tree::Dom;
