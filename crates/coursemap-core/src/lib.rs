//! Coursemap Core — merged curriculum graph model, edge registry, and layout engine

pub mod model;
pub mod decorate;
pub mod pool;
pub mod registry;
pub mod layout;
pub mod output;
pub mod error;


#[cfg(test)]
pub mod test_utils;

pub use model::{RawNode, RawLink, RawGraph, Node, Link, Edge, LaidOutNode, MergedGraph, RESERVED_FIELDS};
pub use decorate::{decorate_nodes, decorate_links, namespaced_id};
pub use pool::NodePool;
pub use registry::{EdgeRegistry, Insertion, canonical_pair};
pub use layout::{LayoutConfig, Placement, compute_layout, layout_nodes};
pub use output::{to_json_string, write_graph};
pub use error::OutputError;
