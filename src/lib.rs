//! Graph analysis and layout engine for social network data.
//!
//! The crate owns three independent pieces: the mutable graph model with
//! its similarity-derived edge weights ([`model`]), a family of analysis
//! algorithms behind one dispatch point ([`algo`]), and a force-directed
//! layout solver that repositions nodes in place ([`physics`]). Rendering,
//! input handling, and file formats are the embedder's business; the
//! engine only exchanges plain serializable records.

pub mod algo;
pub mod model;
pub mod physics;
pub mod util;

pub use algo::{
    AlgorithmKind, AlgorithmOutput, AlgorithmParams, AlgorithmResult, CentralityEntry, TraceStep,
    run,
};
pub use model::{
    DEFAULT_COLOR, Edge, EdgeRecord, Graph, GraphError, GraphRecord, GraphStats, Node, NodeId,
    NodeRecord, NodeUpdate,
};
pub use physics::{ForceDirectedLayout, LayoutConfig};
