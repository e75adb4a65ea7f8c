pub mod node;

pub use node::{FoldingFactors, Node, ResourceUsage};
