//! # foldopt Core
//!
//! The optimisation-graph side of the foldopt dataflow optimiser.
//!
//! Every layer of a dataflow accelerator is represented in the optimiser by a
//! [`Node`]. The optimiser assigns folding factors to nodes and reads back
//! latency and resource estimates; backend crates implement [`Node`] over their
//! own hardware models.
//!
//! - **Nodes**: the `update` / `latency_in` / `latency_out` / `resource` contract
//! - **Folding**: [`FoldingFactors`] and the divisibility check the optimiser uses
//! - **Config**: TOML/YAML configuration of adapters and per-node folding
//!
//! ## Quick Start
//!
//! ```rust
//! use foldopt_core::{FoldingFactors, FoldoptResult, Node, ResourceUsage};
//!
//! struct PassThrough {
//!     folding: FoldingFactors,
//! }
//!
//! impl Node for PassThrough {
//!     fn name(&self) -> &str { "pass_through" }
//!     fn channels_in(&self) -> usize { 8 }
//!     fn channels_out(&self) -> usize { 8 }
//!     fn folding(&self) -> FoldingFactors { self.folding }
//!     fn set_folding(&mut self, folding: FoldingFactors) { self.folding = folding; }
//!     fn update(&mut self) -> FoldoptResult<()> { Ok(()) }
//!     fn latency_in(&self, _eval: bool) -> FoldoptResult<u64> { Ok(8) }
//!     fn latency_out(&self, _eval: bool) -> FoldoptResult<u64> { Ok(8) }
//!     fn resource(&self) -> FoldoptResult<ResourceUsage> { Ok(ResourceUsage::default()) }
//! }
//! ```

pub mod config;
pub mod core;
pub mod error;

// Re-export commonly used types for easy access
pub use crate::core::{FoldingFactors, Node, ResourceUsage};
pub use config::{AdapterConfig, FoldoptConfig, MissingParameterPolicy, NodeFoldingConfig};
pub use error::{FoldoptError, FoldoptResult};
