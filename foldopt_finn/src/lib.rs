//! # foldopt FINN backend
//!
//! Exposes FINN dataflow layers to the foldopt optimiser.
//!
//! - **Attributes**: the named attribute collection of a FINN node
//! - **Kinds**: the closed set of FINN layer kinds and their folding parameters
//! - **Custom ops**: the [`AcceleratorNode`] capabilities foldopt relies on
//! - **Wrapper**: [`FinnNodeWrapper`], the optimiser node over a FINN custom op
//!
//! # Example
//!
//! ```rust,ignore
//! use foldopt_core::Node;
//! use foldopt_finn::{share, FinnNodeWrapper};
//!
//! let mvau = share(load_mvau()?);
//! let mut node = FinnNodeWrapper::new(mvau.clone(), 64, 32);
//! node.set_channel_in_folding(4);
//! node.set_channel_out_folding(2);
//! node.update()?;  // SIMD = 4, PE = 2
//!
//! let cycles = node.latency_in(false)?;
//! let usage = node.resource()?;
//! ```

pub mod attributes;
pub mod custom_op;
pub mod kind;
pub mod wrapper;

pub use attributes::{get_by_name, AttributeValue, NodeAttributes};
pub use custom_op::{share, AcceleratorNode, OnnxNode, SharedNode};
pub use kind::{FinnNodeKind, FoldingCapabilities, FoldingParameter};
pub use wrapper::FinnNodeWrapper;
