use crate::attributes::{AttributeValue, NodeAttributes};
use crate::kind::FinnNodeKind;
use foldopt_core::error::{FoldoptError, FoldoptResult};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Graph-level record of a FINN layer: name, op type and attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnnxNode {
    pub name: String,
    pub op_type: String,
    #[serde(default)]
    pub attribute: NodeAttributes,
}

impl OnnxNode {
    pub fn new(name: &str, op_type: &str, attribute: NodeAttributes) -> Self {
        Self {
            name: name.to_string(),
            op_type: op_type.to_string(),
            attribute,
        }
    }

    pub fn kind(&self) -> FinnNodeKind {
        FinnNodeKind::from_op_type(&self.op_type)
    }
}

/// Capabilities foldopt needs from a FINN custom op
///
/// Implementors own the estimation models; foldopt only reads their results and
/// writes folding parameters through [`AcceleratorNode::set_nodeattr`].
pub trait AcceleratorNode: Send + Sync {
    fn onnx_node(&self) -> &OnnxNode;

    fn onnx_node_mut(&mut self) -> &mut OnnxNode;

    /// Set a named attribute
    ///
    /// An attribute that already exists keeps its type; writing a value of a
    /// different type is an error.
    fn set_nodeattr(&mut self, name: &str, value: AttributeValue) -> FoldoptResult<()> {
        let node = self.onnx_node_mut();
        if let Some(existing) = node.attribute.get(name) {
            if !existing.same_type(&value) {
                return Err(FoldoptError::attribute(format!(
                    "Attribute '{}' of node '{}' is {}, got {}",
                    name,
                    node.name,
                    existing.type_name(),
                    value.type_name()
                )));
            }
        }
        node.attribute.set(name, value);
        Ok(())
    }

    /// Read a named attribute
    fn get_nodeattr(&self, name: &str) -> Option<AttributeValue> {
        self.onnx_node().attribute.get(name).cloned()
    }

    /// Expected clock cycles for one execution of the node
    fn get_exp_cycles(&self) -> FoldoptResult<u64>;

    fn lut_estimation(&self) -> FoldoptResult<u64>;

    fn dsp_estimation(&self) -> FoldoptResult<u64>;

    fn bram_estimation(&self) -> FoldoptResult<u64>;
}

/// Handle to a node owned by the surrounding design graph
pub type SharedNode<N> = Arc<RwLock<N>>;

/// Put a node behind a [`SharedNode`] handle
pub fn share<N: AcceleratorNode>(node: N) -> SharedNode<N> {
    Arc::new(RwLock::new(node))
}
