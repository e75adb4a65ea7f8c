//! Optimiser node backed by a FINN custom op
//!
//! [`FinnNodeWrapper`] maps the optimiser's folding factors onto the FINN
//! `SIMD` (input side) and `PE` (output side) attributes, and reports the FINN
//! node's own cycle and resource estimates.

use crate::attributes::AttributeValue;
use crate::custom_op::{AcceleratorNode, SharedNode};
use crate::kind::{FinnNodeKind, FoldingCapabilities, FoldingParameter};
use foldopt_core::config::{FoldoptConfig, MissingParameterPolicy, NodeFoldingConfig};
use foldopt_core::error::{FoldoptError, FoldoptResult};
use foldopt_core::{FoldingFactors, Node, ResourceUsage};

/// Adapter exposing one FINN node through the optimiser [`Node`] contract
pub struct FinnNodeWrapper<N: AcceleratorNode> {
    node: SharedNode<N>,
    name: String,
    kind: FinnNodeKind,
    capabilities: FoldingCapabilities,

    channels_in: usize,
    channels_out: usize,
    channel_in_folding: usize,
    channel_out_folding: usize,

    missing_parameter: MissingParameterPolicy,
}

impl<N: AcceleratorNode> FinnNodeWrapper<N> {
    /// Wrap a node with the given port widths
    ///
    /// Folding starts at (1, 1). The node's folding capabilities are read from
    /// its attributes now; [`Node::update`] re-reads them before writing.
    pub fn new(node: SharedNode<N>, channels_in: usize, channels_out: usize) -> Self {
        let (name, kind, capabilities) = {
            let guard = node.read();
            let onnx = guard.onnx_node();
            (
                onnx.name.clone(),
                onnx.kind(),
                FoldingCapabilities::probe(&onnx.attribute),
            )
        };
        log_capability_mismatch(&name, &kind, capabilities);

        Self {
            node,
            name,
            kind,
            capabilities,
            channels_in,
            channels_out,
            channel_in_folding: 1,
            channel_out_folding: 1,
            missing_parameter: MissingParameterPolicy::default(),
        }
    }

    /// Wrap a node and apply the adapter policy and any folding listed for it
    pub fn from_config(
        node: SharedNode<N>,
        channels_in: usize,
        channels_out: usize,
        config: &FoldoptConfig,
    ) -> Self {
        let mut wrapper =
            Self::new(node, channels_in, channels_out).with_policy(config.adapter.missing_parameter);
        if let Some(folding) = config.nodes.get(&wrapper.name) {
            wrapper.apply_config(folding);
        }
        wrapper
    }

    /// Set how [`Node::update`] treats a parameter the node does not carry
    pub fn with_policy(mut self, policy: MissingParameterPolicy) -> Self {
        self.missing_parameter = policy;
        self
    }

    pub fn policy(&self) -> MissingParameterPolicy {
        self.missing_parameter
    }

    /// Re-read the folding capabilities without forwarding any folding
    pub fn refresh_capabilities(&mut self) {
        self.capabilities = FoldingCapabilities::probe(&self.node.read().onnx_node().attribute);
        log_capability_mismatch(&self.name, &self.kind, self.capabilities);
    }

    pub fn capabilities(&self) -> FoldingCapabilities {
        self.capabilities
    }

    pub fn kind(&self) -> &FinnNodeKind {
        &self.kind
    }

    /// Shared handle to the wrapped node
    pub fn node(&self) -> &SharedNode<N> {
        &self.node
    }

    pub fn channel_in_folding(&self) -> usize {
        self.channel_in_folding
    }

    pub fn channel_out_folding(&self) -> usize {
        self.channel_out_folding
    }

    pub fn set_channel_in_folding(&mut self, folding: usize) {
        self.channel_in_folding = folding;
    }

    pub fn set_channel_out_folding(&mut self, folding: usize) {
        self.channel_out_folding = folding;
    }

    /// Take the folding from a config entry (forwarded on the next update)
    pub fn apply_config(&mut self, config: &NodeFoldingConfig) {
        self.set_folding(config.folding());
    }

    fn write_parameter(
        &self,
        node: &mut N,
        parameter: FoldingParameter,
        value: usize,
    ) -> FoldoptResult<()> {
        node.set_nodeattr(parameter.attribute_name(), AttributeValue::from(value))?;
        log::debug!("[{}] {} <- {}", self.name, parameter, value);
        Ok(())
    }
}

fn log_capability_mismatch(name: &str, kind: &FinnNodeKind, found: FoldingCapabilities) {
    if let Some(declared) = kind.declared_capabilities() {
        if declared != found {
            log::debug!(
                "[{}] {} declares {:?} but carries {:?}",
                name,
                kind,
                declared,
                found
            );
        }
    }
}

impl<N: AcceleratorNode> Node for FinnNodeWrapper<N> {
    fn name(&self) -> &str {
        &self.name
    }

    fn channels_in(&self) -> usize {
        self.channels_in
    }

    fn channels_out(&self) -> usize {
        self.channels_out
    }

    fn folding(&self) -> FoldingFactors {
        FoldingFactors::new(self.channel_in_folding, self.channel_out_folding)
    }

    fn set_folding(&mut self, folding: FoldingFactors) {
        self.channel_in_folding = folding.channel_in_folding;
        self.channel_out_folding = folding.channel_out_folding;
    }

    fn update(&mut self) -> FoldoptResult<()> {
        let mut node = self.node.write();

        // Presence is re-read under the guard: the graph owner may have edited the node
        let present = FoldingCapabilities::probe(&node.onnx_node().attribute);
        if present != self.capabilities {
            log_capability_mismatch(&self.name, &self.kind, present);
            self.capabilities = present;
        }

        let writes = [
            (FoldingParameter::Simd, self.channel_in_folding),
            (FoldingParameter::Pe, self.channel_out_folding),
        ];

        for (parameter, _) in writes.iter().filter(|(p, _)| !present.supports(*p)) {
            match self.missing_parameter {
                MissingParameterPolicy::Skip => {}
                MissingParameterPolicy::Warn => {
                    log::warn!("[{}] no {} parameter, skipping write", self.name, parameter);
                }
                MissingParameterPolicy::Error => {
                    return Err(FoldoptError::MissingParameter {
                        node: self.name.clone(),
                        parameter: parameter.to_string(),
                    });
                }
            }
        }

        // Check every target type first so a rejected write leaves the node untouched
        for (parameter, value) in writes.iter().filter(|(p, _)| present.supports(*p)) {
            let value = AttributeValue::from(*value);
            if let Some(existing) = node.get_nodeattr(parameter.attribute_name()) {
                if !existing.same_type(&value) {
                    return Err(FoldoptError::attribute(format!(
                        "Attribute '{}' of node '{}' is {}, got {}",
                        parameter,
                        self.name,
                        existing.type_name(),
                        value.type_name()
                    )));
                }
            }
        }

        for (parameter, value) in writes.iter().filter(|(p, _)| present.supports(*p)) {
            self.write_parameter(&mut node, *parameter, *value)?;
        }
        Ok(())
    }

    fn latency_in(&self, _eval: bool) -> FoldoptResult<u64> {
        self.node.read().get_exp_cycles()
    }

    fn latency_out(&self, _eval: bool) -> FoldoptResult<u64> {
        self.node.read().get_exp_cycles()
    }

    fn resource(&self) -> FoldoptResult<ResourceUsage> {
        let node = self.node.read();
        Ok(ResourceUsage {
            lut: node.lut_estimation()?,
            dsp: node.dsp_estimation()?,
            bram: node.bram_estimation()?,
            // FINN does not model flip-flops
            ff: 0,
        })
    }
}
