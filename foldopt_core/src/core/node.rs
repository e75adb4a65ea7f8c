use crate::error::{FoldoptError, FoldoptResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Input-side and output-side folding factors of a node
///
/// A factor of `k` on a port of `c` channels means `k` channels are processed in
/// parallel and the port is time-multiplexed `c / k` times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FoldingFactors {
    pub channel_in_folding: usize,
    pub channel_out_folding: usize,
}

impl FoldingFactors {
    pub fn new(channel_in_folding: usize, channel_out_folding: usize) -> Self {
        Self {
            channel_in_folding,
            channel_out_folding,
        }
    }

    /// Check that both factors are positive and divide the channel counts
    ///
    /// Adapters never call this: choosing legal factors is the optimiser's job.
    pub fn validate(
        &self,
        node: &str,
        channels_in: usize,
        channels_out: usize,
    ) -> FoldoptResult<()> {
        check_factor(node, "channel_in_folding", self.channel_in_folding, channels_in)?;
        check_factor(node, "channel_out_folding", self.channel_out_folding, channels_out)
    }

    /// Every legal folding factor for a port of `channels` channels, ascending
    pub fn candidates(channels: usize) -> Vec<usize> {
        (1..=channels).filter(|k| channels % k == 0).collect()
    }
}

impl Default for FoldingFactors {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl fmt::Display for FoldingFactors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.channel_in_folding, self.channel_out_folding)
    }
}

fn check_factor(node: &str, field: &str, factor: usize, channels: usize) -> FoldoptResult<()> {
    if factor == 0 {
        return Err(FoldoptError::InvalidFolding {
            node: node.to_string(),
            reason: format!("{} must be positive", field),
        });
    }
    if channels % factor != 0 {
        return Err(FoldoptError::InvalidFolding {
            node: node.to_string(),
            reason: format!("{} = {} does not divide {} channels", field, factor, channels),
        });
    }
    Ok(())
}

/// FPGA resource estimate of a single node
///
/// Serialises with the vendor key names, so the report always has exactly the
/// keys `LUT`, `DSP`, `BRAM` and `FF`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceUsage {
    #[serde(rename = "LUT")]
    pub lut: u64,
    #[serde(rename = "DSP")]
    pub dsp: u64,
    #[serde(rename = "BRAM")]
    pub bram: u64,
    #[serde(rename = "FF")]
    pub ff: u64,
}

impl ResourceUsage {
    pub const KEYS: [&'static str; 4] = ["LUT", "DSP", "BRAM", "FF"];

    pub fn new(lut: u64, dsp: u64, bram: u64, ff: u64) -> Self {
        Self { lut, dsp, bram, ff }
    }

    /// Look up one resource by its vendor key
    pub fn get(&self, key: &str) -> Option<u64> {
        match key {
            "LUT" => Some(self.lut),
            "DSP" => Some(self.dsp),
            "BRAM" => Some(self.bram),
            "FF" => Some(self.ff),
            _ => None,
        }
    }

    /// Key -> amount mapping with exactly the four vendor keys
    pub fn to_map(&self) -> BTreeMap<&'static str, u64> {
        Self::KEYS
            .iter()
            .filter_map(|key| self.get(key).map(|value| (*key, value)))
            .collect()
    }
}

/// Saturates at `u64::MAX` instead of overflowing
impl std::ops::Add for ResourceUsage {
    type Output = ResourceUsage;

    fn add(self, other: ResourceUsage) -> ResourceUsage {
        ResourceUsage {
            lut: self.lut.saturating_add(other.lut),
            dsp: self.dsp.saturating_add(other.dsp),
            bram: self.bram.saturating_add(other.bram),
            ff: self.ff.saturating_add(other.ff),
        }
    }
}

impl std::iter::Sum for ResourceUsage {
    fn sum<I: Iterator<Item = ResourceUsage>>(iter: I) -> Self {
        iter.fold(ResourceUsage::default(), |acc, r| acc + r)
    }
}

impl fmt::Display for ResourceUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LUT={} DSP={} BRAM={} FF={}",
            self.lut, self.dsp, self.bram, self.ff
        )
    }
}

/// Contract every node of the optimisation graph implements
///
/// The optimiser proposes folding factors through [`Node::set_folding`], pushes
/// them into the backing hardware model with [`Node::update`], then queries
/// latency and resources to score the proposal.
pub trait Node: Send {
    /// Get the node's name (unique within a graph)
    fn name(&self) -> &str;

    /// Width of the input port, fixed at construction
    fn channels_in(&self) -> usize;

    /// Width of the output port, fixed at construction
    fn channels_out(&self) -> usize;

    /// Folding factors currently assigned to the node
    fn folding(&self) -> FoldingFactors;

    /// Assign new folding factors (not yet forwarded to the hardware model)
    fn set_folding(&mut self, folding: FoldingFactors);

    /// Forward the current folding factors into the hardware model
    fn update(&mut self) -> FoldoptResult<()>;

    /// Cycles before the node can accept its next input
    ///
    /// `eval` selects an evaluation-grade estimate for adapters that offer one.
    fn latency_in(&self, eval: bool) -> FoldoptResult<u64>;

    /// Cycles before the node produces its next output
    fn latency_out(&self, eval: bool) -> FoldoptResult<u64>;

    /// Resource estimate at the current folding
    fn resource(&self) -> FoldoptResult<ResourceUsage>;

    /// Worst of the input and output latencies
    fn latency(&self) -> FoldoptResult<u64> {
        Ok(self.latency_in(false)?.max(self.latency_out(false)?))
    }
}
