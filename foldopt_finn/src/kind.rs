//! FINN node kinds and the folding parameters each one declares

use crate::attributes::{get_by_name, NodeAttributes};
use std::fmt;

/// A folding parameter of a FINN node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoldingParameter {
    /// Input-side parallelism
    Simd,
    /// Output-side parallelism (processing elements)
    Pe,
}

impl FoldingParameter {
    /// Attribute name the parameter is stored under
    pub fn attribute_name(&self) -> &'static str {
        match self {
            FoldingParameter::Simd => "SIMD",
            FoldingParameter::Pe => "PE",
        }
    }
}

impl fmt::Display for FoldingParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.attribute_name())
    }
}

/// Which folding parameters a node accepts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FoldingCapabilities {
    pub simd: bool,
    pub pe: bool,
}

impl FoldingCapabilities {
    pub const NONE: FoldingCapabilities = FoldingCapabilities { simd: false, pe: false };
    pub const SIMD: FoldingCapabilities = FoldingCapabilities { simd: true, pe: false };
    pub const PE: FoldingCapabilities = FoldingCapabilities { simd: false, pe: true };
    pub const BOTH: FoldingCapabilities = FoldingCapabilities { simd: true, pe: true };

    /// Capabilities from the parameters actually present in an attribute collection
    pub fn probe(attributes: &NodeAttributes) -> Self {
        Self {
            simd: get_by_name(attributes, FoldingParameter::Simd.attribute_name()).is_some(),
            pe: get_by_name(attributes, FoldingParameter::Pe.attribute_name()).is_some(),
        }
    }

    pub fn supports(&self, parameter: FoldingParameter) -> bool {
        match parameter {
            FoldingParameter::Simd => self.simd,
            FoldingParameter::Pe => self.pe,
        }
    }
}

/// Closed set of FINN dataflow layer kinds
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FinnNodeKind {
    MatrixVectorActivation,
    VectorVectorActivation,
    Thresholding,
    ChannelwiseOp,
    ConvolutionInputGenerator,
    FMPadding,
    StreamingMaxPool,
    Pool,
    GlobalAccPool,
    AddStreams,
    DuplicateStreams,
    LabelSelect,
    StreamingDataWidthConverter,
    StreamingFIFO,
    /// Any op type outside the known set
    Other(String),
}

impl FinnNodeKind {
    /// Resolve a kind from an ONNX op type
    ///
    /// Backend suffixes (`_hls`, `_rtl`) and the legacy `_Batch` suffix are ignored.
    pub fn from_op_type(op_type: &str) -> Self {
        let base = op_type
            .strip_suffix("_hls")
            .or_else(|| op_type.strip_suffix("_rtl"))
            .unwrap_or(op_type);
        let base = base.strip_suffix("_Batch").unwrap_or(base);

        match base {
            "MatrixVectorActivation" | "MVAU" => FinnNodeKind::MatrixVectorActivation,
            "VectorVectorActivation" | "VVAU" => FinnNodeKind::VectorVectorActivation,
            "Thresholding" => FinnNodeKind::Thresholding,
            "ChannelwiseOp" => FinnNodeKind::ChannelwiseOp,
            "ConvolutionInputGenerator" | "ConvolutionInputGenerator1D" => {
                FinnNodeKind::ConvolutionInputGenerator
            }
            "FMPadding" => FinnNodeKind::FMPadding,
            "StreamingMaxPool" => FinnNodeKind::StreamingMaxPool,
            "Pool" => FinnNodeKind::Pool,
            "GlobalAccPool" => FinnNodeKind::GlobalAccPool,
            "AddStreams" => FinnNodeKind::AddStreams,
            "DuplicateStreams" => FinnNodeKind::DuplicateStreams,
            "LabelSelect" => FinnNodeKind::LabelSelect,
            "StreamingDataWidthConverter" => FinnNodeKind::StreamingDataWidthConverter,
            "StreamingFIFO" => FinnNodeKind::StreamingFIFO,
            _ => FinnNodeKind::Other(op_type.to_string()),
        }
    }

    /// Folding parameters the kind declares, `None` for unknown kinds
    pub fn declared_capabilities(&self) -> Option<FoldingCapabilities> {
        let caps = match self {
            FinnNodeKind::MatrixVectorActivation | FinnNodeKind::VectorVectorActivation => {
                FoldingCapabilities::BOTH
            }
            FinnNodeKind::ConvolutionInputGenerator | FinnNodeKind::FMPadding => {
                FoldingCapabilities::SIMD
            }
            FinnNodeKind::Thresholding
            | FinnNodeKind::ChannelwiseOp
            | FinnNodeKind::StreamingMaxPool
            | FinnNodeKind::Pool
            | FinnNodeKind::GlobalAccPool
            | FinnNodeKind::AddStreams
            | FinnNodeKind::DuplicateStreams
            | FinnNodeKind::LabelSelect => FoldingCapabilities::PE,
            FinnNodeKind::StreamingDataWidthConverter | FinnNodeKind::StreamingFIFO => {
                FoldingCapabilities::NONE
            }
            FinnNodeKind::Other(_) => return None,
        };
        Some(caps)
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, FinnNodeKind::Other(_))
    }
}

impl fmt::Display for FinnNodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FinnNodeKind::Other(op_type) => write!(f, "Other({})", op_type),
            known => write!(f, "{:?}", known),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_op_type_strips_suffixes() {
        assert_eq!(
            FinnNodeKind::from_op_type("MVAU_hls"),
            FinnNodeKind::MatrixVectorActivation
        );
        assert_eq!(
            FinnNodeKind::from_op_type("ConvolutionInputGenerator_rtl"),
            FinnNodeKind::ConvolutionInputGenerator
        );
        assert_eq!(
            FinnNodeKind::from_op_type("Thresholding_Batch"),
            FinnNodeKind::Thresholding
        );
        assert_eq!(
            FinnNodeKind::from_op_type("StreamingFIFO"),
            FinnNodeKind::StreamingFIFO
        );
    }

    #[test]
    fn test_unknown_op_type_keeps_name() {
        let kind = FinnNodeKind::from_op_type("Conv");
        assert_eq!(kind, FinnNodeKind::Other("Conv".to_string()));
        assert!(!kind.is_known());
        assert_eq!(kind.declared_capabilities(), None);
        assert_eq!(kind.to_string(), "Other(Conv)");
    }

    #[test]
    fn test_declared_capabilities() {
        assert_eq!(
            FinnNodeKind::MatrixVectorActivation.declared_capabilities(),
            Some(FoldingCapabilities::BOTH)
        );
        assert_eq!(
            FinnNodeKind::FMPadding.declared_capabilities(),
            Some(FoldingCapabilities::SIMD)
        );
        assert_eq!(
            FinnNodeKind::LabelSelect.declared_capabilities(),
            Some(FoldingCapabilities::PE)
        );
        assert_eq!(
            FinnNodeKind::StreamingDataWidthConverter.declared_capabilities(),
            Some(FoldingCapabilities::NONE)
        );
    }

    #[test]
    fn test_probe() {
        let attrs = NodeAttributes::new().with("PE", 1usize).with("NumChannels", 64usize);
        let caps = FoldingCapabilities::probe(&attrs);
        assert_eq!(caps, FoldingCapabilities::PE);
        assert!(caps.supports(FoldingParameter::Pe));
        assert!(!caps.supports(FoldingParameter::Simd));
    }
}
