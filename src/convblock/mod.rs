//! Parameter accounting for vanilla vs. depthwise-separable conv blocks.
//!
//! A vanilla block is one k×k convolution followed by batch normalization. A
//! separable block replaces it with a depthwise k×k convolution (one filter
//! per input channel, channel multiplier 1) plus its batch norm, then a 1×1
//! pointwise convolution with its batch norm. Bias terms are never counted:
//! a convolution directly followed by batch norm conventionally omits them.
//!
//! Batch-norm parameters per channel depend on whether the two running
//! statistics are counted alongside the learnable scale and shift; the
//! [`BatchNorm`] convention makes that choice explicit and a single value is
//! applied to both blocks of any one comparison. The crate default is
//! [`BatchNorm::WithRunningStats`].

use crate::util::{DetPostError, DetPostResult};

/// Hyperparameters of one convolution block.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ConvBlockSpec {
    /// Spatial kernel size, odd (conventionally 3).
    pub kernel_size: u32,
    /// Channels entering the block.
    pub input_channels: u32,
    /// Channels leaving the block.
    pub output_channels: u32,
    /// Spatial stride (conventionally 2). Does not affect parameter counts.
    pub stride: u32,
}

impl ConvBlockSpec {
    /// Creates a spec, rejecting zero fields and even kernel sizes.
    pub fn new(
        kernel_size: u32,
        input_channels: u32,
        output_channels: u32,
        stride: u32,
    ) -> DetPostResult<Self> {
        for (field, value) in [
            ("kernel_size", kernel_size),
            ("input_channels", input_channels),
            ("output_channels", output_channels),
            ("stride", stride),
        ] {
            if value == 0 {
                return Err(DetPostError::NonPositiveField { field, value });
            }
        }
        if kernel_size % 2 == 0 {
            return Err(DetPostError::EvenKernel { kernel_size });
        }
        Ok(Self {
            kernel_size,
            input_channels,
            output_channels,
            stride,
        })
    }

    /// Creates a spec with the conventional kernel size 3 and stride 2.
    pub fn conventional(input_channels: u32, output_channels: u32) -> DetPostResult<Self> {
        Self::new(3, input_channels, output_channels, 2)
    }
}

/// Which batch-norm parameters are counted per channel.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum BatchNorm {
    /// Learnable scale and shift only: 2 parameters per channel.
    ScaleShift,
    /// Scale, shift, running mean, and running variance: 4 per channel.
    #[default]
    WithRunningStats,
}

impl BatchNorm {
    /// Parameters contributed by one batch-norm layer over `channels`.
    pub fn param_count(self, channels: u32) -> u64 {
        let per_channel = match self {
            BatchNorm::ScaleShift => 2,
            BatchNorm::WithRunningStats => 4,
        };
        per_channel * channels as u64
    }
}

fn checked_product(factors: [u64; 3], context: &'static str) -> DetPostResult<u64> {
    factors
        .iter()
        .try_fold(1u64, |acc, f| acc.checked_mul(*f))
        .ok_or(DetPostError::CountOverflow { context })
}

fn checked_sum(terms: [u64; 2], context: &'static str) -> DetPostResult<u64> {
    terms[0]
        .checked_add(terms[1])
        .ok_or(DetPostError::CountOverflow { context })
}

/// Trainable-parameter count of a vanilla conv + batch-norm block.
///
/// Counts are checked arithmetic: spec values whose product does not fit in
/// 64 bits yield `CountOverflow` instead of wrapping.
pub fn vanilla_param_count(spec: &ConvBlockSpec, convention: BatchNorm) -> DetPostResult<u64> {
    let k = spec.kernel_size as u64;
    // k * k cannot overflow u64 for a u32 kernel size.
    let weights = checked_product(
        [k * k, spec.input_channels as u64, spec.output_channels as u64],
        "vanilla convolution weights",
    )?;
    checked_sum(
        [weights, convention.param_count(spec.output_channels)],
        "vanilla block total",
    )
}

/// Parameter count of a depthwise + pointwise conv block with batch norms.
pub fn separable_param_count(spec: &ConvBlockSpec, convention: BatchNorm) -> DetPostResult<u64> {
    let k = spec.kernel_size as u64;
    let depthwise = checked_sum(
        [
            checked_product([k, k, spec.input_channels as u64], "depthwise weights")?,
            convention.param_count(spec.input_channels),
        ],
        "depthwise stage total",
    )?;
    let pointwise = checked_sum(
        [
            checked_product(
                [1, spec.input_channels as u64, spec.output_channels as u64],
                "pointwise weights",
            )?,
            convention.param_count(spec.output_channels),
        ],
        "pointwise stage total",
    )?;
    checked_sum([depthwise, pointwise], "separable block total")
}

/// How many times fewer parameters the separable block uses.
///
/// Guarded against a zero denominator even though `ConvBlockSpec` validation
/// makes that unreachable through the public constructors.
pub fn reduction_ratio(spec: &ConvBlockSpec, convention: BatchNorm) -> DetPostResult<f64> {
    let separable = separable_param_count(spec, convention)?;
    if separable == 0 {
        return Err(DetPostError::DivisionByZero {
            context: "separable parameter count",
        });
    }
    Ok(vanilla_param_count(spec, convention)? as f64 / separable as f64)
}

/// Side-by-side parameter accounting for one block configuration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ParamReport {
    /// Vanilla block parameter count.
    pub vanilla: u64,
    /// Separable block parameter count.
    pub separable: u64,
    /// `vanilla / separable`.
    pub ratio: f64,
}

/// Computes both counts and the ratio in one call.
pub fn param_report(spec: &ConvBlockSpec, convention: BatchNorm) -> DetPostResult<ParamReport> {
    Ok(ParamReport {
        vanilla: vanilla_param_count(spec, convention)?,
        separable: separable_param_count(spec, convention)?,
        ratio: reduction_ratio(spec, convention)?,
    })
}
