//! Configuration types deserialized from `luma.toml`.

use serde::Deserialize;

/// The top-level run configuration parsed from `luma.toml`.
#[derive(Debug, Deserialize)]
pub struct RunConfig {
    /// Input image settings.
    pub image: ImageConfig,
    /// Per-channel grayscale weights.
    #[serde(default)]
    pub weights: WeightConfig,
    /// Clock settings.
    #[serde(default)]
    pub clock: ClockConfig,
    /// Pipeline depth and run-control settings.
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

/// Input image settings.
#[derive(Debug, Deserialize)]
pub struct ImageConfig {
    /// Path to the input image (plain or raw PPM, maxval 255).
    pub input: String,
    /// Stride divisor applied before streaming. 1 keeps the full image.
    #[serde(default = "default_scaling")]
    pub scaling: u32,
}

/// Per-channel grayscale weights, as loaded into the DUT's weight registers.
#[derive(Debug, Deserialize)]
pub struct WeightConfig {
    /// Red channel weight.
    pub r: u16,
    /// Green channel weight.
    pub g: u16,
    /// Blue channel weight.
    pub b: u16,
}

/// Clock settings.
#[derive(Debug, Deserialize)]
pub struct ClockConfig {
    /// Clock period as a duration string, e.g. `"10ns"` or `"500ps"`.
    #[serde(default = "default_period")]
    pub period: String,
}

/// Pipeline depth and run-control settings.
#[derive(Debug, Deserialize)]
pub struct PipelineConfig {
    /// DUT latency in clock cycles.
    #[serde(default = "default_latency")]
    pub latency: u32,
    /// Extra cycles run after the result completes.
    #[serde(default = "default_drain_cycles")]
    pub drain_cycles: u32,
    /// Consecutive output-idle cycles tolerated before declaring a stall.
    #[serde(default = "default_stall_limit")]
    pub stall_limit: u32,
}

impl Default for WeightConfig {
    fn default() -> Self {
        let w = luma_common::Weights::bt601();
        Self {
            r: w.r,
            g: w.g,
            b: w.b,
        }
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            period: default_period(),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            latency: default_latency(),
            drain_cycles: default_drain_cycles(),
            stall_limit: default_stall_limit(),
        }
    }
}

fn default_scaling() -> u32 {
    1
}

fn default_period() -> String {
    "10ns".to_string()
}

fn default_latency() -> u32 {
    1
}

fn default_drain_cycles() -> u32 {
    2
}

fn default_stall_limit() -> u32 {
    1024
}
