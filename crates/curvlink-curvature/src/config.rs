//! Configuration for Ollivier-Ricci curvature.

use serde::{Deserialize, Serialize};

use crate::error::{CurvatureError, Result};

/// Transport solver used for `W(mₓ, m_y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OtMethod {
    /// Exact earth mover's distance.
    Otd,
    /// Average transportation distance `Σ aᵢ bⱼ cᵢⱼ` (an upper bound on `W`).
    Atd,
    /// Entropy-regularized transport.
    Sinkhorn,
    /// Exact below [`OllivierConfig::otd_sinkhorn_threshold`] support pairs,
    /// Sinkhorn above it.
    #[default]
    OtdSinkhornMix,
}

impl OtMethod {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Otd => "otd",
            Self::Atd => "atd",
            Self::Sinkhorn => "sinkhorn",
            Self::OtdSinkhornMix => "otd_sinkhorn_mix",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllivierConfig {
    /// Probability mass kept on the node itself (laziness). Range `[0, 1]`.
    /// Default: `0.5`
    pub alpha: f64,

    /// Transport solver. Default: [`OtMethod::OtdSinkhornMix`]
    pub method: OtMethod,

    /// Exponent on the edge weight in `base^(-w^exp_power)`. Default: `2.0`
    pub exp_power: f64,

    /// Base of the neighbour weighting. Default: `e`
    pub base: f64,

    /// Keep only the heaviest `nbr_topk` neighbours per measure. Default: `3000`
    pub nbr_topk: usize,

    /// `|supp mₓ| · |supp m_y|` above which the mixed method switches to Sinkhorn.
    /// Default: `2000`
    pub otd_sinkhorn_threshold: usize,

    /// Entropic regularization for Sinkhorn. Default: `0.1`
    pub sinkhorn_reg: f64,

    /// Threads for per-edge computation; `0` runs on the calling thread.
    /// Default: `0`
    pub workers: usize,
}

impl Default for OllivierConfig {
    fn default() -> Self {
        Self {
            alpha:                  0.5,
            method:                 OtMethod::OtdSinkhornMix,
            exp_power:              2.0,
            base:                   std::f64::consts::E,
            nbr_topk:               3000,
            otd_sinkhorn_threshold: 2000,
            sinkhorn_reg:           0.1,
            workers:                0,
        }
    }
}

impl OllivierConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(CurvatureError::Config(format!(
                "alpha must be in [0, 1], got {}",
                self.alpha
            )));
        }
        if self.base <= 0.0 {
            return Err(CurvatureError::Config(format!("base must be > 0, got {}", self.base)));
        }
        if self.nbr_topk == 0 {
            return Err(CurvatureError::Config("nbr_topk must be > 0".into()));
        }
        if self.sinkhorn_reg <= 0.0 {
            return Err(CurvatureError::Config(format!(
                "sinkhorn_reg must be > 0, got {}",
                self.sinkhorn_reg
            )));
        }
        Ok(())
    }
}
