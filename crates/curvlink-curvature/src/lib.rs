//! # curvlink-curvature
//!
//! Edge curvature for undirected graphs.
//!
//! | Curvature | Definition | Cost |
//! |---|---|---|
//! | **Ollivier-Ricci** | `κ(x, y) = 1 − W(mₓ, m_y) / d(x, y)` over lazy neighbour measures | one transport problem per edge |
//! | **Forman-Ricci** (1-D) | weighted degree formula | O(deg) per edge |
//!
//! `W` is the Wasserstein-1 distance between the neighbourhood measures of the
//! two endpoints, solved exactly ([`transport::emd`]), entropically
//! ([`transport::sinkhorn`]) or bounded above by the average transport
//! distance ([`transport::average_transport`]).
//!
//! ## Quick start
//! ```rust,ignore
//! use curvlink_curvature::{OllivierConfig, OllivierRicci};
//!
//! let orc = OllivierRicci::new(&graph, OllivierConfig::default());
//! let curvature = orc.compute_ricci_curvature()?;
//! let k = curvature.edge(0, 1);
//! ```

pub mod config;
pub mod distance;
pub mod error;
pub mod forman;
pub mod ollivier;
pub mod transport;

pub use config::{OllivierConfig, OtMethod};
pub use error::{CurvatureError, Result};
pub use forman::forman_curvature;
pub use ollivier::{CurvatureMap, OllivierRicci};

/// Weights and distances below this are treated as zero.
pub const EPSILON: f64 = 1e-7;
