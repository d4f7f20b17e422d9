//! Dataset configuration.
//!
//! | Variable                       | Default          | Description                                   |
//! |--------------------------------|------------------|-----------------------------------------------|
//! | `CURVLINK_IN_FILE`             | `data/edges.txt` | Edge-list path                                |
//! | `CURVLINK_SEED`                | `0`              | Seed for every stochastic step                |
//! | `CURVLINK_NETWORK_RATIO`       | `1.0`            | Fraction of positive edges kept               |
//! | `CURVLINK_BATCH`               | `256`            | Loader batch size                             |
//! | `CURVLINK_WORKERS`             | `0`              | Worker threads (curvature + loaders)          |
//! | `CURVLINK_DIMENSIONS`          | `64`             | Columns for `uniform` / `normal` features     |
//! | `CURVLINK_FEATURE_TYPE`        | `one_hot`        | `one_hot` \| `uniform` \| `normal` \| `position` |
//! | `CURVLINK_VAL_RATIO`           | `0.1`            | Validation fraction of positives              |
//! | `CURVLINK_TEST_RATIO`          | `0.2`            | Test fraction of positives                    |
//! | `CURVLINK_CURVATURE`           | `ollivier`       | `ollivier` \| `forman`                        |
//! | `CURVLINK_ALPHA`               | `0.5`            | Ollivier-Ricci laziness                       |
//! | `CURVLINK_NEGATIVE_SAMPLING`   | `exhaustive`     | `exhaustive` \| `rejection`                   |

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DatasetError, Result};

/// Node feature strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FeatureType {
    /// Identity matrix, one column per node.
    #[default]
    OneHot,
    /// `U[0, 1)` entries, `dimensions` columns.
    Uniform,
    /// `N(0, 1)` entries, `dimensions` columns.
    Normal,
    /// Dense symmetric training adjacency, one column per node.
    Position,
}

/// Edge curvature used as the per-edge attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CurvatureKind {
    #[default]
    Ollivier,
    Forman,
}

/// How negative pairs are drawn from the complement of the sampled graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NegativeSampling {
    /// Enumerate every non-edge, shuffle, truncate.
    #[default]
    Exhaustive,
    /// Draw random node pairs and reject edges and repeats.
    Rejection,
}

macro_rules! wire_names {
    ($ty:ty { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            pub fn label(&self) -> &'static str {
                match self { $(Self::$variant => $name),+ }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $ty {
            type Err = DatasetError;

            fn from_str(s: &str) -> Result<Self> {
                match s.trim().to_lowercase().as_str() {
                    $($name => Ok(Self::$variant),)+
                    other => Err(DatasetError::Config(format!(
                        concat!("unknown ", stringify!($ty), " {:?}; expected one of: ", $($name, " "),+),
                        other
                    ))),
                }
            }
        }
    };
}

wire_names!(FeatureType {
    OneHot => "one_hot",
    Uniform => "uniform",
    Normal => "normal",
    Position => "position",
});

wire_names!(CurvatureKind {
    Ollivier => "ollivier",
    Forman => "forman",
});

wire_names!(NegativeSampling {
    Exhaustive => "exhaustive",
    Rejection => "rejection",
});

/// Everything `load_data` needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Whitespace/delimiter separated integer-pair file.
    pub in_file: PathBuf,

    /// Seed for subsampling, negatives, features and loader shuffles.
    /// Default: `0`
    pub seed: u64,

    /// Fraction of positive edges kept, in `(0, 1]`.
    /// Default: `1.0`
    pub network_ratio: f64,

    /// Examples per batch.
    /// Default: `256`
    pub batch: usize,

    /// Worker threads for curvature and loader collation (`0` = caller thread).
    /// Default: `0`
    pub workers: usize,

    /// Feature columns for the random strategies. The effective dimensionality
    /// is reported on the prepared dataset.
    /// Default: `64`
    pub dimensions: usize,

    /// Default: [`FeatureType::OneHot`]
    pub feature_type: FeatureType,

    /// Default: `0.1`
    pub val_ratio: f64,

    /// Default: `0.2`
    pub test_ratio: f64,

    /// Default: [`CurvatureKind::Ollivier`]
    pub curvature: CurvatureKind,

    /// Ollivier-Ricci laziness in `[0, 1]`.
    /// Default: `0.5`
    pub alpha: f64,

    /// Default: [`NegativeSampling::Exhaustive`]
    pub negative_sampling: NegativeSampling,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            in_file:           PathBuf::from("data/edges.txt"),
            seed:              0,
            network_ratio:     1.0,
            batch:             256,
            workers:           0,
            dimensions:        64,
            feature_type:      FeatureType::OneHot,
            val_ratio:         0.1,
            test_ratio:        0.2,
            curvature:         CurvatureKind::Ollivier,
            alpha:             0.5,
            negative_sampling: NegativeSampling::Exhaustive,
        }
    }
}

impl DatasetConfig {
    /// Load from `CURVLINK_*` environment variables, falling back to defaults
    /// for anything absent or unparseable.
    pub fn from_env() -> Self {
        let def = Self::default();
        Self {
            in_file:           std::env::var("CURVLINK_IN_FILE").map(PathBuf::from).unwrap_or(def.in_file),
            seed:              env_parse("CURVLINK_SEED", def.seed),
            network_ratio:     env_parse("CURVLINK_NETWORK_RATIO", def.network_ratio),
            batch:             env_parse("CURVLINK_BATCH", def.batch),
            workers:           env_parse("CURVLINK_WORKERS", def.workers),
            dimensions:        env_parse("CURVLINK_DIMENSIONS", def.dimensions),
            feature_type:      env_parse("CURVLINK_FEATURE_TYPE", def.feature_type),
            val_ratio:         env_parse("CURVLINK_VAL_RATIO", def.val_ratio),
            test_ratio:        env_parse("CURVLINK_TEST_RATIO", def.test_ratio),
            curvature:         env_parse("CURVLINK_CURVATURE", def.curvature),
            alpha:             env_parse("CURVLINK_ALPHA", def.alpha),
            negative_sampling: env_parse("CURVLINK_NEGATIVE_SAMPLING", def.negative_sampling),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let fail = |msg: String| Err(DatasetError::Config(msg));

        if !(self.network_ratio > 0.0 && self.network_ratio <= 1.0) {
            return fail(format!("network_ratio must be in (0, 1], got {}", self.network_ratio));
        }
        for (name, r) in [("val_ratio", self.val_ratio), ("test_ratio", self.test_ratio)] {
            if !(0.0..1.0).contains(&r) {
                return fail(format!("{name} must be in [0, 1), got {r}"));
            }
        }
        if self.val_ratio + self.test_ratio >= 1.0 {
            return fail(format!(
                "val_ratio + test_ratio must be < 1, got {}",
                self.val_ratio + self.test_ratio
            ));
        }
        if self.batch == 0 {
            return fail("batch must be > 0".into());
        }
        if self.dimensions == 0 {
            return fail("dimensions must be > 0".into());
        }
        if !(0.0..=1.0).contains(&self.alpha) {
            return fail(format!("alpha must be in [0, 1], got {}", self.alpha));
        }
        Ok(())
    }

    /// Short dataset name for logs: the input file stem.
    pub fn dataset_name(&self) -> String {
        self.in_file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.in_file.display().to_string())
    }
}

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
