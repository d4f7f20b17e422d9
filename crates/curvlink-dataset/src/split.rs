//! Train / validation / test split.
//!
//! Positives and negatives are sliced independently with the same sizes:
//! train from the head, validation and test from the tail. Each split is the
//! positive slice followed by the negative slice.

use serde::{Deserialize, Serialize};

/// A labelled entity pair: `label = 1` for an observed edge, `0` for a sampled non-edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Example {
    pub entity1: i64,
    pub entity2: i64,
    pub label: i64,
}

impl Example {
    pub fn positive((entity1, entity2): (i64, i64)) -> Self {
        Self { entity1, entity2, label: 1 }
    }

    pub fn negative((entity1, entity2): (i64, i64)) -> Self {
        Self { entity1, entity2, label: 0 }
    }

    pub fn pair(&self) -> (i64, i64) {
        (self.entity1, self.entity2)
    }
}

#[derive(Debug, Clone)]
pub struct Splits {
    pub train: Vec<Example>,
    pub val: Vec<Example>,
    pub test: Vec<Example>,
    /// Positive pairs of the training split; the only edges the model sees.
    pub train_positive: Vec<(i64, i64)>,
}

impl Splits {
    pub fn total(&self) -> usize {
        self.train.len() + self.val.len() + self.test.len()
    }
}

/// `(val_size, test_size)` for `count` positives.
pub fn split_sizes(count: usize, val_ratio: f64, test_ratio: f64) -> (usize, usize) {
    let val = (val_ratio * count as f64) as usize;
    let test = (test_ratio * count as f64) as usize;
    (val, test)
}

/// Split equally sized positive and negative pair lists.
pub fn split_examples(
    positive: &[(i64, i64)],
    negative: &[(i64, i64)],
    val_ratio: f64,
    test_ratio: f64,
) -> Splits {
    debug_assert_eq!(positive.len(), negative.len());
    let p = positive.len();
    let (val_size, test_size) = split_sizes(p, val_ratio, test_ratio);
    let train_end = p.saturating_sub(val_size + test_size);
    let val_end = p.saturating_sub(test_size);

    let take = |range: std::ops::Range<usize>| -> Vec<Example> {
        positive[range.clone()]
            .iter()
            .copied()
            .map(Example::positive)
            .chain(negative[range].iter().copied().map(Example::negative))
            .collect()
    };

    let splits = Splits {
        train: take(0..train_end),
        val: take(train_end..val_end),
        test: take(val_end..p),
        train_positive: positive[..train_end].to_vec(),
    };

    tracing::debug!(
        train = splits.train.len(),
        val = splits.val.len(),
        test = splits.test.len(),
        "examples split"
    );
    splits
}
