//! Mini-batch loaders over labelled examples.
//!
//! An item is `(label, (entity1, entity2))`. Each epoch reshuffles (when
//! enabled) from the loader's own rng stream, so two loaders built from the
//! same seed but different streams never share an ordering.

use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::error::{DatasetError, Result};
use crate::sampling::seeded_rng;
use crate::split::Example;

/// Indexable view over one split.
#[derive(Debug, Clone, Default)]
pub struct ExampleSet {
    examples: Vec<Example>,
}

impl ExampleSet {
    pub fn new(examples: Vec<Example>) -> Self {
        Self { examples }
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    /// `(label, (entity1, entity2))` at `index`.
    pub fn get(&self, index: usize) -> Option<(i64, (i64, i64))> {
        self.examples.get(index).map(|e| (e.label, e.pair()))
    }

    pub fn examples(&self) -> &[Example] {
        &self.examples
    }
}

/// Column-wise collation of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    pub labels: Vec<i64>,
    pub entity1: Vec<i64>,
    pub entity2: Vec<i64>,
}

impl Batch {
    fn collate(items: &[Example]) -> Self {
        let mut batch = Batch {
            labels: Vec::with_capacity(items.len()),
            entity1: Vec::with_capacity(items.len()),
            entity2: Vec::with_capacity(items.len()),
        };
        for e in items {
            batch.labels.push(e.label);
            batch.entity1.push(e.entity1);
            batch.entity2.push(e.entity2);
        }
        batch
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderConfig {
    pub batch_size: usize,
    pub shuffle: bool,
    /// Discard the trailing partial batch.
    pub drop_last: bool,
    /// Collation threads; `0` collates on the calling thread.
    pub workers: usize,
}

impl LoaderConfig {
    /// Shuffled, drop-last loader as used for every split.
    pub fn training(batch_size: usize, workers: usize) -> Self {
        Self { batch_size, shuffle: true, drop_last: true, workers }
    }
}

pub struct DataLoader {
    dataset: ExampleSet,
    config: LoaderConfig,
    rng: ChaCha8Rng,
    pool: Option<rayon::ThreadPool>,
}

impl std::fmt::Debug for DataLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataLoader")
            .field("len", &self.dataset.len())
            .field("config", &self.config)
            .finish()
    }
}

impl DataLoader {
    /// Loader over `dataset`; shuffles draw from stream `stream` of `seed`.
    pub fn new(dataset: ExampleSet, config: LoaderConfig, seed: u64, stream: u64) -> Result<Self> {
        if config.batch_size == 0 {
            return Err(DatasetError::Config("batch_size must be > 0".into()));
        }
        let mut rng = seeded_rng(seed);
        rng.set_stream(stream);

        let pool = if config.workers > 0 {
            Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(config.workers)
                    .build()
                    .map_err(|e| DatasetError::ThreadPool(e.to_string()))?,
            )
        } else {
            None
        };

        Ok(Self { dataset, config, rng, pool })
    }

    pub fn dataset(&self) -> &ExampleSet {
        &self.dataset
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.num_batches()
    }

    pub fn is_empty(&self) -> bool {
        self.num_batches() == 0
    }

    /// Batches per epoch.
    pub fn num_batches(&self) -> usize {
        let n = self.dataset.len();
        let b = self.config.batch_size;
        if self.config.drop_last {
            n / b
        } else {
            n.div_ceil(b)
        }
    }

    /// One pass over the dataset. Advances the shuffle rng.
    pub fn epoch(&mut self) -> Vec<Batch> {
        let mut order: Vec<Example> = self.dataset.examples().to_vec();
        if self.config.shuffle {
            order.shuffle(&mut self.rng);
        }
        if self.config.drop_last {
            let keep = order.len() - order.len() % self.config.batch_size;
            order.truncate(keep);
        }

        let size = self.config.batch_size;
        match &self.pool {
            Some(pool) => pool.install(|| order.par_chunks(size).map(Batch::collate).collect()),
            None => order.chunks(size).map(Batch::collate).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn examples(n: i64) -> ExampleSet {
        ExampleSet::new(
            (0..n)
                .map(|i| if i % 2 == 0 { Example::positive((i, i + 1)) } else { Example::negative((i, i + 2)) })
                .collect(),
        )
    }

    #[test]
    fn get_returns_label_and_pair() {
        let set = examples(4);
        assert_eq!(set.get(0), Some((1, (0, 1))));
        assert_eq!(set.get(1), Some((0, (1, 3))));
        assert_eq!(set.get(4), None);
    }

    #[test]
    fn drop_last_discards_partial_batch() {
        let mut loader = DataLoader::new(examples(10), LoaderConfig::training(4, 0), 0, 1).unwrap();
        assert_eq!(loader.num_batches(), 2);
        let batches = loader.epoch();
        assert_eq!(batches.len(), 2);
        assert!(batches.iter().all(|b| b.len() == 4));
    }

    #[test]
    fn keep_last_covers_everything_once() {
        let cfg = LoaderConfig { batch_size: 4, shuffle: true, drop_last: false, workers: 0 };
        let mut loader = DataLoader::new(examples(10), cfg, 0, 1).unwrap();
        assert_eq!(loader.num_batches(), 3);
        let batches = loader.epoch();
        assert_eq!(batches.last().unwrap().len(), 2);
        let seen: HashSet<i64> = batches.iter().flat_map(|b| b.entity1.clone()).collect();
        assert_eq!(seen.len(), 10);
    }

    #[test]
    fn batch_smaller_than_dataset_with_drop_last_is_empty() {
        let mut loader = DataLoader::new(examples(3), LoaderConfig::training(8, 0), 0, 1).unwrap();
        assert!(loader.is_empty());
        assert!(loader.epoch().is_empty());
    }

    #[test]
    fn unshuffled_preserves_order() {
        let cfg = LoaderConfig { batch_size: 3, shuffle: false, drop_last: false, workers: 0 };
        let mut loader = DataLoader::new(examples(6), cfg, 0, 1).unwrap();
        let batches = loader.epoch();
        assert_eq!(batches[0].entity1, vec![0, 1, 2]);
        assert_eq!(batches[1].labels, vec![0, 1, 0]);
    }

    #[test]
    fn epochs_reshuffle_deterministically() {
        let mut a = DataLoader::new(examples(32), LoaderConfig::training(8, 0), 5, 1).unwrap();
        let mut b = DataLoader::new(examples(32), LoaderConfig::training(8, 0), 5, 1).unwrap();
        let (a1, a2) = (a.epoch(), a.epoch());
        assert_eq!(a1, b.epoch());
        assert_eq!(a2, b.epoch());
        assert_ne!(a1, a2);
    }

    #[test]
    fn streams_differ() {
        let mut a = DataLoader::new(examples(32), LoaderConfig::training(8, 0), 5, 1).unwrap();
        let mut b = DataLoader::new(examples(32), LoaderConfig::training(8, 0), 5, 2).unwrap();
        assert_ne!(a.epoch(), b.epoch());
    }

    #[test]
    fn worker_pool_matches_serial() {
        let mut serial = DataLoader::new(examples(40), LoaderConfig::training(6, 0), 3, 1).unwrap();
        let mut pooled = DataLoader::new(examples(40), LoaderConfig::training(6, 2), 3, 1).unwrap();
        assert_eq!(serial.epoch(), pooled.epoch());
    }

    #[test]
    fn zero_batch_size_rejected() {
        let cfg = LoaderConfig { batch_size: 0, shuffle: false, drop_last: false, workers: 0 };
        assert!(DataLoader::new(examples(4), cfg, 0, 0).is_err());
    }
}
