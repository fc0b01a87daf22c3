//! Workload configuration.

use std::path::Path;
use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::store::StoreKind;

/// Number of employee records generated by default.
pub const DEFAULT_RECORD_COUNT: usize = 10_000;

/// Number of `put`/`get` operations per batch by default.
pub const DEFAULT_OP_COUNT: usize = 1_000_000;

/// Record file used when none is given.
pub const DEFAULT_CSV_PATH: &str = "employee_salaries.csv";

/// Workload configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Number of employee records to generate
    pub record_count: usize,

    /// Number of operations per `put`/`get` batch
    pub op_count: usize,

    /// Seed for random data, `None` draws from OS entropy
    pub seed: Option<u64>,

    /// Location of the employee record file
    pub csv_path: PathBuf,

    /// Stores to run, in order
    pub stores: Vec<StoreKind>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            record_count: DEFAULT_RECORD_COUNT,
            op_count: DEFAULT_OP_COUNT,
            seed: None,
            csv_path: PathBuf::from(DEFAULT_CSV_PATH),
            stores: StoreKind::ALL.to_vec(),
        }
    }
}

impl Config {
    /// Initializes a new config with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of generated employee records.
    #[must_use]
    pub fn record_count(mut self, count: usize) -> Self {
        self.record_count = count;
        self
    }

    /// Sets the number of operations per `put`/`get` batch.
    #[must_use]
    pub fn op_count(mut self, count: usize) -> Self {
        self.op_count = count;
        self
    }

    /// Fixes the random seed, making generated data reproducible.
    #[must_use]
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the employee record file.
    #[must_use]
    pub fn csv_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.csv_path = path.as_ref().to_path_buf();
        self
    }

    /// Restricts the run to `stores`. An empty list leaves the selection
    /// unchanged.
    #[must_use]
    pub fn stores(mut self, stores: Vec<StoreKind>) -> Self {
        if !stores.is_empty() {
            self.stores = stores;
        }
        self
    }

    /// Returns the random generator for this run.
    pub fn rng(&self) -> SmallRng {
        match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    #[test]
    fn defaults_match_reference_workload() {
        let config = Config::new();
        assert_eq!(config.record_count, 10_000);
        assert_eq!(config.op_count, 1_000_000);
        assert_eq!(config.csv_path, Path::new("employee_salaries.csv"));
        assert_eq!(config.stores, StoreKind::ALL);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn builder_overrides() {
        let config = Config::new()
            .record_count(10)
            .op_count(20)
            .csv_path("/tmp/x.csv")
            .stores(vec![StoreKind::ChainedHashTable]);
        assert_eq!(config.record_count, 10);
        assert_eq!(config.op_count, 20);
        assert_eq!(config.csv_path, Path::new("/tmp/x.csv"));
        assert_eq!(config.stores, [StoreKind::ChainedHashTable]);

        let config = config.stores(Vec::new());
        assert_eq!(config.stores, [StoreKind::ChainedHashTable]);
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let config = Config::new().seed(Some(42));
        let a: u64 = config.rng().random();
        let b: u64 = config.rng().random();
        assert_eq!(a, b);
    }
}
