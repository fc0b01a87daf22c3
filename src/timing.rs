//! Wall-clock timing of workloads against a [`KeyValueStore`].

use std::fmt;
use std::hint::black_box;
use std::path::Path;
use std::time::Duration;
use std::time::Instant;

use rand::Rng;

use crate::error::Result;
use crate::records::load_csv;
use crate::salary::increase_salaries;
use crate::store::KeyValueStore;

/// Largest value generated by [`int_workload`], exclusive.
pub const MAX_INT_VALUE: u32 = 100_000;

/// Measures elapsed wall-clock time from its creation.
#[derive(Clone, Copy, Debug)]
pub struct Stopwatch {
    start: Instant,
}

impl Stopwatch {
    /// Starts a new stopwatch.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Time elapsed since [`start`](Self::start).
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Runs `f` and returns its result with the time it took.
pub fn time<R>(f: impl FnOnce() -> R) -> (R, Duration) {
    let watch = Stopwatch::start();
    let result = f();
    (result, watch.elapsed())
}

/// Builds `size` sequential keys starting at 0, each paired with a random
/// value in `[0, MAX_INT_VALUE)`.
pub fn int_workload<R: Rng + ?Sized>(size: usize, rng: &mut R) -> (Vec<u64>, Vec<u32>) {
    let keys = (0..size as u64).collect();
    let values = (0..size)
        .map(|_| rng.random_range(0..MAX_INT_VALUE))
        .collect();
    (keys, values)
}

/// Timings of one `put` batch followed by one `get` batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PutGetReport {
    /// Store name
    pub name: &'static str,
    /// Operations per batch
    pub ops: usize,
    /// Duration of the `put` batch
    pub write: Duration,
    /// Duration of the `get` batch
    pub read: Duration,
    /// Lookups that found nothing
    pub misses: usize,
}

impl fmt::Display for PutGetReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} Write Time: {} ms", self.name, self.write.as_millis())?;
        write!(f, "{} Read Time: {} ms", self.name, self.read.as_millis())
    }
}

/// Puts every `(keys[i], values[i])` pair, then gets every key, timing each
/// batch separately.
///
/// Pairs beyond the shorter of the two slices are ignored.
pub fn put_get_workload<S, K, V>(store: &mut S, keys: &[K], values: &[V]) -> PutGetReport
where
    S: KeyValueStore<K, V> + ?Sized,
    K: Clone,
    V: Clone,
{
    let ops = keys.len().min(values.len());
    let keys = &keys[..ops];

    let ((), write) = time(|| {
        for (key, value) in keys.iter().zip(values) {
            store.put(key.clone(), value.clone());
        }
    });

    let (misses, read) = time(|| {
        keys.iter()
            .filter(|&key| black_box(store.get(key)).is_none())
            .count()
    });

    let report = PutGetReport {
        name: store.name(),
        ops,
        write,
        read,
        misses,
    };
    log::info!(
        "{}: {ops} puts in {:?}, {ops} gets in {:?}",
        report.name,
        report.write,
        report.read
    );
    if misses > 0 {
        log::warn!("{}: {misses} of {ops} lookups missed", report.name);
    }
    report
}

/// Timing of loading the record file and applying the salary rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmployeeReport {
    /// Store name
    pub name: &'static str,
    /// Records loaded from the file
    pub loaded: usize,
    /// Salaries raised
    pub raised: usize,
    /// Duration of load and adjustment together
    pub elapsed: Duration,
}

impl fmt::Display for EmployeeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} processing time: {} ms",
            self.name,
            self.elapsed.as_millis()
        )
    }
}

/// Loads the records at `path` into `store` and raises low salaries, timing
/// both steps as one.
pub fn employee_workload<S, P>(store: &mut S, path: P) -> Result<EmployeeReport>
where
    S: KeyValueStore<String, f64> + ?Sized,
    P: AsRef<Path>,
{
    let watch = Stopwatch::start();
    let loaded = load_csv(path, store)?;
    let raised = increase_salaries(store);
    let elapsed = watch.elapsed();

    let report = EmployeeReport {
        name: store.name(),
        loaded,
        raised,
        elapsed,
    };
    log::info!(
        "{}: loaded {loaded} records, raised {raised}, in {elapsed:?}",
        report.name
    );
    Ok(report)
}
