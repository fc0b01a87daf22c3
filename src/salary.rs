//! The salary adjustment rule applied after loading records.

use crate::store::KeyValueStore;

/// Salaries strictly below this are raised.
pub const SALARY_THRESHOLD: f64 = 10_000.0;

/// Multiplier applied to a raised salary (+10%).
pub const RAISE_FACTOR: f64 = 1.1;

/// Raises every salary below [`SALARY_THRESHOLD`] by [`RAISE_FACTOR`].
///
/// Resident keys are snapshotted first, then each salary is read with `get`
/// and written back with `put`, so the store is never mutated while it is
/// being enumerated. Returns the number of raised salaries.
///
/// # Examples
///
/// ```rust
/// use chain_hash::ChainedHashTable;
/// use chain_hash::salary::increase_salaries;
///
/// let mut table = ChainedHashTable::new();
/// table.put("EMP00001".to_string(), 5_000.0);
/// table.put("EMP00002".to_string(), 15_000.0);
///
/// assert_eq!(increase_salaries(&mut table), 1);
/// assert_eq!(table.get("EMP00002"), Some(&15_000.0));
/// ```
pub fn increase_salaries<S>(store: &mut S) -> usize
where
    S: KeyValueStore<String, f64> + ?Sized,
{
    let mut raised = 0;
    for key in store.keys() {
        let Some(salary) = store.get(&key) else {
            continue;
        };
        if salary < SALARY_THRESHOLD {
            store.put(key, salary * RAISE_FACTOR);
            raised += 1;
        }
    }

    log::debug!("Raised {raised} of {} salaries in {}", store.len(), store.name());
    raised
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::store::StoreKind;

    #[test]
    fn only_low_salaries_are_raised() {
        for kind in StoreKind::ALL {
            let mut store = kind.build::<String, f64>();
            store.put("low".to_string(), 3_000.0);
            store.put("edge".to_string(), SALARY_THRESHOLD);
            store.put("high".to_string(), 29_999.99);
            store.put("just_below".to_string(), 9_999.99);

            assert_eq!(increase_salaries(&mut *store), 2, "{kind}");
            assert_eq!(store.get(&"low".to_string()), Some(3_000.0 * RAISE_FACTOR));
            assert_eq!(store.get(&"edge".to_string()), Some(SALARY_THRESHOLD));
            assert_eq!(store.get(&"high".to_string()), Some(29_999.99));
            assert_eq!(
                store.get(&"just_below".to_string()),
                Some(9_999.99 * RAISE_FACTOR)
            );
            assert_eq!(store.len(), 4);
        }
    }

    #[test]
    fn raise_is_applied_once_per_call() {
        let mut store = StoreKind::ChainedHashTable.build::<String, f64>();
        store.put("a".to_string(), 8_000.0);

        assert_eq!(increase_salaries(&mut *store), 1);
        assert_eq!(store.get(&"a".to_string()), Some(8_000.0 * RAISE_FACTOR));

        // 8800 is still below the threshold, so a second pass raises again.
        assert_eq!(increase_salaries(&mut *store), 1);
        assert_eq!(
            store.get(&"a".to_string()),
            Some(8_000.0 * RAISE_FACTOR * RAISE_FACTOR)
        );
    }

    #[test]
    fn empty_store() {
        let mut store = StoreKind::DashMap.build::<String, f64>();
        assert_eq!(increase_salaries(&mut *store), 0);
    }
}
