use std::collections::HashMap;

use chain_hash::ChainedHashTable;
use chain_hash::StoreKind;
use chain_hash::records::employee_id;
use chain_hash::records::generate_csv;
use chain_hash::records::load_csv;
use chain_hash::records::read_records;
use chain_hash::salary::RAISE_FACTOR;
use chain_hash::salary::SALARY_THRESHOLD;
use chain_hash::salary::increase_salaries;
use rand::SeedableRng;
use rand::rngs::SmallRng;

const EMPLOYEES: usize = 10_000;

#[test_log::test]
fn ten_thousand_employees_on_chained_table() -> chain_hash::Result<()> {
    let folder = tempfile::tempdir()?;
    let path = folder.path().join("employee_salaries.csv");
    generate_csv(&path, EMPLOYEES, &mut SmallRng::seed_from_u64(2024))?;

    let original: HashMap<String, f64> = read_records(std::io::BufReader::new(
        std::fs::File::open(&path)?,
    ))
    .collect::<chain_hash::Result<_>>()?;
    assert_eq!(original.len(), EMPLOYEES);

    let mut table: ChainedHashTable<String, f64> = ChainedHashTable::new();
    assert_eq!(load_csv(&path, &mut table)?, EMPLOYEES);
    assert_eq!(table.len(), EMPLOYEES);

    let expected_raises = original.values().filter(|&&s| s < SALARY_THRESHOLD).count();
    assert_eq!(increase_salaries(&mut table), expected_raises);

    for n in 1..=EMPLOYEES {
        let id = employee_id(n);
        let before = original[&id];
        let after = *table.get(id.as_str()).expect("every employee is resident");

        assert!((3_000.0..30_000.0).contains(&before), "{id}: {before}");
        if before < SALARY_THRESHOLD {
            assert_eq!(after, before * RAISE_FACTOR, "{id}");
        } else {
            assert_eq!(after, before, "{id}");
        }
    }

    assert_eq!(table.get("EMP00000"), None);
    assert_eq!(table.get("EMP10001"), None);

    Ok(())
}

#[test_log::test]
fn every_store_ends_in_the_same_state() -> chain_hash::Result<()> {
    let folder = tempfile::tempdir()?;
    let path = folder.path().join("employee_salaries.csv");
    generate_csv(&path, EMPLOYEES, &mut SmallRng::seed_from_u64(77))?;

    let mut reference: ChainedHashTable<String, f64> = ChainedHashTable::new();
    load_csv(&path, &mut reference)?;
    increase_salaries(&mut reference);

    for kind in StoreKind::ALL {
        let mut store = kind.build::<String, f64>();
        load_csv(&path, &mut *store)?;
        increase_salaries(&mut *store);

        assert_eq!(store.len(), EMPLOYEES, "{kind}");
        for (id, salary) in reference.iter() {
            assert_eq!(store.get(id), Some(*salary), "{kind}: {id}");
        }
    }

    Ok(())
}
