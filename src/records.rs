//! Synthetic employee salary records in CSV form.
//!
//! The file starts with the header `EmployeeID,Salary`, followed by one
//! `EMP%05d,<salary>` line per employee, salaries written with two decimals.

use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::Lines;
use std::io::Write;
use std::path::Path;

use rand::Rng;

use crate::error::Error;
use crate::error::Result;
use crate::store::KeyValueStore;

/// First line of every record file.
pub const CSV_HEADER: &str = "EmployeeID,Salary";

/// Lowest generated salary, inclusive.
pub const MIN_SALARY: f64 = 3_000.0;

/// Highest generated salary, exclusive.
pub const MAX_SALARY: f64 = 30_000.0;

/// Formats the identifier of the `n`th employee (1-based), e.g. `EMP00042`.
pub fn employee_id(n: usize) -> String {
    format!("EMP{n:05}")
}

/// Writes a header and `count` random records to `writer`.
///
/// Identifiers run from `EMP00001` to `count`; salaries are drawn uniformly
/// from `[MIN_SALARY, MAX_SALARY)` at cent resolution, so the printed value is
/// exactly the value a reader parses back.
pub fn write_records<W, R>(writer: W, count: usize, rng: &mut R) -> Result<()>
where
    W: Write,
    R: Rng + ?Sized,
{
    const MIN_CENTS: u64 = (MIN_SALARY * 100.0) as u64;
    const MAX_CENTS: u64 = (MAX_SALARY * 100.0) as u64;

    let mut writer = BufWriter::new(writer);
    writeln!(writer, "{CSV_HEADER}")?;

    for n in 1..=count {
        let cents = rng.random_range(MIN_CENTS..MAX_CENTS);
        writeln!(writer, "{},{}.{:02}", employee_id(n), cents / 100, cents % 100)?;
    }

    writer.flush()?;
    Ok(())
}

/// Creates (or truncates) `path` and fills it with `count` random records.
pub fn generate_csv<P, R>(path: P, count: usize, rng: &mut R) -> Result<()>
where
    P: AsRef<Path>,
    R: Rng + ?Sized,
{
    let path = path.as_ref();
    write_records(File::create(path)?, count, rng)?;
    log::info!("Generated {count} employee records at {}", path.display());
    Ok(())
}

/// Parses records from `reader`.
///
/// The first line is always treated as the header and skipped. Lines that do
/// not hold exactly two comma-separated fields are skipped as well (trailing
/// empty fields do not count). A salary that is not a number ends the stream
/// with [`Error::InvalidSalary`].
pub fn read_records<R: BufRead>(reader: R) -> Records<R> {
    Records {
        lines: reader.lines(),
        line: 0,
    }
}

/// Iterator over `(identifier, salary)` pairs, in file order.
///
/// Created by [`read_records`].
pub struct Records<R> {
    lines: Lines<R>,
    line: usize,
}

impl<R: BufRead> Iterator for Records<R> {
    type Item = Result<(String, f64)>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let text = match self.lines.next()? {
                Ok(text) => text,
                Err(e) => return Some(Err(e.into())),
            };
            self.line += 1;

            if self.line == 1 {
                continue;
            }

            let mut fields = text.trim_end_matches(',').split(',');
            let (Some(id), Some(salary), None) = (fields.next(), fields.next(), fields.next())
            else {
                log::debug!("Skipping line {}: expected 2 fields", self.line);
                continue;
            };

            return Some(match salary.trim().parse::<f64>() {
                Ok(salary) => Ok((id.to_string(), salary)),
                Err(_) => Err(Error::InvalidSalary {
                    line: self.line,
                    value: salary.to_string(),
                }),
            });
        }
    }
}

/// Puts every record read from `reader` into `store`, in file order.
///
/// Returns the number of records loaded. On a parse error, records before the
/// offending line stay in the store.
pub fn load_records<R, S>(reader: R, store: &mut S) -> Result<usize>
where
    R: BufRead,
    S: KeyValueStore<String, f64> + ?Sized,
{
    let mut loaded = 0;
    for record in read_records(reader) {
        let (id, salary) = record?;
        store.put(id, salary);
        loaded += 1;
    }
    Ok(loaded)
}

/// Opens `path` and loads its records into `store`.
pub fn load_csv<P, S>(path: P, store: &mut S) -> Result<usize>
where
    P: AsRef<Path>,
    S: KeyValueStore<String, f64> + ?Sized,
{
    let path = path.as_ref();
    let loaded = load_records(BufReader::new(File::open(path)?), store)?;
    log::debug!(
        "Loaded {loaded} records from {} into {}",
        path.display(),
        store.name()
    );
    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use test_log::test;

    use super::*;
    use crate::hash_table::ChainedHashTable;

    fn parse(text: &str) -> Result<Vec<(String, f64)>> {
        read_records(text.as_bytes()).collect()
    }

    #[test]
    fn ids_are_zero_padded() {
        assert_eq!(employee_id(1), "EMP00001");
        assert_eq!(employee_id(10_000), "EMP10000");
        assert_eq!(employee_id(123_456), "EMP123456");
    }

    #[test]
    fn generated_file_has_header_and_range() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut buf = Vec::new();
        write_records(&mut buf, 500, &mut rng).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some(CSV_HEADER));
        assert_eq!(lines.clone().count(), 500);

        let first = lines.next().unwrap();
        assert!(first.starts_with("EMP00001,"), "{first}");

        let records = parse(&text).unwrap();
        assert_eq!(records.len(), 500);
        for (n, (id, salary)) in records.iter().enumerate() {
            assert_eq!(*id, employee_id(n + 1));
            assert!((MIN_SALARY..MAX_SALARY).contains(salary), "{id}: {salary}");
        }
    }

    #[test]
    fn salaries_have_two_decimals() {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut buf = Vec::new();
        write_records(&mut buf, 50, &mut rng).unwrap();

        for line in String::from_utf8(buf).unwrap().lines().skip(1) {
            let (_, salary) = line.split_once(',').unwrap();
            let (_, cents) = salary.split_once('.').unwrap();
            assert_eq!(cents.len(), 2, "{line}");
        }
    }

    #[test]
    fn header_is_skipped_unconditionally() {
        let records = parse("EMP00001,100.00\nEMP00002,200.50\n").unwrap();
        assert_eq!(records, [("EMP00002".to_string(), 200.5)]);
        assert!(parse("").unwrap().is_empty());
        assert!(parse(CSV_HEADER).unwrap().is_empty());
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let text = "EmployeeID,Salary\n\
                    EMP00001,4000.00\n\
                    \n\
                    EMP00002\n\
                    EMP00003,1,2\n\
                    EMP00004,5000.25,\n\
                    EMP00005, 6000.5 \r\n";
        let records = parse(text).unwrap();
        assert_eq!(
            records,
            [
                ("EMP00001".to_string(), 4_000.0),
                ("EMP00004".to_string(), 5_000.25),
                ("EMP00005".to_string(), 6_000.5),
            ]
        );
    }

    #[test]
    fn bad_salary_reports_line() {
        let err = parse("EmployeeID,Salary\nEMP00001,4000\nEMP00002,lots\n").unwrap_err();
        match err {
            Error::InvalidSalary { line, value } => {
                assert_eq!(line, 3);
                assert_eq!(value, "lots");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn load_keeps_records_before_error() {
        let mut table: ChainedHashTable<String, f64> = ChainedHashTable::new();
        let result = load_records(
            "EmployeeID,Salary\nEMP00001,4000\nEMP00002,x\nEMP00003,5000\n".as_bytes(),
            &mut table,
        );
        assert!(result.is_err());
        assert_eq!(table.get("EMP00001"), Some(&4_000.0));
        assert_eq!(table.get("EMP00003"), None);
    }

    #[test]
    fn later_duplicates_win() {
        let mut table: ChainedHashTable<String, f64> = ChainedHashTable::new();
        let loaded = load_records(
            "EmployeeID,Salary\nEMP00001,4000\nEMP00001,4500\n".as_bytes(),
            &mut table,
        )
        .unwrap();
        assert_eq!(loaded, 2);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("EMP00001"), Some(&4_500.0));
    }

    #[test]
    fn csv_file_round_trip() -> Result<()> {
        let folder = tempfile::tempdir()?;
        let path = folder.path().join("employees.csv");

        let mut rng = SmallRng::seed_from_u64(3);
        generate_csv(&path, 1_000, &mut rng)?;

        let mut table: ChainedHashTable<String, f64> = ChainedHashTable::new();
        assert_eq!(load_csv(&path, &mut table)?, 1_000);
        assert_eq!(table.len(), 1_000);
        assert!(table.contains_key("EMP01000"));
        assert!(!table.contains_key("EMP01001"));

        Ok(())
    }

    #[test]
    fn missing_file_is_io_error() {
        let folder = tempfile::tempdir().unwrap();
        let mut table: ChainedHashTable<String, f64> = ChainedHashTable::new();
        let err = load_csv(folder.path().join("absent.csv"), &mut table).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
