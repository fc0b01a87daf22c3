/// Errors raised while generating, loading or benchmarking workloads.
///
/// The hash table itself never fails; these come from the plumbing around it.
#[derive(Debug)]
pub enum Error {
    /// I/O error
    Io(std::io::Error),

    /// A record's salary field is not a number
    InvalidSalary {
        /// 1-based line number, counting the header as line 1
        line: usize,

        /// The offending field
        value: String,
    },

    /// No store goes by this name
    UnknownStore(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::InvalidSalary { line, value } => {
                write!(f, "line {line}: invalid salary {value:?}")
            }
            Self::UnknownStore(name) => write!(f, "unknown store {name:?}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Workload result
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_line() {
        let err = Error::InvalidSalary {
            line: 3,
            value: "abc".into(),
        };
        assert_eq!(err.to_string(), r#"line 3: invalid salary "abc""#);
        assert_eq!(
            Error::UnknownStore("TreeMap".into()).to_string(),
            r#"unknown store "TreeMap""#
        );
    }

    #[test]
    fn io_errors_convert() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, Error::Io(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
