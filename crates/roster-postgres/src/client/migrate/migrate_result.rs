use std::time::Duration;

/// Outcome of a migration run.
///
/// ```rust,no_run
/// use roster_postgres::MigrationResult;
///
/// fn report(result: &MigrationResult) {
///     match result.last_processed_version() {
///         Some(version) => println!("schema now at {version}"),
///         None => println!("schema already up to date"),
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationResult {
    /// Total duration of the run
    pub duration: Duration,
    /// Versions applied during the run, oldest first
    pub processed_versions: Vec<String>,
}

impl MigrationResult {
    /// Creates a successful migration result.
    pub fn success(duration: Duration, processed_versions: Vec<String>) -> Self {
        Self {
            duration,
            processed_versions,
        }
    }

    /// Returns `true` if nothing was applied.
    #[inline]
    pub fn is_no_op(&self) -> bool {
        self.processed_versions.is_empty()
    }

    /// Returns the last applied version, if any.
    pub fn last_processed_version(&self) -> Option<&str> {
        self.processed_versions.last().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_run_is_no_op() {
        let result = MigrationResult::success(Duration::from_millis(10), vec![]);
        assert!(result.is_no_op());
        assert_eq!(result.last_processed_version(), None);
    }

    #[test]
    fn last_version_is_newest() {
        let versions = vec!["20250601000000".to_owned(), "20250702000000".to_owned()];
        let result = MigrationResult::success(Duration::from_millis(10), versions);
        assert!(!result.is_no_op());
        assert_eq!(result.last_processed_version(), Some("20250702000000"));
    }
}
