// src/fs/filter.rs

use regex::RegexSet;

use crate::errors::{CommandError, Result};

/// Compiled include/exclude patterns matched against file *names* (not
/// full paths).
///
/// The include set defaults to match-all when no patterns are given;
/// excludes are applied after includes. Patterns are regexes searched
/// anywhere in the name, so `r"\.txt$"` matches `notes.txt`.
#[derive(Debug, Clone)]
pub struct FileFilter {
    include: RegexSet,
    exclude: Option<RegexSet>,
}

impl FileFilter {
    /// Compile a filter from include and exclude pattern lists.
    ///
    /// Fails with [`CommandError::InvalidArgument`] on an invalid pattern.
    pub fn new<S: AsRef<str>>(names: &[S], exclude_names: &[S]) -> Result<Self> {
        let include = if names.is_empty() {
            RegexSet::new([".*"])
        } else {
            RegexSet::new(names.iter().map(|s| s.as_ref()))
        }
        .map_err(|err| {
            CommandError::InvalidArgument(format!("invalid include pattern: {err}"))
        })?;

        let exclude = if exclude_names.is_empty() {
            None
        } else {
            Some(
                RegexSet::new(exclude_names.iter().map(|s| s.as_ref()))
                    .map_err(|err| {
                        CommandError::InvalidArgument(format!(
                            "invalid exclude pattern: {err}"
                        ))
                    })?,
            )
        };

        Ok(Self { include, exclude })
    }

    /// A filter that matches every file name.
    pub fn match_all() -> Self {
        Self::new::<&str>(&[], &[]).expect("match-all patterns are valid")
    }

    /// Returns true if `file_name` passes the include set and is not
    /// caught by the exclude set.
    pub fn matches(&self, file_name: &str) -> bool {
        if !self.include.is_match(file_name) {
            return false;
        }
        if let Some(exclude) = &self.exclude {
            if exclude.is_match(file_name) {
                return false;
            }
        }
        true
    }
}

impl Default for FileFilter {
    fn default() -> Self {
        Self::match_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_includes_match_everything() {
        let filter = FileFilter::match_all();
        assert!(filter.matches("anything.txt"));
        assert!(filter.matches(""));
    }

    #[test]
    fn include_then_exclude() {
        let filter =
            FileFilter::new(&[r".*\.ya?ml$"], &[r".*dev.*"]).unwrap();
        assert!(filter.matches("app.yml"));
        assert!(filter.matches("app.yaml"));
        assert!(!filter.matches("app.dev.yml"));
        assert!(!filter.matches("app.yamld"));
        assert!(!filter.matches("app.txt"));
    }

    #[test]
    fn invalid_pattern_is_invalid_argument() {
        let err = FileFilter::new(&["["], &[]).unwrap_err();
        assert!(matches!(err, CommandError::InvalidArgument(_)));
    }
}
