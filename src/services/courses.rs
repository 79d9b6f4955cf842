//! Course code validation and branch lookup.
//!
//! Normalizes user-supplied course codes ("ehb313e", "EHB 313E") and
//! resolves the branch prefix against the configured branch table. The
//! chat surface calls this before handing subscriptions to the store.

use std::collections::HashMap;

use regex::Regex;

use crate::error::{AppError, Result};
use crate::models::BranchInfo;

/// A course code accepted by the validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCourse {
    /// Normalized code, "ABC 123E" shape
    pub course_code: String,

    /// Branch the code prefix maps to
    pub branch_id: u32,
}

/// Validates raw course codes against the branch table.
pub struct CourseValidator {
    branches: HashMap<String, BranchInfo>,
    pattern: Regex,
}

impl CourseValidator {
    /// Build a validator over the configured branch table.
    pub fn new(branches: &[BranchInfo]) -> Result<Self> {
        let pattern = Regex::new(r"^([A-Z]{3})\s*([0-9]{3}[A-Z]?)$")
            .map_err(|e| AppError::config(format!("course code pattern: {e}")))?;
        let branches = branches
            .iter()
            .map(|branch| (branch.code.clone(), branch.clone()))
            .collect();
        Ok(Self { branches, pattern })
    }

    /// Validate and normalize a raw course code.
    pub fn validate(&self, raw: &str) -> Result<ValidatedCourse> {
        let normalized = raw.trim().to_uppercase();
        let captures = self.pattern.captures(&normalized).ok_or_else(|| {
            AppError::validation(format!("unrecognized course code format: '{raw}'"))
        })?;

        let prefix = &captures[1];
        let number = &captures[2];
        let branch = self
            .branches
            .get(prefix)
            .ok_or_else(|| AppError::validation(format!("unknown branch code: '{prefix}'")))?;

        Ok(ValidatedCourse {
            course_code: format!("{prefix} {number}"),
            branch_id: branch.id,
        })
    }

    /// Display name for a branch code, if known.
    pub fn branch_name(&self, code: &str) -> Option<&str> {
        self.branches.get(code).map(|branch| branch.name.as_str())
    }

    /// All known branch codes, sorted.
    pub fn branch_codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.branches.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Config;

    fn validator() -> CourseValidator {
        CourseValidator::new(&Config::default().branches).unwrap()
    }

    #[test]
    fn accepts_spaced_code() {
        let course = validator().validate("EHB 313E").unwrap();
        assert_eq!(course.course_code, "EHB 313E");
        assert_eq!(course.branch_id, 196);
    }

    #[test]
    fn accepts_compact_lowercase_code() {
        let course = validator().validate("ehb313e").unwrap();
        assert_eq!(course.course_code, "EHB 313E");
        assert_eq!(course.branch_id, 196);
    }

    #[test]
    fn accepts_code_without_suffix_letter() {
        let course = validator().validate("mat 101").unwrap();
        assert_eq!(course.course_code, "MAT 101");
        assert_eq!(course.branch_id, 26);
    }

    #[test]
    fn rejects_unknown_branch() {
        assert!(validator().validate("XXX 101").is_err());
    }

    #[test]
    fn rejects_malformed_codes() {
        let v = validator();
        assert!(v.validate("").is_err());
        assert!(v.validate("MAT").is_err());
        assert!(v.validate("MAT 1").is_err());
        assert!(v.validate("MATEMATIK 101").is_err());
        assert!(v.validate("101 MAT").is_err());
    }

    #[test]
    fn branch_lookup_helpers() {
        let v = validator();
        assert_eq!(v.branch_name("MAT"), Some("Matematik"));
        assert_eq!(v.branch_name("ZZZ"), None);
        assert!(v.branch_codes().contains(&"EHB"));
    }
}
