//! Consistency between alignment labels and a reference taxon set.
//!
//! The reference set usually comes from the leaves of a phylogenetic tree.
//! Mismatches are a finding about the data, not an error: every difference is
//! reported and the check still completes.

use std::collections::BTreeSet;
use std::collections::HashSet;

use tracing::warn;

use crate::alignment::Alignment;

/// The differences between an alignment's labels and a reference taxon set.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Report {
    /// Labels found in the alignment but not in the reference set.
    alignment_only: BTreeSet<String>,

    /// Labels found in the reference set but not in the alignment.
    reference_only: BTreeSet<String>,
}

impl Report {
    /// Gets the labels found in the alignment but not in the reference set.
    pub fn alignment_only(&self) -> &BTreeSet<String> {
        &self.alignment_only
    }

    /// Gets the labels found in the reference set but not in the alignment.
    pub fn reference_only(&self) -> &BTreeSet<String> {
        &self.reference_only
    }

    /// Returns whether both sets are identical.
    pub fn is_consistent(&self) -> bool {
        self.alignment_only.is_empty() && self.reference_only.is_empty()
    }
}

/// Computes the differences between two label sets.
///
/// # Examples
///
/// ```
/// use std::collections::HashSet;
///
/// use msapart::consistency;
///
/// let alignment = HashSet::from([String::from("a"), String::from("b")]);
/// let reference = HashSet::from([String::from("a"), String::from("c")]);
///
/// let report = consistency::compare(&alignment, &reference);
/// assert!(!report.is_consistent());
/// assert!(report.alignment_only().contains("b"));
/// assert!(report.reference_only().contains("c"));
/// ```
pub fn compare(alignment: &HashSet<String>, reference: &HashSet<String>) -> Report {
    Report {
        alignment_only: alignment.difference(reference).cloned().collect(),
        reference_only: reference.difference(alignment).cloned().collect(),
    }
}

/// Checks that two label sets are identical, logging every difference.
///
/// Returns `true` if the sets are identical.
pub fn check(alignment: &HashSet<String>, reference: &HashSet<String>) -> bool {
    let report = compare(alignment, reference);

    for label in report.reference_only() {
        warn!(taxon = %label, "taxon in the reference set is not present in the alignment");
    }

    for label in report.alignment_only() {
        warn!(taxon = %label, "taxon in the alignment is not present in the reference set");
    }

    report.is_consistent()
}

impl Alignment {
    /// Checks that the alignment's labels are exactly `reference`, logging
    /// every difference.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::HashSet;
    ///
    /// use msapart::alignment::Builder;
    ///
    /// let alignment = Builder::default()
    ///     .push_sequence("a", "ACGT")
    ///     .push_sequence("b", "ACGA")
    ///     .try_build()?;
    ///
    /// let tree = HashSet::from([String::from("a"), String::from("b")]);
    /// assert!(alignment.is_consistent_with(&tree));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn is_consistent_with(&self, reference: &HashSet<String>) -> bool {
        check(&self.label_set(), reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::Builder;

    fn set(labels: &[&str]) -> HashSet<String> {
        labels.iter().map(|label| label.to_string()).collect()
    }

    #[test]
    fn identical_sets_are_consistent() {
        let report = compare(&set(&["a", "b"]), &set(&["a", "b"]));

        assert!(report.is_consistent());
        assert!(report.alignment_only().is_empty());
        assert!(report.reference_only().is_empty());
        assert!(check(&set(&["a", "b"]), &set(&["b", "a"])));
    }

    #[test]
    fn every_asymmetric_difference_is_reported() {
        let report = compare(&set(&["a", "b"]), &set(&["a", "c"]));

        assert!(!report.is_consistent());
        assert_eq!(report.alignment_only(), &BTreeSet::from([String::from("b")]));
        assert_eq!(report.reference_only(), &BTreeSet::from([String::from("c")]));
        assert!(!check(&set(&["a", "b"]), &set(&["a", "c"])));
    }

    #[test]
    fn one_sided_differences_are_inconsistent() {
        let report = compare(&set(&["a", "b", "c"]), &set(&["a"]));
        assert_eq!(
            report.alignment_only().iter().collect::<Vec<_>>(),
            vec!["b", "c"]
        );
        assert!(report.reference_only().is_empty());

        let report = compare(&set(&[]), &set(&["x"]));
        assert_eq!(report.reference_only().len(), 1);
        assert!(!report.is_consistent());
    }

    #[test]
    fn an_alignment_checks_its_own_labels() -> Result<(), Box<dyn std::error::Error>> {
        let alignment = Builder::default()
            .push_sequence("human", "AC")
            .push_sequence("chimp", "AG")
            .try_build()?;

        assert!(alignment.is_consistent_with(&set(&["chimp", "human"])));
        assert!(!alignment.is_consistent_with(&set(&["chimp", "human", "gorilla"])));
        assert!(!alignment.is_consistent_with(&set(&["chimp"])));

        Ok(())
    }
}
