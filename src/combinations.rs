//! Single-survivor removal sets for "at most one of N" violations
//!
//! Given the annotations found on an element, produce one removal set per
//! annotation: keep that one, remove every other present member. Candidate
//! order follows the order the annotations were discovered on the element -
//! this ordering is observable through quick-fix labels and must not be
//! canonicalized.

/// One generated combination: the survivor and everything to remove
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurvivorSet {
    pub keep: String,
    pub remove: Vec<String>,
}

/// For each present annotation, the set removing all the others.
///
/// Returns one entry per input, in input order; each `remove` list preserves
/// input order as well and never contains the survivor.
pub fn single_survivor_sets(present: &[String]) -> Vec<SurvivorSet> {
    present
        .iter()
        .map(|keep| SurvivorSet {
            keep: keep.clone(),
            remove: present
                .iter()
                .filter(|other| *other != keep)
                .cloned()
                .collect(),
        })
        .collect()
}
