use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::api::{AliasSummary, FunctionSummary, LATEST_VERSION, VersionSummary};

/// ARNs of the functions whose name starts with `prefix` (all of them when `None`).
pub fn filter_by_prefix(functions: Vec<FunctionSummary>, prefix: Option<&str>) -> Vec<String> {
    functions
        .into_iter()
        .filter(|function| prefix.is_none_or(|prefix| function.name.starts_with(prefix)))
        .map(|function| function.arn)
        .collect()
}

/// Uniform in-place shuffle (Fisher-Yates).
pub fn shuffle<R: Rng + ?Sized>(ids: &mut [String], rng: &mut R) {
    ids.shuffle(rng);
}

/// Every published version, dropping `$LATEST`.
pub fn published_versions(versions: Vec<VersionSummary>) -> Vec<String> {
    versions
        .into_iter()
        .filter(|version| !version.is_latest())
        .map(|version| version.version)
        .collect()
}

/// Union of every alias's reference set, first-seen order, no duplicates.
pub fn referenced_versions(aliases: &[AliasSummary]) -> Vec<String> {
    let mut seen = HashSet::new();
    aliases
        .iter()
        .flat_map(AliasSummary::referenced_versions)
        .filter(|version| seen.insert(*version))
        .map(str::to_string)
        .collect()
}

/// Candidates that no alias references, in candidate order.
///
/// `$LATEST` never appears in the result even if passed in as a candidate.
pub fn deletion_set(candidates: &[String], retained: &[String]) -> Vec<String> {
    let retained: HashSet<&str> = retained.iter().map(String::as_str).collect();
    let mut seen = HashSet::new();

    candidates
        .iter()
        .map(String::as_str)
        .filter(|version| *version != LATEST_VERSION)
        .filter(|version| !retained.contains(version))
        .filter(|version| seen.insert(*version))
        .map(str::to_string)
        .collect()
}
