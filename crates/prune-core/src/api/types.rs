use std::collections::BTreeMap;

use serde::Serialize;

/// The mutable, unpublished version every function has. Never a deletion candidate.
pub const LATEST_VERSION: &str = "$LATEST";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionSummary {
    pub name: String,
    pub arn: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VersionSummary {
    pub version: String,
}

impl VersionSummary {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }

    pub fn is_latest(&self) -> bool {
        self.version == LATEST_VERSION
    }
}

/// Weighted traffic shifting: extra versions and the share of traffic each receives.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AliasRouting {
    pub additional_version_weights: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AliasSummary {
    pub name: String,
    pub function_version: String,
    pub routing: Option<AliasRouting>,
}

impl AliasSummary {
    pub fn new(name: impl Into<String>, function_version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            function_version: function_version.into(),
            routing: None,
        }
    }

    /// Route `weight` of traffic to `version` in addition to the primary version.
    pub fn with_weighted_version(mut self, version: impl Into<String>, weight: f64) -> Self {
        self.routing
            .get_or_insert_with(AliasRouting::default)
            .additional_version_weights
            .insert(version.into(), weight);
        self
    }

    /// Primary version first, then every weighted-routing target.
    pub fn referenced_versions(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.function_version.as_str()).chain(
            self.routing
                .iter()
                .flat_map(|routing| routing.additional_version_weights.keys())
                .map(String::as_str),
        )
    }
}

/// Parameters for one page of a list call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub marker: Option<String>,
    pub page_size: u32,
}

impl PageRequest {
    pub fn new(marker: Option<String>, page_size: u32) -> Self {
        Self { marker, page_size }
    }
}

/// One page of results. `next_marker` is `None` on the last page.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_marker: Option<String>,
}

impl<T> Page<T> {
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_marker: None,
        }
    }

    pub fn with_next(items: Vec<T>, next_marker: impl Into<String>) -> Self {
        Self {
            items,
            next_marker: Some(next_marker.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_without_routing_references_primary_only() {
        let alias = AliasSummary::new("live", "7");
        let refs: Vec<&str> = alias.referenced_versions().collect();
        assert_eq!(refs, vec!["7"]);
    }

    #[test]
    fn test_alias_with_weighted_routing_references_all_targets() {
        let alias = AliasSummary::new("live", "3")
            .with_weighted_version("4", 10.0)
            .with_weighted_version("5", 90.0);
        let refs: Vec<&str> = alias.referenced_versions().collect();
        assert_eq!(refs, vec!["3", "4", "5"]);
    }

    #[test]
    fn test_latest_detection() {
        assert!(VersionSummary::new("$LATEST").is_latest());
        assert!(!VersionSummary::new("12").is_latest());
    }

    #[test]
    fn test_page_constructors() {
        let page = Page::with_next(vec![1, 2], "m1");
        assert_eq!(page.next_marker.as_deref(), Some("m1"));
        let page: Page<i32> = Page::last(vec![]);
        assert!(page.next_marker.is_none());
    }
}
