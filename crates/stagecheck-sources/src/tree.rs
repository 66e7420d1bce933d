//! Tree extractor: category → subcategory → item (landscape YAML).
//!
//! Items carry a display name, a maturity status (an explicit `maturity`
//! field, falling back to `project`) and optionally a `repo_url`. This is
//! the one shape that yields repository paths as well as statuses.

use crate::document::ClaimSource;
use crate::error::SourceError;
use crate::lenient::{LenientList, first_non_blank, scalar_text};
use serde::Deserialize;
use serde_yaml::Value;
use stagecheck_kernel::{
    ClaimMap, RepoIndex, SourceClaims, Status, extract_github_path, normalize_status,
};
use tracing::debug;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LandscapeTree {
    #[serde(default)]
    pub landscape: LenientList<LandscapeCategory>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LandscapeCategory {
    #[serde(default, deserialize_with = "scalar_text")]
    pub name: Option<String>,
    #[serde(default)]
    pub subcategories: LenientList<LandscapeSubcategory>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LandscapeSubcategory {
    #[serde(default, deserialize_with = "scalar_text")]
    pub name: Option<String>,
    #[serde(default)]
    pub items: LenientList<LandscapeItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LandscapeItem {
    #[serde(default, deserialize_with = "scalar_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub maturity: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub project: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub repo_url: Option<String>,
}

impl LandscapeItem {
    pub fn display_name(&self) -> Option<&str> {
        first_non_blank([self.name.as_deref()])
    }

    /// `maturity` when set, else `project`.
    pub fn status(&self) -> Option<Status> {
        first_non_blank([self.maturity.as_deref(), self.project.as_deref()])
            .and_then(normalize_status)
    }
}

impl LandscapeTree {
    /// Parse landscape YAML. An empty document is an empty tree; any other
    /// non-mapping top level is a shape error.
    pub fn from_yaml_str(text: &str, origin: &str) -> Result<Self, SourceError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let value: Value =
            serde_yaml::from_str(text).map_err(|err| SourceError::yaml(origin, err))?;
        match value {
            Value::Null => Ok(Self::default()),
            Value::Mapping(_) => {
                serde_yaml::from_value(value).map_err(|err| SourceError::yaml(origin, err))
            }
            _ => Err(SourceError::shape(origin, "top-level mapping required")),
        }
    }

    /// Every item of every subcategory of every category, in document order.
    pub fn items(&self) -> impl Iterator<Item = &LandscapeItem> {
        self.landscape
            .iter()
            .flat_map(|category| category.subcategories.iter())
            .flat_map(|subcategory| subcategory.items.iter())
    }

    /// Project key → status. Items without a name or a status are skipped.
    pub fn status_claims(&self) -> ClaimMap {
        let mut claims = ClaimMap::new();
        for item in self.items() {
            let Some(name) = item.display_name() else {
                debug!("skipping landscape item without a name");
                continue;
            };
            let Some(status) = item.status() else {
                debug!(item = name, "skipping landscape item without a status");
                continue;
            };
            claims.claim(name, status);
        }
        claims
    }

    /// Repository identity from `repo_url`: project key → path, and each
    /// item's own status keyed by its own path. Items whose URL does not
    /// resolve are absent from both.
    pub fn repo_index(&self) -> RepoIndex {
        let mut repos = RepoIndex::new();
        for item in self.items() {
            let Some(url) = item.repo_url.as_deref() else {
                continue;
            };
            let status = item.status();
            repos.record_item(
                item.display_name().unwrap_or_default(),
                extract_github_path(url),
                status.as_ref(),
            );
        }
        repos
    }
}

impl ClaimSource for LandscapeTree {
    fn claims(&self) -> SourceClaims {
        SourceClaims::with_repos(self.status_claims(), self.repo_index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stagecheck_kernel::{ExpectedRecord, Reconciler, RepoPath, SourceId};

    const LANDSCAPE: &str = r#"
landscape:
  - category:
    name: Orchestration & Management
    subcategories:
      - subcategory:
        name: Service Proxy
        items:
          - item:
            name: Envoy
            project: graduated
            repo_url: https://github.com/envoyproxy/envoy
          - item:
            name: Contour
            maturity: Incubating
            project: sandbox
            repo_url: https://github.com/projectcontour/contour.git
          - item:
            name: Some Vendor Proxy
            repo_url: https://github.com/vendor/proxy
      - subcategory:
        name: Empty
        items:
  - category:
    name: Runtime
    subcategories:
      - subcategory:
        name: Container Runtime
        items:
          - item:
            name: envoy
            project: sandbox
            repo_url: https://github.com/someone/else
          - item:
            name: containerd
            maturity: ""
            project: Graduated
            repo_url: https://gitlab.com/containerd/containerd
          - item:
            project: sandbox
          - not an item
"#;

    fn tree() -> LandscapeTree {
        LandscapeTree::from_yaml_str(LANDSCAPE, "landscape.yml").expect("fixture should parse")
    }

    #[test]
    fn walks_every_item_in_document_order() {
        let tree = tree();
        let names: Vec<Option<&str>> = tree.items().map(LandscapeItem::display_name).collect();
        assert_eq!(
            names,
            vec![
                Some("Envoy"),
                Some("Contour"),
                Some("Some Vendor Proxy"),
                Some("envoy"),
                Some("containerd"),
                None,
            ]
        );
    }

    #[test]
    fn maturity_field_is_preferred_over_project() {
        let claims = tree().status_claims();
        assert_eq!(claims.get("contour"), Some(&Status::Incubating));
        assert_eq!(claims.get("containerd"), Some(&Status::Graduated));
    }

    #[test]
    fn items_without_status_are_skipped_and_first_seen_wins() {
        let claims = tree().status_claims();
        assert_eq!(claims.get("envoy"), Some(&Status::Graduated));
        assert_eq!(claims.get("some vendor proxy"), None);
        assert_eq!(claims.len(), 3);
    }

    #[test]
    fn repo_paths_come_from_resolvable_urls_only() {
        let paths = tree().repo_index().paths;
        assert_eq!(paths.get("envoy").map(RepoPath::as_str), Some("envoyproxy/envoy"));
        assert_eq!(
            paths.get("contour").map(RepoPath::as_str),
            Some("projectcontour/contour")
        );
        assert_eq!(
            paths.get("some vendor proxy").map(RepoPath::as_str),
            Some("vendor/proxy")
        );
        assert_eq!(paths.get("containerd"), None);
    }

    #[test]
    fn claims_expose_each_items_status_by_its_repo_path() {
        let claims = tree().claims();
        let statuses = claims.repos.expect("tree sources carry repos").statuses;
        assert_eq!(
            statuses.get(&extract_github_path("https://github.com/envoyproxy/envoy")),
            Some(&Status::Graduated)
        );
        assert_eq!(
            statuses.get(&extract_github_path("https://github.com/someone/else")),
            Some(&Status::Sandbox)
        );
        assert_eq!(
            statuses.get(&extract_github_path("https://github.com/vendor/proxy")),
            None
        );
        assert_eq!(statuses.len(), 3);
    }

    #[test]
    fn same_named_items_resolve_by_their_own_repository() {
        let landscape = r#"
landscape:
  - name: Delivery
    subcategories:
      - name: Continuous Delivery
        items:
          - name: Flux
            project: sandbox
          - name: flux
            project: graduated
            repo_url: https://github.com/fluxcd/flux2
          - name: Shared
            project: sandbox
            repo_url: https://github.com/vendor/shared
          - name: shared
            project: incubating
            repo_url: https://github.com/cncf/shared
"#;
        let tree = LandscapeTree::from_yaml_str(landscape, "landscape.yml")
            .expect("landscape should parse");
        let reconciler = Reconciler::new().with_source("landscape", tree.claims());
        let records = [
            ExpectedRecord::new("FluxCD", Status::Graduated)
                .with_repository_url("https://github.com/fluxcd/flux2"),
            ExpectedRecord::new("Shared Thing", Status::Incubating)
                .with_repository_url("https://github.com/cncf/shared"),
        ];

        let landscape_id = SourceId::from("landscape");
        let observed: Vec<Option<Status>> = records
            .iter()
            .map(|record| reconciler.observe(record)[&landscape_id].clone())
            .collect();
        assert_eq!(observed, vec![Some(Status::Graduated), Some(Status::Incubating)]);
        assert!(reconciler.reconcile(&records).is_empty());
    }

    #[test]
    fn empty_and_null_sections_read_as_empty() {
        assert_eq!(
            LandscapeTree::from_yaml_str("", "empty").expect("empty").items().count(),
            0
        );
        assert_eq!(
            LandscapeTree::from_yaml_str("landscape: ~\n", "null")
                .expect("null list")
                .items()
                .count(),
            0
        );
    }

    #[test]
    fn non_mapping_top_level_is_a_shape_error() {
        let err = LandscapeTree::from_yaml_str("- a\n- b\n", "list.yml")
            .expect_err("list top level should fail");
        assert!(matches!(err, SourceError::Shape { .. }));
    }
}
