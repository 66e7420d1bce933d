//! The reconciliation engine.
//!
//! For each registry record, in registry order, every source is asked for
//! a claim through [`resolve_claim`]; a record produces a [`MismatchRow`]
//! when any resolved claim differs from the expected status. Absence of a
//! claim is never a disagreement. Output rows are sorted by project name,
//! case-insensitively.

use crate::claims::{SourceClaims, SourceId};
use crate::normalize::normalize_name;
use crate::record::{ExpectedRecord, MismatchRow};
use crate::repo_path::{RepoPath, extract_github_path, paths_align};
use crate::status::Status;
use indexmap::IndexMap;
use tracing::debug;

/// A configured source's claims under its id.
#[derive(Debug, Clone)]
pub struct IndexedSource {
    pub id: SourceId,
    pub claims: SourceClaims,
}

impl IndexedSource {
    pub fn new(id: SourceId, claims: SourceClaims) -> Self {
        Self { id, claims }
    }

    /// Status of the item linking to `path`, for sources with repository
    /// links.
    pub fn status_for_path(&self, path: &RepoPath) -> Option<&Status> {
        self.claims.repos.as_ref()?.statuses.get(path)
    }
}

/// Two-stage lookup of one source's claim about one project.
///
/// 1. By project key. When the source publishes repository paths and both
///    the registry and the source have a non-empty path for this key, a
///    claim whose paths do not align is discarded: it is taken to be a
///    different project sharing the display name.
/// 2. If no name claim survives and the registry path is non-empty, look the
///    path up in the source's path → status index, which carries each
///    linked item's own status.
pub fn resolve_claim(source: &IndexedSource, key: &str, expected_path: &RepoPath) -> Option<Status> {
    let Some(repos) = &source.claims.repos else {
        return source.claims.by_name.get(key).cloned();
    };

    let mut claim = source.claims.by_name.get(key);
    if claim.is_some()
        && !expected_path.is_empty()
        && let Some(source_path) = repos.paths.get(key)
        && !paths_align(expected_path.as_str(), source_path.as_str())
    {
        debug!(
            source = %source.id,
            project = key,
            expected_path = %expected_path,
            source_path = %source_path,
            "discarding name match with conflicting repository path"
        );
        claim = None;
    }

    if claim.is_none() && !expected_path.is_empty() {
        claim = source.status_for_path(expected_path);
        if let Some(status) = claim {
            debug!(
                source = %source.id,
                project = key,
                path = %expected_path,
                status = %status,
                "resolved claim by repository path"
            );
        }
    }
    claim.cloned()
}

/// Holds every configured source and diffs registry records against them.
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    sources: Vec<IndexedSource>,
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a source. A source registered twice under the same id keeps
    /// its original column position and takes the newer claims.
    pub fn add_source(&mut self, id: SourceId, claims: SourceClaims) {
        let indexed = IndexedSource::new(id, claims);
        if let Some(existing) = self.sources.iter_mut().find(|s| s.id == indexed.id) {
            *existing = indexed;
        } else {
            self.sources.push(indexed);
        }
    }

    pub fn with_source(mut self, id: impl Into<SourceId>, claims: SourceClaims) -> Self {
        self.add_source(id.into(), claims);
        self
    }

    pub fn source_ids(&self) -> impl Iterator<Item = &SourceId> {
        self.sources.iter().map(|source| &source.id)
    }

    /// Resolve every source's claim for one record, in source order.
    pub fn observe(&self, record: &ExpectedRecord) -> IndexMap<SourceId, Option<Status>> {
        let key = normalize_name(&record.name);
        let expected_path = record
            .repository_url()
            .map(extract_github_path)
            .unwrap_or_default();
        self.sources
            .iter()
            .map(|source| {
                (
                    source.id.clone(),
                    resolve_claim(source, &key, &expected_path),
                )
            })
            .collect()
    }

    /// Diff one record; `Some` when at least one source disagrees.
    pub fn check(&self, record: &ExpectedRecord) -> Option<MismatchRow> {
        let observed = self.observe(record);
        let disagrees = observed
            .values()
            .flatten()
            .any(|status| *status != record.expected_status);
        disagrees.then(|| MismatchRow {
            name: record.name.clone(),
            expected_status: record.expected_status.clone(),
            observed,
        })
    }

    /// Diff all records. Rows come back sorted by name, case-insensitively;
    /// records with equal folded names keep registry order.
    pub fn reconcile(&self, expected: &[ExpectedRecord]) -> Vec<MismatchRow> {
        let mut rows: Vec<MismatchRow> = expected
            .iter()
            .filter_map(|record| self.check(record))
            .collect();
        rows.sort_by_cached_key(|row| row.name.to_lowercase());
        debug!(
            records = expected.len(),
            sources = self.sources.len(),
            mismatches = rows.len(),
            "reconciliation finished"
        );
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claims::{ClaimMap, RepoIndex};

    const SOURCES: [&str; 5] = ["landscape", "clomonitor", "maintainers", "devstats", "artwork"];

    fn names(entries: &[(&str, Status)]) -> ClaimMap {
        let mut claims = ClaimMap::new();
        for (name, status) in entries {
            claims.claim(name, status.clone());
        }
        claims
    }

    /// Claims as a tree source yields them: one `(name, status, repo_url)`
    /// per item, in document order.
    fn linked(items: &[(&str, Status, &str)]) -> SourceClaims {
        let mut by_name = ClaimMap::new();
        let mut repos = RepoIndex::new();
        for (name, status, url) in items {
            by_name.claim(name, status.clone());
            repos.record_item(name, extract_github_path(url), Some(status));
        }
        SourceClaims::with_repos(by_name, repos)
    }

    fn empty_reconciler() -> Reconciler {
        SOURCES.iter().fold(Reconciler::new(), |acc, id| {
            acc.with_source(*id, SourceClaims::default())
        })
    }

    #[test]
    fn name_claim_without_repo_paths_is_used_directly() {
        let source = IndexedSource::new(
            SourceId::from("clomonitor"),
            SourceClaims::names_only(names(&[("Envoy", Status::Graduated)])),
        );
        let expected_path = extract_github_path("https://github.com/other/envoy");
        assert_eq!(
            resolve_claim(&source, "envoy", &expected_path),
            Some(Status::Graduated)
        );
    }

    #[test]
    fn conflicting_repo_path_discards_name_claim() {
        let source = IndexedSource::new(
            SourceId::from("landscape"),
            linked(&[("Envoy", Status::Sandbox, "https://github.com/someone/envoy")]),
        );
        let expected_path = extract_github_path("https://github.com/envoyproxy/envoy");
        assert_eq!(resolve_claim(&source, "envoy", &expected_path), None);
    }

    #[test]
    fn aligned_org_path_keeps_name_claim() {
        let source = IndexedSource::new(
            SourceId::from("landscape"),
            linked(&[("Envoy", Status::Graduated, "https://github.com/envoyproxy")]),
        );
        let expected_path = extract_github_path("https://github.com/envoyproxy/envoy");
        assert_eq!(
            resolve_claim(&source, "envoy", &expected_path),
            Some(Status::Graduated)
        );
    }

    #[test]
    fn unresolvable_registry_url_does_not_discard_name_claim() {
        let source = IndexedSource::new(
            SourceId::from("landscape"),
            linked(&[(
                "Envoy",
                Status::Graduated,
                "https://github.com/envoyproxy/envoy",
            )]),
        );
        let expected_path = extract_github_path("https://gitlab.com/envoy/envoy");
        assert!(expected_path.is_empty());
        assert_eq!(
            resolve_claim(&source, "envoy", &expected_path),
            Some(Status::Graduated)
        );
    }

    #[test]
    fn discarded_name_claim_falls_back_to_repo_path() {
        let source = IndexedSource::new(
            SourceId::from("landscape"),
            linked(&[
                ("Envoy", Status::Sandbox, "https://github.com/someone/envoy"),
                (
                    "Envoy Proxy",
                    Status::Graduated,
                    "https://github.com/envoyproxy/envoy",
                ),
            ]),
        );
        let expected_path = extract_github_path("https://github.com/envoyproxy/envoy");
        assert_eq!(
            resolve_claim(&source, "envoy", &expected_path),
            Some(Status::Graduated)
        );
    }

    #[test]
    fn repo_path_fallback_resolves_and_reports_no_mismatch() {
        let landscape = linked(&[(
            "Envoy Proxy",
            Status::Graduated,
            "https://github.com/cncf/envoy",
        )]);
        let reconciler = empty_reconciler().with_source("landscape", landscape);
        let record = ExpectedRecord::new("Envoy", Status::Graduated)
            .with_repository_url("https://github.com/cncf/envoy");

        let observed = reconciler.observe(&record);
        assert_eq!(
            observed.get(&SourceId::from("landscape")),
            Some(&Some(Status::Graduated))
        );
        assert!(reconciler.reconcile(&[record]).is_empty());
    }

    #[test]
    fn path_fallback_uses_the_status_of_the_linked_item() {
        let mut by_name = ClaimMap::new();
        let mut repos = RepoIndex::new();
        let items = [
            ("Flux", Status::Sandbox, ""),
            ("flux", Status::Graduated, "https://github.com/fluxcd/flux2"),
            ("Shared", Status::Sandbox, "https://github.com/vendor/shared"),
            ("shared", Status::Incubating, "https://github.com/cncf/shared"),
        ];
        for (name, status, url) in &items {
            by_name.claim(name, status.clone());
            repos.record_item(name, extract_github_path(url), Some(status));
        }
        let reconciler =
            Reconciler::new().with_source("landscape", SourceClaims::with_repos(by_name, repos));

        let flux = ExpectedRecord::new("FluxCD", Status::Graduated)
            .with_repository_url("https://github.com/fluxcd/flux2");
        let shared = ExpectedRecord::new("Shared Thing", Status::Incubating)
            .with_repository_url("https://github.com/cncf/shared");

        let landscape = SourceId::from("landscape");
        assert_eq!(
            reconciler.observe(&flux).get(&landscape),
            Some(&Some(Status::Graduated))
        );
        assert_eq!(
            reconciler.observe(&shared).get(&landscape),
            Some(&Some(Status::Incubating))
        );
        let rows = reconciler.reconcile(&[flux, shared]);
        assert!(rows.is_empty());
    }

    #[test]
    fn single_disagreeing_source_produces_one_row() {
        let reconciler = empty_reconciler().with_source(
            "maintainers",
            SourceClaims::names_only(names(&[("linkerd", Status::Sandbox)])),
        );
        let rows = reconciler.reconcile(&[ExpectedRecord::new("Linkerd", Status::Incubating)]);

        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.name, "Linkerd");
        assert_eq!(row.expected_status, Status::Incubating);
        assert_eq!(row.observed.len(), SOURCES.len());
        for source in SOURCES {
            let observed = row.observed_for(&SourceId::from(source));
            if source == "maintainers" {
                assert_eq!(observed, Some(&Status::Sandbox));
            } else {
                assert_eq!(observed, None, "source {source}");
            }
        }
    }

    #[test]
    fn absent_claims_never_mismatch() {
        let reconciler = empty_reconciler();
        let records: Vec<ExpectedRecord> = Status::KNOWN
            .iter()
            .map(|status| ExpectedRecord::new("Ghost", status.clone()))
            .collect();
        assert!(reconciler.reconcile(&records).is_empty());
    }

    #[test]
    fn agreement_everywhere_produces_no_row() {
        let reconciler = Reconciler::new()
            .with_source("a", SourceClaims::names_only(names(&[("Envoy", Status::Graduated)])))
            .with_source("b", SourceClaims::names_only(names(&[("ENVOY", Status::Graduated)])));
        let rows = reconciler.reconcile(&[ExpectedRecord::new("envoy ", Status::Graduated)]);
        assert!(rows.is_empty());
    }

    #[test]
    fn unknown_vocabulary_surfaces_as_mismatch() {
        let reconciler = Reconciler::new().with_source(
            "a",
            SourceClaims::names_only(names(&[(
                "Envoy",
                Status::Other("emeritus".to_string()),
            )])),
        );
        let rows = reconciler.reconcile(&[ExpectedRecord::new("Envoy", Status::Graduated)]);
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn rows_are_sorted_case_insensitively() {
        let reconciler = Reconciler::new().with_source(
            "a",
            SourceClaims::names_only(names(&[
                ("zeta", Status::Sandbox),
                ("Alpha", Status::Sandbox),
                ("beta", Status::Sandbox),
            ])),
        );
        let records = [
            ExpectedRecord::new("zeta", Status::Graduated),
            ExpectedRecord::new("beta", Status::Graduated),
            ExpectedRecord::new("Alpha", Status::Graduated),
        ];
        let order: Vec<String> = reconciler
            .reconcile(&records)
            .into_iter()
            .map(|row| row.name)
            .collect();
        assert_eq!(order, vec!["Alpha", "beta", "zeta"]);
    }

    #[test]
    fn re_registering_a_source_keeps_its_column() {
        let mut reconciler = Reconciler::new()
            .with_source("a", SourceClaims::default())
            .with_source("b", SourceClaims::default());
        reconciler.add_source(
            SourceId::from("a"),
            SourceClaims::names_only(names(&[("Envoy", Status::Sandbox)])),
        );
        let ids: Vec<&str> = reconciler.source_ids().map(SourceId::as_str).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(
            reconciler
                .reconcile(&[ExpectedRecord::new("Envoy", Status::Graduated)])
                .len(),
            1
        );
    }
}
