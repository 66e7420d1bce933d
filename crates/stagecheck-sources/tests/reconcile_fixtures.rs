//! Integration tests: load one document of every shape from
//! tests/fixtures/, reconcile against the fixture manifest, and check the
//! exact mismatch rows.

use stagecheck_kernel::{MismatchRow, Reconciler, SourceId, Status};
use stagecheck_sources::{ClaimSource, Manifest, SourceDocument, SourceKind};
use std::path::PathBuf;

const SOURCES: [(&str, SourceKind, &str); 5] = [
    ("landscape", SourceKind::Tree, "landscape.yml"),
    ("clomonitor", SourceKind::RecordList, "clomonitor.yaml"),
    ("maintainers", SourceKind::Tabular, "project-maintainers.csv"),
    ("devstats", SourceKind::HeadingGrouped, "devstats.html"),
    ("artwork", SourceKind::IndentGrouped, "artwork.md"),
];

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn reconciler() -> Reconciler {
    SOURCES
        .iter()
        .fold(Reconciler::new(), |acc, (id, kind, file)| {
            let doc = SourceDocument::load(*kind, fixture(file))
                .unwrap_or_else(|e| panic!("failed to load {file}: {e}"));
            acc.with_source(*id, doc.claims())
        })
}

fn mismatch_rows() -> Vec<MismatchRow> {
    let manifest =
        Manifest::load(fixture("pcc_projects.yaml")).expect("fixture manifest should load");
    reconciler().reconcile(&manifest.expected_records())
}

fn observed(row: &MismatchRow) -> Vec<Option<&str>> {
    SOURCES
        .iter()
        .map(|(id, _, _)| row.observed_for(&SourceId::from(*id)).map(Status::as_str))
        .collect()
}

#[test]
fn manifest_lists_tracked_projects_only() {
    let manifest =
        Manifest::load(fixture("pcc_projects.yaml")).expect("fixture manifest should load");
    let names: Vec<String> = manifest
        .expected_records()
        .into_iter()
        .map(|record| record.name)
        .collect();
    assert_eq!(
        names,
        vec![
            "Kubernetes",
            "Envoy",
            "Prometheus",
            "Linkerd",
            "Backstage",
            "Kuasar",
            "rkt",
            "Newcomer",
        ]
    );
}

#[test]
fn fixture_sources_produce_the_expected_mismatches() {
    let rows = mismatch_rows();
    let names: Vec<&str> = rows.iter().map(|row| row.name.as_str()).collect();
    assert_eq!(names, vec!["Backstage", "Linkerd", "Newcomer", "Prometheus"]);

    let by_name = |name: &str| {
        rows.iter()
            .find(|row| row.name == name)
            .unwrap_or_else(|| panic!("missing row for {name}"))
    };

    let backstage = by_name("Backstage");
    assert_eq!(backstage.expected_status, Status::Incubating);
    assert_eq!(
        observed(backstage),
        vec![Some("incubating"), None, None, Some("sandbox"), Some("incubating")]
    );

    let linkerd = by_name("Linkerd");
    assert_eq!(linkerd.expected_status, Status::Incubating);
    assert_eq!(
        observed(linkerd),
        vec![
            Some("graduated"),
            Some("incubating"),
            Some("incubating"),
            Some("incubating"),
            Some("incubating"),
        ]
    );

    let newcomer = by_name("Newcomer");
    assert_eq!(newcomer.expected_status, Status::Forming);
    assert_eq!(observed(newcomer), vec![None, None, Some("sandbox"), None, None]);

    let prometheus = by_name("Prometheus");
    assert_eq!(prometheus.expected_status, Status::Graduated);
    assert_eq!(
        observed(prometheus),
        vec![
            Some("incubating"),
            Some("graduated"),
            None,
            Some("graduated"),
            Some("graduated"),
        ]
    );
}

#[test]
fn conflicting_landscape_name_is_resolved_by_repository() {
    let reconciler = reconciler();
    let manifest =
        Manifest::load(fixture("pcc_projects.yaml")).expect("fixture manifest should load");
    let envoy = manifest
        .expected_records()
        .into_iter()
        .find(|record| record.name == "Envoy")
        .expect("manifest lists Envoy");

    let observed = reconciler.observe(&envoy);
    assert_eq!(
        observed.get(&SourceId::from("landscape")),
        Some(&Some(Status::Graduated))
    );
    assert!(reconciler.check(&envoy).is_none());
}

#[test]
fn landscape_fixture_exposes_repository_paths() {
    let doc = SourceDocument::load(SourceKind::Tree, fixture("landscape.yml"))
        .expect("landscape fixture should load");
    let claims = doc.claims();
    let repos = claims.repos.expect("tree sources carry repo paths");
    assert_eq!(repos.paths.get("rkt").map(|path| path.as_str()), Some("rkt/rkt"));
    assert_eq!(
        repos.paths.get("backstage").map(|path| path.as_str()),
        Some("backstage")
    );
    assert_eq!(claims.by_name.get("envoy"), Some(&Status::Sandbox));
}
