use crate::config::{AuditConfig, SourceConfig};
use crate::support::{read_text_or_exit, render_json_or_exit, sha256_hex, write_text_or_exit};
use serde::Serialize;
use stagecheck_kernel::{AuditReport, Reconciler, SourceColumn, SourceId, render_markdown};
use stagecheck_sources::{ClaimSource, Manifest, SourceDocument};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub struct Args {
    pub config: String,
    pub out: Option<String>,
    pub json: bool,
    pub fail_on_mismatch: bool,
}

/// Digest of one input document, tying a report to the bytes it checked.
#[derive(Debug, Clone, Serialize)]
struct InputDigest {
    role: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    path: String,
    sha256: String,
}

impl InputDigest {
    fn new(role: &'static str, id: Option<&str>, path: &Path, text: &str) -> Self {
        Self {
            role,
            id: id.map(str::to_string),
            path: path.display().to_string(),
            sha256: sha256_hex(text.as_bytes()),
        }
    }
}

#[derive(Debug, Serialize)]
struct AuditPayload<'a> {
    mismatch_count: usize,
    report: &'a AuditReport,
    inputs: &'a [InputDigest],
}

pub fn run(args: Args) {
    let config_path = PathBuf::from(&args.config);
    let config = AuditConfig::load(&config_path).unwrap_or_else(|err| {
        eprintln!("error: {err}");
        std::process::exit(2);
    });

    let manifest_text = read_text_or_exit(&config.manifest, "manifest");
    let manifest = Manifest::from_yaml_str(&manifest_text, &config.manifest.display().to_string())
        .unwrap_or_else(|err| {
            eprintln!("error: {err}");
            std::process::exit(2);
        });
    let expected = manifest.expected_records();
    info!(records = expected.len(), "loaded registry manifest");

    let mut inputs = vec![InputDigest::new(
        "manifest",
        None,
        &config.manifest,
        &manifest_text,
    )];
    let mut reconciler = Reconciler::new();
    let mut columns = Vec::with_capacity(config.sources.len());
    for source in &config.sources {
        let text = read_text_or_exit(&source.path, "source");
        let document = SourceDocument::parse(source.kind, &text, &source.path.display().to_string())
            .unwrap_or_else(|err| {
                eprintln!("error: source `{}`: {err}", source.id);
                std::process::exit(2);
            });
        let claims = document.claims();
        info!(source = %source.id, kind = %source.kind, claims = claims.by_name.len(), "indexed source");
        reconciler.add_source(source.id.as_str().into(), claims);
        columns.push(column(source));
        inputs.push(InputDigest::new(
            "source",
            Some(source.id.as_str()),
            &source.path,
            &text,
        ));
    }

    let rows = reconciler.reconcile(&expected);
    for row in &rows {
        let sources: Vec<&str> = row.disagreeing_sources().map(SourceId::as_str).collect();
        debug!(project = %row.name, expected = %row.expected_status, ?sources, "status mismatch");
    }
    let registry_ref = config
        .manifest_url
        .clone()
        .unwrap_or_else(|| config.manifest.display().to_string());
    let mut report = AuditReport::new(columns, rows).with_registry_ref(registry_ref);
    if let Some(title) = config.title.as_deref() {
        report = report.with_title(title);
    }
    let mismatches = report.mismatch_count();

    let rendered = if args.json {
        render_json_or_exit(&AuditPayload {
            mismatch_count: mismatches,
            report: &report,
            inputs: &inputs,
        })
    } else {
        render_markdown(&report)
    };

    match args.out.as_deref() {
        Some(out) => {
            let out_path = Path::new(out);
            write_text_or_exit(out_path, &rendered);
            println!(
                "Wrote audit with {mismatches} mismatches to {}",
                out_path.display()
            );
        }
        None => print!("{}", ensure_trailing_newline(rendered)),
    }

    if args.fail_on_mismatch && mismatches > 0 {
        std::process::exit(1);
    }
}

fn column(source: &SourceConfig) -> SourceColumn {
    let column = SourceColumn::new(source.id.as_str(), source.column_label());
    match source.url.as_deref() {
        Some(url) if !url.trim().is_empty() => column.with_url(url.trim()),
        _ => column,
    }
}

fn ensure_trailing_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}
