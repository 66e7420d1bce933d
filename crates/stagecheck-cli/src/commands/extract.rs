use crate::support::{read_text_or_exit, render_json_or_exit};
use stagecheck_sources::{ClaimSource, SourceDocument, SourceKind};
use std::path::Path;

pub fn run(kind: SourceKind, path: String, json: bool) {
    let path = Path::new(&path);
    let text = read_text_or_exit(path, "source");
    let document = SourceDocument::parse(kind, &text, &path.display().to_string())
        .unwrap_or_else(|err| {
            eprintln!("error: {err}");
            std::process::exit(2);
        });
    let claims = document.claims();
    let repos = claims
        .repos
        .as_ref()
        .filter(|_| kind.provides_repo_paths());

    if json {
        let payload = serde_json::json!({
            "kind": kind,
            "path": path.display().to_string(),
            "claims": claims.by_name,
            "repo_paths": repos.map(|repos| &repos.paths),
            "repo_statuses": repos.map(|repos| &repos.statuses),
        });
        println!("{}", render_json_or_exit(&payload));
        return;
    }

    println!("stagecheck extract");
    println!("  Kind: {kind}");
    println!("  Path: {}", path.display());
    println!("  Claims: {}", claims.by_name.len());
    for (key, status) in claims.by_name.iter() {
        println!("    {key}: {status}");
    }
    if let Some(repos) = repos {
        println!("  Repository paths: {}", repos.paths.len());
        for (key, repo_path) in repos.paths.iter() {
            println!("    {key}: {repo_path}");
        }
        println!("  Repository statuses: {}", repos.statuses.len());
        for (repo_path, status) in repos.statuses.iter() {
            println!("    {repo_path}: {status}");
        }
    }
}
