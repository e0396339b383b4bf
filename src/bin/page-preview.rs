use std::collections::HashSet;
use std::env;
use std::fs;
use std::process;

use sable_page::{
    compose_header, repository_select, Config, Content, Document, HeaderOptions, PageEnv,
    PageError, PageResult, Query, Repository, RepositoryId, SectionTable, Session, UserId,
};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: page-preview <config.yaml>...");
        eprintln!();
        eprintln!("Renders a sample page for each deployment configuration and");
        eprintln!("prints the serialized HTML to stdout.");
        process::exit(1);
    }

    let mut exit_code = 0;

    for file_path in &args[1..] {
        match preview(file_path) {
            Ok(html) => {
                println!("{}", html);
            }
            Err(error) => {
                eprintln!("✗ {}: {}", file_path, error);
                exit_code = 1;
            }
        }
    }

    process::exit(exit_code);
}

fn preview(path: &str) -> PageResult<String> {
    let source = fs::read_to_string(path)
        .map_err(|error| PageError::Config(format!("Failed to read {}: {}", path, error)))?;
    let config = Config::from_yaml(&source)?;
    render_sample(&config)
}

struct PreviewSession;

impl Session for PreviewSession {
    fn is_anonymous(&self) -> bool {
        false
    }
    fn has_role(&self, _role: &str) -> bool {
        false
    }
    fn preference(&self, name: &str) -> Option<String> {
        match name {
            "style.defaultFont" => Some("font-family: sans-serif".to_string()),
            "style.sourceFont" => Some("font-family: monospace".to_string()),
            _ => None,
        }
    }
    fn name(&self) -> &str {
        "alice"
    }
    fn id(&self) -> UserId {
        1
    }
}

struct PreviewQuery;

impl Query for PreviewQuery {
    fn unread_news_count(&self, _user: UserId) -> u64 {
        2
    }
    fn repositories(&self) -> Vec<Repository> {
        vec![
            Repository {
                id: 1,
                name: "docs".to_string(),
                path: "/var/git/docs.git".to_string(),
            },
            Repository {
                id: 2,
                name: "sable".to_string(),
                path: "/var/git/sable.git".to_string(),
            },
        ]
    }
    fn highlighted_repositories(&self, _user: UserId) -> HashSet<RepositoryId> {
        HashSet::from([2])
    }
}

fn render_sample(config: &Config) -> PageResult<String> {
    let query = PreviewQuery;
    let env = PageEnv {
        config,
        query: &query,
        extensions: None,
    };
    let session = PreviewSession;

    let mut document = Document::new();
    if let Some(prefix) = &config.static_prefix {
        document.set_static_prefix(prefix.clone());
    }
    document.set_title("Preview")?;

    compose_header(&env, &mut document, &session, HeaderOptions::default())?;

    let body = document.body_mut()?;
    let mut panel = SectionTable::with_default_columns(body, "Deployment preview")?;
    panel.add_section("Repositories", None);
    panel.add_item(
        "Repository",
        Content::build(|cell| {
            let _ = repository_select(cell, &env, &session, None, &[("name", "repository")]);
        }),
        Some("The repository selector as this deployment renders it."),
        &[],
    );
    panel.add_separator();
    panel.add_centered(Content::from(format!("hostname: {}", config.hostname)));

    document.render()
}
