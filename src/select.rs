use crate::context::{Repository, RepositoryId, Session};
use crate::error::PageResult;
use crate::header::PageEnv;
use crate::node::Node;

/// An explicit selection for [`repository_select`], by id or by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectedRepo {
    Id(RepositoryId),
    Name(String),
}

/// Build a repository `<select>` under `target`.
///
/// Entries are split into "Highlighted" and "Other" optgroups only when both
/// groups would be non-empty; visible labels are column-aligned across all
/// entries using fixed widths. With no repositories at all, a single disabled
/// placeholder option is rendered and nothing else.
///
/// When the caller does not pass a selection: a lone repository selects
/// itself, otherwise the user's `defaultRepository` preference is consulted,
/// and failing that a disabled "Select a repository" placeholder leads the
/// list.
pub fn repository_select(
    target: &mut Node,
    env: &PageEnv,
    session: &dyn Session,
    selected: Option<SelectedRepo>,
    attributes: &[(&str, &str)],
) -> PageResult<()> {
    let select = target.select();
    for (name, value) in attributes {
        select.attr(*name, *value);
    }

    let rows = env.query.repositories();
    if rows.is_empty() {
        select
            .option()
            .attr("value", "-")
            .flag("disabled")
            .text("No repositories");
        return Ok(());
    }

    let mut selected = selected;
    if selected.is_none() {
        if rows.len() == 1 {
            selected = Some(SelectedRepo::Id(rows[0].id));
        } else {
            match session.preference("defaultRepository") {
                Some(name) if !name.is_empty() => selected = Some(SelectedRepo::Name(name)),
                _ => {
                    select
                        .option()
                        .attr("value", "-")
                        .flag("selected")
                        .flag("disabled")
                        .text("Select a repository");
                }
            }
        }
    }

    let highlighted = env.query.highlighted_repositories(session.id());

    let name_width = rows.iter().map(|row| row.name.len()).max().unwrap_or(0);
    let url_width = env.config.hostname.len()
        + 1
        + rows.iter().map(|row| row.path.len()).max().unwrap_or(0);
    let hostname = env.config.hostname.as_str();

    // Do not group options when there would be only one group.
    let grouped =
        !highlighted.is_empty() && !rows.iter().all(|row| highlighted.contains(&row.id));

    if grouped {
        let group = select.optgroup();
        group.attr("label", "Highlighted");
        for row in rows.iter().filter(|row| highlighted.contains(&row.id)) {
            add_option(group, row, hostname, name_width, url_width, selected.as_ref());
        }
        let group = select.optgroup();
        group.attr("label", "Other");
        for row in rows.iter().filter(|row| !highlighted.contains(&row.id)) {
            add_option(group, row, hostname, name_width, url_width, selected.as_ref());
        }
    } else {
        for row in &rows {
            add_option(select, row, hostname, name_width, url_width, selected.as_ref());
        }
    }

    Ok(())
}

fn add_option(
    parent: &mut Node,
    repository: &Repository,
    hostname: &str,
    name_width: usize,
    url_width: usize,
    selected: Option<&SelectedRepo>,
) {
    let url = format!("{}:{}", hostname, repository.path);
    let is_selected = match selected {
        Some(SelectedRepo::Id(id)) => *id == repository.id,
        Some(SelectedRepo::Name(name)) => *name == repository.name,
        None => false,
    };
    let label = format!(
        "{:<name_width$} {:>url_width$}",
        repository.name, url
    );
    parent
        .option()
        .attr("value", repository.name.as_str())
        .flag_if("selected", is_selected)
        .text(label);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_column_aligned() {
        let repository = Repository {
            id: 1,
            name: "tools".to_string(),
            path: "/var/git/tools.git".to_string(),
        };
        let mut parent = Node::new("select");
        add_option(&mut parent, &repository, "review.example.com", 8, 25, None);
        let html = parent.to_html();
        assert!(html.contains("tools    "));
        assert!(html.contains("review.example.com:/var/git/tools.git"));
    }
}
