//! Terminal rendering of the categorized task tree.

use std::fmt::Write as _;

use colored::Colorize;
use triage::{MainGroup, VersionGroup};

/// Render the categorized tree as indented terminal lines.
#[must_use]
pub fn render_tree(groups: &[MainGroup]) -> String {
    let mut out = String::new();

    if groups.is_empty() {
        let _ = writeln!(out, "{}", "No assigned tasks.".dimmed());
        return out;
    }

    for main in groups {
        let total: usize = main.groups.iter().map(|g| g.tasks.len()).sum();
        let _ = writeln!(
            out,
            "{} {}",
            main.kind.label().bold(),
            format!("({total})").dimmed()
        );

        for group in &main.groups {
            render_version_group(&mut out, group);
        }
    }
    out
}

fn render_version_group(out: &mut String, group: &VersionGroup) {
    let header = group.title();
    let _ = writeln!(out, "  {} {}", header.cyan(), format!("({})", group.tasks.len()).dimmed());

    // Collapsed groups show only their header, like the tree view does.
    if group.collapsed_by_default() {
        return;
    }

    for task in &group.tasks {
        let _ = writeln!(out, "    {}  {}", task.key.yellow(), task.summary);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracker::{Task, VersionRef};
    use triage::categorize;

    fn task(id: &str, status: &str, versions: Vec<VersionRef>) -> Task {
        Task {
            id: id.to_string(),
            key: format!("PROJ-{id}"),
            summary: format!("summary {id}"),
            status: status.to_string(),
            versions,
        }
    }

    #[test]
    fn test_render_lists_groups_and_tasks() {
        colored::control::set_override(false);
        let tasks = vec![
            task(
                "1",
                "Open",
                vec![VersionRef {
                    name: "1.2.0".to_string(),
                    released: false,
                    release_date: None,
                }],
            ),
            task("2", "Open", vec![]),
        ];

        let rendered = render_tree(&categorize(&tasks));
        assert!(rendered.contains("Unreleased Versions (1)"));
        assert!(rendered.contains("  1.2.0 (1)"));
        assert!(rendered.contains("    PROJ-1  summary 1"));
        assert!(rendered.contains("  No version (1)"));
    }

    #[test]
    fn test_render_collapses_terminal_groups() {
        colored::control::set_override(false);
        let rendered = render_tree(&categorize(&[task("1", "Closed", vec![])]));
        assert!(rendered.contains("Done (1)"));
        assert!(!rendered.contains("PROJ-1"));
    }

    #[test]
    fn test_render_empty() {
        colored::control::set_override(false);
        assert!(render_tree(&[]).contains("No assigned tasks."));
    }
}
