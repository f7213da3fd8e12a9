//! Static-document export of a checklist.

use std::fmt::Write as _;

use crate::entities::{Checklist, ItemState};

/// Render a checklist as a standalone Markdown document.
#[must_use]
pub fn export_markdown(list: &Checklist) -> String {
    let (settled, total) = list.progress();

    let mut out = String::new();
    let _ = writeln!(out, "# Checklist: {}", list.task_key);
    let _ = writeln!(out);
    let _ = writeln!(out, "Progress: {settled}/{total}");
    let _ = writeln!(out);

    for item in &list.items {
        let marker = match item.state {
            ItemState::Pending => "[ ]",
            ItemState::Done => "[x]",
            ItemState::Skipped => "[-]",
        };
        let _ = writeln!(out, "- {marker} {}", item.title);
        if let Some(notes) = &item.notes {
            for line in notes.lines() {
                let _ = writeln!(out, "  > {line}");
            }
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "_Last updated {}_",
        list.updated_at.format("%Y-%m-%d %H:%M UTC")
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_contains_progress_and_markers() {
        let mut list = Checklist::from_template("PROJ-42");
        list.set_state(0, ItemState::Done).unwrap();
        list.set_state(1, ItemState::Skipped).unwrap();

        let md = export_markdown(&list);
        assert!(md.starts_with("# Checklist: PROJ-42"));
        assert!(md.contains(&format!("Progress: 2/{}", list.items.len())));
        assert!(md.contains("- [x] "));
        assert!(md.contains("- [-] "));
        assert!(md.contains("- [ ] "));
    }

    #[test]
    fn test_export_renders_multiline_notes_as_quotes() {
        let mut list = Checklist::from_template("PROJ-1");
        list.set_notes(0, Some("first line\nsecond line".to_string()))
            .unwrap();

        let md = export_markdown(&list);
        assert!(md.contains("  > first line\n  > second line\n"));
    }
}
