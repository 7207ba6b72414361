//! Markdown changelog across consecutive version comparisons.

use crate::models::comparison::{SectionChange, SpendingChange, VersionComparison};

const MAX_LISTED: usize = 5;

/// Render a changelog for comparisons of consecutive versions, oldest first.
///
/// Key changes come from the section analysis when a collaborator was used,
/// otherwise from the headings of changed sections.
pub fn render_changelog(title: &str, comparisons: &[VersionComparison]) -> String {
    let mut out = format!("# Changelog: {}\n", title);

    if comparisons.is_empty() {
        out.push_str("\nOnly one version available, no changes to report.\n");
        return out;
    }

    for comparison in comparisons {
        let diff = &comparison.diff;
        out.push_str(&format!(
            "\n## {} -> {}\n",
            comparison.from_version, comparison.to_version
        ));
        out.push_str(&format!("- Lines added: {}\n", diff.additions_count()));
        out.push_str(&format!("- Lines removed: {}\n", diff.removals_count()));

        write_spending(&mut out, "Spending added", &diff.spending_added);
        write_spending(&mut out, "Spending removed", &diff.spending_removed);

        let key_changes: Vec<String> = if comparison.sections.is_empty() {
            diff.changed_sections()
                .map(|pair| format!("{}: {}", pair.heading, change_note(pair.change())))
                .collect()
        } else {
            comparison
                .sections
                .iter()
                .map(|s| format!("{}: {}", s.section, s.outcome.summary()))
                .collect()
        };
        if !key_changes.is_empty() {
            out.push_str("- **Key changes:**\n");
            for change in key_changes.iter().take(MAX_LISTED) {
                out.push_str(&format!("  - {}\n", change));
            }
        }
    }

    out
}

fn change_note(change: SectionChange) -> &'static str {
    match change {
        SectionChange::Added => "section added",
        SectionChange::Removed => "section removed",
        SectionChange::Modified => "section modified",
        SectionChange::Unchanged => "unchanged",
    }
}

fn write_spending(out: &mut String, label: &str, changes: &[SpendingChange]) {
    if changes.is_empty() {
        return;
    }
    out.push_str(&format!("- **{}:**\n", label));
    for change in changes.iter().take(MAX_LISTED) {
        out.push_str(&format!("  - {} - {}\n", change.amount, change.context));
    }
}
