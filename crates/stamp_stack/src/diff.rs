//! Unified diff of remote and local documents.

use similar::TextDiff;

/// Label for the deployed side of a diff.
pub const REMOTE_LABEL: &str = "REMOTE";
/// Label for the freshly rendered side of a diff.
pub const LOCAL_LABEL: &str = "LOCAL";

/// Line-based unified diff from `remote` to `local`.
///
/// Context spans the whole document, so a non-empty diff is a single hunk
/// showing every line. Identical inputs produce an empty string.
pub fn unified_diff(remote: &str, local: &str) -> String {
    let remote = with_trailing_newline(remote);
    let local = with_trailing_newline(local);
    let context = remote.lines().count().max(local.lines().count());

    let diff = TextDiff::from_lines(remote.as_str(), local.as_str());
    diff.unified_diff()
        .context_radius(context)
        .header(REMOTE_LABEL, LOCAL_LABEL)
        .to_string()
}

fn with_trailing_newline(text: &str) -> String {
    if text.is_empty() || text.ends_with('\n') {
        text.to_string()
    } else {
        format!("{}\n", text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_documents_have_empty_diff() {
        let doc = "{\n    \"a\":1\n}";
        assert_eq!(unified_diff(doc, doc), "");
    }

    #[test]
    fn test_diff_is_labelled_and_line_based() {
        let remote = "{\n    \"a\":1,\n    \"b\":2\n}";
        let local = "{\n    \"a\":1,\n    \"b\":3\n}";

        let diff = unified_diff(remote, local);
        assert!(diff.starts_with("--- REMOTE\n+++ LOCAL\n"));
        assert!(diff.contains("-    \"b\":2\n"));
        assert!(diff.contains("+    \"b\":3\n"));
    }

    #[test]
    fn test_context_covers_whole_document() {
        let remote: String = (0..20).map(|i| format!("line {}\n", i)).collect();
        let local = remote.replace("line 19", "line nineteen");

        let diff = unified_diff(&remote, &local);
        assert!(diff.contains(" line 0\n"));
        assert_eq!(diff.matches("@@").count(), 2);
    }
}
