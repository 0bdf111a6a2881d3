use crate::types::{ChangeEntry, Changeset, NO_VERSION};
use regex::Regex;
use std::sync::LazyLock;

/// `- **NAME**: FROM -> TO` as written by [`SummaryRenderer::render_markdown`]
///
/// [`SummaryRenderer::render_markdown`]: crate::output::SummaryRenderer::render_markdown
static ENTRY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"- \*\*([^*]+)\*\*: ([^ ]+) -> ([^\n]+)").expect("entry pattern is valid")
});

/// Recover a changeset from a rendered markdown summary.
///
/// Lines that don't look like change entries are skipped. Entries keep the
/// order they appear in the document. A previous version of `none` parses
/// back to a newly tracked package.
pub fn parse_markdown(document: &str) -> Changeset {
    ENTRY_PATTERN
        .captures_iter(document)
        .map(|caps| {
            let from = match &caps[2] {
                NO_VERSION => None,
                version => Some(version.to_string()),
            };
            ChangeEntry::new(&caps[1], from, caps[3].trim_end_matches('\r'))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::diff;
    use crate::output::SummaryRenderer;
    use crate::types::VersionMap;

    #[test]
    fn test_parse_empty_document() {
        assert!(parse_markdown("").is_empty());
        assert!(parse_markdown("### Dependency Updates\n\nnothing here\n").is_empty());
    }

    #[test]
    fn test_parse_entries_in_document_order() {
        let doc = "### Dependency Updates\n\n\
            - **node-gyp**: 10.0.0 -> 11.0.0\n  - https://www.npmjs.com/package/node-gyp\n\
            - **java**: none -> 21.0.1\n  - https://www.npmjs.com/package/java\n";

        let changes = parse_markdown(doc);
        assert_eq!(
            changes.entries(),
            &[
                ChangeEntry::new("node-gyp", Some("10.0.0".to_string()), "11.0.0"),
                ChangeEntry::new("java", None, "21.0.1"),
            ]
        );
    }

    #[test]
    fn test_parse_ignores_unrelated_lines() {
        let doc = "Some intro\n\
            - plain bullet\n\
            - **bold** without versions\n\
            - **java**: 21.0.1 -> 21.0.2\n\
            trailing text\n";

        let changes = parse_markdown(doc);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes.entries()[0].name, "java");
    }

    #[test]
    fn test_parse_keeps_rest_of_line_as_new_version() {
        let changes = parse_markdown("- **java**: 21.0.1 -> 22.0.0-beta 1\r\n");
        assert_eq!(changes.entries()[0].to, "22.0.0-beta 1");
    }

    #[test]
    fn test_parse_rejects_spaces_in_previous_version() {
        assert!(parse_markdown("- **java**: 21 0 1 -> 22.0.0\n").is_empty());
    }

    #[test]
    fn test_round_trip_through_markdown() {
        let previous: VersionMap = [("java", "21.0.1"), ("node-gyp", "10.0.0")]
            .into_iter()
            .collect();
        let current: VersionMap = [
            ("@types/node", "22.1.0"),
            ("java", "21.0.2"),
            ("node-gyp", "10.0.0"),
        ]
        .into_iter()
        .collect();

        let changes = diff(&previous, &current);
        let rendered = SummaryRenderer::default().render_markdown(&changes);

        assert_eq!(parse_markdown(&rendered), changes);
    }

    #[test]
    fn test_empty_stored_version_survives_round_trip() {
        let previous: VersionMap = serde_json::from_str(r#"{"java": ""}"#).unwrap();
        let current: VersionMap = serde_json::from_str(r#"{"java": "21.0.2"}"#).unwrap();

        let changes = diff(&previous, &current);
        let renderer = SummaryRenderer::default();
        let rendered = renderer.render_markdown(&changes);

        assert!(rendered.contains("- **java**: none -> 21.0.2\n"));
        assert_eq!(
            renderer.render_title_body(&changes).title,
            "Dependency update: java none -> 21.0.2"
        );
        assert_eq!(
            parse_markdown(&rendered).entries(),
            &[ChangeEntry::new("java", None, "21.0.2")]
        );
    }
}
