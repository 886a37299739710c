//! Checks whether a pom is already sorted
//!
//! A pom is sorted when sorting and formatting it reproduces its text.
//! When it does not, [`VerifyOutcome::message`] names the first element
//! that is out of place.

use crate::config::{Indent, LineSeparator};
use crate::document::{Document, ElementNode};
use crate::writer::XmlWriter;
use similar::{ChangeTag, TextDiff};

/// Result of comparing a pom with its sorted rendition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyOutcome {
    pub ordered: bool,
    /// Description of the first difference, when not ordered
    pub message: Option<String>,
    pub original: String,
    pub sorted: String,
}

impl VerifyOutcome {
    /// Unified diff from the original to the sorted text
    pub fn diff(&self, name: &str) -> String {
        unified_diff(&self.original, &self.sorted, name)
    }
}

/// Compare source text and parsed tree against their sorted counterparts
pub fn verify(
    original_text: &str,
    original: &Document,
    sorted_text: String,
    sorted: &Document,
    ignore_line_separators: bool,
) -> VerifyOutcome {
    let same_text = if ignore_line_separators {
        normalize_line_separators(original_text) == normalize_line_separators(&sorted_text)
    } else {
        original_text == sorted_text
    };

    let message = if same_text {
        None
    } else if let Some(message) = first_misplaced(&original.root, &sorted.root) {
        Some(message)
    } else if normalize_line_separators(original_text) == normalize_line_separators(&sorted_text) {
        Some("The line separator characters differ from sorted pom".to_string())
    } else {
        Some("The xml formatting is not sorted".to_string())
    };

    log::debug!("Verification finished, ordered: {}", same_text);

    VerifyOutcome {
        ordered: same_text,
        message,
        original: original_text.to_string(),
        sorted: sorted_text,
    }
}

/// First element, in document order, that sorting moves or changes
fn first_misplaced(original: &ElementNode, sorted: &ElementNode) -> Option<String> {
    for (o, s) in original.children().iter().zip(sorted.children()) {
        if o.name != s.name {
            return Some(format!(
                "The xml element <{}> should be placed before <{}>",
                s.name, o.name
            ));
        }
        if o.children().is_empty() && s.children().is_empty() {
            let (o_text, s_text) = (o.text(), s.text());
            if o_text.trim() != s_text.trim() {
                return Some(format!(
                    "The xml element <{name}>{}</{name}> should be placed before <{name}>{}</{name}>",
                    s_text.trim(),
                    o_text.trim(),
                    name = s.name
                ));
            }
        }
        if let Some(message) = first_misplaced(o, s) {
            return Some(message);
        }
    }
    None
}

fn normalize_line_separators(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Unified diff of two texts with three lines of context
pub fn unified_diff(original: &str, sorted: &str, name: &str) -> String {
    let diff = TextDiff::from_lines(original, sorted);
    let mut output = String::new();

    output.push_str(&format!("--- {}\n", name));
    output.push_str(&format!("+++ {} (sorted)\n", name));

    for (idx, group) in diff.grouped_ops(3).iter().enumerate() {
        if idx > 0 {
            output.push_str("...\n");
        }

        for op in group {
            for change in diff.iter_changes(op) {
                let tag = match change.tag() {
                    ChangeTag::Delete => "-",
                    ChangeTag::Insert => "+",
                    ChangeTag::Equal => " ",
                };

                output.push_str(tag);
                output.push_str(change.value().trim_end_matches(['\r', '\n']));
                output.push('\n');
            }
        }
    }

    output
}

/// Violation report written when verification fails
pub fn violation_report(filename: &str, message: &str) -> String {
    let mut writer = XmlWriter::new(Indent::Spaces(2), LineSeparator::Lf, false);
    writer.write_declaration("1.0", "UTF-8", None);
    writer.newline();
    writer.write_element_start("pomsort");
    writer.write_element_end();
    writer.newline();
    writer.indent();
    writer.write_indent();
    writer.write_element_start("violation");
    writer.write_attribute("filename", filename);
    writer.write_element_end();
    writer.write_text(message);
    writer.write_close_tag("violation");
    writer.newline();
    writer.dedent();
    writer.write_indent();
    writer.write_close_tag("pomsort");
    writer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn outcome(original: &str, sorted: &str, ignore_line_separators: bool) -> VerifyOutcome {
        let original_doc = Document::parse(original).unwrap();
        let sorted_doc = Document::parse(sorted).unwrap();
        verify(
            original,
            &original_doc,
            sorted.to_string(),
            &sorted_doc,
            ignore_line_separators,
        )
    }

    #[test]
    fn test_identical_is_ordered() {
        let result = outcome("<a>\n  <b>x</b>\n</a>\n", "<a>\n  <b>x</b>\n</a>\n", false);
        assert!(result.ordered);
        assert_eq!(result.message, None);
    }

    #[test]
    fn test_misplaced_element_message() {
        let result = outcome(
            "<project><version/><groupId/></project>",
            "<project><groupId/><version/></project>",
            true,
        );
        assert!(!result.ordered);
        assert_eq!(
            result.message.as_deref(),
            Some("The xml element <groupId> should be placed before <version>")
        );
    }

    #[test]
    fn test_misplaced_text_message() {
        let result = outcome(
            "<project><dependencies><dependency><groupId>z</groupId></dependency><dependency><groupId>a</groupId></dependency></dependencies></project>",
            "<project><dependencies><dependency><groupId>a</groupId></dependency><dependency><groupId>z</groupId></dependency></dependencies></project>",
            true,
        );
        assert_eq!(
            result.message.as_deref(),
            Some("The xml element <groupId>a</groupId> should be placed before <groupId>z</groupId>")
        );
    }

    #[test]
    fn test_line_separators_ignored() {
        let result = outcome("<a>\r\n  <b/>\r\n</a>\r\n", "<a>\n  <b/>\n</a>\n", true);
        assert!(result.ordered);
    }

    #[test]
    fn test_line_separators_reported() {
        let result = outcome("<a>\r\n  <b/>\r\n</a>\r\n", "<a>\n  <b/>\n</a>\n", false);
        assert!(!result.ordered);
        assert_eq!(
            result.message.as_deref(),
            Some("The line separator characters differ from sorted pom")
        );
    }

    #[test]
    fn test_formatting_reported() {
        let result = outcome("<a>\n    <b/>\n</a>\n", "<a>\n  <b/>\n</a>\n", true);
        assert!(!result.ordered);
        assert_eq!(result.message.as_deref(), Some("The xml formatting is not sorted"));
    }

    #[test]
    fn test_unified_diff() {
        let diff = unified_diff("a\nb\nc\n", "a\nc\nb\n", "pom.xml");
        assert!(diff.starts_with("--- pom.xml\n+++ pom.xml (sorted)\n"));
        assert!(diff.contains("-b\n") || diff.contains("-c\n"));
        assert!(diff.contains("+b\n") || diff.contains("+c\n"));
    }

    #[test]
    fn test_diff_from_outcome() {
        let result = outcome("<a>\n<c/>\n<b/>\n</a>\n", "<a>\n<b/>\n<c/>\n</a>\n", true);
        let diff = result.diff("pom.xml");
        assert!(diff.contains("+<b/>"));
    }

    #[test]
    fn test_violation_report() {
        let report = violation_report("pom.xml", "The xml element <a> should be placed before <b>");
        assert_eq!(
            report,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<pomsort>\n  <violation filename=\"pom.xml\">The xml element &lt;a&gt; should be placed before &lt;b&gt;</violation>\n</pomsort>\n"
        );
    }
}
