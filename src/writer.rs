//! XML output writer

use crate::config::{Indent, LineSeparator};

/// Line-oriented XML writer
pub struct XmlWriter {
    output: String,
    indent_unit: String,
    separator: &'static str,
    indent_level: usize,
    indent_blank_lines: bool,
    last_was_blank: bool,
}

impl XmlWriter {
    pub fn new(indent: Indent, separator: LineSeparator, indent_blank_lines: bool) -> Self {
        Self {
            output: String::new(),
            indent_unit: indent.unit(),
            separator: separator.as_str(),
            indent_level: 0,
            indent_blank_lines,
            last_was_blank: false,
        }
    }

    /// Get the written output, ending with a line separator
    pub fn finish(mut self) -> String {
        if !self.output.ends_with(self.separator) {
            self.output.push_str(self.separator);
        }
        self.output
    }

    /// Write a line separator
    pub fn newline(&mut self) {
        self.output.push_str(self.separator);
    }

    /// Write an empty line; a second one in a row is dropped
    pub fn write_blank_line(&mut self) {
        if self.last_was_blank {
            return;
        }
        if self.indent_blank_lines {
            self.write_indent();
        }
        self.newline();
        self.last_was_blank = true;
    }

    /// Write current indentation
    pub fn write_indent(&mut self) {
        self.last_was_blank = false;
        for _ in 0..self.indent_level {
            self.output.push_str(&self.indent_unit);
        }
    }

    /// Increase indent level
    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    /// Decrease indent level
    pub fn dedent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    /// Write XML declaration
    pub fn write_declaration(&mut self, version: &str, encoding: &str, standalone: Option<&str>) {
        self.output.push_str("<?xml version=\"");
        self.output.push_str(&escape_attr(version));
        self.output.push_str("\" encoding=\"");
        self.output.push_str(&escape_attr(encoding));
        self.output.push('"');
        if let Some(standalone) = standalone {
            self.output.push_str(" standalone=\"");
            self.output.push_str(&escape_attr(standalone));
            self.output.push('"');
        }
        self.output.push_str("?>");
    }

    /// Write a comment
    pub fn write_comment(&mut self, text: &str) {
        self.output.push_str("<!--");
        self.push_normalized(text);
        self.output.push_str("-->");
    }

    /// Write opening tag start (just the element name)
    pub fn write_element_start(&mut self, name: &str) {
        self.output.push('<');
        self.output.push_str(name);
    }

    /// Write an attribute
    pub fn write_attribute(&mut self, name: &str, value: &str) {
        self.output.push(' ');
        self.output.push_str(name);
        self.output.push_str("=\"");
        self.output.push_str(&escape_attr(value));
        self.output.push('"');
    }

    /// Close opening tag (not self-closing)
    pub fn write_element_end(&mut self) {
        self.output.push('>');
    }

    /// Close self-closing tag
    pub fn write_element_end_empty(&mut self) {
        self.output.push_str(" />");
    }

    /// Write closing tag
    pub fn write_close_tag(&mut self, name: &str) {
        self.output.push_str("</");
        self.output.push_str(name);
        self.output.push('>');
    }

    /// Write text content
    pub fn write_text(&mut self, text: &str) {
        self.push_normalized(&escape_text(text));
    }

    /// Write CDATA section
    pub fn write_cdata(&mut self, content: &str) {
        self.output.push_str("<![CDATA[");
        self.push_normalized(content);
        self.output.push_str("]]>");
    }

    /// Write processing instruction, target and content as read
    pub fn write_pi(&mut self, content: &str) {
        self.output.push_str("<?");
        self.output.push_str(content);
        self.output.push_str("?>");
    }

    /// Write a document type declaration
    pub fn write_doctype(&mut self, content: &str) {
        self.output.push_str("<!DOCTYPE ");
        self.push_normalized(content);
        self.output.push('>');
    }

    fn push_normalized(&mut self, text: &str) {
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\r' => {
                    if chars.peek() == Some(&'\n') {
                        chars.next();
                    }
                    self.output.push_str(self.separator);
                }
                '\n' => self.output.push_str(self.separator),
                _ => self.output.push(c),
            }
        }
    }
}

/// Escape special characters in attribute values
fn escape_attr(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&apos;"),
            '\n' => result.push_str("&#10;"),
            '\r' => result.push_str("&#13;"),
            '\t' => result.push_str("&#9;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape special characters in text content
fn escape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn writer() -> XmlWriter {
        XmlWriter::new(Indent::Spaces(2), LineSeparator::Lf, false)
    }

    #[test]
    fn test_write_declaration() {
        let mut w = writer();
        w.write_declaration("1.0", "UTF-8", None);
        assert_eq!(w.finish(), "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    }

    #[test]
    fn test_write_declaration_standalone() {
        let mut w = writer();
        w.write_declaration("1.1", "ISO-8859-1", Some("yes"));
        assert!(w
            .finish()
            .starts_with("<?xml version=\"1.1\" encoding=\"ISO-8859-1\" standalone=\"yes\"?>"));
    }

    #[test]
    fn test_write_element() {
        let mut w = writer();
        w.write_element_start("project");
        w.write_attribute("xmlns", "http://maven.apache.org/POM/4.0.0");
        w.write_element_end();
        w.write_close_tag("project");
        assert_eq!(
            w.finish(),
            "<project xmlns=\"http://maven.apache.org/POM/4.0.0\"></project>\n"
        );
    }

    #[test]
    fn test_write_self_closing() {
        let mut w = writer();
        w.write_element_start("relativePath");
        w.write_element_end_empty();
        assert_eq!(w.finish(), "<relativePath />\n");
    }

    #[test]
    fn test_escape_attr() {
        assert_eq!(escape_attr("a&b"), "a&amp;b");
        assert_eq!(escape_attr("a<b"), "a&lt;b");
        assert_eq!(escape_attr("a>b"), "a&gt;b");
        assert_eq!(escape_attr("a\"b"), "a&quot;b");
        assert_eq!(escape_attr("a'b"), "a&apos;b");
        assert_eq!(escape_attr("a\nb"), "a&#10;b");
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("a&b"), "a&amp;b");
        assert_eq!(escape_text("a<b"), "a&lt;b");
        assert_eq!(escape_text("a>b"), "a&gt;b");
        assert_eq!(escape_text("a\"b"), "a\"b");
    }

    #[test]
    fn test_indentation() {
        let mut w = writer();
        w.write_element_start("project");
        w.write_element_end();
        w.newline();
        w.indent();
        w.write_indent();
        w.write_element_start("modules");
        w.write_element_end_empty();
        w.newline();
        w.dedent();
        w.write_close_tag("project");
        assert_eq!(w.finish(), "<project>\n  <modules />\n</project>\n");
    }

    #[test]
    fn test_tab_indentation() {
        let mut w = XmlWriter::new(Indent::Tab, LineSeparator::Lf, false);
        w.indent();
        w.indent();
        w.write_indent();
        w.write_text("x");
        assert_eq!(w.finish(), "\t\tx\n");
    }

    #[test]
    fn test_crlf_separator() {
        let mut w = XmlWriter::new(Indent::Spaces(2), LineSeparator::CrLf, false);
        w.write_text("a");
        w.newline();
        w.write_text("b");
        assert_eq!(w.finish(), "a\r\nb\r\n");
    }

    #[test]
    fn test_text_line_breaks_normalized() {
        let mut w = XmlWriter::new(Indent::Spaces(2), LineSeparator::CrLf, false);
        w.write_text("one\ntwo\r\nthree\rfour");
        assert_eq!(w.finish(), "one\r\ntwo\r\nthree\r\nfour\r\n");
    }

    #[test]
    fn test_blank_lines_collapse() {
        let mut w = writer();
        w.write_text("a");
        w.newline();
        w.write_blank_line();
        w.write_blank_line();
        w.write_indent();
        w.write_text("b");
        assert_eq!(w.finish(), "a\n\nb\n");
    }

    #[test]
    fn test_indented_blank_line() {
        let mut w = XmlWriter::new(Indent::Spaces(4), LineSeparator::Lf, true);
        w.indent();
        w.write_blank_line();
        assert_eq!(w.finish(), "    \n");
    }

    #[test]
    fn test_write_comment() {
        let mut w = writer();
        w.write_comment(" a\n  b ");
        assert_eq!(w.finish(), "<!-- a\n  b -->\n");
    }

    #[test]
    fn test_write_cdata() {
        let mut w = writer();
        w.write_cdata("some <special> content");
        assert!(w.finish().contains("<![CDATA[some <special> content]]>"));
    }

    #[test]
    fn test_write_pi() {
        let mut w = writer();
        w.write_pi("m2e ignore");
        assert_eq!(w.finish(), "<?m2e ignore?>\n");
    }

    #[test]
    fn test_write_doctype() {
        let mut w = writer();
        w.write_doctype("project");
        assert_eq!(w.finish(), "<!DOCTYPE project>\n");
    }

    #[test]
    fn test_dedent_at_zero() {
        let mut w = writer();
        w.dedent();
        w.write_indent();
        w.write_text("test");
        assert!(w.finish().starts_with("test"));
    }
}
