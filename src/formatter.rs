//! Renders a document tree back to text

use crate::config::{Indent, LineSeparator, SortParameters};
use crate::document::{Content, Document, ElementNode, Inline, Trivia};
use crate::encoding::Encoding;
use crate::writer::XmlWriter;

/// Output layout options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    pub encoding: Encoding,
    pub line_separator: LineSeparator,
    pub indent: Indent,
    pub expand_empty_elements: bool,
    pub keep_blank_lines: bool,
    pub indent_blank_lines: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            encoding: Encoding::Utf8,
            line_separator: LineSeparator::Lf,
            indent: Indent::default(),
            expand_empty_elements: true,
            keep_blank_lines: false,
            indent_blank_lines: false,
        }
    }
}

impl From<&SortParameters> for FormatOptions {
    fn from(params: &SortParameters) -> Self {
        Self {
            encoding: params.encoding,
            line_separator: params.line_separator,
            indent: params.indent,
            expand_empty_elements: params.expand_empty_elements,
            keep_blank_lines: params.keep_blank_lines,
            indent_blank_lines: params.indent_blank_lines,
        }
    }
}

/// Pom formatter
pub struct Formatter {
    options: FormatOptions,
}

impl Formatter {
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    /// Render a document with the configured layout
    pub fn render(&self, document: &Document) -> String {
        let mut writer = XmlWriter::new(
            self.options.indent,
            self.options.line_separator,
            self.options.indent_blank_lines,
        );

        let (version, standalone) = match &document.declaration {
            Some(decl) => (decl.version.as_str(), decl.standalone.as_deref()),
            None => ("1.0", None),
        };
        writer.write_declaration(version, self.options.encoding.name(), standalone);
        writer.newline();

        for trivia in &document.prolog {
            self.write_trivia(trivia, &mut writer);
        }
        self.write_element(&document.root, true, &mut writer);
        for trivia in &document.epilog {
            self.write_trivia(trivia, &mut writer);
        }

        writer.finish()
    }

    /// `first` marks the first child of its parent, which gets no blank line above it
    fn write_element(&self, element: &ElementNode, first: bool, writer: &mut XmlWriter) {
        for (i, trivia) in element.leading.iter().enumerate() {
            if first && i == 0 && *trivia == Trivia::BlankLine {
                continue;
            }
            self.write_trivia(trivia, writer);
        }

        writer.write_indent();
        writer.write_element_start(&element.name);
        for attr in &element.attributes {
            writer.write_attribute(&attr.name, &attr.value);
        }

        match &element.content {
            Content::Empty if self.options.expand_empty_elements => {
                writer.write_element_end();
                writer.write_close_tag(&element.name);
            }
            Content::Empty => writer.write_element_end_empty(),
            Content::Inline(parts) => {
                writer.write_element_end();
                self.write_inline(parts, writer);
                writer.write_close_tag(&element.name);
            }
            Content::Nested { children, trailing } => {
                writer.write_element_end();
                writer.newline();
                writer.indent();
                for (i, child) in children.iter().enumerate() {
                    self.write_element(child, i == 0, writer);
                }
                for trivia in trailing {
                    self.write_trivia(trivia, writer);
                }
                writer.dedent();
                writer.write_indent();
                writer.write_close_tag(&element.name);
            }
        }
        writer.newline();
    }

    fn write_inline(&self, parts: &[Inline], writer: &mut XmlWriter) {
        for part in parts {
            match part {
                Inline::Text(text) => writer.write_text(text),
                Inline::CData(text) => writer.write_cdata(text),
                Inline::Comment(text) => writer.write_comment(text),
                Inline::Instruction(content) => writer.write_pi(content),
                Inline::Element(element) => self.write_inline_element(element, writer),
            }
        }
    }

    /// Element inside text, written without line breaks or indentation
    fn write_inline_element(&self, element: &ElementNode, writer: &mut XmlWriter) {
        writer.write_element_start(&element.name);
        for attr in &element.attributes {
            writer.write_attribute(&attr.name, &attr.value);
        }

        match &element.content {
            Content::Empty if self.options.expand_empty_elements => {
                writer.write_element_end();
            }
            Content::Empty => {
                writer.write_element_end_empty();
                return;
            }
            Content::Inline(parts) => {
                writer.write_element_end();
                self.write_inline(parts, writer);
            }
            Content::Nested { children, trailing } => {
                writer.write_element_end();
                for child in children {
                    for trivia in &child.leading {
                        write_inline_trivia(trivia, writer);
                    }
                    self.write_inline_element(child, writer);
                }
                for trivia in trailing {
                    write_inline_trivia(trivia, writer);
                }
            }
        }
        writer.write_close_tag(&element.name);
    }

    fn write_trivia(&self, trivia: &Trivia, writer: &mut XmlWriter) {
        match trivia {
            Trivia::BlankLine => {
                if self.options.keep_blank_lines {
                    writer.write_blank_line();
                }
                return;
            }
            Trivia::Comment(text) => {
                writer.write_indent();
                writer.write_comment(text);
            }
            Trivia::Instruction(content) => {
                writer.write_indent();
                writer.write_pi(content);
            }
            Trivia::DocType(content) => {
                writer.write_indent();
                writer.write_doctype(content);
            }
        }
        writer.newline();
    }
}

fn write_inline_trivia(trivia: &Trivia, writer: &mut XmlWriter) {
    match trivia {
        Trivia::BlankLine => {}
        Trivia::Comment(text) => writer.write_comment(text),
        Trivia::Instruction(content) => writer.write_pi(content),
        Trivia::DocType(content) => writer.write_doctype(content),
    }
}
