//! Element tree of a pom file
//!
//! The tree keeps everything needed to write the document back out:
//! qualified names, attributes in source order, text, and the comments,
//! processing instructions and blank lines between elements. Those are
//! stored as [`Trivia`] on the element that follows them, so they travel
//! with that element when its parent's children are reordered.

use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fmt::Display;
use std::mem;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to parse XML at position {position}: {message}")]
    Xml { position: u64, message: String },
    #[error("XML document has no root element")]
    NoRoot,
    #[error("XML document has more than one root element, found <{0}>")]
    MultipleRoots(String),
    #[error("Element <{0}> is never closed")]
    Unclosed(String),
    #[error("Closing tag </{0}> has no matching opening tag")]
    UnmatchedEnd(String),
    #[error("Text outside of the root element: {0}")]
    TextOutsideRoot(String),
}

/// XML declaration values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub version: String,
    pub encoding: Option<String>,
    pub standalone: Option<String>,
}

/// A parsed pom file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub declaration: Option<Declaration>,
    /// Comments, instructions and doctype before the root element
    pub prolog: Vec<Trivia>,
    pub root: ElementNode,
    /// Comments and instructions after the root element
    pub epilog: Vec<Trivia>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Qualified name, e.g. `xsi:schemaLocation` or `xmlns`
    pub name: String,
    /// Unescaped value
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementNode {
    /// Qualified name as written in the source
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub content: Content,
    /// Position among the element siblings in the source
    pub original_index: usize,
    /// Trivia between the previous sibling (or the parent's start tag) and this element
    pub leading: Vec<Trivia>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// No content, or whitespace only
    Empty,
    /// Content holding text, written on the tag's line as read. Comments,
    /// instructions and elements mixed into the text stay in place.
    Inline(Vec<Inline>),
    /// Child elements, with the trivia that follows the last one
    Nested {
        children: Vec<ElementNode>,
        trailing: Vec<Trivia>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    CData(String),
    Comment(String),
    Instruction(String),
    Element(ElementNode),
}

/// Non-element content between elements
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trivia {
    BlankLine,
    Comment(String),
    Instruction(String),
    DocType(String),
}

impl ElementNode {
    pub fn new(name: impl Into<String>, content: Content) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            content,
            original_index: 0,
            leading: Vec::new(),
        }
    }

    /// Name without namespace prefix
    pub fn local_name(&self) -> &str {
        self.name
            .rsplit_once(':')
            .map_or(self.name.as_str(), |(_, local)| local)
    }

    pub fn children(&self) -> &[ElementNode] {
        match &self.content {
            Content::Nested { children, .. } => children,
            _ => &[],
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<ElementNode>> {
        match &mut self.content {
            Content::Nested { children, .. } => Some(children),
            _ => None,
        }
    }

    /// Direct text and CDATA of an element, without mixed-in markup
    pub fn text(&self) -> String {
        match &self.content {
            Content::Inline(parts) => parts
                .iter()
                .filter_map(|part| match part {
                    Inline::Text(t) | Inline::CData(t) => Some(t.as_str()),
                    _ => None,
                })
                .collect(),
            _ => String::new(),
        }
    }

    /// Trimmed text of the first direct child with the given local name (case-insensitive)
    pub fn child_text(&self, name: &str) -> Option<String> {
        self.children()
            .iter()
            .find(|c| c.local_name().eq_ignore_ascii_case(name))
            .map(|c| c.text().trim().to_string())
    }

    /// Depth-first iteration over this element and all descendants
    pub fn descendants(&self) -> Vec<&ElementNode> {
        let mut out = vec![self];
        for child in self.children() {
            out.extend(child.descendants());
        }
        out
    }
}

impl Document {
    /// Parse a pom file
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        let mut reader = Reader::from_str(source);
        reader.config_mut().trim_text(false);

        let mut declaration = None;
        let mut prolog = Vec::new();
        let mut epilog = Vec::new();
        let mut root: Option<ElementNode> = None;
        let mut stack: Vec<Frame> = Vec::new();
        let mut buf = Vec::new();

        loop {
            let position = reader.buffer_position();
            let event = reader
                .read_event_into(&mut buf)
                .map_err(|e| xml_error(position, e))?;

            match event {
                Event::Decl(e) if stack.is_empty() && root.is_none() => {
                    let version = e.version().map_err(|err| xml_error(position, err))?;
                    let encoding = e
                        .encoding()
                        .transpose()
                        .map_err(|err| xml_error(position, err))?;
                    let standalone = e
                        .standalone()
                        .transpose()
                        .map_err(|err| xml_error(position, err))?;
                    declaration = Some(Declaration {
                        version: String::from_utf8_lossy(&version).to_string(),
                        encoding: encoding.map(|v| String::from_utf8_lossy(&v).to_string()),
                        standalone: standalone.map(|v| String::from_utf8_lossy(&v).to_string()),
                    });
                }

                Event::Start(e) => {
                    if stack.is_empty() && root.is_some() {
                        return Err(ParseError::MultipleRoots(qualified_name(&e)));
                    }
                    stack.push(Frame::open(&e, position)?);
                }

                Event::Empty(e) => {
                    let element = Frame::open(&e, position)?.close();
                    place_element(element, &mut stack, &mut root)?;
                }

                Event::End(e) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                    let frame = stack.pop().ok_or(ParseError::UnmatchedEnd(name))?;
                    place_element(frame.close(), &mut stack, &mut root)?;
                }

                Event::Text(e) => {
                    let text = e.unescape().map_err(|err| xml_error(position, err))?;
                    match stack.last_mut() {
                        Some(frame) => frame.items.push(Item::Text(text.to_string())),
                        None if text.trim().is_empty() => {
                            let outside = if root.is_some() { &mut epilog } else { &mut prolog };
                            if line_breaks(&text) >= 2 {
                                outside.push(Trivia::BlankLine);
                            }
                        }
                        None => return Err(ParseError::TextOutsideRoot(text.trim().to_string())),
                    }
                }

                Event::CData(e) => {
                    let text = String::from_utf8_lossy(&e).to_string();
                    match stack.last_mut() {
                        Some(frame) => frame.items.push(Item::CData(text)),
                        None => return Err(ParseError::TextOutsideRoot(text)),
                    }
                }

                Event::Comment(e) => {
                    let trivia = Trivia::Comment(String::from_utf8_lossy(&e).to_string());
                    push_trivia(trivia, &mut stack, &root, &mut prolog, &mut epilog);
                }

                Event::PI(e) => {
                    let trivia = Trivia::Instruction(String::from_utf8_lossy(&e).to_string());
                    push_trivia(trivia, &mut stack, &root, &mut prolog, &mut epilog);
                }

                Event::DocType(e) => {
                    let trivia = Trivia::DocType(String::from_utf8_lossy(&e).trim().to_string());
                    push_trivia(trivia, &mut stack, &root, &mut prolog, &mut epilog);
                }

                Event::Decl(_) => {
                    return Err(xml_error(position, "XML declaration is only allowed at the start"));
                }

                Event::Eof => break,
            }

            buf.clear();
        }

        if let Some(frame) = stack.pop() {
            return Err(ParseError::Unclosed(frame.name));
        }

        let root = root.ok_or(ParseError::NoRoot)?;
        Ok(Self {
            declaration,
            prolog,
            root,
            epilog,
        })
    }
}

/// Content item of an element that is still open
enum Item {
    Element(ElementNode),
    Text(String),
    CData(String),
    Trivia(Trivia),
}

struct Frame {
    name: String,
    attributes: Vec<Attribute>,
    items: Vec<Item>,
    element_count: usize,
}

impl Frame {
    fn open(start: &BytesStart<'_>, position: u64) -> Result<Self, ParseError> {
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| xml_error(position, e))?;
            let raw = normalize_attr_whitespace(&String::from_utf8_lossy(&attr.value));
            let value = unescape(&raw).map_err(|e| xml_error(position, e))?;
            attributes.push(Attribute {
                name: String::from_utf8_lossy(attr.key.as_ref()).to_string(),
                value: value.to_string(),
            });
        }

        Ok(Self {
            name: qualified_name(start),
            attributes,
            items: Vec::new(),
            element_count: 0,
        })
    }

    fn push_element(&mut self, mut element: ElementNode) {
        element.original_index = self.element_count;
        self.element_count += 1;
        self.items.push(Item::Element(element));
    }

    fn close(self) -> ElementNode {
        let has_text = self.items.iter().any(|item| match item {
            Item::Text(text) => !text.trim().is_empty(),
            Item::CData(_) => true,
            _ => false,
        });
        let has_structure = self
            .items
            .iter()
            .any(|item| matches!(item, Item::Element(_) | Item::Trivia(_)));

        let content = if has_text {
            inline_content(self.items)
        } else if has_structure {
            nested_content(self.items)
        } else {
            Content::Empty
        };

        ElementNode {
            name: self.name,
            attributes: self.attributes,
            content,
            original_index: 0,
            leading: Vec::new(),
        }
    }
}

fn nested_content(items: Vec<Item>) -> Content {
    let mut children = Vec::new();
    let mut pending = Vec::new();

    for item in items {
        match item {
            Item::Element(mut element) => {
                element.leading = mem::take(&mut pending);
                children.push(element);
            }
            // Text here is whitespace only
            Item::Text(text) if line_breaks(&text) >= 2 => {
                // A blank line straight after the start tag is not kept
                if !children.is_empty() || !pending.is_empty() {
                    pending.push(Trivia::BlankLine);
                }
            }
            Item::Text(_) | Item::CData(_) => {}
            Item::Trivia(trivia) => pending.push(trivia),
        }
    }

    Content::Nested {
        children,
        trailing: pending,
    }
}

fn inline_content(items: Vec<Item>) -> Content {
    let parts = items
        .into_iter()
        .filter_map(|item| match item {
            Item::Text(text) => Some(Inline::Text(text)),
            Item::CData(text) => Some(Inline::CData(text)),
            Item::Element(element) => Some(Inline::Element(element)),
            Item::Trivia(Trivia::Comment(text)) => Some(Inline::Comment(text)),
            Item::Trivia(Trivia::Instruction(content)) => Some(Inline::Instruction(content)),
            Item::Trivia(_) => None,
        })
        .collect();

    Content::Inline(parts)
}

fn place_element(
    element: ElementNode,
    stack: &mut [Frame],
    root: &mut Option<ElementNode>,
) -> Result<(), ParseError> {
    match stack.last_mut() {
        Some(parent) => parent.push_element(element),
        None if root.is_some() => return Err(ParseError::MultipleRoots(element.name)),
        None => *root = Some(element),
    }
    Ok(())
}

fn push_trivia(
    trivia: Trivia,
    stack: &mut [Frame],
    root: &Option<ElementNode>,
    prolog: &mut Vec<Trivia>,
    epilog: &mut Vec<Trivia>,
) {
    match stack.last_mut() {
        Some(frame) => frame.items.push(Item::Trivia(trivia)),
        None if root.is_some() => epilog.push(trivia),
        None => prolog.push(trivia),
    }
}

fn qualified_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.name().as_ref()).to_string()
}

fn xml_error(position: u64, err: impl Display) -> ParseError {
    ParseError::Xml {
        position,
        message: err.to_string(),
    }
}

/// Attribute value normalization: literal tabs and line breaks become spaces,
/// character references such as `&#10;` are left for unescaping
fn normalize_attr_whitespace(raw: &str) -> String {
    raw.replace("\r\n", " ").replace(['\r', '\n', '\t'], " ")
}

/// Number of line breaks, counting `\r\n`, `\r` and `\n` once each
pub(crate) fn line_breaks(text: &str) -> usize {
    text.replace("\r\n", "\n")
        .chars()
        .filter(|c| *c == '\n' || *c == '\r')
        .count()
}
