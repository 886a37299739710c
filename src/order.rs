//! Sort order documents
//!
//! A sort order is an XML document shaped like a pom: every element lists,
//! in the order it should appear, the children it may have. Element text and
//! attributes are ignored.
//!
//! ```xml
//! <project>
//!   <modelVersion/>
//!   <parent>
//!     <groupId/>
//!     <artifactId/>
//!   </parent>
//!   <dependencies/>
//! </project>
//! ```

use crate::config::{ConfigError, OrderSource};
use roxmltree::Document;
use std::fs;

/// Sort orders shipped with the crate, by name
const PREDEFINED: &[(&str, &str)] = &[
    (
        "recommended_2008_06",
        include_str!("../resources/orders/recommended_2008_06.xml"),
    ),
    (
        "compact",
        include_str!("../resources/orders/compact.xml"),
    ),
];

/// Name of the sort order used when none is configured
pub const DEFAULT_PREDEFINED: &str = "recommended_2008_06";

/// Expected child order for one element name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderNode {
    name: String,
    children: Vec<OrderNode>,
}

impl OrderNode {
    pub fn new(name: impl Into<String>, children: Vec<OrderNode>) -> Self {
        Self {
            name: name.into(),
            children,
        }
    }

    /// Parse a sort order document into its root node
    pub fn parse(name: &str, text: &str) -> Result<Self, ConfigError> {
        let doc = Document::parse(text).map_err(|e| ConfigError::MalformedOrder {
            name: name.to_string(),
            source: e,
        })?;
        Self::from_element(name, doc.root_element())
    }

    fn from_element(source: &str, node: roxmltree::Node<'_, '_>) -> Result<Self, ConfigError> {
        let mut children: Vec<OrderNode> = Vec::new();

        for child in node.children().filter(|c| c.is_element()) {
            let child = Self::from_element(source, child)?;
            if children.iter().any(|c| c.name.eq_ignore_ascii_case(&child.name)) {
                return Err(ConfigError::DuplicateOrderEntry {
                    name: source.to_string(),
                    parent: node.tag_name().name().to_string(),
                    child: child.name,
                });
            }
            children.push(child);
        }

        Ok(Self::new(node.tag_name().name(), children))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared child names, in order
    pub fn child_order(&self) -> impl Iterator<Item = &str> {
        self.children.iter().map(|c| c.name.as_str())
    }

    /// Declared position of a child name at this level
    pub fn position(&self, name: &str) -> Option<usize> {
        self.children
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Order node for a child name at this level
    pub fn child(&self, name: &str) -> Option<&OrderNode> {
        self.children
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }
}

/// Names of the bundled sort orders
pub fn predefined_names() -> impl Iterator<Item = &'static str> {
    PREDEFINED.iter().map(|(name, _)| *name)
}

/// Text of a bundled sort order
pub fn predefined(name: &str) -> Option<&'static str> {
    PREDEFINED
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, text)| *text)
}

/// Load and parse the sort order a configuration points at
pub fn resolve(source: &OrderSource) -> Result<OrderNode, ConfigError> {
    match source {
        OrderSource::Custom(path) => {
            let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadOrder {
                path: path.clone(),
                source: e,
            })?;
            log::debug!("Using custom sort order {}", path.display());
            OrderNode::parse(&path.display().to_string(), &text)
        }
        OrderSource::Predefined(name) => {
            let text = predefined(name)
                .ok_or_else(|| ConfigError::UnknownPredefinedOrder(name.clone()))?;
            log::debug!("Using predefined sort order {}", name);
            OrderNode::parse(name, text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    const ORDER: &str = r#"
        <project>
            <modelVersion/>
            <parent>
                <groupId/>
                <artifactId/>
            </parent>
            <groupId/>
            <!-- comments are ignored -->
            <dependencies><dependency/></dependencies>
        </project>"#;

    #[test]
    fn test_parse_tree() {
        let root = OrderNode::parse("test", ORDER).unwrap();
        assert_eq!(root.name(), "project");
        let order: Vec<_> = root.child_order().collect();
        assert_eq!(order, vec!["modelVersion", "parent", "groupId", "dependencies"]);

        let parent = root.child("parent").unwrap();
        assert_eq!(parent.child_order().collect::<Vec<_>>(), vec!["groupId", "artifactId"]);
    }

    #[test]
    fn test_position_case_insensitive() {
        let root = OrderNode::parse("test", ORDER).unwrap();
        assert_eq!(root.position("modelVersion"), Some(0));
        assert_eq!(root.position("GROUPID"), Some(2));
        assert_eq!(root.position("build"), None);
        assert!(root.child("PARENT").is_some());
    }

    #[test]
    fn test_malformed_order() {
        let result = OrderNode::parse("broken", "<project><parent></project>");
        assert!(matches!(result, Err(ConfigError::MalformedOrder { .. })));
    }

    #[test]
    fn test_duplicate_entry_rejected() {
        let result = OrderNode::parse("dup", "<project><name/><Name/></project>");
        match result {
            Err(ConfigError::DuplicateOrderEntry { parent, child, .. }) => {
                assert_eq!(parent, "project");
                assert_eq!(child, "Name");
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_predefined_orders_parse() {
        for name in predefined_names() {
            let root = resolve(&OrderSource::Predefined(name.to_string())).unwrap();
            assert_eq!(root.name(), "project");
            assert_eq!(root.position("modelVersion"), Some(0));
        }
    }

    #[test]
    fn test_recommended_order_sections() {
        let root = resolve(&OrderSource::Predefined(DEFAULT_PREDEFINED.to_string())).unwrap();
        assert!(root.position("dependencies") < root.position("build"));
        let dependency = root
            .child("dependencies")
            .and_then(|d| d.child("dependency"))
            .unwrap();
        assert_eq!(dependency.position("groupId"), Some(0));
        assert_eq!(dependency.position("scope"), Some(5));
    }

    #[test]
    fn test_compact_order_sections() {
        let root = resolve(&OrderSource::Predefined("compact".to_string())).unwrap();
        assert!(root.position("build") < root.position("profiles"));
        assert!(root.position("profiles") < root.position("scm"));
        assert!(root.position("url") < root.position("dependencies"));
    }

    #[test]
    fn test_predefined_names() {
        let names: Vec<_> = predefined_names().collect();
        assert_eq!(names, vec!["recommended_2008_06", "compact"]);
    }

    #[test]
    fn test_unknown_predefined() {
        let result = resolve(&OrderSource::Predefined("nope".to_string()));
        assert!(matches!(result, Err(ConfigError::UnknownPredefinedOrder(_))));
    }

    #[test]
    fn test_custom_order_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("order.xml");
        fs::write(&path, ORDER).unwrap();

        let root = resolve(&OrderSource::Custom(path)).unwrap();
        assert_eq!(root.position("parent"), Some(1));
    }

    #[test]
    fn test_custom_order_missing() {
        let result = resolve(&OrderSource::Custom(Path::new("/nonexistent/order.xml").into()));
        assert!(matches!(result, Err(ConfigError::ReadOrder { .. })));
    }
}
