//! Recursive element sorting
//!
//! Children are placed in the order their parent's [`OrderNode`] declares.
//! Children the order does not mention go last and keep their relative
//! order. Dependency, plugin, property and module lists are sorted by
//! their own rules instead.

use crate::config::SortParameters;
use crate::dependency::{DependencySortOrder, KeyBuilder};
use crate::document::{Document, ElementNode};
use crate::order::OrderNode;

/// How the children of one element are ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Collection<'a> {
    /// By the sort order
    Declared,
    Dependencies(&'a DependencySortOrder),
    /// Plugins; a missing groupId is treated as the default plugin groupId
    Plugins(&'a DependencySortOrder),
    /// By element name
    Properties,
    /// By element name, then text
    Modules,
}

pub struct Sorter<'a> {
    order: &'a OrderNode,
    params: &'a SortParameters,
}

impl<'a> Sorter<'a> {
    pub fn new(order: &'a OrderNode, params: &'a SortParameters) -> Self {
        Self { order, params }
    }

    /// Sort the whole document in place
    pub fn sort(&self, document: &mut Document) {
        let root = &mut document.root;
        let order = if root.local_name().eq_ignore_ascii_case(self.order.name()) {
            Some(self.order)
        } else {
            log::debug!(
                "Root element <{}> does not match sort order root <{}>",
                root.name,
                self.order.name()
            );
            None
        };
        self.sort_element(root, order);
    }

    fn sort_element(&self, element: &mut ElementNode, order: Option<&OrderNode>) {
        let collection = self.collection(element.local_name());
        let Some(children) = element.children_mut() else {
            return;
        };

        match collection {
            Collection::Declared => {
                if let Some(order) = order {
                    sort_declared(children, order);
                }
            }
            Collection::Dependencies(sort_order) => {
                sort_by_fields(children, sort_order.key_builder());
            }
            Collection::Plugins(sort_order) => {
                let builder = sort_order
                    .key_builder()
                    .with_empty_group_id_default(&self.params.default_plugin_group_id);
                sort_by_fields(children, builder);
            }
            Collection::Properties => {
                children.sort_by_cached_key(|c| (c.local_name().to_lowercase(), c.original_index));
            }
            Collection::Modules => {
                children.sort_by_cached_key(|c| {
                    (
                        c.local_name().to_lowercase(),
                        c.text().trim().to_lowercase(),
                        c.original_index,
                    )
                });
            }
        }

        for child in children.iter_mut() {
            let child_order = order.and_then(|o| o.child(child.local_name()));
            self.sort_element(child, child_order);
        }
    }

    fn collection(&self, name: &str) -> Collection<'a> {
        let params = self.params;
        if name.eq_ignore_ascii_case("dependencies") && !params.sort_dependencies.is_no_sorting() {
            Collection::Dependencies(&params.sort_dependencies)
        } else if (name.eq_ignore_ascii_case("plugins") || name.eq_ignore_ascii_case("reportPlugins"))
            && !params.sort_plugins.is_no_sorting()
        {
            Collection::Plugins(&params.sort_plugins)
        } else if name.eq_ignore_ascii_case("properties") && params.sort_properties {
            Collection::Properties
        } else if name.eq_ignore_ascii_case("modules") && params.sort_modules {
            Collection::Modules
        } else {
            Collection::Declared
        }
    }
}

/// Declared children first, in declared order; the rest after them in source order
fn sort_declared(children: &mut [ElementNode], order: &OrderNode) {
    children.sort_by_cached_key(|c| {
        (
            order.position(c.local_name()).unwrap_or(usize::MAX),
            c.original_index,
        )
    });
}

fn sort_by_fields(children: &mut [ElementNode], builder: KeyBuilder<'_>) {
    children.sort_by_cached_key(|c| (builder.key(c), c.original_index));
}
