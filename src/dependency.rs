//! Content-based ordering for dependency and plugin lists
//!
//! Entries of `<dependencies>` and `<plugins>` have no declared order among
//! themselves. They are ordered by the text of configured child elements,
//! e.g. `scope,groupId,artifactId`.

use crate::document::ElementNode;

/// Parsed value of the `sortDependencies` / `sortPlugins` options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencySortOrder {
    fields: Vec<SortField>,
    prioritized_groups: Vec<String>,
}

/// One child element that takes part in the composite key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortField {
    /// Ranked COMPILE < PROVIDED < SYSTEM < RUNTIME < IMPORT < TEST < other
    Scope,
    /// Compared after prioritized groups are ranked first
    GroupId,
    /// Any other child, compared as case-insensitive text
    Child(String),
}

impl SortField {
    fn parse(name: &str) -> Self {
        if name.eq_ignore_ascii_case("scope") {
            SortField::Scope
        } else if name.eq_ignore_ascii_case("groupId") {
            SortField::GroupId
        } else {
            SortField::Child(name.to_lowercase())
        }
    }

    /// Name of the child element the value is read from
    pub fn element_name(&self) -> &str {
        match self {
            SortField::Scope => "scope",
            SortField::GroupId => "groupId",
            SortField::Child(name) => name.as_str(),
        }
    }
}

impl DependencySortOrder {
    /// Parse a field list separated by `,`, `;` or `:`.
    ///
    /// `true` and `false` are accepted for older configurations and mean
    /// `groupId,artifactId` and no sorting.
    pub fn new(field_list: &str, prioritized_groups: &str) -> Self {
        let list: String = field_list.chars().filter(|c| !c.is_whitespace()).collect();

        let fields = if list.eq_ignore_ascii_case("false") {
            Vec::new()
        } else if list.eq_ignore_ascii_case("true") {
            vec![SortField::GroupId, SortField::Child("artifactid".to_string())]
        } else {
            list.split(|c: char| matches!(c, ',' | ';' | ':'))
                .filter(|name| !name.is_empty())
                .map(SortField::parse)
                .collect()
        };

        Self {
            fields,
            prioritized_groups: split_groups(prioritized_groups),
        }
    }

    /// Rank `group_id` ahead of every other prioritized group
    pub fn with_local_group_id(mut self, group_id: &str) -> Self {
        let group_id = group_id.trim();
        if !group_id.is_empty() {
            self.prioritized_groups.insert(0, group_id.to_lowercase());
        }
        self
    }

    pub fn fields(&self) -> &[SortField] {
        &self.fields
    }

    pub fn prioritized_groups(&self) -> &[String] {
        &self.prioritized_groups
    }

    /// Collection keeps its original order
    pub fn is_no_sorting(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn key_builder(&self) -> KeyBuilder<'_> {
        KeyBuilder {
            order: self,
            empty_group_id: None,
        }
    }
}

fn split_groups(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(|g| g.to_lowercase())
        .collect()
}

/// Builds comparable keys for the entries of one collection
#[derive(Debug, Clone)]
pub struct KeyBuilder<'a> {
    order: &'a DependencySortOrder,
    empty_group_id: Option<&'a str>,
}

impl<'a> KeyBuilder<'a> {
    /// Value used for entries without a `groupId` child
    pub fn with_empty_group_id_default(mut self, default: &'a str) -> Self {
        self.empty_group_id = Some(default);
        self
    }

    pub fn key(&self, element: &ElementNode) -> SortKey {
        let values = self
            .order
            .fields
            .iter()
            .map(|field| {
                let text = element
                    .child_text(field.element_name())
                    .unwrap_or_default();
                match field {
                    SortField::Scope => KeyValue::Scope(Scope::from_text(&text)),
                    SortField::GroupId => {
                        let text = match self.empty_group_id {
                            Some(default) if text.is_empty() => default.to_string(),
                            _ => text,
                        };
                        self.group_value(text)
                    }
                    SortField::Child(_) => KeyValue::Text(text.to_lowercase()),
                }
            })
            .collect();

        SortKey(values)
    }

    fn group_value(&self, text: String) -> KeyValue {
        let text = text.to_lowercase();
        let rank = self
            .order
            .prioritized_groups
            .iter()
            .position(|group| {
                text == *group
                    || text
                        .strip_prefix(group.as_str())
                        .is_some_and(|rest| rest.starts_with('.'))
            })
            .map_or(GroupRank::Other, GroupRank::Prioritized);
        KeyValue::Group { rank, text }
    }
}

/// Composite key; compares field by field and stops at the first difference
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SortKey(Vec<KeyValue>);

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum KeyValue {
    Scope(Scope),
    Group { rank: GroupRank, text: String },
    Text(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum GroupRank {
    Prioritized(usize),
    Other,
}

/// Dependency scope rank
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Scope {
    Compile,
    Provided,
    System,
    Runtime,
    Import,
    Test,
    Other,
}

impl Scope {
    /// Missing or empty scope is Maven's default, compile
    pub fn from_text(text: &str) -> Self {
        match text.trim().to_lowercase().as_str() {
            "" | "compile" => Scope::Compile,
            "provided" => Scope::Provided,
            "system" => Scope::System,
            "runtime" => Scope::Runtime,
            "import" => Scope::Import,
            "test" => Scope::Test,
            _ => Scope::Other,
        }
    }
}
