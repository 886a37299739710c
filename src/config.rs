//! Sort configuration
//!
//! [`Settings`] is the raw, file-backed form of every option. It is turned
//! into the validated, immutable [`SortParameters`] through
//! [`ParametersBuilder`], which rejects bad values up front.

use crate::dependency::DependencySortOrder;
use crate::encoding::Encoding;
use crate::order::{self, DEFAULT_PREDEFINED};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Maven's implicit groupId for plugins that do not declare one
pub const DEFAULT_PLUGIN_GROUP_ID: &str = "org.apache.maven.plugins";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("nrOfIndentSpace cannot be below -1 or above 255, was {0}")]
    InvalidIndent(i32),
    #[error("lineSeparator must be either \\n, \\r or \\r\\n, but was {0:?}")]
    InvalidLineSeparator(String),
    #[error("verifyFail must be either SORT, WARN or STOP, but was {0:?}")]
    InvalidVerifyFail(String),
    #[error("Unsupported encoding {0:?}")]
    UnsupportedEncoding(String),
    #[error("backupFileExtension cannot be empty")]
    EmptyBackupExtension,
    #[error("Unknown predefined sort order {0:?}")]
    UnknownPredefinedOrder(String),
    #[error("Failed to read sort order file {path}: {source}")]
    ReadOrder {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Sort order {name} is not well-formed: {source}")]
    MalformedOrder {
        name: String,
        source: roxmltree::Error,
    },
    #[error("Sort order {name} declares <{child}> more than once under <{parent}>")]
    DuplicateOrderEntry {
        name: String,
        parent: String,
        child: String,
    },
    #[error("The document declares encoding {declared} but {configured} is configured")]
    EncodingMismatch {
        declared: String,
        configured: Encoding,
    },
}

/// Indentation per nesting level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    Spaces(u8),
    Tab,
}

impl Indent {
    /// Value of `nrOfIndentSpace` that selects a tab
    pub const TAB: i32 = -1;

    pub fn from_count(count: i32) -> Result<Self, ConfigError> {
        if count == Self::TAB {
            return Ok(Indent::Tab);
        }
        u8::try_from(count)
            .map(Indent::Spaces)
            .map_err(|_| ConfigError::InvalidIndent(count))
    }

    /// The indent string for one level
    pub fn unit(&self) -> String {
        match self {
            Indent::Spaces(n) => " ".repeat(usize::from(*n)),
            Indent::Tab => "\t".to_string(),
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Indent::Spaces(2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSeparator {
    Lf,
    Cr,
    CrLf,
}

impl LineSeparator {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineSeparator::Lf => "\n",
            LineSeparator::Cr => "\r",
            LineSeparator::CrLf => "\r\n",
        }
    }

    /// Separator of the running platform
    pub fn platform() -> Self {
        if cfg!(windows) {
            LineSeparator::CrLf
        } else {
            LineSeparator::Lf
        }
    }
}

impl Default for LineSeparator {
    fn default() -> Self {
        Self::platform()
    }
}

impl FromStr for LineSeparator {
    type Err = ConfigError;

    /// Accepts the separator itself or its escaped spelling, e.g. `\r\n` or `"\\r\\n"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "\n" | "\\n" => Ok(LineSeparator::Lf),
            "\r" | "\\r" => Ok(LineSeparator::Cr),
            "\r\n" | "\\r\\n" => Ok(LineSeparator::CrLf),
            _ => Err(ConfigError::InvalidLineSeparator(s.to_string())),
        }
    }
}

/// What a failed verification does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerifyFailType {
    /// Sort the file
    #[default]
    Sort,
    /// Log a warning and leave the file alone
    Warn,
    /// Fail
    Stop,
}

impl FromStr for VerifyFailType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sort" => Ok(VerifyFailType::Sort),
            "warn" => Ok(VerifyFailType::Warn),
            "stop" => Ok(VerifyFailType::Stop),
            _ => Err(ConfigError::InvalidVerifyFail(s.to_string())),
        }
    }
}

/// Where the sort order comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderSource {
    Custom(PathBuf),
    Predefined(String),
}

impl fmt::Display for OrderSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderSource::Custom(path) => write!(f, "custom sort order {}", path.display()),
            OrderSource::Predefined(name) => write!(f, "predefined sort order {}", name),
        }
    }
}

/// Validated configuration for one sort or verify run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortParameters {
    /// The project's own groupId
    pub group_id: Option<String>,
    pub pom_file: PathBuf,
    pub create_backup_file: bool,
    pub backup_file_extension: String,
    pub violation_file: Option<PathBuf>,
    pub encoding: Encoding,
    pub line_separator: LineSeparator,
    /// Compare without regard to line separators when verifying
    pub ignore_line_separators: bool,
    pub expand_empty_elements: bool,
    pub keep_blank_lines: bool,
    pub indent: Indent,
    pub indent_blank_lines: bool,
    pub order_source: OrderSource,
    pub sort_dependencies: DependencySortOrder,
    pub sort_plugins: DependencySortOrder,
    /// groupId assumed for plugins that have none
    pub default_plugin_group_id: String,
    pub sort_properties: bool,
    pub sort_modules: bool,
    pub verify_fail: VerifyFailType,
    pub skip: bool,
}

impl SortParameters {
    pub fn builder() -> ParametersBuilder {
        ParametersBuilder::default()
    }
}

/// Collects raw option values and validates them in [`ParametersBuilder::build`]
#[derive(Debug, Clone)]
pub struct ParametersBuilder {
    group_id: Option<String>,
    pom_file: PathBuf,
    create_backup_file: bool,
    backup_file_extension: String,
    violation_file: Option<PathBuf>,
    encoding: String,
    line_separator: Option<String>,
    ignore_line_separators: bool,
    expand_empty_elements: bool,
    keep_blank_lines: bool,
    nr_of_indent_space: i32,
    indent_blank_lines: bool,
    custom_sort_order: Option<PathBuf>,
    predefined_sort_order: Option<String>,
    sort_dependencies: String,
    dependency_priority_groups: String,
    prioritize_local_group_id: bool,
    sort_plugins: String,
    plugin_priority_groups: String,
    default_plugin_group_id: String,
    sort_properties: bool,
    sort_modules: bool,
    verify_fail: String,
    skip: bool,
}

impl Default for ParametersBuilder {
    fn default() -> Self {
        Self {
            group_id: None,
            pom_file: PathBuf::from("pom.xml"),
            create_backup_file: true,
            backup_file_extension: ".bak".to_string(),
            violation_file: None,
            encoding: "UTF-8".to_string(),
            line_separator: None,
            ignore_line_separators: true,
            expand_empty_elements: true,
            keep_blank_lines: false,
            nr_of_indent_space: 2,
            indent_blank_lines: false,
            custom_sort_order: None,
            predefined_sort_order: None,
            sort_dependencies: String::new(),
            dependency_priority_groups: String::new(),
            prioritize_local_group_id: false,
            sort_plugins: String::new(),
            plugin_priority_groups: String::new(),
            default_plugin_group_id: DEFAULT_PLUGIN_GROUP_ID.to_string(),
            sort_properties: false,
            sort_modules: false,
            verify_fail: "sort".to_string(),
            skip: false,
        }
    }
}

impl ParametersBuilder {
    pub fn group_id(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }

    pub fn pom_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.pom_file = path.into();
        self
    }

    /// Backup and violation report output
    pub fn file_output(
        mut self,
        create_backup_file: bool,
        backup_file_extension: impl Into<String>,
        violation_file: Option<PathBuf>,
    ) -> Self {
        self.create_backup_file = create_backup_file;
        self.backup_file_extension = backup_file_extension.into();
        self.violation_file = violation_file;
        self
    }

    pub fn encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }

    pub fn formatting(
        mut self,
        line_separator: impl Into<String>,
        expand_empty_elements: bool,
        keep_blank_lines: bool,
    ) -> Self {
        self.line_separator = Some(line_separator.into());
        self.expand_empty_elements = expand_empty_elements;
        self.keep_blank_lines = keep_blank_lines;
        self
    }

    /// Spaces per level, or [`Indent::TAB`]
    pub fn indent(mut self, nr_of_indent_space: i32, indent_blank_lines: bool) -> Self {
        self.nr_of_indent_space = nr_of_indent_space;
        self.indent_blank_lines = indent_blank_lines;
        self
    }

    /// A custom sort order file takes precedence over a predefined name
    pub fn sort_order(mut self, custom: Option<PathBuf>, predefined: Option<String>) -> Self {
        self.custom_sort_order = custom;
        self.predefined_sort_order = predefined;
        self
    }

    pub fn sort_dependencies(mut self, fields: impl Into<String>) -> Self {
        self.sort_dependencies = fields.into();
        self
    }

    pub fn dependency_priority_groups(mut self, groups: impl Into<String>) -> Self {
        self.dependency_priority_groups = groups.into();
        self
    }

    pub fn prioritize_local_group_id(mut self, prioritize: bool) -> Self {
        self.prioritize_local_group_id = prioritize;
        self
    }

    pub fn sort_plugins(mut self, fields: impl Into<String>) -> Self {
        self.sort_plugins = fields.into();
        self
    }

    pub fn plugin_priority_groups(mut self, groups: impl Into<String>) -> Self {
        self.plugin_priority_groups = groups.into();
        self
    }

    pub fn default_plugin_group_id(mut self, group_id: impl Into<String>) -> Self {
        self.default_plugin_group_id = group_id.into();
        self
    }

    pub fn sort_properties(mut self, sort: bool) -> Self {
        self.sort_properties = sort;
        self
    }

    pub fn sort_modules(mut self, sort: bool) -> Self {
        self.sort_modules = sort;
        self
    }

    pub fn verify_fail(mut self, verify_fail: impl Into<String>) -> Self {
        self.verify_fail = verify_fail.into();
        self
    }

    pub fn ignore_line_separators(mut self, ignore: bool) -> Self {
        self.ignore_line_separators = ignore;
        self
    }

    pub fn skip(mut self, skip: bool) -> Self {
        self.skip = skip;
        self
    }

    pub fn build(self) -> Result<SortParameters, ConfigError> {
        let encoding = self
            .encoding
            .parse::<Encoding>()
            .map_err(|_| ConfigError::UnsupportedEncoding(self.encoding.clone()))?;

        let line_separator = match &self.line_separator {
            Some(sep) => sep.parse()?,
            None => LineSeparator::platform(),
        };

        if self.create_backup_file && self.backup_file_extension.is_empty() {
            return Err(ConfigError::EmptyBackupExtension);
        }

        let order_source = match (self.custom_sort_order, self.predefined_sort_order) {
            (Some(path), _) => OrderSource::Custom(path),
            (None, predefined) => {
                let name = predefined
                    .filter(|n| !n.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_PREDEFINED.to_string());
                if order::predefined(&name).is_none() {
                    return Err(ConfigError::UnknownPredefinedOrder(name));
                }
                OrderSource::Predefined(name)
            }
        };

        let mut sort_dependencies =
            DependencySortOrder::new(&self.sort_dependencies, &self.dependency_priority_groups);
        if self.prioritize_local_group_id {
            if let Some(group_id) = &self.group_id {
                sort_dependencies = sort_dependencies.with_local_group_id(group_id);
            }
        }

        Ok(SortParameters {
            group_id: self.group_id,
            pom_file: self.pom_file,
            create_backup_file: self.create_backup_file,
            backup_file_extension: self.backup_file_extension,
            violation_file: self.violation_file,
            encoding,
            line_separator,
            ignore_line_separators: self.ignore_line_separators,
            expand_empty_elements: self.expand_empty_elements,
            keep_blank_lines: self.keep_blank_lines,
            indent: Indent::from_count(self.nr_of_indent_space)?,
            indent_blank_lines: self.indent_blank_lines,
            order_source,
            sort_dependencies,
            sort_plugins: DependencySortOrder::new(&self.sort_plugins, &self.plugin_priority_groups),
            default_plugin_group_id: self.default_plugin_group_id,
            sort_properties: self.sort_properties,
            sort_modules: self.sort_modules,
            verify_fail: self.verify_fail.parse()?,
            skip: self.skip,
        })
    }
}

/// Options as stored in a `.pomsortrc.json` file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub group_id: Option<String>,
    pub pom_file: PathBuf,
    pub create_backup_file: bool,
    pub backup_file_extension: String,
    pub violation_filename: Option<PathBuf>,
    pub encoding: String,
    /// Platform separator when unset
    pub line_separator: Option<String>,
    pub ignore_line_separators: bool,
    pub expand_empty_elements: bool,
    pub keep_blank_lines: bool,
    /// -1 for a tab
    pub nr_of_indent_space: i32,
    pub indent_blank_lines: bool,
    pub predefined_sort_order: Option<String>,
    pub sort_order_file: Option<PathBuf>,
    pub sort_dependencies: Option<String>,
    pub dependency_priority_groups: Option<String>,
    pub prioritize_local_group_id: bool,
    pub sort_plugins: Option<String>,
    pub plugin_priority_groups: Option<String>,
    pub default_plugin_group_id: String,
    pub sort_properties: bool,
    pub sort_modules: bool,
    pub verify_fail: String,
    pub skip: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            group_id: None,
            pom_file: PathBuf::from("pom.xml"),
            create_backup_file: true,
            backup_file_extension: ".bak".to_string(),
            violation_filename: None,
            encoding: "UTF-8".to_string(),
            line_separator: None,
            ignore_line_separators: true,
            expand_empty_elements: true,
            keep_blank_lines: false,
            nr_of_indent_space: 2,
            indent_blank_lines: false,
            predefined_sort_order: None,
            sort_order_file: None,
            sort_dependencies: None,
            dependency_priority_groups: None,
            prioritize_local_group_id: false,
            sort_plugins: None,
            plugin_priority_groups: None,
            default_plugin_group_id: DEFAULT_PLUGIN_GROUP_ID.to_string(),
            sort_properties: false,
            sort_modules: false,
            verify_fail: "sort".to_string(),
            skip: false,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Find and load settings from `start_dir` or the nearest parent that has them
    pub fn find_and_load(start_dir: &Path) -> Option<Self> {
        let config_names = [".pomsortrc.json", ".pomsortrc", "pomsort.json"];

        let mut current = Some(start_dir);
        while let Some(dir) = current {
            for name in &config_names {
                let config_path = dir.join(name);
                if config_path.exists() {
                    match Self::load(&config_path) {
                        Ok(settings) => return Some(settings),
                        Err(e) => log::warn!("Ignoring {}: {}", config_path.display(), e),
                    }
                }
            }
            current = dir.parent();
        }

        None
    }

    /// Validate into engine parameters
    pub fn to_parameters(&self) -> Result<SortParameters, ConfigError> {
        let mut builder = SortParameters::builder()
            .pom_file(&self.pom_file)
            .file_output(
                self.create_backup_file,
                &self.backup_file_extension,
                self.violation_filename.clone(),
            )
            .encoding(&self.encoding)
            .indent(self.nr_of_indent_space, self.indent_blank_lines)
            .sort_order(self.sort_order_file.clone(), self.predefined_sort_order.clone())
            .sort_dependencies(self.sort_dependencies.as_deref().unwrap_or_default())
            .dependency_priority_groups(self.dependency_priority_groups.as_deref().unwrap_or_default())
            .prioritize_local_group_id(self.prioritize_local_group_id)
            .sort_plugins(self.sort_plugins.as_deref().unwrap_or_default())
            .plugin_priority_groups(self.plugin_priority_groups.as_deref().unwrap_or_default())
            .default_plugin_group_id(&self.default_plugin_group_id)
            .sort_properties(self.sort_properties)
            .sort_modules(self.sort_modules)
            .verify_fail(&self.verify_fail)
            .ignore_line_separators(self.ignore_line_separators)
            .skip(self.skip);

        let line_separator = self
            .line_separator
            .clone()
            .unwrap_or_else(|| LineSeparator::platform().as_str().to_string());
        builder = builder.formatting(line_separator, self.expand_empty_elements, self.keep_blank_lines);

        if let Some(group_id) = &self.group_id {
            builder = builder.group_id(group_id);
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_parameters() {
        let params = SortParameters::builder().build().unwrap();
        assert_eq!(params.pom_file, PathBuf::from("pom.xml"));
        assert!(params.create_backup_file);
        assert_eq!(params.backup_file_extension, ".bak");
        assert_eq!(params.encoding, Encoding::Utf8);
        assert_eq!(params.line_separator, LineSeparator::platform());
        assert!(params.ignore_line_separators);
        assert!(params.expand_empty_elements);
        assert!(!params.keep_blank_lines);
        assert_eq!(params.indent, Indent::Spaces(2));
        assert_eq!(
            params.order_source,
            OrderSource::Predefined(DEFAULT_PREDEFINED.to_string())
        );
        assert!(params.sort_dependencies.is_no_sorting());
        assert!(params.sort_plugins.is_no_sorting());
        assert_eq!(params.default_plugin_group_id, DEFAULT_PLUGIN_GROUP_ID);
        assert_eq!(params.verify_fail, VerifyFailType::Sort);
        assert!(!params.skip);
    }

    #[test]
    fn test_indent_values() {
        assert_eq!(Indent::from_count(-1).unwrap(), Indent::Tab);
        assert_eq!(Indent::from_count(0).unwrap(), Indent::Spaces(0));
        assert_eq!(Indent::from_count(255).unwrap(), Indent::Spaces(255));
        assert!(matches!(Indent::from_count(-2), Err(ConfigError::InvalidIndent(-2))));
        assert!(matches!(Indent::from_count(256), Err(ConfigError::InvalidIndent(256))));
    }

    #[test]
    fn test_indent_unit() {
        assert_eq!(Indent::Spaces(4).unit(), "    ");
        assert_eq!(Indent::Tab.unit(), "\t");
        assert_eq!(Indent::Spaces(0).unit(), "");
    }

    #[test]
    fn test_line_separator_parsing() {
        assert_eq!("\n".parse::<LineSeparator>().unwrap(), LineSeparator::Lf);
        assert_eq!("\\r\\n".parse::<LineSeparator>().unwrap(), LineSeparator::CrLf);
        assert_eq!("\r".parse::<LineSeparator>().unwrap(), LineSeparator::Cr);
        assert!(matches!(
            "\n\r".parse::<LineSeparator>(),
            Err(ConfigError::InvalidLineSeparator(_))
        ));
    }

    #[test]
    fn test_verify_fail_parsing() {
        assert_eq!("STOP".parse::<VerifyFailType>().unwrap(), VerifyFailType::Stop);
        assert_eq!("Warn".parse::<VerifyFailType>().unwrap(), VerifyFailType::Warn);
        assert!(matches!(
            "explode".parse::<VerifyFailType>(),
            Err(ConfigError::InvalidVerifyFail(_))
        ));
    }

    #[test]
    fn test_builder_rejects_invalid_values() {
        let indent = SortParameters::builder().indent(-5, false).build();
        assert!(matches!(indent, Err(ConfigError::InvalidIndent(-5))));

        let encoding = SortParameters::builder().encoding("EBCDIC").build();
        assert!(matches!(encoding, Err(ConfigError::UnsupportedEncoding(_))));

        let order = SortParameters::builder()
            .sort_order(None, Some("made_up".to_string()))
            .build();
        assert!(matches!(order, Err(ConfigError::UnknownPredefinedOrder(_))));

        let backup = SortParameters::builder()
            .file_output(true, "", None)
            .build();
        assert!(matches!(backup, Err(ConfigError::EmptyBackupExtension)));
    }

    #[test]
    fn test_custom_order_wins() {
        let params = SortParameters::builder()
            .sort_order(
                Some(PathBuf::from("order.xml")),
                Some("compact".to_string()),
            )
            .build()
            .unwrap();
        assert_eq!(params.order_source, OrderSource::Custom(PathBuf::from("order.xml")));
    }

    #[test]
    fn test_prioritize_local_group_id() {
        let params = SortParameters::builder()
            .group_id("com.acme")
            .sort_dependencies("groupId")
            .dependency_priority_groups("org.other")
            .prioritize_local_group_id(true)
            .build()
            .unwrap();
        assert_eq!(
            params.sort_dependencies.prioritized_groups(),
            &["com.acme".to_string(), "org.other".to_string()]
        );

        let without = SortParameters::builder()
            .group_id("com.acme")
            .dependency_priority_groups("org.other")
            .build()
            .unwrap();
        assert_eq!(without.sort_dependencies.prioritized_groups(), &["org.other".to_string()]);
    }

    #[test]
    fn test_load_settings() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".pomsortrc.json");
        let json = r#"{
            "nrOfIndentSpace": -1,
            "lineSeparator": "\\r\\n",
            "sortDependencies": "scope,groupId",
            "verifyFail": "warn",
            "keepBlankLines": true
        }"#;
        fs::write(&path, json).unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.nr_of_indent_space, -1);
        assert!(settings.create_backup_file);

        let params = settings.to_parameters().unwrap();
        assert_eq!(params.indent, Indent::Tab);
        assert_eq!(params.line_separator, LineSeparator::CrLf);
        assert_eq!(params.verify_fail, VerifyFailType::Warn);
        assert!(params.keep_blank_lines);
        assert_eq!(params.sort_dependencies.fields().len(), 2);
    }

    #[test]
    fn test_find_and_load_in_parent() {
        let temp = TempDir::new().unwrap();
        let sub_dir = temp.path().join("module");
        fs::create_dir(&sub_dir).unwrap();
        fs::write(temp.path().join("pomsort.json"), r#"{"sortModules": true}"#).unwrap();

        let settings = Settings::find_and_load(&sub_dir).unwrap();
        assert!(settings.sort_modules);
    }

    #[test]
    fn test_find_and_load_not_found() {
        let temp = TempDir::new().unwrap();
        assert!(Settings::find_and_load(temp.path()).is_none());
    }

    #[test]
    fn test_load_invalid_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".pomsortrc.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(Settings::load(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Settings::load(Path::new("/nonexistent/.pomsortrc.json"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidVerifyFail("explode".to_string());
        assert!(err.to_string().contains("SORT, WARN or STOP"));
    }
}
