//! Sort and verify pipeline over strings and pom files

use crate::config::{ConfigError, SortParameters, VerifyFailType};
use crate::document::Document;
use crate::error::SortError;
use crate::formatter::{FormatOptions, Formatter};
use crate::order::{self, OrderNode};
use crate::sorter::Sorter;
use crate::verifier::{self, VerifyOutcome};
use std::fs;
use std::path::{Path, PathBuf};

/// What happened to a pom file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    /// The skip flag is set
    Skipped,
    /// Nothing to do
    AlreadySorted,
    /// The file was rewritten
    Sorted,
    /// Left unsorted under the warn policy
    NotSorted,
}

/// Sorts and verifies poms with one configuration
pub struct PomSorter {
    params: SortParameters,
    order: OrderNode,
}

impl PomSorter {
    /// Create a sorter, loading the configured sort order
    pub fn new(params: SortParameters) -> Result<Self, SortError> {
        let order = order::resolve(&params.order_source)?;
        log::debug!("Sorting with {}", params.order_source);
        Ok(Self::with_order(params, order))
    }

    /// Create a sorter with an already parsed sort order
    pub fn with_order(params: SortParameters, order: OrderNode) -> Self {
        log::debug!("Sort parameters: {:?}", params);
        Self { params, order }
    }

    pub fn params(&self) -> &SortParameters {
        &self.params
    }

    /// Sort pom text and render it
    pub fn sort_xml(&self, text: &str) -> Result<String, SortError> {
        let mut document = self.parse(text)?;
        Sorter::new(&self.order, &self.params).sort(&mut document);
        Ok(self.formatter().render(&document))
    }

    /// Check whether pom text is sorted
    pub fn verify_xml(&self, text: &str) -> Result<VerifyOutcome, SortError> {
        let original = self.parse(text)?;
        let mut sorted = original.clone();
        Sorter::new(&self.order, &self.params).sort(&mut sorted);
        let sorted_text = self.formatter().render(&sorted);

        Ok(verifier::verify(
            text,
            &original,
            sorted_text,
            &sorted,
            self.params.ignore_line_separators,
        ))
    }

    /// Sort the configured pom file
    pub fn sort_pom(&self) -> Result<FileStatus, SortError> {
        self.sort_file(&self.params.pom_file)
    }

    /// Verify the configured pom file
    pub fn verify_pom(&self) -> Result<FileStatus, SortError> {
        self.verify_file(&self.params.pom_file)
    }

    /// Sort a pom file in place, keeping a backup of the original
    pub fn sort_file(&self, path: &Path) -> Result<FileStatus, SortError> {
        if self.params.skip {
            log::info!("Skipping pom-sort");
            return Ok(FileStatus::Skipped);
        }

        log::info!("Sorting file {}", path.display());
        let bytes = read_file(path)?;
        let text = self.params.encoding.decode(&bytes)?;
        let outcome = self.verify_xml(&text)?;

        if outcome.ordered {
            log::info!("Pom file is already sorted, exiting");
            return Ok(FileStatus::AlreadySorted);
        }

        self.write_sorted(path, &bytes, &outcome.sorted)?;
        Ok(FileStatus::Sorted)
    }

    /// Verify a pom file and apply the configured failure policy
    pub fn verify_file(&self, path: &Path) -> Result<FileStatus, SortError> {
        if self.params.skip {
            log::info!("Skipping pom-sort");
            return Ok(FileStatus::Skipped);
        }

        log::info!("Verifying file {}", path.display());
        let bytes = read_file(path)?;
        let text = self.params.encoding.decode(&bytes)?;
        let outcome = self.verify_xml(&text)?;

        if outcome.ordered {
            log::info!("The file {} is sorted", path.display());
            return Ok(FileStatus::AlreadySorted);
        }

        if let Some(message) = &outcome.message {
            log::info!("{}", message);
            if let Some(violation_file) = &self.params.violation_file {
                write_violation_report(violation_file, path, message)?;
            }
        }
        log::debug!("{}", outcome.diff(&path.display().to_string()));

        match self.params.verify_fail {
            VerifyFailType::Sort => {
                log::info!("The file {} is not sorted", path.display());
                self.write_sorted(path, &bytes, &outcome.sorted)?;
                Ok(FileStatus::Sorted)
            }
            VerifyFailType::Warn => {
                log::warn!("The file {} is not sorted", path.display());
                Ok(FileStatus::NotSorted)
            }
            VerifyFailType::Stop => {
                log::error!("The file {} is not sorted", path.display());
                Err(SortError::NotSorted(path.to_path_buf()))
            }
        }
    }

    fn parse(&self, text: &str) -> Result<Document, SortError> {
        let document = Document::parse(text)?;
        let declared = document
            .declaration
            .as_ref()
            .and_then(|d| d.encoding.as_deref());

        if let Some(declared) = declared {
            if !self.params.encoding.matches(declared) {
                return Err(ConfigError::EncodingMismatch {
                    declared: declared.to_string(),
                    configured: self.params.encoding,
                }
                .into());
            }
        }

        Ok(document)
    }

    fn formatter(&self) -> Formatter {
        Formatter::new(FormatOptions::from(&self.params))
    }

    fn write_sorted(&self, path: &Path, original: &[u8], sorted: &str) -> Result<(), SortError> {
        let encoded = self.params.encoding.encode(sorted)?;

        if self.params.create_backup_file {
            let backup = backup_path(path, &self.params.backup_file_extension);
            fs::write(&backup, original).map_err(|e| SortError::Backup {
                path: backup.clone(),
                source: e,
            })?;
            log::info!("Saved backup of {} to {}", path.display(), backup.display());
        }

        fs::write(path, encoded).map_err(|e| SortError::Write {
            path: path.to_path_buf(),
            source: e,
        })?;
        log::info!("Saved sorted pom file to {}", path.display());
        Ok(())
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>, SortError> {
    fs::read(path).map_err(|e| SortError::Read {
        path: path.to_path_buf(),
        source: e,
    })
}

/// `pom.xml` + `.bak` -> `pom.xml.bak`
fn backup_path(path: &Path, extension: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(extension);
    PathBuf::from(name)
}

fn write_violation_report(report: &Path, pom: &Path, message: &str) -> Result<(), SortError> {
    log::info!("Saving violation report to {}", report.display());

    let write_error = |e: std::io::Error| SortError::Write {
        path: report.to_path_buf(),
        source: e,
    };
    if let Some(parent) = report.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    let content = verifier::violation_report(&pom.display().to_string(), message);
    fs::write(report, content).map_err(write_error)
}
