//! pom-sort CLI - sorts and verifies Maven pom files

use clap::{Args, Parser, Subcommand};
use glob::glob;
use pom_sort::{FileStatus, PomSorter, Settings, SortError};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "pom-sort")]
#[command(about = "Sorts the elements of Maven pom.xml files into a canonical order")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Path to config file (default: nearest .pomsortrc.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output, including a diff of unsorted files
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    options: SortOptions,
}

#[derive(Subcommand)]
enum Command {
    /// Sort pom files in place
    Sort {
        /// Pom files to sort (supports globs, default: pomFile from config)
        files: Vec<String>,
    },
    /// Check that pom files are sorted
    Verify {
        /// Pom files to verify (supports globs, default: pomFile from config)
        files: Vec<String>,

        /// What to do with an unsorted file: sort, warn or stop
        #[arg(long)]
        verify_fail: Option<String>,

        /// Write a violation report to this file
        #[arg(long)]
        violation_file: Option<PathBuf>,
    },
}

/// Overrides for values from the config file
#[derive(Args)]
struct SortOptions {
    /// Encoding of the pom files
    #[arg(long, global = true)]
    encoding: Option<String>,

    /// Line separator of the output: \n, \r or \r\n
    #[arg(long, global = true)]
    line_separator: Option<String>,

    /// Spaces per indent level, -1 for a tab
    #[arg(long, global = true, allow_negative_numbers = true)]
    nr_of_indent_space: Option<i32>,

    /// Keep single blank lines between elements
    #[arg(long, global = true)]
    keep_blank_lines: bool,

    /// Indent kept blank lines
    #[arg(long, global = true)]
    indent_blank_lines: bool,

    /// Write empty elements as <element />
    #[arg(long, global = true)]
    collapse_empty_elements: bool,

    /// Treat differing line separators as unsorted
    #[arg(long, global = true)]
    strict_line_separators: bool,

    /// Do not write a backup before changing a file
    #[arg(long, global = true)]
    no_backup: bool,

    /// Extension appended to the backup file name
    #[arg(long, global = true)]
    backup_extension: Option<String>,

    /// Bundled sort order name
    #[arg(long, global = true)]
    predefined_sort_order: Option<String>,

    /// Custom sort order file
    #[arg(long, global = true)]
    sort_order_file: Option<PathBuf>,

    /// Dependency fields to sort by, e.g. scope,groupId,artifactId
    #[arg(long, global = true)]
    sort_dependencies: Option<String>,

    /// groupIds sorted ahead of the others, comma separated
    #[arg(long, global = true)]
    dependency_priority_groups: Option<String>,

    /// Sort dependencies of the project's own groupId first
    #[arg(long, global = true)]
    prioritize_local_group_id: bool,

    /// The project's groupId
    #[arg(long, global = true)]
    group_id: Option<String>,

    /// Plugin fields to sort by, e.g. groupId,artifactId
    #[arg(long, global = true)]
    sort_plugins: Option<String>,

    /// Plugin groupIds sorted ahead of the others, comma separated
    #[arg(long, global = true)]
    plugin_priority_groups: Option<String>,

    /// Sort properties by name
    #[arg(long, global = true)]
    sort_properties: bool,

    /// Sort modules by name
    #[arg(long, global = true)]
    sort_modules: bool,

    /// Do nothing
    #[arg(long, global = true)]
    skip: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .format_target(false)
        .init();

    if let Err(e) = run(cli) {
        log::error!("{}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let (files, verify) = match &cli.command {
        Command::Sort { files } => (files, false),
        Command::Verify { files, .. } => (files, true),
    };

    let settings = build_settings(&cli, files)?;
    let sorter = PomSorter::new(settings.to_parameters()?)?;

    let files = if files.is_empty() {
        vec![sorter.params().pom_file.clone()]
    } else {
        expand_files(files)?
    };

    if files.is_empty() {
        return Err("No pom files matched".into());
    }

    let mut failed = false;
    for file in &files {
        let result = if verify {
            sorter.verify_file(file)
        } else {
            sorter.sort_file(file)
        };

        match result {
            Ok(FileStatus::NotSorted) => log::debug!("{}: left unsorted", file.display()),
            Ok(_) => {}
            Err(e @ SortError::NotSorted(_)) => {
                log::debug!("{}", e);
                failed = true;
            }
            Err(e) => {
                log::error!("{}: {}", file.display(), e);
                failed = true;
            }
        }
    }

    if failed {
        return Err("Some pom files could not be sorted".into());
    }

    Ok(())
}

fn build_settings(cli: &Cli, files: &[String]) -> Result<Settings, Box<dyn std::error::Error>> {
    let mut settings = if let Some(ref path) = cli.config {
        Settings::load(path).map_err(|e| format!("Failed to load config: {}", e))?
    } else {
        let start = files
            .first()
            .and_then(|f| Path::new(f).parent())
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or(std::env::current_dir()?);
        Settings::find_and_load(&start).unwrap_or_default()
    };

    // CLI overrides
    let opts = &cli.options;
    if let Some(ref encoding) = opts.encoding {
        settings.encoding = encoding.clone();
    }
    if let Some(ref separator) = opts.line_separator {
        settings.line_separator = Some(separator.clone());
    }
    if let Some(indent) = opts.nr_of_indent_space {
        settings.nr_of_indent_space = indent;
    }
    if let Some(ref extension) = opts.backup_extension {
        settings.backup_file_extension = extension.clone();
    }
    if let Some(ref name) = opts.predefined_sort_order {
        settings.predefined_sort_order = Some(name.clone());
    }
    if let Some(ref path) = opts.sort_order_file {
        settings.sort_order_file = Some(path.clone());
    }
    if let Some(ref fields) = opts.sort_dependencies {
        settings.sort_dependencies = Some(fields.clone());
    }
    if let Some(ref groups) = opts.dependency_priority_groups {
        settings.dependency_priority_groups = Some(groups.clone());
    }
    if let Some(ref group_id) = opts.group_id {
        settings.group_id = Some(group_id.clone());
    }
    if let Some(ref fields) = opts.sort_plugins {
        settings.sort_plugins = Some(fields.clone());
    }
    if let Some(ref groups) = opts.plugin_priority_groups {
        settings.plugin_priority_groups = Some(groups.clone());
    }

    if opts.keep_blank_lines {
        settings.keep_blank_lines = true;
    }
    if opts.indent_blank_lines {
        settings.indent_blank_lines = true;
    }
    if opts.collapse_empty_elements {
        settings.expand_empty_elements = false;
    }
    if opts.strict_line_separators {
        settings.ignore_line_separators = false;
    }
    if opts.no_backup {
        settings.create_backup_file = false;
    }
    if opts.prioritize_local_group_id {
        settings.prioritize_local_group_id = true;
    }
    if opts.sort_properties {
        settings.sort_properties = true;
    }
    if opts.sort_modules {
        settings.sort_modules = true;
    }
    if opts.skip {
        settings.skip = true;
    }

    if let Command::Verify {
        verify_fail,
        violation_file,
        ..
    } = &cli.command
    {
        if let Some(policy) = verify_fail {
            settings.verify_fail = policy.clone();
        }
        if let Some(path) = violation_file {
            settings.violation_filename = Some(path.clone());
        }
    }

    Ok(settings)
}

fn expand_files(patterns: &[String]) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let mut files = Vec::new();

    for pattern in patterns {
        if pattern.contains('*') || pattern.contains('?') {
            for entry in glob(pattern)? {
                files.push(entry?);
            }
        } else {
            files.push(PathBuf::from(pattern));
        }
    }

    Ok(files)
}
