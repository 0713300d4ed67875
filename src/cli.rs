use clap::Parser;
use colored::Colorize;
use graphql_parser::Pos;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "qtg",
    version,
    about = "\nQTG compiles TypeScript type definitions from GraphQL documents and introspection JSON."
)]
struct CliArgs {
    /// Directory to recursively compile
    #[arg(value_name = "DIR", default_value = ".")]
    root_dir: PathBuf,

    /// Path of schema introspection JSON file (defaults to DIR/schema.json)
    #[arg(short = 's', long = "schema-file", value_name = "FILE")]
    schema_file: Option<PathBuf>,

    /// Path of the rc config file (defaults to DIR/.qtgrc.json)
    #[arg(short = 'c', long = "config-file", value_name = "FILE")]
    config_file: Option<PathBuf>,

    /// Generate flat, prefixed type names instead of namespaces
    #[arg(long = "no-namespaces")]
    no_namespaces: bool,

    /// Sets the number of threads (defaults to number of CPU cores)
    #[arg(long = "num-threads", value_name = "NUMBER")]
    num_threads: Option<u8>,
}

/// User configured runtime configuration
#[derive(Debug)]
pub struct RuntimeConfig {
    root_dir: PathBuf,
    schema_path: PathBuf,
    config_path: PathBuf,
    config_path_is_explicit: bool,
    no_namespaces: bool,
    number_threads: u8,
}

impl RuntimeConfig {
    pub fn from_cli() -> Self {
        let args = CliArgs::parse();
        let schema_path = args
            .schema_file
            .unwrap_or_else(|| args.root_dir.join("schema.json"));
        let config_path_is_explicit = args.config_file.is_some();
        let config_path = args
            .config_file
            .unwrap_or_else(|| args.root_dir.join(".qtgrc.json"));
        RuntimeConfig {
            root_dir: args.root_dir,
            schema_path,
            config_path,
            config_path_is_explicit,
            no_namespaces: args.no_namespaces,
            number_threads: args
                .num_threads
                .or_else(|| u8::try_from(num_cpus::get()).ok())
                .unwrap_or(4),
        }
    }

    pub fn root_dir_path(&self) -> PathBuf {
        self.root_dir.clone()
    }

    pub fn schema_file_path(&self) -> PathBuf {
        self.schema_path.clone()
    }

    pub fn config_file_path(&self) -> PathBuf {
        self.config_path.clone()
    }

    pub fn config_file_is_explicit(&self) -> bool {
        self.config_path_is_explicit
    }

    pub fn no_namespaces_flag(&self) -> bool {
        self.no_namespaces
    }

    pub fn thread_count(&self) -> u8 {
        self.number_threads
    }
}

#[derive(Debug)]
struct FileContext {
    path: PathBuf,
    position: Option<Pos>,
    source_line: Option<String>,
}

/// A diagnostic ready for display. All messages go to stdout so generated
/// file listings stay machine-separable on stderr-free pipelines.
#[derive(Debug)]
pub struct PrintableMessage {
    summary: String,
    file_context: Option<FileContext>,
    help: Option<String>,
}

impl PrintableMessage {
    pub fn new_compile_error(
        summary: &str,
        file_path: &Path,
        contents: &str,
        position: &Pos,
        help: Option<&str>,
    ) -> Self {
        let source_line = contents
            .lines()
            .nth(position.line.saturating_sub(1))
            .map(str::to_string);
        PrintableMessage {
            summary: summary.to_string(),
            file_context: Some(FileContext {
                path: file_path.to_path_buf(),
                position: Some(*position),
                source_line,
            }),
            help: help.map(str::to_string),
        }
    }

    pub fn new_file_error(summary: &str, file_path: &Path) -> Self {
        PrintableMessage {
            summary: summary.to_string(),
            file_context: Some(FileContext {
                path: file_path.to_path_buf(),
                position: None,
                source_line: None,
            }),
            help: None,
        }
    }

    pub fn new_simple_program_error(summary: &str) -> Self {
        PrintableMessage {
            summary: summary.to_string(),
            file_context: None,
            help: None,
        }
    }

    pub fn with_help(mut self, help: &str) -> Self {
        self.help = Some(help.to_string());
        self
    }

    pub fn print(&self) {
        println!("{}: {}", "error".red().bold(), self.summary);
        if let Some(file_context) = &self.file_context {
            match &file_context.position {
                Some(position) => println!(
                    "  {} {}:{}:{}",
                    "-->".blue(),
                    file_context.path.display(),
                    position.line,
                    position.column
                ),
                None => println!("  {} {}", "-->".blue(), file_context.path.display()),
            }
            if let (Some(position), Some(source_line)) =
                (&file_context.position, &file_context.source_line)
            {
                let line_number = position.line.to_string();
                let gutter = " ".repeat(line_number.len());
                let caret_pad = " ".repeat(position.column.saturating_sub(1));
                println!("{gutter} {}", "|".blue());
                println!("{line_number} {} {source_line}", "|".blue());
                println!("{gutter} {} {caret_pad}{}", "|".blue(), "^".red().bold());
            }
        }
        if let Some(help) = &self.help {
            println!("  = {}: {help}", "help".cyan());
        }
    }
}

pub fn print_messages(messages: &[PrintableMessage]) {
    for message in messages {
        message.print();
        println!();
    }
}

/// Ranks `options` against `target` and words a short did-you-mean hint for
/// the closest ones. `None` when nothing is close enough to help.
pub fn similar_help_suggestions(
    target: &str,
    options: impl Iterator<Item = String>,
) -> Option<String> {
    let mut scored = options
        .filter_map(|option| {
            let score = strsim::jaro_winkler(target, &option);
            if score > 0.74 {
                Some((option, score))
            } else {
                None
            }
        })
        .collect::<Vec<_>>();
    if scored.is_empty() {
        return None;
    }
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    let suggestions = scored
        .into_iter()
        .take(2)
        .map(|(name, _)| format!("`{name}`"))
        .collect::<Vec<_>>()
        .join(" or ");
    Some(format!(" Did you mean {suggestions}?"))
}
