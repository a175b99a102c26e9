//! Leafmark CLI - Convert, validate, and inspect Leafmark documents
//!
//! Usage:
//!   lmcli [OPTIONS] <COMMAND> <FILE>
//!
//! Commands:
//!   convert   Render the document to HTML
//!   validate  Check every block for errors
//!   stats     Show document statistics
//!   title     Print the page title (first level-1 heading)

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use leafmark_core::{convert, BlockKind, ConvertErrors, Document};
use serde::Serialize;

#[derive(Debug, Parser)]
#[command(name = "lmcli", version, about = "Leafmark document converter and validator")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log each block as it is classified
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    json: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render the document to HTML
    Convert {
        file: PathBuf,

        /// Write the HTML here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Fail when the document has no level-1 heading
        #[arg(long)]
        require_title: bool,
    },
    /// Check every block for errors without output
    Validate { file: PathBuf },
    /// Show document statistics
    Stats { file: PathBuf },
    /// Print the page title
    Title { file: PathBuf },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("error: {:#}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Command::Convert {
            file,
            output,
            require_title,
        } => {
            let input = read_input(file)?;
            cmd_convert(file, &input, output.as_deref(), *require_title, cli.json)
        }
        Command::Validate { file } => cmd_validate(&read_input(file)?, cli.json),
        Command::Stats { file } => cmd_stats(&read_input(file)?, cli.json),
        Command::Title { file } => cmd_title(file, &read_input(file)?),
    }
}

fn read_input(path: &Path) -> Result<String> {
    log::debug!("reading {}", path.display());
    fs::read_to_string(path).with_context(|| format!("failed to read '{}'", path.display()))
}

// =============================================================================
// Convert Command
// =============================================================================

fn cmd_convert(
    file: &Path,
    input: &str,
    output: Option<&Path>,
    require_title: bool,
    json: bool,
) -> Result<()> {
    let page = convert(input).with_context(|| format!("failed to convert '{}'", file.display()))?;

    if require_title {
        page.require_title()
            .with_context(|| format!("'{}' has no page title", file.display()))?;
    }

    let rendered = if json {
        let doc = Document::parse(input);
        let json_doc = JsonPage {
            title: page.title.as_deref(),
            html: &page.html,
            blocks: convert_blocks(&doc)?,
        };
        serde_json::to_string_pretty(&json_doc)?
    } else {
        page.html
    };

    match output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("failed to write '{}'", path.display()))?;
            log::info!("wrote {}", path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

// =============================================================================
// Validate Command
// =============================================================================

fn cmd_validate(input: &str, json: bool) -> Result<()> {
    let errors = Document::parse(input).validate();

    if json {
        println!("{}", validation_json(&errors));
    } else if errors.is_empty() {
        println!("Valid: no errors found");
    } else {
        eprintln!("Invalid: {} error(s) found", errors.len());
        for error in errors.iter() {
            eprintln!("  - {}", error);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        anyhow::bail!("{} error(s) found", errors.len())
    }
}

fn validation_json(errors: &ConvertErrors) -> serde_json::Value {
    let list: Vec<_> = errors
        .iter()
        .map(|e| {
            serde_json::json!({
                "message": e.message,
                "kind": format!("{:?}", e.kind),
                "span": e.span.map(|s| serde_json::json!({"start": s.start, "end": s.end})),
                "internal": e.is_internal()
            })
        })
        .collect();
    serde_json::json!({"valid": errors.is_empty(), "errors": list})
}

// =============================================================================
// Stats Command
// =============================================================================

fn cmd_stats(input: &str, json: bool) -> Result<()> {
    let doc = Document::parse(input);
    let stats = DocumentStats::from_document(&doc, input);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Document Statistics");
    println!("-------------------");
    println!("Content:");
    println!("  Total blocks:   {}", stats.total_blocks);
    println!("  Headings:       {}", stats.headings);
    println!("  Paragraphs:     {}", stats.paragraphs);
    println!("  Code blocks:    {}", stats.code_blocks);
    println!("  Quotes:         {}", stats.quotes);
    println!("  Lists:          {}", stats.lists);
    println!("  List items:     {}", stats.list_items);
    println!();
    println!("Size:");
    println!("  Characters:     {}", stats.chars);
    println!("  Words (est.):   {}", stats.words);
    println!("  Lines:          {}", stats.lines);
    println!();
    println!("Errors:         {}", stats.errors);

    Ok(())
}

#[derive(Debug, Default, Serialize)]
struct DocumentStats {
    total_blocks: usize,
    headings: usize,
    paragraphs: usize,
    code_blocks: usize,
    quotes: usize,
    lists: usize,
    list_items: usize,
    chars: usize,
    words: usize,
    lines: usize,
    errors: usize,
}

impl DocumentStats {
    fn from_document(doc: &Document, input: &str) -> Self {
        let mut stats = Self {
            total_blocks: doc.blocks.len(),
            chars: input.chars().count(),
            words: input.split_whitespace().count(),
            lines: input.lines().count(),
            errors: doc.validate().len(),
            ..Self::default()
        };

        for block in &doc.blocks {
            match block.kind {
                BlockKind::Heading => stats.headings += 1,
                BlockKind::Paragraph => stats.paragraphs += 1,
                BlockKind::Code => stats.code_blocks += 1,
                BlockKind::Quote => stats.quotes += 1,
                BlockKind::UnorderedList | BlockKind::OrderedList => {
                    stats.lists += 1;
                    stats.list_items += block.lines().count();
                }
            }
        }

        stats
    }
}

// =============================================================================
// Title Command
// =============================================================================

fn cmd_title(file: &Path, input: &str) -> Result<()> {
    let page = convert(input).with_context(|| format!("failed to convert '{}'", file.display()))?;
    let title = page
        .require_title()
        .with_context(|| format!("'{}' has no page title", file.display()))?;
    println!("{}", title);
    Ok(())
}

// =============================================================================
// JSON Output
// =============================================================================

#[derive(Serialize)]
struct JsonPage<'a> {
    title: Option<&'a str>,
    html: &'a str,
    blocks: Vec<JsonBlock<'a>>,
}

#[derive(Serialize)]
struct JsonBlock<'a> {
    kind: &'a str,
    start: u32,
    end: u32,
    content: &'a str,
    html: String,
}

fn convert_blocks<'a>(doc: &Document<'a>) -> Result<Vec<JsonBlock<'a>>> {
    doc.blocks
        .iter()
        .map(|block| -> Result<JsonBlock<'a>> {
            Ok(JsonBlock {
                kind: block.kind.as_str(),
                start: block.span.start,
                end: block.span.end,
                content: block.content,
                html: block.to_node()?.to_html()?,
            })
        })
        .collect()
}
