//! pdfreflow CLI - rebuild HTML from pdftohtml XML

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfreflow::{
    analyze_file, parse_file_with_options, AnalyzeOptions, BreakStrategy, JsonFormat,
    PageSelection, ParseOptions, RenderOptions,
};

#[derive(Parser)]
#[command(name = "pdfreflow")]
#[command(version)]
#[command(about = "Rebuild paragraph-segmented HTML from pdftohtml -xml output", long_about = None)]
struct Cli {
    /// Input XML file (analyzed when no subcommand is given)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert XML to HTML
    Html {
        /// Input XML file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (derived from the title if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Paragraph break detection
        #[arg(long, value_enum, default_value = "vertical")]
        strategy: Strategy,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,

        #[command(flatten)]
        layout: LayoutArgs,

        /// Print rendering statistics
        #[arg(long)]
        stats: bool,
    },

    /// Print gap, indent and font statistics
    Analyze {
        /// Input XML file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Ignore lines at or below this top when counting gaps
        #[arg(long, value_name = "N")]
        max_top: Option<i64>,

        /// Output the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Dump the reconstructed document as JSON
    Json {
        /// Input XML file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Show document information
    Info {
        /// Input XML file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Show version information
    Version,
}

/// Overrides for the document's `<config>` block.
#[derive(Args, Clone, Default)]
struct LayoutArgs {
    /// Drop runs above this top
    #[arg(long, value_name = "N")]
    top_margin: Option<i64>,

    /// Drop runs below this top
    #[arg(long, value_name = "N")]
    bottom_margin: Option<i64>,

    /// Paragraph break threshold
    #[arg(long, value_name = "N")]
    para_break: Option<i64>,

    /// Same-line tolerance
    #[arg(long, value_name = "N")]
    buf: Option<i64>,

    /// Body text font id
    #[arg(long, value_name = "ID")]
    default_font: Option<String>,

    /// Chapter heading font id
    #[arg(long, value_name = "ID")]
    chapter_font: Option<String>,

    /// Fail when a font role does not match any font
    #[arg(long)]
    strict: bool,
}

impl LayoutArgs {
    fn parse_options(&self) -> ParseOptions {
        let mut options = ParseOptions::new();
        if self.strict {
            options = options.strict();
        }
        if let Some(value) = self.top_margin {
            options = options.with_top_margin(value);
        }
        if let Some(value) = self.bottom_margin {
            options = options.with_bottom_margin(value);
        }
        if let Some(value) = self.para_break {
            options = options.with_para_break(value);
        }
        if let Some(value) = self.buf {
            options = options.with_buf(value);
        }
        if let Some(ref id) = self.default_font {
            options = options.with_default_font(id.clone());
        }
        if let Some(ref id) = self.chapter_font {
            options = options.with_chapter_font(id.clone());
        }
        options
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Strategy {
    /// Vertical gap between lines
    Vertical,
    /// Lines starting with six spaces
    Spaces,
    /// Lines starting right of the paragraph threshold
    Indent,
}

impl From<Strategy> for BreakStrategy {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Vertical => BreakStrategy::Vertical,
            Strategy::Spaces => BreakStrategy::Spaces,
            Strategy::Indent => BreakStrategy::Indent,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Html {
            input,
            output,
            strategy,
            pages,
            layout,
            stats,
        }) => cmd_html(
            &input,
            output.as_deref(),
            strategy,
            pages.as_deref(),
            &layout,
            stats,
        ),
        Some(Commands::Analyze {
            input,
            max_top,
            json,
        }) => cmd_analyze(&input, max_top, json),
        Some(Commands::Json {
            input,
            output,
            compact,
            layout,
        }) => cmd_json(&input, output.as_deref(), compact, &layout),
        Some(Commands::Info { input, layout }) => cmd_info(&input, &layout),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: analyze if input is provided
            if let Some(input) = cli.input {
                cmd_analyze(&input, None, false)
            } else {
                println!("{}", "Usage: pdfreflow <FILE>".yellow());
                println!("       pdfreflow --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_html(
    input: &Path,
    output: Option<&Path>,
    strategy: Strategy,
    pages: Option<&str>,
    layout: &LayoutArgs,
    show_stats: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let page_selection = if let Some(p) = pages {
        PageSelection::parse(p).map_err(|e| format!("Invalid page range: {}", e))?
    } else {
        PageSelection::All
    };

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));

    pb.set_message("Parsing XML...");
    let doc = match parse_file_with_options(input, layout.parse_options()) {
        Ok(doc) => doc,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e.into());
        }
    };

    pb.set_message("Rendering HTML...");
    let render_options = RenderOptions::new()
        .with_strategy(strategy.into())
        .with_pages(page_selection);
    let result = match pdfreflow::render::to_html_with_stats(&doc, &render_options) {
        Ok(result) => result,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e.into());
        }
    };

    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(doc.html_file_name()));
    fs::write(&path, &result.content)?;
    pb.finish_and_clear();

    println!("{} {}", "Saved to".green(), path.display());

    if show_stats {
        let stats = &result.stats;
        println!();
        println!("{}", "Rendering Statistics".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        println!("{}: {}", "Pages".bold(), stats.page_count);
        println!("{}: {}", "Lines".bold(), stats.line_count);
        println!("{}: {}", "Paragraph breaks".bold(), stats.paragraph_breaks);
        println!("{}: {}", "Section breaks".bold(), stats.section_breaks);
        println!("{}: {}", "Chapters".bold(), stats.chapter_count);
        println!("{}: {}", "Words".bold(), stats.word_count);
    }

    Ok(())
}

fn cmd_analyze(
    input: &Path,
    max_top: Option<i64>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = AnalyzeOptions::new();
    if let Some(max_top) = max_top {
        options = options.with_max_top(max_top);
    }

    let report = analyze_file(input, &options)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report);
    }

    Ok(())
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    layout: &LayoutArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = parse_file_with_options(input, layout.parse_options())?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = pdfreflow::render::to_json(&doc, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_info(input: &Path, layout: &LayoutArgs) -> Result<(), Box<dyn std::error::Error>> {
    let format = pdfreflow::detect_format_from_path(input)?;
    let doc = parse_file_with_options(input, layout.parse_options())?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Format".bold(), format);
    println!("{}: {}", "Title".bold(), doc.metadata.title);
    if let Some(ref author) = doc.metadata.author {
        println!("{}: {}", "Author".bold(), author);
    }
    println!("{}: {}", "Pages".bold(), doc.page_count());
    println!("{}: {}", "Lines".bold(), doc.line_count());
    println!("{}: {}", "Output".bold(), doc.html_file_name());

    println!();
    println!("{}", "Layout".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let config = &doc.config;
    println!("{}: {}", "Top margin".bold(), config.top_margin);
    println!("{}: {}", "Bottom margin".bold(), config.bottom_margin);
    println!("{}: {}", "Paragraph break".bold(), config.para_break);
    println!("{}: {}", "Line tolerance".bold(), config.buf);

    println!();
    println!("{}", "Fonts".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for font in doc.fonts.iter() {
        println!(
            "  {:>8} {:>3}pt {:>4}% {} {} {}",
            font.css_class(),
            font.size_pt,
            font.size_pct,
            font.family,
            font.color.dimmed(),
            format!("[{}]", font.role).yellow()
        );
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdfreflow".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Rebuild readable HTML from pdftohtml -xml output");
}
