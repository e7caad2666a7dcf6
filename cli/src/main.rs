//! docdown CLI - render document trees to Markdown, text, and JSON

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use docdown::{export, load, ExportOptions, JsonFormat};

#[derive(Parser)]
#[command(name = "docdown")]
#[command(version)]
#[command(about = "Render structured document trees to Markdown, text, and JSON", long_about = None)]
struct Cli {
    /// Input document JSON file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file (stdout if not specified)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a document tree to Markdown
    #[command(alias = "md")]
    Markdown {
        /// Input document JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Include YAML frontmatter
        #[arg(short, long)]
        frontmatter: bool,

        /// Picture rendering mode
        #[arg(long, value_enum, default_value = "placeholder")]
        image_mode: ImageModeArg,

        /// Restrict export to a single page (1-indexed)
        #[arg(long)]
        page: Option<u32>,

        /// First sequential element index to render (inclusive)
        #[arg(long)]
        from_element: Option<usize>,

        /// Last sequential element index to render (exclusive)
        #[arg(long)]
        to_element: Option<usize>,

        /// Indentation width for nested lists
        #[arg(long, default_value = "4")]
        indent: usize,

        /// Wrap width for plain text items (0 = no wrapping)
        #[arg(long, default_value = "0")]
        width: usize,

        /// Print export statistics to stderr
        #[arg(long)]
        stats: bool,
    },

    /// Render a document tree to plain text
    Text {
        /// Input document JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Restrict export to a single page (1-indexed)
        #[arg(long)]
        page: Option<u32>,
    },

    /// Validate and re-serialize a document tree as JSON
    Json {
        /// Input document JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show document information
    Info {
        /// Input document JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Render every document tree in a directory to Markdown
    Batch {
        /// Directory containing document JSON files
        #[arg(value_name = "DIR")]
        input: PathBuf,

        /// Output directory (defaults to the input directory)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Include YAML frontmatter
        #[arg(short, long)]
        frontmatter: bool,

        /// Picture rendering mode
        #[arg(long, value_enum, default_value = "placeholder")]
        image_mode: ImageModeArg,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum ImageModeArg {
    /// Emit a placeholder comment per picture
    Placeholder,
    /// Emit inline image references where available
    Embedded,
}

impl From<ImageModeArg> for docdown::ImageMode {
    fn from(mode: ImageModeArg) -> Self {
        match mode {
            ImageModeArg::Placeholder => docdown::ImageMode::Placeholder,
            ImageModeArg::Embedded => docdown::ImageMode::Embedded,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Markdown {
            input,
            output,
            frontmatter,
            image_mode,
            page,
            from_element,
            to_element,
            indent,
            width,
            stats,
        }) => cmd_markdown(
            &input,
            output.as_deref(),
            frontmatter,
            image_mode,
            page,
            from_element,
            to_element,
            indent,
            width,
            stats,
        ),
        Some(Commands::Text {
            input,
            output,
            page,
        }) => cmd_text(&input, output.as_deref(), page),
        Some(Commands::Json {
            input,
            output,
            compact,
        }) => cmd_json(&input, output.as_deref(), compact),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Batch {
            input,
            output,
            frontmatter,
            image_mode,
        }) => cmd_batch(&input, output.as_deref(), frontmatter, image_mode),
        None => {
            if let Some(input) = cli.input {
                cmd_markdown(
                    &input,
                    cli.output.as_deref(),
                    false,
                    ImageModeArg::Placeholder,
                    None,
                    None,
                    None,
                    4,
                    0,
                    false,
                )
            } else {
                println!("{}", "Usage: docdown <FILE> [OUTPUT]".yellow());
                println!("       docdown --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_markdown(
    input: &Path,
    output: Option<&Path>,
    frontmatter: bool,
    image_mode: ImageModeArg,
    page: Option<u32>,
    from_element: Option<usize>,
    to_element: Option<usize>,
    indent: usize,
    width: usize,
    stats: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = ExportOptions::new()
        .with_frontmatter(frontmatter)
        .with_image_mode(image_mode.into())
        .with_indent(indent)
        .with_text_width(width);

    if let Some(page) = page {
        options = options.with_page(page);
    }
    if from_element.is_some() || to_element.is_some() {
        options = options.with_element_range(
            from_element.unwrap_or(0),
            to_element.unwrap_or(usize::MAX),
        );
    }

    let doc = load::from_file(input)?;

    if stats {
        let result = export::to_markdown_with_stats(&doc, &options)?;
        eprintln!("{}", "Export statistics:".green().bold());
        eprintln!("  headings:   {}", result.stats.heading_count);
        eprintln!("  paragraphs: {}", result.stats.paragraph_count);
        eprintln!("  list items: {}", result.stats.list_item_count);
        eprintln!("  tables:     {}", result.stats.table_count);
        eprintln!("  pictures:   {}", result.stats.picture_count);
        if result.is_degraded() {
            eprintln!(
                "  {} {}",
                "degraded:".yellow(),
                result.stats.degraded_count
            );
        }
        write_output(output, &result.content)?;
    } else {
        let markdown = export::to_markdown(&doc, &options)?;
        write_output(output, &markdown)?;
    }

    Ok(())
}

fn cmd_text(
    input: &Path,
    output: Option<&Path>,
    page: Option<u32>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = ExportOptions::new();
    if let Some(page) = page {
        options = options.with_page(page);
    }

    let doc = load::from_file(input)?;
    let text = export::to_text(&doc, &options)?;
    write_output(output, &text)?;

    Ok(())
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let doc = load::from_file(input)?;
    let json = export::to_json(&doc, format)?;
    write_output(output, &json)?;

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load::from_file(input)?;

    println!("{}", "Document information:".green().bold());
    println!("  name:  {}", doc.name);
    if let Some(ref origin) = doc.metadata.origin {
        println!("  source: {}", origin);
    }
    if let Some(pages) = doc.metadata.page_count {
        println!("  pages: {}", pages);
    }
    println!("  nodes: {}", doc.node_count());

    let mut counts: Vec<_> = doc.label_counts().into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.as_str().cmp(b.0.as_str())));
    for (label, count) in counts {
        println!("  {} {}: {}", "├─".dimmed(), label.as_str(), count);
    }

    Ok(())
}

fn cmd_batch(
    input: &Path,
    output: Option<&Path>,
    frontmatter: bool,
    image_mode: ImageModeArg,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output.map(Path::to_path_buf).unwrap_or_else(|| input.to_path_buf());
    fs::create_dir_all(&output_dir)?;

    let mut files: Vec<PathBuf> = fs::read_dir(input)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();

    if files.is_empty() {
        println!("{}", "No document JSON files found".yellow());
        return Ok(());
    }

    let options = ExportOptions::new()
        .with_frontmatter(frontmatter)
        .with_image_mode(image_mode.into());

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let failures: Vec<(PathBuf, String)> = files
        .par_iter()
        .filter_map(|path| {
            let result = convert_one(path, &output_dir, &options);
            pb.inc(1);
            result.err().map(|e| (path.clone(), e.to_string()))
        })
        .collect();

    pb.finish_with_message("Done");

    println!(
        "{} {} of {} documents",
        "Converted".green().bold(),
        files.len() - failures.len(),
        files.len()
    );
    for (path, message) in &failures {
        eprintln!("  {} {}: {}", "✗".red(), path.display(), message);
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(format!("{} documents failed", failures.len()).into())
    }
}

fn convert_one(path: &Path, output_dir: &Path, options: &ExportOptions) -> docdown::Result<()> {
    let doc = load::from_file(path)?;
    let markdown = export::to_markdown(&doc, options)?;

    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| doc.name.clone());
    fs::write(output_dir.join(format!("{}.md", stem)), markdown)?;

    Ok(())
}

fn write_output(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}
