//! textgrid CLI - monospace layout reconstruction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use textgrid::{render, JsonFormat, LayoutOptions, TextGrid, TextGridResult};

#[derive(Parser)]
#[command(name = "textgrid")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Rebuild monospace text layouts from positioned PDF text fragments", long_about = None)]
struct Cli {
    /// Input page dump (JSON)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(flatten)]
    layout: LayoutArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Options shared by every command that runs the pipeline.
#[derive(Args)]
struct LayoutArgs {
    /// Settings file (JSON) applied before the flags below
    #[arg(long, value_name = "FILE", env = "TEXTGRID_SETTINGS", global = true)]
    settings: Option<PathBuf>,

    /// Use the simple rendition (no column repair)
    #[arg(long, global = true)]
    simple: bool,

    /// Max left-edge offset between stacked block lines
    #[arg(long, value_name = "UNITS", global = true)]
    horizontal_tolerance: Option<f64>,

    /// Max vertical gap between stacked block lines
    #[arg(long, value_name = "UNITS", global = true)]
    vertical_proximity: Option<f64>,

    /// Max top-edge offset between a label and its value
    #[arg(long, value_name = "UNITS", global = true)]
    y_axis_tolerance: Option<f64>,

    /// Height multiple of the median above which an item is a title
    #[arg(long, value_name = "RATIO", global = true)]
    title_ratio: Option<f64>,

    /// Disable parallel processing
    #[arg(long, global = true)]
    sequential: bool,
}

impl LayoutArgs {
    fn builder(&self) -> Result<TextGrid, Box<dyn std::error::Error>> {
        let mut builder = TextGrid::new();
        if let Some(ref path) = self.settings {
            builder = builder.with_settings_file(path)?;
        }
        if self.simple {
            builder = builder.simple();
        }
        if let Some(v) = self.horizontal_tolerance {
            builder = builder.with_horizontal_tolerance(v);
        }
        if let Some(v) = self.vertical_proximity {
            builder = builder.with_vertical_proximity(v);
        }
        if let Some(v) = self.y_axis_tolerance {
            builder = builder.with_y_axis_tolerance(v);
        }
        if let Some(v) = self.title_ratio {
            builder = builder.with_title_ratio(v);
        }
        if self.sequential {
            builder = builder.sequential();
        }
        log::debug!("Layout options: {:?}", builder.options());
        Ok(builder)
    }

    fn open(&self, input: &Path) -> Result<TextGridResult, Box<dyn std::error::Error>> {
        let builder = self.builder()?;
        log::info!("Reconstructing {}", input.display());
        Ok(builder.open(input)?)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Write text, JSON and report for a page into a directory
    Convert {
        /// Input page dump
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Render the page as monospace text
    Text {
        /// Input page dump
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Write the full reconstruction as JSON
    Json {
        /// Input page dump
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show detected blocks, label-value pairs and titles
    Report {
        /// Input page dump
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show the search zones and neighbors of one fragment
    Inspect {
        /// Input page dump
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Fragment index
        #[arg(value_name = "INDEX")]
        index: usize,
    },

    /// Show page information
    Info {
        /// Input page dump
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Print the effective settings as JSON
    Settings {
        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let layout = cli.layout;

    let result = match cli.command {
        Some(Commands::Convert { input, output }) => cmd_convert(&layout, &input, output.as_deref()),
        Some(Commands::Text { input, output }) => cmd_text(&layout, &input, output.as_deref()),
        Some(Commands::Json {
            input,
            output,
            compact,
        }) => cmd_json(&layout, &input, output.as_deref(), compact),
        Some(Commands::Report { input }) => cmd_report(&layout, &input),
        Some(Commands::Inspect { input, index }) => cmd_inspect(&layout, &input, index),
        Some(Commands::Info { input }) => cmd_info(&layout, &input),
        Some(Commands::Settings { output }) => cmd_settings(&layout, output.as_deref()),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => match (cli.input, cli.output) {
            (Some(input), Some(output)) => cmd_convert(&layout, &input, Some(&output)),
            (Some(input), None) => cmd_text(&layout, &input, None),
            _ => {
                println!("{}", "Usage: textgrid <FILE> [OUTPUT]".yellow());
                println!("       textgrid --help for more information");
                Ok(())
            }
        },
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn write_or_print(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        log::debug!("Wrote {} bytes to {}", content.len(), path.display());
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_convert(
    layout: &LayoutArgs,
    input: &Path,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_output", stem))
    });

    fs::create_dir_all(&output_dir)?;
    log::debug!("Writing outputs to {}", output_dir.display());

    let pb = ProgressBar::new(4);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Reconstructing page...");
    let result = layout.open(input)?;
    pb.inc(1);

    pb.set_message("Writing text...");
    fs::write(output_dir.join("layout.txt"), result.to_text())?;
    pb.inc(1);

    pb.set_message("Writing JSON...");
    fs::write(
        output_dir.join("reconstruction.json"),
        result.to_json(JsonFormat::Pretty)?,
    )?;
    pb.inc(1);

    pb.set_message("Writing report...");
    fs::write(output_dir.join("report.txt"), result.report().to_string())?;
    pb.inc(1);

    pb.finish_with_message("Done!");

    if let Some(warning) = result.reconstruction.warning() {
        println!("{}", warning.yellow());
    }

    println!("\n{}", "Output files:".green().bold());
    println!("  {} layout.txt", "├─".dimmed());
    println!("  {} reconstruction.json", "├─".dimmed());
    println!("  {} report.txt", "└─".dimmed());

    Ok(())
}

fn cmd_text(
    layout: &LayoutArgs,
    input: &Path,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = layout.open(input)?;
    write_or_print(output, &result.to_text())
}

fn cmd_json(
    layout: &LayoutArgs,
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = layout.open(input)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    write_or_print(output, &result.to_json(format)?)
}

fn cmd_report(layout: &LayoutArgs, input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let result = layout.open(input)?;
    println!("{}", result.report());
    Ok(())
}

fn cmd_inspect(
    layout: &LayoutArgs,
    input: &Path,
    index: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = layout.open(input)?;
    let inspection = result.inspect(index)?;
    let fragments = &result.page.fragments;
    let describe = |i: usize| {
        let f = &fragments[i];
        format!(
            "{:>4}  \"{}\"  x:{:.2}, y:{:.2}, w:{:.2}, h:{:.2}",
            i, f.text, f.bounds.min_x, f.bounds.min_y, f.bounds.width, f.bounds.height
        )
    };

    println!("{}", "Selected Fragment".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}", describe(inspection.selected).blue());

    println!();
    println!("{}", "Search Zones".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    let zones = &inspection.zones;
    for (name, zone) in [
        ("Top", zones.top),
        ("Bottom", zones.bottom),
        ("Left", zones.left),
        ("Right", zones.right),
    ] {
        println!(
            "{}: x:{:.2}, y:{:.2}, w:{:.2}, h:{:.2}",
            name.bold(),
            zone.x,
            zone.y,
            zone.width,
            zone.height
        );
    }

    println!();
    println!("{}", "Neighbors".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    match inspection.chosen_successor {
        Some(i) => println!("{} {}", "chosen".green().bold(), describe(i).green()),
        None => println!("{}", "No successor in this row".dimmed()),
    }
    for i in inspection.other_candidates() {
        println!("{} {}", "nearby".yellow(), describe(i));
    }

    Ok(())
}

fn cmd_info(layout: &LayoutArgs, input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let result = layout.open(input)?;
    let metrics = result.metrics();
    let analysis = &result.reconstruction.analysis;
    let stats = result.reconstruction.rendition.stats();

    println!("{}", "Page Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!(
        "{}: {:.2} x {:.2}",
        "Viewport".bold(),
        result.page.viewport.width,
        result.page.viewport.height
    );
    println!("{}: {}", "Fragments".bold(), metrics.fragment_count);
    println!("{}: {:.2}", "Median height".bold(), metrics.median_height);
    println!("{}: {:.2}", "Avg char width".bold(), metrics.avg_char_width);

    println!();
    println!("{}", "Structure".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Blocks".bold(), analysis.blocks.len());
    println!("{}: {}", "Items".bold(), analysis.items.len());
    println!("{}: {}", "Label-value pairs".bold(), analysis.pairs.len());
    println!("{}: {}", "Titles".bold(), analysis.titles.len());

    println!();
    println!("{}", "Rendition".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {:?}", "Mode".bold(), result.reconstruction.rendition.mode);
    println!(
        "{}: {} ({} blank)",
        "Rows".bold(),
        stats.row_count,
        stats.blank_row_count
    );
    println!("{}: {}", "Columns".bold(), stats.width);
    println!("{}: {}", "Repair passes".bold(), stats.passes);
    if let Some(warning) = result.reconstruction.warning() {
        println!("{}", warning.yellow());
    }

    Ok(())
}

fn cmd_settings(layout: &LayoutArgs, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let options: LayoutOptions = layout.builder()?.options().clone();
    write_or_print(output, &options.to_settings_json()?)
}

fn cmd_version() {
    println!("{} {}", "textgrid".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Monospace layout reconstruction tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/textgrid".dimmed());
    println!("License: MIT");
    println!(
        "Column repair: up to {} passes",
        render::MAX_REPAIR_PASSES
    );
}
