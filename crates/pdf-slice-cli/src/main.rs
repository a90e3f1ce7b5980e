use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use pdf_slice::{ExportOptions, SliceDiagnostic, SliceSession, SliceStatistics};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "pdfslice",
    about = "Split tall images into A3-proportioned PDF pages",
    version
)]
struct Cli {
    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cut an image at A3-ratio lines and save the slices as a PDF
    Split {
        /// Input image (PNG, JPEG, BMP, GIF)
        #[arg(short, long)]
        input: PathBuf,

        /// Output PDF file (not needed with --stats-only)
        #[arg(short, long, required_unless_present = "stats_only")]
        output: Option<PathBuf>,

        /// Extra cut-line at this row (repeatable)
        #[arg(long = "line", value_name = "Y")]
        lines: Vec<f64>,

        /// Skip the automatically placed lines
        #[arg(long)]
        no_auto: bool,

        /// Resolution used to size PDF pages
        #[arg(long)]
        dpi: Option<f32>,

        /// Document title
        #[arg(long)]
        title: Option<String>,

        /// Export options as JSON
        #[arg(long)]
        config: Option<PathBuf>,

        /// Show statistics only, don't generate PDF
        #[arg(long)]
        stats_only: bool,
    },

    /// Print the automatically placed cut-lines for an image
    Lines {
        /// Input image
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn init_logging(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto)?;
    Ok(())
}

fn print_statistics(stats: &SliceStatistics) {
    println!("Slice Statistics:");
    println!("  Image: {}x{}", stats.image.width, stats.image.height);
    println!("  Chunk height: {:.2}", stats.chunk_height);
    println!("  Cut-lines: {}", stats.line_count);
    println!("  Pages: {}", stats.page_count);
    for (index, slice) in stats.slices.iter().enumerate() {
        println!(
            "  [{}] rows {}..{} → {}px{}",
            index + 1,
            slice.top,
            slice.bottom,
            slice.padded_height,
            if slice.tall { " (taller than A3)" } else { "" }
        );
    }
    println!("  Padding rows added: {}", stats.total_padding_rows);
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Commands::Split {
            input,
            output,
            lines,
            no_auto,
            dpi,
            title,
            config,
            stats_only,
        } => {
            let mut options = match config {
                Some(path) => ExportOptions::load(&path).await?,
                None => ExportOptions::default(),
            };
            if let Some(dpi) = dpi {
                options.dpi = dpi;
            }
            if title.is_some() {
                options.title = title;
            }
            options.validate()?;

            let mut session = SliceSession::new(options);
            session.open(&input).await?;
            if no_auto {
                session.clear_lines()?;
            }
            for y in lines {
                session.add_line(y)?;
            }

            print_statistics(&session.statistics()?);

            let Some(output) = output.filter(|_| !stats_only) else {
                return Ok(());
            };

            let report = session.export(&output).await?;
            for diagnostic in &report.diagnostics {
                match diagnostic {
                    SliceDiagnostic::TallSlice {
                        index,
                        height,
                        target_height,
                    } => println!(
                        "  Note: slice {} is {}px tall, past A3 proportions (A3 height {}px)",
                        index + 1,
                        height,
                        target_height
                    ),
                }
            }
            println!(
                "Sliced {} page(s) → {}",
                report.page_count,
                output.display()
            );
        }

        Commands::Lines { input } => {
            let mut session = SliceSession::default();
            let dims = session.open(&input).await?;
            if let Some(registry) = session.registry() {
                println!(
                    "{}x{}, chunk height {:.2}",
                    dims.width,
                    dims.height,
                    registry.chunk_height()
                );
                for y in registry.positions() {
                    println!("{:.2}", y);
                }
            }
        }
    }

    Ok(())
}
