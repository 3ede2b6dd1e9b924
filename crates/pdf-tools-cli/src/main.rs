mod logger;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use logger::StderrLogger;
use pdf_unspread::{ExtractStrategy, UnspreadOptions};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "unspread",
    about = "Split two-page PDF spreads into single pages",
    version
)]
struct Cli {
    /// Input PDF file
    #[arg(long)]
    path: PathBuf,

    /// Split top/bottom instead of left/right
    #[arg(long)]
    vertical: bool,

    /// Keep only the centered half of the first page
    #[arg(long, alias = "centeredTop")]
    centered_top: bool,

    /// Keep only the centered half of the last page
    #[arg(long, alias = "centeredLast")]
    centered_last: bool,

    /// Emit the two halves in reverse order
    #[arg(long)]
    opposite: bool,

    /// Treat pages with a narrow trim box as single pages
    #[arg(long)]
    detect_singletons: bool,

    /// How each output page is produced
    #[arg(long, value_enum)]
    strategy: Option<StrategyArg>,

    /// JSON options file; flags given on the command line take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output PDF file (defaults to the input name with a suffix)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Show statistics only, don't generate PDF
    #[arg(long)]
    stats_only: bool,

    /// More log output (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    /// Copy the page and narrow its boxes
    Clone,
    /// Draw the page as a clipped form XObject
    Embed,
}

impl From<StrategyArg> for ExtractStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Clone => Self::CloneAndReframe,
            StrategyArg::Embed => Self::EmbedAndDraw,
        }
    }
}

impl Cli {
    /// Start from the config file (or defaults) and apply the flags on top
    async fn options(&self) -> Result<UnspreadOptions> {
        let mut options = match &self.config {
            Some(path) => UnspreadOptions::load(path)
                .await
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => UnspreadOptions::default(),
        };

        options.vertical |= self.vertical;
        options.centered_top |= self.centered_top;
        options.centered_last |= self.centered_last;
        options.opposite |= self.opposite;
        options.detect_singletons |= self.detect_singletons;
        if let Some(strategy) = self.strategy {
            options.strategy = strategy.into();
        }

        options.validate()?;
        Ok(options)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    StderrLogger::new(StderrLogger::level_for(cli.verbose, cli.quiet))
        .init()
        .context("Failed to install logger")?;

    let options = cli.options().await?;

    let document = pdf_unspread::load_pdf(&cli.path)
        .await
        .with_context(|| format!("Failed to load {}", cli.path.display()))?;

    // Calculate and show statistics
    let stats = pdf_unspread::calculate_statistics(&document, &options)?;
    println!("Unspread Statistics:");
    println!("  Source pages: {}", stats.source_pages);
    println!("  Output pages: {}", stats.output_pages);
    println!("  Split pages: {}", stats.split_pages);
    println!("  Centered pages: {}", stats.centered_pages);
    println!("  Passed through: {}", stats.passed_through);
    println!("  Distinct sizes: {}", stats.distinct_sizes);
    println!(
        "  Split axis: {:?}{}",
        stats.effective_axis,
        if stats.axis_flipped {
            " (flipped by rotation)"
        } else {
            ""
        }
    );

    if cli.stats_only {
        return Ok(());
    }

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| options.output_path_for(&cli.path));

    let unspread = pdf_unspread::unspread(&document, &options).await?;
    pdf_unspread::save_pdf(unspread, &output)
        .await
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Unspread → {}", output.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_aliases() {
        let cli = Cli::try_parse_from([
            "unspread",
            "--path",
            "book.pdf",
            "--centeredTop",
            "--centeredLast",
        ])
        .unwrap();
        assert!(cli.centered_top);
        assert!(cli.centered_last);
    }

    #[tokio::test]
    async fn test_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "unspread",
            "--path",
            "book.pdf",
            "--vertical",
            "--opposite",
            "--strategy",
            "embed",
        ])
        .unwrap();
        let options = cli.options().await.unwrap();
        assert!(options.vertical);
        assert!(options.opposite);
        assert!(!options.centered_top);
        assert_eq!(options.strategy, ExtractStrategy::EmbedAndDraw);
    }

    #[test]
    fn test_path_is_required() {
        assert!(Cli::try_parse_from(["unspread", "--vertical"]).is_err());
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["unspread", "--path", "a.pdf", "-v", "-q"]).is_err());
    }
}
