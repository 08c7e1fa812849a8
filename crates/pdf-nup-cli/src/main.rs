use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

const OUTPUT_SUFFIX: &str = "_comprized";

#[derive(Parser)]
#[command(
    name = "pdfnup",
    about = "Combine PDF pages 4 or 6 to a sheet",
    version
)]
struct Cli {
    /// Input PDF file
    #[arg(required_unless_present = "dir", conflicts_with = "dir")]
    input: Option<PathBuf>,

    /// Output PDF file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Process every PDF in this directory
    #[arg(long, requires = "out_dir")]
    dir: Option<PathBuf>,

    /// Directory for batch outputs (created if missing)
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Source pages per output page
    #[arg(long, value_parser = ["4", "6"])]
    per_page: Option<String>,

    /// Output paper size
    #[arg(long, value_enum)]
    paper: Option<PaperArg>,

    /// Rasterization scale (1.0 = 72 DPI)
    #[arg(long)]
    scale: Option<f32>,

    /// Where finished pages wait before the final merge
    #[arg(long, value_enum)]
    staging: Option<StagingArg>,

    /// JSON options file; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Show statistics only, don't generate PDF
    #[arg(long)]
    stats_only: bool,

    /// Log every page
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A4,
    Letter,
}

#[derive(Clone, Copy, ValueEnum)]
enum StagingArg {
    Memory,
    TempDir,
}

impl From<PaperArg> for pdf_nup::PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A4 => Self::A4,
            PaperArg::Letter => Self::Letter,
        }
    }
}

impl From<StagingArg> for pdf_nup::Staging {
    fn from(arg: StagingArg) -> Self {
        match arg {
            StagingArg::Memory => Self::Memory,
            StagingArg::TempDir => Self::TempDir,
        }
    }
}

impl Cli {
    async fn options(&self) -> Result<pdf_nup::NupOptions> {
        let mut options = match &self.config {
            Some(path) => pdf_nup::NupOptions::load(path)
                .await
                .with_context(|| format!("Reading config {}", path.display()))?,
            None => pdf_nup::NupOptions::default(),
        };

        if let Some(per_page) = &self.per_page {
            options.mini_pages_per_page = per_page.parse()?;
        }
        if let Some(paper) = self.paper {
            options.paper_size = paper.into();
        }
        if let Some(scale) = self.scale {
            options.render_scale = scale;
        }
        if let Some(staging) = self.staging {
            options.staging = staging.into();
        }

        options.validate()?;
        Ok(options)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let options = cli.options().await?;

    if let (Some(dir), Some(out_dir)) = (&cli.dir, &cli.out_dir) {
        return run_batch(dir, out_dir, &options, cli.stats_only).await;
    }

    let Some(input) = &cli.input else {
        bail!("No input file given");
    };

    match cli.single_run()? {
        SingleRun::Statistics => print_statistics(input, &options).await,
        SingleRun::Combine(output) => combine_one(input, output, &options).await,
    }
}

/// What a single-file invocation does
#[derive(Debug, PartialEq)]
enum SingleRun<'a> {
    Statistics,
    Combine(&'a Path),
}

impl Cli {
    /// Statistics are computed without rendering; a combine reports its own counts
    fn single_run(&self) -> Result<SingleRun<'_>> {
        if self.stats_only {
            return Ok(SingleRun::Statistics);
        }
        match &self.output {
            Some(output) => Ok(SingleRun::Combine(output)),
            None => bail!("No output file given"),
        }
    }
}

async fn print_statistics(input: &Path, options: &pdf_nup::NupOptions) -> Result<()> {
    let source = pdf_nup::load_pdf(input).await?;
    let stats = pdf_nup::calculate_statistics(&source, options)?;

    println!("Combine Statistics ({}):", input.display());
    println!("  Source pages: {}", stats.source_pages);
    println!("  Output pages: {}", stats.output_pages);
    println!("  Blank pages: {}", stats.blank_pages);
    if stats.unreadable_pages > 0 {
        println!("  Unreadable pages: {}", stats.unreadable_pages);
    }
    println!("  Empty slots on last page: {}", stats.trailing_empty_slots);
    Ok(())
}

async fn combine_one(input: &Path, output: &Path, options: &pdf_nup::NupOptions) -> Result<()> {
    let report = pdf_nup::combine(input, output, options).await?;

    println!(
        "Combined {} of {} pages onto {} → {}",
        report.placed_pages,
        report.source_pages,
        report.output_pages,
        output.display()
    );
    if report.blank_pages() > 0 {
        println!("  Blank pages skipped: {}", report.blank_pages());
    }
    if report.failed_pages() > 0 {
        println!("  Pages that failed: {}", report.failed_pages());
    }
    Ok(())
}

async fn run_batch(
    dir: &Path,
    out_dir: &Path,
    options: &pdf_nup::NupOptions,
    stats_only: bool,
) -> Result<()> {
    let inputs = list_pdfs(dir)?;
    if inputs.is_empty() {
        log::warn!("No PDF files found in {}", dir.display());
        return Ok(());
    }

    if !stats_only {
        tokio::fs::create_dir_all(out_dir)
            .await
            .with_context(|| format!("Creating {}", out_dir.display()))?;
    }

    let mut failures = 0;
    for input in &inputs {
        let result = if stats_only {
            print_statistics(input, options).await
        } else {
            combine_one(input, &batch_output_path(input, out_dir), options).await
        };

        if let Err(e) = result {
            log::error!("Failed to process {}: {:#}", input.display(), e);
            failures += 1;
        }
    }

    println!(
        "Processed {} of {} files",
        inputs.len() - failures,
        inputs.len()
    );
    if failures > 0 {
        bail!("{} file(s) failed", failures);
    }
    Ok(())
}

/// PDF files directly inside `dir`, sorted by name
fn list_pdfs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();
    for entry in std::fs::read_dir(dir).with_context(|| format!("Reading {}", dir.display()))? {
        let path = entry?.path();
        let is_pdf = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if is_pdf && path.is_file() {
            inputs.push(path);
        }
    }
    inputs.sort();
    Ok(inputs)
}

fn batch_output_path(input: &Path, out_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    out_dir.join(format!("{}{}.pdf", stem, OUTPUT_SUFFIX))
}
