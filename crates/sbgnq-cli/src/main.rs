//! # sbgnq CLI
//!
//! Compiles a CellDesigner/SBGN-PD diagram into a Boolean logical model.
//!
//! ## Quick Start
//!
//! ```bash
//! # Compile to SBML-Qual (default)
//! sbgnq model.xml model.sbml
//!
//! # Also emit CSV + BNet sidecars and a SIF file
//! sbgnq model.xml model.sbml -c -s
//!
//! # Keep only the upstream cone of Apoptosis, swap names/ids, pin some species
//! sbgnq model.xml model.sbml -u Apoptosis -n -f overrides.csv
//!
//! # Interactive mode (recommended for a first pass over an unfamiliar map)
//! sbgnq
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use console::{style, Emoji};
use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use indicatif::{ProgressBar, ProgressStyle};
use log::LevelFilter;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Duration;

use sbgnq_compile::{compile, CompileOptions, NamerOptions, PruneParams};
use sbgnq_io::{write_bma, write_bnet, write_csv, write_sbml_qual, write_sif, BmaWriterConfig};

static SPARKLE: Emoji<'_, '_> = Emoji("✨ ", "");
static CHECK: Emoji<'_, '_> = Emoji("✅ ", "[OK] ");
static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "[WARN] ");
static DNA: Emoji<'_, '_> = Emoji("🧬 ", "");

/// Compile a CellDesigner/SBGN-PD diagram into a Boolean logical model.
#[derive(Parser)]
#[command(name = "sbgnq")]
#[command(author = "Yatrogenesis")]
#[command(version = "0.1.0")]
#[command(about = "Compile SBGN-PD diagrams into Boolean logical models", after_help = AFTER_HELP)]
struct Cli {
    /// CellDesigner/SBGN-ML input file
    infile: Option<PathBuf>,

    /// SBML-Qual output file (default writer unless -b is given)
    outfile: Option<PathBuf>,

    /// Enable debug-level logging
    #[arg(short = 'D', long)]
    debug: bool,

    /// Also write a CSV + BNet sidecar next to the output file
    #[arg(short, long)]
    csv: bool,

    /// Also write a SIF sidecar next to the output file
    #[arg(short, long)]
    sif: bool,

    /// Weakly-connected-component size threshold (0 disables, negative keeps the |S| largest)
    #[arg(short, long, default_value_t = 0)]
    remove: i64,

    /// Path to a two-column `name,value` fixed-overrides CSV
    #[arg(short, long)]
    fixed: Option<PathBuf>,

    /// Swap which field feeds the export id vs. the display name
    #[arg(short, long)]
    names: bool,

    /// Keep only the upstream influence cone of these species (repeatable)
    #[arg(short, long)]
    upstream: Vec<String>,

    /// Keep only the downstream influence cone of these species (repeatable)
    #[arg(short, long)]
    downstream: Vec<String>,

    /// Write BMA-JSON instead of SBML-Qual
    #[arg(short, long)]
    bma: bool,

    /// BMA writer: number of discrete levels a variable ranges over
    #[arg(short, long, default_value_t = 2)]
    granularity: u32,

    /// BMA writer: default range value assigned to a free input
    #[arg(short, long, default_value_t = 0)]
    input: u32,

    /// BMA writer: emit a constant per-variable colour instead of a derived one
    #[arg(short = 'C', long)]
    colour_constant: bool,
}

const AFTER_HELP: &str = r#"
EXAMPLES:
    sbgnq                                Interactive mode
    sbgnq model.xml out.sbml             Compile to SBML-Qual
    sbgnq model.xml out.sbml -c -s       Also emit CSV/BNet and SIF sidecars
    sbgnq model.xml out.json -b -g 3     Compile to BMA-JSON with 3 levels
    sbgnq model.xml out.sbml -u Apoptosis  Keep only the upstream cone of Apoptosis
"#;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(if cli.debug { LevelFilter::Debug } else { LevelFilter::Info });
    builder.init();

    match (&cli.infile, &cli.outfile) {
        (Some(infile), Some(outfile)) => run_compile(&cli, infile, outfile),
        (None, None) => run_interactive(),
        _ => anyhow::bail!("both infile and outfile must be given, or neither (for interactive mode)"),
    }
}

fn run_compile(cli: &Cli, infile: &PathBuf, outfile: &PathBuf) -> Result<()> {
    println!("{}Compiling {}", DNA, style(infile.display()).cyan());

    let pb = spinner("Reading diagram...");
    let mut model = read_input(infile)?;
    pb.finish_with_message("Diagram read");

    let overrides = match &cli.fixed {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening overrides file {}", path.display()))?;
            sbgnq_io::read_overrides(file)?
        }
        None => Vec::new(),
    };

    let options = CompileOptions {
        prune: PruneParams {
            component_threshold: cli.remove,
            upstream: cli.upstream.clone(),
            downstream: cli.downstream.clone(),
        },
        namer: NamerOptions { prefer_biological_name_as_id: cli.names },
        overrides,
    };

    let pb = spinner("Running compile pipeline...");
    let output = compile(&mut model, &options);
    pb.finish_with_message("Pipeline complete");

    if output.warnings.is_empty() {
        println!("{}No warnings", CHECK);
    } else {
        println!("{}{} warnings emitted", WARN, output.warnings.len());
        if cli.debug {
            for w in &output.warnings {
                println!("  {w:?}");
            }
        }
    }

    write_primary_output(cli, &model, outfile)?;

    if cli.csv {
        write_sidecar(&model, outfile, "csv", write_csv)?;
        write_sidecar(&model, outfile, "bnet", write_bnet)?;
    }
    if cli.sif {
        let path = sidecar_path(outfile, "sif");
        let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
        write_sif(&model, &output.influences, BufWriter::new(file))?;
        println!("{}Wrote {}", CHECK, style(path.display()).cyan());
    }

    println!("{}Done", SPARKLE);
    Ok(())
}

fn write_primary_output(cli: &Cli, model: &sbgnq_core::Model, outfile: &PathBuf) -> Result<()> {
    let file = File::create(outfile).with_context(|| format!("creating {}", outfile.display()))?;
    let out = BufWriter::new(file);
    if cli.bma {
        let config = BmaWriterConfig {
            granularity: cli.granularity,
            default_input: cli.input,
            colour_constant: cli.colour_constant,
        };
        write_bma(model, &config, out)?;
    } else {
        write_sbml_qual(model, out)?;
    }
    println!("{}Wrote {}", CHECK, style(outfile.display()).cyan());
    Ok(())
}

fn write_sidecar(
    model: &sbgnq_core::Model,
    outfile: &PathBuf,
    ext: &str,
    writer: impl FnOnce(&sbgnq_core::Model, BufWriter<File>) -> sbgnq_io::Result<()>,
) -> Result<()> {
    let path = sidecar_path(outfile, ext);
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    writer(model, BufWriter::new(file))?;
    println!("{}Wrote {}", CHECK, style(path.display()).cyan());
    Ok(())
}

fn sidecar_path(outfile: &PathBuf, ext: &str) -> PathBuf {
    outfile.with_extension(ext)
}

fn read_input(infile: &PathBuf) -> Result<sbgnq_core::Model> {
    let file = File::open(infile).with_context(|| format!("opening {}", infile.display()))?;
    let model = sbgnq_io::read_reader(std::io::BufReader::new(file))?;
    Ok(model)
}

fn run_interactive() -> Result<()> {
    println!();
    println!("{}", style("══════════════════════════════════════════════════").cyan());
    println!("{}", style("    sbgnq — SBGN-PD to Boolean logical model       ").cyan());
    println!("{}", style("══════════════════════════════════════════════════").cyan());
    println!();

    let theme = ColorfulTheme::default();

    let infile: String = Input::with_theme(&theme).with_prompt("Input diagram file").interact_text()?;
    let outfile: String = Input::with_theme(&theme).with_prompt("Output file").interact_text()?;

    let bma = Confirm::with_theme(&theme).with_prompt("Write BMA-JSON instead of SBML-Qual?").default(false).interact()?;
    let csv = Confirm::with_theme(&theme).with_prompt("Also write CSV/BNet sidecars?").default(false).interact()?;
    let sif = Confirm::with_theme(&theme).with_prompt("Also write a SIF sidecar?").default(false).interact()?;
    let names = Confirm::with_theme(&theme).with_prompt("Swap name/id roles (--names)?").default(false).interact()?;

    let cli = Cli {
        infile: Some(PathBuf::from(infile.clone())),
        outfile: Some(PathBuf::from(outfile.clone())),
        debug: false,
        csv,
        sif,
        remove: 0,
        fixed: None,
        names,
        upstream: Vec::new(),
        downstream: Vec::new(),
        bma,
        granularity: 2,
        input: 0,
        colour_constant: false,
    };

    run_compile(&cli, &PathBuf::from(infile), &PathBuf::from(outfile))
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}").unwrap());
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}
