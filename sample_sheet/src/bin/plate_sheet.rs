//! plate_sheet
#![deny(missing_docs)]

use anyhow::{ensure, Context, Result};
use chrono::Local;
use clap::{self, Parser, Subcommand};
use env_logger::Builder;
use itertools::Itertools;
use log::{info, LevelFilter};
use plate_map::{parse_selection, SeqType};
use sample_sheet::{check_sheet, Parameters, SampleSheet};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Inspect and rewrite plate-indexed sample sheets
#[derive(Parser, Debug)]
#[clap(name = "plate_sheet")]
struct PlateSheet {
    #[clap(subcommand)]
    subcmd: SubCommand,

    /// Parameters file with sample defaults and limits
    #[clap(long, value_name = "TOML", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum SubCommand {
    /// Print the wells each sample selects, plate by plate.
    #[clap(name = "show")]
    Show(Show),

    /// Report malformed selections, shared rt wells and plate overflow.
    #[clap(name = "check")]
    Check(SheetArg),

    /// Rewrite a sheet with rows of the same sample merged.
    #[clap(name = "normalize")]
    Normalize(Rewrite),

    /// Drop the highest rt plate from every sample.
    #[clap(name = "remove-last-plate")]
    RemoveLastPlate(Rewrite),

    /// Write a sheet of placeholder samples.
    #[clap(name = "new")]
    New(New),
}

#[derive(Parser, Debug)]
struct SheetArg {
    /// Tab-separated sample sheet
    #[clap(value_name = "SHEET")]
    sheet: PathBuf,
}

#[derive(Parser, Debug)]
struct Show {
    #[clap(flatten)]
    input: SheetArg,

    /// Selection kind to draw
    #[clap(long, default_value = "rt", value_name = "p5|p7|rt")]
    kind: SeqType,

    /// Only draw this plate, numbered from 1
    #[clap(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..=99))]
    plate: Option<u64>,

    /// Print the parsed sheet as json instead
    #[clap(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct Rewrite {
    #[clap(flatten)]
    input: SheetArg,

    /// Where to write the result, stdout when absent
    #[clap(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct New {
    /// Number of samples
    #[clap(long, default_value_t = 1)]
    samples: usize,

    /// Where to write the sheet, stdout when absent
    #[clap(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
}

fn setup_logging() {
    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%dT%H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter(None, LevelFilter::Info)
        .parse_default_env()
        .init();
}

fn write_sheet(sheet: &SampleSheet, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            sheet.write(path)?;
            info!("wrote {} samples to {}", sheet.samples.len(), path.display());
        }
        None => println!("{}", sheet.to_tsv()),
    }
    Ok(())
}

/// Zero-based plates to draw for `kind`, all of them unless one is asked for.
fn plates_to_show(sheet: &SampleSheet, kind: SeqType, plate: Option<u64>) -> Result<Vec<usize>> {
    let available = sheet.plates(kind);
    match plate {
        Some(plate) => {
            let plate = plate as usize;
            ensure!(
                (1..=available).contains(&plate),
                "{kind} selections are on {available} plate(s), there is no plate {plate}"
            );
            Ok(vec![plate - 1])
        }
        None => Ok((0..available).collect()),
    }
}

fn show(args: &Show, sheet: &SampleSheet) -> Result<()> {
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(sheet).context("serializing sample sheet")?
        );
        return Ok(());
    }
    let plates = plates_to_show(sheet, args.kind, args.plate)?;
    for sample in &sheet.samples {
        match sample.cells_per_well() {
            Some(cells) => println!("{} ({cells} cells per rt well)", sample.sample_name),
            None => println!("{}", sample.sample_name),
        }
        for &plate in &plates {
            let grid = parse_selection(sample.selection(args.kind), args.kind, plate);
            println!("{} plate {}", args.kind, plate + 1);
            println!("{grid}\n");
        }
    }
    Ok(())
}

fn inner_main() -> Result<ExitCode> {
    let opts = PlateSheet::parse();
    setup_logging();
    let params = Parameters::load(opts.config.as_deref())?;

    match opts.subcmd {
        SubCommand::Show(args) => {
            let sheet = SampleSheet::read(&args.input.sheet)?;
            show(&args, &sheet)?;
        }
        SubCommand::Check(args) => {
            let sheet = SampleSheet::read(&args.sheet)?;
            let problems = check_sheet(&sheet, params.max_plates);
            for problem in &problems {
                println!("{problem}");
            }
            if !problems.is_empty() {
                return Ok(ExitCode::FAILURE);
            }
            info!(
                "{}: {} samples on {} rt plates, no problems found",
                args.sheet.display(),
                sheet.samples.len(),
                sheet.num_plates
            );
        }
        SubCommand::Normalize(args) => {
            let sheet = SampleSheet::read(&args.input.sheet)?;
            write_sheet(&sheet, args.output.as_deref())?;
        }
        SubCommand::RemoveLastPlate(args) => {
            let mut sheet = SampleSheet::read(&args.input.sheet)?;
            sheet.remove_last_plate();
            write_sheet(&sheet, args.output.as_deref())?;
        }
        SubCommand::New(args) => {
            let sheet = SampleSheet {
                experiment: params.new_experiment(),
                samples: (0..args.samples).map(|i| params.new_sample(i)).collect(),
                num_plates: 1,
            };
            write_sheet(&sheet, args.output.as_deref())?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    match inner_main() {
        Ok(exit_code) => exit_code,
        Err(err) => {
            eprintln!("ERROR: {}", err.chain().join("\n\tCaused by: "));
            ExitCode::FAILURE
        }
    }
}
