pub mod cli;
pub mod error;
pub mod export;
pub mod loader;
pub mod report;
pub mod tee;

use std::fs::File;
use std::path::{Path, PathBuf};

use clap::Parser;

use cli::{Cli, OutputFormat};
use error::CptError;

fn main() {
    let args = cli::normalize_args(std::env::args());
    let cli = Cli::parse_from(args);

    init_logging(&cli);

    std::process::exit(run(&cli));
}

/// Initializes the `log`/`env_logger` pipeline. When `-log <path>` is given,
/// log records are teed into that file in addition to stderr.
fn init_logging(cli: &Cli) {
    let env = env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info");
    let Some(log_path) = &cli.log else {
        env_logger::Builder::from_env(env).init();
        return;
    };

    match File::create(log_path) {
        Ok(file) => {
            let target = Box::new(tee::Tee::new(std::io::stderr(), file));
            env_logger::Builder::from_env(env)
                .target(env_logger::Target::Pipe(target))
                .init();
        }
        Err(e) => {
            env_logger::Builder::from_env(env).init();
            log::warn!("could not open log file {}: {e}", log_path.display());
        }
    }
}

fn run(cli: &Cli) -> i32 {
    match (&cli.file, &cli.dir) {
        (Some(file), None) => run_single(cli, file),
        (None, Some(dir)) => run_batch(cli, dir),
        (Some(_), Some(_)) => {
            eprintln!("error: --file and --dir are mutually exclusive");
            1
        }
        (None, None) => {
            eprintln!("error: one of --file or --dir is required");
            1
        }
    }
}

fn run_single(cli: &Cli, file: &Path) -> i32 {
    let sut = match loader::load_sut(file) {
        Ok(sut) => sut,
        Err(e) => {
            eprintln!("{}", e.message());
            return e.exit_code();
        }
    };

    let file_label = file.display().to_string();
    let reports = report::run_all(&sut);
    emit_graph_exports(cli, &sut, &file_label);
    emit_report(cli, &file_label, &reports);

    if let Some(csv_path) = &cli.csv {
        if let Err(e) = write_csv(csv_path, &[(&file_label, reports)]) {
            eprintln!("error: failed to write CSV to {}: {e}", csv_path.display());
            return 1;
        }
    }

    0
}

fn run_batch(cli: &Cli, dir: &Path) -> i32 {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            let err = CptError::FileLoad {
                path: dir.to_path_buf(),
                detail: e.to_string(),
            };
            eprintln!("{}", err.message());
            return err.exit_code();
        }
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    files.sort();

    let mut batch: Vec<(String, Vec<report::AlgoReport>)> = Vec::new();

    for file in &files {
        match loader::load_sut(file) {
            Ok(sut) => {
                let file_label = file.display().to_string();
                log::info!("processed {file_label}");
                let reports = report::run_all(&sut);
                emit_graph_exports(cli, &sut, &file_label);
                emit_report(cli, &file_label, &reports);
                batch.push((file_label, reports));
            }
            Err(e) => {
                log::error!("{}", e.message());
            }
        }
    }

    if let Some(csv_path) = &cli.csv {
        let refs: Vec<(&str, &[report::AlgoReport])> =
            batch.iter().map(|(label, reports)| (label.as_str(), reports.as_slice())).collect();
        if let Err(e) = write_csv_refs(csv_path, &refs) {
            eprintln!("error: failed to write CSV to {}: {e}", csv_path.display());
            return 1;
        }
    }

    if batch.is_empty() {
        1
    } else {
        0
    }
}

fn emit_graph_exports(cli: &Cli, sut: &cpt_core::Sut, file_label: &str) {
    if let Some(dot_path) = &cli.to_dot {
        if let Err(e) = export::write_dot(sut, dot_path) {
            log::warn!("could not write DOT export for {file_label} to {}: {e}", dot_path.display());
        } else if let Some(png_path) = &cli.to_png {
            export::render_png(dot_path, png_path);
        }
    } else if cli.to_png.is_some() {
        log::warn!("-to-png requires -to-dot to produce the intermediate DOT file; skipping PNG export for {file_label}");
    }
}

fn emit_report(cli: &Cli, file_label: &str, reports: &[report::AlgoReport]) {
    match cli.format {
        OutputFormat::Human => report::print_human(file_label, reports, cli.show_path),
        OutputFormat::Json => {
            let value = report::to_json(file_label, reports, cli.show_path);
            println!("{value}");
        }
    }
}

fn write_csv(path: &Path, files: &[(&str, Vec<report::AlgoReport>)]) -> csv::Result<()> {
    let refs: Vec<(&str, &[report::AlgoReport])> =
        files.iter().map(|(label, reports)| (*label, reports.as_slice())).collect();
    write_csv_refs(path, &refs)
}

fn write_csv_refs(path: &Path, files: &[(&str, &[report::AlgoReport])]) -> csv::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(report::CSV_HEADER)?;
    for (label, reports) in files {
        for row in report::csv_rows(label, reports) {
            writer.write_record(&row)?;
        }
    }
    writer.flush()?;
    Ok(())
}
