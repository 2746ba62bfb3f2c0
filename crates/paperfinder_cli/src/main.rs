//! Static site exporter entry point.
//!
//! # Responsibility
//! - Rebuild `<app_dir>/build` from the catalogs and the static asset tree.
//! - Take no runtime arguments; paths come from `AppConfig`.
//!
//! # Invariants
//! - Any failure aborts the run with a non-zero exit code.

use chrono::{Datelike, Local};
use log::error;
use paperfinder_core::{init_logging, AppConfig, ExportConfig, JsonCatalogRepository, SiteExporter};
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("paperfinder_export: {err}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = init_logging("paperfinder_export", &config.log_level, &config.log_dir) {
        eprintln!("paperfinder_export file logging disabled: {err}");
    }

    let today = Local::now().date_naive();
    let export = ExportConfig {
        static_dir: config.static_dir(),
        asset_root: config.asset_root(),
        build_dir: config.build_dir(),
        start_year: config.export_start_year,
        end_year: today.year() + 1,
        today,
    };
    let exporter: SiteExporter<JsonCatalogRepository> =
        SiteExporter::new(config.catalog_repository(), export);

    println!("Starting static site build process...");
    println!(
        "Scanning years {}-{} into {}",
        exporter.config().start_year,
        exporter.config().end_year,
        exporter.config().build_dir.display()
    );
    match exporter.run() {
        Ok(report) => {
            println!("  -> {} has been generated.", report.index_path.display());
            println!("  -> {} has been generated.", report.topical_path.display());
            println!(
                "  -> {} subjects, {} linked papers, {} static files copied.",
                report.subjects, report.papers_linked, report.files_copied
            );
            println!("\nBUILD COMPLETE!");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("event=export_cli module=cli status=error error={}", err);
            eprintln!("BUILD FAILED: {err}");
            ExitCode::FAILURE
        }
    }
}
