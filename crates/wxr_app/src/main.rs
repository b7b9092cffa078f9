//! `wxr-import`: converts `artifacts/wordpress-export.xml` into one HTML file
//! per published post under `artifacts/posts/`.
mod logging;

use std::process::ExitCode;

use anyhow::Context;
use wxr_engine::{run_import, ImportConfig, ImportSummary};
use wxr_logging::{wxr_error, wxr_info};

fn main() -> ExitCode {
    logging::initialize();
    match run() {
        Ok(summary) => {
            println!(
                "Wrote {} post HTML files to {}",
                summary.written,
                summary.output_dir.display()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            wxr_error!("Import aborted");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<ImportSummary> {
    let base = std::env::current_dir().context("could not determine the working directory")?;
    let config = ImportConfig::default_with_base(&base);
    wxr_info!(
        "Importing {} into {}",
        config.input_path.display(),
        config.output_dir.display()
    );
    run_import(&config).context("import failed")
}
