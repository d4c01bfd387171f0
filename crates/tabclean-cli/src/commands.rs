use anyhow::{Context, Result};
use tracing::info_span;

use tabclean_cli::demo::generate_messy_table;
use tabclean_cli::pipeline::{
    CleanRun, OutputConfig, clean, default_output_path, ingest, write_outputs,
};
use tabclean_output::write_csv_file;

use crate::cli::{CleanArgs, DemoArgs};

pub fn run_clean(args: &CleanArgs) -> Result<CleanRun> {
    let span = info_span!("clean_command", input = %args.input.display());
    let _guard = span.enter();

    let raw = ingest(&args.input, &args.ingest_options())?;
    let run = clean(raw, &args.pipeline.clean_options())?;

    let output = OutputConfig {
        csv: Some(
            args.output
                .clone()
                .unwrap_or_else(|| default_output_path(&args.input)),
        ),
        report: args.report.clone(),
        source: Some(args.input.display().to_string()),
    };
    write_outputs(&run, &output)?;
    Ok(run)
}

pub fn run_demo(args: &DemoArgs) -> Result<CleanRun> {
    let config = args.demo_config();
    let span = info_span!("demo_command", seed = config.seed, rows = config.rows);
    let _guard = span.enter();

    let raw = generate_messy_table(&config).context("generate demo table")?;
    if let Some(path) = &args.raw_output {
        write_csv_file(&raw, path).with_context(|| format!("write {}", path.display()))?;
    }
    let run = clean(raw, &args.pipeline.clean_options())?;

    let output = OutputConfig {
        csv: args.output.clone(),
        report: args.report.clone(),
        source: Some(format!("demo (seed {})", config.seed)),
    };
    write_outputs(&run, &output)?;
    Ok(run)
}
