mod dataset;
mod registry;
mod settings;

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use cleanroom::{CleanerError, DataCleaner, Profile, QualityConfig, ReportFormat};
use cleanroom_report::{ReportError, to_json_string};
use dataset::{DatasetError, load_fix_list, read_table_csv, write_table_csv};
use registry::{RunContext, RunPaths, init_run_logging, start_run, write_artifact};
use serde::Serialize;
use settings::{SettingsError, load_config};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
enum CliError {
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
    #[error("registry error: {0}")]
    Registry(#[from] registry::RegistryError),
    #[error("dataset error: {0}")]
    Dataset(#[from] DatasetError),
    #[error("quality error: {0}")]
    Cleaner(#[from] CleanerError),
    #[error("report error: {0}")]
    Report(#[from] ReportError),
}

#[derive(Parser, Debug)]
#[command(
    name = "cleanroom",
    version,
    about = "Tabular data quality checks and deterministic fixes"
)]
struct Cli {
    /// Quality configuration file (TOML).
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Output directory for runs.
    #[arg(long, global = true, default_value = "runs")]
    run_dir: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the dataset profile.
    Profile(ProfileArgs),
    /// Print the quality issues.
    Check(InputArgs),
    /// Print the quality score with its penalty breakdown.
    Score(InputArgs),
    /// Print fix suggestions.
    Suggest(SuggestArgs),
    /// Write the full quality report.
    Report(ReportArgs),
    /// Apply a fix list and write the cleaned CSV.
    Apply(ApplyArgs),
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Profile(_) => "profile",
            Command::Check(_) => "check",
            Command::Score(_) => "score",
            Command::Suggest(_) => "suggest",
            Command::Report(_) => "report",
            Command::Apply(_) => "apply",
        }
    }

    fn input(&self) -> &Path {
        match self {
            Command::Profile(args) => &args.input.input,
            Command::Check(args) | Command::Score(args) => &args.input,
            Command::Suggest(args) => &args.input.input,
            Command::Report(args) => &args.input.input,
            Command::Apply(args) => &args.input.input,
        }
    }
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Input CSV file with a header row.
    #[arg(value_name = "CSV")]
    input: PathBuf,
}

#[derive(Args, Debug)]
struct ProfileArgs {
    #[command(flatten)]
    input: InputArgs,
    /// Rows used for the duplicate count before sampling (defaults to config).
    #[arg(long)]
    max_sample_size: Option<usize>,
}

#[derive(Args, Debug)]
struct SuggestArgs {
    #[command(flatten)]
    input: InputArgs,
    /// Only print suggestions at or above this confidence.
    #[arg(long, default_value_t = 0.0)]
    min_confidence: f64,
}

#[derive(Args, Debug)]
struct ReportArgs {
    #[command(flatten)]
    input: InputArgs,
    /// Report format: json or markdown.
    #[arg(long, default_value = "json")]
    format: String,
    /// Optional output path for the report.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ApplyArgs {
    #[command(flatten)]
    input: InputArgs,
    /// JSON fix list (`[{"operation": ..., "column": ...}]`).
    #[arg(long, value_name = "FILE")]
    fixes: PathBuf,
    /// Output path for the cleaned CSV.
    #[arg(long, value_name = "CSV")]
    out: PathBuf,
}

#[derive(Debug, Serialize)]
struct ApplySummary {
    fixes: usize,
    rows_before: usize,
    rows_after: usize,
    columns_before: usize,
    columns_after: usize,
    out: String,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    let run_id = Uuid::new_v4().to_string();
    let run_ctx = RunContext {
        run_id: run_id.clone(),
        started_at: chrono::Utc::now(),
        command: cli.command.name().to_string(),
        input: cli.command.input().to_path_buf(),
        run_dir: cli.run_dir,
        config: config.clone(),
    };

    let run_paths = start_run(&run_ctx)?;
    init_run_logging(&run_paths.logs_path)?;

    tracing::info!(
        event = "run_started",
        run_id = %run_id,
        command = %run_ctx.command,
        input = %run_ctx.input.display(),
        config_path = %run_paths.config_path.display()
    );

    let timer = Instant::now();
    match run_command(cli.command, config, &run_paths) {
        Ok(output) => {
            println!("{output}");
            let duration_ms = timer.elapsed().as_millis();
            tracing::info!(event = "run_finished", status = "success", duration_ms = duration_ms);
            Ok(())
        }
        Err(err) => {
            tracing::error!(event = "run_finished", status = "failed", error = %err);
            Err(err)
        }
    }
}

fn run_command(
    command: Command,
    config: QualityConfig,
    paths: &RunPaths,
) -> Result<String, CliError> {
    let table = read_table_csv(command.input())?;
    let mut cleaner = DataCleaner::with_config(table, config)?;
    let default_sample_size = cleaner.config().max_sample_size;

    match command {
        Command::Profile(args) => {
            let max_sample_size = args.max_sample_size.unwrap_or(default_sample_size);
            let profile = computed_profile(&mut cleaner, max_sample_size)?;
            emit_json(paths, "profile.json", &profile)
        }
        Command::Check(_) => {
            computed_profile(&mut cleaner, default_sample_size)?;
            let issues = cleaner.check_quality()?;
            tracing::info!(event = "issues_found", issues = issues.len());
            emit_json(paths, "issues.json", &issues)
        }
        Command::Score(_) => {
            computed_profile(&mut cleaner, default_sample_size)?;
            let score = cleaner.quality_score()?;
            tracing::info!(event = "score_computed", score = score.score);
            emit_json(paths, "score.json", &score)
        }
        Command::Suggest(args) => {
            computed_profile(&mut cleaner, default_sample_size)?;
            let suggestions = cleaner.suggest_fixes(args.min_confidence)?;
            tracing::info!(event = "suggestions_generated", suggestions = suggestions.len());
            emit_json(paths, "suggestions.json", &suggestions)
        }
        Command::Report(args) => {
            let format = args.format.parse::<ReportFormat>()?;
            computed_profile(&mut cleaner, default_sample_size)?;
            let rendered = cleaner.export_report(format, args.out.as_deref())?;
            let artifact = write_artifact(
                paths,
                &format!("report.{}", format.extension()),
                &rendered,
            )?;
            tracing::info!(
                event = "report_written",
                format = %format,
                path = %artifact.display()
            );
            Ok(rendered)
        }
        Command::Apply(args) => {
            let fixes = load_fix_list(&args.fixes)?;
            let cleaned = cleaner.apply_fixes(&fixes)?;
            write_table_csv(&args.out, cleaned.table())?;
            write_artifact(
                paths,
                "applied_fixes.json",
                &to_json_string(&fixes)?,
            )?;
            tracing::info!(
                event = "fixes_applied",
                fixes = fixes.len(),
                rows = cleaned.table().row_count(),
                out = %args.out.display()
            );

            let summary = ApplySummary {
                fixes: fixes.len(),
                rows_before: cleaner.table().row_count(),
                rows_after: cleaned.table().row_count(),
                columns_before: cleaner.table().column_count(),
                columns_after: cleaned.table().column_count(),
                out: args.out.display().to_string(),
            };
            emit_json(paths, "apply_summary.json", &summary)
        }
    }
}

/// Profile the table into the cleaner's cache and log its headline numbers.
fn computed_profile(
    cleaner: &mut DataCleaner,
    max_sample_size: usize,
) -> Result<Profile, CliError> {
    let profile = cleaner.profile(max_sample_size)?.clone();
    tracing::info!(
        event = "profile_computed",
        rows = profile.dataset.rows,
        cols = profile.dataset.cols,
        sampled = profile.dataset.sampled,
        duplicates = profile.duplicates
    );
    Ok(profile)
}

fn emit_json<T: Serialize>(paths: &RunPaths, name: &str, value: &T) -> Result<String, CliError> {
    let json = to_json_string(value)?;
    write_artifact(paths, name, &json)?;
    Ok(json)
}
