//! Application orchestrator.
//! Loads/merges config, initializes logging, installs the Ctrl-C handler,
//! resolves the movie set folder and record source, asks about overwriting,
//! and runs the export.

use anyhow::Result;
use std::io::BufRead;
use tracing::{debug, error, info};

use export_set::cli::Args;
use export_set::config::{
    LoadResult, ROOT_ENV, RootCandidate, load_or_init, prepare_root, resolve_root,
};
use export_set::output as out;
use export_set::{
    CancelToken, Config, ExportOptions, ExportSetError, default_config_path, export_sets,
    load_records,
};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Handle --print-config before logging init
    if args.print_config {
        match default_config_path() {
            Ok(p) => {
                out::print_info(&format!("export_set config path:\n  {}\n", p.display()));
                if p.exists() {
                    out::print_info("A config file exists at that location.");
                } else {
                    out::print_info("No config file exists there yet. Run without --print-config to create a template.");
                }
            }
            Err(e) => out::print_error(&format!("Could not determine a config path: {e}")),
        }
        return Ok(());
    }

    // Config file first (before logging init), then CLI overrides.
    let mut cfg = match load_or_init() {
        Ok(LoadResult::Loaded(_, cfg)) => cfg,
        Ok(LoadResult::NotFound(path)) => {
            out::print_warn(&format!("Config file {} not found; using defaults.", path.display()));
            Config::default()
        }
        Ok(LoadResult::CreatedTemplate(path)) => {
            out::print_info(&format!(
                "A template export_set config was written to: {} (edit `sets_folder` to avoid passing --sets-folder)",
                path.display()
            ));
            Config::default()
        }
        Err(e) => {
            out::print_error(&format!("Failed to load config: {e:#}"));
            return Err(e);
        }
    };
    args.apply_overrides(&mut cfg);

    // Initialize logging; the guard flushes the file writer when dropped
    let guard = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {}", e));
        e
    })?;

    let cancel = CancelToken::new();
    {
        let cancel = cancel.clone();
        if let Err(e) = ctrlc::set_handler(move || {
            cancel.cancel();
            out::print_warn("Received interrupt; stopping after the current set...");
        }) {
            debug!(error = %e, "Could not install Ctrl-C handler");
        }
    }

    debug!("Starting export_set: {:?}", args);

    let result = export(&args, &cfg, &cancel);
    if let Err(e) = &result {
        report_fatal(e);
    }

    // Ensure logs are flushed before exit
    drop(guard);

    result
}

fn export(args: &Args, cfg: &Config, cancel: &CancelToken) -> Result<()> {
    let policy = cfg.sanitize_policy()?;

    let root = resolve_root(&[
        RootCandidate::new("--sets-folder", args.sets_folder.clone()),
        RootCandidate::new(ROOT_ENV, std::env::var(ROOT_ENV).ok()),
        RootCandidate::new("config sets_folder", cfg.sets_folder.clone()),
    ])?;
    let local_root = root.require_local()?;

    let source = args.record_source(cfg);
    let records = load_records(source.as_ref())?;

    let overwrite = match cfg.overwrite {
        Some(choice) => choice,
        None => ask_overwrite(cfg.descriptor_name.file_name()),
    };

    let root_dir = prepare_root(local_root, cfg.dry_run)?;
    info!(
        root = %root_dir.display(),
        sets = records.len(),
        overwrite,
        dry_run = cfg.dry_run,
        "Exporting movie sets"
    );

    let options = ExportOptions {
        overwrite,
        dry_run: cfg.dry_run,
        descriptor_name: cfg.descriptor_name,
        policy,
    };
    let report = export_sets(records, &root_dir, &options, cancel);

    if !report.is_complete() {
        return Err(ExportSetError::Interrupted.into());
    }

    let summary = format!(
        "{} written, {} skipped, {} failed under {}",
        report.written(),
        report.skipped(),
        report.failed(),
        root_dir.display()
    );
    if report.failed() > 0 {
        out::print_warn(&format!("Export finished with errors: {summary} (see log for details)"));
    } else if cfg.dry_run {
        out::print_success(&format!("Dry-run complete: {summary}"));
    } else {
        out::print_success(&format!("Movie set export complete: {summary}"));
    }
    Ok(())
}

/// Single yes/no question before the batch. Non-interactive runs never overwrite.
fn ask_overwrite(file_name: &str) -> bool {
    if !atty::is(atty::Stream::Stdin) {
        info!("stdin is not a terminal; existing {file_name} files will be kept");
        return false;
    }
    out::print_prompt(&format!("Replace existing {file_name} files? [y/N]"));
    let mut line = String::new();
    match std::io::stdin().lock().read_line(&mut line) {
        Ok(_) => matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        Err(e) => {
            debug!(error = %e, "Could not read answer; keeping existing files");
            false
        }
    }
}

fn report_fatal(e: &anyhow::Error) {
    if let Some(es) = e.downcast_ref::<ExportSetError>() {
        let code = es.code();
        match es {
            ExportSetError::ConfigurationMissing { tried } => {
                error!(code, kind = "configuration_missing", tried = ?tried, "No movie set folder configured")
            }
            ExportSetError::ConfigurationMalformed { details } => {
                error!(code, kind = "configuration_malformed", details = ?details, "Invalid movie set folder setting")
            }
            ExportSetError::UnsupportedRemoteRoot { root } => {
                error!(code, kind = "unsupported_remote_root", %root, "Network share roots are not supported")
            }
            ExportSetError::SourceUnavailable => {
                error!(code, kind = "source_unavailable", "No record source configured")
            }
            ExportSetError::MalformedSource { origin, detail } => {
                error!(code, kind = "malformed_source", %origin, %detail, "Record source is malformed")
            }
            ExportSetError::Interrupted => {
                error!(code, kind = "interrupted", "Export aborted by user")
            }
            _ => error!(code, kind = "export_error", error = ?es, "Export failed"),
        }
    } else {
        error!(error = ?e, "Export failed");
    }
    out::print_warn(&format!("Movie set export failed: {e:#}"));
}
