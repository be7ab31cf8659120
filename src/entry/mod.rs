use std::ffi::OsString;
use std::io::IsTerminal;

use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::app::{build_api, run_headless, run_interactive};
use crate::args::ReplayArgs;
use crate::config::{apply_config, default_config_path, load_config};
use crate::error::{AppError, AppResult, ValidationError};
use crate::logger::init_logging;
use crate::shutdown::{setup_signal_shutdown_handler, shutdown_channel};


/// Parses the command line, merges the config file and runs the replay.
///
/// # Errors
///
/// Returns an error when arguments or config are invalid, the log cannot be
/// loaded in headless mode, or a requested export fails.
pub fn run() -> AppResult<()> {
    let raw_args: Vec<OsString> = std::env::args_os().collect();
    let args = match prepare_args(raw_args) {
        Ok(Some(args)) => args,
        Ok(None) => return Ok(()),
        Err(AppError::Clap { source }) => source.exit(),
        Err(err) => return Err(err),
    };

    let interactive = !args.no_ui && std::io::stdout().is_terminal();
    init_logging(args.verbose, args.no_color, interactive);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(&args, interactive))
}

/// Resolves the final arguments, or `None` when only help was printed.
///
/// Clap errors, including `--help` and `--version`, are returned unprinted.
pub(crate) fn prepare_args(raw_args: Vec<OsString>) -> AppResult<Option<ReplayArgs>> {
    let mut cmd = ReplayArgs::command();

    if should_show_help(&raw_args) {
        cmd.print_help()?;
        println!();
        return Ok(None);
    }

    let matches = cmd.try_get_matches_from(raw_args)?;
    let args = resolve_args(&matches)?;
    Ok(Some(args))
}

pub(crate) fn resolve_args(matches: &ArgMatches) -> AppResult<ReplayArgs> {
    let mut args = ReplayArgs::from_arg_matches(matches)?;
    if let Some(config) = load_config(args.config.as_deref())? {
        apply_config(&mut args, matches, &config)?;
    }
    if args
        .ans_path
        .as_deref()
        .is_none_or(|path| path.trim().is_empty())
    {
        return Err(AppError::validation(ValidationError::MissingAnsPath));
    }
    Ok(args)
}

fn should_show_help(raw_args: &[OsString]) -> bool {
    let treat_as_empty =
        matches!(raw_args, [] | [_]) || matches!(raw_args, [_, second] if second == "--");
    if !treat_as_empty {
        return false;
    }

    default_config_path().is_none()
}

async fn run_async(args: &ReplayArgs, interactive: bool) -> AppResult<()> {
    let (shutdown_tx, _) = shutdown_channel();
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);

    let result = if interactive {
        run_interactive(args, &shutdown_tx).await
    } else {
        let api = build_api(args)?;
        let mut shutdown_rx = shutdown_tx.subscribe();
        let mut stdout = std::io::stdout();
        tokio::select! {
            res = run_headless(api, args, &mut stdout) => res,
            _ = shutdown_rx.recv() => {
                tracing::warn!("Interrupted before the replay finished");
                Ok(())
            }
        }
    };

    drop(shutdown_tx.send(()));
    if let Err(err) = signal_handle.await {
        tracing::warn!("Signal handler task failed: {}", err);
    }
    result
}
