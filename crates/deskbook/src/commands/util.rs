//! Shared helpers for command handlers.

use std::future::Future;
use std::io::IsTerminal;

use deskbook_core::{BookingStore, CoreError, LoadOutcome};
use tracing::debug;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(prompt_err)
}

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Whether a failed load may be offered for retry on the terminal.
fn can_prompt(global: &GlobalOpts) -> bool {
    !global.yes && !global.quiet && std::io::stdin().is_terminal()
}

/// Drive `fut` while a spinner mirrors the store's loading flag.
pub async fn with_spinner<F, T>(store: &BookingStore, global: &GlobalOpts, message: &str, fut: F) -> T
where
    F: Future<Output = T>,
{
    let pb = output::spinner(message, global);
    output::show_spinner(&pb, store.is_loading(), global);
    let mut rx = store.watch();
    tokio::pin!(fut);

    loop {
        tokio::select! {
            out = &mut fut => {
                pb.finish_and_clear();
                return out;
            }
            changed = rx.changed() => {
                if changed.is_err() {
                    let out = (&mut fut).await;
                    pb.finish_and_clear();
                    return out;
                }
                let loading = rx.borrow_and_update().is_loading;
                output::show_spinner(&pb, loading, global);
            }
        }
    }
}

/// Fetch outside a view under the same flag discipline as a view load:
/// loading set and error cleared up front, `"<failure>: <error>"` recorded
/// on failure, loading reset afterwards.
pub async fn tracked_fetch<F, T>(
    store: &BookingStore,
    global: &GlobalOpts,
    failure: &str,
    fetch: F,
) -> Result<T, CliError>
where
    F: Future<Output = Result<T, deskbook_api::Error>>,
{
    store.set_loading(true);
    store.clear_error();
    let result = with_spinner(store, global, "Loading…", fetch).await;
    if let Err(e) = &result {
        store.set_error(Some(format!("{failure}: {e}")));
    }
    store.set_loading(false);
    Ok(result?)
}

/// Run a view load, offering a retry on the terminal when it fails. The
/// store's error message is what the user sees.
pub async fn load_with_retry<F, Fut>(
    store: &BookingStore,
    global: &GlobalOpts,
    load: F,
) -> Result<LoadOutcome, CliError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<LoadOutcome, CoreError>>,
{
    loop {
        match with_spinner(store, global, "Loading…", load()).await {
            Ok(outcome) => {
                debug!(?outcome, "view load finished");
                return Ok(outcome);
            }
            Err(e) if can_prompt(global) => {
                let message = store.error().unwrap_or_else(|| e.to_string());
                eprintln!("{message}");
                if !confirm("Retry?", false)? {
                    return Err(e.into());
                }
            }
            Err(e) => return Err(e.into()),
        }
    }
}
