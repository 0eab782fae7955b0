//! Order submission: copying the summary and opening the order form.
//!
//! Orders are not transmitted programmatically. The visitor copies the
//! plain-text summary and pastes it into an externally hosted form.

use crate::host::{Clipboard, FormOpener, Notifier};

/// Confirmation shown after the copy control succeeds.
pub const COPY_CONFIRMATION: &str = "Cart summary copied. You can paste it into the order form.";

/// What happened during an order request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderHandoff {
    /// Summary copied, form opened.
    CopiedAndOpened,
    /// Copy failed and was ignored; form opened.
    OpenedWithoutCopy,
    /// No summary to copy; form opened.
    Opened,
}

/// Handle the order request control.
///
/// A non-blank summary is written to the clipboard first on a best-effort
/// basis. The form opens in every case.
pub fn request_order<C, O>(
    summary: Option<&str>,
    form_url: &str,
    clipboard: &mut C,
    opener: &mut O,
) -> OrderHandoff
where
    C: Clipboard + ?Sized,
    O: FormOpener + ?Sized,
{
    let handoff = match summary.map(str::trim).filter(|s| !s.is_empty()) {
        Some(text) => match clipboard.write_text(text) {
            Ok(()) => OrderHandoff::CopiedAndOpened,
            Err(e) => {
                tracing::debug!(error = %e, "Clipboard write failed, opening form anyway");
                OrderHandoff::OpenedWithoutCopy
            }
        },
        None => OrderHandoff::Opened,
    };

    opener.open_in_new_tab(form_url);
    tracing::info!(?handoff, "Order form opened");
    handoff
}

/// Handle the copy control: copy the summary and confirm.
///
/// Returns whether the copy succeeded. A failed copy is logged and not
/// confirmed.
pub fn copy_summary<C, N>(summary: &str, clipboard: &mut C, notifier: &mut N) -> bool
where
    C: Clipboard + ?Sized,
    N: Notifier + ?Sized,
{
    match clipboard.write_text(summary) {
        Ok(()) => {
            notifier.notify(COPY_CONFIRMATION);
            true
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to copy cart summary");
            false
        }
    }
}
