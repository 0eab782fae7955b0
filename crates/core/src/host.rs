//! Host-side effects the cart asks for but cannot perform itself.
//!
//! A browser host would write into badge elements and call the clipboard
//! API; the HTTP storefront turns each call into a client event. Tests use
//! small recording implementations.

use thiserror::Error;

/// Something that shows the cart's total case count.
pub trait CountDisplay {
    fn show_count(&mut self, count: u64);
}

/// Transient user notification (toast, alert).
pub trait Notifier {
    fn notify(&mut self, message: &str);
}

/// Yes/no confirmation from the user.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Errors raised by a clipboard backend.
#[derive(Debug, Error)]
pub enum ClipboardError {
    /// The host has no clipboard access.
    #[error("clipboard unavailable")]
    Unavailable,
    /// The host refused the write.
    #[error("clipboard write rejected: {0}")]
    Rejected(String),
}

/// System clipboard.
pub trait Clipboard {
    /// Write plain text to the clipboard.
    ///
    /// # Errors
    ///
    /// Returns [`ClipboardError`] if the text could not be written.
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Opens a URL in a new browsing context.
pub trait FormOpener {
    fn open_in_new_tab(&mut self, url: &str);
}

/// A fixed answer, for hosts where the confirmation already happened
/// client-side (for example an `hx-confirm` prompt).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Answered(pub bool);

impl Confirm for Answered {
    fn confirm(&mut self, _prompt: &str) -> bool {
        self.0
    }
}

/// Discards count updates.
impl CountDisplay for () {
    fn show_count(&mut self, _count: u64) {}
}

/// Updates every display in turn.
impl<D: CountDisplay> CountDisplay for [D] {
    fn show_count(&mut self, count: u64) {
        for display in self {
            display.show_count(count);
        }
    }
}
