//! Copy the quick context to the system clipboard

use anyhow::{Context, Result, bail};
use arboard::Clipboard;

/// Larger payloads are refused rather than handed to the platform clipboard
const MAX_CLIPBOARD_BYTES: usize = 10 * 1024 * 1024;

/// Destination for copied text; the system clipboard outside of tests
pub trait ClipboardProvider {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

pub struct SystemClipboard {
    clipboard: Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let clipboard = Clipboard::new().context("System clipboard is unavailable")?;
        Ok(Self { clipboard })
    }
}

impl ClipboardProvider for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.clipboard.set_text(text).context("Failed to set clipboard contents")
    }
}

fn check_context_text(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        bail!("Quick context is empty; run `contextflow context --refresh` first");
    }
    if text.len() > MAX_CLIPBOARD_BYTES {
        bail!(
            "Quick context too large for clipboard ({} bytes, max {})",
            text.len(),
            MAX_CLIPBOARD_BYTES
        );
    }
    Ok(())
}

/// Validate `text` and hand it to `provider`
pub fn copy_with(text: &str, provider: &mut dyn ClipboardProvider) -> Result<()> {
    check_context_text(text)?;
    provider.set_text(text)
}

/// Copy `text` to the system clipboard
///
/// Validation runs before the clipboard is opened, so bad input reports
/// clearly even on headless machines.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    check_context_text(text)?;
    let mut clipboard = SystemClipboard::new()?;
    clipboard.set_text(text)
}
