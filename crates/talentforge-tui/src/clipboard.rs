//! Terminal clipboard with two transports.
//!
//! 1. OSC 52 escape sequence, which the terminal intercepts (works over SSH)
//! 2. System clipboard via `arboard`

use std::io::Write;

use async_trait::async_trait;
use base64::Engine;
use talentforge_core::{Clipboard, ClipboardError};

#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalClipboard;

impl TerminalClipboard {
    fn copy(text: &str) -> Result<(), ClipboardError> {
        match Self::copy_osc52(text) {
            Ok(()) => Ok(()),
            Err(err) => {
                tracing::debug!("{err}, falling back to system clipboard");
                Self::copy_system(text)
            }
        }
    }

    fn copy_osc52(text: &str) -> Result<(), ClipboardError> {
        let encoded = osc52_sequence(text);

        // The terminal is drawn on stderr, so the sequence goes there too.
        let mut stderr = std::io::stderr().lock();
        stderr
            .write_all(encoded.as_bytes())
            .and_then(|_| stderr.flush())
            .map_err(|e| ClipboardError::Osc52(e.to_string()))
    }

    fn copy_system(text: &str) -> Result<(), ClipboardError> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| ClipboardError::System(e.to_string()))?;

        clipboard
            .set_text(text)
            .map_err(|e| ClipboardError::System(e.to_string()))
    }
}

/// `ESC ] 52 ; c ; <base64> ESC \` where `c` selects the system clipboard.
fn osc52_sequence(text: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text);
    format!("\x1b]52;c;{encoded}\x1b\\")
}

#[async_trait]
impl Clipboard for TerminalClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let text = text.to_string();
        tokio::task::spawn_blocking(move || Self::copy(&text))
            .await
            .map_err(|e| ClipboardError::System(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_osc52_sequence() {
        assert_eq!(osc52_sequence("hi"), "\x1b]52;c;aGk=\x1b\\");
        assert_eq!(osc52_sequence(""), "\x1b]52;c;\x1b\\");
    }
}
