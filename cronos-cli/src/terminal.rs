//! Terminal rendering of notices and payment redirects.

use std::io::Write;

use cronos_core::checkout::RedirectOpener;
use cronos_core::notify::{Notice, NoticeLevel, Notifier};
use url::Url;

/// Prints notices to stderr, one per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notice: Notice) {
        let tag = match notice.level {
            NoticeLevel::Success => "ok",
            NoticeLevel::Info => "info",
            NoticeLevel::Warning => "warn",
            NoticeLevel::Error => "error",
        };
        tracing::debug!(level = ?notice.level, notice = %notice.text, "Notice");
        eprintln!("[{tag}] {notice}");
    }
}

/// Hands the payment page to the user by printing its link.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalOpener;

impl RedirectOpener for TerminalOpener {
    fn open(&self, url: &Url) -> std::io::Result<()> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "Lanjutkan pembayaran di: {url}")?;
        stdout.flush()
    }
}
