//! Toast notifications printed after an action
//!
//! Toasts go to stderr so they never mix with piped output. Success and
//! info toasts respect `--quiet`; errors are always shown.

use console::style;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Info,
            message: message.into(),
        }
    }

    /// Whether this toast should be printed under the given quiet setting
    pub fn visible(&self, quiet: bool) -> bool {
        !quiet || self.kind == ToastKind::Error
    }

    /// Print to stderr unless suppressed
    pub fn show(&self, quiet: bool) {
        if self.visible(quiet) {
            eprintln!("{}", self);
        }
    }
}

impl fmt::Display for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ToastKind::Success => write!(f, "{} {}", style("✓").green(), self.message),
            ToastKind::Error => write!(f, "{} {}", style("✗").red(), style(&self.message).red()),
            ToastKind::Info => write!(f, "{} {}", style("•").cyan(), self.message),
        }
    }
}
