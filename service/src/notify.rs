//! User-facing [`Notification`]s.

use tracing as log;

/// Transient message shown to the user (a toast).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Notification {
    /// [`Level`] of this [`Notification`].
    pub level: Level,

    /// Text of this [`Notification`].
    pub message: String,
}

impl Notification {
    /// Creates a new [`Level::Success`] [`Notification`].
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            message: message.into(),
        }
    }

    /// Creates a new [`Level::Error`] [`Notification`].
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
        }
    }
}

/// Level of a [`Notification`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Level {
    /// Operation has succeeded.
    Success,

    /// Operation has failed.
    Error,
}

/// Sink of [`Notification`]s.
pub trait Notifier {
    /// Shows the provided [`Notification`] to the user.
    fn notify(&self, notification: Notification);
}

/// [`Notifier`] writing [`Notification`]s into the log.
#[derive(Clone, Copy, Debug, Default)]
pub struct Log;

impl Notifier for Log {
    fn notify(&self, notification: Notification) {
        let Notification { level, message } = notification;
        match level {
            Level::Success => log::info!("{message}"),
            Level::Error => log::error!("{message}"),
        }
    }
}
