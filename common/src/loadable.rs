//! [`Loadable`] state of asynchronously loaded data.

/// State of a value being loaded asynchronously, as seen by a view.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum Loadable<T, E> {
    /// Loading hasn't been started yet.
    #[default]
    Idle,

    /// Value is being loaded.
    Loading,

    /// Value has been loaded successfully.
    Loaded(T),

    /// Loading has failed.
    Failed(E),
}

impl<T, E> Loadable<T, E> {
    /// Creates a new [`Loadable`] out of the provided [`Result`].
    pub fn from_result(result: Result<T, E>) -> Self {
        match result {
            Ok(v) => Self::Loaded(v),
            Err(e) => Self::Failed(e),
        }
    }

    /// Indicates whether the value is being loaded.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns the loaded value, if any.
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Loaded(v) => Some(v),
            Self::Idle | Self::Loading | Self::Failed(_) => None,
        }
    }

    /// Returns the loading error, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&E> {
        match self {
            Self::Failed(e) => Some(e),
            Self::Idle | Self::Loading | Self::Loaded(_) => None,
        }
    }
}

impl<T, E> From<Result<T, E>> for Loadable<T, E> {
    fn from(result: Result<T, E>) -> Self {
        Self::from_result(result)
    }
}
