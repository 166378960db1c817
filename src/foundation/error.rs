/// Convenience result type used across matchday.
pub type PostResult<T> = Result<T, PostError>;

/// Top-level error taxonomy used by the post generator.
#[derive(thiserror::Error, Debug)]
pub enum PostError {
    /// The calendar feed could not be read or parsed.
    #[error("calendar parse error: {0}")]
    CalendarParse(String),

    /// A raw competition code has no entry in the level table.
    #[error("unknown competition level '{0}'")]
    UnknownLevel(String),

    /// No generic template pair is configured for this many matches on one date.
    #[error("no generic template configured for {0} matches")]
    UnsupportedMatchCount(usize),

    /// A team has no logo in the catalog, or the catalog file is missing on disk.
    #[error("logo not found: {0}")]
    LogoNotFound(String),

    /// The external rasterizer failed, timed out or could not be started.
    #[error("rasterize error: {0}")]
    Rasterize(String),

    /// A template file is unreadable or one of its slots is malformed.
    #[error("template error: {0}")]
    Template(String),

    /// The configuration is invalid.
    #[error("config error: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// How far an error reaches when the pipeline decides what to skip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorScope {
    /// Aborts the whole run.
    Run,
    /// Aborts every job of one date.
    Date,
    /// Aborts a single render job (or its raster step).
    Job,
}

impl PostError {
    /// Build a [`PostError::CalendarParse`] value.
    pub fn calendar(msg: impl Into<String>) -> Self {
        Self::CalendarParse(msg.into())
    }

    /// Build a [`PostError::LogoNotFound`] value.
    pub fn logo(msg: impl Into<String>) -> Self {
        Self::LogoNotFound(msg.into())
    }

    /// Build a [`PostError::Rasterize`] value.
    pub fn rasterize(msg: impl Into<String>) -> Self {
        Self::Rasterize(msg.into())
    }

    /// Build a [`PostError::Template`] value.
    pub fn template(msg: impl Into<String>) -> Self {
        Self::Template(msg.into())
    }

    /// Build a [`PostError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Classify the error for report-and-continue handling.
    pub fn scope(&self) -> ErrorScope {
        match self {
            Self::CalendarParse(_) | Self::Config(_) => ErrorScope::Run,
            Self::UnknownLevel(_) => ErrorScope::Date,
            Self::UnsupportedMatchCount(_)
            | Self::LogoNotFound(_)
            | Self::Rasterize(_)
            | Self::Template(_)
            | Self::Other(_) => ErrorScope::Job,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
