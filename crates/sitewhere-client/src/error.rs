use std::borrow::Cow;

use url::Url;

use crate::request::Operation;

/// All kinds of errors raised while talking to a SiteWhere instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The target URL could not be built.
    Url,
    /// Query conditions or a request body could not be serialized.
    ///
    /// This error is always raised before contacting the service.
    Encoding,
    /// No bearer credential could be obtained.
    Authorization,
    /// A request could not be sent, or its response could not be read.
    Transport,
    /// The service answered with a status other than `200`.
    Api,
    /// A response body does not describe the expected record.
    Decoding,
}

impl ErrorKind {
    const fn description(self) -> &'static str {
        match self {
            Self::Url => "URL",
            Self::Encoding => "Encoding",
            Self::Authorization => "Authorization",
            Self::Transport => "Transport",
            Self::Api => "API",
            Self::Decoding => "Decoding",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

/// A client error.
///
/// Besides its [`ErrorKind`] and description, an error records the HTTP
/// status returned by the service, if any, and the [`Operation`] and URL of
/// the failed call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    description: Cow<'static, str>,
    status: Option<u16>,
    operation: Option<Operation>,
    url: Option<String>,
}

impl Error {
    /// Creates an [`Error`] from an [`ErrorKind`] and a description.
    #[must_use]
    #[inline]
    pub fn new(kind: ErrorKind, description: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            description: description.into(),
            status: None,
            operation: None,
            url: None,
        }
    }

    /// Creates an [`ErrorKind::Api`] error for a response with the given
    /// HTTP status.
    #[must_use]
    #[inline]
    pub fn api(status: u16, description: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Api, description).status(status)
    }

    /// Returns the [`ErrorKind`].
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error description.
    ///
    /// For [`ErrorKind::Api`] errors, this is the message sent by the
    /// service.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the HTTP status answered by the service, if any.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        self.status
    }

    /// Returns the [`Operation`] that failed, if known.
    #[must_use]
    pub const fn operation(&self) -> Option<Operation> {
        self.operation
    }

    /// Returns the URL of the failed request, if known.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub(crate) fn status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    // Context set by the innermost call wins.
    pub(crate) fn context(mut self, operation: Operation, url: Option<&Url>) -> Self {
        if self.operation.is_none() {
            self.operation = Some(operation);
        }
        if self.url.is_none() {
            self.url = url.map(ToString::to_string);
        }
        self
    }

    pub(crate) fn encoding(error: impl std::fmt::Display) -> Self {
        Self::new(ErrorKind::Encoding, format!("Serialization failed: {error}"))
    }

    pub(crate) fn decoding(error: impl std::fmt::Display) -> Self {
        Self::new(ErrorKind::Decoding, format!("Deserialization failed: {error}"))
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(operation) = self.operation {
            write!(f, "{operation}")?;
            if let Some(url) = &self.url {
                write!(f, " `{url}`")?;
            }
            write!(f, ": ")?;
        }

        write!(f, "{} error: {}", self.kind, self.description)?;

        if let Some(status) = self.status {
            write!(f, " (status {status})")?;
        }

        Ok(())
    }
}

impl std::error::Error for Error {}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        let error = Self::new(ErrorKind::Transport, e.to_string());
        match e.status() {
            Some(status) => error.status(status.as_u16()),
            None => error,
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self {
        Self::new(ErrorKind::Url, format!("Invalid URL: {e}"))
    }
}

/// A specialized [`Result`] type for client operations.
pub type Result<T> = std::result::Result<T, Error>;
