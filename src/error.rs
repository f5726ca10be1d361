use thiserror::Error;

/// Structured error context for better error handling and debugging.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ErrorContext {
    /// Configuration key or response field that caused the error (e.g., "max_batch_requests")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., the relative URL of a sub-request)
    pub details: Option<String>,
    /// Source of the error (e.g., "client_builder", "batch_correlator")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Unified error type of the client.
///
/// Errors are `Clone` because a failed [`PendingResult`](crate::batch::PendingResult)
/// keeps its failure and hands it out on every read.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Invalid construction arguments. Raised synchronously, never retried.
    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    /// The developer token was rejected by Diffbot.
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Non-success HTTP status or a transport failure (no status).
    #[error("Server error{}: {message}", format_status(.status))]
    Server {
        status: Option<u16>,
        message: String,
        retryable: bool,
    },

    /// A response body could not be decoded into the declared result kind.
    #[error("Parse error: {message}{}", format_context(.context))]
    Parse {
        message: String,
        context: ErrorContext,
    },

    /// Diffbot answered with a well-formed error envelope.
    #[error("Diffbot API error {code}: {message}")]
    Api { code: i64, message: String },

    /// The combined batch call itself failed; the wrapped error is the cause.
    #[error("Batch call failed: {0}")]
    Batch(Box<Error>),
}

fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

fn format_status(status: &Option<u16>) -> String {
    match status {
        Some(s) => format!(" (HTTP {})", s),
        None => String::new(),
    }
}

impl Error {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration {
            message: msg.into(),
            context: ErrorContext::new(),
        }
    }

    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Error::Parse {
            message: msg.into(),
            context: ErrorContext::new(),
        }
    }

    pub fn parse_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Parse {
            message: msg.into(),
            context,
        }
    }

    /// HTTP-level failure with a status code. 5xx statuses are retryable.
    pub fn server(status: u16, msg: impl Into<String>) -> Self {
        Error::Server {
            status: Some(status),
            message: msg.into(),
            retryable: (500..=599).contains(&status),
        }
    }

    /// Connection, timeout or body-read failure; always retryable.
    pub fn transport(msg: impl Into<String>) -> Self {
        Error::Server {
            status: None,
            message: msg.into(),
            retryable: true,
        }
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Error::Unauthorized {
            message: msg.into(),
        }
    }

    pub fn api(code: i64, msg: impl Into<String>) -> Self {
        Error::Api {
            code,
            message: msg.into(),
        }
    }

    pub(crate) fn batch(cause: Error) -> Self {
        Error::Batch(Box::new(cause))
    }

    /// Whether retrying the same call could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Server { retryable, .. } => *retryable,
            Error::Batch(inner) => inner.is_retryable(),
            _ => false,
        }
    }

    /// HTTP status associated with the error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Server { status, .. } => *status,
            Error::Unauthorized { .. } => Some(401),
            Error::Batch(inner) => inner.status_code(),
            _ => None,
        }
    }

    /// `true` when the combined batch call failed, as opposed to the caller's own sub-request.
    pub fn is_batch_failure(&self) -> bool {
        matches!(self, Error::Batch(_))
    }

    /// The cause of a batch failure, or `self` for any other error.
    pub fn inner(&self) -> &Error {
        match self {
            Error::Batch(inner) => inner.inner(),
            other => other,
        }
    }

    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. } | Error::Parse { context, .. } => Some(context),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::parse_with_context(e.to_string(), ErrorContext::new().with_source("json"))
    }
}

impl From<quick_xml::DeError> for Error {
    fn from(e: quick_xml::DeError) -> Self {
        Error::parse_with_context(e.to_string(), ErrorContext::new().with_source("dml"))
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            return Error::server(status.as_u16(), e.to_string());
        }
        let message = if e.is_timeout() {
            format!("request timed out: {}", e)
        } else {
            format!("request could not be executed: {}", e)
        };
        Error::transport(message)
    }
}
