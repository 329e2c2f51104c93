//! Error types for strata-rest.

/// Result type alias for strata-rest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for strata-rest operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Returns true if this is an argument error raised before any I/O.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self.kind, ErrorKind::InvalidArgument(_))
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// A required argument was null/blank/empty. Raised before any network
    /// access.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Transport or server failure, surfaced from the HTTP layer.
    #[error("Client error: {0}")]
    Client(String),

    /// The named type does not exist in the fetched schema descriptor.
    #[error("Schema type not found: {0}")]
    SchemaTypeNotFound(String),

    /// The type has no identity-flagged field.
    #[error("No identity field on schema type: {0}")]
    NoIdentityField(String),

    /// The named field is not a relationship (no related type reference).
    #[error("Field {field} on {type_name} is not a relationship")]
    NoSuchRelationship { type_name: String, field: String },

    /// The server response did not carry the identity value expected of it.
    #[error("Response for {type_name} is missing identity field {field}")]
    MissingIdentityValue { type_name: String, field: String },

    /// The server response had an unexpected shape.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Other error.
    #[error("{0}")]
    Other(String),
}

impl From<strata_client::Error> for Error {
    fn from(err: strata_client::Error) -> Self {
        // Argument errors keep their identity across the layer boundary;
        // everything else is a transport-layer failure from here.
        if let strata_client::ErrorKind::InvalidArgument(msg) = &err.kind {
            return Error::new(ErrorKind::InvalidArgument(msg.clone()));
        }
        Error {
            kind: ErrorKind::Client(err.to_string()),
            source: Some(Box::new(err)),
        }
    }
}
