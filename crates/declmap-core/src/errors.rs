use thiserror::Error;

/// Result type alias using DeclMapError
pub type Result<T> = std::result::Result<T, DeclMapError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and diagnostics printed at the process boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Entity construction / mutation
    Construction,
    ImmutableField,

    // Storage
    BackendUnavailable,
    NotStaged,
    NotFound,
    Persistence,

    // Serialization
    Serialization,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::Construction => "ERR_CONSTRUCTION",
            ExErrorKind::ImmutableField => "ERR_IMMUTABLE_FIELD",
            ExErrorKind::BackendUnavailable => "ERR_BACKEND_UNAVAILABLE",
            ExErrorKind::NotStaged => "ERR_NOT_STAGED",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification (`kind`) for programmatic handling plus optional
/// context (operation, entity, field) for diagnostics.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity: Option<String>,
    field: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity: None,
            field: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity (type name) context
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    /// Add field context
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity context, if any
    pub fn entity(&self) -> Option<&str> {
        self.entity.as_deref()
    }

    /// Get the field context, if any
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity) = &self.entity {
            write!(f, " (entity: {})", entity)?;
        }
        if let Some(field) = &self.field {
            write!(f, " (field: {})", field)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for mapping operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeclMapError {
    /// A field name that the entity does not map was supplied
    #[error("'{field}' is an invalid keyword argument for {entity}")]
    UnknownField { entity: String, field: String },

    /// A value of the wrong type was supplied for a mapped column
    #[error("Invalid value for {entity}.{field}: expected {expected}")]
    TypeMismatch {
        entity: String,
        field: String,
        expected: &'static str,
    },

    /// Attempted to change a field that is fixed once assigned
    #[error("{entity}.{field} is immutable once assigned")]
    ImmutableField { entity: String, field: String },

    /// Commit was requested on a unit of work that never staged anything
    #[error("Nothing staged: add a record before committing")]
    NotStaged,

    /// The record exposes no field-enumeration capability
    #[error("Object of type {type_name} is not JSON serializable")]
    NotSerializable { type_name: String },

    /// Structured serialization failed for another reason
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// A record handle that this unit of work never issued
    #[error("Unknown record handle: {handle}")]
    UnknownHandle { handle: usize },

    /// Internal error (should not happen)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl From<DeclMapError> for ExError {
    fn from(err: DeclMapError) -> Self {
        match err {
            DeclMapError::UnknownField { entity, field } => {
                ExError::new(ExErrorKind::Construction)
                    .with_message(format!(
                        "'{}' is an invalid keyword argument for {}",
                        field, entity
                    ))
                    .with_entity(entity)
                    .with_field(field)
            }

            DeclMapError::TypeMismatch {
                entity,
                field,
                expected,
            } => ExError::new(ExErrorKind::Construction)
                .with_message(format!("expected {}", expected))
                .with_entity(entity)
                .with_field(field),

            DeclMapError::ImmutableField { entity, field } => {
                ExError::new(ExErrorKind::ImmutableField)
                    .with_message("Field is immutable once assigned")
                    .with_entity(entity)
                    .with_field(field)
            }

            DeclMapError::NotStaged => ExError::new(ExErrorKind::NotStaged)
                .with_op("commit")
                .with_message("Nothing staged: add a record before committing"),

            DeclMapError::NotSerializable { type_name } => {
                ExError::new(ExErrorKind::Serialization)
                    .with_message(format!(
                        "Object of type {} is not JSON serializable",
                        type_name
                    ))
                    .with_entity(type_name)
            }

            DeclMapError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }

            DeclMapError::UnknownHandle { handle } => ExError::new(ExErrorKind::NotFound)
                .with_message(format!("Unknown record handle: {}", handle)),

            DeclMapError::Internal { message } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for DeclMapError {
    fn from(err: serde_json::Error) -> Self {
        DeclMapError::Serialization {
            message: err.to_string(),
        }
    }
}
