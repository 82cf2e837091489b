use thiserror::Error;

/// Result type alias using StaffError
pub type Result<T> = std::result::Result<T, StaffError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every error surfaced by the mappers is classified into one of these kinds.
/// Each kind maps to a stable code usable for programmatic handling and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Validation
    InvalidYear,
    InvalidSummary,
    InvalidName,
    InvalidJobTitle,
    InvalidLocation,

    // Referential
    DanglingReference,

    // Lifecycle
    AlreadyPersisted,
    NotPersisted,

    // Integration/IO
    Io,
    Persistence,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidYear => "ERR_INVALID_YEAR",
            ExErrorKind::InvalidSummary => "ERR_INVALID_SUMMARY",
            ExErrorKind::InvalidName => "ERR_INVALID_NAME",
            ExErrorKind::InvalidJobTitle => "ERR_INVALID_JOB_TITLE",
            ExErrorKind::InvalidLocation => "ERR_INVALID_LOCATION",
            ExErrorKind::DanglingReference => "ERR_DANGLING_REFERENCE",
            ExErrorKind::AlreadyPersisted => "ERR_ALREADY_PERSISTED",
            ExErrorKind::NotPersisted => "ERR_NOT_PERSISTED",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// True for kinds raised synchronously by a validating setter
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ExErrorKind::InvalidYear
                | ExErrorKind::InvalidSummary
                | ExErrorKind::InvalidName
                | ExErrorKind::InvalidJobTitle
                | ExErrorKind::InvalidLocation
                | ExErrorKind::DanglingReference
        )
    }
}

/// Canonical structured error type
///
/// Carries a classification kind plus optional context (operation, table,
/// row id) for debugging and log emission.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity: Option<String>,
    entity_id: Option<i64>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity: None,
            entity_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity (table) context
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    /// Add row id context
    pub fn with_entity_id(mut self, id: i64) -> Self {
        self.entity_id = Some(id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
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

    /// Get the entity (table) context, if any
    pub fn entity(&self) -> Option<&str> {
        self.entity.as_deref()
    }

    /// Get the row id context, if any
    pub fn entity_id(&self) -> Option<i64> {
        self.entity_id
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
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
        if let Some(entity_id) = self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain error taxonomy for staffdb mappers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StaffError {
    // ===== Validation Errors =====
    /// Review year below the accepted floor
    #[error("Invalid year {year}: must be an integer >= 2000")]
    InvalidYear { year: i64 },

    /// Review summary empty
    #[error("Invalid summary: {reason}")]
    InvalidSummary { reason: String },

    /// Department or employee name empty
    #[error("Invalid name: {reason}")]
    InvalidName { reason: String },

    /// Employee job title empty
    #[error("Invalid job title: {reason}")]
    InvalidJobTitle { reason: String },

    /// Department location empty
    #[error("Invalid location: {reason}")]
    InvalidLocation { reason: String },

    // ===== Referential Errors =====
    /// Employee reference does not resolve to an employees row
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound { employee_id: i64 },

    /// Department reference does not resolve to a departments row
    #[error("Department not found: {department_id}")]
    DepartmentNotFound { department_id: i64 },

    // ===== Lifecycle Errors =====
    /// save() called on an object that already has a primary key
    #[error("{table} row {id} is already persisted; use update instead")]
    AlreadyPersisted { table: String, id: i64 },

    /// update() called on an object without a primary key
    #[error("{table} object has no id; save it first")]
    NotPersisted { table: String },
}

/// Conversion from StaffError to ExError
///
/// Domain failures keep their human message and gain a stable kind.
impl From<StaffError> for ExError {
    fn from(err: StaffError) -> Self {
        let message = err.to_string();
        match err {
            StaffError::InvalidYear { .. } => ExError::new(ExErrorKind::InvalidYear)
                .with_op("set_year")
                .with_message(message),

            StaffError::InvalidSummary { .. } => ExError::new(ExErrorKind::InvalidSummary)
                .with_op("set_summary")
                .with_message(message),

            StaffError::InvalidName { .. } => ExError::new(ExErrorKind::InvalidName)
                .with_op("set_name")
                .with_message(message),

            StaffError::InvalidJobTitle { .. } => ExError::new(ExErrorKind::InvalidJobTitle)
                .with_op("set_job_title")
                .with_message(message),

            StaffError::InvalidLocation { .. } => ExError::new(ExErrorKind::InvalidLocation)
                .with_op("set_location")
                .with_message(message),

            StaffError::EmployeeNotFound { employee_id } => {
                ExError::new(ExErrorKind::DanglingReference)
                    .with_op("set_employee_id")
                    .with_entity("employees")
                    .with_entity_id(employee_id)
                    .with_message(message)
            }

            StaffError::DepartmentNotFound { department_id } => {
                ExError::new(ExErrorKind::DanglingReference)
                    .with_op("set_department_id")
                    .with_entity("departments")
                    .with_entity_id(department_id)
                    .with_message(message)
            }

            StaffError::AlreadyPersisted { table, id } => {
                ExError::new(ExErrorKind::AlreadyPersisted)
                    .with_op("save")
                    .with_entity(table)
                    .with_entity_id(id)
                    .with_message(message)
            }

            StaffError::NotPersisted { table } => ExError::new(ExErrorKind::NotPersisted)
                .with_entity(table)
                .with_message(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(ExErrorKind::InvalidYear.code(), "ERR_INVALID_YEAR");
        assert_eq!(ExErrorKind::Persistence.code(), "ERR_PERSISTENCE");
        assert_eq!(ExErrorKind::DanglingReference.code(), "ERR_DANGLING_REFERENCE");
    }

    #[test]
    fn test_validation_classification() {
        assert!(ExErrorKind::InvalidSummary.is_validation());
        assert!(ExErrorKind::DanglingReference.is_validation());
        assert!(!ExErrorKind::Persistence.is_validation());
        assert!(!ExErrorKind::AlreadyPersisted.is_validation());
    }

    #[test]
    fn test_employee_not_found_maps_to_dangling_reference() {
        let ex: ExError = StaffError::EmployeeNotFound { employee_id: 42 }.into();
        assert_eq!(ex.kind(), ExErrorKind::DanglingReference);
        assert_eq!(ex.entity(), Some("employees"));
        assert_eq!(ex.entity_id(), Some(42));
        assert!(ex.message().contains("42"));
    }

    #[test]
    fn test_display_includes_code_and_context() {
        let ex = ExError::new(ExErrorKind::Persistence)
            .with_op("sqlite")
            .with_entity("reviews")
            .with_entity_id(7)
            .with_message("disk I/O error");
        let rendered = ex.to_string();
        assert!(rendered.starts_with("[ERR_PERSISTENCE]"));
        assert!(rendered.contains("'sqlite'"));
        assert!(rendered.contains("(entity: reviews)"));
        assert!(rendered.contains("(entity_id: 7)"));
    }

    #[test]
    fn test_source_chain() {
        use std::error::Error;
        let inner = ExError::new(ExErrorKind::Io).with_message("inner");
        let outer = ExError::new(ExErrorKind::Persistence).with_source(inner);
        assert_eq!(outer.source_error().map(|e| e.kind()), Some(ExErrorKind::Io));
        assert!(outer.source().is_some());
    }
}
