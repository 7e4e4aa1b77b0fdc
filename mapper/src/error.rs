//! Mapping error types.

use automap_core::TypeId;
use thiserror::Error;

/// Errors that can occur while mapping.
#[derive(Debug, Error)]
pub enum MapError {
    /// The destination root is not a present pointer.
    #[error("Destination must be a present pointer, got {type_name}")]
    DestNotAddressable { type_name: String },

    /// A required field has no counterpart on the opposite side.
    #[error("Cannot resolve field '{field}' between source {source_type} and destination {dest_type}")]
    FieldResolution {
        field: String,
        source_type: String,
        dest_type: String,
    },

    /// Leaf types are neither identical nor convertible.
    #[error("Cannot convert {source_type} to {dest_type}")]
    TypeIncompatible {
        source_type: String,
        dest_type: String,
    },

    /// An empty sequence's element types failed the compatibility probe.
    #[error("Sequence element {source_type} cannot map to {dest_type}: {cause}")]
    ElementIncompatible {
        source_type: String,
        dest_type: String,
        #[source]
        cause: Box<MapError>,
    },

    /// A value does not have the shape of its declared type.
    #[error("Value does not match type {type_name}: found {found}")]
    MalformedValue {
        type_name: String,
        found: &'static str,
    },

    /// A type id is not in the registry.
    #[error("Unknown type: {0}")]
    UnknownType(TypeId),

    /// A dynamic source cannot be used as a mapping source.
    #[error("Invalid source: {message}")]
    InvalidSource { message: String },

    /// An error raised while mapping one field.
    #[error("Error mapping field: {field}. DestType: {dest_type}. SourceType: {source_type}. Error: {cause}")]
    InField {
        field: String,
        dest_type: String,
        source_type: String,
        #[source]
        cause: Box<MapError>,
    },
}

/// Error taxonomy, independent of field wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapErrorKind {
    DestNotAddressable,
    FieldResolution,
    TypeIncompatible,
    MalformedValue,
    UnknownType,
    InvalidSource,
}

impl MapError {
    pub fn dest_not_addressable(type_name: impl Into<String>) -> Self {
        Self::DestNotAddressable {
            type_name: type_name.into(),
        }
    }

    pub fn field_resolution(
        field: impl Into<String>,
        source_type: impl Into<String>,
        dest_type: impl Into<String>,
    ) -> Self {
        Self::FieldResolution {
            field: field.into(),
            source_type: source_type.into(),
            dest_type: dest_type.into(),
        }
    }

    pub fn type_incompatible(source_type: impl Into<String>, dest_type: impl Into<String>) -> Self {
        Self::TypeIncompatible {
            source_type: source_type.into(),
            dest_type: dest_type.into(),
        }
    }

    pub fn element_incompatible(
        source_type: impl Into<String>,
        dest_type: impl Into<String>,
        cause: MapError,
    ) -> Self {
        Self::ElementIncompatible {
            source_type: source_type.into(),
            dest_type: dest_type.into(),
            cause: Box::new(cause),
        }
    }

    pub fn malformed_value(type_name: impl Into<String>, found: &'static str) -> Self {
        Self::MalformedValue {
            type_name: type_name.into(),
            found,
        }
    }

    pub fn invalid_source(message: impl Into<String>) -> Self {
        Self::InvalidSource {
            message: message.into(),
        }
    }

    pub fn in_field(
        field: impl Into<String>,
        dest_type: impl Into<String>,
        source_type: impl Into<String>,
        cause: MapError,
    ) -> Self {
        Self::InField {
            field: field.into(),
            dest_type: dest_type.into(),
            source_type: source_type.into(),
            cause: Box::new(cause),
        }
    }

    /// Taxonomy kind of the underlying error.
    pub fn kind(&self) -> MapErrorKind {
        let mut err = self;
        loop {
            return match err {
                MapError::InField { cause, .. } => {
                    err = cause.as_ref();
                    continue;
                }
                MapError::DestNotAddressable { .. } => MapErrorKind::DestNotAddressable,
                MapError::FieldResolution { .. } => MapErrorKind::FieldResolution,
                MapError::TypeIncompatible { .. } | MapError::ElementIncompatible { .. } => {
                    MapErrorKind::TypeIncompatible
                }
                MapError::MalformedValue { .. } => MapErrorKind::MalformedValue,
                MapError::UnknownType(_) => MapErrorKind::UnknownType,
                MapError::InvalidSource { .. } => MapErrorKind::InvalidSource,
            };
        }
    }

    /// The error with all field wrappers removed.
    pub fn root_cause(&self) -> &MapError {
        let mut err = self;
        while let MapError::InField { cause, .. } = err {
            err = cause.as_ref();
        }
        err
    }

    /// Field names from the outermost to the innermost wrapper.
    pub fn field_path(&self) -> Vec<&str> {
        let mut path = Vec::new();
        let mut err = self;
        while let MapError::InField { field, cause, .. } = err {
            path.push(field.as_str());
            err = cause.as_ref();
        }
        path
    }
}

/// Result type for mapping operations.
pub type MapResult<T> = Result<T, MapError>;
