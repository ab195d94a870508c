//! Errors produced while mapping Helix payloads onto records.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Why a payload could not be turned into a record.
///
/// Neither variant is recovered from inside this crate. A missing field means the payload does
/// not have the shape Helix documents for that record. A coercion failure means a field is
/// present but holds something that cannot become its typed value.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// A field the Helix schema guarantees is not present.
    #[error("{record} payload is missing required field `{field}`")]
    MissingField {
        /// The record that was being built.
        record: &'static str,
        /// The JSON key that was looked up.
        field: String,
    },
    /// A field is present but its value has the wrong type or format.
    #[error("{record} payload has a malformed field: {source}")]
    Coercion {
        /// The record that was being built.
        record: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl PayloadError {
    /// The record that was being built when the error occurred.
    pub fn record(&self) -> &'static str {
        match self {
            Self::MissingField { record, .. } | Self::Coercion { record, .. } => record,
        }
    }

    /// The missing key, if this is a [`PayloadError::MissingField`].
    pub fn missing_field(&self) -> Option<&str> {
        match self {
            Self::MissingField { field, .. } => Some(field),
            Self::Coercion { .. } => None,
        }
    }

    pub(crate) fn from_serde(record: &'static str, source: serde_json::Error) -> Self {
        // serde reports absent fields through `de::Error::missing_field`, which serde_json
        // renders as "missing field `name`" with no position when reading from a `Value`.
        let message = source.to_string();
        match message
            .strip_prefix("missing field `")
            .and_then(|rest| rest.split_once('`'))
        {
            Some((field, _)) => Self::MissingField {
                record,
                field: field.to_owned(),
            },
            None => Self::Coercion { record, source },
        }
    }

    pub(crate) fn missing(record: &'static str, field: &str) -> Self {
        Self::MissingField {
            record,
            field: field.to_owned(),
        }
    }
}

/// Deserializes `payload` as `T`, labelling any failure with `record`.
pub(crate) fn decode<'de, T>(record: &'static str, payload: &'de Value) -> Result<T, PayloadError>
where
    T: Deserialize<'de>,
{
    match T::deserialize(payload) {
        Ok(value) => {
            tracing::trace!(record, "decoded payload");
            Ok(value)
        }
        Err(e) => {
            let error = PayloadError::from_serde(record, e);
            tracing::debug!(record, %error, "rejected payload");
            Err(error)
        }
    }
}
