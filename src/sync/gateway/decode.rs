use crate::sync::domain::{DecodeError, Field, FieldValue};
use crate::sync::gateway::api::RawOutput;

/// Turn a dry-run result into the typed value for `field`.
///
/// An `is_error` output never reaches the field decoder.
pub fn decode_output(raw: &RawOutput, field: Field) -> Result<FieldValue, DecodeError> {
    if raw.is_error {
        return Err(DecodeError::Contract(raw.decoded_output.clone()));
    }
    (field.descriptor().decode)(&raw.output)
}
