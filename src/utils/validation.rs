use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::kinds::UnknownKind;

pub fn validate<T: Validate>(val: &T) -> Result<(), ValidationErrors> {
    val.validate()
}

/// Decodes an integer `type` field into its enumeration, reporting unknown
/// values the same way declarative validation does.
pub fn decode_kind<K>(field: &'static str, raw: i32) -> Result<K, ValidationErrors>
where
    K: TryFrom<i32, Error = UnknownKind>,
{
    K::try_from(raw).map_err(|unknown| {
        let mut error = ValidationError::new("unknown_type");
        error.message = Some(unknown.to_string().into());
        let mut errors = ValidationErrors::new();
        errors.add(field, error);
        errors
    })
}
