//! Pre-validation payload normalization.

use serde_json::Value;

/// Lower-case the `username` and `email` properties of a credentials
/// payload, in place. Absent or non-string values are left untouched.
///
/// Callers run this before validating or persisting credentials so that
/// registration, login, and lookups compare the same canonical form.
pub fn credentials(payload: &mut Value) {
    let Some(object) = payload.as_object_mut() else {
        return;
    };
    for key in ["username", "email"] {
        if let Some(Value::String(value)) = object.get_mut(key) {
            *value = value.to_lowercase();
        }
    }
}
