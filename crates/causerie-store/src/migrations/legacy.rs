//! Upgrades for records written before newer fields existed.
//!
//! These functions operate on raw JSON so that documents missing required
//! fields can still be read.  They are pure: the same stale input always
//! yields the same upgraded output, and an already-upgraded document is
//! returned untouched.  Each returns `true` when it changed the document so
//! the caller can persist the upgraded form.

use serde_json::{json, Map, Value};

use crate::models::UNKNOWN_NUMBER;

/// Fill defaults for `notificationSettings`, `appearanceSettings` and `phone`
/// on a stored User document.
pub fn upgrade_user(user: &mut Value) -> bool {
    let Some(fields) = user.as_object_mut() else {
        return false;
    };

    let mut modified = false;
    modified |= fill_missing(fields, "notificationSettings", json!({ "enabled": true }));
    modified |= fill_missing(fields, "appearanceSettings", json!({ "darkMode": true }));
    modified |= fill_missing(fields, "phone", json!(UNKNOWN_NUMBER));
    modified
}

/// Fill the `phone` sentinel on every stored Contact that lacks one.
pub fn upgrade_contacts(contacts: &mut Value) -> bool {
    let Some(list) = contacts.as_array_mut() else {
        return false;
    };

    let mut modified = false;
    for contact in list.iter_mut().filter_map(Value::as_object_mut) {
        modified |= fill_missing(contact, "phone", json!(UNKNOWN_NUMBER));
    }
    modified
}

/// Absent and explicit `null` both count as missing.
fn fill_missing(fields: &mut Map<String, Value>, name: &str, default: Value) -> bool {
    match fields.get(name) {
        Some(v) if !v.is_null() => false,
        _ => {
            fields.insert(name.to_string(), default);
            true
        }
    }
}
