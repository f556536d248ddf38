use once_cell::sync::Lazy;
use regex::Regex;
use surrealdb::sql::{Id, Thing};

use crate::middleware::error::{AppError, AppResult};

static RECORD_KEY_RGX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,64}$").unwrap());

/// Builds a record id of `table` from `value`, given either as `<key>` or `<table>:<key>`.
///
/// The key is never parsed as SurrealQL, so ranges, objects and other tables are rejected
/// before any query is issued.
pub fn get_table_thing(table: &str, value: &str) -> AppResult<Thing> {
    let key = match value.split_once(':') {
        Some((tb, key)) if tb == table => key,
        Some(_) => return Err(invalid(value)),
        None => value,
    };

    if !RECORD_KEY_RGX.is_match(key) {
        return Err(invalid(value));
    }

    Ok(Thing::from((table, Id::String(key.to_string()))))
}

/// Unescaped key of `thing`, the form exposed to clients and accepted by `get_table_thing`.
pub fn record_key(thing: &Thing) -> String {
    match &thing.id {
        Id::String(key) => key.clone(),
        id => id.to_raw(),
    }
}

fn invalid(value: &str) -> AppError {
    AppError::InvalidIdentifier {
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bare_and_prefixed_keys() {
        let bare = get_table_thing("grill", "01JB2Q3XYZ").unwrap();
        let prefixed = get_table_thing("grill", "grill:01JB2Q3XYZ").unwrap();
        assert_eq!(bare, prefixed);
        assert_eq!(bare.tb, "grill");
        assert_eq!(bare.id.to_raw(), "01JB2Q3XYZ");
    }

    #[test]
    fn hyphenated_key_is_syntactically_valid() {
        let thing = get_table_thing("grill", "not-a-real-id").unwrap();
        assert_eq!(record_key(&thing), "not-a-real-id");
    }

    #[test]
    fn rejects_malformed_keys() {
        for value in ["", "a b", "local_user:abc", "grill:", "x;DELETE grill", "grill:a:b"] {
            let res = get_table_thing("grill", value);
            assert!(
                matches!(res, Err(AppError::InvalidIdentifier { .. })),
                "{value} should be rejected"
            );
        }
        let too_long = "a".repeat(65);
        assert!(get_table_thing("grill", &too_long).is_err());
    }
}
