use crate::value::ValueCow;
use crate::Value;

/// Looks up a single path segment in the given value.
///
/// Maps are indexed by exact key. Records are checked for a field and then
/// for a method, both of which may also match with their first character
/// lower-cased if `decapitalize` is enabled. Lists are indexed by position.
pub fn lookup<'a>(value: &'a Value, key: &str, decapitalize: bool) -> Option<ValueCow<'a>> {
    match value {
        Value::Map(map) => map.get(key).map(ValueCow::Borrowed),
        Value::Record(record) => match record.lookup_field(key, decapitalize) {
            Some(value) => Some(ValueCow::Borrowed(value)),
            None if decapitalize => record.call_method(key).map(ValueCow::Owned),
            None => None,
        },
        Value::List(list) => key
            .parse::<usize>()
            .ok()
            .and_then(|i| list.get(i))
            .map(ValueCow::Borrowed),
        _ => None,
    }
}

/// Like [`lookup`] but for a value that might be owned, in which case only
/// the result is cloned.
pub fn lookup_cow<'a>(
    value: ValueCow<'a>,
    key: &str,
    decapitalize: bool,
) -> Option<ValueCow<'a>> {
    match value {
        ValueCow::Borrowed(v) => lookup(v, key, decapitalize),
        ValueCow::Owned(v) => {
            lookup(&v, key, decapitalize).map(|found| ValueCow::Owned(found.into_owned()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{value, Record};

    #[test]
    fn lookup_map_is_exact() {
        let v = value! { Name: "John" };
        assert!(lookup(&v, "Name", true).is_some());
        assert!(lookup(&v, "name", true).is_none());
    }

    #[test]
    fn lookup_record_decapitalized() {
        let v = Value::from(
            Record::new()
                .field("Name", "John")
                .method("Age", || 42.into()),
        );
        assert_eq!(*lookup(&v, "name", true).unwrap(), Value::from("John"));
        assert_eq!(*lookup(&v, "age", true).unwrap(), Value::from(42));
        assert!(lookup(&v, "name", false).is_none());
        assert!(lookup(&v, "Age", false).is_none());
        assert_eq!(*lookup(&v, "Name", false).unwrap(), Value::from("John"));
    }

    #[test]
    fn lookup_list_index() {
        let v = Value::from(["a", "b"]);
        assert_eq!(*lookup(&v, "1", true).unwrap(), Value::from("b"));
        assert!(lookup(&v, "2", true).is_none());
        assert!(lookup(&v, "x", true).is_none());
    }

    #[test]
    fn lookup_scalar() {
        assert!(lookup(&Value::from("abc"), "len", true).is_none());
    }
}
