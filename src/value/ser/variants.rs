use serde::ser::Serialize;

use crate::value::ser::map::SerializeRecord;
use crate::value::ser::to_value;
use crate::value::{List, Map, Value};
use crate::{Error, Result};

/// A tuple variant `E::V(a, b)` becomes the map `{ "V": [a, b] }`.
pub struct SerializeTupleVariant {
    pub name: String,
    pub list: List<Value>,
}

/// A struct variant `E::V { a, b }` becomes the map `{ "V": V { a, b } }`
/// where the inner value is a record named after the variant.
pub struct SerializeStructVariant {
    pub name: String,
    pub record: SerializeRecord,
}

fn tagged(name: String, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(name, value);
    Value::Map(map)
}

impl serde::ser::SerializeTupleVariant for SerializeTupleVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.list.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(tagged(self.name, Value::List(self.list)))
    }
}

impl serde::ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.record.insert(key, value)
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(tagged(self.name, Value::Record(self.record.into_record())))
    }
}
