//! Loosely typed client input.
//!
//! Form bodies carry every value as a string and JSON clients often send
//! numbers quoted. [`IntegerInput`] accepts both and keeps anything else as
//! [`IntegerInput::NotInteger`] instead of failing deserialization, so the
//! field is reported by validation together with every other failed field.

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum IntegerInput {
    Integer(i64),
    NotInteger,
}

impl IntegerInput {
    pub fn as_i64(self) -> Option<i64> {
        match self {
            IntegerInput::Integer(value) => Some(value),
            IntegerInput::NotInteger => None,
        }
    }
}

impl From<i64> for IntegerInput {
    fn from(value: i64) -> Self {
        IntegerInput::Integer(value)
    }
}

struct IntegerInputVisitor;

impl<'de> Visitor<'de> for IntegerInputVisitor {
    type Value = IntegerInput;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an integer or a string holding one")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(IntegerInput::Integer(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(i64::try_from(v).map_or(IntegerInput::NotInteger, IntegerInput::Integer))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        // 30.0 is an integer; 30.5 and out-of-range values are not.
        if v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 {
            Ok(IntegerInput::Integer(v as i64))
        } else {
            Ok(IntegerInput::NotInteger)
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(v.parse::<i64>()
            .map_or(IntegerInput::NotInteger, IntegerInput::Integer))
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
        Ok(IntegerInput::NotInteger)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(IntegerInput::NotInteger)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(IntegerInput::NotInteger)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(IntegerInput::NotInteger)
    }
}

impl<'de> Deserialize<'de> for IntegerInput {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(IntegerInputVisitor)
    }
}
