use crate::config::{ModeValue, ModuloMode, RoundingMode};
use crate::engine::{default_engine, Input};
use crate::Decimal;

use core::fmt;
use num_traits::ToPrimitive;
use serde::{self, de::Unexpected};

/// Serialize/deserialize Decimals as `f64`. Values beyond the `f64` range or precision are
/// approximated.
///
/// ```
/// # use serde::{Serialize, Deserialize};
/// # use bigdecimal_engine::Decimal;
/// # use std::str::FromStr;
///
/// #[derive(Serialize, Deserialize)]
/// pub struct FloatExample {
///     #[serde(with = "bigdecimal_engine::serde::float")]
///     value: Decimal,
/// }
///
/// let value = FloatExample { value: Decimal::from_str("123.4").unwrap() };
/// assert_eq!(
///     &serde_json::to_string(&value).unwrap(),
///     r#"{"value":123.4}"#
/// );
/// ```
pub mod float {
    use super::*;
    use serde::Serialize;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        deserializer.deserialize_any(DecimalVisitor)
    }

    pub fn serialize<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        value.to_f64().unwrap_or(f64::NAN).serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for Decimal {
    fn deserialize<D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        deserializer.deserialize_any(DecimalVisitor)
    }
}

struct DecimalVisitor;

impl<'de> serde::de::Visitor<'de> for DecimalVisitor {
    type Value = Decimal;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "a Decimal type representing an arbitrary precision number")
    }

    fn visit_i64<E>(self, value: i64) -> Result<Decimal, E>
    where
        E: serde::de::Error,
    {
        default_engine()
            .decimal(value)
            .map_err(|_| E::invalid_value(Unexpected::Signed(value), &self))
    }

    fn visit_u64<E>(self, value: u64) -> Result<Decimal, E>
    where
        E: serde::de::Error,
    {
        default_engine()
            .decimal(value)
            .map_err(|_| E::invalid_value(Unexpected::Unsigned(value), &self))
    }

    fn visit_f64<E>(self, value: f64) -> Result<Decimal, E>
    where
        E: serde::de::Error,
    {
        default_engine()
            .decimal(value)
            .map_err(|_| E::invalid_value(Unexpected::Float(value), &self))
    }

    fn visit_str<E>(self, value: &str) -> Result<Decimal, E>
    where
        E: serde::de::Error,
    {
        default_engine()
            .decimal(Input::Text(value))
            .map_err(|_| E::invalid_value(Unexpected::Str(value), &self))
    }
}

impl serde::Serialize for Decimal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Every significant digit is kept in both notations, so the text round-trips.
        serializer.serialize_str(&default_engine().to_string(self))
    }
}

impl serde::Serialize for RoundingMode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl serde::Serialize for ModuloMode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> serde::Deserialize<'de> for RoundingMode {
    fn deserialize<D>(deserializer: D) -> Result<RoundingMode, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        let value = <ModeValue as serde::Deserialize>::deserialize(deserializer)?;
        ModeValue::to_rounding(&value).map_err(serde::de::Error::custom)
    }
}

impl<'de> serde::Deserialize<'de> for ModuloMode {
    fn deserialize<D>(deserializer: D) -> Result<ModuloMode, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        let value = <ModeValue as serde::Deserialize>::deserialize(deserializer)?;
        ModeValue::to_modulo(&value).map_err(serde::de::Error::custom)
    }
}
