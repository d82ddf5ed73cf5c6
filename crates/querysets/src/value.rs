//! Bound argument values.
//!
//! Queries are built without knowing which driver will run them, so arguments
//! are kept as a small dialect-neutral [`Value`] enum. Driver bindings live
//! behind the `postgres` and `sqlite` features.

use serde::{Deserialize, Serialize};

/// A single bound argument.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
    Json(serde_json::Value),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// JSON representation, used when the value is compared against a JSON column.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(v) => serde_json::Value::Bool(*v),
            Value::Int(v) => serde_json::Value::from(*v),
            Value::UInt(v) => serde_json::Value::from(*v),
            Value::Float(v) => serde_json::Value::from(*v),
            Value::Text(v) => serde_json::Value::String(v.clone()),
            Value::Json(v) => v.clone(),
        }
    }
}

macro_rules! impl_from_int {
    ($variant:ident => $($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::$variant(v.into())
                }
            }
        )*
    };
}

impl_from_int!(Int => i8, i16, i32, i64);
impl_from_int!(UInt => u8, u16, u32, u64);

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Text(v.clone())
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::Json(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

#[cfg(feature = "postgres")]
mod postgres {
    use super::Value;
    use bytes::BytesMut;
    use std::error::Error;
    use tokio_postgres::types::{IsNull, ToSql, Type, to_sql_checked};

    fn int_to_sql(
        v: i64,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        match *ty {
            Type::INT2 => i16::try_from(v)?.to_sql(ty, out),
            Type::INT4 => i32::try_from(v)?.to_sql(ty, out),
            Type::FLOAT8 => (v as f64).to_sql(ty, out),
            Type::TEXT | Type::VARCHAR => v.to_string().to_sql(ty, out),
            _ => v.to_sql(ty, out),
        }
    }

    impl ToSql for Value {
        fn to_sql(
            &self,
            ty: &Type,
            out: &mut BytesMut,
        ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
            // `context->'key' = $1` infers jsonb for the parameter.
            if *ty == Type::JSON || *ty == Type::JSONB {
                return match self {
                    Value::Null => Ok(IsNull::Yes),
                    other => other.to_json().to_sql(ty, out),
                };
            }

            match self {
                Value::Null => Ok(IsNull::Yes),
                Value::Bool(v) => v.to_sql(ty, out),
                Value::Int(v) => int_to_sql(*v, ty, out),
                Value::UInt(v) => int_to_sql(i64::try_from(*v)?, ty, out),
                Value::Float(v) => v.to_sql(ty, out),
                Value::Text(v) => v.to_sql(ty, out),
                Value::Json(v) => match *ty {
                    Type::TEXT | Type::VARCHAR => v.to_string().to_sql(ty, out),
                    _ => v.to_sql(ty, out),
                },
            }
        }

        fn accepts(_ty: &Type) -> bool {
            true
        }

        to_sql_checked!();
    }
}

#[cfg(feature = "sqlite")]
mod sqlite {
    use super::Value;
    use rusqlite::types::{ToSql, ToSqlOutput, Value as SqliteValue, ValueRef};

    impl ToSql for Value {
        fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
            Ok(match self {
                Value::Null => ToSqlOutput::Owned(SqliteValue::Null),
                Value::Bool(v) => ToSqlOutput::Owned(SqliteValue::Integer(i64::from(*v))),
                Value::Int(v) => ToSqlOutput::Owned(SqliteValue::Integer(*v)),
                Value::UInt(v) => {
                    let v = i64::try_from(*v)
                        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
                    ToSqlOutput::Owned(SqliteValue::Integer(v))
                }
                Value::Float(v) => ToSqlOutput::Owned(SqliteValue::Real(*v)),
                Value::Text(v) => ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes())),
                Value::Json(v) => ToSqlOutput::Owned(SqliteValue::Text(v.to_string())),
            })
        }
    }
}
