//! Datatype codecs between native values and RDF literals
//!
//! A [`DatatypeRegistry`] holds two lookup tables, one keyed by the
//! native value kind and one keyed by datatype IRI. Registries are built
//! once through [`DatatypeRegistryBuilder`] and are immutable afterwards;
//! share them behind an `Arc`.

use crate::vocabulary::*;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, SecondsFormat};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised by a codec
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DatatypeError {
    #[error("Cannot decode {lexical:?} as {datatype}: {reason}")]
    InvalidLexical {
        datatype: String,
        lexical: String,
        reason: String,
    },

    #[error("Codec for {datatype} cannot encode a {found} value")]
    KindMismatch { datatype: String, found: ValueKind },
}

impl DatatypeError {
    fn invalid(datatype: &str, lexical: &str, reason: impl fmt::Display) -> Self {
        DatatypeError::InvalidLexical {
            datatype: datatype.to_string(),
            lexical: lexical.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// A literal whose datatype has no native decoding
///
/// Keeps the datatype and the lexical form verbatim so that writing the
/// value back produces the original literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnsupportedValue {
    pub datatype: String,
    pub lexical: String,
}

/// Native value decoded from, or encodable into, a literal
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Boolean(bool),
    Byte(i8),
    Short(i16),
    Integer(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(DateTime<FixedOffset>),
    Unsupported(UnsupportedValue),
}

/// Runtime kind of a [`Value`], the key of the native-type table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    String,
    Boolean,
    Byte,
    Short,
    Integer,
    Long,
    Float,
    Double,
    Date,
    Time,
    DateTime,
    Unsupported,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::String(_) => ValueKind::String,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Byte(_) => ValueKind::Byte,
            Value::Short(_) => ValueKind::Short,
            Value::Integer(_) => ValueKind::Integer,
            Value::Long(_) => ValueKind::Long,
            Value::Float(_) => ValueKind::Float,
            Value::Double(_) => ValueKind::Double,
            Value::Date(_) => ValueKind::Date,
            Value::Time(_) => ValueKind::Time,
            Value::DateTime(_) => ValueKind::DateTime,
            Value::Unsupported(_) => ValueKind::Unsupported,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    /// Any integral value widened to `i64`
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Byte(value) => Some(i64::from(*value)),
            Value::Short(value) => Some(i64::from(*value)),
            Value::Integer(value) => Some(i64::from(*value)),
            Value::Long(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(value) => Some(f64::from(*value)),
            Value::Double(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(value) => f.write_str(value),
            Value::Boolean(value) => write!(f, "{}", value),
            Value::Byte(value) => write!(f, "{}", value),
            Value::Short(value) => write!(f, "{}", value),
            Value::Integer(value) => write!(f, "{}", value),
            Value::Long(value) => write!(f, "{}", value),
            Value::Float(value) => f.write_str(&format_double(f64::from(*value), &value.to_string())),
            Value::Double(value) => f.write_str(&format_double(*value, &value.to_string())),
            Value::Date(value) => write!(f, "{}", value.format("%Y-%m-%d")),
            Value::Time(value) => write!(f, "{}", value.format("%H:%M:%S%.f")),
            Value::DateTime(value) => f.write_str(&value.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Value::Unsupported(value) => f.write_str(&value.lexical),
        }
    }
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant(value)
                }
            }
        )*
    };
}

value_from! {
    String => String,
    bool => Boolean,
    i8 => Byte,
    i16 => Short,
    i32 => Integer,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    NaiveDate => Date,
    NaiveTime => Time,
    DateTime<FixedOffset> => DateTime,
    UnsupportedValue => Unsupported,
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

/// xsd:double lexical form; `finite` is the plain rendering of a finite value
fn format_double(value: f64, finite: &str) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        let text = if value > 0.0 { "INF" } else { "-INF" };
        text.to_string()
    } else {
        finite.to_string()
    }
}

fn parse_double(datatype: &str, lexical: &str) -> Result<f64, DatatypeError> {
    match lexical.trim() {
        "INF" | "+INF" => Ok(f64::INFINITY),
        "-INF" => Ok(f64::NEG_INFINITY),
        "NaN" => Ok(f64::NAN),
        text if text.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') => {
            Err(DatatypeError::invalid(datatype, lexical, "not a number"))
        }
        text => text
            .parse::<f64>()
            .map_err(|e| DatatypeError::invalid(datatype, lexical, e)),
    }
}

/// Bidirectional mapping between one native kind and its datatype
pub trait DatatypeCodec: fmt::Debug + Send + Sync {
    /// Native kind produced by `decode`
    fn kind(&self) -> ValueKind;

    /// Datatype IRI assigned by `encode`
    fn datatype(&self) -> &str;

    fn encode(&self, value: &Value) -> Result<String, DatatypeError>;

    fn decode(&self, lexical: &str) -> Result<Value, DatatypeError>;

    fn mismatch(&self, value: &Value) -> DatatypeError {
        DatatypeError::KindMismatch {
            datatype: self.datatype().to_string(),
            found: value.kind(),
        }
    }
}

#[derive(Debug)]
pub struct StringCodec;

impl DatatypeCodec for StringCodec {
    fn kind(&self) -> ValueKind {
        ValueKind::String
    }

    fn datatype(&self) -> &str {
        XSD_STRING
    }

    fn encode(&self, value: &Value) -> Result<String, DatatypeError> {
        match value {
            Value::String(text) => Ok(text.clone()),
            other => Err(self.mismatch(other)),
        }
    }

    fn decode(&self, lexical: &str) -> Result<Value, DatatypeError> {
        Ok(Value::String(lexical.to_string()))
    }
}

#[derive(Debug)]
pub struct BooleanCodec;

impl DatatypeCodec for BooleanCodec {
    fn kind(&self) -> ValueKind {
        ValueKind::Boolean
    }

    fn datatype(&self) -> &str {
        XSD_BOOLEAN
    }

    fn encode(&self, value: &Value) -> Result<String, DatatypeError> {
        match value {
            Value::Boolean(flag) => Ok(flag.to_string()),
            other => Err(self.mismatch(other)),
        }
    }

    fn decode(&self, lexical: &str) -> Result<Value, DatatypeError> {
        match lexical.trim() {
            "true" | "1" => Ok(Value::Boolean(true)),
            "false" | "0" => Ok(Value::Boolean(false)),
            _ => Err(DatatypeError::invalid(XSD_BOOLEAN, lexical, "expected true, false, 1 or 0")),
        }
    }
}

macro_rules! integral_codec {
    ($name:ident, $ty:ty, $variant:ident, $datatype:expr) => {
        #[derive(Debug)]
        pub struct $name;

        impl DatatypeCodec for $name {
            fn kind(&self) -> ValueKind {
                ValueKind::$variant
            }

            fn datatype(&self) -> &str {
                $datatype
            }

            fn encode(&self, value: &Value) -> Result<String, DatatypeError> {
                match value {
                    Value::$variant(number) => Ok(number.to_string()),
                    other => Err(self.mismatch(other)),
                }
            }

            fn decode(&self, lexical: &str) -> Result<Value, DatatypeError> {
                lexical
                    .trim()
                    .parse::<$ty>()
                    .map(Value::$variant)
                    .map_err(|e| DatatypeError::invalid($datatype, lexical, e))
            }
        }
    };
}

integral_codec!(ByteCodec, i8, Byte, XSD_BYTE);
integral_codec!(ShortCodec, i16, Short, XSD_SHORT);
integral_codec!(IntegerCodec, i32, Integer, XSD_INTEGER);
integral_codec!(LongCodec, i64, Long, XSD_LONG);

#[derive(Debug)]
pub struct FloatCodec;

impl DatatypeCodec for FloatCodec {
    fn kind(&self) -> ValueKind {
        ValueKind::Float
    }

    fn datatype(&self) -> &str {
        XSD_FLOAT
    }

    fn encode(&self, value: &Value) -> Result<String, DatatypeError> {
        match value {
            Value::Float(_) => Ok(value.to_string()),
            other => Err(self.mismatch(other)),
        }
    }

    fn decode(&self, lexical: &str) -> Result<Value, DatatypeError> {
        let parsed = match lexical.trim() {
            "INF" | "+INF" | "-INF" | "NaN" => parse_double(XSD_FLOAT, lexical)? as f32,
            text => {
                parse_double(XSD_FLOAT, text)?;
                text.parse::<f32>()
                    .map_err(|e| DatatypeError::invalid(XSD_FLOAT, lexical, e))?
            }
        };
        Ok(Value::Float(parsed))
    }
}

#[derive(Debug)]
pub struct DoubleCodec;

impl DatatypeCodec for DoubleCodec {
    fn kind(&self) -> ValueKind {
        ValueKind::Double
    }

    fn datatype(&self) -> &str {
        XSD_DOUBLE
    }

    fn encode(&self, value: &Value) -> Result<String, DatatypeError> {
        match value {
            Value::Double(_) => Ok(value.to_string()),
            other => Err(self.mismatch(other)),
        }
    }

    fn decode(&self, lexical: &str) -> Result<Value, DatatypeError> {
        parse_double(XSD_DOUBLE, lexical).map(Value::Double)
    }
}

#[derive(Debug)]
pub struct DateCodec;

impl DatatypeCodec for DateCodec {
    fn kind(&self) -> ValueKind {
        ValueKind::Date
    }

    fn datatype(&self) -> &str {
        XSD_DATE
    }

    fn encode(&self, value: &Value) -> Result<String, DatatypeError> {
        match value {
            Value::Date(_) => Ok(value.to_string()),
            other => Err(self.mismatch(other)),
        }
    }

    fn decode(&self, lexical: &str) -> Result<Value, DatatypeError> {
        NaiveDate::parse_from_str(lexical.trim(), "%Y-%m-%d")
            .map(Value::Date)
            .map_err(|e| DatatypeError::invalid(XSD_DATE, lexical, e))
    }
}

#[derive(Debug)]
pub struct TimeCodec;

impl DatatypeCodec for TimeCodec {
    fn kind(&self) -> ValueKind {
        ValueKind::Time
    }

    fn datatype(&self) -> &str {
        XSD_TIME
    }

    fn encode(&self, value: &Value) -> Result<String, DatatypeError> {
        match value {
            Value::Time(_) => Ok(value.to_string()),
            other => Err(self.mismatch(other)),
        }
    }

    fn decode(&self, lexical: &str) -> Result<Value, DatatypeError> {
        NaiveTime::parse_from_str(lexical.trim(), "%H:%M:%S%.f")
            .map(Value::Time)
            .map_err(|e| DatatypeError::invalid(XSD_TIME, lexical, e))
    }
}

#[derive(Debug)]
pub struct DateTimeCodec;

impl DatatypeCodec for DateTimeCodec {
    fn kind(&self) -> ValueKind {
        ValueKind::DateTime
    }

    fn datatype(&self) -> &str {
        XSD_DATE_TIME
    }

    fn encode(&self, value: &Value) -> Result<String, DatatypeError> {
        match value {
            Value::DateTime(_) => Ok(value.to_string()),
            other => Err(self.mismatch(other)),
        }
    }

    fn decode(&self, lexical: &str) -> Result<Value, DatatypeError> {
        DateTime::parse_from_rfc3339(lexical.trim())
            .map(Value::DateTime)
            .map_err(|e| DatatypeError::invalid(XSD_DATE_TIME, lexical, e))
    }
}

/// Codec for a known datatype without native decoding
#[derive(Debug)]
pub struct UnsupportedCodec {
    datatype: String,
}

impl UnsupportedCodec {
    pub fn new(datatype: impl Into<String>) -> Self {
        Self {
            datatype: datatype.into(),
        }
    }
}

impl DatatypeCodec for UnsupportedCodec {
    fn kind(&self) -> ValueKind {
        ValueKind::Unsupported
    }

    fn datatype(&self) -> &str {
        &self.datatype
    }

    fn encode(&self, value: &Value) -> Result<String, DatatypeError> {
        match value {
            Value::Unsupported(unsupported) => Ok(unsupported.lexical.clone()),
            other => Err(self.mismatch(other)),
        }
    }

    fn decode(&self, lexical: &str) -> Result<Value, DatatypeError> {
        Ok(Value::Unsupported(UnsupportedValue {
            datatype: self.datatype.clone(),
            lexical: lexical.to_string(),
        }))
    }
}

/// Immutable pair of codec tables
#[derive(Clone, Default)]
pub struct DatatypeRegistry {
    by_kind: HashMap<ValueKind, Arc<dyn DatatypeCodec>>,
    by_datatype: HashMap<String, Arc<dyn DatatypeCodec>>,
}

impl fmt::Debug for DatatypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatatypeRegistry")
            .field("kinds", &self.by_kind.len())
            .field("datatypes", &self.by_datatype.len())
            .finish()
    }
}

impl DatatypeRegistry {
    pub fn builder() -> DatatypeRegistryBuilder {
        DatatypeRegistryBuilder::default()
    }

    /// Registry with the XSD, RDF and OWL datatypes
    pub fn standard() -> Self {
        Self::builder().with_standard_codecs().build()
    }

    pub fn codec_for_kind(&self, kind: ValueKind) -> Option<&Arc<dyn DatatypeCodec>> {
        self.by_kind.get(&kind)
    }

    pub fn codec_for_datatype(&self, datatype: &str) -> Option<&Arc<dyn DatatypeCodec>> {
        self.by_datatype.get(datatype)
    }

    pub fn is_registered(&self, datatype: &str) -> bool {
        self.by_datatype.contains_key(datatype)
    }

    /// Encode a native value into `(lexical, datatype)`
    ///
    /// A kind without a codec falls back to its display text typed as
    /// `xsd:string`. Unsupported values come back verbatim.
    pub fn to_literal(&self, value: &Value) -> (String, String) {
        if let Value::Unsupported(unsupported) = value {
            return (unsupported.lexical.clone(), unsupported.datatype.clone());
        }
        match self.by_kind.get(&value.kind()) {
            Some(codec) => match codec.encode(value) {
                Ok(lexical) => (lexical, codec.datatype().to_string()),
                Err(_) => (value.to_string(), XSD_STRING.to_string()),
            },
            None => (value.to_string(), XSD_STRING.to_string()),
        }
    }

    /// Decode a literal into a native value
    ///
    /// An unknown datatype yields the lexical text unchanged. A lexical
    /// form the codec rejects is wrapped as [`Value::Unsupported`].
    pub fn to_native(&self, lexical: &str, datatype: &str) -> Value {
        match self.by_datatype.get(datatype) {
            None => Value::String(lexical.to_string()),
            Some(codec) => codec.decode(lexical).unwrap_or_else(|error| {
                tracing::debug!("Keeping literal undecoded: {}", error);
                Value::Unsupported(UnsupportedValue {
                    datatype: datatype.to_string(),
                    lexical: lexical.to_string(),
                })
            }),
        }
    }

    /// Lexical form of `value` for a literal typed `datatype`
    ///
    /// Uses the codec of `datatype` when it accepts the value, otherwise
    /// the value's own lexical form.
    pub fn encode_as(&self, value: &Value, datatype: &str) -> String {
        if let Some(codec) = self.by_datatype.get(datatype) {
            if let Ok(lexical) = codec.encode(value) {
                return lexical;
            }
        }
        self.to_literal(value).0
    }

    pub fn datatypes(&self) -> impl Iterator<Item = &str> {
        self.by_datatype.keys().map(String::as_str)
    }
}

/// Mutable stage of a [`DatatypeRegistry`]
#[derive(Default)]
pub struct DatatypeRegistryBuilder {
    registry: DatatypeRegistry,
}

impl DatatypeRegistryBuilder {
    /// Register a codec for its kind and its own datatype
    pub fn codec(mut self, codec: Arc<dyn DatatypeCodec>) -> Self {
        self.registry
            .by_datatype
            .insert(codec.datatype().to_string(), Arc::clone(&codec));
        if codec.kind() != ValueKind::Unsupported {
            self.registry.by_kind.insert(codec.kind(), codec);
        }
        self
    }

    /// Register a codec for an additional datatype only
    pub fn alias(mut self, datatype: &str, codec: Arc<dyn DatatypeCodec>) -> Self {
        self.registry.by_datatype.insert(datatype.to_string(), codec);
        self
    }

    pub fn unsupported(self, datatype: &str) -> Self {
        self.alias(datatype, Arc::new(UnsupportedCodec::new(datatype)))
    }

    pub fn with_standard_codecs(self) -> Self {
        let string: Arc<dyn DatatypeCodec> = Arc::new(StringCodec);
        let byte: Arc<dyn DatatypeCodec> = Arc::new(ByteCodec);
        let short: Arc<dyn DatatypeCodec> = Arc::new(ShortCodec);
        let integer: Arc<dyn DatatypeCodec> = Arc::new(IntegerCodec);
        let long: Arc<dyn DatatypeCodec> = Arc::new(LongCodec);
        let double: Arc<dyn DatatypeCodec> = Arc::new(DoubleCodec);
        let date_time: Arc<dyn DatatypeCodec> = Arc::new(DateTimeCodec);

        let mut builder = self
            .codec(Arc::clone(&string))
            .codec(Arc::new(BooleanCodec))
            .codec(Arc::clone(&byte))
            .codec(Arc::clone(&short))
            .codec(Arc::clone(&integer))
            .codec(Arc::clone(&long))
            .codec(Arc::new(FloatCodec))
            .codec(Arc::clone(&double))
            .codec(Arc::new(DateCodec))
            .codec(Arc::new(TimeCodec))
            .codec(Arc::clone(&date_time))
            .alias(RDF_PLAIN_LITERAL, string)
            .alias(XSD_DECIMAL, Arc::clone(&double))
            .alias(OWL_RATIONAL, Arc::clone(&double))
            .alias(OWL_REAL, double)
            .alias(XSD_DATE_TIME_STAMP, date_time)
            .alias(XSD_UNSIGNED_BYTE, byte)
            .alias(XSD_UNSIGNED_SHORT, short)
            .alias(XSD_UNSIGNED_LONG, long);

        for datatype in [
            XSD_INT,
            XSD_UNSIGNED_INT,
            XSD_POSITIVE_INTEGER,
            XSD_NON_NEGATIVE_INTEGER,
            XSD_NEGATIVE_INTEGER,
            XSD_NON_POSITIVE_INTEGER,
        ] {
            builder = builder.alias(datatype, Arc::clone(&integer));
        }
        for datatype in UNSUPPORTED_DATATYPES {
            builder = builder.unsupported(datatype);
        }
        builder
    }

    pub fn build(self) -> DatatypeRegistry {
        self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_kinds_use_canonical_datatypes() {
        let registry = DatatypeRegistry::standard();
        assert_eq!(registry.to_literal(&Value::from(42)), ("42".to_string(), XSD_INTEGER.to_string()));
        assert_eq!(registry.to_literal(&Value::from(42i64)), ("42".to_string(), XSD_LONG.to_string()));
        assert_eq!(registry.to_literal(&Value::from(true)), ("true".to_string(), XSD_BOOLEAN.to_string()));
        assert_eq!(registry.to_literal(&Value::from("x")), ("x".to_string(), XSD_STRING.to_string()));
    }

    #[test]
    fn test_integer_family_decodes_to_integer() {
        let registry = DatatypeRegistry::standard();
        assert_eq!(registry.to_native("7", XSD_INT), Value::Integer(7));
        assert_eq!(registry.to_native("+7", XSD_POSITIVE_INTEGER), Value::Integer(7));
        assert_eq!(registry.to_native(" -3 ", XSD_NEGATIVE_INTEGER), Value::Integer(-3));
        assert_eq!(registry.to_native("12", XSD_UNSIGNED_LONG), Value::Long(12));
    }

    #[test]
    fn test_decimal_and_owl_real_decode_to_double() {
        let registry = DatatypeRegistry::standard();
        assert_eq!(registry.to_native("1.5", XSD_DECIMAL), Value::Double(1.5));
        assert_eq!(registry.to_native("2", OWL_REAL), Value::Double(2.0));
    }

    #[test]
    fn test_special_doubles() {
        let registry = DatatypeRegistry::standard();
        assert_eq!(registry.to_native("INF", XSD_DOUBLE), Value::Double(f64::INFINITY));
        assert_eq!(registry.to_native("-INF", XSD_DOUBLE), Value::Double(f64::NEG_INFINITY));
        assert_eq!(registry.to_literal(&Value::Double(f64::NEG_INFINITY)).0, "-INF");
        match registry.to_native("NaN", XSD_DOUBLE) {
            Value::Double(value) => assert!(value.is_nan()),
            other => panic!("expected NaN, got {:?}", other),
        }
        assert!(matches!(registry.to_native("inf", XSD_DOUBLE), Value::Unsupported(_)));
    }

    #[test]
    fn test_unknown_datatype_returns_lexical() {
        let registry = DatatypeRegistry::standard();
        assert_eq!(
            registry.to_native("abc", "http://example.org/custom"),
            Value::String("abc".to_string())
        );
    }

    #[test]
    fn test_unsupported_datatype_round_trips() {
        let registry = DatatypeRegistry::standard();
        let value = registry.to_native("2024", XSD_G_YEAR);
        assert_eq!(
            value,
            Value::Unsupported(UnsupportedValue {
                datatype: XSD_G_YEAR.to_string(),
                lexical: "2024".to_string()
            })
        );
        assert_eq!(registry.to_literal(&value), ("2024".to_string(), XSD_G_YEAR.to_string()));
    }

    #[test]
    fn test_invalid_lexical_is_kept_verbatim() {
        let registry = DatatypeRegistry::standard();
        let value = registry.to_native("twelve", XSD_INTEGER);
        assert_eq!(registry.to_literal(&value), ("twelve".to_string(), XSD_INTEGER.to_string()));
    }

    #[test]
    fn test_empty_registry_falls_back_to_string() {
        let registry = DatatypeRegistry::builder().build();
        assert_eq!(registry.to_literal(&Value::from(5)), ("5".to_string(), XSD_STRING.to_string()));
        assert_eq!(registry.to_native("5", XSD_INTEGER), Value::String("5".to_string()));
    }

    #[test]
    fn test_encode_as_range_datatype() {
        let registry = DatatypeRegistry::standard();
        assert_eq!(registry.encode_as(&Value::from(5), XSD_INTEGER), "5");
        assert_eq!(registry.encode_as(&Value::from(5), XSD_LONG), "5");
        assert_eq!(registry.encode_as(&Value::from("a"), "http://example.org/dt"), "a");
    }

    #[test]
    fn test_temporal_round_trips() {
        let registry = DatatypeRegistry::standard();
        for (lexical, datatype) in [
            ("2021-03-04", XSD_DATE),
            ("10:20:30", XSD_TIME),
            ("10:20:30.250", XSD_TIME),
            ("2021-03-04T10:20:30Z", XSD_DATE_TIME),
            ("2021-03-04T10:20:30+02:00", XSD_DATE_TIME),
        ] {
            let value = registry.to_native(lexical, datatype);
            assert!(!matches!(value, Value::Unsupported(_)), "{} did not decode", lexical);
            assert_eq!(registry.to_literal(&value).0, lexical);
        }
    }

    #[test]
    fn test_boolean_lexical_forms() {
        let registry = DatatypeRegistry::standard();
        assert_eq!(registry.to_native("1", XSD_BOOLEAN), Value::Boolean(true));
        assert_eq!(registry.to_native("false", XSD_BOOLEAN), Value::Boolean(false));
        assert!(matches!(registry.to_native("yes", XSD_BOOLEAN), Value::Unsupported(_)));
    }
}
