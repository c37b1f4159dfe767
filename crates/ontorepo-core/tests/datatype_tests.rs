use chrono::{NaiveDate, NaiveTime};
use ontorepo_core::datatypes::{DatatypeRegistry, Value};
use ontorepo_core::vocabulary::*;
use proptest::prelude::*;

fn round_trip(registry: &DatatypeRegistry, value: &Value) -> Value {
    let (lexical, datatype) = registry.to_literal(value);
    registry.to_native(&lexical, &datatype)
}

proptest! {
    #[test]
    fn prop_integers_round_trip(v in any::<i32>()) {
        let registry = DatatypeRegistry::standard();
        prop_assert_eq!(round_trip(&registry, &Value::Integer(v)), Value::Integer(v));
    }

    #[test]
    fn prop_longs_round_trip(v in any::<i64>()) {
        let registry = DatatypeRegistry::standard();
        prop_assert_eq!(round_trip(&registry, &Value::Long(v)), Value::Long(v));
    }

    #[test]
    fn prop_small_integrals_round_trip(b in any::<i8>(), s in any::<i16>()) {
        let registry = DatatypeRegistry::standard();
        prop_assert_eq!(round_trip(&registry, &Value::Byte(b)), Value::Byte(b));
        prop_assert_eq!(round_trip(&registry, &Value::Short(s)), Value::Short(s));
    }

    #[test]
    fn prop_booleans_round_trip(v in any::<bool>()) {
        let registry = DatatypeRegistry::standard();
        prop_assert_eq!(round_trip(&registry, &Value::Boolean(v)), Value::Boolean(v));
    }

    #[test]
    fn prop_strings_round_trip(v in ".*") {
        let registry = DatatypeRegistry::standard();
        prop_assert_eq!(round_trip(&registry, &Value::String(v.clone())), Value::String(v));
    }

    #[test]
    fn prop_doubles_round_trip(v in any::<f64>().prop_filter("NaN is not equal to itself", |v| !v.is_nan())) {
        let registry = DatatypeRegistry::standard();
        prop_assert_eq!(round_trip(&registry, &Value::Double(v)), Value::Double(v));
    }

    #[test]
    fn prop_floats_round_trip(v in any::<f32>().prop_filter("NaN is not equal to itself", |v| !v.is_nan())) {
        let registry = DatatypeRegistry::standard();
        prop_assert_eq!(round_trip(&registry, &Value::Float(v)), Value::Float(v));
    }

    #[test]
    fn prop_dates_round_trip(days in 0i64..200_000) {
        let registry = DatatypeRegistry::standard();
        let date = NaiveDate::from_ymd_opt(1700, 1, 1).unwrap() + chrono::Duration::days(days);
        prop_assert_eq!(round_trip(&registry, &Value::Date(date)), Value::Date(date));
    }

    #[test]
    fn prop_times_round_trip(seconds in 0u32..86_400, millis in 0u32..1000) {
        let registry = DatatypeRegistry::standard();
        let time = NaiveTime::from_num_seconds_from_midnight_opt(seconds, millis * 1_000_000).unwrap();
        prop_assert_eq!(round_trip(&registry, &Value::Time(time)), Value::Time(time));
    }

    #[test]
    fn prop_unregistered_datatype_keeps_lexical(lexical in "[a-zA-Z0-9 ]{0,12}") {
        let registry = DatatypeRegistry::standard();
        let value = registry.to_native(&lexical, "http://example.org/datatype#custom");
        prop_assert_eq!(value, Value::String(lexical));
    }

    #[test]
    fn prop_unsupported_datatype_is_lossless(lexical in "[a-zA-Z0-9:+-]{0,12}") {
        let registry = DatatypeRegistry::standard();
        for datatype in UNSUPPORTED_DATATYPES {
            let value = registry.to_native(&lexical, datatype);
            let (back, back_datatype) = registry.to_literal(&value);
            prop_assert_eq!(&back, &lexical);
            prop_assert_eq!(back_datatype.as_str(), *datatype);
        }
    }
}

#[test]
fn test_every_alias_is_registered() {
    let registry = DatatypeRegistry::standard();
    for datatype in [
        XSD_STRING, RDF_PLAIN_LITERAL, XSD_BOOLEAN, XSD_DECIMAL, XSD_DOUBLE, XSD_FLOAT, XSD_INTEGER,
        XSD_INT, XSD_LONG, XSD_SHORT, XSD_BYTE, XSD_UNSIGNED_BYTE, XSD_UNSIGNED_SHORT,
        XSD_UNSIGNED_INT, XSD_UNSIGNED_LONG, XSD_POSITIVE_INTEGER, XSD_NON_NEGATIVE_INTEGER,
        XSD_NEGATIVE_INTEGER, XSD_NON_POSITIVE_INTEGER, XSD_DATE, XSD_TIME, XSD_DATE_TIME,
        XSD_DATE_TIME_STAMP, OWL_REAL, OWL_RATIONAL,
    ] {
        assert!(registry.is_registered(datatype), "{} missing", datatype);
    }
}
