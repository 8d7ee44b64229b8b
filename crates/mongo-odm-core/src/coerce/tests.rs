// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Tests for per-kind coercion.
//!
//! Scalar rules are checked case by case; the idempotence of
//! `to_field(to_document(v))` is checked with proptest for every kind that
//! does not generate or pass through values.

use chrono::{Local, TimeZone, Utc};
use proptest::prelude::*;

use super::*;
use crate::{document, fixtures::Customer, model::EntityObject};

/// Builds zero-valued targets and empty documents.
struct Shallow;

impl Embedder for Shallow {
    fn hydrate(
        &self,
        target: EntityRef,
        _document: Document
    ) -> Result<Box<dyn EntityObject>, ConvertError> {
        Ok(target.instantiate())
    }

    fn dehydrate(&self, _entity: &dyn EntityObject) -> Result<Document, ConvertError> {
        Ok(Document::new())
    }
}

fn desc(kind: FieldKind) -> FieldDescriptor {
    FieldDescriptor::new(kind)
}

fn field(value: Value, kind: FieldKind) -> Result<FieldValue, CoerceError> {
    to_field(value, &desc(kind), &Shallow)
}

#[test]
fn null_reads_as_zero_value() {
    assert!(matches!(field(Value::Null, FieldKind::String), Ok(FieldValue::String(ref s)) if s.is_empty()));
    assert!(matches!(field(Value::Null, FieldKind::Bool), Ok(FieldValue::Bool(false))));
    assert!(matches!(field(Value::Null, FieldKind::Int), Ok(FieldValue::Int(0))));
    assert!(matches!(field(Value::Null, FieldKind::Float), Ok(FieldValue::Float(f)) if f == 0.0));
    assert!(matches!(field(Value::Null, FieldKind::Array), Ok(FieldValue::Array(ref a)) if a.is_empty()));

    let many = FieldDescriptor::embed_many(EntityRef::of::<Customer>());
    assert!(matches!(
        to_field(Value::Null, &many, &Shallow),
        Ok(FieldValue::Many(ref items)) if items.is_empty()
    ));

    for kind in [FieldKind::Date, FieldKind::Identifier, FieldKind::Raw] {
        assert!(matches!(field(Value::Null, kind), Ok(FieldValue::Null)), "{kind}");
    }
}

#[test]
fn null_writes_as_zero_value() {
    let write = |kind| to_document(FieldRef::Null, &desc(kind), &Shallow).unwrap();
    assert_eq!(write(FieldKind::String), Value::from(""));
    assert_eq!(write(FieldKind::Bool), Value::Bool(false));
    assert_eq!(write(FieldKind::Int), Value::Int(0));
    assert_eq!(write(FieldKind::Float), Value::Float(0.0));
    assert_eq!(write(FieldKind::Array), Value::Array(Vec::new()));
    assert_eq!(write(FieldKind::Date), Value::Null);
    assert_eq!(write(FieldKind::Raw), Value::Null);

    let many = FieldDescriptor::embed_many(EntityRef::of::<Customer>());
    assert_eq!(to_document(FieldRef::Null, &many, &Shallow).unwrap(), Value::Array(Vec::new()));
}

#[test]
fn numeric_text_becomes_int() {
    assert!(matches!(field(Value::from("34"), FieldKind::Int), Ok(FieldValue::Int(34))));
    assert!(matches!(field(Value::from(" -7 "), FieldKind::Int), Ok(FieldValue::Int(-7))));
    assert!(matches!(field(Value::from("3.9"), FieldKind::Int), Ok(FieldValue::Int(3))));
    assert!(matches!(field(Value::from(""), FieldKind::Int), Ok(FieldValue::Int(0))));
}

#[test]
fn int_rejects_garbage() {
    let err = field(Value::from("thirty"), FieldKind::Int).unwrap_err();
    assert!(matches!(err, CoerceError::Invalid {
        expected: FieldKind::Int,
        found: "string",
        ..
    }));
    assert!(field(Value::Float(f64::NAN), FieldKind::Int).is_err());
    assert!(field(Value::Float(1e300), FieldKind::Int).is_err());
    assert!(field(Value::from(vec![1]), FieldKind::Int).is_err());
}

#[test]
fn float_truncates_toward_zero() {
    assert_eq!(to_int(&Value::Float(-2.7)).unwrap(), -2);
    assert_eq!(to_int(&Value::Float(2.7)).unwrap(), 2);
    assert_eq!(to_int(&Value::Bool(true)).unwrap(), 1);
}

#[test]
fn float_coercion() {
    assert_eq!(to_float(&Value::Int(3)).unwrap(), 3.0);
    assert_eq!(to_float(&Value::from("2.5")).unwrap(), 2.5);
    assert!(to_float(&Value::from("x")).is_err());
    assert!(to_float(&Value::Document(Document::new())).is_err());
}

#[test]
fn bool_words() {
    for word in ["true", "TRUE", "1", "yes", "on"] {
        assert!(to_bool(&Value::from(word)).unwrap(), "{word}");
    }
    for word in ["false", "0", "no", "off", ""] {
        assert!(!to_bool(&Value::from(word)).unwrap(), "{word}");
    }
    assert!(to_bool(&Value::from("maybe")).is_err());
    assert!(to_bool(&Value::Int(2)).unwrap());
    assert!(to_bool(&Value::Float(f64::NAN)).is_err());
}

#[test]
fn stringify_never_fails() {
    assert_eq!(stringify(&Value::Null), "");
    assert_eq!(stringify(&Value::Int(34)), "34");
    assert_eq!(stringify(&Value::Bool(true)), "true");
    assert_eq!(stringify(&Value::Float(1.5)), "1.5");
    assert_eq!(stringify(&Value::from(vec![1, 2])), "[1,2]");
    assert_eq!(stringify(&Value::from(document! { "a" => 1 })), "{\"a\":1}");

    let id = ObjectId::from_bytes([0xaa; 12]);
    assert_eq!(stringify(&Value::ObjectId(id)), "aaaaaaaaaaaaaaaaaaaaaaaa");

    let dt = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
    assert_eq!(stringify(&Value::DateTime(dt)), "2024-01-02T03:04:05.000Z");
}

#[test]
fn array_wraps_scalars() {
    assert_eq!(to_array(Value::Int(1)), vec![Value::Int(1)]);
    assert_eq!(to_array(Value::from(vec![1, 2])), vec![Value::Int(1), Value::Int(2)]);
    assert!(to_array(Value::Null).is_empty());
}

#[test]
fn date_sources() {
    let dt = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
    assert_eq!(to_date(&Value::DateTime(dt)).unwrap(), dt);
    assert_eq!(to_date(&Value::Int(dt.timestamp_millis())).unwrap(), dt);
    assert_eq!(to_date(&Value::from("2024-01-02T03:04:05Z")).unwrap(), dt);
    assert!(to_date(&Value::from("yesterday")).is_err());
    assert!(to_date(&Value::Bool(true)).is_err());
}

#[test]
fn date_field_is_local() {
    let dt = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
    match field(Value::DateTime(dt), FieldKind::Date).unwrap() {
        FieldValue::Date(local) => assert_eq!(local, dt.with_timezone(&Local)),
        other => panic!("unexpected {other:?}")
    }
}

#[test]
fn identifier_from_hex_text() {
    let id = ObjectId::new();
    assert!(matches!(
        field(Value::from(id.to_hex()), FieldKind::Identifier),
        Ok(FieldValue::Id(parsed)) if parsed == id
    ));
    assert!(field(Value::from("xyz"), FieldKind::Identifier).is_err());
    assert!(field(Value::Int(5), FieldKind::Identifier).is_err());
}

#[test]
fn null_identifier_is_generated() {
    let value = to_document(FieldRef::Null, &FieldDescriptor::identifier(), &Shallow).unwrap();
    assert!(matches!(value, Value::ObjectId(_)));

    let secondary = to_document(FieldRef::Null, &desc(FieldKind::Identifier), &Shallow).unwrap();
    assert!(matches!(secondary, Value::ObjectId(_)));
}

#[test]
fn non_identifier_value_is_replaced() {
    let id = ObjectId::new();
    let hex = id.to_hex();
    let written =
        to_document(FieldRef::String(&hex), &desc(FieldKind::Identifier), &Shallow).unwrap();
    assert!(matches!(written, Value::ObjectId(fresh) if fresh != id));

    let written = to_document(FieldRef::Int(5), &desc(FieldKind::Identifier), &Shallow).unwrap();
    assert!(matches!(written, Value::ObjectId(_)));
}

#[test]
fn existing_identifier_is_kept() {
    let id = ObjectId::new();
    let value = to_document(FieldRef::Id(id), &FieldDescriptor::identifier(), &Shallow).unwrap();
    assert_eq!(value, Value::ObjectId(id));
}

#[test]
fn raw_is_identity() {
    let doc = Value::from(document! { "nested" => true });
    assert!(matches!(
        field(doc.clone(), FieldKind::Raw),
        Ok(FieldValue::Raw(ref v)) if *v == doc
    ));
    assert_eq!(to_document(FieldRef::Raw(&doc), &desc(FieldKind::Raw), &Shallow).unwrap(), doc);
    assert!(matches!(
        field(Value::Int(1), FieldKind::Other("money")),
        Ok(FieldValue::Raw(Value::Int(1)))
    ));
}

#[test]
fn embed_one_needs_document() {
    let descriptor = FieldDescriptor::embed_one(EntityRef::of::<Customer>());
    assert!(matches!(
        to_field(Value::from(document! {}), &descriptor, &Shallow),
        Ok(FieldValue::One(_))
    ));
    assert!(to_field(Value::from("Ann"), &descriptor, &Shallow).is_err());
}

#[test]
fn embed_many_needs_array_of_documents() {
    let descriptor = FieldDescriptor::embed_many(EntityRef::of::<Customer>());
    let ok = to_field(
        Value::from(vec![document! {}, document! {}]),
        &descriptor,
        &Shallow
    )
    .unwrap();
    assert!(matches!(ok, FieldValue::Many(ref items) if items.len() == 2));

    assert!(to_field(Value::from(document! {}), &descriptor, &Shallow).is_err());
    assert!(to_field(Value::from(vec![1]), &descriptor, &Shallow).is_err());
}

#[test]
fn embed_without_target_is_reported() {
    let err = field(Value::from(document! {}), FieldKind::EmbedOne).unwrap_err();
    assert!(matches!(err, CoerceError::MissingTarget(FieldKind::EmbedOne)));
}

#[test]
fn entity_in_scalar_field_is_rejected() {
    let customer = Customer::default();
    let err = to_document(FieldRef::One(&customer), &desc(FieldKind::String), &Shallow);
    assert!(err.is_err());
}

#[test]
fn writing_coerces_declared_kind() {
    let value = to_document(FieldRef::String("42"), &desc(FieldKind::Int), &Shallow).unwrap();
    assert_eq!(value, Value::Int(42));
    let value = to_document(FieldRef::Int(7), &desc(FieldKind::String), &Shallow).unwrap();
    assert_eq!(value, Value::from("7"));
}

fn round_trip(value: FieldValue, kind: FieldKind) -> Value {
    let before = value.into_value().unwrap();
    let field_ref = match &before {
        Value::Null => FieldRef::Null,
        Value::Bool(b) => FieldRef::Bool(*b),
        Value::Int(i) => FieldRef::Int(*i),
        Value::Float(f) => FieldRef::Float(*f),
        Value::String(s) => FieldRef::String(s),
        Value::Array(items) => FieldRef::Array(items),
        Value::DateTime(dt) => FieldRef::Date(dt.with_timezone(&Local)),
        other => FieldRef::Raw(other)
    };
    let stored = to_document(field_ref, &desc(kind), &Shallow).unwrap();
    to_field(stored, &desc(kind), &Shallow)
        .unwrap()
        .into_value()
        .unwrap()
}

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        any::<f64>()
            .prop_filter("finite", |f| f.is_finite())
            .prop_map(Value::Float),
        ".*".prop_map(Value::String),
    ]
}

proptest! {
    #[test]
    fn string_round_trip(s in ".*") {
        let back = round_trip(FieldValue::String(s.clone()), FieldKind::String);
        prop_assert_eq!(back, Value::String(s));
    }

    #[test]
    fn int_round_trip(i in any::<i64>()) {
        prop_assert_eq!(round_trip(FieldValue::Int(i), FieldKind::Int), Value::Int(i));
    }

    #[test]
    fn float_round_trip(f in any::<f64>().prop_filter("finite", |f| f.is_finite())) {
        prop_assert_eq!(round_trip(FieldValue::Float(f), FieldKind::Float), Value::Float(f));
    }

    #[test]
    fn bool_round_trip(b in any::<bool>()) {
        prop_assert_eq!(round_trip(FieldValue::Bool(b), FieldKind::Bool), Value::Bool(b));
    }

    #[test]
    fn array_round_trip(items in prop::collection::vec(scalar(), 0..8)) {
        let back = round_trip(FieldValue::Array(items.clone()), FieldKind::Array);
        prop_assert_eq!(back, Value::Array(items));
    }

    #[test]
    fn date_round_trip(ms in -62_000_000_000_000i64..250_000_000_000_000i64) {
        let dt = Utc.timestamp_millis_opt(ms).unwrap();
        let back = round_trip(FieldValue::Date(dt.with_timezone(&Local)), FieldKind::Date);
        prop_assert_eq!(back, Value::DateTime(dt));
    }

    #[test]
    fn stringify_is_total(value in scalar()) {
        let _ = stringify(&value);
    }
}
