// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Conversion properties checked with proptest.
//!
//! | Property | Test |
//! |----------|------|
//! | Scalar kinds survive a round trip | `scalars_round_trip` |
//! | embedMany keeps element order | `embed_many_keeps_order` |
//! | `set_id` then `get_id` returns the id | `set_id_round_trip` |
//! | Documents pass through untouched | `documents_pass_through` |

use chrono::{DateTime, TimeZone, Utc};
use mongo_odm::prelude::*;
use proptest::prelude::*;

#[derive(Model, Debug, Default, Clone, PartialEq)]
#[entity]
pub struct Sample {
    #[id]
    pub id: Option<ObjectId>,

    #[field]
    pub text: String,

    #[field]
    pub count: i64,

    #[field]
    pub small: i16,

    #[field]
    pub ratio: f64,

    #[field]
    pub flag: bool,

    #[field]
    pub at: Option<DateTime<Utc>>,

    #[field]
    pub items: Vec<Value>,

    #[field]
    pub extra: Value
}

#[derive(Model, Debug, Default, Clone, PartialEq)]
#[entity(embedded)]
pub struct Step {
    #[field]
    pub label: String,

    #[field]
    pub rank: i32
}

#[derive(Model, Debug, Default, Clone, PartialEq)]
#[entity]
pub struct Plan {
    #[id]
    pub id: Option<ObjectId>,

    #[embed_many]
    pub steps: Vec<Step>
}

fn object_id() -> impl Strategy<Value = ObjectId> {
    any::<[u8; 12]>().prop_map(ObjectId::from_bytes)
}

fn scalar_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        ".{0,12}".prop_map(Value::String),
        object_id().prop_map(Value::ObjectId),
    ]
}

fn sample() -> impl Strategy<Value = Sample> {
    (
        object_id(),
        ".{0,24}",
        any::<i64>(),
        any::<i16>(),
        -1.0e12f64..1.0e12,
        any::<bool>(),
        proptest::option::of(-2_000_000_000_000i64..4_000_000_000_000),
        proptest::collection::vec(scalar_value(), 0..6),
        scalar_value()
    )
        .prop_map(|(id, text, count, small, ratio, flag, at, items, extra)| Sample {
            id: Some(id),
            text,
            count,
            small,
            ratio,
            flag,
            at: at.and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
            items,
            extra
        })
}

proptest! {
    #[test]
    fn scalars_round_trip(original in sample()) {
        let converter = Converter::new();
        let doc = converter.entity_to_document(&original).unwrap().document().unwrap();
        let back = converter
            .document_to_entity::<Sample>(doc)
            .unwrap()
            .entity()
            .unwrap();
        prop_assert_eq!(back, original);
    }

    #[test]
    fn embed_many_keeps_order(labels in proptest::collection::vec("[a-z]{1,8}", 0..12)) {
        let plan = Plan {
            id: None,
            steps: labels
                .iter()
                .enumerate()
                .map(|(rank, label)| Step {
                    label: label.clone(),
                    rank: rank as i32
                })
                .collect()
        };
        let converter = Converter::new();
        let doc = converter.entity_to_document(&plan).unwrap().document().unwrap();
        let back = converter
            .document_to_entity::<Plan>(doc)
            .unwrap()
            .entity()
            .unwrap();
        let order: Vec<&str> = back.steps.iter().map(|s| s.label.as_str()).collect();
        prop_assert_eq!(order, labels.iter().map(String::as_str).collect::<Vec<_>>());
        prop_assert!(back.id.is_some());
    }

    #[test]
    fn set_id_round_trip(id in object_id()) {
        let converter = Converter::new();
        let mut plan = Plan::default();
        prop_assert!(converter.set_id(&mut plan, id).unwrap());
        prop_assert_eq!(converter.get_id(&plan).unwrap(), Some(id));
    }

    #[test]
    fn documents_pass_through(pairs in proptest::collection::vec(("[a-z]{1,6}", scalar_value()), 0..8)) {
        let mut doc = Document::new();
        for (key, value) in pairs {
            doc.insert(key, value);
        }
        let converter = Converter::new();
        let hydrated = converter.document_to_entity::<Document>(doc.clone()).unwrap();
        prop_assert_eq!(hydrated.into_document(), Some(doc.clone()));
        let dehydrated = converter.entity_to_document(&doc).unwrap();
        prop_assert_eq!(dehydrated.unmapped(), Some(&doc));
    }
}
