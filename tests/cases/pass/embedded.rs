// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use mongo_odm::prelude::*;

#[derive(Model, Debug, Default, Clone, PartialEq)]
#[entity(embedded)]
pub struct Address {
    #[field]
    pub city: String,
}

#[derive(Model, Debug, Default, Clone, PartialEq)]
#[entity(embedded)]
pub struct Line {
    #[field]
    pub sku: String,

    #[field]
    pub qty: u32,
}

#[derive(Model, Debug, Default, PartialEq)]
#[entity(collection = "orders")]
pub struct Order {
    #[id]
    pub id: Option<ObjectId>,

    #[embed_one]
    pub shipping: Address,

    #[embed_one(name = "bill")]
    pub billing: Option<Address>,

    #[embed_many]
    pub lines: Vec<Line>,
}

fn main() {
    let order = Order {
        id: Some(ObjectId::new()),
        shipping: Address { city: "Oslo".into() },
        billing: None,
        lines: vec![
            Line { sku: "b".into(), qty: 2 },
            Line { sku: "a".into(), qty: 1 },
        ],
    };
    let converter = Converter::new();
    let doc = converter.entity_to_document(&order).unwrap().document().unwrap();
    assert!(doc.get("shipping").and_then(Value::as_document).is_some());
    assert_eq!(doc.get("bill"), Some(&Value::Null));

    let back = converter
        .document_to_entity::<Order>(doc)
        .unwrap()
        .entity()
        .unwrap();
    assert_eq!(back, order);
}
