// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use mongo_odm::{FieldKind, prelude::*};

#[derive(Model, Debug, Default)]
#[entity]
pub struct Wallet {
    #[field(options(index = "unique", sparse))]
    pub owner: String,

    #[field(type = "money")]
    pub balance: Value,

    #[field(type = "double")]
    pub rate: f32,

    #[field]
    pub tags: Vec<Value>,
}

fn main() {
    let schema = <Wallet as mongo_odm::Model>::schema();
    let owner = schema.fields[0].descriptor.unwrap();
    assert_eq!(owner.option("index"), Some("unique"));
    assert_eq!(owner.option("sparse"), Some("true"));
    assert_eq!(schema.fields[1].descriptor.unwrap().kind, FieldKind::Other("money"));
    assert_eq!(schema.fields[2].descriptor.unwrap().kind, FieldKind::Float);
    assert_eq!(schema.fields[3].descriptor.unwrap().kind, FieldKind::Array);

    let wallet = Converter::new()
        .document_to_entity::<Wallet>(document! { "balance" => "12.50", "tags" => "vip" })
        .unwrap()
        .entity()
        .unwrap();
    assert_eq!(wallet.balance, Value::from("12.50"));
    assert_eq!(wallet.tags, vec![Value::from("vip")]);
}
