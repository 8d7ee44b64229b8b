// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use chrono::{DateTime, Utc};
use mongo_odm::prelude::*;

#[derive(Model, Debug, Default, PartialEq)]
#[entity(collection = "people", database = "crm")]
pub struct Person {
    #[id]
    pub id: Option<ObjectId>,

    #[field]
    pub name: String,

    #[field]
    pub age: i32,

    #[field]
    pub active: bool,

    #[field]
    pub born: Option<DateTime<Utc>>,

    pub scratch: String,
}

fn main() {
    let schema = <Person as mongo_odm::Model>::schema();
    assert!(schema.entity);
    assert_eq!(schema.name, "Person");
    assert_eq!(schema.collection, Some("people"));
    assert_eq!(schema.database, Some("crm"));
    assert_eq!(schema.fields.len(), 6);
    assert!(schema.fields[5].descriptor.is_none());

    let converter = Converter::new();
    let person = converter
        .document_to_entity::<Person>(document! { "name" => "Bo", "age" => "34", "active" => "yes" })
        .unwrap()
        .entity()
        .unwrap();
    assert_eq!(person.age, 34);
    assert!(person.active);

    let doc = converter.entity_to_document(&person).unwrap().document().unwrap();
    assert!(doc.contains_key("_id"));
    assert!(!doc.contains_key("scratch"));
}
