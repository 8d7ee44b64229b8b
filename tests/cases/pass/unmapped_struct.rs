// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use mongo_odm::prelude::*;

#[derive(Model, Debug, Default)]
pub struct Envelope {
    pub _id: Option<ObjectId>,
    pub body: String,
}

fn main() {
    let converter = Converter::new();
    let id = ObjectId::new();
    let envelope = Envelope {
        _id: Some(id),
        body: "hi".into(),
    };

    assert!(!<Envelope as mongo_odm::Model>::schema().entity);
    assert!(converter.entity_to_document(&envelope).unwrap().unmapped().is_some());
    assert!(!converter
        .document_to_entity::<Envelope>(document! { "body" => "x" })
        .unwrap()
        .is_entity());
    assert_eq!(converter.get_id(&envelope).unwrap(), Some(id));
}
