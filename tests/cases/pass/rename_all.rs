// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use mongo_odm::prelude::*;

#[derive(Model, Debug, Default)]
#[entity(rename_all = "camelCase")]
pub struct Account {
    #[id]
    pub id: Option<ObjectId>,

    #[field]
    pub display_name: String,

    #[field(name = "mail")]
    pub email_address: String,

    #[field(type = "string")]
    pub r#type: String,
}

fn main() {
    let account = Account {
        display_name: "Bo".into(),
        email_address: "bo@example.com".into(),
        r#type: "admin".into(),
        ..Account::default()
    };
    let doc = Converter::new()
        .entity_to_document(&account)
        .unwrap()
        .document()
        .unwrap();
    let keys: Vec<&str> = doc.keys().collect();
    assert_eq!(keys, ["_id", "displayName", "mail", "type"]);
}
