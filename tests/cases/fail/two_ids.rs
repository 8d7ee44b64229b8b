// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use mongo_odm::{Model, ObjectId};

#[derive(Model)]
#[entity(collection = "pairs")]
pub struct Pair {
    #[id]
    pub left: Option<ObjectId>,

    #[id]
    pub right: Option<ObjectId>
}

fn main() {}
