// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use mongo_odm::Model;

#[derive(Model)]
#[entity(collection = "scores")]
pub struct Score {
    #[field]
    pub total: u64
}

fn main() {}
