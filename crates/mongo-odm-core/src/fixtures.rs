// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Hand-written models shared by unit tests.
//!
//! These implement the traits the way `#[derive(Model)]` output does, so
//! the core crate can be tested without the macro.

use chrono::{DateTime, Utc};

use crate::{
    descriptor::{EntityRef, EntitySchema, FieldDecl, FieldDescriptor, FieldKind},
    error::FieldError,
    model::{EntityObject, FieldRef, FieldType, FieldValue, Model},
    object_id::ObjectId,
    value::Value
};

macro_rules! model_impl {
    ($ty:ty, $schema:ident, { $($field:ident),* $(,)? } $(, one { $($one:ident : $one_ty:ty),* })? $(, many { $($many:ident : $many_ty:ty),* })?) => {
        impl EntityObject for $ty {
            fn model_schema(&self) -> &'static EntitySchema {
                &$schema
            }

            fn field(&self, name: &str) -> Option<FieldRef<'_>> {
                match name {
                    $(stringify!($field) => Some(self.$field.to_field_ref()),)*
                    $($(stringify!($one) => Some(match &self.$one {
                        Some(inner) => FieldRef::One(inner),
                        None => FieldRef::Null
                    }),)*)?
                    $($(stringify!($many) => Some(FieldRef::Many(
                        self.$many.iter().map(|item| item as &dyn EntityObject).collect()
                    )),)*)?
                    _ => None
                }
            }

            fn set_field(&mut self, name: &str, value: FieldValue) -> Result<(), FieldError> {
                match name {
                    $(stringify!($field) => {
                        self.$field = FieldType::from_field_value(value)?;
                        Ok(())
                    })*
                    $($(stringify!($one) => {
                        self.$one = value.into_one::<$one_ty>()?;
                        Ok(())
                    })*)?
                    $($(stringify!($many) => {
                        self.$many = value.into_many::<$many_ty>()?;
                        Ok(())
                    })*)?
                    _ => {
                        drop(value);
                        Err(FieldError::UnknownField(name.to_string()))
                    }
                }
            }
        }

        impl Model for $ty {
            fn schema() -> &'static EntitySchema {
                &$schema
            }
        }
    };
}

/// `Person { id, name, age, weight, born, tags, cache }`; `cache` is not
/// persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Person {
    pub id:     Option<ObjectId>,
    pub name:   String,
    pub age:    i64,
    pub weight: f64,
    pub active: bool,
    pub born:   Option<DateTime<Utc>>,
    pub tags:   Vec<Value>,
    pub cache:  String
}

pub static PERSON: EntitySchema = EntitySchema::entity("Person", &[
    FieldDecl::mapped("id", FieldDescriptor::identifier()),
    FieldDecl::mapped("name", FieldDescriptor::new(FieldKind::String)),
    FieldDecl::mapped("age", FieldDescriptor::new(FieldKind::Int)),
    FieldDecl::mapped("weight", FieldDescriptor::new(FieldKind::Float)),
    FieldDecl::mapped("active", FieldDescriptor::new(FieldKind::Bool)),
    FieldDecl::mapped("born", FieldDescriptor::new(FieldKind::Date)),
    FieldDecl::mapped("tags", FieldDescriptor::new(FieldKind::Array)),
    FieldDecl::unmapped("cache")
])
.in_collection("people");

model_impl!(Person, PERSON, { id, name, age, weight, active, born, tags, cache });

/// Embedded customer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Customer {
    pub name:  String,
    pub email: String
}

pub static CUSTOMER: EntitySchema = EntitySchema::entity("Customer", &[
    FieldDecl::mapped("name", FieldDescriptor::new(FieldKind::String)),
    FieldDecl::mapped("email", FieldDescriptor::new(FieldKind::String).named("mail"))
]);

model_impl!(Customer, CUSTOMER, { name, email });

/// Embedded order line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Line {
    pub sku: String,
    pub qty: i32
}

pub static LINE: EntitySchema = EntitySchema::entity("Line", &[
    FieldDecl::mapped("sku", FieldDescriptor::new(FieldKind::String)),
    FieldDecl::mapped("qty", FieldDescriptor::new(FieldKind::Int))
]);

model_impl!(Line, LINE, { sku, qty });

/// `Order { id, customer: embedOne<Customer>, lines: embedMany<Line> }`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Order {
    pub id:       Option<ObjectId>,
    pub customer: Option<Customer>,
    pub lines:    Vec<Line>
}

pub static ORDER: EntitySchema = EntitySchema::entity("Order", &[
    FieldDecl::mapped("id", FieldDescriptor::identifier()),
    FieldDecl::mapped("customer", FieldDescriptor::embed_one(EntityRef::of::<Customer>())),
    FieldDecl::mapped("lines", FieldDescriptor::embed_many(EntityRef::of::<Line>()))
])
.in_collection("orders");

model_impl!(Order, ORDER, { id }, one { customer: Customer }, many { lines: Line });

/// Entity without an identifier field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Note {
    pub text: String
}

pub static NOTE: EntitySchema = EntitySchema::entity("Note", &[FieldDecl::mapped(
    "text",
    FieldDescriptor::new(FieldKind::String)
)]);

model_impl!(Note, NOTE, { text });

/// Type without the entity marker.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Plain {
    pub label: String
}

pub static PLAIN: EntitySchema = EntitySchema::unmapped("Plain", &[FieldDecl::unmapped("label")]);

model_impl!(Plain, PLAIN, { label });

/// Embeds itself: a type-level cycle.
#[derive(Debug, Clone, Default)]
pub struct Node {
    pub label: String,
    #[allow(dead_code)]
    pub next:  Option<Box<Node>>
}

pub static NODE: EntitySchema = EntitySchema::entity("Node", &[
    FieldDecl::mapped("label", FieldDescriptor::new(FieldKind::String)),
    FieldDecl::mapped("next", FieldDescriptor::embed_one(EntityRef::of::<Node>()))
]);

model_impl!(Node, NODE, { label });

/// Two identifier fields.
#[derive(Debug, Clone, Default)]
pub struct TwoIds {
    pub a: Option<ObjectId>,
    pub b: Option<ObjectId>
}

pub static TWO_IDS: EntitySchema = EntitySchema::entity("TwoIds", &[
    FieldDecl::mapped("a", FieldDescriptor::identifier()),
    FieldDecl::mapped("b", FieldDescriptor::identifier())
]);

model_impl!(TwoIds, TWO_IDS, { a, b });

/// Embeds a type without the entity marker.
#[derive(Debug, Clone, Default)]
pub struct Holder {
    pub plain: Option<Plain>
}

pub static HOLDER: EntitySchema = EntitySchema::entity("Holder", &[FieldDecl::mapped(
    "plain",
    FieldDescriptor::embed_one(EntityRef::of::<Plain>())
)]);

model_impl!(Holder, HOLDER, {}, one { plain: Plain });

/// Two fields sharing one document key.
#[derive(Debug, Clone, Default)]
pub struct Clash {
    pub first:  String,
    pub second: String
}

pub static CLASH: EntitySchema = EntitySchema::entity("Clash", &[
    FieldDecl::mapped("first", FieldDescriptor::new(FieldKind::String).named("x")),
    FieldDecl::mapped("second", FieldDescriptor::new(FieldKind::String).named("x"))
]);

model_impl!(Clash, CLASH, { first, second });

/// Identifier flag on a non-identifier kind.
#[derive(Debug, Clone, Default)]
pub struct IntId {
    pub id: i64
}

pub static INT_ID: EntitySchema = EntitySchema::entity("IntId", &[FieldDecl::mapped(
    "id",
    FieldDescriptor {
        identifier: true,
        ..FieldDescriptor::new(FieldKind::Int)
    }
)]);

model_impl!(IntId, INT_ID, { id });

/// `embedOne` without a target.
#[derive(Debug, Clone, Default)]
pub struct Orphan {
    #[allow(dead_code)]
    pub child: String
}

pub static ORPHAN: EntitySchema = EntitySchema::entity("Orphan", &[FieldDecl::mapped(
    "child",
    FieldDescriptor::new(FieldKind::EmbedOne)
)]);

model_impl!(Orphan, ORPHAN, {});

/// A plain field renamed onto the identifier key.
#[derive(Debug, Clone, Default)]
pub struct IdClash {
    pub id:    Option<ObjectId>,
    pub label: String
}

pub static ID_CLASH: EntitySchema = EntitySchema::entity("IdClash", &[
    FieldDecl::mapped("id", FieldDescriptor::identifier()),
    FieldDecl::mapped("label", FieldDescriptor::new(FieldKind::String).named("_id"))
]);

model_impl!(IdClash, ID_CLASH, { id, label });
