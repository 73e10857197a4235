// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::ids::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Tenants,
    Apartments,
    Keys,
}

impl EntityKind {
    pub const ALL: [Self; 3] = [Self::Tenants, Self::Apartments, Self::Keys];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tenants => "tenants",
            Self::Apartments => "apartments",
            Self::Keys => "keys",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "tenants" => Some(Self::Tenants),
            "apartments" => Some(Self::Apartments),
            "keys" => Some(Self::Keys),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Tenants => "Tenants",
            Self::Apartments => "Apartments",
            Self::Keys => "Keys",
        }
    }

    pub const fn singular(self) -> &'static str {
        match self {
            Self::Tenants => "tenant",
            Self::Apartments => "apartment",
            Self::Keys => "key",
        }
    }

    pub const fn form_fields(self) -> &'static [FieldSpec] {
        match self {
            Self::Tenants => &TENANT_FIELDS,
            Self::Apartments => &APARTMENT_FIELDS,
            Self::Keys => &KEY_FIELDS,
        }
    }

    pub const fn columns(self) -> &'static [ColumnSpec] {
        match self {
            Self::Tenants => &TENANT_COLUMNS,
            Self::Apartments => &APARTMENT_COLUMNS,
            Self::Keys => &KEY_COLUMNS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputKind {
    Text,
    Email,
    Tel,
    Number,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub input: InputKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub key: &'static str,
    pub label: &'static str,
}

const fn field(name: &'static str, label: &'static str, input: InputKind) -> FieldSpec {
    FieldSpec { name, label, input }
}

const fn column(key: &'static str, label: &'static str) -> ColumnSpec {
    ColumnSpec { key, label }
}

const TENANT_FIELDS: [FieldSpec; 5] = [
    field("first_name", "First Name", InputKind::Text),
    field("last_name", "Last Name", InputKind::Text),
    field("email", "Email", InputKind::Email),
    field("phone_number", "Phone Number", InputKind::Tel),
    field("personal_number", "Personal Number", InputKind::Text),
];

const APARTMENT_FIELDS: [FieldSpec; 6] = [
    field("street", "Street", InputKind::Text),
    field("number", "Number", InputKind::Text),
    field("apartment_number", "Apartment Number", InputKind::Text),
    field("floor", "Floor", InputKind::Text),
    field("postal_code", "Postal Code", InputKind::Text),
    field("city", "City", InputKind::Text),
];

const KEY_FIELDS: [FieldSpec; 3] = [
    field("key_type", "Type", InputKind::Text),
    field("number", "Number", InputKind::Text),
    field("amount", "Amount", InputKind::Number),
];

const TENANT_COLUMNS: [ColumnSpec; 4] = [
    column("first_name", "First Name"),
    column("last_name", "Last Name"),
    column("email", "Email"),
    column("phone_number", "Phone"),
];

const APARTMENT_COLUMNS: [ColumnSpec; 4] = [
    column("street", "Street"),
    column("number", "Number"),
    column("apartment_number", "Apt #"),
    column("city", "City"),
];

const KEY_COLUMNS: [ColumnSpec; 3] = [
    column("key_type", "Type"),
    column("number", "Number"),
    column("amount", "Amount"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Text(String),
    Number(f64),
}

impl FieldValue {
    pub fn display(&self) -> String {
        match self {
            Self::Text(value) => value.clone(),
            Self::Number(value) => value.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: RecordId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub personal_number: String,
    pub apartment_ids: Vec<RecordId>,
    pub key_ids: Vec<RecordId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Apartment {
    pub id: RecordId,
    pub street: String,
    pub number: String,
    pub apartment_number: String,
    pub floor: String,
    pub postal_code: String,
    pub city: String,
    pub tenant_ids: Vec<RecordId>,
    pub key_ids: Vec<RecordId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Key {
    pub id: RecordId,
    pub key_type: String,
    pub number: String,
    pub amount: f64,
    pub tenant_ids: Vec<RecordId>,
    pub apartment_ids: Vec<RecordId>,
}

/// A record kept in one of the controller's stores.
///
/// `field_value` looks up own fields by their schema name; relation lists and
/// the id are not addressable that way.
pub trait Entity: Clone {
    fn id(&self) -> &RecordId;
    fn field_value(&self, name: &str) -> Option<FieldValue>;
}

fn text(value: &str) -> Option<FieldValue> {
    Some(FieldValue::Text(value.to_owned()))
}

impl Entity for Tenant {
    fn id(&self) -> &RecordId {
        &self.id
    }

    fn field_value(&self, name: &str) -> Option<FieldValue> {
        match name {
            "first_name" => text(&self.first_name),
            "last_name" => text(&self.last_name),
            "email" => text(&self.email),
            "phone_number" => text(&self.phone_number),
            "personal_number" => text(&self.personal_number),
            _ => None,
        }
    }
}

impl Entity for Apartment {
    fn id(&self) -> &RecordId {
        &self.id
    }

    fn field_value(&self, name: &str) -> Option<FieldValue> {
        match name {
            "street" => text(&self.street),
            "number" => text(&self.number),
            "apartment_number" => text(&self.apartment_number),
            "floor" => text(&self.floor),
            "postal_code" => text(&self.postal_code),
            "city" => text(&self.city),
            _ => None,
        }
    }
}

impl Entity for Key {
    fn id(&self) -> &RecordId {
        &self.id
    }

    fn field_value(&self, name: &str) -> Option<FieldValue> {
        match name {
            "key_type" => text(&self.key_type),
            "number" => text(&self.number),
            "amount" => Some(FieldValue::Number(self.amount)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Record {
    Tenant(Tenant),
    Apartment(Apartment),
    Key(Key),
}

impl Record {
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Tenant(_) => EntityKind::Tenants,
            Self::Apartment(_) => EntityKind::Apartments,
            Self::Key(_) => EntityKind::Keys,
        }
    }

    pub fn id(&self) -> &RecordId {
        match self {
            Self::Tenant(tenant) => &tenant.id,
            Self::Apartment(apartment) => &apartment.id,
            Self::Key(key) => &key.id,
        }
    }

    pub fn field_value(&self, name: &str) -> Option<FieldValue> {
        match self {
            Self::Tenant(tenant) => tenant.field_value(name),
            Self::Apartment(apartment) => apartment.field_value(name),
            Self::Key(key) => key.field_value(name),
        }
    }
}

impl From<Tenant> for Record {
    fn from(value: Tenant) -> Self {
        Self::Tenant(value)
    }
}

impl From<Apartment> for Record {
    fn from(value: Apartment) -> Self {
        Self::Apartment(value)
    }
}

impl From<Key> for Record {
    fn from(value: Key) -> Self {
        Self::Key(value)
    }
}
