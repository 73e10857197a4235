// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{EntityKind, FieldSpec, FieldValue, InputKind, Record};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantFormInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub personal_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApartmentFormInput {
    pub street: String,
    pub number: String,
    pub apartment_number: String,
    pub floor: String,
    pub postal_code: String,
    pub city: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyFormInput {
    pub key_type: String,
    pub number: String,
    pub amount: f64,
}

/// Own fields of one record as collected by a form. Ids and relation lists are
/// never part of a payload.
#[derive(Debug, Clone, PartialEq)]
pub enum FormPayload {
    Tenant(TenantFormInput),
    Apartment(ApartmentFormInput),
    Key(KeyFormInput),
}

impl FormPayload {
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Tenant(_) => EntityKind::Tenants,
            Self::Apartment(_) => EntityKind::Apartments,
            Self::Key(_) => EntityKind::Keys,
        }
    }

    pub fn from_values(kind: EntityKind, values: &FormValues) -> Self {
        match kind {
            EntityKind::Tenants => Self::Tenant(TenantFormInput {
                first_name: values.text("first_name"),
                last_name: values.text("last_name"),
                email: values.text("email"),
                phone_number: values.text("phone_number"),
                personal_number: values.text("personal_number"),
            }),
            EntityKind::Apartments => Self::Apartment(ApartmentFormInput {
                street: values.text("street"),
                number: values.text("number"),
                apartment_number: values.text("apartment_number"),
                floor: values.text("floor"),
                postal_code: values.text("postal_code"),
                city: values.text("city"),
            }),
            EntityKind::Keys => Self::Key(KeyFormInput {
                key_type: values.text("key_type"),
                number: values.text("number"),
                amount: values.number("amount"),
            }),
        }
    }
}

/// Flat `field name -> value` mapping in schema order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormValues {
    entries: Vec<(&'static str, FieldValue)>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &'static str, value: FieldValue) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &'static str, value: FieldValue) {
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    pub fn text(&self, name: &str) -> String {
        match self.get(name) {
            Some(FieldValue::Text(value)) => value.clone(),
            Some(FieldValue::Number(value)) => value.to_string(),
            None => String::new(),
        }
    }

    pub fn number(&self, name: &str) -> f64 {
        match self.get(name) {
            Some(FieldValue::Number(value)) => *value,
            Some(FieldValue::Text(value)) => parse_number(value).unwrap_or(0.0),
            None => 0.0,
        }
    }
}

/// Finite decimal in plain notation, e.g. `12`, `-3`, `1.5`.
fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

/// True for anything a numeric input can hold while being typed: an optional
/// leading `-`, digits and at most one `.`.
fn is_partial_number(raw: &str) -> bool {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    let mut dots = 0;
    for ch in digits.chars() {
        match ch {
            '0'..='9' => {}
            '.' => dots += 1,
            _ => return false,
        }
    }
    dots <= 1
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDraft {
    pub spec: FieldSpec,
    pub buffer: String,
}

impl FieldDraft {
    fn value(&self) -> FieldValue {
        match self.spec.input {
            InputKind::Number => FieldValue::Number(parse_number(&self.buffer).unwrap_or(0.0)),
            InputKind::Text | InputKind::Email | InputKind::Tel => {
                FieldValue::Text(self.buffer.clone())
            }
        }
    }

    fn accepts(&self, ch: char) -> bool {
        match self.spec.input {
            InputKind::Number => {
                let mut next = self.buffer.clone();
                next.push(ch);
                is_partial_number(&next)
                    && (!next.bytes().any(|byte| byte.is_ascii_digit())
                        || parse_number(&next).is_some())
            }
            InputKind::Text | InputKind::Email | InputKind::Tel => !ch.is_control(),
        }
    }
}

/// Draft of an open form: one buffer per schema field plus the focused field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    kind: EntityKind,
    title: String,
    fields: Vec<FieldDraft>,
    cursor: usize,
}

impl FormState {
    /// Seeds buffers from `initial` when it is a record of `kind`, otherwise
    /// every field starts empty.
    pub fn open(kind: EntityKind, initial: Option<&Record>) -> Self {
        let initial = initial.filter(|record| record.kind() == kind);
        let verb = if initial.is_some() { "Edit" } else { "Add" };
        let fields = kind
            .form_fields()
            .iter()
            .map(|spec| FieldDraft {
                spec: *spec,
                buffer: initial
                    .and_then(|record| record.field_value(spec.name))
                    .map(|value| value.display())
                    .unwrap_or_default(),
            })
            .collect();
        Self {
            kind,
            title: format!("{verb} {}", kind.singular()),
            fields,
            cursor: 0,
        }
    }

    pub const fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn fields(&self) -> &[FieldDraft] {
        &self.fields
    }

    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn focused(&self) -> Option<&FieldDraft> {
        self.fields.get(self.cursor)
    }

    pub fn move_cursor(&mut self, delta: isize) {
        if self.fields.is_empty() {
            return;
        }
        let len = self.fields.len() as isize;
        self.cursor = (self.cursor as isize + delta).rem_euclid(len) as usize;
    }

    pub fn insert_char(&mut self, ch: char) -> bool {
        let Some(field) = self.fields.get_mut(self.cursor) else {
            return false;
        };
        if !field.accepts(ch) {
            return false;
        }
        field.buffer.push(ch);
        true
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.fields.get_mut(self.cursor) {
            field.buffer.pop();
        }
    }

    pub fn clear_field(&mut self) {
        if let Some(field) = self.fields.get_mut(self.cursor) {
            field.buffer.clear();
        }
    }

    pub fn values(&self) -> FormValues {
        self.fields
            .iter()
            .fold(FormValues::new(), |values, field| {
                values.with(field.spec.name, field.value())
            })
    }

    pub fn payload(&self) -> FormPayload {
        FormPayload::from_values(self.kind, &self.values())
    }

    pub fn field_status(&self) -> String {
        match self.focused() {
            Some(field) => format!(
                "field {} ({}/{})",
                field.spec.label,
                self.cursor + 1,
                self.fields.len()
            ),
            None => "form has no fields".to_owned(),
        }
    }
}
