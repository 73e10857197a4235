// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId(String);

impl RecordId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    Uuid,
    Sequential,
}

impl IdStrategy {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uuid => "uuid",
            Self::Sequential => "sequential",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "uuid" => Some(Self::Uuid),
            "sequential" => Some(Self::Sequential),
            _ => None,
        }
    }
}

/// Hands out record ids that are unique for the lifetime of one session.
///
/// `Sequential` shares a single counter across all entity kinds, so an id never
/// repeats even between stores.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum IdGenerator {
    #[default]
    Uuid,
    Sequential { next: u64 },
}

impl IdGenerator {
    pub const fn for_strategy(strategy: IdStrategy) -> Self {
        match strategy {
            IdStrategy::Uuid => Self::Uuid,
            IdStrategy::Sequential => Self::Sequential { next: 1 },
        }
    }

    pub fn next_id(&mut self) -> RecordId {
        match self {
            Self::Uuid => RecordId(Uuid::new_v4().simple().to_string()),
            Self::Sequential { next } => {
                let id = RecordId(next.to_string());
                *next = next.saturating_add(1);
                id
            }
        }
    }
}
