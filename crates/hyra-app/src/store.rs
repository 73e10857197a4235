// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{Entity, RecordId};

/// Ordered in-memory collection for one entity kind.
///
/// Insertion order is display order. Lookups by id act on the first match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordStore<T> {
    records: Vec<T>,
}

impl<T> Default for RecordStore<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<T: Entity> RecordStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn get(&self, id: &RecordId) -> Option<&T> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn append(&mut self, record: T) {
        self.records.push(record);
    }

    pub fn replace_by_id(&mut self, id: &RecordId, record: T) -> bool {
        match self.records.iter_mut().find(|existing| existing.id() == id) {
            Some(slot) => {
                *slot = record;
                true
            }
            None => false,
        }
    }

    pub fn remove_by_id(&mut self, id: &RecordId) -> bool {
        match self.records.iter().position(|record| record.id() == id) {
            Some(index) => {
                self.records.remove(index);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RecordStore;
    use crate::{Apartment, RecordId};

    fn apartment(id: &str, street: &str) -> Apartment {
        Apartment {
            id: RecordId::from(id),
            street: street.to_owned(),
            number: "4".to_owned(),
            apartment_number: "1101".to_owned(),
            floor: "1".to_owned(),
            postal_code: "118 20".to_owned(),
            city: "Stockholm".to_owned(),
            tenant_ids: Vec::new(),
            key_ids: Vec::new(),
        }
    }

    fn streets(store: &RecordStore<Apartment>) -> Vec<&str> {
        store
            .records()
            .iter()
            .map(|apartment| apartment.street.as_str())
            .collect()
    }

    #[test]
    fn append_keeps_insertion_order() {
        let mut store = RecordStore::new();
        store.append(apartment("a", "Hornsgatan"));
        store.append(apartment("b", "Götgatan"));
        store.append(apartment("c", "Ringvägen"));
        assert_eq!(streets(&store), vec!["Hornsgatan", "Götgatan", "Ringvägen"]);
        assert_eq!(store.records().len(), 3);
    }

    #[test]
    fn remove_by_id_drops_one_and_keeps_order() {
        let mut store = RecordStore::new();
        store.append(apartment("a", "Hornsgatan"));
        store.append(apartment("b", "Götgatan"));
        store.append(apartment("c", "Ringvägen"));

        assert!(store.remove_by_id(&RecordId::from("b")));
        assert_eq!(streets(&store), vec!["Hornsgatan", "Ringvägen"]);
        assert!(store.get(&RecordId::from("b")).is_none());
    }

    #[test]
    fn remove_by_missing_id_is_a_no_op() {
        let mut store = RecordStore::new();
        store.append(apartment("a", "Hornsgatan"));
        let before = store.clone();

        assert!(!store.remove_by_id(&RecordId::from("zz")));
        assert_eq!(store, before);
    }

    #[test]
    fn replace_by_id_swaps_in_place() {
        let mut store = RecordStore::new();
        store.append(apartment("a", "Hornsgatan"));
        store.append(apartment("b", "Götgatan"));

        assert!(store.replace_by_id(&RecordId::from("a"), apartment("a", "Folkungagatan")));
        assert_eq!(streets(&store), vec!["Folkungagatan", "Götgatan"]);

        assert!(!store.replace_by_id(&RecordId::from("x"), apartment("x", "Nowhere")));
        assert_eq!(store.records().len(), 2);
    }

    #[test]
    fn duplicate_ids_resolve_to_first_match() {
        let mut store = RecordStore::new();
        store.append(apartment("dup", "First"));
        store.append(apartment("dup", "Second"));

        assert!(store.remove_by_id(&RecordId::from("dup")));
        assert_eq!(streets(&store), vec!["Second"]);
    }
}
