// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{ColumnSpec, Entity, RecordId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Edit,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub id: RecordId,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub header: Vec<&'static str>,
    pub rows: Vec<TableRow>,
}

impl TableView {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    pub fn row_id(&self, index: usize) -> Option<&RecordId> {
        self.rows.get(index).map(|row| &row.id)
    }
}

/// Projects every record onto the listed columns, in store order.
pub fn project_table<T: Entity>(records: &[T], columns: &[ColumnSpec]) -> TableView {
    TableView {
        header: columns.iter().map(|column| column.label).collect(),
        rows: records
            .iter()
            .map(|record| TableRow {
                id: record.id().clone(),
                cells: columns
                    .iter()
                    .map(|column| {
                        record
                            .field_value(column.key)
                            .map(|value| value.display())
                            .unwrap_or_default()
                    })
                    .collect(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::project_table;
    use crate::{ColumnSpec, EntityKind, Key, RecordId};

    fn key(id: &str, key_type: &str, amount: f64) -> Key {
        Key {
            id: RecordId::from(id),
            key_type: key_type.to_owned(),
            number: format!("N-{id}"),
            amount,
            tenant_ids: vec![RecordId::from("t1")],
            apartment_ids: Vec::new(),
        }
    }

    #[test]
    fn projects_header_and_rows_in_order() {
        let keys = vec![key("1", "Main door", 2.0), key("2", "Mailbox", 1.5)];
        let view = project_table(&keys, EntityKind::Keys.columns());

        assert_eq!(view.header, vec!["Type", "Number", "Amount"]);
        assert_eq!(view.row_count(), 2);
        assert_eq!(view.column_count(), 3);
        assert_eq!(view.rows[0].cells, vec!["Main door", "N-1", "2"]);
        assert_eq!(view.rows[1].cells, vec!["Mailbox", "N-2", "1.5"]);
        assert_eq!(view.row_id(1), Some(&RecordId::from("2")));
        assert_eq!(view.row_id(2), None);
    }

    #[test]
    fn unknown_column_projects_empty_cell() {
        let keys = vec![key("1", "Main door", 2.0)];
        let columns = [
            ColumnSpec {
                key: "key_type",
                label: "Type",
            },
            ColumnSpec {
                key: "tenant_ids",
                label: "Tenants",
            },
        ];
        let view = project_table(&keys, &columns);
        assert_eq!(view.rows[0].cells, vec!["Main door", ""]);
    }

    #[test]
    fn empty_store_keeps_header() {
        let view = project_table::<Key>(&[], EntityKind::Keys.columns());
        assert_eq!(view.header.len(), 3);
        assert!(view.rows.is_empty());
    }
}
