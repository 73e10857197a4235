// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use tracing::{debug, info};

use crate::{
    Apartment, Entity, EntityKind, FormPayload, FormState, IdGenerator, Key, Record, RecordId,
    RecordStore, RowAction, TableView, Tenant, project_table,
};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum FormSession {
    #[default]
    Closed,
    OpenForCreate,
    OpenForEdit(Record),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub active_tab: EntityKind,
    pub status_line: Option<String>,
    form: FormSession,
    tenants: RecordStore<Tenant>,
    apartments: RecordStore<Apartment>,
    keys: RecordStore<Key>,
    ids: IdGenerator,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_id_generator(IdGenerator::default())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    SelectTab(EntityKind),
    NextTab,
    PrevTab,
    BeginCreate,
    BeginEdit(Record),
    Submit(FormPayload),
    CloseForm,
    Remove(RecordId),
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    TabChanged(EntityKind),
    FormOpened {
        kind: EntityKind,
        editing: Option<RecordId>,
    },
    FormClosed,
    RecordCreated {
        kind: EntityKind,
        id: RecordId,
    },
    RecordUpdated {
        kind: EntityKind,
        id: RecordId,
    },
    RecordRemoved {
        kind: EntityKind,
        id: RecordId,
    },
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn with_id_generator(ids: IdGenerator) -> Self {
        Self {
            active_tab: EntityKind::Tenants,
            status_line: None,
            form: FormSession::Closed,
            tenants: RecordStore::new(),
            apartments: RecordStore::new(),
            keys: RecordStore::new(),
            ids,
        }
    }

    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::SelectTab(tab) => self.select_tab(tab),
            AppCommand::NextTab => self.rotate_tab(1),
            AppCommand::PrevTab => self.rotate_tab(-1),
            AppCommand::BeginCreate => {
                self.form = FormSession::OpenForCreate;
                debug!(kind = self.active_tab.as_str(), "form opened for create");
                vec![AppEvent::FormOpened {
                    kind: self.active_tab,
                    editing: None,
                }]
            }
            AppCommand::BeginEdit(record) => {
                let event = AppEvent::FormOpened {
                    kind: record.kind(),
                    editing: Some(record.id().clone()),
                };
                debug!(kind = record.kind().as_str(), id = %record.id(), "form opened for edit");
                self.form = FormSession::OpenForEdit(record);
                vec![event]
            }
            AppCommand::Submit(payload) => self.submit(payload),
            AppCommand::CloseForm => {
                self.form = FormSession::Closed;
                debug!("form closed without submit");
                vec![AppEvent::FormClosed]
            }
            AppCommand::Remove(id) => self.remove(id),
            AppCommand::SetStatus(message) => vec![self.set_status(&message)],
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    pub const fn form(&self) -> &FormSession {
        &self.form
    }

    /// Builds a fresh draft for the open form session, if any.
    pub fn open_form_state(&self) -> Option<FormState> {
        match &self.form {
            FormSession::Closed => None,
            FormSession::OpenForCreate => Some(FormState::open(self.active_tab, None)),
            FormSession::OpenForEdit(record) => Some(FormState::open(record.kind(), Some(record))),
        }
    }

    pub fn tenants(&self) -> &[Tenant] {
        self.tenants.records()
    }

    pub fn apartments(&self) -> &[Apartment] {
        self.apartments.records()
    }

    pub fn keys(&self) -> &[Key] {
        self.keys.records()
    }

    pub fn record_count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Tenants => self.tenants.records().len(),
            EntityKind::Apartments => self.apartments.records().len(),
            EntityKind::Keys => self.keys.records().len(),
        }
    }

    pub fn find_record(&self, kind: EntityKind, id: &RecordId) -> Option<Record> {
        match kind {
            EntityKind::Tenants => self.tenants.get(id).cloned().map(Record::from),
            EntityKind::Apartments => self.apartments.get(id).cloned().map(Record::from),
            EntityKind::Keys => self.keys.get(id).cloned().map(Record::from),
        }
    }

    pub fn table_view(&self, kind: EntityKind) -> TableView {
        match kind {
            EntityKind::Tenants => project_table(self.tenants.records(), kind.columns()),
            EntityKind::Apartments => project_table(self.apartments.records(), kind.columns()),
            EntityKind::Keys => project_table(self.keys.records(), kind.columns()),
        }
    }

    /// Resolves a table row action against the active tab. Editing a row that
    /// is no longer stored resolves to nothing.
    pub fn row_intent(&self, id: &RecordId, action: RowAction) -> Option<AppCommand> {
        match action {
            RowAction::Edit => self
                .find_record(self.active_tab, id)
                .map(AppCommand::BeginEdit),
            RowAction::Delete => Some(AppCommand::Remove(id.clone())),
        }
    }

    pub fn heading(&self) -> String {
        format!("{} Management", self.active_tab.label())
    }

    pub fn allocate_id(&mut self) -> RecordId {
        self.ids.next_id()
    }

    /// Appends a fully formed record, keeping its id and relation lists.
    pub fn seed_record(&mut self, record: Record) {
        match record {
            Record::Tenant(tenant) => self.tenants.append(tenant),
            Record::Apartment(apartment) => self.apartments.append(apartment),
            Record::Key(key) => self.keys.append(key),
        }
    }

    fn select_tab(&mut self, tab: EntityKind) -> Vec<AppEvent> {
        self.active_tab = tab;
        debug!(tab = tab.as_str(), "tab selected");
        vec![AppEvent::TabChanged(tab)]
    }

    fn rotate_tab(&mut self, delta: isize) -> Vec<AppEvent> {
        let tabs = EntityKind::ALL;
        let current = tabs
            .iter()
            .position(|tab| *tab == self.active_tab)
            .unwrap_or(0) as isize;
        let len = tabs.len() as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.select_tab(tabs[next])
    }

    fn submit(&mut self, payload: FormPayload) -> Vec<AppEvent> {
        let kind = payload.kind();
        let editing = match std::mem::take(&mut self.form) {
            FormSession::OpenForEdit(record) if record.kind() == kind => Some(record),
            _ => None,
        };
        let is_edit = editing.is_some();
        let record = self.merge_record(payload, editing);
        let id = record.id().clone();

        let stored = match record {
            Record::Tenant(tenant) => store_record(&mut self.tenants, tenant, is_edit),
            Record::Apartment(apartment) => store_record(&mut self.apartments, apartment, is_edit),
            Record::Key(key) => store_record(&mut self.keys, key, is_edit),
        };

        let mut events = Vec::new();
        match (is_edit, stored) {
            (false, _) => {
                info!(kind = kind.as_str(), id = %id, "record created");
                events.push(AppEvent::RecordCreated {
                    kind,
                    id: id.clone(),
                });
                events.push(self.set_status(&format!("{} added", kind.singular())));
            }
            (true, true) => {
                info!(kind = kind.as_str(), id = %id, "record updated");
                events.push(AppEvent::RecordUpdated {
                    kind,
                    id: id.clone(),
                });
                events.push(self.set_status(&format!("{} updated", kind.singular())));
            }
            (true, false) => {
                debug!(kind = kind.as_str(), id = %id, "edit target no longer stored");
            }
        }
        events.push(AppEvent::FormClosed);
        events
    }

    /// Combines submitted own fields with the id and relation lists of the
    /// record being edited, or with a fresh id and empty relations.
    fn merge_record(&mut self, payload: FormPayload, editing: Option<Record>) -> Record {
        match payload {
            FormPayload::Tenant(input) => {
                let (id, apartment_ids, key_ids) = match editing {
                    Some(Record::Tenant(tenant)) => {
                        (tenant.id, tenant.apartment_ids, tenant.key_ids)
                    }
                    _ => (self.ids.next_id(), Vec::new(), Vec::new()),
                };
                Record::Tenant(Tenant {
                    id,
                    first_name: input.first_name,
                    last_name: input.last_name,
                    email: input.email,
                    phone_number: input.phone_number,
                    personal_number: input.personal_number,
                    apartment_ids,
                    key_ids,
                })
            }
            FormPayload::Apartment(input) => {
                let (id, tenant_ids, key_ids) = match editing {
                    Some(Record::Apartment(apartment)) => {
                        (apartment.id, apartment.tenant_ids, apartment.key_ids)
                    }
                    _ => (self.ids.next_id(), Vec::new(), Vec::new()),
                };
                Record::Apartment(Apartment {
                    id,
                    street: input.street,
                    number: input.number,
                    apartment_number: input.apartment_number,
                    floor: input.floor,
                    postal_code: input.postal_code,
                    city: input.city,
                    tenant_ids,
                    key_ids,
                })
            }
            FormPayload::Key(input) => {
                let (id, tenant_ids, apartment_ids) = match editing {
                    Some(Record::Key(key)) => (key.id, key.tenant_ids, key.apartment_ids),
                    _ => (self.ids.next_id(), Vec::new(), Vec::new()),
                };
                Record::Key(Key {
                    id,
                    key_type: input.key_type,
                    number: input.number,
                    amount: input.amount,
                    tenant_ids,
                    apartment_ids,
                })
            }
        }
    }

    fn remove(&mut self, id: RecordId) -> Vec<AppEvent> {
        let kind = self.active_tab;
        let removed = match kind {
            EntityKind::Tenants => self.tenants.remove_by_id(&id),
            EntityKind::Apartments => self.apartments.remove_by_id(&id),
            EntityKind::Keys => self.keys.remove_by_id(&id),
        };
        if !removed {
            debug!(kind = kind.as_str(), id = %id, "remove matched no record");
            return Vec::new();
        }

        info!(kind = kind.as_str(), id = %id, "record removed");
        let status = self.set_status(&format!("{} deleted", kind.singular()));
        vec![AppEvent::RecordRemoved { kind, id }, status]
    }

    fn set_status(&mut self, message: &str) -> AppEvent {
        self.status_line = Some(message.to_owned());
        AppEvent::StatusUpdated(message.to_owned())
    }
}

fn store_record<T: Entity>(store: &mut RecordStore<T>, record: T, is_edit: bool) -> bool {
    if is_edit {
        let id = record.id().clone();
        store.replace_by_id(&id, record)
    } else {
        store.append(record);
        true
    }
}
