// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use hyra_app::{
    AppCommand, AppEvent, AppState, EntityKind, FormState, InputKind, RecordId, RowAction,
    TableView,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Tabs};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use tracing::debug;

const HALF_PAGE_ROWS: isize = 10;
const STATUS_CLEAR_AFTER: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum UiMode {
    #[default]
    Nav,
    Edit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct TableUiState {
    tab: Option<EntityKind>,
    selected_row: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct ViewData {
    mode: UiMode,
    form: Option<FormState>,
    table_state: TableUiState,
    help_visible: bool,
    status_token: u64,
}

pub fn run_app(state: &mut AppState) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::default();
    let (internal_tx, internal_rx) = mpsc::channel();
    sync_table_state(state, &mut view_data);

    let mut result = Ok(());
    loop {
        process_internal_events(state, &view_data, &internal_rx);

        if let Err(error) = terminal.draw(|frame| render(frame, state, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = match event::poll(Duration::from_millis(120)).context("poll event") {
            Ok(has_event) => has_event,
            Err(error) => {
                result = Err(error);
                break;
            }
        };
        if !has_event {
            continue;
        }
        match event::read().context("read event") {
            Ok(Event::Key(key)) => {
                if handle_key_event(state, &mut view_data, &internal_tx, key) {
                    break;
                }
            }
            Ok(_) => {}
            Err(error) => {
                result = Err(error);
                break;
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn process_internal_events(
    state: &mut AppState,
    view_data: &ViewData,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(AppCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(STATUS_CLEAR_AFTER);
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    dispatch_and_refresh(
        state,
        view_data,
        AppCommand::SetStatus(message.into()),
        internal_tx,
    );
}

fn handle_key_event(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }
    sync_table_state(state, view_data);

    // The form is modal: while it is open no other binding applies.
    if view_data.form.is_some() {
        handle_form_key(state, view_data, internal_tx, key);
        return false;
    }

    if view_data.help_visible {
        if key.code == KeyCode::Esc || key.code == KeyCode::Char('?') {
            view_data.help_visible = false;
        }
        return false;
    }

    if handle_table_key(view_data, state, key) {
        return false;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('f'), KeyModifiers::NONE) | (KeyCode::Tab, KeyModifiers::NONE) => {
            dispatch_and_refresh(state, view_data, AppCommand::NextTab, internal_tx);
            return false;
        }
        (KeyCode::Char('b'), KeyModifiers::NONE) | (KeyCode::BackTab, _) => {
            dispatch_and_refresh(state, view_data, AppCommand::PrevTab, internal_tx);
            return false;
        }
        (KeyCode::Char(digit @ '1'..='3'), KeyModifiers::NONE) => {
            let index = digit as usize - '1' as usize;
            dispatch_and_refresh(
                state,
                view_data,
                AppCommand::SelectTab(EntityKind::ALL[index]),
                internal_tx,
            );
            return false;
        }
        (KeyCode::Char('?'), KeyModifiers::NONE) => {
            view_data.help_visible = true;
            return false;
        }
        _ => {}
    }

    match view_data.mode {
        UiMode::Nav => {
            if let (KeyCode::Char('i'), KeyModifiers::NONE) = (key.code, key.modifiers) {
                view_data.mode = UiMode::Edit;
                emit_status(state, view_data, internal_tx, "edit");
            }
        }
        UiMode::Edit => match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => {
                view_data.mode = UiMode::Nav;
                emit_status(state, view_data, internal_tx, "nav");
            }
            (KeyCode::Char('a'), KeyModifiers::NONE) => {
                dispatch_and_refresh(state, view_data, AppCommand::BeginCreate, internal_tx);
            }
            (KeyCode::Char('e'), KeyModifiers::NONE) | (KeyCode::Enter, _) => {
                apply_row_action(state, view_data, internal_tx, RowAction::Edit);
            }
            (KeyCode::Char('d'), KeyModifiers::NONE) => {
                apply_row_action(state, view_data, internal_tx, RowAction::Delete);
            }
            _ => {}
        },
    }
    false
}

fn apply_row_action(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    action: RowAction,
) {
    let Some(id) = selected_row_id(state, view_data) else {
        emit_status(
            state,
            view_data,
            internal_tx,
            format!("no {} selected", state.active_tab.singular()),
        );
        return;
    };
    if let Some(command) = state.row_intent(&id, action) {
        dispatch_and_refresh(state, view_data, command, internal_tx);
    }
}

fn handle_form_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let Some(form) = view_data.form.as_mut() else {
        return;
    };

    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) => {
            dispatch_and_refresh(state, view_data, AppCommand::CloseForm, internal_tx);
        }
        (KeyCode::Enter, _) | (KeyCode::Char('s'), KeyModifiers::CONTROL) => {
            let payload = form.payload();
            debug!(kind = form.kind().as_str(), "form submitted");
            dispatch_and_refresh(state, view_data, AppCommand::Submit(payload), internal_tx);
        }
        (KeyCode::Tab, _) | (KeyCode::Down, _) => form.move_cursor(1),
        (KeyCode::BackTab, _) | (KeyCode::Up, _) => form.move_cursor(-1),
        (KeyCode::Backspace, _) => form.backspace(),
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => form.clear_field(),
        (KeyCode::Char(ch), modifiers) if !modifiers.contains(KeyModifiers::CONTROL) => {
            if !form.insert_char(ch) {
                let label = form
                    .focused()
                    .map(|field| field.spec.label)
                    .unwrap_or("field");
                emit_status(
                    state,
                    view_data,
                    internal_tx,
                    format!("{label} takes numbers only"),
                );
            }
        }
        _ => {}
    }
}

fn handle_table_key(view_data: &mut ViewData, state: &AppState, key: KeyEvent) -> bool {
    let delta = match (key.code, key.modifiers) {
        (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => 1,
        (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => -1,
        (KeyCode::Char('d'), KeyModifiers::CONTROL) | (KeyCode::PageDown, _) => HALF_PAGE_ROWS,
        (KeyCode::Char('u'), KeyModifiers::CONTROL) | (KeyCode::PageUp, _) => -HALF_PAGE_ROWS,
        (KeyCode::Char('g'), KeyModifiers::NONE) | (KeyCode::Home, _) => isize::MIN,
        (KeyCode::Char('G'), _) | (KeyCode::End, _) => isize::MAX,
        _ => return false,
    };
    move_row(view_data, state.record_count(state.active_tab), delta);
    true
}

fn move_row(view_data: &mut ViewData, row_count: usize, delta: isize) {
    if row_count == 0 {
        view_data.table_state.selected_row = 0;
        return;
    }
    let last = row_count - 1;
    let current = view_data.table_state.selected_row.min(last) as isize;
    let next = current.saturating_add(delta).clamp(0, last as isize);
    view_data.table_state.selected_row = next as usize;
}

fn selected_row_id(state: &AppState, view_data: &ViewData) -> Option<RecordId> {
    state
        .table_view(state.active_tab)
        .row_id(view_data.table_state.selected_row)
        .cloned()
}

fn dispatch_and_refresh(
    state: &mut AppState,
    view_data: &mut ViewData,
    command: AppCommand,
    internal_tx: &Sender<InternalEvent>,
) {
    let events = state.dispatch(command);
    for event in &events {
        match event {
            AppEvent::FormOpened { .. } => {
                view_data.form = state.open_form_state();
            }
            AppEvent::FormClosed => {
                view_data.form = None;
            }
            AppEvent::RecordCreated { kind, id } if *kind == state.active_tab => {
                select_row_by_id(state, view_data, id);
            }
            AppEvent::StatusUpdated(message) => {
                debug!(status = message.as_str(), "status updated");
                view_data.status_token = view_data.status_token.saturating_add(1);
                schedule_status_clear(internal_tx, view_data.status_token);
            }
            _ => {}
        }
    }
    sync_table_state(state, view_data);
}

fn select_row_by_id(state: &AppState, view_data: &mut ViewData, id: &RecordId) {
    let view = state.table_view(state.active_tab);
    if let Some(index) = view.rows.iter().position(|row| &row.id == id) {
        view_data.table_state.tab = Some(state.active_tab);
        view_data.table_state.selected_row = index;
    }
}

fn sync_table_state(state: &AppState, view_data: &mut ViewData) {
    if view_data.table_state.tab != Some(state.active_tab) {
        view_data.table_state = TableUiState {
            tab: Some(state.active_tab),
            selected_row: 0,
        };
    }
    let row_count = state.record_count(state.active_tab);
    view_data.table_state.selected_row = view_data
        .table_state
        .selected_row
        .min(row_count.saturating_sub(1));
}

fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let selected = EntityKind::ALL
        .iter()
        .position(|tab| *tab == state.active_tab)
        .unwrap_or(0);
    let tab_titles = EntityKind::ALL
        .iter()
        .map(|tab| tab_title(*tab, state))
        .collect::<Vec<String>>();
    let tabs = Tabs::new(tab_titles)
        .block(Block::default().title("hyra").borders(Borders::ALL))
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .select(selected);
    frame.render_widget(tabs, layout[0]);

    render_table(frame, layout[1], state, view_data);

    let status_widget = Paragraph::new(status_text(state, view_data))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status_widget, layout[2]);

    if let Some(form) = &view_data.form {
        let area = centered_rect(60, 60, frame.area());
        frame.render_widget(Clear, area);
        let overlay = Paragraph::new(render_form_overlay_text(form)).block(
            Block::default()
                .title(form.title().to_owned())
                .borders(Borders::ALL)
                .style(Style::default().fg(Color::Cyan)),
        );
        frame.render_widget(overlay, area);
    }

    if view_data.help_visible {
        let area = centered_rect(70, 50, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn tab_title(tab: EntityKind, state: &AppState) -> String {
    format!("{} ({})", tab.label(), state.record_count(tab))
}

fn render_table(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &AppState,
    view_data: &ViewData,
) {
    let view = state.table_view(state.active_tab);
    let block = Block::default().title(state.heading()).borders(Borders::ALL);
    if view.row_count() == 0 {
        let empty = Paragraph::new(empty_table_text(state.active_tab)).block(block);
        frame.render_widget(empty, area);
        return;
    }

    let widths = vec![Constraint::Min(8); view.column_count().max(1)];
    let header = Row::new(view.header.iter().map(|label| {
        Cell::from(*label).style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    }));
    let rows = table_rows(&view, view_data.table_state.selected_row);
    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(block);
    frame.render_widget(table, area);
}

fn table_rows(view: &TableView, selected_row: usize) -> Vec<Row<'static>> {
    view.rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let style = if index == selected_row {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default()
            };
            Row::new(row.cells.iter().cloned().map(Cell::from)).style(style)
        })
        .collect()
}

fn empty_table_text(tab: EntityKind) -> String {
    format!("no {} yet -- press i then a to add one", tab.as_str())
}

fn render_form_overlay_text(form: &FormState) -> String {
    let label_width = form
        .fields()
        .iter()
        .map(|field| field.spec.label.len())
        .max()
        .unwrap_or(0);
    let mut lines = form
        .fields()
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let focused = index == form.cursor();
            let marker = if focused { ">" } else { " " };
            let caret = if focused { "_" } else { "" };
            let hint = match field.spec.input {
                InputKind::Text => "",
                InputKind::Email => " @",
                InputKind::Tel => " #",
                InputKind::Number => " 0-9 .",
            };
            format!(
                "{marker} {:<label_width$}{hint:<4} {}{caret}",
                field.spec.label, field.buffer
            )
        })
        .collect::<Vec<_>>();
    lines.push(String::new());
    lines.push("tab/shift+tab field | enter submit | esc cancel".to_owned());
    lines.join("\n")
}

fn help_overlay_text() -> &'static str {
    "global: ctrl+q quit | ? help\n\
nav: j/k move | g/G first/last | ctrl+d/ctrl+u half page | f/b or tab tabs | 1-3 jump to tab | i edit mode\n\
edit: a add | e or enter edit row | d delete row | esc nav\n\
form: tab/shift+tab or up/down field | ctrl+u clear field | enter or ctrl+s submit | esc cancel"
}

fn status_text(state: &AppState, view_data: &ViewData) -> String {
    let (mode, hints) = match (&view_data.form, view_data.mode) {
        (Some(form), _) => (
            "FORM",
            format!("{} | enter submit | esc cancel", form.field_status()),
        ),
        (None, UiMode::Nav) => (
            "NAV",
            "j/k move | f/b tabs | i edit | ? help | ctrl+q quit".to_owned(),
        ),
        (None, UiMode::Edit) => (
            "EDIT",
            "a add | e edit | d delete | esc nav | ctrl+q quit".to_owned(),
        ),
    };
    match &state.status_line {
        Some(status) => format!("{mode} | {status} | {hints}"),
        None => format!("{mode} | {hints}"),
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::{
        InternalEvent, UiMode, ViewData, empty_table_text, handle_key_event, help_overlay_text,
        process_internal_events, render_form_overlay_text, status_text, sync_table_state,
        tab_title,
    };
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use hyra_app::{AppCommand, AppState, EntityKind, FormSession, FormState, RecordId};
    use hyra_testkit::{seed_demo_data, sequential_state};
    use std::sync::mpsc;

    fn internal_tx() -> mpsc::Sender<InternalEvent> {
        let (tx, _rx) = mpsc::channel();
        tx
    }

    fn press(state: &mut AppState, view_data: &mut ViewData, code: KeyCode) -> bool {
        handle_key_event(
            state,
            view_data,
            &internal_tx(),
            KeyEvent::new(code, KeyModifiers::NONE),
        )
    }

    fn type_text(state: &mut AppState, view_data: &mut ViewData, text: &str) {
        for ch in text.chars() {
            press(state, view_data, KeyCode::Char(ch));
        }
    }

    fn edit_mode_view_data() -> ViewData {
        ViewData {
            mode: UiMode::Edit,
            ..ViewData::default()
        }
    }

    #[test]
    fn ctrl_q_quits() {
        let mut state = AppState::default();
        let mut view_data = ViewData::default();
        let quit = handle_key_event(
            &mut state,
            &mut view_data,
            &internal_tx(),
            KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL),
        );
        assert!(quit);
    }

    #[test]
    fn i_enters_edit_mode_and_esc_returns_to_nav() {
        let mut state = AppState::default();
        let mut view_data = ViewData::default();

        press(&mut state, &mut view_data, KeyCode::Char('i'));
        assert_eq!(view_data.mode, UiMode::Edit);
        assert_eq!(state.status_line.as_deref(), Some("edit"));

        press(&mut state, &mut view_data, KeyCode::Esc);
        assert_eq!(view_data.mode, UiMode::Nav);
    }

    #[test]
    fn add_in_nav_mode_does_nothing() {
        let mut state = AppState::default();
        let mut view_data = ViewData::default();
        press(&mut state, &mut view_data, KeyCode::Char('a'));
        assert!(view_data.form.is_none());
        assert_eq!(state.form(), &FormSession::Closed);
    }

    #[test]
    fn tab_keys_switch_entity_and_reset_cursor() {
        let mut state = sequential_state();
        seed_demo_data(&mut state);
        let mut view_data = ViewData::default();
        sync_table_state(&state, &mut view_data);

        press(&mut state, &mut view_data, KeyCode::Char('G'));
        assert_eq!(view_data.table_state.selected_row, 7);

        press(&mut state, &mut view_data, KeyCode::Char('f'));
        assert_eq!(state.active_tab, EntityKind::Apartments);
        assert_eq!(view_data.table_state.selected_row, 0);

        press(&mut state, &mut view_data, KeyCode::Char('3'));
        assert_eq!(state.active_tab, EntityKind::Keys);

        press(&mut state, &mut view_data, KeyCode::Char('b'));
        assert_eq!(state.active_tab, EntityKind::Apartments);
    }

    #[test]
    fn row_movement_clamps_to_table() {
        let mut state = sequential_state();
        seed_demo_data(&mut state);
        let mut view_data = ViewData::default();

        press(&mut state, &mut view_data, KeyCode::Char('k'));
        assert_eq!(view_data.table_state.selected_row, 0);
        for _ in 0..20 {
            press(&mut state, &mut view_data, KeyCode::Char('j'));
        }
        assert_eq!(view_data.table_state.selected_row, 7);
        press(&mut state, &mut view_data, KeyCode::Char('g'));
        assert_eq!(view_data.table_state.selected_row, 0);
    }

    #[test]
    fn create_edit_delete_through_keys() {
        let mut state = sequential_state();
        let mut view_data = edit_mode_view_data();

        press(&mut state, &mut view_data, KeyCode::Char('a'));
        assert_eq!(
            view_data.form.as_ref().map(FormState::title),
            Some("Add tenant")
        );
        type_text(&mut state, &mut view_data, "Ann");
        press(&mut state, &mut view_data, KeyCode::Tab);
        type_text(&mut state, &mut view_data, "Lee");
        press(&mut state, &mut view_data, KeyCode::Tab);
        type_text(&mut state, &mut view_data, "a@x.com");
        press(&mut state, &mut view_data, KeyCode::Enter);

        assert!(view_data.form.is_none());
        assert_eq!(state.tenants().len(), 1);
        assert_eq!(state.tenants()[0].id, RecordId::from("1"));
        assert_eq!(state.tenants()[0].email, "a@x.com");

        press(&mut state, &mut view_data, KeyCode::Char('e'));
        assert_eq!(
            view_data.form.as_ref().map(FormState::title),
            Some("Edit tenant")
        );
        press(&mut state, &mut view_data, KeyCode::Tab);
        press(&mut state, &mut view_data, KeyCode::Tab);
        handle_key_event(
            &mut state,
            &mut view_data,
            &internal_tx(),
            KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL),
        );
        type_text(&mut state, &mut view_data, "ann@x.com");
        press(&mut state, &mut view_data, KeyCode::Enter);

        assert_eq!(state.tenants().len(), 1);
        assert_eq!(state.tenants()[0].id, RecordId::from("1"));
        assert_eq!(state.tenants()[0].email, "ann@x.com");
        assert_eq!(state.tenants()[0].first_name, "Ann");

        press(&mut state, &mut view_data, KeyCode::Char('d'));
        assert!(state.tenants().is_empty());
        assert_eq!(state.status_line.as_deref(), Some("tenant deleted"));
    }

    #[test]
    fn form_is_modal_and_esc_discards_draft() {
        let mut state = sequential_state();
        let mut view_data = edit_mode_view_data();

        press(&mut state, &mut view_data, KeyCode::Char('a'));
        type_text(&mut state, &mut view_data, "fb3");
        assert_eq!(state.active_tab, EntityKind::Tenants);
        assert_eq!(
            view_data
                .form
                .as_ref()
                .and_then(|form| form.focused())
                .map(|field| field.buffer.as_str()),
            Some("fb3")
        );

        press(&mut state, &mut view_data, KeyCode::Esc);
        assert!(view_data.form.is_none());
        assert_eq!(state.form(), &FormSession::Closed);
        assert!(state.tenants().is_empty());
        assert_eq!(view_data.mode, UiMode::Edit);
    }

    #[test]
    fn number_field_rejects_letters_with_status() {
        let mut state = sequential_state();
        state.dispatch(AppCommand::SelectTab(EntityKind::Keys));
        let mut view_data = edit_mode_view_data();

        press(&mut state, &mut view_data, KeyCode::Char('a'));
        press(&mut state, &mut view_data, KeyCode::BackTab);
        type_text(&mut state, &mut view_data, "2x");
        assert_eq!(
            state.status_line.as_deref(),
            Some("Amount takes numbers only")
        );
        press(&mut state, &mut view_data, KeyCode::Enter);

        assert_eq!(state.keys().len(), 1);
        assert_eq!(state.keys()[0].amount, 2.0);
    }

    #[test]
    fn edit_or_delete_on_empty_table_reports_nothing_selected() {
        let mut state = sequential_state();
        let mut view_data = edit_mode_view_data();

        press(&mut state, &mut view_data, KeyCode::Char('e'));
        assert!(view_data.form.is_none());
        assert_eq!(state.status_line.as_deref(), Some("no tenant selected"));
    }

    #[test]
    fn created_row_becomes_selected() {
        let mut state = sequential_state();
        seed_demo_data(&mut state);
        let mut view_data = edit_mode_view_data();

        press(&mut state, &mut view_data, KeyCode::Char('a'));
        type_text(&mut state, &mut view_data, "Zed");
        press(&mut state, &mut view_data, KeyCode::Enter);
        assert_eq!(view_data.table_state.selected_row, 8);
    }

    #[test]
    fn deleting_last_row_clamps_selection() {
        let mut state = sequential_state();
        seed_demo_data(&mut state);
        let mut view_data = edit_mode_view_data();

        press(&mut state, &mut view_data, KeyCode::Char('G'));
        press(&mut state, &mut view_data, KeyCode::Char('d'));
        assert_eq!(state.tenants().len(), 7);
        assert_eq!(view_data.table_state.selected_row, 6);
    }

    #[test]
    fn help_overlay_swallows_keys_until_closed() {
        let mut state = AppState::default();
        let mut view_data = ViewData::default();

        press(&mut state, &mut view_data, KeyCode::Char('?'));
        assert!(view_data.help_visible);
        press(&mut state, &mut view_data, KeyCode::Char('f'));
        assert_eq!(state.active_tab, EntityKind::Tenants);
        press(&mut state, &mut view_data, KeyCode::Esc);
        assert!(!view_data.help_visible);
        assert!(help_overlay_text().contains("ctrl+q quit"));
    }

    #[test]
    fn stale_status_clear_tokens_are_ignored() {
        let mut state = AppState::default();
        state.dispatch(AppCommand::SetStatus("tenant added".to_owned()));
        let view_data = ViewData {
            status_token: 2,
            ..ViewData::default()
        };
        let (tx, rx) = mpsc::channel();

        tx.send(InternalEvent::ClearStatus { token: 1 })
            .expect("send stale token");
        process_internal_events(&mut state, &view_data, &rx);
        assert_eq!(state.status_line.as_deref(), Some("tenant added"));

        tx.send(InternalEvent::ClearStatus { token: 2 })
            .expect("send current token");
        process_internal_events(&mut state, &view_data, &rx);
        assert_eq!(state.status_line, None);
    }

    #[test]
    fn status_text_reflects_mode_and_message() {
        let mut state = AppState::default();
        let mut view_data = ViewData::default();
        assert!(status_text(&state, &view_data).starts_with("NAV | "));

        state.dispatch(AppCommand::SetStatus("tenant added".to_owned()));
        view_data.mode = UiMode::Edit;
        assert!(status_text(&state, &view_data).starts_with("EDIT | tenant added | "));

        view_data.form = Some(FormState::open(EntityKind::Keys, None));
        assert!(status_text(&state, &view_data).contains("field Type (1/3)"));
    }

    #[test]
    fn form_overlay_lists_fields_in_schema_order() {
        let form = FormState::open(EntityKind::Apartments, None);
        let text = render_form_overlay_text(&form);
        let street = text.find("Street").expect("street line");
        let city = text.find("City").expect("city line");
        assert!(street < city);
        assert!(text.lines().next().is_some_and(|line| line.starts_with('>')));
        assert!(text.contains("esc cancel"));
    }

    #[test]
    fn tab_titles_show_counts_and_empty_hint() {
        let mut state = sequential_state();
        seed_demo_data(&mut state);
        assert_eq!(tab_title(EntityKind::Keys, &state), "Keys (10)");
        assert!(empty_table_text(EntityKind::Apartments).contains("no apartments yet"));
    }
}
