use crate::list::ListAction;
use crate::state::{Focus, ListFocus, State, View};
use anyhow::Result;
use crossterm::{
    event,
    event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
};
use log::*;
use std::{
    sync::mpsc,
    thread,
    time::{Duration, Instant},
};

/// Specify terminal event poll rate in milliseconds.
///
const TICK_RATE_IN_MS: u64 = 60;

/// Specify different terminal event types.
///
#[derive(Debug)]
pub enum Event<I> {
    Input(I),
    Tick,
}

/// Specify struct for managing terminal events channel.
///
pub struct Handler {
    rx: mpsc::Receiver<Event<KeyEvent>>,
    _tx: mpsc::Sender<Event<KeyEvent>>,
}

impl Default for Handler {
    fn default() -> Self {
        Handler::new()
    }
}

impl Handler {
    /// Return new instance after spawning new input polling thread.
    ///
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let tx_clone = tx.clone();
        thread::spawn(move || loop {
            let tick_rate = Duration::from_millis(TICK_RATE_IN_MS);
            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(CrosstermEvent::Key(key)) => {
                        if tx_clone.send(Event::Input(key)).is_err() {
                            break;
                        }
                    }
                    Ok(_) => (),
                    Err(e) => {
                        error!("Failed to read terminal event: {}", e);
                        break;
                    }
                },
                Ok(false) => (),
                Err(e) => {
                    error!("Failed to poll terminal events: {}", e);
                    break;
                }
            }
            if tx_clone.send(Event::Tick).is_err() {
                break;
            }
        });
        Handler { rx, _tx: tx }
    }

    /// Receive next terminal event and handle it accordingly. Returns result
    /// with value true if should continue or false if exit was requested.
    ///
    pub fn handle_next(&self, state: &mut State) -> Result<bool> {
        match self.rx.recv()? {
            Event::Input(event) if event.kind == KeyEventKind::Press => {
                return Ok(handle_key(event, state, Instant::now()));
            }
            Event::Input(_) => (),
            Event::Tick => {
                state.tick(Instant::now());
            }
        }
        Ok(true)
    }
}

/// Apply a key press to state. Returns false if exit was requested.
///
pub fn handle_key(event: KeyEvent, state: &mut State, now: Instant) -> bool {
    let KeyEvent {
        code, modifiers, ..
    } = event;
    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        debug!("Processing exit terminal event '{:?}'...", event);
        return false;
    }

    if state.has_delete_confirmation() {
        match code {
            KeyCode::Char('y') | KeyCode::Enter => {
                state.confirm_delete();
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                state.cancel_delete();
            }
            _ => (),
        }
        return true;
    }

    if state.current_focus() == Focus::View && is_typing(state) {
        typing_key(code, modifiers, state, now);
        return true;
    }

    match code {
        KeyCode::Char('q') => {
            debug!("Processing exit terminal event '{:?}'...", event);
            return false;
        }
        KeyCode::Tab => {
            state.toggle_focus();
        }
        KeyCode::Char('b') => {
            state.toggle_sidebar();
        }
        KeyCode::Char('l') => {
            state.toggle_log();
        }
        KeyCode::Char('r') => {
            state.list_action(ListAction::Refresh, now);
        }
        _ => match state.current_focus() {
            Focus::Sidebar => sidebar_key(code, state),
            Focus::View => view_key(code, state, now),
        },
    }
    true
}

/// Whether keys currently go to a text input.
///
fn is_typing(state: &State) -> bool {
    let pager = match state.current_view() {
        View::Departments => state.departments().pager(),
        View::Faqs => state.faqs().pager(),
        _ => return false,
    };
    match state.list_focus() {
        ListFocus::Filter => true,
        ListFocus::Pager => pager.is_jumping(),
        ListFocus::Rows => false,
    }
}

fn typing_key(code: KeyCode, modifiers: KeyModifiers, state: &mut State, now: Instant) {
    match (state.list_focus(), code) {
        (ListFocus::Filter, KeyCode::Char('u')) if modifiers.contains(KeyModifiers::CONTROL) => {
            state.list_action(ListAction::FilterClear, now);
        }
        (ListFocus::Filter, KeyCode::Char(c)) => {
            state.list_action(ListAction::FilterChar(c), now);
        }
        (ListFocus::Filter, KeyCode::Backspace) => {
            state.list_action(ListAction::FilterBackspace, now);
        }
        (ListFocus::Filter, KeyCode::Esc | KeyCode::Enter | KeyCode::Down) => {
            state.set_list_focus(ListFocus::Rows);
        }
        (ListFocus::Pager, KeyCode::Char(c)) => {
            state.list_action(ListAction::PagerChar(c), now);
        }
        (ListFocus::Pager, KeyCode::Backspace) => {
            state.list_action(ListAction::PagerBackspace, now);
        }
        (ListFocus::Pager, KeyCode::Enter) => {
            state.list_action(ListAction::PagerCommit, now);
        }
        (ListFocus::Pager, KeyCode::Esc) => {
            state.list_action(ListAction::PagerCancel, now);
        }
        _ => (),
    }
}

fn sidebar_key(code: KeyCode, state: &mut State) {
    match code {
        KeyCode::Down | KeyCode::Char('j') => {
            state.sidebar_next();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.sidebar_previous();
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            state.sidebar_activate();
        }
        _ => (),
    }
}

fn view_key(code: KeyCode, state: &mut State, now: Instant) {
    match state.current_view() {
        View::Departments | View::Faqs if state.list_focus() == ListFocus::Pager => {
            pager_key(code, state, now)
        }
        View::Departments | View::Faqs | View::PurchaseQuotes => list_key(code, state, now),
        View::Assignments => tree_key(code, state),
    }
}

fn pager_key(code: KeyCode, state: &mut State, now: Instant) {
    match code {
        KeyCode::Left | KeyCode::Char('h') => {
            state.list_action(ListAction::PagerLeft, now);
        }
        KeyCode::Right => {
            state.list_action(ListAction::PagerRight, now);
        }
        KeyCode::Enter => {
            state.list_action(ListAction::PagerActivate, now);
        }
        KeyCode::Esc | KeyCode::Char('p') | KeyCode::Up => {
            state.set_list_focus(ListFocus::Rows);
        }
        _ => (),
    }
}

fn list_key(code: KeyCode, state: &mut State, now: Instant) {
    match code {
        KeyCode::Down | KeyCode::Char('j') => {
            state.next_row();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.previous_row();
        }
        KeyCode::Char(']') | KeyCode::Right => {
            state.list_action(ListAction::NextPage, now);
        }
        KeyCode::Char('[') | KeyCode::Left => {
            state.list_action(ListAction::PreviousPage, now);
        }
        KeyCode::Char('s') => {
            state.list_action(ListAction::CyclePageSize, now);
        }
        KeyCode::Char('/') => {
            state.set_list_focus(ListFocus::Filter);
        }
        KeyCode::Char('p') => {
            state.set_list_focus(ListFocus::Pager);
        }
        KeyCode::Char('d') if state.current_view() == View::Departments => {
            if let Err(e) = state.request_delete() {
                debug!("Ignoring delete request: {}", e);
            }
        }
        _ => (),
    }
}

fn tree_key(code: KeyCode, state: &mut State) {
    match code {
        KeyCode::Down | KeyCode::Char('j') => {
            state.next_row();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.previous_row();
        }
        KeyCode::Enter | KeyCode::Right => {
            state.tree_expand();
        }
        KeyCode::Char(' ') => {
            state.tree_toggle_check();
        }
        KeyCode::Char('w') => {
            state.save_assignments();
        }
        _ => (),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::PageResponse;
    use crate::config::Config;
    use crate::events::network::Event as NetworkEvent;
    use crate::logger::log_buffer;
    use crate::ui::Theme;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn state() -> (State, mpsc::Receiver<NetworkEvent>) {
        let (tx, rx) = mpsc::channel();
        let state = State::new(tx, &Config::new(), Theme::default(), log_buffer());
        (state, rx)
    }

    #[test]
    fn test_ctrl_c_exits() {
        let mut state = State::default();
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(!handle_key(event, &mut state, Instant::now()));
    }

    #[test]
    fn test_filter_focus_captures_letters() {
        let (mut state, rx) = state();
        state.select_view(View::Departments);
        rx.try_iter().count();
        let now = Instant::now();

        handle_key(press(KeyCode::Char('/')), &mut state, now);
        assert_eq!(state.list_focus(), ListFocus::Filter);
        for c in ['q', 'b', 'l'] {
            assert!(handle_key(press(KeyCode::Char(c)), &mut state, now));
        }
        assert_eq!(state.departments().filter_input(), "qbl");
        assert!(state.sidebar().is_open());
        assert!(!state.is_log_shown());

        handle_key(press(KeyCode::Esc), &mut state, now);
        assert_eq!(state.list_focus(), ListFocus::Rows);
    }

    #[test]
    fn test_pager_jump_by_keys() {
        let (mut state, rx) = state();
        state.select_view(View::Departments);
        let ticket = match rx.try_recv().unwrap() {
            NetworkEvent::Departments(ticket) => ticket,
            other => panic!("unexpected event {:?}", other),
        };
        state.apply_departments(
            ticket.generation,
            Ok(PageResponse {
                data: vec![],
                total_pages: 20,
            }),
        );
        let now = Instant::now();

        // 1 2 ... 20: the ellipsis is the third entry
        handle_key(press(KeyCode::Char('p')), &mut state, now);
        for _ in 0..2 {
            handle_key(press(KeyCode::Right), &mut state, now);
        }
        handle_key(press(KeyCode::Enter), &mut state, now);
        handle_key(press(KeyCode::Char('1')), &mut state, now);
        handle_key(press(KeyCode::Char('2')), &mut state, now);
        handle_key(press(KeyCode::Enter), &mut state, now);

        match rx.try_recv().unwrap() {
            NetworkEvent::Departments(ticket) => assert_eq!(ticket.query.page, 12),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_delete_dialog_swallows_other_keys() {
        let (mut state, rx) = state();
        state.select_view(View::Departments);
        let ticket = match rx.try_recv().unwrap() {
            NetworkEvent::Departments(ticket) => ticket,
            other => panic!("unexpected event {:?}", other),
        };
        state.apply_departments(
            ticket.generation,
            Ok(PageResponse {
                data: vec![crate::api::Department {
                    id: "d1".to_string(),
                    name: "Finance".to_string(),
                    code: "FIN".to_string(),
                    member_count: 4,
                }],
                total_pages: 1,
            }),
        );
        let now = Instant::now();
        handle_key(press(KeyCode::Char('d')), &mut state, now);
        assert_eq!(state.delete_confirmation(), Some("Finance"));

        assert!(handle_key(press(KeyCode::Char('q')), &mut state, now));
        assert!(state.has_delete_confirmation());

        handle_key(press(KeyCode::Char('y')), &mut state, now);
        assert_eq!(
            rx.try_recv().unwrap(),
            NetworkEvent::DeleteDepartment {
                id: "d1".to_string(),
                origin: crate::list::DeleteOrigin {
                    page: 1,
                    rows_on_page: 1,
                },
            }
        );
    }
}
