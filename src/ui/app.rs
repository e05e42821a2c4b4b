use std::io;
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use ratatui::Terminal;

use crate::config::Config;
use crate::date_header;
use crate::error::Result;
use crate::prefs::CelebrationStore;
use crate::view_model::{TaskViewModel, ViewEvent};

use super::view;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Focus {
    Input,
    List,
}

pub struct AppState {
    pub(crate) model: TaskViewModel,
    pub(crate) focus: Focus,
    pub(crate) status_message: Option<String>,
    // Filled in by the renderer so mouse clicks can be mapped back to rows.
    pub(crate) input_area: Option<Rect>,
    pub(crate) list_area: Option<Rect>,
    pub(crate) list_state: ListState,
    // Date the header was last rendered for.
    pub(crate) header_date: NaiveDate,
    events: Receiver<ViewEvent>,
    poll: Duration,
}

impl AppState {
    pub fn new(mut model: TaskViewModel) -> Self {
        let events = model.subscribe();
        let poll = Duration::from_millis(model.config().ui.poll_ms);
        Self {
            model,
            focus: Focus::Input,
            status_message: None,
            input_area: None,
            list_area: None,
            list_state: ListState::default(),
            header_date: date_header::today(),
            events,
            poll,
        }
    }

    /// Consume pending view events. Returns whether a redraw is needed.
    fn drain_events(&mut self) -> bool {
        let mut changed = false;
        for event in self.events.try_iter() {
            tracing::trace!(?event, "view event");
            changed = true;
        }
        changed
    }

    /// Track the local date. Returns whether the header needs a redraw.
    fn date_rolled_over(&mut self, today: NaiveDate) -> bool {
        if self.header_date == today {
            return false;
        }
        tracing::debug!(%today, "date changed");
        self.header_date = today;
        true
    }

    /// Wait no longer than the poll interval or the next queued deadline.
    fn poll_timeout(&self, now: Instant) -> Duration {
        match self.model.next_deadline() {
            Some(deadline) => self.poll.min(deadline.saturating_duration_since(now)),
            None => self.poll,
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Input if !self.model.tasks().is_empty() => Focus::List,
            _ => Focus::Input,
        };
        if self.focus == Focus::List && self.model.selected().is_none() {
            self.model.select(0);
        }
    }

    /// List row under the given terminal cell, if any
    fn row_at(&self, column: u16, row: u16) -> Option<usize> {
        let area = self.list_area?;
        let inner_top = area.y + 1;
        let inner_bottom = area.y + area.height.saturating_sub(1);
        if column <= area.x
            || column >= area.x + area.width.saturating_sub(1)
            || row < inner_top
            || row >= inner_bottom
        {
            return None;
        }
        let index = self.list_state.offset() + (row - inner_top) as usize;
        (index < self.model.tasks().len()).then_some(index)
    }

    pub(crate) fn footer_hint(&self) -> &'static str {
        match self.focus {
            Focus::Input => "enter add  tab list  ctrl-c quit",
            Focus::List => "space toggle  j/k move  tab input  q quit",
        }
    }
}

pub fn run(config: Config, store: Box<dyn CelebrationStore>) -> Result<()> {
    let model = TaskViewModel::new(config, store);
    let mut app = AppState::new(model);
    run_terminal(&mut app)
}

fn run_terminal(app: &mut AppState) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    let mut dirty = true;
    loop {
        app.model.tick(Instant::now());
        if app.drain_events() {
            dirty = true;
        }
        if app.date_rolled_over(date_header::today()) {
            dirty = true;
        }

        if dirty {
            terminal.draw(|frame| view::render(frame, app))?;
            dirty = false;
        }

        if event::poll(app.poll_timeout(Instant::now()))? {
            match event::read()? {
                Event::Key(key) => {
                    if handle_key(app, key, Instant::now()) {
                        break;
                    }
                    dirty = true;
                }
                Event::Mouse(mouse) => {
                    if handle_mouse(app, mouse, Instant::now()) {
                        dirty = true;
                    }
                }
                Event::Resize(_, _) => dirty = true,
                _ => {}
            }
        }
    }
    Ok(())
}

/// Apply a key press. Returns `true` when the app should exit.
fn handle_key(app: &mut AppState, key: KeyEvent, now: Instant) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }
    app.status_message = None;

    if matches!(key.code, KeyCode::Tab | KeyCode::BackTab) {
        app.toggle_focus();
        return false;
    }

    match app.focus {
        Focus::Input => {
            match key.code {
                KeyCode::Enter => {
                    let had_text = app.model.can_submit();
                    if app.model.submit() == 0 && had_text {
                        app.status_message = Some("Nothing to add".to_string());
                    }
                }
                KeyCode::Esc | KeyCode::Down => app.toggle_focus(),
                KeyCode::Backspace => app.model.backspace(),
                KeyCode::Delete => app.model.delete(),
                KeyCode::Left => app.model.move_cursor_left(),
                KeyCode::Right => app.model.move_cursor_right(),
                KeyCode::Home => app.model.move_cursor_home(),
                KeyCode::End => app.model.move_cursor_end(),
                KeyCode::Char(ch) => {
                    if !key.modifiers.contains(KeyModifiers::CONTROL) && !ch.is_control() {
                        app.model.insert_char(ch);
                    }
                }
                _ => {}
            }
            false
        }
        Focus::List => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => true,
            KeyCode::Char('j') | KeyCode::Down => {
                app.model.move_selection(1);
                false
            }
            KeyCode::Char('k') | KeyCode::Up => {
                app.model.move_selection(-1);
                false
            }
            KeyCode::Char('g') | KeyCode::Home => {
                app.model.select(0);
                false
            }
            KeyCode::Char('G') | KeyCode::End => {
                let last = app.model.tasks().len().saturating_sub(1);
                app.model.select(last);
                false
            }
            KeyCode::Char('i') | KeyCode::Char('/') => {
                app.focus = Focus::Input;
                false
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                if let Err(err) = app.model.toggle_selected(now) {
                    app.status_message = Some(err.to_string());
                }
                false
            }
            _ => false,
        },
    }
}

/// Apply a mouse event. Returns whether state changed.
fn handle_mouse(app: &mut AppState, mouse: MouseEvent, now: Instant) -> bool {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return false;
    }

    if let Some(index) = app.row_at(mouse.column, mouse.row) {
        app.focus = Focus::List;
        if let Err(err) = app.model.toggle_at(index, now) {
            app.status_message = Some(err.to_string());
        }
        return true;
    }

    let in_input = app.input_area.is_some_and(|area| {
        mouse.column >= area.x
            && mouse.column < area.x + area.width
            && mouse.row >= area.y
            && mouse.row < area.y + area.height
    });
    if in_input && app.focus != Focus::Input {
        app.focus = Focus::Input;
        return true;
    }
    false
}
