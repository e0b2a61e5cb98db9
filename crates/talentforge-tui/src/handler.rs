use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use talentforge_core::{Effect, InputEdit, ViewMode};

use crate::app::{App, Focus};
use crate::keymap::Action;
use crate::tui::AppEvent;

/// Rows moved per mouse wheel notch.
const WHEEL_ROWS: u16 = 3;

/// Route one event to the dashboard. Returns the effects to execute.
pub fn handle_event(app: &mut App, event: AppEvent) -> Vec<Effect> {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Paste(text) => {
            paste(app, &text);
            Vec::new()
        }
        AppEvent::Resize(_, _) => Vec::new(),
        AppEvent::Tick => {
            app.tick_animation();
            Vec::new()
        }
        AppEvent::Timer(timer) => app.dashboard.on_timer(timer),
        AppEvent::News(result) => app.dashboard.on_news(result),
        AppEvent::Copied(result) => app.dashboard.on_copied(result),
        AppEvent::Position(result) => app.dashboard.on_position(result),
    }
}

fn handle_key(app: &mut App, key: KeyEvent) -> Vec<Effect> {
    if let Some(action) = app.keymap.lookup(&key) {
        return perform(app, action);
    }

    match app.focus {
        Focus::Input => handle_input_key(app, key),
        Focus::Transcript => handle_transcript_key(app, key),
        Focus::Suggestions => {
            handle_suggestions_key(app, key);
            Vec::new()
        }
    }
}

fn perform(app: &mut App, action: Action) -> Vec<Effect> {
    match action {
        Action::Quit => {
            app.should_quit = true;
            Vec::new()
        }
        Action::ToggleSidebar => {
            app.dashboard.toggle_sidebar();
            app.ensure_focus_visible();
            Vec::new()
        }
        Action::ToggleTheme => app.dashboard.toggle_theme(),
        Action::NewChat => {
            app.new_chat();
            Vec::new()
        }
        Action::RefreshWeather => app.dashboard.refresh_weather(),
        Action::Geolocate => app.dashboard.geolocate(),
        Action::ApplySuggestion(idx) => {
            app.apply_suggestion(idx);
            Vec::new()
        }
        Action::CycleFocus => {
            app.cycle_focus();
            Vec::new()
        }
    }
}

/// Pasted text goes into the visible input as-is. Line breaks stay line
/// breaks instead of submitting.
fn paste(app: &mut App, text: &str) {
    app.focus = Focus::Input;
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    for c in normalized.chars() {
        app.dashboard.edit(InputEdit::Insert(c));
    }
}

fn handle_input_key(app: &mut App, key: KeyEvent) -> Vec<Effect> {
    let edit = match key.code {
        KeyCode::Enter => {
            let newline_modifier = key
                .modifiers
                .intersects(KeyModifiers::ALT | KeyModifiers::SHIFT);
            return app.dashboard.press_enter(newline_modifier);
        }
        KeyCode::Esc => {
            app.focus = match app.dashboard.view_mode() {
                ViewMode::Welcome => Focus::Suggestions,
                ViewMode::Conversation => Focus::Transcript,
            };
            return Vec::new();
        }
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            InputEdit::Insert(c)
        }
        KeyCode::Backspace => InputEdit::Backspace,
        KeyCode::Delete => InputEdit::Delete,
        KeyCode::Left => InputEdit::Left,
        KeyCode::Right => InputEdit::Right,
        KeyCode::Home => InputEdit::Home,
        KeyCode::End => InputEdit::End,
        _ => return Vec::new(),
    };

    app.dashboard.edit(edit);
    Vec::new()
}

fn handle_transcript_key(app: &mut App, key: KeyEvent) -> Vec<Effect> {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.select_next_reply(),
        KeyCode::Char('k') | KeyCode::Up => app.select_prev_reply(),
        KeyCode::Char('c') | KeyCode::Char('y') => return app.copy_selected(),
        KeyCode::Char('g') => app.dashboard.scroll_transcript_to_top(),
        KeyCode::Char('G') => return app.dashboard.scroll_transcript_to_latest(),
        KeyCode::PageUp => app.dashboard.scroll_transcript_up(page(app)),
        KeyCode::PageDown => app.dashboard.scroll_transcript_down(page(app)),
        KeyCode::Char('i') | KeyCode::Enter => app.focus = Focus::Input,
        KeyCode::Esc | KeyCode::Char('q') => app.should_quit = true,
        _ => {}
    }
    Vec::new()
}

fn handle_suggestions_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.suggestion_nav_down(),
        KeyCode::Char('k') | KeyCode::Up => app.suggestion_nav_up(),
        KeyCode::Enter => app.apply_suggestion(app.suggestion_idx),
        KeyCode::Char(c @ '1'..='4') => {
            if let Some(idx) = c.to_digit(10) {
                app.apply_suggestion(idx as usize - 1);
            }
        }
        KeyCode::Char('i') => app.focus = Focus::Input,
        KeyCode::Esc | KeyCode::Char('q') => app.should_quit = true,
        _ => {}
    }
}

fn page(app: &App) -> u16 {
    app.areas
        .transcript
        .map(|r| r.height.saturating_sub(2))
        .unwrap_or(1)
        .max(1)
}

fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

fn hit(area: Option<Rect>, x: u16, y: u16) -> bool {
    area.map(|r| point_in_rect(x, y, r)).unwrap_or(false)
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
    let (x, y) = (mouse.column, mouse.row);
    let in_transcript = hit(app.areas.transcript, x, y);

    match mouse.kind {
        MouseEventKind::ScrollDown if in_transcript => {
            app.dashboard.scroll_transcript_down(WHEEL_ROWS);
            Vec::new()
        }
        MouseEventKind::ScrollUp if in_transcript => {
            app.dashboard.scroll_transcript_up(WHEEL_ROWS);
            Vec::new()
        }
        MouseEventKind::Down(MouseButton::Left) => handle_click(app, x, y),
        _ => Vec::new(),
    }
}

fn handle_click(app: &mut App, x: u16, y: u16) -> Vec<Effect> {
    let areas = &app.areas;

    if hit(areas.send, x, y) {
        return app.dashboard.submit();
    }
    if let Some(&(_, id)) = areas.copy.iter().find(|(r, _)| point_in_rect(x, y, *r)) {
        app.selected_reply = Some(id);
        return app.dashboard.copy_message(id);
    }
    if let Some(&(_, idx)) = areas.suggestions.iter().find(|(r, _)| point_in_rect(x, y, *r)) {
        app.apply_suggestion(idx);
        return Vec::new();
    }
    if hit(areas.sidebar_toggle, x, y) {
        return perform(app, Action::ToggleSidebar);
    }
    if hit(areas.theme_toggle, x, y) {
        return perform(app, Action::ToggleTheme);
    }
    if hit(areas.weather_refresh, x, y) {
        return perform(app, Action::RefreshWeather);
    }
    if hit(areas.weather_locate, x, y) {
        return perform(app, Action::Geolocate);
    }
    if hit(areas.input, x, y) {
        app.focus = Focus::Input;
    } else if hit(areas.transcript, x, y) {
        app.focus = Focus::Transcript;
    }
    Vec::new()
}
