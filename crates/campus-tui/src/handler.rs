use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use crate::app::{App, Focus};
use crate::tui::AppEvent;

const WHEEL_LINES: u16 = 3;

pub fn handle_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Resize(_, _) => {}
        AppEvent::Tick => app.tick_animation(),
        AppEvent::Reply(reply) => app.deliver(reply),
    }
}

/// '1'..='5' → quick-action index
fn action_index(c: char) -> Option<usize> {
    let n = c.to_digit(10)? as usize;
    (1..=campus_core::quick_actions().len())
        .contains(&n)
        .then(|| n - 1)
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keys that work in any focus
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    if key.modifiers.contains(KeyModifiers::ALT) {
        if let KeyCode::Char(c) = key.code {
            if let Some(idx) = action_index(c) {
                app.trigger_action(idx);
            }
        }
        return;
    }

    match key.code {
        KeyCode::Tab => {
            app.focus = app.focus.next();
            return;
        }
        KeyCode::BackTab => {
            app.focus = app.focus.prev();
            return;
        }
        KeyCode::PageUp => {
            app.scroll.page_up();
            return;
        }
        KeyCode::PageDown => {
            app.scroll.page_down();
            return;
        }
        _ => {}
    }

    match app.focus {
        Focus::Input => handle_input(app, key),
        Focus::QuickActions => handle_quick_actions(app, key),
        Focus::Transcript => handle_transcript(app, key),
    }
}

fn handle_input(app: &mut App, key: KeyEvent) {
    // Same gate as the send hint: blank or pending submissions are no-ops
    if key.code == KeyCode::Enter {
        app.submit_draft();
        return;
    }

    let draft = app.conversation.draft_mut();
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => draft.insert(c),
        KeyCode::Backspace => draft.backspace(),
        KeyCode::Delete => draft.delete(),
        KeyCode::Left => draft.move_left(),
        KeyCode::Right => draft.move_right(),
        KeyCode::Home => draft.move_home(),
        KeyCode::End => draft.move_end(),
        _ => {}
    }
}

fn handle_quick_actions(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Esc => app.focus = Focus::Input,
        KeyCode::Left | KeyCode::Char('h') => app.prev_action(),
        KeyCode::Right | KeyCode::Char('l') => app.next_action(),
        KeyCode::Enter | KeyCode::Char(' ') => {
            app.trigger_action(app.selected_action);
        }
        KeyCode::Char(c) => {
            if let Some(idx) = action_index(c) {
                app.trigger_action(idx);
            }
        }
        _ => {}
    }
}

fn handle_transcript(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Esc => app.focus = Focus::Input,
        KeyCode::Up | KeyCode::Char('k') => app.scroll.scroll_up(1),
        KeyCode::Down | KeyCode::Char('j') => app.scroll.scroll_down(1),
        KeyCode::Char('g') | KeyCode::Home => app.scroll.scroll_to_top(),
        KeyCode::Char('G') | KeyCode::End => app.scroll.scroll_to_bottom(),
        KeyCode::Char(c) => {
            if let Some(idx) = action_index(c) {
                app.trigger_action(idx);
            }
        }
        _ => {}
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollUp if app.in_transcript(mouse.column, mouse.row) => {
            app.scroll.scroll_up(WHEEL_LINES);
        }
        MouseEventKind::ScrollDown if app.in_transcript(mouse.column, mouse.row) => {
            app.scroll.scroll_down(WHEEL_LINES);
        }
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(idx) = app.action_at(mouse.column, mouse.row) {
                app.focus = Focus::QuickActions;
                app.trigger_action(idx);
            } else if app.in_input(mouse.column, mouse.row) {
                app.focus = Focus::Input;
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_core::resolver::{DINING_REPLY, REGISTRATION_REPLY};
    use campus_core::{Config, Reply, Sender};
    use ratatui::layout::Rect;
    use tokio::sync::mpsc;

    fn app() -> (App, mpsc::UnboundedReceiver<Reply>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (App::new(Config::default(), tx), rx)
    }

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            handle_event(app, key(KeyCode::Char(c)));
        }
    }

    fn transcript_len(app: &App) -> usize {
        app.conversation.current_transcript().len()
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_and_enter_submits() {
        let (mut app, mut rx) = app();
        type_text(&mut app, "meal times?");
        assert_eq!(app.conversation.draft().as_str(), "meal times?");

        handle_event(&mut app, key(KeyCode::Enter));
        assert!(app.conversation.is_pending());
        assert!(app.conversation.draft().as_str().is_empty());
        assert_eq!(transcript_len(&app), 2);

        let reply = rx.recv().await.unwrap();
        handle_event(&mut app, AppEvent::Reply(reply));
        assert!(!app.conversation.is_pending());
        let last = app.conversation.current_transcript().last().unwrap();
        assert_eq!(last.sender(), Sender::Bot);
        assert_eq!(last.content(), DINING_REPLY);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_enter_yields_one_cycle() {
        let (mut app, mut rx) = app();
        type_text(&mut app, "class");
        handle_event(&mut app, key(KeyCode::Enter));
        type_text(&mut app, "food");
        handle_event(&mut app, key(KeyCode::Enter));
        handle_event(&mut app, key(KeyCode::Enter));

        assert_eq!(transcript_len(&app), 2);
        assert_eq!(app.conversation.draft().as_str(), "food");

        let reply = rx.recv().await.unwrap();
        handle_event(&mut app, AppEvent::Reply(reply));
        tokio::time::advance(std::time::Duration::from_secs(5)).await;
        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err());
        assert_eq!(transcript_len(&app), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_enter_is_noop() {
        let (mut app, _rx) = app();
        type_text(&mut app, "   ");
        handle_event(&mut app, key(KeyCode::Enter));
        assert!(!app.conversation.is_pending());
        assert_eq!(transcript_len(&app), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_quick_action_keys() {
        let (mut app, mut rx) = app();
        handle_event(&mut app, key(KeyCode::Tab));
        assert_eq!(app.focus, Focus::QuickActions);

        handle_event(&mut app, key(KeyCode::Left));
        assert_eq!(app.selected_action, 4);
        handle_event(&mut app, key(KeyCode::Enter));
        assert!(app.conversation.is_pending());
        let sent = &app.conversation.current_transcript().all()[1];
        assert_eq!(sent.content(), "How do I register for courses?");

        let reply = rx.recv().await.unwrap();
        assert_eq!(reply.content(), REGISTRATION_REPLY);
    }

    #[tokio::test(start_paused = true)]
    async fn test_alt_digit_triggers_from_input() {
        let (mut app, _rx) = app();
        let event = AppEvent::Key(KeyEvent::new(KeyCode::Char('3'), KeyModifiers::ALT));
        handle_event(&mut app, event);
        assert_eq!(app.selected_action, 2);
        assert!(app.conversation.draft().as_str().is_empty());
        let sent = &app.conversation.current_transcript().all()[1];
        assert_eq!(sent.content(), "What are the dining hall hours today?");
    }

    #[tokio::test(start_paused = true)]
    async fn test_digit_in_input_is_text() {
        let (mut app, _rx) = app();
        type_text(&mut app, "room 201");
        assert_eq!(app.conversation.draft().as_str(), "room 201");
        assert!(!app.conversation.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_quick_action_blocked_while_pending() {
        let (mut app, _rx) = app();
        app.focus = Focus::Transcript;
        handle_event(&mut app, key(KeyCode::Char('1')));
        handle_event(&mut app, key(KeyCode::Char('2')));
        assert_eq!(transcript_len(&app), 2);
        assert_eq!(app.selected_action, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_mouse_click_on_action() {
        let (mut app, _rx) = app();
        app.action_areas = vec![Rect::new(0, 0, 10, 3), Rect::new(10, 0, 10, 3)];
        let click = AppEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 12,
            row: 1,
            modifiers: KeyModifiers::NONE,
        });
        handle_event(&mut app, click);
        assert_eq!(app.focus, Focus::QuickActions);
        let sent = &app.conversation.current_transcript().all()[1];
        assert_eq!(sent.content(), "Where is the library located?");
    }

    #[test]
    fn test_ctrl_c_and_q() {
        let (mut app, _rx) = app();
        type_text(&mut app, "q");
        assert!(!app.should_quit);
        handle_event(&mut app, key(KeyCode::Esc));
        handle_event(&mut app, AppEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(app.should_quit);
        assert_eq!(app.conversation.draft().as_str(), "q");
    }

    #[test]
    fn test_tick_and_resize() {
        let (mut app, _rx) = app();
        handle_event(&mut app, AppEvent::Tick);
        handle_event(&mut app, AppEvent::Resize(80, 24));
        assert_eq!(app.animation_frame, 1);
    }

    #[test]
    fn test_action_index() {
        assert_eq!(action_index('1'), Some(0));
        assert_eq!(action_index('5'), Some(4));
        assert_eq!(action_index('0'), None);
        assert_eq!(action_index('6'), None);
        assert_eq!(action_index('x'), None);
    }
}
