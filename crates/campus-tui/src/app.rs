use campus_core::{quick_actions, Config, Conversation, Reply, Submission};
use ratatui::layout::Rect;
use tokio::sync::mpsc;

use crate::scroll::ScrollState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    QuickActions,
    Transcript,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Input => Focus::QuickActions,
            Focus::QuickActions => Focus::Transcript,
            Focus::Transcript => Focus::Input,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Input => Focus::Transcript,
            Focus::QuickActions => Focus::Input,
            Focus::Transcript => Focus::QuickActions,
        }
    }
}

pub struct App {
    pub should_quit: bool,
    pub focus: Focus,
    pub config: Config,
    pub conversation: Conversation,

    // Quick-action row
    pub selected_action: usize,

    // Transcript view
    pub scroll: ScrollState,
    pub animation_frame: u8,

    // Areas from the last render, for mouse hit-testing
    pub action_areas: Vec<Rect>,
    pub transcript_area: Option<Rect>,
    pub input_area: Option<Rect>,
}

impl App {
    pub fn new(config: Config, replies: mpsc::UnboundedSender<Reply>) -> Self {
        let conversation = Conversation::new(&config, replies);
        Self {
            should_quit: false,
            focus: Focus::Input,
            config,
            conversation,
            selected_action: 0,
            scroll: ScrollState::new(),
            animation_frame: 0,
            action_areas: Vec::new(),
            transcript_area: None,
            input_area: None,
        }
    }

    pub fn submit_draft(&mut self) -> Submission {
        let outcome = self.conversation.submit_draft();
        if outcome == Submission::Accepted {
            self.scroll.scroll_to_bottom();
        }
        outcome
    }

    pub fn trigger_action(&mut self, index: usize) -> Option<Submission> {
        let outcome = self.conversation.trigger_quick_action(index)?;
        self.selected_action = index;
        if outcome == Submission::Accepted {
            self.scroll.scroll_to_bottom();
        }
        Some(outcome)
    }

    pub fn deliver(&mut self, reply: Reply) {
        self.conversation.deliver(reply);
    }

    pub fn next_action(&mut self) {
        let count = quick_actions().len();
        self.selected_action = (self.selected_action + 1) % count;
    }

    pub fn prev_action(&mut self) {
        let count = quick_actions().len();
        self.selected_action = (self.selected_action + count - 1) % count;
    }

    /// Cycles the typing dots: 0, 1, 2
    pub fn tick_animation(&mut self) {
        self.animation_frame = (self.animation_frame + 1) % 3;
    }

    pub fn action_at(&self, column: u16, row: u16) -> Option<usize> {
        self.action_areas
            .iter()
            .position(|area| contains(*area, column, row))
    }

    pub fn in_input(&self, column: u16, row: u16) -> bool {
        self.input_area.is_some_and(|area| contains(area, column, row))
    }

    /// True before the first render, so wheel events are never lost
    pub fn in_transcript(&self, column: u16, row: u16) -> bool {
        self.transcript_area.map_or(true, |area| contains(area, column, row))
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let (tx, _rx) = mpsc::unbounded_channel();
        App::new(Config::default(), tx)
    }

    #[test]
    fn test_focus_cycle() {
        assert_eq!(Focus::Input.next().next().next(), Focus::Input);
        assert_eq!(Focus::Input.prev(), Focus::Transcript);
        assert_eq!(Focus::QuickActions.next().prev(), Focus::QuickActions);
    }

    #[test]
    fn test_action_selection_wraps() {
        let mut app = app();
        app.prev_action();
        assert_eq!(app.selected_action, 4);
        app.next_action();
        assert_eq!(app.selected_action, 0);
    }

    #[test]
    fn test_animation_cycles() {
        let mut app = app();
        for expected in [1, 2, 0, 1] {
            app.tick_animation();
            assert_eq!(app.animation_frame, expected);
        }
    }

    #[test]
    fn test_hit_testing() {
        let mut app = app();
        app.action_areas = vec![Rect::new(0, 5, 10, 3), Rect::new(10, 5, 10, 3)];
        app.input_area = Some(Rect::new(0, 20, 40, 3));
        assert_eq!(app.action_at(3, 6), Some(0));
        assert_eq!(app.action_at(10, 7), Some(1));
        assert_eq!(app.action_at(20, 6), None);
        assert_eq!(app.action_at(3, 8), None);
        assert!(app.in_input(39, 22));
        assert!(!app.in_input(40, 22));

        assert!(app.in_transcript(0, 0));
        app.transcript_area = Some(Rect::new(0, 8, 40, 12));
        assert!(app.in_transcript(5, 10));
        assert!(!app.in_transcript(5, 21));
    }
}
