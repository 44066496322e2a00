/// Transcript scroll position with follow-the-tail behavior.
///
/// Follow mode keeps the newest line in view. It switches off when the user
/// scrolls away from the bottom and back on when they return to it, or when
/// the transcript revision changes (a message was appended).
#[derive(Debug, Clone)]
pub struct ScrollState {
    offset: u16,
    max_offset: u16,
    viewport: u16,
    follow_bottom: bool,
    seen_revision: Option<u64>,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollState {
    pub fn new() -> Self {
        Self {
            offset: 0,
            max_offset: 0,
            viewport: 0,
            follow_bottom: true,
            seen_revision: None,
        }
    }

    pub fn offset(&self) -> u16 {
        self.offset
    }

    pub fn is_following(&self) -> bool {
        self.follow_bottom
    }

    /// Recompute bounds for the current frame and return the offset to render at
    pub fn layout(&mut self, content_lines: usize, viewport: u16, revision: u64) -> u16 {
        self.viewport = viewport;
        self.max_offset = content_lines
            .saturating_sub(viewport as usize)
            .min(u16::MAX as usize) as u16;

        if self.seen_revision != Some(revision) {
            self.seen_revision = Some(revision);
            self.follow_bottom = true;
        }

        self.offset = if self.follow_bottom {
            self.max_offset
        } else {
            self.offset.min(self.max_offset)
        };
        self.offset
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.offset = self.offset.saturating_sub(lines);
        self.follow_bottom = self.offset >= self.max_offset;
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.offset = self.offset.saturating_add(lines).min(self.max_offset);
        self.follow_bottom = self.offset >= self.max_offset;
    }

    pub fn page_up(&mut self) {
        self.scroll_up(self.page());
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.page());
    }

    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
        self.follow_bottom = self.max_offset == 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.offset = self.max_offset;
        self.follow_bottom = true;
    }

    fn page(&self) -> u16 {
        self.viewport.saturating_sub(1).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follows_tail_by_default() {
        let mut scroll = ScrollState::new();
        assert_eq!(scroll.layout(50, 10, 1), 40);
        assert_eq!(scroll.layout(60, 10, 1), 50);
        assert!(scroll.is_following());
    }

    #[test]
    fn test_short_content_stays_at_top() {
        let mut scroll = ScrollState::new();
        assert_eq!(scroll.layout(3, 10, 1), 0);
        scroll.scroll_down(5);
        assert_eq!(scroll.offset(), 0);
        assert!(scroll.is_following());
    }

    #[test]
    fn test_scroll_up_pauses_follow() {
        let mut scroll = ScrollState::new();
        scroll.layout(50, 10, 1);
        scroll.scroll_up(5);
        assert!(!scroll.is_following());
        // Content grows (typing indicator) without a new message
        assert_eq!(scroll.layout(52, 10, 1), 35);
    }

    #[test]
    fn test_new_message_resumes_follow() {
        let mut scroll = ScrollState::new();
        scroll.layout(50, 10, 1);
        scroll.scroll_to_top();
        assert_eq!(scroll.layout(50, 10, 1), 0);
        assert_eq!(scroll.layout(58, 10, 2), 48);
        assert!(scroll.is_following());
    }

    #[test]
    fn test_returning_to_bottom_resumes_follow() {
        let mut scroll = ScrollState::new();
        scroll.layout(30, 10, 1);
        scroll.page_up();
        assert_eq!(scroll.offset(), 11);
        scroll.page_down();
        assert_eq!(scroll.offset(), 20);
        assert!(scroll.is_following());
    }

    #[test]
    fn test_viewport_shrink_clamps_offset() {
        let mut scroll = ScrollState::new();
        scroll.layout(30, 10, 1);
        scroll.scroll_up(2);
        assert_eq!(scroll.layout(30, 25, 1), 5);
    }
}
