use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{block::Title, Block, Borders, Paragraph, Wrap},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};
use campus_core::{quick_actions, ColorTag, Icon, Message, Sender, TimeFormat};
use crate::app::{App, Focus};

const HERO_HEIGHT: u16 = 7;
/// Below this terminal height the hero collapses to a single title bar
const HERO_MIN_TERMINAL_HEIGHT: u16 = 30;
const HEADER_HEIGHT: u16 = 4;
const BOT_GLYPH: &str = "🤖";
const USER_GLYPH: &str = "👤";
/// Space taken by the sender glyph column
const GUTTER: &str = "   ";

const PLACEHOLDER: &str = "Ask about schedules, facilities, dining, library, or admin procedures...";
const TAGLINE: &str = "Get instant answers about schedules, facilities, dining, library services, and administrative procedures - all powered by AI";

fn icon_glyph(icon: Icon) -> &'static str {
    match icon {
        Icon::Calendar => "📅",
        Icon::MapPin => "📍",
        Icon::Utensils => "🍴",
        Icon::BookOpen => "📖",
        Icon::FileText => "📄",
    }
}

fn tag_color(tag: ColorTag) -> Color {
    match tag {
        ColorTag::Blue => Color::LightBlue,
        ColorTag::Green => Color::Green,
        ColorTag::Gold => Color::Yellow,
    }
}

/// Split a word that is wider than `width` into display-width sized pieces
fn break_word(word: &str, width: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for c in word.chars() {
        let w = c.width().unwrap_or(0);
        if current_len + w > width && !current.is_empty() {
            pieces.push(std::mem::take(&mut current));
            current_len = 0;
        }
        current.push(c);
        current_len += w;
    }

    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

/// Wrap text to fit within a given display width.
/// Explicit newlines are kept; blank lines stay blank.
fn wrap_text_to_width(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for raw_line in text.lines() {
        if raw_line.trim().is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current_line = String::new();
        let mut current_len = 0;

        for word in raw_line.split_whitespace() {
            let word_len = word.width();

            if word_len > width {
                if current_len > 0 {
                    lines.push(std::mem::take(&mut current_line));
                }
                let mut pieces = break_word(word, width);
                let last = pieces.pop().unwrap_or_default();
                lines.extend(pieces);
                current_len = last.width();
                current_line = last;
            } else if current_len == 0 {
                // First word on line
                current_line = word.to_string();
                current_len = word_len;
            } else if current_len + 1 + word_len <= width {
                current_line.push(' ');
                current_line.push_str(word);
                current_len += 1 + word_len;
            } else {
                // Word doesn't fit, start new line
                lines.push(std::mem::take(&mut current_line));
                current_line = word.to_string();
                current_len = word_len;
            }
        }

        if !current_line.is_empty() {
            lines.push(current_line);
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

fn bot_header() -> Line<'static> {
    Line::from(vec![
        Span::raw(format!("{} ", BOT_GLYPH)),
        Span::styled(
            "Assistant",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
    ])
}

fn message_lines(message: &Message, bubble_width: usize, time_format: TimeFormat) -> Vec<Line<'static>> {
    let text_width = bubble_width.saturating_sub(GUTTER.len());
    let wrapped = wrap_text_to_width(message.content(), text_width);
    let time_style = Style::default().fg(Color::DarkGray);
    let mut lines = Vec::with_capacity(wrapped.len() + 3);

    match message.sender() {
        Sender::Bot => {
            lines.push(bot_header());
            for line in wrapped {
                lines.push(Line::from(format!("{}{}", GUTTER, line)));
            }
            lines.push(Line::from(Span::styled(
                format!("{}{}", GUTTER, message.time_label(time_format)),
                time_style,
            )));
        }
        Sender::User => {
            lines.push(
                Line::from(vec![
                    Span::styled("You", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
                    Span::raw(format!(" {}", USER_GLYPH)),
                ])
                .alignment(Alignment::Right),
            );
            for line in wrapped {
                lines.push(
                    Line::from(Span::styled(
                        format!("{}{}", line, GUTTER),
                        Style::default().fg(Color::Cyan),
                    ))
                    .alignment(Alignment::Right),
                );
            }
            lines.push(
                Line::from(Span::styled(
                    format!("{}{}", message.time_label(time_format), GUTTER),
                    time_style,
                ))
                .alignment(Alignment::Right),
            );
        }
    }

    lines.push(Line::default());
    lines
}

/// Every transcript row, already wrapped to `width`, plus the typing bubble when pending
fn transcript_lines(app: &App, width: usize) -> Vec<Line<'static>> {
    // Bubbles take at most 80% of the row
    let bubble_width = (width * 4 / 5).max(GUTTER.len() + 1);
    let time_format = app.config.time_format;

    let mut lines: Vec<Line<'static>> = app
        .conversation
        .current_transcript()
        .all()
        .iter()
        .flat_map(|msg| message_lines(msg, bubble_width, time_format))
        .collect();

    if app.conversation.is_pending() {
        lines.push(bot_header());
        // Animated dots: cycles through 1, 2, 3
        let dots = vec!["●"; (app.animation_frame as usize) + 1].join(" ");
        lines.push(Line::from(Span::styled(
            format!("{}typing {}", GUTTER, dots),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    }

    lines
}

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    let hero_height = if app.config.show_hero && area.height >= HERO_MIN_TERMINAL_HEIGHT {
        HERO_HEIGHT
    } else {
        1
    };

    let [hero_area, header_area, transcript_area, input_area, footer_area] = Layout::vertical([
        Constraint::Length(hero_height),
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Min(3),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(area);

    if hero_height == HERO_HEIGHT {
        render_hero(frame, hero_area);
    } else {
        render_title_bar(frame, hero_area);
    }
    render_chat_header(app, frame, header_area);
    render_transcript(app, frame, transcript_area);
    render_input(app, frame, input_area);
    render_footer(app, frame, footer_area);
}

fn render_title_bar(frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(" 🎓 Campus AI Assistant ", Style::default().fg(Color::Cyan).bold()),
        Span::raw(" "),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::Gray),
        ),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

fn render_hero(frame: &mut Frame, area: Rect) {
    let badge_style = Style::default().fg(Color::Gray);
    let text = Text::from(vec![
        Line::from("🎓"),
        Line::from(Span::styled(
            "Campus AI Assistant",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(TAGLINE, Style::default().fg(Color::White))),
        Line::default(),
        Line::from(vec![
            Span::styled("💬 24/7 Support", badge_style),
            Span::raw("    "),
            Span::styled("✨ AI-Powered", badge_style),
            Span::raw("    "),
            Span::styled("🎓 Campus Expert", badge_style),
        ]),
    ]);

    let hero = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().bg(Color::Blue))
        .wrap(Wrap { trim: true });
    frame.render_widget(hero, area);
}

fn render_chat_header(app: &mut App, frame: &mut Frame, area: Rect) {
    let [title_area, buttons_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
    ])
    .areas(area);

    let title = Line::from(vec![
        Span::raw(format!(" {} ", BOT_GLYPH)),
        Span::styled("Campus AI Assistant", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled("  Your guide to campus life", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(title), title_area);

    let actions = quick_actions();
    let cells = Layout::horizontal(
        actions.iter().map(|_| Constraint::Ratio(1, actions.len() as u32)),
    )
    .split(buttons_area);

    let row_focused = app.focus == Focus::QuickActions;
    let pending = app.conversation.is_pending();
    app.action_areas = cells.to_vec();

    for (i, (action, cell)) in actions.iter().zip(cells.iter()).enumerate() {
        let selected = row_focused && i == app.selected_action;
        let border_color = if selected { Color::Yellow } else { Color::DarkGray };
        let label_style = if pending {
            Style::default().fg(Color::DarkGray)
        } else if selected {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let label = Line::from(vec![
            Span::styled(format!("{} ", i + 1), Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{} ", icon_glyph(action.icon)),
                Style::default().fg(tag_color(action.color)),
            ),
            Span::styled(action.label, label_style),
        ]);

        let button = Paragraph::new(label).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color)),
        );
        frame.render_widget(button, *cell);
    }
}

fn render_transcript(app: &mut App, frame: &mut Frame, area: Rect) {
    app.transcript_area = Some(area);

    let focused = app.focus == Focus::Transcript;
    let border_color = if focused { Color::Cyan } else { Color::DarkGray };
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(" Conversation ");
    if !app.scroll.is_following() {
        block = block.title(
            Title::from(Span::styled(" ↓ newer (PgDn) ", Style::default().fg(Color::Yellow)))
                .alignment(Alignment::Right),
        );
    }

    let inner_width = area.width.saturating_sub(2) as usize;
    let inner_height = area.height.saturating_sub(2);

    let lines = transcript_lines(app, inner_width);
    let revision = app.conversation.current_transcript().revision();
    let offset = app.scroll.layout(lines.len(), inner_height, revision);

    let transcript = Paragraph::new(lines)
        .block(block)
        .scroll((offset, 0));
    frame.render_widget(transcript, area);
}

fn render_input(app: &mut App, frame: &mut Frame, area: Rect) {
    app.input_area = Some(area);

    let focused = app.focus == Focus::Input;
    let border_color = if focused { Color::Yellow } else { Color::DarkGray };

    let send_hint = if app.conversation.is_pending() {
        Span::styled(" typing… ", Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC))
    } else if app.conversation.can_send() {
        Span::styled(" ⏎ Send ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
    } else {
        Span::styled(" ⏎ Send ", Style::default().fg(Color::DarkGray))
    };

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(" Ask ")
        .title(Title::from(send_hint).alignment(Alignment::Right));

    let draft = app.conversation.draft();
    let inner_width = area.width.saturating_sub(2) as usize;
    let cursor_pos = draft.cursor();

    // Scroll horizontally to keep the cursor visible
    let scroll_offset = if inner_width == 0 {
        0
    } else if cursor_pos >= inner_width {
        cursor_pos - inner_width + 1
    } else {
        0
    };

    let input = if draft.as_str().is_empty() {
        Paragraph::new(Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray)))
    } else {
        let visible_text: String = draft
            .as_str()
            .chars()
            .skip(scroll_offset)
            .take(inner_width)
            .collect();
        Paragraph::new(visible_text).style(Style::default().fg(Color::Cyan))
    };
    frame.render_widget(input.block(input_block), area);

    if focused {
        let cursor_x: usize = draft
            .as_str()
            .chars()
            .skip(scroll_offset)
            .take(cursor_pos - scroll_offset)
            .map(|c| c.width().unwrap_or(0))
            .sum();
        let cursor_x = cursor_x.min(inner_width) as u16;
        frame.set_cursor_position((area.x + cursor_x + 1, area.y + 1));
    }
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().fg(Color::Gray);

    let hints: &[(&str, &str)] = match app.focus {
        Focus::Input => &[
            ("Enter", "send"),
            ("Tab", "focus"),
            ("Alt+1-5", "quick ask"),
            ("PgUp/PgDn", "scroll"),
            ("Ctrl+C", "quit"),
        ],
        Focus::QuickActions => &[
            ("←/→", "select"),
            ("Enter", "ask"),
            ("1-5", "quick ask"),
            ("Esc", "input"),
            ("q", "quit"),
        ],
        Focus::Transcript => &[
            ("↑/↓", "scroll"),
            ("g/G", "top/bottom"),
            ("1-5", "quick ask"),
            ("Esc", "input"),
            ("q", "quit"),
        ],
    };

    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, label) in hints {
        spans.push(Span::styled(format!(" {} ", key), key_style));
        spans.push(Span::styled(format!(" {}  ", label), label_style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
