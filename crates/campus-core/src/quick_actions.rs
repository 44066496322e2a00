/// Glyph shown on a quick-action button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Calendar,
    MapPin,
    Utensils,
    BookOpen,
    FileText,
}

/// Accent color of a quick-action button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTag {
    Blue,
    Green,
    Gold,
}

/// Predefined shortcut that submits a fixed query on the user's behalf
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickAction {
    pub label: &'static str,
    pub query: &'static str,
    pub icon: Icon,
    pub color: ColorTag,
}

pub const QUICK_ACTIONS: [QuickAction; 5] = [
    QuickAction {
        label: "Class Schedules",
        query: "Show me my class schedule for today",
        icon: Icon::Calendar,
        color: ColorTag::Blue,
    },
    QuickAction {
        label: "Campus Map",
        query: "Where is the library located?",
        icon: Icon::MapPin,
        color: ColorTag::Green,
    },
    QuickAction {
        label: "Dining Hours",
        query: "What are the dining hall hours today?",
        icon: Icon::Utensils,
        color: ColorTag::Gold,
    },
    QuickAction {
        label: "Library Services",
        query: "What library services are available?",
        icon: Icon::BookOpen,
        color: ColorTag::Blue,
    },
    QuickAction {
        label: "Admin Procedures",
        query: "How do I register for courses?",
        icon: Icon::FileText,
        color: ColorTag::Green,
    },
];

pub fn quick_actions() -> &'static [QuickAction] {
    &QUICK_ACTIONS
}
