//! Keyword-based reply selection
//!
//! A query is lowercased once and tested against an ordered rule table.
//! The first rule with any keyword contained in the query supplies the reply;
//! when nothing matches the general capability menu is returned.

use std::sync::OnceLock;

pub const SCHEDULE_REPLY: &str = "Here are your classes for today:\n\n📚 Introduction to Computer Science - 9:00 AM, Room 201\n📊 Statistics - 11:30 AM, Room 145\n🔬 Chemistry Lab - 2:00 PM, Science Building\n\nWould you like me to show you the full week schedule or help you find a specific classroom?";

pub const DINING_REPLY: &str = "🍽️ Campus Dining Information:\n\n• Main Cafeteria: 7:00 AM - 9:00 PM\n• Student Union Food Court: 11:00 AM - 8:00 PM\n• Coffee Shop: 6:30 AM - 10:00 PM\n• Late Night Snacks: 9:00 PM - 12:00 AM\n\nToday's special: Taco Tuesday at the food court! Would you like to see the full menu?";

pub const LIBRARY_REPLY: &str = "📖 Library Services & Hours:\n\n• Main Library: 24/7 (with student ID)\n• Reference Desk: 8:00 AM - 10:00 PM\n• Computer Lab: 6:00 AM - 12:00 AM\n• Study Rooms: Available for booking online\n• Research Support: Monday-Friday 9:00 AM - 5:00 PM\n\nNeed help finding a specific resource or booking a study room?";

pub const NAVIGATION_REPLY: &str = "🗺️ Campus Navigation:\n\nThe library is located in the center of campus, next to the student union. Here are some key landmarks:\n\n• Library: Building A, Center Campus\n• Student Union: Building B, next to Library\n• Science Building: Building C, North Campus\n• Administration: Building D, South Campus\n\nWould you like directions to a specific building or facility?";

pub const REGISTRATION_REPLY: &str = "📋 Course Registration:\n\n1. Log into the Student Portal\n2. Navigate to 'Academic Services'\n3. Select 'Course Registration'\n4. Choose your semester\n5. Search and add courses\n6. Review and submit\n\nRegistration opens: March 15th for Fall semester\nNeed help with prerequisites or course planning?";

pub const GENERAL_REPLY: &str = "I'd be happy to help you with campus information! I can assist with:\n\n🎓 Class schedules and academic calendar\n🏢 Campus facilities and locations\n🍕 Dining options and hours\n📚 Library services and resources\n📝 Administrative procedures\n\nPlease let me know what specific information you're looking for!";

/// Reply category a query was routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Schedule,
    Dining,
    Library,
    Navigation,
    Registration,
    General,
}

impl Topic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Schedule => "schedule",
            Topic::Dining => "dining",
            Topic::Library => "library",
            Topic::Navigation => "navigation",
            Topic::Registration => "registration",
            Topic::General => "general",
        }
    }
}

/// One entry in the rule table: a keyword predicate paired with its reply
#[derive(Debug, Clone)]
pub struct Rule {
    topic: Topic,
    keywords: Vec<String>,
    reply: &'static str,
}

impl Rule {
    /// Keywords are matched as lowercase substrings.
    pub fn new(topic: Topic, keywords: &[&str], reply: &'static str) -> Self {
        Self {
            topic,
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            reply,
        }
    }

    pub fn topic(&self) -> Topic {
        self.topic
    }

    pub fn reply(&self) -> &'static str {
        self.reply
    }

    /// `lowered` must already be lowercased
    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k.as_str()))
    }
}

#[derive(Debug, Clone)]
pub struct Resolver {
    rules: Vec<Rule>,
    fallback: &'static str,
}

impl Resolver {
    /// The built-in campus rule table, in priority order
    pub fn campus() -> Self {
        Self {
            rules: vec![
                Rule::new(Topic::Schedule, &["schedule", "class"], SCHEDULE_REPLY),
                Rule::new(Topic::Dining, &["dining", "food", "meal"], DINING_REPLY),
                Rule::new(Topic::Library, &["library", "book"], LIBRARY_REPLY),
                Rule::new(Topic::Navigation, &["map", "location", "where"], NAVIGATION_REPLY),
                Rule::new(Topic::Registration, &["register", "course", "admin"], REGISTRATION_REPLY),
            ],
            fallback: GENERAL_REPLY,
        }
    }

    /// Add a rule after the existing ones. Earlier rules keep precedence.
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    fn first_match(&self, query: &str) -> Option<&Rule> {
        let lowered = query.to_lowercase();
        self.rules.iter().find(|rule| rule.matches(&lowered))
    }

    pub fn classify(&self, query: &str) -> Topic {
        self.first_match(query)
            .map(Rule::topic)
            .unwrap_or(Topic::General)
    }

    pub fn resolve(&self, query: &str) -> &'static str {
        self.first_match(query)
            .map(Rule::reply)
            .unwrap_or(self.fallback)
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::campus()
    }
}

/// Resolve against the shared built-in campus table
pub fn resolve(query: &str) -> &'static str {
    static CAMPUS: OnceLock<Resolver> = OnceLock::new();
    CAMPUS.get_or_init(Resolver::campus).resolve(query)
}
