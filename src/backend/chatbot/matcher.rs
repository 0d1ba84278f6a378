/**
 * FAQ Pattern Matching
 *
 * Messages are lowercased and tested against one regex per topic, in a
 * fixed priority order. The first matching topic answers with one of its
 * canned replies, picked at random.
 */

use std::sync::LazyLock;

use rand::seq::SliceRandom;
use regex::Regex;

/// A question the chatbot can answer without the language model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Greeting,
    Recommendation,
    Search,
    Download,
    Genres,
    Help,
}

/// Topics in matching priority
pub const TOPICS: [Topic; 6] = [
    Topic::Greeting,
    Topic::Recommendation,
    Topic::Search,
    Topic::Download,
    Topic::Genres,
    Topic::Help,
];

static GREETING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(hi|hello|hey|greetings|good\s+(morning|afternoon|evening))").expect("valid regex")
});
static RECOMMENDATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(recommend|suggest|good book|what.*read|book.*for|looking for)").expect("valid regex")
});
static SEARCH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(how.*search|find.*book|where.*look|search.*for)").expect("valid regex")
});
static DOWNLOAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(download|get.*book|how.*download)").expect("valid regex"));
static GENRES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(genre|category|type.*book|what.*available|sections)").expect("valid regex")
});
static HELP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(help|what.*do|how.*work|guide|assist)").expect("valid regex"));

const GREETING_REPLIES: &[&str] = &[
    "Hello! I'm LibBot, your library assistant. How can I help you find books today?",
    "Hi there! Welcome to the library. What kind of books interest you?",
    "Hey! I'm here to help you discover great books. What are you looking for?",
];

const RECOMMENDATION_REPLIES: &[&str] = &[
    "I'd love to help! What genre interests you? We have Fiction, Mystery, Romance, Sci-Fi, Fantasy, Non-Fiction, Biography, and more!",
    "Great question! Tell me what you enjoy reading and I'll point you to our best titles in that genre.",
    "To recommend books, I need to know your preferences. What genres do you like?",
];

const SEARCH_REPLIES: &[&str] = &[
    "You can search for books using the search bar on the main page. Enter a title, author name, or genre to find what you're looking for!",
    "Finding books is easy! Use the search filters for title, author, or genre on the books page.",
];

const DOWNLOAD_REPLIES: &[&str] = &[
    "To download a book: 1) Click on the book to view details, 2) Click the green Download button. You must be logged in to download.",
    "Downloading is simple! Find a book you like, click on it, then click the Download button on the details page.",
];

const GENRE_REPLIES: &[&str] = &[
    "Our library includes: Fiction, Non-Fiction, Mystery, Romance, Science Fiction, Fantasy, Biography, History, Self-Help, and many more! Which genre would you like to explore?",
    "We have a wide variety! Popular genres include Mystery, Romance, Sci-Fi, Fantasy, Thriller, and Literary Fiction. What's your preference?",
];

const HELP_REPLIES: &[&str] = &[
    "I can help you with: finding books, genre suggestions, search tips, download instructions, and general library navigation. What do you need?",
    "Ask me about book recommendations, how to search, available genres, or how to download books!",
];

/// Replies used when neither a topic nor the language model answers
pub const FALLBACK_REPLIES: &[&str] = &[
    "I'm here to help with book recommendations and library navigation. What would you like to know?",
    "I can help you find books! Try asking about genres, search tips, or recommendations.",
    "As your library assistant, I can guide you to great books. What interests you?",
    "Let me help you explore our collection! What kind of books do you enjoy?",
];

impl Topic {
    fn pattern(&self) -> &'static Regex {
        match self {
            Self::Greeting => &GREETING,
            Self::Recommendation => &RECOMMENDATION,
            Self::Search => &SEARCH,
            Self::Download => &DOWNLOAD,
            Self::Genres => &GENRES,
            Self::Help => &HELP,
        }
    }

    pub fn replies(&self) -> &'static [&'static str] {
        match self {
            Self::Greeting => GREETING_REPLIES,
            Self::Recommendation => RECOMMENDATION_REPLIES,
            Self::Search => SEARCH_REPLIES,
            Self::Download => DOWNLOAD_REPLIES,
            Self::Genres => GENRE_REPLIES,
            Self::Help => HELP_REPLIES,
        }
    }
}

/// The first topic whose pattern matches `message`
pub fn classify(message: &str) -> Option<Topic> {
    let normalized = message.trim().to_lowercase();
    TOPICS
        .into_iter()
        .find(|topic| topic.pattern().is_match(&normalized))
}

/// A random canned reply for `message`, if it matches a topic
pub fn smart_reply(message: &str) -> Option<&'static str> {
    classify(message).map(|topic| pick(topic.replies()))
}

/// A random fallback reply
pub fn fallback_reply() -> &'static str {
    pick(FALLBACK_REPLIES)
}

fn pick(replies: &'static [&'static str]) -> &'static str {
    replies
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or_default()
}
