// Application configuration constants

use crate::api::{Category, CategoryContext};

/// Default base URL of the laureate API.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// How long the event loop waits for input before redrawing.
pub const POLL_INTERVAL_MS: u64 = 100;

/// Roster entries per popup page. Matches the nine numbered link keys,
/// which always address the visible page.
pub const ROSTER_PAGE: usize = 9;

/// Category selector order: the combined view first, then the six
/// categories.
pub const CONTEXTS: [CategoryContext; 7] = [
    CategoryContext::All,
    CategoryContext::Single(Category::Physics),
    CategoryContext::Single(Category::Chemistry),
    CategoryContext::Single(Category::Medicine),
    CategoryContext::Single(Category::Literature),
    CategoryContext::Single(Category::Peace),
    CategoryContext::Single(Category::Economics),
];
