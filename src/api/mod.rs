// Laureate API client
//
// Fetches laureate sets from the backing HTTP endpoint and converts the
// raw payload into the domain record the rest of the app works with.
// Fetches run on a worker thread and report back over a channel so the
// UI loop never blocks; a sequence token on every outcome lets the app
// discard responses that were overtaken by a newer request.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use serde::Deserialize;
use thiserror::Error;

use crate::geo::{Coord, LocationKind};

/// The six Nobel Prize categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Physics,
    Chemistry,
    Medicine,
    Literature,
    Peace,
    Economics,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Physics,
        Category::Chemistry,
        Category::Medicine,
        Category::Literature,
        Category::Peace,
        Category::Economics,
    ];

    /// Request tag used in API paths and payloads.
    pub fn tag(self) -> &'static str {
        match self {
            Category::Physics => "physics",
            Category::Chemistry => "chemistry",
            Category::Medicine => "medicine",
            Category::Literature => "literature",
            Category::Peace => "peace",
            Category::Economics => "economics",
        }
    }

    /// Human-readable display name.
    pub fn label(self) -> &'static str {
        match self {
            Category::Physics => "Physics",
            Category::Chemistry => "Chemistry",
            Category::Medicine => "Physiology or Medicine",
            Category::Literature => "Literature",
            Category::Peace => "Peace",
            Category::Economics => "Economic Sciences",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Category::ALL.into_iter().find(|c| c.tag() == tag)
    }
}

/// Scope of a laureate fetch: one category, or all six combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryContext {
    Single(Category),
    All,
}

impl CategoryContext {
    pub fn tag(self) -> &'static str {
        match self {
            CategoryContext::Single(category) => category.tag(),
            CategoryContext::All => "all",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CategoryContext::Single(category) => category.label(),
            CategoryContext::All => "All Categories",
        }
    }

    /// Category to assume for records whose payload carries no tag.
    /// Single-category responses omit the tag; the combined payload
    /// carries one per record.
    fn fallback_category(self) -> Option<Category> {
        match self {
            CategoryContext::Single(category) => Some(category),
            CategoryContext::All => None,
        }
    }
}

/// One laureate as served by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct RawLaureate {
    pub laureate_id: String,
    pub name: String,
    pub prize_year: i32,
    #[serde(default)]
    pub category: Option<String>,
    pub achievement: String,
    pub birth_lat: f64,
    pub birth_lon: f64,
    pub birth_location: String,
    pub work_lat: f64,
    pub work_lon: f64,
    pub work_location: String,
    pub work_years: String,
    #[serde(default)]
    pub shared_with: Vec<String>,
}

/// Successful response for one category fetch.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryResponse {
    pub category: String,
    pub laureates: Vec<RawLaureate>,
}

#[derive(Debug, Clone, Deserialize)]
struct ApiErrorBody {
    error: String,
}

/// One laureate, resolved for the current session. Immutable per fetch;
/// the whole set is replaced wholesale when the category changes.
#[derive(Debug, Clone, PartialEq)]
pub struct LaureateRecord {
    pub laureate_id: String,
    pub name: String,
    pub prize_year: i32,
    pub category: Category,
    pub achievement: String,
    pub birth: Coord,
    pub birth_location: String,
    pub work: Coord,
    pub work_location: String,
    pub work_years: String,
    /// Stable identifiers of co-laureates who shared the same prize.
    /// Identifiers with no matching record in the same fetch are treated
    /// as dangling and skipped wherever links are built.
    pub shared_with: Vec<String>,
}

impl LaureateRecord {
    /// Convert a raw payload entry, filling in the category from the
    /// request context where the payload omits it. Returns `None` when
    /// the category cannot be determined at all.
    pub fn resolve(raw: RawLaureate, context: CategoryContext) -> Option<Self> {
        let category = raw
            .category
            .as_deref()
            .and_then(Category::from_tag)
            .or(context.fallback_category())?;

        Some(Self {
            laureate_id: raw.laureate_id,
            name: raw.name,
            prize_year: raw.prize_year,
            category,
            achievement: raw.achievement,
            birth: Coord::new(raw.birth_lat, raw.birth_lon),
            birth_location: raw.birth_location,
            work: Coord::new(raw.work_lat, raw.work_lon),
            work_location: raw.work_location,
            work_years: raw.work_years,
            shared_with: raw.shared_with,
        })
    }

    pub fn location(&self, kind: LocationKind) -> Coord {
        match kind {
            LocationKind::Work => self.work,
            LocationKind::Birth => self.birth,
        }
    }
}

/// Why a fetch produced no usable laureate set.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// Network-level failure: connection refused, timeout, DNS.
    #[error("request failed: {0}")]
    Transport(String),
    /// The server answered but the payload did not decode.
    #[error("malformed laureate payload: {0}")]
    Decode(String),
    /// The server answered with an explicit error payload.
    #[error("{0}")]
    Api(String),
}

/// Fetch the laureate set for one context, blocking the calling thread.
pub fn fetch_laureates(
    base_url: &str,
    context: CategoryContext,
) -> Result<CategoryResponse, FetchError> {
    let url = format!(
        "{}/api/laureates/{}",
        base_url.trim_end_matches('/'),
        context.tag()
    );

    match ureq::get(&url).call() {
        Ok(response) => response
            .into_json::<CategoryResponse>()
            .map_err(|err| FetchError::Decode(err.to_string())),
        Err(ureq::Error::Status(code, response)) => {
            // Error statuses still carry a JSON body with a message when
            // the server itself produced them.
            let message = response
                .into_json::<ApiErrorBody>()
                .map(|body| body.error)
                .unwrap_or_else(|_| format!("server returned HTTP {code}"));
            Err(FetchError::Api(message))
        }
        Err(err) => Err(FetchError::Transport(err.to_string())),
    }
}

/// Completed fetch, tagged with the sequence token of the request that
/// started it.
#[derive(Debug)]
pub struct FetchOutcome {
    pub seq: u64,
    pub context: CategoryContext,
    pub result: Result<CategoryResponse, FetchError>,
}

/// Hands fetches to worker threads and collects their outcomes.
///
/// Tokens increase monotonically per request; the app keeps the token of
/// its most recent request and ignores any outcome carrying an older one,
/// so a slow first fetch can never overwrite a faster second one.
pub struct FetchClient {
    base_url: String,
    tx: Sender<FetchOutcome>,
    rx: Receiver<FetchOutcome>,
    next_seq: u64,
}

impl FetchClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            base_url: base_url.into(),
            tx,
            rx,
            next_seq: 0,
        }
    }

    /// Start a fetch on a worker thread and return its sequence token.
    pub fn request(&mut self, context: CategoryContext) -> u64 {
        self.next_seq += 1;
        let seq = self.next_seq;
        let tx = self.tx.clone();
        let base_url = self.base_url.clone();

        thread::spawn(move || {
            let result = fetch_laureates(&base_url, context);
            // A closed receiver just means the app is shutting down.
            let _ = tx.send(FetchOutcome {
                seq,
                context,
                result,
            });
        });

        seq
    }

    /// Next completed outcome, if any. Non-blocking.
    pub fn try_recv(&self) -> Option<FetchOutcome> {
        self.rx.try_recv().ok()
    }

    /// Push a prefabricated outcome through the channel, bypassing the
    /// network. Test hook only.
    #[cfg(test)]
    pub fn inject(&self, outcome: FetchOutcome) {
        let _ = self.tx.send(outcome);
    }
}
