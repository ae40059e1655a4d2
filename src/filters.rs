//! Release title normalization and categorization.
//!
//! Everything in this module is pure: a title string goes in, a normalized
//! string or a set of categories comes out. Each category is backed by one
//! canonical pattern table; categories are evaluated independently and are
//! not mutually exclusive.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

/// Categories a release title can fall into based on its wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReleaseCategory {
    ReRelease,
    LiveRecording,
    Soundtrack,
    Remix,
}

static NORMALIZE_BRACKETS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[()\[\]]").unwrap());
static NORMALIZE_DASHES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*-\s*").unwrap());
static NORMALIZE_COLONS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*:\s*").unwrap());
static NORMALIZE_SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

static RE_RELEASE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"\bdeluxe\b",
        r"\bremaster(ed)?\b",
        r"\banniversary\b",
        r"\b\d{1,2}\s*year\s*(anniversary|edition)\b", // "10 Year Anniversary", "10 Year Edition"
        r"\bspecial\s*edition\b",
        r"\bexpanded\s*edition\b",
        r"\bexpanded\b",
        r"\breissue\b",
        r"\bbonus\b",
        r"\bedition\b", // catch any remaining cases where "edition" is used
    ])
});

static LIVE_RECORDING_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"\blive\s+at\b",
        r"\bin\s+concert\b",
        r"\blive\s+recording\b",
        r"\brecorded\s+live\b",
        r"\blive\s+version\b",
        r"\blive\s+performance\b",
        r"\blive\s+from\b",
        r"\blive\s+in\b",
        r"\blive\s+on\b",
        r"\bunplugged\b",
        r"\blive\b", // word-bounded, so "Alive" never matches
    ])
});

static SOUNDTRACK_PATTERNS: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile(&[r"\bsoundtrack\b", r"\bost\b"]));

static REMIX_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"\bremix\b",
        r"\brework\b",
        r"\bedit\b",
        r"\bversion\b",
        r"\bremake\b",
        r"\bremixed\b",
    ])
});

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(&format!("(?i){p}")).unwrap())
        .collect()
}

/// Normalizes a release title for pattern matching.
///
/// Lowercases, removes parenthesis and bracket characters, collapses dashes
/// and colons (with surrounding whitespace) to single spaces, collapses
/// whitespace runs, and trims. Idempotent: normalizing a normalized title is
/// a no-op.
pub fn normalize_title(title: &str) -> String {
    let lowered = title.to_lowercase();
    let stripped = NORMALIZE_BRACKETS.replace_all(&lowered, "");
    let dashed = NORMALIZE_DASHES.replace_all(&stripped, " ");
    let coloned = NORMALIZE_COLONS.replace_all(&dashed, " ");
    let spaced = NORMALIZE_SPACES.replace_all(&coloned, " ");
    spaced.trim().to_string()
}

/// Whether a normalized title reads like a reissue of previously released
/// material (deluxe, remastered, anniversary edition, ...).
pub fn is_re_release(normalized: &str) -> bool {
    RE_RELEASE_PATTERNS.iter().any(|p| p.is_match(normalized))
}

/// Whether a normalized title reads like a live recording.
pub fn is_live_recording(normalized: &str) -> bool {
    LIVE_RECORDING_PATTERNS
        .iter()
        .any(|p| p.is_match(normalized))
}

/// Whether a normalized title reads like a soundtrack.
pub fn is_soundtrack(normalized: &str) -> bool {
    SOUNDTRACK_PATTERNS.iter().any(|p| p.is_match(normalized))
}

/// Whether a normalized title reads like a remix or alternate version.
pub fn is_remix(normalized: &str) -> bool {
    REMIX_PATTERNS.iter().any(|p| p.is_match(normalized))
}

/// Evaluates all four categories against an already-normalized title.
///
/// A title may belong to zero, one, or several categories.
pub fn classify(normalized: &str) -> BTreeSet<ReleaseCategory> {
    let mut categories = BTreeSet::new();
    if is_re_release(normalized) {
        categories.insert(ReleaseCategory::ReRelease);
    }
    if is_live_recording(normalized) {
        categories.insert(ReleaseCategory::LiveRecording);
    }
    if is_soundtrack(normalized) {
        categories.insert(ReleaseCategory::Soundtrack);
    }
    if is_remix(normalized) {
        categories.insert(ReleaseCategory::Remix);
    }
    categories
}
