use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::NaiveDate;
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::types::Release;

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Parses a release date that may be day-, month-, or year-precise.
/// Coarser precisions fall back to the first day of the period.
pub fn parse_release_date(date: &str) -> Option<NaiveDate> {
    if let Ok(d) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(d) = NaiveDate::parse_from_str(&format!("{date}-01"), "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(d) = NaiveDate::parse_from_str(&format!("{date}-01-01"), "%Y-%m-%d") {
        return Some(d);
    }
    None
}

/// Absolute number of whole days between two dates.
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (a - b).num_days().abs()
}

/// Sorts releases by release date descending. The sort is stable, so
/// same-day releases keep their encounter order.
pub fn sort_releases_by_date(releases: &mut Vec<Release>) {
    releases.sort_by(|a, b| {
        let a_date = parse_release_date(&a.release_date);
        let b_date = parse_release_date(&b.release_date);
        b_date.cmp(&a_date)
    });
}
