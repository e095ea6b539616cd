//! Client-side ordering of a held result page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::SearchHit;

/// Sort key selected by the user.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Backend relevance order, preserved as-is.
    #[default]
    Relevance,
    SeedersDesc,
    SeedersAsc,
    SizeDesc,
    SizeAsc,
    DateDesc,
    DateAsc,
}

/// Return a reordered copy of `hits`; the input is not mutated.
///
/// All sorts are stable, so equal keys keep their relevance order and
/// re-sorting the same page is deterministic. A missing publish date
/// sorts as the Unix epoch, i.e. as the earliest possible value.
pub fn sorted(hits: &[SearchHit], key: SortKey) -> Vec<SearchHit> {
    let mut out = hits.to_vec();
    match key {
        SortKey::Relevance => {}
        SortKey::SeedersDesc => out.sort_by(|a, b| b.seeders.cmp(&a.seeders)),
        SortKey::SeedersAsc => out.sort_by(|a, b| a.seeders.cmp(&b.seeders)),
        SortKey::SizeDesc => out.sort_by(|a, b| b.size_bytes.cmp(&a.size_bytes)),
        SortKey::SizeAsc => out.sort_by(|a, b| a.size_bytes.cmp(&b.size_bytes)),
        SortKey::DateDesc => out.sort_by(|a, b| publish_key(b).cmp(&publish_key(a))),
        SortKey::DateAsc => out.sort_by(|a, b| publish_key(a).cmp(&publish_key(b))),
    }
    out
}

fn publish_key(hit: &SearchHit) -> DateTime<Utc> {
    hit.published_at.unwrap_or(DateTime::UNIX_EPOCH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;
    use chrono::TimeZone;

    fn seeded(title: &str, hash: &str, seeders: u32) -> SearchHit {
        let mut hit = fixtures::hit(title, hash);
        hit.seeders = seeders;
        hit
    }

    #[test]
    fn test_relevance_preserves_input_order() {
        let hits = vec![
            seeded("Low", "hash1", 1),
            seeded("High", "hash2", 100),
            seeded("Mid", "hash3", 50),
        ];
        let out = sorted(&hits, SortKey::Relevance);
        let titles: Vec<_> = out.iter().map(|h| h.title.as_str()).collect();
        assert_eq!(titles, vec!["Low", "High", "Mid"]);
    }

    #[test]
    fn test_seeders_desc() {
        let hits = vec![
            seeded("Low", "hash1", 1),
            seeded("High", "hash2", 100),
            seeded("Mid", "hash3", 50),
        ];
        let out = sorted(&hits, SortKey::SeedersDesc);
        let seeders: Vec<_> = out.iter().map(|h| h.seeders).collect();
        assert_eq!(seeders, vec![100, 50, 1]);
    }

    #[test]
    fn test_seeders_asc() {
        let hits = vec![seeded("A", "hash1", 10), seeded("B", "hash2", 5)];
        let out = sorted(&hits, SortKey::SeedersAsc);
        assert_eq!(out[0].seeders, 5);
        assert_eq!(out[1].seeders, 10);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let hits = vec![
            seeded("First", "hash1", 10),
            seeded("Second", "hash2", 10),
            seeded("Third", "hash3", 10),
        ];
        let out = sorted(&hits, SortKey::SeedersDesc);
        let titles: Vec<_> = out.iter().map(|h| h.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let hits = vec![
            seeded("A", "hash1", 3),
            seeded("B", "hash2", 7),
            seeded("C", "hash3", 7),
        ];
        let once = sorted(&hits, SortKey::SeedersDesc);
        let twice = sorted(&once, SortKey::SeedersDesc);
        let once_hashes: Vec<_> = once.iter().map(|h| h.info_hash.as_str()).collect();
        let twice_hashes: Vec<_> = twice.iter().map(|h| h.info_hash.as_str()).collect();
        assert_eq!(once_hashes, twice_hashes);
    }

    #[test]
    fn test_sort_never_drops_or_duplicates() {
        let hits = vec![
            seeded("A", "hash1", 3),
            seeded("B", "hash2", 9),
            seeded("C", "hash3", 1),
        ];
        for key in [
            SortKey::Relevance,
            SortKey::SeedersDesc,
            SortKey::SeedersAsc,
            SortKey::SizeDesc,
            SortKey::SizeAsc,
            SortKey::DateDesc,
            SortKey::DateAsc,
        ] {
            let out = sorted(&hits, key);
            assert_eq!(out.len(), hits.len());
            let mut hashes: Vec<_> = out.iter().map(|h| h.info_hash.clone()).collect();
            hashes.sort();
            assert_eq!(hashes, vec!["hash1", "hash2", "hash3"]);
        }
    }

    #[test]
    fn test_size_desc() {
        let mut small = fixtures::hit("Small", "hash1");
        small.size_bytes = 100;
        let mut large = fixtures::hit("Large", "hash2");
        large.size_bytes = 10_000;

        let out = sorted(&[small, large], SortKey::SizeDesc);
        assert_eq!(out[0].title, "Large");
    }

    #[test]
    fn test_missing_date_sorts_earliest() {
        let mut dated = fixtures::hit("Dated", "hash1");
        dated.published_at = Some(chrono::Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());
        let undated = fixtures::hit("Undated", "hash2");

        let out = sorted(&[dated.clone(), undated.clone()], SortKey::DateDesc);
        assert_eq!(out[0].title, "Dated");

        let out = sorted(&[dated, undated], SortKey::DateAsc);
        assert_eq!(out[0].title, "Undated");
    }
}
