//! Progressive query reformulation.
//!
//! [`QueryVariants`] yields alternate phrasings of a keyword from most to
//! least specific. It is lazy: the caller stops pulling as soon as one
//! variant returns results, so later strings are never built.

use std::collections::HashSet;

/// Ordered, de-duplicated reformulations of one search keyword.
///
/// Order for keyword `k`, category `c`, region `r` and landmarks `l1..ln`:
///
/// 1. `k`
/// 2. `k` with whitespace removed
/// 3. first token of `k`
/// 4. `r k`, then `k r`
/// 5. `r c k`, `k c r`, `c k`, `k c` (only with a category)
/// 6. `r k점`, then `k 본점`
/// 7. `k l1` .. `k ln`
///
/// A phrasing equal to one already yielded is skipped.
#[derive(Debug, Clone)]
pub struct QueryVariants {
    keyword: String,
    category: Option<String>,
    region: String,
    landmarks: Vec<String>,
    stage: usize,
    seen: HashSet<String>,
}

const FIXED_STAGES: usize = 11;

impl QueryVariants {
    #[must_use]
    pub fn new(keyword: &str, category: Option<&str>, region: &str, landmarks: &[String]) -> Self {
        Self {
            keyword: keyword.trim().to_string(),
            category: category
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
            region: region.trim().to_string(),
            landmarks: landmarks.to_vec(),
            stage: 0,
            seen: HashSet::new(),
        }
    }

    /// The phrasing for `stage`, `Some(None)` when the stage does not apply,
    /// `None` once every stage is exhausted.
    #[allow(clippy::option_option)]
    fn phrasing(&self, stage: usize) -> Option<Option<String>> {
        let k = &self.keyword;
        let r = &self.region;
        let c = self.category.as_ref();

        let candidate = match stage {
            0 => Some(k.clone()),
            1 => Some(k.split_whitespace().collect::<String>()),
            2 => k.split_whitespace().next().map(str::to_string),
            3 => Some(format!("{r} {k}")),
            4 => Some(format!("{k} {r}")),
            5 => c.map(|c| format!("{r} {c} {k}")),
            6 => c.map(|c| format!("{k} {c} {r}")),
            7 => c.map(|c| format!("{c} {k}")),
            8 => c.map(|c| format!("{k} {c}")),
            9 => Some(format!("{r} {k}점")),
            10 => Some(format!("{k} 본점")),
            n => {
                let landmark = self.landmarks.get(n - FIXED_STAGES)?;
                Some(format!("{k} {landmark}"))
            }
        };
        Some(candidate.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()))
    }
}

impl Iterator for QueryVariants {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.keyword.is_empty() {
            return None;
        }
        loop {
            let stage = self.stage;
            let candidate = self.phrasing(stage)?;
            self.stage += 1;
            if let Some(query) = candidate {
                if self.seen.insert(query.clone()) {
                    return Some(query);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn landmarks() -> Vec<String> {
        vec!["부산대".to_string(), "서면".to_string(), "해운대".to_string()]
    }

    #[test]
    fn full_order_with_category() {
        let variants: Vec<String> =
            QueryVariants::new("돼지 국밥", Some("맛집"), "부산", &landmarks()).collect();
        assert_eq!(
            variants,
            vec![
                "돼지 국밥",
                "돼지국밥",
                "돼지",
                "부산 돼지 국밥",
                "돼지 국밥 부산",
                "부산 맛집 돼지 국밥",
                "돼지 국밥 맛집 부산",
                "맛집 돼지 국밥",
                "돼지 국밥 맛집",
                "부산 돼지 국밥점",
                "돼지 국밥 본점",
                "돼지 국밥 부산대",
                "돼지 국밥 서면",
                "돼지 국밥 해운대",
            ]
        );
    }

    #[test]
    fn single_token_keyword_skips_repeats() {
        let variants: Vec<String> =
            QueryVariants::new("마라탕", None, "부산", &landmarks()).collect();
        assert_eq!(
            variants,
            vec![
                "마라탕",
                "부산 마라탕",
                "마라탕 부산",
                "부산 마라탕점",
                "마라탕 본점",
                "마라탕 부산대",
                "마라탕 서면",
                "마라탕 해운대",
            ]
        );
    }

    #[test]
    fn blank_category_is_ignored() {
        let with_blank: Vec<String> =
            QueryVariants::new("카페", Some("  "), "부산", &[]).collect();
        let without: Vec<String> = QueryVariants::new("카페", None, "부산", &[]).collect();
        assert_eq!(with_blank, without);
    }

    #[test]
    fn empty_keyword_yields_nothing() {
        assert_eq!(QueryVariants::new("  ", Some("카페"), "부산", &landmarks()).count(), 0);
    }

    #[test]
    fn is_lazy_and_finite() {
        let mut variants = QueryVariants::new("a b", None, "r", &[]);
        assert_eq!(variants.next().as_deref(), Some("a b"));
        assert_eq!(variants.stage, 1);
        assert_eq!(variants.count(), 6);
    }
}
