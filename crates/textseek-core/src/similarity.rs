//! String similarity used to compare OCR output with the target text.
//!
//! The default metric is the Ratcliff/Obershelp "gestalt" ratio: find the
//! longest common block, recurse on both sides of it, and score
//! `2 * matched / (len(a) + len(b))`. Comparison is case-insensitive.

use std::collections::HashMap;
use std::str::FromStr;

/// Sequences at least this long get the popular-element heuristic.
const AUTOJUNK_MIN_LEN: usize = 200;

/// Scoring function for fuzzy matching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Metric {
    /// Ratcliff/Obershelp gestalt ratio.
    #[default]
    Ratio,
    /// Jaro-Winkler similarity.
    JaroWinkler,
    /// Levenshtein distance normalized to `[0, 1]`.
    Levenshtein,
}

impl Metric {
    /// Score two strings in `[0, 1]`, ignoring case.
    pub fn score(self, a: &str, b: &str) -> f64 {
        let a = a.to_lowercase();
        let b = b.to_lowercase();
        match self {
            Metric::Ratio => gestalt_ratio(&a, &b),
            Metric::JaroWinkler => strsim::jaro_winkler(&a, &b),
            Metric::Levenshtein => strsim::normalized_levenshtein(&a, &b),
        }
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ratio" => Ok(Metric::Ratio),
            "jaro-winkler" | "jaro_winkler" | "jarowinkler" => Ok(Metric::JaroWinkler),
            "levenshtein" => Ok(Metric::Levenshtein),
            other => Err(format!(
                "unknown metric '{}' (expected ratio, jaro-winkler or levenshtein)",
                other
            )),
        }
    }
}

/// Case-insensitive gestalt similarity ratio.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    Metric::Ratio.score(a, b)
}

fn gestalt_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    let matched = BlockMatcher::new(&a, &b).matched_chars();
    2.0 * matched as f64 / total as f64
}

/// Finds matching blocks between two character sequences.
struct BlockMatcher<'a> {
    a: &'a [char],
    b: &'a [char],
    /// Positions of each character in `b`, ascending.
    b2j: HashMap<char, Vec<usize>>,
}

impl<'a> BlockMatcher<'a> {
    fn new(a: &'a [char], b: &'a [char]) -> Self {
        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, c) in b.iter().enumerate() {
            b2j.entry(*c).or_default().push(j);
        }

        // Very common characters in long sequences don't seed blocks.
        let n = b.len();
        if n >= AUTOJUNK_MIN_LEN {
            let limit = n / 100 + 1;
            b2j.retain(|_, positions| positions.len() <= limit);
        }

        Self { a, b, b2j }
    }

    /// Total length of all matching blocks.
    fn matched_chars(&self) -> usize {
        let mut matched = 0;
        let mut queue = vec![(0, self.a.len(), 0, self.b.len())];

        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let (i, j, k) = self.longest_match(alo, ahi, blo, bhi);
            if k == 0 {
                continue;
            }
            matched += k;
            if alo < i && blo < j {
                queue.push((alo, i, blo, j));
            }
            if i + k < ahi && j + k < bhi {
                queue.push((i + k, ahi, j + k, bhi));
            }
        }

        matched
    }

    /// Longest block `a[i..i+k] == b[j..j+k]` within the given ranges.
    ///
    /// Ties go to the block starting earliest in `a`, then earliest in `b`.
    fn longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> (usize, usize, usize) {
        let (mut best_i, mut best_j, mut best_k) = (alo, blo, 0);

        // j2len[j] = length of the block ending at a[i-1], b[j]
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        for i in alo..ahi {
            let mut next: HashMap<usize, usize> = HashMap::new();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| j2len.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next.insert(j, k);
                    if k > best_k {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_k = k;
                    }
                }
            }
            j2len = next;
        }

        // Grow the block over characters that were skipped as popular.
        while best_i > alo && best_j > blo && self.a[best_i - 1] == self.b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_k += 1;
        }
        while best_i + best_k < ahi
            && best_j + best_k < bhi
            && self.a[best_i + best_k] == self.b[best_j + best_k]
        {
            best_k += 1;
        }

        (best_i, best_j, best_k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_ratio_known_values() {
        assert!(approx(similarity_ratio("abcd", "bcde"), 0.75));
        assert!(approx(similarity_ratio("hello", "hallo"), 0.8));
        assert!(approx(similarity_ratio("Dayz", "Days"), 0.75));
        assert!(approx(similarity_ratio("abc", "xyz"), 0.0));
    }

    #[test]
    fn test_ratio_ignores_case() {
        assert!(approx(similarity_ratio("Settings", "SETTINGS"), 1.0));
        assert!(approx(similarity_ratio("File", "file"), 1.0));
    }

    #[test]
    fn test_ratio_empty() {
        assert!(approx(similarity_ratio("", ""), 1.0));
        assert!(approx(similarity_ratio("abc", ""), 0.0));
        assert!(approx(similarity_ratio("", "abc"), 0.0));
    }

    #[test]
    fn test_ratio_recurses_both_sides() {
        // "abc" first, then "d" to its right.
        assert!(approx(similarity_ratio("xabcyd", "abcd"), 0.8));
        // OCR-style confusion of O and 0 costs one character.
        assert!(approx(similarity_ratio("L0gin", "Login"), 0.8));
    }

    #[test]
    fn test_ratio_long_sequences_with_popular_chars() {
        let a = "ab".repeat(150);
        assert!(approx(similarity_ratio(&a, &a), 1.0));

        let b = format!("{}c", a);
        let score = similarity_ratio(&a, &b);
        assert!(score > 0.99 && score < 1.0, "score was {}", score);
    }

    #[test]
    fn test_alternative_metrics() {
        assert!(approx(Metric::JaroWinkler.score("Login", "LOGIN"), 1.0));
        assert!(approx(Metric::Levenshtein.score("kitten", "sitten"), 5.0 / 6.0));
        assert!(Metric::JaroWinkler.score("Submit", "Cancel") < 0.7);
    }

    #[test]
    fn test_metric_from_str() {
        assert_eq!("ratio".parse::<Metric>(), Ok(Metric::Ratio));
        assert_eq!("Jaro-Winkler".parse::<Metric>(), Ok(Metric::JaroWinkler));
        assert_eq!("levenshtein".parse::<Metric>(), Ok(Metric::Levenshtein));
        assert!("cosine".parse::<Metric>().is_err());
    }

    proptest! {
        #[test]
        fn prop_ratio_in_unit_range(a in "[a-zA-Z0-9 ]{0,40}", b in "[a-zA-Z0-9 ]{0,40}") {
            let score = similarity_ratio(&a, &b);
            prop_assert!((0.0..=1.0).contains(&score));
        }

        #[test]
        fn prop_ratio_identity(a in "[a-zA-Z0-9 ]{0,40}") {
            prop_assert!(approx(similarity_ratio(&a, &a), 1.0));
        }

        #[test]
        fn prop_ratio_case_insensitive(a in "[a-zA-Z0-9 ]{0,40}", b in "[a-zA-Z0-9 ]{0,40}") {
            let lower = similarity_ratio(&a.to_lowercase(), &b);
            let upper = similarity_ratio(&a.to_uppercase(), &b);
            prop_assert!(approx(lower, upper));
        }

        #[test]
        fn prop_all_metrics_bounded(a in "[a-z]{0,20}", b in "[a-z]{0,20}") {
            for metric in [Metric::Ratio, Metric::JaroWinkler, Metric::Levenshtein] {
                let score = metric.score(&a, &b);
                prop_assert!((0.0..=1.0).contains(&score), "{:?} gave {}", metric, score);
            }
        }
    }
}
