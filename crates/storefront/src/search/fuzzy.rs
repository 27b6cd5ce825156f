//! Approximate substring matching.
//!
//! Computes the optimal string alignment distance between a query and the
//! best-matching substring of a text. Insertion, deletion, substitution and
//! transposition of two adjacent characters each cost one. Leading and
//! trailing text around the match is free.

/// Distance between `query` and its closest substring in `text`, if it is at
/// most `max_errors`.
///
/// Both inputs should already be case-folded. Returns `None` as soon as the
/// bound can no longer be met.
#[must_use]
#[allow(clippy::indexing_slicing)] // All indices are bounded by the loop ranges
pub fn substring_distance(query: &[char], text: &[char], max_errors: usize) -> Option<usize> {
    let m = query.len();
    let n = text.len();
    if m == 0 {
        return Some(0);
    }
    if n == 0 {
        return (m <= max_errors).then_some(m);
    }

    // Rows i-2, i-1 and i of the DP table. Row 0 is all zeros: a match may
    // start anywhere in the text.
    let mut before_prev = vec![0usize; n + 1];
    let mut prev = vec![0usize; n + 1];
    let mut cur = vec![0usize; n + 1];
    let mut prev_min = 0;

    for i in 1..=m {
        cur[0] = i;
        let mut row_min = cur[0];
        for j in 1..=n {
            let cost = usize::from(query[i - 1] != text[j - 1]);
            let mut best = (prev[j] + 1).min(cur[j - 1] + 1).min(prev[j - 1] + cost);
            if i > 1 && j > 1 && query[i - 1] == text[j - 2] && query[i - 2] == text[j - 1] {
                best = best.min(before_prev[j - 2] + 1);
            }
            cur[j] = best;
            row_min = row_min.min(best);
        }

        // Any later cell extends a cell from one of the last two rows.
        if row_min > max_errors && prev_min > max_errors {
            return None;
        }
        prev_min = row_min;

        std::mem::swap(&mut before_prev, &mut prev);
        std::mem::swap(&mut prev, &mut cur);
    }

    prev.iter().copied().min().filter(|d| *d <= max_errors)
}

/// Fold a string into lowercase characters for matching.
#[must_use]
pub fn fold(s: &str) -> Vec<char> {
    s.chars().flat_map(char::to_lowercase).collect()
}
