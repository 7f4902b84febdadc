//! Longest common subsequence over normalized tokens.
//!
//! When several maximum subsequences exist the backtrack picks one
//! deterministically: on a tie between the two neighbours it steps along the
//! source sequence first. Any maximum alignment is a valid diff, so this is
//! not canonical, only stable.

use crate::tokenize::normalize;

/// Index pairs `(i, j)` with `a[i]` matching `b[j]` after normalization,
/// strictly increasing in both coordinates, of maximum length.
///
/// O(m·n) time and space; inputs are single sentences.
pub fn lcs<S: AsRef<str>>(a: &[S], b: &[S]) -> Vec<(usize, usize)> {
    let a_norm: Vec<String> = a.iter().map(|t| normalize(t.as_ref())).collect();
    let b_norm: Vec<String> = b.iter().map(|t| normalize(t.as_ref())).collect();
    let m = a_norm.len();
    let n = b_norm.len();

    if m == 0 || n == 0 {
        return Vec::new();
    }

    // dp[i * width + j] = LCS length of a[..i] and b[..j]
    let width = n + 1;
    let mut dp = vec![0u32; (m + 1) * width];

    for i in 1..=m {
        for j in 1..=n {
            dp[i * width + j] = if a_norm[i - 1] == b_norm[j - 1] {
                dp[(i - 1) * width + (j - 1)] + 1
            } else {
                dp[(i - 1) * width + j].max(dp[i * width + (j - 1)])
            };
        }
    }

    let mut matches = Vec::with_capacity(dp[m * width + n] as usize);
    let (mut i, mut j) = (m, n);

    while i > 0 && j > 0 {
        if a_norm[i - 1] == b_norm[j - 1] {
            matches.push((i - 1, j - 1));
            i -= 1;
            j -= 1;
        } else if dp[(i - 1) * width + j] >= dp[i * width + (j - 1)] {
            i -= 1;
        } else {
            j -= 1;
        }
    }

    matches.reverse();
    matches
}
