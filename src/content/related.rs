//! Related-post ranking

use std::collections::HashSet;

use super::Post;

/// Points for sharing the current post's category
pub const CATEGORY_SCORE: u32 = 10;
/// Points per keyword shared with the current post
pub const KEYWORD_SCORE: u32 = 3;
/// Points for being published within 30 days of the current post
pub const RECENT_SCORE: u32 = 2;
/// Points for being published within 90 days of the current post
pub const NEARBY_SCORE: u32 = 1;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Relevance of `candidate` to `current`
pub fn score(current: &Post, candidate: &Post) -> u32 {
    let mut score = 0;

    if candidate.category == current.category {
        score += CATEGORY_SCORE;
    }

    score += KEYWORD_SCORE * shared_keywords(current, candidate);

    let apart = (candidate.published - current.published).num_seconds().abs();
    if apart < 30 * SECONDS_PER_DAY {
        score += RECENT_SCORE;
    } else if apart < 90 * SECONDS_PER_DAY {
        score += NEARBY_SCORE;
    }

    score
}

/// Number of distinct keywords both posts carry, exact match
fn shared_keywords(a: &Post, b: &Post) -> u32 {
    let ours: HashSet<&str> = a.keywords().iter().map(String::as_str).collect();
    let theirs: HashSet<&str> = b.keywords().iter().map(String::as_str).collect();
    ours.intersection(&theirs).count() as u32
}

/// Rank `candidates` against `current`, best first, keeping at most `limit`.
/// Equal scores keep the order the candidates came in.
pub fn rank<'a, I>(current: &Post, candidates: I, limit: usize) -> Vec<&'a Post>
where
    I: IntoIterator<Item = &'a Post>,
{
    let mut scored: Vec<(u32, &Post)> = candidates
        .into_iter()
        .map(|post| (score(current, post), post))
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));

    for (score, post) in &scored {
        tracing::debug!("Relevance of {} to {}: {}", post.slug, current.slug, score);
    }

    scored.into_iter().take(limit).map(|(_, post)| post).collect()
}
