use rand::Rng;
use rand::seq::SliceRandom;

use civics_core::model::Question;

/// Draw up to `count` distinct questions from `pool` in uniformly random order.
///
/// With `restrict_to_flagged` only asterisk questions are eligible. The
/// eligible pool is fully shuffled (Fisher-Yates) before truncation, so every
/// question is equally likely in every position. A zero `count` or an empty
/// pool yields an empty list; callers decide whether that is usable.
pub fn sample<R: Rng + ?Sized>(
    pool: &[Question],
    count: usize,
    restrict_to_flagged: bool,
    rng: &mut R,
) -> Vec<Question> {
    let mut candidates: Vec<&Question> = pool
        .iter()
        .filter(|q| !restrict_to_flagged || q.is_asterisk())
        .collect();

    candidates.as_mut_slice().shuffle(rng);

    candidates
        .into_iter()
        .take(count)
        .cloned()
        .collect()
}
