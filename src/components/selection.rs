//! Pure chapter-navigation arithmetic, shared by the next/previous buttons
//! and the shuffle actions.

use rand::Rng;

/// Wrapping successor over the loaded chapter list.
pub fn next_index(current: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (current + 1) % len
}

/// Wrapping predecessor over the loaded chapter list.
pub fn previous_index(current: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (current + len - 1) % len
}

/// Uniform pick over every chapter except the current one. With a single
/// chapter there is nowhere else to go, so the current index is returned.
pub fn shuffle_index<R: Rng>(current: usize, len: usize, rng: &mut R) -> usize {
    if len <= 1 {
        return current.min(len.saturating_sub(1));
    }
    let mut idx = rng.gen_range(0..len - 1);
    if idx >= current {
        idx += 1;
    }
    idx
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn next_and_previous_wrap_around() {
        assert_eq!(next_index(0, 114), 1);
        assert_eq!(next_index(113, 114), 0);
        assert_eq!(previous_index(0, 114), 113);
        assert_eq!(previous_index(1, 114), 0);
    }

    #[test]
    fn next_and_previous_are_inverse() {
        for i in 0..114 {
            assert_eq!(previous_index(next_index(i, 114), 114), i);
            assert_eq!(next_index(previous_index(i, 114), 114), i);
        }
    }

    #[test]
    fn empty_list_stays_at_zero() {
        assert_eq!(next_index(0, 0), 0);
        assert_eq!(previous_index(0, 0), 0);
    }

    #[test]
    fn shuffle_never_returns_current_with_multiple_chapters() {
        let mut rng = StdRng::seed_from_u64(7);
        for current in [0usize, 1, 56, 112, 113] {
            for _ in 0..500 {
                let idx = shuffle_index(current, 114, &mut rng);
                assert_ne!(idx, current);
                assert!(idx < 114);
            }
        }
    }

    #[test]
    fn shuffle_reaches_every_other_chapter() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = [false; 10];
        for _ in 0..2_000 {
            seen[shuffle_index(3, 10, &mut rng)] = true;
        }
        for (idx, was_seen) in seen.iter().enumerate() {
            assert_eq!(*was_seen, idx != 3, "index {idx}");
        }
    }

    #[test]
    fn shuffle_with_one_chapter_stays_put() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(shuffle_index(0, 1, &mut rng), 0);
    }
}
