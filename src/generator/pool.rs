use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::engine::tier::DifficultyTier;

/// Candidate words for each tier. Immutable once built.
#[derive(Clone, Debug, Default)]
pub struct WordPool {
    easy: Vec<String>,
    medium: Vec<String>,
    hard: Vec<String>,
}

impl WordPool {
    pub fn new(easy: Vec<String>, medium: Vec<String>, hard: Vec<String>) -> Self {
        Self { easy, medium, hard }
    }

    pub fn words(&self, tier: DifficultyTier) -> &[String] {
        match tier {
            DifficultyTier::Easy => &self.easy,
            DifficultyTier::Medium => &self.medium,
            DifficultyTier::Hard => &self.hard,
        }
    }

    /// Uniform pick among the tier's words not in `exclude`.
    /// `None` means the tier is exhausted.
    pub fn pick_word<R: Rng + ?Sized>(
        &self,
        tier: DifficultyTier,
        exclude: &HashSet<String>,
        rng: &mut R,
    ) -> Option<&str> {
        let candidates: Vec<&String> = self
            .words(tier)
            .iter()
            .filter(|w| !exclude.contains(*w))
            .collect();
        candidates.choose(rng).map(|w| w.as_str())
    }

    pub fn remaining(&self, tier: DifficultyTier, exclude: &HashSet<String>) -> usize {
        self.words(tier)
            .iter()
            .filter(|w| !exclude.contains(*w))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn pool() -> WordPool {
        let list = |ws: &[&str]| ws.iter().map(|w| w.to_string()).collect();
        WordPool::new(
            list(&["tree", "lamp", "rock"]),
            list(&["garden"]),
            list(&[]),
        )
    }

    #[test]
    fn test_pick_never_returns_excluded() {
        let pool = pool();
        let mut rng = SmallRng::seed_from_u64(3);
        let exclude: HashSet<String> = ["tree".to_string(), "rock".to_string()].into();
        for _ in 0..20 {
            assert_eq!(pool.pick_word(DifficultyTier::Easy, &exclude, &mut rng), Some("lamp"));
        }
    }

    #[test]
    fn test_exhausted_tier_returns_none() {
        let pool = pool();
        let mut rng = SmallRng::seed_from_u64(3);
        let exclude: HashSet<String> = ["garden".to_string()].into();
        assert_eq!(pool.pick_word(DifficultyTier::Medium, &exclude, &mut rng), None);
        assert_eq!(pool.pick_word(DifficultyTier::Hard, &HashSet::new(), &mut rng), None);
        assert_eq!(pool.remaining(DifficultyTier::Medium, &exclude), 0);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let pool = pool();
        let picks = |seed| {
            let mut rng = SmallRng::seed_from_u64(seed);
            (0..10)
                .map(|_| {
                    pool.pick_word(DifficultyTier::Easy, &HashSet::new(), &mut rng)
                        .unwrap()
                        .to_string()
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(picks(42), picks(42));
    }
}
