//! Simulated typing delay.

use crate::config::TimingStrategy;
use rand::Rng;
use std::time::Duration;
use tracing::debug;

/// Lower bound for any computed delay.
pub const MIN_DELAY: Duration = Duration::from_millis(800);

const BASE_MS: f64 = 1000.0;
const PER_CHAR_MS: f64 = 10.0;
const COMPLEXITY_MS: f64 = 300.0;
const JITTER: f64 = 0.3;

const COMPLEXITY_KEYWORDS: &[&str] = &[
    "project",
    "experience",
    "skill",
    "education",
    "contact",
    "technology",
    "development",
    "implementation",
];

const DETAILED_KEYWORDS: &[&str] = &["detail", "specific", "tell me more", "explain"];
const COMPLEX_KEYWORDS: &[&str] = &["project", "experience", "skill", "education", "contact"];
const SIMPLE_MAX_CHARS: usize = 50;

/// Delay band in milliseconds, `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Greeting,
    Simple,
    Complex,
    Detailed,
}

impl Band {
    pub fn range_ms(self) -> (u64, u64) {
        match self {
            Band::Greeting => (1000, 1500),
            Band::Simple => (800, 1200),
            Band::Complex => (1500, 2500),
            Band::Detailed => (2000, 3500),
        }
    }

    /// Picks the band for a user message; the first matching rule wins.
    pub fn for_message(message: &str) -> Band {
        let lower = message.to_lowercase();
        if DETAILED_KEYWORDS.iter().any(|k| lower.contains(k)) {
            Band::Detailed
        } else if COMPLEX_KEYWORDS.iter().any(|k| lower.contains(k)) {
            Band::Complex
        } else if message.chars().count() < SIMPLE_MAX_CHARS {
            Band::Simple
        } else {
            Band::Greeting
        }
    }
}

/// Computes how long the assistant "types" before a reply appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimingModel {
    strategy: TimingStrategy,
}

impl TimingModel {
    pub fn new(strategy: TimingStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> TimingStrategy {
        self.strategy
    }

    /// Delay for replying to `message`; never below [`MIN_DELAY`].
    pub fn compute_delay<R: Rng + ?Sized>(&self, message: &str, rng: &mut R) -> Duration {
        let ms = match self.strategy {
            TimingStrategy::Linear => linear_ms(message, rng),
            TimingStrategy::Bands => {
                let (min, max) = Band::for_message(message).range_ms();
                rng.gen_range(min..=max) as f64
            }
        };
        let delay = Duration::from_millis(ms.round() as u64).max(MIN_DELAY);
        debug!(strategy = ?self.strategy, delay_ms = delay.as_millis() as u64, "computed typing delay");
        delay
    }
}

fn linear_ms<R: Rng + ?Sized>(message: &str, rng: &mut R) -> f64 {
    let lower = message.to_lowercase();
    let complexity = COMPLEXITY_KEYWORDS
        .iter()
        .filter(|k| lower.contains(*k))
        .count() as f64;
    let raw = BASE_MS + PER_CHAR_MS * message.chars().count() as f64 + COMPLEXITY_MS * complexity;
    raw * rng.gen_range((1.0 - JITTER)..=(1.0 + JITTER))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_delay_never_below_floor() {
        let mut rng = StdRng::seed_from_u64(0);
        for strategy in [TimingStrategy::Linear, TimingStrategy::Bands] {
            let model = TimingModel::new(strategy);
            for msg in ["", "a", "hi", "what are your skills?", &"x".repeat(500)] {
                for _ in 0..100 {
                    assert!(model.compute_delay(msg, &mut rng) >= MIN_DELAY);
                }
            }
        }
    }

    #[test]
    fn test_linear_delay_grows_with_complexity() {
        // With jitter bounds fixed, the shortest complex delay still beats the
        // longest plain one once enough keywords pile up.
        let plain = 1000.0 + 10.0 * 3.0;
        let heavy_msg = "project experience skill education contact";
        let heavy = 1000.0 + 10.0 * heavy_msg.len() as f64 + 300.0 * 5.0;
        assert!(heavy * 0.7 > plain * 1.3);

        let model = TimingModel::new(TimingStrategy::Linear);
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..50 {
            let short = model.compute_delay("hey", &mut rng);
            let long = model.compute_delay(heavy_msg, &mut rng);
            assert!(long > short);
        }
    }

    #[test]
    fn test_band_selection_order() {
        assert_eq!(Band::for_message("Tell me more about the LMS project"), Band::Detailed);
        assert_eq!(Band::for_message("Show me your Projects"), Band::Complex);
        assert_eq!(Band::for_message("hello"), Band::Simple);
        assert_eq!(
            Band::for_message("I was wondering whether we could chat for a little while now"),
            Band::Greeting
        );
    }

    #[test]
    fn test_band_delay_stays_in_range() {
        let model = TimingModel::new(TimingStrategy::Bands);
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..200 {
            let ms = model.compute_delay("explain", &mut rng).as_millis() as u64;
            assert!((2000..=3500).contains(&ms));
        }
    }
}
