//! Randomized exploration step selection.
//!
//! The exploration alphabet has three behaviourally orthogonal perturbations:
//! message delivery, clock advance and a new client write. Each step picks one
//! uniformly; clock advances then pick a duration from a discrete set of
//! weighted bands that favours election-timeout-scale jitter while
//! occasionally injecting a tick large enough to force several timeouts.
//!
//! Partition and crash perturbations are not part of this alphabet.

use crate::action::Action;
use crate::random::RandomProvider;

/// Prefix of every exploration replication payload.
pub const EXPLORATION_PAYLOAD_PREFIX: &str = "hello";

/// Category of an exploration step. Chosen uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepCategory {
    /// Deliver all in-flight messages.
    DispatchAll,
    /// Advance every timer by a weighted-random duration.
    PeriodicAll,
    /// Replicate a fresh, uniquely-labelled entry.
    Replicate,
}

impl StepCategory {
    /// Every category, in selection order.
    pub const ALL: [StepCategory; 3] = [
        StepCategory::DispatchAll,
        StepCategory::PeriodicAll,
        StepCategory::Replicate,
    ];

    /// Draw a category with equal probability.
    pub fn draw<R: RandomProvider>(random: &R) -> Self {
        Self::ALL[random.random_range(0..Self::ALL.len())]
    }

    /// Sample a concrete action for this category.
    ///
    /// `replications` is the per-scenario replication counter; it is advanced
    /// only when this category is [`StepCategory::Replicate`].
    pub fn sample<R: RandomProvider>(
        self,
        random: &R,
        ticks: &TickSampler,
        replications: &mut u64,
    ) -> Action {
        match self {
            StepCategory::DispatchAll => Action::DispatchAll,
            StepCategory::PeriodicAll => Action::PeriodicAll {
                ms: ticks.sample(random),
            },
            StepCategory::Replicate => {
                *replications += 1;
                Action::replicate_latest(format!("{EXPLORATION_PAYLOAD_PREFIX} {replications}"))
            }
        }
    }
}

/// A half-open duration range `[start, end)` with a relative selection weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationBand {
    /// Inclusive lower bound in simulated milliseconds.
    pub start: u64,
    /// Exclusive upper bound in simulated milliseconds.
    pub end: u64,
    /// Relative weight of this band.
    pub weight: u32,
}

impl DurationBand {
    /// Whether `ms` falls inside this band.
    pub fn contains(&self, ms: u64) -> bool {
        (self.start..self.end).contains(&ms)
    }
}

/// Short election-timeout-scale jitter.
pub const SHORT_TICK: DurationBand = DurationBand {
    start: 0,
    end: 20,
    weight: 10,
};

/// Rare long tick that can trigger several timeouts at once.
pub const LONG_TICK: DurationBand = DurationBand {
    start: 100,
    end: 500,
    weight: 1,
};

/// Discrete weighted sampler over duration bands.
///
/// Picks a band with probability `weight / total_weight`, then a duration
/// uniformly within it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickSampler {
    bands: Vec<DurationBand>,
    total_weight: u32,
}

impl TickSampler {
    /// Create a sampler over `bands`.
    ///
    /// # Panics
    ///
    /// Panics if `bands` is empty, any band is empty or has zero weight, or
    /// the weights sum past `u32::MAX`.
    pub fn new(bands: Vec<DurationBand>) -> Self {
        assert!(!bands.is_empty(), "TickSampler requires at least one band");
        for band in &bands {
            assert!(band.weight > 0, "Weight must be positive, got {}", band.weight);
            assert!(
                band.start < band.end,
                "Band must be non-empty, got {}..{}",
                band.start,
                band.end
            );
        }
        let total_weight = bands
            .iter()
            .try_fold(0u32, |total, band| total.checked_add(band.weight))
            .expect("Total band weight must fit in u32");
        Self {
            bands,
            total_weight,
        }
    }

    /// The configured bands.
    pub fn bands(&self) -> &[DurationBand] {
        &self.bands
    }

    /// Whether `ms` could have been produced by this sampler.
    pub fn covers(&self, ms: u64) -> bool {
        self.bands.iter().any(|band| band.contains(ms))
    }

    /// Pick a band by weight.
    pub fn pick_band<R: RandomProvider>(&self, random: &R) -> &DurationBand {
        let mut roll = random.random_range(0..self.total_weight);
        for band in &self.bands {
            if roll < band.weight {
                return band;
            }
            roll -= band.weight;
        }
        // roll < total_weight, so the loop always returns
        &self.bands[self.bands.len() - 1]
    }

    /// Draw one duration.
    pub fn sample<R: RandomProvider>(&self, random: &R) -> u64 {
        let band = self.pick_band(random);
        random.random_range(band.start..band.end)
    }
}

impl Default for TickSampler {
    /// The 10:1 short/long exploration bias.
    fn default() -> Self {
        Self::new(vec![SHORT_TICK, LONG_TICK])
    }
}

/// Draws exploration actions for a single scenario.
///
/// Owns the scenario's replication counter, so `hello <n>` labels are unique
/// and strictly increasing within the scenario. Create a fresh selector for
/// every scenario.
pub struct WeightedStepSelector<'a, R: RandomProvider> {
    random: &'a R,
    ticks: TickSampler,
    replications: u64,
}

impl<'a, R: RandomProvider> WeightedStepSelector<'a, R> {
    /// Create a selector drawing from `random` with the default tick bands.
    pub fn new(random: &'a R) -> Self {
        Self::with_ticks(random, TickSampler::default())
    }

    /// Create a selector with custom tick bands.
    pub fn with_ticks(random: &'a R, ticks: TickSampler) -> Self {
        Self {
            random,
            ticks,
            replications: 0,
        }
    }

    /// Draw the next exploration action.
    pub fn step(&mut self) -> Action {
        let category = StepCategory::draw(self.random);
        category.sample(self.random, &self.ticks, &mut self.replications)
    }

    /// Number of replication requests emitted so far.
    pub fn replications(&self) -> u64 {
        self.replications
    }

    /// Tick bands used by this selector.
    pub fn ticks(&self) -> &TickSampler {
        &self.ticks
    }
}

/// Never exhausts; bound it with `take`.
impl<R: RandomProvider> Iterator for WeightedStepSelector<'_, R> {
    type Item = Action;

    fn next(&mut self) -> Option<Action> {
        Some(self.step())
    }
}
