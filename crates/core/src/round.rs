//! Round engine - one target, one counted guess
//!
//! Phases: `Idle -> AwaitingGuess -> Resolved`. Only the first guess of a
//! round is evaluated; later submissions return the recorded outcome.
//! `retry` reopens the same target without drawing from the pool.

use tracing::debug;

use crate::catalog::ModeCatalog;
use crate::error::{QuizError, Result};
use crate::geometry::{distance_miles, point_in_polygon};
use crate::pool::TargetPool;
use crate::rng::RandomSource;
use crate::types::{
    MessageTier, ModeDefinition, ModeKey, Point, RoundOutcome, RoundPhase, Scoring, Target,
};

/// Live state of the current round.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundState {
    pub mode: ModeKey,
    pub target: Target,
    pub guessed: bool,
    /// Outcome of the counted guess, once there is one.
    pub outcome: Option<RoundOutcome>,
    /// Where the counted guess landed.
    pub guess: Option<Point>,
}

#[derive(Debug, Clone, Default)]
pub struct RoundEngine {
    round: Option<RoundState>,
    round_number: u32,
}

impl RoundEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> RoundPhase {
        match &self.round {
            None => RoundPhase::Idle,
            Some(r) if r.guessed => RoundPhase::Resolved,
            Some(_) => RoundPhase::AwaitingGuess,
        }
    }

    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    pub fn target(&self) -> Option<&Target> {
        self.round.as_ref().map(|r| &r.target)
    }

    /// 1-based number of the current round within the mode (0 when idle).
    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    /// Draw a target from `pool` and wait for a guess.
    ///
    /// On error the engine is left exactly as it was.
    pub fn new_round<R: RandomSource + ?Sized>(
        &mut self,
        pool: &TargetPool,
        rng: &mut R,
    ) -> Result<&Target> {
        let target = pool.pick_random(rng)?.clone();
        self.round_number += 1;
        debug!(
            round = self.round_number,
            mode = pool.mode().as_str(),
            target = %target.name,
            "round started"
        );
        let state = self.round.insert(RoundState {
            mode: pool.mode(),
            target,
            guessed: false,
            outcome: None,
            guess: None,
        });
        Ok(&state.target)
    }

    /// Score `point` against the current target.
    ///
    /// Idempotent once resolved: the first outcome is returned unchanged.
    pub fn evaluate(&mut self, point: Point) -> Result<RoundOutcome> {
        let round = self.round.as_mut().ok_or(QuizError::NoActiveRound)?;
        if let (true, Some(outcome)) = (round.guessed, round.outcome) {
            return Ok(outcome);
        }

        let def = ModeCatalog::definition(round.mode);
        let outcome = score_guess(def, &round.target, point);
        round.guessed = true;
        round.outcome = Some(outcome);
        round.guess = Some(point);

        debug!(
            round = self.round_number,
            target = %round.target.name,
            success = outcome.success,
            distance_miles = outcome.distance_miles,
            tier = outcome.tier.as_str(),
            "guess evaluated"
        );
        Ok(outcome)
    }

    /// Reopen the resolved round with the same target.
    pub fn retry(&mut self) -> Result<&Target> {
        let round = match self.round.as_mut() {
            Some(r) if r.guessed => r,
            Some(_) => return Err(QuizError::RoundNotResolved),
            None => return Err(QuizError::NoActiveRound),
        };
        round.guessed = false;
        round.outcome = None;
        round.guess = None;
        Ok(&round.target)
    }

    /// Drop the round and restart numbering.
    pub fn reset(&mut self) {
        self.round = None;
        self.round_number = 0;
    }
}

/// Score one guess under a mode's rules.
///
/// Distance is always measured to the target's representative location.
/// Polygon misses are tiered by that distance like point targets.
pub fn score_guess(def: &ModeDefinition, target: &Target, point: Point) -> RoundOutcome {
    let distance = distance_miles(point, target.location);
    let success = match def.scoring {
        Scoring::Containment => target
            .geometry
            .as_ref()
            .is_some_and(|g| point_in_polygon(point, g)),
        Scoring::DistanceThreshold { threshold_miles } => is_within_threshold(distance, threshold_miles),
    };

    let tier = if success && def.scoring.is_containment() {
        MessageTier::PerfectInside
    } else {
        MessageTier::from_distance(distance)
    };

    RoundOutcome {
        success,
        distance_miles: distance,
        tier,
    }
}

/// Strict comparison: a guess exactly at the threshold is a miss.
pub fn is_within_threshold(distance_miles: f64, threshold_miles: f64) -> bool {
    distance_miles < threshold_miles
}
