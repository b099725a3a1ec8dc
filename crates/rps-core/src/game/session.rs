//! Match session
//!
//! Owns every piece of per-match state, so concurrent matches never share
//! anything. Picks the Secondary move according to the mode and clears the
//! synthetic opponent's held move whenever the round reopens.

use super::config::{GameMode, SessionConfig};
use super::controller::{MatchController, MatchState};
use crate::error::ArenaError;
use crate::moves::Move;
use crate::round::{OpponentMoveSource, RoundEvent, RoundState};
use crate::signal::SignalSink;
use log::info;
use rand::Rng;
use rand::rngs::StdRng;

pub struct MatchSession<R = StdRng> {
    config: SessionConfig,
    controller: MatchController,
    opponent: OpponentMoveSource<R>,
}

impl MatchSession<StdRng> {
    pub fn new(config: SessionConfig) -> Result<Self, ArenaError> {
        let opponent = OpponentMoveSource::new(config.mode);
        Self::build(config, opponent)
    }
}

impl<R: Rng> MatchSession<R> {
    /// Session whose synthetic opponent draws from `rng`.
    pub fn with_rng(config: SessionConfig, rng: R) -> Result<Self, ArenaError> {
        Self::build(config, OpponentMoveSource::with_rng(config.mode, rng))
    }

    fn build(config: SessionConfig, opponent: OpponentMoveSource<R>) -> Result<Self, ArenaError> {
        let controller = MatchController::new(config)?;
        info!(
            "new session: mode {}, first to {}",
            config.mode, config.target_score
        );
        Ok(Self {
            config,
            controller,
            opponent,
        })
    }

    /// Play one frame.
    ///
    /// `spatial_secondary` is the move detected on the Secondary half of the
    /// frame. It only counts against a human; against the synthetic opponent
    /// the Secondary move comes from the opponent source.
    pub fn play<F: Clone>(
        &mut self,
        primary: Option<Move>,
        spatial_secondary: Option<Move>,
        frame: &F,
        signals: &mut impl SignalSink<F>,
    ) -> MatchState {
        let secondary = self.secondary_move(primary, spatial_secondary, signals);
        self.advance(primary, secondary, frame, signals)
    }

    /// First half of [`play`](Self::play): the Secondary move for this frame.
    ///
    /// Against the synthetic opponent this may draw (and announce) a move.
    /// Returns `None` once the match is over.
    pub fn secondary_move<F>(
        &mut self,
        primary: Option<Move>,
        spatial_secondary: Option<Move>,
        signals: &mut impl SignalSink<F>,
    ) -> Option<Move> {
        if self.controller.is_concluded() {
            return None;
        }

        match self.config.mode {
            GameMode::VsHuman => spatial_secondary,
            GameMode::VsSynthetic => {
                let settled = self.controller.round().is_settled();
                self.opponent.next(settled, primary.is_some(), signals)
            }
        }
    }

    /// Second half of [`play`](Self::play): judge the frame with the move
    /// from [`secondary_move`](Self::secondary_move).
    pub fn advance<F: Clone>(
        &mut self,
        primary: Option<Move>,
        secondary: Option<Move>,
        frame: &F,
        signals: &mut impl SignalSink<F>,
    ) -> MatchState {
        if self.controller.is_concluded() {
            return self.snapshot();
        }

        let state = self.controller.advance(primary, secondary, frame, signals);
        if self.controller.last_event() == RoundEvent::Reset {
            self.opponent.reset();
        }
        state
    }

    /// Current scoreboard. Side-effect free.
    pub fn snapshot(&self) -> MatchState {
        self.controller.state().clone()
    }

    pub fn state(&self) -> &MatchState {
        self.controller.state()
    }

    pub fn round(&self) -> &RoundState {
        self.controller.round()
    }

    /// Move the synthetic opponent holds for the current round.
    pub fn opponent_move(&self) -> Option<Move> {
        self.opponent.current()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn is_concluded(&self) -> bool {
        self.controller.is_concluded()
    }
}
