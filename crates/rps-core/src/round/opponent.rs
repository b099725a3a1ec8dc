//! Secondary move source
//!
//! Against a human the Secondary move comes from the frame itself, so this
//! source stays silent. Against the synthetic opponent it draws one move per
//! round, as soon as the Primary hand shows, and holds it until the round
//! resets.

use crate::game::GameMode;
use crate::moves::Move;
use crate::signal::{Signal, SignalSink};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub struct OpponentMoveSource<R = StdRng> {
    mode: GameMode,
    rng: R,
    chosen: Option<Move>,
}

impl OpponentMoveSource<StdRng> {
    pub fn new(mode: GameMode) -> Self {
        Self::with_rng(mode, StdRng::from_entropy())
    }
}

impl<R: Rng> OpponentMoveSource<R> {
    pub fn with_rng(mode: GameMode, rng: R) -> Self {
        Self {
            mode,
            rng,
            chosen: None,
        }
    }

    /// Secondary move for this frame.
    ///
    /// Returns `None` in human mode and for an already settled round. The
    /// first draw of a round raises [`Signal::Move`].
    pub fn next<F>(
        &mut self,
        settled: bool,
        primary_present: bool,
        signals: &mut impl SignalSink<F>,
    ) -> Option<Move> {
        if self.mode == GameMode::VsHuman || settled {
            return None;
        }
        if let Some(chosen) = self.chosen {
            return Some(chosen);
        }
        if !primary_present {
            return None;
        }

        let drawn = Move::ALL[self.rng.gen_range(0..Move::ALL.len())];
        self.chosen = Some(drawn);
        signals.emit(Signal::Move);
        Some(drawn)
    }

    /// Move held for the current round, if one was drawn.
    pub fn current(&self) -> Option<Move> {
        self.chosen
    }

    pub fn reset(&mut self) {
        self.chosen = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::Discard;

    fn seeded(mode: GameMode) -> OpponentMoveSource<StdRng> {
        OpponentMoveSource::with_rng(mode, StdRng::seed_from_u64(7))
    }

    #[test]
    fn test_human_mode_never_plays() {
        let mut source = seeded(GameMode::VsHuman);
        let mut signals: Vec<Signal<()>> = Vec::new();
        assert_eq!(source.next(false, true, &mut signals), None);
        assert!(signals.is_empty());
    }

    #[test]
    fn test_waits_for_primary_hand() {
        let mut source = seeded(GameMode::VsSynthetic);
        let mut signals: Vec<Signal<()>> = Vec::new();
        assert_eq!(source.next(false, false, &mut signals), None);
        assert_eq!(source.current(), None);
        assert!(signals.is_empty());
    }

    #[test]
    fn test_move_is_held_for_the_round() {
        let mut source = seeded(GameMode::VsSynthetic);
        let mut signals: Vec<Signal<()>> = Vec::new();
        let first = source.next(false, true, &mut signals);
        assert!(first.is_some());
        for _ in 0..50 {
            assert_eq!(source.next(false, true, &mut signals), first);
        }
        assert_eq!(signals, vec![Signal::Move]);
    }

    #[test]
    fn test_settled_round_is_suppressed() {
        let mut source = seeded(GameMode::VsSynthetic);
        let drawn = source.next::<()>(false, true, &mut Discard);
        assert_eq!(source.next::<()>(true, true, &mut Discard), None);
        assert_eq!(source.current(), drawn);
    }

    #[test]
    fn test_reset_allows_a_new_draw() {
        let mut source = seeded(GameMode::VsSynthetic);
        let mut signals: Vec<Signal<()>> = Vec::new();
        source.next(false, true, &mut signals);
        source.reset();
        assert_eq!(source.current(), None);
        source.next(false, true, &mut signals);
        assert_eq!(signals.len(), 2);
    }
}
