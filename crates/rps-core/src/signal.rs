//! Side-effect signals raised by the match core
//!
//! Consumers decide what a signal means (a sound cue, a saved snapshot).
//! Emitting must never wait on them.

use crate::moves::Position;

#[derive(Debug, Clone, PartialEq)]
pub enum Signal<F> {
    /// The synthetic opponent committed to its move for the round.
    Move,
    /// A round was decided. Carries the frame that decided it.
    RoundWon { winner: Position, frame: F },
}

/// Receiver for signals emitted during a frame.
pub trait SignalSink<F> {
    fn emit(&mut self, signal: Signal<F>);
}

impl<F> SignalSink<F> for Vec<Signal<F>> {
    fn emit(&mut self, signal: Signal<F>) {
        self.push(signal);
    }
}

/// Drops every signal.
#[derive(Debug, Clone, Copy, Default)]
pub struct Discard;

impl<F> SignalSink<F> for Discard {
    fn emit(&mut self, _signal: Signal<F>) {}
}
