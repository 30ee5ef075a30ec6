// Lumen NFA - nondeterministic automaton for light path classification
//
// This crate owns the automaton that light path expression rules are
// compiled into. It provides:
// - State and transition storage (symbol, wildcard-with-exclusions, epsilon)
// - The construction primitives consumed by the expression compiler
// - Initial/final state registration with per-rule payloads
// - Nondeterministic simulation of event paths

mod automata;
mod simulate;
mod state;

pub use automata::{Automata, AutomataConfig};
pub use state::{State, StateId, SymbolEdge, WildcardEdge};

use lumen_alphabet::{LabelId, LabelSet};
use thiserror::Error;

/// Errors that can occur while building an automaton
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NfaError {
    #[error("invalid state handle {state} (automaton has {states} states)")]
    InvalidState { state: StateId, states: usize },

    #[error("state limit exceeded: {limit}")]
    StateLimitExceeded { limit: usize },
}

/// Result type for automaton operations
pub type NfaResult<T> = Result<T, NfaError>;

/// Construction primitives for emitting automaton states and transitions
///
/// The expression compiler builds against this trait, so the automaton
/// representation stays swappable. State handles are only valid for the
/// builder instance that produced them.
pub trait AutomataBuilder {
    /// Payload attached to final states and yielded verbatim on match
    type Payload;

    /// Allocate a fresh, unconnected state
    fn new_state(&mut self) -> NfaResult<StateId>;

    /// Add an edge firing on an exact label match
    fn add_symbol_transition(&mut self, from: StateId, to: StateId, label: LabelId)
        -> NfaResult<()>;

    /// Add an edge firing on any label not in the exclusion set
    fn add_wildcard_transition(
        &mut self,
        from: StateId,
        to: StateId,
        exclusions: LabelSet,
    ) -> NfaResult<()>;

    /// Add an edge that fires without consuming an event
    fn add_epsilon_transition(&mut self, from: StateId, to: StateId) -> NfaResult<()>;

    /// Register a start state; an automaton hosting several rules has
    /// several initial states
    fn mark_initial(&mut self, state: StateId) -> NfaResult<()>;

    /// Register an accept state, tagging it with the rule payload
    fn mark_final(&mut self, state: StateId, payload: Self::Payload) -> NfaResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nfa_error_display() {
        let err = NfaError::StateLimitExceeded { limit: 16 };
        assert!(err.to_string().contains("16"));

        let err = NfaError::InvalidState { state: 7, states: 3 };
        assert!(err.to_string().contains("7"));
        assert!(err.to_string().contains("3"));
    }
}
