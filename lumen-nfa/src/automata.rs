// Automaton container and construction primitives
//
// The automaton owns every state and transition. Rules are compiled in
// through the AutomataBuilder implementation; the AST that drove the
// compilation holds no automaton resources and may be dropped afterwards.

use crate::state::{State, StateId, SymbolEdge, WildcardEdge};
use crate::{AutomataBuilder, NfaError, NfaResult};
use lumen_alphabet::{LabelId, LabelSet};
use tracing::debug;

/// Automaton construction limits
#[derive(Debug, Clone)]
pub struct AutomataConfig {
    /// Maximum number of states (0 = unlimited)
    pub max_states: usize,
}

impl Default for AutomataConfig {
    fn default() -> Self {
        Self { max_states: 65_536 }
    }
}

/// Nondeterministic automaton over light transport event labels
///
/// States are created lazily during rule compilation and addressed by dense
/// [`StateId`] handles. Several rules may be compiled into one automaton;
/// each contributes its own initial state and its own payload-tagged final
/// state.
#[derive(Debug, Clone)]
pub struct Automata<P> {
    config: AutomataConfig,
    pub(crate) states: Vec<State<P>>,
    pub(crate) initial: Vec<StateId>,
}

impl<P> Automata<P> {
    /// Create an automaton with the default configuration
    pub fn new() -> Self {
        Self::with_config(AutomataConfig::default())
    }

    /// Create an automaton with a custom configuration
    pub fn with_config(config: AutomataConfig) -> Self {
        Self {
            config,
            states: Vec::new(),
            initial: Vec::new(),
        }
    }

    /// Number of states
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Total number of transitions across all states
    pub fn transition_count(&self) -> usize {
        self.states.iter().map(State::transition_count).sum()
    }

    /// Whether the automaton has no states
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Registered initial states, in registration order
    pub fn initial_states(&self) -> &[StateId] {
        &self.initial
    }

    /// Get a state by handle
    pub fn state(&self, id: StateId) -> Option<&State<P>> {
        self.states.get(id as usize)
    }

    fn check(&self, state: StateId) -> NfaResult<()> {
        if (state as usize) < self.states.len() {
            Ok(())
        } else {
            Err(NfaError::InvalidState {
                state,
                states: self.states.len(),
            })
        }
    }

    fn check_edge(&self, from: StateId, to: StateId) -> NfaResult<()> {
        self.check(from)?;
        self.check(to)
    }
}

impl<P> Default for Automata<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> AutomataBuilder for Automata<P> {
    type Payload = P;

    fn new_state(&mut self) -> NfaResult<StateId> {
        if self.config.max_states > 0 && self.states.len() >= self.config.max_states {
            return Err(NfaError::StateLimitExceeded {
                limit: self.config.max_states,
            });
        }
        let id = self.states.len() as StateId;
        self.states.push(State::new());
        Ok(id)
    }

    fn add_symbol_transition(
        &mut self,
        from: StateId,
        to: StateId,
        label: LabelId,
    ) -> NfaResult<()> {
        self.check_edge(from, to)?;
        self.states[from as usize]
            .symbol_edges
            .push(SymbolEdge { label, to });
        Ok(())
    }

    fn add_wildcard_transition(
        &mut self,
        from: StateId,
        to: StateId,
        exclusions: LabelSet,
    ) -> NfaResult<()> {
        self.check_edge(from, to)?;
        self.states[from as usize]
            .wildcard_edges
            .push(WildcardEdge { exclusions, to });
        Ok(())
    }

    fn add_epsilon_transition(&mut self, from: StateId, to: StateId) -> NfaResult<()> {
        self.check_edge(from, to)?;
        self.states[from as usize].epsilon_edges.push(to);
        Ok(())
    }

    fn mark_initial(&mut self, state: StateId) -> NfaResult<()> {
        self.check(state)?;
        self.initial.push(state);
        debug!(state, "Marked initial state");
        Ok(())
    }

    fn mark_final(&mut self, state: StateId, payload: P) -> NfaResult<()> {
        self.check(state)?;
        self.states[state as usize].payload = Some(payload);
        debug!(state, "Marked final state");
        Ok(())
    }
}
