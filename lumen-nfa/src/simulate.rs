// Nondeterministic simulation of event paths
//
// Classic epsilon-closure stepping: track the set of live states, advance
// it once per consumed event, and read off the payloads of the accept
// states that remain once the whole path is consumed.

use crate::automata::Automata;
use crate::state::StateId;
use ahash::AHashSet;
use lumen_alphabet::LabelId;

impl<P> Automata<P> {
    /// Whether the automaton accepts the given event path
    pub fn accepts(&self, path: &[LabelId]) -> bool {
        !self.matches(path).is_empty()
    }

    /// Payloads of every rule whose accept state is reached after consuming
    /// the entire path
    ///
    /// Results are ordered by accept-state id, so repeated runs over the
    /// same automaton are deterministic.
    pub fn matches(&self, path: &[LabelId]) -> Vec<&P> {
        let mut current: AHashSet<StateId> = self.initial.iter().copied().collect();
        self.epsilon_closure(&mut current);

        for &label in path {
            if current.is_empty() {
                break;
            }
            current = self.step(&current, label);
        }

        let mut hits: Vec<(StateId, &P)> = current
            .iter()
            .filter_map(|&id| self.states[id as usize].payload().map(|p| (id, p)))
            .collect();
        hits.sort_unstable_by_key(|(id, _)| *id);
        hits.into_iter().map(|(_, payload)| payload).collect()
    }

    /// Extend a state set with everything reachable over epsilon edges
    fn epsilon_closure(&self, set: &mut AHashSet<StateId>) {
        let mut pending: Vec<StateId> = set.iter().copied().collect();
        while let Some(id) = pending.pop() {
            for &next in self.states[id as usize].epsilon_edges() {
                if set.insert(next) {
                    pending.push(next);
                }
            }
        }
    }

    /// Advance the live set over one consumed event
    fn step(&self, current: &AHashSet<StateId>, label: LabelId) -> AHashSet<StateId> {
        let mut next = AHashSet::new();
        for &id in current {
            let state = &self.states[id as usize];
            for edge in state.symbol_edges() {
                if edge.label == label {
                    next.insert(edge.to);
                }
            }
            for edge in state.wildcard_edges() {
                if !edge.exclusions.contains(&label) {
                    next.insert(edge.to);
                }
            }
        }
        self.epsilon_closure(&mut next);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AutomataBuilder;
    use lumen_alphabet::LabelSet;

    const A: LabelId = 0;
    const B: LabelId = 1;
    const C: LabelId = 2;

    // start --a--> mid --b--> end(payload)
    fn chain() -> Automata<&'static str> {
        let mut automata = Automata::new();
        let start = automata.new_state().unwrap();
        let mid = automata.new_state().unwrap();
        let end = automata.new_state().unwrap();
        automata.add_symbol_transition(start, mid, A).unwrap();
        automata.add_symbol_transition(mid, end, B).unwrap();
        automata.mark_initial(start).unwrap();
        automata.mark_final(end, "ab").unwrap();
        automata
    }

    #[test]
    fn test_symbol_chain() {
        let automata = chain();
        assert!(automata.accepts(&[A, B]));
        assert!(!automata.accepts(&[A]));
        assert!(!automata.accepts(&[B, A]));
        assert!(!automata.accepts(&[A, B, B]));
        assert!(!automata.accepts(&[]));
    }

    #[test]
    fn test_match_payload() {
        let automata = chain();
        assert_eq!(automata.matches(&[A, B]), vec![&"ab"]);
        assert!(automata.matches(&[A, C]).is_empty());
    }

    #[test]
    fn test_wildcard_exclusions() {
        let mut automata: Automata<u32> = Automata::new();
        let start = automata.new_state().unwrap();
        let end = automata.new_state().unwrap();
        let exclusions: LabelSet = [B, C].into_iter().collect();
        automata
            .add_wildcard_transition(start, end, exclusions)
            .unwrap();
        automata.mark_initial(start).unwrap();
        automata.mark_final(end, 1).unwrap();

        assert!(automata.accepts(&[A]));
        assert!(!automata.accepts(&[B]));
        assert!(!automata.accepts(&[C]));
        assert!(!automata.accepts(&[A, A]));
    }

    #[test]
    fn test_epsilon_closure_through_chain() {
        let mut automata: Automata<u32> = Automata::new();
        let s0 = automata.new_state().unwrap();
        let s1 = automata.new_state().unwrap();
        let s2 = automata.new_state().unwrap();
        automata.add_epsilon_transition(s0, s1).unwrap();
        automata.add_epsilon_transition(s1, s2).unwrap();
        automata.mark_initial(s0).unwrap();
        automata.mark_final(s2, 7).unwrap();

        // reachable over epsilon alone, no events consumed
        assert!(automata.accepts(&[]));
    }

    #[test]
    fn test_epsilon_self_loop_terminates() {
        let mut automata: Automata<u32> = Automata::new();
        let s = automata.new_state().unwrap();
        automata.add_epsilon_transition(s, s).unwrap();
        automata.mark_initial(s).unwrap();
        automata.mark_final(s, 1).unwrap();

        assert!(automata.accepts(&[]));
        assert!(!automata.accepts(&[A]));
    }

    #[test]
    fn test_multiple_initial_states() {
        let mut automata: Automata<&'static str> = Automata::new();

        let s1 = automata.new_state().unwrap();
        let e1 = automata.new_state().unwrap();
        automata.add_symbol_transition(s1, e1, A).unwrap();
        automata.mark_initial(s1).unwrap();
        automata.mark_final(e1, "first").unwrap();

        let s2 = automata.new_state().unwrap();
        let e2 = automata.new_state().unwrap();
        automata.add_symbol_transition(s2, e2, A).unwrap();
        automata.mark_initial(s2).unwrap();
        automata.mark_final(e2, "second").unwrap();

        let matched = automata.matches(&[A]);
        assert_eq!(matched, vec![&"first", &"second"]);
    }

    #[test]
    fn test_empty_automaton_rejects() {
        let automata: Automata<u32> = Automata::new();
        assert!(!automata.accepts(&[]));
        assert!(!automata.accepts(&[A]));
    }

    #[test]
    fn test_dead_wildcard_never_fires() {
        let mut automata: Automata<u32> = Automata::new();
        let start = automata.new_state().unwrap();
        let end = automata.new_state().unwrap();
        // excluding every label in play makes the edge unfireable, not an error
        let exclusions: LabelSet = [A, B, C].into_iter().collect();
        automata
            .add_wildcard_transition(start, end, exclusions)
            .unwrap();
        automata.mark_initial(start).unwrap();
        automata.mark_final(end, 1).unwrap();

        assert!(!automata.accepts(&[A]));
        assert!(!automata.accepts(&[B]));
        assert!(!automata.accepts(&[C]));
    }
}
