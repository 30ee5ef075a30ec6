//! Recursive automaton construction
//!
//! Each expression node emits its states and transitions into the shared
//! automaton and returns the entry/exit pair of the emitted subgraph.
//! Parents compose their children's pairs with epsilon transitions, so a
//! node's subgraph accepts exactly the node's language: were its start
//! made initial and its end made final, nothing else would be needed.

use lumen_nfa::{AutomataBuilder, StateId};
use tracing::{debug, trace};

use crate::ast::LpExp;
use crate::error::{LpeError, LpeResult};

/// Entry and exit states of a compiled subexpression
///
/// Plain handles into the automaton's state table; the automaton owns the
/// states, a pair is only a transient composition value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatePair {
    pub start: StateId,
    pub end: StateId,
}

impl LpExp {
    /// Emit automaton states for the tree rooted at this node
    ///
    /// Purely additive on the automaton: every call allocates fresh states,
    /// so compiling the same node twice yields two disjoint subgraphs.
    pub fn compile<A: AutomataBuilder>(&self, automata: &mut A) -> LpeResult<StatePair> {
        match self {
            LpExp::Symbol(label) => {
                let pair = fresh_pair(automata)?;
                automata.add_symbol_transition(pair.start, pair.end, *label)?;
                Ok(pair)
            }
            LpExp::Wildcard(exclusions) => {
                let pair = fresh_pair(automata)?;
                automata.add_wildcard_transition(pair.start, pair.end, exclusions.clone())?;
                Ok(pair)
            }
            LpExp::Concat(children) => compile_concat(children, automata),
            LpExp::Or(children) => compile_alternation(children, automata),
            LpExp::Repeat(child) => compile_repeat(child, automata),
            LpExp::RepeatRange { child, min, max } => {
                compile_repeat_range(child, *min, *max, automata)
            }
        }
    }
}

fn fresh_pair<A: AutomataBuilder>(automata: &mut A) -> LpeResult<StatePair> {
    let start = automata.new_state()?;
    let end = automata.new_state()?;
    Ok(StatePair { start, end })
}

/// Children in order, epsilon-spliced end to start
fn compile_concat<A: AutomataBuilder>(
    children: &[LpExp],
    automata: &mut A,
) -> LpeResult<StatePair> {
    // An empty concatenation matches the empty path: one zero-width state.
    let Some((first, rest)) = children.split_first() else {
        let state = automata.new_state()?;
        return Ok(StatePair {
            start: state,
            end: state,
        });
    };

    let mut pair = first.compile(automata)?;
    for child in rest {
        let next = child.compile(automata)?;
        automata.add_epsilon_transition(pair.end, next.start)?;
        pair.end = next.end;
    }
    Ok(pair)
}

/// Fresh entry/exit fanning out to every child and back in
fn compile_alternation<A: AutomataBuilder>(
    children: &[LpExp],
    automata: &mut A,
) -> LpeResult<StatePair> {
    if children.is_empty() {
        return Err(LpeError::EmptyAlternation);
    }

    let pair = fresh_pair(automata)?;
    for child in children {
        let inner = child.compile(automata)?;
        automata.add_epsilon_transition(pair.start, inner.start)?;
        automata.add_epsilon_transition(inner.end, pair.end)?;
    }
    Ok(pair)
}

/// Kleene closure of the child
fn compile_repeat<A: AutomataBuilder>(child: &LpExp, automata: &mut A) -> LpeResult<StatePair> {
    let inner = child.compile(automata)?;
    let pair = fresh_pair(automata)?;
    automata.add_epsilon_transition(pair.start, inner.start)?; // enter
    automata.add_epsilon_transition(inner.end, inner.start)?; // loop
    automata.add_epsilon_transition(inner.end, pair.end)?; // exit
    automata.add_epsilon_transition(pair.start, pair.end)?; // zero repetitions
    Ok(pair)
}

/// Bounded repetition, unrolled
///
/// The child is emitted `min` times as a mandatory spliced prefix, then
/// either a Kleene tail (unbounded max) or `max - min` optional copies.
/// Each optional copy's splice point carries an epsilon bypass straight to
/// the final end state, so a match may stop at any count in `[min, max]`
/// but never below `min` and never beyond `max`.
fn compile_repeat_range<A: AutomataBuilder>(
    child: &LpExp,
    min: u32,
    max: Option<u32>,
    automata: &mut A,
) -> LpeResult<StatePair> {
    if let Some(max) = max {
        if max < min {
            return Err(LpeError::InvalidBounds { min, max });
        }
    }
    trace!(min, ?max, "Expanding bounded repetition");

    let prefix = if min == 0 {
        let state = automata.new_state()?;
        StatePair {
            start: state,
            end: state,
        }
    } else {
        let mut pair = child.compile(automata)?;
        for _ in 1..min {
            let next = child.compile(automata)?;
            automata.add_epsilon_transition(pair.end, next.start)?;
            pair.end = next.end;
        }
        pair
    };

    match max {
        // {min,}: the mandatory prefix followed by a Kleene tail
        None => {
            let tail = compile_repeat(child, automata)?;
            automata.add_epsilon_transition(prefix.end, tail.start)?;
            Ok(StatePair {
                start: prefix.start,
                end: tail.end,
            })
        }
        Some(max) => {
            let optional = max - min;
            if optional == 0 {
                return Ok(prefix);
            }

            let end = automata.new_state()?;
            let mut cursor = prefix.end;
            for _ in 0..optional {
                automata.add_epsilon_transition(cursor, end)?;
                let copy = child.compile(automata)?;
                automata.add_epsilon_transition(cursor, copy.start)?;
                cursor = copy.end;
            }
            automata.add_epsilon_transition(cursor, end)?;
            Ok(StatePair {
                start: prefix.start,
                end,
            })
        }
    }
}

/// Toplevel rule: one expression tree bound to a caller payload
///
/// Not an expression node itself; it is always the root. Compiling marks
/// the tree's start state initial and its end state final, tagged with the
/// payload so a match identifies which rule fired. The payload is never
/// interpreted here.
#[derive(Debug, Clone)]
pub struct Rule<P> {
    root: LpExp,
    payload: P,
}

impl<P: Clone> Rule<P> {
    /// Bind an expression tree to a payload
    pub fn new(root: LpExp, payload: P) -> Self {
        Self { root, payload }
    }

    /// The bound expression tree
    pub fn root(&self) -> &LpExp {
        &self.root
    }

    /// The bound payload
    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// Compile this rule into the automaton
    ///
    /// Not idempotent by design: every call emits a fresh, independent set
    /// of states, so one parsed tree can be compiled into several automata.
    /// State handles are not stable across calls.
    pub fn compile<A: AutomataBuilder<Payload = P>>(&self, automata: &mut A) -> LpeResult<()> {
        let pair = self.root.compile(automata)?;
        automata.mark_initial(pair.start)?;
        automata.mark_final(pair.end, self.payload.clone())?;
        debug!(start = pair.start, end = pair.end, "Compiled rule");
        Ok(())
    }
}
