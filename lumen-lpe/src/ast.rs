//! Light path expression AST
//!
//! Expressions are arranged as a tree of owned nodes built by the textual
//! front-end. Each node compiles itself into the automaton (see
//! [`crate::compile`]) and supports deep copy via `Clone`, which the
//! front-end uses to desugar derived operators without extra node kinds:
//! `a+` becomes `a` followed by a repeat of a copy of `a`.

use lumen_alphabet::{LabelId, LabelSet};
use serde::{Deserialize, Serialize};

use crate::error::{LpeError, LpeResult};

/// Expression node kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExprKind {
    /// Exact-label leaf
    Symbol,
    /// Any-label-except leaf
    Wildcard,
    /// Ordered concatenation
    Concat,
    /// Alternation
    Or,
    /// Zero-or-more repetition
    Repeat,
    /// Bounded repetition
    RepeatRange,
}

/// A light path expression node
///
/// Children are exclusively owned; dropping a node drops its whole subtree.
/// Cloning produces a fully independent copy sharing nothing with the
/// original.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LpExp {
    /// Match exactly one event carrying this label
    Symbol(LabelId),

    /// Match exactly one event whose label is not in the exclusion set
    Wildcard(LabelSet),

    /// Match the children in order; empty matches the empty path
    Concat(Vec<LpExp>),

    /// Match any one of the children; at least one is required
    Or(Vec<LpExp>),

    /// Match zero or more repetitions of the child
    Repeat(Box<LpExp>),

    /// Match between `min` and `max` repetitions of the child
    /// (`max` of `None` means unbounded)
    RepeatRange {
        child: Box<LpExp>,
        min: u32,
        max: Option<u32>,
    },
}

impl LpExp {
    /// Leaf matching one event with the given label
    pub fn symbol(label: LabelId) -> Self {
        LpExp::Symbol(label)
    }

    /// Leaf matching one event with any label outside `exclusions`
    pub fn wildcard(exclusions: LabelSet) -> Self {
        LpExp::Wildcard(exclusions)
    }

    /// Leaf matching one event with any label at all
    pub fn any() -> Self {
        LpExp::Wildcard(LabelSet::default())
    }

    /// Ordered concatenation of `children`
    pub fn concat(children: Vec<LpExp>) -> Self {
        LpExp::Concat(children)
    }

    /// Alternation over `children`
    ///
    /// Fails fast on an empty child list; an alternation over nothing has
    /// no meaningful automaton.
    pub fn alternation(children: Vec<LpExp>) -> LpeResult<Self> {
        if children.is_empty() {
            return Err(LpeError::EmptyAlternation);
        }
        Ok(LpExp::Or(children))
    }

    /// Zero-or-more repetitions of `child`
    pub fn repeat(child: LpExp) -> Self {
        LpExp::Repeat(Box::new(child))
    }

    /// Between `min` and `max` repetitions of `child`
    ///
    /// `max` of `None` means unbounded. Fails fast when a bounded `max` is
    /// below `min`.
    pub fn repeat_range(child: LpExp, min: u32, max: Option<u32>) -> LpeResult<Self> {
        if let Some(max) = max {
            if max < min {
                return Err(LpeError::InvalidBounds { min, max });
            }
        }
        Ok(LpExp::RepeatRange {
            child: Box::new(child),
            min,
            max,
        })
    }

    /// One-or-more repetitions, desugared as the child followed by a
    /// repeat of its copy
    pub fn one_or_more(child: LpExp) -> Self {
        let tail = LpExp::repeat(child.clone());
        LpExp::concat(vec![child, tail])
    }

    /// Zero-or-one occurrence of `child`
    pub fn optional(child: LpExp) -> Self {
        LpExp::RepeatRange {
            child: Box::new(child),
            min: 0,
            max: Some(1),
        }
    }

    /// The kind tag of this node
    pub fn kind(&self) -> ExprKind {
        match self {
            LpExp::Symbol(_) => ExprKind::Symbol,
            LpExp::Wildcard(_) => ExprKind::Wildcard,
            LpExp::Concat(_) => ExprKind::Concat,
            LpExp::Or(_) => ExprKind::Or,
            LpExp::Repeat(_) => ExprKind::Repeat,
            LpExp::RepeatRange { .. } => ExprKind::RepeatRange,
        }
    }
}
