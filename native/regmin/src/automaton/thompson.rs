//! Thompson construction of epsilon-NFAs from postfix token streams.
//!
//! Fragments are built in an arena owned by [`ThompsonBuilder`]; every
//! transition is an arena index, so the cycles introduced by `*` and `+` need
//! no shared ownership. Once the final fragment is known, [`ThompsonBuilder::finish`]
//! numbers the states reachable from its entry and freezes them into an
//! [`EpsilonNfa`].

use crate::automaton::epsilon_nfa::{EpsilonNfa, NfaState};
use crate::automaton::postfix::{Postfix, Token};
use crate::automaton::state::StateId;
use crate::automaton::symbol::{EPSILON, Symbol};
use crate::error::{RegexError, Result};
use log::debug;

/// A partially built automaton: an entry and an exit state in the arena.
///
/// When returned from a combinator, the exit is the only accepting state
/// reachable from the entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment {
    pub entry: StateId,
    pub exit: StateId,
}

/// Arena of NFA states plus the fragment combinators.
#[derive(Debug, Default)]
pub struct ThompsonBuilder {
    states: Vec<NfaState>,
}

impl ThompsonBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of states allocated so far.
    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    fn add_state(&mut self, accepting: bool) -> StateId {
        let id = self.states.len() as StateId;
        self.states.push(NfaState::new(accepting));
        id
    }

    fn add_transition(&mut self, source: StateId, symbol: Symbol, destination: StateId) {
        self.states[source as usize].push_transition(symbol, destination);
    }

    fn add_epsilon_transition(&mut self, source: StateId, destination: StateId) {
        self.add_transition(source, EPSILON, destination);
    }

    fn retire(&mut self, fragment: Fragment) {
        self.states[fragment.exit as usize].set_accepting(false);
    }

    /// `entry --symbol--> exit`.
    pub fn literal(&mut self, symbol: Symbol) -> Fragment {
        let entry = self.add_state(false);
        let exit = self.add_state(true);
        self.add_transition(entry, symbol, exit);
        Fragment { entry, exit }
    }

    /// A fragment matching only the empty string.
    pub fn epsilon(&mut self) -> Fragment {
        self.literal(EPSILON)
    }

    /// `first` followed by `second`.
    pub fn concat(&mut self, first: Fragment, second: Fragment) -> Fragment {
        self.retire(first);
        self.add_epsilon_transition(first.exit, second.entry);
        Fragment {
            entry: first.entry,
            exit: second.exit,
        }
    }

    /// Either `first` or `second`. Adds a fresh entry and exit.
    pub fn union(&mut self, first: Fragment, second: Fragment) -> Fragment {
        let entry = self.add_state(false);
        let exit = self.add_state(true);

        self.retire(first);
        self.retire(second);

        self.add_epsilon_transition(entry, first.entry);
        self.add_epsilon_transition(entry, second.entry);
        self.add_epsilon_transition(first.exit, exit);
        self.add_epsilon_transition(second.exit, exit);

        Fragment { entry, exit }
    }

    /// Zero or more repetitions of `inner`. Adds a fresh entry and exit.
    pub fn star(&mut self, inner: Fragment) -> Fragment {
        let entry = self.add_state(false);
        let exit = self.add_state(true);

        self.retire(inner);

        self.add_epsilon_transition(entry, exit);
        self.add_epsilon_transition(entry, inner.entry);
        self.add_epsilon_transition(inner.exit, inner.entry);
        self.add_epsilon_transition(inner.exit, exit);

        Fragment { entry, exit }
    }

    /// One or more repetitions: one pass through `inner`, then the star
    /// construction over the same states.
    pub fn plus(&mut self, inner: Fragment) -> Fragment {
        let repeated = self.star(inner);
        self.concat(inner, repeated)
    }

    /// Zero or one occurrence of `inner`.
    pub fn optional(&mut self, inner: Fragment) -> Fragment {
        let empty = self.epsilon();
        self.union(inner, empty)
    }

    /// Left fold of [`concat`](Self::concat). `None` for an empty input.
    pub fn concat_all<I>(&mut self, fragments: I) -> Option<Fragment>
    where
        I: IntoIterator<Item = Fragment>,
    {
        let mut fragments = fragments.into_iter();
        let first = fragments.next()?;
        Some(fragments.fold(first, |acc, next| self.concat(acc, next)))
    }

    /// Left fold of [`union`](Self::union). `None` for an empty input.
    pub fn union_all<I>(&mut self, fragments: I) -> Option<Fragment>
    where
        I: IntoIterator<Item = Fragment>,
    {
        let mut fragments = fragments.into_iter();
        let first = fragments.next()?;
        Some(fragments.fold(first, |acc, next| self.union(acc, next)))
    }

    /// Evaluate a postfix stream, leaving exactly one fragment.
    pub fn build(&mut self, postfix: &Postfix) -> Result<Fragment> {
        if postfix.is_empty() {
            return Err(RegexError::MalformedExpression(
                "empty expression".to_string(),
            ));
        }

        let mut operands: Vec<Fragment> = Vec::new();
        for &token in postfix {
            if operands.len() < token.arity() {
                return Err(RegexError::MalformedExpression(format!(
                    "operator '{token}' expects {} operand(s), found {}",
                    token.arity(),
                    operands.len()
                )));
            }

            let fragment = match token {
                Token::Literal(symbol) => self.literal(symbol),
                Token::Star => self.unary(&mut operands, Self::star)?,
                Token::Plus => self.unary(&mut operands, Self::plus)?,
                Token::Optional => self.unary(&mut operands, Self::optional)?,
                Token::Concat => self.binary(&mut operands, Self::concat)?,
                Token::Union => self.binary(&mut operands, Self::union)?,
            };
            operands.push(fragment);
        }

        match operands.as_slice() {
            [fragment] => Ok(*fragment),
            leftover => Err(RegexError::MalformedExpression(format!(
                "{} operands left without an operator",
                leftover.len()
            ))),
        }
    }

    fn unary(
        &mut self,
        operands: &mut Vec<Fragment>,
        combine: fn(&mut Self, Fragment) -> Fragment,
    ) -> Result<Fragment> {
        let inner = pop_operand(operands)?;
        Ok(combine(self, inner))
    }

    fn binary(
        &mut self,
        operands: &mut Vec<Fragment>,
        combine: fn(&mut Self, Fragment, Fragment) -> Fragment,
    ) -> Result<Fragment> {
        let second = pop_operand(operands)?;
        let first = pop_operand(operands)?;
        Ok(combine(self, first, second))
    }

    /// Number the states reachable from `fragment.entry` in depth-first
    /// preorder, following transitions in insertion order, and freeze them.
    /// The entry becomes state 0.
    pub fn finish(self, fragment: Fragment) -> EpsilonNfa {
        let mut numbering: Vec<Option<StateId>> = vec![None; self.states.len()];
        let mut order: Vec<StateId> = Vec::with_capacity(self.states.len());
        let mut stack = vec![fragment.entry];

        while let Some(state) = stack.pop() {
            let slot = &mut numbering[state as usize];
            if slot.is_some() {
                continue;
            }
            *slot = Some(order.len() as StateId);
            order.push(state);

            // Reversed so the first neighbor is visited first.
            let neighbors: Vec<StateId> = self.states[state as usize].neighbors().collect();
            stack.extend(neighbors.into_iter().rev());
        }

        let renumber = |old: StateId| numbering[old as usize].unwrap_or(old);
        let states: Vec<NfaState> = order
            .iter()
            .map(|&old| self.states[old as usize].renumbered(renumber))
            .collect();
        let accept = renumber(fragment.exit);

        debug!(
            "built NFA with {} states ({} allocated)",
            states.len(),
            self.states.len()
        );
        EpsilonNfa::from_states(states, 0, accept)
    }
}

fn pop_operand(operands: &mut Vec<Fragment>) -> Result<Fragment> {
    operands
        .pop()
        .ok_or_else(|| RegexError::MalformedExpression("missing operand".to_string()))
}

/// Build the NFA for a postfix stream.
pub fn build_nfa(postfix: &Postfix) -> Result<EpsilonNfa> {
    let mut builder = ThompsonBuilder::new();
    let fragment = builder.build(postfix)?;
    Ok(builder.finish(fragment))
}
