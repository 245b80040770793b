use crate::thompson::Fragment;

use std::collections::HashSet;

/// The identifier of a state in a graph. Ids are dense: a graph with n
/// states has exactly the ids 0..n.
pub type StateId = usize;

/// A growable arena of states and labeled transitions, from which automatons
/// are assembled. States are only ever added, never removed, so ids handed
/// out by [`create_state`](StateGraph::create_state) stay valid for the life
/// of the graph.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StateGraph {
    states: Vec<State>,
}

/// A single state: its outgoing transitions, in insertion order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct State {
    transitions: Vec<Transition>,
}

/// A transition between two states in a graph.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Transition {
    /// The input, if any, on which the transition is taken.
    pub label: Label,
    /// The destination state.
    pub dest: StateId,
}

/// The input class a transition is taken on.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Label {
    /// An epsilon transition changes state spontaneously, without consuming
    /// an input symbol.
    Epsilon,
    /// A transition on one exact input symbol.
    Literal(char),
    /// A transition on every input symbol.
    AnyChar,
}

impl Label {
    /// Determine if a consuming transition with this label is taken on the
    /// given symbol. Epsilon transitions never consume, so they never match.
    #[inline]
    pub fn matches(&self, symbol: char) -> bool {
        match self {
            Label::Epsilon => false,
            Label::Literal(c) => *c == symbol,
            Label::AnyChar => true,
        }
    }

    /// Determine if this is an epsilon label.
    #[inline]
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Label::Epsilon)
    }
}

impl StateGraph {
    /// Create a new graph with no states.
    #[allow(clippy::new_without_default)]
    #[inline]
    pub fn new() -> Self {
        StateGraph { states: Vec::new() }
    }

    /// Add a state with no transitions. The id of the state is returned; ids
    /// are assigned in increasing order starting from 0 and are never reused.
    #[inline]
    pub fn create_state(&mut self) -> StateId {
        let id = self.states.len();
        self.states.push(State::default());
        id
    }

    /// Add a transition. Returns None if one or more of the states does not
    /// exist. There is no limit on the out-degree of a state.
    #[inline]
    pub fn add_transition(&mut self, start: StateId, end: StateId, label: Label) -> Option<()> {
        if start >= self.states.len() || end >= self.states.len() {
            None
        } else {
            self.states[start].transitions.push(Transition { label, dest: end });
            Some(())
        }
    }

    // Add an epsilon transition. See [add_transition].
    #[inline]
    pub fn add_epsilon_transition(&mut self, start: StateId, end: StateId) -> Option<()> {
        self.add_transition(start, end, Label::Epsilon)
    }

    /// Returns the outgoing transitions of a state, in the order they were
    /// added. An unknown state has no transitions.
    #[inline]
    pub fn transitions_from(&self, state: StateId) -> &[Transition] {
        match self.states.get(state) {
            Some(s) => &s.transitions,
            None => &[],
        }
    }

    /// The number of states in the graph.
    #[inline]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Computes the epsilon-closure of a state: the set of all states
    /// reachable from it on zero or more epsilon transitions, the state
    /// itself included. Epsilon cycles, which repetition constructs
    /// introduce, terminate against the visited set.
    #[inline]
    pub fn epsilon_closure(&self, state: StateId) -> HashSet<StateId> {
        let mut closure = HashSet::new();
        closure.insert(state);

        let mut stack = vec![state];
        while let Some(s) = stack.pop() {
            for transition in self.transitions_from(s) {
                if transition.label.is_epsilon() && closure.insert(transition.dest) {
                    stack.push(transition.dest);
                }
            }
        }

        closure
    }

    /// Computes the union of epsilon-closures for each state in the given
    /// set of states.
    #[inline]
    pub fn epsilon_closure_set(&self, state_set: &HashSet<StateId>) -> HashSet<StateId> {
        let mut set = HashSet::new();
        for state in state_set.iter() {
            set.extend(self.epsilon_closure(*state));
        }
        set
    }
}

/// A sealed automaton: a graph with a designated start and accept state.
/// Built once, by composing fragments in a [`StateGraph`], and never mutated
/// afterwards; any number of matchers may share one automaton read-only.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Automaton {
    graph: StateGraph,
    start: StateId,
    end: StateId,
}

impl Automaton {
    /// Seal a graph into an automaton accepting at the fragment's end state.
    #[inline]
    pub fn new(graph: StateGraph, fragment: Fragment) -> Self {
        Automaton {
            graph,
            start: fragment.start,
            end: fragment.end,
        }
    }

    /// The start state.
    #[inline]
    pub fn start(&self) -> StateId {
        self.start
    }

    /// The accept state.
    #[inline]
    pub fn end(&self) -> StateId {
        self.end
    }

    /// The underlying state graph.
    #[inline]
    pub fn graph(&self) -> &StateGraph {
        &self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_state() {
        let mut graph = StateGraph::new();
        assert_eq!(graph.create_state(), 0);
        assert_eq!(graph.create_state(), 1);
        assert_eq!(graph.create_state(), 2);
        assert_eq!(graph.len(), 3);
    }

    #[test]
    fn test_add_transition() {
        let mut graph = StateGraph::new();
        let s0 = graph.create_state();
        let s1 = graph.create_state();

        assert_eq!(graph.add_transition(s0, s1, Label::Literal('a')), Some(()));
        assert_eq!(graph.add_transition(s0, 7, Label::Epsilon), None);
        assert_eq!(graph.add_transition(9, s1, Label::Epsilon), None);

        let transitions = graph.transitions_from(s0);
        assert_eq!(transitions.len(), 1);
        assert_eq!(transitions[0].dest, s1);
        assert_eq!(transitions[0].label, Label::Literal('a'));
    }

    #[test]
    fn test_label_matches() {
        assert!(Label::Literal('a').matches('a'));
        assert!(!Label::Literal('a').matches('b'));
        assert!(Label::AnyChar.matches('a'));
        assert!(Label::AnyChar.matches(' '));
        assert!(!Label::Epsilon.matches('a'));
    }

    #[test]
    fn test_epsilon_closure() {
        let mut graph = StateGraph::new();
        let s0 = graph.create_state();
        let s1 = graph.create_state();
        let s2 = graph.create_state();
        let s3 = graph.create_state();

        graph.add_epsilon_transition(s0, s1);
        graph.add_epsilon_transition(s1, s2);
        graph.add_transition(s2, s3, Label::Literal('a'));

        let closure = graph.epsilon_closure(s0);
        assert_eq!(closure, [s0, s1, s2].iter().cloned().collect());

        let closure = graph.epsilon_closure(s3);
        assert_eq!(closure, [s3].iter().cloned().collect());
    }

    #[test]
    fn test_epsilon_closure_cycle() {
        let mut graph = StateGraph::new();
        let s0 = graph.create_state();
        let s1 = graph.create_state();

        graph.add_epsilon_transition(s0, s1);
        graph.add_epsilon_transition(s1, s0);

        let closure = graph.epsilon_closure(s0);
        assert_eq!(closure, [s0, s1].iter().cloned().collect());
    }

    #[test]
    fn test_epsilon_closure_set() {
        let mut graph = StateGraph::new();
        let s0 = graph.create_state();
        let s1 = graph.create_state();
        let s2 = graph.create_state();

        graph.add_epsilon_transition(s0, s1);

        let seeds = [s0, s2].iter().cloned().collect();
        let closure = graph.epsilon_closure_set(&seeds);
        assert_eq!(closure, [s0, s1, s2].iter().cloned().collect());
    }
}
