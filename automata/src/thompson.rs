use crate::graph::{Label, StateGraph, StateId};

/// A partially built automaton: a start and end state pair into a shared
/// [`StateGraph`]. Fragments are composed by the operator constructors below;
/// the end state of a finished fragment has no outgoing transitions until a
/// later composition extends it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Fragment {
    /// The entry state of the fragment.
    pub start: StateId,
    /// The exit state of the fragment.
    pub end: StateId,
}

impl Fragment {
    #[inline]
    pub const fn new(start: StateId, end: StateId) -> Self {
        Fragment { start, end }
    }
}

impl StateGraph {
    /// Construct a fragment of two new states joined by a single transition
    /// on the given label.
    #[inline]
    pub fn literal(&mut self, label: Label) -> Fragment {
        let start = self.create_state();
        let end = self.create_state();
        self.add_transition(start, end, label);

        Fragment::new(start, end)
    }

    /// Construct a fragment for the concatenation of two fragments. Every
    /// outgoing transition of the second fragment's start state is copied
    /// onto the first fragment's end state; the second start state is left
    /// behind, unreachable and never referenced again. The cost is the
    /// out-degree of the absorbed state.
    #[inline]
    pub fn concat(&mut self, a: Fragment, b: Fragment) -> Fragment {
        let moved = self.transitions_from(b.start).to_vec();
        for transition in moved {
            self.add_transition(a.end, transition.dest, transition.label);
        }

        Fragment::new(a.start, b.end)
    }

    /// Construct a fragment for the union operator of two fragments. A new
    /// start state has epsilon transitions to the start of each operand, and
    /// the end of each operand gains an epsilon transition to a new end
    /// state.
    #[inline]
    pub fn union(&mut self, a: Fragment, b: Fragment) -> Fragment {
        let start = self.create_state();
        let end = self.create_state();

        self.add_epsilon_transition(start, a.start);
        self.add_epsilon_transition(start, b.start);
        self.add_epsilon_transition(a.end, end);
        self.add_epsilon_transition(b.end, end);

        Fragment::new(start, end)
    }

    /// Construct a fragment for the kleene star operator. A new start state
    /// may enter the operand or skip straight to a new end state for zero
    /// repetitions; the operand's end may exit to the new end state or loop
    /// back to the operand's start to repeat.
    #[inline]
    pub fn star(&mut self, a: Fragment) -> Fragment {
        let start = self.create_state();
        let end = self.create_state();

        self.add_epsilon_transition(start, a.start);
        self.add_epsilon_transition(start, end);
        self.add_epsilon_transition(a.end, end);
        self.add_epsilon_transition(a.end, a.start);

        Fragment::new(start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal() {
        let mut graph = StateGraph::new();
        let frag = graph.literal(Label::Literal('a'));

        assert_eq!(graph.len(), 2);
        assert_eq!(frag, Fragment::new(0, 1));

        let transitions = graph.transitions_from(frag.start);
        assert_eq!(transitions.len(), 1);
        assert_eq!(transitions[0].label, Label::Literal('a'));
        assert_eq!(transitions[0].dest, frag.end);
        assert!(graph.transitions_from(frag.end).is_empty());
    }

    #[test]
    fn test_concat_absorbs_start() {
        let mut graph = StateGraph::new();
        let a = graph.literal(Label::Literal('a'));
        let b = graph.literal(Label::Literal('b'));
        let frag = graph.concat(a, b);

        assert_eq!(frag, Fragment::new(a.start, b.end));

        // a's end takes over the transition that left b's start.
        let transitions = graph.transitions_from(a.end);
        assert_eq!(transitions.len(), 1);
        assert_eq!(transitions[0].label, Label::Literal('b'));
        assert_eq!(transitions[0].dest, b.end);
    }

    #[test]
    fn test_union_wiring() {
        let mut graph = StateGraph::new();
        let a = graph.literal(Label::Literal('a'));
        let b = graph.literal(Label::Literal('b'));
        let frag = graph.union(a, b);

        assert_eq!(graph.len(), 6);

        let entries: Vec<_> = graph
            .transitions_from(frag.start)
            .iter()
            .map(|t| t.dest)
            .collect();
        assert_eq!(entries, vec![a.start, b.start]);

        assert_eq!(graph.transitions_from(a.end)[0].dest, frag.end);
        assert_eq!(graph.transitions_from(b.end)[0].dest, frag.end);
        assert!(graph.transitions_from(frag.end).is_empty());
    }

    #[test]
    fn test_star_wiring() {
        let mut graph = StateGraph::new();
        let a = graph.literal(Label::Literal('a'));
        let frag = graph.star(a);

        assert_eq!(graph.len(), 4);

        let entries: Vec<_> = graph
            .transitions_from(frag.start)
            .iter()
            .map(|t| t.dest)
            .collect();
        assert_eq!(entries, vec![a.start, frag.end]);

        let exits: Vec<_> = graph
            .transitions_from(a.end)
            .iter()
            .map(|t| t.dest)
            .collect();
        assert_eq!(exits, vec![frag.end, a.start]);
    }

    #[test]
    fn test_fragments_share_one_arena() {
        let mut graph = StateGraph::new();
        let a = graph.literal(Label::Literal('a'));
        let b = graph.literal(Label::AnyChar);
        let c = graph.literal(Label::Literal('c'));

        let ids = [a.start, a.end, b.start, b.end, c.start, c.end];
        assert_eq!(ids, [0, 1, 2, 3, 4, 5]);
    }
}
