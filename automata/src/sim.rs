use crate::graph::{Automaton, StateId};
use crate::matching::Match;

use im::Vector;
use std::collections::HashSet;
use std::mem;

/// One in-flight match attempt: the state it currently occupies and the input
/// offset at which it began. Threads here are an algorithmic bookkeeping
/// device, not units of execution.
#[derive(Clone, Debug)]
struct Thread {
    state: StateId,
    /// The offset of the first symbol this attempt tried to match. Smaller
    /// ages outrank larger ones everywhere in the engine.
    age: usize,
    /// The symbols consumed so far, kept only when span recording is on.
    span: Option<Vector<char>>,
}

impl Thread {
    #[inline]
    fn seeded(state: StateId, age: usize, record_spans: bool) -> Self {
        Thread {
            state,
            age,
            span: if record_spans {
                Some(Vector::new())
            } else {
                None
            },
        }
    }

    /// Follow an epsilon transition: same age, same span, new state.
    #[inline]
    fn epsilon(&self, dest: StateId) -> Self {
        Thread {
            state: dest,
            age: self.age,
            span: self.span.clone(),
        }
    }

    /// Follow a consuming transition into `dest`.
    #[inline]
    fn consumed(&self, dest: StateId, symbol: char) -> Self {
        let span = self.span.clone().map(|mut span| {
            span.push_back(symbol);
            span
        });
        Thread {
            state: dest,
            age: self.age,
            span,
        }
    }
}

/// The best match seen so far. It stays extendable while any thread of its
/// age is alive; once they are all gone no later attempt may replace it.
#[derive(Clone, Debug)]
struct Candidate {
    start: usize,
    end: usize,
    span: Option<Vector<char>>,
}

/// A simulation of an [`Automaton`] over one input sequence.
///
/// The matcher advances every plausible attempt in lockstep, one generation
/// per input symbol, instead of trying attempts one at a time and
/// backtracking. Each generation seeds a new attempt at the current offset,
/// expands epsilon closures, collapses attempts that meet on a state
/// (smallest age wins), then consumes the symbol. Attempts that reach the
/// accept state report a candidate; the leftmost candidate is kept and grows
/// to the longest end offset its attempt can reach. The work per symbol is
/// bounded by the size of the automaton, so matching stays linear in the
/// input.
#[derive(Debug)]
pub struct Matcher<'a> {
    automaton: &'a Automaton,
    /// Symbols consumed so far; equivalently, the current input offset.
    generation: usize,
    threads: Vec<Thread>,
    best: Option<Candidate>,
    anchored: bool,
    record_spans: bool,
}

impl<'a> Matcher<'a> {
    /// Create a matcher that looks for a match beginning at any offset.
    #[inline]
    pub fn new(automaton: &'a Automaton) -> Self {
        Matcher {
            automaton,
            generation: 0,
            threads: Vec::new(),
            best: None,
            anchored: false,
            record_spans: false,
        }
    }

    /// Create a matcher that only considers matches beginning at offset 0.
    #[inline]
    pub fn new_anchored(automaton: &'a Automaton) -> Self {
        let mut matcher = Matcher::new(automaton);
        matcher.anchored = true;
        matcher
    }

    /// Record the symbols each attempt consumes, so the winning match carries
    /// its span. Off by default; it costs memory proportional to match
    /// length on every live thread.
    #[inline]
    pub fn with_spans(mut self) -> Self {
        self.record_spans = true;
        self
    }

    /// Feed one symbol and return the best match confirmed so far.
    pub fn step(&mut self, symbol: char) -> Option<Match> {
        self.open_generation();

        let automaton = self.automaton;
        let current = mem::take(&mut self.threads);
        let mut next = Vec::with_capacity(current.len());
        for thread in current {
            for transition in automaton.graph().transitions_from(thread.state) {
                if transition.label.matches(symbol) {
                    let advanced = thread.consumed(transition.dest, symbol);
                    if advanced.state == automaton.end() {
                        self.record(advanced.age, self.generation + 1, advanced.span.as_ref());
                    }
                    next.push(advanced);
                }
            }
        }

        self.threads = next;
        self.generation += 1;
        self.prune();

        self.best_match()
    }

    /// Declare the end of input. Attempts that can reach the accept state on
    /// epsilon transitions alone, including a fresh seed at the final
    /// offset, get to report before the verdict. Returns the final result.
    pub fn finish(&mut self) -> Option<Match> {
        self.open_generation();
        self.best_match()
    }

    /// Run a whole input sequence from a clean slate: reset, step per
    /// symbol, finish. Returns the leftmost-longest match, if any.
    pub fn match_all<I>(&mut self, input: I) -> Option<Match>
    where
        I: IntoIterator<Item = char>,
    {
        self.reset();
        for symbol in input {
            self.step(symbol);
            // Dead frontier plus a match in hand: later seeds are all too
            // young to compete, so the verdict is already in.
            if !self.is_active() && self.best.is_some() {
                break;
            }
        }
        self.finish()
    }

    /// The best match confirmed so far, if any.
    #[inline]
    pub fn best_match(&self) -> Option<Match> {
        self.best.as_ref().map(|best| match &best.span {
            Some(span) => Match::with_span(best.start, best.end, span.iter().copied().collect()),
            None => Match::new(best.start, best.end),
        })
    }

    /// Whether any attempt is still in flight.
    #[inline]
    pub fn is_active(&self) -> bool {
        !self.threads.is_empty()
    }

    /// The number of symbols consumed since the last reset.
    #[inline]
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Forget all attempts and any recorded match, ready for a fresh run.
    #[inline]
    pub fn reset(&mut self) {
        self.generation = 0;
        self.threads.clear();
        self.best = None;
    }

    /// Open the current generation: seed an attempt at the current offset,
    /// expand epsilon closures with one thread per state, and let attempts
    /// already on the accept state report.
    fn open_generation(&mut self) {
        let automaton = self.automaton;
        let generation = self.generation;

        if (!self.anchored || generation == 0) && self.admits(generation) {
            self.threads
                .push(Thread::seeded(automaton.start(), generation, self.record_spans));
        }

        // Oldest attempts expand first; the first thread to claim a state
        // keeps it. Ties on a state therefore resolve to the smallest age.
        self.threads.sort_by_key(|thread| thread.age);
        let seeds = mem::take(&mut self.threads);
        let mut closed: Vec<Thread> = Vec::with_capacity(seeds.len());
        let mut claimed: HashSet<StateId> = HashSet::with_capacity(seeds.len());
        let mut stack = Vec::new();
        for thread in seeds {
            if !claimed.insert(thread.state) {
                continue;
            }
            stack.push(thread);
            while let Some(current) = stack.pop() {
                for transition in automaton.graph().transitions_from(current.state) {
                    if transition.label.is_epsilon() && claimed.insert(transition.dest) {
                        stack.push(current.epsilon(transition.dest));
                    }
                }
                closed.push(current);
            }
        }

        // An attempt sitting on the accept state is a match ending at the
        // current offset. This is where empty matches surface.
        for thread in &closed {
            if thread.state == automaton.end() {
                self.record(thread.age, generation, thread.span.as_ref());
            }
        }

        self.threads = closed;
        self.prune();
    }

    /// Arbitrate a candidate against the best so far: a smaller age replaces
    /// it outright, the same age with a larger end extends it, anything else
    /// is ignored.
    fn record(&mut self, start: usize, end: usize, span: Option<&Vector<char>>) {
        let improves = match &self.best {
            None => true,
            Some(best) => start < best.start || (start == best.start && end > best.end),
        };
        if improves {
            self.best = Some(Candidate {
                start,
                end,
                span: span.cloned(),
            });
        }
    }

    /// Drop every attempt that starts later than the best match; none of
    /// them can produce a more leftmost result.
    #[inline]
    fn prune(&mut self) {
        if let Some(best) = &self.best {
            let cutoff = best.start;
            self.threads.retain(|thread| thread.age <= cutoff);
        }
    }

    /// Whether an attempt of the given age could still beat the best match.
    #[inline]
    fn admits(&self, age: usize) -> bool {
        match &self.best {
            Some(best) => age <= best.start,
            None => true,
        }
    }
}
