#![deny(rust_2018_idioms)]
#![deny(future_incompatible)]

mod matching;

pub mod graph;
pub mod sim;
pub mod thompson;

pub use graph::{Automaton, Label, StateGraph, StateId, Transition};
pub use matching::Match;
pub use sim::Matcher;
pub use thompson::Fragment;
