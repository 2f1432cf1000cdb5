//! A library for describing stochastic Boolean networks in the textual format of the
//! MaBoSS simulation engine.
//!
//! A network is described by two artifacts: a `.bnd` file with one block per `Node`
//! (logic expression and transition rates) and a `.cfg` file with simulation parameters,
//! initial state distributions and output flags. This crate provides a typed in-memory
//! model of both (`Network`, `Node`, `Simulation`), a parser that reads them, and
//! a serializer that writes them back. The simulation engine itself is not part of
//! this crate; it only consumes the generated text.
//!
//! See the [tutorial] module for a guided introduction.

#[macro_use]
extern crate lazy_static;

use fxhash::FxHashMap;
use regex::Regex;
use std::collections::BTreeMap;

pub mod tutorial;

/// **(internal)** Boolean expression grammar, evaluation and validation.
mod _impl_expression;
/// **(internal)** Implements `.bnd`/`.cfg` parser for `Simulation` objects.
mod _maboss_parser;
/// **(internal)** Utility methods for `BinaryOp`.
mod _impl_binary_op;
/// **(internal)** `Node` to `.bnd` block.
mod _impl_display_for_node;
/// **(internal)** `Network` to `.bnd` string and initial state declarations.
mod _impl_display_for_network;
/// **(internal)** `Simulation` to `.cfg` string.
mod _impl_display_for_simulation;
/// **(internal)** The public `Error` type.
mod _impl_error;
/// **(internal)** Initial state distributions of a `Network`.
mod _impl_initial_state;
/// **(internal)** Rewriting of node rates so that a mutation can be switched on externally.
mod _impl_mutation;
/// **(internal)** Utility methods for `Network`.
mod _impl_network;
/// **(internal)** Utility methods for `Node`.
mod _impl_node;
/// **(internal)** Utility methods for `Rate`.
mod _impl_rate;
/// **(internal)** Utility methods for `Simulation`.
mod _impl_simulation;
/// **(internal)** Engine and external parameters of a `Simulation`.
mod _impl_simulation_parameters;
/// **(internal)** Named collection of `Simulation` objects.
mod _impl_simulation_registry;
/// **(internal)** Soft diagnostics side channel.
mod _impl_warning;

pub use _impl_error::Error;
pub use _impl_expression::{validate_defined, validate_or_fail, validate_or_null, validate_syntax};
pub use _impl_mutation::MUTANT_RATE;
pub use _impl_simulation_parameters::ENGINE_PARAMETERS;
pub use _impl_warning::{take_warnings, Warning};

lazy_static! {
    /// A regular expression that matches valid node and variable identifiers.
    static ref ID_REGEX: Regex = Regex::new(r"^[a-zA-Z][a-zA-Z0-9_]*$").unwrap();
}

/// Words of the logic grammar which cannot be used as identifiers.
const RESERVED_NAMES: [&str; 7] = ["NOT", "AND", "OR", "XOR", "True", "False", "Node"];

/// **(internal)** Check that the given string is a valid identifier which does not collide
/// with a keyword of the logic grammar.
pub(crate) fn is_valid_name(name: &str) -> bool {
    ID_REGEX.is_match(name) && !RESERVED_NAMES.contains(&name)
}

/// Possible binary boolean operators that can appear in an `Expression`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum BinaryOp {
    And,
    Or,
    Xor,
}

/// A boolean formula over node names, as used in the `logic` attribute of a `Node`.
///
/// Expressions are parsed from strings using `Expression::try_from`. Operators can be written
/// as `!`/`NOT`, `&`/`&&`/`AND`, `|`/`||`/`OR` and `^`/`XOR`. Conjunction binds tighter than
/// disjunction, which in turn binds tighter than exclusive or. Negation applies to a single
/// term (a name, a literal `True`/`False` or a parenthesised sub-expression).
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Expression {
    Const(bool),
    Var(String),
    Not(Box<Expression>),
    Binary(BinaryOp, Box<Expression>, Box<Expression>),
}

/// A transition rate of a `Node`.
///
/// The rate is either a plain nonnegative number, or an arbitrary MaBoSS arithmetic
/// expression (possibly referencing `@logic` or `$`-prefixed external variables) which is
/// kept verbatim.
#[derive(Clone, Debug, PartialEq)]
pub enum Rate {
    Value(f64),
    Expr(String),
}

/// A single element of a stochastic Boolean `Network`.
///
/// When `logic` evaluates to true, the node switches from 0 to 1 with `rate_up` (and cannot
/// switch down). When `logic` is false, the node switches from 1 to 0 with `rate_down`.
///
/// Internal nodes are not reported in the simulation output. Mutant nodes have their rates
/// rewritten such that they can be forced on or off by external variables
/// (see `Node::make_mutant`).
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    name: String,
    logic: Option<String>,
    rate_up: Rate,
    rate_down: Rate,
    is_internal: bool,
    is_mutant: bool,
    internal_var: Vec<(String, String)>,
}

/// A probability distribution over the initial values of one node, or a joint distribution
/// over a group of bound nodes.
///
/// Each entry of the distribution assigns a probability to one vector of values (ordered
/// the same way as `nodes`). Value vectors which are not listed have probability zero.
#[derive(Clone, Debug, PartialEq)]
pub struct InitialState {
    nodes: Vec<String>,
    distribution: Vec<(Vec<bool>, f64)>,
}

/// An ordered collection of `Node`s together with their initial state distributions.
///
/// Every node always belongs to exactly one `InitialState` binding. Initially, every node
/// has its own uniform binding (`0.5` for both values).
#[derive(Clone, Debug, PartialEq)]
pub struct Network {
    nodes: Vec<Node>,
    node_to_index: FxHashMap<String, usize>,
    bindings: Vec<InitialState>,
}

/// Parameters of a MaBoSS simulation.
///
/// The recognized engine parameters are typed fields. Names starting with `$` are external
/// variables which can be referenced from node rates; these are stored without the `$` sigil.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationParameters {
    pub time_tick: f64,
    pub max_time: f64,
    pub sample_count: u64,
    pub discrete_time: bool,
    pub use_physrandgen: bool,
    pub seed_pseudorandom: u64,
    pub display_traj: bool,
    pub statdist_traj_count: u64,
    pub statdist_cluster_threshold: f64,
    pub thread_count: u64,
    pub statdist_similarity_cache_max_size: u64,
    external: BTreeMap<String, f64>,
}

/// The state a mutated node is forced into.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MutationState {
    /// The node is always up.
    On,
    /// The node is always down.
    Off,
    /// The node is mutable, but follows its normal logic.
    WildType,
}

/// A `Network` together with everything that is needed to write a complete `.cfg` file:
/// simulation parameters, the list of mutated nodes and the reference state.
#[derive(Clone, Debug, PartialEq)]
pub struct Simulation {
    network: Network,
    parameters: SimulationParameters,
    mutations: Vec<String>,
    refstate: Vec<(String, bool)>,
}

/// A named collection of `Simulation` objects owned by the hosting application.
#[derive(Clone, Debug, Default)]
pub struct SimulationRegistry {
    simulations: BTreeMap<String, Simulation>,
}
