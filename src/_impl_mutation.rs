use crate::{Error, MutationState, Node, Rate};
use regex::Regex;
use std::str::FromStr;

/// The rate used to force a mutated node into its state. It is divided by the number of
/// mutable nodes so that it dominates every normal rate even when several forced
/// transitions are enabled at once.
pub const MUTANT_RATE: &str = "1E308/$nb_mutable";

/// Name (without `$`) of the external variable holding the number of mutable nodes.
pub(crate) const NB_MUTABLE: &str = "nb_mutable";

lazy_static! {
    /// Matches `rate_up` of a mutant node and captures the name of the node.
    static ref MUTANT_RATE_UP: Regex =
        Regex::new(r"^\$Low_(?P<name>[a-zA-Z0-9_]+)\s*\?\s*0\s*:").unwrap();
}

/// **(internal)** Name of the external variable that forces the node down.
pub(crate) fn low_variable(node: &str) -> String {
    format!("Low_{}", node)
}

/// **(internal)** Name of the external variable that forces the node up.
pub(crate) fn high_variable(node: &str) -> String {
    format!("High_{}", node)
}

impl Node {
    /// Create a copy of this node whose rates can be overridden by two external variables,
    /// `$Low_<name>` and `$High_<name>`:
    ///
    /// ```text
    /// rate_up = $Low_X ? 0 : ($High_X ? 1E308/$nb_mutable : (<rate_up>));
    /// rate_down = $High_X ? 0 : ($Low_X ? 1E308/$nb_mutable : (<rate_down>));
    /// ```
    ///
    /// With `(low, high) = (0, 1)` the node is always up, with `(1, 0)` always down, and
    /// with `(0, 0)` it behaves normally. A node which is already a mutant is returned
    /// unchanged.
    pub fn make_mutant(&self) -> Node {
        let mut mutant = self.clone();
        if self.is_mutant {
            return mutant;
        }
        let low = low_variable(&self.name);
        let high = high_variable(&self.name);
        mutant.rate_up = Rate::Expr(format!(
            "${low} ? 0 : (${high} ? {MUTANT_RATE} : ({}))",
            self.rate_up
        ));
        mutant.rate_down = Rate::Expr(format!(
            "${high} ? 0 : (${low} ? {MUTANT_RATE} : ({}))",
            self.rate_down
        ));
        mutant.is_mutant = true;
        mutant
    }

    /// **(internal)** True if the `rate_up` of this node has the shape produced
    /// by `make_mutant`.
    pub(crate) fn has_mutant_rates(&self) -> bool {
        match &self.rate_up {
            Rate::Expr(rate) => MUTANT_RATE_UP
                .captures(rate)
                .map(|it| it["name"] == self.name)
                .unwrap_or(false),
            Rate::Value(_) => false,
        }
    }
}

impl MutationState {
    /// Values of the `(low, high)` external variables that realize this state.
    pub fn switches(&self) -> (f64, f64) {
        match self {
            MutationState::On => (0.0, 1.0),
            MutationState::Off => (1.0, 0.0),
            MutationState::WildType => (0.0, 0.0),
        }
    }
}

impl FromStr for MutationState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "ON" => Ok(MutationState::On),
            "OFF" => Ok(MutationState::Off),
            "WT" => Ok(MutationState::WildType),
            other => Err(Error::InvalidMutation(other.to_string())),
        }
    }
}
