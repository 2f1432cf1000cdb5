use crate::_impl_expression::validate_or_null;
use crate::{is_valid_name, Error, Expression, Node, Rate};
use std::convert::TryFrom;

/// Attribute names with a fixed meaning inside a `.bnd` node block.
pub(crate) const RESERVED_ATTRIBUTES: [&str; 3] = ["logic", "rate_up", "rate_down"];

/// Methods for safely constructing new instances of `Node`s.
impl Node {
    /// Create a new `Node` without logic, with unit rates, not internal and not mutant.
    ///
    /// The name must start with a letter, continue with letters, digits or `_`, and must not
    /// be one of the keywords of the logic grammar.
    pub fn new(name: &str) -> Result<Node, Error> {
        if !is_valid_name(name) {
            return Err(Error::InvalidName(name.to_string()));
        }
        Ok(Node {
            name: name.to_string(),
            logic: None,
            rate_up: Rate::Value(1.0),
            rate_down: Rate::Value(1.0),
            is_internal: false,
            is_mutant: false,
            internal_var: Vec::new(),
        })
    }

    /// Create a new `Node` with the given logic and rates.
    ///
    /// Construction is lenient with respect to the logic: an invalid expression is replaced
    /// by no logic and reported as `Warning::InvalidLogic`. Such a node is refused later
    /// when it is inserted into a `Network`. Invalid names and negative rates are errors.
    pub fn with_logic<U: Into<Rate>, D: Into<Rate>>(
        name: &str,
        logic: &str,
        rate_up: U,
        rate_down: D,
    ) -> Result<Node, Error> {
        let mut node = Node::new(name)?;
        node.set_logic(Some(logic));
        node.set_rates(rate_up, rate_down)?;
        Ok(node)
    }

    /// Replace the logic of this node. An invalid expression results in no logic
    /// (and `Warning::InvalidLogic`).
    pub fn set_logic(&mut self, logic: Option<&str>) {
        self.logic = logic.and_then(|it| validate_or_null(&self.name, it));
    }

    /// Set the two rates verbatim.
    pub fn set_rates<U: Into<Rate>, D: Into<Rate>>(
        &mut self,
        rate_up: U,
        rate_down: D,
    ) -> Result<(), Error> {
        let rate_up = rate_up.into();
        let rate_down = rate_down.into();
        for rate in [&rate_up, &rate_down] {
            if !rate.is_valid() {
                return Err(Error::InvalidRate {
                    node: self.name.clone(),
                    rate: rate.to_string(),
                });
            }
        }
        self.rate_up = rate_up;
        self.rate_down = rate_down;
        Ok(())
    }

    /// Set the rates as conditional expressions on the node's own logic:
    ///
    /// ```text
    /// rate_up = @logic ? <rate_up> : 0;
    /// rate_down = @logic ? 0 : <rate_down>;
    /// ```
    pub fn set_rate<U: Into<Rate>, D: Into<Rate>>(
        &mut self,
        rate_up: U,
        rate_down: D,
    ) -> Result<(), Error> {
        let rate_up = rate_up.into();
        let rate_down = rate_down.into();
        self.set_rates(
            Rate::Expr(format!("@logic ? {} : 0", rate_up)),
            Rate::Expr(format!("@logic ? 0 : {}", rate_down)),
        )
    }

    /// Mark this node as internal (excluded from simulation output) or external.
    pub fn set_internal(&mut self, is_internal: bool) {
        self.is_internal = is_internal;
    }

    /// Add (or replace) an auxiliary declaration which is written verbatim into the node block.
    ///
    /// The key must be a valid name other than `logic`, `rate_up` and `rate_down`.
    pub fn set_internal_var(&mut self, key: &str, value: &str) -> Result<(), Error> {
        if !is_valid_name(key) || RESERVED_ATTRIBUTES.contains(&key) {
            return Err(Error::InvalidName(key.to_string()));
        }
        let value = value.trim().to_string();
        if let Some(entry) = self.internal_var.iter_mut().find(|(k, _)| k == key) {
            entry.1 = value;
        } else {
            self.internal_var.push((key.to_string(), value));
        }
        Ok(())
    }
}

/// Some basic utility methods for inspecting the `Node`.
impl Node {
    /// Name of this node.
    pub fn get_name(&self) -> &String {
        &self.name
    }

    /// Logic expression of this node as written, if any.
    pub fn get_logic(&self) -> Option<&str> {
        self.logic.as_deref()
    }

    /// Logic of this node parsed into an `Expression`.
    pub fn get_expression(&self) -> Option<Expression> {
        self.logic
            .as_deref()
            .and_then(|it| Expression::try_from(it).ok())
    }

    pub fn get_rate_up(&self) -> &Rate {
        &self.rate_up
    }

    pub fn get_rate_down(&self) -> &Rate {
        &self.rate_down
    }

    pub fn is_internal(&self) -> bool {
        self.is_internal
    }

    /// True if the rates of this node were rewritten by `Node::make_mutant`.
    pub fn is_mutant(&self) -> bool {
        self.is_mutant
    }

    /// Auxiliary declarations of this node, in declaration order.
    pub fn internal_vars(&self) -> &[(String, String)] {
        &self.internal_var
    }

    pub fn get_internal_var(&self, key: &str) -> Option<&str> {
        self.internal_var
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}
