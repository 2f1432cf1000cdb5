use crate::_impl_expression::validate_or_fail;
use crate::_impl_initial_state::check_probabilities;
use crate::_impl_warning::emit_warning;
use crate::{Error, InitialState, Network, Node, Warning};
use fxhash::FxHashMap;
use std::collections::HashSet;

/// Methods for safely constructing new instances of `Network`s.
impl Network {
    /// Create a new `Network` from the given nodes. The ordering of the nodes is preserved.
    ///
    /// Construction is strict: node names must be unique, every node must have logic, and
    /// every logic expression may only reference nodes of this network. Every node starts
    /// with its own uniform initial state.
    pub fn new(nodes: Vec<Node>) -> Result<Network, Error> {
        let mut node_to_index = FxHashMap::default();
        for (i, node) in nodes.iter().enumerate() {
            if node_to_index.insert(node.name.clone(), i).is_some() {
                return Err(Error::DuplicateNode(node.name.clone()));
            }
        }

        let mut logic = Vec::with_capacity(nodes.len());
        for node in &nodes {
            match node.logic.as_deref() {
                Some(expression) => logic.push(expression),
                None => return Err(Error::MissingLogic(node.name.clone())),
            }
        }
        let names: HashSet<String> = node_to_index.keys().cloned().collect();
        validate_or_fail(&names, &logic)?;

        let bindings = nodes
            .iter()
            .map(|node| InitialState::uniform(&node.name))
            .collect();
        Ok(Network {
            nodes,
            node_to_index,
            bindings,
        })
    }
}

/// Some basic utility methods for inspecting the `Network`.
impl Network {
    /// The number of nodes in this `Network`.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.node_to_index.contains_key(name)
    }

    /// Find a `Node` by name, or `None` if there is no such node.
    pub fn get(&self, name: &str) -> Option<&Node> {
        self.node_to_index.get(name).map(|i| &self.nodes[*i])
    }

    /// **(internal)** Mutable access to a node. The name of the node must not be changed.
    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut Node> {
        match self.node_to_index.get(name) {
            Some(i) => Some(&mut self.nodes[*i]),
            None => None,
        }
    }

    /// Node names in declaration order.
    pub fn names(&self) -> Vec<&str> {
        self.nodes.iter().map(|it| it.name.as_str()).collect()
    }

    /// All nodes in declaration order.
    pub fn ordered_nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All initial state bindings, in the order in which they are written to a `.cfg` file.
    pub fn bindings(&self) -> &[InitialState] {
        &self.bindings
    }

    /// The initial state binding which contains the given node.
    pub fn istate(&self, name: &str) -> Option<&InitialState> {
        self.bindings.iter().find(|it| it.contains_node(name))
    }

    /// **(internal)** Index of the binding which contains the given node.
    fn binding_index(&self, name: &str) -> Result<usize, Error> {
        self.bindings
            .iter()
            .position(|it| it.contains_node(name))
            .ok_or_else(|| Error::UnknownNode(name.to_string()))
    }
}

/// Methods for modifying initial states and outputs of the `Network`.
impl Network {
    /// Set the initial state distribution of a single node, given as a list of
    /// `(value, probability)` pairs.
    ///
    /// The list must contain one or two distinct values, with nonnegative probabilities
    /// summing up to one (a missing value has probability zero). If the node is part of
    /// a joint binding, that binding is dissolved first: all its nodes go back to uniform
    /// distributions and a `Warning::BindingDissolved` is emitted.
    ///
    /// On error, the network is not modified.
    pub fn set_istate(&mut self, node: &str, distribution: &[(bool, f64)]) -> Result<(), Error> {
        if !self.contains(node) {
            return Err(Error::UnknownNode(node.to_string()));
        }
        let target = format!("node `{}`", node);
        if distribution.is_empty() || distribution.len() > 2 {
            return Err(Error::InvalidInitialState {
                target,
                message: format!("expected 1 or 2 probabilities, found {}", distribution.len()),
            });
        }
        if distribution.len() == 2 && distribution[0].0 == distribution[1].0 {
            return Err(Error::InvalidInitialState {
                target,
                message: format!("value {} is listed twice", u8::from(distribution[0].0)),
            });
        }
        check_probabilities(&target, distribution.iter().map(|(_, p)| *p))?;

        let mut p_false = 0.0;
        let mut p_true = 0.0;
        for (value, p) in distribution {
            if *value {
                p_true = *p;
            } else {
                p_false = *p;
            }
        }

        let index = self.binding_index(node)?;
        if self.bindings[index].is_joint() {
            self.dissolve_binding(index, node);
        }
        let index = self.binding_index(node)?;
        self.bindings[index] = InitialState::singleton(node, p_false, p_true);
        Ok(())
    }

    /// Shorthand for `set_istate` with probabilities `[P(0), P(1)]`.
    pub fn set_istate_values(&mut self, node: &str, probabilities: [f64; 2]) -> Result<(), Error> {
        self.set_istate(node, &[(false, probabilities[0]), (true, probabilities[1])])
    }

    /// Bind the initial states of several nodes to one joint distribution.
    ///
    /// Every key of `distribution` is a vector of values ordered like `nodes`. Probabilities
    /// must be nonnegative and sum up to one; vectors which are not listed are impossible
    /// initial states. Nodes which are part of another joint binding are released from it
    /// first (with `Warning::BindingDissolved`). The binding keeps the order of `nodes`
    /// exactly as given.
    ///
    /// On error, the network is not modified.
    pub fn set_joint_istate<S: AsRef<str>>(
        &mut self,
        nodes: &[S],
        distribution: &[(Vec<bool>, f64)],
    ) -> Result<(), Error> {
        let nodes: Vec<String> = nodes.iter().map(|it| it.as_ref().to_string()).collect();
        let target = format!("nodes [{}]", nodes.join(", "));
        if nodes.is_empty() {
            return Err(Error::InvalidInitialState {
                target,
                message: "no nodes given".to_string(),
            });
        }
        for (i, node) in nodes.iter().enumerate() {
            if !self.contains(node) {
                return Err(Error::UnknownNode(node.clone()));
            }
            if nodes[..i].contains(node) {
                return Err(Error::InvalidInitialState {
                    target,
                    message: format!("node `{}` is listed twice", node),
                });
            }
        }
        if nodes.len() == 1 {
            let mut single = Vec::with_capacity(distribution.len());
            for (values, p) in distribution {
                match values.as_slice() {
                    [value] => single.push((*value, *p)),
                    _ => {
                        return Err(Error::InvalidInitialState {
                            target,
                            message: format!("expected 1 value, found {}", values.len()),
                        })
                    }
                }
            }
            return self.set_istate(&nodes[0], &single);
        }

        if distribution.is_empty() {
            return Err(Error::InvalidInitialState {
                target,
                message: "no probabilities given".to_string(),
            });
        }
        for (i, (values, _)) in distribution.iter().enumerate() {
            if values.len() != nodes.len() {
                return Err(Error::InvalidInitialState {
                    target,
                    message: format!(
                        "expected {} values per state, found {}",
                        nodes.len(),
                        values.len()
                    ),
                });
            }
            if distribution[..i].iter().any(|(other, _)| other == values) {
                return Err(Error::InvalidInitialState {
                    target,
                    message: "a state is listed twice".to_string(),
                });
            }
        }
        check_probabilities(&target, distribution.iter().map(|(_, p)| *p))?;

        for node in &nodes {
            let index = self.binding_index(node)?;
            if self.bindings[index].is_joint() {
                self.dissolve_binding(index, node);
            }
        }
        self.bindings.retain(|it| !nodes.iter().any(|n| it.contains_node(n)));
        self.bindings
            .push(InitialState::joint(nodes, distribution.to_vec()));
        Ok(())
    }

    /// **(internal)** Remove a joint binding and give each of its nodes a uniform distribution.
    fn dissolve_binding(&mut self, index: usize, node: &str) {
        let binding = self.bindings.remove(index);
        emit_warning(Warning::BindingDissolved {
            node: node.to_string(),
            group: binding.nodes.clone(),
        });
        for member in &binding.nodes {
            self.bindings.push(InitialState::uniform(member));
        }
    }

    /// Mark every node in `keep` as external and every other node as internal.
    ///
    /// Names in `keep` that do not belong to this network are ignored.
    pub fn set_output<S: AsRef<str>>(&mut self, keep: &[S]) {
        let keep: HashSet<&str> = keep.iter().map(|it| it.as_ref()).collect();
        for node in self.nodes.iter_mut() {
            node.is_internal = !keep.contains(node.name.as_str());
        }
    }

    /// **(internal)** Reorder the bindings for which `rank` gives a position by that position.
    /// Bindings without a rank keep their place in the list.
    pub(crate) fn reorder_bindings<F>(&mut self, rank: F)
    where
        F: Fn(&InitialState) -> Option<usize>,
    {
        let mut slots = Vec::new();
        let mut ranked = Vec::new();
        for (index, binding) in self.bindings.iter().enumerate() {
            if let Some(position) = rank(binding) {
                slots.push(index);
                ranked.push((position, binding.clone()));
            }
        }
        ranked.sort_by_key(|(position, _)| *position);
        for (index, (_, binding)) in slots.into_iter().zip(ranked) {
            self.bindings[index] = binding;
        }
    }

    /// **(internal)** Render all initial state bindings as `.cfg` lines.
    pub(crate) fn istate_to_string(&self) -> String {
        self.bindings
            .iter()
            .map(|it| it.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
