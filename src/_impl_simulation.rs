use crate::_impl_mutation::{high_variable, low_variable};
use crate::{Error, MutationState, Network, Simulation, SimulationParameters};

/// Methods for creating new `Simulation`s.
impl Simulation {
    /// Create a new `Simulation` of the given network with default parameters.
    pub fn new(network: Network) -> Simulation {
        Simulation::with_parameters(network, SimulationParameters::default())
    }

    /// Create a new `Simulation` of the given network with the given parameters.
    ///
    /// Mutant nodes of the network become the mutable nodes of the simulation. Their switches
    /// which are not set in `parameters` start in the wild-type state (both `0`).
    pub fn with_parameters(network: Network, mut parameters: SimulationParameters) -> Simulation {
        let mutations: Vec<String> = network
            .ordered_nodes()
            .iter()
            .filter(|it| it.is_mutant())
            .map(|it| it.get_name().clone())
            .collect();
        for name in &mutations {
            for switch in &[low_variable(name), high_variable(name)] {
                if !parameters.external_variables().contains_key(switch) {
                    parameters.set_external(switch.clone(), 0.0);
                }
            }
        }
        Simulation {
            network,
            parameters,
            mutations,
            refstate: Vec::new(),
        }
    }
}

/// Accessors of the `Simulation` components.
impl Simulation {
    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Mutable access to the network, e.g. to change initial states.
    pub fn network_mut(&mut self) -> &mut Network {
        &mut self.network
    }

    pub fn parameters(&self) -> &SimulationParameters {
        &self.parameters
    }

    pub fn parameters_mut(&mut self) -> &mut SimulationParameters {
        &mut self.parameters
    }

    /// Names of mutated nodes, in the order in which they were mutated.
    pub fn mutations(&self) -> &[String] {
        &self.mutations
    }

    /// Reference state assignments, in the order in which they were first set.
    pub fn refstate(&self) -> &[(String, bool)] {
        &self.refstate
    }
}

/// Methods for modifying the `Simulation`.
impl Simulation {
    /// Apply `SimulationParameters::set` to every `(name, value)` pair. Stops at the first
    /// invalid value; pairs before it remain applied.
    pub fn update_parameters<'a, I>(&mut self, parameters: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        for (name, value) in parameters {
            self.parameters.set(name, value)?;
        }
        Ok(())
    }

    /// Force the given node into a state.
    ///
    /// The first mutation of a node rewrites its rates using `Node::make_mutant`. Every
    /// mutation then sets the `$Low_<node>` and `$High_<node>` switches according to `state`,
    /// so a mutated node can be released again with `MutationState::WildType`.
    pub fn mutate(&mut self, node: &str, state: MutationState) -> Result<(), Error> {
        let target = self
            .network
            .get_mut(node)
            .ok_or_else(|| Error::UnknownNode(node.to_string()))?;
        if !target.is_mutant() {
            *target = target.make_mutant();
        }
        if !self.mutations.iter().any(|it| it == node) {
            self.mutations.push(node.to_string());
        }
        let (low, high) = state.switches();
        self.parameters.set_external(low_variable(node), low);
        self.parameters.set_external(high_variable(node), high);
        Ok(())
    }

    /// Set the reference value of a node.
    pub fn set_refstate(&mut self, node: &str, value: bool) -> Result<(), Error> {
        if !self.network.contains(node) {
            return Err(Error::UnknownNode(node.to_string()));
        }
        if let Some(entry) = self.refstate.iter_mut().find(|(n, _)| n == node) {
            entry.1 = value;
        } else {
            self.refstate.push((node.to_string(), value));
        }
        Ok(())
    }

    /// Only the given nodes are reported in the output, all other nodes become internal.
    pub fn set_output<S: AsRef<str>>(&mut self, nodes: &[S]) {
        self.network.set_output(nodes);
    }

    /// Give every listed node the same independent distribution `[P(0), P(1)]`.
    ///
    /// Either all nodes are updated, or (on error) none of them.
    pub fn set_nodes_istate<S: AsRef<str>>(
        &mut self,
        nodes: &[S],
        probabilities: [f64; 2],
    ) -> Result<(), Error> {
        let mut network = self.network.clone();
        for node in nodes {
            network.set_istate_values(node.as_ref(), probabilities)?;
        }
        self.network = network;
        Ok(())
    }

    /// Create a copy of this simulation in which all listed nodes are mutated to `state`.
    pub fn copy_and_mutate<S: AsRef<str>>(
        &self,
        nodes: &[S],
        state: MutationState,
    ) -> Result<Simulation, Error> {
        let mut copy = self.clone();
        for node in nodes {
            copy.mutate(node.as_ref(), state)?;
        }
        Ok(copy)
    }
}
