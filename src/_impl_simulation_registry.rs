use crate::{Simulation, SimulationRegistry};

impl SimulationRegistry {
    pub fn new() -> SimulationRegistry {
        SimulationRegistry::default()
    }

    /// Store a simulation under the given name, returning the one it replaces.
    pub fn insert(&mut self, name: &str, simulation: Simulation) -> Option<Simulation> {
        self.simulations.insert(name.to_string(), simulation)
    }

    pub fn get(&self, name: &str) -> Option<&Simulation> {
        self.simulations.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Simulation> {
        self.simulations.get_mut(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Simulation> {
        self.simulations.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.simulations.contains_key(name)
    }

    /// Names of all stored simulations in alphabetical order.
    pub fn names(&self) -> Vec<&str> {
        self.simulations.keys().map(|it| it.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.simulations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.simulations.is_empty()
    }
}
