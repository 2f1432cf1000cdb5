use crate::_impl_display_for_simulation::io_error;
use crate::_impl_mutation::NB_MUTABLE;
use crate::_maboss_parser::{CfgTemp, NodeTemp};
use crate::{Error, Expression, Network, Node, Rate, Simulation};
use std::collections::HashSet;
use std::convert::TryFrom;
use std::path::Path;

impl Simulation {
    /// Load a simulation from the paths of a `.bnd` and a `.cfg` file (the extensions are
    /// checked case insensitively).
    pub fn try_from_files<B: AsRef<Path>, C: AsRef<Path>>(
        bnd_path: B,
        cfg_path: C,
    ) -> Result<Simulation, Error> {
        let bnd = read_with_extension(bnd_path.as_ref(), "bnd")?;
        let cfg = read_with_extension(cfg_path.as_ref(), "cfg")?;
        Simulation::try_from_strings(&bnd, &cfg)
    }

    /// Load a simulation from the content of a `.bnd` and a `.cfg` file.
    ///
    /// Loading is strict: every node needs valid logic referencing only declared nodes and
    /// both rates, rates may only reference external variables declared in the `.cfg` file,
    /// and every node mentioned in the `.cfg` file must exist. Nodes with rates in the shape
    /// produced by `Node::make_mutant` are restored as mutants. `$nb_mutable` is derived from
    /// them and is not stored as an external variable.
    pub fn try_from_strings(bnd: &str, cfg: &str) -> Result<Simulation, Error> {
        let cfg = CfgTemp::try_from(cfg)?;
        let declared: HashSet<&str> = cfg.externals.iter().map(|(n, _)| n.as_str()).collect();
        let nodes = NodeTemp::read_all(bnd)?
            .into_iter()
            .map(|it| it.into_node(&declared))
            .collect::<Result<Vec<_>, _>>()?;

        let mut network = Network::new(nodes)?;
        for istate in &cfg.istates {
            network.set_joint_istate(&istate.nodes, &istate.distribution)?;
        }
        // Bindings declared in the file follow the order of their last declaration.
        network.reorder_bindings(|binding| {
            cfg.istates
                .iter()
                .rposition(|it| it.nodes.as_slice() == binding.nodes.as_slice())
        });
        for (name, is_internal) in &cfg.internal {
            network
                .get_mut(name)
                .ok_or_else(|| Error::UnknownNode(name.clone()))?
                .set_internal(*is_internal);
        }

        let mut simulation = Simulation::new(network);
        for (name, value) in &cfg.externals {
            if name != NB_MUTABLE {
                simulation.parameters.set_external(name.clone(), *value);
            }
        }
        for (name, value) in &cfg.parameters {
            simulation.parameters.set(name, *value)?;
        }
        for (name, value) in &cfg.refstate {
            simulation.set_refstate(name, *value)?;
        }
        Ok(simulation)
    }
}

impl NodeTemp {
    /// **(internal)** Build the `Node` described by this block. `externals` are the external
    /// variables which the rates may reference.
    fn into_node(mut self, externals: &HashSet<&str>) -> Result<Node, Error> {
        let logic = self
            .take_attribute("logic")
            .ok_or_else(|| Error::MissingLogic(self.name.clone()))?;
        if let Err(message) = Expression::try_from(logic.as_str()) {
            return Err(Error::LogicSyntax {
                expression: logic,
                message,
            });
        }
        let rate_up = self.take_rate("rate_up", externals)?;
        let rate_down = self.take_rate("rate_down", externals)?;

        let mut node = Node::new(&self.name)?;
        node.set_logic(Some(&logic));
        node.set_rates(rate_up, rate_down)?;
        for (key, value) in &self.attributes {
            node.set_internal_var(key, value)?;
        }
        node.is_mutant = node.has_mutant_rates();
        Ok(node)
    }

    /// **(internal)** Remove a rate attribute and check its external variables.
    fn take_rate(&mut self, key: &str, externals: &HashSet<&str>) -> Result<Rate, Error> {
        let rate = self.take_attribute(key).ok_or_else(|| Error::Parse {
            format: "bnd",
            line: self.line,
            message: format!("Node `{}` has no `{}`.", self.name, key),
        })?;
        let rate = Rate::parse(&rate);
        for variable in rate.external_variables() {
            if !externals.contains(variable.as_str()) {
                return Err(Error::UndeclaredExternal {
                    node: self.name.clone(),
                    variable,
                });
            }
        }
        Ok(rate)
    }
}

/// **(internal)** Read a file after checking that it has the expected extension.
fn read_with_extension(path: &Path, extension: &str) -> Result<String, Error> {
    let actual = path.extension().and_then(|it| it.to_str());
    if !actual.map_or(false, |it| it.eq_ignore_ascii_case(extension)) {
        return Err(Error::Io {
            path: path.display().to_string(),
            message: format!("expected a `.{}` file", extension),
        });
    }
    std::fs::read_to_string(path).map_err(|e| io_error(&path.display().to_string(), e))
}

#[cfg(test)]
mod tests {
    use crate::{Error, MutationState, Rate, Simulation};
    use pretty_assertions::assert_eq;

    const BND: &str = "
        Node p53 {
            logic = !Mdm2;
            rate_up = @logic ? $u : 0;
            rate_down = @logic ? 0 : 1;
        }
        Node Mdm2 {
            max_rate = 2;
            logic = p53;
            rate_up = 1;
            rate_down = 1;
        }
    ";

    const CFG: &str = "
        $u = 0.5;
        [p53, Mdm2].istate = 0.25 [0,0] , 0.75 [1,1];
        max_time = 20;
        Mdm2.is_internal = 1;
        p53.refstate = 1;
    ";

    #[test]
    fn load_simulation() {
        let simulation = Simulation::try_from_strings(BND, CFG).unwrap();
        let network = simulation.network();
        assert_eq!(vec!["p53", "Mdm2"], network.names());
        let p53 = network.get("p53").unwrap();
        assert_eq!(Some("!Mdm2"), p53.get_logic());
        assert_eq!(&Rate::Expr("@logic ? $u : 0".to_string()), p53.get_rate_up());
        let mdm2 = network.get("Mdm2").unwrap();
        assert_eq!(Some("2"), mdm2.get_internal_var("max_rate"));
        assert_eq!(&Rate::Value(1.0), mdm2.get_rate_down());
        assert!(mdm2.is_internal());
        assert!(!p53.is_internal());
        assert_eq!(0.75, network.istate("p53").unwrap().probability(&[true, true]));
        assert_eq!(20.0, simulation.parameters().max_time);
        assert_eq!(Some(0.5), simulation.parameters().get("$u"));
        assert_eq!(&[("p53".to_string(), true)], simulation.refstate());
        assert!(simulation.mutations().is_empty());
    }

    #[test]
    fn round_trip() {
        let simulation = Simulation::try_from_strings(BND, CFG).unwrap();
        let mutant = simulation
            .copy_and_mutate(&["Mdm2"], MutationState::On)
            .unwrap();
        let reloaded =
            Simulation::try_from_strings(&mutant.bnd_string(), &mutant.cfg_string()).unwrap();
        assert_eq!(mutant, reloaded);
        assert_eq!(mutant.cfg_string(), reloaded.cfg_string());
        assert_eq!(&["Mdm2".to_string()], reloaded.mutations());
        assert_eq!(None, reloaded.parameters().get("$nb_mutable"));
    }

    const ABC: &str = "
        Node A { logic = B | C; rate_up = 1; rate_down = 1; }
        Node B { logic = A; rate_up = 1; rate_down = 1; }
        Node C { logic = !A & B; rate_up = 1; rate_down = 1; }
    ";

    fn binding_order(simulation: &Simulation) -> Vec<String> {
        simulation
            .network()
            .bindings()
            .iter()
            .map(|it| it.nodes().join(","))
            .collect()
    }

    #[test]
    fn round_trip_keeps_binding_order() {
        let mut simulation = Simulation::try_from_strings(ABC, "").unwrap();
        let network = simulation.network_mut();
        network
            .set_joint_istate(&["A", "B"], &[(vec![true, false], 1.0)])
            .unwrap();
        network.set_istate_values("A", [0.3, 0.7]).unwrap();
        assert_eq!(vec!["C", "A", "B"], binding_order(&simulation));

        let reloaded =
            Simulation::try_from_strings(&simulation.bnd_string(), &simulation.cfg_string())
                .unwrap();
        assert_eq!(vec!["C", "A", "B"], binding_order(&reloaded));
        assert_eq!(simulation, reloaded);
        assert_eq!(simulation.cfg_string(), reloaded.cfg_string());
    }

    #[test]
    fn undeclared_bindings_keep_their_place() {
        let simulation = Simulation::try_from_strings(ABC, "C.istate = 1; A.istate = 0;").unwrap();
        assert_eq!(vec!["C", "B", "A"], binding_order(&simulation));
    }

    #[test]
    fn structural_load_errors() {
        let missing_logic = "Node A { rate_up = 1; rate_down = 1; }";
        assert_eq!(
            Err(Error::MissingLogic("A".to_string())),
            Simulation::try_from_strings(missing_logic, "")
        );
        let bad_logic = "Node A { logic = A &; rate_up = 1; rate_down = 1; }";
        assert!(matches!(
            Simulation::try_from_strings(bad_logic, ""),
            Err(Error::LogicSyntax { .. })
        ));
        let undefined = "Node A { logic = B; rate_up = 1; rate_down = 1; }";
        assert!(matches!(
            Simulation::try_from_strings(undefined, ""),
            Err(Error::UndefinedVariable { .. })
        ));
        let missing_rate = "Node A { logic = A; rate_up = 1; }";
        assert!(matches!(
            Simulation::try_from_strings(missing_rate, ""),
            Err(Error::Parse { format: "bnd", line: 1, .. })
        ));
        assert_eq!(
            Err(Error::UndeclaredExternal {
                node: "p53".to_string(),
                variable: "u".to_string()
            }),
            Simulation::try_from_strings(BND, "")
        );
        assert_eq!(
            Err(Error::UnknownNode("X".to_string())),
            Simulation::try_from_strings(BND, "$u = 1; X.is_internal = 1;")
        );
        assert_eq!(
            Err(Error::UnknownNode("X".to_string())),
            Simulation::try_from_strings(BND, "$u = 1; X.istate = 1;")
        );
        assert!(matches!(
            Simulation::try_from_strings(BND, "$u = 1; [p53].istate = 0.5 [0], 0.6 [1];"),
            Err(Error::InvalidInitialState { .. })
        ));
        assert!(matches!(
            Simulation::try_from_strings(BND, "$u = 1; sample_count = 0.5;"),
            Err(Error::InvalidParameter { .. })
        ));
    }

    #[test]
    fn file_extensions() {
        assert!(matches!(
            Simulation::try_from_files("model.txt", "model.cfg"),
            Err(Error::Io { .. })
        ));
        assert!(matches!(
            Simulation::try_from_files("model.bnd", "model"),
            Err(Error::Io { .. })
        ));
        assert!(matches!(
            Simulation::try_from_files("/definitely/not/here/model.BND", "model.cfg"),
            Err(Error::Io { .. })
        ));
    }
}
