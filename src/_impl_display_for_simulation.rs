use crate::_impl_mutation::NB_MUTABLE;
use crate::{Error, Simulation};
use std::fmt::{Display, Formatter};
use std::io::Write;

/// **(internal)** Writes the `.cfg` description of a simulation.
///
/// The segments always come in the same order: external variables (`$nb_mutable` first,
/// when there are mutations), initial states, an empty line, engine parameters,
/// `is_internal` flags of all nodes and finally the reference state.
struct Cfg<'a>(&'a Simulation);

impl Display for Cfg<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let Cfg(simulation) = self;
        if !simulation.mutations.is_empty() {
            writeln!(f, "${} = {};", NB_MUTABLE, simulation.mutations.len())?;
        }
        for (name, value) in simulation.parameters.external_variables() {
            writeln!(f, "${} = {};", name, value)?;
        }
        let istates = simulation.network.istate_to_string();
        if !istates.is_empty() {
            writeln!(f, "{}", istates)?;
        }
        writeln!(f)?;
        for (name, value) in simulation.parameters.engine_parameters() {
            writeln!(f, "{} = {};", name, value)?;
        }
        for node in simulation.network.ordered_nodes() {
            writeln!(
                f,
                "{}.is_internal = {};",
                node.get_name(),
                u8::from(node.is_internal())
            )?;
        }
        for (name, value) in &simulation.refstate {
            writeln!(f, "{}.refstate = {};", name, u8::from(*value))?;
        }
        Ok(())
    }
}

/// Serialization of a `Simulation` into the `.bnd` and `.cfg` text accepted by MaBoSS.
impl Simulation {
    pub fn bnd_string(&self) -> String {
        self.network.to_string()
    }

    pub fn cfg_string(&self) -> String {
        Cfg(self).to_string()
    }

    /// Write the `.bnd` description into the given sink.
    pub fn write_bnd<W: Write>(&self, sink: &mut W) -> Result<(), Error> {
        write!(sink, "{}", self.network).map_err(|e| io_error("<bnd output>", e))
    }

    /// Write the `.cfg` description into the given sink.
    pub fn write_cfg<W: Write>(&self, sink: &mut W) -> Result<(), Error> {
        write!(sink, "{}", Cfg(self)).map_err(|e| io_error("<cfg output>", e))
    }
}

/// **(internal)** Lift an IO error into the crate `Error`.
pub(crate) fn io_error(path: &str, error: std::io::Error) -> Error {
    Error::Io {
        path: path.to_string(),
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use crate::{MutationState, Network, Node, Simulation};
    use pretty_assertions::assert_eq;

    fn p53_mdm2() -> Simulation {
        let p53 = Node::with_logic("p53", "!Mdm2", 1.0, 1.0).unwrap();
        let mdm2 = Node::with_logic("Mdm2", "p53", 1.0, 1.0).unwrap();
        Simulation::new(Network::new(vec![p53, mdm2]).unwrap())
    }

    #[test]
    fn default_cfg() {
        let mut simulation = p53_mdm2();
        simulation
            .network_mut()
            .set_istate_values("p53", [0.0, 1.0])
            .unwrap();
        simulation.set_output(&["p53"]);
        let expected = r"[p53].istate = 0 [0] , 1 [1];
[Mdm2].istate = 0.5 [0] , 0.5 [1];

time_tick = 0.1;
max_time = 4;
sample_count = 10000;
discrete_time = 0;
use_physrandgen = 1;
seed_pseudorandom = 0;
display_traj = 0;
statdist_traj_count = 0;
statdist_cluster_threshold = 1;
thread_count = 1;
statdist_similarity_cache_max_size = 20000;
p53.is_internal = 0;
Mdm2.is_internal = 1;
";
        assert_eq!(expected, simulation.cfg_string());
    }

    #[test]
    fn empty_network_cfg() {
        let simulation = Simulation::new(Network::new(Vec::new()).unwrap());
        let cfg = simulation.cfg_string();
        assert!(cfg.starts_with("\ntime_tick = 0.1;\n"));
        assert!(cfg.ends_with("statdist_similarity_cache_max_size = 20000;\n"));
    }

    #[test]
    fn mutated_cfg() {
        let mut simulation = p53_mdm2();
        simulation.update_parameters(vec![("$k", 2.5)]).unwrap();
        simulation.mutate("Mdm2", MutationState::Off).unwrap();
        simulation.set_refstate("p53", true).unwrap();
        let cfg = simulation.cfg_string();
        let lines: Vec<&str> = cfg.lines().collect();
        assert_eq!(
            vec!["$nb_mutable = 1;", "$High_Mdm2 = 0;", "$Low_Mdm2 = 1;", "$k = 2.5;"],
            lines[..4].to_vec()
        );
        assert_eq!(Some(&"p53.refstate = 1;"), lines.last());
        assert!(simulation
            .bnd_string()
            .contains("\trate_up = $Low_Mdm2 ? 0 : ($High_Mdm2 ? 1E308/$nb_mutable : (1));\n"));
    }

    #[test]
    fn write_into_sink() {
        let simulation = p53_mdm2();
        let mut bnd: Vec<u8> = Vec::new();
        let mut cfg: Vec<u8> = Vec::new();
        simulation.write_bnd(&mut bnd).unwrap();
        simulation.write_cfg(&mut cfg).unwrap();
        assert_eq!(simulation.bnd_string().into_bytes(), bnd);
        assert_eq!(simulation.cfg_string().into_bytes(), cfg);
    }
}
