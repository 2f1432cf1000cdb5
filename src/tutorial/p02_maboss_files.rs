//! # MaBoSS files and mutations
//!
//! A `Simulation` couples a `Network` with everything else MaBoSS needs: engine parameters,
//! external variables (`$name`), mutations and a reference state. It can be loaded from
//! and written to a `.bnd`/`.cfg` pair of files:
//!
//! ```rust
//! use biodivine_lib_maboss::Simulation;
//!
//! let bnd = r"
//!     Node p53 {
//!         logic = !Mdm2;
//!         rate_up = @logic ? $p53_up : 0;
//!         rate_down = @logic ? 0 : 1;
//!     }
//!     Node Mdm2 {
//!         logic = p53;
//!         rate_up = 1;
//!         rate_down = 1;
//!     }
//! ";
//! let cfg = r"
//!     $p53_up = 2;
//!     p53.istate = 1;
//!     max_time = 10;
//!     Mdm2.is_internal = 1;
//! ";
//!
//! let simulation = Simulation::try_from_strings(bnd, cfg).unwrap();
//! assert_eq!(10.0, simulation.parameters().max_time);
//! assert_eq!(Some(2.0), simulation.parameters().get("$p53_up"));
//! assert!(simulation.network().get("Mdm2").unwrap().is_internal());
//!
//! let cfg = simulation.cfg_string();
//! assert!(cfg.starts_with("$p53_up = 2;\n[p53].istate = 0 [0] , 1 [1];\n"));
//! assert!(cfg.contains("\nmax_time = 10;\n"));
//! ```
//!
//! Loading is strict: a rate referencing an external variable which is not declared in
//! the `.cfg` file, a node without logic, or a `.cfg` statement about an unknown node are
//! all errors.
//!
//! A mutation forces a node up or down. The first mutation of a node rewrites its rates
//! such that they are controlled by two external variables, `$Low_<name>` and
//! `$High_<name>`; the mutation state then only sets these two switches. Mutated nodes
//! are recognized again when the files are loaded:
//!
//! ```rust
//! use biodivine_lib_maboss::{MutationState, Network, Node, Simulation};
//!
//! let a = Node::with_logic("A", "!B", 1.0, 1.0).unwrap();
//! let b = Node::with_logic("B", "A", 1.0, 1.0).unwrap();
//! let simulation = Simulation::new(Network::new(vec![a, b]).unwrap());
//!
//! let mutant = simulation.copy_and_mutate(&["B"], MutationState::Off).unwrap();
//! assert_eq!(
//!     "$Low_B ? 0 : ($High_B ? 1E308/$nb_mutable : (1))",
//!     mutant.network().get("B").unwrap().get_rate_up().to_string()
//! );
//! assert!(mutant.cfg_string().starts_with("$nb_mutable = 1;\n$High_B = 0;\n$Low_B = 1;\n"));
//!
//! let reloaded = Simulation::try_from_strings(&mutant.bnd_string(), &mutant.cfg_string());
//! assert_eq!(Ok(mutant), reloaded);
//! ```
//!
//! Several simulations (e.g. a wild type and a few mutants) can be kept side by side in
//! a `SimulationRegistry`.
