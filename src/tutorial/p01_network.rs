//! # Nodes and networks
//!
//! A stochastic Boolean `Network` is an ordered collection of `Node`s. Every node has
//! a Boolean `logic` formula over the names of other nodes and two transition rates. When
//! the logic is true, the node switches from `0` to `1` with `rate_up`, when it is false,
//! it switches back with `rate_down`.
//!
//! Logic formulas are plain strings, but they can be parsed into an `Expression` tree.
//! Operators can be written either symbolically (`!`, `&`, `|`, `^`) or using keywords
//! (`NOT`, `AND`, `OR`, `XOR`). Conjunction binds tighter than disjunction, which binds
//! tighter than exclusive or:
//!
//! ```rust
//! use biodivine_lib_maboss::Expression;
//! use std::collections::HashMap;
//! use std::convert::TryFrom;
//!
//! let expression = Expression::try_from("NOT a AND b OR c").unwrap();
//! assert_eq!("((!a & b) | c)", expression.to_string());
//! assert_eq!(vec!["a", "b", "c"], expression.variables());
//!
//! let mut values = HashMap::new();
//! values.insert("a".to_string(), false);
//! values.insert("b".to_string(), true);
//! values.insert("c".to_string(), false);
//! assert_eq!(Some(true), expression.evaluate(&values));
//! ```
//!
//! Nodes are created with a name, a logic and two rates. A rate can be a number or
//! a MaBoSS arithmetic expression, which is kept as text. `Node::set_rate` produces
//! the usual rates conditioned on the node's own logic. An invalid logic does not abort
//! node creation: the logic is dropped and a `Warning` is reported instead. Such a node
//! is refused by `Network::new`.
//!
//! ```rust
//! use biodivine_lib_maboss::{take_warnings, Error, Network, Node};
//!
//! let p53 = Node::with_logic("p53", "!Mdm2", 1.0, 1.0).unwrap();
//! let mut mdm2 = Node::with_logic("Mdm2", "p53", 1.0, 1.0).unwrap();
//! mdm2.set_rate(0.5, 2.0).unwrap();
//! assert_eq!("@logic ? 0.5 : 0", mdm2.get_rate_up().to_string());
//!
//! let broken = Node::with_logic("X", "p53 &", 1.0, 1.0).unwrap();
//! assert_eq!(None, broken.get_logic());
//! assert_eq!(1, take_warnings().len());
//!
//! let network = Network::new(vec![p53.clone(), mdm2.clone(), broken]);
//! assert_eq!(Err(Error::MissingLogic("X".to_string())), network);
//!
//! let network = Network::new(vec![p53, mdm2]).unwrap();
//! assert_eq!(vec!["p53", "Mdm2"], network.names());
//! ```
//!
//! Every node also has an initial state distribution. By default, both values are equally
//! likely. Several nodes can be bound to one joint distribution, in which case only the
//! listed combinations of values are possible. Rebinding a node which is part of a joint
//! distribution dissolves that distribution (the other nodes go back to uniform ones).
//!
//! ```rust
//! use biodivine_lib_maboss::{Network, Node};
//!
//! let a = Node::with_logic("A", "B", 1.0, 1.0).unwrap();
//! let b = Node::with_logic("B", "A", 1.0, 1.0).unwrap();
//! let mut network = Network::new(vec![a, b]).unwrap();
//!
//! network.set_istate_values("A", [0.2, 0.8]).unwrap();
//! assert_eq!(0.8, network.istate("A").unwrap().probability(&[true]));
//!
//! network
//!     .set_joint_istate(&["A", "B"], &[(vec![true, true], 0.5), (vec![false, false], 0.5)])
//!     .unwrap();
//! assert_eq!(1, network.bindings().len());
//! assert_eq!(0.0, network.istate("B").unwrap().probability(&[true, false]));
//!
//! // Probabilities have to sum up to one.
//! assert!(network.set_istate_values("A", [0.5, 0.6]).is_err());
//! ```
//!
//! Finally, the `Display` of a network is exactly the content of its `.bnd` file:
//!
//! ```rust
//! use biodivine_lib_maboss::{Network, Node};
//!
//! let a = Node::with_logic("A", "!A", 1.0, 2.0).unwrap();
//! let network = Network::new(vec![a]).unwrap();
//! assert_eq!(
//!     "Node A {\n\tlogic = !A;\n\trate_up = 1;\n\trate_down = 2;\n}\n",
//!     network.to_string()
//! );
//! ```
