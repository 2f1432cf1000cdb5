//! This is a documentation-only module which describes how to use this crate
//! to describe stochastic Boolean networks and exchange them with the MaBoSS
//! simulation engine.
//!
//! Table of contents:
//!  - [Nodes and networks](./p01_network/index.html)
//!  - [MaBoSS files and mutations](./p02_maboss_files/index.html)

pub mod p01_network;
pub mod p02_maboss_files;
