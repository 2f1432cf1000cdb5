use crate::Network;
use std::fmt::{Display, Error, Formatter};

/// Writes the network as the content of a `.bnd` file: node blocks in declaration order,
/// separated by an empty line.
impl Display for Network {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{}", node)?;
        }
        Ok(())
    }
}
