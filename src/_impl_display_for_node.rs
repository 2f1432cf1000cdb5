use crate::Node;
use std::fmt::{Display, Error, Formatter};

/// Writes the node as a `.bnd` block. Auxiliary declarations come first, followed by
/// `logic` (if set), `rate_up` and `rate_down`.
impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        writeln!(f, "Node {} {{", self.name)?;
        for (key, value) in &self.internal_var {
            writeln!(f, "\t{} = {};", key, value)?;
        }
        if let Some(logic) = &self.logic {
            writeln!(f, "\tlogic = {};", logic)?;
        }
        writeln!(f, "\trate_up = {};", self.rate_up)?;
        writeln!(f, "\trate_down = {};", self.rate_down)?;
        write!(f, "}}")
    }
}
