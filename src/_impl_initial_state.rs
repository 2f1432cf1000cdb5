use crate::{Error, InitialState};
use std::fmt::{Display, Formatter};

/// Maximal allowed difference between the sum of a distribution and one.
const PROBABILITY_TOLERANCE: f64 = 1e-9;

impl InitialState {
    /// **(internal)** The default binding: both values of `node` are equally likely.
    pub(crate) fn uniform(node: &str) -> InitialState {
        InitialState::singleton(node, 0.5, 0.5)
    }

    /// **(internal)** An independent binding of a single node.
    pub(crate) fn singleton(node: &str, p_false: f64, p_true: f64) -> InitialState {
        InitialState {
            nodes: vec![node.to_string()],
            distribution: vec![(vec![false], p_false), (vec![true], p_true)],
        }
    }

    /// **(internal)** A joint binding. The caller is responsible for validation.
    pub(crate) fn joint(nodes: Vec<String>, distribution: Vec<(Vec<bool>, f64)>) -> InitialState {
        InitialState {
            nodes,
            distribution,
        }
    }

    /// Names of the bound nodes, in the order in which they were bound.
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    /// Listed value vectors and their probabilities, in the order in which they were given.
    pub fn distribution(&self) -> &[(Vec<bool>, f64)] {
        &self.distribution
    }

    /// True if this binding covers more than one node.
    pub fn is_joint(&self) -> bool {
        self.nodes.len() > 1
    }

    pub fn contains_node(&self, node: &str) -> bool {
        self.nodes.iter().any(|it| it == node)
    }

    /// Probability of the given value vector. Unlisted vectors have zero probability.
    pub fn probability(&self, values: &[bool]) -> f64 {
        self.distribution
            .iter()
            .find(|(key, _)| key.as_slice() == values)
            .map(|(_, p)| *p)
            .unwrap_or(0.0)
    }
}

/// **(internal)** Check that all probabilities are nonnegative and sum up to one.
pub(crate) fn check_probabilities<I>(target: &str, probabilities: I) -> Result<(), Error>
where
    I: IntoIterator<Item = f64>,
{
    let mut sum = 0.0;
    for p in probabilities {
        if !p.is_finite() || p < 0.0 {
            return Err(Error::InvalidInitialState {
                target: target.to_string(),
                message: format!("probability {} is not a nonnegative number", p),
            });
        }
        sum += p;
    }
    if (sum - 1.0).abs() > PROBABILITY_TOLERANCE {
        return Err(Error::InvalidInitialState {
            target: target.to_string(),
            message: format!("probabilities sum up to {} instead of 1", sum),
        });
    }
    Ok(())
}

/// **(internal)** Format a vector of node values as `0,1,...`.
fn write_values(f: &mut Formatter<'_>, values: &[bool]) -> std::fmt::Result {
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            write!(f, ",")?;
        }
        write!(f, "{}", u8::from(*value))?;
    }
    Ok(())
}

/// Writes the binding as one `.cfg` line, e.g. `[A].istate = 0.3 [0] , 0.7 [1];`
/// or `[A, B].istate = 0.4 [0,0] , 0.6 [1,0];`.
impl Display for InitialState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}].istate = ", self.nodes.join(", "))?;
        for (i, (values, p)) in self.distribution.iter().enumerate() {
            if i > 0 {
                write!(f, " , ")?;
            }
            write!(f, "{} [", p)?;
            write_values(f, values)?;
            write!(f, "]")?;
        }
        write!(f, ";")
    }
}

#[cfg(test)]
mod tests {
    use crate::_impl_initial_state::check_probabilities;
    use crate::InitialState;

    #[test]
    fn singleton_binding() {
        let binding = InitialState::singleton("p53", 0.0, 1.0);
        assert!(!binding.is_joint());
        assert_eq!(1.0, binding.probability(&[true]));
        assert_eq!("[p53].istate = 0 [0] , 1 [1];", binding.to_string());
        assert_eq!(
            "[A].istate = 0.5 [0] , 0.5 [1];",
            InitialState::uniform("A").to_string()
        );
    }

    #[test]
    fn joint_binding() {
        let binding = InitialState::joint(
            vec!["B".to_string(), "A".to_string()],
            vec![(vec![true, false], 0.25), (vec![false, false], 0.75)],
        );
        assert!(binding.is_joint());
        assert!(binding.contains_node("A"));
        assert!(!binding.contains_node("C"));
        assert_eq!(0.25, binding.probability(&[true, false]));
        assert_eq!(0.0, binding.probability(&[true, true]));
        assert_eq!(
            "[B, A].istate = 0.25 [1,0] , 0.75 [0,0];",
            binding.to_string()
        );
    }

    #[test]
    fn probability_checks() {
        assert!(check_probabilities("A", vec![0.3, 0.7]).is_ok());
        assert!(check_probabilities("A", vec![0.1, 0.2, 0.7]).is_ok());
        assert!(check_probabilities("A", vec![1.0]).is_ok());
        assert!(check_probabilities("A", vec![0.3, 0.69]).is_err());
        assert!(check_probabilities("A", vec![0.3, 0.71]).is_err());
        assert!(check_probabilities("A", vec![-0.5, 1.5]).is_err());
        assert!(check_probabilities("A", vec![f64::NAN, 1.0]).is_err());
        assert!(check_probabilities("A", Vec::new()).is_err());
    }
}
