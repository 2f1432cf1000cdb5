use crate::_impl_mutation::NB_MUTABLE;
use crate::_impl_warning::emit_warning;
use crate::{is_valid_name, Error, SimulationParameters, Warning};
use std::collections::BTreeMap;

/// Names of the engine parameters, in the order in which they are written to a `.cfg` file.
pub const ENGINE_PARAMETERS: [&str; 11] = [
    "time_tick",
    "max_time",
    "sample_count",
    "discrete_time",
    "use_physrandgen",
    "seed_pseudorandom",
    "display_traj",
    "statdist_traj_count",
    "statdist_cluster_threshold",
    "thread_count",
    "statdist_similarity_cache_max_size",
];

impl Default for SimulationParameters {
    fn default() -> Self {
        SimulationParameters {
            time_tick: 0.1,
            max_time: 4.0,
            sample_count: 10000,
            discrete_time: false,
            use_physrandgen: true,
            seed_pseudorandom: 0,
            display_traj: false,
            statdist_traj_count: 0,
            statdist_cluster_threshold: 1.0,
            thread_count: 1,
            statdist_similarity_cache_max_size: 20000,
            external: BTreeMap::new(),
        }
    }
}

impl SimulationParameters {
    /// Set a parameter by name.
    ///
    /// Names starting with `$` are external variables and accept any finite number.
    /// Engine parameters are converted to their type: flags accept `0` or `1`, counts accept
    /// nonnegative integers, and real parameters accept nonnegative numbers. A value that
    /// does not fit is an error. Unknown names are ignored with `Warning::UnknownParameter`.
    pub fn set(&mut self, name: &str, value: f64) -> Result<(), Error> {
        if let Some(variable) = name.strip_prefix('$') {
            if variable == NB_MUTABLE {
                emit_warning(Warning::ReservedParameter(name.to_string()));
                return Ok(());
            }
            if !is_valid_name(variable) {
                return Err(Error::InvalidName(name.to_string()));
            }
            if !value.is_finite() {
                return Err(invalid(name, "expected a finite number"));
            }
            self.external.insert(variable.to_string(), value);
            return Ok(());
        }
        match name {
            "time_tick" => self.time_tick = as_real(name, value)?,
            "max_time" => self.max_time = as_real(name, value)?,
            "sample_count" => self.sample_count = as_count(name, value)?,
            "discrete_time" => self.discrete_time = as_flag(name, value)?,
            "use_physrandgen" => self.use_physrandgen = as_flag(name, value)?,
            "seed_pseudorandom" => self.seed_pseudorandom = as_count(name, value)?,
            "display_traj" => self.display_traj = as_flag(name, value)?,
            "statdist_traj_count" => self.statdist_traj_count = as_count(name, value)?,
            "statdist_cluster_threshold" => {
                self.statdist_cluster_threshold = as_real(name, value)?
            }
            "thread_count" => self.thread_count = as_count(name, value)?,
            "statdist_similarity_cache_max_size" => {
                self.statdist_similarity_cache_max_size = as_count(name, value)?
            }
            _ => emit_warning(Warning::UnknownParameter(name.to_string())),
        }
        Ok(())
    }

    /// Read a parameter by name (`$`-prefixed names read external variables).
    pub fn get(&self, name: &str) -> Option<f64> {
        if let Some(variable) = name.strip_prefix('$') {
            return self.external.get(variable).cloned();
        }
        self.engine_parameters()
            .into_iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    /// **(internal)** Set an external variable without any checks (used for mutation switches).
    pub(crate) fn set_external(&mut self, name: String, value: f64) {
        self.external.insert(name, value);
    }

    /// External variables (names without the `$` sigil), sorted by name.
    pub fn external_variables(&self) -> &BTreeMap<String, f64> {
        &self.external
    }

    /// All engine parameters as numbers (flags are `0` or `1`), in `ENGINE_PARAMETERS` order.
    pub fn engine_parameters(&self) -> Vec<(&'static str, f64)> {
        let values = [
            self.time_tick,
            self.max_time,
            self.sample_count as f64,
            flag(self.discrete_time),
            flag(self.use_physrandgen),
            self.seed_pseudorandom as f64,
            flag(self.display_traj),
            self.statdist_traj_count as f64,
            self.statdist_cluster_threshold,
            self.thread_count as f64,
            self.statdist_similarity_cache_max_size as f64,
        ];
        ENGINE_PARAMETERS.iter().cloned().zip(values).collect()
    }
}

fn flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

fn invalid(name: &str, message: &str) -> Error {
    Error::InvalidParameter {
        name: name.to_string(),
        message: message.to_string(),
    }
}

fn as_real(name: &str, value: f64) -> Result<f64, Error> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(invalid(name, "expected a nonnegative number"))
    }
}

fn as_count(name: &str, value: f64) -> Result<u64, Error> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u64::MAX as f64 {
        Ok(value as u64)
    } else {
        Err(invalid(name, "expected a nonnegative integer"))
    }
}

fn as_flag(name: &str, value: f64) -> Result<bool, Error> {
    if value == 0.0 {
        Ok(false)
    } else if value == 1.0 {
        Ok(true)
    } else {
        Err(invalid(name, "expected 0 or 1"))
    }
}

#[cfg(test)]
mod tests {
    use crate::{take_warnings, Error, SimulationParameters, Warning, ENGINE_PARAMETERS};

    #[test]
    fn defaults() {
        let parameters = SimulationParameters::default();
        assert_eq!(Some(0.1), parameters.get("time_tick"));
        assert_eq!(Some(4.0), parameters.get("max_time"));
        assert_eq!(Some(10000.0), parameters.get("sample_count"));
        assert_eq!(Some(1.0), parameters.get("use_physrandgen"));
        assert_eq!(Some(20000.0), parameters.get("statdist_similarity_cache_max_size"));
        assert!(parameters.external_variables().is_empty());
        let names: Vec<&str> = parameters
            .engine_parameters()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(ENGINE_PARAMETERS.to_vec(), names);
    }

    #[test]
    fn typed_assignment() {
        let mut parameters = SimulationParameters::default();
        parameters.set("max_time", 100.0).unwrap();
        parameters.set("sample_count", 500.0).unwrap();
        parameters.set("discrete_time", 1.0).unwrap();
        parameters.set("thread_count", 4.0).unwrap();
        assert_eq!(100.0, parameters.max_time);
        assert_eq!(500, parameters.sample_count);
        assert!(parameters.discrete_time);
        assert_eq!(4, parameters.thread_count);

        assert!(parameters.set("sample_count", 1.5).is_err());
        assert!(parameters.set("thread_count", -1.0).is_err());
        assert!(parameters.set("display_traj", 2.0).is_err());
        assert!(parameters.set("time_tick", f64::NAN).is_err());
        assert_eq!(500, parameters.sample_count);
    }

    #[test]
    fn external_variables() {
        let mut parameters = SimulationParameters::default();
        parameters.set("$rate_b", 2.0).unwrap();
        parameters.set("$rate_a", 0.5).unwrap();
        assert_eq!(Some(0.5), parameters.get("$rate_a"));
        assert_eq!(None, parameters.get("rate_a"));
        let names: Vec<&String> = parameters.external_variables().keys().collect();
        assert_eq!(vec!["rate_a", "rate_b"], names);
        assert_eq!(
            Err(Error::InvalidName("$1x".to_string())),
            parameters.set("$1x", 1.0)
        );
    }

    #[test]
    fn unknown_and_reserved_names() {
        let mut parameters = SimulationParameters::default();
        take_warnings();
        parameters.set("max_tim", 10.0).unwrap();
        parameters.set("$nb_mutable", 3.0).unwrap();
        assert_eq!(
            vec![
                Warning::UnknownParameter("max_tim".to_string()),
                Warning::ReservedParameter("$nb_mutable".to_string()),
            ],
            take_warnings()
        );
        assert_eq!(SimulationParameters::default(), parameters);
    }
}
