use crate::_maboss_parser::{cfg_error, skip_whitespace, strip_comments, CfgTemp, IstateTemp};
use crate::{is_valid_name, Error};
use regex::Regex;
use std::convert::TryFrom;

lazy_static! {
    static ref EXTERNAL: Regex =
        Regex::new(r"(?s)^\$(?P<name>[a-zA-Z0-9_]+)\s*=\s*(?P<value>.*)$").unwrap();
    static ref JOINT_ISTATE: Regex =
        Regex::new(r"(?s)^\[(?P<nodes>[^\]]*)\]\.istate\s*=\s*(?P<values>.*)$").unwrap();
    static ref NODE_FLAG: Regex = Regex::new(
        r"(?s)^(?P<node>[a-zA-Z0-9_]+)\.(?P<flag>istate|is_internal|refstate)\s*=\s*(?P<value>.*)$"
    )
    .unwrap();
    static ref PARAMETER: Regex =
        Regex::new(r"(?s)^(?P<name>[a-zA-Z0-9_]+)\s*=\s*(?P<value>.*)$").unwrap();
    static ref ISTATE_ENTRY: Regex =
        Regex::new(r"^\s*(?P<p>[^\[\],\s]+)\s*\[(?P<state>[^\]]*)\]\s*").unwrap();
    static ref NUMBER: Regex =
        Regex::new(r"^[+-]?([0-9]+\.?[0-9]*|\.[0-9]+)([eE][+-]?[0-9]+)?$").unwrap();
}

/// Read the statements of a `.cfg` file. Every statement is terminated by `;` and has one
/// of the following shapes:
///
/// ```text
/// $name = <number>;
/// name = <number or Boolean>;
/// name.istate = <Boolean>;
/// [a, b, ...].istate = <p> [<bit>,<bit>,...] , <p> [...] ...;
/// name.is_internal = <Boolean>;
/// name.refstate = <Boolean>;
/// ```
///
/// Statements are only checked for their shape here; node names and parameter values are
/// resolved when the simulation is assembled.
impl TryFrom<&str> for CfgTemp {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let text = strip_comments(value);
        let mut cfg = CfgTemp::default();
        let mut offset = 0;
        while let Some(length) = text[offset..].find(';') {
            let start = skip_whitespace(&text, offset);
            let end = offset + length;
            if start >= end {
                return Err(cfg_error(&text, end, "Empty statement.".to_string()));
            }
            let statement = text[start..end].trim_end();
            cfg.read_statement(statement)
                .map_err(|message| cfg_error(&text, start, message))?;
            offset = end + 1;
        }
        if !text[offset..].trim().is_empty() {
            return Err(cfg_error(
                &text,
                skip_whitespace(&text, offset),
                "Expected `;`.".to_string(),
            ));
        }
        Ok(cfg)
    }
}

impl CfgTemp {
    /// **(internal)** Classify one statement (without the trailing `;`) and store it.
    fn read_statement(&mut self, statement: &str) -> Result<(), String> {
        if let Some(captures) = EXTERNAL.captures(statement) {
            let name = checked_name(&captures["name"])?;
            let value = parse_number(&captures["value"])?;
            self.externals.push((name, value));
        } else if let Some(captures) = JOINT_ISTATE.captures(statement) {
            let istate = read_joint_istate(&captures["nodes"], &captures["values"])?;
            self.istates.push(istate);
        } else if let Some(captures) = NODE_FLAG.captures(statement) {
            let node = checked_name(&captures["node"])?;
            let value = parse_boolean(&captures["value"]).map_err(|e| e.to_string())?;
            match &captures["flag"] {
                "istate" => self.istates.push(IstateTemp {
                    nodes: vec![node],
                    distribution: vec![
                        (vec![false], if value { 0.0 } else { 1.0 }),
                        (vec![true], if value { 1.0 } else { 0.0 }),
                    ],
                }),
                "is_internal" => self.internal.push((node, value)),
                _ => self.refstate.push((node, value)),
            }
        } else if let Some(captures) = PARAMETER.captures(statement) {
            let name = checked_name(&captures["name"])?;
            let value = &captures["value"];
            let value = match parse_number(value) {
                Ok(number) => number,
                Err(_) => {
                    if parse_boolean(value).map_err(|e| e.to_string())? {
                        1.0
                    } else {
                        0.0
                    }
                }
            };
            self.parameters.push((name, value));
        } else {
            return Err(format!("Unknown statement `{}`.", statement));
        }
        Ok(())
    }
}

/// **(internal)** Read `a, b` and `p [0,1] , q [1,0]` into a joint initial state.
fn read_joint_istate(nodes: &str, values: &str) -> Result<IstateTemp, String> {
    let nodes = nodes
        .split(',')
        .map(|it| checked_name(it.trim()))
        .collect::<Result<Vec<_>, _>>()?;

    let mut distribution = Vec::new();
    let mut rest = values.trim();
    loop {
        let entry = ISTATE_ENTRY
            .captures(rest)
            .ok_or_else(|| format!("Expected `<probability> [<states>]`, found `{}`.", rest))?;
        let probability = parse_number(&entry["p"])?;
        let state = entry["state"]
            .split(',')
            .map(|it| match it.trim() {
                "0" => Ok(false),
                "1" => Ok(true),
                other => Err(format!("Invalid node state `{}` (expected 0 or 1).", other)),
            })
            .collect::<Result<Vec<_>, _>>()?;
        if state.len() != nodes.len() {
            return Err(format!(
                "State [{}] does not match nodes [{}].",
                entry["state"].trim(),
                nodes.join(", ")
            ));
        }
        distribution.push((state, probability));
        rest = &rest[entry.get(0).map_or(0, |it| it.end())..];
        if rest.is_empty() {
            break;
        }
        match rest.strip_prefix(',') {
            Some(next) => rest = next,
            None => return Err(format!("Expected `,`, found `{}`.", rest)),
        }
    }
    Ok(IstateTemp {
        nodes,
        distribution,
    })
}

fn checked_name(name: &str) -> Result<String, String> {
    if is_valid_name(name) {
        Ok(name.to_string())
    } else {
        Err(format!("Invalid name `{}`.", name))
    }
}

/// **(internal)** Parse a decimal number such as `1`, `-0.5`, `.25` or `1E308`.
fn parse_number(value: &str) -> Result<f64, String> {
    let value = value.trim();
    if NUMBER.is_match(value) {
        value
            .parse::<f64>()
            .map_err(|_| format!("Invalid number `{}`.", value))
    } else {
        Err(format!("Invalid number `{}`.", value))
    }
}

/// **(internal)** Parse `0`, `1`, `True` or `False` (the last two case insensitive).
pub(crate) fn parse_boolean(value: &str) -> Result<bool, Error> {
    let value = value.trim();
    match value {
        "0" => Ok(false),
        "1" => Ok(true),
        _ if value.eq_ignore_ascii_case("true") => Ok(true),
        _ if value.eq_ignore_ascii_case("false") => Ok(false),
        _ => Err(Error::InvalidBoolean(value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use crate::_maboss_parser::_from_string_for_cfg_temp::{parse_boolean, parse_number};
    use crate::_maboss_parser::{CfgTemp, IstateTemp};
    use crate::Error;
    use std::convert::TryFrom;

    #[test]
    fn read_cfg_statements() {
        let cfg = "
            $u = 0.5; $nb_mutable = 1;
            [p53].istate = 0.3 [0] , 0.7 [1];
            Mdm2.istate = 1;
            [A, B].istate = 0.4 [0,1], 0.6[1, 0];

            max_time = 1E2; // engine
            discrete_time = True;
            A.is_internal = FALSE;
            B.refstate = 1;
        ";
        let cfg = CfgTemp::try_from(cfg).unwrap();
        assert_eq!(
            vec![("u".to_string(), 0.5), ("nb_mutable".to_string(), 1.0)],
            cfg.externals
        );
        assert_eq!(
            vec![
                ("max_time".to_string(), 100.0),
                ("discrete_time".to_string(), 1.0)
            ],
            cfg.parameters
        );
        assert_eq!(
            vec![
                IstateTemp {
                    nodes: vec!["p53".to_string()],
                    distribution: vec![(vec![false], 0.3), (vec![true], 0.7)],
                },
                IstateTemp {
                    nodes: vec!["Mdm2".to_string()],
                    distribution: vec![(vec![false], 0.0), (vec![true], 1.0)],
                },
                IstateTemp {
                    nodes: vec!["A".to_string(), "B".to_string()],
                    distribution: vec![(vec![false, true], 0.4), (vec![true, false], 0.6)],
                },
            ],
            cfg.istates
        );
        assert_eq!(vec![("A".to_string(), false)], cfg.internal);
        assert_eq!(vec![("B".to_string(), true)], cfg.refstate);
    }

    #[test]
    fn empty_cfg() {
        assert_eq!(CfgTemp::default(), CfgTemp::try_from("").unwrap());
        assert_eq!(
            CfgTemp::default(),
            CfgTemp::try_from(" // only a comment; really\n").unwrap()
        );
    }

    #[test]
    fn read_invalid_cfg() {
        let invalid = [
            ("max_time = 10", 1),
            ("max_time = 10;\n;", 2),
            ("max_time = ten;", 1),
            ("$u = 1 + 2;", 1),
            ("\n\nA.istate = 2;", 3),
            ("A.is_internal = yes;", 1),
            ("[A, B].istate = 1 [0];", 1),
            ("[A, B].istate = 0.5 [0,2], 0.5 [1,1];", 1),
            ("[A].istate = 0.5 [0] 0.5 [1];", 1),
            ("[A].istate = ;", 1),
            ("A . istate = 1;", 1),
            ("AND = 1;", 1),
            ("x + 1;", 1),
        ];
        for (cfg, line) in invalid.iter() {
            match CfgTemp::try_from(*cfg) {
                Err(Error::Parse { format, line: l, .. }) => {
                    assert_eq!("cfg", format, "{}", cfg);
                    assert_eq!(*line, l, "{}", cfg);
                }
                other => panic!("Unexpected result {:?} for {:?}", other, cfg),
            }
        }
    }

    #[test]
    fn values() {
        assert_eq!(Ok(1e308), parse_number("1E308"));
        assert_eq!(Ok(0.25), parse_number(" .25 "));
        assert_eq!(Ok(-3.0), parse_number("-3"));
        assert!(parse_number("1e").is_err());
        assert!(parse_number("inf").is_err());
        assert_eq!(Ok(true), parse_boolean("tRuE"));
        assert_eq!(Ok(false), parse_boolean("0"));
        assert_eq!(
            Err(Error::InvalidBoolean("2".to_string())),
            parse_boolean("2")
        );
    }
}
