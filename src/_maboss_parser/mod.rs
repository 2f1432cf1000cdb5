use crate::Error;

/// **(internal)** `.cfg` statement parsing.
mod _from_string_for_cfg_temp;
/// **(internal)** `.bnd` node block parsing.
mod _from_string_for_node_temp;
/// **(internal)** Loading a `Simulation` from a `.bnd`/`.cfg` pair.
mod _from_string_for_simulation;

/// **(internal)** A parsed `.bnd` node block that has not been integrated into a `Network` yet.
///
/// Attribute keys are unique; a repeated key keeps the last value.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct NodeTemp {
    name: String,
    line: usize,
    attributes: Vec<(String, String)>,
}

/// **(internal)** A parsed initial state declaration: either `name.istate = b;` or
/// `[a, b].istate = p [0,1] , ...;`.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct IstateTemp {
    nodes: Vec<String>,
    distribution: Vec<(Vec<bool>, f64)>,
}

/// **(internal)** All statements of a `.cfg` file, grouped by kind, each group in file order.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct CfgTemp {
    externals: Vec<(String, f64)>,
    parameters: Vec<(String, f64)>,
    istates: Vec<IstateTemp>,
    internal: Vec<(String, bool)>,
    refstate: Vec<(String, bool)>,
}

/// **(internal)** Replace every `//` comment by spaces. Line breaks and byte offsets
/// of the remaining text are preserved.
pub(crate) fn strip_comments(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for chunk in text.split_inclusive('\n') {
        match chunk.find("//") {
            None => result.push_str(chunk),
            Some(start) => {
                let body = chunk.trim_end_matches(|c| c == '\n' || c == '\r');
                result.push_str(&chunk[..start]);
                result.push_str(&" ".repeat(body.len() - start));
                result.push_str(&chunk[body.len()..]);
            }
        }
    }
    result
}

/// **(internal)** One-based line number of the given byte offset.
pub(crate) fn line_of(text: &str, offset: usize) -> usize {
    text[..offset].matches('\n').count() + 1
}

/// **(internal)** Offset of the first non-whitespace character at or after `offset`.
pub(crate) fn skip_whitespace(text: &str, offset: usize) -> usize {
    let rest = &text[offset..];
    offset + (rest.len() - rest.trim_start().len())
}

pub(crate) fn bnd_error(text: &str, offset: usize, message: String) -> Error {
    Error::Parse {
        format: "bnd",
        line: line_of(text, offset),
        message,
    }
}

pub(crate) fn cfg_error(text: &str, offset: usize, message: String) -> Error {
    Error::Parse {
        format: "cfg",
        line: line_of(text, offset),
        message,
    }
}
