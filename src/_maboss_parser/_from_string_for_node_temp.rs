use crate::_maboss_parser::{bnd_error, line_of, skip_whitespace, strip_comments, NodeTemp};
use crate::{is_valid_name, Error};
use regex::Regex;

lazy_static! {
    static ref NODE_START: Regex =
        Regex::new(r"^\s*(?i:node)\s+(?P<name>[a-zA-Z0-9_]+)\s*\{").unwrap();
    static ref ATTRIBUTE: Regex =
        Regex::new(r"^\s*(?P<key>[a-zA-Z0-9_]+)\s*=\s*(?P<value>[^;{}]*);").unwrap();
    static ref NODE_END: Regex = Regex::new(r"^\s*\}").unwrap();
}

impl NodeTemp {
    /// Read all node blocks of a `.bnd` file:
    ///
    /// ```text
    /// Node <name> {
    ///     <key> = <value>;
    ///     ...
    /// }
    /// ```
    ///
    /// The `Node` keyword is case insensitive. Every block needs at least one attribute and the
    /// file needs at least one block. Attribute values are kept verbatim (trimmed); they are
    /// interpreted only when the node is built.
    ///
    /// Note that `logic` is also a legal node name, so `logic = ...;` inside the block of
    /// a node called `logic` is still the logic attribute.
    pub(crate) fn read_all(text: &str) -> Result<Vec<NodeTemp>, Error> {
        let text = strip_comments(text);
        let mut nodes = Vec::new();
        let mut offset = 0;
        while !text[offset..].trim().is_empty() {
            let start = skip_whitespace(&text, offset);
            let (node, end) = NodeTemp::read_block(&text, start)?;
            nodes.push(node);
            offset = end;
        }
        if nodes.is_empty() {
            return Err(bnd_error(&text, 0, "No node declared.".to_string()));
        }
        Ok(nodes)
    }

    /// **(internal)** Read one block starting at `offset`. Returns the node and the offset
    /// right after the closing brace.
    fn read_block(text: &str, offset: usize) -> Result<(NodeTemp, usize), Error> {
        let header = NODE_START.captures(&text[offset..]).ok_or_else(|| {
            bnd_error(text, offset, "Expected `Node <name> {`.".to_string())
        })?;
        let name = header["name"].to_string();
        if !is_valid_name(&name) {
            return Err(bnd_error(
                text,
                offset,
                format!("Invalid node name `{}`.", name),
            ));
        }
        let mut node = NodeTemp {
            name,
            line: line_of(text, offset),
            attributes: Vec::new(),
        };

        let mut position = offset + header.get(0).map_or(0, |it| it.end());
        loop {
            let rest = &text[position..];
            if let Some(end) = NODE_END.find(rest) {
                position += end.end();
                break;
            }
            let attribute = ATTRIBUTE.captures(rest).ok_or_else(|| {
                bnd_error(
                    text,
                    skip_whitespace(text, position),
                    format!(
                        "Expected `<key> = <value>;` or `}}` in node `{}`.",
                        node.name
                    ),
                )
            })?;
            let key = &attribute["key"];
            if !is_valid_name(key) {
                return Err(bnd_error(
                    text,
                    skip_whitespace(text, position),
                    format!("Invalid attribute name `{}` in node `{}`.", key, node.name),
                ));
            }
            node.set_attribute(key, attribute["value"].trim());
            position += attribute.get(0).map_or(0, |it| it.end());
        }

        if node.attributes.is_empty() {
            return Err(bnd_error(
                text,
                offset,
                format!("Node `{}` has no attributes.", node.name),
            ));
        }
        Ok((node, position))
    }

    fn set_attribute(&mut self, key: &str, value: &str) {
        if let Some(entry) = self.attributes.iter_mut().find(|(k, _)| k == key) {
            entry.1 = value.to_string();
        } else {
            self.attributes.push((key.to_string(), value.to_string()));
        }
    }

    /// **(internal)** Remove an attribute and return its value.
    pub(crate) fn take_attribute(&mut self, key: &str) -> Option<String> {
        let index = self.attributes.iter().position(|(k, _)| k == key)?;
        Some(self.attributes.remove(index).1)
    }
}

#[cfg(test)]
mod tests {
    use crate::_maboss_parser::NodeTemp;
    use crate::Error;

    fn attributes(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn read_node_blocks() {
        let bnd = "
            // p53 and its inhibitor
            Node p53 {
                logic = !Mdm2; // inhibited
                rate_up = @logic ? $u : 0;
                rate_down = @logic ? 0 : 1;
            }
            node Mdm2{logic=p53;rate_up=1;rate_down=1;max_rate = 2 ;}
        ";
        let nodes = NodeTemp::read_all(bnd).unwrap();
        assert_eq!(2, nodes.len());
        assert_eq!(
            NodeTemp {
                name: "p53".to_string(),
                line: 3,
                attributes: attributes(&[
                    ("logic", "!Mdm2"),
                    ("rate_up", "@logic ? $u : 0"),
                    ("rate_down", "@logic ? 0 : 1"),
                ]),
            },
            nodes[0]
        );
        assert_eq!("Mdm2", nodes[1].name);
        assert_eq!(8, nodes[1].line);
        assert_eq!(
            attributes(&[
                ("logic", "p53"),
                ("rate_up", "1"),
                ("rate_down", "1"),
                ("max_rate", "2"),
            ]),
            nodes[1].attributes
        );
    }

    #[test]
    fn multiline_values_and_repeated_keys() {
        let bnd = "Node A {\n logic = B\n   & C;\n logic = B;\n rate_up = 1;\n}";
        let mut nodes = NodeTemp::read_all(bnd).unwrap();
        assert_eq!(Some("B".to_string()), nodes[0].take_attribute("logic"));
        assert_eq!(None, nodes[0].take_attribute("logic"));

        let bnd = "Node A {\n logic = B\n   & C;\n rate_up = 1;\n}";
        let mut nodes = NodeTemp::read_all(bnd).unwrap();
        assert_eq!(Some("B\n   & C".to_string()), nodes[0].take_attribute("logic"));
    }

    #[test]
    fn read_invalid_bnd() {
        let invalid = [
            ("", 1),
            ("// nothing here", 1),
            ("Node A {}", 1),
            ("Node A { logic = B; ", 1),
            ("Node A {\n logic = B\n}", 2),
            ("Node A {\n logic = B;\n}\nNode 1B { logic = A; }", 4),
            ("Node A {\n AND = 1;\n}", 2),
            ("Node A {\n logic = B;\n}\nfoo", 4),
            ("NodeA { logic = B; }", 1),
        ];
        for (bnd, line) in invalid.iter() {
            match NodeTemp::read_all(bnd) {
                Err(Error::Parse { format, line: l, .. }) => {
                    assert_eq!("bnd", format, "{}", bnd);
                    assert_eq!(*line, l, "{}", bnd);
                }
                other => panic!("Unexpected result {:?} for {:?}", other, bnd),
            }
        }
    }
}
