//! JSON and YAML renderings
//!
//! Both serialize the [`NodeSnapshot`](crate::fortran::ast::NodeSnapshot) of the subtree.

use super::registry::{FormatError, Formatter};
use crate::fortran::ast::{snapshot_from_node, Node};

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, node: &Node) -> Result<String, FormatError> {
        let mut out = serde_json::to_string_pretty(&snapshot_from_node(node))
            .map_err(|e| FormatError::SerializationError(e.to_string()))?;
        out.push('\n');
        Ok(out)
    }

    fn description(&self) -> &str {
        "Tree snapshot as pretty-printed JSON"
    }
}

pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, node: &Node) -> Result<String, FormatError> {
        serde_yaml::to_string(&snapshot_from_node(node))
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Tree snapshot as YAML"
    }
}
