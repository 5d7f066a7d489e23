//! Identity provider login flow, as returned by the provider's browser API.
//!
//! Only the parts the dashboard reads are modelled; unknown fields are
//! ignored when deserializing.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{fmt, str::FromStr};

pub const GROUP_DEFAULT: &str = "default";
pub const GROUP_OIDC: &str = "oidc";
pub const GROUP_CODE: &str = "code";
pub const GROUP_PASSWORD: &str = "password";

/// Authenticator assurance level requested by a flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aal {
    Aal0,
    Aal1,
    Aal2,
    Aal3,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginFlow {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_aal: Option<Aal>,
    pub ui: UiContainer,
}

/// The form a flow asks the browser to render and submit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiContainer {
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub nodes: Vec<UiNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiNode {
    pub group: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub attributes: NodeAttributes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Input,
    Text,
    Img,
    A,
    Script,
    Div,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Text => "text",
            Self::Img => "img",
            Self::A => "a",
            Self::Script => "script",
            Self::Div => "div",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeType {
    type Err = crate::error::MemosError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "input" => Ok(Self::Input),
            "text" => Ok(Self::Text),
            "img" => Ok(Self::Img),
            "a" => Ok(Self::A),
            "script" => Ok(Self::Script),
            "div" => Ok(Self::Div),
            _ => Err(crate::error::MemosError::InvalidNodeType(s.to_string())),
        }
    }
}

/// Node attributes, tagged by `node_type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node_type", rename_all = "lowercase")]
pub enum NodeAttributes {
    Input(InputAttributes),
    Text(TextAttributes),
    Img(ImageAttributes),
    A(AnchorAttributes),
    Script(ScriptAttributes),
    Div(DivisionAttributes),
}

impl NodeAttributes {
    pub fn node_type(&self) -> NodeType {
        match self {
            Self::Input(_) => NodeType::Input,
            Self::Text(_) => NodeType::Text,
            Self::Img(_) => NodeType::Img,
            Self::A(_) => NodeType::A,
            Self::Script(_) => NodeType::Script,
            Self::Div(_) => NodeType::Div,
        }
    }

    pub fn as_input(&self) -> Option<&InputAttributes> {
        match self {
            Self::Input(input) => Some(input),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputAttributes {
    pub name: String,
    #[serde(rename = "type", default)]
    pub input_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub disabled: bool,
}

impl InputAttributes {
    /// The value, when it is a JSON string
    pub fn string_value(&self) -> Option<&str> {
        self.value.as_ref().and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UiText {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub text: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextAttributes {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub text: UiText,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageAttributes {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub src: String,
    #[serde(default)]
    pub width: i64,
    #[serde(default)]
    pub height: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnchorAttributes {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub href: String,
    #[serde(default)]
    pub title: UiText,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptAttributes {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub src: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DivisionAttributes {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
}

impl LoginFlow {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn nodes(&self) -> &[UiNode] {
        &self.ui.nodes
    }

    /// First node, in array order, accepted by `predicate`
    pub fn find_first<P>(&self, predicate: P) -> Option<&UiNode>
    where
        P: FnMut(&&UiNode) -> bool,
    {
        self.ui.nodes.iter().find(predicate)
    }
}

/// Looks up node attributes by group, name and type.
///
/// Scans the nodes in order and returns the first whose group and
/// attribute type match. Input nodes must also match `name`; for the other
/// node types `name` is not consulted.
pub fn find_node<'a>(
    flow: &'a LoginFlow,
    group: &str,
    name: &str,
    node_type: NodeType,
) -> Option<&'a NodeAttributes> {
    flow.find_first(|node| {
        node.group == group
            && node.attributes.node_type() == node_type
            && match &node.attributes {
                NodeAttributes::Input(input) => input.name == name,
                _ => true,
            }
    })
    .map(|node| &node.attributes)
}

/// String value of the first matching input node
pub fn input_value<'a>(flow: &'a LoginFlow, group: &str, name: &str) -> Option<&'a str> {
    find_node(flow, group, name, NodeType::Input)
        .and_then(NodeAttributes::as_input)
        .and_then(InputAttributes::string_value)
}
