use crate::utils::xkeysym_lookup;
use anyhow::{ensure, Context, Result};
use chordwm_core::utils::modmask_lookup::{self, ModMask};
use chordwm_core::{ChordNode, Command};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The command names as they appear in `config.toml`. Arguments ride in
/// the binding's `value` field and are validated on conversion.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum BaseCommand {
    ToggleLeader,
    Execute,
    Banish,
    CloseWindow,
    ForceCloseWindow,
    ToggleFullScreen,
    FocusLast,
    Quit,
}

/// One binding in the config file. A binding with `children` is a chord
/// prefix; it may still carry a command of its own, which fires when the
/// prefix is pressed.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Keybind {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<BaseCommand>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifier: Option<Modifier>,
    pub key: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Keybind>,
}

impl Keybind {
    /// Resolve names to keysyms and masks and validate command arguments,
    /// recursively for the whole subtree.
    pub fn try_into_chord_node(&self) -> Result<ChordNode> {
        let key = xkeysym_lookup::into_keysym(&self.key)
            .with_context(|| format!("'{}' is not a valid key name", self.key))?;

        let modifier = match &self.modifier {
            Some(modifier) => {
                for name in modifier {
                    ensure!(
                        modmask_lookup::into_mod(&name) != ModMask::Zero,
                        "'{}' is not a valid modifier name",
                        name
                    );
                }
                let names: Vec<String> = modifier.clone().into();
                modmask_lookup::into_modmask(&names)
            }
            None => ModMask::Zero,
        };

        let command = match &self.command {
            Some(command) => Some(self.parse_command(command)?),
            None => None,
        };
        ensure!(
            command.is_some() || !self.children.is_empty(),
            "a binding needs a command, children, or both"
        );

        let children = self
            .children
            .iter()
            .map(Keybind::try_into_chord_node)
            .collect::<Result<Vec<ChordNode>>>()?;

        Ok(ChordNode::new(modifier, key, command, children))
    }

    fn parse_command(&self, command: &BaseCommand) -> Result<Command> {
        let command = match command {
            BaseCommand::Execute => {
                ensure!(!self.value.is_empty(), "value must not be empty for Execute");
                Command::Execute(self.value.clone())
            }
            BaseCommand::ToggleLeader => Command::ToggleLeader(
                bool::from_str(&self.value).context("invalid boolean value for ToggleLeader")?,
            ),
            BaseCommand::Banish => Command::Banish,
            BaseCommand::CloseWindow => Command::CloseWindow,
            BaseCommand::ForceCloseWindow => Command::ForceCloseWindow,
            BaseCommand::ToggleFullScreen => Command::ToggleFullScreen,
            BaseCommand::FocusLast => Command::FocusLast,
            BaseCommand::Quit => Command::Quit,
        };
        Ok(command)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Hash, Eq, PartialEq)]
#[serde(untagged)]
pub enum Modifier {
    Single(String),
    List(Vec<String>),
}

impl Modifier {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Modifier::Single(single) => single.is_empty(),
            Modifier::List(list) => list.is_empty(),
        }
    }
}

impl std::convert::From<Modifier> for Vec<String> {
    fn from(m: Modifier) -> Self {
        match m {
            Modifier::Single(modifier) => vec![modifier],
            Modifier::List(modifiers) => modifiers,
        }
    }
}

impl IntoIterator for &Modifier {
    type Item = String;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        let ms = match self {
            Modifier::Single(m) => vec![m.clone()],
            Modifier::List(ms) => ms.clone(),
        };
        ms.into_iter()
    }
}

impl std::convert::From<&str> for Modifier {
    fn from(m: &str) -> Self {
        Self::Single(m.to_owned())
    }
}

impl std::fmt::Display for Modifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single(modifier) => write!(f, "{}", modifier),
            Self::List(modifiers) => write!(f, "{}", modifiers.join("+")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bind(command: Option<BaseCommand>, value: &str, key: &str) -> Keybind {
        Keybind {
            command,
            value: value.to_owned(),
            modifier: None,
            key: key.to_owned(),
            children: Vec::new(),
        }
    }

    #[test]
    fn a_leaf_binding_converts() {
        let kb = Keybind {
            modifier: Some("Control".into()),
            ..bind(Some(BaseCommand::Execute), "st", "c")
        };
        let node = kb.try_into_chord_node().unwrap();
        assert_eq!(node.key, x11_dl::keysym::XK_c);
        assert_eq!(node.modifier, ModMask::Control);
        assert_eq!(node.command, Some(Command::Execute("st".into())));
        assert!(node.children.is_empty());
    }

    #[test]
    fn an_unknown_key_is_an_error() {
        let kb = bind(Some(BaseCommand::Banish), "", "NotAKey");
        assert!(kb.try_into_chord_node().is_err());
    }

    #[test]
    fn an_unknown_modifier_is_an_error() {
        let kb = Keybind {
            modifier: Some("Hyper".into()),
            ..bind(Some(BaseCommand::Banish), "", "b")
        };
        assert!(kb.try_into_chord_node().is_err());
    }

    #[test]
    fn execute_without_a_value_is_an_error() {
        let kb = bind(Some(BaseCommand::Execute), "", "p");
        assert!(kb.try_into_chord_node().is_err());
    }

    #[test]
    fn a_binding_with_nothing_to_do_is_an_error() {
        let kb = bind(None, "", "t");
        assert!(kb.try_into_chord_node().is_err());
    }

    #[test]
    fn a_prefix_converts_recursively() {
        let kb = Keybind {
            children: vec![bind(Some(BaseCommand::Banish), "", "b")],
            ..bind(Some(BaseCommand::ToggleLeader), "true", "t")
        };
        let node = kb.try_into_chord_node().unwrap();
        assert_eq!(node.command, Some(Command::ToggleLeader(true)));
        assert_eq!(node.children.len(), 1);
        assert_eq!(node.children[0].command, Some(Command::Banish));
    }

    #[test]
    fn a_bad_child_poisons_the_prefix() {
        let kb = Keybind {
            children: vec![bind(Some(BaseCommand::Execute), "", "p")],
            ..bind(None, "", "t")
        };
        assert!(kb.try_into_chord_node().is_err());
    }
}
