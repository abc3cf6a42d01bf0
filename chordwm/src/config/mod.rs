//! `chordwm` general configuration

mod default;
mod keybind;

pub use self::keybind::{BaseCommand, Keybind, Modifier};

use anyhow::Result;
use chordwm_core::ChordNode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::fs::File;
use std::io::prelude::*;
use std::path::Path;
use xdg::BaseDirectories;

/// General configuration
#[derive(Serialize, Deserialize, Debug)]
#[serde(default)]
pub struct Config {
    pub border_width: i32,
    pub default_border_color: String,
    pub focused_border_color: String,
    pub keybind: Vec<Keybind>,
}

#[must_use]
pub fn load() -> Config {
    load_from_file()
        .map_err(|err| eprintln!("ERROR LOADING CONFIG: {:?}", err))
        .unwrap_or_default()
}

/// # Errors
///
/// Errors if `BaseDirectories` doesn't exist, if the user doesn't have
/// permission to place config.toml, if config.toml cannot be read (access
/// rights, malformed file, etc.), or if the default config.toml cannot be
/// written out on first run.
fn load_from_file() -> Result<Config> {
    let path = BaseDirectories::with_prefix("chordwm")?;
    let config_filename = path.place_config_file("config.toml")?;
    if Path::new(&config_filename).exists() {
        let contents = fs::read_to_string(config_filename)?;
        Ok(toml::from_str(&contents)?)
    } else {
        let config = Config::default();
        let toml = toml::to_string(&config)?;
        let mut file = File::create(&config_filename)?;
        file.write_all(toml.as_bytes())?;
        Ok(config)
    }
}

impl chordwm_core::config::Config for Config {
    fn chord_tree(&self) -> ChordNode {
        // An invalid binding disables itself, never the whole config.
        let children = self
            .keybind
            .iter()
            .filter_map(|keybind| match keybind.try_into_chord_node() {
                Ok(node) => Some(node),
                Err(err) => {
                    tracing::warn!("invalid keybind on '{}': {:?}", keybind.key, err);
                    None
                }
            })
            .collect();
        ChordNode::root(children)
    }

    fn border_width(&self) -> i32 {
        self.border_width
    }

    fn default_border_color(&self) -> &str {
        &self.default_border_color
    }

    fn focused_border_color(&self) -> &str {
        &self.focused_border_color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chordwm_core::config::Config as _;
    use chordwm_core::Command;

    #[test]
    fn the_default_config_builds_a_full_tree() {
        let config = Config::default();
        let tree = config.chord_tree();

        // One root binding: the leader prefix.
        assert_eq!(tree.children.len(), 1);
        let leader = &tree.children[0];
        assert_eq!(leader.key, x11_dl::keysym::XK_t);
        assert_eq!(leader.command, Some(Command::ToggleLeader(true)));
        assert!(!leader.children.is_empty());

        // Every chord under the leader converted.
        assert_eq!(leader.children.len(), config.keybind[0].children.len());
    }

    #[test]
    fn the_default_config_survives_a_toml_round_trip() {
        let config = Config::default();
        let serialized = toml::to_string(&config).unwrap();
        let reloaded: Config = toml::from_str(&serialized).unwrap();

        assert_eq!(reloaded.border_width, config.border_width);
        assert_eq!(reloaded.keybind.len(), config.keybind.len());
        assert_eq!(
            reloaded.keybind[0].children.len(),
            config.keybind[0].children.len()
        );
    }

    #[test]
    fn an_invalid_binding_is_dropped_not_fatal() {
        let mut config = Config::default();
        config.keybind.push(Keybind {
            command: Some(BaseCommand::Banish),
            value: String::new(),
            modifier: None,
            key: "NotAKey".to_owned(),
            children: Vec::new(),
        });

        let tree = config.chord_tree();
        assert_eq!(tree.children.len(), 1);
    }

    #[test]
    fn nested_bindings_parse_from_toml() {
        let raw = r#"
            border_width = 2

            [[keybind]]
            modifier = "Control"
            key = "t"
            command = "ToggleLeader"
            value = "true"

            [[keybind.children]]
            key = "p"
            command = "Execute"
            value = "dmenu_run"

            [[keybind.children]]
            modifier = ["Control"]
            key = "g"
            command = "ToggleLeader"
            value = "false"
        "#;
        let config: Config = toml::from_str(raw).unwrap();
        assert_eq!(config.border_width, 2);
        assert_eq!(config.keybind.len(), 1);
        assert_eq!(config.keybind[0].children.len(), 2);

        let tree = config.chord_tree();
        let leader = &tree.children[0];
        assert_eq!(
            leader.children[0].command,
            Some(Command::Execute("dmenu_run".into()))
        );
        assert_eq!(
            leader.children[1].command,
            Some(Command::ToggleLeader(false))
        );
    }
}
