use super::keybind::{BaseCommand, Keybind};
use super::Config;
use std::env;
use std::fs;

impl Default for Config {
    fn default() -> Self {
        // The classic leader setup: Control+t arms the chords, Control+g
        // backs out again.
        let leader_children = vec![
            leaf(BaseCommand::Execute, "dmenu_run", "p"),
            leaf(BaseCommand::Execute, default_terminal(), "c"),
            leaf(BaseCommand::Banish, "", "b"),
            leaf(BaseCommand::ToggleFullScreen, "", "f"),
            leaf(BaseCommand::FocusLast, "", "o"),
            leaf(BaseCommand::CloseWindow, "", "k"),
            Keybind {
                modifier: Some("Shift".into()),
                ..leaf(BaseCommand::ForceCloseWindow, "", "k")
            },
            Keybind {
                modifier: Some("Control".into()),
                ..leaf(BaseCommand::Quit, "", "q")
            },
            Keybind {
                modifier: Some("Control".into()),
                ..leaf(BaseCommand::ToggleLeader, "false", "g")
            },
        ];

        let leader = Keybind {
            command: Some(BaseCommand::ToggleLeader),
            value: "true".to_owned(),
            modifier: Some("Control".into()),
            key: "t".to_owned(),
            children: leader_children,
        };

        Self {
            border_width: 1,
            default_border_color: "#444444".to_owned(),
            focused_border_color: "#005577".to_owned(),
            keybind: vec![leader],
        }
    }
}

fn leaf(command: BaseCommand, value: &str, key: &str) -> Keybind {
    Keybind {
        command: Some(command),
        value: value.to_owned(),
        modifier: None,
        key: key.to_owned(),
        children: Vec::new(),
    }
}

/// Returns a terminal for the default leader+c binding.
fn default_terminal<'s>() -> &'s str {
    // order from least common to most common.
    // the thinking is if a machine has an uncommon terminal installed, it is intentional
    let terms = &[
        "alacritty",
        "termite",
        "kitty",
        "urxvt",
        "rxvt",
        "st",
        "roxterm",
        "eterm",
        "xterm",
        "terminator",
        "terminology",
        "gnome-terminal",
        "xfce4-terminal",
        "konsole",
        "uxterm",
        "guake",
    ];

    for term in terms {
        if is_program_in_path(term) {
            return term;
        }
    }

    "termite"
}

#[must_use]
fn is_program_in_path(program: &str) -> bool {
    if let Ok(path) = env::var("PATH") {
        for p in path.split(':') {
            let p_str = format!("{}/{}", p, program);
            if fs::metadata(p_str).is_ok() {
                return true;
            }
        }
    }
    false
}
