//! The chorded key-binding tree.
//!
//! Bindings form a tree: a node with children is a prefix that arms the
//! chords beneath it, a node without children fires and ends the sequence.
//! The tree itself is immutable after startup; a cursor records how far
//! into a sequence the user is.

use serde::{Deserialize, Serialize};

use crate::utils::modmask_lookup::ModMask;
use crate::{Command, XKeysym};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChordNode {
    pub modifier: ModMask,
    pub key: XKeysym,
    pub command: Option<Command>,
    pub children: Vec<ChordNode>,
}

impl ChordNode {
    #[must_use]
    pub fn new(
        modifier: ModMask,
        key: XKeysym,
        command: Option<Command>,
        children: Vec<ChordNode>,
    ) -> Self {
        Self {
            modifier,
            key,
            command,
            children,
        }
    }

    /// The synthetic tree root. Its own key is never matched, only its
    /// children are.
    #[must_use]
    pub fn root(children: Vec<ChordNode>) -> Self {
        Self::new(ModMask::Zero, 0, None, children)
    }
}

/// What a keypress did to the chord walk.
#[derive(Debug, Clone, PartialEq)]
pub struct ChordOutcome {
    pub command: Option<Command>,
    /// The walk ended, either by firing a leaf or by a dead end.
    pub reset: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ChordTree {
    root: ChordNode,
    cursor: Vec<usize>,
}

impl ChordTree {
    #[must_use]
    pub fn new(root: ChordNode) -> Self {
        Self {
            root,
            cursor: Vec::new(),
        }
    }

    #[must_use]
    pub fn at_root(&self) -> bool {
        self.cursor.is_empty()
    }

    pub fn reset(&mut self) {
        self.cursor.clear();
    }

    /// The node the cursor currently points at.
    #[must_use]
    pub fn current_node(&self) -> &ChordNode {
        let mut node = &self.root;
        for &index in &self.cursor {
            node = &node.children[index];
        }
        node
    }

    /// The key combinations that are meaningful right now. These are the
    /// only keys worth grabbing on the server.
    #[must_use]
    pub fn grabs(&self) -> Vec<(ModMask, XKeysym)> {
        self.current_node()
            .children
            .iter()
            .map(|child| (child.modifier.clone(), child.key))
            .collect()
    }

    /// Advance the walk by one keypress. Matching ignores lock modifiers
    /// and takes the first declared child that fits.
    pub fn step(&mut self, modifier: &ModMask, key: XKeysym) -> ChordOutcome {
        let pressed = modifier.clone().clean();
        let index = self
            .current_node()
            .children
            .iter()
            .position(|child| child.key == key && child.modifier.clone().clean() == pressed);

        let Some(index) = index else {
            self.reset();
            return ChordOutcome {
                command: None,
                reset: true,
            };
        };

        let node = &self.current_node().children[index];
        let command = node.command.clone();
        if node.children.is_empty() {
            self.reset();
            ChordOutcome {
                command,
                reset: true,
            }
        } else {
            self.cursor.push(index);
            ChordOutcome {
                command,
                reset: false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // A small tree:
    //   a           -> Execute("st")
    //   b (prefix)  -> c: Execute("dmenu_run")
    fn tree() -> ChordTree {
        let a = ChordNode::new(
            ModMask::Control,
            0x61,
            Some(Command::Execute("st".into())),
            vec![],
        );
        let c = ChordNode::new(
            ModMask::Zero,
            0x63,
            Some(Command::Execute("dmenu_run".into())),
            vec![],
        );
        let b = ChordNode::new(ModMask::Control, 0x62, None, vec![c]);
        ChordTree::new(ChordNode::root(vec![a, b]))
    }

    #[test]
    fn completing_a_chord_fires_once_and_resets() {
        let mut chords = tree();
        let first = chords.step(&ModMask::Control, 0x62);
        assert_eq!(first.command, None);
        assert!(!first.reset);
        assert!(!chords.at_root());

        let second = chords.step(&ModMask::Zero, 0x63);
        assert_eq!(second.command, Some(Command::Execute("dmenu_run".into())));
        assert!(second.reset);
        assert!(chords.at_root());
    }

    #[test]
    fn a_dead_end_fires_nothing_and_resets() {
        let mut chords = tree();
        chords.step(&ModMask::Control, 0x62);
        // "a" is bound at the root, not under the prefix.
        let outcome = chords.step(&ModMask::Control, 0x61);
        assert_eq!(outcome.command, None);
        assert!(outcome.reset);
        assert!(chords.at_root());
    }

    #[test]
    fn lock_modifiers_do_not_break_matching() {
        let mut chords = tree();
        let outcome = chords.step(&(ModMask::Control | ModMask::NumLock), 0x61);
        assert_eq!(outcome.command, Some(Command::Execute("st".into())));
    }

    #[test]
    fn grabs_follow_the_cursor() {
        let mut chords = tree();
        assert_eq!(chords.grabs().len(), 2);
        chords.step(&ModMask::Control, 0x62);
        assert_eq!(chords.grabs(), vec![(ModMask::Zero, 0x63)]);
    }

    #[test]
    fn a_prefix_with_a_command_fires_and_descends() {
        let leaf = ChordNode::new(ModMask::Zero, 0x70, Some(Command::Banish), vec![]);
        let leader = ChordNode::new(
            ModMask::Control,
            0x74,
            Some(Command::ToggleLeader(true)),
            vec![leaf],
        );
        let mut chords = ChordTree::new(ChordNode::root(vec![leader]));
        let outcome = chords.step(&ModMask::Control, 0x74);
        assert_eq!(outcome.command, Some(Command::ToggleLeader(true)));
        assert!(!outcome.reset);
        assert!(!chords.at_root());
    }
}
