use crate::chords::ChordNode;

pub trait Config {
    /// The full binding tree, starting at the synthetic root. Only root
    /// level bindings are grabbed while no chord is in flight.
    fn chord_tree(&self) -> ChordNode;

    fn border_width(&self) -> i32;
    fn default_border_color(&self) -> &str;
    fn focused_border_color(&self) -> &str;
}

#[cfg(test)]
#[allow(clippy::module_name_repetitions)]
#[derive(Default)]
pub struct TestConfig {
    pub chords: Vec<ChordNode>,
}

#[cfg(test)]
impl Config for TestConfig {
    fn chord_tree(&self) -> ChordNode {
        ChordNode::root(self.chords.clone())
    }
    fn border_width(&self) -> i32 {
        1
    }
    fn default_border_color(&self) -> &str {
        "#444444"
    }
    fn focused_border_color(&self) -> &str {
        "#005577"
    }
}
