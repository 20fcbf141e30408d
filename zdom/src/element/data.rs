use std::collections::HashMap;

use super::NodeId;

#[derive(Debug, Clone, Default)]
pub(crate) struct ElementData {
    pub tag: String,
    pub classes: Vec<String>,
    pub attrs: HashMap<String, String>,
    pub text: String,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Default::default()
        }
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.classes.iter().any(|c| c == name)
    }

    /// Returns true if the class was added.
    pub fn add_class(&mut self, name: &str) -> bool {
        if name.is_empty() || self.has_class(name) {
            return false;
        }
        self.classes.push(name.to_string());
        true
    }

    /// Returns true if the class was present.
    pub fn remove_class(&mut self, name: &str) -> bool {
        let before = self.classes.len();
        self.classes.retain(|c| c != name);
        self.classes.len() != before
    }
}
