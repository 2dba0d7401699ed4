//! Rule system for markup deserialization.

mod paste;
mod rule;

pub use paste::{paste_rules, text_rules};
pub use rule::{DeserializeFn, Filter, Rule};

use indexmap::IndexMap;

use crate::node::DomNode;

/// Collection of rules for deserialization
pub struct Rules {
    /// Custom rules added by the user (checked first)
    custom_rules: IndexMap<String, Rule>,
    /// Built-in paste rules
    paste_rules: Vec<Rule>,
    /// Line break and text rules (checked last)
    text_rules: Vec<Rule>,
}

impl Rules {
    /// Create a new Rules instance with the built-in rules
    pub fn new() -> Self {
        Self {
            custom_rules: IndexMap::new(),
            paste_rules: paste_rules(),
            text_rules: text_rules(),
        }
    }

    /// Add a custom rule; re-using a key replaces the earlier rule in place
    pub fn add(&mut self, key: &str, rule: Rule) {
        self.custom_rules.insert(key.to_string(), rule);
    }

    /// Remove a custom rule
    pub fn remove(&mut self, key: &str) -> Option<Rule> {
        self.custom_rules.shift_remove(key)
    }

    /// Find the first rule matching a node
    pub fn for_node(&self, node: &DomNode) -> Option<&Rule> {
        self.custom_rules
            .values()
            .chain(&self.paste_rules)
            .chain(&self.text_rules)
            .find(|rule| rule.filter.matches(node))
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::new()
    }
}
