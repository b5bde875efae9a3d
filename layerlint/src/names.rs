// Collection of every module name the build layers refer to

use layerlint_config::Module;
use std::collections::HashSet;

/// Insertion-ordered set of module names, unique by exact string equality
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleNameSet {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl ModuleNameSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `name` unless already present; returns whether it was added
    pub fn insert(&mut self, name: &str) -> bool {
        if self.seen.contains(name) {
            return false;
        }
        self.seen.insert(name.to_string());
        self.order.push(name.to_string());
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Names in first-occurrence order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.order
    }
}

impl<'a> FromIterator<&'a str> for ModuleNameSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = Self::new();
        for name in iter {
            set.insert(name);
        }
        set
    }
}

impl<'a> IntoIterator for &'a ModuleNameSet {
    type Item = &'a str;
    type IntoIter = std::iter::Map<std::slice::Iter<'a, String>, fn(&'a String) -> &'a str>;

    fn into_iter(self) -> Self::IntoIter {
        self.order.iter().map(String::as_str as fn(&'a String) -> &'a str)
    }
}

/// Gather each layer's name, includes and excludes, in layer order
pub fn collect_names(modules: &[Module]) -> ModuleNameSet {
    modules.iter().flat_map(|m| m.referenced_names()).collect()
}
