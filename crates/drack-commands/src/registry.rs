//! Static table of command descriptors, built once at startup.

use crate::descriptor::{Category, CommandDescriptor};
use std::collections::HashMap;
use tracing::warn;

/// Lookup of command descriptors by name, preserving registration order.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    descriptors: Vec<CommandDescriptor>,
    by_name: HashMap<String, usize>,
}

impl CommandRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from descriptors. A later duplicate name replaces
    /// the earlier descriptor.
    pub fn from_descriptors(descriptors: impl IntoIterator<Item = CommandDescriptor>) -> Self {
        let mut registry = Self::new();
        for descriptor in descriptors {
            registry.register(descriptor);
        }
        registry
    }

    /// Registry of every command this bot ships.
    pub fn builtin() -> Self {
        Self::from_descriptors([
            crate::balance::descriptor(),
            crate::daily::descriptor(),
            crate::weekly::descriptor(),
            crate::work::descriptor(),
            crate::leaderboard::descriptor(),
            crate::inventory::descriptor(),
            crate::help::descriptor(),
            crate::ping::descriptor(),
        ])
    }

    /// Adds a descriptor.
    pub fn register(&mut self, descriptor: CommandDescriptor) {
        if let Some(&index) = self.by_name.get(&descriptor.name) {
            warn!("Command '{}' registered twice, keeping the last one", descriptor.name);
            self.descriptors[index] = descriptor;
        } else {
            self.by_name
                .insert(descriptor.name.clone(), self.descriptors.len());
            self.descriptors.push(descriptor);
        }
    }

    /// Looks up a command by name.
    pub fn resolve(&self, name: &str) -> Option<&CommandDescriptor> {
        self.by_name.get(name).map(|&index| &self.descriptors[index])
    }

    /// Descriptors in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &CommandDescriptor> {
        self.descriptors.iter()
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Commands grouped by category, categories in first-seen order.
    pub fn by_category(&self) -> Vec<(Category, Vec<&CommandDescriptor>)> {
        let mut groups: Vec<(Category, Vec<&CommandDescriptor>)> = Vec::new();
        for descriptor in &self.descriptors {
            match groups
                .iter_mut()
                .find(|(category, _)| *category == descriptor.category)
            {
                Some((_, commands)) => commands.push(descriptor),
                None => groups.push((descriptor.category, vec![descriptor])),
            }
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        let registry = CommandRegistry::from_descriptors([
            CommandDescriptor::new("daily", "Claim").cooldown(5),
            CommandDescriptor::new("ping", "Latency").cooldown(0),
        ]);

        assert_eq!(registry.resolve("daily").map(|d| d.cooldown), Some(5));
        assert_eq!(registry.resolve("ping").map(|d| d.cooldown), Some(0));
        assert!(registry.resolve("shop").is_none());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_duplicate_replaces_in_place() {
        let registry = CommandRegistry::from_descriptors([
            CommandDescriptor::new("a", "first"),
            CommandDescriptor::new("b", "second"),
            CommandDescriptor::new("a", "third"),
        ]);

        let names: Vec<_> = registry.iter().map(|d| d.description.as_str()).collect();
        assert_eq!(names, vec!["third", "second"]);
    }

    #[test]
    fn test_builtin_commands() {
        let registry = CommandRegistry::builtin();
        assert_eq!(registry.len(), 8);

        let expected = [
            ("balance", 3),
            ("daily", 5),
            ("weekly", 5),
            ("work", 5),
            ("leaderboard", 5),
            ("inventory", 3),
            ("help", 5),
            ("ping", 5),
        ];
        for (name, cooldown) in expected {
            assert_eq!(registry.resolve(name).map(|d| d.cooldown), Some(cooldown), "{name}");
        }
    }

    #[test]
    fn test_by_category() {
        let registry = CommandRegistry::builtin();
        let groups = registry.by_category();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, Category::Economy);
        assert_eq!(groups[0].1.len(), 6);
        assert_eq!(groups[1].0, Category::Utility);
        assert_eq!(groups[1].1.len(), 2);
    }
}
