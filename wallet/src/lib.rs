use bevy::prelude::*;
use std::collections::HashSet;

/// Keys the player has picked up, used to gate doors and puzzles.
///
/// Every operation reports whether it did anything so callers can emit a
/// `KeyWalletAction` notification either way.
#[derive(Component, Reflect, Default, Debug, Clone)]
#[reflect(Component, Default)]
pub struct KeyWallet {
    keys: HashSet<String>,
}

impl KeyWallet {
    /// Returns `false` if the key was already held.
    pub fn add(&mut self, key: &str) -> bool {
        self.keys.insert(key.to_string())
    }

    /// Returns `false` if the key was not held.
    pub fn remove(&mut self, key: &str) -> bool {
        self.keys.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// All keys, sorted, each followed by a comma: `"blue,red,"`.
    /// An empty wallet gives an empty string.
    pub fn listing(&self) -> String {
        let mut keys: Vec<&str> = self.keys.iter().map(String::as_str).collect();
        keys.sort_unstable();
        keys.iter().map(|key| format!("{key},")).collect()
    }
}

pub struct WalletPlugin;

impl Plugin for WalletPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<KeyWallet>();
    }
}
