mod default;

use std::collections::HashMap;

use hexe_messages::{keyevents_to_string, try_parse_keyevents, KeyEvent};
use strum::IntoEnumIterator;

use super::{config::Mapping, window::Mode};
use crate::actions::{self, Action};

/// Key bindings of every mode
#[derive(Debug, Clone)]
pub(crate) struct Keymaps {
    maps: HashMap<Mode, Keymap>,
}

impl Keymaps {
    /// Keymaps with the default bindings of each mode
    pub fn new() -> Keymaps {
        let mut keymaps = Keymaps {
            maps: HashMap::new(),
        };

        for mode in Mode::iter() {
            for (key, action) in default::mappings(mode) {
                if let Err(e) = keymaps.bind_by_name(mode, key, action) {
                    log::error!("Invalid default binding in {mode}: {e}");
                }
            }
        }

        keymaps
    }

    /// Apply configured bindings on top of the current ones. Invalid
    /// bindings are skipped and reported in the returned errors.
    pub fn configure(&mut self, keymap: &HashMap<String, Vec<Mapping>>) -> Vec<String> {
        let mut errors = vec![];

        for (name, mappings) in keymap {
            let mode = match name.parse::<Mode>() {
                Ok(mode) => mode,
                Err(_) => {
                    errors.push(format!("Unknown mode '{}' in keymap", name));
                    continue;
                }
            };

            for mapping in mappings {
                if let Err(e) = self.bind_by_name(mode, &mapping.key, &mapping.action) {
                    errors.push(e);
                }
            }
        }

        errors
    }

    fn bind_by_name(&mut self, mode: Mode, key: &str, action: &str) -> Result<(), String> {
        let events = try_parse_keyevents(key).map_err(|e| e.to_string())?;
        let action =
            actions::find_by_name(action).ok_or_else(|| format!("Unknown action '{}'", action))?;
        self.bind(mode, &events, action);
        Ok(())
    }

    pub fn bind(&mut self, mode: Mode, events: &[KeyEvent], action: Action) {
        log::debug!(
            "bind {}: {}, \t{}",
            mode,
            keyevents_to_string(events),
            action.name()
        );
        self.maps.entry(mode).or_default().bind(events, action);
    }

    pub fn get(&self, mode: Mode, events: &[KeyEvent]) -> KeymapResult {
        match self.maps.get(&mode) {
            Some(map) => map.get(events),
            None => KeymapResult::NotFound,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Keymap {
    root: KeyTrie,
}

impl Keymap {
    /// Get a binding result for events.
    /// The result may be
    /// Matched => found a binding for events and its action
    /// NotFound => no binding for key combination
    /// Pending => need more input to decide
    pub fn get(&self, events: &[KeyEvent]) -> KeymapResult {
        self.root.get(events)
    }

    /// Create a new binding for key combination events.
    pub fn bind(&mut self, events: &[KeyEvent], action: Action) {
        self.root.bind(events, action);
    }
}

#[derive(Debug)]
pub(crate) enum KeymapResult {
    Matched(Action),
    Pending,
    NotFound,
}

#[derive(Debug, Clone)]
struct KeyTrie {
    root: KeyTrieNode,
}

impl KeyTrie {
    fn get(&self, events: &[KeyEvent]) -> KeymapResult {
        self.root.get(events)
    }

    fn bind(&mut self, events: &[KeyEvent], action: Action) {
        self.root.bind(events, action);
    }
}

impl Default for KeyTrie {
    fn default() -> Self {
        KeyTrie {
            root: KeyTrieNode::Node {
                map: HashMap::new(),
            },
        }
    }
}

#[derive(Debug, Clone)]
enum KeyTrieNode {
    Leaf { action: Action },
    Node { map: HashMap<KeyEvent, KeyTrieNode> },
}

impl KeyTrieNode {
    fn bind(&mut self, events: &[KeyEvent], new_action: Action) {
        use KeyTrieNode::*;

        let Some(event) = events.first() else {
            // There is no more key events.
            *self = Leaf { action: new_action };
            return;
        };

        if let Leaf { .. } = self {
            *self = Node {
                map: HashMap::new(),
            };
        }

        if let Node { map } = self {
            map.entry(*event)
                .or_insert_with(|| Node {
                    map: HashMap::new(),
                })
                .bind(&events[1..], new_action);
        }
    }

    fn get(&self, events: &[KeyEvent]) -> KeymapResult {
        match self {
            KeyTrieNode::Leaf { action } => {
                if events.is_empty() {
                    return KeymapResult::Matched(*action);
                }

                KeymapResult::NotFound
            }
            KeyTrieNode::Node { map } => {
                if events.is_empty() && !map.is_empty() {
                    return KeymapResult::Pending;
                }

                if events.is_empty() {
                    return KeymapResult::NotFound;
                }

                if let Some(node) = map.get(&events[0]) {
                    return node.get(&events[1..]);
                }

                KeymapResult::NotFound
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn keys(string: &str) -> Vec<KeyEvent> {
        try_parse_keyevents(string).unwrap()
    }

    fn matched(result: KeymapResult) -> &'static str {
        match result {
            KeymapResult::Matched(action) => action.name(),
            KeymapResult::Pending => "<pending>",
            KeymapResult::NotFound => "<not found>",
        }
    }

    #[test]
    fn defaults_resolve() {
        for mode in Mode::iter() {
            for (key, action) in default::mappings(mode) {
                assert!(try_parse_keyevents(key).is_ok(), "{key}");
                assert!(actions::find_by_name(action).is_some(), "{action}");
            }
        }

        let keymaps = Keymaps::new();
        assert_eq!("undo", matched(keymaps.get(Mode::Normal, &keys("u"))));
        assert_eq!(
            "prompt_confirm",
            matched(keymaps.get(Mode::Command, &keys("enter")))
        );
        assert_eq!("<not found>", matched(keymaps.get(Mode::Insert, &keys("u"))));
    }

    #[test]
    fn sequences() {
        let mut keymaps = Keymaps::new();
        keymaps
            .bind_by_name(Mode::Normal, "space s", "save")
            .unwrap();

        assert_eq!("<pending>", matched(keymaps.get(Mode::Normal, &keys("space"))));
        assert_eq!("save", matched(keymaps.get(Mode::Normal, &keys("space s"))));
        assert_eq!(
            "<not found>",
            matched(keymaps.get(Mode::Normal, &keys("space x")))
        );

        // Rebinding a prefix replaces the sequence
        keymaps.bind_by_name(Mode::Normal, "space", "quit").unwrap();
        assert_eq!("quit", matched(keymaps.get(Mode::Normal, &keys("space"))));
    }

    #[test]
    fn configure_overrides() {
        let mut keymaps = Keymaps::new();
        let mut config = HashMap::new();
        config.insert(
            "normal".to_string(),
            vec![
                Mapping {
                    key: "x".into(),
                    action: "undo".into(),
                },
                Mapping {
                    key: "ctrl+nothing".into(),
                    action: "undo".into(),
                },
                Mapping {
                    key: "q".into(),
                    action: "no_such_action".into(),
                },
            ],
        );
        config.insert("visual".to_string(), vec![]);

        let errors = keymaps.configure(&config);
        assert_eq!(3, errors.len());
        assert_eq!("undo", matched(keymaps.get(Mode::Normal, &keys("x"))));
    }
}
