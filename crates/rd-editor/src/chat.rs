//! Chat command interpreter: free text → scene intent.
//!
//! A pure function over one lowercased message and the catalog. Rules
//! are tried in priority order — add, remove, list — and the first one
//! that matches wins. A rule matches when a verb keyword appears and,
//! for add/remove, a furniture target can be extracted. No verb means
//! no command: the result is `None`, never an error.
//!
//! Target extraction searches catalog names as substrings first, then
//! falls back to a fixed keyword table resolved to the first entry in
//! that category. The table carries the English keywords and the
//! Portuguese forms the voice agent emits.

use rd_core::Catalog;

/// A scene-mutating intent extracted from one chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    AddFurniture { name: String },
    RemoveFurniture { name: String },
    ListFurniture,
}

/// Interpreter output: the command plus an acknowledgement for the
/// transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpretation {
    pub command: ChatCommand,
    pub ack: String,
}

const ADD_VERBS: &[&str] = &["add", "place", "put", "adiciona", "coloca", "põe"];
const REMOVE_VERBS: &[&str] = &["remove", "delete", "apaga", "elimina"];
const LIST_VERBS: &[&str] = &["list", "show", "which", "lista", "mostra", "quais"];

const CATEGORY_KEYWORDS: &[&str] = &[
    "bed", "cama", "desk", "secretária", "lamp", "lâmpada", "vase", "jarro", "basket", "cesto",
    "mirror", "espelho", "plant", "planta", "wardrobe", "roupeiro",
];

/// Map a message to at most one command.
pub fn interpret(message: &str, catalog: &Catalog) -> Option<Interpretation> {
    let lower = message.to_lowercase();

    if contains_any(&lower, ADD_VERBS)
        && let Some(name) = extract_target(&lower, catalog)
    {
        return Some(Interpretation {
            ack: format!("Adding {name} to your project..."),
            command: ChatCommand::AddFurniture { name },
        });
    }

    if contains_any(&lower, REMOVE_VERBS)
        && let Some(name) = extract_target(&lower, catalog)
    {
        return Some(Interpretation {
            ack: format!("Removing {name} from your project..."),
            command: ChatCommand::RemoveFurniture { name },
        });
    }

    if contains_any(&lower, LIST_VERBS) {
        return Some(Interpretation {
            ack: "Listing available furniture...".to_string(),
            command: ChatCommand::ListFurniture,
        });
    }

    None
}

fn contains_any(message: &str, verbs: &[&str]) -> bool {
    verbs.iter().any(|v| message.contains(v))
}

/// Find the furniture the message talks about. Catalog names win over
/// category keywords; within each, first match wins.
fn extract_target(message: &str, catalog: &Catalog) -> Option<String> {
    for entry in catalog.iter() {
        if message.contains(&entry.name.to_lowercase()) {
            return Some(entry.name.clone());
        }
    }
    for &keyword in CATEGORY_KEYWORDS {
        if message.contains(keyword)
            && let Some(entry) = catalog.resolve_keyword(keyword)
        {
            return Some(entry.name.clone());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rd_core::{CatalogId, FurnitureEntry};

    fn entry(id: &str, name: &str, category: &str) -> FurnitureEntry {
        FurnitureEntry {
            id: CatalogId::intern(id),
            name: name.to_string(),
            category: category.to_string(),
            image_url: format!("/assets/{id}.png"),
            style: "Moderno".to_string(),
            price: None,
            brand: None,
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            entry("bed-1", "Cama RAMNEFJÄLL", "bed"),
            entry("desk-1", "Secretária ALEX", "desk"),
            entry("lamp-1", "Lâmpada FADO", "lamp"),
        ])
    }

    #[test]
    fn add_by_full_name() {
        let cat = catalog();
        let out = interpret("please add a Cama RAMNEFJÄLL by the window", &cat).unwrap();
        assert_eq!(
            out.command,
            ChatCommand::AddFurniture {
                name: "Cama RAMNEFJÄLL".to_string()
            }
        );
    }

    #[test]
    fn add_by_category_keyword() {
        let cat = catalog();
        let out = interpret("coloca uma lâmpada aqui", &cat).unwrap();
        assert_eq!(
            out.command,
            ChatCommand::AddFurniture {
                name: "Lâmpada FADO".to_string()
            }
        );
    }

    #[test]
    fn remove_by_keyword() {
        let cat = catalog();
        let out = interpret("remove a cama", &cat).unwrap();
        assert_eq!(
            out.command,
            ChatCommand::RemoveFurniture {
                name: "Cama RAMNEFJÄLL".to_string()
            }
        );
    }

    #[test]
    fn add_beats_remove() {
        let cat = catalog();
        // Both verbs present: the add rule is tried first and wins
        let out = interpret("add a bed and remove the lamp", &cat).unwrap();
        assert!(matches!(out.command, ChatCommand::AddFurniture { .. }));
    }

    #[test]
    fn list_needs_no_target() {
        let cat = catalog();
        let out = interpret("lista os móveis", &cat).unwrap();
        assert_eq!(out.command, ChatCommand::ListFurniture);
    }

    #[test]
    fn add_without_target_falls_through_to_list() {
        let cat = catalog();
        // "quais" matches the list rule after add fails to extract a target
        let out = interpret("adiciona... quais tens?", &cat).unwrap();
        assert_eq!(out.command, ChatCommand::ListFurniture);
    }

    #[test]
    fn no_verb_is_no_command() {
        let cat = catalog();
        assert!(interpret("bom dia", &cat).is_none());
        assert!(interpret("the bed is nice", &cat).is_none());
    }
}
