use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `spec` value of a v2 card.
pub const SPEC_V2: &str = "chara_card_v2";
/// `spec` value of a v3 card.
pub const SPEC_V3: &str = "chara_card_v3";

/// A character card document.
///
/// Models the fields v2 and v3 cards share. Missing fields take their default,
/// so partially filled cards from other editors still load.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct CharacterCard {
    #[serde(default = "default_spec")]
    pub spec: String,
    #[serde(default = "default_spec_version")]
    pub spec_version: String,
    #[serde(default)]
    pub data: CharacterData,
}

fn default_spec() -> String {
    SPEC_V2.into()
}

fn default_spec_version() -> String {
    "2.0".into()
}

impl Default for CharacterCard {
    #[inline]
    fn default() -> Self {
        Self {
            spec: default_spec(),
            spec_version: default_spec_version(),
            data: CharacterData::default(),
        }
    }
}

impl CharacterCard {
    /// Returns `true` if `spec` names a v3 card.
    #[inline]
    pub fn is_v3(&self) -> bool {
        self.spec == SPEC_V3
    }
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterData {
    pub name: String,
    pub description: String,
    pub personality: String,
    pub scenario: String,
    pub first_mes: String,
    pub mes_example: String,
    pub creator_notes: String,
    pub system_prompt: String,
    pub post_history_instructions: String,
    pub alternate_greetings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character_book: Option<CharacterBook>,
    pub tags: Vec<String>,
    pub creator: String,
    pub character_version: String,
    pub extensions: Map<String, Value>,
}

/// Lorebook entries scanned against the chat history.
#[derive(Clone, Eq, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterBook {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_depth: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_budget: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recursive_scanning: Option<bool>,
    pub extensions: Map<String, Value>,
    pub entries: Vec<CharacterBookEntry>,
}

#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterBookEntry {
    pub keys: Vec<String>,
    pub content: String,
    pub extensions: Map<String, Value>,
    pub enabled: bool,
    /// Lower values are inserted higher in the prompt.
    pub insertion_order: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_sensitive: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Lower values are discarded first once the token budget is reached.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Requires a match from both `keys` and `secondary_keys`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selective: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_keys: Option<Vec<String>>,
    /// Always inserted, within the budget.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constant: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<EntryPosition>,
}

impl Default for CharacterBookEntry {
    #[inline]
    fn default() -> Self {
        Self {
            keys: Vec::new(),
            content: String::new(),
            extensions: Map::new(),
            enabled: true,
            insertion_order: 0,
            case_sensitive: None,
            name: None,
            priority: None,
            id: None,
            comment: None,
            selective: None,
            secondary_keys: None,
            constant: None,
            position: None,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryPosition {
    BeforeChar,
    AfterChar,
}
