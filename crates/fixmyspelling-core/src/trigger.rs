//! Trigger messages between the background worker and the content script,
//! plus the context-menu and command tables that produce them.

use serde::{Deserialize, Serialize};

use crate::types::CorrectionMode;

/// `{ action: "fixSpelling" | "improveWriting" }`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TriggerAction {
    FixSpelling,
    ImproveWriting,
}

impl TriggerAction {
    pub fn mode(self) -> CorrectionMode {
        match self {
            TriggerAction::FixSpelling => CorrectionMode::Spelling,
            TriggerAction::ImproveWriting => CorrectionMode::Improve,
        }
    }
}

impl From<CorrectionMode> for TriggerAction {
    fn from(mode: CorrectionMode) -> Self {
        match mode {
            CorrectionMode::Spelling => TriggerAction::FixSpelling,
            CorrectionMode::Improve => TriggerAction::ImproveWriting,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerMessage {
    pub action: TriggerAction,
}

impl TriggerMessage {
    pub fn new(action: TriggerAction) -> Self {
        Self { action }
    }
}

/// `{ success: boolean, error?: string }`, answered synchronously.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TriggerResponse {
    /// Success only says that a focused editable surface existed.
    pub fn for_target(found: bool) -> Self {
        if found {
            Self {
                success: true,
                error: None,
            }
        } else {
            Self {
                success: false,
                error: Some("No editable element focused".to_string()),
            }
        }
    }
}

/// One context-menu entry registered by the background worker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuItem {
    pub id: &'static str,
    pub title: &'static str,
    pub action: TriggerAction,
}

/// Context-menu entries, shown on editable contexts only.
pub const MENU_ITEMS: &[MenuItem] = &[
    MenuItem {
        id: "fix-my-spelling",
        title: "Fix My Spelling",
        action: TriggerAction::FixSpelling,
    },
    MenuItem {
        id: "improve-my-writing",
        title: "Improve My Writing",
        action: TriggerAction::ImproveWriting,
    },
];

/// Extension command names as declared in the manifest.
pub const COMMANDS: &[(&str, TriggerAction)] = &[
    ("fix-spelling", TriggerAction::FixSpelling),
    ("improve-writing", TriggerAction::ImproveWriting),
];

pub fn action_for_menu_item(id: &str) -> Option<TriggerAction> {
    MENU_ITEMS.iter().find(|item| item.id == id).map(|item| item.action)
}

pub fn action_for_command(command: &str) -> Option<TriggerAction> {
    COMMANDS
        .iter()
        .find(|(name, _)| *name == command)
        .map(|(_, action)| *action)
}
