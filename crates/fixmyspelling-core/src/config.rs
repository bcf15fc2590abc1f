use crate::overlay::OverlayTimings;
use crate::shortcut::ShortcutMap;

/// Client-side engine configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EngineConfig {
    pub timings: OverlayTimings,
    pub shortcuts: ShortcutMap,
}

