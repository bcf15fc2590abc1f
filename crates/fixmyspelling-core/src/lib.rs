//! fixmyspelling-core: correction engine logic without DOM dependencies.
//!
//! This crate provides:
//! - `TextSurface` trait over plain fields and rich regions, with the
//!   write-back strategy chain in [`replace`]
//! - `CorrectionSession` - busy guard, captured request and overlay state
//! - `CorrectionEngine<P>` - async orchestration generic over a [`Platform`]
//! - Wire types for the correction service and the extension messages

pub mod api;
pub mod config;
pub mod endpoint;
pub mod engine;
pub mod error;
pub mod overlay;
pub mod platform;
pub mod replace;
pub mod session;
pub mod settings;
pub mod shortcut;
pub mod surface;
pub mod trigger;
pub mod types;

pub use api::{CorrectionBody, CorrectionService, HttpCorrectionService, ImproveReply, SpellingReply};
pub use config::EngineConfig;
pub use endpoint::{ENDPOINT_KEY, EndpointCache, EndpointStore, derive_endpoint};
pub use engine::{CorrectionEngine, EngineParts, WeakCorrectionEngine};
pub use error::{CorrectionError, PlatformError, ServiceError, SettingsError};
pub use overlay::{OverlayAction, OverlayState, OverlayTimings, Placement, place_overlay};
pub use platform::{ClipboardPlatform, OverlayView, Platform, Scheduler};
pub use replace::{PlainFieldOps, RichRegionOps, WriteReport, WriteStrategy, write_plain, write_rich};
pub use session::{CorrectionSession, SkipReason};
pub use shortcut::{KeyChord, Shortcut, ShortcutMap};
pub use surface::{ElementNode, ElementTraits, TextSurface, classify, resolve_editable};
pub use trigger::{TriggerAction, TriggerMessage, TriggerResponse};
pub use types::{
    CorrectionMode, CorrectionOutcome, CorrectionRequest, Rect, RequestId, SelectionSpan,
    SurfaceKind, TextRange, Viewport,
};
