//! Selection & replacement engine.
//!
//! Writing into a plain field is a value splice followed by an `input`
//! notification. Writing into a rich region goes through an ordered list of
//! strategies, each allowed to fail, followed by notifications that are sent
//! no matter which strategy (if any) took effect:
//!
//! 1. focus the region; select all of it, or replay the captured range
//! 2. native `insertText` editing command
//! 3. manual range edit: delete contents, insert a text node, collapse after it
//! 4. `input` + `change` notifications
//! 5. deferred blur/refocus
//!
//! The native command comes first because host frameworks observe it; the
//! manual edit updates the DOM without their change detection seeing it.

use crate::error::PlatformError;
use crate::surface::splice_utf16;
use crate::types::{SelectionSpan, TextRange};

/// Which write strategy took effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteStrategy {
    /// Value assignment on a native field.
    FieldValue,
    /// The platform's native `insertText` editing command.
    NativeInsert,
    /// Manual range manipulation.
    ManualRange,
}

/// Strategies tried on rich regions, in order.
pub const RICH_STRATEGIES: [WriteStrategy; 2] =
    [WriteStrategy::NativeInsert, WriteStrategy::ManualRange];

/// What happened during a write.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WriteReport {
    /// The strategy that succeeded, if any did.
    pub applied: Option<WriteStrategy>,
    /// Failures encountered along the way (non-fatal).
    pub failures: Vec<PlatformError>,
}

impl WriteReport {
    pub fn succeeded(&self) -> bool {
        self.applied.is_some()
    }
}

/// Primitive operations on a native text control.
pub trait PlainFieldOps {
    fn value(&self) -> String;
    fn set_value(&self, value: &str);
    /// Fire a bubbling `input` event.
    fn notify_input(&self);
}

/// Primitive operations on a rich editable region.
pub trait RichRegionOps {
    fn focus(&self);
    /// Select the region's entire content.
    fn select_contents(&self) -> Result<(), PlatformError>;
    /// Select a previously captured range of the region's text.
    fn select_range(&self, range: TextRange) -> Result<(), PlatformError>;
    /// Run the native "insert text" editing command. Returns false if the
    /// command is unavailable or did nothing.
    fn insert_text_command(&self, text: &str) -> bool;
    /// Delete the current range, insert a text node, collapse after it.
    fn replace_range_manually(&self, text: &str) -> Result<(), PlatformError>;
    /// Fire an `insertText` input event describing a manual edit.
    fn notify_insert(&self, text: &str);
    /// Fire bubbling `input` and `change` events.
    fn notify_changed(&self);
    /// Blur then refocus on the next turn of the event loop.
    fn refocus_later(&self);
}

/// Write into a plain field.
///
/// With a captured range only `[start, end)` is replaced; otherwise the
/// whole value is.
pub fn write_plain<F: PlainFieldOps>(field: &F, text: &str, span: &SelectionSpan) -> WriteReport {
    let value = match span.range {
        Some(range) => splice_utf16(&field.value(), range, text),
        None => text.to_string(),
    };
    field.set_value(&value);
    field.notify_input();
    WriteReport {
        applied: Some(WriteStrategy::FieldValue),
        failures: Vec::new(),
    }
}

/// Write into a rich region through the strategy chain.
pub fn write_rich<R: RichRegionOps>(region: &R, text: &str, span: &SelectionSpan) -> WriteReport {
    let mut report = WriteReport::default();

    region.focus();
    let prepared = match span.range {
        Some(range) => region.select_range(range),
        None => region.select_contents(),
    };
    if let Err(err) = prepared {
        tracing::debug!(target: "fixmyspelling::surface", %err, "could not prepare selection");
        report.failures.push(err);
    }

    for strategy in RICH_STRATEGIES {
        let attempt = match strategy {
            WriteStrategy::NativeInsert => {
                if region.insert_text_command(text) {
                    Ok(())
                } else {
                    Err(PlatformError::from("insertText command unavailable"))
                }
            }
            WriteStrategy::ManualRange => region
                .replace_range_manually(text)
                .inspect(|_| region.notify_insert(text)),
            WriteStrategy::FieldValue => continue,
        };
        match attempt {
            Ok(()) => {
                report.applied = Some(strategy);
                break;
            }
            Err(err) => {
                tracing::debug!(
                    target: "fixmyspelling::surface",
                    ?strategy,
                    %err,
                    "write strategy failed, trying next"
                );
                report.failures.push(err);
            }
        }
    }

    region.notify_changed();
    region.refocus_later();

    if report.applied.is_none() {
        tracing::warn!(target: "fixmyspelling::surface", "no write strategy succeeded");
    }
    report
}
