//! UTF-16 offsets over the text nodes of a rich region.
//!
//! A captured rich selection is stored as a pair of offsets into the
//! concatenated text nodes of the region, so it survives the live selection
//! moving elsewhere and can be replayed on accept.

use fixmyspelling_core::PlatformError;
use wasm_bindgen::JsCast;

/// Visit every text node under `container` in document order.
///
/// Subtrees marked `contenteditable="false"` are skipped; their text is not
/// part of what the user can edit.
fn for_each_text_node(
    container: &web_sys::Node,
    mut visit: impl FnMut(&web_sys::Node, usize) -> bool,
) -> Result<(), PlatformError> {
    let document = web_sys::window()
        .ok_or("no window")?
        .document()
        .ok_or("no document")?;

    let walker = document
        .create_tree_walker_with_what_to_show(container, 0xFFFFFFFF)
        .map_err(|e| format!("create_tree_walker failed: {:?}", e))?;

    let mut skip_until_exit: Option<web_sys::Element> = None;

    while let Ok(Some(node)) = walker.next_node() {
        if let Some(ref skip_elem) = skip_until_exit {
            if !skip_elem.contains(Some(&node)) {
                skip_until_exit = None;
            }
        }

        if skip_until_exit.is_none() {
            if let Some(element) = node.dyn_ref::<web_sys::Element>() {
                if element.get_attribute("contenteditable").as_deref() == Some("false") {
                    skip_until_exit = Some(element.clone());
                    continue;
                }
            }
        }

        if skip_until_exit.is_some() || node.node_type() != web_sys::Node::TEXT_NODE {
            continue;
        }

        let len = node
            .text_content()
            .map(|t| t.encode_utf16().count())
            .unwrap_or(0);
        if !visit(&node, len) {
            break;
        }
    }
    Ok(())
}

/// Convert a DOM boundary point to a UTF-16 offset within `container`.
///
/// `node` is either a text node (offset counts code units) or an element
/// (offset counts children), as with `Range` boundaries.
pub fn boundary_to_offset(
    container: &web_sys::Node,
    node: &web_sys::Node,
    offset: u32,
) -> Result<usize, PlatformError> {
    if node.node_type() == web_sys::Node::TEXT_NODE {
        return Ok(text_before(container, node)? + offset as usize);
    }
    match node.child_nodes().get(offset) {
        Some(child) => text_before(container, &child),
        None if node == container => text_len(container),
        None => Ok(text_before(container, node)? + text_len(node)?),
    }
}

/// UTF-16 length of all text nodes before `boundary` in document order.
fn text_before(container: &web_sys::Node, boundary: &web_sys::Node) -> Result<usize, PlatformError> {
    let mut accumulated = 0;
    for_each_text_node(container, |text, len| {
        if text == boundary || boundary.contains(Some(text)) || precedes(boundary, text) {
            return false;
        }
        accumulated += len;
        true
    })?;
    Ok(accumulated)
}

/// UTF-16 length of the editable text under `node`.
pub fn text_len(node: &web_sys::Node) -> Result<usize, PlatformError> {
    let mut total = 0;
    for_each_text_node(node, |_, len| {
        total += len;
        true
    })?;
    Ok(total)
}

/// Whether `a` comes before `b` in document order.
fn precedes(a: &web_sys::Node, b: &web_sys::Node) -> bool {
    a.compare_document_position(b) & web_sys::Node::DOCUMENT_POSITION_FOLLOWING != 0
}

/// Find text node at given UTF-16 offset within `container`.
///
/// Offsets past the end land at the end of the last text node.
pub fn find_text_node_at_offset(
    container: &web_sys::Node,
    target_utf16_offset: usize,
) -> Result<(web_sys::Node, usize), PlatformError> {
    let mut accumulated_utf16 = 0;
    let mut found: Option<(web_sys::Node, usize)> = None;
    let mut last: Option<(web_sys::Node, usize)> = None;

    for_each_text_node(container, |node, len| {
        if accumulated_utf16 + len >= target_utf16_offset {
            found = Some((node.clone(), target_utf16_offset - accumulated_utf16));
            return false;
        }
        accumulated_utf16 += len;
        last = Some((node.clone(), len));
        true
    })?;

    found.or(last).ok_or_else(|| "no text node found in container".into())
}
