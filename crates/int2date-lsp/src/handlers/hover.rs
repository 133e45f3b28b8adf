//! Hover handler backed by the hover activation registry.

use crate::document::ServerState;
use int2date_core::{HoverPreview, resolve_hover};
use std::sync::Arc;
use tower_lsp_server::ls_types::{
    Hover, HoverContents, HoverParams, MarkupContent, MarkupKind, Position, Range,
};

/// Handles hover requests.
///
/// Returns `None` when the document is unknown or the registry declines to
/// answer. The reason is logged.
pub async fn handle_hover(
    state: Arc<ServerState>,
    params: HoverParams,
    markdown: bool,
) -> Option<Hover> {
    let uri = &params.text_document_position_params.text_document.uri;
    let position = params.text_document_position_params.position;

    let (language_id, line) = {
        let doc = state.get_document(uri)?;
        (doc.language_id.clone(), doc.line(position.line)?.to_string())
    };

    let registry = state.hovers.read().await;
    match resolve_hover(&registry, &language_id, &line, position.character) {
        Ok(preview) => Some(build_hover(&preview, position.line, markdown)),
        Err(reason) => {
            tracing::debug!("no hover for {} at {:?}: {}", uri.as_str(), position, reason);
            None
        }
    }
}

fn build_hover(preview: &HoverPreview, line: u32, markdown: bool) -> Hover {
    let (kind, value) = if markdown {
        (MarkupKind::Markdown, format!("`{}`", preview))
    } else {
        (MarkupKind::PlainText, preview.to_string())
    };

    Hover {
        contents: HoverContents::Markup(MarkupContent { kind, value }),
        range: Some(Range::new(
            Position::new(line, preview.target.start),
            Position::new(line, preview.target.end),
        )),
    }
}
