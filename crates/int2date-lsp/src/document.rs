//! Open document tracking and shared server state.

use dashmap::DashMap;
use dashmap::mapref::one::Ref;
use int2date_core::HoverRegistry;
use tokio::sync::RwLock;
use tower_lsp_server::ls_types::Uri;

/// Client-side document as last synchronized.
#[derive(Debug, Clone)]
pub struct DocumentState {
    pub language_id: String,
    pub content: String,
    pub version: i32,
}

impl DocumentState {
    pub fn new(language_id: impl Into<String>, content: impl Into<String>, version: i32) -> Self {
        Self {
            language_id: language_id.into(),
            content: content.into(),
            version,
        }
    }

    /// Returns the zero-based `line` without its terminator.
    ///
    /// Lines end at `\r\n`, `\n` or a lone `\r`, as LSP positions count them.
    pub fn line(&self, line: u32) -> Option<&str> {
        let mut rest = self.content.as_str();
        for _ in 0..line {
            let end = rest.find(['\r', '\n'])?;
            let terminator = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
            rest = &rest[end + terminator..];
        }
        let end = rest.find(['\r', '\n']).unwrap_or(rest.len());
        Some(&rest[..end])
    }
}

/// State shared by every LSP handler.
///
/// Documents live in a concurrent map so handlers never wait on each other
/// for reads. The hover registry is behind an async lock and each command
/// holds the write guard for a single transition.
#[derive(Default)]
pub struct ServerState {
    pub documents: DashMap<Uri, DocumentState>,
    pub hovers: RwLock<HoverRegistry>,
}

impl ServerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_document(&self, uri: &Uri) -> Option<Ref<'_, Uri, DocumentState>> {
        self.documents.get(uri)
    }

    pub fn update_document(&self, uri: Uri, state: DocumentState) {
        self.documents.insert(uri, state);
    }

    /// Replaces the content of an already open document.
    ///
    /// Returns `false` when the document is unknown.
    pub fn replace_content(&self, uri: &Uri, content: String, version: i32) -> bool {
        match self.documents.get_mut(uri) {
            Some(mut doc) => {
                doc.content = content;
                doc.version = version;
                true
            }
            None => false,
        }
    }

    pub fn remove_document(&self, uri: &Uri) {
        self.documents.remove(uri);
    }

    /// Language id of an open document.
    pub fn language_id(&self, uri: &Uri) -> Option<String> {
        self.get_document(uri).map(|doc| doc.language_id.clone())
    }
}
