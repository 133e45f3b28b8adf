use crate::commands::{self, ALL_COMMANDS, Command, CommandError, CommandOutput};
use crate::config::ServerConfig;
use crate::document::{DocumentState, ServerState};
use crate::handlers::hover;
use int2date_core::ActivationReport;
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use tower_lsp_server::jsonrpc::{Error, Result};
use tower_lsp_server::ls_types::{
    ClientCapabilities, DidChangeTextDocumentParams, DidCloseTextDocumentParams,
    DidOpenTextDocumentParams, ExecuteCommandOptions, ExecuteCommandParams, Hover, HoverParams,
    HoverProviderCapability, InitializeParams, InitializeResult, InitializedParams, MessageType,
    Registration, ServerCapabilities, ServerInfo, TextDocumentSyncCapability, TextDocumentSyncKind,
};
use tower_lsp_server::{Client, LanguageServer};

/// Server version including the git hash when one was available at build time.
pub fn version_string() -> String {
    let hash = env!("GIT_HASH");
    if hash.is_empty() {
        env!("CARGO_PKG_VERSION").to_string()
    } else {
        format!("{} ({})", env!("CARGO_PKG_VERSION"), hash)
    }
}

pub struct Backend {
    client: Client,
    state: Arc<ServerState>,
    config: Arc<RwLock<ServerConfig>>,
    /// Client registers hover providers per language on request.
    dynamic_hover: AtomicBool,
}

impl Backend {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            state: Arc::new(ServerState::new()),
            config: Arc::new(RwLock::new(ServerConfig::default())),
            dynamic_hover: AtomicBool::new(false),
        }
    }

    fn supports_dynamic_hover(capabilities: &ClientCapabilities) -> bool {
        capabilities
            .text_document
            .as_ref()
            .and_then(|td| td.hover.as_ref())
            .and_then(|h| h.dynamic_registration)
            .unwrap_or(false)
    }

    fn server_capabilities(dynamic_hover: bool) -> ServerCapabilities {
        ServerCapabilities {
            text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::FULL)),
            // With dynamic registration the provider is announced per language
            // on first activation instead.
            hover_provider: (!dynamic_hover).then_some(HoverProviderCapability::Simple(true)),
            execute_command_provider: Some(ExecuteCommandOptions {
                commands: ALL_COMMANDS.iter().map(|c| (*c).to_string()).collect(),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn hover_registration(kind_tag: &str) -> Registration {
        Registration {
            id: format!("int2date-hover-{}", kind_tag),
            method: "textDocument/hover".into(),
            register_options: Some(json!({
                "documentSelector": [{ "language": kind_tag }]
            })),
        }
    }

    /// Registers the hover provider for a newly seen language with the client.
    async fn register_hover_provider(
        &self,
        kind_tag: &str,
    ) -> std::result::Result<(), CommandError> {
        if !self.dynamic_hover.load(Ordering::Relaxed) {
            tracing::debug!("static hover provider covers '{}'", kind_tag);
            return Ok(());
        }

        tracing::info!("registering hover provider for '{}'", kind_tag);
        self.client
            .register_capability(vec![Self::hover_registration(kind_tag)])
            .await
            .map_err(|e| CommandError::RegistrationFailed {
                kind_tag: kind_tag.to_string(),
                message: e.message.to_string(),
            })
    }

    /// Completes a first activation with the host, rolling the registry
    /// entry back when the client refuses the registration.
    async fn finish_activation(
        &self,
        report: &ActivationReport,
    ) -> std::result::Result<(), CommandError> {
        if !report.needs_host_registration() {
            return Ok(());
        }

        if let Err(e) = self.register_hover_provider(&report.kind_tag).await {
            tracing::warn!("{}", e);
            commands::rollback_activation(&self.state, &report.kind_tag).await;
            return Err(e);
        }
        Ok(())
    }

    /// Activates hover preview for a language configured at startup.
    async fn activate_default(&self, kind_tag: &str) {
        let report = self.state.hovers.write().await.activate(kind_tag);
        if let Err(e) = self.finish_activation(&report).await {
            self.client.show_message(MessageType::WARNING, e).await;
            return;
        }
        tracing::info!("{}", report);
    }

    async fn run_command(&self, command: Command) -> CommandOutput {
        match command {
            Command::Convert(input) => commands::run_convert(input.as_deref()),
            Command::ActivateHover(uri) => {
                let activation = match commands::activate_for_document(&self.state, &uri).await {
                    Ok(report) => self.finish_activation(&report).await.map(|()| report),
                    Err(e) => Err(e),
                };
                match activation {
                    Ok(report) => commands::report(report),
                    Err(e) => {
                        tracing::warn!("hover activation failed: {}", e);
                        commands::failure(&e)
                    }
                }
            }
            Command::DeactivateHovers => {
                commands::report(commands::deactivate_all(&self.state).await)
            }
            Command::ListHovers => commands::report(commands::list_active(&self.state).await),
        }
    }
}

impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        tracing::info!("initializing int2date-lsp server");

        let config = ServerConfig::from_init_options(params.initialization_options);
        *self.config.write().await = config;

        let dynamic_hover = Self::supports_dynamic_hover(&params.capabilities);
        self.dynamic_hover.store(dynamic_hover, Ordering::Relaxed);
        tracing::debug!("client dynamic hover registration: {}", dynamic_hover);

        Ok(InitializeResult {
            capabilities: Self::server_capabilities(dynamic_hover),
            server_info: Some(ServerInfo {
                name: "int2date-lsp".into(),
                version: Some(version_string()),
            }),
            ..Default::default()
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        let defaults = self.config.read().await.hover.default_languages.clone();
        for kind_tag in &defaults {
            self.activate_default(kind_tag).await;
        }

        tracing::info!("int2date-lsp server initialized");
        self.client
            .log_message(MessageType::INFO, "int2date-lsp ready")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        tracing::info!("shutting down int2date-lsp server");
        self.state.hovers.write().await.teardown();
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let doc = params.text_document;
        tracing::info!("document opened: {} ({})", doc.uri.as_str(), doc.language_id);

        self.state.update_document(
            doc.uri,
            DocumentState::new(doc.language_id, doc.text, doc.version),
        );
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;

        // Full sync: the last change carries the whole document.
        if let Some(change) = params.content_changes.into_iter().last() {
            if !self
                .state
                .replace_content(&uri, change.text, params.text_document.version)
            {
                tracing::warn!("change for unopened document: {}", uri.as_str());
            }
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        tracing::info!("document closed: {}", uri.as_str());
        self.state.remove_document(&uri);
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let markdown = self.config.read().await.hover.markdown;
        Ok(hover::handle_hover(Arc::clone(&self.state), params, markdown).await)
    }

    async fn execute_command(&self, params: ExecuteCommandParams) -> Result<Option<Value>> {
        tracing::debug!("execute command: {}", params.command);

        let output = match Command::parse(params) {
            Ok(command) => self.run_command(command).await,
            Err(e @ CommandError::UnknownCommand(_)) => {
                return Err(Error::invalid_params(e.to_string()));
            }
            Err(e) => {
                tracing::warn!("invalid command invocation: {}", e);
                commands::failure(&e)
            }
        };

        if let CommandOutput::Show { kind, message } = &output {
            self.client.show_message(*kind, message).await;
        }
        Ok(output.to_value())
    }
}
