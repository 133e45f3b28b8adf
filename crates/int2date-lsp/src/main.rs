use int2date_lsp::server::{Backend, version_string};
use tower_lsp_server::{LspService, Server};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if std::env::args().skip(1).any(|arg| arg == "--version" || arg == "-V") {
        println!("int2date-lsp {} built {}", version_string(), env!("BUILD_TIME"));
        return;
    }

    // stdout carries the LSP transport, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(Backend::new);

    Server::new(stdin, stdout, socket).serve(service).await;
}
