//! Page-lens MCP Server
//!
//! This binary provides a Model Context Protocol (MCP) server for page
//! analysis and keyword highlighting. It exposes the page-lens tools to AI
//! assistants and other MCP clients over stdio, SSE, or streamable HTTP.

use clap::{Parser, ValueEnum};
use page_lens::browser::{ConnectionOptions, LaunchOptions};
use page_lens::mcp::LensServer;
use rmcp::{ServiceExt, transport::stdio};
use std::path::PathBuf;

#[cfg(feature = "mcp-server")]
use rmcp::transport::{
    sse_server::{SseServer, SseServerConfig},
    streamable_http_server::{StreamableHttpService, session::local::LocalSessionManager},
};

#[cfg(feature = "mcp-server")]
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Transport {
    /// Standard input/output transport (default)
    Stdio,
    /// Server-Sent Events transport
    Sse,
    /// HTTP streamable transport
    Http,
}

#[derive(Parser)]
#[command(name = "mcp-server")]
#[command(version)]
#[command(about = "Page analysis and keyword highlighting MCP server", long_about = None)]
struct Cli {
    /// Launch browser in headed mode (default: headless)
    #[arg(long, short = 'H')]
    headed: bool,

    /// Path to custom browser executable
    #[arg(long, value_name = "PATH")]
    chrome_path: Option<PathBuf>,

    /// WebSocket debugger URL of a running browser to attach to instead of
    /// launching one
    #[arg(long, value_name = "URL")]
    ws_endpoint: Option<String>,

    /// Persistent browser profile directory
    #[arg(long, value_name = "DIR")]
    user_data_dir: Option<PathBuf>,

    /// Disable the Chrome sandbox (needed in some container environments)
    #[arg(long)]
    no_sandbox: bool,

    /// Transport type to use
    #[arg(long, short = 't', value_enum, default_value = "stdio")]
    transport: Transport,

    /// Port for SSE or HTTP transport (default: 3000)
    #[arg(long, short = 'p', default_value = "3000")]
    port: u16,

    /// SSE endpoint path (default: /sse)
    #[arg(long, default_value = "/sse")]
    sse_path: String,

    /// SSE POST path for messages (default: /message)
    #[arg(long, default_value = "/message")]
    sse_post_path: String,

    /// HTTP streamable endpoint path (default: /mcp)
    #[arg(long, default_value = "/mcp")]
    http_path: String,
}

fn create_server(
    ws_endpoint: Option<&str>,
    options: &LaunchOptions,
) -> page_lens::error::Result<LensServer> {
    match ws_endpoint {
        Some(url) => LensServer::connect(ConnectionOptions::new(url)),
        None => LensServer::with_options(options.clone()),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();

    // Configure browser launch options
    let mut options = LaunchOptions {
        headless: !cli.headed,
        sandbox: !cli.no_sandbox,
        ..Default::default()
    };
    options.chrome_path = cli.chrome_path.clone();
    options.user_data_dir = cli.user_data_dir.clone();

    eprintln!("Page-lens MCP Server v{}", env!("CARGO_PKG_VERSION"));
    eprintln!(
        "Browser mode: {}",
        if options.headless {
            "headless"
        } else {
            "headed"
        }
    );

    if let Some(ref path) = cli.chrome_path {
        eprintln!("Browser executable: {}", path.display());
    }

    if let Some(ref endpoint) = cli.ws_endpoint {
        eprintln!("WebSocket endpoint: {}", endpoint);
    }

    if let Some(ref dir) = cli.user_data_dir {
        eprintln!("User data directory: {}", dir.display());
    }

    // Route to appropriate transport
    match cli.transport {
        Transport::Stdio => {
            eprintln!("Transport: stdio");
            eprintln!("Ready to accept MCP connections via stdio");
            let service = create_server(cli.ws_endpoint.as_deref(), &options)
                .map_err(|e| format!("Failed to create page-lens server: {}", e))?;
            let server = service.serve(stdio()).await?;
            let quit_reason = server.waiting().await?;
            eprintln!("Server quit with reason: {:?}", quit_reason);
            // Give a small delay for destructors to complete
            tokio::time::sleep(tokio::time::Duration::from_millis(200)).await;
            eprintln!("Cleanup complete, exiting...");
        }
        Transport::Sse => {
            eprintln!("Transport: SSE");
            eprintln!("Port: {}", cli.port);
            eprintln!("SSE path: {}", cli.sse_path);
            eprintln!("SSE POST path: {}", cli.sse_post_path);

            let bind_addr = format!("127.0.0.1:{}", cli.port);

            // Create SSE server configuration
            let config = SseServerConfig {
                bind: bind_addr.parse()?,
                sse_path: cli.sse_path.clone(),
                post_path: cli.sse_post_path.clone(),
                ct: CancellationToken::new(),
                sse_keep_alive: None,
            };

            // Create SSE server and router
            let (sse_server, router) = SseServer::new(config);

            eprintln!(
                "Ready to accept MCP connections at http://{}{}",
                bind_addr, cli.sse_path
            );

            // Register service factory for each connection
            let ws_endpoint = cli.ws_endpoint.clone();
            let _cancellation_token = sse_server.with_service(move || {
                create_server(ws_endpoint.as_deref(), &options)
                    .expect("Failed to create page-lens server")
            });

            // Start HTTP server with SSE router
            let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
            axum::serve(listener, router.into_make_service()).await?;
        }
        Transport::Http => {
            eprintln!("Transport: HTTP streamable");
            eprintln!("Port: {}", cli.port);
            eprintln!("HTTP path: {}", cli.http_path);

            let bind_addr = format!("127.0.0.1:{}", cli.port);

            // Create service factory closure
            let ws_endpoint = cli.ws_endpoint.clone();
            let service_factory = move || {
                create_server(ws_endpoint.as_deref(), &options)
                    .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
            };

            let http_service = StreamableHttpService::new(
                service_factory,
                LocalSessionManager::default().into(),
                Default::default(),
            );

            let router = axum::Router::new().nest_service(&cli.http_path, http_service);

            eprintln!(
                "Ready to accept MCP connections at http://{}{}",
                bind_addr, cli.http_path
            );

            let listener = tokio::net::TcpListener::bind(bind_addr).await?;
            axum::serve(listener, router).await?;
        }
    }

    Ok(())
}
