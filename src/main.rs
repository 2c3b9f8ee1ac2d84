use std::net::SocketAddr;

use clap::{Args, Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::info;

use docintel::types::{AppError, Language, ProcessingRequest, Task};
use docintel::{build_agent, config::Config, create_router, AppState};

#[derive(Parser)]
#[command(name = "docintel", version, about = "Document Intelligence Agent")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP server (default)
    Serve,
    /// Run a single request and print the result as JSON
    Process(ProcessArgs),
}

#[derive(Args)]
struct ProcessArgs {
    /// summarize, extract, compare or qa
    #[arg(long)]
    task: String,
    /// en, or or bilingual; anything else falls back to English
    #[arg(long, default_value = "en")]
    language: String,
    /// Document text or path to a pdf/docx/txt file
    #[arg(long = "document-1")]
    document_1: String,
    /// Second document, required for compare
    #[arg(long = "document-2")]
    document_2: Option<String>,
    /// Fields to extract or the question to answer
    #[arg(long)]
    query: Option<String>,
}

impl ProcessArgs {
    /// The task must be known; the language is lenient.
    fn into_request(self) -> Result<ProcessingRequest, AppError> {
        Ok(ProcessingRequest {
            task: self.task.parse::<Task>()?,
            language: Language::from_selector_or_default(&self.language),
            document_1: self.document_1,
            document_2: self.document_2,
            query: self.query,
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    docintel::utils::init_logger();

    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()?;
    info!(server = ?config.server, llm = ?config.llm, "Configuration loaded");

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Process(args) => {
            let request = args.into_request()?;
            let agent = build_agent(&config);

            let result = agent.process(request).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(&config.server.upload_dir).await?;
    info!(upload_dir = %config.server.upload_dir.display(), "Upload folder ready");

    let agent = build_agent(&config);
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    // Create shared state
    let state = AppState::new(config, agent);

    // Create router
    let app = create_router(state);

    // Start server
    info!("Server listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn process_args(args: &[&str]) -> ProcessArgs {
        let cli = Cli::try_parse_from(["docintel", "process"].iter().chain(args).copied()).unwrap();
        match cli.command {
            Some(Command::Process(args)) => args,
            _ => panic!("expected the process subcommand"),
        }
    }

    #[test]
    fn test_process_args_into_request() {
        let request = process_args(&[
            "--task", "compare",
            "--language", "bilingual",
            "--document-1", "uploads/order_1.pdf",
            "--document-2", "uploads/order_2.pdf",
        ])
        .into_request()
        .unwrap();

        assert_eq!(request.task, Task::Compare);
        assert_eq!(request.language, Language::Bilingual);
        assert_eq!(request.document_1, "uploads/order_1.pdf");
        assert_eq!(request.document_2.as_deref(), Some("uploads/order_2.pdf"));
        assert_eq!(request.query, None);
    }

    #[test]
    fn test_process_language_defaults_and_falls_back() {
        let request = process_args(&["--task", "summarize", "--document-1", "text"])
            .into_request()
            .unwrap();
        assert_eq!(request.language, Language::En);

        let request = process_args(&["--task", "qa", "--language", "fr", "--document-1", "text", "--query", "When?"])
            .into_request()
            .unwrap();
        assert_eq!(request.language, Language::En);
        assert_eq!(request.query.as_deref(), Some("When?"));
    }

    #[test]
    fn test_process_unknown_task() {
        let err = process_args(&["--task", "translate", "--document-1", "text"])
            .into_request()
            .unwrap_err();
        assert!(matches!(err, AppError::UnknownTask(ref t) if t == "translate"));
    }

    #[test]
    fn test_no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["docintel"]).unwrap();
        assert!(cli.command.is_none());
    }
}
