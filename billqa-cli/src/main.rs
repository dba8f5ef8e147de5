//! Interactive terminal for Finance Bill question answering.
//!
//! Builds a single-document session over a local Ollama backend and runs a
//! readline loop: one question in, one answer out. Run with
//! `billqa finance_bill.pdf`, or start empty and `load <path>` later.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use rustyline::error::ReadlineError;
use tracing_subscriber::EnvFilter;

use billqa_model::OllamaLlm;
use billqa_rag::{InMemoryVectorStore, OllamaEmbeddingProvider, OverlapChunker, RagConfig, RagPipeline};
use billqa_session::{QaSession, SessionOptions};

#[derive(Parser)]
#[command(name = "billqa", version, about = "Ask questions about a Finance Bill PDF")]
struct Args {
    /// PDF to load on startup.
    pdf: Option<PathBuf>,

    /// Maximum chunk size in characters.
    #[arg(long, default_value_t = 1000)]
    chunk_size: usize,

    /// Overlap between consecutive chunks in characters.
    #[arg(long, default_value_t = 200)]
    chunk_overlap: usize,

    /// Number of chunks to retrieve per question.
    #[arg(long, default_value_t = 4)]
    top_k: usize,

    /// Ollama server base URL.
    #[arg(long, default_value = "http://localhost:11434")]
    ollama_url: String,

    /// Embedding model name.
    #[arg(long, default_value = "nomic-embed-text")]
    embed_model: String,

    /// Completion model name.
    #[arg(long, default_value = "llama3.1")]
    model: String,

    /// Rephrase each question with the model before retrieval.
    #[arg(long)]
    rephrase: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let args = Args::parse();

    let config = RagConfig::builder()
        .chunk_size(args.chunk_size)
        .chunk_overlap(args.chunk_overlap)
        .top_k(args.top_k)
        .build()
        .context("invalid chunking configuration")?;

    let embedder = OllamaEmbeddingProvider::new()
        .with_base_url(&args.ollama_url)
        .with_model(&args.embed_model);
    let pipeline = RagPipeline::builder()
        .config(config.clone())
        .embedding_provider(Arc::new(embedder))
        .vector_store(Arc::new(InMemoryVectorStore::new()))
        .chunker(Arc::new(OverlapChunker::new(config.chunk_size, config.chunk_overlap)))
        .build()
        .context("failed to assemble pipeline")?;
    let llm = OllamaLlm::new().with_base_url(&args.ollama_url).with_model(&args.model);

    let session = QaSession::new(
        pipeline,
        Arc::new(llm),
        SessionOptions { rephrase_queries: args.rephrase },
    );

    if let Some(path) = &args.pdf {
        build_document(&session, path).await?;
    } else {
        println!("No document loaded. Use `load <path>` to index a PDF.");
    }

    run_repl(&session).await
}

/// Index a PDF, reporting progress on the terminal.
async fn build_document(session: &QaSession, path: &Path) -> anyhow::Result<()> {
    println!("Indexing {} ...", path.display());
    let chunk_count = session
        .build_pdf(path)
        .await
        .with_context(|| format!("could not index '{}'", path.display()))?;
    println!("Indexed {chunk_count} chunks. Ask away.");
    Ok(())
}

/// The question loop: read a line, answer it, repeat until EOF or `quit`.
async fn run_repl(session: &QaSession) -> anyhow::Result<()> {
    let mut editor = rustyline::DefaultEditor::new()?;

    loop {
        match editor.readline("question> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line);

                match line {
                    "quit" | "exit" => break,
                    "help" => print_help(),
                    _ => {
                        if let Some(path) = line.strip_prefix("load ") {
                            if let Err(e) = build_document(session, Path::new(path.trim())).await {
                                eprintln!("{e:#}");
                            }
                        } else {
                            answer_question(session, line).await;
                        }
                    }
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}

/// Run one question through the session and render the result.
async fn answer_question(session: &QaSession, question: &str) {
    match session.ask(question).await {
        Ok(answer) => {
            println!("\n{}\n", answer.text.trim());
            for source in &answer.sources {
                println!(
                    "  [page {}, score {:.3}] {}",
                    source.chunk.source_page,
                    source.score,
                    preview(&source.chunk.text),
                );
            }
            if !answer.sources.is_empty() {
                println!();
            }
        }
        Err(e) => eprintln!("Could not answer that question: {e}"),
    }
}

/// First line of a chunk, shortened for the citation listing.
fn preview(text: &str) -> String {
    let line = text.lines().find(|l| !l.trim().is_empty()).unwrap_or("").trim();
    let truncated: String = line.chars().take(60).collect();
    if truncated.len() < line.len() { format!("{truncated}...") } else { truncated }
}

fn print_help() {
    println!("Commands:");
    println!("  load <path>   index a new PDF (discards the current one)");
    println!("  help          show this message");
    println!("  quit          leave");
    println!("Anything else is treated as a question about the loaded document.");
}
