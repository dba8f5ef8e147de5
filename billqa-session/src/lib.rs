//! # billqa-session
//!
//! Document session for the Finance Bill Q&A pipeline.
//!
//! ## Overview
//!
//! This crate owns everything between an uploaded PDF and a rendered
//! answer:
//!
//! - [`loader`] - PDF text extraction into page records
//! - [`prompt`] - the fixed rephrasing and answer-synthesis templates
//! - [`QaSession`] - the explicit session object with lifecycle
//!   `create -> build -> ask* -> discard`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use billqa_session::{QaSession, SessionOptions};
//!
//! let session = QaSession::new(pipeline, llm, SessionOptions::default());
//! session.build_pdf(Path::new("finance_bill.pdf")).await?;
//! let answer = session.ask("What is the tax rate?").await?;
//! println!("{}", answer.text);
//! ```
//!
//! One session holds one document. Building again discards the previous
//! index entirely.

pub mod error;
pub mod loader;
pub mod prompt;
pub mod session;

pub use error::{LoadError, Result, SessionError};
pub use loader::load_pdf;
pub use prompt::REFUSAL;
pub use session::{Answer, QaSession, SessionOptions};
