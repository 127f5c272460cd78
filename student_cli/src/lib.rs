//! # student-cli
//!
//! HTTP client for the student-crud REST service, plus the pieces the
//! `student-cli` binary is built from: one-shot commands, output rendering
//! and the interactive menu.

pub mod client;
pub mod commands;
pub mod error;
pub mod menu;
pub mod output;

pub use client::{ClientConfig, StudentClient, DEFAULT_BASE_URL};
pub use commands::{execute, CommandOutcome, Commands};
pub use error::{ClientError, ClientResult};
pub use menu::{Menu, MenuChoice};
pub use output::{render_student, render_students, OutputFormat};
