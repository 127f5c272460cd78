//! One-shot subcommands. Each runs a single request and writes its result.

use clap::Subcommand;
use std::io::Write;
use student_crud::{StudentId, StudentPayload};

use crate::client::StudentClient;
use crate::error::{ClientError, ClientResult};
use crate::output::{render_student, render_students, OutputFormat};

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List all students
    List,
    /// Show one student
    Get { id: StudentId },
    /// Create a new student
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    /// Replace a student's name and email
    Update {
        id: StudentId,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    /// Delete a student
    Delete { id: StudentId },
    /// Interactive menu (the default)
    Menu,
}

/// Whether a command reached the result the user asked for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    Success,
    /// The server answered, but the student was missing or the delete was refused.
    Failure,
}

/// Runs a one-shot command. `Commands::Menu` is driven by [`crate::Menu`] and is a no-op here.
pub async fn execute<W: Write>(
    client: &StudentClient,
    command: Commands,
    format: OutputFormat,
    out: &mut W,
) -> ClientResult<CommandOutcome> {
    match command {
        Commands::List => {
            let students = client.get_all_students().await?;
            writeln!(out, "{}", render_students(&students, format)?)?;
        }
        Commands::Get { id } => match client.get_student_by_id(id).await? {
            Some(student) => writeln!(out, "{}", render_student(&student, format)?)?,
            None => {
                writeln!(out, "Student not found.")?;
                return Ok(CommandOutcome::Failure);
            }
        },
        Commands::Create { name, email } => {
            let created = client
                .create_student(&StudentPayload::new(name, email))
                .await?;
            writeln!(out, "Created student: {}", render_student(&created, format)?)?;
        }
        Commands::Update { id, name, email } => {
            let updated = client
                .update_student(id, &StudentPayload::new(name, email))
                .await?;
            writeln!(out, "Updated student: {}", render_student(&updated, format)?)?;
        }
        Commands::Delete { id } => match client.delete_student(id).await {
            Ok(()) => writeln!(out, "Student deleted successfully.")?,
            Err(e @ (ClientError::StudentNotFound { .. } | ClientError::Api { .. })) => {
                writeln!(
                    out,
                    "Error deleting student. Status code: {}",
                    e.status().unwrap_or_default()
                )?;
                return Ok(CommandOutcome::Failure);
            }
            Err(e) => return Err(e),
        },
        Commands::Menu => {}
    }
    Ok(CommandOutcome::Success)
}
