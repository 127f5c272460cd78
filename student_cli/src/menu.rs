//! Interactive numbered menu, one HTTP round trip per action.

use std::io::{BufRead, Write};
use student_crud::{StudentId, StudentPayload};

use crate::client::StudentClient;
use crate::error::{ClientError, ClientResult};
use crate::output::{render_student, render_students, OutputFormat};

const MENU: &str = "\nChoose an option:
1. List all students
2. Get student by ID
3. Create a new student
4. Update a student
5. Delete a student
6. Exit";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuChoice {
    List,
    Get,
    Create,
    Update,
    Delete,
    Exit,
}

impl MenuChoice {
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().parse::<u32>().ok()? {
            1 => Some(Self::List),
            2 => Some(Self::Get),
            3 => Some(Self::Create),
            4 => Some(Self::Update),
            5 => Some(Self::Delete),
            6 => Some(Self::Exit),
            _ => None,
        }
    }
}

pub struct Menu<'a, R, W> {
    client: &'a StudentClient,
    input: R,
    output: W,
    format: OutputFormat,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(client: &'a StudentClient, input: R, output: W) -> Self {
        Self {
            client,
            input,
            output,
            format: OutputFormat::Plain,
        }
    }

    /// Render students with `format` instead of the plain console form.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Runs until the user picks Exit or input ends. Request failures are reported and the loop continues.
    pub async fn run(&mut self) -> ClientResult<()> {
        loop {
            writeln!(self.output, "{}", MENU)?;
            let Some(line) = self.read_line()? else {
                return Ok(());
            };
            let Some(choice) = MenuChoice::parse(&line) else {
                writeln!(self.output, "Invalid choice. Please try again.")?;
                continue;
            };
            if choice == MenuChoice::Exit {
                return Ok(());
            }
            if let Err(e) = self.dispatch(choice).await {
                match e {
                    ClientError::Io(_) => return Err(e),
                    other => writeln!(self.output, "Error: {}", other)?,
                }
            }
        }
    }

    async fn dispatch(&mut self, choice: MenuChoice) -> ClientResult<()> {
        match choice {
            MenuChoice::List => {
                let students = self.client.get_all_students().await?;
                if !students.is_empty() || self.format != OutputFormat::Plain {
                    writeln!(self.output, "{}", render_students(&students, self.format)?)?;
                }
            }
            MenuChoice::Get => {
                let id = self.prompt_id("Enter student ID: ")?;
                match self.client.get_student_by_id(id).await? {
                    Some(student) => {
                        writeln!(self.output, "{}", render_student(&student, self.format)?)?
                    }
                    None => writeln!(self.output, "Student not found.")?,
                }
            }
            MenuChoice::Create => {
                let name = self.prompt("Enter name: ")?;
                let email = self.prompt("Enter email: ")?;
                let created = self
                    .client
                    .create_student(&StudentPayload::new(name, email))
                    .await?;
                writeln!(
                    self.output,
                    "Created student: {}",
                    render_student(&created, self.format)?
                )?;
            }
            MenuChoice::Update => {
                let id = self.prompt_id("Enter student ID to update: ")?;
                let name = self.prompt("Enter new name: ")?;
                let email = self.prompt("Enter new email: ")?;
                let updated = self
                    .client
                    .update_student(id, &StudentPayload::new(name, email))
                    .await?;
                writeln!(
                    self.output,
                    "Updated student: {}",
                    render_student(&updated, self.format)?
                )?;
            }
            MenuChoice::Delete => {
                let id = self.prompt_id("Enter student ID to delete: ")?;
                match self.client.delete_student(id).await {
                    Ok(()) => writeln!(self.output, "Student deleted successfully.")?,
                    Err(e) => match e.status() {
                        Some(status) => writeln!(
                            self.output,
                            "Error deleting student. Status code: {}",
                            status
                        )?,
                        None => return Err(e),
                    },
                }
            }
            MenuChoice::Exit => {}
        }
        Ok(())
    }

    fn read_line(&mut self) -> ClientResult<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn prompt(&mut self, label: &str) -> ClientResult<String> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;
        self.read_line()?
            .ok_or_else(|| ClientError::InvalidInput("unexpected end of input".into()))
    }

    fn prompt_id(&mut self, label: &str) -> ClientResult<StudentId> {
        let raw = self.prompt(label)?;
        raw.trim()
            .parse()
            .map_err(|_| ClientError::InvalidInput(format!("'{}' is not a student id", raw.trim())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_menu_choices() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::List));
        assert_eq!(MenuChoice::parse(" 5 \n"), Some(MenuChoice::Delete));
        assert_eq!(MenuChoice::parse("6"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("7"), None);
        assert_eq!(MenuChoice::parse("list"), None);
    }

    #[tokio::test]
    async fn invalid_choice_then_exit_never_touches_network() {
        let client = StudentClient::new(crate::ClientConfig {
            base_url: "http://127.0.0.1:9".into(),
            timeout_ms: 100,
        })
        .unwrap();
        let mut out = Vec::new();
        Menu::new(&client, "9\n6\n".as_bytes(), &mut out)
            .run()
            .await
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Invalid choice. Please try again."));
        assert_eq!(text.matches("Choose an option:").count(), 2);
    }

    #[tokio::test]
    async fn bad_id_is_reported_and_loop_continues() {
        let client = StudentClient::new(crate::ClientConfig::default()).unwrap();
        let mut out = Vec::new();
        Menu::new(&client, "2\nabc\n6\n".as_bytes(), &mut out)
            .run()
            .await
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Error: Invalid input: 'abc' is not a student id"));
    }
}
