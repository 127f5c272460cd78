//! Rendering students for the terminal.

use clap::ValueEnum;
use student_crud::Student;

use crate::error::ClientResult;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `Student{id=1, name='Ada', email='ada@example.com'}` per line
    #[default]
    Plain,
    /// Pretty-printed JSON
    Json,
    /// Aligned `ID | Name | Email` columns
    Table,
}

pub fn render_students(students: &[Student], format: OutputFormat) -> ClientResult<String> {
    Ok(match format {
        OutputFormat::Plain => students
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Json => serde_json::to_string_pretty(students)?,
        OutputFormat::Table => render_table(students),
    })
}

pub fn render_student(student: &Student, format: OutputFormat) -> ClientResult<String> {
    Ok(match format {
        OutputFormat::Plain => student.to_string(),
        OutputFormat::Json => serde_json::to_string_pretty(student)?,
        OutputFormat::Table => render_table(std::slice::from_ref(student)),
    })
}

fn render_table(students: &[Student]) -> String {
    let headers = ["ID", "Name", "Email"];
    let rows: Vec<[String; 3]> = students
        .iter()
        .map(|s| [s.id.to_string(), s.name.clone(), s.email.clone()])
        .collect();

    let mut widths = headers.map(|h| h.chars().count());
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |cells: [&str; 3]| {
        cells
            .iter()
            .zip(widths)
            .map(|(c, w)| format!("{:<w$}", c, w = w))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut out = vec![
        line(headers),
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    ];
    for row in &rows {
        out.push(line([row[0].as_str(), row[1].as_str(), row[2].as_str()]));
    }
    out.join("\n")
}
