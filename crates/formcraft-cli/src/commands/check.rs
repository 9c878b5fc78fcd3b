//! The `formcraft check` command.

use std::path::PathBuf;

use anyhow::{bail, Result};

use formcraft_core::FormBuilder;

pub fn execute(file: PathBuf) -> Result<()> {
    let form = super::read_form(&file)?;
    println!("Form: {} ({} questions)", form.form_name, form.questions.len());
    for (index, question) in form.questions.iter().enumerate() {
        println!("  {}. {} [{}]", index + 1, question.title, question.question_type);
    }

    let mut builder = FormBuilder::from_form(form);
    if builder.validate() {
        println!("Form is valid.");
        return Ok(());
    }

    let messages = builder.errors().messages();
    for (path, message) in &messages {
        println!("  [{path}] {message}");
    }
    bail!("{} validation error(s) in {}", messages.len(), file.display())
}
