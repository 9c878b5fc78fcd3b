//! The `formcraft submit` command.

use std::path::PathBuf;

use anyhow::{bail, Result};

use formcraft_core::submission::SubmitOutcome;
use formcraft_core::FormBuilder;

use super::Remote;

pub async fn execute(file: PathBuf, id: Option<String>, remote: Remote) -> Result<()> {
    let mut form = super::read_form(&file)?;
    if let Some(id) = id {
        form.id = id;
    }

    let api = remote.connect()?;
    let mut builder = FormBuilder::from_form(form);

    match builder.submit(&api).await {
        SubmitOutcome::Saved { form, .. } => {
            println!("Saved form {} ({})", form.form_name, form.id);
            Ok(())
        }
        SubmitOutcome::Invalid => {
            let messages = builder.errors().messages();
            for (path, message) in &messages {
                println!("  [{path}] {message}");
            }
            bail!("{} validation error(s), nothing was saved", messages.len())
        }
        SubmitOutcome::Failed { message } => bail!(message),
        SubmitOutcome::AlreadyInFlight => bail!("a submission is already in progress"),
    }
}
