//! The `formcraft list` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use formcraft_core::{FormsApi, QuestionKind};

use super::Remote;

pub async fn execute(remote: Remote) -> Result<()> {
    let api = remote.connect()?;
    let forms = api.list_forms().await?;

    if forms.is_empty() {
        println!("No forms stored at {}.", api.base_url());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Questions", "Score", "Checkbox"]);

    for form in &forms {
        let count = |kind: QuestionKind| {
            form.questions
                .iter()
                .filter(|q| q.question_type == kind)
                .count()
        };
        table.add_row(vec![
            Cell::new(&form.id),
            Cell::new(&form.form_name),
            Cell::new(form.questions.len()),
            Cell::new(count(QuestionKind::Score)),
            Cell::new(count(QuestionKind::Checkbox)),
        ]);
    }

    println!("{table}");
    println!("{} form(s)", forms.len());
    Ok(())
}
