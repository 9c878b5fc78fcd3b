//! The `formcraft delete` command.

use anyhow::Result;

use formcraft_core::FormsApi;

use super::Remote;

pub async fn execute(id: String, remote: Remote) -> Result<()> {
    remote.connect()?.delete_form(&id).await?;
    println!("Deleted form {id}");
    Ok(())
}
