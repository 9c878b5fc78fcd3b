//! The `formcraft show` command.

use anyhow::Result;

use formcraft_core::FormsApi;

use super::Remote;

pub async fn execute(id: String, remote: Remote) -> Result<()> {
    let form = remote.connect()?.get_form(&id).await?;
    println!("{}", serde_json::to_string_pretty(&form)?);
    Ok(())
}
