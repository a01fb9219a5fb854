//! `maklink grills` — one-shot account grill list.

use serde_json::json;

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub async fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let (client, _) = super::build_client(global)?;
    let grills = client.list_grills().await?;

    if global.json {
        let rows: Vec<_> = grills
            .iter()
            .map(|g| json!({ "grill_id": g.grill_id, "name": g.name }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows).unwrap_or_default());
        return Ok(());
    }

    if grills.is_empty() {
        println!("No grills on this account.");
        return Ok(());
    }
    for grill in grills {
        println!("{}\t{}", grill.grill_id, grill.name);
    }
    Ok(())
}
