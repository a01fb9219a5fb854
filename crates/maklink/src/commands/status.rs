//! `maklink status <grill>` — one-shot interpreted reading.

use serde_json::json;

use maklink_core::{DeviceId, GrillDisplay};

use crate::cli::{GlobalOpts, GrillArg};
use crate::error::CliError;

pub async fn handle(args: &GrillArg, global: &GlobalOpts) -> Result<(), CliError> {
    let (client, _) = super::build_client(global)?;
    let entry = super::resolve_grill(&client, &args.grill).await?;
    let info = client.grill_data(&entry.grill_id).await?;

    let mut display = GrillDisplay::disconnected();
    display.apply_reading(&info);

    if global.json {
        let body = json!({
            "device_id": DeviceId::from_grill(&entry.grill_id),
            "name": entry.name,
            "connected": info.connected,
            "display": display,
        });
        println!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
        return Ok(());
    }

    println!("{} ({})", entry.name, entry.grill_id);
    println!("  state:     {}", display.state_text);
    println!("  status:    {}", display.tile_status);
    println!("  temp:      {}", display.current_temp);
    println!("  setpoint:  {}", display.set_point_text);
    println!("  progress:  {}%", display.progress);
    for probe in &display.probes {
        println!("  {probe}");
    }
    Ok(())
}
