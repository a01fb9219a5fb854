//! `maklink set-temp <grill> <temp>` — one-shot setpoint push.

use maklink_core::model::display::set_point_label;

use crate::cli::{GlobalOpts, SetTempArgs};
use crate::error::CliError;

pub async fn handle(args: &SetTempArgs, global: &GlobalOpts) -> Result<(), CliError> {
    if args.temperature <= 0 {
        return Err(CliError::Validation {
            field: "temperature".into(),
            reason: "must be a positive number of °F".into(),
        });
    }

    let (client, _) = super::build_client(global)?;
    let entry = super::resolve_grill(&client, &args.grill).await?;

    let status = client.set_grill_temp(&entry.grill_id, args.temperature).await?;
    if !status.is_success() {
        return Err(CliError::ApiError {
            status: status.as_u16(),
            message: "setpoint not accepted".into(),
        });
    }

    println!(
        "{} set to {} ({})",
        entry.name,
        args.temperature,
        set_point_label(args.temperature)
    );
    Ok(())
}
