use anyhow::Result;
use compute::clock::{Clock, SystemClock};
use tracing::{debug, trace};

use crate::config::Settings;
use crate::helpers::converters::week_info_to_dto;

pub fn print_week_info(settings: &Settings) -> Result<()> {
    println!("{}", render_week_info(settings, &SystemClock)?);
    Ok(())
}

/// Week info for the clock's current instant, as pretty JSON
pub fn render_week_info(settings: &Settings, clock: &dyn Clock) -> Result<String> {
    trace!("Entering render_week_info function");
    let week_clock = settings.week_clock()?;
    let info = week_clock.week_info(clock.now());
    debug!("Resolved week info: {:?}", info);

    Ok(serde_json::to_string_pretty(&week_info_to_dto(&info))?)
}
