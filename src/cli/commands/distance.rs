use clap::Args;
use serde_json::json;

use crate::cli::utils::{output_success, parse_coordinate};
use crate::cli::OutputFormat;
use crate::geodesy::{point_distance, Unit};
use crate::types::GeoPoint;

#[derive(Args, Debug)]
pub struct DistanceArgs {
    #[arg(long, value_parser = parse_coordinate, allow_hyphen_values = true, help = "Start coordinate as LAT,LON")]
    pub from: GeoPoint,

    #[arg(long, value_parser = parse_coordinate, allow_hyphen_values = true, help = "End coordinate as LAT,LON")]
    pub to: GeoPoint,

    #[arg(long, help = "Unit: metric|meters, km, miles|mi|imperial (default: configured unit)")]
    pub unit: Option<String>,
}

pub fn handle(args: DistanceArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let unit = match args.unit.as_deref() {
        Some(selector) => Unit::resolve(Some(selector)),
        None => crate::config::config().track.default_unit,
    };
    let distance = point_distance(&args.from, &args.to, unit);

    output_success(
        &output_format,
        &format!("{:.3} {}", distance, unit),
        Some(json!({
            "from": args.from,
            "to": args.to,
            "distance": distance,
            "unit": unit,
        })),
    )
}
