use clap::Args;
use serde_json::json;

use crate::cli::utils::{output_success, parse_coordinate};
use crate::cli::OutputFormat;
use crate::geodesy::heading;
use crate::types::GeoPoint;

#[derive(Args, Debug)]
pub struct HeadingArgs {
    #[arg(long, value_parser = parse_coordinate, allow_hyphen_values = true, help = "Start coordinate as LAT,LON")]
    pub from: GeoPoint,

    #[arg(long, value_parser = parse_coordinate, allow_hyphen_values = true, help = "End coordinate as LAT,LON")]
    pub to: GeoPoint,
}

pub fn handle(args: HeadingArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let bearing = heading(&args.from, &args.to);

    output_success(
        &output_format,
        &format!("{:.1}°", bearing),
        Some(json!({
            "from": args.from,
            "to": args.to,
            "heading": bearing,
        })),
    )
}
