use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use nalgebra::Vector3;

use gnssutils::{
    azimuth_elevation_from_ecef, ecef_from_llh, gps_minus_utc_seconds, llh_from_ecef,
    utc_to_gpst, GpsTime, Llh,
};

#[derive(Parser)]
#[command(name = "gnss-convert", about = "WGS84 coordinate and GPS time conversions")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Geodetic (degrees, meters) to ECEF (meters)
    #[command(allow_negative_numbers = true)]
    Llh2ecef { lat: f64, lon: f64, height: f64 },
    /// ECEF (meters) to geodetic (degrees, meters)
    #[command(allow_negative_numbers = true)]
    Ecef2llh { x: f64, y: f64, z: f64 },
    /// Azimuth/elevation of a target ECEF point from a reference ECEF point
    #[command(allow_negative_numbers = true)]
    Azel {
        target_x: f64,
        target_y: f64,
        target_z: f64,
        ref_x: f64,
        ref_y: f64,
        ref_z: f64,
    },
    /// UTC instant (RFC 3339) to GPS week number and time-of-week
    Utc2gps { instant: DateTime<Utc> },
    /// GPS week number and time-of-week to UTC
    #[command(allow_negative_numbers = true)]
    Gps2utc { wn: i64, tow: f64 },
    /// GPS-UTC leap-second offset at a GPS-timescale instant (RFC 3339)
    Leap { instant: DateTime<Utc> },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Llh2ecef { lat, lon, height } => {
            let ecef = ecef_from_llh(&Llh::new(lat, lon, height));
            println!("{:.4} {:.4} {:.4}", ecef.x, ecef.y, ecef.z);
        }
        Command::Ecef2llh { x, y, z } => {
            let llh = llh_from_ecef(&Vector3::new(x, y, z));
            println!("{:.9} {:.9} {:.4}", llh.latitude, llh.longitude, llh.height);
        }
        Command::Azel {
            target_x,
            target_y,
            target_z,
            ref_x,
            ref_y,
            ref_z,
        } => {
            let target = Vector3::new(target_x, target_y, target_z);
            let reference = Vector3::new(ref_x, ref_y, ref_z);
            let (azimuth, elevation) = azimuth_elevation_from_ecef(&target, &reference)?;
            println!("azimuth {:.6} elevation {:.6}", azimuth, elevation);
        }
        Command::Utc2gps { instant } => {
            let gps = utc_to_gpst(instant)?;
            println!("wn {} tow {:.9}", gps.wn, gps.tow);
        }
        Command::Gps2utc { wn, tow } => {
            let utc = GpsTime::new(wn, tow).to_utc()?;
            println!("{}", utc.to_rfc3339());
        }
        Command::Leap { instant } => {
            println!("{}", gps_minus_utc_seconds(instant)?);
        }
    }

    Ok(())
}
