//! # Voxel Terrain Demo
//!
//! Generates a world and logs its statistics.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- config/terrain.json
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use log::error;

fn main() -> ExitCode {
    voxel_terrain::init_logger();

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    match voxel_terrain::run(config_path.as_deref()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
