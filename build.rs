// build.rs
//
// Stamps the binary with its build date and profile so `teleplay` can log
// them at startup.

use chrono::Utc;
use std::env;
use std::fs;
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let out_dir = env::var("OUT_DIR")?;
    let dest_path = Path::new(&out_dir).join("build_info.rs");

    let build_date = Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();
    let profile = env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());

    fs::write(
        &dest_path,
        format!(
            "pub const BUILD_DATE: &str = \"{} ({})\";\n",
            build_date, profile
        ),
    )?;

    // only re-run when this script changes
    println!("cargo:rerun-if-changed=build.rs");
    Ok(())
}
