//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `socialnet_core` linkage and that a migrated store opens.
//! - Keep output deterministic for quick local sanity checks.

use std::process::ExitCode;

fn main() -> ExitCode {
    println!("socialnet_core ping={}", socialnet_core::ping());
    println!("socialnet_core version={}", socialnet_core::core_version());

    match socialnet_core::open_db_in_memory() {
        Ok(conn) => match socialnet_core::db::migrations::current_user_version(&conn) {
            Ok(version) => {
                println!("socialnet_core schema_version={version}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("socialnet_core schema check failed: {err}");
                ExitCode::FAILURE
            }
        },
        Err(err) => {
            eprintln!("socialnet_core store open failed: {err}");
            ExitCode::FAILURE
        }
    }
}
