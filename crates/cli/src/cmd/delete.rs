use std::process::ExitCode;

use coverletter_core::config::types::ResolvedConfig;
use coverletter_core::store::TemplateStore;
use tracing::debug;

use super::{open_store, report_store_error};

/// Delete a stored template by name. Unknown names are not an error.
pub fn run(cfg: &ResolvedConfig, name: &str) -> ExitCode {
    debug!("Running delete");
    let store = match open_store(cfg) {
        Ok(s) => s,
        Err(e) => {
            println!("FAIL coverletter --delete");
            report_store_error(&e);
            return ExitCode::FAILURE;
        }
    };

    match store.delete_by_name(name) {
        Ok(true) => println!("Deleted template '{name}'."),
        Ok(false) => println!("No template named '{name}', nothing deleted."),
        Err(e) => {
            println!("FAIL coverletter --delete");
            report_store_error(&e);
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}
