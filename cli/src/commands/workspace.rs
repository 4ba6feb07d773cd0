//! Workspace I/O commands

use crate::output::OutputFormat;
use crate::WorkspaceCommands;
use lde_entitlement::EntitlementEngine;
use serde_json::json;

pub fn handle(action: WorkspaceCommands, engine: &EntitlementEngine, format: OutputFormat) -> anyhow::Result<()> {
    match action {
        WorkspaceCommands::Write { bytes } => {
            engine.record_write(bytes);
            print_today(engine, format);
        }
        WorkspaceCommands::Read { bytes } => {
            engine.record_read(bytes);
            print_today(engine, format);
        }
        WorkspaceCommands::Today => print_today(engine, format),
        WorkspaceCommands::History { days } => {
            let history = engine.recent_history(days);
            if history.is_empty() {
                format.notice("No archived days yet");
            }
            format.print(&history);
        }
    }
    Ok(())
}

fn print_today(engine: &EntitlementEngine, format: OutputFormat) {
    let (read_mb, written_mb) = engine.today_mb();
    format.print(&json!({ "read_mb": read_mb, "written_mb": written_mb }));
}
