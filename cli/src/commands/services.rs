//! Commands backed by the engine consumers

use crate::output::OutputFormat;
use crate::services::{chunker, data_service, explainer, parallel, stress};
use colored::Colorize;
use lde_entitlement::EntitlementEngine;
use std::path::Path;
use std::sync::Arc;

pub fn ask(question: &str, style: &str, engine: &EntitlementEngine, format: OutputFormat) -> anyhow::Result<()> {
    let reply = explainer::answer(engine, style, question);
    match format {
        OutputFormat::Table => match reply.kind {
            explainer::ReplyKind::Answered => println!("{}", reply.text),
            explainer::ReplyKind::NotFound => {
                println!("{}", reply.text.yellow());
                println!("Known topics: {}", explainer::topics().collect::<Vec<_>>().join(", "));
            }
            explainer::ReplyKind::CapReached => println!("{}", reply.text.red()),
        },
        _ => format.print(&reply),
    }
    Ok(())
}

pub fn process_data(engine: &EntitlementEngine, format: OutputFormat) -> anyhow::Result<()> {
    let report = data_service::process_data(engine, &mut rand::thread_rng());
    format.print(&report);
    Ok(())
}

pub fn stress(iterations: u64, steps: u32, engine: &EntitlementEngine, format: OutputFormat) -> anyhow::Result<()> {
    let report = stress::stress_compute(engine, iterations, steps, |done, total| {
        if format == OutputFormat::Table {
            eprintln!("  step {}/{}", done, total);
        }
    });
    format.print(&report);
    Ok(())
}

pub fn chunk(path: &Path, chunk_size: usize, engine: &EntitlementEngine, format: OutputFormat) -> anyhow::Result<()> {
    let report = chunker::process_file(engine, path, chunk_size)?;
    format.print(&report);
    Ok(())
}

pub async fn compute(units: usize, engine: EntitlementEngine, format: OutputFormat) -> anyhow::Result<()> {
    let report = parallel::compute(Arc::new(engine), units).await?;
    format.print(&report);
    Ok(())
}
