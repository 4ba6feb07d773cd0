//! Scripted walkthrough: explainer, a week of contributions, pro upgrade,
//! data service, stress compute, history.

use crate::output::OutputFormat;
use crate::services::{data_service, explainer, stress};
use colored::Colorize;
use lde_entitlement::EntitlementEngine;

const DEMO_SHARE_PERCENT: u32 = 18;
const DEMO_CONTRIBUTIONS: usize = 7;

pub fn run(engine: &EntitlementEngine, format: OutputFormat) -> anyhow::Result<()> {
    println!("{}", "=== LDE Demo ===".bold());
    show_state(engine, "start");

    let reply = explainer::answer(engine, "simple", "what is python");
    println!("Explainer: {}", reply.text);

    for _ in 0..DEMO_CONTRIBUTIONS {
        engine.record_contribution(DEMO_SHARE_PERCENT);
    }
    show_state(engine, "after_battery");

    engine.set_tier("pro");
    show_state(engine, "pro");

    let report = data_service::process_data(engine, &mut rand::thread_rng());
    println!("Process Data Service:");
    format.print(&report);
    show_state(engine, "after_service");

    let report = stress::stress_compute(engine, 100_000, 5, |_, _| {});
    println!("Stress compute:");
    format.print(&report);
    show_state(engine, "after_stress");

    println!("7-day history:");
    format.print(&engine.recent_history(lde_entitlement::DEFAULT_HISTORY_DAYS));
    println!("{}", "=== Demo complete ===".bold());
    Ok(())
}

fn show_state(engine: &EntitlementEngine, tag: &str) {
    let summary = engine.summary();
    let resources = summary.resources;
    println!(
        "[{}] Tier={} cap={} ROM={}MB RAM={}MB CPU={}",
        tag.cyan(),
        summary.tier,
        resources.daily_cap,
        resources.cache_mb,
        resources.memory_mb,
        resources.cpu_priority
    );
    println!(
        "[{}] Today: read {} MB, written {} MB, Credits={}",
        tag.cyan(),
        summary.today_read_mb,
        summary.today_written_mb,
        summary.credits
    );
}
