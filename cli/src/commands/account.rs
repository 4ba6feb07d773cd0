//! Tier, cap gate and credit commands

use crate::output::OutputFormat;
use crate::{CreditCommands, TierCommands};
use colored::Colorize;
use lde_entitlement::EntitlementEngine;
use serde_json::json;

pub fn status(engine: &EntitlementEngine, format: OutputFormat) -> anyhow::Result<()> {
    let summary = engine.summary();
    match format {
        OutputFormat::Table => println!("{}", summary),
        _ => format.print(&summary),
    }
    Ok(())
}

pub fn tier(action: TierCommands, engine: &EntitlementEngine, format: OutputFormat) -> anyhow::Result<()> {
    match action {
        TierCommands::Get => {
            let tier = engine.tier();
            let resources = engine.effective_resources();
            format.print(&json!({ "tier": tier, "resources": resources }));
        }
        TierCommands::Set { tier } => {
            if !engine.set_tier(&tier) {
                anyhow::bail!("Unknown tier: {} (expected free, battery or pro)", tier);
            }
            format.notice(&format!("Tier set to {}", engine.tier()));
            if format != OutputFormat::Table {
                format.print(&json!({ "tier": engine.tier() }));
            }
        }
    }
    Ok(())
}

pub fn consume(engine: &EntitlementEngine, format: OutputFormat) -> anyhow::Result<()> {
    let accepted = engine.try_consume_message();
    let summary = engine.summary();
    match format {
        OutputFormat::Table => {
            if accepted {
                println!(
                    "{} ({} of {} left today)",
                    "Accepted".green(),
                    summary.messages_remaining,
                    summary.resources.daily_cap
                );
            } else {
                println!("{} daily cap of {} reached", "Rejected:".red(), summary.resources.daily_cap);
            }
        }
        _ => format.print(&json!({
            "accepted": accepted,
            "used": summary.messages_used_today,
            "remaining": summary.messages_remaining,
            "daily_cap": summary.resources.daily_cap,
        })),
    }
    Ok(())
}

pub fn contribute(percent: u32, engine: &EntitlementEngine, format: OutputFormat) -> anyhow::Result<()> {
    let outcome = engine.record_contribution(percent);
    format.print(&json!({
        "tier": outcome.tier,
        "battery_share_percent": outcome.battery_share_percent,
        "contrib_days": engine.summary().contrib_days,
        "entitlement_expires": outcome.entitlement_expires,
    }));
    Ok(())
}

pub fn credits(action: CreditCommands, engine: &EntitlementEngine, format: OutputFormat) -> anyhow::Result<()> {
    let balance = match action {
        CreditCommands::Show => engine.credits(),
        CreditCommands::Add { amount } => engine.add_credits(amount),
    };
    format.print(&json!({ "credits": balance }));
    Ok(())
}
