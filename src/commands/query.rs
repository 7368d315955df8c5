//! `stx status`, `stx errors` and `stx events`.

use anyhow::Result;

use stx::queries::{
    clear_all_servers_errors, fetch_all_servers_errors, fetch_all_servers_status,
    fetch_server_events, fetch_server_status, Aggregated, EventsOptions,
};
use stx::report::{
    format_clear_text, format_errors_text, format_events_text, format_status_text, render_json,
};

use super::load_registry;
use crate::cli::TargetArgs;

pub async fn status(targets: TargetArgs, json: bool) -> Result<()> {
    let (registry, _) = load_registry().await?;
    let status = match (&targets.server, targets.all) {
        (Some(name), false) => Aggregated {
            servers: vec![fetch_server_status(&registry.resolve(name)?).await],
        },
        (server, all) => fetch_all_servers_status(&registry.select(server.as_deref(), all)?).await,
    };
    if json {
        println!("{}", render_json(&status)?);
    } else {
        println!("{}", format_status_text(&status));
    }
    Ok(())
}

pub async fn errors(targets: TargetArgs, json: bool, clear: bool) -> Result<()> {
    let (registry, _) = load_registry().await?;
    let selected = registry.select(targets.server.as_deref(), targets.all)?;

    if clear {
        let results = clear_all_servers_errors(&selected).await;
        if json {
            println!("{}", render_json(&results)?);
        } else {
            println!("{}", format_clear_text(&results));
        }
        return Ok(());
    }

    let errors = fetch_all_servers_errors(&selected).await;
    if json {
        println!("{}", render_json(&errors)?);
    } else {
        println!("{}", format_errors_text(&errors));
    }
    Ok(())
}

pub async fn events(server: &str, options: EventsOptions, json: bool) -> Result<()> {
    let (registry, _) = load_registry().await?;
    let target = registry.resolve(server)?;

    let events = fetch_server_events(&target, &options).await;
    if json {
        println!("{}", render_json(&events)?);
    } else {
        println!("{}", format_events_text(&events));
    }
    Ok(())
}
