use anyhow::Result;
use reachpilot_config::AppConfig;
use reachpilot_store::Store;
use serde::Serialize;
use std::io::{self, Write};

pub mod check;
pub mod completions;
pub mod connections;

pub struct Context<'a> {
    pub store: &'a Store,
    pub json: bool,
    pub owner_email: String,
    pub config: &'a AppConfig,
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
