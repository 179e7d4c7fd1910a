use crate::commands::{print_json, Context};
use crate::error::{invalid_input, not_found};
use crate::util::{
    format_timestamp_date, format_timestamp_datetime, now_utc, parse_connection_id,
    start_of_month_utc,
};
use anyhow::Result;
use reachpilot_core::dto::{ConnectionPageDto, ConnectionStatsDto};
use reachpilot_core::rules::CandidateInput;
use reachpilot_store::query::{ConnectionQuery, Cursor};
use reachpilot_store::repo::ConnectionUpdate;
use std::str::FromStr;

#[derive(Debug, clap::Args)]
pub struct AddArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub linkedin_url: Option<String>,
}

#[derive(Debug, clap::Args)]
pub struct EditArgs {
    pub id: String,
    #[arg(long)]
    pub email: Option<String>,
    /// New name; pass an empty string to clear it
    #[arg(long)]
    pub name: Option<String>,
    /// New profile URL; pass an empty string to clear it
    #[arg(long)]
    pub linkedin_url: Option<String>,
}

#[derive(Debug, clap::Args)]
pub struct ShowArgs {
    pub id: String,
}

#[derive(Debug, clap::Args)]
pub struct ListArgs {
    /// Substring match against email and name
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long)]
    pub limit: Option<i64>,
    /// Opaque cursor from a previous page
    #[arg(long)]
    pub cursor: Option<String>,
}

#[derive(Debug, clap::Args)]
pub struct DeleteArgs {
    pub id: String,
}

#[derive(Debug, clap::Args)]
pub struct StatsArgs {}

pub fn add_connection(ctx: &Context<'_>, args: AddArgs) -> Result<()> {
    let connection = ctx.store.connections().create(
        now_utc(),
        &ctx.owner_email,
        CandidateInput {
            email: args.email,
            name: args.name,
            linkedin_url: args.linkedin_url,
        },
    )?;

    if ctx.json {
        print_json(&connection)?;
    } else {
        println!("created {} {}", connection.id, connection.email);
    }
    Ok(())
}

pub fn edit_connection(ctx: &Context<'_>, args: EditArgs) -> Result<()> {
    let id = parse_connection_id(&args.id)?;

    let mut update = ConnectionUpdate::default();
    if let Some(email) = args.email {
        update.email = Some(email);
    }
    if let Some(name) = args.name {
        update.name = Some(clear_when_blank(name));
    }
    if let Some(url) = args.linkedin_url {
        update.linkedin_url = Some(clear_when_blank(url));
    }

    if update.is_empty() {
        return Err(invalid_input("no updates provided"));
    }

    let connection = ctx
        .store
        .connections()
        .update(now_utc(), &ctx.owner_email, id, update)?;
    if ctx.json {
        print_json(&connection)?;
    } else {
        println!("updated {} {}", connection.id, connection.email);
    }
    Ok(())
}

pub fn show_connection(ctx: &Context<'_>, args: ShowArgs) -> Result<()> {
    let id = parse_connection_id(&args.id)?;
    let connection = ctx
        .store
        .connections()
        .get(&ctx.owner_email, id)?
        .ok_or_else(|| not_found("connection not found"))?;

    if ctx.json {
        print_json(&connection)?;
        return Ok(());
    }

    println!("id: {}", connection.id);
    println!("email: {}", connection.email);
    if let Some(name) = connection.name.as_deref() {
        println!("name: {}", name);
    }
    if let Some(url) = connection.linkedin_url.as_deref() {
        println!("linkedin_url: {}", url);
    }
    println!(
        "created_at: {}",
        format_timestamp_datetime(connection.created_at)
    );
    println!(
        "updated_at: {}",
        format_timestamp_datetime(connection.updated_at)
    );
    Ok(())
}

pub fn list_connections(ctx: &Context<'_>, args: ListArgs) -> Result<()> {
    let cursor = match args.cursor.as_deref() {
        Some(raw) => Some(Cursor::from_str(raw)?),
        None => None,
    };
    let query = ConnectionQuery {
        search: args.search,
        limit: args.limit.or(ctx.config.list_limit),
        cursor,
    };
    let page = ctx.store.connections().list(&ctx.owner_email, &query)?;

    let dto = ConnectionPageDto {
        data: page.connections,
        has_more: page.has_more,
        next_cursor: page.next_cursor.map(|cursor| cursor.to_string()),
    };

    if ctx.json {
        print_json(&dto)?;
        return Ok(());
    }

    if dto.data.is_empty() {
        println!("no connections");
        return Ok(());
    }

    for connection in &dto.data {
        let name = connection.name.as_deref().unwrap_or("-");
        println!(
            "{}  {}  {}  {}",
            connection.id,
            connection.email,
            name,
            format_timestamp_date(connection.created_at)
        );
    }
    if let Some(cursor) = dto.next_cursor.as_deref() {
        println!("next cursor: {}", cursor);
    }
    Ok(())
}

pub fn delete_connection(ctx: &Context<'_>, args: DeleteArgs) -> Result<()> {
    let id = parse_connection_id(&args.id)?;
    ctx.store.connections().delete(&ctx.owner_email, id)?;
    if ctx.json {
        print_json(&serde_json::json!({ "id": id }))?;
    } else {
        println!("deleted {}", id);
    }
    Ok(())
}

pub fn show_stats(ctx: &Context<'_>, _args: StatsArgs) -> Result<()> {
    let since = start_of_month_utc()?;
    let stats = ctx.store.connections().stats(&ctx.owner_email, since)?;
    let dto = ConnectionStatsDto {
        total: stats.total,
        with_linkedin: stats.with_linkedin,
        added_this_month: stats.recent,
    };

    if ctx.json {
        print_json(&dto)?;
        return Ok(());
    }

    println!("total: {}", dto.total);
    println!("with_linkedin: {}", dto.with_linkedin);
    println!("added_this_month: {}", dto.added_this_month);
    Ok(())
}

fn clear_when_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
