use crate::commands::print_json;
use crate::error::invalid_input;
use anyhow::Result;
use reachpilot_core::dto::ValidationReportDto;
use reachpilot_core::rules::{validate_connection, CandidateInput};

/// Runs field validation without touching the database.
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub linkedin_url: Option<String>,
}

pub fn check(json: bool, args: CheckArgs) -> Result<()> {
    let outcome = validate_connection(&CandidateInput {
        email: args.email,
        name: args.name,
        linkedin_url: args.linkedin_url,
    });
    let report = ValidationReportDto::from(&outcome);

    if json {
        print_json(&report)?;
    } else if report.is_valid {
        println!("valid");
        println!("email: {}", report.normalized.email);
        if let Some(name) = report.normalized.name.as_deref() {
            println!("name: {}", name);
        }
        if let Some(url) = report.normalized.linkedin_url.as_deref() {
            println!("linkedin_url: {}", url);
        }
    } else {
        println!("invalid");
        for (field, message) in &report.errors {
            println!("{}: {}", field, message);
        }
    }

    if report.is_valid {
        Ok(())
    } else {
        Err(invalid_input("validation failed"))
    }
}
