//! Context setup and per-command handlers.
//!
//! - `run()`: parses arguments, sets up logging and dispatches
//! - `init_context()`: resolves the data directory and opens the API
//! - `handle_*()`: call the API and print the `CmdResult`

use super::render::{print_messages, render_clients, render_config, render_visits};
use super::setup::{Cli, Commands};
use chrono::Local;
use clap::Parser;
use directories::ProjectDirs;
use planvisite::api::{ConfigAction, PlanApi, PlanPaths, PlanRequest, VisitUpdate};
use planvisite::codec::parse_amount;
use planvisite::config::PlanConfig;
use planvisite::error::{PlanError, Result};
use planvisite::index::VisitPosition;
use planvisite::model::{ClientId, NewClient, VisitDetails, DATE_FORMAT};
use planvisite::store::fs_backend::FsBackend;
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const HOME_ENV: &str = "PLANVISITE_HOME";
const LOG_ENV: &str = "PLANVISITE_LOG";

struct AppContext {
    api: PlanApi<FsBackend>,
    config: PlanConfig,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Add {
            name,
            address,
            city,
            region,
            phone,
        }) => handle_add(
            &mut ctx,
            NewClient::new(name, address, city)
                .with_region(region)
                .with_phone(phone),
        ),
        Some(Commands::Clients { query }) => handle_clients(&ctx, query.join(" ")),
        Some(Commands::ImportClients { file, delimiter }) => {
            handle_import_clients(&mut ctx, file, delimiter)
        }
        Some(Commands::Plan {
            date,
            clients,
            note,
            total,
            quote_number,
            quote_validity,
        }) => {
            let date =
                date.unwrap_or_else(|| Local::now().date_naive().format(DATE_FORMAT).to_string());
            let details = VisitDetails {
                note: note.unwrap_or_default(),
                total: total
                    .map(|t| parse_amount(&t, &ctx.config.currency_symbol))
                    .unwrap_or_default(),
                quote_number: quote_number.unwrap_or_default(),
                quote_validity: quote_validity.unwrap_or_default(),
            };
            handle_plan(
                &mut ctx,
                PlanRequest {
                    date,
                    client_ids: clients.into_iter().collect(),
                    details,
                },
            )
        }
        Some(Commands::Visits) | None => handle_visits(&ctx),
        Some(Commands::Edit {
            position,
            date,
            clients,
            note,
            total,
            quote_number,
            quote_validity,
        }) => {
            let mut update = VisitUpdate::new(position.parse::<VisitPosition>()?);
            update.date = date;
            update.client_ids = clients.map(|ids| ids.into_iter().collect::<BTreeSet<ClientId>>());
            update.note = note;
            update.total = total.map(|t| parse_amount(&t, &ctx.config.currency_symbol));
            update.quote_number = quote_number;
            update.quote_validity = quote_validity;
            handle_edit(&mut ctx, update)
        }
        Some(Commands::Delete { position }) => handle_delete(&mut ctx, position),
        Some(Commands::Export { format, output }) => handle_export(&ctx, format, output),
        Some(Commands::Import { file }) => handle_import(&mut ctx, file),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
    }
}

/// Logs go to stderr so exports on stdout stay clean.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = resolve_data_dir(cli.data_dir.clone())?;
    std::fs::create_dir_all(&data_dir)?;
    tracing::debug!(dir = %data_dir.display(), "using data directory");

    let config = PlanConfig::load(&data_dir)?;
    let backend = FsBackend::new(&data_dir);
    let api = PlanApi::open(backend, PlanPaths { data_dir });

    Ok(AppContext { api, config })
}

fn resolve_data_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "planvisite", "planvisite")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| PlanError::Config("cannot determine a data directory".to_string()))
}

fn handle_add(ctx: &mut AppContext, candidate: NewClient) -> Result<()> {
    let result = ctx.api.add_client(candidate)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_clients(ctx: &AppContext, query: String) -> Result<()> {
    let result = ctx.api.search_clients(&query)?;
    print!("{}", render_clients(&result.listed_clients));
    print_messages(&result.messages);
    Ok(())
}

fn handle_import_clients(
    ctx: &mut AppContext,
    file: PathBuf,
    delimiter: Option<char>,
) -> Result<()> {
    let delimiter = match delimiter {
        Some(c) if c.is_ascii() => c as u8,
        Some(c) => {
            return Err(PlanError::validation(format!(
                "delimiter must be a single ASCII character, got '{}'",
                c
            )))
        }
        None => ctx.config.delimiter()?,
    };
    let result = ctx.api.import_clients(&file, delimiter)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_plan(ctx: &mut AppContext, request: PlanRequest) -> Result<()> {
    let result = ctx.api.plan_visit(request)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_visits(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_visits()?;
    print!(
        "{}",
        render_visits(&result.listed_visits, &ctx.config.currency_symbol)
    );
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit(ctx: &mut AppContext, update: VisitUpdate) -> Result<()> {
    let result = ctx.api.update_visit(update)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, position: String) -> Result<()> {
    let result = ctx.api.delete_visit(position)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_export(ctx: &AppContext, format: Option<String>, output: Option<PathBuf>) -> Result<()> {
    let format = match format {
        Some(format) => format,
        None => ctx.config.export_format()?.to_string(),
    };
    let result = ctx.api.export_visits(&format, output.as_deref())?;
    match &result.export {
        Some(payload) => {
            print!("{}", payload);
            if !payload.ends_with('\n') {
                println!();
            }
        }
        None => print_messages(&result.messages),
    }
    Ok(())
}

fn handle_import(ctx: &mut AppContext, file: PathBuf) -> Result<()> {
    let result = ctx.api.import_visits(&file)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let show_all = matches!(action, ConfigAction::ShowAll);
    let result = ctx.api.config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            print!("{}", render_config(config));
        }
    }
    print_messages(&result.messages);
    Ok(())
}
