//! # `toolrec-cli` Library Crate
//!
//! Command handlers for the `toolrec` binary: the offline importer, schema
//! initialisation, and JSON views over the catalog for scripting.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::{path::PathBuf, sync::Arc};
use toolrec::{
    constants::DEFAULT_DB_FILE,
    ingest::{read_tools_csv, read_users_csv, rebuild},
    CatalogService, NewUser, SqliteStore, StoreError,
};
use tracing::{info, warn};

// --- CLI Argument Structs ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the SQLite database file.
    #[arg(long, global = true, env = "DB_URL", default_value = DEFAULT_DB_FILE)]
    pub db: String,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replace both tables with the rows of two CSV exports
    Import(ImportArgs),
    /// Create the database file and empty tables if they do not exist
    Init,
    /// Print every user as JSON
    Users,
    /// Print the tool catalog as JSON
    Tools(ToolsArgs),
    /// Print the tools a user has not purchased yet
    Recommend(RecommendArgs),
    /// Register a new user
    AddUser(AddUserArgs),
}

#[derive(Parser, Debug)]
pub struct ImportArgs {
    /// CSV export of the tools sheet.
    #[arg(long)]
    pub tools: PathBuf,
    /// CSV export of the users sheet.
    #[arg(long)]
    pub users: PathBuf,
}

#[derive(Parser, Debug)]
pub struct ToolsArgs {
    /// Only list tools whose Category matches exactly.
    #[arg(long)]
    pub category: Option<String>,
}

#[derive(Parser, Debug)]
pub struct RecommendArgs {
    pub user_id: String,
}

#[derive(Parser, Debug)]
pub struct AddUserArgs {
    #[arg(long)]
    pub user_id: String,
    /// A purchased tool title. Repeat for several purchases.
    #[arg(long = "purchase")]
    pub purchases: Vec<String>,
    #[arg(long)]
    pub user_category: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub experience_level: Option<String>,
    #[arg(long)]
    pub last_purchase_date: Option<String>,
    #[arg(long)]
    pub preferred_brand: Option<String>,
    #[arg(long)]
    pub specialization: Option<String>,
    #[arg(long)]
    pub budget_range: Option<String>,
}

impl From<AddUserArgs> for NewUser {
    fn from(args: AddUserArgs) -> Self {
        NewUser {
            user_id: args.user_id,
            user_category: args.user_category,
            location: args.location,
            experience_level: args.experience_level,
            previous_purchases: args.purchases,
            last_purchase_date: args.last_purchase_date,
            preferred_brand: args.preferred_brand,
            specialization: args.specialization,
            budget_range: args.budget_range,
        }
    }
}

// --- Output Structs ---

/// The JSON shape printed for table reads. A missing database prints empty
/// rows with `data_unavailable` set instead of failing.
#[derive(Serialize, Debug)]
pub struct TableOutput<T> {
    pub rows: Vec<T>,
    pub data_unavailable: bool,
}

impl<T> TableOutput<T> {
    pub fn from_load(result: Result<Vec<T>, StoreError>) -> Result<Self> {
        match result {
            Ok(rows) => Ok(Self {
                rows,
                data_unavailable: false,
            }),
            Err(StoreError::DataUnavailable(reason)) => {
                warn!("{reason}");
                Ok(Self {
                    rows: Vec::new(),
                    data_unavailable: true,
                })
            }
            Err(e) => Err(e.into()),
        }
    }
}

// --- Public Entrypoint ---

/// The main entry point for the `toolrec-cli` library.
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Import(args) => handle_import(&cli.db, args).await,
        Commands::Init => handle_init(&cli.db).await,
        Commands::Users => {
            let catalog = open_catalog(&cli.db).await?;
            print_json(&TableOutput::from_load(catalog.load_users().await)?)
        }
        Commands::Tools(args) => {
            let catalog = open_catalog(&cli.db).await?;
            let result = match args.category.as_deref() {
                Some(category) => catalog.load_tools_in_category(category).await,
                None => catalog.load_tools().await,
            };
            print_json(&TableOutput::from_load(result)?)
        }
        Commands::Recommend(args) => {
            let catalog = open_catalog(&cli.db).await?;
            print_json(&TableOutput::from_load(
                catalog.recommend(&args.user_id).await,
            )?)
        }
        Commands::AddUser(args) => {
            let catalog = open_catalog(&cli.db).await?;
            let user = catalog.add_user(args.into()).await?;
            print_json(&user)
        }
    }
}

// --- Command Handlers ---

/// Handles `toolrec import`. Both exports are parsed before the database is touched.
async fn handle_import(db_path: &str, args: ImportArgs) -> Result<()> {
    info!("Starting 'import' command with args: {:?}", args);
    let tools = read_tools_csv(&args.tools)?;
    let users = read_users_csv(&args.users)?;

    let db = create_database(db_path).await?;
    let summary = rebuild(&db, &tools, &users)
        .await
        .with_context(|| format!("Failed to rebuild '{db_path}'"))?;

    eprintln!(
        "Imported {} tools and {} users into '{}'.",
        summary.tools_imported, summary.users_imported, db_path
    );
    print_json(&summary)
}

/// Handles `toolrec init`.
async fn handle_init(db_path: &str) -> Result<()> {
    create_database(db_path).await?;
    let store = SqliteStore::open(db_path).await?;
    store.initialize_schema().await?;
    eprintln!("Initialized schema in '{db_path}'.");
    Ok(())
}

/// Opens `db_path` for writing, creating the file when it does not exist.
async fn create_database(db_path: &str) -> Result<turso::Database> {
    turso::Builder::new_local(db_path)
        .build()
        .await
        .map_err(|e| anyhow!("Failed to open database '{db_path}': {e}"))
}

async fn open_catalog(db_path: &str) -> Result<CatalogService> {
    let store = SqliteStore::open(db_path).await?;
    Ok(CatalogService::new(Arc::new(store)))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let output = serde_json::to_string_pretty(value)?;
    println!("{output}");
    Ok(())
}
