use std::error::Error;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use engine::{Engine, EngineError, User, UserId};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};

#[derive(Parser, Debug)]
#[command(name = "cost_manager_admin")]
#[command(about = "Admin utilities for the cost manager (bootstrap users)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./cost_manager.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    User(UserArgs),
}

#[derive(Args, Debug)]
struct UserArgs {
    #[command(subcommand)]
    command: UserCommand,
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    Create(UserCreateArgs),
    List,
}

#[derive(Args, Debug)]
struct UserCreateArgs {
    #[arg(long)]
    id: String,
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
    /// Birthday as YYYY-MM-DD.
    #[arg(long, value_parser = parse_birthday)]
    birthday: Option<NaiveDate>,
    #[arg(long)]
    marital_status: Option<String>,
}

fn parse_birthday(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|err| format!("invalid birthday: {err}"))
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = connect_db(&cli.database_url).await?;
    let engine = Engine::builder().database(db).build().await?;

    match cli.command {
        Command::User(UserArgs {
            command: UserCommand::Create(args),
        }) => {
            let user = User::new(
                UserId::new(&args.id)?,
                &args.first_name,
                &args.last_name,
                args.birthday,
                args.marital_status.as_deref(),
            )?;

            match engine.create_user(user).await {
                Ok(user) => println!("created user: {}", user.id),
                Err(EngineError::ExistingKey(id)) => {
                    eprintln!("user already exists: {id}");
                    std::process::exit(1);
                }
                Err(err) => return Err(err.into()),
            }
        }
        Command::User(UserArgs {
            command: UserCommand::List,
        }) => {
            for user in engine.users().await? {
                println!("{}\t{} {}", user.id, user.first_name, user.last_name);
            }
        }
    }

    Ok(())
}
