mod error;
mod router;

use axum::Router;
use clap::{Parser, Subcommand};
use diesel::{Connection, SqliteConnection};
use dotenvy::dotenv;
use tower_http::trace::TraceLayer;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

use std::env;
use std::sync::Arc;

use spigot_core::Result;
use spigot_twitter::account::{self, NewTwitterAccount, TwitterAccount};
use spigot_twitter::ProxyState;

#[derive(Parser, Debug)]
#[command(name = "spigot")]
#[command(about = "A lightweight proxy that helps finnicky APIs work nicely with media archiving tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the proxy server
    Run,
    /// Add a Twitter account for the proxy to use
    Add {
        /// Account identifier; the lowest id is always used first
        user_id: i64,
        /// The account's auth_token cookie
        auth_token: String,
        /// The account's x-csrf-token header (ct0 cookie)
        csrf_token: String,
        /// The account's authorization header, including the "Bearer " prefix
        bearer_token: String,
    },
    /// List stored Twitter accounts
    List,
    /// Remove a Twitter account
    Del {
        /// The user id of the account to remove
        user_id: i64,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env()
        .unwrap()
        .add_directive("hyper::proto=info".parse().unwrap())
        .add_directive("reqwest=info".parse().unwrap());
    tracing_subscriber::fmt().with_env_filter(filter).compact().init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| "master.db".to_string());
    let db = &mut SqliteConnection::establish(&database_url)?;
    account::ensure_schema(db)?;

    match cli.command {
        Command::Run => serve(db).await,
        Command::Add {
            user_id,
            auth_token,
            csrf_token,
            bearer_token,
        } => {
            TwitterAccount::add(
                db,
                NewTwitterAccount {
                    user_id,
                    auth_token,
                    csrf_token,
                    bearer_token,
                },
            )?;
            println!("Insert successful.");
            Ok(())
        }
        Command::List => {
            let accounts = TwitterAccount::all(db)?;
            println!("Accounts for twitter:");
            for account in accounts {
                println!(
                    "user_id: {}, auth_token: {}, csrf_token: {}, bearer_token: {}",
                    account.user_id, account.auth_token, account.csrf_token, account.bearer_token
                );
            }
            Ok(())
        }
        Command::Del { user_id } => {
            if TwitterAccount::remove(db, user_id)? {
                println!("Delete successful.");
            } else {
                println!("No account with user_id {user_id}.");
            }
            Ok(())
        }
    }
}

async fn serve(db: &mut SqliteConnection) -> Result<()> {
    let accounts = TwitterAccount::all(db)?;

    // An empty credential table is valid: the server runs without mounting
    // the Twitter routes.
    let app = if accounts.is_empty() {
        tracing::warn!("No twitter accounts, so not hosting /twitter/*");
        Router::new()
    } else {
        tracing::info!("Loaded {} twitter account(s)", accounts.len());
        let state = Arc::new(ProxyState::new(&accounts)?);
        router::twitter_router().with_state(state)
    };
    let app = app.layer(TraceLayer::new_for_http());

    let addr = env::var("SERVER_ADDRESS").unwrap_or_else(|_| "127.0.0.1:5000".to_string());
    let addr = addr.parse().map_err(anyhow::Error::from)?;
    tracing::info!("Server starting at {}", addr);
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .map_err(anyhow::Error::from)?;
    Ok(())
}
