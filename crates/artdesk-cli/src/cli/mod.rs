//! CLI entry and dispatch.

use std::sync::Arc;

use anyhow::{Context, Result};
use artdesk_core::{
    ArticleFields, ArticleId, Config, FileSessionStore, MemorySessionStore, SessionStore, Topic,
    logging,
};
use clap::Parser;

mod commands;

#[derive(Parser)]
#[command(name = "artdesk")]
#[command(version)]
#[command(about = "Terminal client for an articles API")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Keep the session token in memory only (nothing is written to disk)
    #[arg(long, global = true)]
    ephemeral: bool,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Log in and store the session token
    Login {
        /// Account username
        #[arg(short, long)]
        username: String,

        /// Account password (read from stdin when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Clear the stored session token
    Logout,

    /// Manage articles
    Articles {
        #[command(subcommand)]
        command: ArticleCommands,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Args, Debug, Clone)]
struct ArticleArgs {
    /// Article title
    #[arg(long)]
    title: String,

    /// Article body
    #[arg(long)]
    text: String,

    /// Article topic (JavaScript, React, Node)
    #[arg(long)]
    topic: Topic,
}

impl From<ArticleArgs> for ArticleFields {
    fn from(args: ArticleArgs) -> Self {
        ArticleFields {
            title: args.title,
            text: args.text,
            topic: args.topic,
        }
    }
}

#[derive(clap::Subcommand)]
enum ArticleCommands {
    /// List all articles
    List,
    /// Create an article
    Create {
        #[command(flatten)]
        fields: ArticleArgs,
    },
    /// Replace an article's title, text and topic
    Update {
        /// The ID of the article to update
        #[arg(value_name = "ARTICLE_ID")]
        id: ArticleId,

        #[command(flatten)]
        fields: ArticleArgs,
    },
    /// Delete an article
    Delete {
        /// The ID of the article to delete
        #[arg(value_name = "ARTICLE_ID")]
        id: ArticleId,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Set the API base URL
    SetUrl {
        /// Base URL, e.g. http://localhost:9000/api
        #[arg(value_name = "URL")]
        url: String,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::load().context("load config")?;

    // Logging is best effort; a read-only home must not block the client.
    let _log_guard = match logging::init(&config) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: file logging disabled: {e:#}");
            None
        }
    };

    let session: Arc<dyn SessionStore> = if cli.ephemeral {
        Arc::new(MemorySessionStore::new())
    } else {
        Arc::new(FileSessionStore::new())
    };

    let Some(command) = cli.command else {
        return commands::interactive::run(&config, session).await;
    };

    match command {
        Commands::Login { username, password } => {
            commands::auth::login(&config, session, &username, password).await
        }
        Commands::Logout => commands::auth::logout(&config, session),

        Commands::Articles { command } => match command {
            ArticleCommands::List => commands::articles::list(&config, session).await,
            ArticleCommands::Create { fields } => {
                commands::articles::create(&config, session, fields.into()).await
            }
            ArticleCommands::Update { id, fields } => {
                commands::articles::update(&config, session, id, fields.into()).await
            }
            ArticleCommands::Delete { id } => {
                commands::articles::delete(&config, session, id).await
            }
        },

        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::SetUrl { url } => commands::config::set_url(&url),
        },
    }
}
