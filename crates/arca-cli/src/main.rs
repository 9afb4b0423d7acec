use anyhow::Result;
use arca_infrastructure::ConfigService;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::Context;

#[derive(Parser)]
#[command(name = "arca")]
#[command(about = "El Arca CLI - personal theological library client", long_about = None)]
struct Cli {
    /// Backend base URL (overrides ARCA_API_BASE_URL and config.toml)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show backend status
    Status,
    /// Show backend component diagnostics
    Diagnostics,
    /// Digital library
    Books {
        #[command(subcommand)]
        action: BooksAction,
    },
    /// Physical catalog
    Physical {
        #[command(subcommand)]
        action: PhysicalAction,
    },
    /// Notebook
    Notes {
        #[command(subcommand)]
        action: NotesAction,
    },
    /// Look up a term in the theological dictionary
    Dictionary {
        term: String,
        /// Interpretive perspective (defaults to reformado)
        #[arg(long)]
        perspective: Option<String>,
    },
    /// Ask the backend library assistant
    Ask { question: String },
    /// Ask Gemini as one of the personas
    Chat {
        message: String,
        /// Persona id (reformado, puritano, bautista, pentecostal, academico, pastoral, neofito)
        #[arg(long, default_value = "neofito")]
        persona: String,
        /// Notes or reading to embed as context
        #[arg(long, default_value = "")]
        context: String,
        /// Name to address the user by
        #[arg(long)]
        name: Option<String>,
        /// Ask for a short answer
        #[arg(long)]
        concise: bool,
    },
    /// List available personas
    Personas,
    /// Load every listing into the application store and summarize it
    Load {
        /// Account whose notes are loaded
        #[arg(long)]
        account: Option<String>,
    },
    /// Local configuration and preferences
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum BooksAction {
    /// List digital books
    List,
    /// Start a scan of the server's local library folder
    Scan,
    /// Start a Google Drive synchronization
    Sync,
    /// Print the viewer URL for a Drive file id
    ViewUrl { file_id: String },
}

#[derive(Subcommand)]
enum PhysicalAction {
    /// List physical books
    List,
    /// Look up an ISBN, optionally adding the result to the catalog
    Isbn {
        isbn: String,
        #[arg(long)]
        add: bool,
    },
}

#[derive(Subcommand)]
enum NotesAction {
    /// List notes
    List {
        /// Only notes owned by this user
        #[arg(long)]
        user: Option<String>,
    },
    /// Create a note
    Create {
        title: String,
        /// HTML content
        content: String,
        #[arg(long)]
        keywords: Option<String>,
        /// Owner account id
        #[arg(long)]
        user: Option<String>,
    },
    /// Delete a note
    Delete {
        id: i64,
        /// Owner account id
        #[arg(long)]
        user: Option<String>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the resolved configuration
    Show,
    /// Persist the Gemini API key
    SetKey { key: String },
    /// Persist the theme (auto, light, dark)
    Theme { theme: String },
    /// Persist the display name; omit to clear it
    User { name: Option<String> },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let mut config = ConfigService::default().get_config();
    if let Some(api_url) = cli.api_url {
        config.api_base_url = api_url.trim_end_matches('/').to_string();
    }
    tracing::debug!(api_base_url = %config.api_base_url, "Using backend");
    let ctx = Context::new(config);

    match cli.command {
        Commands::Status => commands::system::status(&ctx).await?,
        Commands::Diagnostics => commands::system::diagnostics(&ctx).await?,
        Commands::Books { action } => match action {
            BooksAction::List => commands::library::list_books(&ctx).await?,
            BooksAction::Scan => commands::library::scan(&ctx).await?,
            BooksAction::Sync => commands::library::sync_drive(&ctx).await?,
            BooksAction::ViewUrl { file_id } => commands::library::view_url(&ctx, &file_id),
        },
        Commands::Physical { action } => match action {
            PhysicalAction::List => commands::library::list_physical(&ctx).await?,
            PhysicalAction::Isbn { isbn, add } => commands::library::isbn(&ctx, &isbn, add).await?,
        },
        Commands::Notes { action } => match action {
            NotesAction::List { user } => commands::notes::list(&ctx, user.as_deref()).await?,
            NotesAction::Create {
                title,
                content,
                keywords,
                user,
            } => {
                commands::notes::create(&ctx, title, content, keywords, user.as_deref()).await?
            }
            NotesAction::Delete { id, user } => {
                commands::notes::delete(&ctx, id, user.as_deref()).await?
            }
        },
        Commands::Dictionary { term, perspective } => {
            commands::assistant::dictionary(&ctx, &term, perspective.as_deref()).await?
        }
        Commands::Ask { question } => commands::assistant::ask(&ctx, &question).await?,
        Commands::Chat {
            message,
            persona,
            context,
            name,
            concise,
        } => {
            commands::assistant::chat(&ctx, &message, &persona, &context, name, concise).await?
        }
        Commands::Personas => commands::assistant::personas(),
        Commands::Load { account } => commands::library::load(&ctx, account.as_deref()).await?,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&ctx)?,
            ConfigAction::SetKey { key } => commands::config::set_key(&ctx, &key)?,
            ConfigAction::Theme { theme } => commands::config::set_theme(&ctx, &theme)?,
            ConfigAction::User { name } => commands::config::set_user(&ctx, name.as_deref())?,
        },
    }

    Ok(())
}
