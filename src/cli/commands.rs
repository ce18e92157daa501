//! CLI command definitions for strapi-contacts.
//!
//! Each subcommand mirrors one screen of the contacts UI: the searchable
//! sidebar list, the detail view, the create and edit forms, the favorite
//! toggle and the delete action.

use clap::Parser;
use serde::Serialize;
use tracing::info;

use crate::config::ContactsConfig;
use crate::contacts::{ContactId, ContactMutation, ContactRecord, ContactsClient};
use crate::validation::{validate_contact_form, ContactForm};

/// Manage contacts stored in a Strapi CMS.
#[derive(Parser)]
#[command(name = "strapi-contacts")]
#[command(about = "Search, create, edit and delete contacts stored in a Strapi CMS")]
#[command(version)]
#[command(
    long_about = "strapi-contacts manages the `contacts` collection of a Strapi CMS.\n\nThe CMS location is read from STRAPI_URL (default http://localhost:1337).\n\nExample usage:\n  strapi-contacts list -q ada\n  strapi-contacts create --first Ada --last Lovelace"
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info", global = true)]
    pub log_level: String,

    /// CMS base URL. Overrides STRAPI_URL.
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// API token sent as a bearer credential. Overrides STRAPI_API_TOKEN.
    #[arg(long, global = true)]
    pub token: Option<String>,
}

/// Available CLI subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// List contacts, optionally filtered by a search term.
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show a single contact.
    Show(ShowArgs),

    /// Create a contact.
    #[command(alias = "new")]
    Create(CreateArgs),

    /// Edit a contact. All of first, last, twitter and avatar are required.
    Edit(EditArgs),

    /// Mark or unmark a contact as favorite.
    Favorite(FavoriteArgs),

    /// Delete a contact.
    #[command(alias = "rm")]
    Delete(DeleteArgs),
}

/// Arguments for `strapi-contacts list`.
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Search term matched against first name, last name and twitter handle.
    #[arg(short, long)]
    pub q: Option<String>,

    /// Number of contacts to fetch.
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Page to fetch (1-based).
    #[arg(long, default_value = "1")]
    pub page: u32,

    /// Output JSON instead of one line per contact.
    #[arg(short = 'j', long)]
    pub json: bool,
}

/// Arguments for `strapi-contacts show`.
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Contact id.
    pub id: String,

    /// Output JSON instead of a summary.
    #[arg(short = 'j', long)]
    pub json: bool,
}

/// Arguments for `strapi-contacts create`.
#[derive(Parser, Debug)]
pub struct CreateArgs {
    #[arg(long)]
    pub first: Option<String>,

    #[arg(long)]
    pub last: Option<String>,

    /// Avatar image URL.
    #[arg(long)]
    pub avatar: Option<String>,

    #[arg(long)]
    pub twitter: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,

    /// Mark the new contact as favorite.
    #[arg(long)]
    pub favorite: bool,
}

/// Arguments for `strapi-contacts edit`.
#[derive(Parser, Debug)]
pub struct EditArgs {
    /// Contact id.
    pub id: String,

    #[arg(long)]
    pub first: Option<String>,

    #[arg(long)]
    pub last: Option<String>,

    /// Avatar image URL.
    #[arg(long)]
    pub avatar: Option<String>,

    #[arg(long)]
    pub twitter: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,
}

/// Arguments for `strapi-contacts favorite`.
#[derive(Parser, Debug)]
pub struct FavoriteArgs {
    /// Contact id.
    pub id: String,

    /// Remove the favorite mark instead of setting it.
    #[arg(long)]
    pub unset: bool,
}

/// Arguments for `strapi-contacts delete`.
#[derive(Parser, Debug)]
pub struct DeleteArgs {
    /// Contact id.
    pub id: String,
}

/// Parse CLI arguments and return the Cli struct.
///
/// This allows main.rs to access CLI arguments (like log_level) before running commands.
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Run the CLI by parsing arguments and executing the command.
pub async fn run() -> anyhow::Result<()> {
    run_with_cli(parse_cli()).await
}

/// Run the CLI with the parsed arguments.
pub async fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    let config = build_config(cli.url.as_deref(), cli.token.as_deref())?;

    match cli.command {
        Commands::List(args) => run_list_command(&config, args).await,
        Commands::Show(args) => run_show_command(&config, args).await,
        Commands::Create(args) => run_create_command(&config, args).await,
        Commands::Edit(args) => run_edit_command(&config, args).await,
        Commands::Favorite(args) => run_favorite_command(&config, args).await,
        Commands::Delete(args) => run_delete_command(&config, args).await,
    }
}

fn build_config(url: Option<&str>, token: Option<&str>) -> anyhow::Result<ContactsConfig> {
    apply_overrides(ContactsConfig::from_env()?, url, token)
}

/// Applies `--url` / `--token` with the same rules as the environment:
/// a blank URL or an empty token leaves the setting untouched.
fn apply_overrides(
    mut config: ContactsConfig,
    url: Option<&str>,
    token: Option<&str>,
) -> anyhow::Result<ContactsConfig> {
    if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
        config = config.with_base_url(url);
    }
    if let Some(token) = token.filter(|t| !t.is_empty()) {
        config = config.with_api_token(token);
    }
    config.validate()?;
    Ok(config)
}

fn list_config(config: &ContactsConfig, args: &ListArgs) -> anyhow::Result<ContactsConfig> {
    let mut config = config.clone().with_page(args.page);
    if let Some(page_size) = args.page_size {
        config = config.with_page_size(page_size);
    }
    config.validate()?;
    Ok(config)
}

// ============================================================================
// Command Implementations
// ============================================================================

async fn run_list_command(config: &ContactsConfig, args: ListArgs) -> anyhow::Result<()> {
    let config = list_config(config, &args)?;
    let client = ContactsClient::from_config(&config)?;

    let q = args.q.as_deref().filter(|q| !q.is_empty());
    let contacts = client.list(q).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&ListOutput { q, contacts: &contacts })?);
    } else {
        print!("{}", render_contact_list(&contacts));
    }
    Ok(())
}

async fn run_show_command(config: &ContactsConfig, args: ShowArgs) -> anyhow::Result<()> {
    let client = ContactsClient::from_config(config)?;
    let id = ContactId::from(args.id);

    let Some(contact) = client.get(&id).await? else {
        anyhow::bail!("Not Found: no contact with id '{}'", id);
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&contact)?);
    } else {
        print!("{}", render_contact_detail(&contact));
    }
    Ok(())
}

async fn run_create_command(config: &ContactsConfig, args: CreateArgs) -> anyhow::Result<()> {
    let client = ContactsClient::from_config(config)?;
    let contact = client.create(&mutation_from_create_args(args)).await?;
    info!(id = %contact.id, "Contact created");
    println!("{}", contact.id);
    Ok(())
}

async fn run_edit_command(config: &ContactsConfig, args: EditArgs) -> anyhow::Result<()> {
    let id = ContactId::from(args.id.clone());
    let form = ContactForm {
        first: args.first,
        last: args.last,
        avatar: args.avatar,
        twitter: args.twitter,
        notes: args.notes,
        favorite: None,
    };
    let mutation = validate_contact_form(&form)?;

    let client = ContactsClient::from_config(config)?;
    let contact = client.update(&id, &mutation).await?;
    info!(id = %contact.id, "Contact updated");
    print!("{}", render_contact_detail(&contact));
    Ok(())
}

async fn run_favorite_command(config: &ContactsConfig, args: FavoriteArgs) -> anyhow::Result<()> {
    let client = ContactsClient::from_config(config)?;
    let contact = client
        .set_favorite(&ContactId::from(args.id), !args.unset)
        .await?;
    print!("{}", render_contact_list(std::slice::from_ref(&contact)));
    Ok(())
}

async fn run_delete_command(config: &ContactsConfig, args: DeleteArgs) -> anyhow::Result<()> {
    let client = ContactsClient::from_config(config)?;
    let id = ContactId::from(args.id);
    client.delete(&id).await?;
    info!(id = %id, "Contact deleted");
    Ok(())
}

// ============================================================================
// Rendering
// ============================================================================

#[derive(Serialize)]
struct ListOutput<'a> {
    q: Option<&'a str>,
    contacts: &'a [ContactRecord],
}

fn mutation_from_create_args(args: CreateArgs) -> ContactMutation {
    ContactMutation {
        id: None,
        first: args.first,
        last: args.last,
        avatar: args.avatar,
        twitter: args.twitter,
        notes: args.notes,
        favorite: args.favorite.then_some(true),
    }
}

/// One line per contact: id, display name and a star for favorites.
pub fn render_contact_list(contacts: &[ContactRecord]) -> String {
    if contacts.is_empty() {
        return "No contacts\n".to_string();
    }

    contacts
        .iter()
        .map(|contact| {
            let star = if contact.favorite { " ★" } else { "" };
            format!("{}\t{}{}\n", contact.id, contact.display_name(), star)
        })
        .collect()
}

/// Multi-line summary of a single contact.
pub fn render_contact_detail(contact: &ContactRecord) -> String {
    let mut out = String::new();
    let star = if contact.favorite { "★" } else { "☆" };
    out.push_str(&format!("{} {}\n", contact.display_name(), star));
    if let Some(handle) = contact.twitter_handle() {
        out.push_str(&format!("twitter: {}\n", handle));
    }
    if let Some(avatar) = contact.avatar.as_deref().filter(|a| !a.is_empty()) {
        out.push_str(&format!("avatar:  {}\n", avatar));
    }
    if let Some(notes) = contact.notes.as_deref().filter(|n| !n.is_empty()) {
        out.push_str(&format!("notes:   {}\n", notes));
    }
    out.push_str(&format!("id:      {}\n", contact.id));
    out.push_str(&format!("created: {}\n", contact.created_at.to_rfc3339()));
    out
}
