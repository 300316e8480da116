/// Shelf - custom lists of movies, series and albums
use clap::{Parser, Subcommand};
use shelf::{app::Shelf, config::ShelfConfig};
use shelf_core::{MediaKind, MembershipId, ShelfError};
use shelf_lists::{AddOutcome, SharedItem};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "shelf")]
#[command(about = "Manage custom lists of movies, series and albums", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./shelf.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Owner user ID (overrides the configured owner)
    #[arg(short, long, global = true)]
    owner: Option<i64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the owner's custom lists
    Lists,
    /// Show the resolved content of a list
    Show {
        /// List name
        list: String,
    },
    /// Create a list
    Create {
        /// List name
        name: String,
        /// Description
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Rename a list and/or change its description
    Rename {
        /// List ID
        id: i64,
        /// New name
        name: String,
        /// New description (kept if omitted)
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Delete a list
    Delete {
        /// List ID
        id: i64,
    },
    /// Add a movie, series or album to a list
    Add {
        /// List name
        list: String,
        /// Provider media ID
        media_id: String,
        /// Media kind: movie, series or album
        kind: MediaKind,
    },
    /// Remove an item from a list
    Remove {
        /// List name
        list: String,
        /// Membership ID, as printed by `show`
        membership_id: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries command output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shelf=info,shelf_lists=info,shelf_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = ShelfConfig::load(cli.config.as_deref())?;
    config.validate()?;

    let owner_id = config.owner_id(cli.owner)?;
    let shelf = Shelf::connect(&config, owner_id)?;

    match cli.command {
        Commands::Lists => {
            let lists = shelf.manager.lists_for_owner(owner_id).await?;
            if lists.is_empty() {
                println!("No lists");
            }
            for list in lists {
                println!("{}\t{}\t{}", list.id, list.name, list.description);
            }
        }
        Commands::Show { list } => {
            show_list(&shelf, &list).await?;
        }
        Commands::Create { name, description } => {
            let list = shelf
                .manager
                .create_list(owner_id, &name, &description)
                .await?;
            println!("Created list {} ({})", list.name, list.id);
        }
        Commands::Rename {
            id,
            name,
            description,
        } => {
            let list = shelf.find_list(id).await?;
            let description = description.unwrap_or_else(|| list.description.clone());
            let updated = shelf.manager.update_list(&list, &name, &description).await?;
            println!("Renamed list {} to {}", list.name, updated.name);
        }
        Commands::Delete { id } => {
            let list = shelf.find_list(id).await?;
            shelf.manager.delete_list(&list).await?;
            println!("Deleted list {}", list.name);
        }
        Commands::Add {
            list,
            media_id,
            kind,
        } => {
            shelf.view.open(owner_id, &list).await?;
            match shelf.view.add_item(&media_id, kind).await {
                AddOutcome::Added => {
                    println!("Added {} {} to {}", kind, media_id, list);
                    print_items(&shelf.view.display().items().await);
                }
                AddOutcome::Duplicate => println!("{} {} is already in {}", kind, media_id, list),
                AddOutcome::Failed(e) => return Err(e.into()),
            }
        }
        Commands::Remove {
            list,
            membership_id,
        } => {
            shelf.view.open(owner_id, &list).await?;
            shelf
                .view
                .remove_item(MembershipId::new(membership_id))
                .await?;
            println!("Removed item {} from {}", membership_id, list);
        }
    }

    Ok(())
}

async fn show_list(shelf: &Shelf, list: &str) -> anyhow::Result<()> {
    let items = tokio::select! {
        result = shelf.view.open(shelf.owner_id, list) => result?,
        _ = tokio::signal::ctrl_c() => {
            shelf.view.close().await;
            return Err(ShelfError::Cancelled.into());
        }
    };

    if items.is_empty() {
        println!("{} is empty", list);
    }
    print_items(&items);
    Ok(())
}

fn print_items(items: &[SharedItem]) {
    for item in items {
        println!(
            "{}\t{}\t{}\t{}",
            item.internal_id,
            item.kind(),
            item.details.display_title(),
            item.details.date().unwrap_or("-")
        );
    }
}
