use clap::{Parser, Subcommand};
use inspo_core::feed::filter_cards;
use inspo_core::{
    Card, CardDraft, CardId, CardPatch, CardStore, Category, CategoryFilter, CoreConfig, OwnerId,
};
use inspo_types::NonEmptyText;

#[derive(Parser)]
#[command(name = "inspo")]
#[command(about = "Inspiration cards notebook CLI")]
struct Cli {
    /// Use the local JSON store instead of the database
    #[arg(long)]
    local: bool,
    /// Data directory (defaults to INSPO_DATA_DIR, then ./inspo-data)
    #[arg(long)]
    data_dir: Option<String>,
    /// Owner id the cards are scoped to
    #[arg(long, default_value = "local")]
    owner: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List cards, newest first
    List {
        /// Category filter: all, inspiration, practice or memo
        #[arg(long, default_value = "all")]
        category: String,
    },
    /// Add a card
    Add {
        /// Card title
        title: String,
        /// Free-text content (optional)
        #[arg(long)]
        content: Option<String>,
        /// Category: inspiration, practice or memo
        #[arg(long, default_value = "inspiration")]
        category: String,
        /// Image URL (optional, not validated)
        #[arg(long)]
        image_url: Option<String>,
    },
    /// Delete a card by id
    Delete {
        /// Card id
        id: String,
    },
    /// Update fields of an existing card
    Update {
        /// Card id
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let data_dir = cli.data_dir.or_else(|| std::env::var("INSPO_DATA_DIR").ok());
    let config = CoreConfig::resolve(data_dir, cli.local);
    let store = config.open_store()?;
    let owner = OwnerId::new(cli.owner);

    match cli.command {
        Commands::List { category } => {
            let filter: CategoryFilter = category.parse()?;
            let cards = store.list(&owner)?;
            let filtered = filter_cards(&cards, filter);
            if filtered.is_empty() {
                println!("No cards found.");
            } else {
                for card in filtered {
                    print_card(card);
                }
            }
        }
        Commands::Add {
            title,
            content,
            category,
            image_url,
        } => {
            let category: Category = category.parse()?;
            let draft = CardDraft::new(title)?
                .with_category(category)
                .with_content(content)
                .with_image_url(image_url);
            let card = store.insert(&owner, draft)?;
            println!("Added card {}", card.id);
        }
        Commands::Delete { id } => {
            let id = CardId::new(id);
            if store.delete(&id)? {
                println!("Deleted card {id}");
            } else {
                println!("No card with id {id}");
            }
        }
        Commands::Update {
            id,
            title,
            content,
            category,
            image_url,
        } => {
            let patch = CardPatch {
                title: title.map(NonEmptyText::new).transpose()?,
                content,
                category: category.map(|c| c.parse::<Category>()).transpose()?,
                image_url,
            };
            if patch.is_empty() {
                println!("Nothing to update.");
            } else {
                let card = store.update(&CardId::new(id), patch)?;
                println!("Updated card {}", card.id);
                print_card(&card);
            }
        }
    }

    Ok(())
}

fn print_card(card: &Card) {
    let mut line = format!(
        "{}  [{}]  {}  ({})",
        card.id,
        card.category,
        card.title,
        card.created_at.format("%Y-%m-%d %H:%M")
    );
    if let Some(content) = &card.content {
        line.push_str(&format!("\n    {content}"));
    }
    if let Some(image_url) = &card.image_url {
        line.push_str(&format!("\n    image: {image_url}"));
    }
    println!("{line}");
}
