use clap::{Parser, Subcommand};
use freakinbeats_core::{
    config::resolve_inventory_file, resolve, FacetCount, InventoryService, Listing, RecordUuid,
    SearchQuery, INVENTORY_FILE_ENV,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "freakinbeats")]
#[command(about = "Freakinbeats record shop CLI")]
struct Cli {
    /// Inventory export to read (defaults to ingest/inventory.json)
    #[arg(long, global = true, env = INVENTORY_FILE_ENV)]
    inventory: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the listing UUID found in a detail page path
    Resolve {
        /// Page path, e.g. /detail/550e8400-e29b-41d4-a716-446655440000
        path: String,
    },
    /// List all listings, newest first
    List,
    /// Show a single listing
    Show {
        /// Listing UUID
        uuid: String,
    },
    /// Search listings by artist or title
    Search {
        /// Text to look for
        query: String,
        /// Restrict to a genre
        #[arg(long)]
        genre: Option<String>,
        /// Restrict to a format (e.g. Vinyl)
        #[arg(long)]
        format: Option<String>,
        /// Restrict to an exact media condition (e.g. "Near Mint (NM or M-)")
        #[arg(long)]
        condition: Option<String>,
    },
    /// Print distinct artists, labels, years and conditions with counts
    Facets,
    /// Print inventory statistics
    Stats,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Resolve { path }) => match resolve(&path) {
            Some(uuid) => println!("{}", uuid),
            None => println!("absent"),
        },
        Some(Commands::List) => {
            let inventory = load_inventory(cli.inventory)?;
            if inventory.is_empty() {
                println!("No listings found.");
            }
            for listing in inventory.all() {
                print_summary(listing);
            }
        }
        Some(Commands::Show { uuid }) => {
            let uuid = RecordUuid::parse(&uuid)?;
            let inventory = load_inventory(cli.inventory)?;
            match inventory.get(&uuid) {
                Some(listing) => {
                    print_summary(listing);
                    if let Some(condition) = &listing.condition {
                        println!("  Condition: {}", condition);
                    }
                    if let Some(labels) = &listing.label_names {
                        println!("  Label: {}", labels);
                    }
                    if let Some(formats) = &listing.format_names {
                        println!("  Format: {}", formats);
                    }
                }
                None => eprintln!("No listing with UUID {}", uuid),
            }
        }
        Some(Commands::Search {
            query,
            genre,
            format,
            condition,
        }) => {
            let inventory = load_inventory(cli.inventory)?;
            let results = inventory.search(&SearchQuery {
                q: Some(query),
                artist: None,
                genre,
                format,
                condition,
            });
            if results.is_empty() {
                println!("No matches.");
            }
            for listing in results {
                print_summary(listing);
            }
        }
        Some(Commands::Facets) => {
            let facets = load_inventory(cli.inventory)?.facets();
            print_facets("Artists", &facets.artists);
            print_facets("Labels", &facets.labels);
            print_facets("Years", &facets.years);
            print_facets("Conditions", &facets.conditions);
            print_facets("Sleeve conditions", &facets.sleeve_conditions);
        }
        Some(Commands::Stats) => {
            let stats = load_inventory(cli.inventory)?.stats();
            println!("Total listings: {}", stats.total_listings);
            match stats.last_updated {
                Some(ts) => println!("Last updated: {}", ts.to_rfc3339()),
                None => println!("Last updated: never"),
            }
        }
        None => {
            println!("Use 'freakinbeats --help' for commands");
        }
    }

    Ok(())
}

fn load_inventory(
    override_file: Option<PathBuf>,
) -> Result<InventoryService, Box<dyn std::error::Error>> {
    let file = resolve_inventory_file(override_file)?;
    Ok(InventoryService::load(&file)?)
}

fn print_facets(title: &str, facets: &[FacetCount]) {
    println!("{} ({} unique)", title, facets.len());
    for facet in facets {
        println!("  {}: {}", facet.value, facet.count);
    }
}

fn print_summary(listing: &Listing) {
    let price = match (listing.price_value, listing.price_currency.as_deref()) {
        (Some(value), Some(currency)) => format!("{:.2} {}", value, currency),
        (Some(value), None) => format!("{:.2}", value),
        _ => "n/a".to_string(),
    };
    println!("{}  {}  [{}]", listing.uuid, listing.display_name(), price);
}
