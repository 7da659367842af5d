use std::process;

use clap::{Parser, Subcommand};
use evref_catalog::{Catalog, EventSource};
use evref_search::{EventQuery, SortKey, SourceFilter, search};

#[derive(Parser)]
#[command(name = "evref")]
#[command(about = "Windows Security and Sysmon event reference: lookup, search, ATT&CK mappings")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every event in the catalog as JSON
    List {
        /// Restrict to one source (windows-security, sysmon)
        #[arg(short, long)]
        source: Option<String>,

        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Show a single event by id
    Show {
        /// Event id, e.g. 4624
        id: String,

        /// Pretty-print JSON output
        #[arg(short, long, default_value_t = true)]
        pretty: bool,

        /// Include enhanced analyst content if the event has it
        #[arg(short, long)]
        enhanced: bool,
    },

    /// Search events with free text and filters
    Search {
        /// Free text, matched against id, name, description, category,
        /// technique ids/names, and scenarios
        query: Option<String>,

        /// Restrict to one source (windows-security, sysmon)
        #[arg(short, long)]
        source: Option<String>,

        /// Restrict to a category (can be specified multiple times)
        #[arg(short, long = "category")]
        categories: Vec<String>,

        /// Keep only events with ATT&CK technique mappings
        #[arg(long)]
        mitre_only: bool,

        /// Keep only events with enhanced analyst content
        #[arg(long)]
        enhanced_only: bool,

        /// Sort key: id, name, or category
        #[arg(long, default_value = "id")]
        sort: String,

        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Show the curated most-exploited events in ranked order
    Top {
        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Print every event id in corpus order, one per line
    Ids,

    /// Print the distinct event categories, one per line
    Categories,

    /// Audit the bundled tables: dropped corpus records, unresolved
    /// technique references, enhanced-content overrides
    Audit {
        /// Pretty-print the report JSON
        #[arg(short, long)]
        pretty: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let catalog = match Catalog::load() {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("Error loading catalog: {e}");
            process::exit(1);
        }
    };

    match cli.command {
        Commands::List { source, pretty } => cmd_list(&catalog, source, pretty),
        Commands::Show { id, pretty, enhanced } => cmd_show(&catalog, &id, pretty, enhanced),
        Commands::Search {
            query,
            source,
            categories,
            mitre_only,
            enhanced_only,
            sort,
            pretty,
        } => cmd_search(
            &catalog, query, source, categories, mitre_only, enhanced_only, &sort, pretty,
        ),
        Commands::Top { pretty } => print_json(&catalog.top_exploited(), pretty),
        Commands::Ids => {
            for id in catalog.event_ids() {
                println!("{id}");
            }
        }
        Commands::Categories => {
            for category in catalog.categories() {
                println!("{category}");
            }
        }
        Commands::Audit { pretty } => cmd_audit(&catalog, pretty),
    }
}

// ---------------------------------------------------------------------------
// Subcommand implementations
// ---------------------------------------------------------------------------

fn cmd_list(catalog: &Catalog, source: Option<String>, pretty: bool) {
    let query = EventQuery {
        source: parse_source(source.as_deref()),
        ..Default::default()
    };
    print_json(&search(catalog, &query), pretty);
}

fn cmd_show(catalog: &Catalog, id: &str, pretty: bool, enhanced: bool) {
    let Some(event) = catalog.event_by_id(id) else {
        eprintln!("Error: no event with id '{id}'");
        process::exit(1);
    };

    print_json(event, pretty);

    if enhanced {
        match catalog.enhanced_content(id) {
            Some(content) => print_json(content, pretty),
            None => eprintln!("No enhanced content for event {id}."),
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_search(
    catalog: &Catalog,
    text: Option<String>,
    source: Option<String>,
    categories: Vec<String>,
    mitre_only: bool,
    enhanced_only: bool,
    sort: &str,
    pretty: bool,
) {
    let Some(sort) = SortKey::from_str(sort) else {
        eprintln!("Error: unknown sort key '{sort}' (expected id, name, or category)");
        process::exit(1);
    };

    let query = EventQuery {
        text,
        source: parse_source(source.as_deref()),
        categories,
        mitre_only,
        enhanced_only,
        sort,
    };

    let hits = search(catalog, &query);
    eprintln!("{} of {} events match.", hits.len(), catalog.events().len());
    print_json(&hits, pretty);
}

fn cmd_audit(catalog: &Catalog, pretty: bool) {
    let report = catalog.load_report();
    println!("Catalog audit:");
    println!("  Events:                {}", catalog.events().len());
    println!("  Dropped techniques:    {}", report.dropped_techniques.len());
    println!("  Unresolved references: {}", report.unresolved_techniques.len());
    println!("  Enhanced overrides:    {}", report.enhanced_overrides.len());

    if !report.is_clean() {
        print_json(report, pretty);
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_source(source: Option<&str>) -> SourceFilter {
    match source {
        None => SourceFilter::All,
        Some(name) => match EventSource::from_str(name) {
            Some(source) => SourceFilter::Only(source),
            None => {
                eprintln!(
                    "Error: unknown source '{name}' (expected windows-security, sysmon, or other)"
                );
                process::exit(1);
            }
        },
    }
}

fn print_json(value: &impl serde::Serialize, pretty: bool) {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    match json {
        Ok(j) => println!("{j}"),
        Err(e) => {
            eprintln!("JSON serialization error: {e}");
            process::exit(1);
        }
    }
}
