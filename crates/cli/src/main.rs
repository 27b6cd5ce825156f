//! STS CLI - Command-line storefront.
//!
//! Drives the same catalog, cart, search and checkout code as the HTTP API.
//! Cart, language and the last order persist in the file store under
//! `STS_DATA_DIR`, so state carries across invocations.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! sts-cli catalog list --category phones --sort priceAsc
//! sts-cli catalog show 1
//!
//! # Search, once or as-you-type from stdin
//! sts-cli search iphoen
//! sts-cli search --interactive
//!
//! # Manage the cart
//! sts-cli cart add 3 --quantity 2 --color Black
//! sts-cli cart update 3-Black 3
//! sts-cli cart show
//!
//! # Check out and view the order
//! sts-cli checkout --name "Jane" --phone 70123456 --city Beirut --payment whishMoney
//! sts-cli order summary
//!
//! # Switch language
//! sts-cli language toggle
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Args, Parser, Subcommand};
use sts_core::PaymentMethod;

mod commands;

use commands::Context;

#[derive(Parser)]
#[command(name = "sts-cli")]
#[command(author, version, about = "STS storefront from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse products
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Fuzzy product search
    Search {
        /// Query to rank (omit with --interactive)
        query: Option<String>,

        /// Read queries line by line from stdin through the debounced session
        #[arg(short, long)]
        interactive: bool,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Place an order for the current cart
    Checkout(CheckoutArgs),
    /// Show the last order
    Order {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Display language
    Language {
        #[command(subcommand)]
        action: LanguageAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products
    List {
        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        brand: Option<String>,

        /// Only featured products
        #[arg(long)]
        featured: bool,

        /// `name`, `priceAsc`, `priceDesc`, `nameAsc` or `nameDesc`
        #[arg(long, default_value = "name")]
        sort: String,
    },
    /// Show one product
    Show {
        /// Product ID
        id: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart
    Show,
    /// Add a product
    Add {
        /// Product ID
        product_id: String,

        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        quantity: i64,

        /// Color (defaults to the product's first color)
        #[arg(short, long, conflicts_with = "no_color")]
        color: Option<String>,

        /// Add without a color
        #[arg(long)]
        no_color: bool,
    },
    /// Set a line's quantity (0 or less removes it)
    Update {
        /// Line ID, e.g. `1-Black`
        line_id: String,

        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a line
    Remove {
        /// Line ID, e.g. `1-Black`
        line_id: String,
    },
    /// Remove every line
    Clear,
}

#[derive(Args)]
struct CheckoutArgs {
    #[arg(long)]
    name: String,

    #[arg(long)]
    phone: String,

    #[arg(long)]
    city: String,

    #[arg(long)]
    street: Option<String>,

    #[arg(long)]
    building: Option<String>,

    #[arg(long)]
    floor: Option<String>,

    #[arg(long)]
    landmark: Option<String>,

    #[arg(long)]
    notes: Option<String>,

    /// `cash` or `whishMoney`
    #[arg(long, default_value = "cash")]
    payment: String,
}

#[derive(Subcommand)]
enum OrderAction {
    /// Show the last order, empty the cart and issue the notification link once
    Summary,
}

#[derive(Subcommand)]
enum LanguageAction {
    /// Show the current language
    Show,
    /// Switch between English and Arabic
    Toggle,
    /// Select a language (`en` or `ar`)
    Set { language: String },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sts_cli=info,sts_storefront=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    let ctx = Context::open()?;

    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::List {
                category,
                brand,
                featured,
                sort,
            } => {
                commands::catalog::list(&ctx, category.as_deref(), brand.as_deref(), featured, &sort)
                    .await?;
            }
            CatalogAction::Show { id } => commands::catalog::show(&ctx, &id).await?,
        },
        Commands::Search { query, interactive } => {
            if interactive {
                commands::search::interactive(&ctx).await?;
            } else {
                let query = query.ok_or_else(|| {
                    commands::CommandError::InvalidArgument(
                        "a query is required without --interactive".to_string(),
                    )
                })?;
                commands::search::once(&ctx, &query).await;
            }
        }
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&ctx).await,
            CartAction::Add {
                product_id,
                quantity,
                color,
                no_color,
            } => commands::cart::add(&ctx, &product_id, quantity, color, no_color).await?,
            CartAction::Update { line_id, quantity } => {
                commands::cart::update(&ctx, line_id, quantity).await;
            }
            CartAction::Remove { line_id } => commands::cart::remove(&ctx, line_id).await,
            CartAction::Clear => commands::cart::clear(&ctx).await,
        },
        Commands::Checkout(args) => {
            let payment_method = args
                .payment
                .parse::<PaymentMethod>()
                .map_err(commands::CommandError::InvalidArgument)?;
            let form = sts_storefront::services::checkout::CheckoutForm {
                name: args.name,
                phone: args.phone,
                city: args.city,
                street: args.street,
                building: args.building,
                floor: args.floor,
                landmark: args.landmark,
                notes: args.notes,
                payment_method,
            };
            commands::checkout::place(&ctx, form).await?;
        }
        Commands::Order { action } => match action {
            OrderAction::Summary => commands::checkout::summary(&ctx).await?,
        },
        Commands::Language { action } => match action {
            LanguageAction::Show => commands::language::show(&ctx).await,
            LanguageAction::Toggle => commands::language::toggle(&ctx).await,
            LanguageAction::Set { language } => commands::language::set(&ctx, &language).await?,
        },
    }
    Ok(())
}
