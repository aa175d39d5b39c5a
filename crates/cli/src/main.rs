//! Shopdesk CLI - Catalog and order management.
//!
//! # Usage
//!
//! ```bash
//! # List products matching "samsung", cheapest first
//! sd-cli product list --search samsung --sort price
//!
//! # Add a product
//! sd-cli product add --name "Logitech MX Keys" --category accessory --price 2800000 --quantity 12
//!
//! # Create an order for two laptops and one iPad
//! sd-cli order create --customer "Nguyễn Văn A" --phone 0912345678 \
//!     --address "1 Lê Lợi, Quận 1" --item 1:2 --item 4:1
//!
//! # Complete it (debits stock)
//! sd-cli order status DH1735700000000 completed
//!
//! # Import a catalog file
//! sd-cli seed --file catalog.yaml
//! ```
//!
//! # Commands
//!
//! - `product` - List, add, edit, and delete catalog products
//! - `order` - List, show, create, and change the status of orders
//! - `seed` - Import products from a YAML catalog file
//!
//! # Environment Variables
//!
//! - `SHOPDESK_DATA_DIR` - Data directory (overridden by `--data-dir`)
//! - `SHOPDESK_SEED_CATALOG` - Install the starter catalog on first run
//! - `SHOPDESK_LOG_JSON` - Emit JSON log lines instead of text
//! - `RUST_LOG` - Log filter

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shopdesk_admin::AdminState;
use shopdesk_admin::config::AdminConfig;
use shopdesk_admin::storage::JsonFileStore;
use shopdesk_core::{Category, OrderId, OrderStatus, Price, ProductId};

mod commands;

use commands::{OrderSortArg, ProductSortArg, parse_line_item};

#[derive(Parser)]
#[command(name = "sd-cli")]
#[command(author, version, about = "Shopdesk catalog and order tools")]
struct Cli {
    /// Data directory (defaults to `SHOPDESK_DATA_DIR` or `./data`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage catalog products
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Manage orders
    Order {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Import products from a YAML catalog file
    Seed {
        /// Path to the catalog file
        #[arg(short, long)]
        file: PathBuf,

        /// Replace the whole catalog instead of appending
        #[arg(long)]
        replace: bool,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// List products
    List {
        /// Case-insensitive name filter
        #[arg(short, long)]
        search: Option<String>,

        /// Sort order
        #[arg(long, value_enum)]
        sort: Option<ProductSortArg>,

        /// Page number (1-based)
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Rows per page
        #[arg(long, default_value_t = shopdesk_admin::services::DEFAULT_PAGE_SIZE)]
        per_page: usize,
    },
    /// Add a product
    Add {
        #[command(flatten)]
        fields: ProductFields,
    },
    /// Edit a product
    Edit {
        /// Product ID
        id: ProductId,

        #[command(flatten)]
        fields: ProductFields,
    },
    /// Delete a product
    Delete {
        /// Product ID
        id: ProductId,
    },
}

#[derive(clap::Args)]
struct ProductFields {
    /// Product name
    #[arg(short, long)]
    name: String,

    /// Category (`laptop`, `phone`, `tablet`, `accessory`, or its label)
    #[arg(short, long)]
    category: Option<Category>,

    /// Unit price in dong
    #[arg(short, long)]
    price: Price,

    /// Units on hand
    #[arg(short, long)]
    quantity: i64,
}

#[derive(Subcommand)]
enum OrderAction {
    /// List orders
    List {
        /// Sort order
        #[arg(long, value_enum)]
        sort: Option<OrderSortArg>,

        /// Page number (1-based)
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Rows per page
        #[arg(long, default_value_t = shopdesk_admin::services::DEFAULT_PAGE_SIZE)]
        per_page: usize,
    },
    /// Show one order with its line items
    Show {
        /// Order ID (e.g. DH1735700000000)
        id: String,
    },
    /// Create an order
    Create {
        /// Customer name
        #[arg(long)]
        customer: String,

        /// Customer phone (10-11 digits)
        #[arg(long)]
        phone: String,

        /// Delivery address
        #[arg(long)]
        address: String,

        /// Line item as `<product_id>:<quantity>` (repeatable)
        #[arg(long = "item", value_parser = parse_line_item)]
        items: Vec<shopdesk_admin::models::LineItemInput>,
    },
    /// Change an order's status
    Status {
        /// Order ID
        id: String,

        /// New status (`pending`, `shipping`, `completed`, `cancelled`, or its label)
        status: OrderStatus,
    },
}

fn main() {
    init_tracing();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// Install the tracing subscriber. Defaults to info for our crates if
/// `RUST_LOG` is not set; JSON output when `SHOPDESK_LOG_JSON` is set.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shopdesk_admin=info,shopdesk_cli=info".into());

    let use_json = std::env::var("SHOPDESK_LOG_JSON").is_ok();
    let json_layer = use_json.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!use_json).then(|| tracing_subscriber::fmt::layer().with_target(false));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AdminConfig::from_env()?;
    if let Some(dir) = cli.data_dir {
        config = config.with_data_dir(dir);
    }

    let store = JsonFileStore::open(&config.data_dir)?;
    let mut state = AdminState::load(store, config.seed_catalog)?;

    match cli.command {
        Commands::Product { action } => match action {
            ProductAction::List {
                search,
                sort,
                page,
                per_page,
            } => commands::product::list(&state, search.as_deref(), sort, page, per_page),
            ProductAction::Add { fields } => {
                commands::product::add(&mut state, fields.into_input())?;
            }
            ProductAction::Edit { id, fields } => {
                commands::product::edit(&mut state, id, fields.into_input())?;
            }
            ProductAction::Delete { id } => commands::product::delete(&mut state, id)?,
        },
        Commands::Order { action } => match action {
            OrderAction::List {
                sort,
                page,
                per_page,
            } => commands::order::list(&state, sort, page, per_page),
            OrderAction::Show { id } => commands::order::show(&state, &OrderId::new(id))?,
            OrderAction::Create {
                customer,
                phone,
                address,
                items,
            } => {
                let input = shopdesk_admin::models::NewOrder {
                    customer_name: customer,
                    phone,
                    address,
                    items,
                };
                commands::order::create(&mut state, input)?;
            }
            OrderAction::Status { id, status } => {
                commands::order::set_status(&mut state, &OrderId::new(id), status)?;
            }
        },
        Commands::Seed { file, replace } => commands::seed::import_file(&mut state, &file, replace)?,
    }
    Ok(())
}

impl ProductFields {
    fn into_input(self) -> shopdesk_admin::models::ProductInput {
        shopdesk_admin::models::ProductInput {
            name: self.name,
            category: self.category,
            price: self.price,
            quantity: self.quantity,
        }
    }
}
