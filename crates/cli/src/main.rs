//! Wardrobe CLI - browse the shop and place orders from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Log in (the token is kept in the session file)
//! wardrobe login -e ada@example.com -p secret
//!
//! # Browse
//! wardrobe products --query tee --gender women --category t-shirt
//! wardrobe show 64f1c0ffee
//!
//! # Order and review
//! wardrobe order 64f1c0ffee 64f1decade
//! wardrobe orders
//!
//! # Admins only
//! wardrobe add-product --name "Red Tee" --description "Cotton" --price 19.99 --gender men
//! ```
//!
//! # Environment Variables
//!
//! - `WARDROBE_API_URL` - Base URL of the shop API
//! - `WARDROBE_SESSION_FILE` - Where the login is stored
//! - `WARDROBE_PASSWORD` - Password for `login` and `register`

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use wardrobe_core::catalog::NewProductForm;
use wardrobe_storefront::api::ApiClient;
use wardrobe_storefront::config::ApiConfig;

mod commands;
mod session;

use commands::Context;
use session::SessionFile;

#[derive(Parser)]
#[command(name = "wardrobe")]
#[command(author, version, about = "Wardrobe shop client")]
struct Cli {
    /// Base URL of the shop API
    #[arg(long, env = "WARDROBE_API_URL", default_value = "http://localhost:5000/api")]
    api_url: String,

    /// File holding the login between runs
    #[arg(long, env = "WARDROBE_SESSION_FILE", default_value = ".wardrobe-session.json")]
    session_file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products
    Products {
        /// Case-insensitive name search
        #[arg(short, long, default_value = "")]
        query: String,

        /// all, men or women
        #[arg(short, long, default_value = "all")]
        gender: String,

        /// t-shirt, shirt, pant, shoes or other
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Show one product
    Show {
        /// Product id
        id: String,
    },
    /// Log in and remember the session
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long, env = "WARDROBE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account
    Register {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long, env = "WARDROBE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Place an order for the given product ids
    Order {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Show your order history
    Orders,
    /// Add a product (admin only)
    AddProduct {
        #[arg(long)]
        name: String,

        #[arg(long)]
        description: String,

        #[arg(long)]
        price: String,

        #[arg(long, default_value = "0")]
        stock: String,

        /// T-shirt, Shirt, Pant, Shoes or Other
        #[arg(long, default_value = "")]
        category: String,

        /// men or women
        #[arg(long)]
        gender: String,

        /// Comma separated, e.g. "S, M, L"
        #[arg(long, default_value = "")]
        sizes: String,

        /// Comma separated
        #[arg(long, default_value = "")]
        colors: String,

        /// png, jpg, jpeg or gif
        #[arg(long)]
        image: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Log to stderr so command output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("wardrobe_cli=warn,wardrobe_storefront=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let api = ApiClient::new(&ApiConfig::from_base(&cli.api_url)?);
    let ctx = Context {
        api,
        session: SessionFile::new(cli.session_file),
    };

    match cli.command {
        Commands::Products {
            query,
            gender,
            category,
        } => commands::catalog::list(&ctx, &query, &gender, category.as_deref()).await?,
        Commands::Show { id } => commands::catalog::show(&ctx, &id).await?,
        Commands::Login { email, password } => {
            commands::account::login(&ctx, &email, &password).await?;
        }
        Commands::Register {
            name,
            email,
            password,
        } => commands::account::register(&ctx, &name, &email, &password).await?,
        Commands::Logout => commands::account::logout(&ctx)?,
        Commands::Order { ids } => commands::orders::place(&ctx, &ids).await?,
        Commands::Orders => commands::orders::list(&ctx).await?,
        Commands::AddProduct {
            name,
            description,
            price,
            stock,
            category,
            gender,
            sizes,
            colors,
            image,
        } => {
            let form = NewProductForm {
                name,
                description,
                price,
                stock,
                category,
                gender,
                sizes,
                colors,
            };
            commands::admin::add_product(&ctx, &form, image.as_deref()).await?;
        }
    }
    Ok(())
}
