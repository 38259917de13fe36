use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use storefront::catalog::CatalogClient;
use storefront::config::Config;
use storefront::dialog::{DialogResult, PhotoPickerDialog, ShareOptionsDialog};
use storefront::models::{
    Category, Credentials, Product, Selection, ShareField, ShareOptions, SignupForm,
    format_amount,
};
use storefront::resource::RemoteResource;
use storefront::session::SessionStore;
use storefront::share::{
    BatchPolicy, ConsoleShare, DirectoryShare, ImageDownloader, ShareFlow, SharePlatform,
};

#[derive(Parser)]
#[command(name = "storefront", version, about = "Browse the catalog and share products")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List catalog categories
    Categories,
    /// List products, optionally within one category
    Products {
        #[arg(long)]
        category: Option<String>,
    },
    /// Show one product
    Product { id: String },
    /// Print the share text for a product without sharing it
    Compose {
        #[command(flatten)]
        target: ShareTarget,
    },
    /// Share a product summary (and its selected image)
    Share {
        #[command(flatten)]
        target: ShareTarget,
        /// Deliver into this directory instead of printing
        #[arg(long)]
        outbox: Option<PathBuf>,
    },
    /// Share selected photos of one color, one at a time
    SharePhotos {
        id: String,
        #[arg(long, default_value_t = 0)]
        color: usize,
        /// Image indices, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        photos: Vec<usize>,
        /// Keep going when a photo fails
        #[arg(long)]
        skip_failed: bool,
        #[arg(long)]
        outbox: Option<PathBuf>,
    },
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
}

#[derive(Args)]
struct ShareTarget {
    /// Product id
    id: String,
    #[arg(long, default_value_t = 0)]
    color: usize,
    #[arg(long, default_value_t = 0)]
    image: usize,
    /// Fields to leave out, comma separated
    #[arg(long, value_enum, value_delimiter = ',')]
    exclude: Vec<ShareField>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("storefront=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();
    let client = CatalogClient::new(&config.api_url);
    let session = SessionStore::new();

    match cli.command {
        Command::Categories => {
            let categories = RemoteResource::load(client.list_categories()).await;
            print_categories(&require(categories, "categories")?);
        }
        Command::Products { category } => {
            let products = RemoteResource::load(client.list_products(category.as_deref())).await;
            for product in require(products, "products")? {
                println!(
                    "{}  {}  ₹{}",
                    product.id,
                    product.name,
                    format_amount(product.prices.regular_price)
                );
            }
        }
        Command::Product { id } => {
            let product = RemoteResource::load(client.get_product(&id)).await;
            print_product(&require(product, "product")?);
        }
        Command::Compose { target } => {
            let product = load_product(&client, &target.id).await?;
            let options = pick_options(&target.exclude).await?;
            let flow = share_flow(&config, &client, ConsoleShare);
            let selection = Selection::new(target.color, target.image);
            let text = flow.compose_text(&product, selection, &options)?;
            println!("{}", text);
        }
        Command::Share { target, outbox } => {
            let product = load_product(&client, &target.id).await?;
            let options = pick_options(&target.exclude).await?;
            let selection = Selection::new(target.color, target.image);
            match outbox {
                Some(dir) => {
                    let flow = share_flow(&config, &client, DirectoryShare::new(dir));
                    share_product(&flow, &product, selection, &options).await?;
                }
                None => {
                    let flow = share_flow(&config, &client, ConsoleShare);
                    share_product(&flow, &product, selection, &options).await?;
                }
            }
        }
        Command::SharePhotos {
            id,
            color,
            photos,
            skip_failed,
            outbox,
        } => {
            let product = load_product(&client, &id).await?;
            let selection = Selection::new(color, 0);
            let policy = if skip_failed {
                BatchPolicy::SkipFailed
            } else {
                config.batch_policy
            };
            match outbox {
                Some(dir) => {
                    let flow = share_flow(&config, &client, DirectoryShare::new(dir))
                        .with_batch_policy(policy);
                    share_photos(&flow, &product, selection, &photos).await?;
                }
                None => {
                    let flow = share_flow(&config, &client, ConsoleShare).with_batch_policy(policy);
                    share_photos(&flow, &product, selection, &photos).await?;
                }
            }
        }
        Command::Login { email, password } => {
            let account = client.login(&Credentials { email, password }).await?;
            let started = session.begin(account);
            println!(
                "Welcome to the store, {}",
                started.account.name.or(started.account.email).unwrap_or_default()
            );
        }
        Command::Signup {
            name,
            email,
            password,
        } => {
            let account = client
                .signup(&SignupForm {
                    name,
                    email,
                    password,
                })
                .await?;
            session.begin(account);
            println!("Account created successfully");
        }
    }

    session.end();
    Ok(())
}

fn require<T>(resource: RemoteResource<T>, what: &str) -> Result<T> {
    match resource {
        RemoteResource::Loaded(value) => Ok(value),
        RemoteResource::Failed(reason) => bail!("Could not load {}: {}", what, reason),
        RemoteResource::Loading => bail!("{} did not finish loading", what),
    }
}

async fn load_product(client: &CatalogClient, id: &str) -> Result<Product> {
    require(RemoteResource::load(client.get_product(id)).await, "product")
}

fn share_flow<P: SharePlatform>(
    config: &Config,
    client: &CatalogClient,
    platform: P,
) -> ShareFlow<P> {
    let downloader = ImageDownloader::new(client.http().clone(), &config.cache_dir)
        .with_timeout(config.download_timeout);
    ShareFlow::new(config.composer(), downloader, platform).with_batch_policy(config.batch_policy)
}

/// Run the options dialog non-interactively: start from defaults and switch
/// off each excluded field.
async fn pick_options(exclude: &[ShareField]) -> Result<ShareOptions> {
    let (mut dialog, answer) = ShareOptionsDialog::open(ShareOptions::default());
    for field in exclude {
        if dialog.options().get(*field) {
            dialog.toggle(*field);
        }
    }
    dialog.confirm();

    match answer.result().await {
        DialogResult::Confirmed(options) => Ok(options),
        DialogResult::Cancelled => bail!("Share cancelled"),
    }
}

async fn share_product<P: SharePlatform>(
    flow: &ShareFlow<P>,
    product: &Product,
    selection: Selection,
    options: &ShareOptions,
) -> Result<()> {
    let outcome = flow.share(product, selection, options).await?;
    if options.image && !outcome.image_attached {
        eprintln!("Image unavailable, shared text only");
    }
    if !outcome.delivered {
        eprintln!("Share did not complete");
    }
    Ok(())
}

async fn share_photos<P: SharePlatform>(
    flow: &ShareFlow<P>,
    product: &Product,
    selection: Selection,
    photos: &[usize],
) -> Result<()> {
    let (mut dialog, answer) = PhotoPickerDialog::open(product, selection)?;
    for &index in photos {
        if !dialog.is_selected(index) {
            dialog.toggle(index)?;
        }
    }
    dialog.confirm();

    let DialogResult::Confirmed(picked) = answer.result().await else {
        bail!("Share cancelled");
    };

    let report = flow.share_selected_photos(product, selection, &picked).await?;
    for (index, reason) in &report.failed {
        eprintln!("Photo {} failed: {}", index, reason);
    }
    if !report.not_attempted.is_empty() {
        eprintln!("Skipped photos {:?} after failure", report.not_attempted);
    }
    println!("Shared {} photo(s)", report.shared.len());
    Ok(())
}

fn print_categories(categories: &[Category]) {
    if categories.is_empty() {
        println!("No categories available");
        return;
    }
    for category in categories {
        println!("{}  {}", category.id, category.name);
        if !category.description.is_empty() {
            println!("    {}", category.description);
        }
    }
}

fn print_product(product: &Product) {
    println!("{}", product.name);
    println!("{}", product.category.name);
    println!("₹{}", format_amount(product.prices.regular_price));
    if let Some(percent) = product.prices.discount_percent() {
        println!("MRP: ₹{} ({}% OFF)", format_amount(product.prices.mrp), percent);
    }
    println!("{}", if product.is_active { "In Stock" } else { "Out of Stock" });
    for (index, color) in product.colors.iter().enumerate() {
        println!("  [{}] {} ({} images)", index, color.color_name, color.images.len());
    }
    if !product.description.is_empty() {
        println!();
        println!("{}", product.description);
    }
}
