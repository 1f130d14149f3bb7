//! Command-line front end for the marketplace.
//!
//! Browsing needs no account. Vendor and admin commands sign in with
//! `--email`/`--password` (or `MARKET_EMAIL`/`MARKET_PASSWORD`).

mod render;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use market_core::common::{AppContext, ListingId, MarketError, UserId};
use market_core::config::{Config, ConfigReport};
use market_core::domains::auth::actions::{sign_in, sign_up};
use market_core::domains::auth::models::SignUpProfile;
use market_core::domains::listings::actions::{
    create_listing, fetch_listings, fetch_vendor_listings, find_listing, increment_views,
};
use market_core::domains::listings::data::{ListingQuery, NewListingInput};
use market_core::domains::listings::filter::{
    pending_count, BrowseSections, ListingFilter, ModerationQueueFilter, StatusFilter,
};
use market_core::domains::listings::models::{Category, Condition, ListingStatus};
use market_core::domains::listings::moderation::{moderate_listing, ModerationDecision};
use market_core::domains::users::actions::{list_users, set_verified};
use market_core::domains::users::filter::{count_by_role, RoleFilter, UserFilter};
use market_core::domains::users::models::{Role, User};
use market_core::kernel::MarketDeps;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "market")]
#[command(about = "GuinéeMarket - petites annonces")]
struct Cli {
    /// Account email for vendor and admin commands
    #[arg(long, global = true, env = "MARKET_EMAIL")]
    email: Option<String>,

    /// Account password
    #[arg(long, global = true, env = "MARKET_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse approved listings
    Browse {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        category: Option<Category>,
        #[arg(long)]
        condition: Option<Condition>,
        #[arg(long)]
        min_price: Option<f64>,
        #[arg(long)]
        max_price: Option<f64>,
        #[arg(long)]
        location: Option<String>,
    },

    /// Show one listing (counts a view)
    Show { id: ListingId },

    /// List your own listings
    Mine,

    /// Submit a listing for moderation
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        price: String,
        #[arg(long)]
        category: Option<Category>,
        #[arg(long)]
        condition: Option<Condition>,
        #[arg(long)]
        location: String,
        #[arg(long = "image")]
        images: Vec<String>,
    },

    /// Admin: moderation queue
    Queue {
        #[arg(long, default_value = "")]
        search: String,
        /// pending, approved, rejected or all
        #[arg(long, default_value = "pending", value_parser = parse_status_filter)]
        status: StatusFilter,
    },

    /// Admin: approve a pending listing
    Approve { id: ListingId },

    /// Admin: reject a pending listing
    Reject { id: ListingId },

    /// Admin: list accounts
    Users {
        #[arg(long, default_value = "")]
        search: String,
        /// client, vendor, admin or all
        #[arg(long, default_value = "all", value_parser = parse_role_filter)]
        role: RoleFilter,
    },

    /// Admin: mark an account as verified
    Verify {
        id: UserId,
        /// Withdraw verification instead
        #[arg(long)]
        revoke: bool,
    },

    /// Create an account
    SignUp {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long)]
        location: String,
        #[arg(long, default_value = "client")]
        role: Role,
    },

    /// Check the developer .env setup
    CheckConfig {
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
}

fn parse_status_filter(s: &str) -> Result<StatusFilter, String> {
    match s {
        "all" => Ok(StatusFilter::All),
        "pending" => Ok(StatusFilter::PendingOnly),
        other => other
            .parse::<ListingStatus>()
            .map(StatusFilter::Only)
            .map_err(|e| e.to_string()),
    }
}

fn parse_role_filter(s: &str) -> Result<RoleFilter, String> {
    match s {
        "all" => Ok(RoleFilter::All),
        other => other
            .parse::<Role>()
            .map(RoleFilter::Only)
            .map_err(|e| e.to_string()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,market_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Commands::CheckConfig { dir } = &cli.command {
        let report = ConfigReport::inspect(dir)?;
        render::config_report(&report);
        if !report.is_ready() {
            std::process::exit(1);
        }
        return Ok(());
    }

    let config = Config::from_env().context("Failed to load configuration")?;
    let deps = MarketDeps::supabase(config.client());
    let ctx = AppContext::new();

    if let Err(err) = run(&cli, &deps, &ctx).await {
        match err.downcast_ref::<MarketError>() {
            Some(market) => eprintln!("{} {}", "Erreur :".red().bold(), market.user_message()),
            None => eprintln!("{} {:#}", "Erreur :".red().bold(), err),
        }
        std::process::exit(1);
    }
    Ok(())
}

async fn run(cli: &Cli, deps: &MarketDeps, ctx: &AppContext) -> Result<()> {
    match &cli.command {
        Commands::Browse {
            search,
            category,
            condition,
            min_price,
            max_price,
            location,
        } => {
            let listings =
                fetch_listings(deps, &ListingQuery::new().status(ListingStatus::Approved)).await?;
            let filter = ListingFilter {
                search_term: search.clone(),
                category: *category,
                condition: *condition,
                min_price: *min_price,
                max_price: *max_price,
                location: location.clone(),
            };
            let sections = BrowseSections::build(&listings, &filter);
            if sections.is_empty() {
                println!("Aucune annonce ne correspond à votre recherche.");
                return Ok(());
            }
            if !sections.featured.is_empty() {
                render::section("⭐ À la une", sections.featured.len());
                sections.featured.iter().for_each(|l| render::listing_line(l));
            }
            render::section("Annonces", sections.others.len());
            sections.others.iter().for_each(|l| render::listing_line(l));
        }

        Commands::Show { id } => {
            let listing = find_listing(deps, *id)
                .await?
                .with_context(|| format!("Listing {id} not found"))?;
            increment_views(deps, listing.id).await;
            render::listing_detail(&listing);
        }

        Commands::Mine => {
            login(cli, deps, ctx).await?;
            let listings = fetch_vendor_listings(deps, ctx).await?;
            render::section("Mes annonces", listings.len());
            listings.iter().for_each(render::queue_line);
        }

        Commands::Add {
            title,
            description,
            price,
            category,
            condition,
            location,
            images,
        } => {
            let input = NewListingInput {
                title: title.clone(),
                description: description.clone(),
                price: price.clone(),
                images: images.clone(),
                category: *category,
                condition: *condition,
                location: location.clone(),
            };
            // Reject an incomplete form before asking for credentials.
            input.validate().map_err(MarketError::from)?;
            login(cli, deps, ctx).await?;
            let listing = create_listing(deps, ctx, &input).await?;
            println!(
                "{} Annonce {} envoyée en modération",
                "✅".green(),
                listing.id.to_string().bold()
            );
        }

        Commands::Queue { search, status } => {
            login(cli, deps, ctx).await?;
            let listings = fetch_listings(deps, &ListingQuery::new()).await?;
            let filter = ModerationQueueFilter {
                search_term: search.clone(),
                status: *status,
            };
            let found = filter.apply(&listings);
            println!(
                "{} en attente de modération",
                pending_count(&listings).to_string().yellow().bold()
            );
            render::section("Annonces", found.len());
            found.iter().for_each(|l| render::queue_line(l));
        }

        Commands::Approve { id } => moderate(cli, deps, ctx, *id, ModerationDecision::Approve).await?,
        Commands::Reject { id } => moderate(cli, deps, ctx, *id, ModerationDecision::Reject).await?,

        Commands::Users { search, role } => {
            let admin = login(cli, deps, ctx).await?;
            let users = list_users(deps, &admin).await?;
            let filter = UserFilter {
                search_term: search.clone(),
                role: *role,
            };
            let found = filter.apply(&users);
            render::section("Utilisateurs", found.len());
            println!(
                "{}",
                format!(
                    "vendeurs: {} · clients: {} · admins: {}",
                    count_by_role(&users, Role::Vendor),
                    count_by_role(&users, Role::Client),
                    count_by_role(&users, Role::Admin),
                )
                .dimmed()
            );
            found.iter().for_each(|u| render::user_line(u));
        }

        Commands::Verify { id, revoke } => {
            let admin = login(cli, deps, ctx).await?;
            let user = set_verified(deps, &admin, *id, !revoke).await?;
            render::user_line(&user);
        }

        Commands::SignUp {
            name,
            phone,
            location,
            role,
        } => {
            let (email, password) = credentials(cli)?;
            let profile = SignUpProfile {
                name: name.clone(),
                phone: phone.clone(),
                location: location.clone(),
                role: *role,
            };
            let outcome = sign_up(deps, ctx, email, password, &profile).await?;
            println!("{} Bienvenue {}", "✅".green(), outcome.user.name.bold());
            if !outcome.persisted {
                println!(
                    "{}",
                    "⚠️  Profil temporaire : il n'a pas pu être enregistré.".yellow()
                );
            }
        }

        Commands::CheckConfig { .. } => bail!("check-config runs before connecting"),
    }
    Ok(())
}

async fn moderate(
    cli: &Cli,
    deps: &MarketDeps,
    ctx: &AppContext,
    id: ListingId,
    decision: ModerationDecision,
) -> Result<()> {
    let admin = login(cli, deps, ctx).await?;
    let listing = find_listing(deps, id)
        .await?
        .with_context(|| format!("Listing {id} not found"))?;
    let updated = moderate_listing(deps, &admin, &listing, decision).await?;
    render::queue_line(&updated);
    Ok(())
}

fn credentials(cli: &Cli) -> Result<(&str, &str)> {
    match (cli.email.as_deref(), cli.password.as_deref()) {
        (Some(email), Some(password)) => Ok((email, password)),
        _ => bail!("--email and --password (or MARKET_EMAIL / MARKET_PASSWORD) are required"),
    }
}

async fn login(cli: &Cli, deps: &MarketDeps, ctx: &AppContext) -> Result<User> {
    let (email, password) = credentials(cli)?;
    match sign_in(deps, ctx, email, password).await? {
        Some(user) => Ok(user),
        None => bail!("Signed in, but the profile could not be loaded"),
    }
}
