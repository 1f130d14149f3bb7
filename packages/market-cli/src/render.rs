//! Terminal rendering of listings and users.

use chrono::Utc;
use colored::Colorize;
use market_core::common::utils::{format_date, format_price, format_relative_time};
use market_core::config::{ConfigReport, KeyStatus};
use market_core::domains::listings::models::{Listing, ListingStatus};
use market_core::domains::users::models::User;

pub fn status_badge(status: ListingStatus) -> String {
    let label = status.label();
    match status {
        ListingStatus::Pending => label.yellow().to_string(),
        ListingStatus::Approved => label.green().to_string(),
        ListingStatus::Rejected => label.red().to_string(),
    }
}

pub fn listing_line(listing: &Listing) {
    println!(
        "{}  {}  {}  {}  {}",
        listing.id.to_string().dimmed(),
        listing.title.bold(),
        format_price(listing.price).bright_green(),
        listing.location,
        format_relative_time(listing.created_at, Utc::now()).dimmed(),
    );
}

pub fn queue_line(listing: &Listing) {
    println!(
        "{}  {}  {}  {}  {}",
        listing.id.to_string().dimmed(),
        status_badge(listing.status),
        listing.title.bold(),
        listing.vendor_name().unwrap_or("?"),
        format_price(listing.price),
    );
}

pub fn listing_detail(listing: &Listing) {
    println!("{}", listing.title.bold().bright_cyan());
    println!("{}", format_price(listing.price).bright_green().bold());
    println!();
    println!("{}", listing.description);
    println!();
    println!("Catégorie : {}", listing.category.label());
    println!("État      : {}", listing.condition.label());
    println!("Lieu      : {}", listing.location);
    println!("Statut    : {}", status_badge(listing.status));
    if let Some(vendor) = &listing.vendor {
        let badge = if vendor.verified { " ✓" } else { "" };
        println!("Vendeur   : {}{}", vendor.name, badge.bright_blue());
    }
    println!("Publié le : {}", format_date(listing.created_at));
    println!("Vues      : {}", listing.views);
    for image in &listing.images {
        println!("  {}", image.underline());
    }
}

pub fn user_line(user: &User) {
    let verified = if user.verified {
        "vérifié".green().to_string()
    } else {
        "non vérifié".dimmed().to_string()
    };
    println!(
        "{}  {}  {}  {}  {}  {}",
        user.id.to_string().dimmed(),
        user.name.bold(),
        user.email,
        user.role.label(),
        user.location,
        verified,
    );
}

pub fn section(title: &str, count: usize) {
    println!();
    println!("{} ({})", title.bright_cyan().bold(), count);
}

pub fn config_report(report: &ConfigReport) {
    println!("{}", "🔍 Vérification de la configuration".bright_cyan().bold());
    if !report.env_present {
        println!("{} {} introuvable", "❌".red(), report.env_path.display());
        println!("   Copiez .env.example vers .env puis renseignez vos clés Supabase.");
        return;
    }
    println!("{} {} trouvé", "✅".green(), report.env_path.display());
    key_line("SUPABASE_URL", report.url);
    key_line("SUPABASE_ANON_KEY", report.anon_key);

    println!();
    if report.is_ready() {
        println!("{}", "🎉 Configuration prête".green().bold());
    } else {
        println!("{}", "⚠️  Configuration incomplète".yellow().bold());
    }
}

fn key_line(name: &str, status: KeyStatus) {
    match status {
        KeyStatus::Set => println!("{} {} configurée", "✅".green(), name),
        KeyStatus::Placeholder => println!(
            "{} {} contient encore la valeur d'exemple",
            "⚠️ ".yellow(),
            name
        ),
        KeyStatus::Missing => println!("{} {} manquante", "❌".red(), name),
    }
}
