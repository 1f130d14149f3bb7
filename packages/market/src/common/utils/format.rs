//! Display formatting in the marketplace's locale (French, Guinean franc).

use chrono::{DateTime, Datelike, Utc};

/// Grouping separator used by the French number format (narrow no-break space).
const GROUP_SEPARATOR: char = '\u{202F}';

const MONTHS: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

/// `850000.0` -> `"850 000 GNF"`; amounts are rounded to whole francs.
pub fn format_price(price: f64) -> String {
    let rounded = price.round() as i64;
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 * 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(ch);
    }

    let sign = if rounded < 0 { "-" } else { "" };
    format!("{}{}\u{A0}GNF", sign, grouped)
}

/// `15 mars 2024`
pub fn format_date(date: DateTime<Utc>) -> String {
    format!(
        "{} {} {}",
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    )
}

/// Short "time ago" label; falls back to the full date after a week.
pub fn format_relative_time(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let hours = now.signed_duration_since(date).num_hours();
    if hours < 1 {
        return "Il y a moins d'une heure".to_string();
    }
    if hours < 24 {
        return format!("Il y a {}h", hours);
    }

    let days = hours / 24;
    if days < 7 {
        return format!("Il y a {}j", days);
    }

    format_date(date)
}
