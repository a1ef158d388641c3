use serde::Serialize;
use serde_json::json;

use crate::cli::OutputFormat;
use crate::database::models::{Court, CourtDetail, Review, User};

/// Output a success message, with the payload in JSON mode
pub fn output_success<T: Serialize>(output_format: OutputFormat, message: &str, data: &T) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let response = json!({
                "data": data,
                "message": message
            });
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Print a payload: pretty JSON, or the text rendering supplied by the caller
pub fn output_data<T: Serialize>(output_format: OutputFormat, data: &T, text: impl FnOnce(&T)) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(data)?),
        OutputFormat::Text => text(data),
    }
    Ok(())
}

pub fn print_user(user: &User) {
    println!("{} <{}>", user.name, user.email);
    println!("  id:      {}", user.id);
    println!("  role:    {}", user.role);
    println!("  joined:  {}", user.created_at.format("%Y-%m-%d"));
}

pub fn print_courts(courts: &Vec<Court>) {
    if courts.is_empty() {
        println!("No courts found");
        return;
    }

    println!("{:<6} {:<24} {:<16} {:>8} {:>7}", "ID", "NAME", "LOCATION", "PRICE", "RATING");
    for court in courts {
        println!(
            "{:<6} {:<24} {:<16} {:>8} {:>7}",
            court.id,
            truncate(&court.name, 24),
            truncate(&court.location, 16),
            format_price(court),
            format!("{:.1} ({})", court.rating, court.num_reviews),
        );
    }
}

pub fn print_court_detail(detail: &CourtDetail) {
    let court = &detail.court;
    println!("#{} {}", court.id, court.name);
    println!("  {}", court.description);
    println!("  location: {}, {}", court.location, court.address);
    println!("  price:    {}", format_price(court));
    println!("  rating:   {:.1} from {} review(s)", court.rating, court.num_reviews);
    if !detail.reviews.is_empty() {
        println!();
        print_reviews(&detail.reviews);
    }
}

pub fn print_reviews(reviews: &Vec<Review>) {
    if reviews.is_empty() {
        println!("No reviews yet");
        return;
    }

    for review in reviews {
        println!(
            "[{}] {} {} - {} (court {}, {})",
            review.id,
            stars(review.rating),
            review.author,
            review.comment,
            review.court_id,
            review.created_at.format("%Y-%m-%d"),
        );
    }
}

fn format_price(court: &Court) -> String {
    court.price.map(|p| p.to_string()).unwrap_or_else(|| "-".to_string())
}

fn stars(rating: i32) -> String {
    let filled = rating.clamp(0, 5) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        value.to_string()
    } else {
        let mut cut: String = value.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stars_are_clamped() {
        assert_eq!(stars(3), "★★★☆☆");
        assert_eq!(stars(9), "★★★★★");
    }

    #[test]
    fn long_names_are_truncated() {
        assert_eq!(truncate("Court1", 24), "Court1");
        assert_eq!(truncate("abcdefgh", 5), "abcd…");
    }
}
