//! Terminal rendering of a completed simulation
//!
//! Pure string builders so the output can be asserted on in tests; the CLI
//! just prints what these return.

use std::fmt::Write as _;

use crate::catalog::Property;
use crate::conversation::{ActivityKind, SimulationResult};

const RULE: &str = "────────────────────────────────────────────────────────────";

/// Render a completed simulation for the terminal
pub fn render_result(property: &Property, result: &SimulationResult) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "  Your stay at {} ({})", property.name, property.location);
    let _ = writeln!(out, "{}", RULE);

    for day in &result.itinerary {
        let _ = writeln!(out);
        let _ = writeln!(out, "Day {}: {}", day.day, day.title);
        for activity in &day.activities {
            let marker = activity_marker(activity.kind);
            match &activity.location {
                Some(location) => {
                    let _ = writeln!(out, "  {} {}  {} ({})", marker, activity.time, activity.description, location);
                }
                None => {
                    let _ = writeln!(out, "  {} {}  {}", marker, activity.time, activity.description);
                }
            }
        }
    }

    if !result.personalized_tips.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Tips for your stay:");
        for tip in &result.personalized_tips {
            let _ = writeln!(out, "  • {}", tip);
        }
    }

    if !result.highlights.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Highlights:");
        for highlight in &result.highlights {
            let _ = writeln!(out, "  ★ {}", highlight);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", RULE);
    out
}

/// Short price line for the property listing
pub fn render_price(property: &Property) -> String {
    match &property.original_price {
        Some(original) => format!("{} (was {})", property.price, original),
        None => property.price.clone(),
    }
}

fn activity_marker(kind: ActivityKind) -> &'static str {
    match kind {
        ActivityKind::Arrival => "→",
        ActivityKind::Meal => "🍽",
        ActivityKind::Activity => "•",
        ActivityKind::Rest => "~",
        ActivityKind::Departure => "←",
    }
}
