//! Console output formatter for search results and chat

use colored::Colorize;
use tripscout_application::{ChatError, FindPlacesError, FindPlacesOutput};
use tripscout_domain::{ConversationTurn, FilterSpec, PlaceCandidate, Role};

/// Formats results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format a full search result
    pub fn format_places(output: &FindPlacesOutput) -> String {
        let mut text = String::new();

        text.push_str(&format!(
            "{} {}\n",
            "Search:".cyan().bold(),
            output.intent.raw_text()
        ));
        text.push_str(&format!(
            "{} {}\n",
            "Looking for:".cyan().bold(),
            output.intent.search_term()
        ));
        if !output.filter.is_unconstrained() {
            text.push_str(&format!(
                "{} {}\n",
                "Filters:".cyan().bold(),
                Self::describe_filter(&output.filter)
            ));
        }
        for issue in &output.dropped_filters {
            text.push_str(&format!("{} {}\n", "Ignored:".yellow(), issue));
        }
        text.push('\n');

        if output.places.is_empty() {
            text.push_str(&format!(
                "{}\n",
                format!(
                    "None of the {} places found match the filters.",
                    output.candidates_found
                )
                .yellow()
            ));
            return text;
        }

        for (index, place) in output.places.iter().enumerate() {
            text.push_str(&Self::format_place(index + 1, place));
        }
        text.push_str(&format!(
            "\n{}\n",
            format!(
                "{} of {} places shown",
                output.places.len(),
                output.candidates_found
            )
            .dimmed()
        ));
        text
    }

    /// Format as JSON
    pub fn format_json(output: &FindPlacesOutput) -> String {
        serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
    }

    /// One numbered place entry
    pub fn format_place(number: usize, place: &PlaceCandidate) -> String {
        let mut line = format!("{:>3}. {}", number, place.name.bold());
        if let Some(category) = &place.category {
            line.push_str(&format!(" {}", format!("({})", category).dimmed()));
        }
        if let Some(rating) = place.rating {
            line.push_str(&format!("  {}", format!("★ {:.1}", rating).yellow()));
        }
        if let Some(price) = place.price_level {
            line.push_str(&format!("  {}", "$".repeat(usize::from(price.max(1))).green()));
        }
        if let Some(open) = place.open_now {
            let state = if open { "open".green() } else { "closed".red() };
            line.push_str(&format!("  {}", state));
        }
        line.push('\n');

        let mut details = Vec::new();
        if let Some(address) = &place.address {
            details.push(address.clone());
        }
        details.push(format!("{:.5}, {:.5}", place.latitude, place.longitude));
        line.push_str(&format!("     {}\n", details.join(" · ").dimmed()));
        line
    }

    /// Short description of the applied constraints
    pub fn describe_filter(filter: &FilterSpec) -> String {
        let mut parts = Vec::new();
        if let Some(min) = filter.rating_min {
            parts.push(format!("rating ≥ {}", min));
        }
        if let Some(price) = filter.price_level {
            parts.push(format!("price ≤ {}", price));
        }
        if let Some(open) = filter.open_now {
            parts.push(if open { "open now" } else { "closed now" }.to_string());
        }
        parts.join(", ")
    }

    pub fn format_find_error(error: &FindPlacesError) -> String {
        format!("{} {}", "Error:".red().bold(), error.user_message())
    }

    pub fn format_chat_error(error: &ChatError) -> String {
        format!("{} {}", "Error:".red().bold(), error.user_message())
    }

    /// Assistant reply as shown in the chat REPL
    pub fn format_reply(reply: &str) -> String {
        format!("{} {}", "assistant>".green().bold(), reply)
    }

    /// Whole transcript, oldest first
    pub fn format_history(turns: &[ConversationTurn]) -> String {
        if turns.is_empty() {
            return "(no messages yet)".dimmed().to_string();
        }
        turns
            .iter()
            .map(|turn| {
                let label = match turn.role {
                    Role::User => "you".cyan().bold(),
                    Role::Assistant => "assistant".green().bold(),
                };
                format!("{}> {}", label, turn.content)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tripscout_domain::SearchIntent;

    fn output(places: Vec<PlaceCandidate>, found: usize) -> FindPlacesOutput {
        let intent = SearchIntent::new("cafes", Some("cafe".to_string()), BTreeMap::new());
        FindPlacesOutput {
            intent,
            filter: FilterSpec::default().with_rating_min(4.5),
            dropped_filters: Vec::new(),
            candidates_found: found,
            places,
        }
    }

    #[test]
    fn test_format_places_lists_each_place() {
        colored::control::set_override(false);
        let places = vec![
            PlaceCandidate::new("Café A", 38.7, -9.1).with_rating(4.7),
            PlaceCandidate::new("Café B", 38.8, -9.2).with_address("Lisbon"),
        ];

        let text = ConsoleFormatter::format_places(&output(places, 3));

        assert!(text.contains("1. Café A"));
        assert!(text.contains("★ 4.7"));
        assert!(text.contains("2. Café B"));
        assert!(text.contains("Lisbon"));
        assert!(text.contains("rating ≥ 4.5"));
        assert!(text.contains("2 of 3 places shown"));
    }

    #[test]
    fn test_format_places_empty_after_filter() {
        colored::control::set_override(false);
        let text = ConsoleFormatter::format_places(&output(vec![], 4));
        assert!(text.contains("None of the 4 places found match the filters."));
    }

    #[test]
    fn test_format_json_includes_places() {
        let json = ConsoleFormatter::format_json(&output(
            vec![PlaceCandidate::new("Café A", 38.7, -9.1)],
            1,
        ));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["places"][0]["name"], "Café A");
        assert_eq!(value["candidates_found"], 1);
    }

    #[test]
    fn test_describe_filter() {
        let filter = FilterSpec::default()
            .with_price_level(2)
            .with_open_now(true);
        assert_eq!(ConsoleFormatter::describe_filter(&filter), "price ≤ 2, open now");
    }

    #[test]
    fn test_format_history() {
        colored::control::set_override(false);
        let turns = vec![
            ConversationTurn::user("hello"),
            ConversationTurn::assistant("hi there"),
        ];
        assert_eq!(
            ConsoleFormatter::format_history(&turns),
            "you> hello\nassistant> hi there"
        );
    }
}
