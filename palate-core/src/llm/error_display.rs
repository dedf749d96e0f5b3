//! Error display helpers for external service failures
//!
//! For terminal output only. Error values and log fields stay plain text; the
//! CLI uses these helpers when it tells the user a result was degraded.

use console::style;

/// Get a styled error message
pub fn style_service_error(message: &str) -> String {
    style(message).red().to_string()
}

/// Get a styled warning message
pub fn style_service_warning(message: &str) -> String {
    style(message).yellow().to_string()
}

/// Get a styled service name, colored by the backing platform
pub fn style_service_name(service: &str) -> String {
    let styled_name = match service.to_lowercase().as_str() {
        "openai" => style(service).green(),
        "huggingface" => style(service).yellow(),
        _ => style(service).cyan(),
    };
    styled_name.to_string()
}

/// Format a service error for display
pub fn format_service_error(service: &str, error: &str) -> String {
    format!("{} {}", style_service_name(service), style_service_error(error))
}

/// Format a service warning for display
pub fn format_service_warning(service: &str, warning: &str) -> String {
    format!("{} {}", style_service_name(service), style_service_warning(warning))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatted_error_keeps_text() {
        console::set_colors_enabled(false);
        assert_eq!(
            format_service_error("huggingface", "HTTP 503"),
            "huggingface HTTP 503"
        );
        assert_eq!(
            format_service_warning("openai", "empty completion"),
            "openai empty completion"
        );
    }
}
