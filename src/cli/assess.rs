use super::{notify_degraded, print_json};
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use palate_core::{FeedbackEngine, OrderedItem};
use regex::Regex;

#[allow(clippy::expect_used)]
static QUANTITY_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\s*[xX]\s+(\S.*)$").expect("quantity pattern is valid"));

/// Handle the assess command
pub async fn handle_assess_command(
    engine: &FeedbackEngine,
    customer: &str,
    items: &[String],
) -> Result<()> {
    let ordered: Vec<OrderedItem> = items.iter().map(|raw| parse_item(raw)).collect();
    let note = engine
        .assess(customer, &ordered)
        .await
        .context("Invalid order")?;
    if note.is_error {
        notify_degraded("advisor", "no advisor note; showing the standard text");
    }
    print_json(&note)
}

/// "2x Pad Thai" or "2 x Pad Thai" sets the quantity; anything else is a name.
pub fn parse_item(raw: &str) -> OrderedItem {
    let raw = raw.trim();
    let Some(captures) = QUANTITY_PREFIX.captures(raw) else {
        return OrderedItem::new(raw);
    };

    match captures[1].parse::<u32>() {
        Ok(quantity) if quantity > 0 => OrderedItem {
            quantity,
            ..OrderedItem::new(captures[2].trim())
        },
        _ => OrderedItem::new(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_item_quantities() {
        let item = parse_item("2x Pad Thai");
        assert_eq!(item.name, "Pad Thai");
        assert_eq!(item.quantity, 2);

        let item = parse_item(" 3 X Gyoza ");
        assert_eq!(item.name, "Gyoza");
        assert_eq!(item.quantity, 3);
    }

    #[test]
    fn test_parse_item_plain_names() {
        assert_eq!(parse_item("Mexican Taco").name, "Mexican Taco");
        assert_eq!(parse_item("Mexican Taco").quantity, 1);
        assert_eq!(parse_item("0x Soup").name, "0x Soup");
        assert_eq!(parse_item("Xiaolongbao").name, "Xiaolongbao");
    }

    #[test]
    fn test_x_inside_a_name_is_not_a_quantity() {
        let item = parse_item("2 Xiaolongbao");
        assert_eq!(item.name, "2 Xiaolongbao");
        assert_eq!(item.quantity, 1);

        let item = parse_item("Texas Brisket");
        assert_eq!(item.name, "Texas Brisket");

        let item = parse_item("2x Xiaolongbao");
        assert_eq!(item.name, "Xiaolongbao");
        assert_eq!(item.quantity, 2);

        assert_eq!(parse_item("12xl Pizza").name, "12xl Pizza");
    }
}
