use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, ShopdeskError};
use crate::types::{Customer, Ticket, UNASSIGNED_TECH};

static FRONTMATTER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^---\n(.*?)\n---\n(.*)$").unwrap());
static LINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\w[-\w]*):\s*(.*)$").unwrap());
static TITLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^#\s+(.*)$").unwrap());

/// Split a record file into its frontmatter block and markdown body.
fn split_frontmatter(content: &str) -> Result<(&str, &str)> {
    let captures = FRONTMATTER_RE
        .captures(content)
        .ok_or_else(|| ShopdeskError::InvalidFormat("missing YAML frontmatter".to_string()))?;

    let yaml = captures.get(1).map(|m| m.as_str()).unwrap_or("");
    let body = captures.get(2).map(|m| m.as_str()).unwrap_or("");
    Ok((yaml, body))
}

fn require<T>(value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| ShopdeskError::InvalidFormat(format!("missing field '{}'", field)))
}

/// Parse a customer file's content.
///
/// The format is:
/// ```text
/// ---
/// id: 17
/// first-name: Jane
/// last-name: Doe
/// ...
/// ---
/// Free-text notes (optional).
/// ```
pub fn parse_customer_content(content: &str) -> Result<Customer> {
    let (yaml, body) = split_frontmatter(content)?;

    let mut id = None;
    let mut first_name = None;
    let mut last_name = None;
    let mut email = None;
    let mut phone = None;
    let mut address1 = None;
    let mut address2 = None;
    let mut city = None;
    let mut state = None;
    let mut zip = None;
    let mut active = None;
    let mut created = None;
    let mut updated = None;

    for line in yaml.lines() {
        if let Some(caps) = LINE_RE.captures(line) {
            let key = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            let value = caps.get(2).map(|m| m.as_str()).unwrap_or("");

            match key {
                "id" => id = value.parse::<u32>().ok(),
                "first-name" => first_name = Some(value.to_string()),
                "last-name" => last_name = Some(value.to_string()),
                "email" => email = Some(value.to_string()),
                "phone" => phone = Some(value.to_string()),
                "address1" => address1 = Some(value.to_string()),
                "address2" => address2 = Some(value.to_string()),
                "city" => city = Some(value.to_string()),
                "state" => state = Some(value.to_string()),
                "zip" => zip = Some(value.to_string()),
                "active" => active = value.parse::<bool>().ok(),
                "created" => created = Some(value.to_string()),
                "updated" => updated = Some(value.to_string()),
                _ => {} // Ignore unknown fields
            }
        }
    }

    let notes = match body.trim() {
        "" => None,
        text => Some(text.to_string()),
    };

    Ok(Customer {
        id: require(id, "id")?,
        first_name: require(first_name, "first-name")?,
        last_name: require(last_name, "last-name")?,
        email: require(email, "email")?,
        phone: require(phone, "phone")?,
        address1: require(address1, "address1")?,
        address2,
        city: require(city, "city")?,
        state: require(state, "state")?,
        zip: require(zip, "zip")?,
        notes,
        active: active.unwrap_or(true),
        created: require(created, "created")?,
        updated: require(updated, "updated")?,
    })
}

/// Parse a ticket file's content.
///
/// The format is:
/// ```text
/// ---
/// id: 42
/// customer: 17
/// completed: false
/// tech: new-ticket@example.com
/// ...
/// ---
/// # Title
///
/// Description text (optional).
/// ```
pub fn parse_ticket_content(content: &str) -> Result<Ticket> {
    let (yaml, body) = split_frontmatter(content)?;

    let mut id = None;
    let mut customer_id = None;
    let mut completed = None;
    let mut tech = None;
    let mut created = None;
    let mut updated = None;

    for line in yaml.lines() {
        if let Some(caps) = LINE_RE.captures(line) {
            let key = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            let value = caps.get(2).map(|m| m.as_str()).unwrap_or("");

            match key {
                "id" => id = value.parse::<u32>().ok(),
                "customer" => customer_id = value.parse::<u32>().ok(),
                "completed" => completed = value.parse::<bool>().ok(),
                "tech" => tech = Some(value.to_string()),
                "created" => created = Some(value.to_string()),
                "updated" => updated = Some(value.to_string()),
                _ => {} // Ignore unknown fields
            }
        }
    }

    // Title is the first # heading; the rest of the body is the description.
    let title_match = TITLE_RE
        .captures(body)
        .and_then(|caps| caps.get(1))
        .ok_or_else(|| ShopdeskError::InvalidFormat("missing title heading".to_string()))?;
    let title = title_match.as_str().trim().to_string();

    let after_title = &body[title_match.end()..];
    let description = match after_title.trim() {
        "" => None,
        text => Some(text.to_string()),
    };

    Ok(Ticket {
        id: require(id, "id")?,
        customer_id: require(customer_id, "customer")?,
        title,
        description,
        completed: completed.unwrap_or(false),
        tech: tech.unwrap_or_else(|| UNASSIGNED_TECH.to_string()),
        created: require(created, "created")?,
        updated: require(updated, "updated")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_customer() {
        let content = r#"---
id: 17
first-name: Jane
last-name: Doe
email: jane@example.com
phone: 555-010-0100
address1: 123 Main Street
city: Springfield
state: IL
zip: 62704
active: true
created: 2024-01-05T12:00:00Z
updated: 2024-01-05T12:00:00Z
---
Prefers drop-off before noon.
"#;

        let customer = parse_customer_content(content).unwrap();
        assert_eq!(customer.id, 17);
        assert_eq!(customer.first_name, "Jane");
        assert_eq!(customer.last_name, "Doe");
        assert_eq!(customer.email, "jane@example.com");
        assert_eq!(customer.address2, None);
        assert!(customer.active);
        assert_eq!(
            customer.notes.as_deref(),
            Some("Prefers drop-off before noon.")
        );
    }

    #[test]
    fn test_parse_customer_defaults_active_true() {
        let content = r#"---
id: 3
first-name: Sam
last-name: Field
email: sam@example.com
phone: 555-010-0101
address1: 9 Elm Street Rear
city: Dover
state: DE
zip: 19901
created: 2024-02-01T08:00:00Z
updated: 2024-02-01T08:00:00Z
---
"#;

        let customer = parse_customer_content(content).unwrap();
        assert!(customer.active);
        assert_eq!(customer.notes, None);
    }

    #[test]
    fn test_parse_basic_ticket() {
        let content = r#"---
id: 42
customer: 17
completed: false
tech: new-ticket@example.com
created: 2024-01-06T09:00:00Z
updated: 2024-01-06T09:00:00Z
---
# Broken screen

Cracked in the top corner, flickers on boot.
"#;

        let ticket = parse_ticket_content(content).unwrap();
        assert_eq!(ticket.id, 42);
        assert_eq!(ticket.customer_id, 17);
        assert_eq!(ticket.title, "Broken screen");
        assert_eq!(
            ticket.description.as_deref(),
            Some("Cracked in the top corner, flickers on boot.")
        );
        assert!(!ticket.completed);
        assert!(ticket.is_unassigned());
    }

    #[test]
    fn test_parse_ticket_without_description() {
        let content = "---\nid: 1\ncustomer: 2\ncreated: 2024-01-01T00:00:00Z\nupdated: 2024-01-01T00:00:00Z\n---\n# Battery swap\n";
        let ticket = parse_ticket_content(content).unwrap();
        assert_eq!(ticket.title, "Battery swap");
        assert_eq!(ticket.description, None);
        assert_eq!(ticket.tech, UNASSIGNED_TECH);
    }

    #[test]
    fn test_parse_missing_frontmatter() {
        let content = "# No frontmatter\n\nJust content.";
        assert!(parse_ticket_content(content).is_err());
        assert!(parse_customer_content(content).is_err());
    }

    #[test]
    fn test_parse_missing_required_field() {
        let content = "---\nid: 9\n---\n# Incomplete\n";
        let err = parse_ticket_content(content).unwrap_err();
        assert!(err.to_string().contains("customer"));
    }

    #[test]
    fn test_parse_ticket_missing_title() {
        let content =
            "---\nid: 9\ncustomer: 1\ncreated: 2024-01-01T00:00:00Z\nupdated: 2024-01-01T00:00:00Z\n---\nno heading here\n";
        let err = parse_ticket_content(content).unwrap_err();
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn test_parse_ignores_unknown_fields() {
        let content = r#"---
id: 5
customer: 2
mystery-field: something
created: 2024-01-01T00:00:00Z
updated: 2024-01-01T00:00:00Z
---
# Fan replacement
"#;
        let ticket = parse_ticket_content(content).unwrap();
        assert_eq!(ticket.id, 5);
    }
}
