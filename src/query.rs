//! Search predicates for the customer and ticket listings.
//!
//! A single free-text term produces a case-insensitive OR match over a
//! fixed per-entity column list. Person names are matched against the
//! concatenated "first last" string, with spaces inside the term acting
//! as wildcards, so "john smith" matches first="John", last="Smith"
//! even though no stored column holds the full string.

use crate::types::{Customer, Ticket};

/// Case-insensitive substring match.
///
/// Uses `unicase` for correct Unicode case folding (handles Turkish i, German ß, etc.).
/// Note: This creates a folded string for the haystack, which is an allocation.
pub fn contains_case_insensitive(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let haystack_folded = unicase::UniCase::new(haystack).to_folded_case();
    let needle_folded = unicase::UniCase::new(needle).to_folded_case();
    haystack_folded.contains(&needle_folded)
}

fn fold(s: &str) -> String {
    unicase::UniCase::new(s).to_folded_case()
}

/// Match a term against the concatenated full name.
///
/// Whitespace splits the term into parts that must appear in order, each
/// as a substring of the folded "first last" concatenation.
fn full_name_matches(first: &str, last: &str, term: &str) -> bool {
    let full = fold(&format!("{} {}", first, last));
    let mut pos = 0;

    for part in term.split_whitespace() {
        let part = fold(part);
        match full[pos..].find(&part) {
            Some(offset) => pos += offset + part.len(),
            None => return false,
        }
    }
    true
}

/// Does this customer match the search term?
///
/// Columns searched: email, phone, city, state, zip, and the
/// concatenated full name.
pub fn customer_matches(customer: &Customer, term: &str) -> bool {
    contains_case_insensitive(&customer.email, term)
        || contains_case_insensitive(&customer.phone, term)
        || contains_case_insensitive(&customer.city, term)
        || contains_case_insensitive(&customer.state, term)
        || contains_case_insensitive(&customer.zip, term)
        || full_name_matches(&customer.first_name, &customer.last_name, term)
}

/// Does this ticket match the search term?
///
/// Columns searched: title, technician, and the owning customer's
/// searchable columns when the customer is present.
pub fn ticket_matches(ticket: &Ticket, customer: Option<&Customer>, term: &str) -> bool {
    if contains_case_insensitive(&ticket.title, term)
        || contains_case_insensitive(&ticket.tech, term)
    {
        return true;
    }
    customer.is_some_and(|c| customer_matches(c, term))
}
