use crate::error::{Result, ShopdeskError};
use crate::forms::validate::{CustomerFields, validate_customer};
use crate::forms::{FieldErrors, SaveOutcome};
use crate::store::{ShopStore, repository};
use crate::types::{Customer, NEW_CUSTOMER_ID};
use crate::utils;

/// Customer form input. Blank optional fields are stored as absent.
#[derive(Debug, Clone, Default)]
pub struct CustomerForm {
    /// `NEW_CUSTOMER_ID` (0) means insert; any other id means update.
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address1: String,
    pub address2: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub notes: String,
    pub active: bool,
}

impl CustomerForm {
    pub fn from_customer(customer: &Customer) -> Self {
        CustomerForm {
            id: customer.id,
            first_name: customer.first_name.clone(),
            last_name: customer.last_name.clone(),
            email: customer.email.clone(),
            phone: customer.phone.clone(),
            address1: customer.address1.clone(),
            address2: customer.address2.clone().unwrap_or_default(),
            city: customer.city.clone(),
            state: customer.state.clone(),
            zip: customer.zip.clone(),
            notes: customer.notes.clone().unwrap_or_default(),
            active: customer.active,
        }
    }
}

fn none_if_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn check_form(form: &CustomerForm, store: &ShopStore) -> FieldErrors {
    let mut errors = validate_customer(&CustomerFields {
        first_name: &form.first_name,
        last_name: &form.last_name,
        email: &form.email,
        phone: &form.phone,
        address1: &form.address1,
        city: &form.city,
        state: &form.state,
        zip: &form.zip,
    });

    let exclude = if form.id == NEW_CUSTOMER_ID {
        None
    } else {
        Some(form.id)
    };
    if errors.get("email").is_empty() && store.email_in_use(&form.email, exclude) {
        errors.push("email", "Email address is already in use");
    }
    if errors.get("phone").is_empty() && store.phone_in_use(&form.phone, exclude) {
        errors.push("phone", "Phone number is already in use");
    }

    errors
}

/// Validate and persist a customer form against the current store snapshot.
///
/// Id 0 inserts with a freshly allocated id; any other id updates the
/// existing record, preserving its creation timestamp. Updating a missing
/// id is a not-found error, not a silent insert.
pub fn save_customer(form: &CustomerForm, store: &ShopStore) -> Result<SaveOutcome> {
    let errors = check_form(form, store);
    if !errors.is_empty() {
        return Ok(SaveOutcome::Invalid(errors));
    }

    let now = utils::iso_date();
    let (id, created, verb) = if form.id == NEW_CUSTOMER_ID {
        (store.next_customer_id(), now.clone(), "created")
    } else {
        let existing = store
            .get_customer(form.id)
            .ok_or(ShopdeskError::CustomerNotFound(form.id))?;
        (form.id, existing.created.clone(), "updated")
    };

    let customer = Customer {
        id,
        first_name: form.first_name.clone(),
        last_name: form.last_name.clone(),
        email: form.email.clone(),
        phone: form.phone.clone(),
        address1: form.address1.clone(),
        address2: none_if_blank(&form.address2),
        city: form.city.clone(),
        state: form.state.clone(),
        zip: form.zip.clone(),
        notes: none_if_blank(&form.notes),
        active: form.active,
        created,
        updated: now,
    };

    repository::save_customer(&customer)?;

    Ok(SaveOutcome::Saved {
        id,
        message: format!("Customer id {} {} successfully", id, verb),
    })
}
