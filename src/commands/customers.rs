//! Customer listing and mutation commands.

use serde_json::json;

use crate::commands::{ListArgs, grid_state_from_args, report_field_errors};
use crate::config::Config;
use crate::display;
use crate::error::{Result, ShopdeskError};
use crate::forms::{CustomerForm, SaveOutcome, save_customer};
use crate::grid::{GridState, compute_grid, customer_columns};
use crate::store::ShopStore;
use crate::types::NEW_CUSTOMER_ID;

/// `shopdesk customers [TERM]` — the customer grid.
///
/// Customers are never listed wholesale; an explicit search term is
/// required (matching the original listing page, which stays empty until
/// a search is entered).
pub fn cmd_customers(args: &ListArgs) -> Result<()> {
    let term = match args.term.as_deref() {
        None | Some("") => {
            println!("Enter a search term to list customers.");
            return Ok(());
        }
        Some(term) => term,
    };

    let store = ShopStore::load()?;
    let rows = store.search_customers(term);

    let columns = customer_columns();
    let state = grid_state_from_args(GridState::customer_defaults(), args)?;
    let view = compute_grid(&rows, &columns, &state);

    if args.json {
        let output = json!({
            "rows": view.page_rows,
            "page": view.page_index + 1,
            "page_count": view.page_count,
            "total": view.filtered_count,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if view.filtered_count == 0 {
        println!("{}", display::NO_RESULTS);
        return Ok(());
    }

    println!("{}", display::render_customer_grid(&view, &columns));
    println!("{}", display::page_summary(&view));
    Ok(())
}

/// `shopdesk customers show <ID>`
pub fn cmd_customer_show(id: u32) -> Result<()> {
    let store = ShopStore::load()?;
    let customer = store
        .get_customer(id)
        .ok_or(ShopdeskError::CustomerNotFound(id))?;

    println!("{}", display::format_customer_detail(customer));
    Ok(())
}

/// Field flags shared by create and edit. Absent flags mean "keep the
/// existing value" on edit and "blank" on create, so the form layer's
/// required-field messages fire instead of clap usage errors.
#[derive(Default)]
pub struct CustomerFieldOptions {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub notes: Option<String>,
}

impl CustomerFieldOptions {
    fn apply(self, form: &mut CustomerForm) {
        if let Some(value) = self.first_name {
            form.first_name = value;
        }
        if let Some(value) = self.last_name {
            form.last_name = value;
        }
        if let Some(value) = self.email {
            form.email = value;
        }
        if let Some(value) = self.phone {
            form.phone = value;
        }
        if let Some(value) = self.address1 {
            form.address1 = value;
        }
        if let Some(value) = self.address2 {
            form.address2 = value;
        }
        if let Some(value) = self.city {
            form.city = value;
        }
        if let Some(value) = self.state {
            form.state = value;
        }
        if let Some(value) = self.zip {
            form.zip = value;
        }
        if let Some(value) = self.notes {
            form.notes = value;
        }
    }
}

fn save_and_report(form: &CustomerForm, store: &ShopStore) -> Result<()> {
    match save_customer(form, store)? {
        SaveOutcome::Saved { message, .. } => {
            println!("{}", message);
            Ok(())
        }
        SaveOutcome::Invalid(errors) => report_field_errors(&errors),
    }
}

/// `shopdesk customers create`
pub fn cmd_customer_create(fields: CustomerFieldOptions) -> Result<()> {
    let config = Config::load()?;
    config.require_user()?;
    let store = ShopStore::load()?;

    let mut form = CustomerForm {
        id: NEW_CUSTOMER_ID,
        active: true,
        ..CustomerForm::default()
    };
    fields.apply(&mut form);

    save_and_report(&form, &store)
}

/// `shopdesk customers edit <ID>`
pub fn cmd_customer_edit(id: u32, fields: CustomerFieldOptions, active: Option<bool>) -> Result<()> {
    let config = Config::load()?;
    config.require_user()?;
    let store = ShopStore::load()?;

    let customer = store
        .get_customer(id)
        .ok_or(ShopdeskError::CustomerNotFound(id))?;
    let mut form = CustomerForm::from_customer(customer);
    fields.apply(&mut form);
    if let Some(active) = active {
        form.active = active;
    }

    save_and_report(&form, &store)
}
