use std::process::ExitCode;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use shopdesk::commands::{
    CustomerFieldOptions, ListArgs, TicketCreateOptions, TicketEditOptions, cmd_browse,
    cmd_config_get, cmd_config_set, cmd_config_show, cmd_customer_create, cmd_customer_edit,
    cmd_customer_show, cmd_customers, cmd_login, cmd_logout, cmd_ticket_create, cmd_ticket_edit,
    cmd_ticket_show, cmd_tickets, cmd_whoami,
};

#[derive(Parser)]
#[command(name = "shopdesk")]
#[command(about = "Customer and repair-ticket tracking for the shop counter")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List and search repair tickets, or manage a single ticket
    #[command(visible_alias = "t", args_conflicts_with_subcommands = true)]
    Tickets {
        #[command(subcommand)]
        action: Option<TicketAction>,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Search customers, or manage a single customer
    #[command(visible_alias = "cu", args_conflicts_with_subcommands = true)]
    Customers {
        #[command(subcommand)]
        action: Option<CustomerAction>,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Browse the grids interactively
    #[command(visible_alias = "b")]
    Browse {
        /// Which grid to open first: tickets or customers
        target: Option<String>,

        /// Initial search term
        term: Option<String>,
    },

    /// Sign in as a technician
    Login {
        /// Your email address
        email: String,

        /// Grant manager permissions
        #[arg(long)]
        manager: bool,
    },

    /// Sign out
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum TicketAction {
    /// Display one ticket
    #[command(visible_alias = "s")]
    Show {
        /// Ticket ID
        id: u32,
    },

    /// Create a ticket for a customer
    #[command(visible_alias = "c")]
    Create {
        /// Customer ID the ticket belongs to
        #[arg(long)]
        customer: u32,

        /// Ticket title
        #[arg(long)]
        title: Option<String>,

        /// Problem description
        #[arg(short, long)]
        description: Option<String>,

        /// Assigned technician email
        #[arg(long)]
        tech: Option<String>,
    },

    /// Edit a ticket
    Edit {
        /// Ticket ID
        id: u32,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New description
        #[arg(short, long)]
        description: Option<String>,

        /// New technician email
        #[arg(long)]
        tech: Option<String>,

        /// Mark completed (true) or reopen (false)
        #[arg(long)]
        completed: Option<bool>,
    },
}

#[derive(Subcommand)]
enum CustomerAction {
    /// Display one customer
    #[command(visible_alias = "s")]
    Show {
        /// Customer ID
        id: u32,
    },

    /// Create a customer
    #[command(visible_alias = "c")]
    Create {
        #[command(flatten)]
        fields: CustomerFields,
    },

    /// Edit a customer
    Edit {
        /// Customer ID
        id: u32,

        #[command(flatten)]
        fields: CustomerFields,

        /// Activate (true) or deactivate (false) the customer
        #[arg(long)]
        active: Option<bool>,
    },
}

#[derive(clap::Args)]
struct CustomerFields {
    /// First name
    #[arg(long)]
    first_name: Option<String>,

    /// Last name
    #[arg(long)]
    last_name: Option<String>,

    /// Email address
    #[arg(long)]
    email: Option<String>,

    /// Phone number
    #[arg(long)]
    phone: Option<String>,

    /// Street address
    #[arg(long)]
    address1: Option<String>,

    /// Street address, second line
    #[arg(long)]
    address2: Option<String>,

    /// City
    #[arg(long)]
    city: Option<String>,

    /// State
    #[arg(long)]
    state: Option<String>,

    /// ZIP code
    #[arg(long)]
    zip: Option<String>,

    /// Free-form notes
    #[arg(long)]
    notes: Option<String>,
}

impl From<CustomerFields> for CustomerFieldOptions {
    fn from(f: CustomerFields) -> Self {
        CustomerFieldOptions {
            first_name: f.first_name,
            last_name: f.last_name,
            email: f.email,
            phone: f.phone,
            address1: f.address1,
            address2: f.address2,
            city: f.city,
            state: f.state,
            zip: f.zip,
            notes: f.notes,
        }
    }
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show all configuration values
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Get a configuration value
    Get {
        /// Key (shop_name or poll_interval)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Key (shop_name or poll_interval)
        key: String,
        /// New value
        value: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Tickets { action, list } => match action {
            None => cmd_tickets(&list),
            Some(TicketAction::Show { id }) => cmd_ticket_show(id),
            Some(TicketAction::Create {
                customer,
                title,
                description,
                tech,
            }) => cmd_ticket_create(TicketCreateOptions {
                customer_id: customer,
                title: title.unwrap_or_default(),
                description: description.unwrap_or_default(),
                tech,
            }),
            Some(TicketAction::Edit {
                id,
                title,
                description,
                tech,
                completed,
            }) => cmd_ticket_edit(
                id,
                TicketEditOptions {
                    title,
                    description,
                    tech,
                    completed,
                },
            ),
        },

        Commands::Customers { action, list } => match action {
            None => cmd_customers(&list),
            Some(CustomerAction::Show { id }) => cmd_customer_show(id),
            Some(CustomerAction::Create { fields }) => cmd_customer_create(fields.into()),
            Some(CustomerAction::Edit { id, fields, active }) => {
                cmd_customer_edit(id, fields.into(), active)
            }
        },

        Commands::Browse { target, term } => cmd_browse(target.as_deref(), term.as_deref()),

        Commands::Login { email, manager } => cmd_login(&email, manager),
        Commands::Logout => cmd_logout(),
        Commands::Whoami => cmd_whoami(),

        Commands::Config { action } => match action {
            ConfigAction::Show { json } => cmd_config_show(json),
            ConfigAction::Get { key } => cmd_config_get(&key),
            ConfigAction::Set { key, value } => cmd_config_set(&key, &value),
        },

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "shopdesk", &mut std::io::stdout());
            Ok(())
        }
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
