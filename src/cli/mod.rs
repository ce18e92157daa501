//! Command-line interface for strapi-contacts.
//!
//! Provides commands for listing, showing, creating, editing, favoriting
//! and deleting contacts.

mod commands;

pub use commands::{
    parse_cli, render_contact_detail, render_contact_list, run, run_with_cli, Cli, Commands,
};
