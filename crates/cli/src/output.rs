//! Rendering of the three fetched result sets.
//!
//! Text output prints one line per result set, each record in braces with its
//! fields in declaration order:
//!
//! ```text
//! Auth Users: [{1 John}]
//! App Orders: [{1 Order 1 1}]
//! App Orders with User: [{1 Order 1 1 {1 John}}]
//! ```
//!
//! JSON output prints a single object keyed by result set.

use core::fmt::Write as _;

use serde::Serialize;

use schemascope_core::{Order, OrderWithUser, User};

use crate::run::RunReport;

/// Output format for the result sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

#[derive(Serialize)]
struct ResultSets<'a> {
    auth_users: &'a [User],
    app_orders: &'a [Order],
    app_orders_with_user: &'a [OrderWithUser],
}

/// Render the report's result sets in `format`.
///
/// # Errors
///
/// Returns `serde_json::Error` if JSON serialization fails.
pub fn render(report: &RunReport, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(render_text(report)),
        OutputFormat::Json => serde_json::to_string_pretty(&ResultSets {
            auth_users: &report.users,
            app_orders: &report.orders,
            app_orders_with_user: &report.orders_with_user,
        }),
    }
}

fn render_text(report: &RunReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Auth Users: {}", list(&report.users, user));
    let _ = writeln!(out, "App Orders: {}", list(&report.orders, order));
    let _ = write!(
        out,
        "App Orders with User: {}",
        list(&report.orders_with_user, order_with_user)
    );
    out
}

fn list<T>(items: &[T], render: fn(&T) -> String) -> String {
    let inner = items.iter().map(render).collect::<Vec<_>>().join(" ");
    format!("[{inner}]")
}

fn user(u: &User) -> String {
    format!("{{{} {}}}", u.id, u.name)
}

fn order(o: &Order) -> String {
    format!("{{{} {} {}}}", o.id, o.name, o.user_id)
}

fn order_with_user(o: &OrderWithUser) -> String {
    let owner = o.user.as_ref().map_or_else(|| "<nil>".to_owned(), user);
    format!(
        "{{{} {} {} {owner}}}",
        o.order.id, o.order.name, o.order.user_id
    )
}
