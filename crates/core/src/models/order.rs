//! Order record and its eager-loaded owner.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::User;
use crate::table::{ColumnDef, SqlType, Table};
use crate::types::{APP_SCHEMA, OrderId, UserId};

/// An order row in `app.order`.
///
/// `user_id` refers to [`User::id`] by convention only; no foreign key
/// constraint is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Order {
    /// Store-generated ID.
    pub id: OrderId,
    /// Display name.
    pub name: String,
    /// Owning user.
    pub user_id: UserId,
}

impl Table for Order {
    const SCHEMA: &'static str = APP_SCHEMA;
    const TABLE: &'static str = "order";
    const COLUMNS: &'static [ColumnDef] = &[
        ColumnDef::primary_key("id", SqlType::BigSerial),
        ColumnDef::new("name", SqlType::Text),
        ColumnDef::new("user_id", SqlType::BigInt),
    ];
}

impl Order {
    /// Distinct owner IDs across `orders`, sorted ascending.
    #[must_use]
    pub fn owner_ids(orders: &[Self]) -> Vec<UserId> {
        let mut ids: Vec<UserId> = orders.iter().map(|o| o.user_id).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}

/// An order with its owning user attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderWithUser {
    /// The order row.
    #[serde(flatten)]
    pub order: Order,
    /// The owner, or `None` if no user row has the order's `user_id`.
    pub user: Option<User>,
}

/// Attach each order's owner from `users`, preserving order sequence.
#[must_use]
pub fn attach_users(orders: Vec<Order>, users: Vec<User>) -> Vec<OrderWithUser> {
    let by_id: HashMap<UserId, User> = users.into_iter().map(|u| (u.id, u)).collect();

    orders
        .into_iter()
        .map(|order| {
            let user = by_id.get(&order.user_id).cloned();
            OrderWithUser { order, user }
        })
        .collect()
}
