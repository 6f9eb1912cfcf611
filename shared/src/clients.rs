//! Client listing helpers: statistics merge and sorting

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{Client, ClientStats};

/// Statistic to sort clients by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientStat {
    TotalSpent,
    AverageTicket,
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// A client with its statistics attached
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientRow {
    pub client: Client,
    pub total_spent: f64,
    pub average_ticket: f64,
}

/// Attach statistics by client id; clients without statistics get zeros
pub fn merge_stats(clients: Vec<Client>, stats: &[ClientStats]) -> Vec<ClientRow> {
    let by_id: HashMap<i64, &ClientStats> = stats.iter().map(|s| (s.cliente_id, s)).collect();
    clients
        .into_iter()
        .map(|client| {
            let s = by_id.get(&client.id);
            ClientRow {
                total_spent: s.map(|s| s.total_spent()).unwrap_or(0.0),
                average_ticket: s.map(|s| s.average_ticket()).unwrap_or(0.0),
                client,
            }
        })
        .collect()
}

pub fn sort_by_stat(rows: &mut [ClientRow], stat: ClientStat, order: SortOrder) {
    let value = |r: &ClientRow| match stat {
        ClientStat::TotalSpent => r.total_spent,
        ClientStat::AverageTicket => r.average_ticket,
    };
    rows.sort_by(|a, b| {
        let ord = value(a).total_cmp(&value(b));
        match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
}

/// Case-insensitive search over name, business name and tax id
pub fn search<'a>(rows: &'a [ClientRow], query: &str) -> Vec<&'a ClientRow> {
    let needle = query.trim().to_lowercase();
    rows.iter()
        .filter(|r| {
            needle.is_empty()
                || r.client.nombre.to_lowercase().contains(&needle)
                || r.client
                    .razon_social
                    .as_deref()
                    .is_some_and(|s| s.to_lowercase().contains(&needle))
                || r.client.nit.as_deref().is_some_and(|n| n.contains(&needle))
        })
        .collect()
}
