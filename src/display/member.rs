//! Roster display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Member;

#[derive(Tabled)]
struct MemberRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Joined")]
    joined: String,
}

/// Format the roster as a table
pub fn format_member_list(members: &[Member], date_format: &str) -> String {
    if members.is_empty() {
        return "No members yet. Add one with 'tripsplit member add'.\n".to_string();
    }

    let rows = members.iter().map(|m| MemberRow {
        name: m.display_name.clone(),
        id: m.id.to_string(),
        joined: m.joined_at.format(date_format).to_string(),
    });

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}
