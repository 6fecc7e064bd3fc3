//! Member CLI commands
//!
//! Implements CLI commands for roster management.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_member_list;
use crate::error::TripResult;
use crate::services::MemberService;
use crate::storage::Storage;

/// Member subcommands
#[derive(Subcommand)]
pub enum MemberCommands {
    /// Add a member to the trip
    Add {
        /// Member ID (as issued by the account system)
        id: String,
        /// Display name
        name: String,
    },
    /// List the roster
    List,
    /// Change a member's display name
    Rename {
        /// Member ID or current name
        member: String,
        /// New display name
        name: String,
    },
    /// Remove a member who has no unsettled expenses
    Remove {
        /// Member ID or name
        member: String,
    },
}

/// Handle a member command
pub fn handle_member_command(
    storage: &Storage,
    settings: &Settings,
    cmd: MemberCommands,
) -> TripResult<()> {
    let service = MemberService::new(storage);

    match cmd {
        MemberCommands::Add { id, name } => {
            let member = service.add(&id, &name)?;
            println!("Added member: {} ({})", member.display_name, member.id);
        }

        MemberCommands::List => {
            let members = service.list()?;
            print!("{}", format_member_list(&members, &settings.date_format));
        }

        MemberCommands::Rename { member, name } => {
            let found = service.resolve(&member)?;
            let old_name = found.display_name.clone();
            let updated = service.rename(&found.id, &name)?;
            println!("Renamed member: {} -> {}", old_name, updated.display_name);
        }

        MemberCommands::Remove { member } => {
            let found = service.resolve(&member)?;
            let removed = service.remove(&found.id)?;
            println!("Removed member: {}", removed.display_name);
        }
    }

    Ok(())
}
