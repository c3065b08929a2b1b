//! Command dispatch: bridges CLI args -> router and views -> output formatting.

pub mod areas;
pub mod book;
pub mod config_cmd;
pub mod desks;
pub mod open;
pub mod reservations;
pub mod rooms;
pub mod routes;
pub mod users;
pub mod util;

use deskbook_config::Config;
use deskbook_core::{BookingStore, Router, ViewContext};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Everything a backend-bound command works against.
pub struct Session {
    pub ctx: ViewContext,
    pub router: Router,
    pub config: Config,
}

impl Session {
    pub fn store(&self) -> &BookingStore {
        &self.ctx.store
    }
}

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Areas => open::show(session, "/", global).await,
        Command::Rooms(args) => {
            open::show(session, &format!("/areas/{}", args.area_id), global).await
        }
        Command::Desks(args) => {
            let path = format!("/areas/{}/rooms/{}", args.area_id, args.room_id);
            open::show(session, &path, global).await
        }
        Command::Open(args) => open::show(session, &args.path, global).await,
        Command::Book(args) => book::handle(session, args, global).await,
        Command::Reservations(args) => reservations::handle(session, args, global).await,
        Command::Users => users::handle(session, global).await,
        // Routes, Config and Completions are handled before dispatch
        Command::Routes | Command::Config(_) | Command::Completions(_) => Err(CliError::General(
            "command does not need a backend session".into(),
        )),
    }
}
