//! User listing.

use tabled::Tabled;

use deskbook_core::User;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::{Session, util};

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Username")]
    username: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Department")]
    department: String,
    #[tabled(rename = "Admin")]
    admin: &'static str,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            username: u.username.clone(),
            name: u.full_name(),
            email: u.email.clone(),
            department: u.department.clone().unwrap_or_default(),
            admin: if u.is_admin { "yes" } else { "" },
        }
    }
}

pub async fn handle(session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    let users = util::tracked_fetch(
        session.store(),
        global,
        "Failed to load users",
        session.ctx.api.fetch_users(),
    )
    .await?;
    let out = output::render_list(
        global.output_format(),
        &users,
        |u| UserRow::from(u),
        |u| u.username.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
