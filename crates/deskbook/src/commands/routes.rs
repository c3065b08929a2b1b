//! Route table listing.

use tabled::Tabled;

use deskbook_core::{Route, RouteTarget, Router, document_title};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct RouteRow {
    #[tabled(rename = "Path")]
    path: &'static str,
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Target")]
    target: String,
}

impl From<&Route> for RouteRow {
    fn from(r: &Route) -> Self {
        let target = match r.target {
            RouteTarget::View(kind) => format!("{kind:?} view"),
            RouteTarget::Redirect(to) => format!("redirect → {to}"),
        };
        Self {
            path: r.path,
            name: r.name.unwrap_or("-"),
            title: match r.target {
                RouteTarget::View(_) => document_title(r.title),
                RouteTarget::Redirect(_) => "-".into(),
            },
            target,
        }
    }
}

pub fn handle(router: &Router, global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_list(
        global.output_format(),
        router.routes(),
        |r| RouteRow::from(r),
        |r| r.path.to_owned(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
