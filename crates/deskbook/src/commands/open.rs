//! Navigate to a path, mount the view it renders, load and print it.

use tracing::info;

use deskbook_core::View;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::{Session, areas, book, desks, rooms, util};

pub async fn show(session: &Session, path: &str, global: &GlobalOpts) -> Result<(), CliError> {
    let matched = session.router.navigate(path)?;
    if let Some(from) = &matched.redirected_from {
        info!(from = %from, to = %matched.path, "redirected");
        if !global.quiet {
            eprintln!("No page at {from}, showing {} instead", matched.path);
        }
    }
    let props = matched.props().ok_or_else(|| CliError::Route {
        message: format!("{matched} does not render a view"),
    })?;

    let view = View::mount(session.ctx.clone(), props);
    let result = util::load_with_retry(session.store(), global, || view.load()).await;
    view.unmount();
    result?;

    let state = session.store().snapshot();
    let format = global.output_format();
    let color = output::should_color(global.color_mode());

    if format == OutputFormat::Table {
        let header = output::view_header(
            &session.router.current_title(),
            &state.breadcrumbs(),
            color,
        );
        output::print_output(&header, global.quiet);
    }

    let body = match &view {
        View::Areas(_) => areas::render(&state, format),
        View::Rooms(_) => rooms::render(&state, format),
        View::Desks(_) => desks::render(&state, format),
        View::Booking(_) => book::render(&state, format, color),
    };
    output::print_output(&body, global.quiet);
    Ok(())
}
