use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::commands::ImpersonationView;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct StatusResponse {
    impersonating: bool,
    session: Option<ImpersonationView>,
}

pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let state = ctx.manager.session_state();
    output(
        &StatusResponse {
            impersonating: state.is_impersonating(),
            session: ImpersonationView::from_session(&state),
        },
        flags.format,
    )
}
