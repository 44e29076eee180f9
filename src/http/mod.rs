//! HTTP surface exposed to the sponsorship UI.
//!
//! Routes:
//! - `GET /merchants` — merchant list, optionally filtered server-side
//! - `GET /volunteers` — volunteer suggestion list (never fails)
//! - `POST /assignments` — perform a merchant -> volunteer assignment
//! - `GET /assignments/{volunteerName}` — merchants assigned to one volunteer

pub mod handlers;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

use crate::assign::AssignmentCoordinator;
use crate::reader::SheetReader;

/// Shared per-process state handed to every handler. The reader inside the
/// coordinator is a clone of `reader`, so both see the same cache.
pub struct AppState {
    pub reader: SheetReader,
    pub coordinator: AssignmentCoordinator,
}

pub fn configure_routes() -> Scope {
    scope("")
        .route("/merchants", get().to(handlers::list_merchants))
        .route("/volunteers", get().to(handlers::list_volunteers))
        .route("/assignments", post().to(handlers::create_assignment))
        .route(
            "/assignments/{volunteerName}",
            get().to(handlers::list_assignments),
        )
}
