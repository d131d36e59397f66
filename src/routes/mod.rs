pub mod health;
pub mod tasks;
pub mod users;

use actix_web::web;

use crate::auth::AuthGuard;

/// Wires up the `/user` and `/task` resources. Mount under `/api/v1`.
///
/// Registration and login are open; everything else sits behind `AuthGuard`.
/// The original routing left the user update/delete endpoints unguarded;
/// that gap is closed here (see DESIGN.md).
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/user")
            .service(users::register)
            .service(users::login)
            .service(
                web::scope("")
                    .wrap(AuthGuard)
                    .service(users::update_user)
                    .service(users::update_password)
                    .service(users::get_user)
                    .service(users::delete_user),
            ),
    )
    .service(
        web::scope("/task")
            .wrap(AuthGuard)
            .service(tasks::create_task)
            .service(tasks::get_all_tasks)
            .service(tasks::get_task)
            .service(tasks::update_task)
            .service(tasks::delete_task),
    );
}
