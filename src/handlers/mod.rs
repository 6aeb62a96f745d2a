pub mod auth;
pub mod chats;
pub mod portfolio;
pub mod quotations;
pub mod reviews;

use actix_web::web;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // ── Auth routes (protected by JWT via the AuthenticatedUser extractor) ──
    cfg.service(web::scope("/auth").route("/me", web::get().to(auth::me)));

    // ── Chat (match) routes ──
    cfg.service(
        web::scope("/chats")
            .route("", web::get().to(chats::list_chats))
            .route("", web::post().to(chats::add_chat))
            .route("/{id}", web::delete().to(chats::delete_chat))
            .route("/{id}/confirm", web::post().to(chats::confirm_all))
            .route("/{id}/quotations", web::get().to(quotations::get_quotations))
            .route("/{id}/quotations", web::post().to(quotations::add_quotation)),
    );

    // ── Quotation routes ──
    cfg.service(
        web::scope("/quotations")
            .route("/{id}", web::put().to(quotations::update_quotation))
            .route("/{id}/confirm", web::post().to(quotations::confirm_quotation)),
    );

    // ── Portfolio routes (listing and detail are public) ──
    cfg.service(
        web::resource("/portfolios")
            .route(web::get().to(portfolio::get_portfolios))
            .route(web::post().to(portfolio::create_portfolio))
            .route(web::put().to(portfolio::update_portfolio))
            .route(web::delete().to(portfolio::delete_portfolio)),
    );
    cfg.service(
        web::resource("/portfolios/{id}").route(web::get().to(portfolio::get_portfolio)),
    );

    // ── Review routes ──
    cfg.service(
        web::scope("/reviews")
            .route("", web::get().to(reviews::get_reviews_by_planner))
            .route("", web::post().to(reviews::add_review))
            .route("/collect", web::get().to(reviews::get_my_reviews))
            .route("/{id}", web::get().to(reviews::get_review))
            .route("/{id}", web::put().to(reviews::update_review))
            .route("/{id}", web::delete().to(reviews::delete_review)),
    );
}
