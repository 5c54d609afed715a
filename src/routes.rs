use crate::{
    api::queries,
    auth::{handlers, middleware::auth_middleware},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter config
    fn build_limiter(requests_per_min: u32) -> GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap()
    }

    let login_limiter = build_limiter(config.rate_login_per_min);
    let protected_limiter = build_limiter(config.rate_protected_per_min);

    cfg.service(
        web::scope(&config.api_prefix)
            // Public routes
            .service(
                web::resource("/login")
                    .wrap(Governor::new(&login_limiter))
                    .route(web::post().to(handlers::login)),
            )
            .service(web::resource("/logout").route(web::post().to(handlers::logout)))
            .service(web::resource("/auth-check").route(web::get().to(handlers::auth_check)))
            // Protected routes
            .service(
                web::scope("")
                    .wrap(from_fn(auth_middleware)) // authentication
                    .wrap(Governor::new(&protected_limiter)) // rate limiting
                    .service(
                        web::resource("/queries")
                            .route(web::get().to(queries::list_queries))
                            .route(web::post().to(queries::create_query)),
                    )
                    .service(
                        web::resource("/employees").route(web::get().to(queries::list_employees)),
                    ),
            ),
    );
}

// LOGIN
//  └─ sets kb_session cookie (24h TTL)

// API REQUEST
//  └─ Cookie: kb_session=<opaque token>

// SESSION EXPIRED
//  └─ 401, client redirects to login
