use crate::{
    api::{blockchain, dashboard, employee, payroll, settings, stream, treasury},
    auth::{handlers, middleware::auth_middleware},
    config::Config,
};
use actix_governor::{
    governor::middleware::NoOpMiddleware, Governor, GovernorConfig, GovernorConfigBuilder,
    PeerIpKeyExtractor,
};
use actix_web::{middleware::from_fn, web};

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build a per-route limiter config
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
    let register_limiter = build_limiter(config.rate_register_per_min);
    let refresh_limiter = build_limiter(config.rate_refresh_per_min);
    let protected_limiter = build_limiter(config.rate_protected_per_min);

    // Public routes
    cfg.service(
        web::scope("/auth")
            .service(
                web::resource("/login")
                    .wrap(Governor::new(&login_limiter))
                    .route(web::post().to(handlers::login)),
            )
            .service(
                web::resource("/register")
                    .wrap(Governor::new(&register_limiter))
                    .route(web::post().to(handlers::register)),
            )
            .service(
                web::resource("/refresh")
                    .wrap(Governor::new(&refresh_limiter))
                    .route(web::post().to(handlers::refresh_token)),
            )
            .service(
                web::resource("/logout")
                    .wrap(Governor::new(&login_limiter))
                    .route(web::post().to(handlers::logout)),
            ),
    );

    // Protected routes
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(auth_middleware)) // authentication
            .wrap(Governor::new(&protected_limiter)) // rate limiting
            .service(
                web::scope("/employees")
                    // /employees
                    .service(
                        web::resource("")
                            .route(web::post().to(employee::create_employee))
                            .route(web::get().to(employee::list_employees)),
                    )
                    // /employees/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(employee::get_employee))
                            .route(web::delete().to(employee::delete_employee)),
                    )
                    .service(
                        web::resource("/{id}/transactions")
                            .route(web::get().to(employee::employee_transactions)),
                    )
                    .service(
                        web::resource("/{id}/tax")
                            .route(web::put().to(employee::update_employee_tax)),
                    )
                    .service(
                        web::resource("/{id}/wallet")
                            .route(web::put().to(employee::update_employee_wallet)),
                    ),
            )
            .service(
                web::scope("/stream")
                    .service(
                        web::resource("/start/{id}").route(web::post().to(stream::start_stream)),
                    )
                    .service(
                        web::resource("/pause/{id}").route(web::post().to(stream::pause_stream)),
                    ),
            )
            .service(
                web::resource("/transactions").route(web::post().to(payroll::create_transaction)),
            )
            .service(web::resource("/bonuses/{id}").route(web::post().to(payroll::give_bonus)))
            .service(
                web::scope("/treasury")
                    .service(web::resource("").route(web::get().to(treasury::get_treasury)))
                    .service(
                        web::resource("/deposit").route(web::post().to(treasury::deposit_treasury)),
                    )
                    .service(
                        web::resource("/withdraw")
                            .route(web::post().to(treasury::withdraw_treasury)),
                    ),
            )
            .service(
                web::scope("/dashboard")
                    .service(
                        web::resource("/total-payout").route(web::get().to(dashboard::total_payout)),
                    )
                    .service(web::resource("/total-tax").route(web::get().to(dashboard::total_tax)))
                    .service(
                        web::resource("/active-streams")
                            .route(web::get().to(dashboard::active_streams)),
                    )
                    .service(
                        web::resource("/top-earners").route(web::get().to(dashboard::top_earners)),
                    )
                    .service(
                        web::resource("/monthly-summary")
                            .route(web::get().to(dashboard::monthly_summary)),
                    ),
            )
            .service(
                web::scope("/settings")
                    .service(
                        web::resource("/company-tax")
                            .route(web::get().to(settings::get_company_tax))
                            .route(web::post().to(settings::update_company_tax)),
                    )
                    .service(
                        web::resource("/tax-slabs")
                            .route(web::get().to(settings::list_tax_slabs))
                            .route(web::post().to(settings::create_tax_slab)),
                    )
                    .service(
                        web::resource("/tax-slabs/{id}")
                            .route(web::delete().to(settings::delete_tax_slab)),
                    ),
            )
            .service(
                web::scope("/me")
                    .service(web::resource("/profile").route(web::get().to(employee::my_profile)))
                    .service(
                        web::resource("/transactions")
                            .route(web::get().to(employee::my_transactions)),
                    ),
            )
            .service(
                web::resource("/blockchain/config")
                    .route(web::get().to(blockchain::get_blockchain_config)),
            ),
    );
}
