use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use fleetline_api::{db, middleware, routes};

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    println!("Application starting...");

    env_logger::init_from_env(Env::default().default_filter_or("info"));
    println!("Logger initialized");

    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    } else {
        println!("Release mode");
    }

    let host = std::env::var("HOST").unwrap_or_else(|_| HOST.to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| PORT.to_string())
        .parse()
        .unwrap_or(PORT);
    println!("Attempting to bind to {}:{}", host, port);

    let mongo_uri = std::env::var("MONGODB_URI").expect("MONGODB_URI must be set");
    println!("Got MongoDB URI, attempting connection...");
    let client = db::mongo::create_mongo_client(&mongo_uri).await;
    println!("MongoDB connection established");

    println!("Starting HTTP server...");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            // The dashboard SPA is served from another origin
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .route("/health", web::get().to(routes::health::health_check))
            .app_data(web::Data::new(client.clone()))
            .service(
                web::scope("/api")
                    // Public routes
                    .service(
                        web::scope("/auth")
                            .route("/signup", web::post().to(routes::account::auth::signup))
                            .route("/signin", web::post().to(routes::account::auth::signin))
                            .service(
                                web::scope("")
                                    .wrap(middleware::auth::AuthMiddleware)
                                    .route(
                                        "/session",
                                        web::get().to(routes::account::auth::user_session),
                                    ),
                            ),
                    )
                    .configure(routes::admin::config)
                    .service(
                        web::scope("")
                            .route(
                                "/rates",
                                web::get().to(routes::rate_settings::get_rate_settings),
                            )
                            .route("/fares/quote", web::post().to(routes::fare::quote_fare))
                            .route(
                                "/routes/estimate",
                                web::post().to(routes::route_estimate::estimate_route),
                            )
                            // Protected routes
                            .service(
                                web::scope("")
                                    .wrap(middleware::auth::AuthMiddleware)
                                    .route("/trips", web::post().to(routes::trip::create_trip))
                                    .route("/trips", web::get().to(routes::trip::get_trips))
                                    .route(
                                        "/trips/{id}",
                                        web::get().to(routes::trip::get_trip_by_id),
                                    )
                                    .route(
                                        "/trips/{id}",
                                        web::delete().to(routes::trip::delete_trip),
                                    )
                                    .route("/orders", web::post().to(routes::order::create_order))
                                    .route("/orders", web::get().to(routes::order::get_orders))
                                    .route(
                                        "/orders/{id}",
                                        web::get().to(routes::order::get_order_by_id),
                                    )
                                    .route(
                                        "/invoices/order/{id}",
                                        web::post().to(routes::invoice::create_invoice_for_order),
                                    )
                                    .route(
                                        "/invoices",
                                        web::get().to(routes::invoice::get_invoices),
                                    )
                                    .route(
                                        "/invoices/{id}",
                                        web::get().to(routes::invoice::get_invoice_by_id),
                                    )
                                    .route(
                                        "/dashboard/stats",
                                        web::get().to(routes::dashboard::get_stats),
                                    ),
                            ),
                    ),
            )
    })
    .bind((host, port))?
    .run()
    .await
}
