use std::{env, path::PathBuf, sync::Arc};

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use wanderplan_api::db;
use wanderplan_api::middleware::auth::AuthMiddleware;
use wanderplan_api::routes;
use wanderplan_api::services::gemini_service::GeminiService;
use wanderplan_api::services::itinerary_generation_service::ItineraryGenerator;
use wanderplan_api::services::token_service::GoogleTokenProvider;
use wanderplan_api::services::weather_service::OpenWeatherService;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;

#[cfg(debug_assertions)]
fn setup_credentials() {
    let credentials_path = PathBuf::from("credentials/service-account.json");
    env::set_var(
        "GOOGLE_APPLICATION_CREDENTIALS",
        credentials_path.to_str().unwrap(),
    );
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    println!("Application starting...");

    #[cfg(debug_assertions)]
    setup_credentials();

    env_logger::init_from_env(Env::default().default_filter_or("info"));

    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    let host = env::var("HOST").unwrap_or_else(|_| HOST.to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| PORT.to_string())
        .parse()
        .unwrap_or(PORT);

    let mongo_uri = env::var("MONGODB_URI").expect("MONGODB_URI must be set");
    let client = db::mongo::create_mongo_client(&mongo_uri).await;
    println!("MongoDB connection established");

    let forecast = Arc::new(OpenWeatherService::new().expect("OPENWEATHERMAP_API_KEY must be set"));
    let tokens = Arc::new(
        GoogleTokenProvider::new()
            .await
            .expect("Failed to initialize generation credentials"),
    );
    let generator = web::Data::new(ItineraryGenerator::new(
        forecast,
        Arc::new(GeminiService::new(tokens)),
    ));

    println!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .app_data(web::Data::new(client.clone()))
            .app_data(generator.clone())
            .route("/health", web::get().to(routes::health::health_check))
            .service(
                web::scope("/api")
                    .route(
                        "/generate-itinerary",
                        web::post().to(routes::itinerary::generate_itinerary),
                    )
                    .service(
                        web::scope("/travel-wallet")
                            .wrap(AuthMiddleware)
                            .route(
                                "/documents",
                                web::get().to(routes::travel_wallet::get_documents),
                            )
                            .route(
                                "/documents",
                                web::post().to(routes::travel_wallet::add_document),
                            )
                            .route(
                                "/documents/{id}",
                                web::put().to(routes::travel_wallet::update_document),
                            )
                            .route(
                                "/documents/{id}",
                                web::delete().to(routes::travel_wallet::delete_document),
                            ),
                    )
                    .service(
                        web::scope("")
                            .wrap(AuthMiddleware)
                            .route("/trips", web::post().to(routes::trip::create_trip))
                            .route("/trips", web::get().to(routes::trip::get_trips))
                            .route("/trips/{id}", web::delete().to(routes::trip::delete_trip)),
                    ),
            )
    })
    .bind((host, port))?
    .run()
    .await
}
