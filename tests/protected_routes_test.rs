use std::sync::Arc;

use actix_web::{http::header, test, web, App};
use jsonwebtoken::{encode, EncodingKey, Header};
use mongodb::{options::ClientOptions, Client};
use serial_test::serial;

use wanderplan_api::middleware::auth::{AuthMiddleware, Claims};
use wanderplan_api::routes;

/// A client that never connects: the tests below stop in the middleware or
/// in claim validation, before any database traffic.
async fn detached_mongo_client() -> Arc<Client> {
    let options = ClientOptions::parse("mongodb://127.0.0.1:27017")
        .await
        .unwrap();
    Arc::new(Client::with_options(options).unwrap())
}

fn mint_token(user_id: &str) -> String {
    let now = chrono::Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: "test@example.com".to_string(),
        iat: now,
        exp: now + 3600,
        user_id: user_id.to_string(),
    };
    // Matches the middleware's fallback secret when JWT_SECRET is unset.
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret("default_secret".as_bytes()),
    )
    .unwrap()
}

fn protected_app(
    client: Arc<Client>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().app_data(web::Data::new(client)).service(
        web::scope("/api")
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
}

#[actix_rt::test]
#[serial]
async fn trips_require_an_authorization_header() {
    let app = test::init_service(protected_app(detached_mongo_client().await)).await;

    let req = test::TestRequest::get().uri("/api/trips").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_rt::test]
#[serial]
async fn wallet_documents_require_an_authorization_header() {
    let app = test::init_service(protected_app(detached_mongo_client().await)).await;

    let req = test::TestRequest::get()
        .uri("/api/travel-wallet/documents")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_rt::test]
#[serial]
async fn garbage_bearer_tokens_are_rejected() {
    let app = test::init_service(protected_app(detached_mongo_client().await)).await;

    let req = test::TestRequest::delete()
        .uri("/api/trips/64b7f8f0c2a4e9d1b8a7c6d5")
        .insert_header((header::AUTHORIZATION, "Bearer not.a.jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_rt::test]
#[serial]
async fn valid_token_with_malformed_user_id_is_refused_by_the_handler() {
    // Pin the secret so the minted token and the middleware agree.
    std::env::set_var("JWT_SECRET", "default_secret");

    let app = test::init_service(protected_app(detached_mongo_client().await)).await;

    let token = mint_token("not-an-object-id");
    let req = test::TestRequest::get()
        .uri("/api/trips")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Invalid user id");
}
