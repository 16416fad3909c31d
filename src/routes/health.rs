use actix_web::{web, HttpResponse, Responder};
use mongodb::{bson::doc, Client};
use serde::Serialize;
use std::collections::HashMap;
use std::env;
use std::sync::Arc;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, ServiceStatus>,
    environment: String,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

pub async fn health_check(client: web::Data<Arc<Client>>) -> impl Responder {
    let mut health = HealthStatus {
        status: "ok".to_string(),
        services: HashMap::new(),
        environment: env::var("RUST_ENV").unwrap_or("development".to_string()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let mongo_result = check_mongodb(&client).await;
    health
        .services
        .insert("mongodb".to_string(), mongo_result.clone());

    let weather_result = check_weather_provider();
    health
        .services
        .insert("weather".to_string(), weather_result.clone());

    let generation_result = check_generation_credentials();
    health
        .services
        .insert("generation".to_string(), generation_result.clone());

    if mongo_result.status != "ok"
        || weather_result.status != "ok"
        || generation_result.status != "ok"
    {
        health.status = "degraded".to_string();
    }

    HttpResponse::Ok().json(health)
}

async fn check_mongodb(client: &web::Data<Arc<Client>>) -> ServiceStatus {
    match client
        .database("Travelers")
        .run_command(doc! {"ping": 1})
        .await
    {
        Ok(_) => ServiceStatus {
            status: "ok".to_string(),
            details: Some("Connected successfully to MongoDB".to_string()),
        },
        Err(e) => {
            eprintln!("MongoDB health check failed: {}", e);

            ServiceStatus {
                status: "error".to_string(),
                details: Some(format!("Failed to connect: {}", e)),
            }
        }
    }
}

fn check_weather_provider() -> ServiceStatus {
    // Key existence only; a live forecast call would burn provider quota.
    match env::var("OPENWEATHERMAP_API_KEY") {
        Ok(key) => {
            let masked_key = if key.len() > 8 {
                format!("{}***{}", &key[0..4], &key[key.len() - 4..])
            } else {
                "***".to_string()
            };

            ServiceStatus {
                status: "ok".to_string(),
                details: Some(format!("Weather API key configured ({})", masked_key)),
            }
        }
        Err(_) => ServiceStatus {
            status: "error".to_string(),
            details: Some("OPENWEATHERMAP_API_KEY not configured".to_string()),
        },
    }
}

fn check_generation_credentials() -> ServiceStatus {
    match env::var("GOOGLE_APPLICATION_CREDENTIALS") {
        Ok(path) => ServiceStatus {
            status: "ok".to_string(),
            details: Some(format!("Service account credentials at {}", path)),
        },
        Err(_) => ServiceStatus {
            status: "error".to_string(),
            details: Some("GOOGLE_APPLICATION_CREDENTIALS not configured".to_string()),
        },
    }
}
