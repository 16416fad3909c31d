use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::models::preferences::TripPreferences;
use crate::services::itinerary_generation_service::{ItineraryGenerator, PipelineError};

/*
    /api/generate-itinerary
*/
pub async fn generate_itinerary(
    data: web::Data<ItineraryGenerator>,
    input: web::Json<TripPreferences>,
) -> impl Responder {
    let preferences = input.into_inner();

    match data.generate(&preferences).await {
        Ok(itinerary) => {
            HttpResponse::Ok().json(json!({ "success": true, "itinerary": itinerary }))
        }
        Err(err) => {
            // Single translation point from pipeline failures to HTTP.
            eprintln!("Failed to generate itinerary: {}", err);
            match err {
                PipelineError::Validation(message) => {
                    HttpResponse::BadRequest().json(json!({ "message": message }))
                }
                PipelineError::WeatherUnavailable(_) => HttpResponse::InternalServerError()
                    .json(json!({ "success": false, "message": "Failed to fetch weather data" })),
                PipelineError::Auth(message) => HttpResponse::InternalServerError()
                    .json(json!({ "success": false, "message": message })),
                PipelineError::Generation { message, details } => {
                    let mut body = json!({ "success": false, "message": message });
                    if let Some(details) = details {
                        body["details"] = details;
                    }
                    HttpResponse::InternalServerError().json(body)
                }
            }
        }
    }
}
