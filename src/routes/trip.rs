use actix_web::{web, HttpResponse, Responder};
use bson::{doc, oid::ObjectId};
use futures::TryStreamExt;
use mongodb::Client;
use serde_json::json;
use std::sync::Arc;

use crate::{middleware::auth::Claims, models::trip::Trip};

fn trips_collection(client: &Client) -> mongodb::Collection<Trip> {
    client.database("Travelers").collection("Trips")
}

fn owner_id(claims: &Claims) -> Option<ObjectId> {
    ObjectId::parse_str(&claims.user_id).ok()
}

/*
    POST /api/trips
*/
pub async fn create_trip(
    claims: web::ReqData<Claims>,
    data: web::Data<Arc<Client>>,
    input: web::Json<Trip>,
) -> impl Responder {
    let client = data.into_inner();

    let user_id = match owner_id(&claims) {
        Some(id) => id,
        None => return HttpResponse::Unauthorized().json(json!({ "error": "Invalid user id" })),
    };

    let now = chrono::Utc::now();
    let mut trip = input.into_inner();
    trip.id = None;
    trip.user_id = Some(user_id);
    trip.created_at = Some(now);
    trip.updated_at = Some(now);

    match trips_collection(&client).insert_one(&trip).await {
        Ok(inserted) => {
            trip.id = inserted.inserted_id.as_object_id();
            HttpResponse::Created().json(trip)
        }
        Err(err) => {
            eprintln!("Failed to save trip: {:?}", err);
            HttpResponse::InternalServerError().json(json!({ "error": "Failed to save trip" }))
        }
    }
}

/*
    GET /api/trips
*/
pub async fn get_trips(
    claims: web::ReqData<Claims>,
    data: web::Data<Arc<Client>>,
) -> impl Responder {
    let client = data.into_inner();

    let user_id = match owner_id(&claims) {
        Some(id) => id,
        None => return HttpResponse::Unauthorized().json(json!({ "error": "Invalid user id" })),
    };

    match trips_collection(&client).find(doc! { "user_id": user_id }).await {
        Ok(cursor) => match cursor.try_collect::<Vec<Trip>>().await {
            Ok(trips) => HttpResponse::Ok().json(trips),
            Err(err) => {
                eprintln!("Failed to collect trips: {:?}", err);
                HttpResponse::InternalServerError()
                    .json(json!({ "error": "Failed to retrieve trips" }))
            }
        },
        Err(err) => {
            eprintln!("Failed to retrieve trips: {:?}", err);
            HttpResponse::InternalServerError().json(json!({ "error": "Failed to retrieve trips" }))
        }
    }
}

/*
    DELETE /api/trips/{id}
*/
pub async fn delete_trip(
    claims: web::ReqData<Claims>,
    data: web::Data<Arc<Client>>,
    path: web::Path<String>,
) -> impl Responder {
    let client = data.into_inner();

    let trip_id = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().json(json!({ "error": "Invalid ID" })),
    };

    let user_id = match owner_id(&claims) {
        Some(id) => id,
        None => return HttpResponse::Unauthorized().json(json!({ "error": "Invalid user id" })),
    };

    // Owner-scoped filter: deleting someone else's trip reads as not found.
    match trips_collection(&client)
        .delete_one(doc! { "_id": trip_id, "user_id": user_id })
        .await
    {
        Ok(result) if result.deleted_count == 0 => {
            HttpResponse::NotFound().json(json!({ "error": "Trip not found" }))
        }
        Ok(_) => HttpResponse::Ok().json(json!({ "message": "Trip deleted successfully" })),
        Err(err) => {
            eprintln!("Failed to delete trip: {:?}", err);
            HttpResponse::InternalServerError().json(json!({ "error": "Failed to delete trip" }))
        }
    }
}
