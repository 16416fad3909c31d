use actix_web::{web, HttpResponse, Responder};
use bson::{doc, oid::ObjectId};
use futures::TryStreamExt;
use mongodb::Client;
use serde_json::json;
use std::sync::Arc;

use crate::{middleware::auth::Claims, models::travel_document::TravelDocument};

fn documents_collection(client: &Client) -> mongodb::Collection<TravelDocument> {
    client.database("Travelers").collection("TravelDocuments")
}

fn owner_id(claims: &Claims) -> Option<ObjectId> {
    ObjectId::parse_str(&claims.user_id).ok()
}

/*
    GET /api/travel-wallet/documents
*/
pub async fn get_documents(
    claims: web::ReqData<Claims>,
    data: web::Data<Arc<Client>>,
) -> impl Responder {
    let client = data.into_inner();

    let user_id = match owner_id(&claims) {
        Some(id) => id,
        None => return HttpResponse::Unauthorized().json(json!({ "error": "Invalid user id" })),
    };

    match documents_collection(&client)
        .find(doc! { "userId": user_id })
        .await
    {
        Ok(cursor) => match cursor.try_collect::<Vec<TravelDocument>>().await {
            Ok(documents) => HttpResponse::Ok().json(documents),
            Err(err) => {
                eprintln!("Failed to collect travel documents: {:?}", err);
                HttpResponse::InternalServerError().json(json!({ "message": "Server error" }))
            }
        },
        Err(err) => {
            eprintln!("Failed to retrieve travel documents: {:?}", err);
            HttpResponse::InternalServerError().json(json!({ "message": "Server error" }))
        }
    }
}

/*
    POST /api/travel-wallet/documents
*/
pub async fn add_document(
    claims: web::ReqData<Claims>,
    data: web::Data<Arc<Client>>,
    input: web::Json<TravelDocument>,
) -> impl Responder {
    let client = data.into_inner();

    let user_id = match owner_id(&claims) {
        Some(id) => id,
        None => return HttpResponse::Unauthorized().json(json!({ "error": "Invalid user id" })),
    };

    let now = chrono::Utc::now();
    let mut document = input.into_inner();
    document.id = None;
    document.user_id = Some(user_id);
    document.created_at = Some(now);
    document.updated_at = Some(now);

    match documents_collection(&client).insert_one(&document).await {
        Ok(inserted) => {
            document.id = inserted.inserted_id.as_object_id();
            HttpResponse::Created().json(document)
        }
        Err(err) => {
            eprintln!("Failed to add travel document: {:?}", err);
            HttpResponse::BadRequest().json(json!({ "message": "Failed to add document" }))
        }
    }
}

/*
    PUT /api/travel-wallet/documents/{id}
*/
pub async fn update_document(
    claims: web::ReqData<Claims>,
    data: web::Data<Arc<Client>>,
    path: web::Path<String>,
    input: web::Json<TravelDocument>,
) -> impl Responder {
    let client = data.into_inner();

    let document_id = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().json(json!({ "error": "Invalid ID" })),
    };

    let user_id = match owner_id(&claims) {
        Some(id) => id,
        None => return HttpResponse::Unauthorized().json(json!({ "error": "Invalid user id" })),
    };

    let mut document = input.into_inner();
    document.id = Some(document_id);
    document.user_id = Some(user_id);
    document.updated_at = Some(chrono::Utc::now());

    match documents_collection(&client)
        .find_one_and_replace(doc! { "_id": document_id, "userId": user_id }, &document)
        .await
    {
        Ok(Some(_)) => HttpResponse::Ok().json(document),
        Ok(None) => HttpResponse::NotFound().json(json!({ "message": "Document not found" })),
        Err(err) => {
            eprintln!("Failed to update travel document: {:?}", err);
            HttpResponse::BadRequest().json(json!({ "message": "Failed to update document" }))
        }
    }
}

/*
    DELETE /api/travel-wallet/documents/{id}
*/
pub async fn delete_document(
    claims: web::ReqData<Claims>,
    data: web::Data<Arc<Client>>,
    path: web::Path<String>,
) -> impl Responder {
    let client = data.into_inner();

    let document_id = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().json(json!({ "error": "Invalid ID" })),
    };

    let user_id = match owner_id(&claims) {
        Some(id) => id,
        None => return HttpResponse::Unauthorized().json(json!({ "error": "Invalid user id" })),
    };

    match documents_collection(&client)
        .find_one_and_delete(doc! { "_id": document_id, "userId": user_id })
        .await
    {
        Ok(Some(_)) => HttpResponse::Ok().json(json!({ "message": "Document deleted" })),
        Ok(None) => HttpResponse::NotFound().json(json!({ "message": "Document not found" })),
        Err(err) => {
            eprintln!("Failed to delete travel document: {:?}", err);
            HttpResponse::InternalServerError().json(json!({ "message": "Server error" }))
        }
    }
}
