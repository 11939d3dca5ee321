use actix_web::{web, HttpResponse, Responder};
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, DateTime};
use mongodb::Client;
use std::sync::Arc;

use crate::middleware::auth::Claims;
use crate::models::order::{Order, OrderInput};
use crate::models::trip::Trip;

fn parse_user_id(claims: &Claims) -> Result<ObjectId, HttpResponse> {
    ObjectId::parse_str(&claims.user_id)
        .map_err(|_| HttpResponse::BadRequest().body("Invalid user ID"))
}

/// Group owned trips into an order. Each trip may belong to at most one order;
/// the order total is the sum of the trips' final prices.
pub async fn create_order(
    data: web::Data<Arc<Client>>,
    input: web::Json<OrderInput>,
    claims: Claims,
) -> impl Responder {
    let client = data.into_inner();
    let input = input.into_inner();

    if input.trip_ids.is_empty() {
        return HttpResponse::BadRequest().body("An order needs at least one trip");
    }

    let user_id = match parse_user_id(&claims) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let mut trip_ids = Vec::new();
    for raw_id in &input.trip_ids {
        match ObjectId::parse_str(raw_id) {
            Ok(id) => trip_ids.push(id),
            Err(_) => return HttpResponse::BadRequest().body("Invalid trip ID"),
        }
    }

    let trips_collection: mongodb::Collection<Trip> =
        client.database("Dispatch").collection("Trips");

    let trips = match trips_collection
        .find(doc! { "_id": { "$in": trip_ids.clone() }, "user_id": user_id })
        .await
    {
        Ok(cursor) => match cursor.try_collect::<Vec<Trip>>().await {
            Ok(trips) => trips,
            Err(err) => {
                eprintln!("Failed to collect trips: {:?}", err);
                return HttpResponse::InternalServerError().body("Failed to create order");
            }
        },
        Err(err) => {
            eprintln!("Failed to find trips: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to create order");
        }
    };

    if trips.len() != trip_ids.len() {
        return HttpResponse::NotFound().body("One or more trips not found");
    }
    if trips.iter().any(|trip| trip.order_id.is_some()) {
        return HttpResponse::Conflict().body("One or more trips already belong to an order");
    }

    let total: f64 = trips.iter().map(|trip| trip.final_price).sum();
    let now = DateTime::now();

    let order = Order {
        id: None,
        user_id,
        trip_ids: trip_ids.clone(),
        status: "open".to_string(),
        total,
        created_at: Some(now),
        updated_at: Some(now),
    };

    let orders_collection: mongodb::Collection<Order> =
        client.database("Dispatch").collection("Orders");

    let order_id = match orders_collection.insert_one(&order).await {
        Ok(result) => match result.inserted_id.as_object_id() {
            Some(id) => id,
            None => {
                return HttpResponse::InternalServerError().body("Failed to create order");
            }
        },
        Err(err) => {
            eprintln!("Failed to insert order: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to create order");
        }
    };

    if let Err(err) = trips_collection
        .update_many(
            doc! { "_id": { "$in": trip_ids.clone() } },
            doc! { "$set": { "order_id": order_id, "updated_at": now } },
        )
        .await
    {
        eprintln!("Failed to attach trips to order: {:?}", err);
        return HttpResponse::InternalServerError().body("Failed to create order");
    }

    let mut stored = order;
    stored.id = Some(order_id);
    HttpResponse::Ok().json(stored)
}

pub async fn get_orders(data: web::Data<Arc<Client>>, claims: Claims) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<Order> = client.database("Dispatch").collection("Orders");

    let user_id = match parse_user_id(&claims) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match collection.find(doc! { "user_id": user_id }).await {
        Ok(cursor) => match cursor.try_collect::<Vec<Order>>().await {
            Ok(orders) => HttpResponse::Ok().json(orders),
            Err(err) => {
                eprintln!("Failed to collect orders: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to fetch orders")
            }
        },
        Err(err) => {
            eprintln!("Failed to find orders: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to fetch orders")
        }
    }
}

pub async fn get_order_by_id(
    data: web::Data<Arc<Client>>,
    path: web::Path<String>,
    claims: Claims,
) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<Order> = client.database("Dispatch").collection("Orders");

    let user_id = match parse_user_id(&claims) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let order_id = match ObjectId::parse_str(path.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid order ID"),
    };

    match collection
        .find_one(doc! { "_id": order_id, "user_id": user_id })
        .await
    {
        Ok(Some(order)) => HttpResponse::Ok().json(order),
        Ok(None) => HttpResponse::NotFound().body("Order not found"),
        Err(err) => {
            eprintln!("Failed to fetch order: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to fetch order")
        }
    }
}
