use actix_web::{web, HttpResponse, Responder};
use bson::{doc, oid::ObjectId, DateTime};
use futures::TryStreamExt;
use mongodb::Client;
use std::sync::Arc;

use crate::middleware::auth::Claims;
use crate::models::invoice::Invoice;
use crate::models::order::Order;
use crate::models::trip::Trip;
use crate::services::invoice_service::InvoiceService;

fn parse_user_id(claims: &Claims) -> Result<ObjectId, HttpResponse> {
    ObjectId::parse_str(&claims.user_id)
        .map_err(|_| HttpResponse::BadRequest().body("Invalid user ID"))
}

/// Generate an invoice for an open order, one line item per trip.
pub async fn create_invoice_for_order(
    data: web::Data<Arc<Client>>,
    path: web::Path<String>,
    claims: Claims,
) -> impl Responder {
    let client = data.into_inner();

    let user_id = match parse_user_id(&claims) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let order_id = match ObjectId::parse_str(path.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid order ID"),
    };

    let orders_collection: mongodb::Collection<Order> =
        client.database("Dispatch").collection("Orders");

    let order = match orders_collection
        .find_one(doc! { "_id": order_id, "user_id": user_id })
        .await
    {
        Ok(Some(order)) => order,
        Ok(None) => return HttpResponse::NotFound().body("Order not found"),
        Err(err) => {
            eprintln!("Failed to fetch order: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to generate invoice");
        }
    };

    if order.status == "invoiced" {
        return HttpResponse::Conflict().body("Order already invoiced");
    }

    let trips_collection: mongodb::Collection<Trip> =
        client.database("Dispatch").collection("Trips");

    let trips = match trips_collection
        .find(doc! { "_id": { "$in": order.trip_ids.clone() } })
        .await
    {
        Ok(cursor) => match cursor.try_collect::<Vec<Trip>>().await {
            Ok(trips) => trips,
            Err(err) => {
                eprintln!("Failed to collect trips: {:?}", err);
                return HttpResponse::InternalServerError().body("Failed to generate invoice");
            }
        },
        Err(err) => {
            eprintln!("Failed to find trips: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to generate invoice");
        }
    };

    let invoice = InvoiceService::build_invoice(&order, &trips);

    let invoices_collection: mongodb::Collection<Invoice> =
        client.database("Dispatch").collection("Invoices");

    match invoices_collection.insert_one(&invoice).await {
        Ok(result) => {
            if let Err(err) = orders_collection
                .update_one(
                    doc! { "_id": order_id },
                    doc! { "$set": { "status": "invoiced", "updated_at": DateTime::now() } },
                )
                .await
            {
                eprintln!("Failed to mark order invoiced: {:?}", err);
            }

            let mut stored = invoice;
            stored.id = result.inserted_id.as_object_id();
            HttpResponse::Ok().json(stored)
        }
        Err(err) => {
            eprintln!("Failed to insert invoice: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to generate invoice")
        }
    }
}

pub async fn get_invoices(data: web::Data<Arc<Client>>, claims: Claims) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<Invoice> =
        client.database("Dispatch").collection("Invoices");

    let user_id = match parse_user_id(&claims) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match collection.find(doc! { "user_id": user_id }).await {
        Ok(cursor) => match cursor.try_collect::<Vec<Invoice>>().await {
            Ok(invoices) => HttpResponse::Ok().json(invoices),
            Err(err) => {
                eprintln!("Failed to collect invoices: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to fetch invoices")
            }
        },
        Err(err) => {
            eprintln!("Failed to find invoices: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to fetch invoices")
        }
    }
}

pub async fn get_invoice_by_id(
    data: web::Data<Arc<Client>>,
    path: web::Path<String>,
    claims: Claims,
) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<Invoice> =
        client.database("Dispatch").collection("Invoices");

    let user_id = match parse_user_id(&claims) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let invoice_id = match ObjectId::parse_str(path.into_inner()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid invoice ID"),
    };

    match collection
        .find_one(doc! { "_id": invoice_id, "user_id": user_id })
        .await
    {
        Ok(Some(invoice)) => HttpResponse::Ok().json(invoice),
        Ok(None) => HttpResponse::NotFound().body("Invoice not found"),
        Err(err) => {
            eprintln!("Failed to fetch invoice: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to fetch invoice")
        }
    }
}
