use actix_web::{web, HttpResponse, Responder};
use futures::StreamExt;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::models::account::UserRole;

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: UserRole,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateRoleResponse {
    pub success: bool,
    pub message: String,
    pub user_id: String,
    pub role: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserListItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<String>,
    pub created_at: Option<String>,
}

// Admin-only endpoint to update user roles
pub async fn update_user_role(
    data: web::Data<Arc<Client>>,
    path: web::Path<String>,
    input: web::Json<UpdateRoleRequest>,
) -> impl Responder {
    let client = data.into_inner();
    let collection = client
        .database("Account")
        .collection::<mongodb::bson::Document>("Users");

    let user_id_str = path.into_inner();
    let user_id = match ObjectId::parse_str(&user_id_str) {
        Ok(id) => id,
        Err(_) => {
            return HttpResponse::BadRequest().json(UpdateRoleResponse {
                success: false,
                message: "Invalid user ID format".to_string(),
                user_id: user_id_str,
                role: input.role.as_str().to_string(),
            });
        }
    };

    let role_string = input.role.as_str();
    let update = doc! { "$set": { "role": role_string } };

    match collection.update_one(doc! { "_id": user_id }, update).await {
        Ok(result) => {
            if result.matched_count == 0 {
                return HttpResponse::NotFound().json(UpdateRoleResponse {
                    success: false,
                    message: "User not found".to_string(),
                    user_id: user_id.to_hex(),
                    role: role_string.to_string(),
                });
            }
            HttpResponse::Ok().json(UpdateRoleResponse {
                success: true,
                message: format!("User role updated to {}", role_string),
                user_id: user_id.to_hex(),
                role: role_string.to_string(),
            })
        }
        Err(err) => {
            eprintln!("Failed to update user role: {:?}", err);
            HttpResponse::InternalServerError().json(UpdateRoleResponse {
                success: false,
                message: format!("Failed to update user role: {}", err),
                user_id: user_id.to_hex(),
                role: role_string.to_string(),
            })
        }
    }
}

// Admin-only endpoint to get all users with their roles
pub async fn list_users_with_roles(data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let collection = client
        .database("Account")
        .collection::<mongodb::bson::Document>("Users");

    let projection = doc! {
        "_id": 1,
        "email": 1,
        "first_name": 1,
        "last_name": 1,
        "role": 1,
        "created_at": 1
    };

    match collection.find(doc! {}).projection(projection).await {
        Ok(mut cursor) => {
            let mut users = Vec::new();
            while let Some(result) = cursor.next().await {
                if let Ok(doc) = result {
                    // Skip documents that are missing the identifying fields
                    let id = match doc.get_object_id("_id") {
                        Ok(oid) => oid.to_hex(),
                        Err(_) => continue,
                    };
                    let email = match doc.get_str("email") {
                        Ok(e) => e.to_string(),
                        Err(_) => continue,
                    };

                    let first_name = doc.get_str("first_name").ok().map(|s| s.to_string());
                    let last_name = doc.get_str("last_name").ok().map(|s| s.to_string());
                    let role = doc.get_str("role").ok().map(|s| s.to_string());
                    let created_at = doc
                        .get_datetime("created_at")
                        .ok()
                        .map(|dt| dt.to_string());

                    users.push(UserListItem {
                        id,
                        email,
                        first_name,
                        last_name,
                        role,
                        created_at,
                    });
                }
            }
            HttpResponse::Ok().json(users)
        }
        Err(err) => {
            eprintln!("Failed to fetch users: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to fetch users")
        }
    }
}
