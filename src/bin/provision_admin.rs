//! One-off provisioning: create the company admin account, or promote an
//! existing user to admin. Reads ADMIN_EMAIL and ADMIN_PASSWORD from the
//! environment, prints what happened, and exits non-zero on failure.

use mongodb::bson::{doc, DateTime};

use fleetline_api::db::mongo::create_mongo_client;
use fleetline_api::models::account::User;
use fleetline_api::services::validation_service;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let email = match std::env::var("ADMIN_EMAIL") {
        Ok(value) => value,
        Err(_) => {
            eprintln!("ADMIN_EMAIL must be set");
            std::process::exit(1);
        }
    };
    let password = match std::env::var("ADMIN_PASSWORD") {
        Ok(value) => value,
        Err(_) => {
            eprintln!("ADMIN_PASSWORD must be set");
            std::process::exit(1);
        }
    };

    if !validation_service::is_valid_email(&email) {
        eprintln!("Invalid admin email: {}", email);
        std::process::exit(1);
    }
    if validation_service::is_blank(&password) {
        eprintln!("ADMIN_PASSWORD must not be blank");
        std::process::exit(1);
    }

    let mongo_uri = match std::env::var("MONGODB_URI") {
        Ok(value) => value,
        Err(_) => {
            eprintln!("MONGODB_URI must be set");
            std::process::exit(1);
        }
    };

    let client = create_mongo_client(&mongo_uri).await;
    let collection: mongodb::Collection<User> = client.database("Account").collection("Users");

    match collection.find_one(doc! { "email": &email }).await {
        Ok(Some(_)) => {
            let update = doc! { "$set": { "role": "admin", "updated_at": DateTime::now() } };
            match collection.update_one(doc! { "email": &email }, update).await {
                Ok(_) => println!("Promoted existing user {} to admin", email),
                Err(err) => {
                    eprintln!("Failed to promote {}: {}", email, err);
                    std::process::exit(1);
                }
            }
        }
        Ok(None) => {
            let hashed = match bcrypt::hash(&password, bcrypt::DEFAULT_COST) {
                Ok(hashed) => hashed,
                Err(err) => {
                    eprintln!("Failed to hash password: {}", err);
                    std::process::exit(1);
                }
            };

            let now = DateTime::now();
            let user = User {
                id: None,
                email: email.clone(),
                password: hashed,
                first_name: Some("Admin".to_string()),
                last_name: None,
                phone_number: None,
                role: Some("admin".to_string()),
                last_signin: None,
                failed_signins: Some(0),
                created_at: Some(now),
                updated_at: Some(now),
            };

            match collection.insert_one(&user).await {
                Ok(_) => println!("Created admin account {}", email),
                Err(err) => {
                    eprintln!("Failed to create admin account: {}", err);
                    std::process::exit(1);
                }
            }
        }
        Err(err) => {
            eprintln!("Failed to look up {}: {}", email, err);
            std::process::exit(1);
        }
    }
}
