use chrono::{DateTime, Utc};
use diesel::{
    Selectable,
    prelude::{Identifiable, Insertable, Queryable},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

// Catalog

#[derive(Queryable, Selectable, Identifiable, Serialize, Debug, ToSchema)]
#[diesel(table_name = crate::schema::categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CategoryEntity {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub item_count: i32,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::categories)]
pub struct CreateCategoryEntity {
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub item_count: i32,
}

#[derive(Queryable, Selectable, Identifiable, Serialize, Debug, Clone, ToSchema)]
#[diesel(table_name = crate::schema::food_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct FoodItemEntity {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: f32,
    pub calories: i32,
    pub protein: String,
    pub image: String,
    pub category: String,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::food_items)]
pub struct CreateFoodItemEntity {
    pub name: &'static str,
    pub description: &'static str,
    pub price: f32,
    pub calories: i32,
    pub protein: &'static str,
    pub image: &'static str,
    pub category: &'static str,
}

// Orders

#[derive(Queryable, Selectable, Serialize, Debug, ToSchema)]
#[diesel(table_name = crate::schema::orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderEntity {
    pub id: Uuid,
    pub user_id: i32,
    pub full_name: String,
    pub phone_number: String,
    pub email_address: String,
    pub delivery_address: String,
    pub special_instructions: Option<String>,
    pub items: Value,
    pub subtotal: f32,
    pub tax: f32,
    pub total: f32,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CreateOrderEntity {
    pub user_id: i32,
    pub full_name: String,
    pub phone_number: String,
    pub email_address: String,
    pub delivery_address: String,
    pub special_instructions: Option<String>,
    pub items: Value,
    pub subtotal: f32,
    pub tax: f32,
    pub total: f32,
    pub status: String,
}

// Inquiries

#[derive(Queryable, Selectable, Serialize, Debug, ToSchema)]
#[diesel(table_name = crate::schema::inquiries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct InquiryEntity {
    pub id: Uuid,
    pub user_id: i32,
    pub name: String,
    pub email: String,
    pub message: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::inquiries)]
pub struct CreateInquiryEntity {
    pub user_id: i32,
    pub name: String,
    pub email: String,
    pub message: String,
    pub status: String,
}

// Users

#[derive(Queryable, Selectable, Identifiable, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserEntity {
    pub id: i32,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Deserialize, Debug)]
#[diesel(table_name = crate::schema::users)]
pub struct CreateUserEntity {
    pub email: String,
    pub password_hash: String,
}
