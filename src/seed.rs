use anyhow::{Context, Result};
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::core::aliases::DbPool;
use crate::models::{CreateCategoryEntity, CreateFoodItemEntity};
use crate::schema::{categories, food_items};

/// The four fixed menu categories.
pub fn reference_categories() -> Vec<CreateCategoryEntity> {
    vec![
        CreateCategoryEntity {
            name: "Pre-Workout",
            description: "Energy boosting meals to fuel your training",
            icon: "zap",
            item_count: 15,
        },
        CreateCategoryEntity {
            name: "Post-Workout",
            description: "Recovery meals rich in protein and nutrients",
            icon: "activity",
            item_count: 22,
        },
        CreateCategoryEntity {
            name: "Heart Healthy",
            description: "Cardiovascular wellness focused nutrition",
            icon: "heart",
            item_count: 18,
        },
        CreateCategoryEntity {
            name: "Weight Management",
            description: "Balanced meals for your fitness goals",
            icon: "target",
            item_count: 25,
        },
    ]
}

/// The fixed FreshEats menu.
pub fn reference_food_items() -> Vec<CreateFoodItemEntity> {
    vec![
        CreateFoodItemEntity {
            name: "Grilled Chicken Quinoa Bowl",
            description: "Lean protein with complete amino acids, quinoa, and steamed broccoli. Perfect post-workout meal.",
            price: 12.99,
            calories: 450,
            protein: "35g",
            image: "https://images.pexels.com/photos/1640777/pexels-photo-1640777.jpeg?auto=compress&cs=tinysrgb&w=400",
            category: "Post-Workout",
        },
        CreateFoodItemEntity {
            name: "Salmon Sweet Potato Power",
            description: "Omega-3 rich salmon with roasted sweet potato and mixed greens. Great for muscle recovery.",
            price: 15.99,
            calories: 520,
            protein: "32g",
            image: "https://images.pexels.com/photos/725991/pexels-photo-725991.jpeg?auto=compress&cs=tinysrgb&w=400",
            category: "Post-Workout",
        },
        CreateFoodItemEntity {
            name: "Protein Power Smoothie Bowl",
            description: "Plant-based protein blend with berries, nuts, and seeds. Ideal pre or post-workout fuel.",
            price: 9.99,
            calories: 380,
            protein: "25g",
            image: "https://images.pexels.com/photos/1640774/pexels-photo-1640774.jpeg?auto=compress&cs=tinysrgb&w=400",
            category: "Pre-Workout",
        },
        CreateFoodItemEntity {
            name: "Turkey Avocado Wrap",
            description: "Whole grain wrap with lean turkey, avocado, and fresh vegetables.",
            price: 8.99,
            calories: 420,
            protein: "30g",
            image: "https://images.pexels.com/photos/1640777/pexels-photo-1640777.jpeg?auto=compress&cs=tinysrgb&w=400",
            category: "Weight Management",
        },
        CreateFoodItemEntity {
            name: "Greek Yogurt Parfait",
            description: "High-protein Greek yogurt with fresh berries and granola.",
            price: 6.99,
            calories: 280,
            protein: "20g",
            image: "https://images.pexels.com/photos/1640774/pexels-photo-1640774.jpeg?auto=compress&cs=tinysrgb&w=400",
            category: "Heart Healthy",
        },
        CreateFoodItemEntity {
            name: "Tuna Poke Bowl",
            description: "Fresh tuna with brown rice, edamame, and vegetables.",
            price: 13.99,
            calories: 420,
            protein: "30g",
            image: "https://images.pexels.com/photos/725991/pexels-photo-725991.jpeg?auto=compress&cs=tinysrgb&w=400",
            category: "Heart Healthy",
        },
        CreateFoodItemEntity {
            name: "Chicken Salad",
            description: "Fresh chicken with lettuce, tomatoes, and cucumbers.",
            price: 10.99,
            calories: 320,
            protein: "30g",
            image: "https://images.pexels.com/photos/725991/pexels-photo-725991.jpeg?auto=compress&cs=tinysrgb&w=400",
            category: "Heart Healthy",
        },
        CreateFoodItemEntity {
            name: "Oatmeal Banana Energy Bowl",
            description: "Steel-cut oats with banana, chia seeds, and almond butter. Slow-release carbs for pre-workout energy.",
            price: 7.99,
            calories: 350,
            protein: "12g",
            image: "https://images.pexels.com/photos/461382/pexels-photo-461382.jpeg?auto=compress&cs=tinysrgb&w=400",
            category: "Pre-Workout",
        },
        CreateFoodItemEntity {
            name: "Egg White Veggie Scramble",
            description: "Egg whites scrambled with spinach, tomatoes, and peppers. Low-calorie, high-protein breakfast.",
            price: 8.49,
            calories: 210,
            protein: "22g",
            image: "https://images.pexels.com/photos/5938/food-healthy-breakfast-egg.jpg?auto=compress&cs=tinysrgb&w=400",
            category: "Weight Management",
        },
        CreateFoodItemEntity {
            name: "Quinoa Black Bean Salad",
            description: "Quinoa, black beans, corn, and avocado tossed in a lime vinaigrette. Plant-based and filling.",
            price: 9.49,
            calories: 390,
            protein: "16g",
            image: "https://images.pexels.com/photos/1640775/pexels-photo-1640775.jpeg?auto=compress&cs=tinysrgb&w=400",
            category: "Heart Healthy",
        },
        CreateFoodItemEntity {
            name: "Beef & Broccoli Stir Fry",
            description: "Lean beef strips with broccoli and bell peppers in a light soy-ginger sauce. Served with brown rice.",
            price: 13.49,
            calories: 480,
            protein: "36g",
            image: "https://images.pexels.com/photos/461382/pexels-photo-461382.jpeg?auto=compress&cs=tinysrgb&w=400",
            category: "Post-Workout",
        },
        CreateFoodItemEntity {
            name: "Avocado Toast with Poached Egg",
            description: "Whole grain toast topped with smashed avocado and a poached egg. Simple, healthy, and delicious.",
            price: 7.49,
            calories: 320,
            protein: "14g",
            image: "https://images.pexels.com/photos/1640776/pexels-photo-1640776.jpeg?auto=compress&cs=tinysrgb&w=400",
            category: "Pre-Workout",
        },
        CreateFoodItemEntity {
            name: "Lentil & Spinach Soup",
            description: "Hearty lentil soup with spinach, carrots, and celery. High in fiber and protein.",
            price: 8.99,
            calories: 260,
            protein: "18g",
            image: "https://images.pexels.com/photos/461382/pexels-photo-461382.jpeg?auto=compress&cs=tinysrgb&w=400",
            category: "Heart Healthy",
        },
        CreateFoodItemEntity {
            name: "Shrimp Brown Rice Bowl",
            description: "Grilled shrimp with brown rice, edamame, and sesame seeds. Light and protein-rich.",
            price: 14.49,
            calories: 410,
            protein: "28g",
            image: "https://images.pexels.com/photos/461382/pexels-photo-461382.jpeg?auto=compress&cs=tinysrgb&w=400",
            category: "Weight Management",
        },
        CreateFoodItemEntity {
            name: "Berry Beet Pre-Workout Juice",
            description: "Fresh beet, berry, and orange juice blend. Boosts nitric oxide for better workouts.",
            price: 5.99,
            calories: 120,
            protein: "2g",
            image: "https://images.pexels.com/photos/1640774/pexels-photo-1640774.jpeg?auto=compress&cs=tinysrgb&w=400",
            category: "Pre-Workout",
        },
        CreateFoodItemEntity {
            name: "Chickpea & Kale Power Bowl",
            description: "Roasted chickpeas, kale, sweet potato, and tahini dressing. Vegan and nutrient-dense.",
            price: 10.49,
            calories: 410,
            protein: "17g",
            image: "https://images.pexels.com/photos/1640775/pexels-photo-1640775.jpeg?auto=compress&cs=tinysrgb&w=400",
            category: "Weight Management",
        },
        CreateFoodItemEntity {
            name: "Cottage Cheese Fruit Plate",
            description: "Low-fat cottage cheese with pineapple, berries, and melon. Light and refreshing.",
            price: 6.49,
            calories: 220,
            protein: "19g",
            image: "https://images.pexels.com/photos/1640776/pexels-photo-1640776.jpeg?auto=compress&cs=tinysrgb&w=400",
            category: "Heart Healthy",
        },
        CreateFoodItemEntity {
            name: "Tofu Stir Fry",
            description: "Tofu cubes stir-fried with broccoli, carrots, and snap peas in a ginger garlic sauce.",
            price: 9.99,
            calories: 340,
            protein: "21g",
            image: "https://images.pexels.com/photos/1640775/pexels-photo-1640775.jpeg?auto=compress&cs=tinysrgb&w=400",
            category: "Weight Management",
        },
        CreateFoodItemEntity {
            name: "Almond Butter Banana Wrap",
            description: "Whole wheat wrap with almond butter, banana, and a sprinkle of chia seeds.",
            price: 7.49,
            calories: 310,
            protein: "10g",
            image: "https://images.pexels.com/photos/1640776/pexels-photo-1640776.jpeg?auto=compress&cs=tinysrgb&w=400",
            category: "Pre-Workout",
        },
        CreateFoodItemEntity {
            name: "Baked Cod with Asparagus",
            description: "Oven-baked cod fillet with lemon, served with steamed asparagus and brown rice.",
            price: 13.99,
            calories: 370,
            protein: "34g",
            image: "https://images.pexels.com/photos/725991/pexels-photo-725991.jpeg?auto=compress&cs=tinysrgb&w=400",
            category: "Heart Healthy",
        },
    ]
}

/// Populate empty catalog tables with the fixed menu. Unique name
/// constraints plus `ON CONFLICT DO NOTHING` keep concurrent first loads
/// idempotent instead of double-seeding.
pub async fn seed_catalog(db_pool: &DbPool) -> Result<()> {
    let conn = &mut db_pool
        .get()
        .await
        .context("Failed to obtain a DB connection pool")?;

    conn.transaction(|conn| {
        Box::pin(async move {
            let seeded_categories = diesel::insert_into(categories::table)
                .values(reference_categories())
                .on_conflict_do_nothing()
                .execute(conn)
                .await
                .context("Failed to seed categories")?;

            let seeded_items = diesel::insert_into(food_items::table)
                .values(reference_food_items())
                .on_conflict_do_nothing()
                .execute(conn)
                .await
                .context("Failed to seed food items")?;

            if seeded_categories == 0 && seeded_items == 0 {
                tracing::info!("Catalog already seeded");
            } else {
                tracing::info!(
                    "Seeded {} categories and {} food items",
                    seeded_categories,
                    seeded_items
                );
            }

            Ok::<(), anyhow::Error>(())
        })
    })
    .await
    .context("Seeding transaction failed")
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn reference_dataset_has_the_expected_shape() {
        assert_eq!(reference_categories().len(), 4);
        assert_eq!(reference_food_items().len(), 20);
    }

    #[test]
    fn every_item_points_at_a_seeded_category() {
        let names: HashSet<_> = reference_categories()
            .iter()
            .map(|category| category.name)
            .collect();
        for item in reference_food_items() {
            assert!(names.contains(item.category), "unknown category for {}", item.name);
        }
    }

    #[test]
    fn seed_names_are_unique() {
        let items = reference_food_items();
        let names: HashSet<_> = items.iter().map(|item| item.name).collect();
        assert_eq!(names.len(), items.len());
    }

    #[test]
    fn prices_and_calories_are_positive() {
        for item in reference_food_items() {
            assert!(item.price > 0.0, "{} has no price", item.name);
            assert!(item.calories > 0, "{} has no calories", item.name);
        }
    }
}
