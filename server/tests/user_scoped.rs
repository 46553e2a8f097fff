//! Cart, wishlist, address and review flows over an in-memory store.

use rust_decimal::Decimal;
use surrealdb::engine::local::{Db, Mem};
use surrealdb::{RecordId, Surreal};

use storefront_server::db::models::{
    AddressCreate, AddressUpdate, CartItemCreate, ProductCreate, ReviewCreate, ReviewUpdate,
    WishlistItemCreate,
};
use storefront_server::db::repository::{
    AddressRepository, BrandRepository, CartRepository, CategoryRepository, ProductRepository,
    RepoError, ReviewRepository, WishlistRepository,
};

async fn mem_db() -> Surreal<Db> {
    let db: Surreal<Db> = Surreal::new::<Mem>(()).await.expect("in-memory store");
    db.use_ns("storefront")
        .use_db("storefront")
        .await
        .expect("select namespace");
    db
}

fn user(key: &str) -> RecordId {
    RecordId::from_table_key("user", key)
}

async fn seed_product(db: &Surreal<Db>) -> String {
    let brand = BrandRepository::new(db.clone())
        .create("Honda")
        .await
        .unwrap()
        .id
        .unwrap();
    let category = CategoryRepository::new(db.clone())
        .create("Others")
        .await
        .unwrap()
        .id
        .unwrap();
    ProductRepository::new(db.clone())
        .create(ProductCreate {
            title: "Spark Plug".to_string(),
            description: "d".to_string(),
            price: Decimal::from(10),
            discount_percentage: Decimal::ZERO,
            stock_quantity: 100,
            category,
            brand,
            thumbnail: None,
            images: vec!["uploads/images/a.jpg".to_string()],
        })
        .await
        .unwrap()
        .id
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn cart_lines_expand_products_and_clear_per_user() {
    let db = mem_db().await;
    let product = seed_product(&db).await;
    let cart = CartRepository::new(db.clone());

    let line = cart
        .create(
            user("u1"),
            CartItemCreate {
                product: product.clone(),
                quantity: 2,
            },
        )
        .await
        .unwrap();
    assert_eq!(line.product.title, "Spark Plug");
    assert_eq!(line.quantity, 2);

    cart.create(
        user("u2"),
        CartItemCreate {
            product,
            quantity: 1,
        },
    )
    .await
    .unwrap();

    let updated = cart
        .update_quantity(&line.id.clone().unwrap().to_string(), 5)
        .await
        .unwrap();
    assert_eq!(updated.quantity, 5);

    assert!(matches!(
        cart.update_quantity(&line.id.unwrap().to_string(), 0).await,
        Err(RepoError::Validation(_))
    ));

    cart.clear_user(&user("u1")).await.unwrap();
    assert!(cart.find_by_user(&user("u1")).await.unwrap().is_empty());
    assert_eq!(cart.find_by_user(&user("u2")).await.unwrap().len(), 1);
}

#[tokio::test]
async fn wishlist_note_updates_and_deletes() {
    let db = mem_db().await;
    let product = seed_product(&db).await;
    let wishlist = WishlistRepository::new(db.clone());

    let item = wishlist
        .create(
            user("u1"),
            WishlistItemCreate {
                product,
                note: None,
            },
        )
        .await
        .unwrap();
    let id = item.id.unwrap().to_string();

    let noted = wishlist
        .update_note(&id, Some("birthday gift".to_string()))
        .await
        .unwrap();
    assert_eq!(noted.note.as_deref(), Some("birthday gift"));

    wishlist.delete(&id).await.unwrap();
    assert!(matches!(
        wishlist.delete(&id).await,
        Err(RepoError::NotFound(_))
    ));
}

#[tokio::test]
async fn address_partial_update_touches_only_given_fields() {
    let db = mem_db().await;
    let addresses = AddressRepository::new(db.clone());

    let created = addresses
        .create(
            user("u1"),
            AddressCreate {
                street: "1 Main St".into(),
                city: "Springfield".into(),
                state: "IL".into(),
                postal_code: "62701".into(),
                country: "US".into(),
                phone: "555-0100".into(),
            },
        )
        .await
        .unwrap();
    let id = created.id.unwrap().to_string();

    let updated = addresses
        .update(
            &id,
            AddressUpdate {
                city: Some("Chicago".into()),
                postal_code: Some("60601".into()),
                ..AddressUpdate::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.city, "Chicago");
    assert_eq!(updated.postal_code, "60601");
    assert_eq!(updated.street, "1 Main St");
    assert_eq!(updated.phone, "555-0100");
}

#[tokio::test]
async fn review_rating_bounds_are_enforced() {
    let db = mem_db().await;
    let product = seed_product(&db).await;
    let reviews = ReviewRepository::new(db.clone());

    let rejected = reviews
        .create(
            user("u1"),
            ReviewCreate {
                product: product.clone(),
                rating: 6,
                comment: "too good".into(),
            },
        )
        .await;
    assert!(matches!(rejected, Err(RepoError::Validation(_))));

    let review = reviews
        .create(
            user("u1"),
            ReviewCreate {
                product: product.clone(),
                rating: 4,
                comment: "solid part".into(),
            },
        )
        .await
        .unwrap();
    let id = review.id.unwrap().to_string();

    let updated = reviews
        .update(
            &id,
            ReviewUpdate {
                rating: Some(5),
                comment: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.rating, 5);
    assert_eq!(updated.comment, "solid part");
    assert!(updated.updated_at > updated.created_at);

    let by_product = reviews.find_by_product(&product).await.unwrap();
    assert_eq!(by_product.len(), 1);
}
