//! Catalog pipeline integration tests over an in-memory store.

use rust_decimal::Decimal;
use surrealdb::engine::local::{Db, Mem};
use surrealdb::{RecordId, Surreal};

use storefront_server::db::models::{ProductCreate, ProductExpanded, ProductUpdate};
use storefront_server::db::repository::{
    BrandRepository, CatalogQuery, CategoryRepository, ProductRepository, RepoError,
};

async fn mem_db() -> Surreal<Db> {
    let db: Surreal<Db> = Surreal::new::<Mem>(()).await.expect("in-memory store");
    db.use_ns("storefront")
        .use_db("storefront")
        .await
        .expect("select namespace");
    db
}

struct Fixture {
    products: ProductRepository,
    brand_a: RecordId,
    brand_b: RecordId,
    category: RecordId,
}

async fn fixture(db: &Surreal<Db>) -> Fixture {
    let brands = BrandRepository::new(db.clone());
    let categories = CategoryRepository::new(db.clone());
    let brand_a = brands.create("Honda").await.unwrap().id.unwrap();
    let brand_b = brands.create("Yamaha").await.unwrap().id.unwrap();
    let category = categories
        .create("Modification Parts")
        .await
        .unwrap()
        .id
        .unwrap();
    Fixture {
        products: ProductRepository::new(db.clone()),
        brand_a,
        brand_b,
        category,
    }
}

impl Fixture {
    async fn add_product(&self, title: &str, brand: &RecordId) -> ProductExpanded {
        self.products
            .create(ProductCreate {
                title: title.to_string(),
                description: format!("{} description", title),
                price: Decimal::from(100),
                discount_percentage: Decimal::ZERO,
                stock_quantity: 10,
                category: self.category.clone(),
                brand: brand.clone(),
                thumbnail: Some("uploads/images/thumb.jpg".to_string()),
                images: vec!["uploads/images/main.jpg".to_string()],
            })
            .await
            .unwrap()
    }
}

#[tokio::test]
async fn brand_filter_paginates_and_counts_independently() {
    let db = mem_db().await;
    let fx = fixture(&db).await;
    let brand_a = fx.brand_a.clone();
    fx.add_product("Spark Plug", &brand_a).await;
    fx.add_product("Chain Kit", &brand_a).await;
    fx.add_product("Mirror", &fx.brand_b.clone()).await;

    let page = fx
        .products
        .list(&CatalogQuery {
            brands: vec![brand_a],
            limit: 2,
            ..CatalogQuery::default()
        })
        .await
        .unwrap();

    assert_eq!(page.products.len(), 2);
    assert_eq!(page.total, 2);
    // Default order is creation descending
    assert_eq!(page.products[0].title, "Chain Kit");
    assert_eq!(page.products[1].title, "Spark Plug");
}

#[tokio::test]
async fn total_is_filter_wide_regardless_of_limit() {
    let db = mem_db().await;
    let fx = fixture(&db).await;
    for i in 0..5 {
        fx.add_product(&format!("Part {}", i), &fx.brand_a.clone())
            .await;
    }

    let page = fx
        .products
        .list(&CatalogQuery {
            limit: 2,
            ..CatalogQuery::default()
        })
        .await
        .unwrap();
    assert_eq!(page.products.len(), 2);
    assert_eq!(page.total, 5);
}

#[tokio::test]
async fn page_beyond_last_is_empty_with_total_unchanged() {
    let db = mem_db().await;
    let fx = fixture(&db).await;
    fx.add_product("Spark Plug", &fx.brand_a.clone()).await;
    fx.add_product("Chain Kit", &fx.brand_a.clone()).await;

    let page = fx
        .products
        .list(&CatalogQuery {
            page: 9,
            limit: 10,
            ..CatalogQuery::default()
        })
        .await
        .unwrap();
    assert!(page.products.is_empty());
    assert_eq!(page.total, 2);
}

#[tokio::test]
async fn extreme_page_and_limit_values_stay_in_bounds() {
    let db = mem_db().await;
    let fx = fixture(&db).await;
    fx.add_product("Spark Plug", &fx.brand_a.clone()).await;

    let far_page = fx
        .products
        .list(&CatalogQuery {
            page: u32::MAX,
            limit: u32::MAX,
            ..CatalogQuery::default()
        })
        .await
        .unwrap();
    assert!(far_page.products.is_empty());
    assert_eq!(far_page.total, 1);

    let first_page = fx
        .products
        .list(&CatalogQuery {
            page: 1,
            limit: u32::MAX,
            ..CatalogQuery::default()
        })
        .await
        .unwrap();
    assert_eq!(first_page.products.len(), 1);
}

#[tokio::test]
async fn expansion_embeds_brand_and_category_records() {
    let db = mem_db().await;
    let fx = fixture(&db).await;
    let created = fx.add_product("Spark Plug", &fx.brand_a.clone()).await;

    assert_eq!(created.brand.name, "Honda");
    assert_eq!(created.category.name, "Modification Parts");

    let fetched = fx
        .products
        .find_by_id(&created.id.unwrap().to_string())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched.brand.name, "Honda");
}

#[tokio::test]
async fn soft_delete_hides_then_undelete_restores() {
    let db = mem_db().await;
    let fx = fixture(&db).await;
    let created = fx.add_product("Spark Plug", &fx.brand_a.clone()).await;
    let id = created.id.unwrap().to_string();

    fx.products
        .update(
            &id,
            ProductUpdate {
                is_deleted: Some(true),
                ..ProductUpdate::default()
            },
        )
        .await
        .unwrap();

    let visible = fx.products.list(&CatalogQuery::default()).await.unwrap();
    assert_eq!(visible.total, 0);

    let with_deleted = fx
        .products
        .list(&CatalogQuery {
            include_deleted: true,
            ..CatalogQuery::default()
        })
        .await
        .unwrap();
    assert_eq!(with_deleted.total, 1);

    fx.products.undelete(&id).await.unwrap();
    let restored = fx.products.list(&CatalogQuery::default()).await.unwrap();
    assert_eq!(restored.total, 1);
}

#[tokio::test]
async fn create_with_zero_images_persists_nothing() {
    let db = mem_db().await;
    let fx = fixture(&db).await;

    let result = fx
        .products
        .create(ProductCreate {
            title: "No Images".to_string(),
            description: "missing media".to_string(),
            price: Decimal::from(10),
            discount_percentage: Decimal::ZERO,
            stock_quantity: 1,
            category: fx.category.clone(),
            brand: fx.brand_a.clone(),
            thumbnail: None,
            images: Vec::new(),
        })
        .await;

    assert!(matches!(result, Err(RepoError::Validation(_))));
    let page = fx.products.list(&CatalogQuery::default()).await.unwrap();
    assert_eq!(page.total, 0);
}

#[tokio::test]
async fn update_replaces_image_list_in_given_order() {
    let db = mem_db().await;
    let fx = fixture(&db).await;
    let created = fx.add_product("Spark Plug", &fx.brand_a.clone()).await;
    let id = created.id.unwrap().to_string();

    let updated = fx
        .products
        .update(
            &id,
            ProductUpdate {
                images: Some(vec![
                    "a.jpg".to_string(),
                    "b.jpg".to_string(),
                    "uploads/images/new.jpg".to_string(),
                ]),
                ..ProductUpdate::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.images, vec!["a.jpg", "b.jpg", "uploads/images/new.jpg"]);
    // untouched fields survive
    assert_eq!(updated.title, "Spark Plug");
}

#[tokio::test]
async fn unknown_sort_field_falls_back_to_store_order() {
    let db = mem_db().await;
    let fx = fixture(&db).await;
    fx.add_product("Spark Plug", &fx.brand_a.clone()).await;

    let page = fx
        .products
        .list(&CatalogQuery {
            sort: "rating; DROP TABLE product".to_string(),
            ..CatalogQuery::default()
        })
        .await
        .unwrap();
    assert_eq!(page.total, 1);
}

#[tokio::test]
async fn price_sort_orders_numerically() {
    let db = mem_db().await;
    let fx = fixture(&db).await;
    let cheap = ProductCreate {
        title: "Cheap".to_string(),
        description: "d".to_string(),
        price: Decimal::new(95, 1), // 9.5
        discount_percentage: Decimal::ZERO,
        stock_quantity: 1,
        category: fx.category.clone(),
        brand: fx.brand_a.clone(),
        thumbnail: None,
        images: vec!["uploads/images/a.jpg".to_string()],
    };
    let pricey = ProductCreate {
        title: "Pricey".to_string(),
        price: Decimal::from(100),
        ..cheap.clone()
    };
    fx.products.create(pricey).await.unwrap();
    fx.products.create(cheap).await.unwrap();

    let page = fx
        .products
        .list(&CatalogQuery {
            sort: "price".to_string(),
            direction: storefront_server::db::repository::SortDirection::Ascending,
            ..CatalogQuery::default()
        })
        .await
        .unwrap();
    assert_eq!(page.products[0].title, "Cheap");
    assert_eq!(page.products[1].title, "Pricey");
}

#[tokio::test]
async fn hard_delete_returns_record_and_removes_it() {
    let db = mem_db().await;
    let fx = fixture(&db).await;
    let created = fx.add_product("Spark Plug", &fx.brand_a.clone()).await;
    let id = created.id.unwrap().to_string();

    let deleted = fx.products.delete(&id).await.unwrap();
    assert_eq!(deleted.title, "Spark Plug");

    assert!(fx.products.find_by_id(&id).await.unwrap().is_none());
    assert!(matches!(
        fx.products.delete(&id).await,
        Err(RepoError::NotFound(_))
    ));
}
