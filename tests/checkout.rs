//! End-to-end checkout properties, driven through the public service API.

use anyhow::Result;
use storefront::{
    context::AppContext,
    domain::{
        carts::{
            CartsService,
            models::{CartLineUuid, NewCartLine},
        },
        catalog::{
            CatalogService,
            models::{CategoryUuid, NewCategory, NewProduct, Product, ProductUuid},
        },
        orders::{
            OrdersService, OrdersServiceError,
            models::{CartSource, OrderStatus, PaymentMethod, PlaceOrder},
        },
        reviews::{ReviewsService, ReviewsServiceError, models::SubmitRating},
        users::{UsersService, models::{NewUser, UserUuid}},
    },
};

struct Harness {
    app: AppContext,
    user: UserUuid,
    category: CategoryUuid,
}

impl Harness {
    async fn new() -> Result<Self> {
        let app = AppContext::in_memory();

        let user = UserUuid::now_v7();
        app.users
            .create_user(NewUser {
                uuid: user,
                name: "Test User".to_string(),
                email: "test@example.com".to_string(),
            })
            .await?;

        let category = CategoryUuid::now_v7();
        app.catalog
            .create_category(NewCategory {
                uuid: category,
                name: "Kitchen".to_string(),
            })
            .await?;

        Ok(Self {
            app,
            user,
            category,
        })
    }

    async fn product(&self, name: &str, price: u64, stock: u32) -> Result<Product> {
        Ok(self
            .app
            .catalog
            .create_product(NewProduct {
                uuid: ProductUuid::now_v7(),
                name: name.to_string(),
                description: format!("{name} for integration tests"),
                price,
                stock,
                category_uuid: self.category,
            })
            .await?)
    }

    async fn fill_cart(&self, user: UserUuid, product: ProductUuid, quantity: u32) -> Result<()> {
        self.app
            .carts
            .add_line(
                user,
                NewCartLine {
                    uuid: CartLineUuid::now_v7(),
                    product_uuid: product,
                    quantity,
                },
            )
            .await?;

        Ok(())
    }

    async fn another_user(&self, email: &str) -> Result<UserUuid> {
        let uuid = UserUuid::now_v7();
        self.app
            .users
            .create_user(NewUser {
                uuid,
                name: "Another User".to_string(),
                email: email.to_string(),
            })
            .await?;

        Ok(uuid)
    }
}

fn request() -> PlaceOrder {
    PlaceOrder::new("1 High St", PaymentMethod::Cod).expect("valid request")
}

/// The concrete scenario from the contract: price 100, quantity 2, stock 5.
#[tokio::test]
async fn successful_checkout_totals_and_decrements() -> Result<()> {
    let h = Harness::new().await?;
    let product = h.product("Teapot", 100, 5).await?;
    h.fill_cart(h.user, product.uuid, 2).await?;

    let order = h
        .app
        .orders
        .place_order(h.user, CartSource::Stored, request())
        .await?;

    assert_eq!(order.total_amount, 200);
    assert_eq!(order.status, OrderStatus::Pending);

    let fetched = h.app.catalog.get_product(product.uuid).await?;
    assert_eq!(fetched.stock, 3);

    let cart = h.app.carts.list_for_user(h.user).await?;
    assert!(cart.is_empty(), "cart must be empty after checkout");

    Ok(())
}

/// Same cart with stock 1: nothing moves.
#[tokio::test]
async fn failed_checkout_changes_nothing() -> Result<()> {
    let h = Harness::new().await?;
    let product = h.product("Teapot", 100, 1).await?;
    h.fill_cart(h.user, product.uuid, 2).await?;

    let result = h
        .app
        .orders
        .place_order(h.user, CartSource::Stored, request())
        .await;

    match result {
        Err(OrdersServiceError::InsufficientStock { product: named }) => {
            assert_eq!(named, product.uuid);
        }
        other => panic!("expected InsufficientStock, got {other:?}"),
    }

    let fetched = h.app.catalog.get_product(product.uuid).await?;
    assert_eq!(fetched.stock, 1);

    let cart = h.app.carts.list_for_user(h.user).await?;
    assert_eq!(cart.len(), 1, "failed checkout must not clear the cart");

    let orders = h.app.orders.list_for_user(h.user).await?;
    assert!(orders.is_empty(), "no order may exist after the failure");

    Ok(())
}

/// Two concurrent checkouts race for the last unit: exactly one wins.
#[tokio::test(flavor = "multi_thread")]
async fn no_oversell_under_concurrency() -> Result<()> {
    let h = Harness::new().await?;
    let product = h.product("Teapot", 100, 1).await?;

    let alice = h.user;
    let bob = h.another_user("bob@example.com").await?;

    h.fill_cart(alice, product.uuid, 1).await?;
    h.fill_cart(bob, product.uuid, 1).await?;

    let orders_a = h.app.orders.clone();
    let orders_b = h.app.orders.clone();

    let task_a =
        tokio::spawn(
            async move { orders_a.place_order(alice, CartSource::Stored, request()).await },
        );
    let task_b =
        tokio::spawn(
            async move { orders_b.place_order(bob, CartSource::Stored, request()).await },
        );

    let result_a = task_a.await?;
    let result_b = task_b.await?;

    let successes = [&result_a, &result_b]
        .iter()
        .filter(|r| r.is_ok())
        .count();

    assert_eq!(successes, 1, "exactly one checkout may win the last unit");

    for result in [result_a, result_b] {
        if let Err(error) = result {
            assert!(
                matches!(
                    error,
                    OrdersServiceError::InsufficientStock { product: named } if named == product.uuid
                ),
                "loser must fail with InsufficientStock, got {error:?}"
            );
        }
    }

    let fetched = h.app.catalog.get_product(product.uuid).await?;
    assert_eq!(fetched.stock, 0, "stock ends at zero, never negative");

    Ok(())
}

/// Stock conservation across a multi-line cart.
#[tokio::test]
async fn multi_line_checkout_conserves_stock() -> Result<()> {
    let h = Harness::new().await?;
    let teapot = h.product("Teapot", 100, 5).await?;
    let saucer = h.product("Saucer", 40, 7).await?;
    h.fill_cart(h.user, teapot.uuid, 2).await?;
    h.fill_cart(h.user, saucer.uuid, 3).await?;

    let order = h
        .app
        .orders
        .place_order(h.user, CartSource::Stored, request())
        .await?;

    assert_eq!(order.total_amount, 2 * 100 + 3 * 40);

    assert_eq!(h.app.catalog.get_product(teapot.uuid).await?.stock, 3);
    assert_eq!(h.app.catalog.get_product(saucer.uuid).await?.stock, 4);

    let detail = h.app.orders.get_order(h.user, order.uuid).await?;
    assert_eq!(detail.items.len(), 2);

    Ok(())
}

/// Price freeze: repricing after checkout does not touch the order.
#[tokio::test]
async fn order_prices_are_immune_to_repricing() -> Result<()> {
    let h = Harness::new().await?;
    let product = h.product("Teapot", 100, 5).await?;
    h.fill_cart(h.user, product.uuid, 1).await?;

    let order = h
        .app
        .orders
        .place_order(h.user, CartSource::Stored, request())
        .await?;

    h.app.catalog.set_price(product.uuid, 5_000).await?;

    let detail = h.app.orders.get_order(h.user, order.uuid).await?;
    assert_eq!(detail.items[0].unit_price, 100);
    assert_eq!(detail.order.total_amount, 100);

    Ok(())
}

/// The rating gate, end to end: no purchase, then purchase, then duplicate.
#[tokio::test]
async fn rating_gate_follows_purchases() -> Result<()> {
    let h = Harness::new().await?;
    let product = h.product("Teapot", 100, 5).await?;

    let submission = SubmitRating {
        product_uuid: product.uuid,
        value: 4,
        feedback: "Pours well".to_string(),
    };

    let refused = h
        .app
        .reviews
        .submit_rating(h.user, submission.clone())
        .await;
    assert!(
        matches!(refused, Err(ReviewsServiceError::PurchaseNotVerified)),
        "expected PurchaseNotVerified, got {refused:?}"
    );

    h.fill_cart(h.user, product.uuid, 1).await?;
    h.app
        .orders
        .place_order(h.user, CartSource::Stored, request())
        .await?;

    h.app.reviews.submit_rating(h.user, submission.clone()).await?;

    let duplicate = h.app.reviews.submit_rating(h.user, submission).await;
    assert!(
        matches!(duplicate, Err(ReviewsServiceError::DuplicateRating)),
        "expected DuplicateRating, got {duplicate:?}"
    );

    let summary = h.app.reviews.average_for(product.uuid).await?;
    assert_eq!(summary.count, 1);

    Ok(())
}
