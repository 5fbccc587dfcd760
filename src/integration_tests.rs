#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use axum::Router;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use crate::app_system::{Config, ShopSystem};
    use crate::http::router;

    struct TestShop {
        dir: TempDir,
        system: ShopSystem,
        app: Router,
    }

    impl TestShop {
        fn start() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let config = Config {
                inventory_path: dir.path().join("sweets.csv"),
                billing_path: dir.path().join("customer.csv"),
                ..Config::default()
            };
            let system = ShopSystem::with_bill_ids(&config, || 4242);
            let app = router(system.app_state());
            Self { dir, system, app }
        }

        async fn call(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
            let builder = Request::builder().method(method).uri(uri);
            let request = match body {
                Some(body) => builder
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
                None => builder.body(Body::empty()).unwrap(),
            };
            let response = self.app.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let bytes = response.into_body().collect().await.unwrap().to_bytes();
            let value = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap_or(Value::Null)
            };
            (status, value)
        }

        async fn add(&self, sweet: Value) -> (StatusCode, Value) {
            self.call(Method::POST, "/api/sweets/add", Some(sweet)).await
        }

        fn read(&self, file: &str) -> String {
            std::fs::read_to_string(self.dir.path().join(file)).unwrap()
        }

        async fn stop(self) {
            self.system.shutdown().await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_add_then_list() {
        let shop = TestShop::start();

        let (status, body) = shop
            .add(json!({"name": "Choco", "cost": "10", "quantity": "5", "ingredient": "Cocoa"}))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "Sweet added successfully"}));

        let (status, body) = shop.call(Method::GET, "/api/sweets", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([{"Name": "Choco", "Cost": 10, "Quantity": 5.0, "Ingredient": "Cocoa"}])
        );
        assert_eq!(
            shop.read("sweets.csv"),
            "Name,Cost,Quantity,Ingredient\nChoco,10,5.0,Cocoa\n"
        );

        shop.stop().await;
    }

    #[tokio::test]
    async fn test_list_without_inventory_file() {
        let shop = TestShop::start();

        let (status, body) = shop.call(Method::GET, "/api/sweets", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));

        shop.stop().await;
    }

    #[tokio::test]
    async fn test_search_update_delete() {
        let shop = TestShop::start();
        shop.add(json!({"name": "Choco", "cost": 10, "quantity": 5, "ingredient": "Cocoa"}))
            .await;

        let (status, body) = shop.call(Method::GET, "/api/sweets/search/0", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["Name"], "Choco");

        let (status, body) = shop.call(Method::GET, "/api/sweets/search/5", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Sweet not found"}));

        let (status, body) = shop
            .call(
                Method::PUT,
                "/api/sweets/update/0",
                Some(json!({"name": "Barfi", "cost": 30.7, "quantity": "2.5", "ingredient": "Milk"})),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "Sweet updated successfully"}));

        let (_, body) = shop.call(Method::GET, "/api/sweets/search/0", None).await;
        assert_eq!(
            body,
            json!({"Name": "Barfi", "Cost": 30, "Quantity": 2.5, "Ingredient": "Milk"})
        );

        let (status, body) = shop
            .call(
                Method::PUT,
                "/api/sweets/update/3",
                Some(json!({"name": "X", "cost": 1, "quantity": 1, "ingredient": "Y"})),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Sweet not found"}));

        let (status, body) = shop.call(Method::DELETE, "/api/sweets/delete/0", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "Sweet deleted successfully"}));

        let (status, _) = shop.call(Method::DELETE, "/api/sweets/delete/0", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, body) = shop.call(Method::GET, "/api/sweets", None).await;
        assert_eq!(body, json!([]));

        shop.stop().await;
    }

    #[tokio::test]
    async fn test_delete_shifts_codes() {
        let shop = TestShop::start();
        for name in ["A", "B", "C"] {
            shop.add(json!({"name": name, "cost": 1, "quantity": 1, "ingredient": "I"}))
                .await;
        }

        shop.call(Method::DELETE, "/api/sweets/delete/1", None).await;

        let (_, body) = shop.call(Method::GET, "/api/sweets/search/1", None).await;
        assert_eq!(body["Name"], "C");

        shop.stop().await;
    }

    #[tokio::test]
    async fn test_invalid_cost_is_server_error() {
        let shop = TestShop::start();

        let (status, body) = shop
            .add(json!({"name": "Bad", "cost": "ten", "quantity": 1, "ingredient": "I"}))
            .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
        assert!(!shop.dir.path().join("sweets.csv").exists());

        shop.stop().await;
    }

    #[tokio::test]
    async fn test_create_bill() {
        let shop = TestShop::start();
        shop.add(json!({"name": "Choco", "cost": 50, "quantity": 10, "ingredient": "Cocoa"}))
            .await;

        let (status, body) = shop
            .call(
                Method::POST,
                "/api/bills/create",
                Some(json!({
                    "sweet_code": 0,
                    "customer_name": "Asha",
                    "date": "2024-05-01",
                    "quantity": "3",
                })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"amount": 150, "message": "Bill created successfully"})
        );
        assert_eq!(
            shop.read("customer.csv"),
            "billid,Customer,Date,Amount,Sweet\n4242,Asha,2024-05-01,150,Choco\n"
        );

        shop.stop().await;
    }

    #[tokio::test]
    async fn test_bill_for_unknown_sweet() {
        let shop = TestShop::start();

        let (status, body) = shop
            .call(
                Method::POST,
                "/api/bills/create",
                Some(json!({
                    "sweet_code": 7,
                    "customer_name": "Asha",
                    "date": "2024-05-01",
                    "quantity": 1,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Sweet not found"}));
        assert!(!shop.dir.path().join("customer.csv").exists());

        shop.stop().await;
    }

    #[tokio::test]
    async fn test_chart_is_png_data_uri() {
        let shop = TestShop::start();
        shop.add(json!({"name": "Choco", "cost": 50, "quantity": 10, "ingredient": "Cocoa"}))
            .await;
        shop.add(json!({"name": "Ladoo", "cost": 20, "quantity": 4, "ingredient": "Besan"}))
            .await;

        let (status, body) = shop.call(Method::GET, "/api/charts/sweets", None).await;
        assert_eq!(status, StatusCode::OK);
        let chart = body["chart"].as_str().unwrap();
        assert!(chart.starts_with("data:image/png;base64,"));
        assert!(chart.len() > "data:image/png;base64,".len());

        shop.stop().await;
    }

    #[tokio::test]
    async fn test_index_page() {
        let shop = TestShop::start();

        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = shop.app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
        assert!(content_type.starts_with("text/html"));
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(String::from_utf8_lossy(&bytes).contains("Sweets Shop"));

        shop.stop().await;
    }

    #[tokio::test]
    async fn test_bad_path_code_is_rejected() {
        let shop = TestShop::start();

        let (status, _) = shop.call(Method::GET, "/api/sweets/search/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        shop.stop().await;
    }
}
