use std::sync::Arc;

use agdata_server::app::create_router;
use agdata_server::configs::Storage;
use agdata_server::repositories::SensorTypeRepository;
use agdata_server::services::{SensorTypeRegistry, SensorTypePreset};
use agdata_server::tests::setup_test_db;
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use serde::Serialize;
use tower::ServiceExt;

pub struct MockApp {
    pub storage: Arc<Storage>,
    pub registry: Arc<SensorTypeRegistry>,
    pub router: Router,
}

impl MockApp {
    pub async fn new() -> Self {
        let storage = setup_test_db().await;
        let registry = Arc::new(SensorTypeRegistry::new(Arc::new(SensorTypeRepository::new(
            storage.clone(),
        ))));

        Self::build(storage, registry)
    }

    pub async fn with_presets(presets: Vec<SensorTypePreset>) -> Self {
        let storage = setup_test_db().await;
        let registry = Arc::new(SensorTypeRegistry::with_presets(
            Arc::new(SensorTypeRepository::new(storage.clone())),
            presets,
        ));

        Self::build(storage, registry)
    }

    fn build(storage: Arc<Storage>, registry: Arc<SensorTypeRegistry>) -> Self {
        let router = create_router(storage.clone(), registry.clone());

        Self {
            storage,
            registry,
            router,
        }
    }

    pub async fn send<T: Serialize>(&self, method: Method, uri: &str, body: Option<&T>) -> Response<Body> {
        let builder = Request::builder()
            .uri(uri)
            .method(method)
            .header("Content-Type", "application/json");

        let request = match body {
            Some(body) => builder
                .body(Body::from(serde_json::to_string(body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.router.clone().oneshot(request).await.unwrap()
    }
}

pub async fn read_json(response: Response<Body>) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    serde_json::from_slice(&body).unwrap()
}
