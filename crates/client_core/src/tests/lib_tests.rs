use super::*;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post, put},
    Json, Router,
};
use serde_json::json;
use shared::error::ErrorCode;
use shared::protocol::{Customer, LaundryPackage, LaundryPartner};
use tokio::sync::{oneshot, Mutex};

const TEST_TOKEN: &str = "token-abc";

fn make_order(id: &str, status: OrderStatus) -> Order {
    Order {
        id: OrderId(id.to_string()),
        status,
        created_at: "2024-03-04T08:00:00Z".parse().expect("timestamp"),
        customer: Customer {
            name: format!("customer-{id}"),
            email: format!("{id}@example.com"),
            telephone: "0812".to_string(),
            address: "Jl. Kenanga 1".to_string(),
        },
        coupon_code: None,
        laundry_partner: LaundryPartner {
            name: "Cuci Kilat".to_string(),
        },
        package: LaundryPackage {
            name: "Reguler".to_string(),
        },
    }
}

async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });
    format!("http://{addr}")
}

fn bearer_of(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string())
}

fn api_client(base_url: &str) -> DriverApiClient {
    DriverApiClient::new(base_url, Arc::new(StaticToken(TEST_TOKEN.to_string())))
        .expect("client from test url")
}

#[tokio::test]
async fn list_orders_sends_bearer_and_decodes_envelope() {
    let router = Router::new().route(
        "/api/driver/orders",
        get(|headers: HeaderMap| async move {
            if bearer_of(&headers).as_deref() != Some("Bearer token-abc") {
                return (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "errors": "Unauthorized" })),
                );
            }
            let envelope = OrdersEnvelope {
                data: vec![
                    make_order("o1", OrderStatus::Pending),
                    make_order("o2", OrderStatus::Selesai),
                ],
            };
            (
                StatusCode::OK,
                Json(serde_json::to_value(envelope).expect("encode envelope")),
            )
        }),
    );
    let base_url = spawn_server(router).await;

    let orders = api_client(&base_url).list_orders().await.expect("listing");
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].id.as_str(), "o1");
    assert_eq!(orders[1].status, OrderStatus::Selesai);
}

#[tokio::test]
async fn missing_token_fails_before_any_network_traffic() {
    struct NoToken;
    impl AccessTokenProvider for NoToken {
        fn access_token(&self) -> Option<String> {
            None
        }
    }

    // Unroutable base URL: reaching the network would fail differently.
    let client = DriverApiClient::new("http://192.0.2.1:1", Arc::new(NoToken)).expect("client");
    let err = client.list_orders().await.expect_err("must fail");
    assert!(matches!(err, GatewayError::MissingToken));

    let err = client
        .update_order_status(&OrderId("o1".to_string()), OrderStatus::Selesai)
        .await
        .expect_err("must fail");
    assert!(matches!(err, GatewayError::MissingToken));
}

#[tokio::test]
async fn update_order_status_puts_buffered_status_to_the_order_path() {
    let (captured_tx, captured_rx) = oneshot::channel::<(String, String, UpdateOrderStatusRequest)>();
    let captured_tx = Arc::new(Mutex::new(Some(captured_tx)));

    let router = Router::new()
        .route(
            "/api/driver/order/:id",
            put(
                |State(tx): State<Arc<Mutex<Option<oneshot::Sender<(String, String, UpdateOrderStatusRequest)>>>>>,
                 Path(id): Path<String>,
                 headers: HeaderMap,
                 Json(body): Json<UpdateOrderStatusRequest>| async move {
                    if let Some(tx) = tx.lock().await.take() {
                        let _ = tx.send((id, bearer_of(&headers).unwrap_or_default(), body));
                    }
                    StatusCode::OK
                },
            ),
        )
        .with_state(Arc::clone(&captured_tx));
    let base_url = spawn_server(router).await;

    api_client(&base_url)
        .update_order_status(&OrderId("ord-77".to_string()), OrderStatus::Selesai)
        .await
        .expect("update");

    let (id, auth, body) = captured_rx.await.expect("captured request");
    assert_eq!(id, "ord-77");
    assert_eq!(auth, "Bearer token-abc");
    assert_eq!(body.status, OrderStatus::Selesai);
}

#[tokio::test]
async fn server_error_body_maps_to_tagged_api_exception() {
    let router = Router::new().route(
        "/api/driver/order/:id",
        put(|Path(_id): Path<String>| async move {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "errors": "Status tidak valid" })),
            )
        }),
    );
    let base_url = spawn_server(router).await;

    let err = api_client(&base_url)
        .update_order_status(&OrderId("o1".to_string()), OrderStatus::Batal)
        .await
        .expect_err("must fail");
    match err {
        GatewayError::Api(exception) => {
            assert_eq!(exception.code, ErrorCode::Validation);
            assert_eq!(exception.message, "Status tidak valid");
        }
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn opaque_error_body_falls_back_to_generic_message() {
    let router = Router::new().route(
        "/api/driver/orders",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "<html>boom</html>") }),
    );
    let base_url = spawn_server(router).await;

    let err = api_client(&base_url)
        .list_orders()
        .await
        .expect_err("must fail");
    assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
}

#[tokio::test]
async fn driver_profile_decodes_from_the_driver_root() {
    let router = Router::new().route(
        "/api/driver",
        get(|| async { Json(json!({ "name": "Andi", "email": "andi@example.com" })) }),
    );
    let base_url = spawn_server(router).await;

    let profile = api_client(&base_url).driver_profile().await.expect("profile");
    assert_eq!(profile.name, "Andi");
    assert_eq!(profile.email, "andi@example.com");
}

#[tokio::test]
async fn login_then_refresh_rotates_only_the_access_token() {
    let router = Router::new()
        .route(
            "/api/auth/login",
            post(|Json(body): Json<shared::protocol::LoginRequest>| async move {
                if body.email == "driver@example.com" && body.password == "rahasia" {
                    (
                        StatusCode::OK,
                        Json(json!({ "access_token": "acc-1", "refresh_token": "ref-1" })),
                    )
                } else {
                    (
                        StatusCode::UNAUTHORIZED,
                        Json(json!({ "errors": "Email atau password salah" })),
                    )
                }
            }),
        )
        .route(
            "/api/auth/refresh",
            post(|Json(body): Json<shared::protocol::RefreshRequest>| async move {
                assert_eq!(body.refresh_token, "ref-1");
                Json(json!({ "access_token": "acc-2" }))
            }),
        );
    let base_url = spawn_server(router).await;

    let auth = auth::AuthClient::new(&base_url).expect("auth client");
    let session = SessionTokenStore::new();

    let tokens = auth
        .login("driver@example.com", "rahasia")
        .await
        .expect("login");
    session.set(tokens);
    assert_eq!(session.access_token().as_deref(), Some("acc-1"));

    let refresh_token = session.refresh_token().expect("refresh token");
    let access = auth.refresh(&refresh_token).await.expect("refresh");
    session.set_access_token(access);

    assert_eq!(session.access_token().as_deref(), Some("acc-2"));
    assert_eq!(session.refresh_token().as_deref(), Some("ref-1"));

    let err = auth
        .login("driver@example.com", "salah")
        .await
        .expect_err("bad password");
    assert_eq!(err.user_message(), "Email atau password salah");

    session.clear();
    assert!(session.access_token().is_none());
}

#[tokio::test]
async fn confirmed_save_round_trip_patches_only_the_target_row() {
    let router = Router::new()
        .route(
            "/api/driver/orders",
            get(|| async {
                let envelope = OrdersEnvelope {
                    data: vec![
                        make_order("o1", OrderStatus::Pending),
                        make_order("o2", OrderStatus::Pending),
                    ],
                };
                Json(serde_json::to_value(envelope).expect("encode envelope"))
            }),
        )
        .route(
            "/api/driver/order/:id",
            put(|Path(_id): Path<String>| async { StatusCode::OK }),
        );
    let base_url = spawn_server(router).await;
    let client = api_client(&base_url);

    let mut model = OrderListModel::new(ORDER_PAGE_SIZE, true);
    model.begin_load();
    model.apply_loaded(client.list_orders().await.expect("listing"));

    model.begin_edit(&OrderId("o1".to_string()));
    model.set_edited_status(OrderStatus::Selesai);
    model.request_save();
    let update = model.confirm_save().expect("update");

    client
        .update_order_status(&update.order_id, update.status)
        .await
        .expect("update accepted");
    model.apply_save_ok(&update);

    assert_eq!(model.orders()[0].status, OrderStatus::Selesai);
    assert_eq!(model.orders()[1].status, OrderStatus::Pending);
    assert_eq!(*model.editor(), EditorState::Viewing);
}
