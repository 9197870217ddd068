use std::collections::HashMap;

use actix_web::http::{Method, StatusCode};
use actix_web::{HttpRequest, HttpResponse, web};

use crate::gateway::{GatewayRequest, GatewayResponse, ProductHandler};
use crate::repository::{ProductReader, ProductWriter};

/// Register the product endpoints for a handler stored as app data.
pub fn configure<R>(cfg: &mut web::ServiceConfig)
where
    R: ProductReader + ProductWriter + 'static,
{
    cfg.route("/products", web::route().to(handle_products::<R>))
        .route("/invoke", web::post().to(invoke::<R>));
}

/// `/products` for any method: normalize the HTTP request and hand it to the gateway.
pub async fn handle_products<R>(
    req: HttpRequest,
    body: web::Bytes,
    handler: web::Data<ProductHandler<R>>,
) -> HttpResponse
where
    R: ProductReader + ProductWriter,
{
    match gateway_request(&req, &body) {
        Ok(request) => into_http_response(handler.handle(&request)),
        Err(response) => into_http_response(response),
    }
}

/// `POST /invoke`: run a serialized gateway request and return the serialized response.
///
/// A descriptor that cannot be decoded is answered directly with a 500 gateway error.
pub async fn invoke<R>(body: web::Bytes, handler: web::Data<ProductHandler<R>>) -> HttpResponse
where
    R: ProductReader + ProductWriter,
{
    match serde_json::from_slice::<GatewayRequest>(&body) {
        Ok(request) => HttpResponse::Ok().json(handler.handle(&request)),
        Err(err) => {
            log::error!("Failed to decode gateway request: {err}");
            into_http_response(GatewayResponse::error(500, &err.to_string()))
        }
    }
}

fn gateway_request(req: &HttpRequest, body: &[u8]) -> Result<GatewayRequest, GatewayResponse> {
    let query = web::Query::<HashMap<String, String>>::from_query(req.query_string())
        .map(web::Query::into_inner)
        .unwrap_or_else(|err| {
            log::warn!("Ignoring malformed query string: {err}");
            HashMap::new()
        });

    let mut request = GatewayRequest::new(req.method().as_str());
    request.query_string_parameters = query;

    // Preflight never reads the body.
    if !body.is_empty() && req.method() != Method::OPTIONS {
        let body = std::str::from_utf8(body).map_err(|err| {
            log::error!("Request body is not valid UTF-8: {err}");
            GatewayResponse::error(500, &err.to_string())
        })?;
        request = request.with_body(body);
    }

    for (name, value) in req.headers() {
        if let Ok(value) = value.to_str() {
            request = request.with_header(name.as_str(), value);
        }
    }

    Ok(request)
}

fn into_http_response(response: GatewayResponse) -> HttpResponse {
    let status =
        StatusCode::from_u16(response.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut builder = HttpResponse::build(status);
    for (name, value) in &response.headers {
        builder.insert_header((name.as_str(), value.as_str()));
    }
    builder.body(response.body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test};
    use serde_json::{Value, json};

    use crate::repository::mock::MockRepository;

    fn handler_data(repo: MockRepository) -> web::Data<ProductHandler<MockRepository>> {
        web::Data::new(ProductHandler::new(repo))
    }

    #[actix_web::test]
    async fn options_request_returns_preflight_headers() {
        let app = test::init_service(
            App::new()
                .app_data(handler_data(MockRepository::new()))
                .configure(configure::<MockRepository>),
        )
        .await;

        let req = test::TestRequest::default()
            .method(actix_web::http::Method::OPTIONS)
            .uri("/products")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()
                .get("access-control-max-age")
                .and_then(|value| value.to_str().ok()),
            Some("86400")
        );
        let body = test::read_body(resp).await;
        assert!(body.is_empty());
    }

    #[actix_web::test]
    async fn delete_is_not_allowed() {
        let app = test::init_service(
            App::new()
                .app_data(handler_data(MockRepository::new()))
                .configure(configure::<MockRepository>),
        )
        .await;

        let req = test::TestRequest::delete().uri("/products?id=1").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"error": "Method not allowed"}));
    }

    #[actix_web::test]
    async fn query_parameters_reach_the_listing() {
        let mut repo = MockRepository::new();
        repo.reader
            .expect_list_products()
            .times(1)
            .withf(|query| query.seller_id.as_deref() == Some("s 1"))
            .returning(|_| Ok(Vec::new()));

        let app = test::init_service(
            App::new()
                .app_data(handler_data(repo))
                .configure(configure::<MockRepository>),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/products?seller_id=s%201")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()
                .get("access-control-allow-origin")
                .and_then(|value| value.to_str().ok()),
            Some("*")
        );
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!([]));
    }

    #[actix_web::test]
    async fn empty_post_body_reports_missing_seller() {
        let app = test::init_service(
            App::new()
                .app_data(handler_data(MockRepository::new()))
                .configure(configure::<MockRepository>),
        )
        .await;

        let req = test::TestRequest::post().uri("/products").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"error": "Missing required field: seller_id"}));
    }

    #[actix_web::test]
    async fn invoke_wraps_the_gateway_response() {
        let app = test::init_service(
            App::new()
                .app_data(handler_data(MockRepository::new()))
                .configure(configure::<MockRepository>),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/invoke")
            .set_json(json!({"httpMethod": "PATCH"}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let envelope: GatewayResponse = test::read_body_json(resp).await;
        assert_eq!(envelope.status_code, 405);
        assert!(!envelope.is_base64_encoded);
        assert_eq!(envelope.body, r#"{"error":"Method not allowed"}"#);
    }

    #[actix_web::test]
    async fn invalid_utf8_body_is_a_server_error() {
        let app = test::init_service(
            App::new()
                .app_data(handler_data(MockRepository::new()))
                .configure(configure::<MockRepository>),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/products")
            .set_payload(vec![b'{', 0xff, 0xfe, b'}'])
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            resp.headers()
                .get("access-control-allow-origin")
                .and_then(|value| value.to_str().ok()),
            Some("*")
        );
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().is_some_and(|msg| msg.contains("utf-8")));
    }

    #[actix_web::test]
    async fn preflight_ignores_an_undecodable_body() {
        let app = test::init_service(
            App::new()
                .app_data(handler_data(MockRepository::new()))
                .configure(configure::<MockRepository>),
        )
        .await;

        let req = test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/products")
            .set_payload(vec![0xff, 0xfe])
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body = test::read_body(resp).await;
        assert!(body.is_empty());
    }

    #[actix_web::test]
    async fn undecodable_invoke_descriptor_is_a_gateway_error() {
        let app = test::init_service(
            App::new()
                .app_data(handler_data(MockRepository::new()))
                .configure(configure::<MockRepository>),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/invoke")
            .set_json(json!({"httpMethod": "GET", "queryStringParameters": {"id": 5}}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            resp.headers()
                .get("access-control-allow-origin")
                .and_then(|value| value.to_str().ok()),
            Some("*")
        );
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].is_string());
    }
}
