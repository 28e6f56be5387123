use std::time::Duration;

use axum::{
    body::Body,
    http::{header, HeaderName, HeaderValue, Request, Response},
    middleware, Router,
};
use tower::ServiceBuilder;
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    trace::{MakeSpan, OnRequest, OnResponse, TraceLayer},
};
use tracing::Span;

use crate::{
    web::{midware, routes::routes, REQUEST_ID_HEADER},
    App, Result,
};

/// The core async function returning a future that will serve this application.
///
/// Accepts an `App` and sets up the middleware stack: request ids, tracing,
/// the error-to-JSON response mapper, permissive CORS (the subscribe endpoint
/// is called from storefront popups on arbitrary origins) and no-cache
/// response headers.
pub async fn serve(app: App) -> Result<()> {
    let App {
        app_state,
        listener,
    } = app;
    let x_request_id: HeaderName = HeaderName::from_static(REQUEST_ID_HEADER);

    let trace_layer = build_trace_layer();

    let app = Router::new().merge(routes(app_state)).layer(
        ServiceBuilder::new()
            // Set UUID per request
            .layer(SetRequestIdLayer::new(
                x_request_id.clone(),
                MakeRequestUuid,
            ))
            .layer(trace_layer)
            // Responses travel through the stack from the bottom up. The
            // response mapper replaces errored responses wholesale, so the
            // CORS, no-cache and request-id propagation layers have to sit
            // above it or the replacement response loses their headers.
            .layer(CorsLayer::permissive())
            .layer(SetResponseHeaderLayer::overriding(
                header::CACHE_CONTROL,
                HeaderValue::from_static("no-store, no-cache, must-revalidate"),
            ))
            .layer(PropagateRequestIdLayer::new(x_request_id))
            .layer(middleware::map_response(midware::response_mapper)),
    );

    axum::serve(listener, app).await?;

    Ok(())
}

/// A helper function that sets up the `tower_http::TraceLayer` - tracing configuration.
fn build_trace_layer() -> TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    impl MakeSpan<Body> + Clone,
    impl OnRequest<Body> + Clone,
    impl OnResponse<Body> + Clone,
> {
    TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            let uuid = req
                .headers()
                .get(REQUEST_ID_HEADER)
                .map(|uuid| uuid.to_str().unwrap_or("").to_string());

            tracing::error_span!(
                "serve",
                id = uuid,
                method = req.method().to_string(),
                path = req.uri().path()
            )
        })
        .on_request(|req: &Request<Body>, _s: &Span| tracing::info!("START @ {}", req.uri()))
        .on_response(|res: &Response<Body>, latency: Duration, _s: &Span| {
            let st_code = res.status().as_u16();

            if (400..=599).contains(&st_code) {
                tracing::error!("END in: {:?} / STATUS: {st_code}", latency)
            } else {
                tracing::info!("END in: {:?} / STATUS: {st_code}", latency)
            }
        })
}
