use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::{PathError, QueryPayloadError},
    web, Error, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;

use crate::core::AppError;
use crate::middleware::request_id::RequestId;

/// Middleware that logs every failed request with its correlation id
pub struct ErrorLogger;

impl<S, B> Transform<S, ServiceRequest> for ErrorLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = ErrorLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ErrorLoggerMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct ErrorLoggerMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for ErrorLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let request_id = req
            .extensions()
            .get::<RequestId>()
            .map(|id| id.0.clone())
            .unwrap_or_else(|| "unknown".to_string());
        let path = req.path().to_string();

        Box::pin(async move {
            let result = service.call(req).await;

            match &result {
                Ok(res) if res.status().is_server_error() => {
                    let message = res.response().error().map(|e| e.to_string());
                    tracing::error!(
                        request_id = %request_id,
                        path = %path,
                        status = res.status().as_u16(),
                        error = ?message,
                        "Request failed"
                    );
                }
                Ok(res) if res.status().is_client_error() => {
                    let message = res.response().error().map(|e| e.to_string());
                    tracing::warn!(
                        request_id = %request_id,
                        path = %path,
                        status = res.status().as_u16(),
                        error = ?message,
                        "Request rejected"
                    );
                }
                Err(err) => {
                    tracing::error!(request_id = %request_id, path = %path, "Request error: {:?}", err);
                }
                _ => {}
            }

            result
        })
    }
}

/// Query strings that fail to deserialize become `VALIDATION_ERROR`s
pub fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> Error {
    AppError::validation(format!("invalid query parameter: {}", err)).into()
}

/// Path segments that fail to deserialize become `VALIDATION_ERROR`s
pub fn path_error(err: PathError, _req: &HttpRequest) -> Error {
    AppError::validation(format!("invalid path parameter: {}", err)).into()
}

/// Extractor configs routing deserialization failures through [`AppError`]
pub fn configure_extractors(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(query_error))
        .app_data(web::PathConfig::default().error_handler(path_error));
}
