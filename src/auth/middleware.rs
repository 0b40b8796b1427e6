use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::Method;
use actix_web::{error::ErrorUnauthorized, http::header, Error, HttpMessage};
use futures::future::LocalBoxFuture;

use crate::auth::config::AuthConfig;
use crate::auth::jwt::verify_token;
use crate::auth::Principal;

#[derive(Clone)]
pub struct AuthLayer {
    config: AuthConfig,
}

impl AuthLayer {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthLayer
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddleware {
            service: Rc::new(service),
            inner: self.clone(),
        }))
    }
}

pub struct AuthMiddleware<S> {
    service: Rc<S>,
    inner: AuthLayer,
}

// '/', '/health' and the gateway-called webhook carry no credentials;
// the public menu is readable without auth.
fn is_public(req: &ServiceRequest) -> bool {
    let path = req.path();
    path == "/"
        || path == "/health"
        || path == "/payment-webhook"
        || (req.method() == Method::GET && (path == "/menu" || path.starts_with("/menu/")))
}

/// Parses the `?as=admin-N` / `?as=user-N` impersonation parameter used
/// with the dev bypass token.
fn bypass_principal(query: &str) -> Option<Principal> {
    let as_value = query
        .split('&')
        .find_map(|pair| pair.strip_prefix("as="))?;
    if let Some(id) = as_value.strip_prefix("admin-") {
        return Some(Principal::Admin {
            admin_id: id.parse().ok()?,
        });
    }
    if let Some(id) = as_value.strip_prefix("user-") {
        return Some(Principal::User {
            user_id: id.parse().ok()?,
        });
    }
    None
}

impl<S, B> Service<ServiceRequest> for AuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if is_public(&req) {
            let fut = self.service.call(req);
            return Box::pin(fut);
        }

        let token_opt = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .map(|s| s.to_string());
        let Some(token) = token_opt.filter(|t| !t.is_empty()) else {
            return Box::pin(async { Err(ErrorUnauthorized("missing or invalid auth header")) });
        };

        if let Some(bypass) = &self.inner.config.dev_bypass_token {
            if &token == bypass {
                if let Some(principal) = bypass_principal(req.query_string()) {
                    req.extensions_mut().insert(principal);
                    let fut = self.service.call(req);
                    return Box::pin(fut);
                }
                return Box::pin(async { Err(ErrorUnauthorized("invalid bypass principal")) });
            }
        }

        match verify_token(&token, &self.inner.config.jwt_secret) {
            Ok(claims) => {
                let principal = if claims.role == "admin" {
                    Principal::Admin {
                        admin_id: claims.sub,
                    }
                } else {
                    Principal::User {
                        user_id: claims.sub,
                    }
                };
                req.extensions_mut().insert(principal);
                let fut = self.service.call(req);
                Box::pin(fut)
            }
            Err(_) => Box::pin(async { Err(ErrorUnauthorized("unauthorized")) }),
        }
    }
}
