use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// `Form` whose rejections render as `AppError` JSON.
#[derive(FromRequest)]
#[from_request(via(axum::Form), rejection(AppError))]
pub struct AppForm<T>(pub T);

/// `Path` whose rejections render as `AppError` JSON.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);
