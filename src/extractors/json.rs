use axum::{
    extract::{FromRequest, Json as AxumJson},
    response::{IntoResponse, Response},
};

use crate::errors::AppError;

/// `axum::Json` whose rejections render as `AppError` 400s.
#[derive(FromRequest)]
#[from_request(via(AxumJson), rejection(AppError))]
pub struct Json<T>(pub T);

impl<T> IntoResponse for Json<T>
where
    AxumJson<T>: IntoResponse,
{
    fn into_response(self) -> Response {
        AxumJson(self.0).into_response()
    }
}
