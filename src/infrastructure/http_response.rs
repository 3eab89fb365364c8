// HTTP response utilities for export downloads
use axum::{
    body::Body,
    http::{header, HeaderValue, Response, StatusCode},
};

/// Build a 200 response around already-serialized JSON bytes
pub fn json_bytes_response(body: Vec<u8>) -> Result<Response<Body>, StatusCode> {
    bytes_response(body, "application/json", None)
}

/// Build a 200 response that browsers save as `filename`
pub fn csv_attachment_response(body: Vec<u8>, filename: &str) -> Result<Response<Body>, StatusCode> {
    let disposition = format!("attachment; filename=\"{}\"", filename);
    bytes_response(body, "text/csv", Some(disposition))
}

fn bytes_response(
    body: Vec<u8>,
    content_type: &'static str,
    disposition: Option<String>,
) -> Result<Response<Body>, StatusCode> {
    let mut response_builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, HeaderValue::from(body.len()));

    if let Some(disposition) = disposition {
        let value = HeaderValue::from_str(&disposition).map_err(|e| {
            tracing::error!("Invalid content-disposition header: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
        response_builder = response_builder.header(header::CONTENT_DISPOSITION, value);
    }

    response_builder.body(Body::from(body)).map_err(|e| {
        tracing::error!("Response build error: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_attachment_headers() {
        let response = csv_attachment_response(b"ID\n".to_vec(), "weather_entries.csv").unwrap();
        let headers = response.headers();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "text/csv");
        assert_eq!(headers[header::CONTENT_LENGTH], "3");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"weather_entries.csv\""
        );
    }

    #[test]
    fn test_json_has_no_disposition() {
        let response = json_bytes_response(b"[]".to_vec()).unwrap();
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
        assert!(response.headers().get(header::CONTENT_DISPOSITION).is_none());
    }
}
