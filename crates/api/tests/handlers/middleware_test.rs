use salonbook_api::middleware::error_handling::map_error;
use salonbook_core::errors::BookingError;

#[tokio::test]
async fn test_error_handling_not_found() {
    // Create a not found error
    let error = BookingError::NotFound("Resource not found".to_string());

    // Map the error to a response
    let response = map_error(error);

    // Assert the response has the correct status code
    assert_eq!(response.status(), axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_error_handling_validation() {
    // Create a validation error
    let error = BookingError::Validation("Invalid input".to_string());

    // Map the error to a response
    let response = map_error(error);

    // Assert the response has the correct status code
    assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_error_handling_invalid_argument() {
    // Create an invalid argument error
    let error = BookingError::InvalidArgument("Bad interval".to_string());

    // Map the error to a response
    let response = map_error(error);

    // Assert the response has the correct status code
    assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_error_handling_conflict() {
    // Create a conflict error, as raised when the overlap constraint
    // rejects a booking insert
    let error = BookingError::Conflict("Slot already taken".to_string());

    // Map the error to a response
    let response = map_error(error);

    // Assert the response has the correct status code
    assert_eq!(response.status(), axum::http::StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_error_handling_database() {
    // Create a database error
    let error = BookingError::Database(eyre::eyre!("Database error"));

    // Map the error to a response
    let response = map_error(error);

    // Assert the response has the correct status code
    assert_eq!(
        response.status(),
        axum::http::StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[tokio::test]
async fn test_error_handling_internal() {
    // Create an internal error
    let error = BookingError::Internal(Box::new(std::io::Error::new(
        std::io::ErrorKind::Other,
        "Internal error",
    )));

    // Map the error to a response
    let response = map_error(error);

    // Assert the response has the correct status code
    assert_eq!(
        response.status(),
        axum::http::StatusCode::INTERNAL_SERVER_ERROR
    );
}
