use crate::dtos::{ApiResponse, CreateQuoteRequest, DeleteResponse, QuoteResponse, TestAiResponse};
use crate::models::{QuoteCategory, QuoteDraft};
use crate::startup::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use service_core::error::AppError;
use validator::Validate;

pub async fn get_today_quote(State(state): State<AppState>) -> Json<ApiResponse<QuoteResponse>> {
    let quote = state.quotes.get_today_quote().await;
    Json(ApiResponse::ok(quote.into()))
}

pub async fn delete_today_quote(
    State(state): State<AppState>,
) -> Result<Json<DeleteResponse>, AppError> {
    let deleted = state
        .quotes
        .delete_today_quote()
        .await
        .map_err(|e| AppError::failed("Error deleting today's quote", e))?;

    Ok(Json(DeleteResponse {
        success: true,
        message: "Today's quote deleted successfully".to_string(),
        deleted,
    }))
}

pub async fn test_ai_quote(State(state): State<AppState>) -> Json<TestAiResponse> {
    let response = match state.quotes.generate_ai_quote().await {
        Some(quote) => TestAiResponse {
            success: true,
            message: "AI quote generated successfully".to_string(),
            data: quote,
            is_ai: true,
        },
        None => TestAiResponse {
            success: false,
            message: "Failed to generate AI quote - falling back to predefined quote".to_string(),
            data: state.quotes.random_predefined_quote(),
            is_ai: false,
        },
    };

    Json(response)
}

pub async fn random_quote(State(state): State<AppState>) -> Json<ApiResponse<QuoteDraft>> {
    Json(ApiResponse::ok(state.quotes.random_predefined_quote()))
}

pub async fn all_quotes(State(state): State<AppState>) -> Json<ApiResponse<Vec<QuoteResponse>>> {
    let quotes = state.quotes.get_all_quotes().await;
    Json(ApiResponse::ok(
        quotes.into_iter().map(QuoteResponse::from).collect(),
    ))
}

pub async fn create_quote(
    State(state): State<AppState>,
    payload: Result<Json<CreateQuoteRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<QuoteResponse>>), AppError> {
    let Json(request) = payload
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {}", e.body_text())))?;

    // Presence is checked before anything touches the store.
    let text = request
        .text
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .ok_or_else(|| AppError::BadRequest("Quote text is required".to_string()))?;

    request.validate()?;

    let category = request
        .category
        .as_deref()
        .filter(|c| !c.is_empty())
        .map(str::parse::<QuoteCategory>)
        .transpose()
        .map_err(AppError::BadRequest)?;

    let author = request
        .author
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty());

    let quote = state
        .quotes
        .add_quote(text, author, category)
        .await
        .map_err(|e| AppError::failed("Error adding quote", e))?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(quote.into()))))
}
