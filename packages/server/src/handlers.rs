//! HTTP handler functions for the surveillance dashboard API.

use std::collections::BTreeSet;
use std::sync::Arc;

use actix_web::{HttpResponse, web};
use screwworm_map_ai::assistant;
use screwworm_map_ai::providers::create_provider_from_env;
use screwworm_map_pipeline::{aggregate, analysis, filter};
use screwworm_map_server_models::{
    ApiHealth, AskRequest, AskResponse, ClearRequest, ClearResponse, DashboardData,
    FilterQueryParams, RankingQueryParams, RecommendationQueryParams, TranscriptQueryParams,
};
use screwworm_map_surveillance_models::{ALL_MUNICIPALITIES, Observation};

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Loads the current observation snapshot, mapping a fetch failure to a
/// logged 502 response.
async fn snapshot(state: &AppState) -> Result<Arc<Vec<Observation>>, HttpResponse> {
    state.source.rows().await.map_err(|e| {
        log::error!("Failed to load observation data: {e}");
        HttpResponse::BadGateway().json(serde_json::json!({
            "error": "Failed to load observation data"
        }))
    })
}

/// `GET /api/municipalities`
///
/// Distinct municipality names for the filter widget, sorted, with the
/// "all" sentinel prepended.
pub async fn municipalities(state: web::Data<AppState>) -> HttpResponse {
    let rows = match snapshot(&state).await {
        Ok(rows) => rows,
        Err(resp) => return resp,
    };

    let distinct: BTreeSet<&str> = rows.iter().map(|o| o.municipality.as_str()).collect();
    let mut names = vec![ALL_MUNICIPALITIES.to_string()];
    names.extend(distinct.into_iter().map(ToString::to_string));

    HttpResponse::Ok().json(names)
}

/// `GET /api/metrics`
pub async fn metrics(
    state: web::Data<AppState>,
    params: web::Query<FilterQueryParams>,
) -> HttpResponse {
    let rows = match snapshot(&state).await {
        Ok(rows) => rows,
        Err(resp) => return resp,
    };
    let filtered = filter::filter_observations(&rows, &params.to_filter());
    HttpResponse::Ok().json(aggregate::metrics_summary(&filtered))
}

/// `GET /api/map`
pub async fn map_data(
    state: web::Data<AppState>,
    params: web::Query<FilterQueryParams>,
) -> HttpResponse {
    let rows = match snapshot(&state).await {
        Ok(rows) => rows,
        Err(resp) => return resp,
    };
    let filtered = filter::filter_observations(&rows, &params.to_filter());
    HttpResponse::Ok().json(aggregate::map_dataset(&filtered))
}

/// `GET /api/rankings`
pub async fn rankings(
    state: web::Data<AppState>,
    params: web::Query<FilterQueryParams>,
    ranking: web::Query<RankingQueryParams>,
) -> HttpResponse {
    let rows = match snapshot(&state).await {
        Ok(rows) => rows,
        Err(resp) => return resp,
    };
    let filtered = filter::filter_observations(&rows, &params.to_filter());
    let n = ranking.n.unwrap_or(aggregate::DEFAULT_TOP_N);
    HttpResponse::Ok().json(aggregate::top_municipalities(&filtered, n))
}

/// `GET /api/weekly`
pub async fn weekly(
    state: web::Data<AppState>,
    params: web::Query<FilterQueryParams>,
) -> HttpResponse {
    let rows = match snapshot(&state).await {
        Ok(rows) => rows,
        Err(resp) => return resp,
    };
    let filtered = filter::filter_observations(&rows, &params.to_filter());
    HttpResponse::Ok().json(aggregate::weekly_series(&filtered))
}

/// `GET /api/timeline`
pub async fn timeline(
    state: web::Data<AppState>,
    params: web::Query<FilterQueryParams>,
) -> HttpResponse {
    let rows = match snapshot(&state).await {
        Ok(rows) => rows,
        Err(resp) => return resp,
    };
    let filtered = filter::filter_observations(&rows, &params.to_filter());
    HttpResponse::Ok().json(aggregate::first_report_timeline(&filtered))
}

/// `GET /api/coverage`
pub async fn coverage(
    state: web::Data<AppState>,
    params: web::Query<FilterQueryParams>,
) -> HttpResponse {
    let rows = match snapshot(&state).await {
        Ok(rows) => rows,
        Err(resp) => return resp,
    };
    let filtered = filter::filter_observations(&rows, &params.to_filter());
    let timeline = aggregate::first_report_timeline(&filtered);
    HttpResponse::Ok().json(aggregate::coverage(&timeline, state.total_municipalities))
}

/// `GET /api/dashboard`
///
/// Every aggregate product in one response, so the frontend needs a
/// single round trip per render cycle.
pub async fn dashboard(
    state: web::Data<AppState>,
    params: web::Query<FilterQueryParams>,
) -> HttpResponse {
    let rows = match snapshot(&state).await {
        Ok(rows) => rows,
        Err(resp) => return resp,
    };
    let filtered = filter::filter_observations(&rows, &params.to_filter());

    let weekly_series = aggregate::weekly_series(&filtered);
    let timeline = aggregate::first_report_timeline(&filtered);
    let trend = analysis::weekly_trend(&weekly_series);

    HttpResponse::Ok().json(DashboardData {
        metrics: aggregate::metrics_summary(&filtered),
        map_points: aggregate::map_dataset(&filtered),
        rankings: aggregate::top_municipalities(&filtered, aggregate::DEFAULT_TOP_N),
        coverage: aggregate::coverage(&timeline, state.total_municipalities),
        weekly_series,
        timeline,
        trend,
    })
}

/// `GET /api/recommendations`
pub async fn recommendations(
    state: web::Data<AppState>,
    params: web::Query<FilterQueryParams>,
    recommendation: web::Query<RecommendationQueryParams>,
) -> HttpResponse {
    let rows = match snapshot(&state).await {
        Ok(rows) => rows,
        Err(resp) => return resp,
    };
    let filtered = filter::filter_observations(&rows, &params.to_filter());
    let report = screwworm_map_advisor::generate(recommendation.kind, &filtered);

    HttpResponse::Ok().json(serde_json::json!({
        "kind": recommendation.kind,
        "report": report,
    }))
}

/// `POST /api/assistant/ask`
///
/// Runs one assistant turn against the current (unfiltered) snapshot.
/// The session history is persisted even when the provider call fails,
/// so the user's question survives a retry.
pub async fn assistant_ask(
    state: web::Data<AppState>,
    body: web::Json<AskRequest>,
) -> HttpResponse {
    let rows = match snapshot(&state).await {
        Ok(rows) => rows,
        Err(resp) => return resp,
    };

    let provider = match create_provider_from_env() {
        Ok(provider) => provider,
        Err(e) => {
            log::error!("Assistant is not configured: {e}");
            return HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "error": "Assistant is not configured"
            }));
        }
    };

    let session_id = body
        .session_id
        .unwrap_or_else(|| state.sessions.create());
    let history = state.sessions.history(session_id).unwrap_or_default();

    let outcome = assistant::ask(provider.as_ref(), &history, &rows, &body.question).await;
    state.sessions.replace(session_id, outcome.messages);

    match outcome.result {
        Ok(answer) => HttpResponse::Ok().json(AskResponse { session_id, answer }),
        Err(e) => {
            log::error!("Assistant turn failed: {e}");
            HttpResponse::BadGateway().json(serde_json::json!({
                "error": "Assistant request failed"
            }))
        }
    }
}

/// `POST /api/assistant/clear`
pub async fn assistant_clear(
    state: web::Data<AppState>,
    body: web::Json<ClearRequest>,
) -> HttpResponse {
    let cleared = state.sessions.clear(body.session_id);
    HttpResponse::Ok().json(ClearResponse { cleared })
}

/// `GET /api/assistant/transcript`
///
/// Markdown export of a session's conversation.
pub async fn assistant_transcript(
    state: web::Data<AppState>,
    params: web::Query<TranscriptQueryParams>,
) -> HttpResponse {
    match state.sessions.history(params.session_id) {
        Some(messages) => HttpResponse::Ok()
            .content_type("text/markdown; charset=utf-8")
            .body(screwworm_map_conversations::format_transcript(&messages)),
        None => HttpResponse::NotFound().json(serde_json::json!({
            "error": "Unknown session"
        })),
    }
}
