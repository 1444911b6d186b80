//! Pollwise server entry point: config, tracing, database pool, router.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderValue, Method};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pollwise::adapters::http::{api_routes, ApiState};
use pollwise::adapters::postgres::{
    PostgresResponseRepository, PostgresStatisticsReader, PostgresSurveyRepository,
};
use pollwise::application::{
    CreateSurveyHandler, GetSurveyHandler, ListSurveysHandler, NextQuestionHandler,
    SubmitAnswerHandler, SurveyStatisticsHandler,
};
use pollwise::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        tracing::info!("running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    let survey_repo = Arc::new(PostgresSurveyRepository::new(pool.clone()));
    let response_repo = Arc::new(PostgresResponseRepository::new(pool.clone()));
    let statistics_reader = Arc::new(PostgresStatisticsReader::new(pool));

    let state = ApiState {
        create_survey: Arc::new(CreateSurveyHandler::new(survey_repo.clone())),
        list_surveys: Arc::new(ListSurveysHandler::new(survey_repo.clone())),
        get_survey: Arc::new(GetSurveyHandler::new(survey_repo.clone())),
        next_question: Arc::new(NextQuestionHandler::new(
            survey_repo.clone(),
            response_repo.clone(),
        )),
        submit_answer: Arc::new(SubmitAnswerHandler::new(survey_repo.clone(), response_repo)),
        survey_statistics: Arc::new(SurveyStatisticsHandler::new(survey_repo, statistics_reader)),
    };

    let app = api_routes(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors_layer(&config));

    let addr = config.server.socket_addr()?;
    tracing::info!(%addr, "pollwise listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone()));

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(tower_http::cors::Any)
    }
}
