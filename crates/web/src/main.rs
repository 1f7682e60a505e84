use std::sync::Arc;

use anyhow::Context;
use storage::Database;
use storage::repository::analytics::AnalyticsRepository;
use storage::services::analytics::AnalyticsEngine;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use web::config::Config;
use web::features::billing::BillingService;
use web::router::create_router;
use web::services::mollie::{MollieClient, PaymentGateway};
use web::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        web::features::users::handlers::get_current_user,
        web::features::workouts::handlers::list_programs,
        web::features::workouts::handlers::list_exercises,
        web::features::workouts::handlers::list_sessions,
        web::features::workouts::handlers::create_session,
        web::features::workouts::handlers::update_session,
        web::features::workouts::handlers::list_session_sets,
        web::features::workouts::handlers::create_set,
        web::features::workouts::handlers::update_set,
        web::features::nutrition::handlers::list_recipes,
        web::features::nutrition::handlers::list_meal_entries,
        web::features::nutrition::handlers::create_meal_entry,
        web::features::progress::handlers::list_photos,
        web::features::progress::handlers::create_photo,
        web::features::progress::handlers::list_records,
        web::features::progress::handlers::create_record,
        web::features::analytics::handlers::weekly_volume,
        web::features::analytics::handlers::workout_streak,
        web::features::billing::handlers::create_payment,
        web::features::billing::handlers::payment_success,
        web::features::billing::handlers::payment_webhook,
    ),
    components(
        schemas(
            storage::dto::user::UserResponse,
            storage::dto::workout::CreateWorkoutSessionRequest,
            storage::dto::workout::UpdateWorkoutSessionRequest,
            storage::dto::workout::CreateWorkoutSetRequest,
            storage::dto::workout::UpdateWorkoutSetRequest,
            storage::dto::nutrition::CreateMealEntryRequest,
            storage::dto::progress::CreateProgressPhotoRequest,
            storage::dto::progress::CreatePersonalRecordRequest,
            storage::dto::billing::CreatePaymentRequest,
            storage::dto::billing::CheckoutResponse,
            storage::dto::analytics::VolumeResponse,
            storage::dto::analytics::StreakResponse,
            storage::models::User,
            storage::models::WorkoutProgram,
            storage::models::Exercise,
            storage::models::WorkoutSession,
            storage::models::WorkoutSet,
            storage::models::Recipe,
            storage::models::MealEntry,
            storage::models::ProgressPhoto,
            storage::models::PersonalRecord,
        )
    ),
    tags(
        (name = "users", description = "Authenticated user profile"),
        (name = "workouts", description = "Workout programs, sessions and sets"),
        (name = "nutrition", description = "Recipes and meal tracking"),
        (name = "progress", description = "Progress photos and personal records"),
        (name = "analytics", description = "Derived training metrics"),
        (name = "billing", description = "Subscription checkout and payment webhooks"),
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting LiftLog API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let analytics = AnalyticsEngine::new(Arc::new(AnalyticsRepository::new(db.pool().clone())));

    let gateway = config
        .mollie_api_key
        .clone()
        .map(|key| Arc::new(MollieClient::new(key)) as Arc<dyn PaymentGateway>);
    if gateway.is_none() {
        tracing::warn!("MOLLIE_API_KEY is not set; checkout initiation will fail until configured");
    }
    let billing = BillingService::new(
        Arc::new(db.clone()),
        gateway,
        config.public_base_url.clone(),
    );

    let bind_address = format!("{}:{}", config.host, config.port);
    let state = AppState {
        config: Arc::new(config),
        db,
        analytics,
        billing,
    };

    let app = create_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", bind_address);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .context("Failed to bind server address")?;
    axum::serve(listener, app).await?;

    Ok(())
}
