use anyhow::Context;
use storage::{Database, services::Notifier};
use utoipa::OpenApi;

mod config;
mod error;
mod features;
mod middleware;
mod routes;
mod state;

use config::Config;
use features::{hackathons, health, invites, matches, notifications, recommendations, swipes, teams};
use middleware::auth::JwtKeys;
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::handlers::health,
        hackathons::handlers::list_hackathons,
        hackathons::handlers::get_hackathon,
        hackathons::handlers::create_hackathon,
        hackathons::handlers::update_hackathon_status,
        hackathons::handlers::register,
        recommendations::handlers::get_recommendations,
        swipes::handlers::swipe,
        swipes::handlers::get_preferences,
        swipes::handlers::update_preferences,
        matches::handlers::list_matches,
        teams::handlers::list_teams,
        teams::handlers::create_team,
        teams::handlers::get_my_team,
        teams::handlers::join_team,
        teams::handlers::get_team,
        teams::handlers::update_team_status,
        teams::handlers::regenerate_invite_code,
        teams::handlers::leave_team,
        teams::handlers::kick_member,
        teams::handlers::get_team_balance,
        teams::handlers::get_candidate_compatibility,
        teams::handlers::create_join_request,
        teams::handlers::list_team_requests,
        teams::handlers::list_my_requests,
        teams::handlers::accept_join_request,
        teams::handlers::reject_join_request,
        teams::handlers::cancel_join_request,
        invites::handlers::create_invite,
        invites::handlers::list_incoming,
        invites::handlers::list_outgoing,
        invites::handlers::accept_invite,
        invites::handlers::decline_invite,
        invites::handlers::cancel_invite,
        notifications::handlers::list_notifications,
        notifications::handlers::mark_read,
    ),
    components(
        schemas(
            storage::dto::common::MessageResponse,
            storage::dto::common::PaginationMeta,
            storage::dto::hackathon::CreateHackathonRequest,
            storage::dto::hackathon::UpdateHackathonStatusRequest,
            storage::dto::hackathon::RegistrationResponse,
            storage::dto::swipe::SwipeRequest,
            storage::dto::swipe::SwipeResponse,
            storage::dto::swipe::SwipePreferenceRequest,
            storage::dto::swipe::MatchResponse,
            storage::dto::team::CreateTeamRequest,
            storage::dto::team::JoinByCodeRequest,
            storage::dto::team::KickMemberRequest,
            storage::dto::team::UpdateTeamStatusRequest,
            storage::dto::team::CreateJoinRequest,
            storage::dto::team::TeamResponse,
            storage::dto::team::InviteCodeResponse,
            storage::dto::team::JoinTeamResponse,
            storage::dto::team::JoinRequestResponse,
            storage::dto::invite::CreateInviteRequest,
            storage::dto::invite::InviteResponse,
            storage::dto::balance::TeamBalance,
            storage::dto::balance::MmrStats,
            storage::dto::balance::BalanceSuggestion,
            storage::dto::balance::SuggestionKind,
            storage::dto::balance::CandidateCompatibility,
            storage::dto::balance::Recommendation,
            storage::dto::user::UserSummary,
            storage::dto::user::CandidateResponse,
            storage::dto::user::EquippedCosmetics,
            storage::models::Hackathon,
            storage::models::HackathonStatus,
            storage::models::HackathonParticipant,
            storage::models::ParticipantStatus,
            storage::models::Team,
            storage::models::TeamStatus,
            storage::models::TeamInvite,
            storage::models::InviteStatus,
            storage::models::TeamJoinRequest,
            storage::models::JoinRequestStatus,
            storage::models::SwipeAction,
            storage::models::SwiperIdentity,
            storage::models::SwipePreference,
            storage::models::Notification,
            storage::models::NotificationKind,
            storage::models::CustomizationItem,
        )
    ),
    tags(
        (name = "health", description = "Liveness probe"),
        (name = "hackathons", description = "Hackathon listing, registration and admin lifecycle"),
        (name = "recommendations", description = "Candidate queue for swiping"),
        (name = "swipes", description = "Like/pass decisions and swipe filters"),
        (name = "matches", description = "Mutual likes"),
        (name = "teams", description = "Team membership, join requests and balance"),
        (name = "invites", description = "Captain-issued team invites"),
        (name = "notifications", description = "Per-user notification inbox"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

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

    tracing::info!("Starting team matchmaking API");

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
    let db = Database::with_max_connections(&config.database_url, config.database_max_connections)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let notifier = Notifier::spawn(db.pool().clone());
    tracing::info!("Notification worker started");

    let state = AppState {
        db,
        notifier,
        jwt: JwtKeys::from_secret(&config.jwt_secret),
    };

    let app = routes::router(
        state,
        ApiDoc::openapi(),
        config.cors_allowed_origin.as_deref(),
    );

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_documents_core_paths() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/recommendations",
            "/api/swipe",
            "/api/teams/join",
            "/api/teams/{id}/balance",
            "/api/teams/{id}/candidate-compatibility",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
        assert!(
            doc.components
                .as_ref()
                .is_some_and(|c| c.security_schemes.contains_key("bearer_auth"))
        );
    }
}
