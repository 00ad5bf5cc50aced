//! Single binary web server exposing the tournament commands as a JSON API.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use tournament_manager::{
    champion, clear_score, export_json, import_json, record_score, regenerate_schedule,
    standings_csv, start_tournament, tournament_standings, Champion, ConfigUpdate, Progress,
    TeamId, TeamStats, Tournament, TournamentConfig, TournamentError, TournamentId,
};

/// Per-tournament entry: tournament data + last activity time (for auto-cleanup).
struct TournamentEntry {
    tournament: Tournament,
    last_activity: Instant,
}

/// In-memory sessions by id. Entries are removed after 12h inactivity.
type AppState = Data<RwLock<HashMap<TournamentId, TournamentEntry>>>;

/// Inactivity threshold: tournaments not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// Everything the UI renders after a command.
#[derive(Serialize)]
struct TournamentView<'a> {
    tournament: &'a Tournament,
    standings: Vec<TeamStats>,
    champion: Option<Champion>,
    progress: Progress,
}

impl<'a> TournamentView<'a> {
    fn of(tournament: &'a Tournament) -> Self {
        Self {
            tournament,
            standings: tournament_standings(tournament),
            champion: champion(tournament),
            progress: tournament.progress(),
        }
    }
}

#[derive(Deserialize)]
struct AddTeamBody {
    name: String,
}

#[derive(Deserialize)]
struct ScoreBody {
    score_a: Option<i32>,
    score_b: Option<i32>,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and team id.
#[derive(Deserialize)]
struct TournamentTeamPath {
    id: TournamentId,
    team_id: TeamId,
}

/// Path segments: tournament id and match id.
#[derive(Deserialize)]
struct TournamentMatchPath {
    id: TournamentId,
    match_id: String,
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
}

fn bad_request(e: TournamentError) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

/// Run `f` on the tournament under the write lock and answer with the refreshed view.
fn apply<F>(state: &AppState, id: TournamentId, f: F) -> HttpResponse
where
    F: FnOnce(&mut Tournament) -> Result<(), TournamentError>,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&id) {
        Some(e) => e,
        None => return not_found(),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    match f(t) {
        Ok(()) => HttpResponse::Ok().json(TournamentView::of(t)),
        Err(e) => bad_request(e),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "tournament-manager",
    })
}

/// Create a new tournament (returns it with id; client stores id for subsequent requests).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Option<Json<ConfigUpdate>>) -> HttpResponse {
    let config = body
        .map(|b| b.into_inner().merged_into(&TournamentConfig::default()))
        .unwrap_or_default();
    if let Err(e) = config.validate() {
        return bad_request(e);
    }
    let tournament = Tournament::new(config);
    let id = tournament.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = g.entry(id).or_insert(TournamentEntry {
        tournament,
        last_activity: Instant::now(),
    });
    log::info!("Created tournament {}", id);
    HttpResponse::Ok().json(TournamentView::of(&entry.tournament))
}

/// Get a tournament view by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    apply(&state, path.id, |_| Ok(()))
}

/// Register a team (Setup only).
#[post("/api/tournaments/{id}/teams")]
async fn api_add_team(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<AddTeamBody>,
) -> HttpResponse {
    apply(&state, path.id, |t| t.add_team(body.name.as_str()).map(|_| ()))
}

/// Remove a team by id (Setup only).
#[delete("/api/tournaments/{id}/teams/{team_id}")]
async fn api_remove_team(state: AppState, path: Path<TournamentTeamPath>) -> HttpResponse {
    apply(&state, path.id, |t| t.remove_team(path.team_id))
}

/// Change any subset of the rules (Setup only).
#[put("/api/tournaments/{id}/config")]
async fn api_set_config(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<ConfigUpdate>,
) -> HttpResponse {
    apply(&state, path.id, |t| t.set_configuration(body.into_inner()))
}

/// Start the tournament (Setup -> Active).
#[post("/api/tournaments/{id}/start")]
async fn api_start_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    apply(&state, path.id, |t| start_tournament(t, &mut rand::thread_rng()))
}

/// Throw away the schedule and generate a new one.
#[post("/api/tournaments/{id}/schedule/regenerate")]
async fn api_regenerate_schedule(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    apply(&state, path.id, |t| regenerate_schedule(t, &mut rand::thread_rng()))
}

/// Enter (or partially clear) the score of one match. Unknown match ids are ignored.
#[put("/api/tournaments/{id}/matches/{match_id}/score")]
async fn api_record_score(
    state: AppState,
    path: Path<TournamentMatchPath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    apply(&state, path.id, |t| {
        record_score(t, &path.match_id, body.score_a, body.score_b, &mut rand::thread_rng());
        Ok(())
    })
}

/// Clear the result of one match.
#[delete("/api/tournaments/{id}/matches/{match_id}/score")]
async fn api_clear_score(state: AppState, path: Path<TournamentMatchPath>) -> HttpResponse {
    apply(&state, path.id, |t| {
        clear_score(t, &path.match_id);
        Ok(())
    })
}

/// Back to setup (Active -> Setup), keeping the schedule.
#[post("/api/tournaments/{id}/setup")]
async fn api_go_back_to_setup(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    apply(&state, path.id, |t| t.go_back_to_setup())
}

/// Reset to an empty setup.
#[post("/api/tournaments/{id}/reset")]
async fn api_reset(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    apply(&state, path.id, |t| {
        t.reset();
        Ok(())
    })
}

/// Download the full state as a JSON file.
#[get("/api/tournaments/{id}/export")]
async fn api_export(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get(&path.id) {
        Some(e) => e,
        None => return not_found(),
    };
    match export_json(&entry.tournament) {
        Ok(json) => HttpResponse::Ok()
            .content_type("application/json")
            .insert_header(("Content-Disposition", "attachment; filename=\"tournament_data.json\""))
            .body(json),
        Err(e) => {
            HttpResponse::InternalServerError().json(serde_json::json!({ "error": e.to_string() }))
        }
    }
}

/// Replace the state with an uploaded export. The session keeps its id.
#[post("/api/tournaments/{id}/import")]
async fn api_import(state: AppState, path: Path<TournamentPath>, body: String) -> HttpResponse {
    apply(&state, path.id, |t| {
        let mut imported = import_json(&body)?;
        imported.id = t.id;
        *t = imported;
        Ok(())
    })
}

/// Standings as CSV.
#[get("/api/tournaments/{id}/standings.csv")]
async fn api_standings_csv(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get(&path.id) {
        Some(e) => e,
        None => return not_found(),
    };
    match standings_csv(&entry.tournament) {
        Ok(csv) => HttpResponse::Ok().content_type("text/csv; charset=utf-8").body(csv),
        Err(e) => {
            HttpResponse::InternalServerError().json(serde_json::json!({ "error": e.to_string() }))
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<TournamentId, TournamentEntry>::new()));

    // Background task: every 30 minutes, remove tournaments inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive tournament(s) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_add_team)
            .service(api_remove_team)
            .service(api_set_config)
            .service(api_start_tournament)
            .service(api_regenerate_schedule)
            .service(api_record_score)
            .service(api_clear_score)
            .service(api_go_back_to_setup)
            .service(api_reset)
            .service(api_export)
            .service(api_import)
            .service(api_standings_csv)
    })
    .bind(bind)?
    .run()
    .await
}
