//! Single binary web server: REST API over loaded tournament snapshots.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//! SNAPSHOT=<path> preloads a JSON snapshot at startup; INACTIVITY_HOURS sets idle cleanup.

use actix_web::{
    delete, get, post,
    web::{self, Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use football_tournament_web::{
    add_score_period, clear_scoreboard,
    config::ServerConfig,
    io::{import_results_csv, parse_snapshot},
    recompute, select, Criterion, Phases, RecomputeReport, Score, Tournament, TournamentId,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Per-tournament entry: tournament data + last activity time (for auto-cleanup).
struct TournamentEntry {
    tournament: Tournament,
    last_activity: Instant,
}

/// In-memory state: many tournaments by ID. Entries are removed after the configured inactivity.
/// Every mutation and its recompute run under the write lock, so recomputes never overlap.
type AppState = Data<RwLock<HashMap<TournamentId, TournamentEntry>>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and match id (e.g. /api/tournaments/{id}/matches/{match_id})
#[derive(Deserialize)]
struct TournamentMatchPath {
    id: TournamentId,
    match_id: String,
}

/// Match filter: at most one key may be given.
#[derive(Deserialize)]
struct MatchQuery {
    venue: Option<String>,
    team: Option<String>,
    group: Option<String>,
    date: Option<chrono::NaiveDate>,
    category: Option<String>,
    played: Option<bool>,
}

impl MatchQuery {
    fn criterion(&self) -> Result<Option<Criterion<'_>>, &'static str> {
        let mut criteria = Vec::new();
        if let Some(v) = &self.venue {
            criteria.push(Criterion::Venue(v));
        }
        if let Some(t) = &self.team {
            criteria.push(Criterion::Team(t));
        }
        if let Some(g) = &self.group {
            criteria.push(Criterion::Group(g));
        }
        if let Some(d) = self.date {
            criteria.push(Criterion::Date(d));
        }
        if let Some(c) = &self.category {
            criteria.push(Criterion::Category(c));
        }
        if let Some(p) = self.played {
            criteria.push(Criterion::Played(p));
        }
        match criteria.len() {
            0 => Ok(None),
            1 => Ok(criteria.pop()),
            _ => Err("Give at most one of venue, team, group, date, category, played"),
        }
    }
}

fn report_json(report: &RecomputeReport) -> serde_json::Value {
    serde_json::json!({
        "resolved": report.resolved,
        "unresolved": report.unresolved,
        "errors": report.errors.iter().map(|e| serde_json::json!({
            "match_id": e.match_id,
            "side": e.side,
            "error": e.error.to_string(),
        })).collect::<Vec<_>>(),
    })
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
}

/// Look up a tournament, refresh its activity stamp, and run `f` on it under the write lock.
fn with_tournament(
    state: &AppState,
    id: TournamentId,
    f: impl FnOnce(&mut Tournament) -> HttpResponse,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            f(&mut entry.tournament)
        }
        None => not_found(),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "football-tournament-web",
    })
}

/// Load a tournament from a JSON snapshot body. Returns its id and the first recompute report.
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: String) -> HttpResponse {
    let mut tournament = match parse_snapshot(&body) {
        Ok(t) => t,
        Err(e) => return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    };
    let report = recompute(&mut tournament, Phases::ALL);
    let id = Uuid::new_v4();
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    g.insert(
        id,
        TournamentEntry {
            tournament,
            last_activity: Instant::now(),
        },
    );
    log::info!("Loaded tournament {}", id);
    HttpResponse::Ok().json(serde_json::json!({ "id": id, "report": report_json(&report) }))
}

/// Full snapshot (same shape as the file it was loaded from, with tables and slots filled).
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| HttpResponse::Ok().json(&*t))
}

/// Group tables in rank order plus the third-place pool.
#[get("/api/tournaments/{id}/tables")]
async fn api_tables(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        HttpResponse::Ok().json(serde_json::json!({
            "groups": t.groups,
            "third_placed": t.third_placed.table,
        }))
    })
}

/// Matches, optionally filtered by one criterion (?venue=, ?team=, ?group=, ?date=, ?category=, ?played=).
#[get("/api/tournaments/{id}/matches")]
async fn api_matches(state: AppState, path: Path<TournamentPath>, query: Query<MatchQuery>) -> HttpResponse {
    let criterion = match query.criterion() {
        Ok(c) => c,
        Err(e) => return HttpResponse::BadRequest().json(serde_json::json!({ "error": e })),
    };
    with_tournament(&state, path.id, |t| match criterion {
        Some(c) => HttpResponse::Ok().json(select(&t.matches, c)),
        None => HttpResponse::Ok().json(&t.matches),
    })
}

/// Fixtures of the favourite team from the snapshot settings.
#[get("/api/tournaments/{id}/favorite")]
async fn api_favorite(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| match &t.settings.favorite_team {
        Some(team) => HttpResponse::Ok().json(select(&t.matches, Criterion::Team(team))),
        None => HttpResponse::Ok().json(Vec::<()>::new()),
    })
}

/// Record one scoreboard period for a match, then recompute everything.
#[post("/api/tournaments/{id}/matches/{match_id}/periods")]
async fn api_add_period(state: AppState, path: Path<TournamentMatchPath>, body: Json<Score>) -> HttpResponse {
    let score = body.into_inner();
    with_tournament(&state, path.id, |t| match add_score_period(t, &path.match_id, score) {
        Ok(()) => {
            let report = recompute(t, Phases::ALL);
            HttpResponse::Ok().json(serde_json::json!({
                "match": t.get_match(&path.match_id),
                "report": report_json(&report),
            }))
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    })
}

/// Clear a match's scoreboard (correction), then recompute everything.
#[delete("/api/tournaments/{id}/matches/{match_id}/periods")]
async fn api_clear_periods(state: AppState, path: Path<TournamentMatchPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| match clear_scoreboard(t, &path.match_id) {
        Ok(_) => {
            let report = recompute(t, Phases::ALL);
            HttpResponse::Ok().json(report_json(&report))
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    })
}

/// Import results CSV (match_id,home,away per period), then recompute everything.
#[post("/api/tournaments/{id}/results")]
async fn api_import_results(state: AppState, path: Path<TournamentPath>, body: String) -> HttpResponse {
    with_tournament(&state, path.id, |t| match import_results_csv(t, body.as_bytes()) {
        Ok(updated) => {
            let report = recompute(t, Phases::ALL);
            HttpResponse::Ok().json(serde_json::json!({
                "updated": updated,
                "report": report_json(&report),
            }))
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    })
}

/// Run selected phases explicitly. An empty body runs all of them.
#[post("/api/tournaments/{id}/recompute")]
async fn api_recompute(state: AppState, path: Path<TournamentPath>, body: Option<Json<Phases>>) -> HttpResponse {
    let phases = body.map(|b| b.into_inner()).unwrap_or(Phases::ALL);
    with_tournament(&state, path.id, |t| {
        let report = recompute(t, phases);
        HttpResponse::Ok().json(report_json(&report))
    })
}

/// Read the SNAPSHOT file, if configured, into a first tournament entry.
async fn preload(config: &ServerConfig, state: &AppState) {
    let Some(path) = &config.snapshot else {
        return;
    };
    let json = match tokio::fs::read_to_string(path).await {
        Ok(json) => json,
        Err(e) => {
            log::error!("Cannot read snapshot {}: {}", path.display(), e);
            return;
        }
    };
    let mut tournament = match parse_snapshot(&json) {
        Ok(t) => t,
        Err(e) => {
            log::error!("Cannot load snapshot {}: {}", path.display(), e);
            return;
        }
    };
    recompute(&mut tournament, Phases::ALL);
    let id = Uuid::new_v4();
    if let Ok(mut g) = state.write() {
        g.insert(
            id,
            TournamentEntry {
                tournament,
                last_activity: Instant::now(),
            },
        );
        log::info!("Preloaded {} as tournament {}", path.display(), id);
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<TournamentId, TournamentEntry>::new()));
    preload(&config, &state).await;

    // Background task: every 30 minutes, remove tournaments past the inactivity timeout
    let state_cleanup = state.clone();
    let timeout = config.inactivity_timeout;
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < timeout);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive tournament(s)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(web::PayloadConfig::new(4 * 1024 * 1024))
            .service(api_health)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_tables)
            .service(api_matches)
            .service(api_favorite)
            .service(api_add_period)
            .service(api_clear_periods)
            .service(api_import_results)
            .service(api_recompute)
    })
    .bind(bind)?
    .run()
    .await
}
