use super::casino::Casino;
use super::handlers;
use crate::dto::*;
use crate::errors::EngineError;
use crate::ids::TableId;
use crate::scheduler::{Delivery, TokenKind};
use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use std::sync::Arc;
use uuid::Uuid;

pub struct Server;

impl Server {
    pub async fn run(casino: Arc<Casino>) -> Result<(), std::io::Error> {
        let bind_addr = casino.config.bind_addr.clone();
        let state = web::Data::from(casino);
        log::info!("starting hosting server on {}", bind_addr);
        HttpServer::new(move || {
            App::new()
                .wrap(Logger::new("%r %s %Ts"))
                .wrap(
                    Cors::default()
                        .allow_any_origin()
                        .allow_any_method()
                        .allow_any_header(),
                )
                .app_data(state.clone())
                .route("/tables", web::post().to(create_table))
                .route("/tables/{table_id}", web::get().to(get_snapshot))
                .route("/tables/{table_id}/seats", web::post().to(join_seat))
                .route("/tables/{table_id}/seats/leave", web::post().to(leave_seat))
                .route("/tables/{table_id}/hand/start", web::post().to(start_hand))
                .route("/tables/{table_id}/actions", web::post().to(player_action))
                .route("/tables/{table_id}/show-cards", web::post().to(show_cards))
                .route("/tables/{table_id}/pause", web::post().to(pause))
                .route("/tables/{table_id}/resume", web::post().to(resume))
                .route("/tables/{table_id}/end-after-hand", web::post().to(set_end_after_hand))
                .route("/tables/{table_id}", web::delete().to(delete_table))
                .route("/tasks/turn-timeout", web::post().to(handle_turn_timeout))
                .route("/tasks/showdown-resolve", web::post().to(handle_showdown_resolve))
                .route("/tasks/win-by-fold-timeout", web::post().to(handle_win_by_fold_timeout))
                .route("/tasks/start-next-hand", web::post().to(handle_start_next_hand))
                .route("/tasks/room-auto-close", web::post().to(handle_room_auto_close))
        })
        .workers(4)
        .bind(bind_addr)?
        .run()
        .await
    }
}

async fn create_table(casino: web::Data<Casino>, body: web::Json<CreateTableRequest>) -> impl Responder {
    match handlers::create_table(&casino, body.into_inner()).await {
        Ok(resp) => HttpResponse::Ok().json(resp),
        Err(e) => error_response(e),
    }
}

async fn get_snapshot(casino: web::Data<Casino>, path: web::Path<Uuid>) -> impl Responder {
    let table_id = TableId::from(path.into_inner());
    match handlers::get_snapshot(&casino, table_id).await {
        Ok(resp) => HttpResponse::Ok().json(resp),
        Err(e) => error_response(e),
    }
}

async fn join_seat(
    casino: web::Data<Casino>,
    path: web::Path<Uuid>,
    body: web::Json<JoinSeatRequest>,
) -> impl Responder {
    let table_id = TableId::from(path.into_inner());
    match handlers::join_seat(&casino, table_id, body.into_inner()).await {
        Ok(resp) => HttpResponse::Ok().json(resp),
        Err(e) => error_response(e),
    }
}

async fn leave_seat(
    casino: web::Data<Casino>,
    path: web::Path<Uuid>,
    body: web::Json<LeaveSeatRequest>,
) -> impl Responder {
    let table_id = TableId::from(path.into_inner());
    ok_or_error(handlers::leave_seat(&casino, table_id, body.into_inner()).await)
}

async fn start_hand(casino: web::Data<Casino>, path: web::Path<Uuid>) -> impl Responder {
    let table_id = TableId::from(path.into_inner());
    ok_or_error(handlers::start_hand(&casino, table_id).await)
}

async fn player_action(
    casino: web::Data<Casino>,
    path: web::Path<Uuid>,
    body: web::Json<PlayerActionRequest>,
) -> impl Responder {
    let table_id = TableId::from(path.into_inner());
    ok_or_error(handlers::player_action(&casino, table_id, body.into_inner()).await)
}

async fn show_cards(
    casino: web::Data<Casino>,
    path: web::Path<Uuid>,
    body: web::Json<ShowCardsRequest>,
) -> impl Responder {
    let table_id = TableId::from(path.into_inner());
    ok_or_error(handlers::show_cards(&casino, table_id, body.into_inner()).await)
}

async fn pause(
    casino: web::Data<Casino>,
    path: web::Path<Uuid>,
    body: web::Json<HostRequest>,
) -> impl Responder {
    let table_id = TableId::from(path.into_inner());
    ok_or_error(handlers::toggle_pause(&casino, table_id, body.into_inner(), true).await)
}

async fn resume(
    casino: web::Data<Casino>,
    path: web::Path<Uuid>,
    body: web::Json<HostRequest>,
) -> impl Responder {
    let table_id = TableId::from(path.into_inner());
    ok_or_error(handlers::toggle_pause(&casino, table_id, body.into_inner(), false).await)
}

async fn set_end_after_hand(
    casino: web::Data<Casino>,
    path: web::Path<Uuid>,
    body: web::Json<HostRequest>,
) -> impl Responder {
    let table_id = TableId::from(path.into_inner());
    ok_or_error(handlers::set_end_after_hand(&casino, table_id, body.into_inner()).await)
}

async fn delete_table(
    casino: web::Data<Casino>,
    path: web::Path<Uuid>,
    body: web::Json<HostRequest>,
) -> impl Responder {
    let table_id = TableId::from(path.into_inner());
    ok_or_error(handlers::delete_table(&casino, table_id, body.into_inner()).await)
}

/// body every scheduled-task delivery endpoint shares: which table, which
/// token kind, and the token the task was minted with. These exist for the
/// `TASK_QUEUE_LOCATION=durable` deployment mode, where a task runner
/// delivers by HTTP rather than the in-process `DelayQueue`; the in-process
/// mode never calls these routes, it invokes `handlers::deliver` directly.
#[derive(Debug, serde::Deserialize)]
struct TaskDeliveryRequest {
    table_id: TableId,
    token: Uuid,
}

async fn handle_turn_timeout(casino: web::Data<Casino>, body: web::Json<TaskDeliveryRequest>) -> impl Responder {
    deliver(&casino, body.into_inner(), TokenKind::Turn).await
}

async fn handle_showdown_resolve(casino: web::Data<Casino>, body: web::Json<TaskDeliveryRequest>) -> impl Responder {
    deliver(&casino, body.into_inner(), TokenKind::Showdown).await
}

async fn handle_win_by_fold_timeout(casino: web::Data<Casino>, body: web::Json<TaskDeliveryRequest>) -> impl Responder {
    deliver(&casino, body.into_inner(), TokenKind::WinByFold).await
}

async fn handle_start_next_hand(casino: web::Data<Casino>, body: web::Json<TaskDeliveryRequest>) -> impl Responder {
    deliver(&casino, body.into_inner(), TokenKind::NextHand).await
}

/// a table with no activity for `IDLE_TABLE_CLOSE_SECONDS` is swept to
/// CLOSED. Unlike the other four, this one isn't a zombie-token delivery —
/// it's driven by the idle sweeper's own wall-clock check, so the body
/// carries only the table id.
async fn handle_room_auto_close(casino: web::Data<Casino>, body: web::Json<RoomAutoCloseRequest>) -> impl Responder {
    ok_or_error(handlers::auto_close(&casino, body.table_id).await)
}

#[derive(Debug, serde::Deserialize)]
struct RoomAutoCloseRequest {
    table_id: TableId,
}

async fn deliver(casino: &Casino, req: TaskDeliveryRequest, kind: TokenKind) -> HttpResponse {
    let delivery = Delivery {
        table_id: req.table_id,
        token: req.token,
        kind,
    };
    ok_or_error(handlers::deliver(casino, delivery).await)
}

fn ok_or_error(result: crate::errors::Result<()>) -> HttpResponse {
    match result {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "status": "ok" })),
        Err(e) => error_response(e),
    }
}

fn error_response(e: EngineError) -> HttpResponse {
    let body = ErrorResponse::from(e.clone());
    match e {
        EngineError::GameNotFound => HttpResponse::NotFound().json(body),
        EngineError::NotAuthorized | EngineError::RoomInPlay => HttpResponse::Forbidden().json(body),
        EngineError::TransactionConflict | EngineError::Storage(_) => {
            HttpResponse::ServiceUnavailable().json(body)
        }
        _ => HttpResponse::BadRequest().json(body),
    }
}
