use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use gamideck_core::{resolve_deck, CoreError, RateOutcome, Repository, ReviewSession, SpinResult, StudyContext};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::api::dto::{ApiError, DeckOut, LeaderboardOut, RateIn, RateOut, SessionIn, SessionOut};

pub struct AppState {
    pub repo: Arc<dyn Repository>,
    pub sessions: RwLock<HashMap<Uuid, ReviewSession>>,
    pub ctx: Mutex<StudyContext>,
}

impl AppState {
    pub fn new(repo: Arc<dyn Repository>, ctx: StudyContext) -> Self {
        Self {
            repo,
            sessions: RwLock::new(HashMap::new()),
            ctx: Mutex::new(ctx),
        }
    }

    /// Runs `f` against one session under the write lock.
    fn with_session<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut ReviewSession) -> Result<T, CoreError>,
    ) -> Result<T, ApiError> {
        let mut sessions = self.sessions.write();
        let s = sessions.get_mut(&id).ok_or(CoreError::NotFound("session"))?;
        Ok(f(s)?)
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

fn session_out(id: Uuid, s: &ReviewSession) -> SessionOut {
    SessionOut { id, snapshot: s.snapshot() }
}

pub async fn list_decks(State(st): State<Arc<AppState>>) -> ApiResult<Vec<DeckOut>> {
    let decks = st.repo.list_decks().await?;
    let cards = st.repo.list_cards(None).await?;
    Ok(Json(
        decks
            .into_iter()
            .map(|d| DeckOut {
                cards: cards.iter().filter(|c| c.deck_id == d.id).count(),
                id: d.id,
                name: d.name,
                created_at: d.created_at,
            })
            .collect(),
    ))
}

pub async fn create_session(
    State(st): State<Arc<AppState>>,
    Json(body): Json<SessionIn>,
) -> Result<(StatusCode, Json<SessionOut>), ApiError> {
    let deck = resolve_deck(&*st.repo, &body.deck).await?;
    let cards = st.repo.list_cards(Some(deck.id)).await?;
    let session = ReviewSession::new(cards)?;
    let id = Uuid::new_v4();
    let out = session_out(id, &session);
    st.sessions.write().insert(id, session);
    info!(session = %id, deck = %deck.name, "session created");
    Ok((StatusCode::CREATED, Json(out)))
}

pub async fn get_session(State(st): State<Arc<AppState>>, Path(id): Path<Uuid>) -> ApiResult<SessionOut> {
    st.with_session(id, |s| Ok(session_out(id, s))).map(Json)
}

pub async fn delete_session(State(st): State<Arc<AppState>>, Path(id): Path<Uuid>) -> Result<StatusCode, ApiError> {
    st.sessions.write().remove(&id).ok_or(CoreError::NotFound("session"))?;
    info!(session = %id, "session dropped");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn reveal(State(st): State<Arc<AppState>>, Path(id): Path<Uuid>) -> ApiResult<SessionOut> {
    st.with_session(id, |s| {
        s.reveal();
        Ok(session_out(id, s))
    })
    .map(Json)
}

pub async fn rate(
    State(st): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(body): Json<RateIn>,
) -> ApiResult<RateOut> {
    let (rating, outcome, session) = st.with_session(id, |s| {
        let (rating, outcome) = s.rate_str(&body.rating)?;
        Ok((rating, outcome, session_out(id, s)))
    })?;
    let credit = match outcome {
        RateOutcome::Ignored => None,
        _ => Some(st.ctx.lock().credit(rating)),
    };
    Ok(Json(RateOut { outcome, credit, session }))
}

pub async fn restart(State(st): State<Arc<AppState>>, Path(id): Path<Uuid>) -> ApiResult<SessionOut> {
    st.with_session(id, |s| {
        s.restart();
        Ok(session_out(id, s))
    })
    .map(Json)
}

pub async fn spin(State(st): State<Arc<AppState>>) -> ApiResult<SpinResult> {
    let res = st.ctx.lock().spin.spin(&mut rand::rng())?;
    Ok(Json(res))
}

pub async fn leaderboard(State(st): State<Arc<AppState>>) -> ApiResult<LeaderboardOut> {
    let ctx = st.ctx.lock();
    Ok(Json(LeaderboardOut {
        friends: ctx.leaderboard.friends().to_vec(),
        show_rank_up_badge: ctx.leaderboard.show_rank_up_badge(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamideck_core::memory::MemoryRepo;

    async fn state_with_deck(cards: &[(&str, &str)]) -> Arc<AppState> {
        let repo = MemoryRepo::new();
        let deck = repo.create_deck("Python").await.unwrap();
        for (f, b) in cards {
            repo.add_card(deck.id, f, b).await.unwrap();
        }
        Arc::new(AppState::new(Arc::new(repo), StudyContext::default()))
    }

    async fn new_session(st: &Arc<AppState>) -> Uuid {
        let body = SessionIn { deck: "python".into() };
        let (code, Json(out)) = create_session(State(st.clone()), Json(body)).await.ok().unwrap();
        assert_eq!(code, StatusCode::CREATED);
        out.id
    }

    #[tokio::test]
    async fn review_flow_over_handlers() {
        let st = state_with_deck(&[("len", "length"), ("str", "string")]).await;
        let id = new_session(&st).await;

        let Json(out) = reveal(State(st.clone()), Path(id)).await.ok().unwrap();
        assert!(out.snapshot.revealed);

        let body = RateIn { rating: "good".into() };
        let Json(out) = rate(State(st.clone()), Path(id), Json(body)).await.ok().unwrap();
        assert_eq!(out.outcome, RateOutcome::Mastered);
        assert_eq!(out.credit.unwrap().points, 10);
        assert_eq!(out.session.snapshot.remaining, 1);
        assert_eq!(out.session.snapshot.active.unwrap().front, "str");

        let Json(board) = leaderboard(State(st.clone())).await.ok().unwrap();
        let you = board.friends.iter().find(|f| f.is_you).unwrap();
        assert_eq!(you.points, 866);
    }

    #[tokio::test]
    async fn rate_errors_leave_session_untouched() {
        let st = state_with_deck(&[("len", "length")]).await;
        let id = new_session(&st).await;

        let body = RateIn { rating: "good".into() };
        let err = rate(State(st.clone()), Path(id), Json(body)).await.err().unwrap();
        assert_eq!(err.0, CoreError::NotRevealed);

        reveal(State(st.clone()), Path(id)).await.ok().unwrap();
        let body = RateIn { rating: "perfect".into() };
        let err = rate(State(st.clone()), Path(id), Json(body)).await.err().unwrap();
        assert!(matches!(err.0, CoreError::InvalidRating(_)));

        let Json(out) = get_session(State(st.clone()), Path(id)).await.ok().unwrap();
        assert!(out.snapshot.revealed);
        assert_eq!(out.snapshot.remaining, 1);
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let st = state_with_deck(&[]).await;
        let err = get_session(State(st), Path(Uuid::new_v4())).await.err().unwrap();
        assert_eq!(err.0, CoreError::NotFound("session"));
    }

    #[tokio::test]
    async fn deleted_session_is_gone() {
        let st = state_with_deck(&[("len", "length")]).await;
        let id = new_session(&st).await;
        let other = new_session(&st).await;

        let code = delete_session(State(st.clone()), Path(id)).await.ok().unwrap();
        assert_eq!(code, StatusCode::NO_CONTENT);
        assert_eq!(st.sessions.read().len(), 1);

        let err = get_session(State(st.clone()), Path(id)).await.err().unwrap();
        assert_eq!(err.0, CoreError::NotFound("session"));
        let err = delete_session(State(st.clone()), Path(id)).await.err().unwrap();
        assert_eq!(err.0, CoreError::NotFound("session"));

        get_session(State(st), Path(other)).await.ok().unwrap();
    }

    #[tokio::test]
    async fn spin_only_once() {
        let st = state_with_deck(&[]).await;
        let Json(first) = spin(State(st.clone())).await.ok().unwrap();
        let err = spin(State(st.clone())).await.err().unwrap();
        assert_eq!(err.0, CoreError::AlreadySpun { reward: first.reward });
    }
}
