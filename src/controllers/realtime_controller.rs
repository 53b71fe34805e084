use std::{convert::Infallible, time::Duration};

use axum::{
    extract::{Extension, State},
    response::sse::{Event, KeepAlive, Sse},
};
use tokio::sync::broadcast::error::RecvError;

use crate::{models::CurrentUser, services::wallet_service, AppState};

// GET /events  (SSE)
//
// Events on the bus are `name:user_hex`; each stream only forwards its own.
pub async fn sse_events(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Sse<impl futures_util::stream::Stream<Item = Result<Event, Infallible>>> {
    let rx = state.events_tx.subscribe();
    let me = user.id.to_hex();

    let stream = futures_util::stream::unfold((rx, me), |(mut rx, me)| async move {
        let evt = loop {
            match rx.recv().await {
                Ok(raw) => match wallet_service::split_user_event(&raw) {
                    Some((name, target)) if target == me => {
                        break Event::default().event(name).data("1");
                    }
                    Some(_) => continue,
                    None => break Event::default().event(raw.as_str()).data("1"),
                },
                Err(RecvError::Lagged(_)) => break Event::default().event("ping").data("lagged"),
                Err(RecvError::Closed) => return None,
            }
        };

        Some((Ok(evt), (rx, me)))
    });

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(20))
            .text("keep-alive"),
    )
}
