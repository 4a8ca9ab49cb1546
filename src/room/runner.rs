//! Async room runner.
//!
//! Owns an [`ArenaRoom`] on a single tokio task: one channel carries
//! joins, leaves, commands, and message-expiry notices, and an interval
//! drives ticks. Both are serviced by the same `select!` loop, so
//! command application and tick advancement are mutually exclusive by
//! construction. Message expiry is a spawned sleep that reports back on
//! the same channel, carrying the generation observed when the message
//! was set.

use tokio::sync::{mpsc, oneshot};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::game::entity::{PlayerId, ReconnectToken};
use crate::room::{ArenaRoom, JoinOptions, MessageExpiry, TickReport};

/// Messages accepted by the room task
pub enum RoomMessage {
    Join {
        player_id: PlayerId,
        options: JoinOptions,
    },
    Leave {
        player_id: PlayerId,
    },
    Park {
        player_id: PlayerId,
        reply: oneshot::Sender<Option<ReconnectToken>>,
    },
    Command {
        player_id: PlayerId,
        raw: String,
    },
    ExpireMessage(MessageExpiry),
    Shutdown,
}

/// Handle to a running room task
pub struct RoomHandle {
    tx: mpsc::Sender<RoomMessage>,
    task: tokio::task::JoinHandle<ArenaRoom>,
}

/// Channel capacity for inbound room messages
const MESSAGE_BUFFER: usize = 256;

/// Spawn the room onto its own task
///
/// Tick reports are pushed into `reports`; the task stops when the
/// report consumer goes away, on [`RoomMessage::Shutdown`], or when every
/// handle is dropped.
pub fn spawn(mut room: ArenaRoom, reports: mpsc::Sender<TickReport>) -> RoomHandle {
    let (tx, mut rx) = mpsc::channel(MESSAGE_BUFFER);
    let expiry_tx = tx.clone();
    let message_ttl = room.config().message_ttl;
    let tick_duration = room.config().tick_duration();
    let room_id = room.id();

    let task = tokio::spawn(async move {
        let mut ticker = interval(tick_duration);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        info!(%room_id, "room task started");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let report = room.tick();
                    if reports.send(report).await.is_err() {
                        info!(%room_id, "report consumer gone, stopping room");
                        break;
                    }
                }
                message = rx.recv() => {
                    match message {
                        None | Some(RoomMessage::Shutdown) => break,
                        Some(RoomMessage::Join { player_id, options }) => {
                            if let Err(e) = room.on_join(player_id, options) {
                                warn!(%player_id, error = %e, "join rejected");
                            }
                        }
                        Some(RoomMessage::Leave { player_id }) => {
                            room.on_leave(player_id);
                        }
                        Some(RoomMessage::Park { player_id, reply }) => {
                            let _ = reply.send(room.park(player_id));
                        }
                        Some(RoomMessage::Command { player_id, raw }) => {
                            if let Some(expiry) = room.apply_command(player_id, &raw) {
                                let tx = expiry_tx.clone();
                                tokio::spawn(async move {
                                    tokio::time::sleep(message_ttl).await;
                                    if tx.send(RoomMessage::ExpireMessage(expiry)).await.is_err() {
                                        debug!("room gone before message expiry");
                                    }
                                });
                            }
                        }
                        Some(RoomMessage::ExpireMessage(expiry)) => {
                            room.expire_message(expiry);
                        }
                    }
                }
            }
        }

        info!(%room_id, "room task stopped");
        room
    });

    RoomHandle { tx, task }
}

impl RoomHandle {
    pub async fn join(&self, player_id: PlayerId, options: JoinOptions) {
        let _ = self
            .tx
            .send(RoomMessage::Join { player_id, options })
            .await;
    }

    pub async fn leave(&self, player_id: PlayerId) {
        let _ = self.tx.send(RoomMessage::Leave { player_id }).await;
    }

    /// Park a player and receive the reconnect token
    pub async fn park(&self, player_id: PlayerId) -> Option<ReconnectToken> {
        let (reply, response) = oneshot::channel();
        self.tx
            .send(RoomMessage::Park { player_id, reply })
            .await
            .ok()?;
        response.await.ok().flatten()
    }

    pub async fn command(&self, player_id: PlayerId, raw: impl Into<String>) {
        let _ = self
            .tx
            .send(RoomMessage::Command {
                player_id,
                raw: raw.into(),
            })
            .await;
    }

    /// Stop the room task and take back the room state
    pub async fn shutdown(self) -> Option<ArenaRoom> {
        let _ = self.tx.send(RoomMessage::Shutdown).await;
        self.task.await.ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::map::Polygon;
    use crate::util::vec2::Vec2;
    use uuid::Uuid;

    fn test_room() -> ArenaRoom {
        let polygon = Polygon::new(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1000.0, 0.0),
            Vec2::new(1000.0, 1000.0),
            Vec2::new(0.0, 1000.0),
        ]);
        ArenaRoom::new(polygon, SimConfig::default())
    }

    /// Receive reports until one satisfies the predicate, bounded so a
    /// regression fails instead of hanging
    async fn wait_for(
        reports: &mut mpsc::Receiver<TickReport>,
        mut predicate: impl FnMut(&TickReport) -> bool,
    ) -> TickReport {
        for _ in 0..600 {
            let report = reports.recv().await.expect("room task ended early");
            if predicate(&report) {
                return report;
            }
        }
        panic!("condition not reached within report budget");
    }

    #[tokio::test(start_paused = true)]
    async fn test_join_appears_in_reports() {
        let (report_tx, mut report_rx) = mpsc::channel(8);
        let handle = spawn(test_room(), report_tx);

        let id = Uuid::new_v4();
        handle
            .join(
                id,
                JoinOptions {
                    name: "Async".to_string(),
                    ..JoinOptions::default()
                },
            )
            .await;

        let report = wait_for(&mut report_rx, |r| !r.views.is_empty()).await;
        assert_eq!(report.views[0].id, id);

        let room = handle.shutdown().await.unwrap();
        assert_eq!(room.player_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_movement_over_ticks() {
        let (report_tx, mut report_rx) = mpsc::channel(8);
        let handle = spawn(test_room(), report_tx);

        let id = Uuid::new_v4();
        handle.join(id, JoinOptions::default()).await;
        let start = wait_for(&mut report_rx, |r| !r.views.is_empty()).await;
        let start_x = start.views[0].position.x;

        handle.command(id, "right").await;
        let moved = wait_for(&mut report_rx, |r| {
            r.views.first().is_some_and(|v| v.position.x > start_x)
        })
        .await;
        assert!(moved.views[0].is_moving);

        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_message_expires() {
        let (report_tx, mut report_rx) = mpsc::channel(8);
        let handle = spawn(test_room(), report_tx);

        let id = Uuid::new_v4();
        handle.join(id, JoinOptions::default()).await;
        handle.command(id, "print hello").await;

        wait_for(&mut report_rx, |r| {
            r.views.first().is_some_and(|v| v.message == "hello")
        })
        .await;

        // The TTL sleep fires under paused time as the loop idles
        wait_for(&mut report_rx, |r| {
            r.views.first().is_some_and(|v| v.message.is_empty())
        })
        .await;

        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_park_returns_token() {
        let (report_tx, mut report_rx) = mpsc::channel(8);
        let handle = spawn(test_room(), report_tx);

        let id = Uuid::new_v4();
        handle.join(id, JoinOptions::default()).await;
        wait_for(&mut report_rx, |r| !r.views.is_empty()).await;

        let token = handle.park(id).await;
        assert!(token.is_some());

        // Parking an unknown player yields no token
        assert!(handle.park(Uuid::new_v4()).await.is_none());

        let room = handle.shutdown().await.unwrap();
        assert_eq!(room.player_count(), 0);
    }
}
