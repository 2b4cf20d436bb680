use super::messages::Message;
use super::state::VideoScreen;
use crate::common::events::CoreEvent;
use crate::common::messages::DomainUpdateResult;
use crate::domains::feed::{self, update_feed};
use crate::domains::player::MediaBackend;

pub fn update_video<B: MediaBackend>(
    screen: &mut VideoScreen<B>,
    message: Message,
) -> DomainUpdateResult {
    match message {
        Message::Mounted => screen.on_mount(),

        Message::Unmounted => {
            screen.on_unmount();
            DomainUpdateResult::none()
        }

        Message::FocusChanged(focused) => {
            screen.on_focus_change(focused);
            DomainUpdateResult::none()
        }

        Message::Layout { height } => {
            screen.activation.on_layout(height);
            DomainUpdateResult::none()
        }

        Message::Scrolled { offset } => {
            let change = screen.activation.on_scroll(offset);
            let mut result = screen.apply_activation(change);
            if screen.take_end_reached(offset) {
                result.extend(update_feed(&mut screen.feed, feed::Message::LoadMore));
            }
            result
        }

        Message::GestureStarted { offset } => {
            screen.activation.on_gesture_start(offset);
            DomainUpdateResult::none()
        }

        Message::GestureEnded { offset } => {
            let outcome = screen.activation.on_gesture_end(offset);
            if let Some(offset) = outcome.scroll_to {
                screen.events().publish(CoreEvent::ScrollTo {
                    offset,
                    animated: true,
                });
            }
            screen.apply_activation(outcome.change)
        }

        Message::EndReached => {
            update_feed(&mut screen.feed, feed::Message::LoadMore)
        }

        Message::TogglePlayback => {
            match screen.player.toggle_user_pause() {
                Ok(paused) => {
                    log::debug!("[VideoScreen] User paused: {}", paused)
                }
                Err(e) => log::debug!("[VideoScreen] Tap ignored: {}", e),
            }
            DomainUpdateResult::none()
        }

        Message::PlayerReady => {
            screen.player.on_ready();
            DomainUpdateResult::none()
        }

        Message::TimeUpdate(time) => {
            screen.player.on_time_update(time);
            DomainUpdateResult::none()
        }

        Message::ToggleLike => match screen.active_id() {
            Some(id) => {
                update_feed(&mut screen.feed, feed::Message::ToggleLike(id))
            }
            None => DomainUpdateResult::none(),
        },

        Message::Feed(msg) => {
            let loaded_detail = match &msg {
                feed::Message::DetailLoaded { id, result: Ok(_) } => {
                    Some(id.clone())
                }
                _ => None,
            };

            let mut result = update_feed(&mut screen.feed, msg);
            result.extend(screen.sync_item_count());
            if let Some(id) = loaded_detail {
                screen.attach_active_detail(&id);
            }
            result
        }
    }
}
