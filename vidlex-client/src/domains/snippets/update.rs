use super::messages::Message;
use super::state::SnippetCarousel;
use crate::common::messages::DomainUpdateResult;
use crate::domains::player::MediaBackend;

pub fn update_snippets<B: MediaBackend>(
    carousel: &mut SnippetCarousel<B>,
    message: Message,
) -> DomainUpdateResult {
    match message {
        Message::Search(phrase) => {
            DomainUpdateResult::maybe(carousel.search(&phrase))
        }
        Message::Results { query_id, result } => {
            match result {
                Ok(result) => carousel.on_results(query_id, result),
                Err(reason) => carousel.on_search_failed(query_id, reason),
            }
            DomainUpdateResult::none()
        }
        Message::Layout { width } => {
            carousel.on_layout(width);
            DomainUpdateResult::none()
        }
        Message::MomentumEnded { offset_x } => {
            carousel.on_momentum_end(offset_x);
            DomainUpdateResult::none()
        }
        Message::FocusChanged(focused) => {
            carousel.player.set_screen_focused(focused);
            DomainUpdateResult::none()
        }
        Message::PlayerReady => {
            carousel.player.on_ready();
            DomainUpdateResult::none()
        }
        Message::TimeUpdate(time) => {
            carousel.player.on_time_update(time);
            DomainUpdateResult::none()
        }
        Message::TogglePlayback => {
            if let Err(e) = carousel.player.toggle_user_pause() {
                log::debug!("[Snippets] Tap ignored: {}", e);
            }
            DomainUpdateResult::none()
        }
        Message::Closed => {
            carousel.close();
            DomainUpdateResult::none()
        }
    }
}
