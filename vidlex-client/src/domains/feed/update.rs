use super::messages::Message;
use super::state::FeedState;
use crate::common::messages::{DomainUpdateResult, Effect};

pub fn update_feed(state: &mut FeedState, message: Message) -> DomainUpdateResult {
    log::trace!("[Feed] {:?}", message);
    match message {
        Message::SetFilters(filters) => DomainUpdateResult::maybe(
            state.set_filters(filters).map(Effect::FetchPage),
        ),

        Message::Refresh => {
            let filters = state.filters().clone();
            DomainUpdateResult::effect(Effect::FetchPage(state.reset(filters)))
        }

        Message::LoadMore => {
            DomainUpdateResult::maybe(state.load_more().map(Effect::FetchPage))
        }

        Message::PageLoaded { epoch, result } => {
            match result {
                Ok(page) => {
                    state.on_page_loaded(epoch, page);
                }
                Err(reason) => state.on_page_failed(epoch, reason),
            }
            DomainUpdateResult::none()
        }

        Message::LoadDetail(id) => DomainUpdateResult::maybe(
            state.load_detail(&id).map(Effect::FetchDetail),
        ),

        Message::DetailLoaded { id, result } => {
            match result {
                Ok(detail) => {
                    state.on_detail_loaded(id, detail);
                }
                Err(reason) => state.on_detail_failed(&id, reason),
            }
            DomainUpdateResult::none()
        }

        Message::ToggleLike(id) => DomainUpdateResult::maybe(
            state
                .toggle_like(&id)
                .map(|(id, like)| Effect::UpdateLike { id, like }),
        ),

        Message::SetLike { id, like } => DomainUpdateResult::maybe(
            state
                .set_like(&id, like)
                .map(|(id, like)| Effect::UpdateLike { id, like }),
        ),

        Message::LikeUpdated { id, result } => {
            match result {
                Ok(update) => state.on_like_updated(&id, update),
                Err(reason) => state.on_like_failed(&id, reason),
            }
            DomainUpdateResult::none()
        }
    }
}
