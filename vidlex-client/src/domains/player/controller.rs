//! Playback controller
//!
//! Owns at most one media session, bound to the active item, so a bound
//! item is always the active one. It plays while the hosting screen is
//! focused, unless the user paused it explicitly.

use vidlex_model::{ContentDetail, ContentId};

use super::backend::{MediaBackend, MediaSession, PlaybackError};
use super::state::{PlaybackState, PlaybackTarget};
use super::subtitles::SubtitleLines;
use crate::common::events::{CoreEvent, EventBus};

#[derive(Debug)]
struct Binding<S> {
    target: PlaybackTarget,
    session: S,
    state: PlaybackState,
    user_paused: bool,
    position: f64,
    detail: Option<ContentDetail>,
    subtitles: SubtitleLines,
}

#[derive(Debug)]
pub struct PlaybackController<B: MediaBackend> {
    backend: B,
    binding: Option<Binding<B::Session>>,
    screen_focused: bool,
    events: EventBus,
}

impl<B: MediaBackend> PlaybackController<B> {
    pub fn new(backend: B, events: EventBus) -> Self {
        Self {
            backend,
            binding: None,
            screen_focused: false,
            events,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.binding
            .as_ref()
            .map(|b| b.state)
            .unwrap_or(PlaybackState::Unbound)
    }

    pub fn bound_id(&self) -> Option<&ContentId> {
        self.binding.as_ref().map(|b| &b.target.id)
    }

    pub fn target(&self) -> Option<&PlaybackTarget> {
        self.binding.as_ref().map(|b| &b.target)
    }

    pub fn position(&self) -> f64 {
        self.binding.as_ref().map(|b| b.position).unwrap_or(0.0)
    }

    pub fn is_user_paused(&self) -> bool {
        self.binding.as_ref().is_some_and(|b| b.user_paused)
    }

    pub fn is_screen_focused(&self) -> bool {
        self.screen_focused
    }

    pub fn subtitles(&self) -> SubtitleLines {
        self.binding
            .as_ref()
            .map(|b| b.subtitles.clone())
            .unwrap_or_default()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Bind a new target. Any current session is torn down first.
    pub fn bind(&mut self, target: PlaybackTarget) -> Result<(), PlaybackError> {
        self.unbind();

        log::debug!("[Playback] Binding {} ({})", target.id, target.url);
        let mut session = self.backend.open(&target.url)?;
        session.set_looping(target.window.is_none());

        let position = target.start_offset();
        self.binding = Some(Binding {
            target,
            session,
            state: PlaybackState::Loading,
            user_paused: false,
            position,
            detail: None,
            subtitles: SubtitleLines::default(),
        });
        self.publish_state();
        Ok(())
    }

    /// Tear the session down entirely. No-op when unbound.
    pub fn unbind(&mut self) {
        let Some(mut binding) = self.binding.take() else {
            return;
        };
        log::debug!("[Playback] Unbinding {}", binding.target.id);
        binding.session.pause();
        binding.session.stop();
        drop(binding);

        self.events
            .publish(CoreEvent::PlaybackStateChanged(PlaybackState::Unbound));
        self.events
            .publish(CoreEvent::SubtitlesChanged(SubtitleLines::default()));
    }

    /// Backend reported the bound session ready to play.
    pub fn on_ready(&mut self) {
        let Some(binding) = self.binding.as_mut() else {
            return;
        };
        if binding.state != PlaybackState::Loading {
            return;
        }
        if let Some(window) = binding.target.window {
            binding.session.seek(window.start());
            binding.position = window.start();
        }
        binding.state = PlaybackState::Ready;
        self.reconcile();
        self.publish_state();
    }

    pub fn set_screen_focused(&mut self, focused: bool) {
        if self.screen_focused == focused {
            return;
        }
        self.screen_focused = focused;
        if self.reconcile() {
            self.publish_state();
        }
    }

    /// User tap on the video. Returns the new explicit-pause flag.
    pub fn toggle_user_pause(&mut self) -> Result<bool, PlaybackError> {
        let focused = self.screen_focused;
        let binding = self.binding.as_mut().ok_or(PlaybackError::NotReady)?;
        if !binding.state.is_ready() || !focused {
            return Err(PlaybackError::NotReady);
        }
        binding.user_paused = !binding.user_paused;
        let paused = binding.user_paused;
        if self.reconcile() {
            self.publish_state();
        }
        Ok(paused)
    }

    /// Periodic time update from the backend.
    ///
    /// Loops windowed targets back to the window start and returns the
    /// subtitle lines for the new position. `None` while not ready.
    pub fn on_time_update(&mut self, time: f64) -> Option<SubtitleLines> {
        let binding = self.binding.as_mut()?;
        if !binding.state.is_ready() {
            return None;
        }
        binding.position = time;

        if let Some(window) = binding.target.window
            && time >= window.end()
        {
            binding.session.seek(window.start());
            binding.position = window.start();
            let wants = self.wants_playback();
            if let Some(binding) = self.binding.as_mut() {
                if wants {
                    binding.session.play();
                    binding.state = PlaybackState::Playing;
                } else {
                    binding.session.pause();
                    binding.state = PlaybackState::Paused;
                }
            }
            self.publish_state();
        }

        self.refresh_subtitles()
    }

    /// Attach the detail payload of the bound item; other ids are ignored.
    pub fn attach_detail(&mut self, id: &ContentId, detail: ContentDetail) {
        let Some(binding) = self.binding.as_mut() else {
            return;
        };
        if &binding.target.id != id {
            return;
        }
        binding.detail = Some(detail);
        self.refresh_subtitles();
    }

    pub fn has_detail(&self) -> bool {
        self.binding.as_ref().is_some_and(|b| b.detail.is_some())
    }

    fn wants_playback(&self) -> bool {
        self.binding.as_ref().is_some_and(|b| {
            self.screen_focused && !b.user_paused
        })
    }

    /// Drive the session toward what the gates ask for. Returns whether the
    /// state changed.
    fn reconcile(&mut self) -> bool {
        let wants = self.wants_playback();
        let Some(binding) = self.binding.as_mut() else {
            return false;
        };
        if binding.state == PlaybackState::Loading {
            return false;
        }
        let next = if wants {
            PlaybackState::Playing
        } else {
            PlaybackState::Paused
        };
        if binding.state == next {
            return false;
        }
        match next {
            PlaybackState::Playing => binding.session.play(),
            _ => binding.session.pause(),
        }
        binding.state = next;
        true
    }

    fn refresh_subtitles(&mut self) -> Option<SubtitleLines> {
        let binding = self.binding.as_mut()?;
        let lines = binding
            .detail
            .as_ref()
            .map(|detail| SubtitleLines::at(detail, binding.position))
            .unwrap_or_default();
        if lines != binding.subtitles {
            binding.subtitles = lines.clone();
            self.events.publish(CoreEvent::SubtitlesChanged(lines.clone()));
        }
        Some(lines)
    }

    fn publish_state(&self) {
        self.events
            .publish(CoreEvent::PlaybackStateChanged(self.state()));
    }
}

impl<B: MediaBackend> Drop for PlaybackController<B> {
    fn drop(&mut self) {
        if let Some(mut binding) = self.binding.take() {
            binding.session.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::media::{HeadlessBackend, MediaOp};
    use vidlex_model::{TextChunk, TimeWindow, Transcript};

    fn full(id: &str) -> PlaybackTarget {
        PlaybackTarget {
            id: ContentId::from(id),
            url: format!("https://cdn/{id}.m3u8"),
            window: None,
        }
    }

    fn windowed(id: &str, start: f64, end: f64) -> PlaybackTarget {
        PlaybackTarget {
            window: Some(TimeWindow::new(start, end).unwrap()),
            ..full(id)
        }
    }

    fn controller() -> (PlaybackController<HeadlessBackend>, HeadlessBackend) {
        let backend = HeadlessBackend::new();
        let mut controller =
            PlaybackController::new(backend.clone(), EventBus::default());
        controller.set_screen_focused(true);
        (controller, backend)
    }

    #[test]
    fn bind_waits_for_ready_then_plays() {
        let (mut c, backend) = controller();
        c.bind(full("a")).unwrap();
        assert_eq!(c.state(), PlaybackState::Loading);
        assert!(!backend.ops().contains(&MediaOp::Play("https://cdn/a.m3u8".into())));

        c.on_ready();
        assert_eq!(c.state(), PlaybackState::Playing);
        assert_eq!(
            backend.ops(),
            vec![
                MediaOp::Open("https://cdn/a.m3u8".into()),
                MediaOp::Looping("https://cdn/a.m3u8".into(), true),
                MediaOp::Play("https://cdn/a.m3u8".into()),
            ]
        );
    }

    #[test]
    fn rebinding_stops_previous_session_before_opening_next() {
        let (mut c, backend) = controller();
        c.bind(full("a")).unwrap();
        c.on_ready();
        c.bind(full("b")).unwrap();

        let ops = backend.ops();
        let stop_a = ops
            .iter()
            .position(|op| *op == MediaOp::Stop("https://cdn/a.m3u8".into()))
            .unwrap();
        let open_b = ops
            .iter()
            .position(|op| *op == MediaOp::Open("https://cdn/b.m3u8".into()))
            .unwrap();
        assert!(stop_a < open_b);
        assert_eq!(backend.live_sessions(), 1);
        assert_eq!(backend.peak_sessions(), 1);
    }

    #[test]
    fn focus_loss_pauses_and_focus_gain_resumes() {
        let (mut c, _backend) = controller();
        c.bind(full("a")).unwrap();
        c.on_ready();
        c.on_time_update(4.0);

        c.set_screen_focused(false);
        assert_eq!(c.state(), PlaybackState::Paused);
        assert_eq!(c.position(), 4.0);

        c.set_screen_focused(true);
        assert_eq!(c.state(), PlaybackState::Playing);
    }

    #[test]
    fn explicit_pause_survives_focus_changes() {
        let (mut c, _backend) = controller();
        c.bind(full("a")).unwrap();
        c.on_ready();

        assert_eq!(c.toggle_user_pause(), Ok(true));
        assert_eq!(c.state(), PlaybackState::Paused);

        c.set_screen_focused(false);
        c.set_screen_focused(true);
        assert_eq!(c.state(), PlaybackState::Paused);

        assert_eq!(c.toggle_user_pause(), Ok(false));
        assert_eq!(c.state(), PlaybackState::Playing);
    }

    #[test]
    fn tap_is_ignored_when_not_ready_or_unfocused() {
        let (mut c, _backend) = controller();
        assert_eq!(c.toggle_user_pause(), Err(PlaybackError::NotReady));

        c.bind(full("a")).unwrap();
        assert_eq!(c.toggle_user_pause(), Err(PlaybackError::NotReady));

        c.on_ready();
        c.set_screen_focused(false);
        assert_eq!(c.toggle_user_pause(), Err(PlaybackError::NotReady));
        assert!(!c.is_user_paused());
    }

    #[test]
    fn ready_while_unfocused_stays_paused() {
        let backend = HeadlessBackend::new();
        let mut c = PlaybackController::new(backend.clone(), EventBus::default());
        c.bind(full("a")).unwrap();
        c.on_ready();
        assert_eq!(c.state(), PlaybackState::Paused);
        assert!(
            !backend
                .ops()
                .contains(&MediaOp::Play("https://cdn/a.m3u8".into()))
        );
    }

    #[test]
    fn windowed_target_starts_at_window_and_loops_inside_it() {
        let (mut c, backend) = controller();
        c.bind(windowed("s", 12.0, 15.0)).unwrap();
        c.on_ready();
        assert_eq!(c.position(), 12.0);

        let url = "https://cdn/s.m3u8".to_string();
        assert!(backend.ops().contains(&MediaOp::Looping(url.clone(), false)));
        assert!(backend.ops().contains(&MediaOp::Seek(url.clone(), 12.0)));

        backend.clear_ops();
        c.on_time_update(15.2);
        assert_eq!(c.position(), 12.0);
        assert_eq!(
            backend.ops(),
            vec![MediaOp::Seek(url.clone(), 12.0), MediaOp::Play(url)]
        );
        assert_eq!(c.state(), PlaybackState::Playing);
    }

    #[test]
    fn window_end_while_user_paused_rewinds_and_stays_paused() {
        let (mut c, backend) = controller();
        c.bind(windowed("s", 1.0, 3.0)).unwrap();
        c.on_ready();
        c.toggle_user_pause().unwrap();

        backend.clear_ops();
        c.on_time_update(3.0);
        let url = "https://cdn/s.m3u8".to_string();
        assert_eq!(
            backend.ops(),
            vec![MediaOp::Seek(url.clone(), 1.0), MediaOp::Pause(url)]
        );
        assert_eq!(c.state(), PlaybackState::Paused);
    }

    #[test]
    fn time_updates_drive_subtitles_once_detail_is_attached() {
        let (mut c, _backend) = controller();
        c.bind(full("a")).unwrap();
        c.on_ready();
        assert_eq!(c.on_time_update(1.0), Some(SubtitleLines::default()));

        c.attach_detail(
            &ContentId::from("a"),
            ContentDetail {
                transcription: Some(Transcript::from_chunks(vec![
                    TextChunk::new(0.0, 2.0, "a"),
                    TextChunk::new(2.0, 5.0, "b"),
                ])),
                translation: None,
            },
        );
        assert_eq!(c.subtitles().transcript, "a");
        assert_eq!(c.on_time_update(6.0).unwrap().transcript, "b");
    }

    #[test]
    fn detail_for_another_item_is_ignored() {
        let (mut c, _backend) = controller();
        c.bind(full("a")).unwrap();
        c.attach_detail(&ContentId::from("b"), ContentDetail::default());
        assert!(!c.has_detail());
    }

    #[test]
    fn time_updates_before_ready_are_ignored() {
        let (mut c, _backend) = controller();
        c.bind(full("a")).unwrap();
        assert_eq!(c.on_time_update(3.0), None);
        assert_eq!(c.position(), 0.0);
    }

    #[test]
    fn failed_open_leaves_controller_unbound() {
        let (mut c, backend) = controller();
        backend.fail_on("https://cdn/a.m3u8");
        assert!(matches!(
            c.bind(full("a")),
            Err(PlaybackError::Open { .. })
        ));
        assert_eq!(c.state(), PlaybackState::Unbound);
        assert_eq!(backend.live_sessions(), 0);
    }

    #[test]
    fn unbind_releases_the_session() {
        let (mut c, backend) = controller();
        c.bind(full("a")).unwrap();
        c.on_ready();
        c.unbind();
        assert_eq!(c.state(), PlaybackState::Unbound);
        assert_eq!(backend.live_sessions(), 0);
        assert_eq!(c.bound_id(), None);
    }
}
