use anyhow::Context;
use env_logger::{Builder, Target};
use log::LevelFilter;

use vidlex_client::app::{AppConfig, AppContext, Runtime};
use vidlex_client::domains::video;
use vidlex_client::infra::media::HeadlessBackend;
use vidlex_client::infra::services::Session;
use vidlex_model::{AuthTokens, LoginRequest, UserId, UserProfile};

fn init_logger() {
    Builder::new()
        .target(Target::Stdout)
        .filter_level(LevelFilter::Warn)
        .filter_module("vidlex_client", LevelFilter::Debug)
        .filter_module("vidlex", LevelFilter::Debug)
        .init();
}

/// Sign in from `VIDLEX_EMAIL`/`VIDLEX_PASSWORD`, or adopt an existing
/// token from `VIDLEX_ACCESS_TOKEN`/`VIDLEX_USER_ID`.
async fn sign_in(context: &AppContext) -> anyhow::Result<()> {
    if let (Ok(email), Ok(password)) = (
        std::env::var("VIDLEX_EMAIL"),
        std::env::var("VIDLEX_PASSWORD"),
    ) && let Some(auth) = context.auth.as_ref()
    {
        let session = auth
            .login(LoginRequest { email, password })
            .await
            .context("login failed")?;
        log::info!("Signed in as {}", session.profile().full_name);
        return Ok(());
    }

    if let (Ok(token), Ok(user_id)) = (
        std::env::var("VIDLEX_ACCESS_TOKEN"),
        std::env::var("VIDLEX_USER_ID"),
    ) {
        context.sessions.set(Some(Session::new(
            AuthTokens {
                access_token: token,
                refresh_token: String::new(),
            },
            UserProfile {
                id: UserId(user_id),
                email: String::new(),
                full_name: String::new(),
                role: Default::default(),
                avatar_url: None,
            },
        )));
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        init_logger();
    } else {
        env_logger::init();
    }

    let config = AppConfig::from_environment();
    log::info!("Using server {}", config.server_url());

    let context = AppContext::new(config)?;
    sign_in(&context).await?;

    let mut runtime = Runtime::from_context(
        &context,
        HeadlessBackend::with_journal_capacity(0),
        HeadlessBackend::with_journal_capacity(0),
    );
    runtime.dispatch(video::Message::FocusChanged(true));
    runtime.dispatch(video::Message::Mounted);
    runtime.settle().await;

    let feed = &runtime.video.feed;
    if let Some(error) = feed.error() {
        anyhow::bail!("feed failed to load: {error}");
    }
    for (index, item) in feed.items().iter().enumerate() {
        println!(
            "{:>3}  {}  [{}]  {} likes{}",
            index + 1,
            item.video_name,
            item.caption(),
            item.likes_count,
            if item.is_liked { " (liked)" } else { "" }
        );
    }
    println!(
        "{} items, status {:?}, more: {}",
        feed.len(),
        feed.status(),
        feed.has_more()
    );

    runtime.dispatch(video::Message::Unmounted);
    Ok(())
}
