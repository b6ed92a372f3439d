use clik_deck::config::{OtpSettings, Settings};
use clik_deck::core::{MatchDeck, OtpEntry, ResendCountdown};
use clik_deck::models::VerifyCodeRequest;
use clik_deck::services::{
    demo_candidates, load_from_path, spawn_backend_stub, AuthStub, ChannelSink, Simulator, SwipeScript,
};
use std::error::Error;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration before logging so the log settings apply
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    // Initialize logging; LOG_LEVEL / LOG_FORMAT override the config file
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }

    info!("Starting Clik deck simulator...");
    info!("Configuration loaded successfully");

    if let Some(mobile_number) = settings.simulation.mobile_number.as_deref() {
        run_login(mobile_number, &settings.otp).await?;
    }

    let candidates = match settings.simulation.candidates_path.as_deref() {
        Some(path) => load_from_path(path).await?,
        None => {
            info!("No candidates file configured, using demo batch");
            demo_candidates()
        }
    };

    let script = match settings.simulation.script_path.as_deref() {
        Some(path) => SwipeScript::load(path).await?,
        None => SwipeScript::demo(),
    };

    let (sink, rx) = ChannelSink::new();
    let backend = spawn_backend_stub(rx, Duration::from_millis(settings.simulation.backend_latency_ms));

    let mut deck = MatchDeck::with_thresholds(candidates.clone(), sink, settings.swipe.thresholds());

    info!(
        "Deck ready with {} candidates (threshold: {}, exit: {}ms)",
        candidates.len(),
        settings.swipe.commit_threshold,
        settings.swipe.exit_duration_ms
    );

    let simulator = Simulator::new(
        Duration::from_millis(settings.simulation.frame_interval_ms),
        settings.simulation.realtime,
        settings.spring.params(),
    );
    let summary = simulator.run(&mut deck, &script, &candidates).await;

    // Closing the sink lets the backend stub drain and stop
    drop(deck);
    let delivered = backend.await?;

    info!("Backend stub received {} outcomes", delivered.len());
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}

/// Walk the login stub: request a code, type it in, verify
async fn run_login(mobile_number: &str, otp: &OtpSettings) -> Result<(), Box<dyn Error>> {
    let mut auth = AuthStub::new(otp.code_length, Duration::from_millis(otp.verify_delay_ms));
    let challenge = auth.request_code(mobile_number)?;

    let countdown = ResendCountdown::new(otp.resend_cooldown_secs);
    info!("Resend available in {}s", countdown.remaining_secs());

    let mut entry = OtpEntry::new(otp.code_length);
    for index in 0..entry.len() {
        let digit = char::from(b'0' + (index % 10) as u8).to_string();
        entry.set_digit(index, &digit);
    }

    let code = entry.code().ok_or("code entry incomplete")?;
    let session = auth
        .verify_code(&VerifyCodeRequest {
            challenge_id: challenge.challenge_id,
            code,
        })
        .await?;

    info!("Logged in with session {}", session.session_id);
    debug_assert!(auth.is_authenticated());
    auth.logout();
    Ok(())
}
