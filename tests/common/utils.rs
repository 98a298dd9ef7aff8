use std::net::TcpListener;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Client;
use serde_json::{json, Value};

use interclasse_backend::config::settings::LeagueSettings;
use interclasse_backend::db::{InMemoryLeagueStore, LeagueStore};
use interclasse_backend::league::LeagueService;
use interclasse_backend::run;
use interclasse_backend::services::{Notification, NotificationQueue, Notifier, NotifyError};
use interclasse_backend::telemetry::{get_subscriber, init_subscriber};

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::stdout
        );
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::sink
        );
        init_subscriber(subscriber);
    }
});

/// Keeps every notification it is asked to deliver.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, contact: &str, subject: &str, body: &str) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(Notification {
            contact: contact.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

/// Rejects everything, like a mail relay that is down.
pub struct FailingNotifier;

#[async_trait]
impl Notifier for FailingNotifier {
    async fn notify(&self, _contact: &str, _subject: &str, _body: &str) -> Result<(), NotifyError> {
        Err(NotifyError::Rejected("relay unavailable".to_string()))
    }
}

pub struct TestApp {
    pub address: String,
    pub store: Arc<InMemoryLeagueStore>,
    pub notifier: Arc<RecordingNotifier>,
}

pub async fn spawn_app() -> TestApp {
    // The first time `initialize` is invoked the code in `TRACING` is executed.
    // All other invocations will instead skip execution.
    Lazy::force(&TRACING);

    let listener = TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind random port");
    // Get port assigned by the OS
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let store = Arc::new(InMemoryLeagueStore::new());
    let notifier = Arc::new(RecordingNotifier::default());
    let (notifications, _worker) = NotificationQueue::start(notifier.clone());

    let server = run(
        listener,
        store.clone(),
        notifications,
        LeagueSettings::default(),
        vec!["http://localhost:3000".to_string()],
    )
        .expect("Failed to bind address");
    // Launch the server as a background task
    let _ = tokio::spawn(server);

    TestApp {
        address,
        store,
        notifier,
    }
}

/// A league service over a fresh in-memory store, without any HTTP server.
pub fn spawn_service() -> (LeagueService, Arc<InMemoryLeagueStore>, Arc<RecordingNotifier>) {
    Lazy::force(&TRACING);

    let store = Arc::new(InMemoryLeagueStore::new());
    let notifier = Arc::new(RecordingNotifier::default());
    let (notifications, _worker) = NotificationQueue::start(notifier.clone());
    let dyn_store: Arc<dyn LeagueStore> = store.clone();
    let service = LeagueService::new(dyn_store, notifications, LeagueSettings::default());

    (service, store, notifier)
}

/// Wait until the notification worker has delivered `count` messages.
pub async fn wait_for_notifications(notifier: &RecordingNotifier, count: usize) -> Vec<Notification> {
    for _ in 0..100 {
        let sent = notifier.sent();
        if sent.len() >= count {
            return sent;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    notifier.sent()
}

pub async fn create_competition(
    client: &Client,
    app_address: &str,
    starts_on: &str,
    ends_on: &str,
) -> String {
    let response = client
        .post(&format!("{}/competitions", app_address))
        .json(&json!({
            "name": "Interclass Cup",
            "starts_on": starts_on,
            "ends_on": ends_on,
            "modalities": ["futsal", "volleyball"]
        }))
        .send()
        .await
        .expect("Failed to create competition.");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse competition");
    body["data"]["id"].as_str().expect("No competition id").to_string()
}

/// Register a team and approve it right away; returns the team id.
pub async fn register_approved_team(
    client: &Client,
    app_address: &str,
    competition_id: &str,
    name: &str,
    modality: &str,
) -> String {
    let response = client
        .post(&format!("{}/competitions/{}/teams", app_address, competition_id))
        .json(&json!({
            "name": name,
            "modality": modality,
            "contact_name": format!("{} captain", name),
            "contact_email": format!("{}@school.example.com", name.to_lowercase().replace(' ', "."))
        }))
        .send()
        .await
        .expect("Failed to register team.");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse team");
    let team_id = body["data"]["id"].as_str().expect("No team id").to_string();

    let response = client
        .patch(&format!("{}/teams/{}/status", app_address, team_id))
        .json(&json!({ "status": "approved" }))
        .send()
        .await
        .expect("Failed to approve team.");
    assert_eq!(response.status(), 200);

    team_id
}
