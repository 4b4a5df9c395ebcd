//! Integration tests for the `/report` conversation, driven through the handler chain.

mod common;

use std::sync::Arc;

use civic_bot::handlers::{CommandHandler, LoggingHandler, ReportFlowHandler};
use civic_bot::replies;
use civic_bot::ConversationState;
use civic_core::{Handler, HandlerResponse, Message, ReplyKeyboard, User};
use common::{location, photo, photo_with_gps, photo_without_gps, text, user, MockBot};
use handler_chain::HandlerChain;
use report_store::{CsvReportStore, InMemoryReportStore, IssueType, Priority, ReportStore};
use tempfile::TempDir;

struct Harness {
    bot: Arc<MockBot>,
    store: Arc<dyn ReportStore>,
    flow: Arc<ReportFlowHandler>,
    chain: HandlerChain,
    _dir: TempDir,
}

impl Harness {
    fn with_store(store: Arc<dyn ReportStore>, dir: TempDir) -> Self {
        let bot = Arc::new(MockBot::new());
        let flow = Arc::new(ReportFlowHandler::new(
            bot.clone(),
            store.clone(),
            dir.path().join("photos"),
        ));
        let chain = HandlerChain::new()
            .add_handler(Arc::new(LoggingHandler))
            .add_handler(Arc::new(CommandHandler::new(bot.clone(), store.clone())))
            .add_handler(flow.clone());
        Self {
            bot,
            store,
            flow,
            chain,
            _dir: dir,
        }
    }

    fn in_memory() -> Self {
        Self::with_store(
            Arc::new(InMemoryReportStore::new()),
            TempDir::new().unwrap(),
        )
    }

    async fn send(&self, message: Message) -> HandlerResponse {
        self.chain.handle(&message).await.unwrap()
    }

    fn state(&self, user: &User) -> ConversationState {
        self.flow.sessions().get(user.id)
    }
}

/// **Test: Pothole + photo with GPS is persisted with High priority and the photo's coordinates.**
#[tokio::test]
async fn test_pothole_with_gps_photo_is_submitted() {
    let dir = TempDir::new().unwrap();
    let reports_file = dir.path().join("reports.csv");
    let store = Arc::new(CsvReportStore::open(&reports_file).unwrap());
    let h = Harness::with_store(store, dir);
    let alice = user(1, "alice");
    h.bot.add_file("gps-photo", photo_with_gps());

    h.send(text(&alice, "/report")).await;
    assert_eq!(h.bot.last_text().as_deref(), Some(replies::SELECT_TYPE));
    assert_eq!(
        h.bot.last_keyboard(),
        Some(ReplyKeyboard::Options(vec![
            "Pothole".to_string(),
            "Streetlight".to_string(),
            "Trash".to_string(),
            "Other".to_string(),
        ]))
    );
    assert_eq!(h.state(&alice), ConversationState::AwaitingType);

    h.send(text(&alice, "Pothole")).await;
    assert_eq!(h.bot.last_text().as_deref(), Some(replies::SEND_PHOTO));
    assert_eq!(
        h.state(&alice),
        ConversationState::AwaitingPhoto {
            issue_type: IssueType::Pothole,
            priority: Priority::High,
        }
    );

    let response = h.send(photo(&alice, "gps-photo")).await;
    let confirmation = h.bot.last_text().unwrap();
    assert_eq!(response, HandlerResponse::Reply(confirmation.clone()));
    assert!(confirmation.starts_with("✅ Report submitted!"));
    assert!(confirmation.contains("ID: 1"));
    assert!(confirmation.contains("Type: Pothole"));
    assert!(confirmation.contains("Priority: High"));
    assert!(confirmation.contains("Location: 12.971600, 77.594600"));
    assert!(confirmation.contains("Status: Submitted"));
    assert_eq!(h.state(&alice), ConversationState::Idle);

    let report = h
        .store
        .find_by_id_and_user(1, "alice")
        .await
        .unwrap()
        .expect("report stored");
    assert_eq!(report.issue_type, IssueType::Pothole);
    assert_eq!(report.priority, Priority::High);
    assert!(report.image_file.ends_with("alice_gps-photo.jpg"));
    assert!(std::path::Path::new(&report.image_file).exists());

    let contents = std::fs::read_to_string(&reports_file).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].starts_with("1,alice,"));
    assert!(lines[1].ends_with(",Pothole,High,Submitted"));
}

/// **Test: Trash + photo without GPS asks for a location, then submits with the shared one.**
#[tokio::test]
async fn test_trash_without_gps_uses_shared_location() {
    let h = Harness::in_memory();
    let bob = user(2, "bob");
    h.bot.add_file("plain", photo_without_gps());

    h.send(text(&bob, "/report")).await;
    h.send(text(&bob, "Trash")).await;
    h.send(photo(&bob, "plain")).await;

    assert_eq!(h.bot.last_text().as_deref(), Some(replies::NO_GPS_SHARE_LOCATION));
    assert_eq!(
        h.bot.last_keyboard(),
        Some(ReplyKeyboard::RequestLocation("Send Location".to_string()))
    );
    assert!(matches!(
        h.state(&bob),
        ConversationState::AwaitingLocation {
            issue_type: IssueType::Trash,
            priority: Priority::Low,
            ..
        }
    ));

    h.send(location(&bob, 1.0, 2.0)).await;
    let confirmation = h.bot.last_text().unwrap();
    assert!(confirmation.contains("Type: Trash"));
    assert!(confirmation.contains("Priority: Low"));
    assert!(confirmation.contains("Location: 1.000000, 2.000000"));
    assert_eq!(h.state(&bob), ConversationState::Idle);

    let report = h.store.find_by_id_and_user(1, "bob").await.unwrap().unwrap();
    assert_eq!(report.latitude, Some(1.0));
    assert_eq!(report.longitude, Some(2.0));
}

/// **Test: A location with no report in progress gets the start-over message and changes nothing.**
#[tokio::test]
async fn test_location_without_report_is_rejected() {
    let h = Harness::in_memory();
    let carol = user(3, "carol");

    h.send(location(&carol, 10.0, 20.0)).await;
    assert_eq!(h.bot.last_text().as_deref(), Some(replies::NO_REPORT_IN_PROGRESS));
    assert_eq!(h.state(&carol), ConversationState::Idle);

    h.send(text(&carol, "/report")).await;
    h.send(location(&carol, 10.0, 20.0)).await;
    assert_eq!(h.bot.last_text().as_deref(), Some(replies::NO_REPORT_IN_PROGRESS));
    assert_eq!(h.state(&carol), ConversationState::AwaitingType);

    assert!(h.store.find_by_id_and_user(1, "carol").await.unwrap().is_none());
}

/// **Test: Free text while idle is ignored; nothing is sent.**
#[tokio::test]
async fn test_idle_text_is_ignored() {
    let h = Harness::in_memory();
    let dave = user(4, "dave");

    let response = h.send(text(&dave, "hello there")).await;

    assert_eq!(response, HandlerResponse::Continue);
    assert!(h.bot.sent().is_empty());
}

/// **Test: The flow handler reports messages it does not own as Ignore.**
#[tokio::test]
async fn test_flow_handler_ignores_foreign_messages() {
    let h = Harness::in_memory();
    let dave = user(4, "dave");

    assert_eq!(
        h.flow.handle(&text(&dave, "hello")).await.unwrap(),
        HandlerResponse::Ignore
    );
    assert_eq!(
        h.flow.handle(&text(&dave, "/my_status 1")).await.unwrap(),
        HandlerResponse::Ignore
    );
    assert!(h.bot.sent().is_empty());
}

/// **Test: Unknown commands are ignored.**
#[tokio::test]
async fn test_unknown_command_is_ignored() {
    let h = Harness::in_memory();
    let dave = user(4, "dave");

    let response = h.send(text(&dave, "/help")).await;

    assert_eq!(response, HandlerResponse::Continue);
    assert!(h.bot.sent().is_empty());
}

/// **Test: A type outside the keyboard re-prompts and stays in AwaitingType.**
#[tokio::test]
async fn test_unknown_type_reprompts() {
    let h = Harness::in_memory();
    let erin = user(5, "erin");

    h.send(text(&erin, "/report")).await;
    h.send(text(&erin, "Graffiti")).await;

    assert_eq!(h.bot.last_text().as_deref(), Some(replies::SELECT_TYPE_AGAIN));
    assert!(matches!(h.bot.last_keyboard(), Some(ReplyKeyboard::Options(_))));
    assert_eq!(h.state(&erin), ConversationState::AwaitingType);

    h.send(text(&erin, "streetlight")).await;
    assert_eq!(
        h.state(&erin),
        ConversationState::AwaitingPhoto {
            issue_type: IssueType::Streetlight,
            priority: Priority::Medium,
        }
    );
}

/// **Test: Text while a photo or location is expected gets a reminder.**
#[tokio::test]
async fn test_text_mid_flow_gets_reminder() {
    let h = Harness::in_memory();
    let erin = user(5, "erin");
    h.bot.add_file("plain", photo_without_gps());

    h.send(text(&erin, "/report")).await;
    h.send(text(&erin, "Other")).await;
    h.send(text(&erin, "it is on main street")).await;
    assert_eq!(h.bot.last_text().as_deref(), Some(replies::STILL_AWAITING_PHOTO));

    h.send(photo(&erin, "plain")).await;
    h.send(text(&erin, "near the bakery")).await;
    assert_eq!(h.bot.last_text().as_deref(), Some(replies::STILL_AWAITING_LOCATION));
    assert!(matches!(
        h.bot.last_keyboard(),
        Some(ReplyKeyboard::RequestLocation(_))
    ));
}

/// **Test: A photo while idle gets the start-over hint and downloads nothing.**
#[tokio::test]
async fn test_photo_while_idle_is_rejected() {
    let h = Harness::in_memory();
    let frank = user(6, "frank");

    h.send(photo(&frank, "never-registered")).await;

    assert_eq!(h.bot.last_text().as_deref(), Some(replies::NO_REPORT_IN_PROGRESS));
    assert_eq!(h.state(&frank), ConversationState::Idle);
}

/// **Test: A second photo while awaiting a location replaces the pending one.**
#[tokio::test]
async fn test_photo_in_awaiting_location_replaces_pending_photo() {
    let h = Harness::in_memory();
    let gina = user(7, "gina");
    h.bot.add_file("first", photo_without_gps());
    h.bot.add_file("second", photo_with_gps());

    h.send(text(&gina, "/report")).await;
    h.send(text(&gina, "Pothole")).await;
    h.send(photo(&gina, "first")).await;
    h.send(photo(&gina, "second")).await;

    let confirmation = h.bot.last_text().unwrap();
    assert!(confirmation.contains("Location: 12.971600, 77.594600"));
    let report = h.store.find_by_id_and_user(1, "gina").await.unwrap().unwrap();
    assert!(report.image_file.ends_with("gina_second.jpg"));
}

/// **Test: /report mid-flow starts over from AwaitingType.**
#[tokio::test]
async fn test_report_command_resets_flow() {
    let h = Harness::in_memory();
    let hal = user(8, "hal");

    h.send(text(&hal, "/report")).await;
    h.send(text(&hal, "Trash")).await;
    h.send(text(&hal, "/report@CivicWatchBot")).await;

    assert_eq!(h.state(&hal), ConversationState::AwaitingType);
    assert_eq!(h.bot.last_text().as_deref(), Some(replies::SELECT_TYPE));
}

/// **Test: Conversations of different users do not interfere.**
#[tokio::test]
async fn test_users_are_isolated() {
    let h = Harness::in_memory();
    let alice = user(1, "alice");
    let bob = user(2, "bob");

    h.send(text(&alice, "/report")).await;
    h.send(text(&bob, "/report")).await;
    h.send(text(&alice, "Pothole")).await;

    assert_eq!(h.state(&bob), ConversationState::AwaitingType);
    assert!(matches!(
        h.state(&alice),
        ConversationState::AwaitingPhoto { .. }
    ));
    assert_eq!(h.flow.sessions().active(), 2);
}

/// **Test: A failed download aborts the update and leaves the state unchanged.**
#[tokio::test]
async fn test_failed_download_keeps_state() {
    let h = Harness::in_memory();
    let ivy = user(9, "ivy");

    h.send(text(&ivy, "/report")).await;
    h.send(text(&ivy, "Pothole")).await;
    let result = h.chain.handle(&photo(&ivy, "missing")).await;

    assert!(result.is_err());
    assert!(matches!(
        h.state(&ivy),
        ConversationState::AwaitingPhoto { .. }
    ));
}

/// **Test: Two photos arriving together (an album) file exactly one report.**
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_photos_file_one_report() {
    let h = Harness::in_memory();
    let jo = user(10, "jo");
    h.bot.add_file("album-1", photo_with_gps());
    h.bot.add_file("album-2", photo_with_gps());

    h.send(text(&jo, "/report")).await;
    h.send(text(&jo, "Pothole")).await;

    let first = photo(&jo, "album-1");
    let second = photo(&jo, "album-2");
    let (a, b) = tokio::join!(h.chain.handle(&first), h.chain.handle(&second));
    a.unwrap();
    b.unwrap();

    assert!(h.store.find_by_id_and_user(1, "jo").await.unwrap().is_some());
    assert!(h.store.find_by_id_and_user(2, "jo").await.unwrap().is_none());
    assert_eq!(h.state(&jo), ConversationState::Idle);

    let texts: Vec<String> = h.bot.sent().into_iter().map(|r| r.text).collect();
    assert_eq!(
        texts.iter().filter(|t| t.starts_with("✅ Report submitted!")).count(),
        1
    );
    assert!(texts.iter().any(|t| t == replies::NO_REPORT_IN_PROGRESS));
}
