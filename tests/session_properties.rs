//! Property tests driving the conversation engine with arbitrary input.

use proptest::prelude::*;
use std::sync::Arc;

use city_guide_bot::adapters::catalog::BuiltinCatalog;
use city_guide_bot::adapters::memory::{InMemoryFeedbackStore, InMemoryItemRepository};
use city_guide_bot::application::{
    ConversationEngine, EngineConfig, FeedbackCollector, InboundMessage,
};
use city_guide_bot::domain::foundation::{Timestamp, UserId};
use city_guide_bot::domain::place::{Category, Item};
use city_guide_bot::domain::session::{ConversationState, Session};

const PAGE_SIZE: u32 = 5;

fn engine(restaurants: usize) -> ConversationEngine {
    let items = InMemoryItemRepository::new()
        .with_items(
            Category::Restaurant,
            (0..restaurants).map(|n| Item::named(format!("R{}", n))).collect(),
        )
        .with_items(
            Category::Hotel,
            (0..7).map(|n| Item::named(format!("H{}", n))).collect(),
        );
    ConversationEngine::new(
        Arc::new(items),
        Arc::new(BuiltinCatalog::new()),
        FeedbackCollector::new(Arc::new(InMemoryFeedbackStore::new())),
        EngineConfig {
            page_size: PAGE_SIZE,
            idle_timeout: None,
        },
    )
}

fn message(text: &str, secs: i64) -> InboundMessage {
    InboundMessage::new(
        UserId::new("5567988887777").unwrap(),
        text,
        Timestamp::from_unix_secs(1_700_000_000 + secs),
    )
}

fn input_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (-2i64..10).prop_map(|n| n.to_string()),
        Just("oi".to_string()),
        Just("".to_string()),
        Just(" 6 ".to_string()),
    ]
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

fn assert_consistent(session: &Session) {
    match session.state() {
        ConversationState::AwaitingCategorySelection | ConversationState::AwaitingMoreItems => {
            assert!(session.last_category().is_some());
            assert_eq!(session.page_offset() % PAGE_SIZE, 0);
            let total = session.category_total();
            if total == 0 {
                assert_eq!(session.page_offset(), 0);
            } else {
                assert!((session.page_offset() as u64) < total);
            }
            assert!(session.cached_page().len() <= PAGE_SIZE as usize);
        }
        _ => {
            assert!(session.last_category().is_none());
            assert!(session.cached_page().is_empty());
        }
    }
    if session.is_collecting_feedback() {
        assert_eq!(session.state(), ConversationState::AwaitingMenuChoice);
    }
}

proptest! {
    #[test]
    fn arbitrary_input_keeps_session_consistent(
        restaurants in 0usize..23,
        inputs in proptest::collection::vec((input_strategy(), any::<bool>()), 1..40),
    ) {
        let engine = engine(restaurants);
        runtime().block_on(async {
            let mut session = Session::new(UserId::new("5567988887777").unwrap());
            for (secs, (text, deliver_menu)) in inputs.iter().enumerate() {
                let transition = engine.handle(&mut session, &message(text, secs as i64)).await;
                assert!(!transition.outbound.is_empty(), "no reply to {text:?}");
                assert_consistent(&session);

                if *deliver_menu {
                    engine.deliver_main_menu(&mut session).await.unwrap();
                    assert_consistent(&session);
                }
            }
        });
    }

    #[test]
    fn selection_resolves_to_item_at_offset_plus_index(
        restaurants in 1usize..23,
        forward in 0usize..5,
        pick in 1usize..=5,
    ) {
        let engine = engine(restaurants);
        runtime().block_on(async {
            let mut session = Session::new(UserId::new("5567988887777").unwrap());
            let mut secs = 0;
            let mut send = |text: &'static str| {
                secs += 1;
                message(text, secs)
            };
            engine.handle(&mut session, &send("oi")).await;
            engine.handle(&mut session, &send("2")).await;
            engine.deliver_main_menu(&mut session).await.unwrap();
            engine.handle(&mut session, &send("2")).await;
            for _ in 0..forward {
                engine.handle(&mut session, &send("6")).await;
            }

            let offset = session.page_offset() as usize;
            let shown = session.cached_page().len();
            assert_eq!(shown, (restaurants - offset).min(PAGE_SIZE as usize));
            let pick = pick.min(shown);
            let text: &'static str = ["1", "2", "3", "4", "5"][pick - 1];

            let transition = engine.handle(&mut session, &send(text)).await;

            let detail = transition.outbound[0].as_text().unwrap();
            let expected = format!("*R{}*", offset + pick - 1);
            assert!(detail.starts_with(&expected), "{detail} vs {expected}");
            assert_eq!(session.state(), ConversationState::AwaitingMoreItems);
        });
    }
}
