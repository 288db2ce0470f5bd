use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;

use super::{FakeRasterizer, FakeRecognizer, test_state};
use crate::controller::AppController;

#[tokio::test]
async fn test_shutdown_stops_all_tasks() {
    let state = test_state(
        Arc::new(FakeRasterizer::default()),
        Arc::new(FakeRecognizer::default()),
    );
    let controller = AppController::new(Arc::new(state));
    let mut tasks = controller.spawn_tasks();
    assert_eq!(tasks.len(), 2, "hotkey watcher disabled in tests");

    controller.shutdown();

    let drained = timeout(Duration::from_secs(1), async {
        while let Some(result) = tasks.join_next().await {
            result.unwrap().unwrap();
        }
    })
    .await;
    assert!(drained.is_ok(), "tasks did not stop after shutdown");
}
