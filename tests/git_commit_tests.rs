//! Git history of the data file

use git2::Repository;
use tempfile::TempDir;
use todo_mcp::TodoServerHandler;

fn setup_test_repo() -> (TempDir, Repository) {
    let temp_dir = TempDir::new().unwrap();
    let repo = Repository::init(temp_dir.path()).unwrap();

    let mut config = repo.config().unwrap();
    config.set_str("user.name", "Test User").unwrap();
    config.set_str("user.email", "test@example.com").unwrap();

    (temp_dir, repo)
}

fn head_message(repo: &Repository) -> String {
    let head = repo.head().unwrap();
    let commit = repo.find_commit(head.target().unwrap()).unwrap();
    commit.message().unwrap().to_string()
}

fn commit_count(repo: &Repository) -> usize {
    let mut revwalk = repo.revwalk().unwrap();
    revwalk.push_head().unwrap();
    revwalk.count()
}

#[tokio::test]
async fn test_each_save_is_committed() {
    let (temp_dir, repo) = setup_test_repo();
    let handler = TodoServerHandler::new(temp_dir.path().join("tasks.toml"), true);

    handler
        .handle_add("Pay rent".to_string(), "High".to_string(), None)
        .await
        .unwrap();
    assert_eq!(head_message(&repo), "Add task #1");

    handler.handle_done("#1".to_string()).await.unwrap();
    assert_eq!(head_message(&repo), "Complete task #1");
    assert_eq!(commit_count(&repo), 2);
}

#[tokio::test]
async fn test_no_op_save_adds_no_commit() {
    let (temp_dir, repo) = setup_test_repo();
    let handler = TodoServerHandler::new(temp_dir.path().join("tasks.toml"), true);

    handler
        .handle_add("Only".to_string(), "Low".to_string(), None)
        .await
        .unwrap();
    handler.handle_sort_by_priority().await.unwrap();

    assert_eq!(commit_count(&repo), 1);
    assert_eq!(head_message(&repo), "Add task #1");
}

#[tokio::test]
async fn test_commits_disabled_by_default() {
    let (temp_dir, repo) = setup_test_repo();
    let handler = TodoServerHandler::new(temp_dir.path().join("tasks.toml"), false);

    handler
        .handle_add("Pay rent".to_string(), "High".to_string(), None)
        .await
        .unwrap();
    assert!(repo.head().is_err());
}

#[tokio::test]
async fn test_outside_repository_still_saves() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("tasks.toml");
    let handler = TodoServerHandler::new(&path, true);

    handler
        .handle_add("Pay rent".to_string(), "High".to_string(), None)
        .await
        .unwrap();
    assert!(path.exists());
}

#[tokio::test]
async fn test_failed_commit_still_saves() {
    let (temp_dir, repo) = setup_test_repo();
    let path = temp_dir.path().join("tasks.toml");
    let handler = TodoServerHandler::new(&path, true);

    // Another git process holding the index lock
    let lock = temp_dir.path().join(".git").join("index.lock");
    std::fs::write(&lock, "").unwrap();

    let response = handler
        .handle_add("Pay rent".to_string(), "High".to_string(), None)
        .await;
    assert!(response.is_ok());
    assert!(std::fs::read_to_string(&path).unwrap().contains("Pay rent"));
    assert!(repo.head().is_err());

    // Once the lock is gone the next save is committed again
    std::fs::remove_file(&lock).unwrap();
    handler.handle_done("#1".to_string()).await.unwrap();
    assert_eq!(head_message(&repo), "Complete task #1");
    assert_eq!(commit_count(&repo), 1);
}
