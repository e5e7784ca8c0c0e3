mod common;

use common::{five_task_plan_json, narrated_five_task_plan};
use maestro_core::{
    MemoryStore, PlanError, PlanManager, SessionStore, SqliteStore, PLAN_STATE_KEY,
};
use serde_json::Value;
use tempfile::TempDir;

const RAW_KEY: &str = "supervisor_plan_raw";

#[test]
fn test_complete_plan_workflow() {
    let mut store = MemoryStore::new();
    let mut manager = PlanManager::new(&mut store);

    let text = narrated_five_task_plan();
    let plan = manager
        .set_plan_from_text(&text)
        .expect("Failed to set plan");
    assert_eq!(plan.len(), 2);
    assert_eq!(plan[0].tasks.len(), 2);
    assert_eq!(plan[1].tasks.len(), 3);

    // The raw producer text is shadowed verbatim for audit.
    assert_eq!(
        store.get(RAW_KEY).expect("Failed to read raw key"),
        Some(Value::String(text))
    );

    let mut manager = PlanManager::new(&mut store);

    // Marking tasks 1 and 2 completes the first stage only.
    manager.mark_task_completed("1").expect("Failed to mark 1");
    manager.mark_task_completed("2").expect("Failed to mark 2");

    let plan = manager.load_plan().expect("Failed to load plan");
    assert!(plan[0].completed);
    assert!(!plan[1].completed);

    let summary = manager.summary().expect("Failed to summarize");
    assert_eq!(summary.total_tasks, 5);
    assert_eq!(summary.completed_tasks, 2);
    assert_eq!(summary.remaining_tasks, 3);
    assert_eq!(summary.total_stages, 2);
    assert_eq!(summary.completed_stages, 1);

    // Pending tasks come back in plan order, completed ones filtered out.
    let pending: Vec<String> = manager
        .pending_tasks()
        .expect("Failed to list pending tasks")
        .map(|task| task.execution_order)
        .collect();
    assert_eq!(pending, ["3", "4", "5"]);
}

#[test]
fn test_marking_is_idempotent() {
    let mut store = MemoryStore::new();
    let mut manager = PlanManager::new(&mut store);
    manager
        .set_plan_from_text(&five_task_plan_json())
        .expect("Failed to set plan");

    manager.mark_task_completed("3").expect("Failed to mark");
    let once = manager.load_plan().expect("load");
    manager.mark_task_completed("3").expect("Failed to re-mark");
    let twice = manager.load_plan().expect("load");

    assert_eq!(once, twice);
    assert_eq!(manager.summary().expect("summary").completed_tasks, 1);
}

#[test]
fn test_mark_normalizes_the_order_text() {
    let mut store = MemoryStore::new();
    let mut manager = PlanManager::new(&mut store);
    manager
        .set_plan_from_text(&five_task_plan_json())
        .expect("Failed to set plan");

    let task = manager
        .mark_task_completed("  2  ")
        .expect("Failed to mark with surrounding whitespace");
    assert_eq!(task.execution_order, "2");
    assert!(task.completed);
}

#[test]
fn test_mark_without_plan_is_an_error() {
    let mut store = MemoryStore::new();
    let mut manager = PlanManager::new(&mut store);

    let error = manager.mark_task_completed("1").expect_err("must fail");
    assert!(matches!(error, PlanError::PlanNotFound));
    assert_eq!(error.to_string(), "No plan found in session state.");
}

#[test]
fn test_mark_unknown_order_leaves_store_untouched() {
    let mut store = MemoryStore::new();
    let mut manager = PlanManager::new(&mut store);
    manager
        .set_plan_from_text(&five_task_plan_json())
        .expect("Failed to set plan");
    let before = store.get(PLAN_STATE_KEY).expect("read");

    let mut manager = PlanManager::new(&mut store);
    let error = manager.mark_task_completed("99").expect_err("must fail");
    assert!(matches!(error, PlanError::TaskNotFound { .. }));

    assert_eq!(store.get(PLAN_STATE_KEY).expect("read"), before);
}

#[test]
fn test_set_plan_replaces_previous_plan_entirely() {
    let mut store = MemoryStore::new();
    let mut manager = PlanManager::new(&mut store);
    manager
        .set_plan_from_text(&five_task_plan_json())
        .expect("Failed to set plan");
    manager.mark_task_completed("1").expect("Failed to mark");

    let replacement = r#"[{"tasks": [
        {"execution_order": "10", "task_description": "Nova rodada.", "agent_name": "supervisor_agent"}
    ]}]"#;
    manager
        .set_plan_from_text(replacement)
        .expect("Failed to replace plan");

    let summary = manager.summary().expect("summary");
    assert_eq!(summary.total_tasks, 1);
    assert_eq!(summary.completed_tasks, 0);
    assert_eq!(
        store.get(RAW_KEY).expect("read"),
        Some(Value::String(replacement.to_string()))
    );
}

#[test]
fn test_reset_removes_plan_and_raw_text() {
    let mut store = MemoryStore::new();
    let mut manager = PlanManager::new(&mut store);
    manager
        .set_plan_from_text(&five_task_plan_json())
        .expect("Failed to set plan");

    manager.reset_plan().expect("Failed to reset");
    assert!(manager.load_plan().expect("load").is_empty());
    assert!(store.get(PLAN_STATE_KEY).expect("read").is_none());
    assert!(store.get(RAW_KEY).expect("read").is_none());

    // Resetting an already-empty session is a no-op.
    let mut manager = PlanManager::new(&mut store);
    manager.reset_plan().expect("Failed to reset again");
}

#[test]
fn test_render_markdown_follows_the_fixed_layout() {
    let mut store = MemoryStore::new();
    let mut manager = PlanManager::new(&mut store);
    assert_eq!(
        manager.render_markdown().expect("render"),
        "Nenhum plano ativo. Acione o planner_agent primeiro."
    );

    manager
        .set_plan_from_text(&five_task_plan_json())
        .expect("Failed to set plan");
    manager.mark_task_completed("1").expect("mark");
    manager.mark_task_completed("2").expect("mark");

    let markdown = manager.render_markdown().expect("render");
    assert!(markdown.starts_with("## Plano de tarefas do supervisor"));
    assert!(markdown.contains("### Etapa 1 ✅"));
    assert!(markdown.contains("### Etapa 2 🕒"));
    assert!(markdown.contains("- ✅ (1) [supervisor_agent] Confirmar escopo com o solicitante."));
    assert!(markdown.contains("- ⬜ (5) [reporter_agent] Gerar relatório final consolidado."));
}

#[test]
fn test_custom_plan_key_derives_raw_key() {
    let mut store = MemoryStore::new();
    let mut manager = PlanManager::with_plan_key(&mut store, "review_plan");
    manager
        .set_plan_from_text(&five_task_plan_json())
        .expect("Failed to set plan");

    assert!(store.get("review_plan").expect("read").is_some());
    assert!(store.get("review_plan_raw").expect("read").is_some());
    assert!(store.get(PLAN_STATE_KEY).expect("read").is_none());
}

#[test]
fn test_plan_state_survives_store_reopen() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("state.db");

    {
        let mut store = SqliteStore::open(&path).expect("Failed to open store");
        let mut manager = PlanManager::new(&mut store);
        manager
            .set_plan_from_text(&five_task_plan_json())
            .expect("Failed to set plan");
        manager.mark_task_completed("1").expect("Failed to mark");
    }

    let mut store = SqliteStore::open(&path).expect("Failed to reopen store");
    let manager = PlanManager::new(&mut store);
    let summary = manager.summary().expect("summary");
    assert_eq!(summary.total_tasks, 5);
    assert_eq!(summary.completed_tasks, 1);
}
