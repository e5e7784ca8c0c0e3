//! Fixed markdown rendering of a plan.
//!
//! The rendering is part of the external contract: headings, glyphs and the
//! no-plan sentence are shown to end users verbatim and must not drift.

use std::fmt;

use crate::models::Stage;

/// Glyph for a completed stage or task.
pub const GLYPH_DONE: &str = "✅";
/// Glyph for a stage still in progress.
pub const GLYPH_PENDING_STAGE: &str = "🕒";
/// Glyph for a task not yet completed.
pub const GLYPH_PENDING_TASK: &str = "⬜";

/// Sentence returned when no plan is stored.
pub const NO_PLAN_SENTENCE: &str = "Nenhum plano ativo. Acione o planner_agent primeiro.";

/// Newtype wrapper rendering a plan as the fixed markdown document.
///
/// # Examples
///
/// ```rust
/// use maestro_core::{display::PlanMarkdown, models::{Stage, Task}};
///
/// let stages = vec![Stage::new(vec![
///     Task::new("1", "Confirmar escopo", "supervisor_agent", true)?,
/// ])];
///
/// let rendered = PlanMarkdown(&stages).to_string();
/// assert!(rendered.contains("## Plano de tarefas do supervisor"));
/// assert!(rendered.contains("### Etapa 1 ✅"));
/// assert!(rendered.contains("- ✅ (1) [supervisor_agent] Confirmar escopo"));
/// # Ok::<(), maestro_core::PlanError>(())
/// ```
pub struct PlanMarkdown<'a>(pub &'a [Stage]);

impl fmt::Display for PlanMarkdown<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "{NO_PLAN_SENTENCE}");
        }

        write!(f, "## Plano de tarefas do supervisor")?;
        for (index, stage) in self.0.iter().enumerate() {
            let status = if stage.completed {
                GLYPH_DONE
            } else {
                GLYPH_PENDING_STAGE
            };
            write!(f, "\n### Etapa {} {status}", index + 1)?;
            for task in &stage.tasks {
                let task_status = if task.completed {
                    GLYPH_DONE
                } else {
                    GLYPH_PENDING_TASK
                };
                write!(
                    f,
                    "\n- {task_status} ({}) [{}] {}",
                    task.execution_order, task.agent_name, task.description
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Task;

    fn task(order: &str, agent: &str, completed: bool) -> Task {
        Task::new(order, format!("Tarefa {order}"), agent, completed).expect("valid task")
    }

    #[test]
    fn renders_no_plan_sentence_for_empty_plan() {
        assert_eq!(PlanMarkdown(&[]).to_string(), NO_PLAN_SENTENCE);
    }

    #[test]
    fn renders_stages_and_tasks_in_plan_order() {
        let stages = vec![
            Stage::new(vec![
                task("1", "supervisor_agent", true),
                task("2", "data_collector_agent", true),
            ]),
            Stage::new(vec![task("3", "quanti_analyst_agent", false)]),
        ];

        let rendered = PlanMarkdown(&stages).to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "## Plano de tarefas do supervisor");
        assert_eq!(lines[1], "### Etapa 1 ✅");
        assert_eq!(lines[2], "- ✅ (1) [supervisor_agent] Tarefa 1");
        assert_eq!(lines[3], "- ✅ (2) [data_collector_agent] Tarefa 2");
        assert_eq!(lines[4], "### Etapa 2 🕒");
        assert_eq!(lines[5], "- ⬜ (3) [quanti_analyst_agent] Tarefa 3");
    }
}
