use serde_json::json;

/// Five-task, two-stage plan mirroring a typical supervisor session:
/// scope confirmation and data collection first, analyses and the final
/// report in the second stage.
pub fn five_task_plan_json() -> String {
    json!([
        {
            "tasks": [
                {
                    "execution_order": 1,
                    "task_description": "Confirmar escopo com o solicitante.",
                    "agent_name": "supervisor_agent",
                    "task_completed": false,
                },
                {
                    "execution_order": 2,
                    "task_description": "Coletar métricas de NPS dos últimos 12 meses.",
                    "agent_name": "data_collector_agent",
                    "task_completed": false,
                },
            ],
            "completed": false,
        },
        {
            "tasks": [
                {
                    "execution_order": 3,
                    "task_description": "Calcular tendências trimestrais.",
                    "agent_name": "quanti_analyst_agent",
                    "task_completed": false,
                },
                {
                    "execution_order": 4,
                    "task_description": "Identificar temas qualitativos recorrentes.",
                    "agent_name": "quali_analyst_agent",
                    "task_completed": false,
                },
                {
                    "execution_order": 5,
                    "task_description": "Gerar relatório final consolidado.",
                    "agent_name": "reporter_agent",
                    "task_completed": false,
                },
            ],
            "completed": false,
        },
    ])
    .to_string()
}

/// The same plan as the producer would emit it: narrated before and after
/// the JSON payload.
pub fn narrated_five_task_plan() -> String {
    format!(
        "Plano final preparado pelo planner_agent:\n{}\nQualquer ajuste, me avise.",
        five_task_plan_json()
    )
}

/// Plan used by the readiness gate scenarios: three administrative tasks for
/// the supervisor, one collection task, one reporting task.
pub fn gated_plan_json() -> String {
    json!([
        {
            "tasks": [
                {"execution_order": "1", "task_description": "Confirmar escopo.", "agent_name": "supervisor_agent"},
                {"execution_order": "2", "task_description": "Registrar requisitos.", "agent_name": "supervisor_agent"},
                {"execution_order": "3", "task_description": "Aprovar orçamento.", "agent_name": "supervisor_agent"},
            ],
        },
        {
            "tasks": [
                {"execution_order": "4", "task_description": "Coletar métricas.", "agent_name": "data_collector_agent"},
                {"execution_order": "5", "task_description": "Gerar relatório.", "agent_name": "reporter_agent"},
            ],
        },
    ])
    .to_string()
}
