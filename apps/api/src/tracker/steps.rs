use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildStep {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub artifact_required: bool,
}

pub const STEPS: [BuildStep; 8] = [
    BuildStep {
        id: "01-problem",
        title: "Problem Statement",
        description: "Define the problem you are solving",
        artifact_required: true,
    },
    BuildStep {
        id: "02-market",
        title: "Market Research",
        description: "Research the market and competition",
        artifact_required: true,
    },
    BuildStep {
        id: "03-architecture",
        title: "System Architecture",
        description: "Design the system architecture",
        artifact_required: true,
    },
    BuildStep {
        id: "04-hld",
        title: "High Level Design",
        description: "Create high level design documentation",
        artifact_required: true,
    },
    BuildStep {
        id: "05-lld",
        title: "Low Level Design",
        description: "Create low level design documentation",
        artifact_required: true,
    },
    BuildStep {
        id: "06-build",
        title: "Build Phase",
        description: "Implementation of the solution",
        artifact_required: true,
    },
    BuildStep {
        id: "07-test",
        title: "Testing",
        description: "Test the implementation",
        artifact_required: true,
    },
    BuildStep {
        id: "08-ship",
        title: "Deployment",
        description: "Deploy and ship the product",
        artifact_required: true,
    },
];

/// 1-based position of `step_id`, or 0 when it is not a known step.
pub fn step_number(step_id: &str) -> usize {
    STEPS
        .iter()
        .position(|s| s.id == step_id)
        .map_or(0, |i| i + 1)
}

pub fn step_by_id(step_id: &str) -> Option<&'static BuildStep> {
    STEPS.iter().find(|s| s.id == step_id)
}

/// The step before `step_id`, if any.
pub fn previous_step(step_id: &str) -> Option<&'static BuildStep> {
    match step_number(step_id) {
        0 | 1 => None,
        n => STEPS.get(n - 2),
    }
}

pub fn artifact_key(step_id: &str) -> String {
    format!("rb_{step_id}_artifact")
}
