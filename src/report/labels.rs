//! Outcome labels and the icons they are displayed with.

/// Icon shown in place of the `total` icon when the total grew.
pub const CELEBRATION_ICON: &str = "🎉";

/// Outcome labels with a fixed icon, plus a catch-all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Label {
    Percentage,
    Total,
    Passed,
    Failed,
    Skipped,
    MetadataError,
    HarnessError,
    TimeoutError,
    ProcessError,
    RunnerException,
    TodoError,
    Other(String),
}

impl Label {
    /// Every label with a known icon, in legend order.
    pub const KNOWN: [Label; 11] = [
        Label::Percentage,
        Label::Total,
        Label::Passed,
        Label::Failed,
        Label::Skipped,
        Label::MetadataError,
        Label::HarnessError,
        Label::TimeoutError,
        Label::ProcessError,
        Label::RunnerException,
        Label::TodoError,
    ];

    pub fn parse(label: &str) -> Self {
        match label {
            "percentage" => Label::Percentage,
            "total" => Label::Total,
            "passed" => Label::Passed,
            "failed" => Label::Failed,
            "skipped" => Label::Skipped,
            "metadata_error" => Label::MetadataError,
            "harness_error" => Label::HarnessError,
            "timeout_error" => Label::TimeoutError,
            "process_error" => Label::ProcessError,
            "runner_exception" => Label::RunnerException,
            "todo_error" => Label::TodoError,
            other => Label::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Label::Percentage => "percentage",
            Label::Total => "total",
            Label::Passed => "passed",
            Label::Failed => "failed",
            Label::Skipped => "skipped",
            Label::MetadataError => "metadata_error",
            Label::HarnessError => "harness_error",
            Label::TimeoutError => "timeout_error",
            Label::ProcessError => "process_error",
            Label::RunnerException => "runner_exception",
            Label::TodoError => "todo_error",
            Label::Other(label) => label.as_str(),
        }
    }

    /// Display icon. Unrecognized labels are their own icon.
    pub fn icon<'a>(&'a self, icons: &'a Icons) -> &'a str {
        match self {
            Label::Percentage => "✅",
            Label::Total => "🧪",
            Label::Passed => "✔️",
            Label::Failed => "❌",
            Label::Skipped => "⚠️",
            Label::MetadataError => "📄",
            Label::HarnessError => "⚙️",
            Label::TimeoutError => "💀",
            Label::ProcessError => "💥",
            Label::RunnerException => "🐍",
            Label::TodoError => icons.todo_error.as_str(),
            Label::Other(label) => label.as_str(),
        }
    }
}

/// Icons that are looked up on the chat platform before rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icons {
    pub todo_error: String,
}

impl Icons {
    pub fn new(todo_error: impl Into<String>) -> Self {
        Self {
            todo_error: todo_error.into(),
        }
    }
}

/// One `<icon> <label>` line per known label.
pub fn legend(icons: &Icons) -> Vec<String> {
    Label::KNOWN
        .iter()
        .map(|label| format!("{} {}", label.icon(icons), label.as_str()))
        .collect()
}
