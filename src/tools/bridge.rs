//! The nine bridge operations and their registry.
//!
//! Each tool is a thin composition: declared schema + one backend call +
//! text formatting. Constraints live in the schemas; the registry runs the
//! generic validator before any handler executes, so a bad argument never
//! reaches the network.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{error, info};

use crate::backend::types::{
    CallCreate, CallStatus, ScheduledCall, Task, TaskCreate, TaskStatus, User, UserCreate, UserType,
};
use crate::backend::TaskApiClient;
use crate::error::{BridgeError, Result};
use crate::tools::arguments::ToolArguments;
use crate::tools::tool::{BridgeTool, Tool};
use crate::tools::types::ToolParameters;
use crate::tools::validation::{apply_defaults, validate_arguments};

const USER_TYPES: [&str; 3] = ["client", "prospect", "partner"];
const CALL_STATUSES: [&str; 4] = ["scheduled", "completed", "cancelled", "rescheduled"];
const TASK_STATUSES: [&str; 4] = ["todo", "in_progress", "done", "cancelled"];

// Field bounds mirror the backend's own request models.
const NAME_MAX: usize = 100;
const TITLE_MAX: usize = 200;
const NOTES_MAX: usize = 500;
const DESCRIPTION_MAX: usize = 1000;
const DURATION_MIN: i64 = 15;
const DURATION_MAX: i64 = 240;
const DURATION_DEFAULT: i64 = 30;

// ── User tools ─────────────────────────────────────────────────────────

/// `register_user` — create a user; `user_type` defaults to `client`.
pub fn register_user_tool(client: Arc<TaskApiClient>) -> Arc<dyn Tool> {
    Arc::new(BridgeTool::new(
        "register_user",
        "Register a new user (client, prospect, or partner) in the system. \
         Returns the created user with ID and timestamps.",
        ToolParameters::object()
            .string_bounded("name", "Full name of the user", NAME_MAX, true)
            .string("email", "Email address of the user", true)
            .string_bounded("company", "Company name", NAME_MAX, true)
            .string_enum("user_type", "Type of user", &USER_TYPES, Some("client"), false)
            .string_bounded("notes", "Optional notes about the user", NOTES_MAX, false)
            .build(),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let payload = UserCreate {
                    name: args.get_str("name")?.to_string(),
                    email: args.get_str("email")?.to_string(),
                    company: args.get_str("company")?.to_string(),
                    user_type: args.get_enum::<UserType>("user_type")?,
                    notes: args.get_str_opt("notes").map(str::to_string),
                };
                let user = client.create_user(&payload).await?;
                info!(user_id = %user.id, "user registered");
                Ok(format_user_created(&user))
            }
        },
    ))
}

/// `list_users` — list all registered users; no filters.
pub fn list_users_tool(client: Arc<TaskApiClient>) -> Arc<dyn Tool> {
    Arc::new(BridgeTool::new(
        "list_users",
        "List all registered users in the system.",
        ToolParameters::empty(),
        move |_args| {
            let client = Arc::clone(&client);
            async move {
                let users = client.list_users().await?;
                Ok(format_user_list(&users))
            }
        },
    ))
}

/// `get_user` — look up one user by id; a 404 surfaces as not-found.
pub fn get_user_tool(client: Arc<TaskApiClient>) -> Arc<dyn Tool> {
    Arc::new(BridgeTool::new(
        "get_user",
        "Get details of a specific user by their ID.",
        ToolParameters::object()
            .string("user_id", "The unique ID of the user", true)
            .build(),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let user = client.get_user(args.get_str("user_id")?).await?;
                Ok(format_user_details(&user))
            }
        },
    ))
}

// ── Call tools ─────────────────────────────────────────────────────────

/// `schedule_call` — schedule a call with a registered user.
pub fn schedule_call_tool(client: Arc<TaskApiClient>) -> Arc<dyn Tool> {
    Arc::new(BridgeTool::new(
        "schedule_call",
        "Schedule a call with a registered user. Requires a valid user_id \
         from an existing user.",
        ToolParameters::object()
            .string("user_id", "ID of the user to schedule the call with", true)
            .string_bounded("title", "Title or purpose of the call", TITLE_MAX, true)
            .string("scheduled_for", "Date and time for the call (ISO 8601 format)", true)
            .integer_bounded(
                "duration_minutes",
                "Duration of the call in minutes",
                DURATION_MIN,
                DURATION_MAX,
                Some(DURATION_DEFAULT),
                false,
            )
            .string_bounded("notes", "Optional notes for the call", NOTES_MAX, false)
            .build(),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let payload = CallCreate {
                    user_id: args.get_str("user_id")?.to_string(),
                    title: args.get_str("title")?.to_string(),
                    scheduled_for: args.get_str("scheduled_for")?.to_string(),
                    duration_minutes: args.get_i64("duration_minutes")? as u32,
                    notes: args.get_str_opt("notes").map(str::to_string),
                };
                let call = client.create_call(&payload).await?;
                info!(call_id = %call.id, user_id = %call.user_id, "call scheduled");
                Ok(format_call_created(&call))
            }
        },
    ))
}

/// `list_calls` — list calls; `user_id` and `status` filters are optional
/// and independently applicable.
pub fn list_calls_tool(client: Arc<TaskApiClient>) -> Arc<dyn Tool> {
    Arc::new(BridgeTool::new(
        "list_calls",
        "List scheduled calls, optionally filtered by user or status.",
        ToolParameters::object()
            .string("user_id", "Optional: Filter calls by user ID", false)
            .string_enum("status", "Optional: Filter calls by status", &CALL_STATUSES, None, false)
            .build(),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let status = args.get_enum_opt::<CallStatus>("status")?;
                let calls = client.list_calls(args.get_str_opt("user_id"), status).await?;
                Ok(format_call_list(&calls))
            }
        },
    ))
}

/// `update_call_status` — transition a call to a new status.
pub fn update_call_status_tool(client: Arc<TaskApiClient>) -> Arc<dyn Tool> {
    Arc::new(BridgeTool::new(
        "update_call_status",
        "Update the status of a scheduled call. Use this to mark calls as \
         completed, cancelled, or rescheduled.",
        ToolParameters::object()
            .string("call_id", "ID of the call to update", true)
            .string_enum("status", "New status for the call", &CALL_STATUSES, None, true)
            .build(),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let status = args.get_enum::<CallStatus>("status")?;
                let call = client
                    .update_call_status(args.get_str("call_id")?, status)
                    .await?;
                info!(call_id = %call.id, status = %call.status, "call status updated");
                Ok(format!(
                    "Call status updated to '{}' for call: {}",
                    call.status, call.title
                ))
            }
        },
    ))
}

// ── Task tools ─────────────────────────────────────────────────────────

/// `create_task` — create a task, optionally associated with a user.
pub fn create_task_tool(client: Arc<TaskApiClient>) -> Arc<dyn Tool> {
    Arc::new(BridgeTool::new(
        "create_task",
        "Create a new task. Tasks can be general or associated with a \
         specific user.",
        ToolParameters::object()
            .string_bounded("title", "Title of the task", TITLE_MAX, true)
            .string_bounded(
                "description",
                "Optional detailed description of the task",
                DESCRIPTION_MAX,
                false,
            )
            .string("user_id", "Optional: ID of user this task is related to", false)
            .string("due_date", "Optional: Due date for the task (ISO 8601 format)", false)
            .build(),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let payload = TaskCreate {
                    title: args.get_str("title")?.to_string(),
                    description: args.get_str_opt("description").map(str::to_string),
                    user_id: args.get_str_opt("user_id").map(str::to_string),
                    due_date: args.get_str_opt("due_date").map(str::to_string),
                };
                let task = client.create_task(&payload).await?;
                info!(task_id = %task.id, "task created");
                Ok(format_task_created(&task))
            }
        },
    ))
}

/// `list_tasks` — list tasks; filters optional.
pub fn list_tasks_tool(client: Arc<TaskApiClient>) -> Arc<dyn Tool> {
    Arc::new(BridgeTool::new(
        "list_tasks",
        "List all tasks, optionally filtered by user or status.",
        ToolParameters::object()
            .string("user_id", "Optional: Filter tasks by user ID", false)
            .string_enum("status", "Optional: Filter tasks by status", &TASK_STATUSES, None, false)
            .build(),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let status = args.get_enum_opt::<TaskStatus>("status")?;
                let tasks = client.list_tasks(args.get_str_opt("user_id"), status).await?;
                Ok(format_task_list(&tasks))
            }
        },
    ))
}

/// `update_task_status` — transition a task to a new status.
pub fn update_task_status_tool(client: Arc<TaskApiClient>) -> Arc<dyn Tool> {
    Arc::new(BridgeTool::new(
        "update_task_status",
        "Update the status of a task. Use this to mark tasks as in \
         progress, done, or cancelled.",
        ToolParameters::object()
            .string("task_id", "ID of the task to update", true)
            .string_enum("status", "New status for the task", &TASK_STATUSES, None, true)
            .build(),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let status = args.get_enum::<TaskStatus>("status")?;
                let task = client
                    .update_task_status(args.get_str("task_id")?, status)
                    .await?;
                info!(task_id = %task.id, status = %task.status, "task status updated");
                Ok(format!(
                    "Task status updated to '{}' for task: {}",
                    task.status, task.title
                ))
            }
        },
    ))
}

/// All nine bridge tools over one shared backend client.
pub fn all_tools(client: Arc<TaskApiClient>) -> Vec<Arc<dyn Tool>> {
    vec![
        register_user_tool(Arc::clone(&client)),
        list_users_tool(Arc::clone(&client)),
        get_user_tool(Arc::clone(&client)),
        schedule_call_tool(Arc::clone(&client)),
        list_calls_tool(Arc::clone(&client)),
        update_call_status_tool(Arc::clone(&client)),
        create_task_tool(Arc::clone(&client)),
        list_tasks_tool(Arc::clone(&client)),
        update_task_status_tool(client),
    ]
}

// ── Registry ───────────────────────────────────────────────────────────

/// Registry of named operations: validation, dispatch, and the split
/// between the caller-safe channel and the operator log.
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    by_name: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new(tools: Vec<Arc<dyn Tool>>) -> Self {
        let by_name = tools
            .iter()
            .enumerate()
            .map(|(i, tool)| (tool.name().to_string(), i))
            .collect();
        Self { tools, by_name }
    }

    /// Registry over the nine standard bridge tools.
    pub fn bridge(client: Arc<TaskApiClient>) -> Self {
        Self::new(all_tools(client))
    }

    pub fn tools(&self) -> &[Arc<dyn Tool>] {
        &self.tools
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.by_name.get(name).map(|&i| &self.tools[i])
    }

    /// Invoke a tool: fill defaults, validate against the declared schema,
    /// then execute. Validation failures return before any network call.
    ///
    /// Full error detail is logged here; the caller-facing message is
    /// obtained separately via [`BridgeError::caller_message`].
    pub async fn dispatch(&self, name: &str, mut args: serde_json::Value) -> Result<String> {
        let tool = self
            .get(name)
            .ok_or_else(|| BridgeError::UnknownTool(name.to_string()))?;

        let schema = &tool.parameters().schema;
        apply_defaults(&mut args, schema);
        if let Err(err) = validate_arguments(&args, schema) {
            error!(tool = name, error = %err, "argument validation failed");
            return Err(err);
        }

        match tool.execute(&ToolArguments::new(args)).await {
            Ok(text) => Ok(text),
            Err(err) => {
                error!(tool = name, error = %err, detail = ?err, "tool invocation failed");
                Err(err)
            }
        }
    }
}

// ── Formatting ─────────────────────────────────────────────────────────
//
// Text shapes follow the backend demo client's expectations: key fields of
// the affected record, never raw structures.

fn format_user_created(user: &User) -> String {
    format!(
        "User registered successfully!\n\n\
         ID: {}\nName: {}\nEmail: {}\nCompany: {}\nType: {}",
        user.id, user.name, user.email, user.company, user.user_type
    )
}

fn format_user_details(user: &User) -> String {
    format!(
        "User Details:\n\n\
         Name: {}\nEmail: {}\nCompany: {}\nType: {}\nID: {}\nCreated: {}",
        user.name, user.email, user.company, user.user_type, user.id, user.created_at
    )
}

fn format_user_list(users: &[User]) -> String {
    if users.is_empty() {
        return "No users found in the system.".to_string();
    }
    let mut text = format!("Found {} user(s):\n\n", users.len());
    for user in users {
        text.push_str(&format!(
            "- {} ({}) - {}\n  ID: {}, Type: {}\n",
            user.name, user.company, user.email, user.id, user.user_type
        ));
    }
    text
}

fn format_call_created(call: &ScheduledCall) -> String {
    format!(
        "Call scheduled successfully!\n\n\
         ID: {}\nTitle: {}\nScheduled for: {}\nDuration: {} minutes\nUser ID: {}",
        call.id, call.title, call.scheduled_for, call.duration_minutes, call.user_id
    )
}

fn format_call_list(calls: &[ScheduledCall]) -> String {
    if calls.is_empty() {
        return "No calls found.".to_string();
    }
    let mut text = format!("Found {} call(s):\n\n", calls.len());
    for call in calls {
        text.push_str(&format!(
            "- {} - {}\n  ID: {}, Status: {}, Duration: {}min\n",
            call.title, call.scheduled_for, call.id, call.status, call.duration_minutes
        ));
    }
    text
}

fn format_task_created(task: &Task) -> String {
    let mut text = format!(
        "Task created successfully!\n\n\
         ID: {}\nTitle: {}\nStatus: {}\n",
        task.id, task.title, task.status
    );
    if let Some(user_id) = &task.user_id {
        text.push_str(&format!("User ID: {user_id}\n"));
    }
    text
}

fn format_task_list(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No tasks found.".to_string();
    }
    let mut text = format!("Found {} task(s):\n\n", tasks.len());
    for task in tasks {
        text.push_str(&format!("- {} - Status: {}\n  ID: {}\n", task.title, task.status, task.id));
        if let Some(description) = &task.description {
            text.push_str(&format!("  Description: {description}\n"));
        }
    }
    text
}
