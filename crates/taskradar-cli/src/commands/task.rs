//! Task management commands for CLI.

use std::collections::BTreeMap;

use clap::Subcommand;
use serde::Serialize;
use taskradar_core::task::query::{count_by_assignee, group_by_priority};
use taskradar_core::task::{SortField, SortOrder};
use taskradar_core::{
    Config, KeywordClassifier, NewTask, Priority, Task, TaskQuery, TaskSource, TaskStore,
};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a new task and classify it
    Add {
        /// Task title
        title: String,
        /// Task description
        #[arg(long)]
        description: Option<String>,
        /// Where the task came from: slack, mail, jira or backlog
        #[arg(long)]
        source: Option<TaskSource>,
        /// Member ID to assign the task to
        #[arg(long)]
        assignee: Option<String>,
    },
    /// List tasks
    List {
        /// Filter by assignee (repeatable)
        #[arg(long = "member")]
        members: Vec<String>,
        /// Filter by quadrant (e.g. urgent-important)
        #[arg(long)]
        priority: Option<Priority>,
        /// Sort by title, urgency, importance or created
        #[arg(long, default_value = "urgency")]
        sort: SortField,
        /// Sort ascending instead of descending
        #[arg(long)]
        asc: bool,
    },
    /// Show tasks grouped into the four quadrants
    Matrix {
        /// Filter by assignee (repeatable)
        #[arg(long = "member")]
        members: Vec<String>,
    },
    /// Get task details
    Get {
        /// Task ID
        id: String,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },
}

/// One quadrant of the matrix view.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QuadrantView<'a> {
    priority: Priority,
    title: &'static str,
    action: &'static str,
    tasks: Vec<&'a Task>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MatrixOutput<'a> {
    quadrants: Vec<QuadrantView<'a>>,
    member_counts: BTreeMap<String, usize>,
}

pub async fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = TaskStore::open()?;

    match action {
        TaskAction::Add {
            title,
            description,
            source,
            assignee,
        } => {
            let config = Config::load()?;
            let mut new_task = NewTask::new(title)?;
            if let Some(description) = description {
                new_task = new_task.with_description(description);
            }
            if let Some(source) = source {
                new_task = new_task.with_source(source);
            }
            if let Some(assignee) = assignee {
                new_task = new_task.with_assignee(assignee);
            }

            let task = new_task
                .classify(&KeywordClassifier::new(), config.classifier.timeout())
                .await?;
            store.insert(&task)?;
            println!("Task created: {}", task.id);
            println!("{}", task.reasoning());
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::List {
            members,
            priority,
            sort,
            asc,
        } => {
            let tasks = store.list()?;
            let query = TaskQuery {
                members,
                priority,
                sort,
                order: if asc { SortOrder::Asc } else { SortOrder::Desc },
            };
            println!("{}", serde_json::to_string_pretty(&query.apply(&tasks))?);
        }
        TaskAction::Matrix { members } => {
            let tasks = store.list()?;
            let query = TaskQuery {
                members,
                ..Default::default()
            };
            let selected: Vec<Task> = query.apply(&tasks).into_iter().cloned().collect();
            let quadrants = group_by_priority(&selected)
                .into_iter()
                .map(|(priority, tasks)| QuadrantView {
                    priority,
                    title: priority.title(),
                    action: priority.action(),
                    tasks,
                })
                .collect();
            let output = MatrixOutput {
                quadrants,
                member_counts: count_by_assignee(&selected),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        TaskAction::Get { id } => match store.get(&id)? {
            Some(task) => println!("{}", serde_json::to_string_pretty(&task)?),
            None => return Err(format!("Task not found: {id}").into()),
        },
        TaskAction::Delete { id } => {
            if store.delete(&id)? {
                println!("Task deleted: {id}");
            } else {
                return Err(format!("Task not found: {id}").into());
            }
        }
    }
    Ok(())
}
