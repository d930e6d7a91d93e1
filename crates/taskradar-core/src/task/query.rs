//! Filtering, sorting and grouping over an in-memory task list.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::str::FromStr;

use super::Task;
use crate::error::ValidationError;
use crate::quadrant::Priority;

/// Column a task list is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    Title,
    #[default]
    Urgency,
    Importance,
    CreatedAt,
}

impl FromStr for SortField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(SortField::Title),
            "urgency" => Ok(SortField::Urgency),
            "importance" => Ok(SortField::Importance),
            "created" | "created-at" | "createdAt" => Ok(SortField::CreatedAt),
            other => Err(ValidationError::InvalidValue {
                field: "sort".into(),
                message: format!("unknown sort field '{other}'"),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Member filter, quadrant filter and ordering, applied in that order.
///
/// An empty member list means "everyone". A non-empty list keeps only tasks
/// assigned to one of the listed members, so unassigned tasks drop out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    pub members: Vec<String>,
    pub priority: Option<Priority>,
    pub sort: SortField,
    pub order: SortOrder,
}

impl TaskQuery {
    pub fn matches(&self, task: &Task) -> bool {
        let member_ok = self.members.is_empty()
            || task
                .assigned_to
                .as_ref()
                .is_some_and(|id| self.members.contains(id));
        let priority_ok = self.priority.map_or(true, |p| task.priority() == p);
        member_ok && priority_ok
    }

    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        let mut selected: Vec<&Task> = tasks.iter().filter(|t| self.matches(t)).collect();
        selected.sort_by(|a, b| {
            let ordering = compare(self.sort, a, b);
            match self.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
        selected
    }
}

fn compare(field: SortField, a: &Task, b: &Task) -> Ordering {
    match field {
        SortField::Title => a.title.cmp(&b.title),
        SortField::Urgency => a.urgency().cmp(&b.urgency()),
        SortField::Importance => a.importance().cmp(&b.importance()),
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
    }
}

/// Tasks bucketed by quadrant, in matrix display order. Empty quadrants are
/// kept so every quadrant can be rendered.
pub fn group_by_priority(tasks: &[Task]) -> Vec<(Priority, Vec<&Task>)> {
    Priority::ALL
        .into_iter()
        .map(|p| (p, tasks.iter().filter(|t| t.priority() == p).collect()))
        .collect()
}

/// Number of tasks assigned to each member id.
pub fn count_by_assignee(tasks: &[Task]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for id in tasks.iter().filter_map(|t| t.assigned_to.as_ref()) {
        *counts.entry(id.clone()).or_insert(0) += 1;
    }
    counts
}
