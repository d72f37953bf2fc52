//! Built-in demo tree shown when no seed file is given.

use super::task::{Task, TaskStatus};

fn task(
    id: &str,
    title: &str,
    status: TaskStatus,
    tags: &[&str],
    assignee: Option<&str>,
    start_date: Option<&str>,
    due_date: Option<&str>,
) -> Task {
    let mut t = Task::new(id, title);
    t.status = status;
    t.tags = tags.iter().map(|s| s.to_string()).collect();
    t.assignee = assignee.map(str::to_string);
    t.start_date = start_date.map(str::to_string);
    t.due_date = due_date.map(str::to_string);
    t
}

/// The "Mobile Website" project used by the demo and the tests
pub fn demo_tasks() -> Vec<Task> {
    use TaskStatus::*;

    let mut social = task(
        "1-1",
        "Social Media",
        Started,
        &["Content"],
        Some("Lindsey Bluthe"),
        Some("Jan 1, 2015"),
        None,
    );
    social.sub_count = Some(3);
    social.sub_tasks = vec![
        task(
            "1-1-1",
            "Write 3 posts",
            Completed,
            &["Content"],
            Some("Maggie Sheldon"),
            Some("Jan 4, 2015"),
            Some("Jan 1, 2015"),
        ),
        task(
            "1-1-2",
            "Review & edits",
            Completed,
            &["Content"],
            Some("Shire Henderson"),
            Some("Jan 10, 2015"),
            Some("Jan 1, 2015"),
        ),
        task(
            "1-1-3",
            "Design Graphics",
            Started,
            &["Design"],
            Some("Shire Henderson"),
            Some("Jan 11, 2015"),
            Some("Jan 1, 2015"),
        ),
    ];

    let mut landing = task(
        "1-2",
        "Landing Page",
        Started,
        &["Development"],
        Some("Maggie Sheldon"),
        Some("Jan 2, 2015"),
        Some("Jan 15, 2015"),
    );
    landing.sub_count = Some(3);

    let mut webinar = task(
        "1-3",
        "Webinar",
        Started,
        &["Asset"],
        Some("Grahm Lockheed"),
        Some("Jan 17, 2015"),
        Some("Jan 16, 2015"),
    );
    webinar.sub_count = Some(3);
    webinar.sub_tasks = vec![
        task(
            "1-3-1",
            "Script Development",
            Completed,
            &["Content"],
            Some("Maggie Sheldon"),
            None,
            Some("Jan 10, 2015"),
        ),
        task(
            "1-3-2",
            "Create Video",
            Started,
            &[],
            Some("Lindsey Bluthe"),
            None,
            Some("Jan 16, 2015"),
        ),
    ];

    let mut blog = task("1", "Blog", NotStarted, &["Content"], None, None, None);
    blog.sub_count = Some(3);
    blog.sub_tasks = vec![social, landing, webinar];

    vec![blog]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn demo_ids_are_unique() {
        fn collect<'a>(tasks: &'a [Task], ids: &mut Vec<&'a str>) {
            for t in tasks {
                ids.push(&t.id);
                collect(&t.sub_tasks, ids);
            }
        }
        let tasks = demo_tasks();
        let mut ids = Vec::new();
        collect(&tasks, &mut ids);
        let unique: HashSet<&str> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn demo_shape() {
        let tasks = demo_tasks();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Blog");
        let children: Vec<&str> = tasks[0].sub_tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(children, vec!["Social Media", "Landing Page", "Webinar"]);
        assert!(!tasks[0].sub_tasks[1].has_children());
        assert!(tasks[0].sub_tasks[2].sub_tasks[1].tags.is_empty());
    }
}
