//! Project extraction — bulleted `Title: description` lines.

use crate::extract::{strip_bullet, strip_invisible};
use crate::models::Project;

pub fn extract_projects(lines: &[&str]) -> Vec<Project> {
    let mut projects = Vec::new();

    for line in lines {
        let line = strip_invisible(line);
        let Some(content) = strip_bullet(&line) else {
            continue;
        };
        if content.is_empty() {
            continue;
        }
        match content.split_once(':') {
            Some((title, description)) => projects.push(Project {
                title: title.trim().to_string(),
                description: description.trim().to_string(),
            }),
            None => projects.push(Project {
                title: content,
                description: String::new(),
            }),
        }
    }

    projects
}
