//! Prompt construction for the two plan requests.
//!
//! Prompts are deterministic: the same inputs always render the same text.

use std::collections::BTreeMap;
use std::fmt::Write;

/// Render a bullet list, or `empty` when there is nothing to list.
fn bullets(items: &[String], empty: &str) -> String {
    if items.is_empty() {
        return format!("- {empty}");
    }
    items
        .iter()
        .map(|item| format!("- {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prompt asking for search keywords and overlooked files.
pub fn keyword_prompt(task: &str, selected_files: &[String], all_files: &[String]) -> String {
    format!(
        r#"You are a coding assistant that analyzes software projects before an implementation plan is written.

## Task
The user wants to achieve the following in their project:
- "{task}"

## Selected Files
The user marked these files as relevant:
{selected}

## Project Structure
Every file in the project:
{structure}

## Rules
- "keywords" entries MUST each be a single word with no spaces.
- "missing_files" entries MUST be copied exactly from the Project Structure above.
- Never invent file names. A file that is not in the Project Structure cannot appear in "missing_files".
- Do not repeat files that are already selected.

## Objective
1. Suggest keywords: identifiers, function names, class names, or API calls worth searching for in the project's source.
2. Find missing files: files from the Project Structure that were not selected but probably hold information needed for the task.

## Response Format
Reply with a single JSON object and nothing else:
{{
  "keywords": ["SingleWord", "..."],
  "missing_files": ["path/from/project/structure", "..."]
}}"#,
        selected = bullets(selected_files, "No files selected."),
        structure = bullets(all_files, "No project structure provided."),
    )
}

/// Prompt asking for the implementation plan itself.
pub fn plan_prompt(
    task: &str,
    file_contents: &BTreeMap<String, String>,
    all_files: &[String],
) -> String {
    let provided = if file_contents.is_empty() {
        "No specific files were provided for reference.".to_string()
    } else {
        let mut out = String::from("The following files are provided with their content:\n");
        for (path, content) in file_contents {
            let _ = write!(out, "\n### File: {path}\n```\n{content}\n```\n");
        }
        out
    };

    format!(
        r#"You are a coding assistant that helps developers implement features efficiently.

## Task
The user wants to complete the following task in their project:
- "{task}"

## Project Structure
{structure}

## Provided Files
{provided}

---

## Objective
Write a detailed, step-by-step implementation plan for the task.

## Plan Requirements
1. Steps: each step describes one concrete action. Include a code snippet when it helps. If no relevant files were provided, base the plan on common practice for this kind of project.
2. Dependencies: note when a step depends on another step, and list external libraries or frameworks that are required.
3. Final checklist: items to verify that the task was implemented correctly.

## Missing Information
- If the provided files do not contain what the task needs, say so in "missing_information": state the assumptions you made about the task and explain how you arrived at the plan.
- Suggest files from the Project Structure that would improve accuracy in "suggested_files".
- If nothing is missing, set "missing_information" to an empty string.

## Response Format
Reply with a single JSON object and nothing else:
{{
  "steps": [
    {{
      "step_number": 1,
      "description": "What to do in this step.",
      "code_snippet": "Relevant code, if any."
    }}
  ],
  "dependencies": ["Step or library dependencies."],
  "final_checklist": ["Verification items."],
  "missing_information": "",
  "suggested_files": ["path/from/project/structure"]
}}"#,
        structure = bullets(all_files, "No project structure provided."),
    )
}
