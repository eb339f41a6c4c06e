//! Parsing of model replies into plan domain types.

use serde::de::DeserializeOwned;
use taskweaver_core::error::PlanError;
use taskweaver_core::plan::{KeywordSuggestion, PlanResult};

/// Locate the JSON object in a model reply.
///
/// A bare object is returned as-is. Otherwise the outermost `{ ... }` slice
/// is taken, which tolerates code fences and chatter around the payload.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    if trimmed.starts_with('{') && trimmed.ends_with('}') {
        return Some(trimmed);
    }
    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    (end > start).then(|| &trimmed[start..=end])
}

fn parse_stage<T: DeserializeOwned>(stage: &str, content: &str) -> Result<T, PlanError> {
    if content.trim().is_empty() {
        return Err(PlanError::malformed(stage, "empty reply"));
    }
    let json = extract_json_object(content)
        .ok_or_else(|| PlanError::malformed(stage, "no JSON object in reply"))?;
    serde_json::from_str(json).map_err(|e| PlanError::malformed(stage, e.to_string()))
}

/// Parse the keyword-suggestion reply.
pub fn parse_keywords(content: &str) -> Result<KeywordSuggestion, PlanError> {
    parse_stage("keywords", content)
}

/// Parse the plan reply. `show_missing_information` always comes back false.
pub fn parse_plan(content: &str) -> Result<PlanResult, PlanError> {
    let mut plan: PlanResult = parse_stage("plan", content)?;
    plan.number_steps();
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage_of(err: PlanError) -> String {
        match err {
            PlanError::MalformedResponse { stage, .. } => stage,
        }
    }

    #[test]
    fn bare_object_passes_through() {
        assert_eq!(extract_json_object("  {\"a\":1}\n"), Some("{\"a\":1}"));
    }

    #[test]
    fn fenced_object_is_extracted() {
        let reply = "Here you go:\n```json\n{\"keywords\":[\"Sidebar\"]}\n```\n";
        assert_eq!(
            extract_json_object(reply),
            Some("{\"keywords\":[\"Sidebar\"]}")
        );
    }

    #[test]
    fn no_object_found() {
        assert_eq!(extract_json_object("no json here"), None);
        assert_eq!(extract_json_object("} backwards {"), None);
    }

    #[test]
    fn keywords_parse() {
        let s = parse_keywords(
            r#"{"keywords":["SidebarProvider","postMessage"],"missing_files":["src/extension.ts"]}"#,
        )
        .unwrap();
        assert_eq!(s.keywords, vec!["SidebarProvider", "postMessage"]);
        assert_eq!(s.missing_files, vec!["src/extension.ts"]);
    }

    #[test]
    fn keywords_missing_keys_default() {
        let s = parse_keywords("{}").unwrap();
        assert!(s.keywords.is_empty());
        assert!(s.missing_files.is_empty());
    }

    #[test]
    fn keywords_wrong_shape_is_malformed() {
        let err = parse_keywords(r#"{"keywords":"one two"}"#).unwrap_err();
        assert_eq!(stage_of(err), "keywords");
    }

    #[test]
    fn empty_reply_is_malformed() {
        let err = parse_keywords("   ").unwrap_err();
        assert_eq!(stage_of(err), "keywords");
        let err = parse_plan("").unwrap_err();
        assert_eq!(stage_of(err), "plan");
    }

    #[test]
    fn prose_reply_is_malformed() {
        let err = parse_plan("I could not produce a plan.").unwrap_err();
        assert_eq!(stage_of(err), "plan");
    }

    #[test]
    fn plan_step_without_number_is_accepted() {
        let plan =
            parse_plan(r#"{"steps":[{"description":"x"},{"step_number":1.0,"description":"y"}]}"#)
                .unwrap();
        assert_eq!(plan.steps.len(), 2);
        assert_eq!(plan.steps[0].step_number, 1);
        assert_eq!(plan.steps[0].description, "x");
        assert_eq!(plan.steps[1].step_number, 1);
    }

    #[test]
    fn plan_parses_and_ignores_model_flag() {
        let plan = parse_plan(
            r#"{
                "steps":[{"step_number":1,"description":"Add a command","code_snippet":"vscode.commands.registerCommand"}],
                "dependencies":["vscode"],
                "final_checklist":["Command shows in palette"],
                "missing_information":"",
                "suggested_files":[],
                "show_missing_information":true
            }"#,
        )
        .unwrap();
        assert_eq!(plan.steps.len(), 1);
        assert_eq!(plan.dependencies, vec!["vscode"]);
        assert!(!plan.show_missing_information);
        assert!(!plan.has_missing_information());
    }
}
